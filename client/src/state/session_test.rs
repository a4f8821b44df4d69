use super::*;

// =============================================================
// SessionState
// =============================================================

#[test]
fn session_default_is_logged_out() {
    let session = SessionState::default();
    assert!(!session.logged_in());
    assert_eq!(session.display_name, None);
}

#[test]
fn sign_in_then_out() {
    let mut session = SessionState::default();
    session.sign_in(" ravi@example.com ");
    assert!(session.logged_in());
    assert_eq!(session.display_name.as_deref(), Some("ravi@example.com"));

    session.sign_out();
    assert!(!session.logged_in());
}

#[test]
fn sign_in_with_blank_name_uses_placeholder() {
    let mut session = SessionState::default();
    session.sign_in("  ");
    assert_eq!(session.display_name.as_deref(), Some("Farmer"));
}

#[test]
fn restore_shows_same_name_as_fresh_sign_in() {
    let user = UserResponse { id: "u1".to_owned(), name: "Ravi".to_owned(), email: "ravi@example.com".to_owned() };
    let creds = Credentials::from_form(SignInMode::SignIn, "", "ravi@example.com", "pw").unwrap();

    let mut fresh = SessionState::default();
    fresh.sign_in(creds.identifier());
    let mut restored = SessionState::default();
    restored.restore(&user);

    assert_eq!(restored, fresh);
    assert_eq!(restored.display_name.as_deref(), Some("ravi@example.com"));
}

// =============================================================
// SignInMode
// =============================================================

#[test]
fn mode_toggles_between_forms() {
    assert_eq!(SignInMode::default(), SignInMode::SignIn);
    assert_eq!(SignInMode::SignIn.toggled(), SignInMode::Register);
    assert_eq!(SignInMode::Register.toggled(), SignInMode::SignIn);
}

#[test]
fn submit_label_tracks_mode_and_loading() {
    assert_eq!(SignInMode::SignIn.submit_label(false), "Login");
    assert_eq!(SignInMode::Register.submit_label(false), "Create Account");
    assert_eq!(SignInMode::Register.submit_label(true), "Processing...");
}

#[test]
fn titles_and_switch_prompts() {
    assert_eq!(SignInMode::SignIn.title(), "Login");
    assert_eq!(SignInMode::Register.title(), "Register");
    assert_eq!(SignInMode::SignIn.switch_prompt().1, "Register");
    assert_eq!(SignInMode::Register.switch_prompt().1, "Login");
}

// =============================================================
// Credentials
// =============================================================

#[test]
fn login_credentials_trim_email_only() {
    let creds = Credentials::from_form(SignInMode::SignIn, "ignored", " a@b.in ", " pw ").unwrap();
    assert_eq!(creds, Credentials::Login { email: "a@b.in".into(), password: " pw ".into() });
    assert_eq!(creds.identifier(), "a@b.in");
}

#[test]
fn register_requires_name() {
    assert_eq!(Credentials::from_form(SignInMode::Register, " ", "a@b.in", "pw"), Err("Enter your name."));
    let creds = Credentials::from_form(SignInMode::Register, " Ravi ", "a@b.in", "pw").unwrap();
    assert!(matches!(creds, Credentials::Register { ref name, .. } if name == "Ravi"));
}

#[test]
fn missing_email_or_password_rejected() {
    assert_eq!(Credentials::from_form(SignInMode::SignIn, "", "  ", "pw"), Err("Enter your email."));
    assert_eq!(Credentials::from_form(SignInMode::SignIn, "", "a@b.in", ""), Err("Enter your password."));
}
