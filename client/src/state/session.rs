//! Signed-in session and sign-in form state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is the only state shared across widgets: the navbar reads the
//! display name, the sign-in modal writes it. The opaque bearer token lives
//! in `localStorage` (see `util::storage`), not here.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::UserResponse;

/// Current browser session.
///
/// In the Leptos tree this is held in an `RwSignal` provided via context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub display_name: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn logged_in(&self) -> bool {
        self.display_name.is_some()
    }

    /// Record a confirmed sign-in. Blank names are stored as `Farmer`.
    pub fn sign_in(&mut self, name: &str) {
        let name = name.trim();
        self.display_name = Some(if name.is_empty() { "Farmer".to_owned() } else { name.to_owned() });
    }

    /// Restore a session from a stored token's account. Uses the email, the
    /// same name a fresh sign-in shows.
    pub fn restore(&mut self, user: &UserResponse) {
        self.sign_in(&user.email);
    }

    pub fn sign_out(&mut self) {
        self.display_name = None;
    }
}

/// Which form the sign-in modal shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignInMode {
    #[default]
    SignIn,
    Register,
}

impl SignInMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::Register,
            Self::Register => Self::SignIn,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Login",
            Self::Register => "Register",
        }
    }

    /// Label of the submit button, accounting for an in-flight request.
    #[must_use]
    pub fn submit_label(self, loading: bool) -> &'static str {
        match (loading, self) {
            (true, _) => "Processing...",
            (false, Self::SignIn) => "Login",
            (false, Self::Register) => "Create Account",
        }
    }

    /// Prompt and button text for switching to the other mode.
    #[must_use]
    pub fn switch_prompt(self) -> (&'static str, &'static str) {
        match self {
            Self::SignIn => ("Don’t have an account?", "Register"),
            Self::Register => ("Already registered?", "Login"),
        }
    }
}

/// Validated sign-in form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
}

impl Credentials {
    /// Check the form fields for `mode`. Email and name are trimmed; the
    /// password is taken as typed.
    ///
    /// # Errors
    ///
    /// Returns an inline message naming the first missing field.
    pub fn from_form(mode: SignInMode, name: &str, email: &str, password: &str) -> Result<Self, &'static str> {
        let email = email.trim();
        if mode == SignInMode::Register && name.trim().is_empty() {
            return Err("Enter your name.");
        }
        if email.is_empty() {
            return Err("Enter your email.");
        }
        if password.is_empty() {
            return Err("Enter your password.");
        }
        Ok(match mode {
            SignInMode::SignIn => Self::Login { email: email.to_owned(), password: password.to_owned() },
            SignInMode::Register => {
                Self::Register { name: name.trim().to_owned(), email: email.to_owned(), password: password.to_owned() }
            }
        })
    }

    /// The identifier passed back as the display name after success.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Login { email, .. } | Self::Register { email, .. } => email,
        }
    }
}
