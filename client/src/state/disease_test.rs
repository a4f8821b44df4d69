use super::*;

// =============================================================
// validate_image
// =============================================================

#[test]
fn image_mime_types_accepted() {
    assert_eq!(validate_image("image/jpeg"), Ok(()));
    assert_eq!(validate_image("IMAGE/PNG"), Ok(()));
}

#[test]
fn non_image_mime_types_rejected() {
    assert_eq!(validate_image("application/pdf"), Err(DetectionError::NotAnImage));
    assert_eq!(validate_image(""), Err(DetectionError::NotAnImage));
    assert_eq!(validate_image("text/image/png"), Err(DetectionError::NotAnImage));
}

// =============================================================
// Advice
// =============================================================

#[test]
fn every_catalogue_label_has_specific_advice() {
    for label in wire::DISEASE_LABELS {
        assert_ne!(advice_for(label), &GENERIC_ADVICE, "missing advice for {label}");
    }
}

#[test]
fn advice_lookup_normalises_label() {
    assert_eq!(advice_for("Tomato___Late blight"), advice_for("tomato_late_blight"));
    assert_eq!(advice_for("rice - blast"), advice_for("rice_blast"));
}

#[test]
fn unknown_label_gets_generic_advice() {
    assert_eq!(advice_for("banana_wilt"), &GENERIC_ADVICE);
    assert_eq!(advice_for(""), &GENERIC_ADVICE);
}

#[test]
fn display_label_title_cases_words() {
    assert_eq!(display_label("tomato_late_blight"), "Tomato Late Blight");
    assert_eq!(display_label("unknown"), "Unknown disease");
}

#[test]
fn confidence_label_rounds_and_clamps() {
    assert_eq!(confidence_label(0.916), "92%");
    assert_eq!(confidence_label(1.7), "100%");
}

// =============================================================
// parse_details
// =============================================================

#[test]
fn details_split_headings_and_items() {
    let text = "Symptoms: brown rings on leaves\n\n* Organic:\n- spray neem oil\n• Chemical: mancozeb 2 g/l\nPrevention - rotate crops\nWatch closely";
    let lines = parse_details(text);
    assert_eq!(
        lines,
        vec![
            DetailLine::Heading(Section::Symptoms),
            DetailLine::Item("brown rings on leaves".into()),
            DetailLine::Heading(Section::Organic),
            DetailLine::Item("spray neem oil".into()),
            DetailLine::Heading(Section::Chemical),
            DetailLine::Item("mancozeb 2 g/l".into()),
            DetailLine::Heading(Section::Prevention),
            DetailLine::Item("Watch closely".into()),
        ]
    );
}

#[test]
fn headings_match_case_insensitively() {
    assert_eq!(parse_details("SYMPTOMS"), vec![DetailLine::Heading(Section::Symptoms)]);
    assert_eq!(Section::Prevention.heading(), "✅ Prevention Tips");
}

#[test]
fn blank_text_has_no_details() {
    assert!(parse_details("  \n \r\n").is_empty());
}

// =============================================================
// DetectionResult
// =============================================================

#[test]
fn result_from_response_looks_up_advice() {
    let resp = PredictResponse { label: "Rice_Blast".into(), confidence: Some(0.8), result: "Symptoms: grey spots".into() };
    let result = DetectionResult::from_response(&resp, "10:00 AM".into());
    assert_eq!(result.label, "rice_blast");
    assert_eq!(result.title, "Rice Blast");
    assert_eq!(result.advice, Some(advice_for("rice_blast")));
    assert_eq!(result.details.len(), 2);
    assert!(!result.is_error());
}

#[test]
fn server_error_result_is_generic() {
    let result = DetectionResult::server_error(String::new());
    assert!(result.is_error());
    assert_eq!(result.details, vec![DetailLine::Item(SERVER_ERROR_MESSAGE.into())]);
}

// =============================================================
// DiseaseState
// =============================================================

#[test]
fn rejected_file_keeps_previous_selection() {
    let mut state = DiseaseState::default();
    state.accept_file("leaf.jpg", "image/jpeg").unwrap();
    assert_eq!(state.accept_file("notes.pdf", "application/pdf"), Err(DetectionError::NotAnImage));
    assert_eq!(state.file_name.as_deref(), Some("leaf.jpg"));
    assert_eq!(state.error.as_deref(), Some("Please choose an image file."));
}

#[test]
fn detect_requires_a_file() {
    let mut state = DiseaseState::default();
    assert!(!state.can_detect());
    assert_eq!(state.begin_detect(), Err(DetectionError::NoFile));
    assert!(!state.loading);
}

#[test]
fn failed_detection_becomes_error_result() {
    let mut state = DiseaseState::default();
    state.accept_file("leaf.png", "image/png").unwrap();
    let ticket = state.begin_detect().unwrap();
    assert!(!state.can_detect());
    assert!(state.finish_detect(ticket, Err("request failed: 502".into()), "t".into()));
    assert!(!state.loading);
    assert!(state.result.as_ref().is_some_and(DetectionResult::is_error));
}

#[test]
fn stale_detection_is_dropped() {
    let mut state = DiseaseState::default();
    state.accept_file("a.png", "image/png").unwrap();
    let first = state.begin_detect().unwrap();
    let second = state.begin_detect().unwrap();
    let resp = PredictResponse { label: "healthy".into(), confidence: None, result: String::new() };
    assert!(!state.finish_detect(first, Ok(resp.clone()), "t".into()));
    assert!(state.result.is_none());
    assert!(state.finish_detect(second, Ok(resp), "t".into()));
    assert_eq!(state.result.as_ref().map(|r| r.label.as_str()), Some("healthy"));
}

#[test]
fn replace_preview_returns_old_url() {
    let mut state = DiseaseState::default();
    assert_eq!(state.replace_preview("blob:1".into()), None);
    assert_eq!(state.replace_preview("blob:2".into()), Some("blob:1".into()));
}
