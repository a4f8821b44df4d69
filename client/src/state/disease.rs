//! Disease-detection widget state, advice table and result rendering.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend answers `{label, confidence, result}`. The label keys a
//! static advice table kept here; the free-text `result` is split into
//! section headings and bullet items for display.

#[cfg(test)]
#[path = "disease_test.rs"]
mod disease_test;

use wire::{PredictResponse, UNKNOWN_LABEL, normalize_label};

use super::request::{RequestSeq, Ticket};

/// Shown whenever the prediction call fails for any reason.
pub const SERVER_ERROR_MESSAGE: &str = "Server not responding. Try again later.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    #[error("Please choose an image file.")]
    NotAnImage,
    #[error("Choose a leaf photo first.")]
    NoFile,
}

/// Accept only `image/*` MIME types.
///
/// # Errors
///
/// [`DetectionError::NotAnImage`] for anything else.
pub fn validate_image(mime: &str) -> Result<(), DetectionError> {
    if mime.trim().to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        Err(DetectionError::NotAnImage)
    }
}

// =============================================================================
// ADVICE
// =============================================================================

/// Canned guidance for one disease label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Advice {
    pub symptoms: &'static str,
    pub treatment: &'static str,
    pub prevention: &'static str,
}

const GENERIC_ADVICE: Advice = Advice {
    symptoms: "The disease could not be identified with confidence from this photo.",
    treatment: "Remove badly affected leaves and show a fresh sample to your local Krishi Vigyan Kendra.",
    prevention: "Use certified seed, rotate crops and avoid overhead watering late in the day.",
};

const ADVICE: &[(&str, Advice)] = &[
    ("healthy", Advice {
        symptoms: "No disease symptoms detected.",
        treatment: "No treatment needed.",
        prevention: "Keep monitoring weekly and maintain balanced fertiliser and irrigation.",
    }),
    ("tomato_early_blight", Advice {
        symptoms: "Brown spots with concentric rings on older leaves, yellowing around the spots.",
        treatment: "Remove infected leaves; spray mancozeb or chlorothalonil as per label dose.",
        prevention: "Mulch the soil, stake plants and rotate away from tomato and potato for two seasons.",
    }),
    ("tomato_late_blight", Advice {
        symptoms: "Dark water-soaked patches on leaves and stems, white mould under leaves in humid weather.",
        treatment: "Destroy infected plants; spray metalaxyl + mancozeb at the first sign.",
        prevention: "Avoid wetting foliage, improve spacing for airflow and use resistant varieties.",
    }),
    ("tomato_leaf_curl_virus", Advice {
        symptoms: "Upward curling, crinkled and small leaves; stunted plants with few fruits.",
        treatment: "Uproot infected plants; control whiteflies with neem oil or imidacloprid.",
        prevention: "Raise seedlings under insect net, use yellow sticky traps and resistant hybrids.",
    }),
    ("potato_early_blight", Advice {
        symptoms: "Small dark spots with target-like rings on lower leaves.",
        treatment: "Spray mancozeb or chlorothalonil at 10-day intervals.",
        prevention: "Use healthy seed tubers, balanced nitrogen and crop rotation.",
    }),
    ("potato_late_blight", Advice {
        symptoms: "Pale green to black lesions on leaves, white growth underneath, rotting tubers.",
        treatment: "Spray cymoxanil + mancozeb; remove and bury infected haulms.",
        prevention: "Plant certified seed, earth up well and avoid irrigation in cloudy humid spells.",
    }),
    ("rice_blast", Advice {
        symptoms: "Spindle-shaped grey spots with brown borders on leaves; neck rot of panicles.",
        treatment: "Spray tricyclazole at boot leaf and heading stages.",
        prevention: "Avoid excess nitrogen, use resistant varieties and treat seed with carbendazim.",
    }),
    ("rice_brown_spot", Advice {
        symptoms: "Oval brown spots with grey centres on leaves and grains.",
        treatment: "Spray mancozeb or propiconazole; correct potassium deficiency.",
        prevention: "Use clean seed, balanced fertiliser and keep fields well drained.",
    }),
    ("rice_bacterial_leaf_blight", Advice {
        symptoms: "Yellow to white stripes from leaf tips and edges, drying leaves.",
        treatment: "Drain the field; spray streptocycline with copper oxychloride.",
        prevention: "Avoid clipping seedlings, split nitrogen doses and use resistant varieties.",
    }),
    ("wheat_leaf_rust", Advice {
        symptoms: "Orange-brown powdery pustules scattered on leaves.",
        treatment: "Spray propiconazole or tebuconazole when pustules first appear.",
        prevention: "Sow rust-resistant varieties on time and remove volunteer wheat.",
    }),
    ("maize_common_rust", Advice {
        symptoms: "Cinnamon-brown pustules on both leaf surfaces.",
        treatment: "Spray mancozeb or azoxystrobin if infection appears before tasseling.",
        prevention: "Grow tolerant hybrids and avoid late sowing.",
    }),
    ("powdery_mildew", Advice {
        symptoms: "White powdery patches on leaves and stems.",
        treatment: "Spray wettable sulphur or potassium bicarbonate; neem oil for organic control.",
        prevention: "Improve airflow, avoid excess nitrogen and water at the base of plants.",
    }),
];

/// Advice for a label, or the generic fallback for unknown labels.
#[must_use]
pub fn advice_for(label: &str) -> &'static Advice {
    let key = normalize_label(label);
    ADVICE
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(&GENERIC_ADVICE, |(_, advice)| advice)
}

/// `tomato_late_blight` as `Tomato Late Blight`.
#[must_use]
pub fn display_label(label: &str) -> String {
    let key = normalize_label(label);
    if key.is_empty() || key == UNKNOWN_LABEL {
        return "Unknown disease".to_owned();
    }
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Confidence in `0.0..=1.0` as a whole percentage.
#[must_use]
pub fn confidence_label(confidence: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let pct = (confidence.clamp(0.0, 1.0) * 100.0).round() as i64;
    format!("{pct}%")
}

// =============================================================================
// RESULT TEXT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Symptoms,
    Organic,
    Chemical,
    Prevention,
}

impl Section {
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Symptoms => "🟡 Symptoms",
            Self::Organic => "🌱 Organic Remedy",
            Self::Chemical => "🧪 Chemical Remedy",
            Self::Prevention => "✅ Prevention Tips",
        }
    }

    fn detect(line: &str) -> Option<Self> {
        let lower = line.to_lowercase();
        [
            ("symptoms", Self::Symptoms),
            ("organic", Self::Organic),
            ("chemical", Self::Chemical),
            ("prevention", Self::Prevention),
        ]
        .into_iter()
        .find_map(|(prefix, section)| lower.starts_with(prefix).then_some(section))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailLine {
    Heading(Section),
    Item(String),
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(|c: char| c == '*' || c == '•' || c == '-' || c.is_whitespace())
        .trim()
}

/// Split model text into headings and items. A heading line keeps any text
/// after its colon as the first item of the section.
#[must_use]
pub fn parse_details(text: &str) -> Vec<DetailLine> {
    let mut out = Vec::new();
    for line in text.lines().map(strip_bullet).filter(|l| !l.is_empty()) {
        match Section::detect(line) {
            Some(section) => {
                out.push(DetailLine::Heading(section));
                if let Some((_, rest)) = line.split_once(':') {
                    let rest = rest.trim();
                    if !rest.is_empty() {
                        out.push(DetailLine::Item(rest.to_owned()));
                    }
                }
            }
            None => out.push(DetailLine::Item(line.to_owned())),
        }
    }
    out
}

/// What the widget shows after a detection attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionResult {
    pub label: String,
    pub title: String,
    pub confidence: Option<f64>,
    pub advice: Option<&'static Advice>,
    pub details: Vec<DetailLine>,
    pub timestamp: String,
}

impl DetectionResult {
    #[must_use]
    pub fn from_response(resp: &PredictResponse, timestamp: String) -> Self {
        let label = normalize_label(&resp.label);
        Self {
            title: display_label(&label),
            advice: Some(advice_for(&label)),
            label,
            confidence: resp.confidence,
            details: parse_details(&resp.result),
            timestamp,
        }
    }

    /// The generic failure result.
    #[must_use]
    pub fn server_error(timestamp: String) -> Self {
        Self {
            label: UNKNOWN_LABEL.to_owned(),
            title: "Error".to_owned(),
            confidence: None,
            advice: None,
            details: vec![DetailLine::Item(SERVER_ERROR_MESSAGE.to_owned())],
            timestamp,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.advice.is_none()
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Disease widget state. The `web_sys::File` itself stays in the page.
#[derive(Clone, Debug, Default)]
pub struct DiseaseState {
    pub file_name: Option<String>,
    pub preview_url: Option<String>,
    pub loading: bool,
    pub result: Option<DetectionResult>,
    pub error: Option<String>,
    pub seq: RequestSeq,
}

impl DiseaseState {
    /// Accept a chosen file. Rejected files leave the current selection as is.
    ///
    /// # Errors
    ///
    /// [`DetectionError::NotAnImage`] for non-image MIME types.
    pub fn accept_file(&mut self, name: &str, mime: &str) -> Result<(), DetectionError> {
        if let Err(e) = validate_image(mime) {
            self.error = Some(e.to_string());
            return Err(e);
        }
        self.file_name = Some(name.to_owned());
        self.result = None;
        self.error = None;
        Ok(())
    }

    /// Swap in a new preview URL, returning the old one so it can be revoked.
    pub fn replace_preview(&mut self, url: String) -> Option<String> {
        self.preview_url.replace(url)
    }

    #[must_use]
    pub fn can_detect(&self) -> bool {
        self.file_name.is_some() && !self.loading
    }

    /// # Errors
    ///
    /// [`DetectionError::NoFile`] when nothing has been chosen.
    pub fn begin_detect(&mut self) -> Result<Ticket, DetectionError> {
        if self.file_name.is_none() {
            return Err(DetectionError::NoFile);
        }
        self.loading = true;
        self.result = None;
        self.error = None;
        Ok(self.seq.issue())
    }

    /// Apply a prediction; any failure becomes the generic error result.
    pub fn finish_detect(&mut self, ticket: Ticket, result: Result<PredictResponse, String>, timestamp: String) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.result = Some(match result {
            Ok(resp) => DetectionResult::from_response(&resp, timestamp),
            Err(e) => {
                leptos::logging::warn!("disease prediction failed: {e}");
                DetectionResult::server_error(timestamp)
            }
        });
        true
    }
}
