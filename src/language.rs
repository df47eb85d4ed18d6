//! Language detection with bounded confidence
//!
//! Classification is fallible and treated as best-effort: any failure
//! degrades to `("unknown", 0.0)` rather than failing the request.

use anyhow::{Context, Result};

/// Texts shorter than this carry too little signal to classify.
pub const MIN_TEXT_CHARS: usize = 50;

/// Language signal saturates quickly; classifying more is wasted work.
pub const CLASSIFY_SAMPLE_CHARS: usize = 2000;

/// Divisor of the raw-score remap. Raw scores are negative log-prob-like
/// values in roughly the -3000..0 range; downstream consumers depend on this
/// exact curve, so it is not tunable.
const SCORE_DIVISOR: f64 = 3000.0;

/// Sentinel label for undetectable language.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Capability interface for raw language classification.
///
/// Returns a language label and a raw negative-log-prob-style score; see
/// [`normalize_confidence`] for the mapping into [0, 1].
pub trait ClassifyLanguage {
    fn classify(&self, text: &str) -> Result<(String, f64)>;
}

/// Production classifier backed by whatlang.
///
/// whatlang reports confidence natively in [0, 1]; it is mapped into the
/// raw-score domain so the shared normalization curve recovers it exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangClassifier;

impl ClassifyLanguage for WhatlangClassifier {
    fn classify(&self, text: &str) -> Result<(String, f64)> {
        let info = whatlang::detect(text).context("language not recognized")?;
        let raw_score = (info.confidence() - 1.0) * SCORE_DIVISOR;
        Ok((info.lang().code().to_string(), raw_score))
    }
}

/// Map a raw classifier score to a bounded [0, 1] confidence.
///
/// Scores near 0 map near 1.0; scores at or below -3000 map to 0.0.
pub fn normalize_confidence(raw_score: f64) -> f64 {
    (1.0 + raw_score / SCORE_DIVISOR).clamp(0.0, 1.0)
}

/// Detect the language of `text`, returning `(code, confidence)`.
///
/// Short or empty input short-circuits to `("unknown", 0.0)` without
/// invoking the classifier. Only the first [`CLASSIFY_SAMPLE_CHARS`]
/// characters are classified. Classifier failures never propagate.
pub fn detect_language<C: ClassifyLanguage + ?Sized>(classifier: &C, text: &str) -> (String, f64) {
    if text.chars().count() < MIN_TEXT_CHARS {
        return (UNKNOWN_LANGUAGE.to_string(), 0.0);
    }

    let sample = match text.char_indices().nth(CLASSIFY_SAMPLE_CHARS) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    };

    match classifier.classify(sample) {
        Ok((language, raw_score)) => (language, normalize_confidence(raw_score)),
        Err(err) => {
            log::debug!("language classification failed: {err}");
            (UNKNOWN_LANGUAGE.to_string(), 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Test double that records whether it was invoked.
    struct RecordingClassifier {
        invoked: Cell<bool>,
        response: Result<(String, f64), String>,
    }

    impl RecordingClassifier {
        fn returning(label: &str, score: f64) -> Self {
            Self {
                invoked: Cell::new(false),
                response: Ok((label.to_string(), score)),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                invoked: Cell::new(false),
                response: Err(message.to_string()),
            }
        }
    }

    impl ClassifyLanguage for RecordingClassifier {
        fn classify(&self, _text: &str) -> Result<(String, f64)> {
            self.invoked.set(true);
            match &self.response {
                Ok(pair) => Ok(pair.clone()),
                Err(message) => Err(anyhow::anyhow!("{message}")),
            }
        }
    }

    #[test]
    fn confidence_normalization_endpoints() {
        assert_eq!(normalize_confidence(0.0), 1.0);
        assert_eq!(normalize_confidence(-3000.0), 0.0);
        assert_eq!(normalize_confidence(-6000.0), 0.0);
        assert_eq!(normalize_confidence(500.0), 1.0);
        let midpoint = normalize_confidence(-1500.0);
        assert!((midpoint - 0.5).abs() < 1e-9);
    }

    #[test]
    fn short_text_skips_the_classifier() {
        let classifier = RecordingClassifier::returning("en", 0.0);
        assert_eq!(
            detect_language(&classifier, "too short"),
            (UNKNOWN_LANGUAGE.to_string(), 0.0)
        );
        assert!(!classifier.invoked.get());

        assert_eq!(
            detect_language(&classifier, ""),
            (UNKNOWN_LANGUAGE.to_string(), 0.0)
        );
        assert!(!classifier.invoked.get());
    }

    #[test]
    fn classifier_failure_degrades_to_unknown() {
        let classifier = RecordingClassifier::failing("model unavailable");
        let text = "a".repeat(200);
        assert_eq!(
            detect_language(&classifier, &text),
            (UNKNOWN_LANGUAGE.to_string(), 0.0)
        );
        assert!(classifier.invoked.get());
    }

    #[test]
    fn long_text_is_sampled_before_classification() {
        struct LengthAsserting;
        impl ClassifyLanguage for LengthAsserting {
            fn classify(&self, text: &str) -> Result<(String, f64)> {
                assert_eq!(text.chars().count(), CLASSIFY_SAMPLE_CHARS);
                Ok(("en".to_string(), 0.0))
            }
        }
        let text = "word ".repeat(1000);
        let (language, confidence) = detect_language(&LengthAsserting, &text);
        assert_eq!(language, "en");
        assert_eq!(confidence, 1.0);
    }

    #[test]
    fn whatlang_detects_english_prose() {
        let text = "The quick brown fox jumps over the lazy dog, and then \
                    the dog chases the fox across the wide green meadow.";
        let (language, confidence) = detect_language(&WhatlangClassifier, text);
        assert_eq!(language, "eng");
        assert!(confidence > 0.0);
        assert!(confidence <= 1.0);
    }
}
