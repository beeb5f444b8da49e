//! Entity extraction from plain text.
//!
//! Combines an injected named-entity model with fixed email and phone
//! patterns. The model is optional: without one, extraction yields no
//! spans and callers degrade to their line-based fallbacks.

use docstruct_core::{EntityLabel, EntitySpan};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").unwrap());

/// Failure inside a named-entity model.
#[derive(Error, Debug)]
#[error("entity model error: {0}")]
pub struct ModelError(pub String);

/// A named-entity recognition model.
///
/// Injected into [`EntityExtractor`] rather than held as process-global
/// state, so tests can substitute deterministic stubs.
pub trait NamedEntityModel: Send + Sync {
    /// Model name for logging.
    fn name(&self) -> &str;

    /// Recognize entity spans in `text`, in document order.
    fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, ModelError>;
}

/// Extracts tagged spans from raw text.
///
/// Runs the model first, then scans independently for email addresses and
/// 10-digit phone numbers. Never fails the caller: with no model the
/// result is empty, and a model failure is logged and yields an empty
/// result. Overlapping spans from different detectors are not
/// deduplicated.
#[derive(Clone)]
pub struct EntityExtractor {
    model: Option<Arc<dyn NamedEntityModel>>,
}

impl EntityExtractor {
    /// Create an extractor around an optional model.
    pub fn new(model: Option<Arc<dyn NamedEntityModel>>) -> Self {
        Self { model }
    }

    /// True if a model is attached.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Extract spans from `text`.
    ///
    /// Span offsets are byte positions of the actual matches.
    pub fn extract(&self, text: &str) -> Vec<EntitySpan> {
        let Some(model) = &self.model else {
            return Vec::new();
        };

        let mut spans = match model.recognize(text) {
            Ok(spans) => spans,
            Err(err) => {
                warn!(model = model.name(), error = %err, "entity model failed");
                return Vec::new();
            }
        };

        for found in EMAIL_RE.find_iter(text) {
            spans.push(EntitySpan::new(
                found.as_str(),
                EntityLabel::Email,
                found.start(),
                found.end(),
            ));
        }

        for found in PHONE_RE.find_iter(text) {
            spans.push(EntitySpan::new(
                found.as_str(),
                EntityLabel::Phone,
                found.start(),
                found.end(),
            ));
        }

        spans
    }
}

static ORG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:[A-Z][A-Za-z&]*\s+)+(?:Inc|Corp|Corporation|LLC|Ltd|Co|Company|Technologies|Labs|Group)\b\.?",
    )
    .unwrap()
});

static TITLED_PERSON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Mr|Mrs|Ms|Dr|Prof)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?").unwrap()
});

static NAME_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+)\s+[A-Z][a-z]+\b").unwrap());

static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").unwrap());

static WRITTEN_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}\b",
    )
    .unwrap()
});

static MONEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\d[\d,]*(?:\.\d+)?").unwrap());

/// Common given names used to qualify bare capitalized word pairs as
/// PERSON candidates.
const FIRST_NAMES: &[&str] = &[
    "Alice", "Amanda", "Andrew", "Anna", "Anthony", "Barbara", "Brian", "Carlos", "Carol",
    "Charles", "Christopher", "Daniel", "David", "Deborah", "Donald", "Dorothy", "Edward",
    "Elizabeth", "Emily", "Emma", "George", "Hannah", "Helen", "Jacob", "James", "Jane",
    "Jennifer", "Jessica", "John", "Joseph", "Karen", "Kenneth", "Kevin", "Laura", "Linda",
    "Lisa", "Margaret", "Maria", "Mark", "Mary", "Matthew", "Michael", "Michelle", "Nancy",
    "Patricia", "Paul", "Peter", "Richard", "Robert", "Ronald", "Sandra", "Sarah", "Steven",
    "Susan", "Thomas", "William",
];

/// Rule-based named-entity model.
///
/// Pattern rules plus a given-name gazetteer covering PERSON, ORG, DATE,
/// and MONEY.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedModel;

impl RuleBasedModel {
    /// Create the model.
    pub fn new() -> Self {
        Self
    }
}

impl NamedEntityModel for RuleBasedModel {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, ModelError> {
        let mut spans = Vec::new();

        for found in ORG_RE.find_iter(text) {
            spans.push(EntitySpan::new(
                found.as_str(),
                EntityLabel::Org,
                found.start(),
                found.end(),
            ));
        }

        for found in TITLED_PERSON_RE.find_iter(text) {
            spans.push(EntitySpan::new(
                found.as_str(),
                EntityLabel::Person,
                found.start(),
                found.end(),
            ));
        }

        for capture in NAME_PAIR_RE.captures_iter(text) {
            let first = capture.get(1).map(|m| m.as_str()).unwrap_or_default();
            if FIRST_NAMES.contains(&first) {
                let whole = capture.get(0).expect("capture 0 always present");
                spans.push(EntitySpan::new(
                    whole.as_str(),
                    EntityLabel::Person,
                    whole.start(),
                    whole.end(),
                ));
            }
        }

        for re in [&NUMERIC_DATE_RE, &WRITTEN_DATE_RE] {
            for found in re.find_iter(text) {
                spans.push(EntitySpan::new(
                    found.as_str(),
                    EntityLabel::Date,
                    found.start(),
                    found.end(),
                ));
            }
        }

        for found in MONEY_RE.find_iter(text) {
            spans.push(EntitySpan::new(
                found.as_str(),
                EntityLabel::Money,
                found.start(),
                found.end(),
            ));
        }

        spans.sort_by_key(|span| (span.start, span.end));
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingModel;

    impl NamedEntityModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, ModelError> {
            Err(ModelError("model exploded".to_string()))
        }
    }

    struct EmptyModel;

    impl NamedEntityModel for EmptyModel {
        fn name(&self) -> &str {
            "empty"
        }

        fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, ModelError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_no_model_yields_no_spans() {
        let extractor = EntityExtractor::new(None);
        assert!(extractor.extract("Contact: a@b.com").is_empty());
        assert!(!extractor.has_model());
    }

    #[test]
    fn test_model_failure_yields_no_spans() {
        let extractor = EntityExtractor::new(Some(Arc::new(FailingModel)));
        assert!(extractor.extract("Contact: a@b.com and 555-123-4567").is_empty());
    }

    #[test]
    fn test_email_span_offsets_are_match_positions() {
        let extractor = EntityExtractor::new(Some(Arc::new(EmptyModel)));
        let text = "a@b.com again a@b.com";
        let spans = extractor.extract(text);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].label, EntityLabel::Email);
        assert_eq!((spans[0].start, spans[0].end), (0, 7));
        // The second occurrence keeps its own offset.
        assert_eq!((spans[1].start, spans[1].end), (14, 21));
        assert_eq!(&text[spans[1].start..spans[1].end], "a@b.com");
    }

    #[test]
    fn test_phone_patterns() {
        let extractor = EntityExtractor::new(Some(Arc::new(EmptyModel)));
        for text in ["555-123-4567", "555.123.4567", "5551234567"] {
            let spans = extractor.extract(text);
            assert_eq!(spans.len(), 1, "no match for {text}");
            assert_eq!(spans[0].label, EntityLabel::Phone);
            assert_eq!(spans[0].text, text);
        }
    }

    #[test]
    fn test_model_and_pattern_spans_combine() {
        let extractor = EntityExtractor::new(Some(Arc::new(RuleBasedModel::new())));
        let spans = extractor.extract("Invoice from Acme Corp, pay $1,200.50 or email billing@acme.com");

        let labels: Vec<EntityLabel> = spans.iter().map(|s| s.label).collect();
        assert!(labels.contains(&EntityLabel::Org));
        assert!(labels.contains(&EntityLabel::Money));
        assert!(labels.contains(&EntityLabel::Email));
    }

    #[test]
    fn test_rule_model_person() {
        let model = RuleBasedModel::new();
        let spans = model.recognize("Meeting with Dr. Jones and Sarah Connor").unwrap();

        let people: Vec<&EntitySpan> =
            spans.iter().filter(|s| s.label == EntityLabel::Person).collect();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].text, "Dr. Jones");
        assert_eq!(people[1].text, "Sarah Connor");
    }

    #[test]
    fn test_rule_model_dates() {
        let model = RuleBasedModel::new();
        let spans = model
            .recognize("Due 12/31/2024, signed March 5, 2023")
            .unwrap();

        let dates: Vec<&str> = spans
            .iter()
            .filter(|s| s.label == EntityLabel::Date)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(dates, vec!["12/31/2024", "March 5, 2023"]);
    }

    #[test]
    fn test_rule_model_ignores_plain_prose() {
        let model = RuleBasedModel::new();
        let spans = model
            .recognize("the quick brown fox jumps over the lazy dog")
            .unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_span_bounds_within_text() {
        let extractor = EntityExtractor::new(Some(Arc::new(RuleBasedModel::new())));
        let text = "Call Mr. Smith at 555-123-4567 about the $500 invoice";
        for span in extractor.extract(text) {
            assert!(span.start <= span.end);
            assert!(span.end <= text.len());
            assert_eq!(&text[span.start..span.end], span.text);
        }
    }
}
