//! Natural-language understanding: normalization, intent classification,
//! entity extraction.

pub mod classifier;
pub mod extractor;
pub mod normalizer;

pub use classifier::{Intent, IntentClassifier, IntentResult};
pub use extractor::{Entity, EntityExtractor, EntityLabel};
pub use normalizer::Normalizer;

use serde::{Deserialize, Serialize};

/// Combined NLU output for one message.
///
/// Classification works on normalized text; extraction works on the
/// original text. Both views are kept for downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluAnalysis {
    pub intent: Intent,
    pub confidence: f32,
    pub entities: Vec<Entity>,
    pub normalized_text: String,
    pub original_text: String,
}

/// Facade over the three NLU stages.
pub struct NluEngine {
    normalizer: Normalizer,
    classifier: IntentClassifier,
    extractor: EntityExtractor,
}

impl NluEngine {
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
            classifier: IntentClassifier::new(),
            extractor: EntityExtractor::new(),
        }
    }

    /// Run the full NLU stage on one message. Pure and infallible.
    pub fn analyze(&self, text: &str) -> NluAnalysis {
        let normalized = self.normalizer.normalize(text);
        let result = self.classifier.classify_normalized(text, &normalized);
        let entities = self.extractor.extract(text);

        NluAnalysis {
            intent: result.intent,
            confidence: result.confidence,
            entities,
            normalized_text: normalized,
            original_text: text.to_string(),
        }
    }
}

impl Default for NluEngine {
    fn default() -> Self {
        Self::new()
    }
}
