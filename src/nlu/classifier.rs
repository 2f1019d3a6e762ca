//! Keyword-based intent classifier.
//!
//! Deterministic, inspectable scoring rules, not a trained model.
//! Each scored category sums keyword hits plus a strong-phrase bonus;
//! the decision is an ordered rule list where the last qualifying rule wins.
//! That precedence is load-bearing: complaint and modify signals are allowed
//! to clobber an ambiguous tracking/stock match, and the phrase-gated
//! greeting/thanks rules only fire when nothing scored confidently.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::nlu::normalizer::Normalizer;

/// The closed set of user intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    #[serde(rename = "trackear_pedido")]
    TrackOrder,
    #[serde(rename = "consultar_stock")]
    CheckStock,
    #[serde(rename = "consultar_precio")]
    CheckPrice,
    #[serde(rename = "cambiar_pedido")]
    ChangeOrder,
    #[serde(rename = "queja_reclamo")]
    Complaint,
    #[serde(rename = "saludo")]
    Greeting,
    #[serde(rename = "agradecimiento")]
    Thanks,
    #[serde(rename = "intencion_desconocida")]
    Unknown,
}

impl Intent {
    /// Wire name, as emitted in responses and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::TrackOrder => "trackear_pedido",
            Intent::CheckStock => "consultar_stock",
            Intent::CheckPrice => "consultar_precio",
            Intent::ChangeOrder => "cambiar_pedido",
            Intent::Complaint => "queja_reclamo",
            Intent::Greeting => "saludo",
            Intent::Thanks => "agradecimiento",
            Intent::Unknown => "intencion_desconocida",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Intent::Unknown)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification outcome: one intent plus a heuristic confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    pub confidence: f32,
}

// ── Keyword and phrase tables ───────────────────────────────────────

const TRACKING_KEYWORDS: &[&str] = &[
    "donde", "dónde", "está", "esta", "pedido", "envío", "envio", "rastrear", "tracking",
    "seguimiento", "paquete", "entrega", "llega", "llegó", "demora", "tardanza", "ubicación",
    "ubicacion", "trayecto", "camino", "transito", "tránsito", "courier", "entregado", "recibido",
    "distribucion", "distribución",
];

const TRACKING_PHRASES: &[&str] = &[
    "donde esta",
    "dónde está",
    "donde esta mi",
    "dónde está mi",
    "rastrear pedido",
    "tracking",
    "seguimiento",
    "mi pedido",
    "mi envío",
    "mi envio",
    "numero de seguimiento",
    "código de rastreo",
];

const STOCK_KEYWORDS: &[&str] = &[
    "stock", "disponible", "hay", "tienen", "tenés", "tenes", "queda", "quedan", "existencia",
    "inventario", "producto", "artículo", "articulo", "mercadería", "mercaderia", "disponibilidad",
];

const STOCK_PHRASES: &[&str] = &[
    "tienen stock",
    "hay stock",
    "tiene stock",
    "tenes stock",
    "stock del",
    "stock de",
    "disponible",
    "en stock",
    "hay disponibilidad",
    "disponibilidad de",
];

const PRICE_KEYWORDS: &[&str] = &[
    "precio", "cuesta", "vale", "cuanto", "cuánto", "costo", "sale", "cobran", "pagar", "barato",
    "caro", "oferta", "promoción", "promocion", "descuento", "valor", "estan",
];

const PRICE_PHRASES: &[&str] = &[
    "cuanto cuesta",
    "cuánto cuesta",
    "cuanto sale",
    "cuánto sale",
    "cual es el precio",
    "cuál es el precio",
    "que precio",
    "cual es el valor",
    "cuál es el valor",
    "a cuanto",
    "a cuánto",
    "cuanto estan",
    "cuánto están",
];

/// Cost words that, together with a digit or `$` in the raw text, add a
/// price-confirmation bonus (e.g. "cuesta $5000?").
const PRICE_COST_WORDS: &[&str] = &["cuesta", "vale", "precio"];

const MODIFY_KEYWORDS: &[&str] = &[
    "cancelar",
    "cambiar",
    "devolver",
    "devolución",
    "devolucion",
    "equivocado",
    "error",
    "mal",
    "modificar",
    "anular",
];

const MODIFY_PHRASES: &[&str] = &[
    "quiero cancelar",
    "cancelar pedido",
    "cambiar pedido",
    "me equivoqué",
    "pedido equivocado",
    "no quiero",
    "devolver",
    "modificar pedido",
    "modificar el pedido",
    "anular pedido",
];

const COMPLAINT_KEYWORDS: &[&str] = &[
    "queja", "reclamo", "problema", "mal", "mala", "malo", "pésimo", "pesimo", "defectuoso",
    "roto", "dañado", "danado", "enojado", "molesto", "indignado", "fraude", "estafa", "no llega",
    "horrible", "nunca",
];

const COMPLAINT_PHRASES: &[&str] = &[
    "tengo un problema",
    "no funciona",
    "mal servicio",
    "quiero reclamar",
    "esto es un",
    "no entiendo",
    "nunca me llega",
    "nunca llega",
    "esto es horrible",
];

const GREETING_PHRASES: &[&str] = &[
    "hola",
    "buenos días",
    "buenas tardes",
    "buenas noches",
    "buen día",
    "buenas",
    "saludos",
    "qué tal",
    "que tal",
    "como estas",
    "cómo estás",
    "hey",
    "ey",
];

const THANKS_PHRASES: &[&str] = &[
    "gracias",
    "muchas gracias",
    "muy amable",
    "perfecto",
    "genial",
    "excelente",
    "chau",
    "adiós",
    "adios",
    "hasta luego",
    "nos vemos",
    "abrazo",
    "saludos",
];

// ── Scoring ─────────────────────────────────────────────────────────

/// Per-category scores and phrase signals for one message.
#[derive(Debug, Clone, Copy)]
struct ScoreBoard {
    tracking: u32,
    stock: u32,
    price: u32,
    modify: u32,
    complaint: u32,
    greeting_phrase: bool,
    thanks_phrase: bool,
}

impl ScoreBoard {
    fn compute(raw: &str, normalized: &str) -> Self {
        let mut tracking = keyword_hits(normalized, TRACKING_KEYWORDS);
        if any_phrase(normalized, TRACKING_PHRASES) {
            tracking += 3;
        }

        let mut stock = keyword_hits(normalized, STOCK_KEYWORDS);
        if any_phrase(normalized, STOCK_PHRASES) {
            stock += 3;
        }

        let mut price = keyword_hits(normalized, PRICE_KEYWORDS);
        if any_phrase(normalized, PRICE_PHRASES) {
            price += 3;
        }
        // Price confirmation: cost word plus a digit or currency symbol in
        // the raw (non-normalized) text.
        let raw_has_amount = raw.contains('$') || raw.chars().any(|c| c.is_ascii_digit());
        if raw_has_amount && PRICE_COST_WORDS.iter().any(|w| normalized.contains(w)) {
            price += 2;
        }

        let mut modify = keyword_hits(normalized, MODIFY_KEYWORDS);
        if any_phrase(normalized, MODIFY_PHRASES) {
            modify += 3;
        }

        // Complaint phrases carry a lower bonus than the other categories.
        let mut complaint = keyword_hits(normalized, COMPLAINT_KEYWORDS);
        if any_phrase(normalized, COMPLAINT_PHRASES) {
            complaint += 2;
        }

        Self {
            tracking,
            stock,
            price,
            modify,
            complaint,
            greeting_phrase: any_phrase(normalized, GREETING_PHRASES),
            thanks_phrase: any_phrase(normalized, THANKS_PHRASES),
        }
    }
}

/// Each keyword contributes at most once, as a substring hit.
fn keyword_hits(text: &str, keywords: &[&str]) -> u32 {
    keywords.iter().filter(|kw| text.contains(*kw)).count() as u32
}

fn any_phrase(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

/// Confidence mapping for scored categories.
fn scored_confidence(score: u32) -> f32 {
    (0.5 + score as f32 * 0.15).min(0.95)
}

/// Confidence for the phrase-gated greeting/thanks categories.
const PHRASE_CONFIDENCE: f32 = 0.85;

// ── Decision rules ──────────────────────────────────────────────────

/// One decision rule: given the score board and the confidence of whatever
/// rule last won, return `Some(confidence)` if this category qualifies.
struct CategoryRule {
    intent: Intent,
    qualifies: fn(&ScoreBoard, f32) -> Option<f32>,
}

/// Ordered rule list. Evaluated top to bottom; the LAST qualifying rule
/// wins. Reordering these changes behavior.
fn decision_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule {
            intent: Intent::TrackOrder,
            qualifies: |b, _| (b.tracking >= 2).then(|| scored_confidence(b.tracking)),
        },
        CategoryRule {
            intent: Intent::CheckStock,
            qualifies: |b, _| {
                (b.stock >= 2 && b.stock > b.tracking).then(|| scored_confidence(b.stock))
            },
        },
        CategoryRule {
            intent: Intent::CheckPrice,
            qualifies: |b, _| {
                (b.price >= 2 && b.price > b.tracking.max(b.stock))
                    .then(|| scored_confidence(b.price))
            },
        },
        CategoryRule {
            intent: Intent::ChangeOrder,
            qualifies: |b, _| (b.modify >= 2).then(|| scored_confidence(b.modify)),
        },
        CategoryRule {
            intent: Intent::Complaint,
            qualifies: |b, _| (b.complaint >= 2).then(|| scored_confidence(b.complaint)),
        },
        CategoryRule {
            intent: Intent::Greeting,
            qualifies: |b, current| {
                (b.greeting_phrase && current < 0.5).then_some(PHRASE_CONFIDENCE)
            },
        },
        CategoryRule {
            intent: Intent::Thanks,
            qualifies: |b, current| (b.thanks_phrase && current < 0.5).then_some(PHRASE_CONFIDENCE),
        },
    ]
}

/// Unmatched text falls back to `intencion_desconocida` with this confidence.
const UNKNOWN_CONFIDENCE: f32 = 0.1;

/// Classifies a message into one of the fixed intents.
pub struct IntentClassifier {
    normalizer: Normalizer,
    rules: Vec<CategoryRule>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
            rules: decision_rules(),
        }
    }

    /// Classify raw user text. Never fails; unmatched text yields
    /// `Unknown` with confidence 0.1.
    pub fn classify(&self, raw: &str) -> IntentResult {
        let normalized = self.normalizer.normalize(raw);
        self.classify_normalized(raw, &normalized)
    }

    /// Classify when the caller has already normalized the text.
    pub fn classify_normalized(&self, raw: &str, normalized: &str) -> IntentResult {
        let board = ScoreBoard::compute(raw, normalized);

        let mut result = IntentResult {
            intent: Intent::Unknown,
            confidence: 0.0,
        };
        for rule in &self.rules {
            if let Some(confidence) = (rule.qualifies)(&board, result.confidence) {
                result = IntentResult {
                    intent: rule.intent,
                    confidence,
                };
            }
        }

        if result.intent == Intent::Unknown {
            result.confidence = UNKNOWN_CONFIDENCE;
        }
        result
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
