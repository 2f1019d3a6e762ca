//! Tiered entity extraction.
//!
//! Runs over the RAW message text; casing and punctuation carry signal
//! for the patterns, so normalization is not applied here.
//!
//! Tiers:
//! 1. Prefixed tracking identifiers (`TRK-555`, `PEDIDO123`, ...).
//! 2. Bare numeric order numbers, only when tier 1 found nothing.
//! 3. Product references (keyword + code, or keyword + quoted phrase).
//! 4. Prices (`$5000`, `5000 pesos`).
//!
//! A single seen-identifiers set deduplicates tiers 1 and 2. Tiers 3 and 4
//! may emit duplicates when patterns overlap; downstream consumers take
//! the first entity per label and tolerate the rest.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The kinds of entity the extractor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    #[serde(rename = "tracking_id")]
    TrackingId,
    #[serde(rename = "numero_pedido")]
    OrderNumber,
    #[serde(rename = "producto")]
    Product,
    #[serde(rename = "precio")]
    Price,
}

/// A typed fragment of text extracted from a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub label: EntityLabel,
    pub value: String,
}

impl Entity {
    pub fn new(label: EntityLabel, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Pattern-based entity extractor.
pub struct EntityExtractor {
    tracking_id: Regex,
    digit_run: Regex,
    product_code: Regex,
    product_quoted: Regex,
    product_trailing: Regex,
    price: Regex,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self {
            tracking_id: Regex::new(r"(?i)\b(?:TRK|ID|PEDIDO|ORDEN|ORD|PKG|ENV)[\w-]+\b").unwrap(),
            digit_run: Regex::new(r"\b\d{3,}\b").unwrap(),
            product_code: Regex::new(
                r"(?i)(?:producto|artículo|articulo|item|código|codigo|sku)\s+([A-Z0-9-]+)",
            )
            .unwrap(),
            product_quoted: Regex::new(r#"(?i)(?:producto|artículo|articulo)\s+["']([^"']+)["']"#)
                .unwrap(),
            product_trailing: Regex::new(r#"(?i)(?:producto|artículo|articulo)\s+([^"']+)"#)
                .unwrap(),
            price: Regex::new(
                r"(?i)\$\s*(\d+(?:[.,]\d{1,2})?)|(\d+(?:[.,]\d{1,2})?)\s*(?:pesos|dolares|dólares|usd|ars)",
            )
            .unwrap(),
        }
    }

    /// Extract all entities from raw text. Never fails; returns an empty
    /// list when nothing matches.
    pub fn extract(&self, raw: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        // Tier 1: prefixed tracking identifiers.
        for m in self.tracking_id.find_iter(raw) {
            let id = m.as_str();
            if seen.insert(id.to_string()) {
                entities.push(Entity::new(EntityLabel::TrackingId, id));
            }
        }

        // Tier 2: numeric order numbers, skipped entirely when tier 1 hit.
        // Two sources share the seen-set: a token scan (digits stripped out
        // of mixed tokens) and a bare digit-run fallback.
        if entities.is_empty() {
            for token in raw.split_whitespace() {
                let digits: String = token.chars().filter(char::is_ascii_digit).collect();
                if digits.len() >= 3 && seen.insert(digits.clone()) {
                    entities.push(Entity::new(EntityLabel::OrderNumber, digits));
                }
            }
            for m in self.digit_run.find_iter(raw) {
                let number = m.as_str();
                if seen.insert(number.to_string()) {
                    entities.push(Entity::new(EntityLabel::OrderNumber, number));
                }
            }
        }

        // Tier 3: product references. Always attempted; overlapping
        // patterns may duplicate (kept, not deduplicated).
        for pattern in [
            &self.product_code,
            &self.product_quoted,
            &self.product_trailing,
        ] {
            for caps in pattern.captures_iter(raw) {
                if let Some(m) = caps.get(1) {
                    let product = m.as_str().trim();
                    if product.chars().count() > 1 {
                        entities.push(Entity::new(EntityLabel::Product, product));
                    }
                }
            }
        }

        // Tier 4: prices. Always attempted; may duplicate.
        for caps in self.price.captures_iter(raw) {
            if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
                entities.push(Entity::new(EntityLabel::Price, m.as_str()));
            }
        }

        entities
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}
