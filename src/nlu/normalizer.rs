//! Informal-Spanish text normalizer.
//!
//! Rewrites common chat abbreviations and misspellings to canonical forms,
//! then collapses repeated punctuation and whitespace. Pure and infallible:
//! every input maps to a string, possibly empty.

use regex::Regex;

/// One whole-word substitution. Table order matters: later rules may
/// re-match text produced by earlier ones (e.g. `sta` → `esta` → `está`).
struct Substitution {
    pattern: Regex,
    replacement: &'static str,
}

/// Normalizes informal text for intent classification.
pub struct Normalizer {
    substitutions: Vec<Substitution>,
    repeated_marks: Regex,
    repeated_dots: Regex,
    whitespace_runs: Regex,
}

impl Normalizer {
    /// Create a normalizer with the default abbreviation table.
    pub fn new() -> Self {
        // Whole-word matching only; a bare `q` must not corrupt `quiero`.
        let table: &[(&str, &str)] = &[
            (r"\bq\b", "que"),
            (r"\bqe\b", "que"),
            (r"\bxq\b", "porque"),
            (r"\bporq\b", "porque"),
            (r"\bpq\b", "porque"),
            (r"\btb\b", "también"),
            (r"\btmb\b", "también"),
            (r"\bhla\b", "hola"),
            (r"\bsta\b", "esta"),
            (r"\bstok\b", "stock"),
            (r"\bbnos\b", "buenos"),
            (r"\bx\b", "por"),
            (r"\bfav\b", "favor"),
            (r"\bpls\b", "por favor"),
            (r"\bpfa\b", "por favor"),
            (r"\bgrax\b", "gracias"),
            (r"\bgcs\b", "gracias"),
            (r"\btq\b", "te quiero"),
            (r"\baq\b", "aquí"),
            (r"\bahi\b", "ahí"),
            (r"\bd\b", "de"),
            (r"\bpedio\b", "pedido"),
            (r"\benvi[oó]\b", "envío"),
            (r"\best[aá]\b", "está"),
        ];

        let substitutions = table
            .iter()
            .map(|(pattern, replacement)| Substitution {
                pattern: Regex::new(pattern).unwrap(),
                replacement,
            })
            .collect();

        Self {
            substitutions,
            repeated_marks: Regex::new(r"[?!]{2,}").unwrap(),
            repeated_dots: Regex::new(r"\.{2,}").unwrap(),
            whitespace_runs: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Normalize raw user text: lowercase, expand abbreviations, collapse
    /// punctuation runs and whitespace, trim.
    pub fn normalize(&self, raw: &str) -> String {
        let mut text = raw.to_lowercase();

        for sub in &self.substitutions {
            text = sub.pattern.replace_all(&text, sub.replacement).into_owned();
        }

        let text = self.repeated_marks.replace_all(&text, "?");
        let text = self.repeated_dots.replace_all(&text, ".");
        let text = self.whitespace_runs.replace_all(&text, " ");

        text.trim().to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_chat_abbreviations() {
        let n = Normalizer::new();
        assert_eq!(
            n.normalize("qe onda xq no llega mi pedido???"),
            "que onda porque no llega mi pedido?"
        );
    }

    #[test]
    fn expands_misspellings() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("hla    tenes stok?"), "hola tenes stock?");
    }

    #[test]
    fn whole_word_matching_leaves_longer_words_alone() {
        let n = Normalizer::new();
        // `q` inside `quiero` and `x` inside `extra` must survive.
        assert_eq!(n.normalize("quiero extra"), "quiero extra");
    }

    #[test]
    fn later_rules_rematch_earlier_output() {
        let n = Normalizer::new();
        // sta → esta, then est[aá] → está, in a single pass.
        assert_eq!(n.normalize("sta"), "está");
    }

    #[test]
    fn collapses_punctuation_runs() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("si!!!"), "si?");
        assert_eq!(n.normalize("bueno....."), "bueno.");
        assert_eq!(n.normalize("?!?!"), "?");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("  hola \t  mundo \n "), "hola mundo");
    }

    #[test]
    fn empty_input_stays_empty() {
        let n = Normalizer::new();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let n = Normalizer::new();
        let samples = [
            "qe onda xq no llega mi pedido???",
            "hla    tenes stok?",
            "Dónde   está mi envio....",
            "GRAX x todo!!",
            "sta",
            "¿Cuánto cuesta el producto ABC-123?",
            "",
        ];
        for sample in samples {
            let once = n.normalize(sample);
            assert_eq!(n.normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
