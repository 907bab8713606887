// src/latex/transliterate.rs
//! Unicode to LaTeX-safe ASCII.
//!
//! Text goes through two steps. [`Transliterator::escape`] rewrites every
//! character it knows about into a LaTeX escape: custom rules first, then the
//! built-in table in [`super::rules`], then accent decomposition. [`sanitize`]
//! then drops whatever is still outside 7-bit ASCII. Nothing ever fails;
//! a character with no rule is simply deleted.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::rules::{accent_macro, default_rule, is_top_accent};
use crate::config::TransliterationRule;
use crate::utils::error::ConfigError;

/// A custom rule compiled so it only matches at the current scan position.
#[derive(Debug)]
struct CompiledRule {
    regex: Regex,
    replacement: String,
}

#[derive(Debug, Default)]
pub struct Transliterator {
    rules: Vec<CompiledRule>,
}

impl Transliterator {
    /// Compiles `rules` in priority order. The built-in table always comes last.
    pub fn new(rules: &[TransliterationRule]) -> Result<Self, ConfigError> {
        let rules = rules
            .iter()
            .map(|rule| {
                // Input is matched in NFC, so the pattern must be too
                let pattern: String = rule.pattern.nfc().collect();
                let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
                    ConfigError::InvalidRule {
                        pattern: rule.pattern.clone(),
                        source,
                    }
                })?;
                Ok(CompiledRule {
                    regex,
                    replacement: rule.replacement.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        tracing::debug!("Compiled {} custom transliteration rules", rules.len());
        Ok(Self { rules })
    }

    /// Escapes `text` and strips everything outside ASCII.
    pub fn encode(&self, text: &str) -> String {
        sanitize(&self.escape(text))
    }

    /// Applies the rules without the final ASCII filter.
    pub fn escape(&self, text: &str) -> String {
        let text: String = text.nfc().collect();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while let Some(c) = text[pos..].chars().next() {
            if let Some(consumed) = self.apply_custom(&text[pos..], &mut out) {
                pos += consumed;
                continue;
            }
            escape_char(c, &mut out);
            pos += c.len_utf8();
        }

        out
    }

    /// Tries custom rules at the start of `rest`; returns the bytes consumed.
    fn apply_custom(&self, rest: &str, out: &mut String) -> Option<usize> {
        self.rules.iter().find_map(|rule| {
            let caps = rule.regex.captures(rest)?;
            let matched = caps.get(0)?;
            // An empty match would never advance the scan.
            if matched.end() == 0 {
                return None;
            }
            caps.expand(&rule.replacement, out);
            Some(matched.end())
        })
    }
}

/// Keeps ASCII characters and drops every other one. Never substitutes.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

fn escape_char(c: char, out: &mut String) {
    if let Some(replacement) = default_rule(c) {
        out.push_str(replacement);
    } else if c.is_ascii() {
        out.push(c);
    } else if let Some(accented) = accented_letter(c) {
        out.push_str(&accented);
    } else {
        escape_compatibility(c, out);
    }
}

/// Rebuilds `é` as `\'{e}`, nesting one accent command per combining mark.
fn accented_letter(c: char) -> Option<String> {
    let mut parts = std::iter::once(c).nfd();
    let base = parts.next()?;
    let marks: Vec<char> = parts.collect();
    if !base.is_ascii_alphabetic() || marks.is_empty() {
        return None;
    }

    let mut letter = match base {
        'i' if is_top_accent(marks[0]) => r"\i".to_string(),
        'j' if is_top_accent(marks[0]) => r"\j".to_string(),
        _ => base.to_string(),
    };
    for mark in marks {
        letter = format!("{}{{{}}}", accent_macro(mark)?, letter);
    }
    Some(letter)
}

// Ligatures, full-width forms and the like: escape their compatibility form.
// Characters without one are left for `sanitize` to drop.
fn escape_compatibility(c: char, out: &mut String) {
    let compat: String = std::iter::once(c).nfkc().collect();
    if compat.chars().eq(std::iter::once(c)) {
        tracing::trace!("No transliteration for {:?} (U+{:04X})", c, c as u32);
        out.push(c);
        return;
    }
    for part in compat.chars() {
        if let Some(replacement) = default_rule(part) {
            out.push_str(replacement);
        } else if let Some(accented) = accented_letter(part) {
            out.push_str(&accented);
        } else {
            out.push(part);
        }
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encode(text: &str) -> String {
        Transliterator::default().encode(text)
    }

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(encode("1. What is X?\n\n2. Explain Y.\n\n"), "1. What is X?\n\n2. Explain Y.\n\n");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_specials_are_escaped() {
        assert_eq!(encode("50% of $x_1$ & more"), r"50\% of \$x\_1\$ \& more");
        assert_eq!(encode(r"a\b"), r"a\textbackslash{}b");
    }

    #[test]
    fn test_accented_letters() {
        assert_eq!(encode("café"), r"caf\'{e}");
        assert_eq!(encode("naïve"), r#"na\"{\i}ve"#);
        assert_eq!(encode("façade"), r"fa\c{c}ade");
        assert_eq!(encode("Ångström"), r#"\r{A}ngstr\"{o}m"#);
        assert_eq!(encode("ǘ"), r#"\'{\"{u}}"#);
    }

    #[test]
    fn test_decomposed_input_is_composed_first() {
        assert_eq!(encode("e\u{0301}t\u{0065}\u{0301}"), r"\'{e}t\'{e}");
    }

    #[test]
    fn test_table_symbols() {
        assert_eq!(encode("x ≤ y — done…"), r"x \ensuremath{\leq} y --- done\ldots{}");
        assert_eq!(encode("“quoted”"), "``quoted''");
        assert_eq!(encode("Straße"), r"Stra\ss{}e");
        assert_eq!(encode("απ"), r"\ensuremath{\alpha}\ensuremath{\pi}");
    }

    #[test]
    fn test_compatibility_forms() {
        assert_eq!(encode("ﬁnal"), "final");
        assert_eq!(encode("ＡＢ"), "AB");
    }

    #[test]
    fn test_unmappable_characters_are_deleted() {
        assert_eq!(encode("漢字 test 😀!"), " test !");
        assert_eq!(encode("\u{0301}"), "");
    }

    #[test]
    fn test_custom_rules_take_precedence() {
        let rules = vec![
            TransliterationRule {
                pattern: "é".to_string(),
                replacement: r"\'e".to_string(),
            },
            TransliterationRule {
                pattern: "->".to_string(),
                replacement: r"\ensuremath{\to}".to_string(),
            },
        ];
        let transliterator = Transliterator::new(&rules).unwrap();

        assert_eq!(transliterator.encode("é -> è"), r"\'e \ensuremath{\to} \`{e}");
    }

    #[test]
    fn test_decomposed_custom_pattern_matches() {
        let rules = vec![TransliterationRule {
            pattern: "e\u{0301}".to_string(),
            replacement: "E".to_string(),
        }];
        let transliterator = Transliterator::new(&rules).unwrap();

        assert_eq!(transliterator.encode("caf\u{00E9} cafe\u{0301}"), "cafE cafE");
    }

    #[test]
    fn test_custom_rule_capture_groups() {
        let rules = vec![TransliterationRule {
            pattern: r"x\^(\d)".to_string(),
            replacement: r"\ensuremath{x^{$1}}".to_string(),
        }];
        let transliterator = Transliterator::new(&rules).unwrap();

        assert_eq!(transliterator.encode("x^2 + 1"), r"\ensuremath{x^{2}} + 1");
    }

    #[test]
    fn test_empty_match_rule_is_skipped() {
        let rules = vec![TransliterationRule {
            pattern: "z*".to_string(),
            replacement: "Z".to_string(),
        }];
        let transliterator = Transliterator::new(&rules).unwrap();

        assert_eq!(transliterator.encode("azz"), "aZ");
    }

    #[test]
    fn test_invalid_rule_is_rejected() {
        let rules = vec![TransliterationRule {
            pattern: "(".to_string(),
            replacement: String::new(),
        }];

        let err = Transliterator::new(&rules).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { .. }));
    }

    #[test]
    fn test_sanitize_drops_only_non_ascii() {
        assert_eq!(sanitize("a€b\u{00E9}c"), "abc");
        assert_eq!(sanitize("plain\ttext\n"), "plain\ttext\n");
    }

    proptest! {
        #[test]
        fn prop_output_is_ascii(text in any::<String>()) {
            prop_assert!(encode(&text).is_ascii());
        }

        #[test]
        fn prop_unmapped_characters_are_only_deleted(
            text in "[a-zA-Z0-9 .?\n\u{4E00}-\u{4E20}\u{1F600}-\u{1F610}]{0,64}"
        ) {
            let expected: String = text.chars().filter(char::is_ascii).collect();
            prop_assert_eq!(encode(&text), expected);
        }
    }
}
