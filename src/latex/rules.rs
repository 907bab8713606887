// src/latex/rules.rs
//! Built-in transliteration table.
//!
//! Accented Latin letters are not listed here; they are rebuilt from their
//! canonical decomposition with [`accent_macro`].

/// Looks up the LaTeX-safe replacement for a single character.
pub fn default_rule(c: char) -> Option<&'static str> {
    let replacement = match c {
        // LaTeX specials
        '\\' => r"\textbackslash{}",
        '#' => r"\#",
        '$' => r"\$",
        '%' => r"\%",
        '&' => r"\&",
        '_' => r"\_",
        '{' => r"\{",
        '}' => r"\}",
        '~' => r"\textasciitilde{}",
        '^' => r"\textasciicircum{}",

        // Letters without a usable decomposition
        'ß' => r"\ss{}",
        'æ' => r"\ae{}",
        'Æ' => r"\AE{}",
        'ø' => r"\o{}",
        'Ø' => r"\O{}",
        'œ' => r"\oe{}",
        'Œ' => r"\OE{}",
        'ł' => r"\l{}",
        'Ł' => r"\L{}",
        'ı' => r"\i{}",
        'ȷ' => r"\j{}",
        'đ' => r"\dj{}",
        'Đ' => r"\DJ{}",
        'þ' => r"\th{}",
        'Þ' => r"\TH{}",
        'ð' => r"\dh{}",
        'Ð' => r"\DH{}",
        'ŋ' => r"\ng{}",
        'Ŋ' => r"\NG{}",

        // Spacing and punctuation
        '\u{00A0}' => "~",
        '\u{2002}' | '\u{2003}' | '\u{2009}' => " ",
        '\u{200B}' | '\u{00AD}' | '\u{FEFF}' => "",
        '‐' | '‑' => "-",
        '–' => "--",
        '—' => "---",
        '‘' => "`",
        '’' => "'",
        '‚' => ",",
        '“' => "``",
        '”' => "''",
        '„' => ",,",
        '«' => r"\guillemotleft{}",
        '»' => r"\guillemotright{}",
        '‹' => r"\guilsinglleft{}",
        '›' => r"\guilsinglright{}",
        '…' => r"\ldots{}",
        '•' => r"\textbullet{}",
        '·' => r"\textperiodcentered{}",
        '¡' => r"\textexclamdown{}",
        '¿' => r"\textquestiondown{}",
        '†' => r"\dag{}",
        '‡' => r"\ddag{}",
        '′' => r"\ensuremath{'}",
        '″' => r"\ensuremath{''}",

        // Symbols
        '§' => r"\S{}",
        '¶' => r"\P{}",
        '©' => r"\textcopyright{}",
        '®' => r"\textregistered{}",
        '™' => r"\texttrademark{}",
        '°' => r"\textdegree{}",
        '€' => r"\texteuro{}",
        '£' => r"\pounds{}",
        '¥' => r"\textyen{}",
        '¢' => r"\textcent{}",
        '¬' => r"\ensuremath{\neg}",
        '±' => r"\ensuremath{\pm}",
        '×' => r"\ensuremath{\times}",
        '÷' => r"\ensuremath{\div}",
        'µ' => r"\ensuremath{\mu}",
        '¹' => r"\textonesuperior{}",
        '²' => r"\texttwosuperior{}",
        '³' => r"\textthreesuperior{}",
        '¼' => r"\textonequarter{}",
        '½' => r"\textonehalf{}",
        '¾' => r"\textthreequarters{}",

        // Greek
        'α' => r"\ensuremath{\alpha}",
        'β' => r"\ensuremath{\beta}",
        'γ' => r"\ensuremath{\gamma}",
        'δ' => r"\ensuremath{\delta}",
        'ε' => r"\ensuremath{\epsilon}",
        'ζ' => r"\ensuremath{\zeta}",
        'η' => r"\ensuremath{\eta}",
        'θ' => r"\ensuremath{\theta}",
        'ι' => r"\ensuremath{\iota}",
        'κ' => r"\ensuremath{\kappa}",
        'λ' => r"\ensuremath{\lambda}",
        'μ' => r"\ensuremath{\mu}",
        'ν' => r"\ensuremath{\nu}",
        'ξ' => r"\ensuremath{\xi}",
        'ο' => "o",
        'π' => r"\ensuremath{\pi}",
        'ρ' => r"\ensuremath{\rho}",
        'ς' => r"\ensuremath{\varsigma}",
        'σ' => r"\ensuremath{\sigma}",
        'τ' => r"\ensuremath{\tau}",
        'υ' => r"\ensuremath{\upsilon}",
        'φ' => r"\ensuremath{\phi}",
        'χ' => r"\ensuremath{\chi}",
        'ψ' => r"\ensuremath{\psi}",
        'ω' => r"\ensuremath{\omega}",
        'ϑ' => r"\ensuremath{\vartheta}",
        'ϕ' => r"\ensuremath{\varphi}",
        'ϵ' => r"\ensuremath{\varepsilon}",
        'Α' => "A",
        'Β' => "B",
        'Γ' => r"\ensuremath{\Gamma}",
        'Δ' => r"\ensuremath{\Delta}",
        'Ε' => "E",
        'Ζ' => "Z",
        'Η' => "H",
        'Θ' => r"\ensuremath{\Theta}",
        'Ι' => "I",
        'Κ' => "K",
        'Λ' => r"\ensuremath{\Lambda}",
        'Μ' => "M",
        'Ν' => "N",
        'Ξ' => r"\ensuremath{\Xi}",
        'Ο' => "O",
        'Π' => r"\ensuremath{\Pi}",
        'Ρ' => "P",
        'Σ' => r"\ensuremath{\Sigma}",
        'Τ' => "T",
        'Υ' => r"\ensuremath{\Upsilon}",
        'Φ' => r"\ensuremath{\Phi}",
        'Χ' => "X",
        'Ψ' => r"\ensuremath{\Psi}",
        'Ω' => r"\ensuremath{\Omega}",

        // Math
        '≤' => r"\ensuremath{\leq}",
        '≥' => r"\ensuremath{\geq}",
        '≠' => r"\ensuremath{\neq}",
        '≈' => r"\ensuremath{\approx}",
        '≡' => r"\ensuremath{\equiv}",
        '∞' => r"\ensuremath{\infty}",
        '∈' => r"\ensuremath{\in}",
        '∉' => r"\ensuremath{\notin}",
        '⊂' => r"\ensuremath{\subset}",
        '⊆' => r"\ensuremath{\subseteq}",
        '∪' => r"\ensuremath{\cup}",
        '∩' => r"\ensuremath{\cap}",
        '∅' => r"\ensuremath{\emptyset}",
        '∀' => r"\ensuremath{\forall}",
        '∃' => r"\ensuremath{\exists}",
        '∧' => r"\ensuremath{\wedge}",
        '∨' => r"\ensuremath{\vee}",
        '∑' => r"\ensuremath{\sum}",
        '∏' => r"\ensuremath{\prod}",
        '∫' => r"\ensuremath{\int}",
        '∂' => r"\ensuremath{\partial}",
        '∇' => r"\ensuremath{\nabla}",
        '√' => r"\ensuremath{\surd}",
        '∝' => r"\ensuremath{\propto}",
        '−' => r"\ensuremath{-}",
        '∗' => r"\ensuremath{\ast}",
        '∘' => r"\ensuremath{\circ}",
        '⋅' => r"\ensuremath{\cdot}",
        '→' => r"\ensuremath{\rightarrow}",
        '←' => r"\ensuremath{\leftarrow}",
        '↔' => r"\ensuremath{\leftrightarrow}",
        '⇒' => r"\ensuremath{\Rightarrow}",
        '⇐' => r"\ensuremath{\Leftarrow}",
        '⇔' => r"\ensuremath{\Leftrightarrow}",
        '↦' => r"\ensuremath{\mapsto}",
        'ℕ' => r"\ensuremath{\mathbb{N}}",
        'ℤ' => r"\ensuremath{\mathbb{Z}}",
        'ℚ' => r"\ensuremath{\mathbb{Q}}",
        'ℝ' => r"\ensuremath{\mathbb{R}}",
        'ℂ' => r"\ensuremath{\mathbb{C}}",
        _ => return None,
    };
    Some(replacement)
}

/// Maps a combining diacritical mark to its LaTeX accent command.
pub fn accent_macro(mark: char) -> Option<&'static str> {
    let command = match mark {
        '\u{0300}' => r"\`",
        '\u{0301}' => r"\'",
        '\u{0302}' => r"\^",
        '\u{0303}' => r"\~",
        '\u{0304}' => r"\=",
        '\u{0306}' => r"\u",
        '\u{0307}' => r"\.",
        '\u{0308}' => r#"\""#,
        '\u{030A}' => r"\r",
        '\u{030B}' => r"\H",
        '\u{030C}' => r"\v",
        '\u{0323}' => r"\d",
        '\u{0327}' => r"\c",
        '\u{0328}' => r"\k",
        '\u{0331}' => r"\b",
        _ => return None,
    };
    Some(command)
}

/// Whether the accent sits above the letter, where `i` and `j` lose their dot.
pub fn is_top_accent(mark: char) -> bool {
    !matches!(mark, '\u{0323}' | '\u{0327}' | '\u{0328}' | '\u{0331}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specials_are_escaped() {
        for c in ['#', '$', '%', '&', '_', '{', '}'] {
            assert_eq!(default_rule(c).map(str::to_owned), Some(format!("\\{c}")));
        }
        assert_eq!(default_rule('\\'), Some(r"\textbackslash{}"));
    }

    #[test]
    fn test_plain_ascii_has_no_rule() {
        for c in ('a'..='z').chain('0'..='9').chain(['.', '?', ' ', '\n']) {
            assert_eq!(default_rule(c), None, "unexpected rule for {c:?}");
        }
    }

    #[test]
    fn test_every_replacement_is_ascii() {
        for c in '\u{0}'..='\u{3000}' {
            if let Some(rule) = default_rule(c) {
                assert!(rule.is_ascii(), "non-ASCII replacement for {c:?}");
            }
        }
    }

    #[test]
    fn test_accents() {
        assert_eq!(accent_macro('\u{0301}'), Some(r"\'"));
        assert_eq!(accent_macro('\u{0308}'), Some("\\\""));
        assert_eq!(accent_macro('\u{0345}'), None);
        assert!(is_top_accent('\u{0301}'));
        assert!(!is_top_accent('\u{0327}'));
    }
}
