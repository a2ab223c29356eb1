use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Comparison form of a description: uppercase, accents removed, `*` mask
/// characters removed, surrounding whitespace trimmed.
///
/// Only used to compare memos against patterns; output text is never
/// normalized.
pub fn normalize(text: &str) -> String {
    text.to_uppercase()
        .nfd()
        .filter(|&c| !is_combining_mark(c) && c != '*')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Aplic.Invest Facil***", "APLIC.INVEST FACIL")]
    #[case("  resgate invest facil  ", "RESGATE INVEST FACIL")]
    #[case("RESG.AUTOM.INVEST FÁCIL", "RESG.AUTOM.INVEST FACIL")]
    #[case("aplicação", "APLICACAO")]
    #[case("***1234 PIX ENVIADO", "1234 PIX ENVIADO")]
    #[case(" * ", "")]
    #[case("", "")]
    fn test_normalize(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(normalize(text), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Créd. Salário *** ");
        assert_eq!(normalize(&once), once);
    }
}
