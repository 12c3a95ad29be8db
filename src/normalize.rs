use unicode_normalization::UnicodeNormalization;

/// Which differences between two strings are folded away before comparing them.
///
/// The derived default folds nothing. Searches pick their own defaults, see
/// [`NormalParameter`](crate::NormalParameter).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreOptions {
    /// Lowercase both sides.
    pub case: bool,
    /// Decompose to NFD and drop combining diacritical marks (U+0300 to U+036F).
    pub diacritic: bool,
    /// Drop all whitespace.
    pub space: bool,
    /// Drop the full-width wave dash `～`.
    pub wave: bool,
}

impl IgnoreOptions {
    pub const NONE: Self = Self {
        case: false,
        diacritic: false,
        space: false,
        wave: false,
    };
}

/// Folds `text` according to `options`.
///
/// ```
/// use xdn::{normalize, IgnoreOptions};
///
/// let options = IgnoreOptions { case: true, diacritic: true, ..IgnoreOptions::NONE };
/// assert_eq!(normalize("Sâtix", options), "satix");
/// ```
pub fn normalize(text: &str, options: IgnoreOptions) -> String {
    let mut string = if options.case {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    if options.diacritic {
        string = string
            .nfd()
            .filter(|ch| !is_combining_diacritic(*ch))
            .collect();
    }
    if options.space {
        string.retain(|ch| !is_space(ch));
    }
    if options.wave {
        string.retain(|ch| ch != '～');
    }
    string
}

fn is_combining_diacritic(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}

// `char::is_whitespace` misses the byte order mark.
fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn none_is_identity() {
        assert_eq!(normalize("Sâ tix～", IgnoreOptions::NONE), "Sâ tix～");
    }

    #[test]
    fn each_option_folds_independently() {
        let case = IgnoreOptions {
            case: true,
            ..IgnoreOptions::NONE
        };
        assert_eq!(normalize("SÂT", case), "sât");

        let diacritic = IgnoreOptions {
            diacritic: true,
            ..IgnoreOptions::NONE
        };
        assert_eq!(normalize("sâtíx", diacritic), "satix");
        assert_eq!(normalize("SÁT", diacritic), "SAT");

        let space = IgnoreOptions {
            space: true,
            ..IgnoreOptions::NONE
        };
        assert_eq!(normalize("a b\u{3000}c\td", space), "abcd");

        let wave = IgnoreOptions {
            wave: true,
            ..IgnoreOptions::NONE
        };
        assert_eq!(normalize("すると～", wave), "すると");
    }

    #[test]
    fn diacritic_folding_keeps_kana_voicing() {
        let diacritic = IgnoreOptions {
            diacritic: true,
            ..IgnoreOptions::NONE
        };
        // U+3099 lies outside the stripped block so both sides decompose the same way.
        assert_eq!(normalize("が", diacritic), "か\u{3099}");
    }
}
