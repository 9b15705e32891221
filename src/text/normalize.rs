/// Hyphen and minus variants folded to ASCII '-'.
const HYPHENS: [char; 7] = [
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2212}', // minus sign
    '-',
];

/// Canonicalize free text for equality comparison.
///
/// Non-breaking spaces become spaces, every hyphen variant becomes `-`,
/// whitespace runs collapse to one space, the ends are trimmed and the result
/// is lower-cased. `None` yields an empty string.
///
/// This is the only key used to compare building types and regions.
pub fn normalize(s: Option<&str>) -> String {
    let Some(s) = s else {
        return String::new();
    };

    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        let c = if c == '\u{00A0}' {
            ' '
        } else if HYPHENS.contains(&c) {
            '-'
        } else {
            c
        };

        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_none_is_empty() {
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn test_normalize_dash_and_spacing_variants() {
        assert_eq!(
            normalize(Some("Low\u{2013}Rise  Apartment")),
            normalize(Some("low-rise apartment"))
        );
        assert_eq!(normalize(Some("Low\u{2013}Rise  Apartment")), "low-rise apartment");
    }

    #[test]
    fn test_normalize_every_hyphen_variant() {
        for dash in ['\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2212}'] {
            let input = format!("Mid{}Rise", dash);
            assert_eq!(normalize(Some(&input)), "mid-rise");
        }
    }

    #[test]
    fn test_normalize_nbsp_and_trim() {
        assert_eq!(normalize(Some("\u{00A0} Great\u{00A0}\u{00A0}Lakes \t\n")), "great lakes");
    }

    #[test]
    fn test_normalize_whitespace_only() {
        assert_eq!(normalize(Some(" \u{00A0}\t ")), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "  Office\u{2014}Medical  ",
            "PACIFIC\u{00A0}COAST",
            "Non\u{2011}food   Retail\t",
            "",
            "already normal",
        ];
        for s in samples {
            let once = normalize(Some(s));
            assert_eq!(normalize(Some(&once)), once, "not idempotent for {:?}", s);
        }
    }
}
