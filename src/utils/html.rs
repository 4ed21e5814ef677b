//! Minimal HTML text extraction

use std::sync::LazyLock;

use regex::{Captures, Regex};

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity regex")
});

/// Text content of an HTML fragment: tags dropped, character references
/// decoded. Unknown named entities are left as written.
pub fn unescape(fragment: &str) -> String {
    let text = TAG.replace_all(fragment, "");
    ENTITY
        .replace_all(&text, |caps: &Captures| {
            let name = &caps[1];
            decode_entity(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<String> {
    let decoded = match name {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_named_and_numeric() {
        assert_eq!(unescape("1 &lt; 2 &amp;&amp; 3 &gt; 2"), "1 < 2 && 3 > 2");
        assert_eq!(unescape("&#39;a&#x27; &quot;b&quot;"), "'a' \"b\"");
    }

    #[test]
    fn test_unescape_strips_tags() {
        assert_eq!(unescape("<span>3</span>\n4 5"), "3\n4 5");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(unescape("&bogus; &#xZZ;"), "&bogus; &#xZZ;");
    }
}
