/// Derive a URL slug from a post title.
///
/// The title is lowercased and every run of whitespace becomes a single `-`.
/// Nothing else is stripped, so leading or trailing whitespace yields a
/// leading or trailing hyphen.
///
/// Whitespace is `char::is_whitespace`, which counts U+0085 (NEL) but not
/// U+FEFF (BOM); a JavaScript `\s` class treats those two the other way round.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            slug.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(slugify("Hello   World"), "hello-world");
        assert_eq!(slugify("Tabs\t\tand\nnewlines"), "tabs-and-newlines");
    }

    #[test]
    fn test_keeps_edge_whitespace_as_hyphens() {
        assert_eq!(slugify("  Padded Title "), "-padded-title-");
    }

    #[test]
    fn test_leaves_punctuation_alone() {
        assert_eq!(slugify("Rust: A Primer!"), "rust:-a-primer!");
    }

    #[test]
    fn test_nel_is_whitespace_but_bom_is_not() {
        assert_eq!(slugify("a\u{85}b"), "a-b");
        assert_eq!(slugify("a\u{FEFF}b"), "a\u{FEFF}b");
    }

    #[test]
    fn test_unicode_lowercase() {
        assert_eq!(slugify("ÜBER Café"), "über-café");
    }
}
