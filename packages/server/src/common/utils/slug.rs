/// Derive a URL slug from a display name.
///
/// Lowercase, alphanumerics kept, everything else collapsed to single
/// hyphens, no leading/trailing hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_names() {
        assert_eq!(slugify("Plausible Analytics"), "plausible-analytics");
        assert_eq!(slugify("GitLab"), "gitlab");
    }

    #[test]
    fn punctuation_collapses() {
        assert_eq!(slugify("Monday.com (Work OS)"), "monday-com-work-os");
        assert_eq!(slugify("  --Draw.io--  "), "draw-io");
    }

    #[test]
    fn empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
