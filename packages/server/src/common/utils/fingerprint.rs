use sha2::{Digest, Sha256};
use url::Url;

/// Fingerprint a project name for duplicate detection.
///
/// Uses SHA256 of the normalized name so "NextCloud", "nextcloud" and
/// "Next  Cloud!" all collide. Normalization rules:
/// - lowercase
/// - drop all non-alphanumeric characters except spaces
/// - collapse runs of whitespace, trim the ends
pub fn name_fingerprint(name: &str) -> String {
    let normalized = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Normalize a repository URL for duplicate detection.
///
/// Two submissions pointing at the same repository must normalize to the
/// same string regardless of scheme, `www.` prefix, trailing slash, or a
/// `.git` suffix. Falls back to a trimmed lowercase of the input when it
/// does not parse as a URL, so comparison still works on sloppy input.
pub fn normalize_repository_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    match Url::parse(&candidate) {
        Ok(url) => {
            let host = url
                .host_str()
                .unwrap_or_default()
                .trim_start_matches("www.")
                .to_lowercase();
            let path = url
                .path()
                .trim_end_matches('/')
                .trim_end_matches(".git")
                .to_lowercase();
            format!("{}{}", host, path)
        }
        Err(_) => trimmed.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_fingerprint() {
        assert_eq!(name_fingerprint("Nextcloud"), name_fingerprint("nextcloud"));
        assert_eq!(
            name_fingerprint("Next  Cloud!"),
            name_fingerprint("next cloud")
        );
    }

    #[test]
    fn different_names_differ() {
        assert_ne!(name_fingerprint("Gitea"), name_fingerprint("Forgejo"));
    }

    #[test]
    fn fingerprint_is_sha256_hex() {
        let hash = name_fingerprint("Plausible Analytics");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn repository_url_variants_collide() {
        let canonical = normalize_repository_url("https://github.com/gitea/gitea");
        assert_eq!(
            normalize_repository_url("http://www.github.com/gitea/gitea/"),
            canonical
        );
        assert_eq!(
            normalize_repository_url("github.com/Gitea/Gitea.git"),
            canonical
        );
        assert_eq!(canonical, "github.com/gitea/gitea");
    }

    #[test]
    fn distinct_repositories_stay_distinct() {
        assert_ne!(
            normalize_repository_url("https://github.com/gitea/gitea"),
            normalize_repository_url("https://github.com/go-gitea/gitea")
        );
    }

    #[test]
    fn unparseable_input_falls_back_to_lowercase() {
        assert_eq!(normalize_repository_url("  Not A Url  "), "not a url");
    }
}
