use rand::distributions::{Alphanumeric, DistString};
use rand::thread_rng;

/// Generate a random slug of `len` characters drawn uniformly from `[A-Za-z0-9]`.
pub fn generate(len: usize) -> String {
    Alphanumeric.sample_string(&mut thread_rng(), len)
}

/// Trim a user-supplied slug, treating a blank one as absent.
pub fn normalize_custom(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_slugs_are_alphanumeric() {
        for len in [1, 6, 8, 32] {
            for _ in 0..200 {
                let slug = generate(len);
                assert_eq!(slug.len(), len);
                assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()), "{slug}");
            }
        }
    }

    #[test]
    fn generated_slugs_rarely_collide() {
        let slugs: HashSet<String> = (0..1000).map(|_| generate(8)).collect();
        assert_eq!(slugs.len(), 1000);
    }

    #[test]
    fn custom_slugs_are_trimmed() {
        assert_eq!(normalize_custom("  my-meeting-notes \n"), Some("my-meeting-notes"));
        assert_eq!(normalize_custom("demo1"), Some("demo1"));
        assert_eq!(normalize_custom(""), None);
        assert_eq!(normalize_custom(" \t "), None);
    }
}
