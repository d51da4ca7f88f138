//! Syntactic email check.

use once_cell::sync::Lazy;
use regex::Regex;

/// Local part, `@`, then a domain containing at least one `.`. No whitespace
/// and no second `@` anywhere.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Returns `true` if `email` is a syntactically plausible address.
///
/// Deliberately permissive: no DNS, TLD or RFC 5322 grammar checks.
///
/// ```
/// use crm_contacts::contacts::is_valid_email;
///
/// assert!(is_valid_email("john.doe@example.com"));
/// assert!(!is_valid_email("a@b@c.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plausible_addresses() {
        assert!(is_valid_email("john.doe@example.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("user.name+tag@example.co.uk"));
        assert!(is_valid_email("UPPER@EXAMPLE.COM"));
    }

    #[test]
    fn test_rejects_empty_and_bare_words() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("johndoe"));
        assert!(!is_valid_email("not-an-email"));
    }

    #[test]
    fn test_rejects_missing_parts() {
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user@domain."));
    }

    #[test]
    fn test_rejects_multiple_at_signs() {
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("user@@example.com"));
    }

    #[test]
    fn test_rejects_whitespace_anywhere() {
        assert!(!is_valid_email(" john@example.com"));
        assert!(!is_valid_email("john@example.com "));
        assert!(!is_valid_email("jo hn@example.com"));
        assert!(!is_valid_email("john@exa\tmple.com"));
    }
}
