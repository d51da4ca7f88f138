//! Validation + lookup composed into one typed outcome.

use std::sync::Arc;

use thiserror::Error;

use super::contact::Contact;
use super::store::ContactStore;
use super::validator::is_valid_email;

/// Why a lookup produced no contact.
///
/// These are ordinary caller-facing outcomes. The `Display` text is what the
/// HTTP layer sends back in the `error` field.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum LookupError {
    #[error("Email parameter is required")]
    MissingParameter,

    #[error("Invalid email format")]
    InvalidFormat,

    #[error("Contact not found")]
    NotFound,
}

/// Either the matching contact or the reason there is none.
pub type LookupResult<'a> = Result<&'a Contact, LookupError>;

/// One caller request: the `email` value exactly as supplied, if any.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LookupQuery {
    pub email: Option<String>,
}

impl LookupQuery {
    pub fn by_email(email: impl Into<String>) -> Self {
        Self { email: Some(email.into()) }
    }
}

/// Answers "which contact owns this email?" and "list everyone".
///
/// Stateless apart from the shared store, so a single instance serves every
/// request concurrently.
#[derive(Clone, Debug)]
pub struct ContactLookupService {
    store: Arc<ContactStore>,
}

impl ContactLookupService {
    pub fn new(store: Arc<ContactStore>) -> Self {
        Self { store }
    }

    /// Runs the decision chain; the first failing step wins.
    ///
    /// 1. absent or empty email → [`LookupError::MissingParameter`]
    /// 2. fails [`is_valid_email`] → [`LookupError::InvalidFormat`]
    /// 3. no case-insensitive match → [`LookupError::NotFound`]
    pub fn lookup_by_email(&self, query: &LookupQuery) -> LookupResult<'_> {
        let email = match query.email.as_deref() {
            None | Some("") => return Err(LookupError::MissingParameter),
            Some(email) => email,
        };

        if !is_valid_email(email) {
            return Err(LookupError::InvalidFormat);
        }

        self.store.find_by_email(email).ok_or(LookupError::NotFound)
    }

    /// Every contact in store order, unfiltered.
    pub fn list_all(&self) -> &[Contact] {
        self.store.all()
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ContactLookupService {
        ContactLookupService::new(Arc::new(ContactStore::seeded()))
    }

    #[test]
    fn test_every_seeded_contact_found_in_any_case() {
        let svc = service();
        for contact in svc.list_all() {
            let exact = svc.lookup_by_email(&LookupQuery::by_email(contact.email.clone()));
            assert_eq!(exact, Ok(contact));

            let upper = svc.lookup_by_email(&LookupQuery::by_email(contact.email.to_uppercase()));
            assert_eq!(upper, Ok(contact));
        }
    }

    #[test]
    fn test_john_doe_scenario() {
        let svc = service();

        let found = svc
            .lookup_by_email(&LookupQuery::by_email("JOHN.DOE@EXAMPLE.COM"))
            .unwrap();
        assert_eq!(
            found,
            &Contact::new("John", "Doe", "+1-555-123-4567", "john.doe@example.com")
        );

        assert_eq!(
            svc.lookup_by_email(&LookupQuery::by_email("missing@example.com")),
            Err(LookupError::NotFound)
        );
        assert_eq!(
            svc.lookup_by_email(&LookupQuery::by_email("johndoe")),
            Err(LookupError::InvalidFormat)
        );
    }

    #[test]
    fn test_absent_and_empty_are_missing() {
        let svc = service();
        assert_eq!(
            svc.lookup_by_email(&LookupQuery::default()),
            Err(LookupError::MissingParameter)
        );
        assert_eq!(
            svc.lookup_by_email(&LookupQuery::by_email("")),
            Err(LookupError::MissingParameter)
        );
    }

    #[test]
    fn test_invalid_format_checked_before_store() {
        let svc = service();
        assert_eq!(
            svc.lookup_by_email(&LookupQuery::by_email("not-an-email")),
            Err(LookupError::InvalidFormat)
        );
        assert_eq!(
            svc.lookup_by_email(&LookupQuery::by_email("a@b@c.com")),
            Err(LookupError::InvalidFormat)
        );
        // Untrimmed: surrounding whitespace is a format error, not a miss.
        assert_eq!(
            svc.lookup_by_email(&LookupQuery::by_email(" john.doe@example.com")),
            Err(LookupError::InvalidFormat)
        );
        assert_eq!(
            svc.lookup_by_email(&LookupQuery::by_email("a@b.com")),
            Err(LookupError::NotFound)
        );
    }

    #[test]
    fn test_repeated_lookups_are_equal() {
        let svc = service();
        let query = LookupQuery::by_email("emily.brown@example.com");
        let first = svc.lookup_by_email(&query);
        for _ in 0..10 {
            assert_eq!(svc.lookup_by_email(&query), first);
        }
    }

    #[test]
    fn test_list_all_is_store_passthrough() {
        let svc = service();
        assert_eq!(svc.list_all(), ContactStore::seeded().all());
        assert_eq!(svc.list_all().len(), svc.store().len());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(LookupError::MissingParameter.to_string(), "Email parameter is required");
        assert_eq!(LookupError::InvalidFormat.to_string(), "Invalid email format");
        assert_eq!(LookupError::NotFound.to_string(), "Contact not found");
    }
}
