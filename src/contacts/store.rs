//! The fixed contact set.

use thiserror::Error;

use super::contact::{Contact, fold_eq};

/// Invariant violations caught when building a store from caller data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A record has an empty email.
    #[error("contact at index {index} has an empty email")]
    EmptyEmail { index: usize },

    /// Two records share an email under case-insensitive comparison.
    #[error("duplicate email {email} at index {index} (first seen at {first})")]
    DuplicateEmail {
        email: String,
        index: usize,
        first: usize,
    },
}

/// Read-only, insertion-ordered contact records.
///
/// Built once at startup and shared behind an `Arc`; there is no way to
/// mutate it afterwards.
#[derive(Clone, Debug)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    /// Builds a store from `contacts`, checking that every email is non-empty
    /// and unique ignoring case.
    pub fn new(contacts: Vec<Contact>) -> Result<Self, StoreError> {
        for (index, contact) in contacts.iter().enumerate() {
            if contact.email.is_empty() {
                return Err(StoreError::EmptyEmail { index });
            }
            if let Some(first) = contacts[..index]
                .iter()
                .position(|earlier| fold_eq(&earlier.email, &contact.email))
            {
                return Err(StoreError::DuplicateEmail {
                    email: contact.email.clone(),
                    index,
                    first,
                });
            }
        }
        Ok(Self { contacts })
    }

    /// The built-in sample CRM dataset.
    pub fn seeded() -> Self {
        Self { contacts: seed_contacts() }
    }

    /// Every contact, in insertion order.
    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    /// First contact whose email equals `email` ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.email_matches(email))
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl Default for ContactStore {
    fn default() -> Self { Self::seeded() }
}

fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact::new("John",  "Doe",     "+1-555-123-4567", "john.doe@example.com"),
        Contact::new("Sarah", "Smith",   "+1-555-234-5678", "sarah.smith@example.com"),
        Contact::new("Mike",  "Johnson", "+1-555-345-6789", "mike.johnson@example.com"),
        Contact::new("Emily", "Brown",   "+1-555-456-7890", "emily.brown@example.com"),
        Contact::new("David", "Wilson",  "+1-555-567-8901", "david.wilson@example.com"),
    ]
}
