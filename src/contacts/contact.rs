//! The contact record.

use serde::{Deserialize, Serialize};

/// One person's contact information.
///
/// Serializes to exactly `firstName`, `lastName`, `phoneNumber` and `email`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    /// Free-form; never parsed or normalized.
    pub phone_number: String,
    pub email: String,
}

impl Contact {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }

    /// `"John Doe"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive comparison of this contact's email against `email`.
    ///
    /// Both sides are folded with the Unicode default lowercase mapping, so
    /// `JOHN.DOE@EXAMPLE.COM` matches `john.doe@example.com`.
    pub fn email_matches(&self, email: &str) -> bool {
        fold_eq(&self.email, email)
    }
}

pub(crate) fn fold_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
