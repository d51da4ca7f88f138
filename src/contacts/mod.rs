//! Contact lookup core.
//!
//! Everything in here is transport-agnostic: no status codes, no JSON bodies,
//! no logging. The HTTP layer in [`crate::api`] turns the outcomes into
//! responses.
//!
//! - [`Contact`] — one immutable record.
//! - [`ContactStore`] — the fixed, insertion-ordered record set.
//! - [`is_valid_email`] — the syntactic email check.
//! - [`ContactLookupService`] — validation + store lookup in one call.

mod contact;
mod lookup;
mod store;
mod validator;

pub use contact::Contact;
pub use lookup::{ContactLookupService, LookupError, LookupQuery, LookupResult};
pub use store::{ContactStore, StoreError};
pub use validator::is_valid_email;
