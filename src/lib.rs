//! # crm-contacts
//!
//! A small read-only CRM contact API: a fixed list of contacts, a lookup by
//! email address, and generated API documentation.
//!
//! ## Layout
//!
//! - [`contacts`] — the lookup core: store, email check, lookup service.
//!   Transport-agnostic; lookups return `Result<&Contact, LookupError>`.
//! - [`api`] — the HTTP routes and the mapping from lookup outcomes to
//!   status codes and JSON bodies.
//! - [`Router`], [`Server`], [`Request`], [`Response`] — a thin hyper-based
//!   transport: radix-tree routing via [`matchit`], HTTP/1.1 + HTTP/2,
//!   graceful shutdown on SIGTERM / Ctrl-C.
//! - [`middleware`] — CORS and per-request tracing, applied by the router.
//! - [`docs`] — the OpenAPI document and the Swagger UI page.
//! - [`config`] — environment-driven settings.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use crm_contacts::contacts::{ContactLookupService, ContactStore};
//! use crm_contacts::{ApiDocs, Cors, Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), crm_contacts::Error> {
//!     let service = ContactLookupService::new(Arc::new(ContactStore::seeded()));
//!     let app = api::app(service, ApiDocs::bundled(), Cors::permissive());
//!
//!     Server::bind("0.0.0.0:3000".parse().unwrap())
//!         .await?
//!         .serve(app)
//!         .await
//! }
//! ```

mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod contacts;
pub mod docs;
pub mod error;
pub mod health;
pub mod middleware;

pub use config::Config;
pub use docs::ApiDocs;
pub use error::{ConfigError, DocsError, Error};
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use middleware::Cors;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
