//! CRM contact API server.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl 'http://localhost:3000/api/contacts/by-email?email=john.doe@example.com'
//!   curl http://localhost:3000/api/contacts
//!   open http://localhost:3000/api-docs

use std::sync::Arc;

use anyhow::Result;
use crm_contacts::contacts::{ContactLookupService, ContactStore};
use crm_contacts::{ApiDocs, Config, Cors, Server, api};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // The subscriber is not up yet; fall back to a default filter
            // so the failure is still reported.
            tracing_subscriber::fmt().with_env_filter(EnvFilter::new("error")).init();
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Arc::new(ContactStore::seeded());
    let service = ContactLookupService::new(Arc::clone(&store));

    let mut docs = match &config.openapi_spec_path {
        Some(path) => ApiDocs::from_file(path),
        None => ApiDocs::bundled(),
    };
    if let Some(url) = &config.swagger_ui_assets_url {
        docs = docs.with_assets_url(url.as_str());
    }

    let app = api::app(service, docs, Cors::with_origin(&config.cors_allow_origin));

    let server = Server::bind(config.bind_addr()).await?;
    let addr = server.local_addr()?;

    info!("{} running on http://{}", api::SERVICE_NAME, addr);
    info!("API documentation available at http://{}/api-docs", addr);
    info!("Sample contacts in the database:");
    for contact in store.all() {
        info!(
            "  - {}: {}, {}",
            contact.email,
            contact.full_name(),
            contact.phone_number
        );
    }

    server.serve(app).await?;

    info!("{} shutdown complete", api::SERVICE_NAME);
    Ok(())
}
