//! HTTP routes for the contact API.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | service description and sample emails |
//! | `GET /api/contacts/by-email?email=` | single contact lookup |
//! | `GET /api/contacts` | every contact |
//! | `GET /openapi.json` | OpenAPI document |
//! | `GET /api-docs` | Swagger UI |
//! | `GET /health` | health check |

use std::future::Future;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::error;

use crate::contacts::{ContactLookupService, LookupError, LookupQuery};
use crate::docs::ApiDocs;
use crate::handler::Handler;
use crate::health;
use crate::middleware::Cors;
use crate::request::Request;
use crate::response::{ContentType, IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;

pub const SERVICE_NAME: &str = "CRM Contact API Server";

const OPENAPI_PATH: &str = "/openapi.json";

/// Route summaries returned by `GET /`, in display order.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /api/contacts/by-email", "Get contact by email address"),
    ("GET /api/contacts", "Get all contacts"),
    ("GET /api-docs", "Swagger UI documentation"),
    ("GET /openapi.json", "OpenAPI specification"),
    ("GET /health", "Health check"),
];

/// Shared state behind every contact route.
pub struct AppState {
    pub service: ContactLookupService,
    pub docs: ApiDocs,
}

/// Builds the full application router.
pub fn app(service: ContactLookupService, docs: ApiDocs, cors: Cors) -> Router {
    let state = Arc::new(AppState { service, docs });

    Router::new()
        .get("/",                       with_state(state.clone(), root))
        .get("/api/contacts/by-email",  with_state(state.clone(), contact_by_email))
        .get("/api/contacts",           with_state(state.clone(), all_contacts))
        .get(OPENAPI_PATH,              with_state(state.clone(), openapi_json))
        .get("/api-docs",               with_state(state.clone(), swagger_ui))
        .get("/health",                 health::health)
        .cors(cors)
}

/// Maps a lookup failure to its HTTP status.
pub fn status_for(err: LookupError) -> Status {
    match err {
        LookupError::MissingParameter | LookupError::InvalidFormat => Status::BadRequest,
        LookupError::NotFound => Status::NotFound,
    }
}

fn with_state<F, Fut>(state: Arc<AppState>, f: F) -> impl Handler
where
    F: Fn(Arc<AppState>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    move |req: Request| f(Arc::clone(&state), req)
}

// ── Handlers ──────────────────────────────────────────────────────────────────

// GET /api/contacts/by-email?email=
async fn contact_by_email(state: Arc<AppState>, req: Request) -> Response {
    let query = LookupQuery { email: req.query("email") };

    match state.service.lookup_by_email(&query) {
        Ok(contact) => Json(contact).into_response(),
        Err(e) => Response::error(status_for(e), e.to_string()),
    }
}

// GET /api/contacts
async fn all_contacts(state: Arc<AppState>, _req: Request) -> Response {
    Json(state.service.list_all()).into_response()
}

// GET /openapi.json
async fn openapi_json(state: Arc<AppState>, _req: Request) -> Response {
    match state.docs.load().await {
        Ok(doc) => Json(doc).into_response(),
        Err(e) => {
            error!("failed to load OpenAPI document: {e}");
            Response::error(Status::InternalServerError, "Failed to load OpenAPI specification")
        }
    }
}

// GET /api-docs
async fn swagger_ui(state: Arc<AppState>, _req: Request) -> Response {
    match state.docs.load().await {
        Ok(_) => Response::builder().bytes(
            ContentType::Html,
            state.docs.swagger_ui_html("CRM Contact API", OPENAPI_PATH).into_bytes(),
        ),
        Err(e) => {
            error!("failed to load API documentation: {e}");
            Response::builder()
                .status(Status::InternalServerError)
                .text("Failed to load API documentation")
        }
    }
}

// GET /
async fn root(state: Arc<AppState>, _req: Request) -> Response {
    Json(RootInfo {
        message: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints(ENDPOINTS),
        sample_contacts: state
            .service
            .list_all()
            .iter()
            .map(|c| c.email.as_str())
            .collect(),
    })
    .into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RootInfo<'a> {
    message: &'static str,
    version: &'static str,
    endpoints: Endpoints,
    sample_contacts: Vec<&'a str>,
}

/// Serializes as a JSON object keeping declaration order.
struct Endpoints(&'static [(&'static str, &'static str)]);

impl Serialize for Endpoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().copied())
    }
}
