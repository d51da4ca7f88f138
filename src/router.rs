//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. The router also owns the
//! request pipeline: method parsing, CORS, tracing, handler isolation and the
//! 404/500 fallbacks.
//!
//! Matching is lenient: static path segments ignore ASCII case, a single
//! trailing `/` is ignored, and `HEAD` falls back to the `GET` route with the
//! body dropped. Path parameter values keep the case the client sent.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use matchit::Router as MatchitRouter;
use tracing::error;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{Cors, RequestTrace};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Registration methods return `self` so calls chain.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    cors: Cors,
}

impl Router {
    /// Empty router with a permissive CORS policy.
    pub fn new() -> Self {
        Self { routes: HashMap::new(), cors: Cors::permissive() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(fold_route(path), handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Shorthand for `on(Method::Get, …)`.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    /// Replace the CORS policy.
    pub fn cors(mut self, cors: Cors) -> Self {
        self.cors = cors;
        self
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let path = trim_trailing_slash(path);
        // ASCII folding keeps byte offsets, so parameter values can be cut
        // from the original path at the same positions.
        let folded = path.to_ascii_lowercase();
        let matched = tree.at(&folded).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), original_slice(path, &folded, v).to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request and produces one response. Never fails.
    ///
    /// The matched handler runs on its own task so a panic is contained and
    /// answered with `500 {"error":"Internal server error"}`.
    pub async fn dispatch(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let path = parts.uri.path().to_owned();
        let trace = RequestTrace::start(parts.method.as_str(), &path);

        let mut response = match Method::try_from(&parts.method) {
            // Unrecognised methods can never match a route.
            Err(_) => not_found(),
            Ok(Method::Options) if !self.has_route(Method::Options, &path) => {
                let req = Request::new(Method::Options, parts, body, HashMap::new());
                self.cors.preflight(&req)
            }
            Ok(Method::Head) if !self.has_route(Method::Head, &path) => {
                match self.lookup(Method::Get, &path) {
                    Some((handler, params)) => {
                        let req = Request::new(Method::Head, parts, body, params);
                        let mut res = run(handler, req, Method::Head, &path).await;
                        res.body.clear();
                        res
                    }
                    None => not_found(),
                }
            }
            Ok(method) => match self.lookup(method, &path) {
                Some((handler, params)) => {
                    let req = Request::new(method, parts, body, params);
                    run(handler, req, method, &path).await
                }
                None => not_found(),
            },
        };

        if response.header("access-control-allow-origin").is_none() {
            self.cors.apply(&mut response);
        }
        trace.finish(response.status_code());
        response
    }

    fn has_route(&self, method: Method, path: &str) -> bool {
        self.lookup(method, path).is_some()
    }
}

/// Runs `handler` on its own task; a panic becomes a 500.
async fn run(handler: BoxedHandler, req: Request, method: Method, path: &str) -> Response {
    match tokio::spawn(handler.call(req)).await {
        Ok(res) => res,
        Err(e) => {
            error!(%method, path = %path, "handler failed: {e}");
            Response::error(Status::InternalServerError, "Internal server error")
        }
    }
}

fn not_found() -> Response {
    Response::error(Status::NotFound, "Not found")
}

/// `/api/contacts/` → `/api/contacts`; `/` stays `/`.
fn trim_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

/// Lowercases the static parts of a route, leaving `{param}` names alone.
fn fold_route(path: &str) -> String {
    let mut in_param = false;
    trim_trailing_slash(path)
        .chars()
        .map(|c| {
            match c {
                '{' => in_param = true,
                '}' => in_param = false,
                _ => {}
            }
            if in_param { c } else { c.to_ascii_lowercase() }
        })
        .collect()
}

/// The slice of `original` at the position `matched` occupies in `folded`.
fn original_slice<'a>(original: &'a str, folded: &str, matched: &'a str) -> &'a str {
    (matched.as_ptr() as usize)
        .checked_sub(folded.as_ptr() as usize)
        .and_then(|start| original.get(start..start + matched.len()))
        .unwrap_or(matched)
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
