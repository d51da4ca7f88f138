//! CORS headers.
//!
//! Mirrors the permissive defaults browsers expect from a public read-only
//! API: any origin, the common methods, and whatever request headers the
//! preflight asks for.

use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

const ALLOW_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

/// CORS policy applied by the router.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cors {
    allow_origin: String,
}

impl Cors {
    /// `access-control-allow-origin: *`.
    pub fn permissive() -> Self {
        Self::with_origin("*")
    }

    /// Allow a single fixed origin.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self { allow_origin: origin.into() }
    }

    pub fn allow_origin(&self) -> &str {
        &self.allow_origin
    }

    /// Adds the origin headers to a normal (non-preflight) response.
    pub fn apply(&self, res: &mut Response) {
        res.set_header("access-control-allow-origin", self.allow_origin.clone());
        if self.allow_origin != "*" {
            res.set_header("vary", "Origin");
        }
    }

    /// Answers an `OPTIONS` preflight with `204 No Content`.
    ///
    /// Requested headers are echoed back in `access-control-allow-headers`.
    pub fn preflight(&self, req: &Request) -> Response {
        let mut res = Response::builder()
            .status(Status::NoContent)
            .header("access-control-allow-methods", ALLOW_METHODS)
            .no_body();
        self.apply(&mut res);

        if let Some(requested) = req.header("access-control-request-headers") {
            let vary = vary_with(res.header("vary"), "Access-Control-Request-Headers");
            res.set_header("access-control-allow-headers", requested);
            res.set_header("vary", vary);
        }
        res
    }
}

impl Default for Cors {
    fn default() -> Self { Self::permissive() }
}

fn vary_with(existing: Option<&str>, field: &str) -> String {
    match existing {
        Some(v) => format!("{v}, {field}"),
        None => field.to_owned(),
    }
}
