//! Handler trait and type erasure.
//!
//! The router stores handlers of different concrete types in one map, so each
//! one is wrapped and erased behind `Arc<dyn ErasedHandler>`:
//!
//! ```text
//! |req| async move { … }                  ← closure capturing shared state
//!        ↓ router.get("/api/contacts", handler)
//! handler.into_boxed_handler()            ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(handler))            ← stored as BoxedHandler
//!        ↓
//! handler.call(req)                       ← one virtual call per request
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` so the router can hand it to `tokio::spawn`.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any `Fn(Request) -> impl Future<Output = impl
/// IntoResponse>`, which covers plain `async fn` items and closures that
/// clone shared state into an `async move` block:
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use crm_contacts::{Json, Request, Router};
/// # use crm_contacts::contacts::{ContactLookupService, ContactStore};
/// let service = ContactLookupService::new(Arc::new(ContactStore::seeded()));
///
/// Router::new().get("/api/contacts", move |_req: Request| {
///     let service = service.clone();
///     async move { Json(service.list_all().to_vec()) }
/// });
/// ```
///
/// Sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
