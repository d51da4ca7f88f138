//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server stops accepting, lets every in-flight
//! connection finish, then returns from [`Server::serve`].

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes, Incoming};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// Largest request body accepted, in bytes. Larger bodies get `413`.
const MAX_BODY_BYTES: usize = 100 * 1024;

/// The HTTP server, already bound to its listening socket.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Binds `addr`. Port `0` picks a free port; see [`local_addr`](Self::local_addr).
    pub async fn bind(addr: SocketAddr) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Serves `router` until `signal` resolves, then drains in-flight
    /// connections before returning.
    pub async fn serve_with_shutdown(
        self,
        router: Router,
        signal: impl Future<Output = ()> + Send,
    ) -> Result<(), Error> {
        let addr = self.listener.local_addr()?;
        let router = Arc::new(router);

        info!(%addr, "listening");

        let mut tasks = tokio::task::JoinSet::new();
        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting immediately.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = self.listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { handle(router, req, remote_addr).await }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the set stays bounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("server stopped");
        Ok(())
    }
}

/// Collects the body and hands the request to the router.
///
/// Infallible: every failure becomes a response, so hyper never sees an error.
async fn handle(
    router: Arc<Router>,
    req: hyper::Request<Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, std::convert::Infallible> {
    let (parts, body) = req.into_parts();

    let response = match read_body(&parts.headers, body).await {
        Ok(bytes) => router.dispatch(http::Request::from_parts(parts, bytes)).await,
        Err(res) => {
            debug!(peer = %remote_addr, status = res.status_code(), "rejected request body");
            res
        }
    };

    Ok(response.into_inner())
}

/// Buffers `body`, refusing more than [`MAX_BODY_BYTES`].
///
/// A declared `content-length` over the limit is refused before any of the
/// body is read.
async fn read_body<B>(headers: &http::HeaderMap, body: B) -> Result<Bytes, Response>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let declared = headers
        .get(http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if declared.is_some_and(|len| len > MAX_BODY_BYTES as u64) {
        return Err(payload_too_large());
    }

    match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(payload_too_large()),
        Err(e) => {
            debug!("failed to read request body: {e}");
            Err(Response::error(Status::BadRequest, "Failed to read request body"))
        }
    }
}

fn payload_too_large() -> Response {
    Response::error(Status::PayloadTooLarge, "Payload too large")
}

/// Resolves on SIGTERM (Unix) or Ctrl-C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_body_within_limit() {
        let body = Full::new(Bytes::from_static(b"{\"ok\":true}"));
        let bytes = read_body(&http::HeaderMap::new(), body).await.unwrap();
        assert_eq!(bytes, Bytes::from_static(b"{\"ok\":true}"));
    }

    #[tokio::test]
    async fn test_read_body_rejects_oversized_stream() {
        let body = Full::new(Bytes::from(vec![b'x'; MAX_BODY_BYTES + 1]));
        let res = read_body(&http::HeaderMap::new(), body).await.unwrap_err();
        assert_eq!(res.status_code(), 413);
        assert_eq!(res.body(), br#"{"error":"Payload too large"}"#);
    }

    #[tokio::test]
    async fn test_read_body_rejects_oversized_declared_length() {
        let mut headers = http::HeaderMap::new();
        headers.insert(http::header::CONTENT_LENGTH, http::HeaderValue::from_static("52428800"));
        let res = read_body(&headers, Full::new(Bytes::new())).await.unwrap_err();
        assert_eq!(res.status_code(), 413);
    }

    #[tokio::test]
    async fn test_read_body_accepts_exact_limit() {
        let body = Full::new(Bytes::from(vec![b'x'; MAX_BODY_BYTES]));
        let bytes = read_body(&http::HeaderMap::new(), body).await.unwrap();
        assert_eq!(bytes.len(), MAX_BODY_BYTES);
    }
}
