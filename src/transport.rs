//! HTTP transports for submitting redemptions.
//!
//! A transport is any [`Service`] that takes an [`http::Request`] with an empty body and resolves to an
//! [`http::Response`] with the full body collected. The client never retries and never inspects the body.
//! Timeouts, pooling, and cancellation belong to the transport.

use {
    crate::TrackingError,
    bytes::Bytes,
    http::{Request, Response},
    log::trace,
    std::{
        fmt::{Debug, Formatter, Result as FmtResult},
        future::Future,
        pin::Pin,
        task::{Context, Poll},
    },
    tower::{service_fn, util::ServiceFn, BoxError, Service},
};

// A trait alias for the transport bound would read better than repeating it on every impl block. This requires the
// trait_alias feature to be stabilized. https://github.com/rust-lang/rust/issues/41517
//
// pub trait Transport = Service<Request<()>, Response = Response<Bytes>, Error = BoxError> + Clone;

/// The default transport, backed by a [`reqwest::Client`].
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new() -> Result<Self, TrackingError> {
        match reqwest::Client::builder().build() {
            Ok(client) => Ok(Self::with_client(client)),
            Err(e) => Err(TrackingError::Transport(Box::new(e))),
        }
    }

    /// Create a transport around an existing `reqwest` client (e.g. one configured with timeouts or a proxy).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
        }
    }
}

impl Debug for HttpTransport {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("HttpTransport")
    }
}

impl Service<Request<()>> for HttpTransport {
    type Response = Response<Bytes>;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Response<Bytes>, BoxError>> + Send>>;

    fn poll_ready(&mut self, _c: &mut Context) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<()>) -> Self::Future {
        let client = self.client.clone();

        Box::pin(async move {
            let (parts, _) = req.into_parts();
            trace!("HttpTransport: {} {}", parts.method, parts.uri);

            let response = client.request(parts.method, parts.uri.to_string()).headers(parts.headers).send().await?;

            let status = response.status();
            let version = response.version();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            trace!("HttpTransport: {} ({} bytes)", status, body.len());

            let mut result = Response::new(body);
            *result.status_mut() = status;
            *result.version_mut() = version;
            *result.headers_mut() = headers;
            Ok(result)
        })
    }
}

/// Create a transport that wraps an async function. Useful for tests and for adapting other HTTP clients.
pub fn transport_fn<F, Fut>(f: F) -> ServiceFn<F>
where
    F: FnMut(Request<()>) -> Fut,
    Fut: Future<Output = Result<Response<Bytes>, BoxError>>,
{
    service_fn(f)
}
