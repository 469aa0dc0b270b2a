//! HTTP endpoint serving random quotes.
//!
//! One route: `GET /api/quote` returns `{"quote": "<string>"}` as JSON.
//! Callers treat any non-2xx response as "no quote available".

use anyhow::{Context, Result};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::quote::random_quote;

pub const DEFAULT_PORT: u16 = 8787;

/// Status and JSON body for one quote request.
pub fn quote_payload() -> (StatusCode, String) {
    match serde_json::to_string(&serde_json::json!({ "quote": random_quote() })) {
        Ok(body) => (StatusCode::OK, body),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Failed to fetch quote"}"#.to_string(),
        ),
    }
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
    if req.method() != Method::GET || req.uri().path() != "/api/quote" {
        tracing::debug!(method = %req.method(), path = %req.uri().path(), "no such route");
        let mut response = Response::new(Full::new(Bytes::from("Not found")));
        *response.status_mut() = StatusCode::NOT_FOUND;
        return Ok(response);
    }

    let (status, body) = quote_payload();
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(response)
}

/// Binds the endpoint on localhost and serves connections until the process
/// exits.
pub async fn serve(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!(%addr, "quote server listening");

    loop {
        let (stream, remote) = listener
            .accept()
            .await
            .context("error accepting connection")?;
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            if let Err(e) = http1::Builder::new()
                .serve_connection(io, service_fn(handle_request))
                .await
            {
                tracing::warn!(%remote, error = %e, "connection error");
            }
        });
    }
}
