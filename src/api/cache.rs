//! Cache-disabling response headers.
//!
//! Draws must be fresh on every call, so every response of the router
//! carries the full no-store set rather than relying on framework defaults.

use axum::{
    extract::Request,
    http::{
        header::{CACHE_CONTROL, EXPIRES, PRAGMA},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};

pub const NO_STORE_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

/// Overwrite any caching headers with the no-store set.
pub fn apply_no_store(headers: &mut HeaderMap) {
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static(NO_STORE_CACHE_CONTROL),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
}

/// Middleware form of [`apply_no_store`]; runs on success and error
/// responses alike.
pub async fn no_store(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    apply_no_store(response.headers_mut());
    response
}
