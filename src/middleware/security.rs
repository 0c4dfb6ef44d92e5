// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.
//!
//! Every response carries identity or balance data, so nothing may be cached
//! by intermediaries and nothing may be rendered as a document.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Add security headers to all responses.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::MemoryPlayerStore;
    use crate::routes::create_router;
    use crate::AppState;
    use axum::body::Body;
    use axum::http::{HeaderMap, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn assert_hardened(headers: &HeaderMap) {
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert_eq!(
            headers[header::CONTENT_SECURITY_POLICY],
            "default-src 'none'; frame-ancestors 'none'"
        );
        assert_eq!(headers[header::REFERRER_POLICY], "no-referrer");
    }

    async fn call(uri: &str) -> Response {
        let state = Arc::new(AppState::new(
            Config::test_default(),
            Arc::new(MemoryPlayerStore::new()),
        ));
        create_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_and_error_responses_are_hardened() {
        let ok = call("/health").await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert_hardened(ok.headers());

        // Player data must not be cached even when the lookup fails.
        let missing = call("/players?telegram_id=404").await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_hardened(missing.headers());
    }
}
