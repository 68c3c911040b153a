use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::gate::{CHALLENGE_CONTENT_TYPE, CHALLENGE_HEADER_VALUE};

/// Gate guard for embedding the filter in front of axum routes.
///
/// Forwards the request untouched when the `Authorization` header matches the
/// configured credential pair, otherwise replies immediately with the canned
/// challenge - the downstream handler is never reached.
pub async fn viewer_request_guard(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let presented =
        req.headers().get(header::AUTHORIZATION).and_then(|value| value.to_str().ok());

    if state.gate.authorize(presented) {
        return next.run(req).await;
    }

    challenge_response(&state)
}

fn challenge_response(state: &AppState) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [
            (header::WWW_AUTHENTICATE, CHALLENGE_HEADER_VALUE),
            (header::CONTENT_TYPE, CHALLENGE_CONTENT_TYPE),
        ],
        state.gate.deny_payload().body.clone(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::Credential;
    use crate::gate::AuthGate;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn protected_app() -> Router {
        let state = Arc::new(AppState {
            gate: Arc::new(AuthGate::new(Credential::new(
                "admin".to_string(),
                "secret".to_string(),
            ))),
        });

        Router::new()
            .route("/", get(|| async { "origin content" }))
            .layer(middleware::from_fn_with_state(state, viewer_request_guard))
    }

    fn request(auth_header: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_guard_forwards_with_valid_credentials() {
        let response =
            protected_app().oneshot(request(Some("Basic YWRtaW46c2VjcmV0"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"origin content");
    }

    #[tokio::test]
    async fn test_guard_challenges_without_credentials() {
        let response = protected_app().oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"Restricted Area\""
        );
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=UTF-8"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = std::str::from_utf8(&bytes).unwrap();
        assert!(body.contains("<h1>"));
    }

    #[tokio::test]
    async fn test_guard_challenges_on_wrong_scheme_case() {
        let response =
            protected_app().oneshot(request(Some("basic YWRtaW46c2VjcmV0"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
