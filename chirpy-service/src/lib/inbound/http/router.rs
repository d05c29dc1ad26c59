use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::healthz::healthz;
use super::handlers::login::login;
use super::handlers::polka_webhook::polka_webhook;
use super::handlers::refresh::refresh;
use super::handlers::revoke::revoke;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub polka_api_key: Arc<str>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    session_service: Arc<dyn SessionServicePort>,
    polka_api_key: impl Into<Arc<str>>,
) -> Router {
    let state = AppState {
        user_service,
        session_service,
        polka_api_key: polka_api_key.into(),
    };

    let public_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke))
        .route("/api/users", post(create_user))
        .route("/api/polka/webhooks", post(polka_webhook));

    let protected_routes = Router::new()
        .route("/api/users", put(update_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are not recorded: they carry credentials.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header;
    use axum::http::StatusCode;
    use mockall::mock;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::session::errors::SessionError;
    use crate::domain::session::models::Session;
    use crate::domain::user::models::CreateUserCommand;
    use crate::domain::user::models::UpdateCredentialsCommand;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::user::errors::UserError;

    mock! {
        pub TestUserService {}

        #[async_trait]
        impl UserServicePort for TestUserService {
            async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;
            async fn update_credentials(&self, id: &UserId, command: UpdateCredentialsCommand) -> Result<User, UserError>;
            async fn upgrade_to_chirpy_red(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestSessionService {}

        #[async_trait]
        impl SessionServicePort for TestSessionService {
            async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError>;
            async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;
            async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;
            fn authenticate(&self, access_token: &str) -> Result<UserId, SessionError>;
        }
    }

    fn router(user_service: MockTestUserService, session_service: MockTestSessionService) -> Router {
        create_router(Arc::new(user_service), Arc::new(session_service), "k3y")
    }

    fn post(uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_refresh_forwards_bearer_token() {
        let mut session_service = MockTestSessionService::new();
        session_service
            .expect_refresh()
            .withf(|token| token == "abc123")
            .times(1)
            .returning(|_| Ok("access".to_string()));

        let response = router(MockTestUserService::new(), session_service)
            .oneshot(post("/api/refresh", Some("Bearer abc123")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_revoke_without_header_never_reaches_service() {
        let mut session_service = MockTestSessionService::new();
        session_service.expect_revoke().never();

        let response = router(MockTestUserService::new(), session_service)
            .oneshot(post("/api/revoke", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_revoke_succeeds_with_no_content() {
        let mut session_service = MockTestSessionService::new();
        session_service.expect_revoke().times(1).returning(|_| Ok(()));

        let response = router(MockTestUserService::new(), session_service)
            .oneshot(post("/api/revoke", Some("Bearer abc123")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_protected_route_rejects_invalid_access_token() {
        let mut session_service = MockTestSessionService::new();
        session_service
            .expect_authenticate()
            .returning(|_| Err(SessionError::InvalidAccessToken));
        let mut user_service = MockTestUserService::new();
        user_service.expect_update_credentials().never();

        let request = Request::builder()
            .method("PUT")
            .uri("/api/users")
            .header(header::AUTHORIZATION, "Bearer garbage")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"a@b.com","password":"x"}"#))
            .unwrap();

        let response = router(user_service, session_service)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_webhook_wrong_key_never_upgrades() {
        let mut user_service = MockTestUserService::new();
        user_service.expect_upgrade_to_chirpy_red().never();

        let request = Request::builder()
            .method("POST")
            .uri("/api/polka/webhooks")
            .header(header::AUTHORIZATION, "ApiKey wrong")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"event":"user.upgraded","data":{"user_id":"3311741c-680c-4546-99f3-fc9efac2036c"}}"#,
            ))
            .unwrap();

        let response = router(user_service, MockTestSessionService::new())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
