//! Integration tests for the token gate middleware and claims accessor.

use std::time::{Duration, SystemTime};

use actix_web::body;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use auth_core::{issue_access_token, AccessClaims, Role, SecurityConfig, TokenGate};

/// Gate rejections surface as service-level errors rather than responses,
/// so `call_service` cannot be used for them. Capture the error and render
/// its response for assertions.
async fn call_and_capture_rejection<S, R, B>(app: &S, req: R) -> (StatusCode, serde_json::Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let err = match app.call(req).await {
        Ok(_) => panic!("expected the gate to reject the request"),
        Err(err) => err,
    };
    let resp = err.error_response();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body())
        .await
        .expect("read rejection body");
    let body = serde_json::from_slice(&bytes).expect("rejection body is problem+json");
    (status, body)
}

fn test_security() -> SecurityConfig {
    SecurityConfig::new(
        "test_secret_key_for_testing_purposes_only".as_bytes(),
        Duration::from_secs(3600),
    )
}

/// Echoes the verified claims back; relies entirely on the gate having run.
async fn whoami(claims: AccessClaims) -> HttpResponse {
    HttpResponse::Ok().json(claims)
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "up" }))
}

macro_rules! gated_app {
    ($security:expr) => {
        test::init_service(
            App::new()
                .wrap(TokenGate::new($security, ["/health"]))
                .route("/health", web::get().to(health))
                .route("/whoami", web::get().to(whoami)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_valid_token_reaches_handler_with_claims() {
    let security = test_security();
    let app = gated_app!(security.clone());

    let token =
        issue_access_token("u1", Role::Receptionist, SystemTime::now(), &security).unwrap();

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["sub"], "u1");
    assert_eq!(body["role"], "receptionist");
}

#[actix_web::test]
async fn test_missing_header_is_unauthorized() {
    let app = gated_app!(test_security());

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let (status, body) = call_and_capture_rejection(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["detail"], "Authentication required");
}

#[actix_web::test]
async fn test_wrong_scheme_is_unauthorized() {
    let app = gated_app!(test_security());

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let (status, _) = call_and_capture_rejection(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_token_is_unauthorized() {
    let security = test_security();
    let app = gated_app!(security.clone());

    let issued_at = SystemTime::now() - Duration::from_secs(2 * 3600);
    let token = issue_access_token("u1", Role::Doctor, issued_at, &security).unwrap();

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let (status, _) = call_and_capture_rejection(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_foreign_secret_is_unauthorized() {
    let security = test_security();
    let app = gated_app!(security);

    let other = SecurityConfig::new("some-other-secret".as_bytes(), Duration::from_secs(3600));
    let token = issue_access_token("u1", Role::Doctor, SystemTime::now(), &other).unwrap();

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let (status, _) = call_and_capture_rejection(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_allowlisted_path_needs_no_token() {
    let app = gated_app!(test_security());

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_allowlisted_path_ignores_unverifiable_header() {
    let security = test_security();
    let app = gated_app!(security.clone());

    // A garbage token on an allow-listed path must not be inspected
    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Same for an expired but otherwise well-formed one
    let issued_at = SystemTime::now() - Duration::from_secs(2 * 3600);
    let token = issue_access_token("u1", Role::Doctor, issued_at, &security).unwrap();
    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_allowlist_match_is_exact() {
    let app = gated_app!(test_security());

    // A sibling path must not inherit the bypass
    let req = test::TestRequest::get().uri("/whoami").to_request();
    let (status, _) = call_and_capture_rejection(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_accessor_fails_closed_without_gate() {
    // Route wired without the gate: the claims accessor must reject rather
    // than let the handler run unauthenticated.
    let app =
        test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
