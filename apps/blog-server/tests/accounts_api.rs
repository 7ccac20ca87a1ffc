//! Registration, login and profile routes.

mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use common::Harness;

#[actix_web::test]
async fn register_login_and_post() {
    let h = Harness::new();
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::post()
        .uri("/register/")
        .set_json(json!({
            "username": "dana",
            "email": "dana@example.com",
            "password": "long-enough-pw",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "username": "dana", "password": "long-enough-pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/profile/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], "dana");
    let user_id = body["data"]["id"].clone();

    let req = test::TestRequest::post()
        .uri("/post/new/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({ "title": "First", "content": "Hello" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["author_id"], user_id);
}

#[actix_web::test]
async fn duplicate_username_conflicts() {
    let h = Harness::new();
    h.user("erin").await;
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::post()
        .uri("/register/")
        .set_json(json!({
            "username": "erin",
            "email": "other@example.com",
            "password": "long-enough-pw",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "username erin is already taken");
}

#[actix_web::test]
async fn registration_is_validated() {
    let h = Harness::new();
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::post()
        .uri("/register/")
        .set_json(json!({
            "username": "bad name",
            "email": "nope",
            "password": "short",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn wrong_password_is_unauthorized() {
    let h = Harness::new();
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::post()
        .uri("/register/")
        .set_json(json!({
            "username": "frank",
            "email": "frank@example.com",
            "password": "long-enough-pw",
        }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "username": "frank", "password": "not-the-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "username": "ghost", "password": "whatever-pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_requires_token() {
    let h = Harness::new();
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::get().uri("/profile/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn health_reports_ok() {
    let h = Harness::new();
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}
