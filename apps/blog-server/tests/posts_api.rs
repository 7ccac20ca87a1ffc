//! HTTP-level behaviour of the post routes.

mod common;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use common::Harness;

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn author_lifecycle_scenario() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let bob = h.user("bob").await;
    let app = test::init_service(h.clone().app()).await;

    // Alice creates P1; any submitted author is ignored.
    let req = test::TestRequest::post()
        .uri("/post/new/")
        .insert_header(h.bearer(&alice))
        .set_json(json!({
            "title": "Hello",
            "content": "World",
            "author_id": bob.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let detail_url = location(&resp);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(detail_url, format!("/post/{id}/"));

    let req = test::TestRequest::get().uri(&detail_url).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["author_id"], alice.id.to_string());
    assert_eq!(body["data"]["title"], "Hello");

    // Bob may not edit it.
    let req = test::TestRequest::post()
        .uri(&format!("/post/{id}/update/"))
        .insert_header(h.bearer(&bob))
        .set_json(json!({ "title": "Pwned", "content": "World" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri(&detail_url).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Hello");

    // Alice may.
    let req = test::TestRequest::post()
        .uri(&format!("/post/{id}/update/"))
        .insert_header(h.bearer(&alice))
        .set_json(json!({ "title": "Hi", "content": "World" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), detail_url);

    let req = test::TestRequest::get().uri(&detail_url).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Hi");

    // Alice deletes it and lands on the home page.
    let req = test::TestRequest::post()
        .uri(&format!("/post/{id}/delete/"))
        .insert_header(h.bearer(&alice))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");

    let req = test::TestRequest::get().uri(&detail_url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn protected_routes_redirect_to_login() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let post = h.post_at(&alice, "Hello", 0).await;
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::get().uri("/post/new/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/login/?next=%2Fpost%2Fnew%2F");

    let req = test::TestRequest::post()
        .uri("/post/new/")
        .set_json(json!({ "title": "Hello", "content": "World" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/login/?next="));

    // An invalid token counts as no login.
    let req = test::TestRequest::post()
        .uri(&format!("/post/{}/delete/", post.id))
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/login/"));

    let req = test::TestRequest::get()
        .uri(&format!("/post/{}/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn logged_out_malformed_id_redirects_to_login() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let app = test::init_service(h.clone().app()).await;

    for uri in ["/post/not-a-uuid/update/", "/post/not-a-uuid/delete/"] {
        let req = test::TestRequest::post().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{uri}");
        assert!(location(&resp).starts_with("/login/?next="), "{uri}");
    }

    let req = test::TestRequest::post()
        .uri("/post/not-a-uuid/delete/")
        .insert_header(h.bearer(&alice))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn non_author_delete_is_denied() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let bob = h.user("bob").await;
    let post = h.post_at(&alice, "Keep me", 0).await;
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/post/{}/delete/", post.id))
        .insert_header(h.bearer(&bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/post/{}/delete/", post.id))
        .insert_header(h.bearer(&bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 403);

    let req = test::TestRequest::get()
        .uri(&format!("/post/{}/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn create_accepts_urlencoded_form() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::post()
        .uri("/post/new/")
        .insert_header(h.bearer(&alice))
        .set_form([("title", "From a form"), ("content", "Body")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "From a form");
    assert_eq!(body["data"]["author_id"], alice.id.to_string());
}

#[actix_web::test]
async fn invalid_form_is_unprocessable() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::post()
        .uri("/post/new/")
        .insert_header(h.bearer(&alice))
        .set_json(json!({ "title": "", "content": "Body" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0], "title: this field is required");
}

#[actix_web::test]
async fn edit_form_is_prefilled_for_the_author() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let post = h.post_at(&alice, "Draft", 0).await;
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/post/{}/update/", post.id))
        .insert_header(h.bearer(&alice))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["title"], "Draft");
    assert_eq!(body["data"]["content"], "content");
}

#[actix_web::test]
async fn home_is_paginated_newest_first() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    for minutes in 1..=6 {
        h.post_at(&alice, &format!("post-{minutes}"), minutes).await;
    }
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let data = &body["data"];
    assert_eq!(data["posts"].as_array().unwrap().len(), 5);
    assert_eq!(data["posts"][0]["title"], "post-1");
    assert_eq!(data["posts"][4]["title"], "post-5");
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["has_next"], true);

    let req = test::TestRequest::get().uri("/?page=2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["posts"][0]["title"], "post-6");
    assert_eq!(body["data"]["has_previous"], true);

    for uri in [
        "/?page=3",
        "/?page=0",
        "/?page=abc",
        "/?page=18446744073709551615",
        "/?page=3689348814741910323",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn user_listing_routes() {
    let h = Harness::new();
    let alice = h.user("alice").await;
    let bob = h.user("bob").await;
    h.post_at(&alice, "by alice", 2).await;
    h.post_at(&bob, "by bob", 1).await;
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::get().uri("/user/alice").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["posts"][0]["title"], "by alice");

    let req = test::TestRequest::get()
        .uri("/user/alice?page=18446744073709551615")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/user/nobody").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_post_id_is_not_found() {
    let h = Harness::new();
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::get().uri("/post/42/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn about_page() {
    let h = Harness::new();
    let app = test::init_service(h.clone().app()).await;

    let req = test::TestRequest::get().uri("/about/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "About");
}
