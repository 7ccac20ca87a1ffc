//! Shared fixtures for the server integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{Duration, Utc};
use uuid::Uuid;

use blog_core::Requester;
use blog_core::domain::{Post, User};
use blog_core::ports::{PasswordService, TokenService};
use blog_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};
use blog_server::handlers::configure_routes;
use blog_server::state::AppState;

/// In-memory state plus the services the app reads from `app_data`.
#[derive(Clone)]
pub struct Harness {
    pub state: AppState,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            state: AppState::in_memory(),
            tokens: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "integration-secret".to_string(),
                expiration_hours: 1,
                issuer: "blog-tests".to_string(),
            })),
            passwords: Arc::new(
                Argon2PasswordService::with_params(1024, 1, 1).expect("valid argon2 params"),
            ),
        }
    }

    /// The routed app over this harness's state. Takes a clone so the app owns
    /// everything it serves: `test::init_service(h.clone().app())`.
    pub fn app(
        self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.state))
            .app_data(web::Data::new(self.tokens))
            .app_data(web::Data::new(self.passwords))
            .configure(configure_routes)
    }

    pub async fn user(&self, username: &str) -> User {
        self.state
            .users
            .insert(User::new(
                username.to_string(),
                format!("{username}@example.com"),
                "not-a-real-hash".to_string(),
            ))
            .await
            .expect("seed user")
    }

    pub fn bearer(&self, user: &User) -> (actix_web::http::header::HeaderName, String) {
        let token = self
            .tokens
            .generate_token(user.id, &user.username, vec!["user".to_string()])
            .expect("token");
        (
            actix_web::http::header::AUTHORIZATION,
            format!("Bearer {token}"),
        )
    }

    /// Store a post dated `minutes_ago` minutes in the past.
    pub async fn post_at(&self, author: &User, title: &str, minutes_ago: i64) -> Post {
        let mut post = Post::new(author.id, title.to_string(), "content".to_string());
        post.date_posted = Utc::now() - Duration::minutes(minutes_ago);
        self.state.posts.insert(post).await.expect("seed post")
    }
}

pub fn requester(user: &User) -> Requester {
    Requester {
        user_id: user.id,
        username: user.username.clone(),
    }
}

pub fn missing_id() -> Uuid {
    Uuid::new_v4()
}
