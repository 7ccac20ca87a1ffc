//! HTTP handlers and route configuration.

mod auth;
mod health;
mod pages;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public listings and detail
        .route("/", web::get().to(posts::home))
        .route("/user/{username}", web::get().to(posts::user_posts))
        // Must precede "/post/{id}/", which would otherwise capture "new"
        .service(
            web::resource("/post/new/")
                .route(web::get().to(posts::new_form))
                .route(web::post().to(posts::create)),
        )
        .route("/post/{id}/", web::get().to(posts::detail))
        // Author-only routes
        .service(
            web::resource("/post/{id}/update/")
                .route(web::get().to(posts::edit_form))
                .route(web::post().to(posts::update)),
        )
        .service(
            web::resource("/post/{id}/delete/")
                .route(web::get().to(posts::confirm_delete))
                .route(web::post().to(posts::delete)),
        )
        .route("/about/", web::get().to(pages::about))
        // Accounts
        .route("/register/", web::post().to(auth::register))
        .route("/login/", web::post().to(auth::login))
        .route("/profile/", web::get().to(auth::profile))
        .route("/health", web::get().to(health::health_check));
}
