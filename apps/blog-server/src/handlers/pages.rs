//! Static pages.

use actix_web::{HttpResponse, web};
use blog_shared::ApiResponse;
use blog_shared::dto::AboutResponse;

use crate::state::AppState;

/// GET /about/
pub async fn about(state: web::Data<AppState>) -> HttpResponse {
    let page = state.access().about();
    HttpResponse::Ok().json(ApiResponse::ok(AboutResponse {
        title: page.title.to_string(),
    }))
}
