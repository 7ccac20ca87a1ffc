//! Post listing, detail and author-only editing.

use actix_web::{Either, HttpRequest, HttpResponse, http::header, web};
use serde::Deserialize;
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Page, Post, PostForm};
use blog_shared::ApiResponse;
use blog_shared::dto::{PostFormResponse, PostPageResponse, PostResponse, UserPostsResponse};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// `?page=N` on listing routes.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// Requested page number. Anything other than a positive integer is a 404.
    fn number(&self) -> AppResult<u64> {
        match self.page.as_deref() {
            None => Ok(1),
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| AppError::NotFound(format!("Invalid page ({raw})"))),
        }
    }
}

/// Submitted post fields, as JSON or as an urlencoded form.
type PostInput = Either<web::Json<PostForm>, web::Form<PostForm>>;

fn read_form(input: Option<PostInput>) -> PostForm {
    match input {
        Some(Either::Left(json)) => json.into_inner(),
        Some(Either::Right(form)) => form.into_inner(),
        None => {
            tracing::debug!("Unreadable post body, treating as empty form");
            PostForm::default()
        }
    }
}

/// Id of a post on an author-only route. Logged-out requests are sent to log in
/// before the id is looked at.
fn guarded_post_id(raw: &str, identity: &OptionalIdentity) -> AppResult<Uuid> {
    if identity.0.is_none() {
        return Err(DomainError::Unauthenticated.into());
    }
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Post {raw} not found")))
}

fn post_url(id: Uuid) -> String {
    format!("/post/{id}/")
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        date_posted: post.date_posted,
        author_id: post.author_id,
    }
}

fn page_response(page: Page<Post>) -> PostPageResponse {
    PostPageResponse {
        page: page.number,
        per_page: page.per_page,
        total_items: page.total_items,
        total_pages: page.total_pages(),
        has_next: page.has_next(),
        has_previous: page.has_previous(),
        posts: page.items.into_iter().map(post_response).collect(),
    }
}

fn redirect(location: &str) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));
    builder
}

/// GET /
pub async fn home(state: web::Data<AppState>, query: web::Query<PageQuery>) -> AppResult<HttpResponse> {
    let page = state.access().list_posts(query.number()?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(page))))
}

/// GET /user/{username}
pub async fn user_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let listing = state
        .access()
        .list_user_posts(&username, query.number()?)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(UserPostsResponse {
        username: listing.user.username,
        page: page_response(listing.posts),
    })))
}

/// GET /post/{id}/
pub async fn detail(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.access().post_detail(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// GET /post/new/
pub async fn new_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let form = state
        .access()
        .new_post_form(identity.requester().as_ref())
        .map_err(|e| AppError::from(e).returning_to(req.path()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostFormResponse {
        title: form.title,
        content: form.content,
    })))
}

/// POST /post/new/ - redirects to the new post.
pub async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    input: Option<PostInput>,
) -> AppResult<HttpResponse> {
    let post = state
        .access()
        .create_post(identity.requester().as_ref(), read_form(input))
        .await
        .map_err(|e| AppError::from(e).returning_to(req.path()))?;

    Ok(redirect(&post_url(post.id)).json(ApiResponse::ok_with_message(
        post_response(post),
        "Post created",
    )))
}

/// GET /post/{id}/update/
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = guarded_post_id(&path, &identity).map_err(|e| e.returning_to(req.path()))?;
    let post = state
        .access()
        .edit_post(identity.requester().as_ref(), id)
        .await
        .map_err(|e| AppError::from(e).returning_to(req.path()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostFormResponse {
        title: post.title,
        content: post.content,
    })))
}

/// POST /post/{id}/update/ - redirects back to the post.
pub async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    input: Option<PostInput>,
) -> AppResult<HttpResponse> {
    let id = guarded_post_id(&path, &identity).map_err(|e| e.returning_to(req.path()))?;
    let post = state
        .access()
        .update_post(identity.requester().as_ref(), id, read_form(input))
        .await
        .map_err(|e| AppError::from(e).returning_to(req.path()))?;

    Ok(redirect(&post_url(post.id)).json(ApiResponse::ok_with_message(
        post_response(post),
        "Post updated",
    )))
}

/// GET /post/{id}/delete/
pub async fn confirm_delete(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = guarded_post_id(&path, &identity).map_err(|e| e.returning_to(req.path()))?;
    let post = state
        .access()
        .confirm_delete(identity.requester().as_ref(), id)
        .await
        .map_err(|e| AppError::from(e).returning_to(req.path()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post_response(post),
        "Are you sure you want to delete this post?",
    )))
}

/// POST /post/{id}/delete/ - redirects to the home page.
pub async fn delete(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = guarded_post_id(&path, &identity).map_err(|e| e.returning_to(req.path()))?;
    state
        .access()
        .delete_post(identity.requester().as_ref(), id)
        .await
        .map_err(|e| AppError::from(e).returning_to(req.path()))?;

    Ok(redirect("/").json(ApiResponse::message("Post deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_page_number_parsing() {
        assert_eq!(query(None).number().unwrap(), 1);
        assert_eq!(query(Some("3")).number().unwrap(), 3);
        assert!(matches!(query(Some("0")).number(), Err(AppError::NotFound(_))));
        assert!(matches!(query(Some("last")).number(), Err(AppError::NotFound(_))));
        assert!(matches!(query(Some("-1")).number(), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_post_id_checked_after_login() {
        let anonymous = OptionalIdentity(None);
        assert!(matches!(
            guarded_post_id("not-a-uuid", &anonymous),
            Err(AppError::LoginRequired { .. })
        ));
    }
}
