//! Post access rules.
//!
//! Reads are open to everyone. Every mutating operation runs the same ordered
//! guards before touching the store:
//!
//! 1. a requester must be present ([`DomainError::Unauthenticated`]),
//! 2. the post must exist ([`DomainError::NotFound`]),
//! 3. the requester must be its author ([`DomainError::Forbidden`]).
//!
//! The first failing guard short-circuits, so a refused request never writes.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Page, PageRequest, Post, PostForm, User};
use crate::error::DomainError;
use crate::ports::{PostOrdering, PostRepository, UserRepository};

/// The authenticated identity behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub user_id: Uuid,
    pub username: String,
}

/// A user together with one page of their posts.
#[derive(Debug, Clone)]
pub struct UserPosts {
    pub user: User,
    pub posts: Page<Post>,
}

/// Payload of the static about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutPage {
    pub title: &'static str,
}

/// Resolves post reads and guards post writes.
#[derive(Clone)]
pub struct PostAccessController {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostAccessController {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// All posts, newest first.
    pub async fn list_posts(&self, page: u64) -> Result<Page<Post>, DomainError> {
        let page = self
            .posts
            .list_posts(PostOrdering::newest_first(), page_request(page)?)
            .await?;
        ensure_in_range(page)
    }

    /// Posts by the user called `username`, newest first.
    pub async fn list_user_posts(
        &self,
        username: &str,
        page: u64,
    ) -> Result<UserPosts, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("User", username))?;

        let posts = self
            .posts
            .list_posts_by_author(user.id, PostOrdering::newest_first(), page_request(page)?)
            .await?;

        Ok(UserPosts {
            user,
            posts: ensure_in_range(posts)?,
        })
    }

    pub async fn post_detail(&self, id: Uuid) -> Result<Post, DomainError> {
        self.find_post(id).await
    }

    /// The empty form behind the create route.
    pub fn new_post_form(&self, requester: Option<&Requester>) -> Result<PostForm, DomainError> {
        require_login(requester)?;
        Ok(PostForm::default())
    }

    /// Create a post owned by the requester.
    pub async fn create_post(
        &self,
        requester: Option<&Requester>,
        form: PostForm,
    ) -> Result<Post, DomainError> {
        let requester = require_login(requester)?;
        form.validate().map_err(DomainError::Validation)?;

        let post = Post::new(requester.user_id, form.title, form.content);
        let post = self.posts.insert(post).await?;

        tracing::info!(post_id = %post.id, author = %requester.username, "Post created");
        Ok(post)
    }

    /// The current post behind the update route, for prefilling an edit form.
    pub async fn edit_post(
        &self,
        requester: Option<&Requester>,
        id: Uuid,
    ) -> Result<Post, DomainError> {
        let requester = require_login(requester)?;
        self.authored_post(requester, id).await
    }

    pub async fn update_post(
        &self,
        requester: Option<&Requester>,
        id: Uuid,
        form: PostForm,
    ) -> Result<Post, DomainError> {
        let requester = require_login(requester)?;
        let mut post = self.authored_post(requester, id).await?;
        form.validate().map_err(DomainError::Validation)?;

        post.apply(form);
        post.author_id = requester.user_id;
        let post = self.posts.update(post).await?;

        tracing::info!(post_id = %post.id, author = %requester.username, "Post updated");
        Ok(post)
    }

    /// The post behind the delete route, for a confirmation prompt.
    pub async fn confirm_delete(
        &self,
        requester: Option<&Requester>,
        id: Uuid,
    ) -> Result<Post, DomainError> {
        let requester = require_login(requester)?;
        self.authored_post(requester, id).await
    }

    pub async fn delete_post(
        &self,
        requester: Option<&Requester>,
        id: Uuid,
    ) -> Result<(), DomainError> {
        let requester = require_login(requester)?;
        let post = self.authored_post(requester, id).await?;

        self.posts.delete(post.id).await?;

        tracing::info!(post_id = %post.id, author = %requester.username, "Post deleted");
        Ok(())
    }

    pub fn about(&self) -> AboutPage {
        AboutPage { title: "About" }
    }

    async fn find_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    /// Fetch post `id` and check that `requester` wrote it.
    async fn authored_post(&self, requester: &Requester, id: Uuid) -> Result<Post, DomainError> {
        let post = self.find_post(id).await?;
        if !post.is_authored_by(requester.user_id) {
            tracing::warn!(
                post_id = %id,
                requester = %requester.username,
                "Rejected change to a post by a non-author"
            );
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }
}

fn require_login(requester: Option<&Requester>) -> Result<&Requester, DomainError> {
    requester.ok_or(DomainError::Unauthenticated)
}

/// Pages too far out to address hold no posts.
fn page_request(number: u64) -> Result<PageRequest, DomainError> {
    let request = PageRequest::posts(number);
    match request.offset() {
        Some(_) => Ok(request),
        None => Err(DomainError::not_found("Page", number)),
    }
}

fn ensure_in_range(page: Page<Post>) -> Result<Page<Post>, DomainError> {
    if page.in_range() {
        Ok(page)
    } else {
        Err(DomainError::not_found("Page", page.number))
    }
}
