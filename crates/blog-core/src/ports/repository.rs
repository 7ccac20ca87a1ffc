use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Page, PageRequest, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with [`RepoError::NotFound`] if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Column a post listing is sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortKey {
    DatePosted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Explicit ordering for post listings. Stores break ties on the post id in
/// the same direction so paging is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostOrdering {
    pub key: PostSortKey,
    pub direction: SortDirection,
}

impl PostOrdering {
    pub const fn newest_first() -> Self {
        Self {
            key: PostSortKey::DatePosted,
            direction: SortDirection::Descending,
        }
    }
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// One page of all posts.
    async fn list_posts(
        &self,
        ordering: PostOrdering,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError>;

    /// One page of the posts written by `author_id`.
    async fn list_posts_by_author(
        &self,
        author_id: Uuid,
        ordering: PostOrdering,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError>;
}
