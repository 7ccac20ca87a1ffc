//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Data is lost on process restart. Deleting a user does not remove their posts.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Page, PageRequest, Post, User};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, PostOrdering, PostRepository, PostSortKey, SortDirection, UserRepository,
};

/// Posts kept in a `HashMap` behind an async `RwLock`.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn compare(a: &Post, b: &Post, ordering: PostOrdering) -> Ordering {
        let by_key = match ordering.key {
            PostSortKey::DatePosted => a.date_posted.cmp(&b.date_posted),
        };
        let ord = by_key.then_with(|| a.id.cmp(&b.id));
        match ordering.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }

    async fn page_where(
        &self,
        keep: impl Fn(&Post) -> bool,
        ordering: PostOrdering,
        page: PageRequest,
    ) -> Page<Post> {
        let store = self.store.read().await;
        let mut matching: Vec<&Post> = store.values().filter(|p| keep(*p)).collect();
        matching.sort_by(|a, b| Self::compare(*a, *b, ordering));

        let total_items = matching.len() as u64;
        let skip = page
            .offset()
            .and_then(|offset| usize::try_from(offset).ok())
            .unwrap_or(usize::MAX);
        let take = usize::try_from(page.per_page).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect();

        Page::new(items, page, total_items)
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let slot = store.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_posts(
        &self,
        ordering: PostOrdering,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        Ok(self.page_where(|_| true, ordering, page).await)
    }

    async fn list_posts_by_author(
        &self,
        author_id: Uuid,
        ordering: PostOrdering,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        Ok(self
            .page_where(|p| p.author_id == author_id, ordering, page)
            .await)
    }
}

/// Users kept in a `HashMap` behind an async `RwLock`. Usernames are unique.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&user.id) || store.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username {} already exists",
                user.username
            )));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(RepoError::Constraint(format!(
                "username {} already exists",
                user.username
            )));
        }
        let slot = store.get_mut(&user.id).ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}
