//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use blog_core::domain::{Page, PageRequest, Post, User};
use blog_core::error::RepoError;
use blog_core::ports::{PostOrdering, PostRepository, PostSortKey, SortDirection, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }
}

impl PostgresPostRepository {
    fn ordered(select: Select<PostEntity>, ordering: PostOrdering) -> Select<PostEntity> {
        let order = match ordering.direction {
            SortDirection::Ascending => Order::Asc,
            SortDirection::Descending => Order::Desc,
        };
        let column = match ordering.key {
            PostSortKey::DatePosted => post::Column::DatePosted,
        };

        select
            .order_by(column, order.clone())
            .order_by(post::Column::Id, order)
    }

    async fn fetch_page(
        &self,
        select: Select<PostEntity>,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let paginator = select.paginate(&self.db, page.per_page);
        let total_items = paginator.num_items().await.map_err(repo_err)?;
        if page.offset().is_none() {
            return Ok(Page::new(Vec::new(), page, total_items));
        }
        let models = paginator
            .fetch_page(page.number.saturating_sub(1))
            .await
            .map_err(repo_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total_items,
        ))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_posts(
        &self,
        ordering: PostOrdering,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let select = Self::ordered(PostEntity::find(), ordering);
        self.fetch_page(select, page).await
    }

    async fn list_posts_by_author(
        &self,
        author_id: Uuid,
        ordering: PostOrdering,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let select = Self::ordered(
            PostEntity::find().filter(post::Column::AuthorId.eq(author_id)),
            ordering,
        );
        self.fetch_page(select, page).await
    }
}
