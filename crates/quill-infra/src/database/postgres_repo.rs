//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use quill_core::domain::{Pagination, Post, PostFilter};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find(&self, filter: &PostFilter, page: &Pagination) -> Result<Vec<Post>, RepoError> {
        let (offset, limit) = page.window()?;
        tracing::debug!(?filter, offset, ?limit, "Listing posts");

        let mut query = PostEntity::find().order_by_asc(post::Column::CreatedAt);
        if let Some(category_id) = filter.category_id {
            query = query.filter(post::Column::CategoryId.eq(category_id));
        }

        let result = query
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
