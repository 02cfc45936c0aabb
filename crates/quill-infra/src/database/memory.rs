//! In-memory post store - used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Pagination, Post, PostFilter};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// In-memory post store backed by a `Vec` in insertion order.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Query(format!("duplicate post id {}", post.id)));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        posts.remove(index);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find(&self, filter: &PostFilter, page: &Pagination) -> Result<Vec<Post>, RepoError> {
        let (offset, limit) = page.window()?;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));

        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| filter.matches(p))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, category_id: Option<Uuid>) -> Post {
        Post::create(Some(title.to_string()), None, None, category_id).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(post("First", None)).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let repo = InMemoryPostRepository::new();
        let mut created = repo.create(post("First", None)).await.unwrap();
        created.title = "Edited".to_string();

        repo.update(created.clone()).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Edited");

        let missing = repo.update(post("Ghost", None)).await;
        assert!(matches!(missing, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(post("First", None)).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(matches!(
            repo.delete(created.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_find_paginates_in_insertion_order() {
        let repo = InMemoryPostRepository::new();
        for i in 0..5 {
            repo.create(post(&format!("Post {i}"), None)).await.unwrap();
        }

        let page = repo
            .find(&PostFilter::default(), &Pagination::from_page(2, 2))
            .await
            .unwrap();
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 2", "Post 3"]);

        let unbounded = repo
            .find(&PostFilter::default(), &Pagination::from_page(1, 0))
            .await
            .unwrap();
        assert_eq!(unbounded.len(), 5);
    }

    #[tokio::test]
    async fn test_find_filters_by_category() {
        let repo = InMemoryPostRepository::new();
        let category = Uuid::new_v4();
        repo.create(post("Tagged", Some(category))).await.unwrap();
        repo.create(post("Other", Some(Uuid::new_v4()))).await.unwrap();
        repo.create(post("Untagged", None)).await.unwrap();

        let filter = PostFilter {
            category_id: Some(category),
        };
        let found = repo.find(&filter, &Pagination::default()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Tagged");
    }

    #[tokio::test]
    async fn test_find_rejects_negative_skip() {
        let repo = InMemoryPostRepository::new();
        let result = repo
            .find(&PostFilter::default(), &Pagination::from_page(0, 10))
            .await;
        assert!(matches!(result, Err(RepoError::Query(_))));
    }
}
