use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use quill_core::domain::{Pagination, Post, PostFilter};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn model(title: &str, slug: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        content: Some("Content".to_owned()),
        author_id: Some(Uuid::new_v4()),
        category_id: None,
        slug: slug.to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let row = model("Test Post", "test-post");
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.slug, "test-post");
    assert_eq!(post.id, post_id);
}

#[tokio::test]
async fn test_find_post_by_id_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(Uuid::new_v4()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_list_posts_returns_rows_in_order() {
    let rows = vec![model("One", "one"), model("Two", "two")];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![rows])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo
        .find(&PostFilter::default(), &Pagination::from_page(2, 2))
        .await
        .unwrap();

    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two"]);
}

#[tokio::test]
async fn test_list_posts_rejects_negative_skip() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = PostgresPostRepository::new(db);

    let result = repo
        .find(&PostFilter::default(), &Pagination::from_page(0, 10))
        .await;
    assert!(matches!(result, Err(RepoError::Query(_))));
}

#[tokio::test]
async fn test_delete_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}
