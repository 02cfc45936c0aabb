//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Pagination, Post, PostFilter, PostPatch};
use quill_core::policy::{Ownership, authorize_mutation};
use quill_shared::dto::{
    CreatePostRequest, DeleteResponse, ListPostsQuery, PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::Credentials;
use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author: post.author_id,
        category: post.category_id,
        slug: post.slug,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// Ids that do not parse can never exist in the store, so they are reported as missing.
fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::NotFound {
        entity_type: "post",
        id: Uuid::nil(),
    })
}

/// Decode an update body. A missing body is an empty patch.
fn parse_patch(body: &[u8]) -> AppResult<PostPatch> {
    let req = if body.trim_ascii().is_empty() {
        UpdatePostRequest::default()
    } else {
        serde_json::from_slice::<UpdatePostRequest>(body)
            .map_err(|e| AppError::BadRequest(e.to_string()))?
    };

    Ok(PostPatch {
        title: req.title,
        content: req.content,
        category_id: req.category,
    })
}

/// Load a post and check the caller may mutate it.
async fn load_for_mutation(
    state: &AppState,
    credentials: &Credentials,
    request_id: &RequestId,
    raw_id: &str,
) -> AppResult<Post> {
    let id = parse_id(raw_id)?;
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "post",
            id,
        })?;

    if authorize_mutation(credentials.caller.as_ref(), &post)? == Ownership::Unchecked {
        tracing::warn!(
            request_id = request_id.as_str(),
            post_id = %post.id,
            "No verified caller, skipping ownership check"
        );
    }

    Ok(post)
}

/// POST /api/posts
pub async fn create_post(
    credentials: Credentials,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let author_id = credentials.caller.map(|caller| caller.id);

    let post = Post::create(req.title, req.content, author_id, req.category)?;
    let saved = state.posts.create(post).await?;

    tracing::info!(post_id = %saved.id, author_id = ?saved.author_id, "Post created");

    Ok(HttpResponse::Created().json(to_response(saved)))
}

/// GET /api/posts?category=&page=&limit=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filter = PostFilter {
        category_id: query.category,
    };
    let page = Pagination::from_page(
        query.page.unwrap_or(Pagination::DEFAULT_PAGE),
        query.limit.unwrap_or(Pagination::DEFAULT_LIMIT),
    );

    let posts = state.posts.find(&filter, &page).await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(to_response).collect::<Vec<_>>()))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.find_by_id(id).await?.ok_or(DomainError::NotFound {
        entity_type: "post",
        id,
    })?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{id}
///
/// The body is decoded only after the 404/403 checks have passed.
pub async fn update_post(
    credentials: Credentials,
    request_id: RequestId,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let mut post = load_for_mutation(&state, &credentials, &request_id, &path).await?;

    post.apply(parse_patch(&body)?)?;
    let saved = state.posts.update(post).await?;

    tracing::info!(post_id = %saved.id, "Post updated");

    Ok(HttpResponse::Ok().json(to_response(saved)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    credentials: Credentials,
    request_id: RequestId,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = load_for_mutation(&state, &credentials, &request_id, &path).await?;

    state.posts.delete(post.id).await?;

    tracing::info!(post_id = %post.id, "Post deleted");

    Ok(HttpResponse::Ok().json(DeleteResponse { success: true }))
}
