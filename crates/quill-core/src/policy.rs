//! Ownership rules for mutating posts.

use crate::domain::{CallerIdentity, Post};
use crate::error::DomainError;

/// Outcome of an ownership check that did not reject the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The verified caller owns the post.
    Owner,
    /// No verified caller was available, so ownership was not checked.
    Unchecked,
}

/// Decide whether `caller` may update or delete `post`.
///
/// A verified caller must match the post's author; a post without an author
/// is never owned by anyone. Without a verified caller the check is skipped
/// and the mutation is allowed to proceed.
pub fn authorize_mutation(
    caller: Option<&CallerIdentity>,
    post: &Post,
) -> Result<Ownership, DomainError> {
    match caller {
        None => Ok(Ownership::Unchecked),
        Some(caller) if post.author_id == Some(caller.id) => Ok(Ownership::Owner),
        Some(_) => Err(DomainError::Forbidden { entity_type: "post" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn post_owned_by(author: Option<Uuid>) -> Post {
        Post::create(Some("Title".to_string()), None, author, None).unwrap()
    }

    #[test]
    fn test_owner_is_allowed() {
        let caller = CallerIdentity::new(Uuid::new_v4(), "alice");
        let post = post_owned_by(Some(caller.id));

        assert_eq!(
            authorize_mutation(Some(&caller), &post).unwrap(),
            Ownership::Owner
        );
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let caller = CallerIdentity::new(Uuid::new_v4(), "mallory");
        let post = post_owned_by(Some(Uuid::new_v4()));

        assert!(matches!(
            authorize_mutation(Some(&caller), &post),
            Err(DomainError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_unowned_post_rejects_verified_caller() {
        let caller = CallerIdentity::new(Uuid::new_v4(), "bob");
        let post = post_owned_by(None);

        assert!(authorize_mutation(Some(&caller), &post).is_err());
    }

    #[test]
    fn test_missing_caller_skips_check() {
        let post = post_owned_by(Some(Uuid::new_v4()));

        assert_eq!(
            authorize_mutation(None, &post).unwrap(),
            Ownership::Unchecked
        );
    }
}
