//! Domain entities - the core business objects.

mod identity;
mod post;
mod slug;

pub use identity::CallerIdentity;
pub use post::{Pagination, Post, PostFilter, PostPatch};
pub use slug::slugify;
