//! Ports - trait definitions for external dependencies.
//! Infrastructure crates provide the implementations.

mod auth;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use repository::{
    BaseRepository, PostOrdering, PostRepository, PostSortKey, SortDirection, UserRepository,
};
