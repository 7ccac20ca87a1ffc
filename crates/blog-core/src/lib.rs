//! # Blog Core
//!
//! The domain layer of the blog service.
//! Holds the post and user entities, the persistence and identity ports, and
//! the [`PostAccessController`] that decides who may read or change a post.
//! No infrastructure dependencies live here.

pub mod controller;
pub mod domain;
pub mod error;
pub mod ports;

pub use controller::{AboutPage, PostAccessController, Requester, UserPosts};
pub use error::{DomainError, RepoError};
