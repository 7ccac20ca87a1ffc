//! # Blog Shared
//!
//! Request and response payloads shared by the server and its clients.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
