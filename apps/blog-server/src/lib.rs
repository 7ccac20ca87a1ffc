//! # Blog Server
//!
//! Actix-web front end for the blog: post listings, post detail, and
//! author-only editing. `main.rs` wires these modules into a running server.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
