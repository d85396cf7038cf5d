//! Backlog API client and types.
//!
//! This module provides the interface for communicating with the Backlog REST API v2.

mod auth;
mod client;
mod endpoint;
pub mod error;
mod operations;
mod types;

pub use client::BacklogClient;
pub use operations::DEFAULT_NOTIFICATION_COUNT;
pub use types::{CreateIssueParams, IssueSearch, SortOrder, UpdateIssueParams};
