//! Search, filter, pagination and bookmark engine for the GitHub REST API.
//!
//! The engine is pure of rendering concerns: input events (submit,
//! keystroke, load-more, bookmark toggle) come in, annotated result sets and
//! failure reasons go out. Persistence happens through the
//! [`storage::KeyValueStore`] substrate; the remote service is reached
//! through the [`coordinator::SearchProvider`] trait, implemented for the
//! real API by [`github::GitHubSearchClient`].

pub mod bookmarks;
pub mod cli;
pub mod coordinator;
pub mod error;
pub mod github;
pub mod merge;
pub mod models;
pub mod persist;
pub mod query;
pub mod session;
pub mod storage;
pub mod types;
