/// State management module
///
/// This module handles all persistent application state:
/// - Database connection and queries (store.rs)
/// - Shared data structures (data.rs)

pub mod data;
pub mod store;
