pub mod common;
pub mod completions;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod fetch;
pub mod permissions;
pub mod summary;
