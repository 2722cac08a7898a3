pub mod binding;
pub mod config;
pub mod plan;
pub mod presentation;
pub mod snapshot;
pub mod text;
