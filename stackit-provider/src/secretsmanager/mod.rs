//! Secrets Manager service

pub mod user;

pub use user::{DataSourceModel, UserDataSource};
