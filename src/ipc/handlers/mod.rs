pub mod auth;
pub mod catalog;
pub mod core;
pub mod navigation;
pub mod plan;
pub mod student;
