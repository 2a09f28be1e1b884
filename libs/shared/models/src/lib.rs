pub mod auth;
pub mod chat;
pub mod context;
pub mod error;
pub mod schedule;
