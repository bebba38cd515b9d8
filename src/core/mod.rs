//! Core business logic

pub mod export;
