//! # Tabulaxy Common Library
//!
//! Shared code for the Tabulaxy corpus tools including:
//! - Game mode eligibility bitmask
//! - Category and difficulty catalog
//! - Word entry model shared by the database and the JSON corpus file
//! - Database schema, reference seeds and bulk word insertion
//! - JSON corpus file persistence with backup rotation
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod corpus_file;
pub mod db;
pub mod error;
pub mod models;
pub mod modes;

pub use catalog::{Category, Difficulty};
pub use error::{Error, Result};
pub use models::WordEntry;
pub use modes::{GameMode, ModeFlags};
