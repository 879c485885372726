//! # fitlog Common Library
//!
//! Shared code for the fitlog server and program tools:
//! - Database initialization, models and queries
//! - Password hashing
//! - Configuration loading and root folder resolution
//! - Workout program model, editor and local store

pub mod config;
pub mod db;
pub mod error;
pub mod password;
pub mod program;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
