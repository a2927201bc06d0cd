//! Messaging Module
//!
//! This module handles direct messages: sending, listing conversations,
//! search and read tracking.

pub mod handlers;
pub mod db;

pub use handlers::*;
