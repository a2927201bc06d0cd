//! Contacts Module
//!
//! This module handles contact requests, accepted contacts and blocking.
//! The allowed transitions are modelled by
//! `shared::messaging::ContactAction`; `db` performs each one as a single
//! conditional statement.

pub mod db;
pub mod handlers;

pub use handlers::*;
