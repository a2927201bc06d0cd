//! API integration tests
//!
//! Integration tests for all API endpoints

mod messages_test;
mod users_test;
