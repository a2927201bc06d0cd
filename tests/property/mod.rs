//! Property-based tests for the domain logic

mod conversation_proptest;
