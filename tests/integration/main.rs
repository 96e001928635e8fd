//! Integration tests
//!
//! Tests marked `#[ignore]` need a PostgreSQL server reachable through
//! `DATABASE_URL`. Run them with: cargo test -- --ignored

mod api_tests;
mod common;
mod console_client_tests;
