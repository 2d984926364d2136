//! Shared test fixtures for CastForge crates.
//!
//! This crate provides show builders and random expressions for testing.
//! It does NOT depend on `castforge-engine` so the engine can use it as a
//! dev-dependency.
//!
//! - [`fixtures`] - Small shows with known marks and expected outcomes
//! - [`sat`] - Seedable random CNF expressions
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! castforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use castforge_test::fixtures::{balance_fixture, lead_fixture};
//! use castforge_test::sat::random_expression;
//! ```

pub mod fixtures;
pub mod sat;

pub use fixtures::{balance_fixture, lead_fixture, revue, BalanceFixture, LeadFixture, Revue};
pub use sat::random_expression;
