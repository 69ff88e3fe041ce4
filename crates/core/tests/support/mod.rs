//! Shared test helpers for `vision-core` integration tests.
//!
//! These helpers provide reusable fixtures and a lightweight in-memory
//! segment store so the consolidation tests can focus on behaviour instead
//! of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
