//! Consolidated test utilities for the weather aggregation service.
//!
//! Centralizes payload fixtures, mock store implementations, and mock
//! source server helpers used throughout the test suite.

#![cfg(test)]

pub mod config;
pub mod fixtures;
pub mod mocks;
