//! Shared utilities and common types for the IskolarSpace backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT access-token verification
//! - Join-code generation for spaces
//! - Common validation logic
//! - Pagination helpers

pub mod codes;
pub mod jwt;
pub mod pagination;
pub mod validation;
