//! Domain layer for the IskolarSpace backend.
//!
//! This crate contains:
//! - Domain models (Space, Membership, Task, SpaceNote, UserProfile)
//! - The floating-note motion engine
//! - Domain error types

pub mod models;
pub mod services;
