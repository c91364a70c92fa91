//! Domain services for IskolarSpace.
//!
//! Services contain logic that operates on domain models without touching IO.

pub mod note_motion;

pub use note_motion::{
    NoteBody, PersistThrottle, Vec2, Viewport, MIN_SEPARATION, TICK_SECONDS,
};
