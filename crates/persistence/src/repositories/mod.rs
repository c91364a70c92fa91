//! Repository implementations for database operations.

pub mod membership;
pub mod profile;
pub mod space;
pub mod space_note;
pub mod task;

pub use membership::MembershipRepository;
pub use profile::UserProfileRepository;
pub use space::SpaceRepository;
pub use space_note::SpaceNoteRepository;
pub use task::TaskRepository;
