//! Database entity definitions (row mappings).

pub mod membership;
pub mod profile;
pub mod space;
pub mod space_note;
pub mod task;

pub use membership::{MembershipEntity, MemberWithProfileEntity, SpaceRoleDb};
pub use profile::UserProfileEntity;
pub use space::{SpaceEntity, SpaceWithRoleEntity};
pub use space_note::SpaceNoteEntity;
pub use task::{KanbanStatusDb, TaskEntity};
