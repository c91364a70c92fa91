//! Domain models for IskolarSpace.

pub mod membership;
pub mod profile;
pub mod space;
pub mod space_note;
pub mod study_plan;
pub mod task;

pub use membership::{
    ListMembersResponse, Membership, MemberWithProfile, SpaceRole, UpdateMemberRoleRequest,
};
pub use profile::{UpdateProfileRequest, UserProfile};
pub use space::{
    CreateSpaceRequest, JoinSpaceRequest, Space, SpaceWithRole, UpdateSpaceNameRequest,
};
pub use space_note::{
    CreateSpaceNoteRequest, SpaceNote, UpdateNotePositionRequest, NOTE_TTL_HOURS,
};
pub use study_plan::{StudyPlanRequest, StudyPlanResponse};
pub use task::{CreateTaskRequest, KanbanStatus, Task, UpdateTaskRequest};
