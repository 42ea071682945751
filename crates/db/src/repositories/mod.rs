//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod casting_call_repo;
pub mod follow_repo;
pub mod message_repo;
pub mod pending_registration_repo;
pub mod profile_video_repo;
pub mod role_switch_request_repo;
pub mod user_repo;
pub mod video_repo;

pub use casting_call_repo::CastingCallRepo;
pub use follow_repo::FollowRepo;
pub use message_repo::MessageRepo;
pub use pending_registration_repo::PendingRegistrationRepo;
pub use profile_video_repo::ProfileVideoRepo;
pub use role_switch_request_repo::RoleSwitchRequestRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
