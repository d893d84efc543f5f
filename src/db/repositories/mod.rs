//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod assignment_repo;
pub mod calendar_event_repo;
pub mod manual_event_repo;
pub mod playlist_repo;
pub mod profile_repo;

pub use assignment_repo::AssignmentRepository;
pub use calendar_event_repo::CalendarEventRepository;
pub use manual_event_repo::ManualEventRepository;
pub use playlist_repo::PlaylistRepository;
pub use profile_repo::ProfileRepository;
