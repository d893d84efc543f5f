//! Business logic services

pub mod calendar_service;
pub mod curator_service;
pub mod manual_event_service;
pub mod playlist_service;

pub use calendar_service::CalendarService;
pub use curator_service::CuratorService;
pub use manual_event_service::ManualEventService;
pub use playlist_service::PlaylistService;
