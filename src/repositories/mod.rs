pub mod booking_repository;
pub mod event_repository;
pub mod profile_repository;
pub mod stats_repository;
pub mod user_repository;

pub use booking_repository::BookingRepository;
pub use event_repository::EventRepository;
pub use profile_repository::ProfileRepository;
pub use stats_repository::StatsRepository;
pub use user_repository::UserRepository;
