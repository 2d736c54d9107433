pub mod accounts;
pub mod booking_guard;
pub mod capacity;
pub mod profile_sync;
pub mod schedule;

pub use accounts::Accounts;
pub use booking_guard::BookingGuard;
pub use capacity::{Capacity, CapacityLedger};
pub use profile_sync::ProfileSynchronizer;
pub use schedule::EventSchedule;
