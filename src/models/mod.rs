pub mod booking;
pub mod event;
pub mod profile;
pub mod stats;
pub mod user;

pub use booking::{Booking, BookingDetail, UserBookings};
pub use event::{Event, EventWithCapacity};
pub use profile::UserProfile;
pub use stats::AdminStats;
pub use user::User;
