pub mod current_user;

pub use current_user::{AdminUser, CurrentUser, MaybeUser};
