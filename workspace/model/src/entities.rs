pub mod booking;
pub mod deleted_user;
pub mod profile;
pub mod user;

pub mod prelude {
    pub use super::booking::Entity as Booking;
    pub use super::deleted_user::Entity as DeletedUser;
    pub use super::profile::Entity as Profile;
    pub use super::user::Entity as User;
}
