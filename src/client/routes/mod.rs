pub mod home;
pub mod not_found;
pub mod profile;

pub use home::Home;
pub use not_found::NotFound;
pub use profile::StaffProfile;
