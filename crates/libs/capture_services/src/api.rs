pub mod capture;
pub mod location;
pub mod permissions;
pub mod photos;
pub mod upload;
