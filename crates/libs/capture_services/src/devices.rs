pub mod camera;
pub mod permissions;
pub mod positioning;
