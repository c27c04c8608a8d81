#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools
)]
mod location;
mod permission;
mod photo;
mod progress;
mod session;

pub use location::*;
pub use permission::*;
pub use photo::*;
pub use progress::*;
pub use session::*;
