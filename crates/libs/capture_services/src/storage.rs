mod error;
mod http;
mod memory;
mod object_store;
mod photo_store;
mod postgres;

pub use error::*;
pub use http::*;
pub use memory::*;
pub use object_store::*;
pub use photo_store::*;
pub use postgres::*;
