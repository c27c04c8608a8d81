#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_inception,
    clippy::struct_excessive_bools,
    clippy::cast_precision_loss
)]

pub mod api;
pub mod devices;
pub mod storage;
pub mod utils;
