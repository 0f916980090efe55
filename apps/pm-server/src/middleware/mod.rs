//! Request middleware.

mod headers;
mod panic;

pub use headers::secure_headers;
pub use panic::handle_panic;
