//! Plan back-office endpoints

mod status;

pub use status::set_status;
