//! User-facing output

mod reporter;

pub use reporter::Reporter;
