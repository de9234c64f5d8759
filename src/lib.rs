pub mod cli;
pub mod ctx;
pub mod error;
pub mod io;
pub mod math;
pub mod measures;
pub mod pipeline;
pub mod schema;

pub use error::QcError;
