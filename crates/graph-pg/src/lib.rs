#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod engine;
pub mod error;
pub mod model;
pub mod queries;

pub use engine::{PgConfig, PgEngine};
pub use error::PgError;
pub use model::PgModel;
