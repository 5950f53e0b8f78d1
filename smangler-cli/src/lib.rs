//! CLI library for testing purposes

pub mod copy;
pub mod delete;
pub mod error;
pub mod validation;

pub use copy::run_copy_command;
pub use delete::run_delete_command;
pub use error::CliError;
