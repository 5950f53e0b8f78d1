use smangler::traits::Operation;

use crate::{error::CliError, validation::validate_copy};

/// Run the copy command: copy the strings matching `pattern` from `source`
/// into `destination`.
pub fn run_copy_command(
    source: String,
    destination: String,
    pattern: Option<String>,
) -> Result<(), CliError> {
    let op = validate_copy(&source, &destination, pattern)?;
    let report = op.perform()?;

    println!("✅ {}", report);
    Ok(())
}
