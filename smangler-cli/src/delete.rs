use smangler::traits::Operation;

use crate::{error::CliError, validation::validate_delete};

/// Run the delete command: remove the strings matching `pattern` from every
/// resource file under `directory`.
pub fn run_delete_command(directory: String, pattern: String) -> Result<(), CliError> {
    let op = validate_delete(&directory, pattern)?;
    let report = op.perform()?;

    if report.entries_removed == 0 {
        println!("ℹ️  No string matching {} found in {}", op.matcher(), directory);
    } else {
        println!("✅ {}", report);
    }
    Ok(())
}
