//! Validate command - Check an extractor dump without generating docs

use super::{read_dump, CliError};
use clap::Args;
use plaque_curator::ExtractorDump;
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Extractor dump to check
    pub input: PathBuf,
}

pub fn run(args: ValidateArgs) {
    match check(&args) {
        Ok(dump) => {
            let decoded = dump.components.len();
            let rejected = dump.rejected.len();
            for failure in &dump.rejected {
                eprintln!(
                    "  {} ({}): {}",
                    failure.component_name, failure.component_id, failure.message
                );
            }

            if rejected > 0 {
                eprintln!(
                    "✗ {} component(s) could not be decoded, {} valid",
                    rejected, decoded
                );
                std::process::exit(1);
            }

            let word = if decoded == 1 { "component" } else { "components" };
            eprintln!("✓ {} {} valid", decoded, word);
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

fn check(args: &ValidateArgs) -> Result<ExtractorDump, CliError> {
    let dump = read_dump(&args.input)?;
    tracing::debug!(
        decoded = dump.components.len(),
        rejected = dump.rejected.len(),
        "validated dump"
    );
    Ok(dump)
}
