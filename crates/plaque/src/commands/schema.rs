//! Schema command - Print or write the config JSON Schema

use super::CliError;
use crate::config::PLAQUE_CONFIG_SCHEMA;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct SchemaArgs {
    /// Write the schema to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: SchemaArgs) {
    match args.output {
        Some(path) => {
            if let Err(e) = write_schema(&path) {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
            eprintln!("✓ Schema written to {}", path.display());
        }
        None => println!("{}", PLAQUE_CONFIG_SCHEMA),
    }
}

fn write_schema(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CliError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, PLAQUE_CONFIG_SCHEMA).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_schema_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".plaque/plaque.config.schema.json");
        write_schema(&path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), PLAQUE_CONFIG_SCHEMA);
    }
}
