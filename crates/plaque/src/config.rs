//! Configuration file loading for plaque.
//!
//! Reads `plaque.config.json` from the current working directory, or the
//! file named by `--config`. Also carries the JSON Schema printed by
//! `plaque schema` for editor autocompletion.

use plaque_curator::docs::IndexOptions;
use plaque_curator::GenerateOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config filename, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "plaque.config.json";

/// Top-level plaque configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlaqueConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Where and how docs are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Pipeline settings.
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Index page settings.
    #[serde(default)]
    pub index: IndexOptions,
}

/// Configuration for written output.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Output directory (default: `./docs`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Output format (default: `md`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Keep raw render/class JSON in `json` output (default: true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_raw: Option<bool>,
}

/// Configuration for the documentation pipeline.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfig {
    /// Document components in parallel (default: true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    /// Deepest render tree accepted per component (default: 256).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_render_depth: Option<usize>,
}

impl GenerateConfig {
    /// Overlay the configured values on the pipeline defaults.
    pub fn options(&self) -> GenerateOptions {
        let defaults = GenerateOptions::default();
        GenerateOptions {
            parallel: self.parallel.unwrap_or(defaults.parallel),
            max_render_depth: self.max_render_depth.unwrap_or(defaults.max_render_depth),
            ..defaults
        }
    }
}

/// Output format for `plaque build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One Markdown page per component plus `README.md`
    #[default]
    Md,
    /// A single `components.json` with every doc and failure
    Json,
    /// Only show statistics (no output)
    Stats,
}

/// Load the config from `path`, or `plaque.config.json` in the CWD if None.
///
/// A missing default file yields the defaults silently; an unreadable or
/// invalid file yields the defaults with a warning.
pub fn load_config(path: Option<&Path>) -> PlaqueConfig {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let path = std::env::current_dir().unwrap_or_default().join(CONFIG_FILENAME);
            if !path.exists() {
                return PlaqueConfig::default();
            }
            path
        }
    };

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %config_path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!("failed to parse {}: {}", config_path.display(), e);
                PlaqueConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to read {}: {}", config_path.display(), e);
            PlaqueConfig::default()
        }
    }
}

/// JSON Schema for `plaque.config.json`.
pub const PLAQUE_CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Plaque Configuration",
  "description": "Configuration file for plaque - component library documentation generator",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "output": {
      "type": "object",
      "description": "Where and how docs are written",
      "properties": {
        "dir": {
          "type": "string",
          "description": "Output directory",
          "default": "./docs"
        },
        "format": {
          "type": "string",
          "enum": ["md", "json", "stats"],
          "description": "Output format",
          "default": "md"
        },
        "includeRaw": {
          "type": "boolean",
          "description": "Keep raw render, class and breakpoint JSON in json output",
          "default": true
        }
      },
      "additionalProperties": false
    },
    "generate": {
      "type": "object",
      "description": "Documentation pipeline settings",
      "properties": {
        "parallel": {
          "type": "boolean",
          "description": "Document components in parallel",
          "default": true
        },
        "maxRenderDepth": {
          "type": "integer",
          "minimum": 1,
          "description": "Deepest render tree accepted before a component fails",
          "default": 256
        }
      },
      "additionalProperties": false
    },
    "index": {
      "type": "object",
      "description": "Index page settings",
      "properties": {
        "title": {
          "type": "string",
          "description": "Title of README.md",
          "default": "Component Library"
        }
      },
      "additionalProperties": false
    }
  },
  "additionalProperties": false
}"#;
