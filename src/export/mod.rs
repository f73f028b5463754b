//! Report rendering
//!
//! An [`AnalysisResult`] can be written as a coloured text tree, pretty JSON
//! or YAML.

mod text;

pub use text::TextFormatter;

use crate::core::analyzer::AnalysisResult;
use crate::utils::error::{MapperError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Report format
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(MapperError::export(format!(
                "unsupported format: {}",
                other
            ))),
        }
    }
}

/// Render `result` in the requested format
///
/// `color` only affects the text report.
pub fn render(result: &AnalysisResult, format: OutputFormat, color: bool) -> Result<String> {
    let output = match format {
        OutputFormat::Text => TextFormatter::new(color).format(result),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(result)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(result)?,
    };
    Ok(output)
}

/// Render `result` and write it to `writer`
pub fn write_result<W: Write>(
    result: &AnalysisResult,
    format: OutputFormat,
    color: bool,
    mut writer: W,
) -> Result<()> {
    let output = render(result, format, color)?;
    writer
        .write_all(output.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| MapperError::export(format!("writing output: {}", e)))
}
