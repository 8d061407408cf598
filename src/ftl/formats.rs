//! Output formats for parsed resources
//!
//! Every format is a read-only consumer of the AST:
//! - treeviz: one line per node, built from [`AstSnapshot`](crate::ftl::ast::AstSnapshot)
//! - json / yaml: the serde representation of the [`Resource`]

pub mod treeviz;

pub use treeviz::{to_treeviz_str, to_treeviz_str_with_params};

use crate::ftl::ast::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown format `{0}` (expected treeviz, json or yaml)")]
    UnknownFormat(String),
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Treeviz,
    Json,
    Yaml,
}

impl Format {
    pub fn name(self) -> &'static str {
        match self {
            Format::Treeviz => "treeviz",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "treeviz" => Ok(Format::Treeviz),
            "json" => Ok(Format::Json),
            "yaml" => Ok(Format::Yaml),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render a resource in the given format
pub fn serialize(resource: &Resource, format: Format) -> Result<String, FormatError> {
    serialize_with_params(resource, format, &HashMap::new())
}

/// Like [`serialize`], with format-specific parameters (treeviz reads `show-linum`)
pub fn serialize_with_params(
    resource: &Resource,
    format: Format,
    params: &HashMap<String, String>,
) -> Result<String, FormatError> {
    match format {
        Format::Treeviz => Ok(to_treeviz_str_with_params(resource, params)),
        Format::Json => Ok(serde_json::to_string_pretty(resource)?),
        Format::Yaml => Ok(serde_yaml::to_string(resource)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftl::parsing::parse_resource;

    #[test]
    fn test_format_names_round_trip() {
        for format in [Format::Treeviz, Format::Json, Format::Yaml] {
            assert_eq!(format.name().parse::<Format>().unwrap(), format);
        }
        assert!(matches!(
            "xml".parse::<Format>(),
            Err(FormatError::UnknownFormat(name)) if name == "xml"
        ));
    }

    #[test]
    fn test_json_output() {
        let resource = parse_resource("hello = Hi { $name }\n");
        let json = serialize(&resource, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entry = &value["body"][0];
        assert_eq!(entry["type"], "Message");
        assert_eq!(entry["id"]["name"], "hello");
        assert_eq!(entry["value"]["elements"][1]["type"], "Placeable");
        assert_eq!(
            entry["value"]["elements"][1]["expression"]["type"],
            "VariableReference"
        );
    }

    #[test]
    fn test_yaml_output_includes_junk_error() {
        let resource = parse_resource("oops\n");
        let yaml = serialize(&resource, Format::Yaml).unwrap();
        assert!(yaml.contains("type: Junk"));
        assert!(yaml.contains("kind: unfinished-line"));
    }
}
