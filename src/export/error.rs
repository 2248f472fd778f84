//! Errors raised at the interchange boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One schema violation, located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// JSON pointer of the offending value; empty for the document root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{path}: {}", self.message)
    }
}

struct Joined<'a>(&'a [FieldViolation]);

impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Failure to build, parse or unpack a canonical export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Input is not JSON, or a validated document failed to map onto the
    /// export types.
    #[error("malformed export JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// Inbound document does not match the schema. Lists every violation.
    #[error("export failed schema validation: {}", Joined(.0))]
    Structural(Vec<FieldViolation>),

    /// A segment of the badge path is absent.
    #[error("export is missing `{path}`")]
    MissingPath { path: String },

    /// A segment of the badge path is present but not an object.
    #[error("export field `{path}` must be an object")]
    WrongShape { path: String },

    /// The embedded badge does not deserialize into an achievement.
    #[error("embedded badge is invalid: {0}")]
    InvalidBadge(#[source] serde_json::Error),

    /// A freshly built export failed the codec's own schema.
    #[error("built export failed self-validation: {}", Joined(.0))]
    SelfValidation(Vec<FieldViolation>),

    /// The export could not be serialized.
    #[error("failed to serialize export: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The embedded schema failed to compile.
    #[error("export schema failed to compile: {0}")]
    Schema(String),
}

impl ExportError {
    /// Schema violations carried by the error, if any.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Structural(violations) | Self::SelfValidation(violations) => violations,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_message_lists_every_violation() {
        let err = ExportError::Structural(vec![
            FieldViolation {
                path: "/schema_version".into(),
                message: "bad version".into(),
            },
            FieldViolation {
                path: String::new(),
                message: "missing achievements".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "export failed schema validation: /schema_version: bad version; /: missing achievements"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn missing_path_names_segment() {
        let err = ExportError::MissingPath {
            path: "achievements[0].unlock".into(),
        };
        assert_eq!(err.to_string(), "export is missing `achievements[0].unlock`");
        assert!(err.violations().is_empty());
    }
}
