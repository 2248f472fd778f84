//! Versioned interchange documents for badges.
//!
//! A [`CanonicalExport`] wraps one or more achievements in an envelope that
//! other systems parse, so the key layout is fixed:
//!
//! ```json
//! {
//!   "schema_version": "1.0",
//!   "exported_at": "2026-01-01T00:00:00Z",
//!   "exported_by": { "user_id": "u1", "tool": "badgesmith" },
//!   "publish_scope": { "type": "global", "tenant_id": null },
//!   "achievements": [{
//!     "achievement_key": "...",
//!     "name": "...",
//!     "description": "...",
//!     "icon": { "icon_media_id": null, "icon_url_legacy": null },
//!     "badge": { "badge_color": null },
//!     "visibility": { "is_easter_egg": false, "hint_text": null },
//!     "unlock": {
//!       "condition_type": "manual",
//!       "condition_value": null,
//!       "unlock_criteria": {
//!         "type": "manual",
//!         "params": { "builder": { "badge": { "...": "AchievementItem" } } }
//!       }
//!     }
//!   }]
//! }
//! ```
//!
//! [`ExportCodec`] builds such documents, validates them against the embedded
//! schema on the way in and on the way out, and unpacks the badge from the
//! builder path.
//!
//! # Example
//!
//! ```
//! use badgesmith::{AchievementItem, ExportArgs, ExportCodec};
//!
//! let codec = ExportCodec::new().unwrap();
//! let item = AchievementItem::new_draft("badge-1", "Explorer");
//!
//! let export = codec.build_export(ExportArgs::new(&item, "user-7")).unwrap();
//! let json = export.to_json().unwrap();
//!
//! let imported = codec.extract_badge_item("import-9", &json).unwrap();
//! assert_eq!(imported.id, "import-9");
//! assert_eq!(imported.title, "Explorer");
//! ```

mod error;
mod schema;

pub use error::{ExportError, FieldViolation};
pub use schema::{SCHEMA_VERSION, export_schema};

use jsonschema::{Draft, Validator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::achievement::AchievementItem;

/// Tool name stamped into `exported_by` unless the caller provides one.
pub const DEFAULT_EXPORT_TOOL: &str = "badgesmith";

// ============================================================================
// Document types
// ============================================================================

/// The interchange envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CanonicalExport {
    pub schema_version: String,
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub exported_at: OffsetDateTime,
    pub exported_by: ExportedBy,
    pub publish_scope: PublishScope,
    pub achievements: Vec<AchievementEntry>,
}

impl CanonicalExport {
    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string(self).map_err(ExportError::Serialize)
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(ExportError::Serialize)
    }
}

/// Who produced the export, and with what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ExportedBy {
    pub user_id: String,
    pub tool: String,
}

/// Where the exported achievements may be published.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "RawPublishScope", try_from = "RawPublishScope")]
pub enum PublishScope {
    #[default]
    Global,
    Tenant { tenant_id: String },
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
enum ScopeKind {
    Global,
    Tenant,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
struct RawPublishScope {
    #[serde(rename = "type")]
    kind: ScopeKind,
    tenant_id: Option<String>,
}

impl From<PublishScope> for RawPublishScope {
    fn from(scope: PublishScope) -> Self {
        match scope {
            PublishScope::Global => Self {
                kind: ScopeKind::Global,
                tenant_id: None,
            },
            PublishScope::Tenant { tenant_id } => Self {
                kind: ScopeKind::Tenant,
                tenant_id: Some(tenant_id),
            },
        }
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for PublishScope {
    fn schema_name() -> String {
        "PublishScope".to_owned()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        RawPublishScope::json_schema(generator)
    }
}

impl TryFrom<RawPublishScope> for PublishScope {
    type Error = String;

    fn try_from(raw: RawPublishScope) -> Result<Self, Self::Error> {
        match (raw.kind, raw.tenant_id) {
            (ScopeKind::Global, None) => Ok(Self::Global),
            (ScopeKind::Global, Some(_)) => Err("global scope must not name a tenant".to_owned()),
            (ScopeKind::Tenant, Some(tenant_id)) if !tenant_id.is_empty() => {
                Ok(Self::Tenant { tenant_id })
            }
            (ScopeKind::Tenant, _) => Err("tenant scope requires a tenant_id".to_owned()),
        }
    }
}

/// One achievement inside the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct AchievementEntry {
    pub achievement_key: String,
    pub name: String,
    pub description: String,
    pub icon: IconReference,
    pub badge: BadgeStyle,
    pub visibility: Visibility,
    pub unlock: Unlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct IconReference {
    pub icon_media_id: Option<String>,
    pub icon_url_legacy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BadgeStyle {
    pub badge_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Visibility {
    pub is_easter_egg: bool,
    pub hint_text: Option<String>,
}

/// Builder badges are always awarded manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum UnlockKind {
    #[default]
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Unlock {
    pub condition_type: UnlockKind,
    pub condition_value: Value,
    pub unlock_criteria: UnlockCriteria,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct UnlockCriteria {
    #[serde(rename = "type")]
    pub kind: UnlockKind,
    /// Free-form parameters; builder data lives under `builder.badge`.
    pub params: Map<String, Value>,
}

// ============================================================================
// ExportArgs
// ============================================================================

/// Inputs to [`ExportCodec::build_export`].
#[derive(Debug, Clone)]
pub struct ExportArgs<'a> {
    pub item: &'a AchievementItem,
    pub exported_by: ExportedBy,
    pub publish_scope: PublishScope,
    pub exported_at: OffsetDateTime,
}

impl<'a> ExportArgs<'a> {
    /// Global export of `item` by `user_id`, stamped now.
    pub fn new(item: &'a AchievementItem, user_id: impl Into<String>) -> Self {
        Self {
            item,
            exported_by: ExportedBy {
                user_id: user_id.into(),
                tool: DEFAULT_EXPORT_TOOL.to_owned(),
            },
            publish_scope: PublishScope::Global,
            exported_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_scope(mut self, scope: PublishScope) -> Self {
        self.publish_scope = scope;
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.exported_by.tool = tool.into();
        self
    }

    pub fn with_timestamp(mut self, exported_at: OffsetDateTime) -> Self {
        self.exported_at = exported_at;
        self
    }
}

// ============================================================================
// ExportCodec
// ============================================================================

const BADGE_PATH: [&str; 5] = ["unlock", "unlock_criteria", "params", "builder", "badge"];

/// Builds, validates and unpacks canonical exports.
///
/// Holds the compiled schema; create one and reuse it.
pub struct ExportCodec {
    validator: Validator,
}

impl ExportCodec {
    /// Compiles the embedded schema.
    pub fn new() -> Result<Self, ExportError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true)
            .build(&export_schema())
            .map_err(|err| ExportError::Schema(err.to_string()))?;
        Ok(Self { validator })
    }

    /// Checks a document against the schema, collecting every violation.
    pub fn validate(&self, document: &Value) -> Result<(), Vec<FieldViolation>> {
        let violations: Vec<FieldViolation> = self
            .validator
            .iter_errors(document)
            .map(|err| FieldViolation {
                path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Builds an export for one achievement.
    ///
    /// The result is checked against the same schema used by
    /// [`parse_export`](Self::parse_export); a failure there is reported as
    /// [`ExportError::SelfValidation`] and means the builder itself is wrong.
    pub fn build_export(&self, args: ExportArgs<'_>) -> Result<CanonicalExport, ExportError> {
        let item = args.item;
        let badge = serde_json::to_value(item).map_err(ExportError::Serialize)?;

        let mut builder = Map::new();
        builder.insert("badge".to_owned(), badge);
        let mut params = Map::new();
        params.insert("builder".to_owned(), Value::Object(builder));

        let export = CanonicalExport {
            schema_version: SCHEMA_VERSION.to_owned(),
            exported_at: args.exported_at,
            exported_by: args.exported_by,
            publish_scope: args.publish_scope,
            achievements: vec![AchievementEntry {
                achievement_key: item.id.clone(),
                name: item.title.clone(),
                description: item.description.clone(),
                icon: IconReference::default(),
                badge: BadgeStyle::default(),
                visibility: Visibility::default(),
                unlock: Unlock {
                    condition_type: UnlockKind::Manual,
                    condition_value: Value::Null,
                    unlock_criteria: UnlockCriteria {
                        kind: UnlockKind::Manual,
                        params,
                    },
                },
            }],
        };

        let document = serde_json::to_value(&export).map_err(ExportError::Serialize)?;
        if let Err(violations) = self.validate(&document) {
            tracing::error!(
                achievement = %item.id,
                violations = violations.len(),
                "built export failed self-validation"
            );
            return Err(ExportError::SelfValidation(violations));
        }
        Ok(export)
    }

    /// Parses and validates an inbound export.
    pub fn parse_export(&self, json: &str) -> Result<CanonicalExport, ExportError> {
        let document: Value = serde_json::from_str(json).map_err(ExportError::Json)?;
        self.parse_value(document)
    }

    /// Validates an already decoded export.
    pub fn parse_value(&self, document: Value) -> Result<CanonicalExport, ExportError> {
        if let Err(violations) = self.validate(&document) {
            tracing::warn!(violations = violations.len(), "rejected export document");
            return Err(ExportError::Structural(violations));
        }
        serde_json::from_value(document).map_err(ExportError::Json)
    }

    /// Parses an export and returns its first achievement's badge, with the
    /// id replaced by `export_id`.
    pub fn extract_badge_item(&self, export_id: &str, json: &str) -> Result<AchievementItem, ExportError> {
        let export = self.parse_export(json)?;
        let mut item = badge_from_export(&export)?;
        item.id = export_id.to_owned();
        Ok(item)
    }
}

/// Walks `achievements[0].unlock.unlock_criteria.params.builder.badge`.
fn badge_from_export(export: &CanonicalExport) -> Result<AchievementItem, ExportError> {
    let mut path = String::from("achievements[0]");
    let entry = export
        .achievements
        .first()
        .ok_or_else(|| ExportError::MissingPath { path: path.clone() })?;

    let entry = serde_json::to_value(entry).map_err(ExportError::Serialize)?;
    let mut current = &entry;
    for segment in BADGE_PATH {
        path.push('.');
        path.push_str(segment);
        current = match current.get(segment) {
            None | Some(Value::Null) => return Err(ExportError::MissingPath { path }),
            Some(next @ Value::Object(_)) => next,
            Some(_) => return Err(ExportError::WrongShape { path }),
        };
    }

    AchievementItem::deserialize(current).map_err(ExportError::InvalidBadge)
}

// ============================================================================
// Tests
// ============================================================================
