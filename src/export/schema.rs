//! JSON Schema (draft 2020-12) for canonical export documents, version 1.0.
//!
//! The schema pins the envelope and every object on the path down to
//! `unlock_criteria.params`. The builder payload under `params` is checked
//! separately when a badge is extracted.

use serde_json::{Value, json};

/// The only interchange version this codec reads and writes.
pub const SCHEMA_VERSION: &str = "1.0";

/// Returns the export schema.
pub fn export_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "CanonicalExport",
        "type": "object",
        "additionalProperties": false,
        "required": [
            "schema_version",
            "exported_at",
            "exported_by",
            "publish_scope",
            "achievements"
        ],
        "properties": {
            "schema_version": { "const": SCHEMA_VERSION },
            "exported_at": { "type": "string", "format": "date-time" },
            "exported_by": {
                "type": "object",
                "additionalProperties": false,
                "required": ["user_id", "tool"],
                "properties": {
                    "user_id": non_empty_string(),
                    "tool": non_empty_string()
                }
            },
            "publish_scope": {
                "oneOf": [
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["type", "tenant_id"],
                        "properties": {
                            "type": { "const": "global" },
                            "tenant_id": { "type": "null" }
                        }
                    },
                    {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["type", "tenant_id"],
                        "properties": {
                            "type": { "const": "tenant" },
                            "tenant_id": non_empty_string()
                        }
                    }
                ]
            },
            "achievements": {
                "type": "array",
                "minItems": 1,
                "items": { "$ref": "#/$defs/achievement" }
            }
        },
        "$defs": {
            "achievement": {
                "type": "object",
                "additionalProperties": false,
                "required": [
                    "achievement_key",
                    "name",
                    "description",
                    "icon",
                    "badge",
                    "visibility",
                    "unlock"
                ],
                "properties": {
                    "achievement_key": non_empty_string(),
                    "name": { "type": "string" },
                    "description": { "type": "string" },
                    "icon": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["icon_media_id", "icon_url_legacy"],
                        "properties": {
                            "icon_media_id": nullable_string(),
                            "icon_url_legacy": nullable_string()
                        }
                    },
                    "badge": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["badge_color"],
                        "properties": {
                            "badge_color": nullable_string()
                        }
                    },
                    "visibility": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["is_easter_egg", "hint_text"],
                        "properties": {
                            "is_easter_egg": { "type": "boolean" },
                            "hint_text": nullable_string()
                        }
                    },
                    "unlock": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["condition_type", "condition_value", "unlock_criteria"],
                        "properties": {
                            "condition_type": { "const": "manual" },
                            "condition_value": true,
                            "unlock_criteria": {
                                "type": "object",
                                "additionalProperties": false,
                                "required": ["type", "params"],
                                "properties": {
                                    "type": { "const": "manual" },
                                    "params": { "type": "object" }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

fn non_empty_string() -> Value {
    json!({ "type": "string", "minLength": 1 })
}

fn nullable_string() -> Value {
    json!({ "type": ["string", "null"] })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_schema_version() {
        let schema = export_schema();
        assert_eq!(schema["properties"]["schema_version"]["const"], SCHEMA_VERSION);
    }

    #[test]
    fn requires_full_unlock_path() {
        let schema = export_schema();
        let unlock = &schema["$defs"]["achievement"]["properties"]["unlock"];
        assert_eq!(unlock["required"][2], "unlock_criteria");
        assert_eq!(
            unlock["properties"]["unlock_criteria"]["required"],
            json!(["type", "params"])
        );
    }
}
