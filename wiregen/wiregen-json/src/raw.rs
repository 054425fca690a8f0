//! Serde mirror of the on-disk document. Missing keys take their empty
//! value; unknown keys are ignored.

use serde::Deserialize;
use serde_json::Value as Json;
use wiregen_core::{CommonRecord, DefaultLiteral, Field, Message};

use crate::LoadError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawMessage {
    #[serde(rename = "type")]
    message_type: String,
    name: String,
    valid_versions: String,
    flexible_versions: String,
    fields: Vec<RawField>,
    common_structs: Vec<RawCommonStruct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCommonStruct {
    name: String,
    versions: String,
    fields: Vec<RawField>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    versions: String,
    about: Option<String>,
    default: Option<Json>,
    ignorable: Option<bool>,
    fields: Vec<RawField>,
}

impl RawMessage {
    pub(crate) fn into_message(self) -> Result<Message, LoadError> {
        Ok(Message {
            message_type: self.message_type,
            name: self.name,
            valid_versions: self.valid_versions,
            flexible_versions: self.flexible_versions,
            fields: convert_fields(self.fields)?,
            common_records: self
                .common_structs
                .into_iter()
                .map(|common| {
                    Ok(CommonRecord {
                        name: common.name,
                        versions: common.versions,
                        fields: convert_fields(common.fields)?,
                    })
                })
                .collect::<Result<_, LoadError>>()?,
        })
    }
}

fn convert_fields(fields: Vec<RawField>) -> Result<Vec<Field>, LoadError> {
    fields.into_iter().map(RawField::into_field).collect()
}

impl RawField {
    fn into_field(self) -> Result<Field, LoadError> {
        let default = match self.default {
            None => DefaultLiteral::Absent,
            Some(Json::String(s)) => DefaultLiteral::String(s),
            Some(Json::Number(n)) if n.is_i64() => {
                DefaultLiteral::Int(n.as_i64().unwrap_or_default())
            }
            // Floats, out-of-range integers, booleans, arrays and objects.
            Some(other) => {
                return Err(LoadError::UnsupportedDefault {
                    field: self.name,
                    value: other.to_string(),
                });
            }
        };

        Ok(Field {
            name: self.name,
            type_name: self.type_name,
            versions: self.versions,
            about: self.about,
            default,
            ignorable: self.ignorable,
            fields: convert_fields(self.fields)?,
        })
    }
}
