use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which kind of element a field was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTag {
    Input,
    Select,
    Textarea,
}

impl FieldTag {
    /// Map an HTML tag name onto a field tag, if it is one.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "input" => Some(Self::Input),
            "select" => Some(Self::Select),
            "textarea" => Some(Self::Textarea),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Select => "select",
            Self::Textarea => "textarea",
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<option>` of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// A single input-capable element and its validation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// `name` attribute, falling back to `id`, then to an empty string.
    pub name: String,
    pub id: Option<String>,
    pub tag: FieldTag,
    /// Input subtype (`text` when unspecified), or the tag name for select/textarea.
    pub r#type: String,
    pub label: Option<String>,
    pub required: bool,
    pub pattern: Option<String>,
    pub maxlength: Option<String>,
    pub placeholder: Option<String>,
    /// Present only for select fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
}

/// The shape of a scraped form, as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub source: String,
    pub fetched_at: String,
    pub fields: Vec<FormField>,
}

impl FormSchema {
    /// Wrap extracted fields, stamping them with the current local time.
    pub fn new(source: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self::with_timestamp(source, chrono::Local::now().to_rfc3339(), fields)
    }

    pub fn with_timestamp(
        source: impl Into<String>,
        fetched_at: impl Into<String>,
        fields: Vec<FormField>,
    ) -> Self {
        Self {
            source: source.into(),
            fetched_at: fetched_at.into(),
            fields,
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the schema to `path` as UTF-8 JSON, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(self.to_json()?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
