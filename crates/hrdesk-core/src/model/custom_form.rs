// ── Custom form domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Where a form's ID came from when it was canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FormIdSource {
    /// `formId`
    #[default]
    FormId,
    /// `_id` (document-store primary key)
    UnderscoreId,
    /// `id`
    Id,
    /// None present; `FORM-<unix millis>` was generated.
    Generated,
}

/// Input kind of a form field. Unrecognized kinds stay `Text`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Number,
    Email,
    Phone,
    Date,
    Select,
    Radio,
    Checkbox,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub field_name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// A custom form in its one canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomForm {
    pub form_id: String,
    #[serde(skip)]
    pub id_source: FormIdSource,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FormField>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
