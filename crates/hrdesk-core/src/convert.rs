// ── API-to-domain conversions ──
//
// The forms endpoints return untyped JSON; over time the backend has used
// `formId`, `_id` or `id` for the identifier, and `fieldName` or `name`
// for field keys. Everything is reshaped here into one `CustomForm`.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::model::{CustomForm, FieldType, FormField, FormIdSource};

// ── Helpers ──────────────────────────────────────────────────────────

fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// IDs may arrive as strings or numbers.
fn id_value(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Lowercase, non-alphanumeric runs collapsed to `_`, ends trimmed.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_sep = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

fn option_text(option: &Value) -> Option<String> {
    match option {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => non_empty_str(obj, "label")
            .or_else(|| non_empty_str(obj, "value"))
            .map(str::to_owned),
        _ => None,
    }
}

// ── Canonical mapping ────────────────────────────────────────────────

/// Resolve a form ID: `formId`, then `_id`, then `id`, then a generated
/// `FORM-<unix millis>`.
pub fn resolve_form_id(obj: &Map<String, Value>, now: DateTime<Utc>) -> (String, FormIdSource) {
    [
        ("formId", FormIdSource::FormId),
        ("_id", FormIdSource::UnderscoreId),
        ("id", FormIdSource::Id),
    ]
    .into_iter()
    .find_map(|(key, source)| id_value(obj, key).map(|id| (id, source)))
    .unwrap_or_else(|| {
        (
            format!("FORM-{}", now.timestamp_millis()),
            FormIdSource::Generated,
        )
    })
}

/// Map one raw field. `position` is 1-based and only used when the field
/// has neither a name nor a label.
pub fn canonicalize_field(raw: &Value, position: usize) -> FormField {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let label = non_empty_str(obj, "label").map(str::to_owned);
    let field_name = non_empty_str(obj, "fieldName")
        .or_else(|| non_empty_str(obj, "name"))
        .map(str::to_owned)
        .or_else(|| label.as_deref().map(slugify).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| format!("field_{position}"));

    let field_type = non_empty_str(obj, "type")
        .or_else(|| non_empty_str(obj, "fieldType"))
        .and_then(|t| t.parse::<FieldType>().ok())
        .unwrap_or_default();

    let options = obj
        .get("options")
        .and_then(Value::as_array)
        .map(|opts| opts.iter().filter_map(option_text).collect())
        .unwrap_or_default();

    FormField {
        label: label.unwrap_or_else(|| field_name.clone()),
        field_name,
        field_type,
        required: obj.get("required").and_then(Value::as_bool).unwrap_or(false),
        options,
        placeholder: non_empty_str(obj, "placeholder").map(str::to_owned),
    }
}

/// Reshape any form payload the backend has produced into a [`CustomForm`].
pub fn canonicalize_form(raw: &Value, now: DateTime<Utc>) -> CustomForm {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let (form_id, id_source) = resolve_form_id(obj, now);
    let fields = obj
        .get("fields")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .enumerate()
                .map(|(i, f)| canonicalize_field(f, i + 1))
                .collect()
        })
        .unwrap_or_default();

    CustomForm {
        form_id,
        id_source,
        title: non_empty_str(obj, "title")
            .or_else(|| non_empty_str(obj, "name"))
            .unwrap_or("Untitled form")
            .to_owned(),
        description: non_empty_str(obj, "description").map(str::to_owned),
        fields,
        is_active: obj.get("isActive").and_then(Value::as_bool).unwrap_or(true),
        created_at: non_empty_str(obj, "createdAt").map(str::to_owned),
    }
}

/// Canonicalize a fetched list. Generated IDs get a `-<position>` suffix
/// so forms without a backend ID stay distinct within one fetch.
pub fn canonicalize_forms(raw: &[Value], now: DateTime<Utc>) -> Vec<CustomForm> {
    raw.iter()
        .enumerate()
        .map(|(i, f)| {
            let mut form = canonicalize_form(f, now);
            if form.id_source == FormIdSource::Generated {
                form.form_id = format!("{}-{i}", form.form_id);
            }
            form
        })
        .collect()
}

/// Request body for create/update. A generated ID is never sent.
pub fn form_payload(form: &CustomForm, company_id: &str) -> Value {
    let mut body = serde_json::to_value(form).unwrap_or_else(|_| Value::Object(Map::new()));
    if let Value::Object(map) = &mut body {
        if form.id_source == FormIdSource::Generated {
            map.remove("formId");
        }
        map.remove("createdAt");
        map.insert("companyId".into(), Value::String(company_id.to_owned()));
    }
    body
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }

    #[test]
    fn form_id_prefers_form_id_over_underscore_id() {
        let form = canonicalize_form(
            &json!({"formId": "F-1", "_id": "65ab", "id": 7, "title": "Exit interview"}),
            at(0),
        );
        assert_eq!(form.form_id, "F-1");
        assert_eq!(form.id_source, FormIdSource::FormId);
    }

    #[test]
    fn form_id_falls_back_through_underscore_id_and_id() {
        let form = canonicalize_form(&json!({"_id": "65ab", "id": 7}), at(0));
        assert_eq!((form.form_id.as_str(), form.id_source), ("65ab", FormIdSource::UnderscoreId));

        let form = canonicalize_form(&json!({"id": 7}), at(0));
        assert_eq!((form.form_id.as_str(), form.id_source), ("7", FormIdSource::Id));
    }

    #[test]
    fn missing_id_is_generated_from_clock() {
        let form = canonicalize_form(&json!({"title": "Survey", "formId": ""}), at(1_700_000_000_123));
        assert_eq!(form.form_id, "FORM-1700000000123");
        assert_eq!(form.id_source, FormIdSource::Generated);
    }

    #[test]
    fn generated_ids_are_distinct_within_one_list() {
        let forms = canonicalize_forms(
            &[
                json!({"title": "Survey"}),
                json!({"formId": "F-9"}),
                json!({"title": "Feedback"}),
            ],
            at(1_700_000_000_000),
        );
        let ids: Vec<_> = forms.iter().map(|f| f.form_id.as_str()).collect();
        assert_eq!(ids, ["FORM-1700000000000-0", "F-9", "FORM-1700000000000-2"]);
    }

    #[test]
    fn field_name_precedence() {
        let form = canonicalize_form(
            &json!({
                "formId": "F-2",
                "fields": [
                    {"fieldName": "dept", "name": "department", "label": "Department"},
                    {"name": "shirt_size", "label": "Shirt size", "type": "select",
                     "options": ["S", {"label": "M"}, {"value": "L"}]},
                    {"label": "Date of Joining!", "type": "date", "required": true},
                    {"type": "hologram"}
                ]
            }),
            at(0),
        );
        let names: Vec<_> = form.fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, ["dept", "shirt_size", "date_of_joining", "field_4"]);
        assert_eq!(form.fields[1].options, ["S", "M", "L"]);
        assert_eq!(form.fields[2].field_type, FieldType::Date);
        assert!(form.fields[2].required);
        assert_eq!(form.fields[3].field_type, FieldType::Text);
        assert!(!form.fields[3].required);
    }

    #[test]
    fn payload_omits_generated_id() {
        let form = canonicalize_form(&json!({"title": "Survey"}), at(5));
        let body = form_payload(&form, "c1");
        assert!(body.get("formId").is_none());
        assert_eq!(body["companyId"], "c1");
        assert_eq!(body["title"], "Survey");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Emergency  Contact / Phone "), "emergency_contact_phone");
        assert_eq!(slugify("!!!"), "");
    }
}
