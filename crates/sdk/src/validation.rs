//! Shape validation for entrypoint drafts
//!
//! Fields are checked in a fixed order (name, description, method, path,
//! schema) and the first failure is reported. Validation never touches the
//! client buffer.

use crate::error::{EntrypointField, ValidationError};
use crate::models::{
    schema_map_from, EntrypointDescriptor, EntrypointDraft, EntrypointSchema, HttpMethod,
    SchemaMap,
};
use serde_json::Value;

/// Validate a single draft and narrow it into a descriptor
pub fn validate_entrypoint(draft: &EntrypointDraft) -> Result<EntrypointDescriptor, ValidationError> {
    let name = required_text(draft.name.as_deref(), EntrypointField::Name)?;
    let description = required_text(draft.description.as_deref(), EntrypointField::Description)?;
    let method = parse_method(draft.method.as_deref())?;
    let path = required_text(draft.path.as_deref(), EntrypointField::Path)?;
    let schema = parse_schema(draft.schema.as_ref())?;

    Ok(EntrypointDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        method,
        path: path.to_string(),
        schema,
    })
}

/// Validate a batch; the first invalid draft rejects the whole batch
pub fn validate_entrypoints(
    drafts: &[EntrypointDraft],
) -> Result<Vec<EntrypointDescriptor>, ValidationError> {
    drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| validate_entrypoint(draft).map_err(|e| e.at_index(index)))
        .collect()
}

fn required_text(value: Option<&str>, field: EntrypointField) -> Result<&str, ValidationError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::new(field)),
    }
}

fn parse_method(value: Option<&str>) -> Result<HttpMethod, ValidationError> {
    let raw = required_text(value, EntrypointField::Method)?;
    raw.parse().map_err(|_| {
        let allowed: Vec<&str> = HttpMethod::ALL.iter().map(HttpMethod::as_str).collect();
        ValidationError::new(EntrypointField::Method)
            .with_detail(format!("`{}` is not one of {}", raw, allowed.join(", ")))
    })
}

fn parse_schema(value: Option<&Value>) -> Result<EntrypointSchema, ValidationError> {
    let schema = match value {
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(ValidationError::new(EntrypointField::Schema).with_detail("expected an object"))
        }
        None => return Err(ValidationError::new(EntrypointField::Schema)),
    };

    Ok(EntrypointSchema {
        request: schema_part(schema.get("request"), "request")?,
        response: schema_part(schema.get("response"), "response")?,
    })
}

fn schema_part(value: Option<&Value>, part: &str) -> Result<SchemaMap, ValidationError> {
    match value {
        Some(Value::Object(map)) => Ok(schema_map_from(map.clone())),
        Some(_) => Err(ValidationError::new(EntrypointField::Schema)
            .with_detail(format!("`{}` must be a string-keyed object", part))),
        None => Err(ValidationError::new(EntrypointField::Schema)
            .with_detail(format!("`{}` is missing", part))),
    }
}
