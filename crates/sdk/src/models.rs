//! Core data models for entrypoint registration

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// String-keyed mapping used for request and response schemas
pub type SchemaMap = BTreeMap<String, SchemaValue>;

/// HTTP method of a registered entrypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// All methods the registry accepts, in display order
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// Wire representation of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognized method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    /// Method names are matched case-sensitively, as the registry does
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Open JSON value accepted anywhere inside a schema mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<SchemaValue>),
    Object(SchemaMap),
}

impl From<Value> for SchemaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SchemaValue::Null,
            Value::Bool(b) => SchemaValue::Bool(b),
            Value::Number(n) => SchemaValue::Number(n),
            Value::String(s) => SchemaValue::String(s),
            Value::Array(items) => SchemaValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => SchemaValue::Object(schema_map_from(map)),
        }
    }
}

impl From<SchemaValue> for Value {
    fn from(value: SchemaValue) -> Self {
        match value {
            SchemaValue::Null => Value::Null,
            SchemaValue::Bool(b) => Value::Bool(b),
            SchemaValue::Number(n) => Value::Number(n),
            SchemaValue::String(s) => Value::String(s),
            SchemaValue::Array(items) => Value::Array(items.into_iter().map(Into::into).collect()),
            SchemaValue::Object(map) => Value::Object(json_map_from(map)),
        }
    }
}

pub(crate) fn schema_map_from(map: Map<String, Value>) -> SchemaMap {
    map.into_iter().map(|(k, v)| (k, v.into())).collect()
}

fn json_map_from(map: SchemaMap) -> Map<String, Value> {
    map.into_iter().map(|(k, v)| (k, v.into())).collect()
}

/// Request and response shape of an entrypoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrypointSchema {
    pub request: SchemaMap,
    pub response: SchemaMap,
}

impl From<EntrypointSchema> for Value {
    fn from(schema: EntrypointSchema) -> Self {
        let mut map = Map::new();
        map.insert("request".to_string(), Value::Object(json_map_from(schema.request)));
        map.insert("response".to_string(), Value::Object(json_map_from(schema.response)));
        Value::Object(map)
    }
}

/// A validated entrypoint, as buffered and sent to the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrypointDescriptor {
    pub name: String,
    pub description: String,
    pub method: HttpMethod,
    pub path: String,
    pub schema: EntrypointSchema,
}

/// An unvalidated entrypoint candidate
///
/// Every field may be missing so that incomplete input (for example a JSON
/// file written by hand) can be rejected with a precise validation error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrypointDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub method: Option<String>,
    pub path: Option<String>,
    pub schema: Option<Value>,
}

impl EntrypointDraft {
    /// Create a draft with an empty request and response schema
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            method: Some(method.into()),
            path: Some(path.into()),
            schema: Some(EntrypointSchema::default().into()),
        }
    }

    /// Set the request and response schema
    pub fn with_schema(mut self, request: Value, response: Value) -> Self {
        let mut map = Map::new();
        map.insert("request".to_string(), request);
        map.insert("response".to_string(), response);
        self.schema = Some(Value::Object(map));
        self
    }

    /// Replace the whole schema value, which may be malformed
    pub fn with_raw_schema(mut self, schema: Option<Value>) -> Self {
        self.schema = schema;
        self
    }
}

impl From<EntrypointDescriptor> for EntrypointDraft {
    fn from(descriptor: EntrypointDescriptor) -> Self {
        Self {
            name: Some(descriptor.name),
            description: Some(descriptor.description),
            method: Some(descriptor.method.into()),
            path: Some(descriptor.path),
            schema: Some(descriptor.schema.into()),
        }
    }
}

/// Registry response to a successful sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub success: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl SyncResult {
    /// Parse `created_at` as an RFC 3339 timestamp
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
