use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Marker value a reply must carry for the call to count as succeeded.
pub const STATUS_OK: &str = "ok";

/// Fixed test value for one request field.
///
/// `Unsupported` covers field kinds this harness does not know how to
/// populate. The builder skips them rather than failing, so a schema can
/// declare every field the endpoint has, including ones ahead of harness
/// support.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Unsupported { kind: String },
}

/// A single settable field of the request message.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub value: FieldValue,
}

/// Ordered list of every settable field the remote call expects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            value,
        });
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
        self.fields.iter()
    }
}

/// The request message sent on every call.
///
/// Built once per run and shared read-only by all workers; never mutated
/// after construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestPayload {
    fields: Map<String, Value>,
}

impl RequestPayload {
    /// Populate every known field with its declared fixed value.
    ///
    /// Deterministic: the same schema always yields an equivalent payload.
    pub fn build(schema: &FieldSchema) -> Self {
        let mut fields = Map::new();
        for spec in schema.iter() {
            let value = match &spec.value {
                FieldValue::String(s) => Value::from(s.clone()),
                FieldValue::Integer(i) => Value::from(*i),
                FieldValue::Boolean(b) => Value::from(*b),
                FieldValue::Unsupported { kind } => {
                    debug!(field = %spec.name, %kind, "skipping field of unsupported kind");
                    continue;
                }
            };
            fields.insert(spec.name.clone(), value);
        }
        Self { fields }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The slice of a reply this harness reads: the success marker. Every other
/// reply field is ignored.
#[derive(Debug, Deserialize)]
pub struct Reply {
    pub status: String,
}

impl Reply {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}
