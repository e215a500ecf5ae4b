//! The persisted auth record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use warden_log::warn;

/// Field name of the subject identifier in the stored shape.
pub const UID_FIELD: &str = "uid";
/// Field name of the caller context in the stored shape.
pub const CONTEXT_FIELD: &str = "context";
/// Field name of the checksum in the stored shape.
pub const CHECKSUM_FIELD: &str = "checksum";

/// Identifier of the authenticated subject.
///
/// Integers and strings are kept apart: `42` and `"42"` are different ids,
/// since the caller's checksum may cover the original representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
    Int(i64),
    Str(String),
}

impl SubjectId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(id) => Some(*id),
            Self::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(id) => Some(id),
            Self::Int(_) => None,
        }
    }

    fn from_stored(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Int),
            _ => None,
        }
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for SubjectId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for SubjectId {
    fn from(id: i32) -> Self {
        Self::Int(id.into())
    }
}

impl From<u32> for SubjectId {
    fn from(id: u32) -> Self {
        Self::Int(id.into())
    }
}

impl From<String> for SubjectId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&str> for SubjectId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

/// Authentication info kept in the session.
///
/// A missing record reads back as [`AuthRecord::empty`], so callers never
/// have to tell "nothing stored" apart from "stored, but all null".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthRecord {
    /// Authenticated subject, `None` when nobody is logged in
    #[serde(default)]
    pub uid: Option<SubjectId>,
    /// Caller-defined context (roles, timestamps, ...)
    #[serde(default)]
    pub context: Option<Value>,
    /// Caller-computed checksum, stored verbatim
    #[serde(default)]
    pub checksum: Option<String>,
}

impl AuthRecord {
    /// Create a record. A JSON `null` context is stored as `None`.
    pub fn new(uid: Option<SubjectId>, context: Option<Value>, checksum: Option<String>) -> Self {
        Self {
            uid,
            context: context.filter(|c| !c.is_null()),
            checksum,
        }
    }

    /// The all-`None` record.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.uid.is_none() && self.context.is_none() && self.checksum.is_none()
    }

    pub fn is_authenticated(&self) -> bool {
        self.uid.is_some()
    }

    /// Read a record from its stored form.
    ///
    /// Each field is extracted on its own and defaults to `None`. Values of
    /// the wrong type are dropped with a warning rather than failing the read.
    pub fn from_stored(stored: Option<&Value>) -> Self {
        let fields = match stored {
            None | Some(Value::Null) => return Self::empty(),
            Some(Value::Object(fields)) => fields,
            Some(other) => {
                warn!(
                    "Ignoring stored auth record: expected an object, found {}",
                    kind_of(other)
                );
                return Self::empty();
            }
        };

        let uid = present(fields, UID_FIELD).and_then(|value| {
            let uid = SubjectId::from_stored(value);
            if uid.is_none() {
                warn!("Ignoring stored '{}': unsupported {}", UID_FIELD, kind_of(value));
            }
            uid
        });

        let checksum = present(fields, CHECKSUM_FIELD).and_then(|value| match value {
            Value::String(s) => Some(s.clone()),
            other => {
                warn!(
                    "Ignoring stored '{}': expected a string, found {}",
                    CHECKSUM_FIELD,
                    kind_of(other)
                );
                None
            }
        });

        Self {
            uid,
            context: present(fields, CONTEXT_FIELD).cloned(),
            checksum,
        }
    }

    /// Stored form: an object with exactly `uid`, `context` and `checksum`.
    pub fn to_stored(&self) -> Value {
        let mut fields = Map::with_capacity(3);
        fields.insert(
            UID_FIELD.to_string(),
            match &self.uid {
                Some(SubjectId::Int(id)) => Value::from(*id),
                Some(SubjectId::Str(id)) => Value::String(id.clone()),
                None => Value::Null,
            },
        );
        fields.insert(
            CONTEXT_FIELD.to_string(),
            self.context.clone().unwrap_or(Value::Null),
        );
        fields.insert(
            CHECKSUM_FIELD.to_string(),
            self.checksum.clone().map(Value::String).unwrap_or(Value::Null),
        );
        Value::Object(fields)
    }
}

fn present<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|v| !v.is_null())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
