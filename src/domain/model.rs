use crate::domain::ports::{Block, Subject, SubjectRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Name under which a presenter binds one subject value.
pub type SubjectRole = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureSpec {
    pub exposed_name: String,
    pub source_attribute: String,
    pub source_role: Option<SubjectRole>,
}

impl ExposureSpec {
    pub fn new(source_attribute: impl Into<String>, source_role: Option<SubjectRole>) -> Self {
        let source_attribute = source_attribute.into();
        let exposed_name = Self::exposed_name_for(&source_attribute, source_role.as_deref());
        Self {
            exposed_name,
            source_attribute,
            source_role,
        }
    }

    /// `role_attribute` when a source role is given, the bare attribute otherwise.
    pub fn exposed_name_for(source_attribute: &str, source_role: Option<&str>) -> String {
        match source_role {
            Some(role) => format!("{}_{}", role, source_attribute),
            None => source_attribute.to_string(),
        }
    }
}

/// Trailing options of an `expose` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposeOptions {
    pub with: Option<SubjectRole>,
}

impl ExposeOptions {
    pub fn with(role: impl Into<SubjectRole>) -> Self {
        Self {
            with: Some(role.into()),
        }
    }
}

/// Result of reading an attribute: plain data or another subject.
///
/// `Data(Value::Null)` is the absent value.
#[derive(Debug, Clone)]
pub enum AttrValue {
    Data(Value),
    Subject(SubjectRef),
}

impl AttrValue {
    pub fn absent() -> Self {
        AttrValue::Data(Value::Null)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, AttrValue::Data(Value::Null))
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            AttrValue::Data(value) => Some(value),
            AttrValue::Subject(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_data().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_data().and_then(Value::as_i64)
    }

    /// Turns the value into something attributes can be read from.
    pub fn into_subject(self) -> Option<SubjectRef> {
        match self {
            AttrValue::Subject(subject) => Some(subject),
            AttrValue::Data(Value::Null) => None,
            AttrValue::Data(value) => Some(Arc::new(value)),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            AttrValue::Data(value) => value.clone(),
            AttrValue::Subject(subject) => subject.to_json(),
        }
    }
}

impl Default for AttrValue {
    fn default() -> Self {
        Self::absent()
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        AttrValue::Data(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Data(Value::String(value.to_string()))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Data(Value::String(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Data(Value::Number(value.into()))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Data(Value::Bool(value))
    }
}

impl From<SubjectRef> for AttrValue {
    fn from(subject: SubjectRef) -> Self {
        AttrValue::Subject(subject)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// A named-field subject whose fields can be changed after a presenter wraps it.
#[derive(Debug, Default)]
pub struct Record {
    data: RwLock<BTreeMap<String, AttrValue>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<AttrValue> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data.get(name).cloned()
    }

    pub fn into_subject(self) -> SubjectRef {
        Arc::new(self)
    }
}

impl Subject for Record {
    fn responds_to(&self, attribute: &str) -> bool {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data.contains_key(attribute)
    }

    fn send(&self, attribute: &str, _block: Option<Block<'_>>) -> AttrValue {
        self.get(attribute).unwrap_or_default()
    }

    fn to_json(&self) -> Value {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        Value::Object(
            data.iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }
}
