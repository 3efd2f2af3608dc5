use crate::domain::model::AttrValue;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Callback forwarded to an attribute that yields elements.
pub type Block<'a> = &'a mut dyn FnMut(&AttrValue);

/// An externally-owned domain object a presenter can read attributes from.
///
/// `responds_to` is the capability check performed before every `send`; a
/// presenter never calls `send` for an attribute the subject does not
/// advertise.
pub trait Subject: Send + Sync + fmt::Debug {
    fn responds_to(&self, attribute: &str) -> bool;

    fn send(&self, attribute: &str, block: Option<Block<'_>>) -> AttrValue;

    /// Plain-data snapshot used when a presenter is serialized.
    fn to_json(&self) -> Value {
        Value::Null
    }
}

pub type SubjectRef = Arc<dyn Subject>;

/// Host-provided collaborators (translations, routes, view helpers).
///
/// Every method defaults to `None`, so a host only implements what it has.
pub trait Helpers: Send + Sync {
    fn translate(&self, _key: &str, _options: &Map<String, Value>) -> Option<String> {
        None
    }

    fn localize(&self, _value: &Value, _options: &Map<String, Value>) -> Option<String> {
        None
    }

    fn url_for(&self, _route: &str, _params: &Map<String, Value>) -> Option<String> {
        None
    }

    fn helper(&self, _name: &str, _args: &[Value]) -> Option<Value> {
        None
    }

    fn default_url_options(&self) -> Option<Map<String, Value>> {
        None
    }
}
