use crate::domain::model::AttrValue;
use crate::domain::ports::{Block, Subject};
use serde_json::Value;

const ARRAY_ATTRIBUTES: &[&str] = &["each", "first", "last", "size", "length"];
const STRING_ATTRIBUTES: &[&str] = &["size", "length"];

/// JSON documents act as subjects: objects expose their keys, arrays can be
/// iterated through `each`.
impl Subject for Value {
    fn responds_to(&self, attribute: &str) -> bool {
        match self {
            Value::Object(map) => map.contains_key(attribute),
            Value::Array(_) => ARRAY_ATTRIBUTES.contains(&attribute),
            Value::String(_) => STRING_ATTRIBUTES.contains(&attribute),
            _ => false,
        }
    }

    fn send(&self, attribute: &str, block: Option<Block<'_>>) -> AttrValue {
        match (self, attribute) {
            (Value::Object(map), key) => map.get(key).cloned().map(AttrValue::Data).unwrap_or_default(),
            (Value::Array(items), "each") => {
                if let Some(block) = block {
                    for item in items {
                        block(&AttrValue::Data(item.clone()));
                    }
                }
                AttrValue::Data(self.clone())
            }
            (Value::Array(items), "first") => items.first().cloned().map(AttrValue::Data).unwrap_or_default(),
            (Value::Array(items), "last") => items.last().cloned().map(AttrValue::Data).unwrap_or_default(),
            (Value::Array(items), "size" | "length") => AttrValue::from(items.len() as i64),
            (Value::String(s), "size" | "length") => AttrValue::from(s.chars().count() as i64),
            _ => AttrValue::absent(),
        }
    }

    fn to_json(&self) -> Value {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_responds_to_its_keys() {
        let user = json!({"name": "John Doe", "email": "john@doe.com"});
        assert!(user.responds_to("name"));
        assert!(user.responds_to("email"));
        assert!(!user.responds_to("password_hash"));
        assert_eq!(user.send("name", None).as_str(), Some("John Doe"));
    }

    #[test]
    fn test_array_each_yields_every_element() {
        let numbers = json!([1, 2, 3]);
        let mut seen = Vec::new();
        let mut collect = |value: &AttrValue| seen.push(value.as_i64().unwrap());

        let returned = numbers.send("each", Some(&mut collect));

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(returned.as_data(), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn test_array_each_without_block_returns_items() {
        let numbers = json!([1, 2, 3]);
        assert_eq!(numbers.send("each", None).as_data(), Some(&json!([1, 2, 3])));
        assert_eq!(numbers.send("first", None).as_i64(), Some(1));
        assert_eq!(numbers.send("last", None).as_i64(), Some(3));
        assert_eq!(numbers.send("size", None).as_i64(), Some(3));
    }

    #[test]
    fn test_to_json_is_the_document() {
        let user = json!({"name": "John Doe"});
        assert_eq!(Subject::to_json(&user), user);
    }

    #[test]
    fn test_scalars_respond_to_nothing() {
        assert!(!json!(42).responds_to("name"));
        assert!(!Value::Null.responds_to("each"));
        assert!(json!("héllo").responds_to("length"));
        assert_eq!(json!("héllo").send("length", None).as_i64(), Some(5));
    }
}
