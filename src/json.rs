use serde_json::{Map, Value};
use crate::error::{Error, Result};

/// A parsed JSON object, as received from an ACME server.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Json {
    data: Map<String, Value>,
}

impl Json {
    /// Parses a JSON object.  Anything other than an object at the top level is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(data) => Ok(Self { data }),
            other => Err(Error::protocol_encoding(format!("Expected a JSON object instead of {}", other))),
        }
    }

    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Returns the value of a field.  Missing fields are represented by a [JsonValue] that is not present.
    pub fn get<'a>(&'a self, key: &'a str) -> JsonValue<'a> {
        JsonValue { key, value: self.data.get(key) }
    }

    pub fn to_map(&self) -> &Map<String, Value> {
        &self.data
    }
}

/// A field of a [Json] object that may or may not be present.
#[derive(Clone, Copy, Debug)]
pub struct JsonValue<'a> {
    key: &'a str,
    value: Option<&'a Value>,
}

impl<'a> JsonValue<'a> {
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the field as a string, failing if it is absent or holds anything other than a string.
    pub fn as_string(&self) -> Result<String> {
        match self.value {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(Error::protocol_encoding(format!("Field {:?} is not a string: {}", self.key, other))),
            None => Err(Error::protocol_encoding(format!("Required field {:?} is missing", self.key))),
        }
    }
}

/// Builds a JSON object field by field, keeping the insertion order.
#[derive(Clone, Debug, Default)]
pub struct JsonBuilder {
    data: Map<String, Value>,
}

impl JsonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.data.clone()
    }

    pub fn to_json(&self) -> Json {
        Json::from_map(self.to_map())
    }

    pub fn to_json_string(&self) -> String {
        Value::Object(self.to_map()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use super::{Json, JsonBuilder};

    #[test]
    fn builder_keeps_insertion_order() {
        let mut jb = JsonBuilder::new();
        jb.put("value", "example.com").put("type", "dns");
        assert_eq!(jb.to_json_string(), r#"{"value":"example.com","type":"dns"}"#);

        let keys: Vec<String> = jb.to_map().keys().cloned().collect();
        assert_eq!(keys, vec!["value", "type"]);
    }

    #[test]
    fn read_string_fields() {
        let json = Json::parse(r#"{"type": "dns", "value": "example.com", "wildcard": true}"#).unwrap();
        assert_eq!(json.get("type").as_string().unwrap(), "dns");
        assert_eq!(json.get("value").as_string().unwrap(), "example.com");
        assert!(json.get("wildcard").is_present());
        assert!(!json.get("status").is_present());
    }

    #[test]
    fn missing_or_mistyped_fields_are_encoding_errors() {
        let json = Json::parse(r#"{"type": 4}"#).unwrap();
        assert_eq!(json.get("type").as_string().unwrap_err().category(), "protocol-encoding");
        assert_eq!(json.get("value").as_string().unwrap_err().category(), "protocol-encoding");
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert_eq!(Json::parse("[1, 2]").unwrap_err().category(), "protocol-encoding");
        assert_eq!(Json::parse("{not json").unwrap_err().category(), "protocol-encoding");
    }

    #[test]
    fn builder_to_json() {
        let json = JsonBuilder::new().put("type", "ip").put("count", 2).to_json();
        assert_eq!(json.get("type").as_string().unwrap(), "ip");
        assert_eq!(json.to_map().get("count"), Some(&Value::from(2)));
    }
}
