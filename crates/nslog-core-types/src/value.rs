//! Message parts
//!
//! Callers pass heterogeneous arguments to a logger. Each one becomes a
//! [`LogValue`], so sinks decide formatting from the tag instead of guessing
//! at runtime types. Structured values are carried un-rendered; turning them
//! into text is the sink's job.

use serde::Serialize;
use std::fmt;

/// One part of a log message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// An array or object. Primitive JSON values are normalized into the
    /// primitive variants on conversion.
    Structured(serde_json::Value),
}

impl LogValue {
    /// Convert any serializable value into a message part
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if the value cannot be
    /// represented as JSON (e.g. a map with non-string keys).
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(LogValue::from)
    }

    /// Whether this part renders without structure (everything but arrays and objects)
    pub fn is_primitive(&self) -> bool {
        !matches!(self, LogValue::Structured(_))
    }

    /// Textual form used by the built-in renderers
    ///
    /// Strings are emitted verbatim, null as `null`, and structured values as
    /// JSON indented by two spaces.
    pub fn render(&self) -> String {
        match self {
            LogValue::Null => "null".to_string(),
            LogValue::Bool(b) => b.to_string(),
            LogValue::Int(i) => i.to_string(),
            LogValue::UInt(u) => u.to_string(),
            LogValue::Float(x) => x.to_string(),
            LogValue::Str(s) => s.clone(),
            LogValue::Structured(v) => {
                serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
            }
        }
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => LogValue::Null,
            Value::Bool(b) => LogValue::Bool(b),
            Value::String(s) => LogValue::Str(s),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    LogValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    LogValue::UInt(u)
                } else {
                    n.as_f64().map_or(LogValue::Null, LogValue::Float)
                }
            }
            structured @ (Value::Array(_) | Value::Object(_)) => LogValue::Structured(structured),
        }
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Str(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Str(s)
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::Str(s.clone())
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<()> for LogValue {
    fn from(_: ()) -> Self {
        LogValue::Null
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(LogValue::Null, Into::into)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for LogValue {
            fn from(v: $t) -> Self {
                LogValue::Int(v as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for LogValue {
            fn from(v: $t) -> Self {
                LogValue::UInt(v as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for LogValue {
    fn from(v: f32) -> Self {
        LogValue::Float(f64::from(v))
    }
}

impl From<f64> for LogValue {
    fn from(v: f64) -> Self {
        LogValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_json_is_normalized() {
        assert_eq!(LogValue::from(json!(null)), LogValue::Null);
        assert_eq!(LogValue::from(json!("x")), LogValue::Str("x".to_string()));
        assert_eq!(LogValue::from(json!(-3)), LogValue::Int(-3));
        assert_eq!(LogValue::from(json!(true)), LogValue::Bool(true));
        assert!(LogValue::from(json!(1.5)).is_primitive());
    }

    #[test]
    fn test_objects_stay_structured() {
        let value = LogValue::from(json!({"foo": "bar"}));
        assert!(!value.is_primitive());
        assert_eq!(value.render(), "{\n  \"foo\": \"bar\"\n}");
    }

    #[test]
    fn test_render_primitives() {
        assert_eq!(LogValue::Null.render(), "null");
        assert_eq!(LogValue::from("plain text").render(), "plain text");
        assert_eq!(LogValue::from(42u8).render(), "42");
        assert_eq!(LogValue::from(2.0f64).render(), "2");
        assert_eq!(LogValue::from(None::<&str>), LogValue::Null);
    }

    #[test]
    fn test_structured_from_serialize() {
        #[derive(Serialize)]
        struct Details {
            details: &'static str,
        }

        let value = LogValue::structured(&Details {
            details: "error info",
        })
        .unwrap();
        assert_eq!(value, LogValue::Structured(json!({"details": "error info"})));
    }

    #[test]
    fn test_structured_rejects_non_string_keys() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(LogValue::structured(&map).is_err());
    }

    #[test]
    fn test_serializes_untagged() {
        let parts = vec![LogValue::from("a"), LogValue::Null, LogValue::from(json!([1, 2]))];
        let json = serde_json::to_string(&parts).unwrap();
        assert_eq!(json, r#"["a",null,[1,2]]"#);
    }
}
