use std::fmt;

use serde::Serialize;
use tracing::trace;

use super::ParameterType;
use crate::error::ConversionError;

/// A typed parameter value.
///
/// Serializes untagged, so `{"to": "John", "count": 3, "verbose": false}`
/// is what a JSON consumer sees for a parsed option map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    /// Convert a raw token into a value of the requested type.
    ///
    /// Strings are taken verbatim. Integers are parsed base-10 and may carry a
    /// sign. Booleans accept the literals `true` and `false`; an empty token
    /// means the flag is present and yields `true`.
    pub fn coerce(raw: &str, param_type: ParameterType) -> Result<Self, ConversionError> {
        trace!(raw, %param_type, "coercing token");
        match param_type {
            ParameterType::String => Ok(ParamValue::String(raw.to_string())),
            ParameterType::Int => raw
                .parse::<i64>()
                .map(ParamValue::Int)
                .map_err(|_| ConversionError::Conversion {
                    raw: raw.to_string(),
                    target: "Integer",
                }),
            ParameterType::Bool => match raw {
                "" | "true" => Ok(ParamValue::Bool(true)),
                "false" => Ok(ParamValue::Bool(false)),
                _ => Err(ConversionError::Conversion {
                    raw: raw.to_string(),
                    target: "Boolean",
                }),
            },
        }
    }

    /// Same as [`ParamValue::coerce`] with the type given by name, as it
    /// appears in manifests.
    pub fn coerce_named(raw: &str, type_name: &str) -> Result<Self, ConversionError> {
        Self::coerce(raw, type_name.parse()?)
    }

    pub fn param_type(&self) -> ParameterType {
        match self {
            ParamValue::String(_) => ParameterType::String,
            ParamValue::Int(_) => ParameterType::Int,
            ParamValue::Bool(_) => ParameterType::Bool,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("hello", ParamValue::String("hello".into()))]
    #[case("", ParamValue::String(String::new()))]
    #[case("--looks-like-an-option", ParamValue::String("--looks-like-an-option".into()))]
    fn strings_are_identity(#[case] raw: &str, #[case] want: ParamValue) {
        assert_eq!(ParamValue::coerce(raw, ParameterType::String), Ok(want));
    }

    #[rstest]
    #[case("0", 0)]
    #[case("42", 42)]
    #[case("-17", -17)]
    #[case("+8", 8)]
    fn integers_parse_base_ten(#[case] raw: &str, #[case] want: i64) {
        assert_eq!(ParamValue::coerce(raw, ParameterType::Int), Ok(ParamValue::Int(want)));
    }

    #[rstest]
    #[case("notInteger")]
    #[case("1.5")]
    #[case("")]
    #[case("0x10")]
    fn non_integers_fail(#[case] raw: &str) {
        let err = ParamValue::coerce(raw, ParameterType::Int).unwrap_err();
        assert_eq!(err.to_string(), format!("cannot convert {} to Integer", raw));
    }

    #[rstest]
    #[case("", true)]
    #[case("true", true)]
    #[case("false", false)]
    fn booleans_accept_two_literals(#[case] raw: &str, #[case] want: bool) {
        assert_eq!(ParamValue::coerce(raw, ParameterType::Bool), Ok(ParamValue::Bool(want)));
    }

    #[rstest]
    #[case("yes")]
    #[case("TRUE")]
    #[case("1")]
    fn other_booleans_fail(#[case] raw: &str) {
        let err = ParamValue::coerce(raw, ParameterType::Bool).unwrap_err();
        assert_eq!(err.to_string(), format!("cannot convert {} to Boolean", raw));
    }

    #[test]
    fn display_feeds_back_into_coerce() {
        for v in [ParamValue::Int(-3), ParamValue::Int(i64::MAX), ParamValue::Bool(false)] {
            assert_eq!(ParamValue::coerce(&v.to_string(), v.param_type()), Ok(v));
        }
    }

    #[test]
    fn unknown_type_name() {
        let err = ParamValue::coerce_named("1", "float").unwrap_err();
        assert_eq!(err, ConversionError::UnknownType("float".into()));
    }

    #[test]
    fn accessors_match_variant() {
        let v = ParamValue::Int(7);
        assert_eq!(v.as_int(), Some(7));
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_bool(), None);
        assert_eq!(ParamValue::from("x").as_str(), Some("x"));
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![
            ParamValue::from("John"),
            ParamValue::from(3),
            ParamValue::from(true),
        ])
        .unwrap();
        assert_eq!(json, r#"["John",3,true]"#);
    }
}
