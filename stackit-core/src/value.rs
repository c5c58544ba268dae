//! Value - Attribute values with Terraform's null / unknown semantics
//!
//! Every attribute of a provider model is an [`Attr`]. An attribute that the
//! API did not return is [`Attr::Null`], which is distinct from an empty or
//! zero value. [`Attr::Unknown`] marks a value that will only be known after
//! apply.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Attribute value of a provider model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attr<T> {
    /// Explicitly unset
    Null,
    /// Not yet known (computed during apply)
    Unknown,
    /// Known value
    Value(T),
}

impl<T> Default for Attr<T> {
    fn default() -> Self {
        Attr::Null
    }
}

impl<T> Attr<T> {
    pub fn value(value: impl Into<T>) -> Self {
        Attr::Value(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Attr::Null)
    }

    /// Returns true if the attribute is null or unknown
    pub fn is_unset(&self) -> bool {
        !matches!(self, Attr::Value(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Attr::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Attr::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Clone> Attr<T> {
    /// Clone the known value out, `None` for null and unknown
    pub fn to_option(&self) -> Option<T> {
        self.as_option().cloned()
    }
}

impl Attr<String> {
    /// The string value, or `""` when null or unknown
    pub fn value_str(&self) -> &str {
        self.as_option().map(String::as_str).unwrap_or("")
    }
}

impl<T> From<Option<T>> for Attr<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Attr::Value(v),
            None => Attr::Null,
        }
    }
}

impl<T: Serialize> Serialize for Attr<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Attr::Value(v) => serializer.serialize_some(v),
            Attr::Null | Attr::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Attr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Attr::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(default)]
        name: Attr<String>,
        #[serde(default)]
        count: Attr<i64>,
    }

    #[test]
    fn from_option_preserves_absence() {
        assert_eq!(Attr::from(None::<String>), Attr::Null);
        assert_eq!(Attr::from(Some(3)), Attr::Value(3));
    }

    #[test]
    fn empty_string_is_not_null() {
        let empty: Attr<String> = Attr::value("");
        assert!(!empty.is_null());
        assert_eq!(empty.value_str(), "");
        assert!(Attr::<String>::Unknown.is_unset());
    }

    #[test]
    fn missing_and_null_fields_deserialize_to_null() {
        let sample: Sample = serde_json::from_str(r#"{"count": null}"#).unwrap();
        assert_eq!(sample, Sample::default());

        let sample: Sample = serde_json::from_str(r#"{"name": "n", "count": 4}"#).unwrap();
        assert_eq!(sample.name, Attr::value("n"));
        assert_eq!(sample.count, Attr::Value(4));
    }

    #[test]
    fn unknown_serializes_as_null() {
        let sample = Sample {
            name: Attr::Unknown,
            count: Attr::Value(1),
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json, serde_json::json!({"name": null, "count": 1}));
    }
}
