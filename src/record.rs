//! Source records: one query row as an ordered map of lower-cased column name to scalar.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single column value. Serialized as the bare JSON scalar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Text form of the value; `None` for null.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::Float(n) => Some(n.to_string()),
            Scalar::Text(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Float(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Scalar::Null)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Scalar>);

impl Record {
    pub fn new() -> Self {
        Record(IndexMap::new())
    }

    /// Insert a column, keeping the first position of a repeated name.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Scalar>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.0.get(column)
    }

    /// Value of `column` as trimmed text, or `None` when absent, null, or blank.
    pub fn trimmed(&self, column: &str) -> Option<String> {
        let text = self.get(column)?.to_text()?;
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_treats_blank_and_null_as_absent() {
        let record: Record = [
            ("name", Scalar::from("  Ann ")),
            ("blank", Scalar::from("   ")),
            ("nothing", Scalar::Null),
            ("year", Scalar::Int(2024)),
        ]
        .into_iter()
        .collect();
        assert_eq!(record.trimmed("name").as_deref(), Some("Ann"));
        assert_eq!(record.trimmed("blank"), None);
        assert_eq!(record.trimmed("nothing"), None);
        assert_eq!(record.trimmed("missing"), None);
        assert_eq!(record.trimmed("year").as_deref(), Some("2024"));
    }

    #[test]
    fn serializes_as_ordered_json_object() {
        let record: Record = [
            ("reg_no", Scalar::from("S1")),
            ("active", Scalar::Bool(true)),
            ("gpa", Scalar::Float(3.5)),
            ("email", Scalar::Null),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"reg_no":"S1","active":true,"gpa":3.5,"email":null}"#);
    }

    #[test]
    fn deserializes_scalars_by_shape() {
        let record: Record = serde_json::from_str(r#"{"a":1,"b":"x","c":null,"d":false,"e":1.5}"#).unwrap();
        assert_eq!(record.get("a"), Some(&Scalar::Int(1)));
        assert_eq!(record.get("b"), Some(&Scalar::from("x")));
        assert_eq!(record.get("c"), Some(&Scalar::Null));
        assert_eq!(record.get("d"), Some(&Scalar::Bool(false)));
        assert_eq!(record.get("e"), Some(&Scalar::Float(1.5)));
    }
}
