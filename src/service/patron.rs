//! Student record -> Koha patron payload.

use crate::config::KohaSettings;
use crate::error::MappingError;
use crate::record::Record;
use serde::Serialize;

/// Columns every record must carry (non-blank) to become a patron.
pub const REQUIRED_FIELDS: [&str; 3] = ["reg_no", "first_name", "surname"];

/// Columns turned into extended attributes, in output order.
const RECORD_ATTRIBUTES: [&str; 3] = ["course", "level", "faculty"];

/// Patron as accepted by the Koha import interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Patron {
    pub cardnumber: String,
    pub categorycode: String,
    pub branchcode: String,
    pub surname: String,
    pub firstname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dateofbirth: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extended_attributes: Vec<ExtendedAttribute>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtendedAttribute {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl ExtendedAttribute {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        ExtendedAttribute {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Map one record. Fails with every missing required field when any is absent or blank.
pub fn to_patron(record: &Record, koha: &KohaSettings) -> Result<Patron, MappingError> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| record.trimmed(field).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(MappingError::MissingFields(missing));
    }

    let required = |field: &str| record.trimmed(field).unwrap_or_default();

    let mut extended_attributes: Vec<ExtendedAttribute> = RECORD_ATTRIBUTES
        .iter()
        .filter_map(|field| record.trimmed(field).map(|value| ExtendedAttribute::new(*field, value)))
        .collect();
    extended_attributes.extend(
        koha.static_attributes
            .iter()
            .map(|(kind, value)| ExtendedAttribute::new(kind.as_str(), value.as_str())),
    );

    Ok(Patron {
        cardnumber: required("reg_no"),
        categorycode: koha.category.clone(),
        branchcode: koha.branch.clone(),
        surname: required("surname"),
        firstname: required("first_name"),
        email: record.trimmed("email"),
        phone: record.trimmed("phone"),
        address: record.trimmed("address"),
        userid: record.trimmed("userid"),
        dateofbirth: record.trimmed("dateofbirth"),
        extended_attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Scalar;
    use serde_json::json;

    fn koha() -> KohaSettings {
        KohaSettings {
            branch: "MAIN".into(),
            category: "STUD".into(),
            ..Default::default()
        }
    }

    fn record(fields: &[(&str, Scalar)]) -> Record {
        fields.iter().cloned().collect()
    }

    #[test]
    fn maps_minimal_record_with_course() {
        let rec = record(&[
            ("reg_no", "S1".into()),
            ("first_name", " Ann ".into()),
            ("surname", "Lee".into()),
            ("course", "CS".into()),
        ]);
        let patron = to_patron(&rec, &koha()).unwrap();
        assert_eq!(
            serde_json::to_value(&patron).unwrap(),
            json!({
                "cardnumber": "S1",
                "categorycode": "STUD",
                "branchcode": "MAIN",
                "surname": "Lee",
                "firstname": "Ann",
                "extended_attributes": [{"type": "course", "value": "CS"}]
            })
        );
    }

    #[test]
    fn missing_reg_no_is_reported() {
        let rec = record(&[("first_name", "Ann".into()), ("surname", "Lee".into())]);
        let err = to_patron(&rec, &koha()).unwrap_err();
        assert_eq!(err, MappingError::MissingFields(vec!["reg_no"]));
        assert!(err.to_string().contains("reg_no"));
    }

    #[test]
    fn every_missing_field_is_listed() {
        let rec = record(&[
            ("reg_no", "   ".into()),
            ("first_name", Scalar::Null),
            ("email", "a@b.c".into()),
        ]);
        let err = to_patron(&rec, &koha()).unwrap_err();
        assert_eq!(
            err,
            MappingError::MissingFields(vec!["reg_no", "first_name", "surname"])
        );
    }

    #[test]
    fn numeric_reg_no_becomes_cardnumber_text() {
        let rec = record(&[
            ("reg_no", Scalar::Int(20240017)),
            ("first_name", "Ann".into()),
            ("surname", "Lee".into()),
        ]);
        assert_eq!(to_patron(&rec, &koha()).unwrap().cardnumber, "20240017");
    }

    #[test]
    fn optional_fields_only_when_non_blank() {
        let rec = record(&[
            ("reg_no", "S1".into()),
            ("first_name", "Ann".into()),
            ("surname", "Lee".into()),
            ("email", " ann@example.org ".into()),
            ("phone", "  ".into()),
            ("address", Scalar::Null),
            ("dateofbirth", "2001-02-03".into()),
        ]);
        let value = serde_json::to_value(to_patron(&rec, &koha()).unwrap()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["branchcode", "cardnumber", "categorycode", "dateofbirth", "email", "firstname", "surname"]
        );
        assert_eq!(value["email"], "ann@example.org");
    }

    #[test]
    fn extended_attributes_keep_record_then_static_order() {
        let mut settings = koha();
        settings.static_attributes.insert("source".into(), "pastel".into());
        settings.static_attributes.insert("campus".into(), "North".into());
        let rec = record(&[
            ("reg_no", "S1".into()),
            ("first_name", "Ann".into()),
            ("surname", "Lee".into()),
            ("faculty", "Science".into()),
            ("level", " ".into()),
            ("course", "CS".into()),
        ]);
        let patron = to_patron(&rec, &settings).unwrap();
        assert_eq!(
            patron.extended_attributes,
            vec![
                ExtendedAttribute::new("course", "CS"),
                ExtendedAttribute::new("faculty", "Science"),
                ExtendedAttribute::new("source", "pastel"),
                ExtendedAttribute::new("campus", "North"),
            ]
        );
    }

    #[test]
    fn empty_extended_attributes_are_omitted() {
        let rec = record(&[
            ("reg_no", "S1".into()),
            ("first_name", "Ann".into()),
            ("surname", "Lee".into()),
        ]);
        let value = serde_json::to_value(to_patron(&rec, &koha()).unwrap()).unwrap();
        assert!(value.get("extended_attributes").is_none());
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
