//! Structural validation of comic payloads.
//!
//! Validation semantics:
//! - operates on raw `serde_json::Value` so type errors surface as
//!   field-level violations, not deserialization failures
//! - one message per violated field, all fields checked
//! - never partially accepts: a payload either normalizes fully or the
//!   whole list of violations is returned
//! - unknown fields are ignored (the published API never rejected them)

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{Comic, ComicPatch, Condition, NewComic};

const BOOK_NAME_REQUIRED: &str = "Book name is required.";
const AUTHOR_NAME_REQUIRED: &str = "Author name is required.";
const PRICE_NOT_NEGATIVE: &str = "Price must be a positive number.";
const DISCOUNT_RANGE: &str = "discount must be between 0 and 100";
const AT_LEAST_ONE_PAGE: &str = "Must have at least one page.";
const CONDITION_ENUM: &str = "Condition must be 'new' or 'used'.";

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validates a creation payload and normalizes it into a `NewComic`.
///
/// `discount` defaults to 0 when absent. Returns every violation found,
/// never a partial record.
pub fn validate_new_comic(payload: &Value) -> Result<NewComic, Vec<FieldViolation>> {
    let map = match payload.as_object() {
        Some(map) => map,
        None => return Err(vec![root_violation()]),
    };

    let mut violations = Vec::new();

    let book_name = required_text(map, "bookName", BOOK_NAME_REQUIRED, &mut violations);
    let author_name = required_text(map, "authorName", AUTHOR_NAME_REQUIRED, &mut violations);
    let year_of_publication = required_int(map, "yearOfPublication", &mut violations);

    let price = required_number(map, "price", &mut violations).and_then(|p| {
        if p < 0.0 {
            violations.push(FieldViolation::new("price", PRICE_NOT_NEGATIVE));
            None
        } else {
            Some(p)
        }
    });

    let discount = match present(map, "discount") {
        None => Some(0.0),
        Some(v) => match v.as_f64() {
            Some(d) if (0.0..=100.0).contains(&d) => Some(d),
            Some(_) => {
                violations.push(FieldViolation::new("discount", DISCOUNT_RANGE));
                None
            }
            None => {
                violations.push(FieldViolation::new("discount", "discount must be a number"));
                None
            }
        },
    };

    let number_of_pages = required_int(map, "numberOfPages", &mut violations).and_then(|n| {
        checked_page_count(n, &mut violations)
    });

    let condition = match present(map, "condition") {
        None => {
            violations.push(FieldViolation::new("condition", CONDITION_ENUM));
            None
        }
        Some(Value::String(s)) => match Condition::from_str(s) {
            Some(c) => Some(c),
            None => {
                violations.push(FieldViolation::new("condition", CONDITION_ENUM));
                None
            }
        },
        Some(_) => {
            violations.push(FieldViolation::new("condition", CONDITION_ENUM));
            None
        }
    };

    let description = optional_text(map, "description", &mut violations);

    match (
        book_name,
        author_name,
        year_of_publication,
        price,
        discount,
        number_of_pages,
        condition,
    ) {
        (
            Some(book_name),
            Some(author_name),
            Some(year_of_publication),
            Some(price),
            Some(discount),
            Some(number_of_pages),
            Some(condition),
        ) if violations.is_empty() => Ok(NewComic {
            book_name,
            author_name,
            year_of_publication,
            price,
            discount,
            number_of_pages,
            condition,
            description,
        }),
        _ => Err(violations),
    }
}

/// Validates a partial-update payload into a typed `ComicPatch`.
///
/// Absent fields stay `None` (untouched on merge); present fields get the
/// same type and range checks as creation.
pub fn validate_patch(payload: &Value) -> Result<ComicPatch, Vec<FieldViolation>> {
    let map = match payload.as_object() {
        Some(map) => map,
        None => return Err(vec![root_violation()]),
    };

    let mut violations = Vec::new();
    let mut patch = ComicPatch::default();

    if let Some(v) = present(map, "bookName") {
        match v.as_str() {
            Some(s) if !s.trim().is_empty() => patch.book_name = Some(s.to_string()),
            Some(_) => violations.push(FieldViolation::new("bookName", BOOK_NAME_REQUIRED)),
            None => violations.push(FieldViolation::new("bookName", "bookName must be a string")),
        }
    }

    if let Some(v) = present(map, "authorName") {
        match v.as_str() {
            Some(s) if !s.trim().is_empty() => patch.author_name = Some(s.to_string()),
            Some(_) => violations.push(FieldViolation::new("authorName", AUTHOR_NAME_REQUIRED)),
            None => {
                violations.push(FieldViolation::new("authorName", "authorName must be a string"))
            }
        }
    }

    if let Some(v) = present(map, "yearOfPublication") {
        match integer_of(v) {
            Ok(n) => patch.year_of_publication = Some(n),
            Err(message) => violations.push(FieldViolation::new("yearOfPublication", message)),
        }
    }

    if let Some(v) = present(map, "price") {
        match v.as_f64() {
            Some(p) if p >= 0.0 => patch.price = Some(p),
            Some(_) => violations.push(FieldViolation::new("price", PRICE_NOT_NEGATIVE)),
            None => violations.push(FieldViolation::new("price", "price must be a number")),
        }
    }

    if let Some(v) = present(map, "discount") {
        match v.as_f64() {
            Some(d) if (0.0..=100.0).contains(&d) => patch.discount = Some(d),
            Some(_) => violations.push(FieldViolation::new("discount", DISCOUNT_RANGE)),
            None => violations.push(FieldViolation::new("discount", "discount must be a number")),
        }
    }

    if let Some(v) = present(map, "numberOfPages") {
        match integer_of(v) {
            Ok(n) => {
                if let Some(pages) = checked_page_count(n, &mut violations) {
                    patch.number_of_pages = Some(pages);
                }
            }
            Err(message) => violations.push(FieldViolation::new("numberOfPages", message)),
        }
    }

    if let Some(v) = present(map, "condition") {
        match v.as_str().and_then(Condition::from_str) {
            Some(c) => patch.condition = Some(c),
            None => violations.push(FieldViolation::new("condition", CONDITION_ENUM)),
        }
    }

    if let Some(v) = present(map, "description") {
        match v.as_str() {
            Some(s) => patch.description = Some(s.to_string()),
            None => {
                violations.push(FieldViolation::new("description", "description must be a string"))
            }
        }
    }

    if violations.is_empty() {
        Ok(patch)
    } else {
        Err(violations)
    }
}

/// Re-checks the range constraints on a merged record.
///
/// Empty result means the record is valid. Used after a patch is applied,
/// so a partial update can never persist a record that creation would have
/// rejected.
pub fn validate_record(comic: &Comic) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if comic.book_name.trim().is_empty() {
        violations.push(FieldViolation::new("bookName", BOOK_NAME_REQUIRED));
    }
    if comic.author_name.trim().is_empty() {
        violations.push(FieldViolation::new("authorName", AUTHOR_NAME_REQUIRED));
    }
    if comic.price < 0.0 {
        violations.push(FieldViolation::new("price", PRICE_NOT_NEGATIVE));
    }
    if !(0.0..=100.0).contains(&comic.discount) {
        violations.push(FieldViolation::new("discount", DISCOUNT_RANGE));
    }
    if comic.number_of_pages < 1 {
        violations.push(FieldViolation::new("numberOfPages", AT_LEAST_ONE_PAGE));
    }

    violations
}

fn root_violation() -> FieldViolation {
    FieldViolation::new("$root", "payload must be a JSON object")
}

/// Field lookup that treats JSON null like an absent field.
fn present<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    map.get(field).filter(|v| !v.is_null())
}

fn required_text(
    map: &Map<String, Value>,
    field: &str,
    required_message: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match present(map, field) {
        None => {
            violations.push(FieldViolation::new(field, required_message));
            None
        }
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                violations.push(FieldViolation::new(field, required_message));
                None
            } else {
                Some(s.clone())
            }
        }
        Some(_) => {
            violations.push(FieldViolation::new(field, format!("{field} must be a string")));
            None
        }
    }
}

fn required_int(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<i64> {
    match present(map, field) {
        None => {
            violations.push(FieldViolation::new(field, format!("{field} is required")));
            None
        }
        Some(v) => match integer_of(v) {
            Ok(n) => Some(n),
            Err(message) => {
                violations.push(FieldViolation::new(field, message));
                None
            }
        },
    }
}

fn required_number(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<f64> {
    match present(map, field) {
        None => {
            violations.push(FieldViolation::new(field, format!("{field} is required")));
            None
        }
        Some(v) => match v.as_f64() {
            Some(n) => Some(n),
            None => {
                violations.push(FieldViolation::new(field, format!("{field} must be a number")));
                None
            }
        },
    }
}

fn optional_text(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match present(map, field) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(FieldViolation::new(field, format!("{field} must be a string")));
            None
        }
    }
}

/// Integer check without coercion: floats are rejected, not truncated.
fn integer_of(v: &Value) -> Result<i64, String> {
    if v.is_i64() || v.is_u64() {
        v.as_i64().ok_or_else(|| "value is out of range".to_string())
    } else {
        Err("value must be an integer".to_string())
    }
}

fn checked_page_count(n: i64, violations: &mut Vec<FieldViolation>) -> Option<u32> {
    if n < 1 {
        violations.push(FieldViolation::new("numberOfPages", AT_LEAST_ONE_PAGE));
        None
    } else if n > u32::MAX as i64 {
        violations.push(FieldViolation::new("numberOfPages", "numberOfPages is out of range"));
        None
    } else {
        Some(n as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn full_payload() -> Value {
        json!({
            "bookName": "Maus",
            "authorName": "Art Spiegelman",
            "yearOfPublication": 1991,
            "price": 18.5,
            "discount": 5,
            "numberOfPages": 296,
            "condition": "used",
            "description": "Pulitzer winner"
        })
    }

    #[test]
    fn test_valid_payload_normalizes() {
        let new = validate_new_comic(&full_payload()).unwrap();

        assert_eq!(new.book_name, "Maus");
        assert_eq!(new.author_name, "Art Spiegelman");
        assert_eq!(new.year_of_publication, 1991);
        assert_eq!(new.price, 18.5);
        assert_eq!(new.discount, 5.0);
        assert_eq!(new.number_of_pages, 296);
        assert_eq!(new.condition, Condition::Used);
        assert_eq!(new.description.as_deref(), Some("Pulitzer winner"));
    }

    #[test]
    fn test_discount_defaults_to_zero() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("discount");

        let new = validate_new_comic(&payload).unwrap();
        assert_eq!(new.discount, 0.0);
    }

    #[test]
    fn test_description_optional() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("description");

        let new = validate_new_comic(&payload).unwrap();
        assert_eq!(new.description, None);
    }

    #[test]
    fn test_each_required_field_reported() {
        for field in [
            "bookName",
            "authorName",
            "yearOfPublication",
            "price",
            "numberOfPages",
            "condition",
        ] {
            let mut payload = full_payload();
            payload.as_object_mut().unwrap().remove(field);

            let violations = validate_new_comic(&payload).unwrap_err();
            assert_eq!(violations.len(), 1, "field {field}");
            assert_eq!(violations[0].field, field);
        }
    }

    #[test]
    fn test_multiple_violations_collected() {
        let payload = json!({
            "bookName": "",
            "price": -1,
            "condition": "mint"
        });

        let violations = validate_new_comic(&payload).unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();

        assert!(fields.contains(&"bookName"));
        assert!(fields.contains(&"authorName"));
        assert!(fields.contains(&"yearOfPublication"));
        assert!(fields.contains(&"price"));
        assert!(fields.contains(&"numberOfPages"));
        assert!(fields.contains(&"condition"));
    }

    #[test]
    fn test_year_rejects_float() {
        let mut payload = full_payload();
        payload["yearOfPublication"] = json!(1991.5);

        let violations = validate_new_comic(&payload).unwrap_err();
        assert_eq!(violations[0].field, "yearOfPublication");
        assert!(violations[0].message.contains("integer"));
    }

    #[test]
    fn test_discount_range_enforced() {
        let mut payload = full_payload();
        payload["discount"] = json!(101);
        assert!(validate_new_comic(&payload).is_err());

        payload["discount"] = json!(-1);
        assert!(validate_new_comic(&payload).is_err());

        payload["discount"] = json!(100);
        assert!(validate_new_comic(&payload).is_ok());

        payload["discount"] = json!(0);
        assert!(validate_new_comic(&payload).is_ok());
    }

    #[test]
    fn test_zero_pages_rejected() {
        let mut payload = full_payload();
        payload["numberOfPages"] = json!(0);

        let violations = validate_new_comic(&payload).unwrap_err();
        assert_eq!(violations[0].message, AT_LEAST_ONE_PAGE);
    }

    #[test]
    fn test_condition_message_matches_contract() {
        let mut payload = full_payload();
        payload["condition"] = json!("mint");

        let violations = validate_new_comic(&payload).unwrap_err();
        assert_eq!(violations[0].message, CONDITION_ENUM);
    }

    #[test]
    fn test_non_object_payload() {
        let violations = validate_new_comic(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(violations[0].field, "$root");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut payload = full_payload();
        payload["publisher"] = json!("Pantheon");

        assert!(validate_new_comic(&payload).is_ok());
    }

    #[test]
    fn test_patch_accepts_subset() {
        let patch = validate_patch(&json!({"price": 9.99, "condition": "new"})).unwrap();

        assert_eq!(patch.price, Some(9.99));
        assert_eq!(patch.condition, Some(Condition::New));
        assert_eq!(patch.book_name, None);
    }

    #[test]
    fn test_patch_rejects_bad_types() {
        let violations = validate_patch(&json!({"price": "cheap"})).unwrap_err();
        assert_eq!(violations[0].field, "price");

        let violations = validate_patch(&json!({"yearOfPublication": "old"})).unwrap_err();
        assert_eq!(violations[0].field, "yearOfPublication");
    }

    #[test]
    fn test_patch_rejects_blanking_required_text() {
        let violations = validate_patch(&json!({"bookName": "  "})).unwrap_err();
        assert_eq!(violations[0].message, BOOK_NAME_REQUIRED);
    }

    #[test]
    fn test_empty_patch_is_valid() {
        let patch = validate_patch(&json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_validate_record_catches_merged_violations() {
        let comic = Comic {
            id: Uuid::new_v4(),
            book_name: "Sandman".to_string(),
            author_name: "Neil Gaiman".to_string(),
            year_of_publication: 1989,
            price: 12.0,
            discount: 150.0,
            number_of_pages: 40,
            condition: Condition::New,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let violations = validate_record(&comic);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "discount");
    }

    #[test]
    fn test_validate_record_passes_valid() {
        let comic = Comic {
            id: Uuid::new_v4(),
            book_name: "Sandman".to_string(),
            author_name: "Neil Gaiman".to_string(),
            year_of_publication: 1989,
            price: 12.0,
            discount: 0.0,
            number_of_pages: 40,
            condition: Condition::New,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(validate_record(&comic).is_empty());
    }
}
