//! Field-level validation for JSON request bodies.
//!
//! Every failing field is collected so a client sees all problems at once.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

static LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{10FFFF}-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{10FFFF}-]+)*$"#,
    )
    .expect("local part pattern is valid")
});

static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    // Labels may carry non-ASCII letters (internationalized domains).
    Regex::new(r"^([\p{L}\p{N}]([\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?\.)+\p{L}{2,63}$")
        .expect("domain pattern is valid")
});

/// One offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    pub fn body(field: Option<&str>, kind: &'static str, msg: impl Into<String>) -> Self {
        let mut loc = vec!["body".to_string()];
        if let Some(field) = field {
            loc.push(field.to_string());
        }
        Self {
            loc,
            msg: msg.into(),
            kind,
        }
    }

    pub fn query(kind: &'static str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["query".to_string()],
            msg: msg.into(),
            kind,
        }
    }

    /// Name of the field this error points at, if any.
    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

/// All field failures for one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// True if any error points at `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == Some(field))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.loc.join("."), e.msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Reads typed fields out of a JSON object, accumulating errors.
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    pub fn new(body: &'a Value) -> Result<Self, ValidationErrors> {
        match body {
            Value::Object(map) => Ok(Self {
                map,
                errors: Vec::new(),
            }),
            _ => Err(ValidationErrors::single(FieldError::body(
                None,
                "model_attributes_type",
                "Input should be a valid dictionary or object to extract fields from",
            ))),
        }
    }

    fn push(&mut self, field: &str, kind: &'static str, msg: &str) {
        self.errors.push(FieldError::body(Some(field), kind, msg));
    }

    /// A string that must be present and not blank.
    pub fn required_text(&mut self, field: &str) -> String {
        match self.map.get(field) {
            None => {
                self.push(field, "missing", "Field required");
                String::new()
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.push(field, "string_too_short", "String should have at least 1 character");
                String::new()
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.push(field, "string_type", "Input should be a valid string");
                String::new()
            }
        }
    }

    /// A string that may be absent or null.
    pub fn optional_text(&mut self, field: &str) -> Option<String> {
        self.optional_text_or(field, None)
    }

    /// Like `optional_text`, but an absent key takes `default`. An explicit
    /// null stays null.
    pub fn optional_text_or(&mut self, field: &str, default: Option<&str>) -> Option<String> {
        match self.map.get(field) {
            None => default.map(str::to_string),
            Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.push(field, "string_type", "Input should be a valid string");
                None
            }
        }
    }

    /// A required, syntactically valid email address.
    pub fn email(&mut self, field: &str) -> String {
        match self.map.get(field) {
            None => {
                self.push(field, "missing", "Field required");
                String::new()
            }
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if is_valid_email(trimmed) {
                    trimmed.to_string()
                } else {
                    self.push(field, "value_error", "value is not a valid email address");
                    String::new()
                }
            }
            Some(_) => {
                self.push(field, "string_type", "Input should be a valid string");
                String::new()
            }
        }
    }

    /// Hand back `value` if nothing failed.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

pub fn is_valid_email(address: &str) -> bool {
    if address.len() > MAX_EMAIL_LEN {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    local.len() <= MAX_LOCAL_PART_LEN && LOCAL_PART.is_match(local) && DOMAIN.is_match(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.uk"));
        assert!(is_valid_email("o'brien@example-mail.org"));
        assert!(is_valid_email("josé@example.com"));
        assert!(is_valid_email("用户@例子.中国"));
        assert!(is_valid_email("anna@bücher.de"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email("jane@@example.com"));
        assert!(!is_valid_email(".jane@example.com"));
        assert!(!is_valid_email("jane..doe@example.com"));
        assert!(!is_valid_email("jane@-example.com"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("jane@example.c0m"));
        assert!(!is_valid_email("jos\u{e9} @example.com"));
    }

    #[test]
    fn test_required_text() {
        let body = json!({"name": "Jane", "blank": "  ", "number": 5});
        let mut fields = Fields::new(&body).unwrap();
        assert_eq!(fields.required_text("name"), "Jane");
        fields.required_text("blank");
        fields.required_text("number");
        fields.required_text("missing");

        let errors = fields.finish(()).unwrap_err();
        let kinds: Vec<_> = errors.errors().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec!["string_too_short", "string_type", "missing"]);
    }

    #[test]
    fn test_optional_text_default() {
        let body = json!({"explicit": null, "given": "x"});
        let mut fields = Fields::new(&body).unwrap();
        assert_eq!(fields.optional_text_or("absent", Some("website")), Some("website".into()));
        assert_eq!(fields.optional_text_or("explicit", Some("website")), None);
        assert_eq!(fields.optional_text("given"), Some("x".into()));
        assert!(fields.finish(()).is_ok());
    }

    #[test]
    fn test_non_object_body() {
        let body = json!(["not", "an", "object"]);
        let errors = Fields::new(&body).err().unwrap();
        assert_eq!(errors.errors()[0].loc, vec!["body".to_string()]);
        assert_eq!(errors.errors()[0].kind, "model_attributes_type");
    }

    #[test]
    fn test_display_joins_errors() {
        let body = json!({});
        let mut fields = Fields::new(&body).unwrap();
        fields.required_text("name");
        fields.email("email");
        let errors = fields.finish(()).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "body.name: Field required; body.email: Field required"
        );
    }
}
