//! Accepted entity shapes. Each maps to the collection named after its
//! lowercase type name.

pub mod validation;

use mongodb::bson::{Bson, Document};
use serde::Serialize;
use serde_json::Value;

pub use validation::{FieldError, Fields, ValidationErrors, is_valid_email};

pub trait Schema: Serialize + Sized {
    const COLLECTION: &'static str;

    /// Check a raw JSON body, reporting every field that fails.
    fn validate(body: &Value) -> Result<Self, ValidationErrors>;
}

/// Website contact lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub source: Option<String>,
}

impl Schema for Lead {
    const COLLECTION: &'static str = "lead";

    fn validate(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body)?;
        let lead = Lead {
            name: fields.required_text("name"),
            email: fields.email("email"),
            company: fields.optional_text("company"),
            phone: fields.optional_text("phone"),
            message: fields.required_text("message"),
            source: fields.optional_text_or("source", Some("website")),
        };
        fields.finish(lead)
    }
}

/// Newsletter subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Newsletter {
    pub email: String,
    pub name: Option<String>,
}

impl Schema for Newsletter {
    const COLLECTION: &'static str = "newsletter";

    fn validate(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body)?;
        let subscriber = Newsletter {
            email: fields.email("email"),
            name: fields.optional_text("name"),
        };
        fields.finish(subscriber)
    }
}

/// Client testimonial. Written out of band, read by the site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Testimonial {
    pub author: String,
    pub role: Option<String>,
    pub quote: String,
}

impl Testimonial {
    pub fn new(author: &str, role: Option<&str>, quote: &str) -> Self {
        Self {
            author: author.to_string(),
            role: role.map(str::to_string),
            quote: quote.to_string(),
        }
    }

    /// Reduce a stored document to the public shape. Missing or non-string
    /// `author`/`quote` become empty, `role` becomes null.
    pub fn from_document(doc: &Document) -> Self {
        let text = |key: &str| match doc.get(key) {
            Some(Bson::String(s)) => Some(s.clone()),
            _ => None,
        };
        Self {
            author: text("author").unwrap_or_default(),
            role: text("role"),
            quote: text("quote").unwrap_or_default(),
        }
    }

    /// Content shown while the collection is empty.
    pub fn placeholders() -> Vec<Self> {
        vec![
            Self::new(
                "Fortune 500 COO",
                Some("Manufacturing"),
                "Their team delivered measurable value within the first quarter.",
            ),
            Self::new(
                "Private Equity Partner",
                Some("Portfolio Ops"),
                "A rare blend of strategic clarity and execution discipline.",
            ),
        ]
    }
}

impl Schema for Testimonial {
    const COLLECTION: &'static str = "testimonial";

    fn validate(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body)?;
        let testimonial = Testimonial {
            author: fields.required_text("author"),
            role: fields.optional_text("role"),
            quote: fields.required_text("quote"),
        };
        fields.finish(testimonial)
    }
}
