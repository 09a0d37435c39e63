use crate::codec::{encode, encode_all};
use crate::db::Db;
use crate::error::CoreError;
use crate::store::Document;
use super::ResourceFields;
use serde_json::{Number, Value};
use url::Url;

/// Validated, sanitized fields ready to store: description and keywords are
/// escaped, the link is sanitized only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CleanFields {
    pub(crate) description: String,
    pub(crate) keywords: Vec<String>,
    pub(crate) link: String,
}

impl CleanFields {
    pub(crate) fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert("description".to_string(), Value::String(self.description.clone()));
        document.insert(
            "keywords".to_string(),
            Value::Array(self.keywords.iter().cloned().map(Value::String).collect()),
        );
        document.insert("link".to_string(), Value::String(self.link.clone()));
        document
    }
}

pub(crate) fn validate_fields(db: &Db, fields: &ResourceFields) -> Result<CleanFields, CoreError> {
    let description = fields
        .description
        .as_deref()
        .map(|text| db.sanitize(text))
        .filter(|text| !text.is_empty())
        .ok_or_else(|| CoreError::validation("description is required"))?;

    let raw_keywords = fields
        .keywords
        .as_deref()
        .filter(|keywords| !keywords.is_empty())
        .ok_or_else(|| CoreError::validation("at least one keyword is required"))?;
    let mut keywords = Vec::with_capacity(raw_keywords.len());
    for keyword in raw_keywords {
        let clean = db.sanitize(keyword);
        if clean.is_empty() {
            return Err(CoreError::validation(format!("keyword {keyword:?} is empty")));
        }
        keywords.push(clean);
    }

    let link = fields
        .link
        .as_deref()
        .map(|text| db.sanitize(text))
        .ok_or_else(|| CoreError::validation("link is required"))?;
    Url::parse(&link).map_err(|e| CoreError::validation(format!("link {link:?} is not a URL: {e}")))?;

    Ok(CleanFields {
        description: encode(&description),
        keywords: encode_all(&keywords),
        link,
    })
}

pub(crate) fn validate_created_at(created_at: Option<&Number>) -> Result<Number, CoreError> {
    created_at
        .cloned()
        .ok_or_else(|| CoreError::validation("createdAt must be a number"))
}
