//! Opinion records and the submission form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Longest accepted title, in characters.
pub const TITLE_MAX: usize = 128;

/// Longest accepted source URL, in characters.
pub const SOURCE_MAX: usize = 256;

/// A stored opinion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opinion {
    /// Row id.
    pub id: i64,
    /// Short headline.
    pub title: String,
    /// Body; unique across the table.
    pub text: String,
    /// Where the opinion comes from.
    pub source: Option<String>,
    /// Insertion time.
    pub timestamp: DateTime<Utc>,
}

/// A validated opinion not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOpinion {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) source: Option<String>,
}

impl NewOpinion {
    /// Title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source URL, if given.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub(crate) fn into_opinion(self, id: i64, timestamp: DateTime<Utc>) -> Opinion {
        Opinion {
            id,
            title: self.title,
            text: self.text,
            source: self.source,
            timestamp,
        }
    }
}

/// Raw submission, as posted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpinionForm {
    /// Required, 1 to 128 characters.
    #[serde(default)]
    pub title: String,
    /// Required.
    #[serde(default)]
    pub text: String,
    /// Optional URL of at most 256 characters; blank means absent.
    #[serde(default)]
    pub source: Option<String>,
}

impl OpinionForm {
    /// Check every field, collecting all failures.
    pub fn validate(self) -> Result<NewOpinion, ValidationErrors> {
        let mut errors = Vec::new();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            errors.push(FieldError::new("title", "This field is required."));
        } else if title.chars().count() > TITLE_MAX {
            errors.push(FieldError::new(
                "title",
                format!("Field must be between 1 and {TITLE_MAX} characters long."),
            ));
        }

        let text = self.text.trim().to_string();
        if text.is_empty() {
            errors.push(FieldError::new("text", "This field is required."));
        }

        let source = self
            .source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if let Some(source) = &source {
            if source.chars().count() > SOURCE_MAX {
                errors.push(FieldError::new(
                    "source",
                    format!("Field must be between 1 and {SOURCE_MAX} characters long."),
                ));
            } else if !is_url(source) {
                errors.push(FieldError::new("source", "Invalid URL."));
            }
        }

        if errors.is_empty() {
            Ok(NewOpinion {
                title,
                text,
                source,
            })
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Absolute URL whose host has a top-level domain.
fn is_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => url
            .host_str()
            .is_some_and(|host| host.contains('.') && !host.ends_with('.')),
        Err(_) => false,
    }
}

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name.
    pub field: &'static str,
    /// Reason.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every rejected field of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Rejected fields.
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
