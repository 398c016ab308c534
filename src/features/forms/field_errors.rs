use std::collections::BTreeMap;
use std::fmt;

use reqwest::Url;
use serde::Serialize;
use validator::ValidationErrors;

/// Field-level validation failures, keyed by form field name.
///
/// Independent of any rendering: templates look messages up by field name,
/// the JSON error body flattens them with [`FieldErrors::messages`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Flattened "field: message" lines
    pub fn messages(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{}: {}", field, m)))
            .collect()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Require a well-formed URL in `field` when `required` is set.
    ///
    /// When not required the value is ignored entirely, so a stale value left
    /// behind by an earlier toggle never blocks submission.
    pub fn conditional_url(
        &mut self,
        field: &str,
        label: &str,
        required: bool,
        value: Option<&str>,
    ) {
        if !required {
            return;
        }
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => self.add(field, format!("{} is required", label)),
            Some(url) if Url::parse(url).is_err() => {
                self.add(field, format!("{} must be a valid URL", label))
            }
            Some(_) => {}
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(url(message = "Website must be a valid URL"))]
        website: Option<String>,
    }

    #[test]
    fn test_from_validation_errors_keeps_field_and_message() {
        let sample = Sample {
            name: String::new(),
            website: Some("not a url".to_string()),
        };
        let errors = FieldErrors::from(sample.validate().unwrap_err());

        assert_eq!(errors.fields(), vec!["name", "website"]);
        assert_eq!(errors.get("name").unwrap(), ["Name is required"]);
        assert_eq!(errors.get("website").unwrap(), ["Website must be a valid URL"]);
    }

    #[test]
    fn test_conditional_url() {
        let mut errors = FieldErrors::default();
        errors.conditional_url("career_page_url", "Career page URL", false, Some("garbage"));
        assert!(errors.is_empty());

        errors.conditional_url("career_page_url", "Career page URL", true, Some("   "));
        assert_eq!(
            errors.get("career_page_url").unwrap(),
            ["Career page URL is required"]
        );

        let mut errors = FieldErrors::default();
        errors.conditional_url("github_url", "GitHub URL", true, Some("github"));
        assert_eq!(errors.get("github_url").unwrap(), ["GitHub URL must be a valid URL"]);

        let mut errors = FieldErrors::default();
        errors.conditional_url("github_url", "GitHub URL", true, Some("https://github.com/x"));
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn test_messages_flatten() {
        let mut errors = FieldErrors::default();
        errors.add("b", "second");
        errors.add("a", "first");
        assert_eq!(errors.messages(), vec!["a: first", "b: second"]);
        assert_eq!(errors.to_string(), "a: first; b: second");
    }
}
