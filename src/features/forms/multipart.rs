use axum::extract::Multipart;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::forms::StagedFile;

/// Text values and picked files collected from a multipart form post
#[derive(Debug, Default)]
pub struct FormFields {
    values: Vec<(String, String)>,
    files: Vec<(String, StagedFile)>,
}

impl FormFields {
    /// Drain a multipart body.
    ///
    /// File inputs left empty by the browser (no filename, no bytes) are
    /// skipped rather than staged.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut fields = FormFields::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Failed to read multipart data: {}", e))
        })? {
            let name = field.name().unwrap_or("").to_string();

            let file_name = field.file_name().map(|s| s.to_string());

            match file_name {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "application/octet-stream".to_string());

                    let data = field.bytes().await.map_err(|e| {
                        debug!("Failed to read file bytes: {}", e);
                        AppError::BadRequest(format!("Failed to read file data: {}", e))
                    })?;

                    if file_name.is_empty() && data.is_empty() {
                        continue;
                    }
                    fields.push_file(name, StagedFile::new(file_name, content_type, data));
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read field '{}': {}", name, e))
                    })?;
                    fields.push_text(name, text);
                }
            }
        }

        Ok(fields)
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.push((name.into(), value.into()));
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: StagedFile) {
        self.files.push((name.into(), file));
    }

    /// First non-blank value for `name`, trimmed
    pub fn text(&self, name: &str) -> Option<String> {
        self.values
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Trimmed value for `name`, empty when absent
    pub fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or_default()
    }

    /// Every non-blank value posted under `name`, in order
    pub fn all(&self, name: &str) -> Vec<String> {
        self.values
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Checkbox semantics: present with a truthy value
    pub fn flag(&self, name: &str) -> bool {
        self.text(name)
            .map(|v| matches!(v.to_lowercase().as_str(), "on" | "true" | "1" | "yes"))
            .unwrap_or(false)
    }

    /// Take the first file posted under `name`
    pub fn take_file(&mut self, name: &str) -> Option<StagedFile> {
        let index = self.files.iter().position(|(n, _)| n == name)?;
        Some(self.files.remove(index).1)
    }

    /// Take every file posted under `name`, in order
    pub fn take_files(&mut self, name: &str) -> Vec<StagedFile> {
        let (taken, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.files).into_iter().partition(|(n, _)| n == name);
        self.files = kept;
        taken.into_iter().map(|(_, file)| file).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::png_file;

    #[test]
    fn test_text_and_flags() {
        let mut fields = FormFields::default();
        fields.push_text("name", "  Foo ");
        fields.push_text("tagline", "   ");
        fields.push_text("featured", "on");
        fields.push_text("is_hiring", "false");

        assert_eq!(fields.text("name").as_deref(), Some("Foo"));
        assert_eq!(fields.text("tagline"), None);
        assert_eq!(fields.text_or_empty("missing"), "");
        assert!(fields.flag("featured"));
        assert!(!fields.flag("is_hiring"));
        assert!(!fields.flag("missing"));
    }

    #[test]
    fn test_repeated_values_and_files() {
        let mut fields = FormFields::default();
        fields.push_text("categories", "DeFi");
        fields.push_text("categories", "");
        fields.push_text("categories", "NFT");
        fields.push_file("gallery", png_file("a.png"));
        fields.push_file("logo", png_file("logo.png"));
        fields.push_file("gallery", png_file("b.png"));

        assert_eq!(fields.all("categories"), vec!["DeFi", "NFT"]);

        let gallery = fields.take_files("gallery");
        assert_eq!(
            gallery.iter().map(|f| f.file_name.as_str()).collect::<Vec<_>>(),
            vec!["a.png", "b.png"]
        );
        assert_eq!(fields.take_file("logo").unwrap().file_name, "logo.png");
        assert!(fields.take_file("logo").is_none());
    }
}
