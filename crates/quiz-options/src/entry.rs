//! Input placeholders and canonical entries

use serde::{Deserialize, Serialize};

/// Raw per-entry input: text plus an optional attachment name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// Display text
    pub text: String,
    /// Name of the attachment holding this entry's image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
}

impl Placeholder {
    /// Create a placeholder without an image
    #[inline]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_name: None,
        }
    }

    /// With image attachment name
    #[inline]
    #[must_use]
    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.image_name = Some(name.into());
        self
    }

    /// Attachment name, treating an empty name as absent
    #[inline]
    #[must_use]
    pub fn image_name(&self) -> Option<&str> {
        self.image_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Persisted per-entry unit of a canonical document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Ordinal within its sequence
    #[serde(rename = "optId")]
    pub id: u32,
    /// Display text
    #[serde(rename = "txt")]
    pub text: String,
    /// Image id owned by the files service
    #[serde(rename = "imId", default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    /// Public URL of the image
    #[serde(rename = "imUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl OptionEntry {
    /// Create an entry without an image
    #[inline]
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            image_id: None,
            image_url: None,
        }
    }

    /// Attach a resolved image
    #[inline]
    pub fn attach_image(&mut self, image_id: impl Into<String>, image_url: impl Into<String>) {
        self.image_id = Some(image_id.into());
        self.image_url = Some(image_url.into());
    }

    /// Image id, treating an empty id as absent
    #[inline]
    #[must_use]
    pub fn image_id(&self) -> Option<&str> {
        self.image_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_image_name_counts_as_absent() {
        let p: Placeholder = serde_json::from_str(r#"{"text":"a","imageName":""}"#).unwrap();
        assert_eq!(p.image_name(), None);

        let p = Placeholder::new("b").with_image("img");
        assert_eq!(p.image_name(), Some("img"));
    }

    #[test]
    fn entry_without_image_omits_image_keys() {
        let entry = OptionEntry::new(1, "Right");
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"optId":1,"txt":"Right"}"#
        );
    }

    #[test]
    fn entry_with_image_uses_short_keys() {
        let mut entry = OptionEntry::new(0, "Left");
        entry.attach_image("U1", "http://x/U1");
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"optId":0,"txt":"Left","imId":"U1","imUrl":"http://x/U1"}"#
        );
    }

    #[test]
    fn empty_stored_image_id_is_ignored() {
        let entry: OptionEntry = serde_json::from_str(r#"{"optId":0,"txt":"a","imId":""}"#).unwrap();
        assert_eq!(entry.image_id(), None);
    }
}
