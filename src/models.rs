use serde::Deserialize;

/// Fields submitted from the create form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasteForm {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub custom_id: String,
}

/// A freshly created paste and its shareable link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub slug: String,
    pub url: String,
}
