/// One entry in a search-select result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Unique within a single result set
    pub id: String,
    /// Display text, also written into the input on commit
    pub label: String,
    /// Secondary line (e.g. job title)
    pub subtitle: Option<String>,
    /// Avatar location
    pub image_url: Option<String>,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            subtitle: None,
            image_url: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}
