use serde::{Deserialize, Serialize};

/// Kind of resource an item points at. Decides what happens when it is activated.
/// Serialized as its sheet text, so unknown kinds keep the same shape as known ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ContentType {
    Video,
    Document,
    Banner,
    Other(String),
}

impl ContentType {
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        match t.to_ascii_lowercase().as_str() {
            "video" => ContentType::Video,
            "document" => ContentType::Document,
            "banner" => ContentType::Banner,
            _ => ContentType::Other(t.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self { ContentType::Video => "video", ContentType::Document => "document", ContentType::Banner => "banner", ContentType::Other(s) => s.as_str() }
    }
}

impl From<String> for ContentType {
    fn from(s: String) -> Self { ContentType::parse(&s) }
}

impl From<ContentType> for String {
    fn from(t: ContentType) -> Self {
        match t { ContentType::Other(s) => s, known => known.as_str().to_string() }
    }
}

/// One educational resource as read from the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub category: String,
    pub description: String,
    pub video_url: Option<String>,
    pub duration: Option<String>,
    pub is_featured: bool,
    pub is_new: bool,
}

/// Fixed category buckets, in display order. `all` always comes first.
pub const CATEGORIES: [(&str, &str); 8] = [
    (ALL_CATEGORY, "All Categories"),
    ("ads", "Ads"),
    ("listings", "Listings"),
    ("onboarding", "Onboarding"),
    ("growth", "Business Growth"),
    ("disputes", "Disputes/Claims"),
    ("packaging", "Packaging Guidelines"),
    ("updates", "Updates/Policies"),
];

pub const ALL_CATEGORY: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub count: usize,
}

impl Category {
    /// The category list with every count at zero.
    pub fn defaults() -> Vec<Category> {
        CATEGORIES.iter().map(|(id, name)| Category { id: id.to_string(), name: name.to_string(), count: 0 }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn content_type_is_case_insensitive_and_keeps_unknown_text() {
        assert_eq!(ContentType::parse("Video"), ContentType::Video);
        assert_eq!(ContentType::parse(" DOCUMENT "), ContentType::Document);
        assert_eq!(ContentType::parse("banner"), ContentType::Banner);
        assert_eq!(ContentType::parse("Podcast"), ContentType::Other("Podcast".to_string()));
        assert_eq!(ContentType::parse("Podcast").as_str(), "Podcast");
    }

    #[test]
    fn content_type_serializes_as_plain_text() {
        assert_eq!(serde_json::to_value(ContentType::Video).unwrap(), serde_json::json!("video"));
        assert_eq!(serde_json::to_value(ContentType::Other("Podcast".into())).unwrap(), serde_json::json!("Podcast"));
        let back: ContentType = serde_json::from_str("\"Banner\"").unwrap();
        assert_eq!(back, ContentType::Banner);
    }

    #[test]
    fn item_json_keeps_type_a_string() {
        let item = ContentItem {
            id: "item-1".into(),
            title: "Live session".into(),
            kind: ContentType::Other("Podcast".into()),
            category: "growth".into(),
            description: String::new(),
            video_url: None,
            duration: None,
            is_featured: false,
            is_new: true,
        };
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["type"], serde_json::json!("Podcast"));
        assert_eq!(v["isNew"], serde_json::json!(true));
    }

    #[test]
    fn default_categories_start_with_all() {
        let cats = Category::defaults();
        assert_eq!(cats.len(), 8);
        assert_eq!(cats[0].id, "all");
        assert_eq!(cats[4].name, "Business Growth");
        assert!(cats.iter().all(|c| c.count == 0));
    }
}
