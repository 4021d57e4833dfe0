use std::collections::HashMap;

use serde::Serialize;

use crate::parse::ParsedSheet;
use crate::types::{Category, ContentItem, ALL_CATEGORY};

/// Most items the featured strip shows.
pub const FEATURED_LIMIT: usize = 6;

/// One complete load: the items in sheet order plus the counts derived from them.
/// Never mutated after construction; a reload builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    items: Vec<ContentItem>,
    categories: Vec<Category>,
    skipped_rows: usize,
}

impl Default for Catalog {
    fn default() -> Self { Self::from_items(Vec::new()) }
}

impl From<ParsedSheet> for Catalog {
    fn from(sheet: ParsedSheet) -> Self {
        let mut c = Self::from_items(sheet.items);
        c.skipped_rows = sheet.skipped_rows;
        c
    }
}

impl Catalog {
    pub fn from_items(items: Vec<ContentItem>) -> Self {
        let categories = count_categories(&items);
        Self { items, categories, skipped_rows: 0 }
    }

    pub fn items(&self) -> &[ContentItem] { &self.items }
    pub fn categories(&self) -> &[Category] { &self.categories }
    pub fn skipped_rows(&self) -> usize { self.skipped_rows }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Up to [`FEATURED_LIMIT`] featured items, in sheet order.
    pub fn featured(&self) -> Vec<&ContentItem> {
        self.items.iter().filter(|i| i.is_featured).take(FEATURED_LIMIT).collect()
    }

    /// Everything for `all`, otherwise exact matches on the category field.
    pub fn by_category(&self, category_id: &str) -> Vec<&ContentItem> {
        if category_id == ALL_CATEGORY {
            return self.items.iter().collect();
        }
        self.items.iter().filter(|i| i.category == category_id).collect()
    }

    /// Items of `category_id` whose title or description contains `query`, ignoring case.
    /// The query is matched as typed; an empty one matches everything in the category.
    pub fn search(&self, category_id: &str, query: &str) -> Vec<&ContentItem> {
        let q = query.to_lowercase();
        self.by_category(category_id)
            .into_iter()
            .filter(|i| i.title.to_lowercase().contains(&q) || i.description.to_lowercase().contains(&q))
            .collect()
    }
}

fn count_categories(items: &[ContentItem]) -> Vec<Category> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.category.as_str()).or_default() += 1;
    }
    Category::defaults()
        .into_iter()
        .map(|mut c| {
            c.count = if c.id == ALL_CATEGORY { items.len() } else { counts.get(c.id.as_str()).copied().unwrap_or(0) };
            c
        })
        .collect()
}
