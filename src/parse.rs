//! CSV sheet -> `ContentItem`s.
//!
//! The sheet export is read with a plain split on `,`: quotes are stripped from
//! every cell, so a comma inside a quoted value still splits the cell.

use std::collections::HashSet;

use crate::error::LoadError;
use crate::types::{ContentItem, ContentType};

const DELIMITER: char = ',';

/// Result of parsing one sheet export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSheet {
    pub items: Vec<ContentItem>,
    /// Non-blank data rows dropped because they had no title.
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Type,
    Category,
    Description,
    VideoUrl,
    Duration,
    IsFeatured,
    IsNew,
    Ignored,
}

impl Field {
    // Accepts both `video_url` and `videoUrl` spellings.
    fn from_header(h: &str) -> Self {
        let key: String = h.chars().filter(|c| *c != '_' && !c.is_whitespace()).collect::<String>().to_ascii_lowercase();
        match key.as_str() {
            "id" => Field::Id,
            "title" => Field::Title,
            "type" => Field::Type,
            "category" => Field::Category,
            "description" => Field::Description,
            "videourl" | "youtubeurl" => Field::VideoUrl,
            "duration" => Field::Duration,
            "isfeatured" => Field::IsFeatured,
            "isnew" => Field::IsNew,
            _ => Field::Ignored,
        }
    }
}

#[derive(Default)]
struct Row<'a> {
    id: &'a str,
    title: &'a str,
    kind: &'a str,
    category: &'a str,
    description: &'a str,
    video_url: &'a str,
    duration: &'a str,
    is_featured: &'a str,
    is_new: &'a str,
}

impl<'a> Row<'a> {
    fn from_cells(fields: &[Field], cells: &'a [String]) -> Self {
        let mut row = Row::default();
        for (i, field) in fields.iter().enumerate() {
            let value = cells.get(i).map(String::as_str).unwrap_or("");
            match field {
                Field::Id => row.id = value,
                Field::Title => row.title = value,
                Field::Type => row.kind = value,
                Field::Category => row.category = value,
                Field::Description => row.description = value,
                Field::VideoUrl => row.video_url = value,
                Field::Duration => row.duration = value,
                Field::IsFeatured => row.is_featured = value,
                Field::IsNew => row.is_new = value,
                Field::Ignored => {}
            }
        }
        row
    }
}

/// Parse a sheet export. The first line names the columns; every following
/// line is one record mapped onto those names by position.
///
/// Fails only when the header has no `title` column, which is what an HTML
/// error page or an unrelated sheet looks like.
pub fn parse(csv: &str) -> Result<ParsedSheet, LoadError> {
    let mut lines = csv.split('\n');
    let header = lines.next().unwrap_or("");
    let fields: Vec<Field> = split_cells(header).iter().map(|h| Field::from_header(h)).collect();
    if !fields.contains(&Field::Title) {
        return Err(LoadError::Parse("header row has no `title` column".to_string()));
    }

    let mut out = ParsedSheet::default();
    let mut seen = HashSet::new();
    for (index, line) in lines.enumerate() {
        let cells = split_cells(line);
        let row = Row::from_cells(&fields, &cells);
        if row.title.is_empty() {
            if cells.iter().any(|c| !c.is_empty()) { out.skipped_rows += 1; }
            continue;
        }
        let id = unique_id(row.id, index + 1, &mut seen);
        out.items.push(item_from_row(id, &row));
    }
    Ok(out)
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(DELIMITER).map(|v| v.replace('"', "").trim().to_string()).collect()
}

fn item_from_row(id: String, row: &Row<'_>) -> ContentItem {
    let kind = ContentType::parse(row.kind);
    let video_url = Some(row.video_url.to_string()).filter(|s| !s.is_empty() && kind == ContentType::Video);
    ContentItem {
        id,
        title: row.title.to_string(),
        kind,
        category: row.category.to_string(),
        description: row.description.to_string(),
        video_url,
        duration: Some(row.duration.to_string()).filter(|s| !s.is_empty()),
        is_featured: parse_flag(row.is_featured),
        is_new: parse_flag(row.is_new),
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

// Source ids win when present; otherwise the 1-based row position. Collisions get a suffix.
fn unique_id(source_id: &str, row: usize, seen: &mut HashSet<String>) -> String {
    let base = if source_id.is_empty() { format!("item-{row}") } else { source_id.to_string() };
    let mut id = base.clone();
    let mut n = 2;
    while !seen.insert(id.clone()) {
        id = format!("{base}-{n}");
        n += 1;
    }
    id
}
