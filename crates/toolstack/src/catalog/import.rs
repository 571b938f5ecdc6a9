use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{CategorySlug, Tool, ToolSlug};

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read tools export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid tools CSV data: {}", err),
            CatalogImportError::InvalidRow { line, reason } => {
                write!(f, "tools CSV row on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads the admin tools export (one row per tool, traits `;`-separated).
pub struct CatalogCsvImporter;

impl CatalogCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Tool>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Tool>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut tools = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let headers = csv_reader.headers()?.clone();
        for record in csv_reader.records() {
            let record = record?;
            // quoted fields may span lines, so ask the reader where the row began
            let line = record.position().map_or(0, |position| position.line());
            let row: ToolRow = record.deserialize(Some(&headers))?;

            let slug = row.slug.trim().to_ascii_lowercase();
            if slug.is_empty() {
                return Err(CatalogImportError::InvalidRow {
                    line,
                    reason: "slug is required".to_string(),
                });
            }
            if row.category.trim().is_empty() {
                return Err(CatalogImportError::InvalidRow {
                    line,
                    reason: format!("tool '{slug}' has no category"),
                });
            }
            if !seen.insert(slug.clone()) {
                return Err(CatalogImportError::InvalidRow {
                    line,
                    reason: format!("duplicate slug '{slug}'"),
                });
            }

            let id = row.id.unwrap_or(tools.len() as u32 + 1);
            tools.push(row.into_tool(id, slug));
        }

        Ok(tools)
    }
}

#[derive(Debug, Deserialize)]
struct ToolRow {
    #[serde(default)]
    id: Option<u32>,
    slug: String,
    name: String,
    category: String,
    #[serde(default)]
    traits: String,
    #[serde(default)]
    monthly_cost: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tagline: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pricing_summary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    website_url: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    featured: bool,
    #[serde(default = "default_published", deserialize_with = "flag_or_true")]
    published: bool,
}

impl ToolRow {
    fn into_tool(self, id: u32, slug: String) -> Tool {
        let traits: BTreeSet<String> = self
            .traits
            .split(';')
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .collect();

        Tool {
            id,
            slug: ToolSlug(slug),
            name: self.name,
            tagline: self.tagline.unwrap_or_default(),
            description: String::new(),
            category: CategorySlug(self.category.trim().to_ascii_lowercase()),
            traits,
            monthly_cost: self.monthly_cost.unwrap_or(0),
            pricing_summary: self.pricing_summary.unwrap_or_default(),
            website_url: self.website_url.unwrap_or_default(),
            affiliate_url: String::new(),
            rating: None,
            featured: self.featured,
            published: self.published,
        }
    }
}

fn default_published() -> bool {
    true
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_flag).unwrap_or(false))
}

fn flag_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_flag).unwrap_or(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EXPORT: &str = "slug,name,category,traits,monthly_cost,tagline,featured,published\n\
        notion,Notion,business-productivity,simple; Beginner-Friendly ;free-tier,0,All-in-one workspace,yes,\n\
        webflow,Webflow,no-code,no-code;visual,18,,no,true\n\
        draft-tool,Draft,developer,,,,,false\n";

    #[test]
    fn parses_traits_costs_and_flags() {
        let tools = CatalogCsvImporter::from_reader(Cursor::new(EXPORT)).expect("import succeeds");
        assert_eq!(tools.len(), 3);

        let notion = &tools[0];
        assert_eq!(notion.id, 1);
        assert!(notion.has_trait("beginner-friendly"));
        assert_eq!(notion.traits.len(), 3);
        assert!(notion.featured);
        assert!(notion.published);
        assert_eq!(notion.tagline, "All-in-one workspace");

        let webflow = &tools[1];
        assert_eq!(webflow.monthly_cost, 18);
        assert!(webflow.tagline.is_empty());
        assert!(!webflow.featured);

        let draft = &tools[2];
        assert!(draft.traits.is_empty());
        assert_eq!(draft.monthly_cost, 0);
        assert!(!draft.published);
    }

    #[test]
    fn rejects_rows_without_category() {
        let export = "slug,name,category\nmystery,Mystery,\n";
        match CatalogCsvImporter::from_reader(Cursor::new(export)) {
            Err(CatalogImportError::InvalidRow { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("mystery"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn invalid_row_line_accounts_for_multiline_fields() {
        let export = "slug,name,category,tagline\n\
            retool,Retool,no-code,\"Internal tools,\nfast\"\n\
            ,Nameless,no-code,\n";
        match CatalogCsvImporter::from_reader(Cursor::new(export)) {
            Err(CatalogImportError::InvalidRow { line, reason }) => {
                assert_eq!(line, 4);
                assert_eq!(reason, "slug is required");
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let export = "slug,name,category\nloom,Loom,business-productivity\nLoom,Loom Again,business-productivity\n";
        let err = CatalogCsvImporter::from_reader(Cursor::new(export)).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate slug 'loom'"));
    }
}
