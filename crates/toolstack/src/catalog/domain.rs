use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog tool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolSlug(pub String);

/// Stable identifier of an article, review, or comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostSlug(pub String);

/// Primary classification bucket; every tool belongs to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySlug(pub String);

macro_rules! slug_conversions {
    ($($ty:ident),*) => {
        $(
            impl From<&str> for $ty {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl $ty {
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

slug_conversions!(ToolSlug, PostSlug, CategorySlug);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub slug: CategorySlug,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: u16,
}

/// Directory entry for a SaaS tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: u32,
    pub slug: ToolSlug,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    pub category: CategorySlug,
    /// Free-form descriptive tags used for matching beyond the category.
    #[serde(default)]
    pub traits: BTreeSet<String>,
    /// Approximate monthly cost of the entry paid tier; 0 when a usable free tier exists.
    #[serde(default)]
    pub monthly_cost: u32,
    #[serde(default)]
    pub pricing_summary: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub affiliate_url: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "published_by_default")]
    pub published: bool,
}

impl Tool {
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }

    pub fn is_free(&self) -> bool {
        self.monthly_cost == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Article,
    Review,
    Comparison,
}

impl PostType {
    pub const fn label(self) -> &'static str {
        match self {
            PostType::Article => "article",
            PostType::Review => "review",
            PostType::Comparison => "comparison",
        }
    }
}

/// Editorial content: guides, reviews, and head-to-head comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u32,
    pub slug: PostSlug,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub post_type: PostType,
    #[serde(default)]
    pub category: Option<CategorySlug>,
    /// Tools the post covers, in display order.
    #[serde(default)]
    pub tool_slugs: Vec<ToolSlug>,
    #[serde(default = "published_by_default")]
    pub published: bool,
}

fn published_by_default() -> bool {
    true
}
