use super::domain::{Category, CategorySlug, Post, PostSlug, PostType, Tool, ToolSlug};

/// Read access to the content store, plus the single write path used by imports.
///
/// Lookups that return collections only include published records. Bulk slug
/// lookups keep the caller's order and silently skip slugs that are missing,
/// since the scoring snapshot and the live store are not guaranteed to agree.
pub trait CatalogRepository: Send + Sync {
    fn categories(&self) -> Result<Vec<Category>, RepositoryError>;
    fn category_by_slug(&self, slug: &CategorySlug) -> Result<Option<Category>, RepositoryError>;
    /// Published tools in catalog order.
    fn tools(&self) -> Result<Vec<Tool>, RepositoryError>;
    /// Published featured tools, best rated first.
    fn featured_tools(&self, limit: usize) -> Result<Vec<Tool>, RepositoryError>;
    /// Published tools in one category, featured first, then best rated.
    fn tools_by_category(&self, category: &CategorySlug) -> Result<Vec<Tool>, RepositoryError>;
    fn tool_by_slug(&self, slug: &ToolSlug) -> Result<Option<Tool>, RepositoryError>;
    fn tools_by_slugs(&self, slugs: &[ToolSlug]) -> Result<Vec<Tool>, RepositoryError>;
    fn posts(&self) -> Result<Vec<Post>, RepositoryError>;
    fn posts_by_type(&self, post_type: PostType) -> Result<Vec<Post>, RepositoryError>;
    fn post_by_slug(&self, slug: &PostSlug) -> Result<Option<Post>, RepositoryError>;
    fn posts_by_slugs(&self, slugs: &[PostSlug]) -> Result<Vec<Post>, RepositoryError>;
    /// Most recent published posts.
    fn featured_posts(&self, limit: usize) -> Result<Vec<Post>, RepositoryError>;
    /// Tools linked from a post, in the post's order.
    fn tools_for_post(&self, post: &Post) -> Result<Vec<Tool>, RepositoryError> {
        self.tools_by_slugs(&post.tool_slugs)
    }
    /// Insert or replace a tool keyed by slug.
    fn upsert_tool(&self, tool: Tool) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
