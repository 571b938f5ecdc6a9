use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use super::domain::{Category, CategorySlug, Post, PostSlug, PostType, Tool, ToolSlug};
use super::repository::{CatalogRepository, RepositoryError};
use super::seed::CatalogSeed;

/// Process-local catalog store backed by the seed document.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    state: Arc<Mutex<CatalogState>>,
}

#[derive(Default)]
struct CatalogState {
    categories: Vec<Category>,
    tools: Vec<Tool>,
    posts: Vec<Post>,
}

impl InMemoryCatalog {
    pub fn from_seed(seed: CatalogSeed) -> Self {
        let CatalogSeed {
            mut categories,
            tools,
            posts,
        } = seed;
        categories.sort_by_key(|category| category.sort_order);

        Self {
            state: Arc::new(Mutex::new(CatalogState {
                categories,
                tools,
                posts,
            })),
        }
    }

    /// Drop every tool, keeping categories and posts; used before CSV re-imports.
    pub fn clear_tools(&self) {
        self.state
            .lock()
            .expect("catalog mutex poisoned")
            .tools
            .clear();
    }

    fn published_tools<F>(&self, filter: F) -> Vec<Tool>
    where
        F: Fn(&Tool) -> bool,
    {
        let guard = self.state.lock().expect("catalog mutex poisoned");
        guard
            .tools
            .iter()
            .filter(|tool| tool.published && filter(tool))
            .cloned()
            .collect()
    }

    fn published_posts<F>(&self, filter: F) -> Vec<Post>
    where
        F: Fn(&Post) -> bool,
    {
        let guard = self.state.lock().expect("catalog mutex poisoned");
        guard
            .posts
            .iter()
            .filter(|post| post.published && filter(post))
            .cloned()
            .collect()
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let guard = self.state.lock().expect("catalog mutex poisoned");
        Ok(guard.categories.clone())
    }

    fn category_by_slug(&self, slug: &CategorySlug) -> Result<Option<Category>, RepositoryError> {
        let guard = self.state.lock().expect("catalog mutex poisoned");
        Ok(guard
            .categories
            .iter()
            .find(|category| &category.slug == slug)
            .cloned())
    }

    fn tools(&self) -> Result<Vec<Tool>, RepositoryError> {
        Ok(self.published_tools(|_| true))
    }

    fn featured_tools(&self, limit: usize) -> Result<Vec<Tool>, RepositoryError> {
        let mut featured = self.published_tools(|tool| tool.featured);
        featured.sort_by(by_rating);
        featured.truncate(limit);
        Ok(featured)
    }

    fn tools_by_category(&self, category: &CategorySlug) -> Result<Vec<Tool>, RepositoryError> {
        let mut tools = self.published_tools(|tool| &tool.category == category);
        tools.sort_by(|a, b| b.featured.cmp(&a.featured).then_with(|| by_rating(a, b)));
        Ok(tools)
    }

    fn tool_by_slug(&self, slug: &ToolSlug) -> Result<Option<Tool>, RepositoryError> {
        let guard = self.state.lock().expect("catalog mutex poisoned");
        Ok(guard.tools.iter().find(|tool| &tool.slug == slug).cloned())
    }

    fn tools_by_slugs(&self, slugs: &[ToolSlug]) -> Result<Vec<Tool>, RepositoryError> {
        let published = self.published_tools(|tool| slugs.contains(&tool.slug));
        Ok(slugs
            .iter()
            .filter_map(|slug| published.iter().find(|tool| &tool.slug == slug))
            .cloned()
            .collect())
    }

    fn posts(&self) -> Result<Vec<Post>, RepositoryError> {
        Ok(self.published_posts(|_| true))
    }

    fn posts_by_type(&self, post_type: PostType) -> Result<Vec<Post>, RepositoryError> {
        Ok(self.published_posts(|post| post.post_type == post_type))
    }

    fn post_by_slug(&self, slug: &PostSlug) -> Result<Option<Post>, RepositoryError> {
        let guard = self.state.lock().expect("catalog mutex poisoned");
        Ok(guard.posts.iter().find(|post| &post.slug == slug).cloned())
    }

    fn posts_by_slugs(&self, slugs: &[PostSlug]) -> Result<Vec<Post>, RepositoryError> {
        let published = self.published_posts(|post| slugs.contains(&post.slug));
        Ok(slugs
            .iter()
            .filter_map(|slug| published.iter().find(|post| &post.slug == slug))
            .cloned()
            .collect())
    }

    fn featured_posts(&self, limit: usize) -> Result<Vec<Post>, RepositoryError> {
        let mut posts = self.published_posts(|_| true);
        // ids grow with publication, so the highest id is the newest post
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts.truncate(limit);
        Ok(posts)
    }

    fn upsert_tool(&self, tool: Tool) -> Result<(), RepositoryError> {
        let mut guard = self.state.lock().expect("catalog mutex poisoned");
        match guard.tools.iter_mut().find(|existing| existing.slug == tool.slug) {
            Some(existing) => *existing = tool,
            None => guard.tools.push(tool),
        }
        Ok(())
    }
}

/// Best rated first; unrated tools sort last.
fn by_rating(a: &Tool, b: &Tool) -> Ordering {
    let a = a.rating.unwrap_or(0.0);
    let b = b.rating.unwrap_or(0.0);
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
