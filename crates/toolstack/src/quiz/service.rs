use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::answers::{QuizAnswers, QuizSubmission, QuizValidationError};
use super::engine::{
    CatalogSnapshot, QuizResult, Recommendation, RecommendationEngine, ScoringConfig,
    SnapshotError,
};
use super::recorder::{QuizResponseRecord, ResponseDispatcher};
use super::steps::{quiz_steps, QuizStepDefinition};
use crate::catalog::{CatalogRepository, Post, RepositoryError, Tool, ToolSlug};

/// Service composing the engine, the catalog store used for hydration, and
/// the response recorder.
pub struct QuizService<C> {
    engine: Arc<RecommendationEngine>,
    catalog: Arc<C>,
    responses: ResponseDispatcher,
}

impl<C> QuizService<C>
where
    C: CatalogRepository + 'static,
{
    pub fn new(
        engine: Arc<RecommendationEngine>,
        catalog: Arc<C>,
        responses: ResponseDispatcher,
    ) -> Self {
        Self {
            engine,
            catalog,
            responses,
        }
    }

    /// Build the engine from the tools currently published in `catalog`.
    pub fn from_catalog(
        catalog: Arc<C>,
        config: ScoringConfig,
        responses: ResponseDispatcher,
    ) -> Result<Self, QuizSetupError> {
        let tools = catalog.tools()?;
        let snapshot = CatalogSnapshot::from_tools(&tools)?;
        info!(
            items = snapshot.len(),
            categories = snapshot.categories().len(),
            "quiz catalog snapshot built"
        );

        let engine = Arc::new(RecommendationEngine::new(config, snapshot));
        Ok(Self::new(engine, catalog, responses))
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn steps(&self) -> &'static [QuizStepDefinition] {
        quiz_steps()
    }

    pub fn recommend(&self, answers: &QuizAnswers) -> QuizResult {
        self.engine.recommend(answers)
    }

    /// Validate a submission, rank the catalog, queue the response for
    /// analytics, and join the result with catalog records.
    pub fn submit(&self, submission: QuizSubmission) -> Result<QuizResponse, QuizServiceError> {
        let answers = submission.validate()?;
        let result = self.engine.recommend(&answers);

        self.responses.dispatch(QuizResponseRecord::new(answers, &result));

        Ok(self.hydrate(result))
    }

    /// Missing catalog records degrade to empty cards rather than failing the response.
    pub fn hydrate(&self, result: QuizResult) -> QuizResponse {
        let slugs: Vec<ToolSlug> = result
            .recommendations()
            .map(|recommendation| recommendation.slug.clone())
            .collect();

        let tools = self.catalog.tools_by_slugs(&slugs).unwrap_or_else(|err| {
            warn!(error = %err, "tool hydration failed; returning bare recommendations");
            Vec::new()
        });

        let related_posts = self
            .catalog
            .posts_by_slugs(&result.related_article_slugs)
            .unwrap_or_else(|err| {
                warn!(error = %err, "related post hydration failed");
                Vec::new()
            });

        let card = |recommendation: Recommendation| {
            let tool = tools
                .iter()
                .find(|tool| tool.slug == recommendation.slug)
                .cloned();
            if tool.is_none() {
                warn!(slug = %recommendation.slug, "recommended tool missing from catalog");
            }
            HydratedRecommendation {
                recommendation,
                tool,
            }
        };

        QuizResponse {
            top_pick: card(result.top_pick),
            alternatives: result.alternatives.into_iter().map(card).collect(),
            related_posts,
        }
    }
}

/// A recommendation joined with its catalog record, when the store still has it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydratedRecommendation {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub tool: Option<Tool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResponse {
    pub top_pick: HydratedRecommendation,
    pub alternatives: Vec<HydratedRecommendation>,
    pub related_posts: Vec<Post>,
}

#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error(transparent)]
    Validation(#[from] QuizValidationError),
}

/// Raised while wiring the service at startup.
#[derive(Debug, thiserror::Error)]
pub enum QuizSetupError {
    #[error(transparent)]
    Catalog(#[from] RepositoryError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
