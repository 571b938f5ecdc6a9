mod config;
mod reasons;
mod related;
mod rules;
mod selection;
mod snapshot;
mod tables;

pub use config::{BudgetCeiling, BudgetCeilings, CategoryWeights, ScoringConfig, SignalWeights};
pub use related::MAX_RELATED;
pub use rules::SignalBreakdown;
pub use selection::{DIVERSE_ALTERNATIVES, MAX_ALTERNATIVES};
pub use snapshot::{CatalogItem, CatalogSnapshot, SnapshotError};

use serde::Serialize;

use super::answers::QuizAnswers;
use crate::catalog::{CategorySlug, PostSlug, ToolSlug};

/// Stateless recommender applying the scoring tables to a catalog snapshot.
///
/// Recommending is pure: the same answers against the same snapshot always
/// produce the same result, and no input makes it fail.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: ScoringConfig,
    catalog: CatalogSnapshot,
}

impl RecommendationEngine {
    pub fn new(config: ScoringConfig, catalog: CatalogSnapshot) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// Every catalog item, best first. Equal scores keep snapshot order.
    pub fn rank(&self, answers: &QuizAnswers) -> Vec<ScoredItem> {
        let mut ranked: Vec<ScoredItem> = self
            .catalog
            .items()
            .iter()
            .map(|item| {
                let breakdown = rules::score_item(item, answers, &self.config);
                ScoredItem {
                    slug: item.slug.clone(),
                    category: item.category.clone(),
                    monthly_cost: item.monthly_cost,
                    score: breakdown.total(),
                    breakdown,
                }
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    pub fn recommend(&self, answers: &QuizAnswers) -> QuizResult {
        let ranked = self.rank(answers);
        let (top, rest) = ranked
            .split_first()
            .expect("catalog snapshot holds at least one item");

        let top_pick = self.recommendation(top, answers);
        let alternatives = selection::select_alternatives(top, rest)
            .into_iter()
            .map(|item| self.recommendation(item, answers))
            .collect();

        QuizResult {
            top_pick,
            alternatives,
            related_article_slugs: related::related_articles(answers, &self.config),
        }
    }

    fn recommendation(&self, scored: &ScoredItem, answers: &QuizAnswers) -> Recommendation {
        Recommendation {
            slug: scored.slug.clone(),
            score: scored.score,
            reason: reasons::compose_reason(scored, answers, &self.config),
        }
    }
}

/// One ranked item with the signals that produced its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    pub slug: ToolSlug,
    pub category: CategorySlug,
    pub monthly_cost: u32,
    pub score: f32,
    pub breakdown: SignalBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub slug: ToolSlug,
    pub score: f32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    pub top_pick: Recommendation,
    pub alternatives: Vec<Recommendation>,
    pub related_article_slugs: Vec<PostSlug>,
}

impl QuizResult {
    /// Top pick followed by alternatives.
    pub fn recommendations(&self) -> impl Iterator<Item = &Recommendation> {
        std::iter::once(&self.top_pick).chain(self.alternatives.iter())
    }
}
