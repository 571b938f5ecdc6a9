use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{CategorySlug, PostSlug};
use crate::quiz::steps::{BudgetBracket, Goal, Role, TechnicalLevel, WorkflowPreference};

/// Category slug to additive weight.
pub type CategoryWeights = BTreeMap<CategorySlug, f32>;

/// Weight tables and tunables injected into the engine.
///
/// Every table is keyed by a step's option enum, so a missing entry is the
/// only way a value can contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub role_weights: BTreeMap<Role, CategoryWeights>,
    pub goal_weights: BTreeMap<Goal, CategoryWeights>,
    pub technical_traits: BTreeMap<TechnicalLevel, Vec<String>>,
    pub workflow_traits: BTreeMap<WorkflowPreference, Vec<String>>,
    pub goal_articles: BTreeMap<Goal, Vec<PostSlug>>,
    pub role_articles: BTreeMap<Role, Vec<PostSlug>>,
    /// Generic justification used when no answer-specific fragment applies.
    pub category_blurbs: BTreeMap<CategorySlug, String>,
    pub weights: SignalWeights,
    pub budget: BudgetCeilings,
}

/// Magnitudes of the trait and budget signals.
///
/// The workflow bonus stays above the technical bonus, and the over-budget
/// penalty must outweigh any plausible sum of the other signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    pub technical_trait_bonus: f32,
    pub workflow_trait_bonus: f32,
    pub over_budget_penalty: f32,
    pub free_tier_bonus: f32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            technical_trait_bonus: 1.5,
            workflow_trait_bonus: 2.0,
            over_budget_penalty: 5.0,
            free_tier_bonus: 1.0,
        }
    }
}

/// Monthly spend thresholds behind the paid budget brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCeilings {
    pub under_20: u32,
    pub from_20_to_100: u32,
}

impl Default for BudgetCeilings {
    fn default() -> Self {
        Self {
            under_20: 20,
            from_20_to_100: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetCeiling {
    Limited(u32),
    Unbounded,
}

impl BudgetCeiling {
    pub fn admits(self, monthly_cost: u32) -> bool {
        match self {
            BudgetCeiling::Limited(max) => monthly_cost <= max,
            BudgetCeiling::Unbounded => true,
        }
    }
}

impl BudgetCeilings {
    /// An unanswered budget step imposes no ceiling.
    pub fn ceiling_for(&self, bracket: Option<BudgetBracket>) -> BudgetCeiling {
        match bracket {
            Some(BudgetBracket::Free) => BudgetCeiling::Limited(0),
            Some(BudgetBracket::Under20) => BudgetCeiling::Limited(self.under_20),
            Some(BudgetBracket::From20To100) => BudgetCeiling::Limited(self.from_20_to_100),
            Some(BudgetBracket::NoLimit) | None => BudgetCeiling::Unbounded,
        }
    }
}

impl ScoringConfig {
    pub fn role_weight(&self, role: Option<Role>, category: &CategorySlug) -> f32 {
        role.and_then(|role| self.role_weights.get(&role))
            .and_then(|weights| weights.get(category))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn goal_weight(&self, goal: Goal, category: &CategorySlug) -> f32 {
        self.goal_weights
            .get(&goal)
            .and_then(|weights| weights.get(category))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn technical_traits_for(&self, level: Option<TechnicalLevel>) -> &[String] {
        level
            .and_then(|level| self.technical_traits.get(&level))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn workflow_traits_for(&self, workflow: Option<WorkflowPreference>) -> &[String] {
        workflow
            .and_then(|workflow| self.workflow_traits.get(&workflow))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
