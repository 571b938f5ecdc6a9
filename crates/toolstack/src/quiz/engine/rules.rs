use serde::Serialize;

use super::config::ScoringConfig;
use super::snapshot::CatalogItem;
use crate::quiz::answers::QuizAnswers;
use crate::quiz::steps::BudgetBracket;

/// Per-signal contributions for one item, kept for audits and the CLI explain view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SignalBreakdown {
    pub role: f32,
    pub goals: f32,
    pub technical: f32,
    pub workflow: f32,
    pub budget: f32,
}

impl SignalBreakdown {
    pub fn total(&self) -> f32 {
        self.role + self.goals + self.technical + self.workflow + self.budget
    }
}

pub(crate) fn score_item(
    item: &CatalogItem,
    answers: &QuizAnswers,
    config: &ScoringConfig,
) -> SignalBreakdown {
    let role = config.role_weight(answers.role, &item.category);

    let goals = answers
        .goals()
        .iter()
        .map(|goal| config.goal_weight(*goal, &item.category))
        .sum::<f32>();

    let technical = trait_bonus(
        item,
        config.technical_traits_for(answers.technical),
        config.weights.technical_trait_bonus,
    );

    let workflow = trait_bonus(
        item,
        config.workflow_traits_for(answers.workflow),
        config.weights.workflow_trait_bonus,
    );

    let budget = budget_adjustment(item, answers.budget, config);

    SignalBreakdown {
        role,
        goals,
        technical,
        workflow,
        budget,
    }
}

fn trait_bonus(item: &CatalogItem, wanted: &[String], per_trait: f32) -> f32 {
    let matches = wanted
        .iter()
        .filter(|name| item.traits.contains(name.as_str()))
        .count();
    matches as f32 * per_trait
}

fn budget_adjustment(
    item: &CatalogItem,
    bracket: Option<BudgetBracket>,
    config: &ScoringConfig,
) -> f32 {
    let ceiling = config.budget.ceiling_for(bracket);
    if !ceiling.admits(item.monthly_cost) {
        -config.weights.over_budget_penalty
    } else if bracket == Some(BudgetBracket::Free) && item.is_free() {
        config.weights.free_tier_bonus
    } else {
        0.0
    }
}
