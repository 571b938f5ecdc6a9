use super::config::ScoringConfig;
use super::ScoredItem;
use crate::quiz::answers::QuizAnswers;
use crate::quiz::steps::{BudgetBracket, Role, WorkflowPreference};

const MAX_FRAGMENTS: usize = 2;
const FALLBACK_REASON: &str = "A solid tool for your stack.";
const FREE_TIER_FRAGMENT: &str = "Has a genuinely usable free tier.";

fn role_fragment(role: Role) -> &'static str {
    match role {
        Role::SoloCreator => "Perfect for independent creators who need one tool to do it all.",
        Role::StartupFounder => "Built for founders who move fast and validate quickly.",
        Role::Designer => "Designed specifically for creative and design workflows.",
        Role::Marketer => "Focused on reaching and converting your audience.",
        Role::Developer => "Made by developers, for developers.",
        Role::SmallBusiness => "Helps small teams punch above their weight.",
        Role::Student => "Generous free tier — ideal for learning.",
        Role::Exploring => "Great starting point with a low barrier to entry.",
    }
}

fn workflow_fragment(workflow: WorkflowPreference) -> &'static str {
    match workflow {
        WorkflowPreference::Simple => "Clean and minimal — no bloat.",
        WorkflowPreference::FeatureRich => "Packed with features for power users.",
        WorkflowPreference::AiFirst => "Smart AI features that save real time.",
        WorkflowPreference::Visual => "Visual-first — no coding required.",
    }
}

/// Short justification for recommending `item` to someone with `answers`.
///
/// Fragments are considered in role, workflow, budget order and at most two
/// are kept. With none applicable the category blurb is used instead.
pub(crate) fn compose_reason(
    item: &ScoredItem,
    answers: &QuizAnswers,
    config: &ScoringConfig,
) -> String {
    let free_fit = answers.budget == Some(BudgetBracket::Free) && item.monthly_cost == 0;
    let budget_fragment = free_fit.then_some(FREE_TIER_FRAGMENT);

    let fragments: Vec<&str> = [
        answers.role.map(role_fragment),
        answers.workflow.map(workflow_fragment),
        budget_fragment,
    ]
    .into_iter()
    .flatten()
    .take(MAX_FRAGMENTS)
    .collect();

    if !fragments.is_empty() {
        return fragments.join(" ");
    }

    config
        .category_blurbs
        .get(&item.category)
        .cloned()
        .unwrap_or_else(|| FALLBACK_REASON.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategorySlug, ToolSlug};
    use crate::quiz::engine::SignalBreakdown;
    use crate::quiz::steps::TechnicalLevel;

    fn item(category: &str, monthly_cost: u32) -> ScoredItem {
        ScoredItem {
            slug: ToolSlug::from("sample"),
            category: CategorySlug::from(category),
            monthly_cost,
            score: 0.0,
            breakdown: SignalBreakdown::default(),
        }
    }

    fn free_item(category: &str) -> ScoredItem {
        item(category, 0)
    }

    #[test]
    fn keeps_first_two_fragments_in_order() {
        let config = ScoringConfig::standard();
        let answers = QuizAnswers::new(
            Some(Role::Student),
            [],
            None,
            Some(BudgetBracket::Free),
            Some(WorkflowPreference::Simple),
        );
        assert_eq!(
            compose_reason(&free_item("design-ux"), &answers, &config),
            "Generous free tier — ideal for learning. Clean and minimal — no bloat."
        );
    }

    #[test]
    fn free_tier_fragment_needs_free_bracket_and_free_item() {
        let config = ScoringConfig::standard();
        let answers = QuizAnswers::new(
            None,
            [],
            None,
            Some(BudgetBracket::Free),
            Some(WorkflowPreference::Visual),
        );
        assert_eq!(
            compose_reason(&free_item("no-code"), &answers, &config),
            "Visual-first — no coding required. Has a genuinely usable free tier."
        );

        let paid = item("no-code", 18);
        assert_eq!(
            compose_reason(&paid, &answers, &config),
            "Visual-first — no coding required."
        );
    }

    #[test]
    fn falls_back_to_category_blurb_then_generic_sentence() {
        let config = ScoringConfig::standard();
        let answers = QuizAnswers::new(None, [], Some(TechnicalLevel::Very), None, None);
        assert_eq!(
            compose_reason(&free_item("developer"), &answers, &config),
            "Developer-grade tooling with excellent DX."
        );
        assert_eq!(
            compose_reason(&free_item("no-code"), &answers, &config),
            "Build without code — ship faster."
        );
        assert_eq!(
            compose_reason(&free_item("unlisted"), &answers, &config),
            FALLBACK_REASON
        );
    }
}
