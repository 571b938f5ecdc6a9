use std::collections::BTreeMap;

use super::config::{BudgetCeilings, CategoryWeights, ScoringConfig, SignalWeights};
use crate::catalog::{CategorySlug, PostSlug};
use crate::quiz::steps::{Goal, Role, TechnicalLevel, WorkflowPreference};

const PRODUCTIVITY: &str = "business-productivity";
const DESIGN: &str = "design-ux";
const NO_CODE: &str = "no-code";
const AUTOMATION: &str = "ai-automation";
const MARKETING: &str = "marketing";
const DEVELOPER: &str = "developer";

fn weights(entries: &[(&str, f32)]) -> CategoryWeights {
    entries
        .iter()
        .map(|(category, weight)| (CategorySlug::from(*category), *weight))
        .collect()
}

fn traits(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn articles(slugs: &[&str]) -> Vec<PostSlug> {
    slugs.iter().map(|slug| PostSlug::from(*slug)).collect()
}

impl ScoringConfig {
    /// Reference weighting for the site's six categories.
    pub fn standard() -> Self {
        let role_weights = BTreeMap::from([
            (
                Role::SoloCreator,
                weights(&[
                    (PRODUCTIVITY, 3.0),
                    (NO_CODE, 2.0),
                    (MARKETING, 2.0),
                    (AUTOMATION, 1.0),
                ]),
            ),
            (
                Role::StartupFounder,
                weights(&[
                    (NO_CODE, 3.0),
                    (AUTOMATION, 2.0),
                    (PRODUCTIVITY, 2.0),
                    (DESIGN, 1.0),
                ]),
            ),
            (Role::Designer, weights(&[(DESIGN, 4.0), (NO_CODE, 2.0)])),
            (
                Role::Marketer,
                weights(&[(MARKETING, 4.0), (AUTOMATION, 2.0), (NO_CODE, 1.0)]),
            ),
            (
                Role::Developer,
                weights(&[(DEVELOPER, 4.0), (AUTOMATION, 1.0)]),
            ),
            (
                Role::SmallBusiness,
                weights(&[
                    (PRODUCTIVITY, 3.0),
                    (MARKETING, 2.0),
                    (NO_CODE, 2.0),
                    (AUTOMATION, 1.0),
                ]),
            ),
            (
                Role::Student,
                weights(&[
                    (DESIGN, 2.0),
                    (PRODUCTIVITY, 2.0),
                    (NO_CODE, 2.0),
                    (DEVELOPER, 1.0),
                ]),
            ),
            (
                Role::Exploring,
                weights(&[
                    (PRODUCTIVITY, 1.0),
                    (DESIGN, 1.0),
                    (NO_CODE, 1.0),
                    (AUTOMATION, 1.0),
                    (MARKETING, 1.0),
                    (DEVELOPER, 1.0),
                ]),
            ),
        ]);

        let goal_weights = BTreeMap::from([
            (
                Goal::Automation,
                weights(&[(AUTOMATION, 3.0), (PRODUCTIVITY, 1.0)]),
            ),
            (Goal::Design, weights(&[(DESIGN, 3.0), (NO_CODE, 1.0)])),
            (Goal::NoCode, weights(&[(NO_CODE, 3.0), (DESIGN, 1.0)])),
            (Goal::Marketing, weights(&[(MARKETING, 3.0), (NO_CODE, 1.0)])),
            (Goal::ProjectMgmt, weights(&[(PRODUCTIVITY, 3.0)])),
            (
                Goal::MakeMoney,
                weights(&[(MARKETING, 2.0), (NO_CODE, 2.0), (AUTOMATION, 1.0)]),
            ),
            (
                Goal::Learn,
                weights(&[
                    (PRODUCTIVITY, 1.0),
                    (DESIGN, 1.0),
                    (NO_CODE, 1.0),
                    (AUTOMATION, 1.0),
                    (MARKETING, 1.0),
                    (DEVELOPER, 1.0),
                ]),
            ),
        ]);

        let technical_traits = BTreeMap::from([
            (
                TechnicalLevel::Beginner,
                traits(&["beginner-friendly", "simple", "visual", "no-code"]),
            ),
            (TechnicalLevel::Somewhat, traits(&["feature-rich", "visual"])),
            (
                TechnicalLevel::Very,
                traits(&["developer", "technical", "feature-rich"]),
            ),
        ]);

        let workflow_traits = BTreeMap::from([
            (
                WorkflowPreference::Simple,
                traits(&["simple", "beginner-friendly"]),
            ),
            (
                WorkflowPreference::FeatureRich,
                traits(&["feature-rich", "app-builder"]),
            ),
            (
                WorkflowPreference::AiFirst,
                traits(&["automation", "integration"]),
            ),
            (
                WorkflowPreference::Visual,
                traits(&["visual", "no-code", "website-builder"]),
            ),
        ]);

        let goal_articles = BTreeMap::from([
            (
                Goal::Automation,
                articles(&["zapier-vs-make-automation", "top-ai-productivity-tools"]),
            ),
            (
                Goal::Design,
                articles(&[
                    "canva-vs-figma",
                    "best-design-tools-for-startups",
                    "figma-vs-framer-vs-webflow",
                ]),
            ),
            (
                Goal::NoCode,
                articles(&[
                    "best-no-code-tools-2025",
                    "build-internal-dashboards-no-code",
                ]),
            ),
            (
                Goal::Marketing,
                articles(&["email-marketing-tools-guide", "saas-tools-for-solopreneurs"]),
            ),
            (
                Goal::ProjectMgmt,
                articles(&["notion-vs-linear-vs-asana", "saas-tools-for-solopreneurs"]),
            ),
            (
                Goal::MakeMoney,
                articles(&["saas-tools-for-solopreneurs", "best-no-code-tools-2025"]),
            ),
            (
                Goal::Learn,
                articles(&["best-free-saas-tools-2025", "best-no-code-tools-2025"]),
            ),
        ]);

        let role_articles = BTreeMap::from([
            (
                Role::SoloCreator,
                articles(&["saas-tools-for-solopreneurs", "best-free-saas-tools-2025"]),
            ),
            (
                Role::StartupFounder,
                articles(&[
                    "why-startups-need-supabase",
                    "best-no-code-tools-2025",
                    "notion-vs-linear-vs-asana",
                ]),
            ),
            (
                Role::Designer,
                articles(&[
                    "canva-vs-figma",
                    "best-design-tools-for-startups",
                    "figma-vs-framer-vs-webflow",
                ]),
            ),
            (
                Role::Marketer,
                articles(&["email-marketing-tools-guide", "saas-tools-for-solopreneurs"]),
            ),
            (
                Role::Developer,
                articles(&["why-startups-need-supabase", "top-ai-productivity-tools"]),
            ),
            (
                Role::SmallBusiness,
                articles(&[
                    "saas-tools-for-solopreneurs",
                    "build-internal-dashboards-no-code",
                ]),
            ),
            (
                Role::Student,
                articles(&[
                    "best-free-saas-tools-2025",
                    "best-design-tools-for-startups",
                ]),
            ),
            (
                Role::Exploring,
                articles(&["best-free-saas-tools-2025", "top-ai-productivity-tools"]),
            ),
        ]);

        let category_blurbs = [
            (
                PRODUCTIVITY,
                "Streamlines your daily workflow and keeps you organized.",
            ),
            (DESIGN, "Helps you design and prototype with ease."),
            (NO_CODE, "Build without code — ship faster."),
            (AUTOMATION, "Automates repetitive tasks so you can focus."),
            (MARKETING, "Gets your message in front of the right people."),
            (DEVELOPER, "Developer-grade tooling with excellent DX."),
        ]
        .into_iter()
        .map(|(category, blurb)| (CategorySlug::from(category), blurb.to_string()))
        .collect();

        Self {
            role_weights,
            goal_weights,
            technical_traits,
            workflow_traits,
            goal_articles,
            role_articles,
            category_blurbs,
            weights: SignalWeights::default(),
            budget: BudgetCeilings::default(),
        }
    }
}
