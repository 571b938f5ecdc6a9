use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Identifies which answer field a step populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Role,
    Goals,
    Technical,
    Budget,
    Workflow,
}

impl StepId {
    pub const ALL: [StepId; 5] = [
        StepId::Role,
        StepId::Goals,
        StepId::Technical,
        StepId::Budget,
        StepId::Workflow,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            StepId::Role => "role",
            StepId::Goals => "goals",
            StepId::Technical => "technical",
            StepId::Budget => "budget",
            StepId::Workflow => "workflow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Single,
    Multi,
}

/// Closed option set for one quiz step.
pub trait StepOption: Copy + Eq + 'static {
    const STEP: StepId;

    fn all() -> &'static [Self];
    /// Wire value; the only thing the engine scores.
    fn value(self) -> &'static str;
    /// Display text.
    fn label(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all()
            .iter()
            .copied()
            .find(|option| option.value().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SoloCreator,
    StartupFounder,
    Designer,
    Marketer,
    Developer,
    SmallBusiness,
    Student,
    Exploring,
}

impl StepOption for Role {
    const STEP: StepId = StepId::Role;

    fn all() -> &'static [Self] {
        &[
            Role::SoloCreator,
            Role::StartupFounder,
            Role::Designer,
            Role::Marketer,
            Role::Developer,
            Role::SmallBusiness,
            Role::Student,
            Role::Exploring,
        ]
    }

    fn value(self) -> &'static str {
        match self {
            Role::SoloCreator => "solo-creator",
            Role::StartupFounder => "startup-founder",
            Role::Designer => "designer",
            Role::Marketer => "marketer",
            Role::Developer => "developer",
            Role::SmallBusiness => "small-business",
            Role::Student => "student",
            Role::Exploring => "exploring",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Role::SoloCreator => "Solo creator / freelancer",
            Role::StartupFounder => "Startup founder",
            Role::Designer => "Designer",
            Role::Marketer => "Marketer",
            Role::Developer => "Developer",
            Role::SmallBusiness => "Small business owner",
            Role::Student => "Student",
            Role::Exploring => "Just exploring",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    Automation,
    Design,
    NoCode,
    Marketing,
    ProjectMgmt,
    MakeMoney,
    Learn,
}

impl StepOption for Goal {
    const STEP: StepId = StepId::Goals;

    fn all() -> &'static [Self] {
        &[
            Goal::Automation,
            Goal::Design,
            Goal::NoCode,
            Goal::Marketing,
            Goal::ProjectMgmt,
            Goal::MakeMoney,
            Goal::Learn,
        ]
    }

    fn value(self) -> &'static str {
        match self {
            Goal::Automation => "automation",
            Goal::Design => "design",
            Goal::NoCode => "no-code",
            Goal::Marketing => "marketing",
            Goal::ProjectMgmt => "project-mgmt",
            Goal::MakeMoney => "make-money",
            Goal::Learn => "learn",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Goal::Automation => "Save time with automation",
            Goal::Design => "Design better products",
            Goal::NoCode => "Build websites/apps without code",
            Goal::Marketing => "Grow audience / marketing",
            Goal::ProjectMgmt => "Manage projects better",
            Goal::MakeMoney => "Make money online",
            Goal::Learn => "Learn new tools",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TechnicalLevel {
    Beginner,
    Somewhat,
    Very,
}

impl StepOption for TechnicalLevel {
    const STEP: StepId = StepId::Technical;

    fn all() -> &'static [Self] {
        &[
            TechnicalLevel::Beginner,
            TechnicalLevel::Somewhat,
            TechnicalLevel::Very,
        ]
    }

    fn value(self) -> &'static str {
        match self {
            TechnicalLevel::Beginner => "beginner",
            TechnicalLevel::Somewhat => "somewhat",
            TechnicalLevel::Very => "very",
        }
    }

    fn label(self) -> &'static str {
        match self {
            TechnicalLevel::Beginner => "Beginner, I avoid code",
            TechnicalLevel::Somewhat => "Somewhat technical",
            TechnicalLevel::Very => "Very technical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BudgetBracket {
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "under-20")]
    Under20,
    #[serde(rename = "20-100")]
    From20To100,
    #[serde(rename = "no-limit")]
    NoLimit,
}

impl StepOption for BudgetBracket {
    const STEP: StepId = StepId::Budget;

    fn all() -> &'static [Self] {
        &[
            BudgetBracket::Free,
            BudgetBracket::Under20,
            BudgetBracket::From20To100,
            BudgetBracket::NoLimit,
        ]
    }

    fn value(self) -> &'static str {
        match self {
            BudgetBracket::Free => "free",
            BudgetBracket::Under20 => "under-20",
            BudgetBracket::From20To100 => "20-100",
            BudgetBracket::NoLimit => "no-limit",
        }
    }

    fn label(self) -> &'static str {
        match self {
            BudgetBracket::Free => "Free tools only",
            BudgetBracket::Under20 => "Under $20/month",
            BudgetBracket::From20To100 => "$20 to $100/month",
            BudgetBracket::NoLimit => "No limit if it's worth it",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowPreference {
    Simple,
    FeatureRich,
    AiFirst,
    Visual,
}

impl StepOption for WorkflowPreference {
    const STEP: StepId = StepId::Workflow;

    fn all() -> &'static [Self] {
        &[
            WorkflowPreference::Simple,
            WorkflowPreference::FeatureRich,
            WorkflowPreference::AiFirst,
            WorkflowPreference::Visual,
        ]
    }

    fn value(self) -> &'static str {
        match self {
            WorkflowPreference::Simple => "simple",
            WorkflowPreference::FeatureRich => "feature-rich",
            WorkflowPreference::AiFirst => "ai-first",
            WorkflowPreference::Visual => "visual",
        }
    }

    fn label(self) -> &'static str {
        match self {
            WorkflowPreference::Simple => "Simple & minimal",
            WorkflowPreference::FeatureRich => "Feature-rich",
            WorkflowPreference::AiFirst => "AI-first",
            WorkflowPreference::Visual => "Visual / no-code",
        }
    }
}

/// One selectable answer as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
}

/// A question in the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizStepDefinition {
    pub id: StepId,
    pub question: &'static str,
    pub subtitle: &'static str,
    pub selection: SelectionMode,
    pub options: Vec<OptionView>,
}

impl QuizStepDefinition {
    fn build<O: StepOption>(
        question: &'static str,
        subtitle: &'static str,
        selection: SelectionMode,
    ) -> Self {
        Self {
            id: O::STEP,
            question,
            subtitle,
            selection,
            options: O::all()
                .iter()
                .map(|option| OptionView {
                    value: option.value(),
                    label: option.label(),
                })
                .collect(),
        }
    }
}

/// The ordered questionnaire, built once per process.
pub fn quiz_steps() -> &'static [QuizStepDefinition] {
    static STEPS: OnceLock<Vec<QuizStepDefinition>> = OnceLock::new();
    STEPS.get_or_init(|| {
        vec![
            QuizStepDefinition::build::<Role>(
                "Who are you?",
                "No wrong answers, we're just getting to know you.",
                SelectionMode::Single,
            ),
            QuizStepDefinition::build::<Goal>(
                "What's your main goal?",
                "Pick as many as you like.",
                SelectionMode::Multi,
            ),
            QuizStepDefinition::build::<TechnicalLevel>(
                "How technical are you?",
                "This helps us match the right complexity level.",
                SelectionMode::Single,
            ),
            QuizStepDefinition::build::<BudgetBracket>(
                "What's your budget range?",
                "We'll filter tools that actually fit.",
                SelectionMode::Single,
            ),
            QuizStepDefinition::build::<WorkflowPreference>(
                "What kind of workflow do you prefer?",
                "Almost there, last question!",
                SelectionMode::Single,
            ),
        ]
    })
}
