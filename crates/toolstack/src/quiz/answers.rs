use serde::{Deserialize, Serialize};

use super::steps::{BudgetBracket, Goal, Role, StepId, TechnicalLevel, WorkflowPreference};

/// Completed (or partially completed) questionnaire handed to the engine.
///
/// Unanswered single-choice steps are `None`; the engine treats them as
/// contributing nothing. Goals behave as a set: duplicates are collapsed on
/// construction, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAnswers")]
pub struct QuizAnswers {
    pub role: Option<Role>,
    goals: Vec<Goal>,
    pub technical: Option<TechnicalLevel>,
    pub budget: Option<BudgetBracket>,
    pub workflow: Option<WorkflowPreference>,
}

impl QuizAnswers {
    pub fn new(
        role: Option<Role>,
        goals: impl IntoIterator<Item = Goal>,
        technical: Option<TechnicalLevel>,
        budget: Option<BudgetBracket>,
        workflow: Option<WorkflowPreference>,
    ) -> Self {
        Self {
            role,
            goals: distinct(goals),
            technical,
            budget,
            workflow,
        }
    }

    /// Selected goals in first-seen order, without duplicates.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn with_goals(mut self, goals: impl IntoIterator<Item = Goal>) -> Self {
        self.goals = distinct(goals);
        self
    }
}

/// Wire shape of `QuizAnswers`; converted through `QuizAnswers::new` so goals stay distinct.
#[derive(Deserialize)]
struct StoredAnswers {
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    goals: Vec<Goal>,
    #[serde(default)]
    technical: Option<TechnicalLevel>,
    #[serde(default)]
    budget: Option<BudgetBracket>,
    #[serde(default)]
    workflow: Option<WorkflowPreference>,
}

impl From<StoredAnswers> for QuizAnswers {
    fn from(stored: StoredAnswers) -> Self {
        QuizAnswers::new(
            stored.role,
            stored.goals,
            stored.technical,
            stored.budget,
            stored.workflow,
        )
    }
}

fn distinct(goals: impl IntoIterator<Item = Goal>) -> Vec<Goal> {
    let mut unique = Vec::new();
    for goal in goals {
        if !unique.contains(&goal) {
            unique.push(goal);
        }
    }
    unique
}

/// Raw request body; every field may be absent until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSubmission {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub goals: Option<Vec<Goal>>,
    #[serde(default)]
    pub technical: Option<TechnicalLevel>,
    #[serde(default)]
    pub budget: Option<BudgetBracket>,
    #[serde(default)]
    pub workflow: Option<WorkflowPreference>,
}

/// Raised before the engine runs when the questionnaire is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizValidationError {
    #[error("All quiz fields are required.")]
    Incomplete { missing: Vec<StepId> },
}

impl QuizSubmission {
    /// Require every step to be answered. An empty goals list counts as answered.
    pub fn validate(self) -> Result<QuizAnswers, QuizValidationError> {
        let mut missing = Vec::new();
        if self.role.is_none() {
            missing.push(StepId::Role);
        }
        if self.goals.is_none() {
            missing.push(StepId::Goals);
        }
        if self.technical.is_none() {
            missing.push(StepId::Technical);
        }
        if self.budget.is_none() {
            missing.push(StepId::Budget);
        }
        if self.workflow.is_none() {
            missing.push(StepId::Workflow);
        }

        if !missing.is_empty() {
            return Err(QuizValidationError::Incomplete { missing });
        }

        Ok(QuizAnswers::new(
            self.role,
            self.goals.unwrap_or_default(),
            self.technical,
            self.budget,
            self.workflow,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> QuizSubmission {
        QuizSubmission {
            role: Some(Role::Designer),
            goals: Some(vec![Goal::Design, Goal::NoCode, Goal::Design]),
            technical: Some(TechnicalLevel::Beginner),
            budget: Some(BudgetBracket::Free),
            workflow: Some(WorkflowPreference::Visual),
        }
    }

    #[test]
    fn validate_collapses_duplicate_goals() {
        let answers = complete().validate().expect("complete submission");
        assert_eq!(answers.goals(), &[Goal::Design, Goal::NoCode]);
        assert_eq!(answers.role, Some(Role::Designer));
    }

    #[test]
    fn validate_reports_every_missing_step() {
        let submission = QuizSubmission {
            role: Some(Role::Student),
            ..QuizSubmission::default()
        };

        match submission.validate() {
            Err(QuizValidationError::Incomplete { missing }) => assert_eq!(
                missing,
                vec![
                    StepId::Goals,
                    StepId::Technical,
                    StepId::Budget,
                    StepId::Workflow
                ]
            ),
            other => panic!("expected incomplete submission, got {other:?}"),
        }
    }

    #[test]
    fn empty_goal_list_is_accepted() {
        let mut submission = complete();
        submission.goals = Some(Vec::new());
        let answers = submission.validate().expect("empty goals accepted");
        assert!(answers.goals().is_empty());
    }

    #[test]
    fn deserialized_answers_collapse_duplicate_goals() {
        let body = r#"{"role":"designer","goals":["design","design","no-code","design"],"technical":"beginner","budget":"free","workflow":"visual"}"#;
        let answers: QuizAnswers = serde_json::from_str(body).expect("answers parse");
        assert_eq!(answers.goals(), &[Goal::Design, Goal::NoCode]);
        assert_eq!(answers.workflow, Some(WorkflowPreference::Visual));

        let sparse: QuizAnswers = serde_json::from_str("{}").expect("empty answers parse");
        assert_eq!(sparse, QuizAnswers::default());
    }

    #[test]
    fn unknown_option_values_fail_deserialization() {
        let body = r#"{"role":"astronaut","goals":[],"technical":"very","budget":"free","workflow":"simple"}"#;
        assert!(serde_json::from_str::<QuizSubmission>(body).is_err());

        let body = r#"{"role":"developer","goals":["automation"],"technical":"very","budget":"20-100","workflow":"ai-first"}"#;
        let submission: QuizSubmission = serde_json::from_str(body).expect("known values parse");
        assert_eq!(submission.budget, Some(BudgetBracket::From20To100));
    }
}
