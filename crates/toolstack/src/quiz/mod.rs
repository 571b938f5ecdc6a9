//! Lead-generation questionnaire and the recommendation engine behind it.

pub mod answers;
pub mod engine;
pub mod recorder;
pub mod router;
pub mod service;
pub mod steps;

#[cfg(test)]
mod tests;

pub use answers::{QuizAnswers, QuizSubmission, QuizValidationError};
pub use engine::{
    CatalogItem, CatalogSnapshot, QuizResult, Recommendation, RecommendationEngine, ScoredItem,
    ScoringConfig, SignalBreakdown, SnapshotError,
};
pub use recorder::{
    spawn_recorder, CsvResponseLog, QuizResponseRecord, RecorderError, RecorderStatsSnapshot,
    RecorderWorker, ResponseDispatcher, ResponseId, ResponseRecorder,
};
pub use router::quiz_router;
pub use service::{
    HydratedRecommendation, QuizResponse, QuizService, QuizServiceError, QuizSetupError,
};
pub use steps::{
    quiz_steps, BudgetBracket, Goal, QuizStepDefinition, Role, SelectionMode, StepId, StepOption,
    TechnicalLevel, WorkflowPreference,
};
