use std::sync::Arc;

use super::common::*;
use crate::catalog::ToolSlug;
use crate::quiz::answers::{QuizSubmission, QuizValidationError};
use crate::quiz::engine::ScoringConfig;
use crate::quiz::recorder::spawn_recorder;
use crate::quiz::service::{QuizService, QuizServiceError, QuizSetupError};
use crate::quiz::steps::{BudgetBracket, Goal, Role, StepId, TechnicalLevel, WorkflowPreference};

fn developer_submission() -> QuizSubmission {
    QuizSubmission {
        role: Some(Role::Developer),
        goals: Some(vec![Goal::Automation]),
        technical: Some(TechnicalLevel::Very),
        budget: Some(BudgetBracket::NoLimit),
        workflow: Some(WorkflowPreference::FeatureRich),
    }
}

#[tokio::test]
async fn submit_hydrates_and_records_the_top_pick() {
    let (service, _catalog, recorder, worker) = build_service();

    let response = service
        .submit(developer_submission())
        .expect("complete submission");

    let top = &response.top_pick;
    assert_eq!(top.recommendation.slug, ToolSlug::from("supabase"));
    assert_eq!(
        top.tool.as_ref().map(|tool| tool.name.as_str()),
        Some("Supabase")
    );
    assert_eq!(response.alternatives.len(), 3);
    assert!(response.alternatives.iter().all(|card| card.tool.is_some()));
    assert_eq!(
        slug_list(response.related_posts.iter().map(|post| &post.slug)),
        vec![
            "zapier-vs-make-automation",
            "top-ai-productivity-tools",
            "why-startups-need-supabase",
        ]
    );

    let stats = worker.shutdown().await;
    assert_eq!(stats.recorded, 1);
    let records = recorder.records();
    assert_eq!(records[0].top_pick_slug, ToolSlug::from("supabase"));
    assert_eq!(records[0].top_pick_score, 9.0);
    assert_eq!(records[0].answers.role, Some(Role::Developer));
}

#[tokio::test]
async fn incomplete_submission_is_rejected_before_scoring() {
    let (service, _catalog, recorder, worker) = build_service();
    let submission = QuizSubmission {
        workflow: None,
        ..developer_submission()
    };

    match service.submit(submission) {
        Err(QuizServiceError::Validation(QuizValidationError::Incomplete { missing })) => {
            assert_eq!(missing, vec![StepId::Workflow]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    let stats = worker.shutdown().await;
    assert_eq!(stats.recorded, 0);
    assert!(recorder.records().is_empty());
}

#[tokio::test]
async fn recorder_failures_do_not_reach_the_caller() {
    let catalog = Arc::new(seeded_catalog());
    let (dispatcher, worker) = spawn_recorder(Arc::new(OfflineRecorder), 4);
    let service = QuizService::from_catalog(catalog, ScoringConfig::standard(), dispatcher)
        .expect("service builds");

    assert!(service.submit(developer_submission()).is_ok());

    let stats = worker.shutdown().await;
    assert_eq!(stats.failed, 1);
}

#[tokio::test]
async fn responses_after_shutdown_are_dropped_quietly() {
    let (service, _catalog, _recorder, worker) = build_service();
    worker.shutdown().await;

    let response = service.submit(developer_submission());
    assert!(response.is_ok());
}

#[tokio::test]
async fn tools_missing_from_the_live_catalog_hydrate_as_empty_cards() {
    let (service, catalog, _recorder, _worker) = build_service();
    catalog.clear_tools();

    let response = service
        .submit(developer_submission())
        .expect("complete submission");

    assert_eq!(
        response.top_pick.recommendation.slug,
        ToolSlug::from("supabase")
    );
    assert!(response.top_pick.tool.is_none());
    assert!(response.alternatives.iter().all(|card| card.tool.is_none()));
    assert_eq!(response.related_posts.len(), 3);
}

#[tokio::test]
async fn unavailable_catalog_degrades_hydration() {
    let (dispatcher, _worker) = spawn_recorder(Arc::new(MemoryRecorder::default()), 4);
    let service = QuizService::new(
        Arc::new(standard_engine()),
        Arc::new(UnavailableCatalog),
        dispatcher,
    );

    let response = service
        .submit(developer_submission())
        .expect("hydration errors are tolerated");
    assert!(response.top_pick.tool.is_none());
    assert!(response.related_posts.is_empty());
}

#[tokio::test]
async fn setup_fails_when_catalog_cannot_be_read_or_is_empty() {
    let (dispatcher, _worker) = spawn_recorder(Arc::new(MemoryRecorder::default()), 4);

    let unavailable = QuizService::from_catalog(
        Arc::new(UnavailableCatalog),
        ScoringConfig::standard(),
        dispatcher.clone(),
    );
    assert!(matches!(unavailable, Err(QuizSetupError::Catalog(_))));

    let empty = Arc::new(seeded_catalog());
    empty.clear_tools();
    let result = QuizService::from_catalog(empty, ScoringConfig::standard(), dispatcher);
    assert!(matches!(result, Err(QuizSetupError::Snapshot(_))));
}

#[tokio::test]
async fn recommend_skips_validation_for_partial_answers() {
    let (service, _catalog, _recorder, _worker) = build_service();
    let answers = crate::quiz::answers::QuizAnswers::default().with_goals([Goal::Marketing]);

    let result = service.recommend(&answers);
    assert_eq!(result.top_pick.slug, ToolSlug::from("mailchimp"));
    assert_eq!(service.steps().len(), 5);
}
