use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::catalog::{
    CatalogRepository, CatalogSeed, Category, CategorySlug, InMemoryCatalog, Post, PostSlug,
    PostType, RepositoryError, Tool, ToolSlug,
};
use crate::quiz::answers::QuizAnswers;
use crate::quiz::engine::{CatalogItem, CatalogSnapshot, RecommendationEngine, ScoringConfig};
use crate::quiz::recorder::{
    spawn_recorder, QuizResponseRecord, RecorderError, RecorderWorker, ResponseId,
    ResponseRecorder,
};
use crate::quiz::service::QuizService;
use crate::quiz::steps::{BudgetBracket, Goal, Role, TechnicalLevel, WorkflowPreference};

pub(super) fn seeded_catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_seed(CatalogSeed::standard().expect("seed parses"))
}

pub(super) fn standard_engine() -> RecommendationEngine {
    let tools = seeded_catalog().tools().expect("seed tools");
    let snapshot = CatalogSnapshot::from_tools(&tools).expect("seed snapshot");
    RecommendationEngine::new(ScoringConfig::standard(), snapshot)
}

/// Engine over a hand-built catalog of `(slug, category, traits, monthly_cost)`.
pub(super) fn engine_over(items: &[(&str, &str, &[&str], u32)]) -> RecommendationEngine {
    let items = items
        .iter()
        .map(|(slug, category, traits, cost)| {
            CatalogItem::new(*slug, *category, traits.iter().copied(), *cost)
        })
        .collect();
    let snapshot = CatalogSnapshot::new(items).expect("synthetic snapshot");
    RecommendationEngine::new(ScoringConfig::standard(), snapshot)
}

pub(super) fn developer_answers() -> QuizAnswers {
    QuizAnswers::new(
        Some(Role::Developer),
        [Goal::Automation],
        Some(TechnicalLevel::Very),
        Some(BudgetBracket::NoLimit),
        Some(WorkflowPreference::FeatureRich),
    )
}

pub(super) fn designer_answers(budget: BudgetBracket) -> QuizAnswers {
    QuizAnswers::new(
        Some(Role::Designer),
        [Goal::Design],
        Some(TechnicalLevel::Beginner),
        Some(budget),
        Some(WorkflowPreference::Visual),
    )
}

/// Every single-choice combination, paired with a few goal sets.
pub(super) fn answer_grid() -> Vec<QuizAnswers> {
    use crate::quiz::steps::StepOption;

    let goal_sets: [&[Goal]; 4] = [
        &[],
        &[Goal::Automation],
        &[Goal::Design, Goal::NoCode],
        &[Goal::Marketing, Goal::MakeMoney, Goal::Learn],
    ];

    let mut grid = Vec::new();
    for role in Role::all() {
        for goals in goal_sets {
            for technical in TechnicalLevel::all() {
                for budget in BudgetBracket::all() {
                    for workflow in WorkflowPreference::all() {
                        grid.push(QuizAnswers::new(
                            Some(*role),
                            goals.iter().copied(),
                            Some(*technical),
                            Some(*budget),
                            Some(*workflow),
                        ));
                    }
                }
            }
        }
    }
    grid
}

pub(super) fn slug_list(slugs: impl IntoIterator<Item = impl ToString>) -> Vec<String> {
    slugs.into_iter().map(|slug| slug.to_string()).collect()
}

#[derive(Default)]
pub(super) struct MemoryRecorder {
    records: Mutex<Vec<QuizResponseRecord>>,
}

impl MemoryRecorder {
    pub(super) fn records(&self) -> Vec<QuizResponseRecord> {
        self.records.lock().expect("recorder mutex poisoned").clone()
    }
}

impl ResponseRecorder for MemoryRecorder {
    fn record(&self, record: &QuizResponseRecord) -> Result<ResponseId, RecorderError> {
        let mut guard = self.records.lock().expect("recorder mutex poisoned");
        guard.push(record.clone());
        Ok(ResponseId(guard.len() as u64))
    }
}

pub(super) struct OfflineRecorder;

impl ResponseRecorder for OfflineRecorder {
    fn record(&self, _record: &QuizResponseRecord) -> Result<ResponseId, RecorderError> {
        Err(RecorderError::Unavailable("analytics store offline".to_string()))
    }
}

/// Service over the seeded catalog. Must run inside a tokio runtime.
pub(super) fn build_service() -> (
    QuizService<InMemoryCatalog>,
    Arc<InMemoryCatalog>,
    Arc<MemoryRecorder>,
    RecorderWorker,
) {
    let catalog = Arc::new(seeded_catalog());
    let recorder = Arc::new(MemoryRecorder::default());
    let (dispatcher, worker) = spawn_recorder(Arc::clone(&recorder), 16);
    let service = QuizService::from_catalog(
        Arc::clone(&catalog),
        ScoringConfig::standard(),
        dispatcher,
    )
    .expect("service builds");
    (service, catalog, recorder, worker)
}

pub(super) struct UnavailableCatalog;

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("database offline".to_string()))
}

impl CatalogRepository for UnavailableCatalog {
    fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        offline()
    }

    fn category_by_slug(&self, _slug: &CategorySlug) -> Result<Option<Category>, RepositoryError> {
        offline()
    }

    fn tools(&self) -> Result<Vec<Tool>, RepositoryError> {
        offline()
    }

    fn featured_tools(&self, _limit: usize) -> Result<Vec<Tool>, RepositoryError> {
        offline()
    }

    fn tools_by_category(&self, _category: &CategorySlug) -> Result<Vec<Tool>, RepositoryError> {
        offline()
    }

    fn tool_by_slug(&self, _slug: &ToolSlug) -> Result<Option<Tool>, RepositoryError> {
        offline()
    }

    fn tools_by_slugs(&self, _slugs: &[ToolSlug]) -> Result<Vec<Tool>, RepositoryError> {
        offline()
    }

    fn posts(&self) -> Result<Vec<Post>, RepositoryError> {
        offline()
    }

    fn posts_by_type(&self, _post_type: PostType) -> Result<Vec<Post>, RepositoryError> {
        offline()
    }

    fn post_by_slug(&self, _slug: &PostSlug) -> Result<Option<Post>, RepositoryError> {
        offline()
    }

    fn posts_by_slugs(&self, _slugs: &[PostSlug]) -> Result<Vec<Post>, RepositoryError> {
        offline()
    }

    fn featured_posts(&self, _limit: usize) -> Result<Vec<Post>, RepositoryError> {
        offline()
    }

    fn upsert_tool(&self, _tool: Tool) -> Result<(), RepositoryError> {
        offline()
    }
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json payload"))
}
