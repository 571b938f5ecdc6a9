use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::answers::QuizSubmission;
use super::service::{QuizResponse, QuizService};
use crate::catalog::CatalogRepository;
use crate::error::AppError;

/// Router exposing the questionnaire and the recommendation endpoint.
pub fn quiz_router<C>(service: Arc<QuizService<C>>) -> Router
where
    C: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/quiz/steps", get(steps_handler::<C>))
        .route("/api/quiz", post(submit_handler::<C>))
        .with_state(service)
}

pub(crate) async fn steps_handler<C>(State(service): State<Arc<QuizService<C>>>) -> Response
where
    C: CatalogRepository + 'static,
{
    (StatusCode::OK, Json(service.steps())).into_response()
}

pub(crate) async fn submit_handler<C>(
    State(service): State<Arc<QuizService<C>>>,
    payload: Result<Json<QuizSubmission>, JsonRejection>,
) -> Result<Json<QuizResponse>, AppError>
where
    C: CatalogRepository + 'static,
{
    let Json(submission) = payload?;
    let response = service.submit(submission)?;
    Ok(Json(response))
}
