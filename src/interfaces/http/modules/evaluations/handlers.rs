//! Evaluation API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    CreateEvaluationRequest, EvaluationDto, ListEvaluationsParams, UpdateEvaluationRequest,
};
use crate::application::evaluations::{
    CreateEvaluation, EvaluationPatch, EvaluationService, SubScores,
};
use crate::domain::EvaluationFilter;
use crate::infrastructure::database::repositories::{CallRepository, EvaluationRepository};
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Evaluation handler state
#[derive(Clone)]
pub struct EvaluationHandlerState {
    pub evaluations: Arc<EvaluationService<EvaluationRepository, CallRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/evaluations",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    params(ListEvaluationsParams),
    responses(
        (status = 200, description = "Evaluation list", body = PaginatedResponse<EvaluationDto>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_evaluations(
    State(state): State<EvaluationHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(params): Query<ListEvaluationsParams>,
) -> Result<Json<PaginatedResponse<EvaluationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let filter = EvaluationFilter {
        call_id: params.call_id,
        evaluator_id: params.evaluator_id,
        operator_id: params.operator_id,
        requires_coaching: params.requires_coaching,
        is_exemplary: params.is_exemplary,
        page: Some(params.page),
        per_page: Some(params.per_page),
    };

    let result = state
        .evaluations
        .list_evaluations(&auth.actor(), filter)
        .await
        .map_err(error_response)?;

    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/evaluations/{id}",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Evaluation ID")),
    responses(
        (status = 200, description = "Evaluation details", body = ApiResponse<EvaluationDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_evaluation(
    State(state): State<EvaluationHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EvaluationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let evaluation = state
        .evaluations
        .get_evaluation(&auth.actor(), id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(EvaluationDto::from(evaluation))))
}

#[utoipa::path(
    post,
    path = "/api/v1/evaluations",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    request_body = CreateEvaluationRequest,
    responses(
        (status = 201, description = "Evaluation created", body = ApiResponse<EvaluationDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Call not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_evaluation(
    State(state): State<EvaluationHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateEvaluationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EvaluationDto>>), (StatusCode, Json<ApiResponse<()>>)>
{
    let evaluation = state
        .evaluations
        .create_evaluation(
            &auth.actor(),
            CreateEvaluation {
                call_id: request.call_id,
                scores: SubScores {
                    greeting: request.greeting_score,
                    communication: request.communication_score,
                    problem_solving: request.problem_solving_score,
                    empathy: request.empathy_score,
                    procedure: request.procedure_score,
                    closing: request.closing_score,
                },
                positive_points: request.positive_points,
                improvement_points: request.improvement_points,
                general_comments: request.general_comments,
                requires_coaching: request.requires_coaching,
                is_exemplary: request.is_exemplary,
            },
        )
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(EvaluationDto::from(evaluation))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/evaluations/{id}",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Evaluation ID")),
    request_body = UpdateEvaluationRequest,
    responses(
        (status = 200, description = "Evaluation updated with a recomputed overall score", body = ApiResponse<EvaluationDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_evaluation(
    State(state): State<EvaluationHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateEvaluationRequest>,
) -> Result<Json<ApiResponse<EvaluationDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let evaluation = state
        .evaluations
        .update_evaluation(
            &auth.actor(),
            id,
            EvaluationPatch {
                greeting_score: request.greeting_score,
                communication_score: request.communication_score,
                problem_solving_score: request.problem_solving_score,
                empathy_score: request.empathy_score,
                procedure_score: request.procedure_score,
                closing_score: request.closing_score,
                positive_points: request.positive_points,
                improvement_points: request.improvement_points,
                general_comments: request.general_comments,
                requires_coaching: request.requires_coaching,
                is_exemplary: request.is_exemplary,
            },
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(EvaluationDto::from(evaluation))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/evaluations/{id}",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Evaluation ID")),
    responses(
        (status = 200, description = "Evaluation deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_evaluation(
    State(state): State<EvaluationHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .evaluations
        .delete_evaluation(&auth.actor(), id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(())))
}
