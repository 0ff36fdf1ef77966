//! Call API handlers
//!
//! Thin wrappers delegating to `CallService`; scoping and the closed-at
//! rule live in the service.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    parse_priority, parse_status, CallDetailDto, CallDto, CreateCallRequest, ListCallsParams,
    UpdateCallRequest,
};
use crate::application::calls::{CallService, CreateCall};
use crate::domain::{CallChanges, CallFilter};
use crate::infrastructure::database::repositories::{CallRepository, EvaluationRepository};
use crate::interfaces::http::common::{
    error_response, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::evaluations::EvaluationDto;

/// Call handler state
#[derive(Clone)]
pub struct CallHandlerState {
    pub calls: Arc<CallService<CallRepository, EvaluationRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/calls",
    tag = "Calls",
    security(("bearer_auth" = [])),
    params(ListCallsParams),
    responses(
        (status = 200, description = "Call list", body = PaginatedResponse<CallDto>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_calls(
    State(state): State<CallHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(params): Query<ListCallsParams>,
) -> Result<Json<PaginatedResponse<CallDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let status = params
        .status
        .as_deref()
        .map(parse_status)
        .transpose()
        .map_err(error_response)?;
    let priority = params
        .priority
        .as_deref()
        .map(parse_priority)
        .transpose()
        .map_err(error_response)?;

    let filter = CallFilter {
        operator_id: params.operator_id,
        status,
        category: params.category,
        priority,
        date_from: params.date_from,
        date_to: params.date_to,
        page: Some(params.page),
        per_page: Some(params.per_page),
    };

    let result = state
        .calls
        .list_calls(&auth.actor(), filter)
        .await
        .map_err(error_response)?;

    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/calls/{id}",
    tag = "Calls",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Call ID")),
    responses(
        (status = 200, description = "Call with its evaluations", body = ApiResponse<CallDetailDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_call(
    State(state): State<CallHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CallDetailDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let (call, evaluations) = state
        .calls
        .get_call(&auth.actor(), id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(CallDetailDto {
        call: CallDto::from(call),
        evaluations: evaluations.into_iter().map(EvaluationDto::from).collect(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/calls",
    tag = "Calls",
    security(("bearer_auth" = [])),
    request_body = CreateCallRequest,
    responses(
        (status = 201, description = "Call created", body = ApiResponse<CallDto>),
        (status = 409, description = "Protocol collision"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_call(
    State(state): State<CallHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateCallRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CallDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    let priority = request
        .priority
        .as_deref()
        .map(parse_priority)
        .transpose()
        .map_err(error_response)?;
    let status = request
        .status
        .as_deref()
        .map(parse_status)
        .transpose()
        .map_err(error_response)?;

    let call = state
        .calls
        .create_call(
            &auth.actor(),
            CreateCall {
                operator_id: request.operator_id,
                customer_name: request.customer_name,
                customer_phone: request.customer_phone,
                customer_email: request.customer_email,
                subject: request.subject,
                description: request.description,
                category: request.category,
                priority,
                status,
                duration_seconds: request.duration_seconds,
                recording_url: request.recording_url,
                notes: request.notes,
            },
        )
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CallDto::from(call))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/calls/{id}",
    tag = "Calls",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Call ID")),
    request_body = UpdateCallRequest,
    responses(
        (status = 200, description = "Call updated", body = ApiResponse<CallDto>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_call(
    State(state): State<CallHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateCallRequest>,
) -> Result<Json<ApiResponse<CallDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let priority = request
        .priority
        .as_deref()
        .map(parse_priority)
        .transpose()
        .map_err(error_response)?;
    let status = request
        .status
        .as_deref()
        .map(parse_status)
        .transpose()
        .map_err(error_response)?;

    let changes = CallChanges {
        customer_name: request.customer_name,
        customer_phone: request.customer_phone,
        customer_email: request.customer_email,
        subject: request.subject,
        description: request.description,
        category: request.category,
        priority,
        status,
        duration_seconds: request.duration_seconds,
        recording_url: request.recording_url,
        notes: request.notes,
        closed_at: None,
    };

    let call = state
        .calls
        .update_call(&auth.actor(), id, changes)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(CallDto::from(call))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/calls/{id}",
    tag = "Calls",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Call ID")),
    responses(
        (status = 200, description = "Call deleted along with its evaluations"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_call(
    State(state): State<CallHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .calls
        .delete_call(&auth.actor(), id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(())))
}
