//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{CallService, DashboardService, EvaluationService, IdentityService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{
    CallRepository, EvaluationRepository, UserRepository,
};

use super::common::{ApiResponse, PaginatedResponse};
use super::middleware::{auth_middleware, AuthState};
use super::modules::{auth, calls, dashboard, evaluations, health, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer access token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::refresh,
        auth::handlers::get_current_user,
        auth::handlers::change_password,
        // Users
        users::handlers::list_users,
        users::handlers::get_user,
        users::handlers::update_user,
        users::handlers::deactivate_user,
        // Calls
        calls::handlers::list_calls,
        calls::handlers::get_call,
        calls::handlers::create_call,
        calls::handlers::update_call,
        calls::handlers::delete_call,
        // Evaluations
        evaluations::handlers::list_evaluations,
        evaluations::handlers::get_evaluation,
        evaluations::handlers::create_evaluation,
        evaluations::handlers::update_evaluation,
        evaluations::handlers::delete_evaluation,
        // Dashboard
        dashboard::handlers::get_stats,
        dashboard::handlers::get_operator_performance,
        dashboard::handlers::get_recent_activity,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<users::UserDto>,
            PaginatedResponse<calls::CallDto>,
            PaginatedResponse<evaluations::EvaluationDto>,
            // Auth
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::RefreshRequest,
            auth::dto::RefreshResponse,
            auth::dto::RegisterRequest,
            auth::dto::ChangePasswordRequest,
            // Users
            users::dto::UserDto,
            users::dto::UpdateUserRequest,
            // Calls
            calls::dto::CallDto,
            calls::dto::CallDetailDto,
            calls::dto::CreateCallRequest,
            calls::dto::UpdateCallRequest,
            // Evaluations
            evaluations::dto::EvaluationDto,
            evaluations::dto::CreateEvaluationRequest,
            evaluations::dto::UpdateEvaluationRequest,
            // Dashboard
            dashboard::dto::DashboardStatsDto,
            dashboard::dto::CallStatsDto,
            dashboard::dto::EvaluationStatsDto,
            dashboard::dto::OperatorPerformanceDto,
            dashboard::dto::OperatorPerformanceReportDto,
            dashboard::dto::RecentActivityDto,
            // Health
            health::handlers::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Login (JWT access + refresh), registration, password change"),
        (name = "Users", description = "User account management"),
        (name = "Calls", description = "Customer service call records"),
        (name = "Evaluations", description = "Rubric evaluations of calls"),
        (name = "Dashboard", description = "Windowed statistics, operator performance and recent activity"),
    ),
    info(
        title = "Callmon API",
        version = "1.0.0",
        description = "REST API for call-center quality monitoring",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// Repositories and services are built here and handed to each handler
/// state explicitly; nothing reaches for globals.
pub fn create_api_router(db: DatabaseConnection, jwt_config: JwtConfig) -> Router {
    // ── Repositories ───────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.clone()));
    let call_repo = Arc::new(CallRepository::new(db.clone()));
    let evaluation_repo = Arc::new(EvaluationRepository::new(db));

    // ── Services ───────────────────────────────────────────────
    let identity = Arc::new(IdentityService::new(user_repo.clone(), jwt_config.clone()));
    let call_service = Arc::new(CallService::new(call_repo.clone(), evaluation_repo.clone()));
    let evaluation_service = Arc::new(EvaluationService::new(
        evaluation_repo.clone(),
        call_repo.clone(),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        call_repo,
        evaluation_repo,
        user_repo,
    ));

    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let auth_handler_state = auth::AuthHandlerState {
        identity: identity.clone(),
        jwt_config,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::handlers::login))
        .route("/register", post(auth::handlers::register))
        .route("/refresh", post(auth::handlers::refresh))
        .with_state(auth_handler_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::handlers::get_current_user))
        .route("/change-password", put(auth::handlers::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_handler_state);

    // User routes (protected)
    let user_routes = Router::new()
        .route("/", get(users::handlers::list_users))
        .route(
            "/{id}",
            get(users::handlers::get_user)
                .put(users::handlers::update_user)
                .delete(users::handlers::deactivate_user),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(users::UserHandlerState { identity });

    // Call routes (protected)
    let call_routes = Router::new()
        .route(
            "/",
            get(calls::handlers::list_calls).post(calls::handlers::create_call),
        )
        .route(
            "/{id}",
            get(calls::handlers::get_call)
                .put(calls::handlers::update_call)
                .delete(calls::handlers::delete_call),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(calls::CallHandlerState {
            calls: call_service,
        });

    // Evaluation routes (protected)
    let evaluation_routes = Router::new()
        .route(
            "/",
            get(evaluations::handlers::list_evaluations)
                .post(evaluations::handlers::create_evaluation),
        )
        .route(
            "/{id}",
            get(evaluations::handlers::get_evaluation)
                .put(evaluations::handlers::update_evaluation)
                .delete(evaluations::handlers::delete_evaluation),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(evaluations::EvaluationHandlerState {
            evaluations: evaluation_service,
        });

    // Dashboard routes (protected)
    let dashboard_routes = Router::new()
        .route("/stats", get(dashboard::handlers::get_stats))
        .route(
            "/operator-performance",
            get(dashboard::handlers::get_operator_performance),
        )
        .route(
            "/recent-activity",
            get(dashboard::handlers::get_recent_activity),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(dashboard::DashboardHandlerState {
            dashboard: dashboard_service,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::handlers::health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/calls", call_routes)
        .nest("/api/v1/evaluations", evaluation_routes)
        .nest("/api/v1/dashboard", dashboard_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
