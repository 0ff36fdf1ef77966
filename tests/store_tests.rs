//! Integration tests over an in-memory SQLite store with the real
//! migrations: cascade deletes, protocol uniqueness, window boundaries,
//! the closed-at stamp and operator scoping.

use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;

use callmon::application::calls::{CallService, CreateCall};
use callmon::application::dashboard::DashboardService;
use callmon::application::evaluations::{
    CreateEvaluation, EvaluationPatch, EvaluationService, SubScores,
};
use callmon::domain::{
    Actor, CallFilter, CallRepositoryInterface, CallStatus, DomainError,
    EvaluationRepositoryInterface, NewCall, NewUser, User, UserRepositoryInterface, UserRole,
};
use callmon::infrastructure::database::entities::call as call_entity;
use callmon::infrastructure::database::migrator::Migrator;
use callmon::infrastructure::database::repositories::{
    CallRepository, EvaluationRepository, UserRepository,
};

struct Ctx {
    db: DatabaseConnection,
    users: Arc<UserRepository>,
    calls: Arc<CallRepository>,
    evaluations: Arc<EvaluationRepository>,
    call_service: CallService<CallRepository, EvaluationRepository>,
    evaluation_service: EvaluationService<EvaluationRepository, CallRepository>,
    dashboard: DashboardService<CallRepository, EvaluationRepository, UserRepository>,
}

async fn setup() -> Ctx {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let users = Arc::new(UserRepository::new(db.clone()));
    let calls = Arc::new(CallRepository::new(db.clone()));
    let evaluations = Arc::new(EvaluationRepository::new(db.clone()));

    Ctx {
        db,
        users: users.clone(),
        calls: calls.clone(),
        evaluations: evaluations.clone(),
        call_service: CallService::new(calls.clone(), evaluations.clone()),
        evaluation_service: EvaluationService::new(evaluations.clone(), calls.clone()),
        dashboard: DashboardService::new(calls, evaluations, users),
    }
}

async fn seed_user(ctx: &Ctx, username: &str, role: UserRole) -> User {
    ctx.users
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            // Hashing is not under test here.
            password_hash: "x".to_string(),
            full_name: format!("{} Full Name", username),
            role,
        })
        .await
        .unwrap()
}

fn actor(user: &User) -> Actor {
    Actor::new(user.id, user.role)
}

fn create_call_input(operator_id: Option<i32>) -> CreateCall {
    CreateCall {
        operator_id,
        customer_name: "Customer".to_string(),
        customer_phone: None,
        customer_email: None,
        subject: "Subject".to_string(),
        description: None,
        category: None,
        priority: None,
        status: None,
        duration_seconds: None,
        recording_url: None,
        notes: None,
    }
}

fn create_evaluation_input(call_id: i32, scores: SubScores) -> CreateEvaluation {
    CreateEvaluation {
        call_id,
        scores,
        positive_points: None,
        improvement_points: None,
        general_comments: None,
        requires_coaching: false,
        is_exemplary: false,
    }
}

/// Shift a call's creation time into the past.
async fn backdate_call(db: &DatabaseConnection, call_id: i32, days: i64, slack_seconds: i64) {
    let model = call_entity::Entity::find_by_id(call_id)
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active: call_entity::ActiveModel = model.into();
    active.created_at = Set(Utc::now() - Duration::days(days) + Duration::seconds(slack_seconds));
    active.update(db).await.unwrap();
}

// ── Calls ──────────────────────────────────────────────────────

#[tokio::test]
async fn colliding_protocol_fails_with_conflict() {
    let ctx = setup().await;
    let operator = seed_user(&ctx, "op1", UserRole::Operator).await;

    let call = ctx
        .call_service
        .create_call(&actor(&operator), create_call_input(None))
        .await
        .unwrap();

    let err = ctx
        .calls
        .create_call(NewCall {
            protocol: call.protocol.clone(),
            operator_id: operator.id,
            customer_name: "Other".to_string(),
            customer_phone: None,
            customer_email: None,
            subject: "Other subject".to_string(),
            description: None,
            category: None,
            priority: Default::default(),
            status: Default::default(),
            duration_seconds: None,
            recording_url: None,
            notes: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);
}

#[tokio::test]
async fn closing_twice_stamps_closed_at_once() {
    let ctx = setup().await;
    let operator = seed_user(&ctx, "op1", UserRole::Operator).await;
    let op = actor(&operator);

    let call = ctx
        .call_service
        .create_call(&op, create_call_input(None))
        .await
        .unwrap();
    assert!(call.closed_at.is_none());

    let closed = ctx
        .call_service
        .update_call(
            &op,
            call.id,
            callmon::domain::CallChanges {
                status: Some(CallStatus::Closed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let first_stamp = closed.closed_at.expect("first close stamps closed_at");

    let closed_again = ctx
        .call_service
        .update_call(
            &op,
            call.id,
            callmon::domain::CallChanges {
                status: Some(CallStatus::Closed),
                notes: Some("follow-up".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(closed_again.closed_at, Some(first_stamp));
}

#[tokio::test]
async fn operator_listing_never_leaks_foreign_calls() {
    let ctx = setup().await;
    let op1 = seed_user(&ctx, "op1", UserRole::Operator).await;
    let op2 = seed_user(&ctx, "op2", UserRole::Operator).await;

    ctx.call_service
        .create_call(&actor(&op1), create_call_input(None))
        .await
        .unwrap();
    ctx.call_service
        .create_call(&actor(&op2), create_call_input(None))
        .await
        .unwrap();

    // Even asking for the other operator's calls, the scope wins.
    let listed = ctx
        .call_service
        .list_calls(
            &actor(&op1),
            CallFilter {
                operator_id: Some(op2.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(listed.total, 1);
    assert!(listed.items.iter().all(|c| c.operator_id == op1.id));
}

#[tokio::test]
async fn foreign_call_is_forbidden_missing_call_is_not_found() {
    let ctx = setup().await;
    let op1 = seed_user(&ctx, "op1", UserRole::Operator).await;
    let op2 = seed_user(&ctx, "op2", UserRole::Operator).await;

    let foreign = ctx
        .call_service
        .create_call(&actor(&op2), create_call_input(None))
        .await
        .unwrap();

    let err = ctx
        .call_service
        .get_call(&actor(&op1), foreign.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)), "got {:?}", err);

    let err = ctx
        .call_service
        .get_call(&actor(&op1), 424242)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }), "got {:?}", err);
}

#[tokio::test]
async fn operators_may_not_delete_calls() {
    let ctx = setup().await;
    let operator = seed_user(&ctx, "op1", UserRole::Operator).await;

    let call = ctx
        .call_service
        .create_call(&actor(&operator), create_call_input(None))
        .await
        .unwrap();

    let err = ctx
        .call_service
        .delete_call(&actor(&operator), call.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

// ── Evaluations ────────────────────────────────────────────────

#[tokio::test]
async fn deleting_a_call_cascades_to_its_evaluations() {
    let ctx = setup().await;
    let operator = seed_user(&ctx, "op1", UserRole::Operator).await;
    let supervisor = seed_user(&ctx, "sup1", UserRole::Supervisor).await;

    let call = ctx
        .call_service
        .create_call(&actor(&operator), create_call_input(None))
        .await
        .unwrap();

    let evaluation = ctx
        .evaluation_service
        .create_evaluation(
            &actor(&supervisor),
            create_evaluation_input(
                call.id,
                SubScores {
                    greeting: Some(4),
                    ..Default::default()
                },
            ),
        )
        .await
        .unwrap();

    ctx.call_service
        .delete_call(&actor(&supervisor), call.id)
        .await
        .unwrap();

    let orphan = ctx
        .evaluations
        .get_evaluation_by_id(evaluation.id)
        .await
        .unwrap();
    assert!(orphan.is_none(), "evaluation must not survive its call");
}

#[tokio::test]
async fn evaluation_requires_an_existing_call() {
    let ctx = setup().await;
    let supervisor = seed_user(&ctx, "sup1", UserRole::Supervisor).await;

    let err = ctx
        .evaluation_service
        .create_evaluation(
            &actor(&supervisor),
            create_evaluation_input(9999, SubScores::default()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn overall_score_is_mean_of_present_subscores() {
    let ctx = setup().await;
    let operator = seed_user(&ctx, "op1", UserRole::Operator).await;
    let supervisor = seed_user(&ctx, "sup1", UserRole::Supervisor).await;

    let call = ctx
        .call_service
        .create_call(&actor(&operator), create_call_input(None))
        .await
        .unwrap();

    // {4, 5, absent, 3, absent, 5} -> (4+5+3+5)/4 = 4.25
    let evaluation = ctx
        .evaluation_service
        .create_evaluation(
            &actor(&supervisor),
            create_evaluation_input(
                call.id,
                SubScores {
                    greeting: Some(4),
                    communication: Some(5),
                    problem_solving: None,
                    empathy: Some(3),
                    procedure: None,
                    closing: Some(5),
                },
            ),
        )
        .await
        .unwrap();
    assert_eq!(evaluation.overall_score, 4.25);

    // No sub-scores at all -> 0.0, not null.
    let empty = ctx
        .evaluation_service
        .create_evaluation(
            &actor(&supervisor),
            create_evaluation_input(call.id, SubScores::default()),
        )
        .await
        .unwrap();
    assert_eq!(empty.overall_score, 0.0);
}

#[tokio::test]
async fn updating_subscores_recomputes_the_overall_score() {
    let ctx = setup().await;
    let operator = seed_user(&ctx, "op1", UserRole::Operator).await;
    let supervisor = seed_user(&ctx, "sup1", UserRole::Supervisor).await;

    let call = ctx
        .call_service
        .create_call(&actor(&operator), create_call_input(None))
        .await
        .unwrap();

    let evaluation = ctx
        .evaluation_service
        .create_evaluation(
            &actor(&supervisor),
            create_evaluation_input(
                call.id,
                SubScores {
                    greeting: Some(4),
                    communication: Some(5),
                    empathy: Some(3),
                    closing: Some(5),
                    ..Default::default()
                },
            ),
        )
        .await
        .unwrap();
    assert_eq!(evaluation.overall_score, 4.25);

    let updated = ctx
        .evaluation_service
        .update_evaluation(
            &actor(&supervisor),
            evaluation.id,
            EvaluationPatch {
                empathy_score: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Fresh mean of {4, 5, 4, 5}, not the stored 4.25.
    assert_eq!(updated.overall_score, 4.5);
}

#[tokio::test]
async fn only_the_evaluator_or_admin_updates_an_evaluation() {
    let ctx = setup().await;
    let operator = seed_user(&ctx, "op1", UserRole::Operator).await;
    let evaluator = seed_user(&ctx, "sup1", UserRole::Supervisor).await;
    let other_supervisor = seed_user(&ctx, "sup2", UserRole::Supervisor).await;
    let admin = seed_user(&ctx, "admin1", UserRole::Admin).await;

    let call = ctx
        .call_service
        .create_call(&actor(&operator), create_call_input(None))
        .await
        .unwrap();

    let evaluation = ctx
        .evaluation_service
        .create_evaluation(
            &actor(&evaluator),
            create_evaluation_input(call.id, SubScores::default()),
        )
        .await
        .unwrap();

    let patch = EvaluationPatch {
        greeting_score: Some(5),
        ..Default::default()
    };

    let err = ctx
        .evaluation_service
        .update_evaluation(&actor(&other_supervisor), evaluation.id, patch.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    ctx.evaluation_service
        .update_evaluation(&actor(&evaluator), evaluation.id, patch.clone())
        .await
        .unwrap();
    ctx.evaluation_service
        .update_evaluation(&actor(&admin), evaluation.id, patch)
        .await
        .unwrap();

    // Deletion stays admin-only.
    let err = ctx
        .evaluation_service
        .delete_evaluation(&actor(&evaluator), evaluation.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    ctx.evaluation_service
        .delete_evaluation(&actor(&admin), evaluation.id)
        .await
        .unwrap();
}

// ── Dashboard ──────────────────────────────────────────────────

#[tokio::test]
async fn window_boundary_is_inclusive_at_the_lower_edge() {
    let ctx = setup().await;
    let operator = seed_user(&ctx, "op1", UserRole::Operator).await;
    let admin = seed_user(&ctx, "admin1", UserRole::Admin).await;

    let recent = ctx
        .call_service
        .create_call(&actor(&operator), create_call_input(None))
        .await
        .unwrap();
    let old = ctx
        .call_service
        .create_call(&actor(&operator), create_call_input(None))
        .await
        .unwrap();
    assert!(recent.id != old.id);

    // 31 days ago, with a little slack so the 31-day window still
    // reaches it when the query runs moments later.
    backdate_call(&ctx.db, old.id, 31, 5).await;

    let narrow = ctx
        .dashboard
        .stats(&actor(&admin), Some(30))
        .await
        .unwrap();
    assert_eq!(narrow.calls.total, 1);

    let wide = ctx
        .dashboard
        .stats(&actor(&admin), Some(31))
        .await
        .unwrap();
    assert_eq!(wide.calls.total, 2);
}

#[tokio::test]
async fn stats_are_scoped_for_operators() {
    let ctx = setup().await;
    let op1 = seed_user(&ctx, "op1", UserRole::Operator).await;
    let op2 = seed_user(&ctx, "op2", UserRole::Operator).await;
    let supervisor = seed_user(&ctx, "sup1", UserRole::Supervisor).await;

    let own = ctx
        .call_service
        .create_call(&actor(&op1), create_call_input(None))
        .await
        .unwrap();
    let foreign = ctx
        .call_service
        .create_call(&actor(&op2), create_call_input(None))
        .await
        .unwrap();

    ctx.evaluation_service
        .create_evaluation(
            &actor(&supervisor),
            create_evaluation_input(
                own.id,
                SubScores {
                    greeting: Some(5),
                    ..Default::default()
                },
            ),
        )
        .await
        .unwrap();
    ctx.evaluation_service
        .create_evaluation(
            &actor(&supervisor),
            create_evaluation_input(
                foreign.id,
                SubScores {
                    greeting: Some(1),
                    ..Default::default()
                },
            ),
        )
        .await
        .unwrap();

    let mine = ctx.dashboard.stats(&actor(&op1), None).await.unwrap();
    assert_eq!(mine.calls.total, 1);
    assert_eq!(mine.evaluations.total, 1);
    assert_eq!(mine.evaluations.avg_overall_score, 5.0);

    let all = ctx.dashboard.stats(&actor(&supervisor), None).await.unwrap();
    assert_eq!(all.calls.total, 2);
    assert_eq!(all.evaluations.total, 2);
}

#[tokio::test]
async fn operator_performance_keeps_unevaluated_operators() {
    let ctx = setup().await;
    let evaluated = seed_user(&ctx, "op1", UserRole::Operator).await;
    let unevaluated = seed_user(&ctx, "op2", UserRole::Operator).await;
    let supervisor = seed_user(&ctx, "sup1", UserRole::Supervisor).await;
    let operator_actor = actor(&evaluated);

    let call = ctx
        .call_service
        .create_call(&operator_actor, create_call_input(None))
        .await
        .unwrap();
    ctx.call_service
        .create_call(&actor(&unevaluated), create_call_input(None))
        .await
        .unwrap();

    ctx.evaluation_service
        .create_evaluation(
            &actor(&supervisor),
            create_evaluation_input(
                call.id,
                SubScores {
                    greeting: Some(4),
                    communication: Some(4),
                    ..Default::default()
                },
            ),
        )
        .await
        .unwrap();

    let report = ctx
        .dashboard
        .operator_performance(&actor(&supervisor), None)
        .await
        .unwrap();

    assert_eq!(report.operators.len(), 2);

    let zero = report
        .operators
        .iter()
        .find(|o| o.operator_id == unevaluated.id)
        .expect("operator with zero evaluations still appears");
    assert_eq!(zero.avg_score, 0.0);
    assert_eq!(zero.total_calls, 1);

    let scored = report
        .operators
        .iter()
        .find(|o| o.operator_id == evaluated.id)
        .unwrap();
    assert_eq!(scored.avg_score, 4.0);

    // Operators themselves may not see this view.
    let err = ctx
        .dashboard
        .operator_performance(&operator_actor, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[tokio::test]
async fn recent_activity_is_scoped_and_limited() {
    let ctx = setup().await;
    let op1 = seed_user(&ctx, "op1", UserRole::Operator).await;
    let op2 = seed_user(&ctx, "op2", UserRole::Operator).await;

    for _ in 0..3 {
        ctx.call_service
            .create_call(&actor(&op1), create_call_input(None))
            .await
            .unwrap();
    }
    ctx.call_service
        .create_call(&actor(&op2), create_call_input(None))
        .await
        .unwrap();

    let activity = ctx
        .dashboard
        .recent_activity(&actor(&op1), Some(2))
        .await
        .unwrap();

    assert_eq!(activity.recent_calls.len(), 2);
    assert!(activity
        .recent_calls
        .iter()
        .all(|c| c.operator_id == op1.id));
}
