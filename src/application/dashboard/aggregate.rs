//! Dashboard aggregation over explicitly fetched rows.
//!
//! Repositories hand these functions the window-filtered calls and
//! evaluations; everything here is pure so the aggregate semantics are
//! directly testable. The evaluation-to-operator attribution goes
//! through the call table, visible in [`operator_performance`].

use std::collections::{BTreeMap, HashMap};

use crate::domain::{Call, Evaluation, User};

/// Calls with no category aggregate under their own bucket, keyed by the
/// literal string "null".
pub const UNCATEGORIZED_KEY: &str = "null";

/// Grouped call counts and the mean duration within one window.
#[derive(Debug, Clone, PartialEq)]
pub struct CallAggregates {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_priority: BTreeMap<String, u64>,
    pub by_category: BTreeMap<String, u64>,
    /// Mean over calls with a recorded duration; 0 when none have one.
    pub avg_duration_seconds: f64,
}

pub fn aggregate_calls(calls: &[Call]) -> CallAggregates {
    let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_priority: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_category: BTreeMap<String, u64> = BTreeMap::new();

    let mut duration_sum: i64 = 0;
    let mut duration_count: u64 = 0;

    for call in calls {
        *by_status.entry(call.status.as_str().to_string()).or_insert(0) += 1;
        *by_priority
            .entry(call.priority.as_str().to_string())
            .or_insert(0) += 1;

        let category = call
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED_KEY.to_string());
        *by_category.entry(category).or_insert(0) += 1;

        if let Some(duration) = call.duration_seconds {
            duration_sum += duration as i64;
            duration_count += 1;
        }
    }

    let avg_duration_seconds = if duration_count > 0 {
        duration_sum as f64 / duration_count as f64
    } else {
        0.0
    };

    CallAggregates {
        total: calls.len() as u64,
        by_status,
        by_priority,
        by_category,
        avg_duration_seconds,
    }
}

/// Evaluation counts, mean score and flag counts within one window.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationAggregates {
    pub total: u64,
    /// Mean overall score; 0 when there are no evaluations.
    pub avg_overall_score: f64,
    pub coaching_needed: u64,
    pub exemplary: u64,
}

pub fn aggregate_evaluations(evaluations: &[Evaluation]) -> EvaluationAggregates {
    let total = evaluations.len() as u64;

    let avg_overall_score = if total > 0 {
        evaluations.iter().map(|e| e.overall_score).sum::<f64>() / total as f64
    } else {
        0.0
    };

    EvaluationAggregates {
        total,
        avg_overall_score,
        coaching_needed: evaluations.iter().filter(|e| e.requires_coaching).count() as u64,
        exemplary: evaluations.iter().filter(|e| e.is_exemplary).count() as u64,
    }
}

/// One operator's row in the performance view.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorPerformance {
    pub operator_id: i32,
    pub operator_name: String,
    pub total_calls: u64,
    pub avg_duration_seconds: f64,
    /// Mean score of the evaluations attached to this operator's calls;
    /// 0 when there are none, the operator still appears.
    pub avg_score: f64,
}

/// Group the window's calls by operator and attribute each evaluation to
/// the operator of its parent call. Operators with calls but no
/// evaluations get an `avg_score` of 0 rather than being dropped.
pub fn operator_performance(
    operators: &[User],
    calls: &[Call],
    evaluations: &[Evaluation],
) -> Vec<OperatorPerformance> {
    let names: HashMap<i32, &str> = operators
        .iter()
        .map(|u| (u.id, u.full_name.as_str()))
        .collect();

    let call_owner: HashMap<i32, i32> = calls.iter().map(|c| (c.id, c.operator_id)).collect();

    struct Acc {
        calls: u64,
        duration_sum: i64,
        duration_count: u64,
        score_sum: f64,
        score_count: u64,
    }

    let mut per_operator: BTreeMap<i32, Acc> = BTreeMap::new();

    for call in calls {
        let acc = per_operator.entry(call.operator_id).or_insert(Acc {
            calls: 0,
            duration_sum: 0,
            duration_count: 0,
            score_sum: 0.0,
            score_count: 0,
        });
        acc.calls += 1;
        if let Some(duration) = call.duration_seconds {
            acc.duration_sum += duration as i64;
            acc.duration_count += 1;
        }
    }

    for evaluation in evaluations {
        let Some(&operator_id) = call_owner.get(&evaluation.call_id) else {
            continue;
        };
        if let Some(acc) = per_operator.get_mut(&operator_id) {
            acc.score_sum += evaluation.overall_score;
            acc.score_count += 1;
        }
    }

    per_operator
        .into_iter()
        .map(|(operator_id, acc)| OperatorPerformance {
            operator_id,
            operator_name: names.get(&operator_id).copied().unwrap_or("").to_string(),
            total_calls: acc.calls,
            avg_duration_seconds: if acc.duration_count > 0 {
                acc.duration_sum as f64 / acc.duration_count as f64
            } else {
                0.0
            },
            avg_score: if acc.score_count > 0 {
                acc.score_sum / acc.score_count as f64
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CallPriority, CallStatus, UserRole};
    use chrono::Utc;

    fn call(id: i32, operator_id: i32, category: Option<&str>, duration: Option<i32>) -> Call {
        let now = Utc::now();
        Call {
            id,
            protocol: format!("CALL-20250101120000-{:06}", id),
            operator_id,
            customer_name: "Customer".into(),
            customer_phone: None,
            customer_email: None,
            subject: "Subject".into(),
            description: None,
            category: category.map(String::from),
            priority: CallPriority::Medium,
            status: CallStatus::Open,
            duration_seconds: duration,
            recording_url: None,
            notes: None,
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }

    fn evaluation(id: i32, call_id: i32, overall: f64, coaching: bool, exemplary: bool) -> Evaluation {
        let now = Utc::now();
        Evaluation {
            id,
            call_id,
            evaluator_id: 1,
            greeting_score: None,
            communication_score: None,
            problem_solving_score: None,
            empathy_score: None,
            procedure_score: None,
            closing_score: None,
            overall_score: overall,
            positive_points: None,
            improvement_points: None,
            general_comments: None,
            requires_coaching: coaching,
            is_exemplary: exemplary,
            created_at: now,
            updated_at: now,
        }
    }

    fn operator(id: i32, name: &str) -> User {
        let now = Utc::now();
        User {
            id,
            username: format!("op{}", id),
            email: format!("op{}@example.com", id),
            password_hash: String::new(),
            full_name: name.into(),
            role: UserRole::Operator,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    #[test]
    fn missing_category_gets_its_own_bucket() {
        let calls = vec![
            call(1, 1, Some("support"), None),
            call(2, 1, None, None),
            call(3, 1, None, None),
        ];
        let agg = aggregate_calls(&calls);
        assert_eq!(agg.by_category.get("support"), Some(&1));
        assert_eq!(agg.by_category.get(UNCATEGORIZED_KEY), Some(&2));
    }

    #[test]
    fn avg_duration_skips_calls_without_one() {
        let calls = vec![
            call(1, 1, None, Some(120)),
            call(2, 1, None, Some(240)),
            call(3, 1, None, None),
        ];
        assert_eq!(aggregate_calls(&calls).avg_duration_seconds, 180.0);
        assert_eq!(aggregate_calls(&[]).avg_duration_seconds, 0.0);
    }

    #[test]
    fn evaluation_aggregates_count_flags_and_mean() {
        let evals = vec![
            evaluation(1, 1, 4.0, true, false),
            evaluation(2, 1, 5.0, false, true),
            evaluation(3, 2, 3.0, true, false),
        ];
        let agg = aggregate_evaluations(&evals);
        assert_eq!(agg.total, 3);
        assert_eq!(agg.avg_overall_score, 4.0);
        assert_eq!(agg.coaching_needed, 2);
        assert_eq!(agg.exemplary, 1);

        let empty = aggregate_evaluations(&[]);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.avg_overall_score, 0.0);
    }

    #[test]
    fn operator_without_evaluations_still_appears() {
        let operators = vec![operator(1, "With Evals"), operator(2, "No Evals")];
        let calls = vec![call(10, 1, None, Some(100)), call(11, 2, None, None)];
        let evals = vec![evaluation(100, 10, 4.5, false, false)];

        let rows = operator_performance(&operators, &calls, &evals);
        assert_eq!(rows.len(), 2);

        let no_evals = rows.iter().find(|r| r.operator_id == 2).unwrap();
        assert_eq!(no_evals.operator_name, "No Evals");
        assert_eq!(no_evals.total_calls, 1);
        assert_eq!(no_evals.avg_score, 0.0);
    }

    #[test]
    fn evaluations_attribute_through_the_parent_call() {
        let operators = vec![operator(1, "One"), operator(2, "Two")];
        let calls = vec![
            call(10, 1, None, Some(60)),
            call(11, 1, None, Some(120)),
            call(12, 2, None, None),
        ];
        let evals = vec![
            evaluation(100, 10, 4.0, false, false),
            evaluation(101, 11, 2.0, false, false),
            evaluation(102, 12, 5.0, false, false),
        ];

        let rows = operator_performance(&operators, &calls, &evals);

        let one = rows.iter().find(|r| r.operator_id == 1).unwrap();
        assert_eq!(one.total_calls, 2);
        assert_eq!(one.avg_duration_seconds, 90.0);
        assert_eq!(one.avg_score, 3.0);

        let two = rows.iter().find(|r| r.operator_id == 2).unwrap();
        assert_eq!(two.avg_duration_seconds, 0.0);
        assert_eq!(two.avg_score, 5.0);
    }
}
