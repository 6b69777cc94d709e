// src/repository/latest.rs

//! ユーザーごとの「最新行」を解決するCTE
//!
//! 基準日以下で日付キーが最大の行を1ユーザー1行に絞る。
//! 同じ日付キーの行が複数ある場合はサロゲートIDが最大の行を採用する。

/// スナップショットの最新行CTE。`$n` は基準日の日付キー
pub fn latest_snapshot_cte(name: &str, as_of_param: usize) -> String {
    format!(
        r#"{name} AS (
            SELECT DISTINCT ON (s.user_key) s.*
            FROM fact_user_analytics_snapshot s
            WHERE s.snapshot_date_key <= ${p}
            ORDER BY s.user_key, s.snapshot_date_key DESC, s.fact_user_analytics_snapshot_id DESC
        )"#,
        name = name,
        p = as_of_param
    )
}

/// 日次アクティビティの最新行CTE。`$n` は基準日の日付キー
pub fn latest_activity_cte(name: &str, as_of_param: usize) -> String {
    format!(
        r#"{name} AS (
            SELECT DISTINCT ON (a.user_key) a.*
            FROM fact_user_daily_activity a
            WHERE a.date_key <= ${p}
            ORDER BY a.user_key, a.date_key DESC, a.fact_user_daily_activity_id DESC
        )"#,
        name = name,
        p = as_of_param
    )
}
