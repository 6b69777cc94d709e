// edretain-backend/src/service/seed_service.rs

//! 合成データによるウェアハウス投入
//!
//! 固定の5プラン、ユーザー、直近の日付ディメンション、キャンペーンとチャネル、
//! 日次アクティビティ、ファネルを守ったキャンペーン接触、ダッシュボード用の
//! レポーティングファクトを1トランザクションで書き込む。
//! プランとチャネルは自然キーで既存行を再利用し、レポーティングファクトは
//! 既に行がある日付を飛ばすので、繰り返し実行しても重複しない。

use crate::api::dto::common::DEFAULT_MODEL_TYPE;
use crate::db::DbPool;
use crate::domain::campaign_intent::CampaignIntent;
use crate::domain::date_key::{date_key_of, today};
use crate::domain::user_status::UserStatus;
use crate::domain::{
    campaign_performance_model, churn_reasons_model, dim_campaign_model, dim_channel_model,
    dim_date_model, dim_subscription_plan_model, dim_user_model, fact_campaign_interaction_model,
    fact_user_daily_activity_model, feature_importance_model, model_performance_metrics_model,
};
use crate::error::AppResult;
use crate::log_with_context;
use crate::repository::activity_repository::ActivityRepository;
use crate::repository::campaign_repository::CampaignRepository;
use crate::repository::date_repository::DateRepository;
use crate::repository::reporting_repository::ReportingRepository;
use crate::repository::subscription_plan_repository::SubscriptionPlanRepository;
use crate::repository::user_repository::UserRepository;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use sea_orm::{ActiveModelBehavior, Set, TransactionTrait};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// 1文あたりの行数（バインド変数の上限対策）
const INSERT_CHUNK_SIZE: usize = 1000;

/// (natural key, name, tier, billing cycle, price, certificate, mentoring, downloads)
type PlanFixture = (&'static str, &'static str, &'static str, &'static str, f64, bool, bool, bool);

const PLAN_FIXTURES: [PlanFixture; 5] = [
    ("PLAN_FREE_001", "Free Tier", "Free", "N/A", 0.0, false, false, false),
    ("PLAN_STD_MONTHLY_002", "Standard Monthly", "Standard", "Monthly", 14.99, true, false, true),
    ("PLAN_STD_ANNUAL_003", "Standard Annual", "Standard", "Annual", 149.99, true, false, true),
    ("PLAN_PREM_MONTHLY_004", "Premium Monthly", "Premium", "Monthly", 29.99, true, true, true),
    ("PLAN_PREM_ANNUAL_005", "Premium Annual", "Premium", "Annual", 299.99, true, true, true),
];

const CHANNEL_FIXTURES: [(&str, &str); 4] = [
    ("Email", "Digital channel, cost per message 0.01 USD"),
    ("Push Notification", "Digital channel, cost per message 0.005 USD"),
    ("SMS", "Digital channel, cost per message 0.05 USD"),
    ("In-App", "Digital channel, no per-message cost"),
];

const LOCATIONS: [(&str, &str); 10] = [
    ("Japan", "Tokyo"),
    ("Japan", "Osaka"),
    ("United States", "Austin"),
    ("United States", "Seattle"),
    ("Germany", "Berlin"),
    ("France", "Lyon"),
    ("India", "Bengaluru"),
    ("Brazil", "Sao Paulo"),
    ("Canada", "Toronto"),
    ("Australia", "Melbourne"),
];

const GENDERS: [&str; 2] = ["Male", "Female"];
const USER_TYPES: [&str; 3] = ["Individual", "Student", "Professional"];
const ACQUISITION_CHANNELS: [&str; 5] = [
    "Organic Search",
    "Social Media",
    "Referral",
    "Paid Ads",
    "Email Campaign",
];
const CAMPAIGN_WORDS: [&str; 8] = [
    "Spark", "Bridge", "Harbor", "Summit", "Compass", "Beacon", "Orbit", "Atlas",
];

/// チャーン予測モデルの特徴量と基準重要度
const CHURN_FEATURES: [(&str, f64); 8] = [
    ("days_since_last_login", 0.24),
    ("active_days_last_30d", 0.19),
    ("minutes_watched", 0.14),
    ("lessons_completed", 0.12),
    ("sessions_count", 0.10),
    ("quizzes_attempted", 0.08),
    ("distinct_courses_accessed", 0.07),
    ("is_premium", 0.06),
];

/// (カテゴリ, 表示名, 深刻度)
const CHURN_REASONS: [(&str, &str, &str); 6] = [
    ("price", "Too expensive", "High"),
    ("content", "Not enough relevant content", "Medium"),
    ("time", "Lack of time", "Medium"),
    ("technical", "Technical issues", "Low"),
    ("competitor", "Switched to a competitor", "High"),
    ("completed", "Completed learning goal", "Low"),
];

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub users: usize,
    pub days: u32,
    pub campaigns: usize,
    pub interactions: usize,
    /// 指定すると同じデータを再生成できる
    pub rng_seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            users: 1000,
            days: 90,
            campaigns: 50,
            interactions: 2000,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub plans: usize,
    pub users: usize,
    pub dates: u64,
    pub campaigns: usize,
    pub channels: usize,
    pub activities: usize,
    pub interactions: usize,
    pub reporting_rows: usize,
}

pub struct SeedService {
    db: DbPool,
}

impl SeedService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn seed(&self, options: &SeedOptions) -> AppResult<SeedSummary> {
        let mut rng = match options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let end_date = today();
        let days = options.days.max(1);
        let mut summary = SeedSummary::default();

        info!(
            users = options.users,
            days,
            campaigns = options.campaigns,
            interactions = options.interactions,
            "Seeding warehouse"
        );

        let txn = self.db.begin().await?;

        // プラン（自然キーが既にあれば再利用）
        let mut plan_keys = Vec::with_capacity(PLAN_FIXTURES.len());
        for fixture in PLAN_FIXTURES {
            let plan =
                match SubscriptionPlanRepository::find_by_natural_key_with(&txn, fixture.0).await? {
                    Some(existing) => existing,
                    None => {
                        summary.plans += 1;
                        SubscriptionPlanRepository::insert_with(&txn, plan_row(fixture)).await?
                    }
                };
            plan_keys.push(plan.subscription_plan_key);
        }

        // 日付
        let dates = date_window(end_date, days);
        let date_keys: Vec<i32> = dates.iter().map(|d| date_key_of(*d)).collect();
        summary.dates = DateRepository::insert_many_if_absent(
            &txn,
            dates
                .iter()
                .map(|d| dim_date_model::Model::from_full_date(*d))
                .collect(),
        )
        .await?;

        // ユーザー（既存件数の続きから自然キーを振る）
        let offset = UserRepository::count_with(&txn).await? as usize;
        let user_ids: Vec<String> = (1..=options.users)
            .map(|seq| format!("USER_{:06}", offset + seq))
            .collect();
        let users: Vec<_> = user_ids
            .iter()
            .map(|id| user_row(&mut rng, id.clone(), end_date, &plan_keys))
            .collect();
        for chunk in users.chunks(INSERT_CHUNK_SIZE) {
            UserRepository::insert_many(&txn, chunk.to_vec()).await?;
        }
        let user_keys: Vec<i32> = UserRepository::find_keys_by_natural_ids(&txn, user_ids)
            .await?
            .into_iter()
            .map(|(_, key)| key)
            .collect();
        summary.users = user_keys.len();

        // チャネル
        let mut channel_keys = HashMap::new();
        for (name, description) in CHANNEL_FIXTURES {
            let channel = match CampaignRepository::find_channel_by_name_with(&txn, name).await? {
                Some(existing) => existing,
                None => {
                    summary.channels += 1;
                    CampaignRepository::insert_channel_with(
                        &txn,
                        dim_channel_model::ActiveModel {
                            channel_name: Set(name.to_string()),
                            description: Set(Some(description.to_string())),
                            ..Default::default()
                        },
                    )
                    .await?
                }
            };
            channel_keys.insert(name, channel.channel_key);
        }

        // キャンペーン（ユーザーと同じく既存件数の続きから）
        let campaign_offset = CampaignRepository::count_campaigns_with(&txn).await? as usize;
        let mut campaigns = Vec::with_capacity(options.campaigns);
        for seq in 1..=options.campaigns {
            let row = campaign_row(&mut rng, campaign_offset + seq, end_date);
            let campaign = CampaignRepository::insert_campaign_with(&txn, row).await?;
            campaigns.push(campaign);
        }
        summary.campaigns = campaigns.len();

        // 日次アクティビティ
        if !user_keys.is_empty() {
            let mut pending = Vec::with_capacity(INSERT_CHUNK_SIZE);
            for date_key in &date_keys {
                for user_key in daily_active_users(&mut rng, &user_keys) {
                    pending.push(activity_row(&mut rng, user_key, *date_key, &plan_keys));
                    if pending.len() == INSERT_CHUNK_SIZE {
                        summary.activities += pending.len();
                        ActivityRepository::insert_many(&txn, std::mem::take(&mut pending))
                            .await?;
                    }
                }
            }
            summary.activities += pending.len();
            ActivityRepository::insert_many(&txn, pending).await?;
        }

        // キャンペーン接触
        let channel_key_list: Vec<i32> = channel_keys.values().copied().collect();
        if !user_keys.is_empty() && !campaigns.is_empty() && !channel_key_list.is_empty() {
            let mut rows = Vec::with_capacity(options.interactions);
            for _ in 0..options.interactions {
                let (Some(user_key), Some(campaign), Some(date_key), Some(channel_key)) = (
                    user_keys.choose(&mut rng),
                    campaigns.choose(&mut rng),
                    date_keys.choose(&mut rng),
                    channel_key_list.choose(&mut rng),
                ) else {
                    break;
                };
                rows.push(interaction_row(
                    &mut rng,
                    *user_key,
                    campaign.campaign_key,
                    *date_key,
                    *channel_key,
                ));
            }
            summary.interactions = rows.len();
            for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
                ActivityRepository::insert_many_interactions(&txn, chunk.to_vec()).await?;
            }
        }

        // レポーティングファクト（30日前と最新日）
        let fixture_dates: Vec<i32> = [
            date_key_of(end_date - Duration::days(30)),
            date_key_of(end_date),
        ]
        .into_iter()
        .filter(|key| date_keys.contains(key))
        .collect();
        for (index, snapshot_date_key) in fixture_dates.iter().enumerate() {
            if ReportingRepository::has_fixtures_for_date(&txn, *snapshot_date_key).await? {
                continue;
            }
            let drift = index as f64 * 0.01;
            summary.reporting_rows +=
                seed_reporting(&txn, &mut rng, *snapshot_date_key, &campaigns, drift).await?;
        }

        txn.commit().await?;

        log_with_context!(
            tracing::Level::INFO,
            "Warehouse seeded",
            "users" => summary.users,
            "activities" => summary.activities,
            "interactions" => summary.interactions,
            "reporting_rows" => summary.reporting_rows
        );

        Ok(summary)
    }
}

/// ダッシュボード表示用のレポーティングファクト
async fn seed_reporting<C>(
    conn: &C,
    rng: &mut StdRng,
    snapshot_date_key: i32,
    campaigns: &[dim_campaign_model::Model],
    drift: f64,
) -> AppResult<usize>
where
    C: sea_orm::ConnectionTrait,
{
    let now = Utc::now();

    let features: Vec<_> = CHURN_FEATURES
        .iter()
        .enumerate()
        .map(|(rank, (name, base))| feature_importance_model::ActiveModel {
            snapshot_date_key: Set(snapshot_date_key),
            model_type: Set(DEFAULT_MODEL_TYPE.to_string()),
            model_version: Set(Some("fixture-v1".to_string())),
            feature_name: Set(name.to_string()),
            importance_score: Set(base + drift / (rank as f64 + 1.0)),
            importance_rank: Set(rank as i32 + 1),
            created_at: Set(now),
            ..Default::default()
        })
        .collect();

    let mut reason_counts: Vec<i32> = CHURN_REASONS
        .iter()
        .map(|_| rng.gen_range(10..120))
        .collect();
    reason_counts.sort_unstable_by(|a, b| b.cmp(a));
    let total_reasons: i32 = reason_counts.iter().sum();
    let reasons: Vec<_> = CHURN_REASONS
        .iter()
        .zip(reason_counts)
        .map(|((category, display, severity), count)| churn_reasons_model::ActiveModel {
            snapshot_date_key: Set(snapshot_date_key),
            reason_category: Set(category.to_string()),
            reason_display_name: Set(Some(display.to_string())),
            reason_count: Set(count),
            reason_pct: Set(Some(count as f64 * 100.0 / total_reasons as f64)),
            avg_churn_probability: Set(Some(rng.gen_range(0.55..0.9))),
            severity_level: Set(Some(severity.to_string())),
            created_at: Set(now),
            ..Default::default()
        })
        .collect();

    let performance: Vec<_> = campaigns
        .iter()
        .take(10)
        .map(|campaign| campaign_performance_row(rng, campaign, snapshot_date_key))
        .collect();

    let model = model_performance_metrics_model::ActiveModel {
        snapshot_date_key: Set(snapshot_date_key),
        model_type: Set(DEFAULT_MODEL_TYPE.to_string()),
        model_version: Set(Some("fixture-v1".to_string())),
        accuracy: Set(Some(0.85 + drift)),
        precision: Set(Some(0.78 + drift)),
        recall: Set(Some(0.72 + drift)),
        f1_score: Set(Some(0.75 + drift)),
        auc_roc: Set(Some(0.89 + drift)),
        train_samples: Set(Some(8000)),
        test_samples: Set(Some(2000)),
        true_negatives: Set(Some(1300)),
        false_positives: Set(Some(140)),
        false_negatives: Set(Some(160)),
        true_positives: Set(Some(400)),
        created_at: Set(now),
        ..Default::default()
    };

    let written = features.len() + reasons.len() + performance.len() + 1;
    ReportingRepository::insert_feature_importance(conn, features).await?;
    ReportingRepository::insert_churn_reasons(conn, reasons).await?;
    ReportingRepository::insert_campaign_performance(conn, performance).await?;
    ReportingRepository::insert_model_performance(conn, vec![model]).await?;
    Ok(written)
}

fn plan_row(fixture: PlanFixture) -> dim_subscription_plan_model::ActiveModel {
    let (nk, name, tier, cycle, price, certificate, mentoring, downloads) = fixture;
    dim_subscription_plan_model::ActiveModel {
        plan_id_nk: Set(nk.to_string()),
        plan_name: Set(name.to_string()),
        tier: Set(tier.to_string()),
        billing_cycle: Set(cycle.to_string()),
        base_price: Set(price),
        currency: Set("USD".to_string()),
        has_certificate: Set(Some(certificate)),
        has_mentoring: Set(Some(mentoring)),
        has_downloads: Set(Some(downloads)),
        ..Default::default()
    }
}

/// end_date を含む直近 days 日
fn date_window(end_date: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..i64::from(days))
        .rev()
        .map(|offset| end_date - Duration::days(offset))
        .collect()
}

/// 重み付き選択。重みの合計が0なら先頭
fn weighted_choice<T: Copy>(rng: &mut StdRng, choices: &[(T, f64)]) -> T {
    let total: f64 = choices.iter().map(|(_, w)| w).sum();
    let mut point = rng.gen::<f64>() * total;
    for (value, weight) in choices {
        if point < *weight {
            return *value;
        }
        point -= weight;
    }
    choices[choices.len() - 1].0
}

/// 初期プランに応じたプレミアム経験とライフサイクル状態
fn lifecycle_for_plan(rng: &mut StdRng, plan_index: usize) -> (bool, UserStatus) {
    use UserStatus::*;
    match plan_index {
        3 | 4 => (
            true,
            weighted_choice(
                rng,
                &[(Active, 0.65), (Cancelled, 0.15), (Paused, 0.10), (Downgraded, 0.10)],
            ),
        ),
        1 | 2 => {
            if rng.gen_bool(0.30) {
                (
                    true,
                    weighted_choice(
                        rng,
                        &[(Active, 0.60), (Downgraded, 0.20), (Paused, 0.10), (Cancelled, 0.10)],
                    ),
                )
            } else {
                (
                    false,
                    weighted_choice(rng, &[(Active, 0.50), (Cancelled, 0.35), (Paused, 0.15)]),
                )
            }
        }
        _ => {
            if rng.gen_bool(0.10) {
                (
                    true,
                    weighted_choice(rng, &[(Active, 0.50), (Downgraded, 0.30), (Cancelled, 0.20)]),
                )
            } else {
                (
                    false,
                    weighted_choice(rng, &[(Active, 0.30), (Inactive, 0.40), (Churned, 0.30)]),
                )
            }
        }
    }
}

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values[rng.gen_range(0..values.len())]
}

fn user_row(
    rng: &mut StdRng,
    user_id_nk: String,
    end_date: NaiveDate,
    plan_keys: &[i32],
) -> dim_user_model::ActiveModel {
    let signup_date = end_date - Duration::days(rng.gen_range(0..=3 * 365));
    let birth_date = NaiveDate::from_ymd_opt(
        end_date.year() - rng.gen_range(16..=70),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
    )
    .and_then(|d| d.and_hms_opt(0, 0, 0));

    let plan_index = rng.gen_range(0..plan_keys.len().max(1));
    let (is_premium_ever, status) = lifecycle_for_plan(rng, plan_index);
    let (country, city) = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];

    let mut user = dim_user_model::ActiveModel::new();
    user.user_id_nk = Set(user_id_nk);
    user.signup_date_key = Set(date_key_of(signup_date));
    user.birth_date = Set(birth_date);
    user.gender = Set(Some(pick(rng, &GENDERS).to_string()));
    user.country = Set(Some(country.to_string()));
    user.city = Set(Some(city.to_string()));
    user.user_type = Set(Some(pick(rng, &USER_TYPES).to_string()));
    user.acquisition_channel = Set(Some(pick(rng, &ACQUISITION_CHANNELS).to_string()));
    user.initial_plan_key = Set(plan_keys.get(plan_index).copied());
    user.is_premium_ever = Set(Some(is_premium_ever));
    user.current_status = Set(Some(status.as_str().to_string()));
    user
}

fn campaign_row(rng: &mut StdRng, seq: usize, end_date: NaiveDate) -> dim_campaign_model::ActiveModel {
    let intents = CampaignIntent::all();
    let intent = intents[rng.gen_range(0..intents.len())];
    let start_date = end_date - Duration::days(rng.gen_range(0..365));
    let end = start_date + Duration::days(rng.gen_range(7..=90));

    dim_campaign_model::ActiveModel {
        campaign_id_nk: Set(format!("CAMP_{:04}", seq)),
        campaign_name: Set(format!(
            "{} Campaign {}",
            intent.as_str(),
            pick(rng, &CAMPAIGN_WORDS)
        )),
        campaign_type: Set(Some(intent.as_str().to_string())),
        target_risk_segment: Set(Some(pick(rng, intent.target_segments()).to_string())),
        offer_type: Set(Some(pick(rng, intent.offers()).to_string())),
        default_channel: Set(Some(pick(rng, intent.channels()).to_string())),
        start_date_key: Set(Some(date_key_of(start_date))),
        end_date_key: Set(Some(date_key_of(end))),
        ..Default::default()
    }
}

/// その日にアクティビティ行を持つユーザー（全体の30〜80%）
fn daily_active_users(rng: &mut StdRng, user_keys: &[i32]) -> Vec<i32> {
    let total = user_keys.len();
    let low = (total * 3 / 10).max(1);
    let high = (total * 8 / 10).max(low);
    let amount = rng.gen_range(low..=high).min(total);
    index::sample(rng, total, amount)
        .into_iter()
        .map(|i| user_keys[i])
        .collect()
}

fn activity_row(
    rng: &mut StdRng,
    user_key: i32,
    date_key: i32,
    plan_keys: &[i32],
) -> fact_user_daily_activity_model::ActiveModel {
    let active = rng.gen_bool(0.7);
    let (logins, sessions, minutes, lessons, quizzes, courses, active_days, days_since) = if active
    {
        (
            rng.gen_range(1..=5),
            rng.gen_range(1..=8),
            rng.gen_range(10..=300),
            rng.gen_range(0..=10),
            rng.gen_range(0..=5),
            rng.gen_range(1..=3),
            rng.gen_range(1..=30),
            rng.gen_range(0..=7),
        )
    } else {
        (0, 0, 0, 0, 0, 0, rng.gen_range(0..=15), rng.gen_range(8..=60))
    };

    fact_user_daily_activity_model::ActiveModel {
        user_key: Set(user_key),
        date_key: Set(date_key),
        subscription_plan_key: Set(plan_keys.choose(rng).copied()),
        campaign_key: Set(None),
        is_premium: Set(Some(rng.gen_bool(0.5))),
        has_active_subscription: Set(Some(rng.gen_bool(0.5))),
        logins_count: Set(Some(logins)),
        sessions_count: Set(Some(sessions)),
        minutes_watched: Set(Some(minutes)),
        lessons_completed: Set(Some(lessons)),
        quizzes_attempted: Set(Some(quizzes)),
        distinct_courses_accessed: Set(Some(courses)),
        active_days_last_30d: Set(Some(active_days)),
        days_since_last_login: Set(Some(days_since)),
        is_inactive_7d_flag: Set(Some(days_since > 7)),
        active_courses_count: Set(Some(courses)),
        completed_courses_total: Set(Some(rng.gen_range(0..=12))),
        ..Default::default()
    }
}

/// 送信 → 開封(80%) → クリック(50%) → コンバージョン(20%)
fn interaction_row(
    rng: &mut StdRng,
    user_key: i32,
    campaign_key: i32,
    date_key: i32,
    channel_key: i32,
) -> fact_campaign_interaction_model::ActiveModel {
    let opened = rng.gen_bool(0.8);
    let clicked = opened && rng.gen_bool(0.5);
    let converted = clicked && rng.gen_bool(0.2);

    fact_campaign_interaction_model::ActiveModel {
        user_key: Set(user_key),
        campaign_key: Set(campaign_key),
        date_key: Set(date_key),
        channel_key: Set(channel_key),
        sent_flag: Set(true),
        opened_flag: Set(opened),
        clicked_flag: Set(clicked),
        converted_flag: Set(converted),
        time_to_conversion_days: Set(converted.then(|| rng.gen_range(0..=7))),
        ..Default::default()
    }
}

fn campaign_performance_row(
    rng: &mut StdRng,
    campaign: &dim_campaign_model::Model,
    snapshot_date_key: i32,
) -> campaign_performance_model::ActiveModel {
    let users_sent = rng.gen_range(200..2000);
    let open_rate: f64 = rng.gen_range(0.3..0.8);
    let users_opened = (users_sent as f64 * open_rate).round() as i32;
    let control_retention: f64 = rng.gen_range(0.55..0.75);
    let lift: f64 = rng.gen_range(-0.02..0.15);
    let campaign_retention = (control_retention + lift).min(1.0);
    let active = campaign
        .end_date_key
        .map_or(true, |end| end >= snapshot_date_key);

    campaign_performance_model::ActiveModel {
        snapshot_date_key: Set(snapshot_date_key),
        campaign_key: Set(Some(campaign.campaign_key)),
        campaign_name: Set(campaign.campaign_name.clone()),
        target_segment: Set(campaign.target_risk_segment.clone()),
        launch_date: Set(campaign.start_date_key),
        users_sent: Set(users_sent),
        users_opened: Set(users_opened),
        open_rate: Set(users_opened as f64 / users_sent as f64),
        campaign_retention_rate: Set(campaign_retention),
        control_retention_rate: Set(control_retention),
        retention_lift: Set(campaign_retention - control_retention),
        campaign_churn_rate: Set(Some(1.0 - campaign_retention)),
        control_churn_rate: Set(Some(1.0 - control_retention)),
        campaign_size: Set(Some(users_sent)),
        control_size: Set(Some(users_sent / 4)),
        status: Set(if active { "Active" } else { "Completed" }.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fact_campaign_interaction_model::FunnelFlags;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_date_window_ends_at_end_date() {
        let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let window = date_window(end, 90);
        assert_eq!(window.len(), 90);
        assert_eq!(window.last(), Some(&end));
        assert_eq!(window[0], NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_generated_interactions_respect_funnel() {
        let mut rng = rng();
        for _ in 0..500 {
            let row = interaction_row(&mut rng, 1, 1, 20250101, 1);
            let flags = FunnelFlags {
                sent: *row.sent_flag.as_ref(),
                opened: *row.opened_flag.as_ref(),
                clicked: *row.clicked_flag.as_ref(),
                converted: *row.converted_flag.as_ref(),
            };
            assert!(flags.is_monotonic());
            assert_eq!(
                row.time_to_conversion_days.as_ref().is_some(),
                flags.converted
            );
        }
    }

    #[test]
    fn test_free_plan_statuses_stay_in_vocabulary() {
        let mut rng = rng();
        for _ in 0..200 {
            let (premium, status) = lifecycle_for_plan(&mut rng, 0);
            if !premium {
                assert!(matches!(
                    status,
                    UserStatus::Active | UserStatus::Inactive | UserStatus::Churned
                ));
            }
        }
    }

    #[test]
    fn test_daily_active_users_are_distinct_subset() {
        let mut rng = rng();
        let keys: Vec<i32> = (1..=100).collect();
        let mut sample = daily_active_users(&mut rng, &keys);
        assert!((30..=80).contains(&sample.len()));
        sample.sort_unstable();
        sample.dedup();
        assert!((30..=80).contains(&sample.len()));
    }

    #[test]
    fn test_campaign_rows_follow_intent_tables() {
        let mut rng = rng();
        let end = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        for seq in 1..=20 {
            let row = campaign_row(&mut rng, seq, end);
            let campaign_type = row.campaign_type.as_ref().clone().unwrap();
            let intent = CampaignIntent::all()
                .into_iter()
                .find(|i| i.as_str() == campaign_type)
                .unwrap();
            let offer = row.offer_type.as_ref().clone().unwrap();
            assert!(intent.offers().contains(&offer.as_str()));
            assert!(row.start_date_key.as_ref() <= row.end_date_key.as_ref());
        }
    }
}
