// edretain-backend/src/service/warehouse_service.rs

//! ウェアハウスのディメンション・ファクトに対するCRUD

use crate::api::dto::warehouse_dto::{
    CampaignRequest, ChannelRequest, CreateActivityRequest, CreateInteractionRequest,
    CreatePlanRequest, CreateUserRequest, DateRequest, IngestSnapshotRequest, UpdatePlanRequest,
    UpdateUserRequest,
};
use crate::domain::date_key::today_key;
use crate::domain::subscription_tier::SubscriptionTier;
use crate::domain::user_status::UserStatus;
use crate::domain::{
    dim_campaign_model, dim_channel_model, dim_date_model, dim_subscription_plan_model,
    dim_user_model, fact_campaign_interaction_model, fact_user_analytics_snapshot_model,
    fact_user_daily_activity_model,
};
use crate::error::{AppError, AppResult};
use crate::repository::activity_repository::ActivityRepository;
use crate::repository::campaign_repository::CampaignRepository;
use crate::repository::date_repository::DateRepository;
use crate::repository::snapshot_repository::SnapshotRepository;
use crate::repository::subscription_plan_repository::SubscriptionPlanRepository;
use crate::repository::user_repository::UserRepository;
use crate::utils::error_helper::{
    conflict_error, delete_error, not_found_error, validation_error,
};
use sea_orm::{ActiveModelBehavior, IntoActiveModel, Set};
use std::sync::Arc;
use tracing::info;

fn normalize_status(status: Option<String>) -> AppResult<Option<String>> {
    status
        .map(|s| {
            UserStatus::from_str(&s)
                .map(|st| st.as_str().to_string())
                .ok_or_else(|| validation_error("current_status", "unknown lifecycle status"))
        })
        .transpose()
}

fn normalize_tier(tier: &str) -> AppResult<String> {
    SubscriptionTier::from_str(tier)
        .map(|t| t.as_str().to_string())
        .ok_or_else(|| validation_error("tier", "unknown subscription tier"))
}

pub struct WarehouseService {
    user_repo: Arc<UserRepository>,
    plan_repo: Arc<SubscriptionPlanRepository>,
    date_repo: Arc<DateRepository>,
    campaign_repo: Arc<CampaignRepository>,
    activity_repo: Arc<ActivityRepository>,
    snapshot_repo: Arc<SnapshotRepository>,
}

impl WarehouseService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        plan_repo: Arc<SubscriptionPlanRepository>,
        date_repo: Arc<DateRepository>,
        campaign_repo: Arc<CampaignRepository>,
        activity_repo: Arc<ActivityRepository>,
        snapshot_repo: Arc<SnapshotRepository>,
    ) -> Self {
        Self {
            user_repo,
            plan_repo,
            date_repo,
            campaign_repo,
            activity_repo,
            snapshot_repo,
        }
    }

    // --- ユーザー ---

    pub async fn list_users(&self, offset: u64, limit: u64) -> AppResult<Vec<dim_user_model::Model>> {
        Ok(self.user_repo.find_page(offset, limit).await?)
    }

    pub async fn get_user(&self, user_key: i32) -> AppResult<dim_user_model::Model> {
        self.user_repo
            .find_by_key(user_key)
            .await?
            .ok_or_else(|| not_found_error("User", &user_key.to_string(), "get_user"))
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<dim_user_model::Model> {
        if self
            .user_repo
            .find_by_natural_key(&request.user_id_nk)
            .await?
            .is_some()
        {
            return Err(conflict_error(
                &format!("User '{}' already exists", request.user_id_nk),
                "create_user",
            ));
        }

        let mut user = dim_user_model::ActiveModel::new();
        user.user_id_nk = Set(request.user_id_nk);
        user.signup_date_key = Set(request.signup_date_key);
        user.birth_date = Set(request.birth_date.and_then(|d| d.and_hms_opt(0, 0, 0)));
        user.gender = Set(request.gender);
        user.country = Set(request.country);
        user.city = Set(request.city);
        user.user_type = Set(request.user_type);
        user.acquisition_channel = Set(request.acquisition_channel);
        user.initial_plan_key = Set(request.initial_plan_key);
        user.is_premium_ever = Set(request.is_premium_ever);
        user.current_status = Set(normalize_status(request.current_status)?);

        let created = self.user_repo.create(user).await?;
        info!(user_key = created.user_key, user_id_nk = %created.user_id_nk, "User created");
        Ok(created)
    }

    pub async fn update_user(
        &self,
        user_key: i32,
        request: UpdateUserRequest,
    ) -> AppResult<dim_user_model::Model> {
        let mut user = self.get_user(user_key).await?.into_active_model();

        if let Some(birth_date) = request.birth_date {
            user.birth_date = Set(birth_date.and_hms_opt(0, 0, 0));
        }
        if let Some(gender) = request.gender {
            user.gender = Set(Some(gender));
        }
        if let Some(country) = request.country {
            user.country = Set(Some(country));
        }
        if let Some(city) = request.city {
            user.city = Set(Some(city));
        }
        if let Some(user_type) = request.user_type {
            user.user_type = Set(Some(user_type));
        }
        if let Some(channel) = request.acquisition_channel {
            user.acquisition_channel = Set(Some(channel));
        }
        if let Some(plan_key) = request.initial_plan_key {
            user.initial_plan_key = Set(Some(plan_key));
        }
        if let Some(flag) = request.is_premium_ever {
            user.is_premium_ever = Set(Some(flag));
        }
        if request.current_status.is_some() {
            user.current_status = Set(normalize_status(request.current_status)?);
        }

        Ok(self.user_repo.update(user).await?)
    }

    pub async fn delete_user(&self, user_key: i32) -> AppResult<()> {
        let result = self
            .user_repo
            .delete(user_key)
            .await
            .map_err(|e| delete_error(e, "User", &user_key.to_string(), "delete_user"))?;
        if result.rows_affected == 0 {
            return Err(not_found_error("User", &user_key.to_string(), "delete_user"));
        }
        info!(user_key, "User deleted");
        Ok(())
    }

    // --- サブスクリプションプラン ---

    pub async fn list_plans(&self) -> AppResult<Vec<dim_subscription_plan_model::Model>> {
        Ok(self.plan_repo.find_all().await?)
    }

    pub async fn get_plan(&self, plan_key: i32) -> AppResult<dim_subscription_plan_model::Model> {
        self.plan_repo
            .find_by_key(plan_key)
            .await?
            .ok_or_else(|| not_found_error("Subscription plan", &plan_key.to_string(), "get_plan"))
    }

    pub async fn create_plan(
        &self,
        request: CreatePlanRequest,
    ) -> AppResult<dim_subscription_plan_model::Model> {
        let plan = dim_subscription_plan_model::ActiveModel {
            plan_id_nk: Set(request.plan_id_nk),
            plan_name: Set(request.plan_name),
            tier: Set(normalize_tier(&request.tier)?),
            billing_cycle: Set(request.billing_cycle),
            base_price: Set(request.base_price),
            currency: Set(request.currency.to_uppercase()),
            has_certificate: Set(request.has_certificate),
            has_mentoring: Set(request.has_mentoring),
            has_downloads: Set(request.has_downloads),
            ..Default::default()
        };
        Ok(self.plan_repo.create(plan).await?)
    }

    pub async fn update_plan(
        &self,
        plan_key: i32,
        request: UpdatePlanRequest,
    ) -> AppResult<dim_subscription_plan_model::Model> {
        let mut plan = self.get_plan(plan_key).await?.into_active_model();

        if let Some(name) = request.plan_name {
            plan.plan_name = Set(name);
        }
        if let Some(tier) = request.tier {
            plan.tier = Set(normalize_tier(&tier)?);
        }
        if let Some(cycle) = request.billing_cycle {
            plan.billing_cycle = Set(cycle);
        }
        if let Some(price) = request.base_price {
            plan.base_price = Set(price);
        }
        if let Some(currency) = request.currency {
            plan.currency = Set(currency.to_uppercase());
        }
        if let Some(flag) = request.has_certificate {
            plan.has_certificate = Set(Some(flag));
        }
        if let Some(flag) = request.has_mentoring {
            plan.has_mentoring = Set(Some(flag));
        }
        if let Some(flag) = request.has_downloads {
            plan.has_downloads = Set(Some(flag));
        }

        Ok(self.plan_repo.update(plan).await?)
    }

    pub async fn delete_plan(&self, plan_key: i32) -> AppResult<()> {
        let result = self
            .plan_repo
            .delete(plan_key)
            .await
            .map_err(|e| {
                delete_error(e, "Subscription plan", &plan_key.to_string(), "delete_plan")
            })?;
        if result.rows_affected == 0 {
            return Err(not_found_error(
                "Subscription plan",
                &plan_key.to_string(),
                "delete_plan",
            ));
        }
        Ok(())
    }

    // --- 日付 ---

    pub async fn list_dates(&self, from_key: i32, to_key: i32) -> AppResult<Vec<dim_date_model::Model>> {
        Ok(self.date_repo.find_range(from_key, to_key).await?)
    }

    pub async fn get_date(&self, date_key: i32) -> AppResult<dim_date_model::Model> {
        self.date_repo
            .find_by_key(date_key)
            .await?
            .ok_or_else(|| not_found_error("Date", &date_key.to_string(), "get_date"))
    }

    /// 既存の日付キーなら 409
    pub async fn create_date(&self, request: DateRequest) -> AppResult<dim_date_model::Model> {
        let row = dim_date_model::Model::from_full_date(request.full_date);
        if self.date_repo.find_by_key(row.date_key).await?.is_some() {
            return Err(conflict_error(
                &format!("Date {} already exists", row.date_key),
                "create_date",
            ));
        }
        Ok(self.date_repo.create(row).await?)
    }

    /// 日付キーと full_date は一致しなければならない
    pub async fn update_date(
        &self,
        date_key: i32,
        request: DateRequest,
    ) -> AppResult<dim_date_model::Model> {
        self.get_date(date_key).await?;

        let row = dim_date_model::Model::from_full_date(request.full_date);
        if row.date_key != date_key {
            return Err(AppError::BadRequest(format!(
                "full_date {} does not match date_key {}",
                request.full_date, date_key
            )));
        }
        Ok(self.date_repo.replace(row).await?)
    }

    pub async fn delete_date(&self, date_key: i32) -> AppResult<()> {
        let result = self
            .date_repo
            .delete(date_key)
            .await
            .map_err(|e| delete_error(e, "Date", &date_key.to_string(), "delete_date"))?;
        if result.rows_affected == 0 {
            return Err(not_found_error("Date", &date_key.to_string(), "delete_date"));
        }
        Ok(())
    }

    // --- キャンペーン ---

    pub async fn list_campaigns(&self) -> AppResult<Vec<dim_campaign_model::Model>> {
        Ok(self.campaign_repo.find_all_campaigns().await?)
    }

    pub async fn get_campaign(&self, campaign_key: i32) -> AppResult<dim_campaign_model::Model> {
        self.campaign_repo
            .find_campaign(campaign_key)
            .await?
            .ok_or_else(|| not_found_error("Campaign", &campaign_key.to_string(), "get_campaign"))
    }

    pub async fn create_campaign(
        &self,
        request: CampaignRequest,
    ) -> AppResult<dim_campaign_model::Model> {
        let campaign = dim_campaign_model::ActiveModel {
            campaign_id_nk: Set(request.campaign_id_nk),
            campaign_name: Set(request.campaign_name),
            campaign_type: Set(request.campaign_type),
            target_risk_segment: Set(request.target_risk_segment),
            offer_type: Set(request.offer_type),
            default_channel: Set(request.default_channel),
            start_date_key: Set(request.start_date_key),
            end_date_key: Set(request.end_date_key),
            ..Default::default()
        };
        Ok(self.campaign_repo.create_campaign(campaign).await?)
    }

    /// 全項目を置き換える
    pub async fn update_campaign(
        &self,
        campaign_key: i32,
        request: CampaignRequest,
    ) -> AppResult<dim_campaign_model::Model> {
        let mut campaign = self.get_campaign(campaign_key).await?.into_active_model();
        campaign.campaign_id_nk = Set(request.campaign_id_nk);
        campaign.campaign_name = Set(request.campaign_name);
        campaign.campaign_type = Set(request.campaign_type);
        campaign.target_risk_segment = Set(request.target_risk_segment);
        campaign.offer_type = Set(request.offer_type);
        campaign.default_channel = Set(request.default_channel);
        campaign.start_date_key = Set(request.start_date_key);
        campaign.end_date_key = Set(request.end_date_key);
        Ok(self.campaign_repo.update_campaign(campaign).await?)
    }

    pub async fn delete_campaign(&self, campaign_key: i32) -> AppResult<()> {
        let result = self
            .campaign_repo
            .delete_campaign(campaign_key)
            .await
            .map_err(|e| {
                delete_error(e, "Campaign", &campaign_key.to_string(), "delete_campaign")
            })?;
        if result.rows_affected == 0 {
            return Err(not_found_error(
                "Campaign",
                &campaign_key.to_string(),
                "delete_campaign",
            ));
        }
        Ok(())
    }

    // --- チャネル ---

    pub async fn list_channels(&self) -> AppResult<Vec<dim_channel_model::Model>> {
        Ok(self.campaign_repo.find_all_channels().await?)
    }

    pub async fn get_channel(&self, channel_key: i32) -> AppResult<dim_channel_model::Model> {
        self.campaign_repo
            .find_channel(channel_key)
            .await?
            .ok_or_else(|| not_found_error("Channel", &channel_key.to_string(), "get_channel"))
    }

    pub async fn create_channel(&self, request: ChannelRequest) -> AppResult<dim_channel_model::Model> {
        let channel = dim_channel_model::ActiveModel {
            channel_name: Set(request.channel_name),
            description: Set(request.description),
            ..Default::default()
        };
        Ok(self.campaign_repo.create_channel(channel).await?)
    }

    pub async fn update_channel(
        &self,
        channel_key: i32,
        request: ChannelRequest,
    ) -> AppResult<dim_channel_model::Model> {
        let mut channel = self.get_channel(channel_key).await?.into_active_model();
        channel.channel_name = Set(request.channel_name);
        channel.description = Set(request.description);
        Ok(self.campaign_repo.update_channel(channel).await?)
    }

    pub async fn delete_channel(&self, channel_key: i32) -> AppResult<()> {
        let result = self
            .campaign_repo
            .delete_channel(channel_key)
            .await
            .map_err(|e| {
                delete_error(e, "Channel", &channel_key.to_string(), "delete_channel")
            })?;
        if result.rows_affected == 0 {
            return Err(not_found_error(
                "Channel",
                &channel_key.to_string(),
                "delete_channel",
            ));
        }
        Ok(())
    }

    // --- ファクト ---

    /// ファクト行が参照するユーザーと日付の存在確認
    async fn ensure_references(&self, user_key: i32, date_key: i32, context: &str) -> AppResult<()> {
        if self.user_repo.find_by_key(user_key).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "{}: user_key {} does not exist",
                context, user_key
            )));
        }
        if self.date_repo.find_by_key(date_key).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "{}: date_key {} does not exist",
                context, date_key
            )));
        }
        Ok(())
    }

    pub async fn record_activity(
        &self,
        request: CreateActivityRequest,
    ) -> AppResult<fact_user_daily_activity_model::Model> {
        self.ensure_references(request.user_key, request.date_key, "record_activity")
            .await?;

        let activity = fact_user_daily_activity_model::ActiveModel {
            user_key: Set(request.user_key),
            date_key: Set(request.date_key),
            subscription_plan_key: Set(request.subscription_plan_key),
            campaign_key: Set(request.campaign_key),
            is_premium: Set(request.is_premium),
            has_active_subscription: Set(request.has_active_subscription),
            logins_count: Set(request.logins_count),
            sessions_count: Set(request.sessions_count),
            minutes_watched: Set(request.minutes_watched),
            lessons_completed: Set(request.lessons_completed),
            quizzes_attempted: Set(request.quizzes_attempted),
            distinct_courses_accessed: Set(request.distinct_courses_accessed),
            active_days_last_30d: Set(request.active_days_last_30d),
            days_since_last_login: Set(request.days_since_last_login),
            is_inactive_7d_flag: Set(request
                .is_inactive_7d_flag
                .or(request.days_since_last_login.map(|d| d > 7))),
            active_courses_count: Set(request.active_courses_count),
            completed_courses_total: Set(request.completed_courses_total),
            ..Default::default()
        };
        Ok(self.activity_repo.create(activity).await?)
    }

    pub async fn list_activities(
        &self,
        user_key: i32,
        limit: u64,
    ) -> AppResult<Vec<fact_user_daily_activity_model::Model>> {
        Ok(self.activity_repo.find_by_user(user_key, limit).await?)
    }

    /// ファネルの単調性を満たさない行は受け付けない
    pub async fn record_interaction(
        &self,
        request: CreateInteractionRequest,
    ) -> AppResult<fact_campaign_interaction_model::Model> {
        if let Some(violation) = request.funnel().first_violation() {
            return Err(validation_error("funnel", violation));
        }
        self.ensure_references(request.user_key, request.date_key, "record_interaction")
            .await?;
        if self
            .campaign_repo
            .find_campaign(request.campaign_key)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "record_interaction: campaign_key {} does not exist",
                request.campaign_key
            )));
        }
        if self
            .campaign_repo
            .find_channel(request.channel_key)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "record_interaction: channel_key {} does not exist",
                request.channel_key
            )));
        }

        let interaction = fact_campaign_interaction_model::ActiveModel {
            user_key: Set(request.user_key),
            campaign_key: Set(request.campaign_key),
            date_key: Set(request.date_key),
            channel_key: Set(request.channel_key),
            sent_flag: Set(request.sent_flag),
            opened_flag: Set(request.opened_flag),
            clicked_flag: Set(request.clicked_flag),
            converted_flag: Set(request.converted_flag),
            time_to_conversion_days: Set(request.time_to_conversion_days),
            ..Default::default()
        };
        Ok(self.activity_repo.create_interaction(interaction).await?)
    }

    /// 外部で計算したスコアを1行取り込む。同じユーザー・日付の行があれば 409
    pub async fn ingest_snapshot(
        &self,
        request: IngestSnapshotRequest,
    ) -> AppResult<fact_user_analytics_snapshot_model::Model> {
        self.ensure_references(request.user_key, request.snapshot_date_key, "ingest_snapshot")
            .await?;

        let history = self.snapshot_repo.find_by_user(request.user_key).await?;
        if history
            .iter()
            .any(|row| row.snapshot_date_key == request.snapshot_date_key)
        {
            return Err(conflict_error(
                &format!(
                    "Snapshot for user {} on {} already exists",
                    request.user_key, request.snapshot_date_key
                ),
                "ingest_snapshot",
            ));
        }

        let row = fact_user_analytics_snapshot_model::ActiveModel {
            user_key: Set(request.user_key),
            snapshot_date_key: Set(request.snapshot_date_key),
            subscription_plan_key: Set(request.subscription_plan_key),
            rfm_recency: Set(request.rfm_recency),
            rfm_frequency: Set(request.rfm_frequency),
            rfm_monetary: Set(request.rfm_monetary),
            rfm_r_score: Set(request.rfm_r_score),
            rfm_f_score: Set(request.rfm_f_score),
            rfm_m_score: Set(request.rfm_m_score),
            rfm_segment: Set(request.rfm_segment),
            segment_label: Set(request.segment_label),
            engagement_level: Set(request.engagement_level),
            kmeans_cluster: Set(request.kmeans_cluster),
            kmeans_segment_label: Set(request.kmeans_segment_label),
            churn_probability: Set(request.churn_probability),
            churn_risk_band: Set(request.churn_risk_band),
            survival_median_time_to_downgrade: Set(request.survival_median_time_to_downgrade),
            survival_risk_90d: Set(request.survival_risk_90d),
            clv_value: Set(request.clv_value),
            clv_band: Set(request.clv_band),
            model_version: Set(request.model_version),
            ..Default::default()
        };

        let created = self.snapshot_repo.insert(row).await?;
        info!(
            user_key = created.user_key,
            snapshot_date_key = created.snapshot_date_key,
            "Snapshot ingested"
        );
        Ok(created)
    }

    /// ユーザーのスナップショット履歴（新しい順）
    pub async fn list_snapshots(
        &self,
        user_key: i32,
    ) -> AppResult<Vec<fact_user_analytics_snapshot_model::Model>> {
        Ok(self.snapshot_repo.find_by_user(user_key).await?)
    }

    /// 今日時点の最新スナップショットで閾値以上のユーザー数
    pub async fn count_risk_customers(&self, threshold: f64) -> AppResult<i64> {
        Ok(self
            .snapshot_repo
            .count_at_or_above(today_key(), threshold)
            .await?)
    }
}
