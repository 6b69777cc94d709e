// edretain-backend/src/service/campaign_service.rs

use crate::api::dto::campaign_dto::{CampaignComparisonDto, CampaignOverviewDto};
use crate::domain::campaign_performance_model;
use crate::domain::date_key::today_key;
use crate::error::AppResult;
use crate::repository::reporting_repository::ReportingRepository;
use std::sync::Arc;

pub struct CampaignService {
    reporting_repo: Arc<ReportingRepository>,
}

impl CampaignService {
    pub fn new(reporting_repo: Arc<ReportingRepository>) -> Self {
        Self { reporting_repo }
    }

    async fn latest_rows(&self) -> AppResult<Vec<campaign_performance_model::Model>> {
        Ok(self
            .reporting_repo
            .find_latest_campaign_performance(today_key())
            .await?)
    }

    pub async fn overview(&self) -> AppResult<Vec<CampaignOverviewDto>> {
        let rows = self.latest_rows().await?;
        Ok(rows.iter().map(CampaignOverviewDto::from).collect())
    }

    pub async fn performance_comparison(&self) -> AppResult<Vec<CampaignComparisonDto>> {
        let rows = self.latest_rows().await?;
        Ok(rows.iter().map(CampaignComparisonDto::from).collect())
    }
}
