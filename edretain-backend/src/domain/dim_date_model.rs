// src/domain/dim_date_model.rs
use super::date_key::{date_key_of, is_weekend_day};
use chrono::{Datelike, NaiveDate};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// 日付ディメンション
///
/// `full_date` 以外の列はすべて `full_date` からの派生値で、
/// 常に [`Model::from_full_date`] で生成する。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dim_date")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub date_key: i32,
    pub full_date: Date,
    pub year: i32,
    pub quarter: i32,
    pub month: i32,
    pub month_name: String,
    pub week_of_year: i32,
    pub day_of_month: i32,
    pub day_of_week: i32,
    pub day_name: String,
    pub is_weekend: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 暦日から全派生列を計算する（ISO週・月曜始まり）
    pub fn from_full_date(date: NaiveDate) -> Self {
        let day_of_week = date.weekday().number_from_monday() as i32;
        Self {
            date_key: date_key_of(date),
            full_date: date,
            year: date.year(),
            quarter: (date.month0() / 3 + 1) as i32,
            month: date.month() as i32,
            month_name: date.format("%B").to_string(),
            week_of_year: date.iso_week().week() as i32,
            day_of_month: date.day() as i32,
            day_of_week,
            day_name: date.format("%A").to_string(),
            is_weekend: is_weekend_day(day_of_week),
        }
    }

    /// 派生列が `full_date` と整合しているか
    pub fn is_consistent(&self) -> bool {
        *self == Self::from_full_date(self.full_date)
    }

    pub fn into_active_model_for_insert(self) -> ActiveModel {
        ActiveModel {
            date_key: Set(self.date_key),
            full_date: Set(self.full_date),
            year: Set(self.year),
            quarter: Set(self.quarter),
            month: Set(self.month),
            month_name: Set(self.month_name),
            week_of_year: Set(self.week_of_year),
            day_of_month: Set(self.day_of_month),
            day_of_week: Set(self.day_of_week),
            day_name: Set(self.day_name),
            is_weekend: Set(self.is_weekend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_full_date_derives_all_fields() {
        // 2025-03-15 は土曜日
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let row = Model::from_full_date(date);

        assert_eq!(row.date_key, 20250315);
        assert_eq!(row.year, 2025);
        assert_eq!(row.quarter, 1);
        assert_eq!(row.month, 3);
        assert_eq!(row.month_name, "March");
        assert_eq!(row.week_of_year, 11);
        assert_eq!(row.day_of_month, 15);
        assert_eq!(row.day_of_week, 6);
        assert_eq!(row.day_name, "Saturday");
        assert!(row.is_weekend);
        assert!(row.is_consistent());
    }

    #[test]
    fn test_iso_week_at_year_boundary() {
        // 2024-12-30 は ISO 2025年第1週の月曜日
        let row = Model::from_full_date(NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        assert_eq!(row.week_of_year, 1);
        assert_eq!(row.day_of_week, 1);
        assert!(!row.is_weekend);
        assert_eq!(row.quarter, 4);
    }

    #[test]
    fn test_inconsistent_row_is_detected() {
        let mut row = Model::from_full_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        row.is_weekend = true;
        assert!(!row.is_consistent());
    }

    #[test]
    fn test_every_day_of_a_year_is_consistent() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while date.year() == 2024 {
            let row = Model::from_full_date(date);
            assert_eq!(row.date_key.to_string(), date.format("%Y%m%d").to_string());
            assert_eq!(row.is_weekend, row.day_of_week >= 6);
            date = date.succ_opt().unwrap();
        }
    }
}
