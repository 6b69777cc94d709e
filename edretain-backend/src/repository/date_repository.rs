// src/repository/date_repository.rs

use crate::domain::dim_date_model::{self, Entity as DateEntity};
use sea_orm::entity::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbConn, DbErr, DeleteResult, QueryFilter, QueryOrder};

#[derive(Debug, Clone)]
pub struct DateRepository {
    db: DbConn,
}

impl DateRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_key(&self, date_key: i32) -> Result<Option<dim_date_model::Model>, DbErr> {
        DateEntity::find_by_id(date_key).one(&self.db).await
    }

    /// 日付キーの範囲（両端含む）で取得
    pub async fn find_range(
        &self,
        from_key: i32,
        to_key: i32,
    ) -> Result<Vec<dim_date_model::Model>, DbErr> {
        DateEntity::find()
            .filter(dim_date_model::Column::DateKey.between(from_key, to_key))
            .order_by_asc(dim_date_model::Column::DateKey)
            .all(&self.db)
            .await
    }

    pub async fn create(&self, date: dim_date_model::Model) -> Result<dim_date_model::Model, DbErr> {
        date.into_active_model_for_insert().insert(&self.db).await
    }

    /// 派生列を再計算して置き換える（主キーは変えない）
    pub async fn replace(&self, date: dim_date_model::Model) -> Result<dim_date_model::Model, DbErr> {
        let date_key = date.date_key;
        let mut active = date.into_active_model_for_insert();
        active.date_key = Unchanged(date_key);
        active.update(&self.db).await
    }

    pub async fn delete(&self, date_key: i32) -> Result<DeleteResult, DbErr> {
        DateEntity::delete_by_id(date_key).exec(&self.db).await
    }

    /// 存在しなければ挿入する。挿入した行数を返す
    pub async fn insert_if_absent<C>(conn: &C, date: dim_date_model::Model) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        DateEntity::insert(date.into_active_model_for_insert())
            .on_conflict(
                OnConflict::column(dim_date_model::Column::DateKey)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
    }

    /// 複数日をまとめて挿入（既存はスキップ）
    pub async fn insert_many_if_absent<C>(
        conn: &C,
        dates: Vec<dim_date_model::Model>,
    ) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        if dates.is_empty() {
            return Ok(0);
        }
        DateEntity::insert_many(
            dates
                .into_iter()
                .map(dim_date_model::Model::into_active_model_for_insert),
        )
        .on_conflict(
            OnConflict::column(dim_date_model::Column::DateKey)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
    }
}
