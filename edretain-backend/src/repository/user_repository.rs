// src/repository/user_repository.rs

use crate::domain::dim_user_model::{self, ActiveModel as UserActiveModel, Entity as UserEntity};
use sea_orm::entity::*;
use sea_orm::{
    ConnectionTrait, DbConn, DbErr, DeleteResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DbConn,
}

impl UserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    // --- 基本CRUD操作 ---

    pub async fn find_by_key(&self, user_key: i32) -> Result<Option<dim_user_model::Model>, DbErr> {
        UserEntity::find_by_id(user_key).one(&self.db).await
    }

    pub async fn find_by_natural_key(
        &self,
        user_id_nk: &str,
    ) -> Result<Option<dim_user_model::Model>, DbErr> {
        UserEntity::find()
            .filter(dim_user_model::Column::UserIdNk.eq(user_id_nk))
            .one(&self.db)
            .await
    }

    /// サロゲートキー順に取得
    pub async fn find_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<dim_user_model::Model>, DbErr> {
        UserEntity::find()
            .order_by_asc(dim_user_model::Column::UserKey)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        UserEntity::find().count(&self.db).await
    }

    pub async fn create(&self, user: UserActiveModel) -> Result<dim_user_model::Model, DbErr> {
        user.insert(&self.db).await
    }

    pub async fn update(&self, user: UserActiveModel) -> Result<dim_user_model::Model, DbErr> {
        user.update(&self.db).await
    }

    pub async fn delete(&self, user_key: i32) -> Result<DeleteResult, DbErr> {
        UserEntity::delete_by_id(user_key).exec(&self.db).await
    }

    /// 一括挿入（シーダー用）
    pub async fn insert_many<C>(conn: &C, users: Vec<UserActiveModel>) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if users.is_empty() {
            return Ok(());
        }
        UserEntity::insert_many(users)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    pub async fn count_with<C>(conn: &C) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        UserEntity::find().count(conn).await
    }

    /// 自然キーからサロゲートキーを引く（一括挿入後の採番確認用）
    pub async fn find_keys_by_natural_ids<C>(
        conn: &C,
        user_ids: Vec<String>,
    ) -> Result<Vec<(String, i32)>, DbErr>
    where
        C: ConnectionTrait,
    {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = UserEntity::find()
            .filter(dim_user_model::Column::UserIdNk.is_in(user_ids))
            .order_by_asc(dim_user_model::Column::UserKey)
            .all(conn)
            .await?;
        Ok(users.into_iter().map(|u| (u.user_id_nk, u.user_key)).collect())
    }
}
