use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use budgetflow_core::users::{NewUser, User, UserRepositoryTrait};
use budgetflow_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, OrNotFound};
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn list_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users::table
            .select(UserDB::as_select())
            .order(users::name.asc())
            .load::<UserDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    fn get_user(&self, uuid: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(uuid)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .or_not_found(|| format!("user {}", uuid))
            .map(User::from)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::username.eq(username.trim()))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(User::from))
    }

    fn count_users(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        users::table.count().get_result(&mut conn).into_core()
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row: UserDB = new_user.into();
                diesel::insert_into(users::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }
}
