use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use budgetflow_core::parties::{NewParty, Party, PartyRepositoryTrait, PartyRole};
use budgetflow_core::Result;

use super::model::PartyDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::parties;

pub struct PartyRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PartyRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PartyRepositoryTrait for PartyRepository {
    fn list_parties(&self, role: PartyRole) -> Result<Vec<Party>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = parties::table
            .filter(parties::role.eq(role.as_str()))
            .select(PartyDB::as_select())
            .order(parties::name.asc())
            .load::<PartyDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Party::from).collect())
    }

    async fn insert_party(&self, role: PartyRole, new_party: NewParty) -> Result<Party> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Party> {
                let row = PartyDB::new(role, new_party);
                diesel::insert_into(parties::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }
}
