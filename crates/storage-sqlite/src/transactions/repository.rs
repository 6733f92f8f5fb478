use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use budgetflow_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use budgetflow_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list_transactions(&self, project_uuid: Option<&str>) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table.into_boxed();
        if let Some(project) = project_uuid {
            query = query.filter(transactions::project_uuid.eq(project));
        }
        let rows = query
            .select(TransactionDB::as_select())
            .order(transactions::transaction_date.asc())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn insert_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let row: TransactionDB = new_transaction.into();
                diesel::insert_into(transactions::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use crate::projects::ProjectRepository;
    use budgetflow_core::projects::{NewProject, ProjectRepositoryTrait};
    use budgetflow_core::transactions::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[tokio::test]
    async fn loans_keep_their_installment_terms() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("tx.db").to_string_lossy().to_string();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());
        let (project, _) = ProjectRepository::new(pool.clone(), writer.clone())
            .insert_project(NewProject {
                name: "Shop".to_string(),
                description: None,
                client_uuid: None,
                user_uuid: None,
            })
            .await
            .unwrap();
        let repo = TransactionRepository::new(pool.clone(), writer);
        let date = NaiveDate::from_ymd_opt(2024, 8, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let loan = TransactionKind::Loan {
            amount: dec!(5000),
            installment: dec!(512.30),
            months: 12,
        };
        repo.insert_transaction(NewTransaction {
            project_uuid: project.uuid.clone(),
            description: Some("Bank".to_string()),
            date,
            kind: loan.clone(),
        })
        .await
        .unwrap();
        repo.insert_transaction(NewTransaction {
            project_uuid: project.uuid.clone(),
            description: None,
            date,
            kind: TransactionKind::Refund { amount: dec!(20) },
        })
        .await
        .unwrap();

        let listed = repo.list_transactions(Some(&project.uuid)).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|t| t.kind == loan));
        assert!(repo.list_transactions(Some("other")).unwrap().is_empty());
        assert_eq!(repo.list_transactions(None).unwrap().len(), 2);
    }
}
