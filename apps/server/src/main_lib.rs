use std::sync::Arc;

use budgetflow_core::{
    auth::Capability,
    budgets::{BudgetService, BudgetServiceTrait},
    dones::{DoneService, DoneServiceTrait},
    parties::{PartyService, PartyServiceTrait},
    projects::{ProjectService, ProjectServiceTrait},
    tasks::{TaskService, TaskServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{NewUser, UserService, UserServiceTrait},
};
use budgetflow_storage_sqlite::{
    budgets::BudgetRepository,
    db::{self, spawn_writer},
    dones::DoneRepository,
    parties::PartyRepository,
    projects::ProjectRepository,
    tasks::TaskRepository,
    transactions::TransactionRepository,
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::{check_password_hash, AuthManager},
    config::{AdminSeed, Config},
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub party_service: Arc<dyn PartyServiceTrait>,
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub task_service: Arc<dyn TaskServiceTrait>,
    pub done_service: Arc<dyn DoneServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub auth: Option<Arc<AuthManager>>,
}

pub fn init_tracing() {
    let log_format = std::env::var("BF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let party_repository = Arc::new(PartyRepository::new(pool.clone(), writer.clone()));
    let project_repository = Arc::new(ProjectRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone()));
    let task_repository = Arc::new(TaskRepository::new(pool.clone(), writer.clone()));
    let done_repository = Arc::new(DoneRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));

    let user_service = Arc::new(UserService::new(user_repository));
    let party_service = Arc::new(PartyService::new(party_repository));

    tracing::info!("Budget mirror policy: {}", config.mirror_policy);
    let task_service = Arc::new(
        TaskService::new(task_repository.clone(), budget_repository.clone())
            .with_mirror_policy(config.mirror_policy),
    );
    let budget_service = Arc::new(BudgetService::new(
        budget_repository.clone(),
        project_repository.clone(),
        task_repository.clone(),
        task_service.clone(),
    ));
    let project_service = Arc::new(ProjectService::new(
        project_repository.clone(),
        budget_repository,
        task_repository.clone(),
        done_repository.clone(),
        transaction_repository.clone(),
    ));
    let done_service = Arc::new(DoneService::new(done_repository, task_repository));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository,
        project_repository,
    ));

    if let Some(seed) = &config.admin_seed {
        seed_admin(user_service.as_ref(), seed).await?;
    }

    let auth_manager = config
        .auth
        .as_ref()
        .map(AuthManager::new)
        .transpose()?
        .map(Arc::new);
    if auth_manager.is_none() {
        tracing::warn!("BF_SECRET_KEY is not set; authentication is disabled");
    }

    Ok(Arc::new(AppState {
        user_service,
        party_service,
        project_service,
        budget_service,
        task_service,
        done_service,
        transaction_service,
        auth: auth_manager,
    }))
}

async fn seed_admin(users: &dyn UserServiceTrait, seed: &AdminSeed) -> anyhow::Result<()> {
    check_password_hash(&seed.password_hash)?;
    let seeded = users
        .ensure_admin(NewUser {
            name: "Administrator".to_string(),
            username: seed.username.clone(),
            email: None,
            password_hash: seed.password_hash.clone(),
            auth: Capability::all(),
        })
        .await?;
    if seeded.is_none() {
        tracing::debug!("Users already exist; admin seed skipped");
    }
    Ok(())
}
