use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::auth::{Capability, Gate};
use crate::errors::{Error, Result, ValidationError};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }

    fn validate(&self, new_user: &NewUser) -> Result<()> {
        if new_user.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if new_user.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username".to_string()).into());
        }
        if new_user.password_hash.is_empty() {
            return Err(ValidationError::MissingField("password".to_string()).into());
        }
        if self.repository.find_by_username(&new_user.username)?.is_some() {
            return Err(Error::Conflict(format!(
                "username '{}' is already taken",
                new_user.username
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn list_users(&self, caps: &Capability) -> Result<Vec<User>> {
        caps.require(Gate::Admin)?;
        self.repository.list_users()
    }

    fn get_user(&self, uuid: &str) -> Result<User> {
        self.repository.get_user(uuid)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository.find_by_username(username)
    }

    async fn create_user(&self, caps: &Capability, new_user: NewUser) -> Result<User> {
        caps.require(Gate::Admin)?;
        self.validate(&new_user)?;
        self.repository.insert_user(new_user).await
    }

    async fn ensure_admin(&self, new_user: NewUser) -> Result<Option<User>> {
        if self.repository.count_users()? > 0 {
            return Ok(None);
        }
        self.validate(&new_user)?;
        let user = self.repository.insert_user(new_user).await?;
        info!("Seeded initial user '{}'", user.username);
        Ok(Some(user))
    }
}
