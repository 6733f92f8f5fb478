use crate::auth::Capability;
use crate::errors::Result;
use crate::users::users_model::{NewUser, User};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn list_users(&self) -> Result<Vec<User>>;
    fn get_user(&self, uuid: &str) -> Result<User>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    fn count_users(&self) -> Result<i64>;
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn list_users(&self, caps: &Capability) -> Result<Vec<User>>;
    fn get_user(&self, uuid: &str) -> Result<User>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn create_user(&self, caps: &Capability, new_user: NewUser) -> Result<User>;
    /// Creates `new_user` only when no user exists yet. Returns the created user.
    async fn ensure_admin(&self, new_user: NewUser) -> Result<Option<User>>;
}
