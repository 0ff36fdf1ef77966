use async_trait::async_trait;

use super::{NewUser, User, UserChanges, UserFilter};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert a new account. Duplicate username or email surfaces as
    /// `Conflict`.
    async fn create_user(&self, user: NewUser) -> DomainResult<User>;

    async fn list_users(&self, filter: UserFilter) -> DomainResult<PaginatedResult<User>>;
    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_users_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<User>>;

    async fn update_user(&self, id: i32, changes: UserChanges) -> DomainResult<Option<User>>;
    async fn touch_last_login(&self, id: i32) -> DomainResult<()>;
}
