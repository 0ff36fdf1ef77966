use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    DomainResult, NewUser, User, UserChanges, UserFilter, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;
use crate::shared::PaginatedResult;

use super::{conflict_or_internal, internal};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Supervisor => UserRole::Supervisor,
        user::UserRole::Operator => UserRole::Operator,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Supervisor => user::UserRole::Supervisor,
        UserRole::Operator => user::UserRole::Operator,
    }
}

fn to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        full_name: model.full_name,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, new: NewUser) -> DomainResult<User> {
        let now = Utc::now();

        let model = user::ActiveModel {
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            full_name: Set(new.full_name),
            role: Set(domain_role_to_entity(new.role)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_internal(e, "Username or email already exists"))?;

        Ok(to_domain(created))
    }

    async fn list_users(&self, filter: UserFilter) -> DomainResult<PaginatedResult<User>> {
        let page = filter.page.unwrap_or(1).max(1);
        let per_page = filter.per_page.unwrap_or(20).clamp(1, 100);

        let mut query = user::Entity::find().order_by_asc(user::Column::FullName);

        if let Some(role) = filter.role {
            query = query.filter(user::Column::Role.eq(domain_role_to_entity(role)));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(user::Column::IsActive.eq(is_active));
        }

        let total = query.clone().count(&self.db).await.map_err(internal)?;

        let users = query
            .offset((page as u64 - 1) * per_page as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(PaginatedResult::new(
            users.into_iter().map(to_domain).collect(),
            total,
            page,
            per_page,
        ))
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let user = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(user.map(to_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(user.map(to_domain))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(user.map(to_domain))
    }

    async fn get_users_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(internal)?;
        Ok(users.into_iter().map(to_domain).collect())
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> DomainResult<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
        else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        active.updated_at = Set(Utc::now());

        if let Some(full_name) = changes.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(role) = changes.role {
            active.role = Set(domain_role_to_entity(role));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_internal(e, "Email already registered"))?;

        Ok(Some(to_domain(updated)))
    }

    async fn touch_last_login(&self, id: i32) -> DomainResult<()> {
        let Some(existing) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
        else {
            return Ok(());
        };

        let mut active: user::ActiveModel = existing.into();
        active.last_login_at = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(internal)?;

        Ok(())
    }
}
