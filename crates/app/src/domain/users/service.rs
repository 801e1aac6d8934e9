//! Users service.

use async_trait::async_trait;
use jiff::{Timestamp, Zoned};
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    domain::users::{
        errors::UsersServiceError,
        models::{NewUser, User, UserFilter, UserUpdate, UserUuid},
    },
    listing::{matches_any, search_needle},
};

#[derive(Debug, Default)]
pub struct InMemoryUsersService {
    users: RwLock<Vec<User>>,
}

impl InMemoryUsersService {
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UsersService for InMemoryUsersService {
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, UsersServiceError> {
        let needle = search_needle(filter.search.as_deref());

        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|user| {
                matches_any(needle.as_deref(), &[user.name.as_str(), user.email.as_str()])
            })
            .filter(|user| filter.role.is_none_or(|role| user.role == role))
            .filter(|user| filter.status.is_none_or(|status| user.status == status))
            .cloned()
            .collect())
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        self.users
            .read()
            .await
            .iter()
            .find(|candidate| candidate.uuid == user)
            .cloned()
            .ok_or(UsersServiceError::NotFound)
    }

    #[tracing::instrument(skip(self, user), fields(role = %user.role))]
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let name = required(&user.name, "name")?;
        let email = required(&user.email, "email")?.to_lowercase();

        let mut users = self.users.write().await;

        if users.iter().any(|existing| existing.email == email) {
            return Err(UsersServiceError::EmailTaken);
        }

        let created = User {
            uuid: UserUuid::new(),
            name,
            email,
            role: user.role,
            status: user.status,
            last_active: None,
            join_date: Zoned::now().date(),
            avatar_url: None,
        };

        users.push(created.clone());

        info!(user = %created.uuid, "user created");

        Ok(created)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<User, UsersServiceError> {
        let name = update.name.as_deref().map(|name| required(name, "name")).transpose()?;

        let email = update
            .email
            .as_deref()
            .map(|email| required(email, "email").map(|email| email.to_lowercase()))
            .transpose()?;

        let mut users = self.users.write().await;

        if let Some(email) = email.as_deref()
            && users
                .iter()
                .any(|other| other.uuid != user && other.email == email)
        {
            return Err(UsersServiceError::EmailTaken);
        }

        let target = users
            .iter_mut()
            .find(|candidate| candidate.uuid == user)
            .ok_or(UsersServiceError::NotFound)?;

        if let Some(name) = name {
            target.name = name;
        }

        if let Some(email) = email {
            target.email = email;
        }

        if let Some(role) = update.role {
            target.role = role;
        }

        if let Some(status) = update.status {
            target.status = status;
        }

        if update.avatar_url.is_some() {
            target.avatar_url = update.avatar_url;
        }

        info!("user updated");

        Ok(target.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut users = self.users.write().await;
        let before = users.len();

        users.retain(|candidate| candidate.uuid != user);

        if users.len() == before {
            return Err(UsersServiceError::NotFound);
        }

        info!("user deleted");

        Ok(())
    }

    async fn touch_last_active(
        &self,
        user: UserUuid,
        at: Timestamp,
    ) -> Result<(), UsersServiceError> {
        let mut users = self.users.write().await;

        let target = users
            .iter_mut()
            .find(|candidate| candidate.uuid == user)
            .ok_or(UsersServiceError::NotFound)?;

        target.last_active = Some(at);

        Ok(())
    }
}

fn required(value: &str, field: &'static str) -> Result<String, UsersServiceError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(UsersServiceError::MissingRequiredData(field));
    }

    Ok(trimmed.to_string())
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Staff matching the filter.
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, UsersServiceError>;

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Adds a staff member joining today. Emails are unique, ignoring case.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<User, UsersServiceError>;

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;

    /// Record activity, e.g. a login.
    async fn touch_last_active(
        &self,
        user: UserUuid,
        at: Timestamp,
    ) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{auth::Role, domain::users::models::UserStatus, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn list_users_filters_by_role_and_status() -> TestResult {
        let ctx = TestContext::new().await?;

        let suspended_staff = ctx
            .users
            .list_users(&UserFilter {
                role: Some(Role::Staff),
                status: Some(UserStatus::Suspended),
                ..UserFilter::default()
            })
            .await?;

        assert_eq!(
            suspended_staff.first().map(|user| user.name.as_str()),
            Some("David Kim")
        );
        assert_eq!(suspended_staff.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_rejects_existing_email_ignoring_case() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .users
            .create_user(NewUser {
                name: "Second Admin".to_string(),
                email: "Admin@Example.com".to_string(),
                role: Role::Admin,
                status: UserStatus::Active,
            })
            .await;

        assert!(matches!(result, Err(UsersServiceError::EmailTaken)));

        Ok(())
    }

    #[tokio::test]
    async fn update_user_changes_role() -> TestResult {
        let ctx = TestContext::new().await?;

        let user = ctx
            .users
            .create_user(NewUser {
                name: "Kojo Appiah".to_string(),
                email: "kojo@example.com".to_string(),
                role: Role::Staff,
                status: UserStatus::Active,
            })
            .await?;

        let updated = ctx
            .users
            .update_user(
                user.uuid,
                UserUpdate {
                    role: Some(Role::Cashier),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.role, Role::Cashier);
        assert_eq!(updated.email, "kojo@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_user_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx.users.delete_user(UserUuid::new()).await;

        assert!(matches!(result, Err(UsersServiceError::NotFound)));

        Ok(())
    }
}
