//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, AuthUser, Credential, IssuedSession, SessionRecord, SessionTokenVersion,
        format_session_token, generate_session_secret, parse_session_token, password_digest,
        token_digest,
    },
    domain::users::{
        UsersService,
        models::{User, UserFilter, UserStatus, UserUuid},
    },
};

/// Shortest password accepted by [`AuthService::set_password`].
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(12);

pub struct InMemoryAuthService {
    credentials: RwLock<FxHashMap<UserUuid, String>>,
    sessions: RwLock<FxHashMap<Uuid, SessionRecord>>,
    users: Arc<dyn UsersService>,
    session_ttl: SignedDuration,
}

impl InMemoryAuthService {
    #[must_use]
    pub fn new(
        credentials: impl IntoIterator<Item = Credential>,
        users: Arc<dyn UsersService>,
        session_ttl: SignedDuration,
    ) -> Self {
        Self {
            credentials: RwLock::new(
                credentials
                    .into_iter()
                    .map(|credential| (credential.user, credential.password_digest))
                    .collect(),
            ),
            sessions: RwLock::new(FxHashMap::default()),
            users,
            session_ttl,
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError> {
        let email = email.trim().to_lowercase();

        let users = self
            .users
            .list_users(&UserFilter {
                search: Some(email.clone()),
                ..UserFilter::default()
            })
            .await?;

        Ok(users.into_iter().find(|user| user.email == email))
    }
}

impl std::fmt::Debug for InMemoryAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAuthService")
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

fn auth_user(user: User) -> Result<AuthUser, AuthServiceError> {
    if user.status != UserStatus::Active {
        return Err(AuthServiceError::AccountDisabled);
    }

    Ok(AuthUser {
        uuid: user.uuid,
        email: user.email,
        name: user.name,
        role: user.role,
    })
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let Some(user) = self.find_by_email(email).await? else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        let digest = password_digest(password);

        let matches = self
            .credentials
            .read()
            .await
            .get(&user.uuid)
            .is_some_and(|stored| *stored == digest);

        if !matches {
            warn!("login rejected");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let user = auth_user(user)?;

        let session_uuid = Uuid::now_v7();
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, SessionTokenVersion::V1, &secret);

        let now = Timestamp::now();
        let expires_at = now.checked_add(self.session_ttl)?;

        let mut sessions = self.sessions.write().await;

        sessions.retain(|_, record| record.expires_at > now);
        sessions.insert(
            session_uuid,
            SessionRecord {
                user: user.uuid,
                token_digest: token_digest(&token),
                expires_at,
            },
        );

        drop(sessions);

        self.users.touch_last_active(user.uuid, now).await?;

        info!(user = %user.uuid, role = %user.role, "session issued");

        Ok(IssuedSession {
            token,
            user,
            expires_at,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<AuthUser, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let record = self
            .sessions
            .read()
            .await
            .get(&parsed.session_uuid)
            .cloned()
            .ok_or(AuthServiceError::NotFound)?;

        if record.token_digest != token_digest(bearer_token) {
            return Err(AuthServiceError::NotFound);
        }

        if Timestamp::now() >= record.expires_at {
            self.sessions.write().await.remove(&parsed.session_uuid);

            return Err(AuthServiceError::Expired);
        }

        let user = self.users.get_user(record.user).await?;

        auth_user(user)
    }

    #[tracing::instrument(skip(self, bearer_token))]
    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let mut sessions = self.sessions.write().await;

        let owned = sessions
            .get(&parsed.session_uuid)
            .is_some_and(|record| record.token_digest == token_digest(bearer_token));

        if !owned {
            return Err(AuthServiceError::NotFound);
        }

        sessions.remove(&parsed.session_uuid);

        info!("session ended");

        Ok(())
    }

    #[tracing::instrument(skip(self, password))]
    async fn set_password(&self, user: UserUuid, password: &str) -> Result<(), AuthServiceError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthServiceError::WeakPassword(MIN_PASSWORD_LENGTH));
        }

        self.users.get_user(user).await?;

        self.credentials
            .write()
            .await
            .insert(user, password_digest(password));

        self.sessions
            .write()
            .await
            .retain(|_, record| record.user != user);

        info!("password changed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange an email and password for a session token.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the staff member it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<AuthUser, AuthServiceError>;

    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError>;

    /// Replace a user's password. Existing sessions for the user end.
    async fn set_password(&self, user: UserUuid, password: &str) -> Result<(), AuthServiceError>;
}
