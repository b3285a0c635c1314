use std::sync::Arc;

use anyhow::Context;
use bookhub_db::{UserRecord, UserRepository};
use bookhub_http::AppError;
use tracing::{debug, info, instrument};

use super::models::{LoginRequest, RegisterRequest};
use super::password::BcryptHasher;

pub const PASSWORD_REQUIRED: &str = "Password is required";
/// Shared by unknown-user and wrong-password outcomes.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Registration and credential checks over the `users` collection.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: BcryptHasher,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: BcryptHasher) -> Self {
        Self { users, hasher }
    }

    /// Hash the password and store a new user. Usernames are not deduplicated.
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn register(&self, input: RegisterRequest) -> Result<(), AppError> {
        let password = match input.password {
            Some(password) if !password.is_empty() => password,
            _ => return Err(AppError::validation(PASSWORD_REQUIRED)),
        };

        let hashed = self.hasher.hash(password).await?;
        let user = UserRecord {
            username: input.username,
            password: hashed,
        };
        self.users
            .insert_user(&user)
            .await
            .context("failed to insert user")?;

        info!("user registered");
        Ok(())
    }

    /// Succeeds when a user with this exact username exists and the password
    /// verifies. Issues no session.
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn login(&self, input: LoginRequest) -> Result<(), AppError> {
        let Some(user) = self
            .users
            .find_user_by_username(input.username.as_deref())
            .await
            .context("failed to look up user")?
        else {
            debug!("no such user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let password = input.password.unwrap_or_default();
        if !self.hasher.verify(password, user.password).await? {
            debug!("password mismatch");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        info!("user logged in");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookhub_db::MemoryStore;
    use rstest::rstest;

    fn service(store: &Arc<MemoryStore>) -> AuthService {
        AuthService::new(store.repositories().users, BcryptHasher::new(4))
    }

    fn register_input(username: &str, password: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.into()),
            password: password.map(Into::into),
        }
    }

    fn login_input(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[tokio::test]
    async fn register_requires_password(#[case] password: Option<&str>) {
        let store = MemoryStore::new();
        let err = service(&store)
            .register(register_input("ana", password))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { ref message } if message == PASSWORD_REQUIRED));
        assert!(store.users().await.is_empty());
    }

    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let store = MemoryStore::new();
        service(&store)
            .register(register_input("ana", Some("s3cret")))
            .await
            .unwrap();

        let users = store.users().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username.as_deref(), Some("ana"));
        assert_ne!(users[0].password, "s3cret");
        assert!(bcrypt::verify("s3cret", &users[0].password).unwrap());
    }

    #[tokio::test]
    async fn register_allows_missing_username_and_duplicates() {
        let store = MemoryStore::new();
        let svc = service(&store);
        svc.register(RegisterRequest {
            username: None,
            password: Some("pw".into()),
        })
        .await
        .unwrap();
        svc.register(register_input("ana", Some("pw"))).await.unwrap();
        svc.register(register_input("ana", Some("pw"))).await.unwrap();

        assert_eq!(store.users().await.len(), 3);
    }

    #[tokio::test]
    async fn login_after_register_succeeds() {
        let store = MemoryStore::new();
        let svc = service(&store);
        svc.register(register_input("ana", Some("s3cret")))
            .await
            .unwrap();

        svc.login(login_input("ana", "s3cret")).await.unwrap();
    }

    #[rstest]
    #[case("bob", "s3cret")]
    #[case("ana", "wrong")]
    #[case("ANA", "s3cret")]
    #[tokio::test]
    async fn login_failures_are_indistinguishable(#[case] username: &str, #[case] password: &str) {
        let store = MemoryStore::new();
        let svc = service(&store);
        svc.register(register_input("ana", Some("s3cret")))
            .await
            .unwrap();

        let err = svc.login(login_input(username, password)).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { ref message } if message == INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn login_without_password_is_rejected() {
        let store = MemoryStore::new();
        let svc = service(&store);
        svc.register(register_input("ana", Some("s3cret")))
            .await
            .unwrap();

        let err = svc
            .login(LoginRequest {
                username: Some("ana".into()),
                password: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }
}
