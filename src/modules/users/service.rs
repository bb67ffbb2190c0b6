use anyhow::{Context, anyhow};
use tracing::{debug, info, instrument};

use hexsat_auth::TokenAuthority;
use hexsat_core::{AppError, hash_password, verify_password};
use hexsat_db::{DuplicateLogin, UserStore};
use hexsat_models::{LoginUserRequest, NewUser, RegisterUserRequest, Role, UserWithRole};

pub const USER_EXISTS_MESSAGE: &str = "this user already exists";

pub struct UserService;

impl UserService {
    /// Checks `login`/`password` and issues a token whose subject is the user id.
    ///
    /// Returns `Ok(None)` for an unknown login or a wrong password.
    #[instrument(skip_all, fields(login = %dto.login))]
    pub async fn find_by_credentials(
        users: &dyn UserStore,
        authority: &TokenAuthority,
        dto: LoginUserRequest,
    ) -> Result<Option<String>, AppError> {
        let Some(user) = users
            .find_by_login(&dto.login)
            .await
            .context("Failed to look up user")
            .map_err(AppError::database)?
        else {
            debug!("unknown login");
            return Ok(None);
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            debug!(user_id = user.id, "password mismatch");
            return Ok(None);
        }

        let token = authority
            .issue(&user.id.to_string())
            .map_err(AppError::internal)?;

        info!(user_id = user.id, "user logged in");
        Ok(Some(token))
    }

    pub async fn is_exist(users: &dyn UserStore, login: &str) -> Result<bool, AppError> {
        users
            .is_exist(login)
            .await
            .context("Failed to check user existence")
            .map_err(AppError::database)
    }

    /// Creates a user with the `user` role and returns its id.
    #[instrument(skip_all, fields(login = %dto.login))]
    pub async fn register(
        users: &dyn UserStore,
        dto: RegisterUserRequest,
    ) -> Result<i32, AppError> {
        if Self::is_exist(users, &dto.login).await? {
            return Err(AppError::conflict(anyhow!(USER_EXISTS_MESSAGE)));
        }

        let password_hash = hash_password(&dto.password)?;
        let new_user = NewUser {
            login: dto.login,
            password_hash,
            role: Role::User,
        };

        match users.create(new_user).await {
            Ok(id) => {
                info!(user_id = id, "user registered");
                Ok(id)
            }
            // lost a race with a concurrent registration of the same login
            Err(err) if err.is::<DuplicateLogin>() => {
                Err(AppError::conflict(anyhow!(USER_EXISTS_MESSAGE)))
            }
            Err(err) => Err(AppError::database(err.context("Failed to create user"))),
        }
    }

    pub async fn find_all_users(users: &dyn UserStore) -> Result<Vec<UserWithRole>, AppError> {
        users
            .find_all_with_role()
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)
    }
}
