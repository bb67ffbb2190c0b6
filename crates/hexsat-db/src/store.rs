use async_trait::async_trait;
use thiserror::Error;

use hexsat_models::{Author, AuthorChanges, NewAuthor, NewUser, User, UserWithRole};

/// Returned (inside the `anyhow::Error`) by [`UserStore::create`] when the
/// login already exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("login `{0}` is already taken")]
pub struct DuplicateLogin(pub String);

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<User>>;

    async fn is_exist(&self, login: &str) -> anyhow::Result<bool>;

    /// Inserts the user and returns its id.
    async fn create(&self, user: NewUser) -> anyhow::Result<i32>;

    async fn find_all_with_role(&self) -> anyhow::Result<Vec<UserWithRole>>;
}

#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn create(&self, author: NewAuthor) -> anyhow::Result<i32>;

    /// Returns `false` when no author has this id.
    async fn update(&self, id: i32, changes: AuthorChanges) -> anyhow::Result<bool>;

    /// Returns `false` when no author has this id.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Author>>;

    async fn find_by_user_id(&self, user_id: i32) -> anyhow::Result<Vec<Author>>;

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Vec<Author>>;

    async fn find_all(&self) -> anyhow::Result<Vec<Author>>;
}
