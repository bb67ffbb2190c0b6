//! PostgreSQL store.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use hexsat_config::DatabaseConfig;
use hexsat_models::{Author, AuthorChanges, NewAuthor, NewUser, User, UserWithRole};

use crate::store::{AuthorStore, DuplicateLogin, UserStore};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `url` and applies the embedded migrations.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await
            .context("Failed to connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!(max_connections = config.max_connections, "database ready");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, login, password_hash, role_id FROM users WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by login")
    }

    async fn is_exist(&self, login: &str) -> anyhow::Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE login = $1)")
            .bind(login)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check user existence")
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<i32> {
        let result = sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (login, password_hash, role_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&user.login)
        .bind(&user.password_hash)
        .bind(user.role.id())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DuplicateLogin(user.login).into())
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to insert user")),
        }
    }

    async fn find_all_with_role(&self) -> anyhow::Result<Vec<UserWithRole>> {
        sqlx::query_as::<_, UserWithRole>(
            r#"
            SELECT u.id, u.login, r.name AS role
            FROM users u
            JOIN roles r ON r.id = u.role_id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch users with roles")
    }
}

#[async_trait]
impl AuthorStore for PgStore {
    async fn create(&self, author: NewAuthor) -> anyhow::Result<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO authors (user_id, name, age, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(author.user_id)
        .bind(&author.name)
        .bind(author.age)
        .bind(&author.description)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert author")
    }

    async fn update(&self, id: i32, changes: AuthorChanges) -> anyhow::Result<bool> {
        let result =
            sqlx::query("UPDATE authors SET name = $1, age = $2, description = $3 WHERE id = $4")
                .bind(&changes.name)
                .bind(changes.age)
                .bind(&changes.description)
                .bind(id)
                .execute(&self.pool)
                .await
                .context("Failed to update author")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete author")?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Author>> {
        sqlx::query_as::<_, Author>(
            "SELECT id, user_id, name, age, description FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch author by id")
    }

    async fn find_by_user_id(&self, user_id: i32) -> anyhow::Result<Vec<Author>> {
        sqlx::query_as::<_, Author>(
            "SELECT id, user_id, name, age, description FROM authors WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch authors by user")
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Vec<Author>> {
        sqlx::query_as::<_, Author>(
            "SELECT id, user_id, name, age, description FROM authors WHERE name = $1 ORDER BY id",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch authors by name")
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Author>> {
        sqlx::query_as::<_, Author>(
            "SELECT id, user_id, name, age, description FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch authors")
    }
}
