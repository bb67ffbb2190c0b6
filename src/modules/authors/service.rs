use anyhow::{Context, anyhow};
use tracing::{info, instrument, warn};

use hexsat_core::AppError;
use hexsat_db::AuthorStore;
use hexsat_models::{Author, AuthorRequest};

pub struct AuthorService;

impl AuthorService {
    pub async fn find_all(authors: &dyn AuthorStore) -> Result<Vec<Author>, AppError> {
        authors
            .find_all()
            .await
            .context("Failed to fetch authors")
            .map_err(AppError::database)
    }

    pub async fn find_by_name(
        authors: &dyn AuthorStore,
        name: &str,
    ) -> Result<Vec<Author>, AppError> {
        authors
            .find_by_name(name)
            .await
            .context("Failed to fetch authors by name")
            .map_err(AppError::database)
    }

    pub async fn find_by_id(
        authors: &dyn AuthorStore,
        id: i32,
    ) -> Result<Option<Author>, AppError> {
        authors
            .find_by_id(id)
            .await
            .context("Failed to fetch author")
            .map_err(AppError::database)
    }

    pub async fn find_by_owner(
        authors: &dyn AuthorStore,
        user_id: i32,
    ) -> Result<Vec<Author>, AppError> {
        authors
            .find_by_user_id(user_id)
            .await
            .context("Failed to fetch authors by owner")
            .map_err(AppError::database)
    }

    #[instrument(skip(authors, dto))]
    pub async fn create(
        authors: &dyn AuthorStore,
        user_id: i32,
        dto: AuthorRequest,
    ) -> Result<i32, AppError> {
        let id = authors
            .create(dto.into_new_author(user_id))
            .await
            .context("Failed to create author")
            .map_err(AppError::database)?;

        info!(author_id = id, "author created");
        Ok(id)
    }

    #[instrument(skip(authors, dto))]
    pub async fn update(
        authors: &dyn AuthorStore,
        user_id: i32,
        id: i32,
        dto: AuthorRequest,
    ) -> Result<i32, AppError> {
        Self::owned_by(authors, user_id, id).await?;

        let updated = authors
            .update(id, dto.into_changes())
            .await
            .context("Failed to update author")
            .map_err(AppError::database)?;
        if !updated {
            return Err(AppError::not_found(anyhow!("author not found")));
        }

        info!(author_id = id, "author updated");
        Ok(id)
    }

    #[instrument(skip(authors))]
    pub async fn delete(authors: &dyn AuthorStore, user_id: i32, id: i32) -> Result<i32, AppError> {
        Self::owned_by(authors, user_id, id).await?;

        let deleted = authors
            .delete(id)
            .await
            .context("Failed to delete author")
            .map_err(AppError::database)?;
        if !deleted {
            return Err(AppError::not_found(anyhow!("author not found")));
        }

        info!(author_id = id, "author deleted");
        Ok(id)
    }

    async fn owned_by(
        authors: &dyn AuthorStore,
        user_id: i32,
        id: i32,
    ) -> Result<Author, AppError> {
        let author = Self::find_by_id(authors, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("author not found")))?;

        if author.user_id != user_id {
            warn!(author_id = id, owner = author.user_id, "author belongs to another user");
            return Err(AppError::forbidden(anyhow!("author belongs to another user")));
        }

        Ok(author)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use hexsat_db::MemoryStore;

    use super::*;

    fn dto(name: &str) -> AuthorRequest {
        AuthorRequest {
            name: name.to_string(),
            age: 50,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_owner_can_update_and_delete() {
        let store = MemoryStore::new();
        let id = AuthorService::create(&store, 1, dto("Tolkien")).await.unwrap();

        assert_eq!(AuthorService::update(&store, 1, id, dto("Lewis")).await.unwrap(), id);
        let author = AuthorService::find_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(author.name, "Lewis");

        assert_eq!(AuthorService::delete(&store, 1, id).await.unwrap(), id);
        assert!(AuthorService::find_by_id(&store, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_other_user_is_forbidden() {
        let store = MemoryStore::new();
        let id = AuthorService::create(&store, 1, dto("Tolkien")).await.unwrap();

        let err = AuthorService::update(&store, 2, id, dto("Lewis")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let err = AuthorService::delete(&store, 2, id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let author = AuthorService::find_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(author.name, "Tolkien");
    }

    #[tokio::test]
    async fn test_missing_author_is_not_found() {
        let store = MemoryStore::new();
        let err = AuthorService::delete(&store, 1, 42).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_find_by_owner_and_name() {
        let store = MemoryStore::new();
        AuthorService::create(&store, 1, dto("Tolkien")).await.unwrap();
        AuthorService::create(&store, 2, dto("Tolkien")).await.unwrap();
        AuthorService::create(&store, 1, dto("Le Guin")).await.unwrap();

        assert_eq!(AuthorService::find_by_owner(&store, 1).await.unwrap().len(), 2);
        assert_eq!(AuthorService::find_by_name(&store, "Tolkien").await.unwrap().len(), 2);
        assert_eq!(AuthorService::find_all(&store).await.unwrap().len(), 3);
    }
}
