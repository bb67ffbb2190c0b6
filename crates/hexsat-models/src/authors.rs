//! Author domain models and DTOs.
//!
//! Authors are owned by the user that created them; only that user may
//! update or delete them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub age: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub user_id: i32,
    pub name: String,
    pub age: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorChanges {
    pub name: String,
    pub age: i32,
    pub description: String,
}

/// Body of the create and update author endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AuthorRequest {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1, max = 150, message = "age must be between 1 and 150"))]
    pub age: i32,
    #[serde(default)]
    #[validate(length(max = 1000, message = "description is too long"))]
    pub description: String,
}

impl AuthorRequest {
    pub fn into_new_author(self, user_id: i32) -> NewAuthor {
        NewAuthor {
            user_id,
            name: self.name,
            age: self.age,
            description: self.description,
        }
    }

    pub fn into_changes(self) -> AuthorChanges {
        AuthorChanges {
            name: self.name,
            age: self.age,
            description: self.description,
        }
    }
}

/// `{id}` path segment of the author endpoints.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct AuthorIdPath {
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i32,
}

/// `?name=` query of the author search endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AuthorNameQuery {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, age: i32) -> AuthorRequest {
        AuthorRequest {
            name: name.to_string(),
            age,
            description: String::new(),
        }
    }

    #[test]
    fn test_author_request_rules() {
        assert!(request("Tolkien", 81).validate().is_ok());
        assert!(request("", 81).validate().is_err());
        assert!(request("Tolkien", 0).validate().is_err());
        assert!(request("Tolkien", 151).validate().is_err());
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let request: AuthorRequest = serde_json::from_str(r#"{"name":"Le Guin","age":88}"#).unwrap();
        assert_eq!(request.description, "");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_into_new_author_sets_owner() {
        let author = request("Tolkien", 81).into_new_author(7);
        assert_eq!(author.user_id, 7);
        assert_eq!(author.name, "Tolkien");
    }

    #[test]
    fn test_id_path_must_be_positive() {
        assert!(AuthorIdPath { id: 1 }.validate().is_ok());
        assert!(AuthorIdPath { id: 0 }.validate().is_err());
    }
}
