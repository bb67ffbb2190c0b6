//! In-memory store.
//!
//! Each table is a `BTreeMap` keyed by id behind a `tokio::sync::RwLock`, so
//! listings come back in insertion order and concurrent requests never see a
//! half-applied write. The login uniqueness check and the insert happen under
//! the same write lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use hexsat_models::{Author, AuthorChanges, NewAuthor, NewUser, Role, User, UserWithRole};

use crate::store::{AuthorStore, DuplicateLogin, UserStore};

#[derive(Debug)]
struct Table<T> {
    next_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn insert_with(&mut self, row: impl FnOnce(i32) -> T) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, row(id));
        id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Table<User>>,
    authors: RwLock<Table<Author>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.values().find(|u| u.login == login).cloned())
    }

    async fn is_exist(&self, login: &str) -> anyhow::Result<bool> {
        let users = self.users.read().await;
        Ok(users.rows.values().any(|u| u.login == login))
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<i32> {
        let mut users = self.users.write().await;
        if users.rows.values().any(|u| u.login == user.login) {
            return Err(DuplicateLogin(user.login).into());
        }

        Ok(users.insert_with(|id| User {
            id,
            login: user.login,
            password_hash: user.password_hash,
            role_id: user.role.id(),
        }))
    }

    async fn find_all_with_role(&self) -> anyhow::Result<Vec<UserWithRole>> {
        let users = self.users.read().await;
        users
            .rows
            .values()
            .map(|u| -> anyhow::Result<UserWithRole> {
                let role = Role::from_id(u.role_id).ok_or_else(|| {
                    anyhow::anyhow!("user {} has unknown role {}", u.id, u.role_id)
                })?;
                Ok(UserWithRole {
                    id: u.id,
                    login: u.login.clone(),
                    role: role.name().to_string(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn create(&self, author: NewAuthor) -> anyhow::Result<i32> {
        let mut authors = self.authors.write().await;
        Ok(authors.insert_with(|id| Author {
            id,
            user_id: author.user_id,
            name: author.name,
            age: author.age,
            description: author.description,
        }))
    }

    async fn update(&self, id: i32, changes: AuthorChanges) -> anyhow::Result<bool> {
        let mut authors = self.authors.write().await;
        match authors.rows.get_mut(&id) {
            Some(author) => {
                author.name = changes.name;
                author.age = changes.age;
                author.description = changes.description;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let mut authors = self.authors.write().await;
        Ok(authors.rows.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Author>> {
        let authors = self.authors.read().await;
        Ok(authors.rows.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: i32) -> anyhow::Result<Vec<Author>> {
        let authors = self.authors.read().await;
        Ok(authors
            .rows
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Vec<Author>> {
        let authors = self.authors.read().await;
        Ok(authors
            .rows
            .values()
            .filter(|a| a.name == name)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Author>> {
        let authors = self.authors.read().await;
        Ok(authors.rows.values().cloned().collect())
    }
}
