//! In-process document store used by tests and local tooling.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::filter::BookFilter;
use crate::records::{BookRecord, UserRecord};
use crate::repository::{BookRepository, Repositories, UserRepository};

/// Vec-backed collections that keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<UserRecord>>,
    books: RwLock<Vec<BookRecord>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Expose one store through both repository handles.
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            users: Arc::clone(self) as Arc<dyn UserRepository>,
            books: Arc::clone(self) as Arc<dyn BookRepository>,
        }
    }

    /// Snapshot of every stored user.
    pub async fn users(&self) -> Vec<UserRecord> {
        self.users.read().await.clone()
    }

    /// Snapshot of every stored book.
    pub async fn books(&self) -> Vec<BookRecord> {
        self.books.read().await.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        self.users.write().await.push(user.clone());
        Ok(())
    }

    async fn find_user_by_username(
        &self,
        username: Option<&str>,
    ) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.username.as_deref() == username)
            .cloned())
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn insert_book(&self, book: &BookRecord) -> Result<(), StoreError> {
        self.books.write().await.push(book.clone());
        Ok(())
    }

    async fn find_books(&self, filter: &BookFilter) -> Result<Vec<BookRecord>, StoreError> {
        let compiled = filter.compile()?;
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|book| compiled.matches(book))
            .cloned()
            .collect())
    }

    async fn find_book_by_id(&self, id: &str) -> Result<Option<BookRecord>, StoreError> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .find(|book| book.id.as_deref() == Some(id))
            .cloned())
    }
}
