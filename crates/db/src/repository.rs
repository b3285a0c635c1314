use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::filter::BookFilter;
use crate::records::{BookRecord, UserRecord};

/// Persistence for registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: &UserRecord) -> Result<(), StoreError>;

    /// Return the first user whose `username` equals `username` exactly.
    /// `None` matches users stored without a username.
    async fn find_user_by_username(
        &self,
        username: Option<&str>,
    ) -> Result<Option<UserRecord>, StoreError>;
}

/// Persistence for book entries.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn insert_book(&self, book: &BookRecord) -> Result<(), StoreError>;

    /// Books matching `filter`, in the store's natural order.
    async fn find_books(&self, filter: &BookFilter) -> Result<Vec<BookRecord>, StoreError>;

    /// The first book whose `id` equals `id` exactly.
    async fn find_book_by_id(&self, id: &str) -> Result<Option<BookRecord>, StoreError>;
}

/// Handles to every collection, shared by the feature modules.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub books: Arc<dyn BookRepository>,
}
