use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson},
    options::ClientOptions,
    Client, Collection, Database,
};

use crate::error::StoreError;
use crate::filter::BookFilter;
use crate::records::{BookRecord, UserRecord};
use crate::repository::{BookRepository, Repositories, UserRepository};

pub const USERS_COLLECTION: &str = "users";
pub const BOOKS_COLLECTION: &str = "books";
const APP_NAME: &str = "bookhub";

/// MongoDB-backed collections.
pub struct MongoStore {
    database: Database,
    users: Collection<UserRecord>,
    books: Collection<BookRecord>,
}

impl MongoStore {
    /// Build a client for `uri`. The driver connects lazily, so an unreachable
    /// server surfaces on the first operation rather than here, once `timeout`
    /// has elapsed.
    pub async fn connect(
        uri: &str,
        database: &str,
        timeout: Duration,
    ) -> Result<Arc<Self>, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);
        let client = Client::with_options(options)?;
        let database = client.database(database);

        Ok(Arc::new(Self {
            users: database.collection(USERS_COLLECTION),
            books: database.collection(BOOKS_COLLECTION),
            database,
        }))
    }

    /// Round-trip a `ping` command to the server.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            users: Arc::clone(self) as Arc<dyn UserRepository>,
            books: Arc::clone(self) as Arc<dyn BookRepository>,
        }
    }
}

#[async_trait]
impl UserRepository for MongoStore {
    async fn insert_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        self.users.insert_one(user, None).await?;
        Ok(())
    }

    async fn find_user_by_username(
        &self,
        username: Option<&str>,
    ) -> Result<Option<UserRecord>, StoreError> {
        // `null` also matches documents that lack the field entirely.
        let filter = match username {
            Some(name) => doc! { "username": name },
            None => doc! { "username": Bson::Null },
        };
        Ok(self.users.find_one(filter, None).await?)
    }
}

#[async_trait]
impl BookRepository for MongoStore {
    async fn insert_book(&self, book: &BookRecord) -> Result<(), StoreError> {
        self.books.insert_one(book, None).await?;
        Ok(())
    }

    async fn find_books(&self, filter: &BookFilter) -> Result<Vec<BookRecord>, StoreError> {
        let cursor = self.books.find(filter.to_document(), None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_book_by_id(&self, id: &str) -> Result<Option<BookRecord>, StoreError> {
        Ok(self.books.find_one(doc! { "id": id }, None).await?)
    }
}
