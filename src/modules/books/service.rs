use std::sync::Arc;

use anyhow::Context;
use bookhub_db::{BookFilter, BookRepository};
use bookhub_http::AppError;
use tracing::{info, instrument};

use super::models::{Book, BookListQuery};
use crate::utils::is_canonical_uuid;

/// Shelf value that narrows the listing to books in progress or queued.
pub const READING_SHELF: &str = "READING";
pub const READING_STATUSES: [&str; 2] = ["CURRENTLY_READING", "WANT_TO_READ"];

pub const INVALID_BOOK_ID: &str = "Invalid book ID format";
pub const BOOK_NOT_FOUND: &str = "Book not found";

/// Translate listing query parameters into a store filter.
///
/// Only the exact shelf `READING` filters; any other shelf is ignored. A
/// non-empty `search` is used as a case-insensitive title regex, unescaped.
pub fn filter_for(query: &BookListQuery) -> BookFilter {
    let mut filter = BookFilter::all();
    if query.shelf.as_deref() == Some(READING_SHELF) {
        filter = filter.with_read_status_in(READING_STATUSES);
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        filter = filter.with_title_pattern(search);
    }
    filter
}

/// Cast the client's `book_details` into a [`Book`]. Absent or `null` details
/// give an empty book; values that cannot be cast are an internal error.
pub fn cast_book(details: Option<serde_json::Value>) -> Result<Book, AppError> {
    match details {
        Some(details) => {
            let book = serde_json::from_value(details).context("failed to cast book details")?;
            Ok(book)
        }
        None => Ok(Book::default()),
    }
}

/// Book operations over the `books` collection.
pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    /// Store the book as given. Fields are neither required nor checked.
    #[instrument(skip(self, book), fields(id = ?book.id))]
    pub async fn add_book(&self, book: Book) -> Result<(), AppError> {
        self.books
            .insert_book(&book)
            .await
            .context("failed to insert book")?;
        info!("book added");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_books(&self, query: &BookListQuery) -> Result<Vec<Book>, AppError> {
        let filter = filter_for(query);
        let books = self
            .books
            .find_books(&filter)
            .await
            .context("failed to list books")?;
        Ok(books)
    }

    /// Every stored book, unsorted. Rating plays no part in the result.
    #[instrument(skip(self))]
    pub async fn list_top_rated(&self) -> Result<Vec<Book>, AppError> {
        let books = self
            .books
            .find_books(&BookFilter::all())
            .await
            .context("failed to list top-rated books")?;
        Ok(books)
    }

    #[instrument(skip(self))]
    pub async fn get_book(&self, id: &str) -> Result<Book, AppError> {
        if !is_canonical_uuid(id) {
            return Err(AppError::validation(INVALID_BOOK_ID));
        }

        self.books
            .find_book_by_id(id)
            .await
            .context("failed to load book")?
            .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookhub_db::MemoryStore;
    use rstest::rstest;

    fn query(shelf: Option<&str>, search: Option<&str>) -> BookListQuery {
        BookListQuery {
            shelf: shelf.map(Into::into),
            search: search.map(Into::into),
        }
    }

    fn book(id: &str, title: &str, status: &str) -> Book {
        Book {
            id: Some(id.into()),
            title: Some(title.into()),
            read_status: Some(status.into()),
            ..Book::default()
        }
    }

    async fn seeded() -> (Arc<MemoryStore>, BookService) {
        let store = MemoryStore::new();
        let service = BookService::new(store.repositories().books);
        for b in [
            book("1", "ABCDE", "CURRENTLY_READING"),
            book("2", "xxabcxx", "READ"),
            book("3", "xyz", "WANT_TO_READ"),
            book("4", "Abc and more", "WANT_TO_READ"),
        ] {
            service.add_book(b).await.unwrap();
        }
        (store, service)
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().filter_map(|b| b.id.as_deref()).collect()
    }

    #[test]
    fn no_parameters_means_no_filter() {
        assert_eq!(filter_for(&query(None, None)), BookFilter::all());
    }

    #[rstest]
    #[case(Some("reading"))]
    #[case(Some("READ"))]
    #[case(Some(""))]
    fn other_shelves_apply_no_filter(#[case] shelf: Option<&str>) {
        assert_eq!(filter_for(&query(shelf, None)), BookFilter::all());
    }

    #[test]
    fn empty_search_applies_no_filter() {
        assert_eq!(filter_for(&query(None, Some(""))), BookFilter::all());
    }

    #[test]
    fn search_is_passed_through_unescaped() {
        let filter = filter_for(&query(None, Some("a.c(")));
        assert_eq!(filter.title_pattern.as_deref(), Some("a.c("));
    }

    #[test]
    fn reading_shelf_and_search_combine() {
        let filter = filter_for(&query(Some("READING"), Some("abc")));
        assert_eq!(
            filter,
            BookFilter::all()
                .with_read_status_in(["CURRENTLY_READING", "WANT_TO_READ"])
                .with_title_pattern("abc")
        );
    }

    #[rstest]
    #[case(None, None, vec!["1", "2", "3", "4"])]
    #[case(Some("READING"), None, vec!["1", "3", "4"])]
    #[case(None, Some("abc"), vec!["1", "2", "4"])]
    #[case(Some("READING"), Some("abc"), vec!["1", "4"])]
    #[case(Some("OTHER"), Some("nothing-matches"), vec![])]
    #[tokio::test]
    async fn list_books_applies_filters(
        #[case] shelf: Option<&str>,
        #[case] search: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let (_store, service) = seeded().await;
        let books = service.list_books(&query(shelf, search)).await.unwrap();
        assert_eq!(ids(&books), expected);
    }

    #[tokio::test]
    async fn invalid_search_pattern_is_internal() {
        let (_store, service) = seeded().await;
        let err = service
            .list_books(&query(None, Some("(")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn top_rated_returns_everything_in_insertion_order() {
        let (_store, service) = seeded().await;
        let books = service.list_top_rated().await.unwrap();
        assert_eq!(ids(&books), ["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn get_book_rejects_malformed_id_even_if_stored() {
        let store = MemoryStore::new();
        let service = BookService::new(store.repositories().books);
        service
            .add_book(book("not-a-uuid", "Odd", "READ"))
            .await
            .unwrap();

        let err = service.get_book("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref message } if message == INVALID_BOOK_ID));
    }

    #[tokio::test]
    async fn get_book_missing_is_not_found() {
        let (_store, service) = seeded().await;
        let err = service
            .get_book("123e4567-e89b-12d3-a456-426614174000")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref message } if message == BOOK_NOT_FOUND));
    }

    #[test]
    fn book_details_are_cast_not_validated() {
        let details = serde_json::json!({"title": 123, "rating": "4.5"});
        let book = cast_book(Some(details)).unwrap();
        assert_eq!(book.title.as_deref(), Some("123"));
        assert_eq!(book.rating, Some(4.5));
        assert_eq!(cast_book(None).unwrap(), Book::default());
    }

    #[test]
    fn uncastable_book_details_are_internal() {
        let err = cast_book(Some(serde_json::json!({"rating": "high"}))).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn added_book_is_stored_verbatim() {
        let store = MemoryStore::new();
        let service = BookService::new(store.repositories().books);
        let id = uuid::Uuid::new_v4().to_string();
        let original = Book {
            id: Some(id.clone()),
            title: Some("Piranesi".into()),
            author_name: Some("Susanna Clarke".into()),
            rating: Some(4.7),
            ..Book::default()
        };
        service.add_book(original.clone()).await.unwrap();

        assert_eq!(service.get_book(&id).await.unwrap(), original);
    }
}
