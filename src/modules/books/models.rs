use serde::{Deserialize, Serialize};

/// A book as stored and returned; every field is optional.
pub use bookhub_db::BookRecord as Book;

/// Body of `POST /api/books`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddBookRequest {
    /// Raw client object, cast into a [`Book`] by the service. A missing
    /// object stores an empty book.
    #[serde(default)]
    pub book_details: Option<serde_json::Value>,
}

/// Query string of `GET /api/books`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookListQuery {
    pub shelf: Option<String>,
    pub search: Option<String>,
}

impl BookListQuery {
    /// Collect decoded query pairs. A repeated `shelf` matches no shelf; a
    /// repeated `search` is joined with `,`. Other keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut shelves = Vec::new();
        let mut searches = Vec::new();
        for (key, value) in pairs {
            match key.as_str() {
                "shelf" => shelves.push(value),
                "search" => searches.push(value),
                _ => {}
            }
        }

        let shelf = match shelves.len() {
            1 => shelves.pop(),
            _ => None,
        };
        let search = (!searches.is_empty()).then(|| searches.join(","));
        Self { shelf, search }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetailsResponse {
    pub book_details: Book,
}
