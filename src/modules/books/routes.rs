use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bookhub_http::{ApiJson, ApiQuery, AppError, MessageResponse};

use super::models::{AddBookRequest, BookDetailsResponse, BookListQuery, BooksResponse};
use super::service::{cast_book, BookService};

pub async fn add_book(
    State(service): State<Arc<BookService>>,
    ApiJson(input): ApiJson<AddBookRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let book = cast_book(input.book_details)?;
    service.add_book(book).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Book added successfully")),
    ))
}

pub async fn list_books(
    State(service): State<Arc<BookService>>,
    ApiQuery(pairs): ApiQuery<Vec<(String, String)>>,
) -> Result<Json<BooksResponse>, AppError> {
    let query = BookListQuery::from_pairs(pairs);
    let books = service.list_books(&query).await?;
    Ok(Json(BooksResponse { books }))
}

pub async fn list_top_rated(
    State(service): State<Arc<BookService>>,
) -> Result<Json<BooksResponse>, AppError> {
    let books = service.list_top_rated().await?;
    Ok(Json(BooksResponse { books }))
}

pub async fn get_book(
    State(service): State<Arc<BookService>>,
    Path(id): Path<String>,
) -> Result<Json<BookDetailsResponse>, AppError> {
    let book_details = service.get_book(&id).await?;
    Ok(Json(BookDetailsResponse { book_details }))
}
