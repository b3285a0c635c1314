pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use bookhub_db::BookRepository;
use bookhub_kernel::{InitCtx, Module};

use service::BookService;

/// Books module: add, list, and fetch book records
pub struct BooksModule {
    service: Arc<BookService>,
}

impl BooksModule {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self {
            service: Arc::new(BookService::new(books)),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/books", get(routes::list_books).post(routes::add_book))
            .route("/books/{id}", get(routes::get_book))
            .route("/top-rated-books", get(routes::list_top_rated))
            .with_state(Arc::clone(&self.service))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "shelf",
                                "in": "query",
                                "required": false,
                                "description": "READING keeps CURRENTLY_READING and WANT_TO_READ books; other values are ignored",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "search",
                                "in": "query",
                                "required": false,
                                "description": "Case-insensitive regular expression matched against titles",
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Matching books",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookList" }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "book_details": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book added",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string", "format": "uuid" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "book_details": { "$ref": "#/components/schemas/Book" }
                                            },
                                            "required": ["book_details"]
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Id is not a UUID",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Book not found",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/top-rated-books": {
                    "get": {
                        "summary": "List top-rated books (currently every book, unsorted)",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookList" }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Book identifier, a UUID by convention" },
                            "title": { "type": "string" },
                            "author_name": { "type": "string" },
                            "cover_pic": { "type": "string" },
                            "about_book": { "type": "string" },
                            "rating": { "type": "number" },
                            "read_status": { "type": "string", "description": "CURRENTLY_READING, WANT_TO_READ, READ, ..." },
                            "about_author": { "type": "string" }
                        }
                    },
                    "BookList": {
                        "type": "object",
                        "properties": {
                            "books": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["books"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module over the given book store
pub fn create_module(books: Arc<dyn BookRepository>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(books))
}
