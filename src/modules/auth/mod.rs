pub mod models;
pub mod password;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::post, Router};
use bookhub_db::UserRepository;
use bookhub_kernel::{settings::AuthSettings, InitCtx, Module};
use serde_json::json;

use password::{BcryptHasher, COST_RANGE};
use service::AuthService;

/// Registration and login endpoints
pub struct AuthModule {
    service: Arc<AuthService>,
    bcrypt_cost: u32,
}

impl AuthModule {
    pub fn new(users: Arc<dyn UserRepository>, settings: &AuthSettings) -> Self {
        let hasher = BcryptHasher::new(settings.bcrypt_cost);
        Self {
            service: Arc::new(AuthService::new(users, hasher)),
            bcrypt_cost: hasher.cost(),
        }
    }
}

#[async_trait]
impl Module for AuthModule {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        anyhow::ensure!(
            COST_RANGE.contains(&self.bcrypt_cost),
            "auth.bcrypt_cost must be within {}..={}, got {}",
            COST_RANGE.start(),
            COST_RANGE.end(),
            self.bcrypt_cost
        );
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            bcrypt_cost = self.bcrypt_cost,
            "auth module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/register", post(routes::register))
            .route("/login", post(routes::login))
            .with_state(Arc::clone(&self.service))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/register": {
                    "post": {
                        "summary": "Register a user",
                        "tags": ["Auth"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Credentials" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "User registered",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Password missing or body malformed",
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
                "/login": {
                    "post": {
                        "summary": "Check a username and password",
                        "tags": ["Auth"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Credentials" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Credentials accepted",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            },
                            "401": {
                                "description": "Invalid credentials",
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
                }
            },
            "components": {
                "schemas": {
                    "Credentials": {
                        "type": "object",
                        "properties": {
                            "username": { "type": "string" },
                            "password": { "type": "string" }
                        }
                    },
                    "Message": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" }
                        },
                        "required": ["message"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "auth module stopped");
        Ok(())
    }
}

/// Create the auth module over the given user store
pub fn create_module(users: Arc<dyn UserRepository>, settings: &AuthSettings) -> Arc<dyn Module> {
    Arc::new(AuthModule::new(users, settings))
}
