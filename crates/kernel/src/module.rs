use async_trait::async_trait;
use axum::Router;

/// What a module may read while it is brought up
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// A feature area of bookhub (accounts, books) plugged into the server
#[async_trait]
pub trait Module: Sync + Send {
    /// Stable name used in logs and registry lookups
    fn name(&self) -> &'static str;

    /// Runs once at startup, before the listener is bound
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Handlers contributed by this module, relative to `/api`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment (`paths` and `components.schemas`) with paths relative to `/api`
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after the server has drained, in reverse registration order
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
