use std::time::Duration;

use anyhow::Context;
use bookhub_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookhub settings")?;
    bookhub_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.name,
        port = settings.server.port,
        "bookhub bootstrap starting"
    );

    let repos = bookhub_db::connect(
        &settings.database.uri,
        &settings.database.name,
        Duration::from_millis(settings.database.timeout_ms),
    )
    .await
    .context("failed to open document store")?;

    let mut registry = ModuleRegistry::new();
    bookhub::register_all(&mut registry, &repos, &settings);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("bookhub bootstrap complete");

    let served = bookhub_http::start_server(&registry, &settings).await;
    registry.stop_all().await?;
    served
}
