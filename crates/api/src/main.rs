use anyhow::Context;

use gatehouse_api::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gatehouse_observability::init();

    let settings = Settings::from_env()?;
    let auth = settings.auth_config()?;
    let app = gatehouse_api::app::build_app(&auth)?;

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
