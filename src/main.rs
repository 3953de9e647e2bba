use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::engine::PayrollEngine;
use payroll_engine::repository::{YamlSalaryRepository, YamlTaxBracketRepository};
use payroll_engine::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("payroll_engine=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let addr = settings.bind_address()?;

    let config = ConfigLoader::load(&settings.config_dir).with_context(|| {
        format!(
            "failed to load statutory configuration from {}",
            settings.config_dir.display()
        )
    })?;
    info!(
        jurisdiction = %config.statutory().jurisdiction.code,
        version = %config.statutory().jurisdiction.version,
        nhif_schedules = config.config().nhif_schedules().len(),
        "Statutory configuration loaded"
    );

    let tax_brackets = YamlTaxBracketRepository::new(config.tax_brackets_dir());
    let salaries = YamlSalaryRepository::new(&settings.salary_roster);
    let engine = PayrollEngine::new(config, Arc::new(salaries), Arc::new(tax_brackets));

    let app = create_router(AppState::new(engine)).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "Payroll engine listening");

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
