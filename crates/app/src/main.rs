//! StudyBuddy - headless entry point
//!
//! Loads configuration, installs logging and reports the route the client
//! would open with.

use studybuddy_app::utils::logging::init_tracing;
use studybuddy_app::AppContext;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = studybuddy_infra::config::load()?;
    init_tracing(&config.logging)?;

    let ctx = AppContext::new_with_config(config);
    let navigator = ctx.navigator();
    let theme = ctx.load_theme().await;

    info!(route = %navigator.current(), %theme, "StudyBuddy ready");
    Ok(())
}
