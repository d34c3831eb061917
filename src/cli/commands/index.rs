use std::time::Instant;

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_rebuild_index(config: &Config) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    println!("Rebuilding search index...");
    let start = Instant::now();
    let written = state.index_maintainer.rebuild_index().await?;

    println!(
        "✓ Indexed {} recipes in {:.2}s",
        written,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
