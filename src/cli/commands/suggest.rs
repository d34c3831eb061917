use crate::config::Config;
use crate::domain::UserId;
use crate::state::SharedState;

pub async fn cmd_suggest(
    config: &Config,
    user: &str,
    partial: &str,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let suggestions = state
        .search_service
        .suggestions(&UserId::new(user), partial, limit)
        .await;

    if suggestions.is_empty() {
        println!("No suggestions for '{partial}'");
        return Ok(());
    }

    for suggestion in suggestions {
        println!("{suggestion}");
    }

    Ok(())
}
