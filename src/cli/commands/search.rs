use crate::cli::SearchArgs;
use crate::config::Config;
use crate::domain::UserId;
use crate::search::SearchParams;
use crate::state::SharedState;

fn search_params(args: SearchArgs, config: &Config) -> anyhow::Result<SearchParams> {
    let limit = args.limit.unwrap_or(config.search.default_limit);
    if limit == 0 || limit > config.search.max_limit {
        anyhow::bail!(
            "Invalid limit: {limit}. Limit must be between 1 and {}",
            config.search.max_limit
        );
    }

    let query = args.query.join(" ");

    Ok(SearchParams {
        query: (!query.trim().is_empty()).then_some(query),
        cuisine: args.cuisine,
        difficulty: args.difficulty,
        tags: args.tags,
        max_prep_time: args.max_prep_time.map(i32::from),
        max_cook_time: args.max_cook_time.map(i32::from),
        servings: args.servings.map(i32::from),
        is_public: args.public,
        sort_by: args.sort_by,
        sort_order: args.sort_order,
        limit,
        offset: args.offset,
    })
}

pub async fn cmd_search(config: &Config, args: SearchArgs) -> anyhow::Result<()> {
    let user = UserId::new(args.user.clone());
    let as_json = args.json;
    let params = search_params(args, config)?;

    let state = SharedState::new(config.clone()).await?;
    let response = state.search_service.search(&user, params).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.recipes.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }

    println!();
    println!(
        "Recipes ({} of {}, {} ms):",
        response.recipes.len(),
        response.total,
        response.search_time
    );
    println!("{:-<60}", "");

    for hydrated in &response.recipes {
        let recipe = &hydrated.recipe;
        let difficulty = recipe
            .difficulty
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        let cuisine = recipe.cuisine.as_deref().unwrap_or("-");

        println!("• {} [ID: {}]", recipe.title, recipe.id);
        println!(
            "  Cuisine: {} | Difficulty: {} | Ingredients: {} | Steps: {}",
            cuisine,
            difficulty,
            hydrated.ingredients.len(),
            hydrated.instructions.len()
        );
        if !hydrated.tags.is_empty() {
            let tags: Vec<&str> = hydrated.tags.iter().map(|t| t.name.as_str()).collect();
            println!("  Tags: {}", tags.join(", "));
        }
        println!();
    }

    if response.has_more {
        println!("More results available; use --offset to page.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_query_words_and_applies_default_limit() {
        let args = SearchArgs {
            user: "u1".to_string(),
            query: vec!["chocolate".to_string(), "cake".to_string()],
            ..SearchArgs::default()
        };
        let params = search_params(args, &Config::default()).unwrap();
        assert_eq!(params.query.as_deref(), Some("chocolate cake"));
        assert_eq!(params.limit, 20);
    }

    #[test]
    fn rejects_limit_above_max() {
        let args = SearchArgs {
            user: "u1".to_string(),
            limit: Some(500),
            ..SearchArgs::default()
        };
        assert!(search_params(args, &Config::default()).is_err());
    }
}
