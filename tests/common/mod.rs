//! Shared fixtures: a fresh temp-file database per test and a small
//! recipe builder that writes rows the way the persistence layer would,
//! then fires the index hook.

#![allow(dead_code)]

use recipedex::config::Config;
use recipedex::domain::RecipeId;
use recipedex::entities::{
    images, ingredients, instructions, recipe_notes, recipe_tags, recipes, tags,
};
use recipedex::search::ManualClock;
use recipedex::state::SharedState;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::sync::Arc;

pub fn test_config() -> Config {
    let db_path =
        std::env::temp_dir().join(format!("recipedex-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.observability.metrics_enabled = false;
    config
}

pub struct TestEnv {
    pub state: Arc<SharedState>,
    pub clock: Arc<ManualClock>,
}

pub async fn spawn_env() -> TestEnv {
    spawn_env_with(test_config()).await
}

pub async fn spawn_env_with(config: Config) -> TestEnv {
    let clock = Arc::new(ManualClock::new());
    let state = SharedState::with_clock(config, clock.clone())
        .await
        .expect("failed to create shared state");

    TestEnv {
        state: Arc::new(state),
        clock,
    }
}

#[derive(Debug, Clone)]
pub struct RecipeFixture {
    pub owner: String,
    pub title: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub is_public: bool,
    pub is_archived: bool,
    /// Minutes before "now"; larger is older.
    pub age_minutes: i64,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub images: Vec<String>,
    pub notes: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl RecipeFixture {
    pub fn new(owner: &str, title: &str) -> Self {
        Self {
            owner: owner.to_string(),
            title: title.to_string(),
            description: None,
            cuisine: None,
            difficulty: None,
            prep_time: None,
            cook_time: None,
            servings: None,
            is_public: true,
            is_archived: false,
            age_minutes: 0,
            tags: Vec::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            images: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn cuisine(mut self, cuisine: &str) -> Self {
        self.cuisine = Some(cuisine.to_string());
        self
    }

    pub fn difficulty(mut self, difficulty: &str) -> Self {
        self.difficulty = Some(difficulty.to_string());
        self
    }

    pub fn prep_time(mut self, minutes: i32) -> Self {
        self.prep_time = Some(minutes);
        self
    }

    pub fn cook_time(mut self, minutes: i32) -> Self {
        self.cook_time = Some(minutes);
        self
    }

    pub fn servings(mut self, servings: i32) -> Self {
        self.servings = Some(servings);
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn archived(mut self) -> Self {
        self.is_archived = true;
        self
    }

    pub fn age_minutes(mut self, minutes: i64) -> Self {
        self.age_minutes = minutes;
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = owned(tags);
        self
    }

    pub fn ingredients(mut self, names: &[&str]) -> Self {
        self.ingredients = owned(names);
        self
    }

    pub fn instructions(mut self, steps: &[&str]) -> Self {
        self.instructions = owned(steps);
        self
    }

    pub fn images(mut self, urls: &[&str]) -> Self {
        self.images = owned(urls);
        self
    }

    pub fn notes(mut self, notes: &[&str]) -> Self {
        self.notes = owned(notes);
        self
    }
}

async fn tag_id(state: &SharedState, name: &str) -> i32 {
    let conn = &state.store.conn;
    if let Some(existing) = tags::Entity::find()
        .filter(tags::Column::Name.eq(name))
        .one(conn)
        .await
        .expect("tag lookup failed")
    {
        return existing.id;
    }

    tags::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("tag insert failed")
    .id
}

/// Writes the recipe and its children without touching the index.
pub async fn insert_rows(state: &SharedState, fixture: &RecipeFixture) -> RecipeId {
    let conn = &state.store.conn;
    let created_at = (chrono::Utc::now() - chrono::Duration::minutes(fixture.age_minutes))
        .to_rfc3339_opts(chrono::SecondsFormat::Micros, true);

    let recipe = recipes::ActiveModel {
        owner_id: Set(fixture.owner.clone()),
        title: Set(fixture.title.clone()),
        description: Set(fixture.description.clone()),
        servings: Set(fixture.servings),
        prep_time: Set(fixture.prep_time),
        cook_time: Set(fixture.cook_time),
        difficulty: Set(fixture.difficulty.clone()),
        cuisine: Set(fixture.cuisine.clone()),
        is_public: Set(fixture.is_public),
        is_archived: Set(fixture.is_archived),
        created_at: Set(created_at.clone()),
        updated_at: Set(created_at),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("recipe insert failed");

    // Children are written in reverse so that reads must sort, not rely on rowid.
    for (position, name) in fixture.ingredients.iter().enumerate().rev() {
        ingredients::ActiveModel {
            recipe_id: Set(recipe.id),
            name: Set(name.clone()),
            quantity: Set(None),
            unit: Set(None),
            notes: Set(None),
            sort_order: Set(i32::try_from(position).unwrap()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .expect("ingredient insert failed");
    }

    for (position, content) in fixture.instructions.iter().enumerate().rev() {
        instructions::ActiveModel {
            recipe_id: Set(recipe.id),
            step_number: Set(i32::try_from(position).unwrap() + 1),
            content: Set(content.clone()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .expect("instruction insert failed");
    }

    for (position, url) in fixture.images.iter().enumerate().rev() {
        images::ActiveModel {
            recipe_id: Set(recipe.id),
            url: Set(url.clone()),
            caption: Set(None),
            sort_order: Set(i32::try_from(position).unwrap()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .expect("image insert failed");
    }

    for note in &fixture.notes {
        recipe_notes::ActiveModel {
            recipe_id: Set(recipe.id),
            content: Set(note.clone()),
            created_at: Set(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)),
            ..Default::default()
        }
        .insert(conn)
        .await
        .expect("note insert failed");
    }

    for name in &fixture.tags {
        let tag_id = tag_id(state, name).await;
        recipe_tags::Entity::insert(recipe_tags::ActiveModel {
            recipe_id: Set(recipe.id),
            tag_id: Set(tag_id),
        })
        .exec_without_returning(conn)
        .await
        .expect("recipe tag insert failed");
    }

    RecipeId::new(recipe.id)
}

/// Writes the recipe and fires the create hook, as the persistence layer does.
pub async fn create_recipe(state: &SharedState, fixture: RecipeFixture) -> RecipeId {
    let id = insert_rows(state, &fixture).await;
    state
        .index_maintainer
        .on_recipe_created(id)
        .await
        .expect("index hook failed");
    id
}

pub async fn archive_recipe(state: &SharedState, id: RecipeId) {
    let conn = &state.store.conn;
    let recipe = recipes::Entity::find_by_id(id.value())
        .one(conn)
        .await
        .expect("recipe lookup failed")
        .expect("recipe missing");

    let mut active: recipes::ActiveModel = recipe.into();
    active.is_archived = Set(true);
    active.update(conn).await.expect("archive failed");

    state
        .index_maintainer
        .on_recipe_updated(id)
        .await
        .expect("index hook failed");
}

pub async fn rename_recipe(state: &SharedState, id: RecipeId, title: &str) {
    let conn = &state.store.conn;
    let recipe = recipes::Entity::find_by_id(id.value())
        .one(conn)
        .await
        .expect("recipe lookup failed")
        .expect("recipe missing");

    let mut active: recipes::ActiveModel = recipe.into();
    active.title = Set(title.to_string());
    active.update(conn).await.expect("rename failed");

    state
        .index_maintainer
        .on_recipe_updated(id)
        .await
        .expect("index hook failed");
}

pub fn ids(raw: &[RecipeId]) -> Vec<i32> {
    raw.iter().map(|id| id.value()).collect()
}
