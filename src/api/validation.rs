use super::{ApiError, SearchQuery};
use crate::constants::suggestions;
use crate::domain::{Difficulty, RecipeId, SortOrder};
use crate::search::SearchParams;

pub fn validate_recipe_id(id: i32) -> Result<RecipeId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid recipe ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(RecipeId::new(id))
}

pub fn validate_limit(limit: Option<i64>, default: u64, max: u64) -> Result<u64, ApiError> {
    let Some(limit) = limit else {
        return Ok(default);
    };

    match u64::try_from(limit) {
        Ok(value) if (1..=max).contains(&value) => Ok(value),
        _ => Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between 1 and {}",
            limit, max
        ))),
    }
}

pub fn validate_offset(offset: Option<i64>) -> Result<u64, ApiError> {
    let offset = offset.unwrap_or(0);
    u64::try_from(offset).map_err(|_| {
        ApiError::validation(format!(
            "Invalid offset: {}. Offset cannot be negative",
            offset
        ))
    })
}

pub fn validate_suggestion_limit(limit: Option<i64>) -> Result<Option<usize>, ApiError> {
    let Some(limit) = limit else {
        return Ok(None);
    };

    match usize::try_from(limit) {
        Ok(value) if (1..=suggestions::MAX_LIMIT).contains(&value) => Ok(Some(value)),
        _ => Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between 1 and {}",
            limit,
            suggestions::MAX_LIMIT
        ))),
    }
}

/// Minutes or servings: must fit an `i32` and be non-negative.
fn validate_non_negative(field: &str, value: Option<i64>) -> Result<Option<i32>, ApiError> {
    value
        .map(|v| {
            i32::try_from(v)
                .ok()
                .filter(|v| *v >= 0)
                .ok_or_else(|| ApiError::validation(format!("Invalid {field}: {v}")))
        })
        .transpose()
}

/// Splits a comma-separated list, dropping empty items.
#[must_use]
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

pub fn parse_difficulties(raw: Option<&str>) -> Result<Vec<Difficulty>, ApiError> {
    split_list(raw)
        .iter()
        .map(|d| {
            d.parse::<Difficulty>().map_err(|_| {
                ApiError::validation(format!(
                    "Invalid difficulty: '{}'. Expected one of easy, medium, hard",
                    d
                ))
            })
        })
        .collect()
}

pub fn parse_sort_order(raw: Option<&str>) -> Result<Option<SortOrder>, ApiError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<SortOrder>().map_err(|_| {
                ApiError::validation(format!(
                    "Invalid sort order: '{}'. Expected asc or desc",
                    s
                ))
            })
        })
        .transpose()
}

/// Turns the raw query string into typed search input. Unknown sort keys
/// are passed through; the engine falls back to its default order for them.
pub fn search_params_from_query(
    raw: SearchQuery,
    default_limit: u64,
    max_limit: u64,
) -> Result<SearchParams, ApiError> {
    let servings = validate_non_negative("servings", raw.servings)?;
    if servings == Some(0) {
        return Err(ApiError::validation("Invalid servings: 0"));
    }

    Ok(SearchParams {
        query: raw
            .query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty()),
        cuisine: split_list(raw.cuisine.as_deref()),
        difficulty: parse_difficulties(raw.difficulty.as_deref())?,
        tags: split_list(raw.tags.as_deref()),
        max_prep_time: validate_non_negative("maxPrepTime", raw.max_prep_time)?,
        max_cook_time: validate_non_negative("maxCookTime", raw.max_cook_time)?,
        servings,
        is_public: raw.is_public,
        sort_by: raw.sort_by.filter(|s| !s.trim().is_empty()),
        sort_order: parse_sort_order(raw.sort_order.as_deref())?,
        limit: validate_limit(raw.limit, default_limit, max_limit)?,
        offset: validate_offset(raw.offset)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_recipe_id() {
        assert!(validate_recipe_id(1).is_ok());
        assert!(validate_recipe_id(0).is_err());
        assert!(validate_recipe_id(-1).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(None, 20, 100).unwrap(), 20);
        assert_eq!(validate_limit(Some(100), 20, 100).unwrap(), 100);
        assert!(validate_limit(Some(0), 20, 100).is_err());
        assert!(validate_limit(Some(-5), 20, 100).is_err());
        assert!(validate_limit(Some(101), 20, 100).is_err());
    }

    #[test]
    fn test_validate_offset() {
        assert_eq!(validate_offset(None).unwrap(), 0);
        assert_eq!(validate_offset(Some(40)).unwrap(), 40);
        assert!(validate_offset(Some(-1)).is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(Some(" dessert, ,quick ")),
            vec!["dessert".to_string(), "quick".to_string()]
        );
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn test_parse_difficulties() {
        assert_eq!(
            parse_difficulties(Some("easy,HARD")).unwrap(),
            vec![Difficulty::Easy, Difficulty::Hard]
        );
        assert!(parse_difficulties(Some("easy,extreme")).is_err());
    }

    #[test]
    fn test_search_params_from_query() {
        let raw = SearchQuery {
            query: Some("  chocolate cake ".to_string()),
            tags: Some("dessert".to_string()),
            sort_by: Some("calories".to_string()),
            sort_order: Some("asc".to_string()),
            max_prep_time: Some(30),
            limit: Some(10),
            ..SearchQuery::default()
        };

        let params = search_params_from_query(raw, 20, 100).unwrap();
        assert_eq!(params.query.as_deref(), Some("chocolate cake"));
        assert_eq!(params.tags, vec!["dessert".to_string()]);
        assert_eq!(params.sort_by.as_deref(), Some("calories"));
        assert_eq!(params.sort_order, Some(SortOrder::Ascending));
        assert_eq!(params.max_prep_time, Some(30));
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn test_negative_minutes_rejected() {
        let raw = SearchQuery {
            max_cook_time: Some(-10),
            ..SearchQuery::default()
        };
        assert!(search_params_from_query(raw, 20, 100).is_err());
    }
}
