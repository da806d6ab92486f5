//! PC builder operations: compatibility evaluation and component suggestions.
//!
//! Both operations read through a [`CatalogStore`] at the start of every call
//! and then work purely in memory. Nothing is cached across calls.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{CandidateSummary, CatalogStore, Component, BUILDER_CATEGORIES};
use crate::compatibility::evaluator::evaluate;
use crate::compatibility::rules::CompatibilityResult;
use crate::error::CoreError;
use crate::types::ProductId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of product ids accepted in one selection.
pub const MAX_SELECTION_SIZE: usize = 64;

/// Bounds for the per-category suggestion cap.
pub const MIN_SUGGESTION_LIMIT: usize = 1;
pub const MAX_SUGGESTION_LIMIT: usize = 50;

/// Default per-category suggestion cap.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;

/// Candidate pool size relative to the cap, leaving room for filtering.
pub const CANDIDATE_POOL_MULTIPLIER: usize = 3;

static PRODUCT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid regex"));

/// Suggestions keyed by category slug.
pub type SuggestionMap = BTreeMap<String, Vec<CandidateSummary>>;

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Validate a selection of product ids.
///
/// Evaluation requires at least one id; suggestions accept an empty selection.
pub fn validate_product_ids(ids: &[ProductId], allow_empty: bool) -> Result<(), CoreError> {
    if ids.is_empty() && !allow_empty {
        return Err(CoreError::Validation(
            "product_ids must not be empty".to_string(),
        ));
    }
    if ids.len() > MAX_SELECTION_SIZE {
        return Err(CoreError::Validation(format!(
            "product_ids must contain at most {MAX_SELECTION_SIZE} entries, got {}",
            ids.len()
        )));
    }
    if let Some(bad) = ids.iter().find(|id| !PRODUCT_ID_RE.is_match(id)) {
        return Err(CoreError::Validation(format!(
            "Invalid product id '{bad}'"
        )));
    }
    Ok(())
}

/// Validate the per-category suggestion cap.
pub fn validate_suggestion_limit(limit: usize) -> Result<(), CoreError> {
    if (MIN_SUGGESTION_LIMIT..=MAX_SUGGESTION_LIMIT).contains(&limit) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "max_per_category must be between {MIN_SUGGESTION_LIMIT} and \
             {MAX_SUGGESTION_LIMIT}, got {limit}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Selection loading
// ---------------------------------------------------------------------------

/// Hydrate the selection in request order, one entry per requested id.
///
/// Repeated ids yield repeated components, so three copies of one RAM kit
/// count as three kits. Any unknown id fails the whole call.
pub async fn load_selection(
    store: &dyn CatalogStore,
    ids: &[ProductId],
) -> Result<Vec<Component>, CoreError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut unique: Vec<ProductId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }

    let found = store.components_by_ids(&unique).await?;
    let by_id: HashMap<&str, &Component> = found.iter().map(|c| (c.id.as_str(), c)).collect();

    ids.iter()
        .map(|id| {
            by_id
                .get(id.as_str())
                .map(|c| (*c).clone())
                .ok_or_else(|| CoreError::NotFound {
                    entity: "Product",
                    id: id.clone(),
                })
        })
        .collect()
}

/// Distinct category slugs present in a selection, sorted.
pub fn present_categories(components: &[Component]) -> Vec<String> {
    let mut categories: Vec<String> = components.iter().map(|c| c.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Check a selection against every applicable compatibility rule.
pub async fn evaluate_compatibility(
    store: &dyn CatalogStore,
    product_ids: &[ProductId],
) -> Result<CompatibilityResult, CoreError> {
    validate_product_ids(product_ids, false)?;

    let selection = load_selection(store, product_ids).await?;
    let rules = store
        .compatibility_rules(&present_categories(&selection))
        .await?;
    Ok(evaluate(&selection, &rules))
}

/// Suggest compatible components for every builder category not yet selected.
///
/// With an empty selection the pool is returned unfiltered. Otherwise each
/// candidate is added to the selection hypothetically and kept only if the
/// evaluator still reports the build as compatible. Candidates are checked
/// one at a time in pool order, so the first passing ones win.
///
/// Either every category is filled or an error is returned; there are no
/// partial results.
pub async fn suggest_components(
    store: &dyn CatalogStore,
    product_ids: &[ProductId],
    max_per_category: usize,
) -> Result<SuggestionMap, CoreError> {
    validate_product_ids(product_ids, true)?;
    validate_suggestion_limit(max_per_category)?;

    let selection = load_selection(store, product_ids).await?;
    let selected_categories = present_categories(&selection);

    let mut suggestions = SuggestionMap::new();
    for category in BUILDER_CATEGORIES {
        if selected_categories.iter().any(|c| c == category) {
            continue;
        }
        let picks = if selection.is_empty() {
            store
                .candidate_pool(category, product_ids, max_per_category)
                .await?
                .iter()
                .map(Component::summary)
                .collect()
        } else {
            compatible_candidates(store, &selection, product_ids, category, max_per_category)
                .await?
        };
        suggestions.insert(category.to_string(), picks);
    }
    Ok(suggestions)
}

/// Filter one category's candidate pool through the evaluator.
async fn compatible_candidates(
    store: &dyn CatalogStore,
    selection: &[Component],
    exclude_ids: &[ProductId],
    category: &str,
    limit: usize,
) -> Result<Vec<CandidateSummary>, CoreError> {
    let pool = store
        .candidate_pool(category, exclude_ids, limit * CANDIDATE_POOL_MULTIPLIER)
        .await?;
    if pool.is_empty() {
        return Ok(Vec::new());
    }

    let mut scope = present_categories(selection);
    scope.push(category.to_string());
    let rules = store.compatibility_rules(&scope).await?;

    let mut hypothetical = selection.to_vec();
    let mut accepted = Vec::with_capacity(limit);
    for candidate in &pool {
        if accepted.len() >= limit {
            break;
        }
        hypothetical.push(candidate.clone());
        if evaluate(&hypothetical, &rules).ok {
            accepted.push(candidate.summary());
        }
        hypothetical.truncate(selection.len());
    }
    Ok(accepted)
}
