//! Фильтры списка рецептов: по описанию, пациенту и приоритету.

use super::aggregate::Formula;
use crate::domain::common::AggregateId;

pub const DESCRIPTION: &str = "description";
pub const PATIENT: &str = "patient";
pub const PRIORITY: &str = "priority";

/// Описание содержит подстроку без учёта регистра
pub fn description_contains(formula: &Formula, value: &str) -> bool {
    formula
        .description
        .to_lowercase()
        .contains(&value.to_lowercase())
}

/// Рецепт выписан пациенту с указанным ID
pub fn patient_is(formula: &Formula, value: &str) -> bool {
    formula
        .patient_id
        .map_or(false, |id| id.as_string() == value)
}

/// Приоритет совпадает с кодом или названием
pub fn priority_matches(formula: &Formula, value: &str) -> bool {
    formula.priority.matches_filter(value)
}
