use std::collections::BTreeMap;
use std::sync::Arc;

/// Предикат фильтра над одной записью
pub type Predicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Фильтры по колонкам. Запись видима, если проходит все активные фильтры.
pub struct FilterSet<E> {
    active: BTreeMap<String, Predicate<E>>,
}

impl<E> FilterSet<E> {
    pub fn new() -> Self {
        Self {
            active: BTreeMap::new(),
        }
    }

    /// Установить значение фильтра колонки.
    ///
    /// Пустое значение снимает ограничение по этой колонке.
    pub fn set<F>(&mut self, column: &str, value: &str, matcher: F)
    where
        F: Fn(&E, &str) -> bool + Send + Sync + 'static,
    {
        let value = value.trim().to_string();
        if value.is_empty() {
            self.active.remove(column);
            return;
        }
        let predicate: Predicate<E> = Arc::new(move |item: &E| matcher(item, &value));
        self.active.insert(column.to_string(), predicate);
    }

    pub fn remove(&mut self, column: &str) {
        self.active.remove(column);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_active(&self, column: &str) -> bool {
        self.active.contains_key(column)
    }

    pub fn matches(&self, item: &E) -> bool {
        self.active.values().all(|predicate| predicate(item))
    }

    pub fn apply(&self, items: &[E]) -> Vec<E>
    where
        E: Clone,
    {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

impl<E> Default for FilterSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(item: &&'static str, value: &str) -> bool {
        item.contains(value)
    }

    #[test]
    fn active_filters_are_combined_with_and() {
        let mut filters: FilterSet<&'static str> = FilterSet::new();
        let items = ["abc", "abd", "xbc"];

        filters.set("first", "a", contains);
        assert_eq!(filters.apply(&items), vec!["abc", "abd"]);

        filters.set("second", "c", contains);
        assert_eq!(filters.apply(&items), vec!["abc"]);
    }

    #[test]
    fn empty_value_removes_constraint() {
        let mut filters: FilterSet<&'static str> = FilterSet::new();
        filters.set("first", "zzz", contains);
        assert!(filters.apply(&["abc"]).is_empty());

        filters.set("first", "  ", contains);
        assert!(!filters.is_active("first"));
        assert_eq!(filters.apply(&["abc"]), vec!["abc"]);
    }
}
