/// Снимок полного списка записей с номером версии.
///
/// Версия увеличивается при каждой загрузке; UI перерисовывается,
/// когда версия меняется.
#[derive(Debug, Clone)]
pub struct VersionedCache<E> {
    rows: Vec<E>,
    version: u64,
}

impl<E> VersionedCache<E> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            version: 0,
        }
    }

    /// Заменить снимок целиком и вернуть новую версию
    pub fn replace(&mut self, rows: Vec<E>) -> u64 {
        self.rows = rows;
        self.version += 1;
        self.version
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Был ли снимок хотя бы раз загружен
    pub fn is_loaded(&self) -> bool {
        self.version > 0
    }
}

impl<E> Default for VersionedCache<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_replace_bumps_version() {
        let mut cache = VersionedCache::new();
        assert!(!cache.is_loaded());
        assert_eq!(cache.replace(vec![1, 2]), 1);
        assert_eq!(cache.replace(vec![1, 2]), 2);
        assert_eq!(cache.rows(), &[1, 2]);
        assert!(cache.is_loaded());
    }
}
