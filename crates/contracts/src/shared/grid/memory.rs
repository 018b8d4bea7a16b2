//! Репозиторий в памяти для тестов контроллера.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use super::{Repository, RepositoryError};
use crate::domain::common::AggregateRoot;

struct Store<E: AggregateRoot> {
    rows: Vec<E>,
    next_id: i64,
    referenced: HashSet<E::Id>,
    saves: usize,
    fail_saves: bool,
    save_gate: Option<Arc<Notify>>,
}

pub(crate) struct InMemoryRepository<E: AggregateRoot> {
    store: Mutex<Store<E>>,
    assign_id: fn(&mut E, i64),
}

impl<E: AggregateRoot + Clone> InMemoryRepository<E> {
    pub(crate) fn new(assign_id: fn(&mut E, i64)) -> Self {
        Self {
            store: Mutex::new(Store {
                rows: Vec::new(),
                next_id: 0,
                referenced: HashSet::new(),
                saves: 0,
                fail_saves: false,
                save_gate: None,
            }),
            assign_id,
        }
    }

    fn store(&self) -> MutexGuard<'_, Store<E>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Пометить запись как используемую другой записью
    pub(crate) fn mark_referenced(&self, id: E::Id) {
        self.store().referenced.insert(id);
    }

    pub(crate) fn fail_saves(&self, fail: bool) {
        self.store().fail_saves = fail;
    }

    /// Задерживать сохранения, пока не будет вызван `notify_one`
    pub(crate) fn hold_saves(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.store().save_gate = Some(Arc::clone(&gate));
        gate
    }

    pub(crate) fn save_count(&self) -> usize {
        self.store().saves
    }

    pub(crate) fn snapshot(&self) -> Vec<E> {
        self.store().rows.clone()
    }
}

impl<E: AggregateRoot + Clone> Repository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.store().rows.clone())
    }

    async fn save(&self, mut entity: E) -> Result<E, RepositoryError> {
        let gate = self.store().save_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let mut store = self.store();
        if store.fail_saves {
            return Err(RepositoryError::Other("disk full".into()));
        }
        store.saves += 1;
        match entity.id() {
            Some(id) => {
                let slot = store
                    .rows
                    .iter_mut()
                    .find(|row| row.id() == Some(id))
                    .ok_or(RepositoryError::NotFound)?;
                *slot = entity.clone();
            }
            None => {
                store.next_id += 1;
                (self.assign_id)(&mut entity, store.next_id);
                store.rows.push(entity.clone());
            }
        }
        Ok(entity)
    }

    async fn delete_by_id(&self, id: E::Id) -> Result<(), RepositoryError> {
        let mut store = self.store();
        if store.referenced.contains(&id) {
            return Err(RepositoryError::ReferentialIntegrity(format!(
                "{} {:?} is referenced",
                E::collection_name(),
                id
            )));
        }
        let position = store
            .rows
            .iter()
            .position(|row| row.id() == Some(id))
            .ok_or(RepositoryError::NotFound)?;
        store.rows.remove(position);
        Ok(())
    }
}
