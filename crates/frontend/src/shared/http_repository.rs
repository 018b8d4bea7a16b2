//! Репозиторий поверх REST API бэкенда

use std::marker::PhantomData;

use contracts::domain::common::AggregateRoot;
use contracts::shared::api_error::ApiError;
use contracts::shared::grid::{Repository, RepositoryError};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_utils::{collection_url, element_url};

pub struct HttpRepository<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> HttpRepository<E> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for HttpRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn transport(e: gloo_net::Error) -> RepositoryError {
    RepositoryError::Other(e.to_string())
}

/// Разобрать тело ошибки; если оно не в формате `ApiError`, вернуть статус
async fn error_from(response: &Response) -> RepositoryError {
    match response.json::<ApiError>().await {
        Ok(body) => body.into(),
        Err(_) => RepositoryError::Other(format!("HTTP {}", response.status())),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RepositoryError> {
    if !response.ok() {
        return Err(error_from(&response).await);
    }
    response.json::<T>().await.map_err(transport)
}

impl<E> Repository<E> for HttpRepository<E>
where
    E: AggregateRoot + Serialize + DeserializeOwned,
{
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        let response = Request::get(&collection_url::<E>())
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn save(&self, entity: E) -> Result<E, RepositoryError> {
        let response = Request::post(&collection_url::<E>())
            .json(&entity)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn delete_by_id(&self, id: E::Id) -> Result<(), RepositoryError> {
        let response = Request::delete(&element_url::<E>(&id))
            .send()
            .await
            .map_err(transport)?;
        if response.ok() {
            Ok(())
        } else {
            Err(error_from(&response).await)
        }
    }
}
