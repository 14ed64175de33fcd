//! Listing pipeline shared by every collection route.
//!
//! The query string is translated into a [`ListQuery`] (filter, projection,
//! sort, page), then one count and one page query run against the store.
//! The count uses the same filter as the page, so `pagination` describes the
//! filtered result set.

use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde_json::Value;
use tracing::debug;

use devcamper_core::{AppError, ListQuery};
use devcamper_db::{DocumentStore, FindQuery, Relation, populate};
use devcamper_models::{ListResponse, Model};

use crate::state::AppState;

/// A collection exposed through a listing route.
pub trait Resource: Model + Send + Sync + 'static {
    /// Relation expanded on every listed document.
    const POPULATE: Option<Relation> = None;

    /// Fields never returned, even when selected.
    const HIDDEN_FIELDS: &'static [&'static str] = &[];
}

/// The parsed listing query of the current request.
#[derive(Debug, Clone)]
pub struct ListParams<R> {
    pub query: ListQuery,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ListParams<R> {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            _resource: PhantomData,
        }
    }

    /// Narrows the listing to documents whose `field` equals `value`.
    pub fn scoped_to(self, field: &'static str, value: impl Into<devcamper_core::Operand>) -> Self {
        Self::new(self.query.scoped_to(field, value))
    }

    pub async fn execute(self, store: &dyn DocumentStore) -> Result<ListResponse, AppError> {
        execute::<R>(store, self.query).await
    }
}

impl<R: Resource, S: Send + Sync> FromRequestParts<S> for ListParams<R> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::bad_request(anyhow::anyhow!("{}", e.body_text())))?;

        Ok(Self::new(ListQuery::from_pairs(&pairs)?))
    }
}

/// The listing envelope for the current request, ready to return.
#[derive(Debug, Clone)]
pub struct AdvancedResults<R> {
    pub results: ListResponse,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> FromRequestParts<AppState> for AdvancedResults<R> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let params = ListParams::<R>::from_request_parts(parts, state).await?;
        let results = params.execute(state.store.as_ref()).await?;

        Ok(Self {
            results,
            _resource: PhantomData,
        })
    }
}

/// Runs `query` against `R`'s collection: one count, one page, then expansion.
pub async fn execute<R: Resource>(
    store: &dyn DocumentStore,
    query: ListQuery,
) -> Result<ListResponse, AppError> {
    let total = store.count(R::COLLECTION, &query.filter).await?;

    let page = FindQuery {
        filter: query.filter,
        sort: query.sort,
        skip: query.page.skip(),
        limit: Some(query.page.limit()),
    };
    let mut docs = store.find(R::COLLECTION, &page).await?;

    for doc in docs.iter_mut() {
        for field in R::HIDDEN_FIELDS {
            doc.remove(*field);
        }
    }
    if let Some(projection) = &query.projection {
        docs = docs.iter().map(|doc| projection.apply(doc)).collect();
    }
    if let Some(relation) = R::POPULATE {
        populate(store, &mut docs, &relation).await?;
    }

    debug!(
        collection = R::COLLECTION,
        total,
        returned = docs.len(),
        page = query.page.page(),
        "Listing served"
    );

    let pagination = query.page.pagination(total);
    Ok(ListResponse::new(
        docs.into_iter().map(Value::Object).collect(),
        pagination,
    ))
}
