use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::search::{PageParams, PageRequest};

/// Query-string extractor that rejects with a JSON [`ApiError`]
///
/// Usage:
/// ```rust,ignore
/// async fn handler(
///     SearchQuery(condition): SearchQuery<MemberSearchCondition>,
/// ) -> Result<Json<Vec<MemberTeamDto>>, ApiError> {
///     // ...
/// }
/// ```
pub struct SearchQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for SearchQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri)
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        Ok(SearchQuery(value))
    }
}

/// Validated `page`, `size` and `sort` parameters
///
/// Applies the configured page-size defaults from [`AppState`].
pub struct Pagination(pub PageRequest);

#[async_trait]
impl FromRequestParts<AppState> for Pagination {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SearchQuery(params) = SearchQuery::<PageParams>::from_request_parts(parts, state).await?;
        let request = PageRequest::from_params(&params, &state.page)?;

        Ok(Pagination(request))
    }
}
