use axum::{extract::State, Json};

use crate::api::errors::ApiError;
use crate::api::extractors::{Pagination, SearchQuery};
use crate::api::state::AppState;
use crate::domain::projections::MemberTeamDto;
use crate::domain::search::{MemberSearchCondition, Page};

/// Search members without paging
///
/// GET /v1/member?username=&teamName=&ageGoe=&ageLoe=
///
/// With no filter parameters this returns every member.
pub async fn search_members_v1(
    State(state): State<AppState>,
    SearchQuery(condition): SearchQuery<MemberSearchCondition>,
) -> Result<Json<Vec<MemberTeamDto>>, ApiError> {
    if condition.is_unconstrained() {
        tracing::debug!("unconstrained member search");
    }

    let rows = state.members.search(&condition).await?;

    Ok(Json(rows))
}

/// Search members, one page at a time, with a count query on every call
///
/// GET /v2/members?username=&teamName=&ageGoe=&ageLoe=&page=&size=&sort=
pub async fn search_members_v2(
    State(state): State<AppState>,
    SearchQuery(condition): SearchQuery<MemberSearchCondition>,
    Pagination(request): Pagination,
) -> Result<Json<Page<MemberTeamDto>>, ApiError> {
    let page = state.members.search_page_simple(&condition, &request).await?;

    Ok(Json(page))
}

/// Search members, one page at a time, skipping the count query when the
/// page itself shows the total
///
/// GET /v3/members?username=&teamName=&ageGoe=&ageLoe=&page=&size=&sort=
pub async fn search_members_v3(
    State(state): State<AppState>,
    SearchQuery(condition): SearchQuery<MemberSearchCondition>,
    Pagination(request): Pagination,
) -> Result<Json<Page<MemberTeamDto>>, ApiError> {
    let page = state.members.search_page_complex(&condition, &request).await?;

    Ok(Json(page))
}
