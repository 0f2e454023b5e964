//! SQL rendering for dynamic member searches.
//!
//! Each present condition field becomes one bound predicate; absent fields
//! emit nothing, so an empty condition renders no WHERE clause at all.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::search::{Direction, MemberPredicate, PageRequest, Sort, SortProperty};

/// Join shared by every search query
const FROM_MEMBER_TEAM: &str = " FROM member m LEFT JOIN team t ON m.team_id = t.id";

/// Column list for the flat Member-Team projection
const MEMBER_TEAM_COLUMNS: &str =
    "SELECT m.id AS member_id, m.username, m.age, t.id AS team_id, t.name AS team_name";

/// Column list for the username/age projection
const MEMBER_COLUMNS: &str = "SELECT m.username, m.age";

/// Builds the content query for the flat projection
pub fn member_team_query(predicates: &[MemberPredicate], sort: &Sort) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(MEMBER_TEAM_COLUMNS);
    query.push(FROM_MEMBER_TEAM);
    push_where(&mut query, predicates);
    push_order_by(&mut query, sort);
    query
}

/// Builds the content query for one page of the flat projection
pub fn member_team_page_query(
    predicates: &[MemberPredicate],
    request: &PageRequest,
) -> QueryBuilder<'static, Postgres> {
    let mut query = member_team_query(predicates, request.sort());
    query
        .push(" LIMIT ")
        .push_bind(i64::from(request.size()))
        .push(" OFFSET ")
        .push_bind(request.offset());
    query
}

/// Builds the content query for the username/age projection
pub fn member_query(predicates: &[MemberPredicate]) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(MEMBER_COLUMNS);
    query.push(FROM_MEMBER_TEAM);
    push_where(&mut query, predicates);
    query
}

/// Builds the total-count query sharing the content query's filter
pub fn count_query(predicates: &[MemberPredicate]) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT COUNT(*)");
    query.push(FROM_MEMBER_TEAM);
    push_where(&mut query, predicates);
    query
}

fn push_where(query: &mut QueryBuilder<'static, Postgres>, predicates: &[MemberPredicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });

        match predicate {
            MemberPredicate::UsernameEq(username) => {
                query.push("m.username = ").push_bind(username.clone());
            }
            MemberPredicate::TeamNameEq(name) => {
                query.push("t.name = ").push_bind(name.clone());
            }
            MemberPredicate::AgeGoe(age) => {
                query.push("m.age >= ").push_bind(*age);
            }
            MemberPredicate::AgeLoe(age) => {
                query.push("m.age <= ").push_bind(*age);
            }
        }
    }
}

fn push_order_by(query: &mut QueryBuilder<'static, Postgres>, sort: &Sort) {
    for (i, order) in sort.orders().iter().enumerate() {
        query.push(if i == 0 { " ORDER BY " } else { ", " });
        query.push(column(order.property));
        query.push(match order.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        });
    }
}

/// Maps a sortable projection field to its qualified column
///
/// Only these fixed names ever reach the SQL text; sort input is never
/// interpolated.
fn column(property: SortProperty) -> &'static str {
    match property {
        SortProperty::MemberId => "m.id",
        SortProperty::Username => "m.username",
        SortProperty::Age => "m.age",
        SortProperty::TeamId => "t.id",
        SortProperty::TeamName => "t.name",
    }
}
