use std::cmp::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::{RepositoryError, RepositoryResult};
use crate::domain::member::Member;
use crate::domain::projections::{MemberDto, MemberTeamDto};
use crate::domain::repositories::{MemberRepository, TeamRepository};
use crate::domain::search::{
    Direction, MemberSearchCondition, Page, PageRequest, Sort, SortProperty,
};
use crate::domain::team::Team;

#[derive(Debug, Default)]
struct Tables {
    teams: Vec<Team>,
    members: Vec<Member>,
}

impl Tables {
    fn team(&self, id: Option<Uuid>) -> Option<&Team> {
        id.and_then(|id| self.teams.iter().find(|t| t.id() == id))
    }

    /// Evaluates the condition over `member LEFT JOIN team`, in insertion order
    fn joined(&self, condition: &MemberSearchCondition) -> Vec<MemberTeamDto> {
        let predicates = condition.predicates();
        self.members
            .iter()
            .map(|m| MemberTeamDto::from_entities(m, self.team(m.team_id())))
            .filter(|row| predicates.iter().all(|p| p.matches(row)))
            .collect()
    }

    fn members_of(&self, team_id: Uuid) -> Vec<Uuid> {
        self.members
            .iter()
            .filter(|m| m.team_id() == Some(team_id))
            .map(Member::id)
            .collect()
    }

    fn with_members(&self, team: &Team) -> Team {
        Team::from_persistence(team.id(), team.name().to_string(), self.members_of(team.id()))
    }
}

/// Process-local storage implementing both repository traits
///
/// Evaluates the same predicate list the SQL builder renders, over
/// `member LEFT JOIN team` kept in insertion order. Sorting follows
/// PostgreSQL's default NULL placement (last when ascending, first when
/// descending); text compares by code point rather than by collation.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slice_page(rows: Vec<MemberTeamDto>, request: &PageRequest) -> Vec<MemberTeamDto> {
        let mut rows = rows;
        sort_rows(&mut rows, request.sort());
        rows.into_iter()
            .skip(request.offset() as usize)
            .take(request.size() as usize)
            .collect()
    }
}

fn compare_nullable<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

fn compare_by(a: &MemberTeamDto, b: &MemberTeamDto, property: SortProperty) -> Ordering {
    match property {
        SortProperty::MemberId => a.member_id.cmp(&b.member_id),
        SortProperty::Username => compare_nullable(a.username.as_deref(), b.username.as_deref()),
        SortProperty::Age => a.age.cmp(&b.age),
        SortProperty::TeamId => compare_nullable(a.team_id, b.team_id),
        SortProperty::TeamName => {
            compare_nullable(a.team_name.as_deref(), b.team_name.as_deref())
        }
    }
}

fn sort_rows(rows: &mut [MemberTeamDto], sort: &Sort) {
    if sort.is_unsorted() {
        return;
    }

    rows.sort_by(|a, b| {
        sort.orders()
            .iter()
            .map(|order| {
                let ordering = compare_by(a, b, order.property);
                match order.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn save(&self, member: &Member) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        match tables.members.iter().position(|m| m.id() == member.id()) {
            Some(index) => tables.members[index] = member.clone(),
            None => tables.members.push(member.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Member>> {
        let tables = self.tables.read().await;
        Ok(tables.members.iter().find(|m| m.id() == id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        Ok(self.tables.read().await.members.clone())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .iter()
            .filter(|m| m.username() == Some(username))
            .cloned()
            .collect())
    }

    async fn search(&self, condition: &MemberSearchCondition) -> RepositoryResult<Vec<MemberTeamDto>> {
        Ok(self.tables.read().await.joined(condition))
    }

    async fn search_member_dtos(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberDto>> {
        let rows = self.tables.read().await.joined(condition);
        Ok(rows.iter().map(MemberDto::from).collect())
    }

    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        request: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>> {
        let rows = self.tables.read().await.joined(condition);
        let total = rows.len() as u64;

        Ok(Page::new(Self::slice_page(rows, request), request, total))
    }

    async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        request: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>> {
        let rows = self.tables.read().await.joined(condition);
        let matched = rows.len() as u64;

        let content = Self::slice_page(rows, request);
        let total = request.derive_total(content.len()).unwrap_or(matched);

        Ok(Page::new(content, request, total))
    }

    async fn bulk_add_age(&self, delta: i32) -> RepositoryResult<u64> {
        let mut tables = self.tables.write().await;

        let ages = tables
            .members
            .iter()
            .map(|m| m.age().checked_add(delta))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| RepositoryError::invalid_argument("Age out of range"))?;

        for (member, age) in tables.members.iter_mut().zip(ages) {
            member.set_age(age);
        }

        Ok(tables.members.len() as u64)
    }

    async fn bulk_rename_younger_than(&self, age: i32, username: &str) -> RepositoryResult<u64> {
        let mut tables = self.tables.write().await;
        let mut affected = 0;

        for member in tables.members.iter_mut().filter(|m| m.age() < age) {
            member.set_username(Some(username.to_string()));
            affected += 1;
        }

        Ok(affected)
    }

    async fn bulk_delete_older_than(&self, age: i32) -> RepositoryResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.members.len();

        tables.members.retain(|m| m.age() <= age);

        Ok((before - tables.members.len()) as u64)
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn save(&self, team: &Team) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        match tables.teams.iter().position(|t| t.id() == team.id()) {
            Some(index) => tables.teams[index] = team.clone(),
            None => tables.teams.push(team.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Team>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teams
            .iter()
            .find(|t| t.id() == id)
            .map(|t| tables.with_members(t)))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        let tables = self.tables.read().await;
        let mut teams: Vec<Team> = tables.teams.iter().map(|t| tables.with_members(t)).collect();
        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::SortOrder;

    async fn store_with(members: &[(Option<&str>, i32, Option<&str>)]) -> InMemoryStore {
        let store = InMemoryStore::new();
        let mut teams: Vec<Team> = Vec::new();

        for (username, age, team_name) in members {
            let team = match team_name {
                Some(name) => {
                    let position = match teams.iter().position(|t| t.name() == *name) {
                        Some(position) => position,
                        None => {
                            teams.push(Team::new(*name));
                            teams.len() - 1
                        }
                    };
                    Some(&mut teams[position])
                }
                None => None,
            };
            let member = Member::new(username.map(str::to_string), *age, team);
            MemberRepository::save(&store, &member).await.unwrap();
        }

        for team in &teams {
            TeamRepository::save(&store, team).await.unwrap();
        }

        store
    }

    #[tokio::test]
    async fn left_join_keeps_members_without_team() {
        let store = store_with(&[(Some("a"), 1, Some("teamA")), (Some("b"), 2, None)]).await;

        let rows = store.search(&MemberSearchCondition::default()).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.team_name.is_none()));
    }

    #[tokio::test]
    async fn sort_places_nulls_last_ascending_and_first_descending() {
        let store = store_with(&[
            (None, 1, None),
            (Some("b"), 2, None),
            (Some("a"), 3, None),
        ])
        .await;
        let condition = MemberSearchCondition::default();

        let asc = PageRequest::new(0, 10)
            .unwrap()
            .with_sort(Sort::by(vec![SortOrder::asc(SortProperty::Username)]));
        let desc = PageRequest::new(0, 10)
            .unwrap()
            .with_sort(Sort::by(vec![SortOrder::desc(SortProperty::Username)]));

        let asc_names: Vec<_> = store
            .search_page_simple(&condition, &asc)
            .await
            .unwrap()
            .into_content()
            .into_iter()
            .map(|r| r.username)
            .collect();
        let desc_names: Vec<_> = store
            .search_page_simple(&condition, &desc)
            .await
            .unwrap()
            .into_content()
            .into_iter()
            .map(|r| r.username)
            .collect();

        assert_eq!(asc_names, vec![Some("a".to_string()), Some("b".to_string()), None]);
        assert_eq!(desc_names, vec![None, Some("b".to_string()), Some("a".to_string())]);
    }

    #[tokio::test]
    async fn team_back_references_follow_member_foreign_keys() {
        let store = store_with(&[
            (Some("a"), 1, Some("teamA")),
            (Some("b"), 2, Some("teamA")),
            (Some("c"), 3, Some("teamB")),
        ])
        .await;

        let teams = TeamRepository::find_all(&store).await.unwrap();

        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name(), "teamA");
        assert_eq!(teams[0].members().len(), 2);
        assert_eq!(teams[1].members().len(), 1);
    }

    #[tokio::test]
    async fn bulk_add_age_overflow_leaves_rows_untouched() {
        let store = store_with(&[(Some("a"), 1, None), (Some("b"), i32::MAX, None)]).await;

        let result = store.bulk_add_age(1).await;

        assert!(matches!(result, Err(RepositoryError::InvalidArgument(_))));
        let ages: Vec<i32> = MemberRepository::find_all(&store)
            .await
            .unwrap()
            .iter()
            .map(Member::age)
            .collect();
        assert_eq!(ages, vec![1, i32::MAX]);
    }
}
