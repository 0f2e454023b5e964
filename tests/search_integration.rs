//! Integration tests for dynamic member search
//!
//! These tests run the repository contract against the in-memory store:
//! optional-predicate composition, both pagination strategies, and the
//! unit-of-work staleness that follows bulk updates.

use std::sync::Arc;

use member_search::domain::member::Member;
use member_search::domain::repositories::{MemberRepository, TeamRepository};
use member_search::domain::search::{
    MemberSearchCondition, PageRequest, Sort, SortOrder, SortProperty,
};
use member_search::domain::team::Team;
use member_search::infrastructure::repositories::InMemoryStore;
use member_search::infrastructure::seed::seed_sample_data;
use member_search::infrastructure::unit_of_work::UnitOfWork;

/// member1..member4 aged 10..40; teamA holds 1-2, teamB holds 3-4
async fn setup_four_members() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());

    let mut team_a = Team::new("teamA");
    let mut team_b = Team::new("teamB");
    TeamRepository::save(store.as_ref(), &team_a).await.expect("save teamA");
    TeamRepository::save(store.as_ref(), &team_b).await.expect("save teamB");

    let members = [
        Member::new(Some("member1".to_string()), 10, Some(&mut team_a)),
        Member::new(Some("member2".to_string()), 20, Some(&mut team_a)),
        Member::new(Some("member3".to_string()), 30, Some(&mut team_b)),
        Member::new(Some("member4".to_string()), 40, Some(&mut team_b)),
    ];
    for member in &members {
        MemberRepository::save(store.as_ref(), member)
            .await
            .expect("save member");
    }

    store
}

/// teamA/teamB plus member0..member99
async fn setup_sample_members() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    seed_sample_data(store.as_ref(), store.as_ref())
        .await
        .expect("seed sample data");
    store
}

fn usernames(rows: &[member_search::domain::projections::MemberTeamDto]) -> Vec<String> {
    rows.iter()
        .map(|r| r.username.clone().unwrap_or_default())
        .collect()
}

#[tokio::test]
async fn test_search_without_condition_returns_every_row() {
    let store = setup_sample_members().await;

    let rows = store
        .search(&MemberSearchCondition::default())
        .await
        .expect("search");

    assert_eq!(rows.len(), 100, "Unconstrained search should return all members");
}

#[tokio::test]
async fn test_search_with_single_field_matches_only_that_predicate() {
    let store = setup_sample_members().await;
    let all = store.search(&MemberSearchCondition::default()).await.unwrap();

    let cases = [
        MemberSearchCondition::default().with_username("member7"),
        MemberSearchCondition::default().with_team_name("teamB"),
        MemberSearchCondition::default().with_age_goe(35),
        MemberSearchCondition::default().with_age_loe(40),
    ];

    for condition in cases {
        let rows = store.search(&condition).await.expect("search");
        let expected: Vec<_> = all.iter().filter(|r| condition.matches(r)).cloned().collect();

        assert_eq!(rows, expected, "Mismatch for {:?}", condition);
    }

    let by_team = store
        .search(&MemberSearchCondition::default().with_team_name("teamB"))
        .await
        .unwrap();
    assert_eq!(by_team.len(), 50, "Odd-numbered members belong to teamB");
    assert!(by_team.iter().all(|r| r.team_name.as_deref() == Some("teamB")));
}

#[tokio::test]
async fn test_search_with_combined_condition() {
    let store = setup_four_members().await;

    let condition = MemberSearchCondition::default()
        .with_team_name("teamB")
        .with_age_goe(35)
        .with_age_loe(40);

    let rows = store.search(&condition).await.expect("search");

    assert_eq!(usernames(&rows), vec!["member4"]);
}

#[tokio::test]
async fn test_search_with_no_match_returns_empty() {
    let store = setup_four_members().await;

    let rows = store
        .search(&MemberSearchCondition::default().with_username("nobody"))
        .await
        .expect("No matches is not an error");

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_search_page_with_username_and_age_range() {
    let store = setup_four_members().await;
    let condition = MemberSearchCondition::default()
        .with_username("member1")
        .with_age_goe(10)
        .with_age_loe(30);
    let request = PageRequest::new(0, 10).unwrap();

    let page = store
        .search_page_simple(&condition, &request)
        .await
        .expect("page");

    assert!(page.content().len() <= 10);
    assert_eq!(usernames(page.content()), vec!["member1"]);
    assert!(page
        .content()
        .iter()
        .all(|r| (10..=30).contains(&r.age)));
    assert_eq!(page.total_elements(), 1);
}

#[tokio::test]
async fn test_search_member_dtos_projects_username_and_age() {
    let store = setup_four_members().await;

    let dtos = store
        .search_member_dtos(&MemberSearchCondition::default().with_team_name("teamA"))
        .await
        .expect("search");

    let pairs: Vec<_> = dtos
        .iter()
        .map(|d| (d.username.clone().unwrap_or_default(), d.age))
        .collect();
    assert_eq!(
        pairs,
        vec![("member1".to_string(), 10), ("member2".to_string(), 20)]
    );
}

#[tokio::test]
async fn test_simple_and_complex_pages_agree() {
    let store = setup_sample_members().await;
    let condition = MemberSearchCondition::default().with_age_goe(15);
    let sort = Sort::by(vec![SortOrder::asc(SortProperty::Age)]);

    // 85 matching rows: full pages, a short last page, and a page past the end
    for (page, size) in [(0u32, 10u32), (3, 10), (8, 10), (9, 10), (0, 100), (1, 84)] {
        let request = PageRequest::new(page, size).unwrap().with_sort(sort.clone());

        let simple = store.search_page_simple(&condition, &request).await.unwrap();
        let complex = store.search_page_complex(&condition, &request).await.unwrap();

        assert_eq!(simple, complex, "Pages differ at page {} size {}", page, size);
        assert!(simple.content().len() <= size as usize);
        assert!(simple.total_elements() >= simple.content().len() as u64);
        assert_eq!(simple.total_elements(), 85);
    }
}

#[tokio::test]
async fn test_sorted_pages_partition_the_result() {
    let store = setup_sample_members().await;
    let condition = MemberSearchCondition::default().with_team_name("teamA");
    let sort = Sort::by(vec![SortOrder::desc(SortProperty::Age)]);

    let mut ages = Vec::new();
    for page in 0..6 {
        let request = PageRequest::new(page, 10).unwrap().with_sort(sort.clone());
        let result = store.search_page_complex(&condition, &request).await.unwrap();
        ages.extend(result.content().iter().map(|r| r.age));
    }

    let expected: Vec<i32> = (0..100).rev().filter(|age| age % 2 == 0).collect();
    assert_eq!(ages, expected);
}

#[tokio::test]
async fn test_last_page_metadata() {
    let store = setup_sample_members().await;
    let request = PageRequest::new(9, 11).unwrap();

    let page = store
        .search_page_complex(&MemberSearchCondition::default(), &request)
        .await
        .unwrap();

    assert_eq!(page.content().len(), 1);
    assert_eq!(page.total_elements(), 100);
    assert_eq!(page.total_pages(), 10);
    assert!(page.is_last());
}

#[tokio::test]
async fn test_bulk_update_is_stale_until_unit_of_work_is_cleared() {
    let store = setup_four_members().await;
    let mut uow = UnitOfWork::begin(store.clone());

    // Load everything into the unit of work
    let before: Vec<i32> = uow
        .find_all_members()
        .await
        .unwrap()
        .iter()
        .map(Member::age)
        .collect();
    assert_eq!(before, vec![10, 20, 30, 40]);

    let affected = uow.bulk_add_age(1).await.expect("bulk update");
    assert_eq!(affected, 4);

    // Tracked instances win over the freshly read rows
    let stale: Vec<i32> = uow
        .find_all_members()
        .await
        .unwrap()
        .iter()
        .map(Member::age)
        .collect();
    assert_eq!(stale, vec![10, 20, 30, 40], "Cached members should still show old ages");

    // Storage already holds the new values
    let stored: Vec<i32> = store
        .search(&MemberSearchCondition::default())
        .await
        .unwrap()
        .iter()
        .map(|r| r.age)
        .collect();
    assert_eq!(stored, vec![11, 21, 31, 41]);

    uow.clear();

    let fresh: Vec<i32> = uow
        .find_all_members()
        .await
        .unwrap()
        .iter()
        .map(Member::age)
        .collect();
    assert_eq!(fresh, vec![11, 21, 31, 41], "Cleared unit of work should reload rows");
}

#[tokio::test]
async fn test_bulk_rename_and_delete() {
    let store = setup_four_members().await;
    let mut uow = UnitOfWork::begin(store.clone());
    uow.find_all_members().await.unwrap();

    let renamed = uow
        .bulk_rename_younger_than(28, "non-member")
        .await
        .expect("bulk rename");
    assert_eq!(renamed, 2);

    let cached = uow.find_members_by_username("member1").await.unwrap();
    assert!(cached.is_empty(), "Storage no longer has member1");

    let still_cached = uow.find_all_members().await.unwrap();
    assert!(
        still_cached.iter().any(|m| m.username() == Some("member1")),
        "Tracked instance keeps the old username"
    );

    uow.clear();
    let renamed_rows = uow.find_members_by_username("non-member").await.unwrap();
    assert_eq!(renamed_rows.len(), 2);

    let deleted = uow.bulk_delete_older_than(18).await.expect("bulk delete");
    assert_eq!(deleted, 3);

    uow.clear();
    let remaining = uow.find_all_members().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].age(), 10);
}

#[tokio::test]
async fn test_find_by_username() {
    let store = setup_four_members().await;

    let found = store.find_by_username("member3").await.expect("find");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].age(), 30);
}

#[tokio::test]
async fn test_team_lists_member_back_references() {
    let store = setup_four_members().await;

    let teams = TeamRepository::find_all(store.as_ref()).await.unwrap();
    let team_a = teams.iter().find(|t| t.name() == "teamA").expect("teamA");

    let found = TeamRepository::find_by_id(store.as_ref(), team_a.id())
        .await
        .unwrap()
        .expect("teamA by id");

    assert_eq!(found.members().len(), 2);
}
