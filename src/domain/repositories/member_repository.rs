use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryResult;
use crate::domain::member::Member;
use crate::domain::projections::{MemberDto, MemberTeamDto};
use crate::domain::search::{MemberSearchCondition, Page, PageRequest};

/// Repository trait for Member entities and member searches
///
/// Search methods compose their filter from the present fields of a
/// [`MemberSearchCondition`] only. An empty condition searches the whole
/// `member LEFT JOIN team` set; nothing prevents that full scan.
///
/// Unless the page request carries a sort, result order is unspecified and
/// may change between calls.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Save a member (insert or update)
    async fn save(&self, member: &Member) -> RepositoryResult<()>;

    /// Find a member by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Member>>;

    /// Find every member
    async fn find_all(&self) -> RepositoryResult<Vec<Member>>;

    /// Find members with exactly this username
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Dynamic search returning every matching row
    async fn search(&self, condition: &MemberSearchCondition) -> RepositoryResult<Vec<MemberTeamDto>>;

    /// Dynamic search projected to username and age
    async fn search_member_dtos(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberDto>>;

    /// Dynamic search returning one page; always runs a count query
    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        request: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>>;

    /// Dynamic search returning one page; runs the count query only when
    /// [`PageRequest::derive_total`] cannot tell the total from the content
    async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        request: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>>;

    /// Adds `delta` to every member's age, returning the affected row count
    ///
    /// Bulk operations write straight to storage. Members already loaded into
    /// a [`UnitOfWork`](crate::infrastructure::unit_of_work::UnitOfWork) keep
    /// their old values until that unit of work is cleared.
    async fn bulk_add_age(&self, delta: i32) -> RepositoryResult<u64>;

    /// Renames every member younger than `age`
    async fn bulk_rename_younger_than(&self, age: i32, username: &str) -> RepositoryResult<u64>;

    /// Deletes every member older than `age`
    async fn bulk_delete_older_than(&self, age: i32) -> RepositoryResult<u64>;
}
