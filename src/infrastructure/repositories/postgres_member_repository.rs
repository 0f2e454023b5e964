use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::errors::RepositoryResult;
use crate::domain::member::Member;
use crate::domain::projections::{MemberDto, MemberTeamDto};
use crate::domain::repositories::MemberRepository;
use crate::domain::search::{MemberPredicate, MemberSearchCondition, Page, PageRequest, Sort};
use crate::infrastructure::query::member_query::{
    count_query, member_query, member_team_page_query, member_team_query,
};

/// Column list for `member` entity queries
const MEMBER_COLUMNS: &str = "id, username, age, team_id";

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    username: Option<String>,
    age: i32,
    team_id: Option<Uuid>,
}

impl From<MemberRow> for Member {
    fn from(r: MemberRow) -> Self {
        Member::from_persistence(r.id, r.username, r.age, r.team_id)
    }
}

/// PostgreSQL implementation of MemberRepository
///
/// Every search runs inside its own read-only transaction, so the content
/// and count queries of a page see the same snapshot. The transaction is
/// committed on success and rolled back when dropped on any error path.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new PostgresMemberRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin_read_only(&self) -> RepositoryResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    async fn fetch_page_content(
        tx: &mut Transaction<'static, Postgres>,
        predicates: &[MemberPredicate],
        request: &PageRequest,
    ) -> RepositoryResult<Vec<MemberTeamDto>> {
        let mut query = member_team_page_query(predicates, request);
        let rows = query
            .build_query_as::<MemberTeamDto>()
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows)
    }

    async fn fetch_count(
        tx: &mut Transaction<'static, Postgres>,
        predicates: &[MemberPredicate],
    ) -> RepositoryResult<u64> {
        let mut query = count_query(predicates);
        let (count,) = query
            .build_query_as::<(i64,)>()
            .fetch_one(&mut **tx)
            .await?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &Member) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO member (id, username, age, team_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                age = EXCLUDED.age,
                team_id = EXCLUDED.team_id
            "#,
        )
        .bind(member.id())
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Member>> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM member WHERE id = $1");
        let row = sqlx::query_as::<_, MemberRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Member::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM member");
        let rows = sqlx::query_as::<_, MemberRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM member WHERE username = $1");
        let rows = sqlx::query_as::<_, MemberRow>(&query)
            .bind(username)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn search(&self, condition: &MemberSearchCondition) -> RepositoryResult<Vec<MemberTeamDto>> {
        let predicates = condition.predicates();
        let mut tx = self.begin_read_only().await?;

        let mut query = member_team_query(&predicates, &Sort::unsorted());
        let rows = query
            .build_query_as::<MemberTeamDto>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(predicates = predicates.len(), rows = rows.len(), "member search");
        Ok(rows)
    }

    async fn search_member_dtos(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberDto>> {
        let predicates = condition.predicates();
        let mut tx = self.begin_read_only().await?;

        let mut query = member_query(&predicates);
        let rows = query
            .build_query_as::<MemberDto>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rows)
    }

    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        request: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>> {
        let predicates = condition.predicates();
        let mut tx = self.begin_read_only().await?;

        let content = Self::fetch_page_content(&mut tx, &predicates, request).await?;
        let total = Self::fetch_count(&mut tx, &predicates).await?;

        tx.commit().await?;

        tracing::debug!(
            page = request.page(),
            size = request.size(),
            rows = content.len(),
            total,
            "member page (simple)"
        );
        Ok(Page::new(content, request, total))
    }

    async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        request: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeamDto>> {
        let predicates = condition.predicates();
        let mut tx = self.begin_read_only().await?;

        let content = Self::fetch_page_content(&mut tx, &predicates, request).await?;
        let (total, counted) = match request.derive_total(content.len()) {
            Some(total) => (total, false),
            None => (Self::fetch_count(&mut tx, &predicates).await?, true),
        };

        tx.commit().await?;

        tracing::debug!(
            page = request.page(),
            size = request.size(),
            rows = content.len(),
            total,
            counted,
            "member page (complex)"
        );
        Ok(Page::new(content, request, total))
    }

    async fn bulk_add_age(&self, delta: i32) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE member SET age = age + $1")
            .bind(delta)
            .execute(&self.pool)
            .await?;

        tracing::info!(delta, rows = result.rows_affected(), "bulk age update");
        Ok(result.rows_affected())
    }

    async fn bulk_rename_younger_than(&self, age: i32, username: &str) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE member SET username = $1 WHERE age < $2")
            .bind(username)
            .bind(age)
            .execute(&self.pool)
            .await?;

        tracing::info!(age, rows = result.rows_affected(), "bulk rename");
        Ok(result.rows_affected())
    }

    async fn bulk_delete_older_than(&self, age: i32) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM member WHERE age > $1")
            .bind(age)
            .execute(&self.pool)
            .await?;

        tracing::info!(age, rows = result.rows_affected(), "bulk delete");
        Ok(result.rows_affected())
    }
}
