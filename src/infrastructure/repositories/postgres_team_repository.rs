use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::RepositoryResult;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::Team;

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
}

/// PostgreSQL implementation of TeamRepository
///
/// Member back-references are read from `member.team_id`; the team table
/// itself stores only the team's own columns.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn save(&self, team: &Team) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO team (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name
            "#,
        )
        .bind(team.id())
        .bind(team.name())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>("SELECT id, name FROM team WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let members: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM member WHERE team_id = $1")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(Team::from_persistence(row.id, row.name, members)))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>("SELECT id, name FROM team ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let links: Vec<(Uuid, Uuid)> =
            sqlx::query_as("SELECT team_id, id FROM member WHERE team_id IS NOT NULL")
                .fetch_all(&self.pool)
                .await?;

        let mut members_by_team: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (team_id, member_id) in links {
            members_by_team.entry(team_id).or_default().push(member_id);
        }

        Ok(rows
            .into_iter()
            .map(|r| {
                let members = members_by_team.remove(&r.id).unwrap_or_default();
                Team::from_persistence(r.id, r.name, members)
            })
            .collect())
    }
}
