// Read-only result shapes assembled by search queries.
// Never persisted; built fresh per query and dropped after serialization.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::member::Member;
use crate::domain::team::Team;

/// Flat Member-Team projection
///
/// One row of `member LEFT JOIN team`. Team columns are `None` for members
/// without a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: Uuid,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
}

impl MemberTeamDto {
    /// Projects a member and its (optional) team into a flat row
    pub fn from_entities(member: &Member, team: Option<&Team>) -> Self {
        Self {
            member_id: member.id(),
            username: member.username().map(str::to_string),
            age: member.age(),
            team_id: team.map(Team::id),
            team_name: team.map(|t| t.name().to_string()),
        }
    }
}

/// Username and age only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

impl From<&MemberTeamDto> for MemberDto {
    fn from(row: &MemberTeamDto) -> Self {
        Self {
            username: row.username.clone(),
            age: row.age,
        }
    }
}
