//! Sample data for local runs.

use crate::domain::errors::RepositoryResult;
use crate::domain::member::Member;
use crate::domain::repositories::{MemberRepository, TeamRepository};
use crate::domain::search::{MemberSearchCondition, PageRequest};
use crate::domain::team::Team;

/// Number of sample members created by [`seed_sample_data`]
pub const SAMPLE_MEMBER_COUNT: i32 = 100;

/// Seeds `teamA`, `teamB` and `member0..member99`
///
/// Member `i` is `i` years old and joins `teamA` when `i` is even, `teamB`
/// otherwise. Does nothing when any member already exists.
///
/// Returns whether data was written.
pub async fn seed_sample_data(
    members: &dyn MemberRepository,
    teams: &dyn TeamRepository,
) -> RepositoryResult<bool> {
    let probe = members
        .search_page_complex(&MemberSearchCondition::default(), &PageRequest::new(0, 1)?)
        .await?;
    if !probe.is_empty() {
        tracing::info!("members already present, skipping sample data");
        return Ok(false);
    }

    let mut team_a = Team::new("teamA");
    let mut team_b = Team::new("teamB");
    teams.save(&team_a).await?;
    teams.save(&team_b).await?;

    for i in 0..SAMPLE_MEMBER_COUNT {
        let team = if i % 2 == 0 { &mut team_a } else { &mut team_b };
        let member = Member::new(Some(format!("member{}", i)), i, Some(team));
        members.save(&member).await?;
    }

    tracing::info!(members = SAMPLE_MEMBER_COUNT, "sample data seeded");
    Ok(true)
}
