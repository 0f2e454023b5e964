use uuid::Uuid;

use crate::domain::team::Team;

/// Member entity
///
/// A member belongs to at most one team. The member holds the owning side of
/// the relationship (`team_id`); constructing or moving a member also
/// registers it on the team's back-reference list so both in-memory views
/// agree.
///
/// # Example
/// ```
/// use member_search::domain::member::Member;
/// use member_search::domain::team::Team;
///
/// let mut team = Team::new("teamA");
/// let member = Member::new(Some("member1".to_string()), 10, Some(&mut team));
///
/// assert_eq!(member.team_id(), Some(team.id()));
/// assert_eq!(team.members(), &[member.id()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: Uuid,
    username: Option<String>,
    age: i32,
    team_id: Option<Uuid>,
}

impl Member {
    /// Creates a new member, registering it on `team` when one is given
    pub fn new(username: Option<String>, age: i32, team: Option<&mut Team>) -> Self {
        let mut member = Self {
            id: Uuid::new_v4(),
            username,
            age,
            team_id: None,
        };

        if let Some(team) = team {
            member.change_team(team);
        }

        member
    }

    /// Moves the member to `team` and registers it there
    ///
    /// The previous team's back-reference list is not touched; callers holding
    /// that team should call [`Team::unregister_member`] themselves.
    pub fn change_team(&mut self, team: &mut Team) {
        self.team_id = Some(team.id());
        team.register_member(self.id);
    }

    /// Detaches the member from its team
    pub fn leave_team(&mut self) {
        self.team_id = None;
    }

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub fn set_age(&mut self, age: i32) {
        self.age = age;
    }

    // ===== Getters =====

    /// Returns the member's ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the username, if any
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the member's age
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns the owning team's ID, if the member belongs to one
    pub fn team_id(&self) -> Option<Uuid> {
        self.team_id
    }

    /// Reconstructs a Member from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        username: Option<String>,
        age: i32,
        team_id: Option<Uuid>,
    ) -> Self {
        Self {
            id,
            username,
            age,
            team_id,
        }
    }
}
