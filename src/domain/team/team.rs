use uuid::Uuid;

/// Team entity
///
/// Owns an ordered list of member back-references. The list is informational
/// only: the owning side of the relationship is `Member::team_id`, and the
/// database never stores this collection directly.
///
/// # Example
/// ```
/// use member_search::domain::team::Team;
///
/// let team = Team::new("teamA");
/// assert_eq!(team.name(), "teamA");
/// assert!(team.members().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Uuid,
    name: String,
    members: Vec<Uuid>,
}

impl Team {
    /// Creates a new team with a freshly generated id and no members
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Registers a member id on this team's back-reference list
    ///
    /// Registering the same member twice keeps a single entry.
    pub fn register_member(&mut self, member_id: Uuid) {
        if !self.members.contains(&member_id) {
            self.members.push(member_id);
        }
    }

    /// Drops a member id from the back-reference list
    pub fn unregister_member(&mut self, member_id: Uuid) {
        self.members.retain(|id| *id != member_id);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ===== Getters =====

    /// Returns the team's ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ids of members registered on this team, in registration order
    pub fn members(&self) -> &[Uuid] {
        &self.members
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(id: Uuid, name: String, members: Vec<Uuid>) -> Self {
        Self { id, name, members }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_team_has_no_members() {
        let team = Team::new("teamA");

        assert_eq!(team.name(), "teamA");
        assert!(team.members().is_empty());
    }

    #[test]
    fn register_member_keeps_order() {
        let mut team = Team::new("teamA");
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        team.register_member(first);
        team.register_member(second);

        assert_eq!(team.members(), &[first, second]);
    }

    #[test]
    fn register_member_twice_is_noop() {
        let mut team = Team::new("teamA");
        let member_id = Uuid::new_v4();

        team.register_member(member_id);
        team.register_member(member_id);

        assert_eq!(team.members().len(), 1);
    }

    #[test]
    fn unregister_member_removes_entry() {
        let mut team = Team::new("teamA");
        let member_id = Uuid::new_v4();
        team.register_member(member_id);

        team.unregister_member(member_id);

        assert!(team.members().is_empty());
    }

    #[test]
    fn from_persistence_keeps_fields() {
        let id = Uuid::new_v4();
        let member_id = Uuid::new_v4();

        let team = Team::from_persistence(id, "teamB".to_string(), vec![member_id]);

        assert_eq!(team.id(), id);
        assert_eq!(team.name(), "teamB");
        assert_eq!(team.members(), &[member_id]);
    }
}
