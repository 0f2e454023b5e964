use serde::Deserialize;

use crate::domain::projections::MemberTeamDto;

/// Optional filters for member search
///
/// Every field is optional; an absent field leaves that dimension
/// unconstrained. String fields without any non-whitespace text count as
/// absent, so `?username=` behaves like omitting the parameter.
///
/// # Warning
/// A condition with no usable field produces no predicates at all, which
/// turns a search into a full `member LEFT JOIN team` scan. Nothing guards
/// against this; callers that expose search publicly should paginate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

/// A single constraint derived from one present condition field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberPredicate {
    UsernameEq(String),
    TeamNameEq(String),
    AgeGoe(i32),
    AgeLoe(i32),
}

impl MemberPredicate {
    /// Evaluates the predicate against a projected row
    ///
    /// Mirrors SQL semantics: a NULL column never equals a value.
    pub fn matches(&self, row: &MemberTeamDto) -> bool {
        match self {
            MemberPredicate::UsernameEq(username) => row.username.as_deref() == Some(username),
            MemberPredicate::TeamNameEq(name) => row.team_name.as_deref() == Some(name),
            MemberPredicate::AgeGoe(age) => row.age >= *age,
            MemberPredicate::AgeLoe(age) => row.age <= *age,
        }
    }
}

impl MemberSearchCondition {
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn with_age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Builds the conjunction of constraints for the present fields only
    ///
    /// Field order is fixed (username, team name, lower age bound, upper age
    /// bound) so the rendered SQL is stable for a given condition.
    pub fn predicates(&self) -> Vec<MemberPredicate> {
        let mut predicates = Vec::with_capacity(4);

        if let Some(username) = non_blank(&self.username) {
            predicates.push(MemberPredicate::UsernameEq(username.to_string()));
        }
        if let Some(team_name) = non_blank(&self.team_name) {
            predicates.push(MemberPredicate::TeamNameEq(team_name.to_string()));
        }
        if let Some(age) = self.age_goe {
            predicates.push(MemberPredicate::AgeGoe(age));
        }
        if let Some(age) = self.age_loe {
            predicates.push(MemberPredicate::AgeLoe(age));
        }

        predicates
    }

    /// True when no predicate would be emitted
    pub fn is_unconstrained(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Evaluates the whole conjunction against a row
    pub fn matches(&self, row: &MemberTeamDto) -> bool {
        self.predicates().iter().all(|p| p.matches(row))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|s| s.chars().any(|c| !c.is_whitespace()))
}
