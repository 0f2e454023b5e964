use std::fmt;

use crate::domain::errors::{RepositoryError, RepositoryResult};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }
}

/// Projection fields a search can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

impl SortProperty {
    /// Parses the camelCase name used in query strings and JSON output
    pub fn parse(name: &str) -> RepositoryResult<Self> {
        match name {
            "memberId" => Ok(SortProperty::MemberId),
            "username" => Ok(SortProperty::Username),
            "age" => Ok(SortProperty::Age),
            "teamId" => Ok(SortProperty::TeamId),
            "teamName" => Ok(SortProperty::TeamName),
            other => Err(RepositoryError::invalid_argument(format!(
                "Unknown sort property: {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortProperty::MemberId => "memberId",
            SortProperty::Username => "username",
            SortProperty::Age => "age",
            SortProperty::TeamId => "teamId",
            SortProperty::TeamName => "teamName",
        }
    }
}

impl fmt::Display for SortProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `property direction` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub property: SortProperty,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort orders; empty means unsorted
///
/// An unsorted search has no defined row order. Two identical requests may
/// return rows in different orders, and pages of an unsorted search may
/// overlap or skip rows. Sort by `memberId` last for a stable tie-break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort(Vec<SortOrder>);

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(orders: Vec<SortOrder>) -> Self {
        Self(orders)
    }

    /// Parses `property[,property...][,asc|desc]`
    ///
    /// The trailing direction, when present, applies to every property in the
    /// expression. Blank input is unsorted.
    ///
    /// # Example
    /// ```
    /// use member_search::domain::search::{Direction, Sort, SortProperty};
    ///
    /// let sort = Sort::parse("username,age,desc").unwrap();
    /// assert_eq!(sort.orders().len(), 2);
    /// assert!(sort.orders().iter().all(|o| o.direction == Direction::Desc));
    /// assert_eq!(sort.orders()[0].property, SortProperty::Username);
    /// ```
    pub fn parse(expression: &str) -> RepositoryResult<Self> {
        let mut tokens: Vec<&str> = expression
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return Ok(Self::unsorted());
        }

        let direction = match tokens.last().and_then(|t| Direction::parse(t)) {
            Some(direction) => {
                tokens.pop();
                direction
            }
            None => Direction::Asc,
        };

        if tokens.is_empty() {
            return Err(RepositoryError::invalid_argument(format!(
                "Sort expression has no property: {}",
                expression
            )));
        }

        let orders = tokens
            .into_iter()
            .map(|name| {
                SortProperty::parse(name).map(|property| SortOrder {
                    property,
                    direction,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(Self(orders))
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.0
    }

    pub fn is_unsorted(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_expression_is_unsorted() {
        assert!(Sort::parse("").unwrap().is_unsorted());
        assert!(Sort::parse(" , ").unwrap().is_unsorted());
    }

    #[test]
    fn property_defaults_to_ascending() {
        let sort = Sort::parse("age").unwrap();

        assert_eq!(sort.orders(), &[SortOrder::asc(SortProperty::Age)]);
    }

    #[test]
    fn trailing_direction_applies_to_all_properties() {
        let sort = Sort::parse("teamName, age, DESC").unwrap();

        assert_eq!(
            sort.orders(),
            &[
                SortOrder::desc(SortProperty::TeamName),
                SortOrder::desc(SortProperty::Age),
            ]
        );
    }

    #[test]
    fn unknown_property_is_invalid_argument() {
        let err = Sort::parse("password,asc").unwrap_err();

        assert!(matches!(err, RepositoryError::InvalidArgument(_)));
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn direction_without_property_is_invalid_argument() {
        assert!(matches!(
            Sort::parse("desc"),
            Err(RepositoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn property_names_round_trip_through_display() {
        for property in [
            SortProperty::MemberId,
            SortProperty::Username,
            SortProperty::Age,
            SortProperty::TeamId,
            SortProperty::TeamName,
        ] {
            assert_eq!(SortProperty::parse(&property.to_string()).unwrap(), property);
        }
    }
}
