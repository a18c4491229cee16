/// Sort order parsing for collection listings
///
/// Listings accept an order expression of the form `<column>.<asc|desc>`
/// (for example `due_date.asc`). Columns are whitelisted per model through
/// the [`SortColumn`] trait, so the SQL fragment produced by
/// [`Order::to_sql`] never contains caller-supplied text.

use std::fmt;
use std::str::FromStr;

/// Error returned when an order expression cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderParseError {
    /// Column is not orderable for this collection
    #[error("Unknown sort column: {0}")]
    UnknownColumn(String),

    /// Direction was neither `asc` nor `desc`
    #[error("Unknown sort direction: {0}")]
    UnknownDirection(String),
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = OrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(OrderParseError::UnknownDirection(other.to_string())),
        }
    }
}

/// A column a collection can be sorted by
pub trait SortColumn: Copy + fmt::Debug {
    /// Column name as written in SQL and in order expressions
    fn column_name(&self) -> &'static str;

    /// Looks a column up by its name
    fn from_name(name: &str) -> Option<Self>;
}

/// A parsed `<column>.<direction>` order expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order<C> {
    pub column: C,
    pub direction: Direction,
}

impl<C: SortColumn> Order<C> {
    pub fn asc(column: C) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: C) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }

    /// Renders the `ORDER BY` body, e.g. `due_date ASC`
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.column.column_name(), self.direction.as_sql())
    }
}

impl<C: SortColumn> FromStr for Order<C> {
    type Err = OrderParseError;

    /// Parses `column` or `column.direction`; a bare column sorts ascending
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, direction) = match s.split_once('.') {
            Some((name, direction)) => (name, direction.parse()?),
            None => (s, Direction::Asc),
        };

        let column =
            C::from_name(name).ok_or_else(|| OrderParseError::UnknownColumn(name.to_string()))?;

        Ok(Self { column, direction })
    }
}

impl<C: SortColumn> fmt::Display for Order<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{}.{}", self.column.column_name(), direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Col {
        A,
        B,
    }

    impl SortColumn for Col {
        fn column_name(&self) -> &'static str {
            match self {
                Col::A => "a",
                Col::B => "b",
            }
        }

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "a" => Some(Col::A),
                "b" => Some(Col::B),
                _ => None,
            }
        }
    }

    #[test]
    fn test_parse_with_direction() {
        let order: Order<Col> = "b.desc".parse().unwrap();
        assert_eq!(order, Order::desc(Col::B));
        assert_eq!(order.to_sql(), "b DESC");
        assert_eq!(order.to_string(), "b.desc");
    }

    #[test]
    fn test_bare_column_defaults_to_ascending() {
        let order: Order<Col> = "a".parse().unwrap();
        assert_eq!(order, Order::asc(Col::A));
    }

    #[test]
    fn test_rejects_unknown_column_and_direction() {
        assert_eq!(
            "password_hash.asc".parse::<Order<Col>>(),
            Err(OrderParseError::UnknownColumn("password_hash".to_string()))
        );
        assert_eq!(
            "a.sideways".parse::<Order<Col>>(),
            Err(OrderParseError::UnknownDirection("sideways".to_string()))
        );
    }
}
