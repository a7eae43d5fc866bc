//! Grid movement model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allowed movement directions on a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    /// 4-connected: orthogonal steps only (Manhattan metric)
    Four,
    /// 8-connected: orthogonal and diagonal steps (octile metric)
    #[default]
    Eight,
}

impl Movement {
    /// Does this movement model allow diagonal steps?
    #[inline]
    pub fn allows_diagonal(self) -> bool {
        matches!(self, Movement::Eight)
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Movement::Four => write!(f, "four"),
            Movement::Eight => write!(f, "eight"),
        }
    }
}

impl FromStr for Movement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "four" | "4" => Ok(Movement::Four),
            "eight" | "8" => Ok(Movement::Eight),
            other => Err(format!("unknown movement '{}', expected four or eight", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movement() {
        assert_eq!("four".parse::<Movement>(), Ok(Movement::Four));
        assert_eq!("8".parse::<Movement>(), Ok(Movement::Eight));
        assert_eq!(" Eight ".parse::<Movement>(), Ok(Movement::Eight));
        assert!("six".parse::<Movement>().is_err());
        assert!(Movement::default().allows_diagonal());
    }
}
