//! Cell types for ASCII grid maps.

/// Occupancy of a single grid cell as written in a `rows` map.
///
/// - `.` - free floor
/// - `#` - obstacle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellType {
    Free,
    Obstacle,
}

impl CellType {
    /// Can an agent stand on this cell?
    #[inline]
    pub fn is_traversable(self) -> bool {
        matches!(self, CellType::Free)
    }

    /// Parse a map character; `None` for anything that is not `.` or `#`
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellType::Free),
            '#' => Some(CellType::Obstacle),
            _ => None,
        }
    }
}
