use super::state::Outcome;

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Food,
}

/// Everything a front end needs to draw a frame.
///
/// `cells` is indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub cells: Vec<Vec<Cell>>,
    pub score: u32,
    pub length: usize,
    pub steps: u32,
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }
}
