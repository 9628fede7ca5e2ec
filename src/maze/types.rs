//! Maze world data structures.
//!
//! Cells are `(row, col)`; the agent starts at `(0, 0)` and the goal is the
//! opposite corner.

use crate::core::constants::MIN_MAZE_SIZE;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub type Cell = (usize, usize);

/// The two exploration worlds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MazeKind {
    /// Walled maze with obstacles
    Land,
    /// Open water, every cell traversable
    Water,
}

impl MazeKind {
    pub const ALL: [MazeKind; 2] = [MazeKind::Land, MazeKind::Water];

    pub fn name(&self) -> &'static str {
        match self {
            MazeKind::Land => "Eco Maze",
            MazeKind::Water => "Water Maze",
        }
    }

    pub fn has_obstacles(&self) -> bool {
        matches!(self, MazeKind::Land)
    }

    /// Collectibles that can spawn in this world.
    pub fn item_pool(&self) -> &'static [ItemKind] {
        match self {
            MazeKind::Land => &[
                ItemKind::Tree,
                ItemKind::Recycling,
                ItemKind::Sun,
                ItemKind::Droplet,
                ItemKind::Bee,
            ],
            MazeKind::Water => &[
                ItemKind::Droplet,
                ItemKind::Sprout,
                ItemKind::Recycling,
                ItemKind::Sun,
            ],
        }
    }

    fn floor_glyph(&self) -> &'static str {
        match self {
            MazeKind::Land => "⬜",
            MazeKind::Water => "💧",
        }
    }

    fn agent_glyph(&self) -> &'static str {
        match self {
            MazeKind::Land => "🟩",
            MazeKind::Water => "💦",
        }
    }
}

/// Collectible placed on a maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Tree,
    Recycling,
    Sun,
    Droplet,
    Bee,
    Sprout,
}

impl ItemKind {
    pub fn emoji(&self) -> &'static str {
        match self {
            ItemKind::Tree => "🌳",
            ItemKind::Recycling => "♻️",
            ItemKind::Sun => "🌞",
            ItemKind::Droplet => "💧",
            ItemKind::Bee => "🐝",
            ItemKind::Sprout => "🌱",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emoji())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// (d_row, d_col)
    pub fn offset(&self) -> (i64, i64) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// One generated world and the agent exploring it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeWorld {
    pub kind: MazeKind,
    pub size: usize,
    /// Blocked cells (always empty for water)
    pub obstacles: BTreeSet<Cell>,
    /// Pending collectibles keyed by cell
    pub items: BTreeMap<Cell, ItemKind>,
    pub agent: Cell,
}

impl MazeWorld {
    /// Empty world with the agent at the start cell. Sizes below
    /// `MIN_MAZE_SIZE` are raised so start and goal stay distinct.
    pub fn empty(kind: MazeKind, size: usize) -> Self {
        Self {
            kind,
            size: size.max(MIN_MAZE_SIZE),
            obstacles: BTreeSet::new(),
            items: BTreeMap::new(),
            agent: (0, 0),
        }
    }

    pub fn start(&self) -> Cell {
        (0, 0)
    }

    pub fn goal(&self) -> Cell {
        (self.size - 1, self.size - 1)
    }

    pub fn is_reserved(&self, cell: Cell) -> bool {
        cell == self.start() || cell == self.goal()
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    pub fn item_at(&self, cell: Cell) -> Option<ItemKind> {
        self.items.get(&cell).copied()
    }

    /// Neighbouring cell in `direction`, if it is inside the grid.
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (d_row, d_col) = direction.offset();
        let row = cell.0 as i64 + d_row;
        let col = cell.1 as i64 + d_col;
        let size = self.size as i64;
        if row < 0 || col < 0 || row >= size || col >= size {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// In bounds and not blocked.
    pub fn is_walkable(&self, cell: Cell) -> bool {
        cell.0 < self.size && cell.1 < self.size && !self.is_obstacle(cell)
    }

    pub fn items_remaining(&self) -> usize {
        self.items.len()
    }

    /// Emoji grid, one row per line.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.size);
        for row in 0..self.size {
            let cells: Vec<&str> = (0..self.size)
                .map(|col| {
                    let cell = (row, col);
                    if cell == self.agent {
                        self.kind.agent_glyph()
                    } else if let Some(item) = self.items.get(&cell) {
                        item.emoji()
                    } else if self.is_obstacle(cell) {
                        "⬛"
                    } else {
                        self.kind.floor_glyph()
                    }
                })
                .collect();
            lines.push(cells.join(" "));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_clamps_tiny_sizes() {
        let world = MazeWorld::empty(MazeKind::Land, 0);
        assert_eq!(world.size, MIN_MAZE_SIZE);
        assert_eq!(world.goal(), (1, 1));
        assert_ne!(world.start(), world.goal());
    }

    #[test]
    fn test_start_and_goal_corners() {
        let world = MazeWorld::empty(MazeKind::Land, 10);
        assert_eq!(world.start(), (0, 0));
        assert_eq!(world.goal(), (9, 9));
        assert!(world.is_reserved((0, 0)));
        assert!(world.is_reserved((9, 9)));
        assert!(!world.is_reserved((4, 4)));
    }

    #[test]
    fn test_neighbor_respects_bounds() {
        let world = MazeWorld::empty(MazeKind::Water, 3);
        assert_eq!(world.neighbor((0, 0), Direction::Up), None);
        assert_eq!(world.neighbor((0, 0), Direction::Left), None);
        assert_eq!(world.neighbor((0, 0), Direction::Down), Some((1, 0)));
        assert_eq!(world.neighbor((0, 0), Direction::Right), Some((0, 1)));
        assert_eq!(world.neighbor((2, 2), Direction::Down), None);
        assert_eq!(world.neighbor((2, 2), Direction::Right), None);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("UP"), Some(Direction::Up));
        assert_eq!(Direction::parse(" left "), Some(Direction::Left));
        assert_eq!(Direction::parse("d"), Some(Direction::Down));
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn test_item_pools() {
        assert!(MazeKind::Land.item_pool().contains(&ItemKind::Bee));
        assert!(!MazeKind::Water.item_pool().contains(&ItemKind::Bee));
        assert!(MazeKind::Water.item_pool().contains(&ItemKind::Sprout));
        assert!(MazeKind::Land.has_obstacles());
        assert!(!MazeKind::Water.has_obstacles());
    }

    #[test]
    fn test_render_marks_agent_items_and_walls() {
        let mut world = MazeWorld::empty(MazeKind::Land, 2);
        world.obstacles.insert((0, 1));
        world.items.insert((1, 0), ItemKind::Tree);
        assert_eq!(world.render(), "🟩 ⬛\n🌳 ⬜");
    }
}
