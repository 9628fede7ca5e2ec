//! Procedural generation of maze worlds.

use super::types::{Cell, Direction, ItemKind, MazeKind, MazeWorld};
use crate::core::config::EcoConfig;
use crate::core::constants::{MAX_LAYOUT_ATTEMPTS, MIN_MAZE_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Parameters for one world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSpec {
    pub kind: MazeKind,
    pub size: usize,
    pub obstacle_probability: f64,
    pub item_count: usize,
}

impl WorldSpec {
    pub fn from_config(kind: MazeKind, config: &EcoConfig) -> Self {
        let item_count = match kind {
            MazeKind::Land => config.land_items,
            MazeKind::Water => config.water_items,
        };
        Self {
            kind,
            size: config.maze_size,
            obstacle_probability: config.obstacle_probability,
            item_count,
        }
    }
}

/// Generates a world: obstacles first (land only), then items.
pub fn generate_world<R: Rng>(spec: &WorldSpec, rng: &mut R) -> MazeWorld {
    let size = spec.size.max(MIN_MAZE_SIZE);
    let mut world = MazeWorld::empty(spec.kind, size);

    if spec.kind.has_obstacles() {
        world.obstacles = roll_reachable_obstacles(&world, spec.obstacle_probability, rng);
    }

    place_items(&mut world, spec.item_count, rng);

    log::debug!(
        "[MAZE] generated {} size:{} obstacles:{} items:{}",
        world.kind.name(),
        world.size,
        world.obstacles.len(),
        world.items.len()
    );
    world
}

/// Marks each non-start, non-goal cell as blocked with `probability`.
pub fn roll_obstacles<R: Rng>(
    world: &MazeWorld,
    probability: f64,
    rng: &mut R,
) -> BTreeSet<Cell> {
    let probability = if (0.0..=1.0).contains(&probability) {
        probability
    } else {
        0.0
    };

    let mut obstacles = BTreeSet::new();
    for row in 0..world.size {
        for col in 0..world.size {
            let cell = (row, col);
            if world.is_reserved(cell) {
                continue;
            }
            if rng.gen_bool(probability) {
                obstacles.insert(cell);
            }
        }
    }
    obstacles
}

/// Re-rolls obstacle layouts until the goal can be reached from the start.
/// Falls back to an open field after `MAX_LAYOUT_ATTEMPTS`.
fn roll_reachable_obstacles<R: Rng>(
    world: &MazeWorld,
    probability: f64,
    rng: &mut R,
) -> BTreeSet<Cell> {
    let mut candidate = world.clone();
    for _ in 0..MAX_LAYOUT_ATTEMPTS {
        candidate.obstacles = roll_obstacles(world, probability, rng);
        if is_reachable(&candidate, candidate.start(), candidate.goal()) {
            return candidate.obstacles;
        }
    }
    log::warn!(
        "[MAZE] no reachable layout after {} attempts, using open field",
        MAX_LAYOUT_ATTEMPTS
    );
    BTreeSet::new()
}

/// Places up to `count` items on distinct free cells by rejection sampling.
///
/// The count is capped at the number of eligible cells so sampling always
/// terminates. Returns how many items were placed.
pub fn place_items<R: Rng>(world: &mut MazeWorld, count: usize, rng: &mut R) -> usize {
    let target = count.min(free_item_cells(world));
    let pool = world.kind.item_pool();

    let mut placed = 0;
    while placed < target {
        let cell = (rng.gen_range(0..world.size), rng.gen_range(0..world.size));
        if !is_item_cell_free(world, cell) {
            continue;
        }
        let kind: ItemKind = *pool.choose(rng).unwrap_or(&ItemKind::Droplet);
        world.items.insert(cell, kind);
        placed += 1;
    }
    placed
}

fn free_item_cells(world: &MazeWorld) -> usize {
    let size = world.size;
    (0..size)
        .flat_map(|row| (0..size).map(move |col| (row, col)))
        .filter(|&cell| is_item_cell_free(world, cell))
        .count()
}

fn is_item_cell_free(world: &MazeWorld, cell: Cell) -> bool {
    !world.is_reserved(cell) && !world.is_obstacle(cell) && !world.items.contains_key(&cell)
}

/// BFS over walkable cells.
pub fn is_reachable(world: &MazeWorld, from: Cell, to: Cell) -> bool {
    if !world.is_walkable(from) || !world.is_walkable(to) {
        return false;
    }

    let mut visited: HashSet<Cell> = HashSet::new();
    let mut queue: VecDeque<Cell> = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        if cell == to {
            return true;
        }
        for direction in Direction::ALL {
            if let Some(next) = world.neighbor(cell, direction) {
                if world.is_walkable(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    false
}
