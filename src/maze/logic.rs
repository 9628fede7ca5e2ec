//! Agent movement, item collection and world lifecycle.

use super::generation::{generate_world, WorldSpec};
use super::types::{Cell, Direction, ItemKind, MazeKind, MazeWorld};
use rand::Rng;

/// Points carried by maze events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeRewards {
    pub item: u32,
    pub goal: u32,
}

/// What a single move does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    /// Out of bounds or into an obstacle; nothing changed
    Blocked,
    /// Stepped onto an empty cell
    Moved,
    /// Stepped onto an item and picked it up
    Collected(ItemKind),
    /// Reached the goal; the agent returns to the start
    ReachedGoal,
}

/// A planned move. Computing it does not change the world, so the caller can
/// persist the reward before [`MazeWorld::apply`] commits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub from: Cell,
    /// Cell the agent stepped onto (equal to `from` when blocked)
    pub to: Cell,
    pub event: MoveEvent,
    pub points: u32,
}

impl MazeWorld {
    pub fn plan_move(&self, direction: Direction, rewards: MazeRewards) -> Step {
        let from = self.agent;
        let blocked = Step {
            from,
            to: from,
            event: MoveEvent::Blocked,
            points: 0,
        };

        let to = match self.neighbor(from, direction) {
            Some(cell) if !self.is_obstacle(cell) => cell,
            _ => return blocked,
        };

        if to == self.goal() {
            return Step {
                from,
                to,
                event: MoveEvent::ReachedGoal,
                points: rewards.goal,
            };
        }

        match self.item_at(to) {
            Some(kind) => Step {
                from,
                to,
                event: MoveEvent::Collected(kind),
                points: rewards.item,
            },
            None => Step {
                from,
                to,
                event: MoveEvent::Moved,
                points: 0,
            },
        }
    }

    /// Commit a planned step. Collected items leave the map here.
    pub fn apply(&mut self, step: &Step) {
        match step.event {
            MoveEvent::Blocked => {}
            MoveEvent::Moved => self.agent = step.to,
            MoveEvent::Collected(_) => {
                self.items.remove(&step.to);
                self.agent = step.to;
            }
            MoveEvent::ReachedGoal => self.agent = self.start(),
        }
    }

    /// Plan and apply in one go, for callers with no ledger in between.
    pub fn move_agent(&mut self, direction: Direction, rewards: MazeRewards) -> Step {
        let step = self.plan_move(direction, rewards);
        self.apply(&step);
        step
    }
}

/// Holds at most one world of a kind for the life of a session.
#[derive(Debug, Clone)]
pub struct WorldSlot {
    spec: WorldSpec,
    regenerate_on_goal: bool,
    world: Option<MazeWorld>,
}

impl WorldSlot {
    pub fn new(spec: WorldSpec, regenerate_on_goal: bool) -> Self {
        Self {
            spec,
            regenerate_on_goal,
            world: None,
        }
    }

    pub fn kind(&self) -> MazeKind {
        self.spec.kind
    }

    pub fn get(&self) -> Option<&MazeWorld> {
        self.world.as_ref()
    }

    /// Generate a new world, replacing any existing one.
    pub fn create<R: Rng>(&mut self, rng: &mut R) -> &mut MazeWorld {
        self.world.insert(generate_world(&self.spec, rng))
    }

    /// Existing world, or a freshly generated one.
    pub fn get_or_create<R: Rng>(&mut self, rng: &mut R) -> &mut MazeWorld {
        let spec = self.spec;
        self.world.get_or_insert_with(|| generate_world(&spec, rng))
    }

    /// Discard the world; the next access generates a new one.
    pub fn reset(&mut self) {
        self.world = None;
    }

    /// Lifecycle hook after a step has been applied.
    pub fn after_step<R: Rng>(&mut self, step: &Step, rng: &mut R) {
        if step.event == MoveEvent::ReachedGoal && self.regenerate_on_goal {
            log::info!("[MAZE] {} regenerated after goal", self.spec.kind.name());
            self.create(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EcoConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const REWARDS: MazeRewards = MazeRewards { item: 2, goal: 6 };

    fn open_world(size: usize) -> MazeWorld {
        MazeWorld::empty(MazeKind::Land, size)
    }

    #[test]
    fn test_move_into_wall_or_edge_is_rejected() {
        let mut world = open_world(4);
        world.obstacles.insert((0, 1));

        let step = world.move_agent(Direction::Right, REWARDS);
        assert_eq!(step.event, MoveEvent::Blocked);
        assert_eq!(world.agent, (0, 0));

        let step = world.move_agent(Direction::Up, REWARDS);
        assert_eq!(step.event, MoveEvent::Blocked);
        assert_eq!(world.agent, (0, 0));
    }

    #[test]
    fn test_collecting_is_one_shot() {
        let mut world = open_world(10);
        world.items.insert((1, 0), ItemKind::Tree);

        let step = world.move_agent(Direction::Down, REWARDS);
        assert_eq!(step.event, MoveEvent::Collected(ItemKind::Tree));
        assert_eq!(step.points, 2);
        assert!(world.items.is_empty());

        world.move_agent(Direction::Up, REWARDS);
        let again = world.move_agent(Direction::Down, REWARDS);
        assert_eq!(again.event, MoveEvent::Moved);
        assert_eq!(again.points, 0);
    }

    #[test]
    fn test_plan_does_not_mutate() {
        let mut world = open_world(5);
        world.items.insert((0, 1), ItemKind::Bee);
        let before = world.clone();

        let step = world.plan_move(Direction::Right, REWARDS);

        assert_eq!(step.event, MoveEvent::Collected(ItemKind::Bee));
        assert_eq!(world, before);
    }

    #[test]
    fn test_goal_returns_agent_to_start_and_keeps_items() {
        let mut world = open_world(3);
        world.items.insert((2, 0), ItemKind::Sun);
        world.agent = (2, 1);

        let step = world.move_agent(Direction::Right, REWARDS);

        assert_eq!(step.event, MoveEvent::ReachedGoal);
        assert_eq!(step.to, (2, 2));
        assert_eq!(step.points, 6);
        assert_eq!(world.agent, (0, 0));
        assert_eq!(world.item_at((2, 0)), Some(ItemKind::Sun));
    }

    #[test]
    fn test_water_world_ignores_walls() {
        let mut world = MazeWorld::empty(MazeKind::Water, 3);
        for direction in [Direction::Right, Direction::Right, Direction::Down] {
            assert_ne!(world.move_agent(direction, REWARDS).event, MoveEvent::Blocked);
        }
        assert_eq!(world.agent, (1, 2));
    }

    #[test]
    fn test_slot_lifecycle() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let spec = WorldSpec::from_config(MazeKind::Land, &EcoConfig::default());
        let mut slot = WorldSlot::new(spec, false);
        assert!(slot.get().is_none());

        slot.get_or_create(&mut rng).agent = (3, 3);
        assert_eq!(slot.get_or_create(&mut rng).agent, (3, 3));

        slot.reset();
        assert!(slot.get().is_none());
        assert_eq!(slot.get_or_create(&mut rng).agent, (0, 0));
    }

    #[test]
    fn test_regenerate_on_goal_replaces_world() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let spec = WorldSpec::from_config(MazeKind::Water, &EcoConfig::default());
        let mut slot = WorldSlot::new(spec, true);
        let world = slot.get_or_create(&mut rng);
        world.items.clear();

        let goal_step = Step {
            from: (9, 8),
            to: (9, 9),
            event: MoveEvent::ReachedGoal,
            points: 6,
        };
        slot.after_step(&goal_step, &mut rng);

        assert_eq!(slot.get().map(|w| w.items.len()), Some(6));
    }
}
