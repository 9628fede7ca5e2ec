// Daily cycle
pub const DAILY_BASE_REWARD: u32 = 2;

// Tasks and quick challenges
pub const PHOTO_TASK_REWARD: u32 = 3;
pub const RECYCLING_CHOICE_REWARD: u32 = 3;
pub const QUIZ_CORRECT_REWARD: u32 = 2;
pub const QUIZ_QUESTIONS_PER_ROUND: usize = 3;
pub const CROSSWORD_REWARD: u32 = 10;
pub const CROSSWORD_CLUES_PER_ROUND: usize = 5;

// Maze worlds
pub const DEFAULT_MAZE_SIZE: usize = 10;
pub const MIN_MAZE_SIZE: usize = 2;
pub const OBSTACLE_PROBABILITY: f64 = 0.12;
pub const LAND_ITEM_COUNT: usize = 6;
pub const WATER_ITEM_COUNT: usize = 6;
pub const ITEM_REWARD: u32 = 2;
pub const GOAL_BONUS: u32 = 6;
pub const MAX_LAYOUT_ATTEMPTS: u32 = 32;

// Leaderboard titles, cycled every 100 points
pub const POINTS_PER_TITLE: u32 = 100;
pub const TITLES: [&str; 4] = ["Hero 🌱", "Star ⭐", "Superstar 🌟", "Legend 🌍"];

// Persistence
pub const STORE_VERSION: u32 = 1;
pub const PROGRESS_FILE: &str = "progress.json";
pub const CONFIG_FILE: &str = "config.json";
pub const UPLOAD_DIR: &str = "uploads";
pub const DATA_DIR_NAME: &str = ".ecoquest";
