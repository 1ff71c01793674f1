// Frame loop
pub const FRAME_INTERVAL_MS: u64 = 16; // ~60 FPS redraw and input poll

// Session timing
pub const GAME_DURATION_SECS: u32 = 30;
pub const CLOCK_TICK_MS: u64 = 1000;
pub const MOLE_SHOW_TIME_MS: u64 = 1500;
pub const RESULT_DELAY_MS: u64 = 1000;
pub const COMBO_DISPLAY_MS: u64 = 3000;

// Scoring
pub const MOLE_SCORE: i64 = 100;
pub const BOMB_PENALTY_SCORE: i64 = -200;
pub const BOMB_PENALTY_SECS: u32 = 3;
pub const COMBO_STEP: u32 = 5;

// Spawning: probability that a spawned target is a mole (the rest are bombs)
pub const MOLE_SPAWN_RATE: f64 = 0.85;

// Board
pub const GRID_COLS: usize = 3;
pub const GRID_ROWS: usize = 3;
pub const HOLE_COUNT: usize = GRID_COLS * GRID_ROWS;

// Difficulty tiers: (spawn interval ms, max concurrent targets)
pub const EASY_SPAWN_INTERVAL_MS: u64 = 1000;
pub const EASY_MAX_ACTIVE: usize = 1;
pub const MEDIUM_SPAWN_INTERVAL_MS: u64 = 600;
pub const MEDIUM_MAX_ACTIVE: usize = 2;
pub const HARD_SPAWN_INTERVAL_MS: u64 = 400;
pub const HARD_MAX_ACTIVE: usize = 3;

// Tier thresholds (seconds)
pub const RUSH_REMAINING_SECS: u32 = 5;
pub const MEDIUM_ELAPSED_SECS: u32 = 15;

// Countdown colour thresholds (seconds remaining)
pub const CLOCK_WARNING_SECS: u32 = 10;
pub const CLOCK_CRITICAL_SECS: u32 = 5;

// Result evaluation thresholds
pub const EVAL_SKILLED_SCORE: i64 = 500;
pub const EVAL_MASTER_SCORE: i64 = 1500;

// Animation timing
pub const RISE_ANIM_MS: u64 = 300;
pub const SINK_HIT_ANIM_MS: u64 = 200;
pub const SINK_MISS_ANIM_MS: u64 = 300;
pub const SPARK_BLINK_MS: u64 = 300;
pub const FLASH_MS: u64 = 200;
pub const POPUP_MS: u64 = 1000;
pub const STAR_BURST_MS: u64 = 500;
pub const COMBO_PULSE_MS: u64 = 400;

// Persistence
pub const GAME_DIR_NAME: &str = ".mole-panic";
pub const STORAGE_FILE: &str = "storage.json";
pub const LOG_FILE: &str = "mole-panic.log";
pub const HIGH_SCORE_KEY: &str = "moleGameHighScore";

// Logging
pub const LOG_ENV_VAR: &str = "MOLE_PANIC_LOG";
