//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Distance the snake's head travels on each tick; every position that the
/// game places anything at is a multiple of this
pub(crate) const GRID_STEP: i32 = 20;

/// Default width of the playing field, in world units
pub(crate) const DEFAULT_FIELD_WIDTH: i32 = 800;

/// Default height of the playing field, in world units
pub(crate) const DEFAULT_FIELD_HEIGHT: i32 = 600;

/// Default time between movements of the snake
pub(crate) const DEFAULT_TICK_DELAY: Duration = Duration::from_millis(120);

/// Default length of a freshly-created snake
pub(crate) const DEFAULT_START_LENGTH: usize = 5;

/// Snakes are never rebuilt shorter than this
pub(crate) const MIN_RESET_LENGTH: usize = 3;

/// Default time between periodic food spawns and between food sweeps
pub(crate) const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Default number of food items added by each periodic spawn
pub(crate) const DEFAULT_FOOD_BATCH: usize = 20;

/// Default number of food items spawned at the start of each run
pub(crate) const DEFAULT_INITIAL_FOOD_BATCH: usize = 200;

/// Longest configurable tick delay or refresh interval
pub(crate) const MAX_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Largest configurable field width or height, in world units
pub(crate) const MAX_FIELD_LENGTH: i32 = 1000 * GRID_STEP;

/// Largest configurable starting snake length
pub(crate) const MAX_START_LENGTH: usize = 1000;

/// Largest configurable food batch
pub(crate) const MAX_FOOD_BATCH: usize = 10_000;

/// Time between ticks while the game is paused or over
pub(crate) const IDLE_INTERVAL: Duration = Duration::from_millis(100);

/// The head collides with a wall once it is closer than this to the edge of
/// the field
pub(crate) const WALL_MARGIN: i32 = 10;

/// The head eats every food item closer than this
pub(crate) const FOOD_RADIUS: i32 = 20;

/// The head collides with a body segment closer than this
pub(crate) const SELF_COLLISION_THRESHOLD: i32 = GRID_STEP / 2;

/// Points awarded per food item eaten
pub(crate) const POINTS_PER_FOOD: u32 = 10;

/// Probability that an expired food item rots away on a given sweep
pub(crate) const FOOD_ROT_PROBABILITY: f64 = 0.5;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Default color of the snake
pub(crate) const DEFAULT_SNAKE_COLOR: Color = Color::Green;

/// Default color of food
pub(crate) const DEFAULT_FOOD_COLOR: Color = Color::LightRed;

/// Default background color of the field
pub(crate) const DEFAULT_BACKGROUND_COLOR: Color = Color::Reset;

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the "PAUSED" banner
pub(crate) const PAUSED_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Style for the "GAME OVER" banner
pub(crate) const GAME_OVER_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);
