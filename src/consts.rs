//! Assorted constants & hard-coded configuration
use crate::game::{Direction, Grid, Position};
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// The playing field
pub(crate) const GRID: Grid = Grid::new(15, 15);

/// Where the snake's head is placed at the start of every game
pub(crate) const INITIAL_HEAD: Position = Position::new(7, 7);

/// The direction the snake is set moving in when the countdown ends
pub(crate) const START_DIRECTION: Direction = Direction::Right;

/// Maximum number of foods of a single kind that may be eaten or on the grid,
/// combined
pub(crate) const FOOD_LIMIT: u32 = 9;

/// Number of foods placed on the grid when play begins
pub(crate) const FOOD_SPAWN_COUNT: usize = 4;

/// Eating this many foods in total wins the game
pub(crate) const WIN_THRESHOLD: u32 = 36;

/// Time between movements of the snake at the start of a game
pub(crate) const INITIAL_TICK_PERIOD: Duration = Duration::from_millis(200);

/// How much the time between movements shrinks each time food is eaten
pub(crate) const TICK_PERIOD_STEP: Duration = Duration::from_millis(5);

/// The time between movements never drops below this
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(100);

/// The countdown before play starts begins at this number
pub(crate) const COUNTDOWN_START: u8 = 3;

/// Time between countdown steps
pub(crate) const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Number of random cells to try when placing food before falling back to a
/// scan of every free cell
pub(crate) const SPAWN_ATTEMPTS: usize = 64;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 40,
    height: 22,
};

/// Number of terminal columns used to draw one grid cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = '▲';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '▼';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '◀';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '▶';

/// Glyph for the snake's head before it has started moving
pub(crate) const SNAKE_HEAD_IDLE_SYMBOL: char = '●';

pub(crate) const HEART_SYMBOL: char = '♥';
pub(crate) const SMILE_SYMBOL: char = '☺';
pub(crate) const MONEY_SYMBOL: char = '$';
pub(crate) const BOOK_SYMBOL: char = '≡';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style laid over a food's own style when drawing a body segment
pub(crate) const BODY_STYLE: Style = Style::new().bg(Color::DarkGray);

pub(crate) const HEART_STYLE: Style = Style::new().fg(Color::LightRed);
pub(crate) const SMILE_STYLE: Style = Style::new().fg(Color::Yellow);
pub(crate) const MONEY_STYLE: Style = Style::new().fg(Color::LightGreen);
pub(crate) const BOOK_STYLE: Style = Style::new().fg(Color::LightBlue);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the countdown digit and the end-of-game banner
pub(crate) const BANNER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
