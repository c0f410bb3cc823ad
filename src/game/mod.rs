mod banner;
mod chain;
mod collision;
mod direction;
mod food;
mod position;
mod timer;
pub(crate) use self::direction::Direction;
pub(crate) use self::food::ExpiryCategory;
use self::banner::Banner;
use self::chain::SegmentChain;
use self::food::FoodPool;
use self::position::Position;
use self::timer::Periodic;
use crate::config::Config;
use crate::consts::{self, GRID_STEP};
use crate::highscore::HighScoreStore;
use crate::util::center_rect;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The running game: the snake, the food, the score, and the timers that
/// drive them
#[derive(Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng, S = Box<dyn HighScoreStore>> {
    rng: R,
    chain: SegmentChain,
    food: FoodPool,
    state: GameState,
    config: Config,
    store: S,
    next_tick: Instant,
    spawn_timer: Periodic,
    sweep_timer: Periodic,
}

impl<S: HighScoreStore> Game<rand::rngs::ThreadRng, S> {
    pub(crate) fn new(config: Config, store: S) -> Self {
        Game::new_with_rng(config, store, rand::rng(), Instant::now())
    }
}

impl<R: Rng, S: HighScoreStore> Game<R, S> {
    pub(crate) fn new_with_rng(config: Config, store: S, rng: R, now: Instant) -> Game<R, S> {
        let state = GameState {
            high_score: store.load_high_score(),
            ..GameState::default()
        };
        let chain = SegmentChain::new(
            config.snake.start_length,
            Position::ORIGIN,
            Direction::Right,
        );
        let food = FoodPool::new(
            config.food.expiry,
            config.field.width / 2 - GRID_STEP,
            config.field.height / 2 - GRID_STEP,
        );
        Game {
            rng,
            chain,
            food,
            state,
            spawn_timer: Periodic::new(config.food.refresh_interval, now),
            sweep_timer: Periodic::new(config.food.refresh_interval, now),
            config,
            store,
            next_tick: now,
        }
    }

    /// Run every timer that is due at `now`
    pub(crate) fn update(&mut self, now: Instant) {
        if now >= self.next_tick {
            self.tick(now);
            let delay = if self.state.paused {
                consts::IDLE_INTERVAL
            } else {
                self.config.snake.tick_delay.min(consts::MAX_INTERVAL)
            };
            self.next_tick = now + delay;
        }
        if self.spawn_timer.fire(now) {
            self.spawn_food(now);
        }
        if self.sweep_timer.fire(now) {
            self.sweep_food(now);
        }
    }

    /// Return the earliest time at which [`Game::update()`] has work to do
    pub(crate) fn next_deadline(&self) -> Instant {
        self.next_tick
            .min(self.spawn_timer.deadline())
            .min(self.sweep_timer.deadline())
    }

    /// Advance the simulation by one step.  Does nothing while paused; starts
    /// a new run first if the previous one is over.
    pub(crate) fn tick(&mut self, now: Instant) {
        if self.state.paused {
            return;
        }
        if !self.state.running {
            self.start_run(now);
        }
        self.chain.move_forward();
        let head = self.chain.head().position;
        let eaten = collision::food_collision(head, &mut self.food, consts::FOOD_RADIUS);
        if eaten > 0 {
            self.chain.grow(eaten);
            let eaten = u32::try_from(eaten).unwrap_or(u32::MAX);
            self.state
                .add_points(eaten.saturating_mul(consts::POINTS_PER_FOOD));
            tracing::debug!(
                eaten,
                score = self.state.score,
                length = self.chain.len(),
                "Snake ate"
            );
        }
        let hit_wall = collision::wall_collision(
            head,
            self.config.field.width,
            self.config.field.height,
            consts::WALL_MARGIN,
        );
        if hit_wall || collision::self_collision(&self.chain, consts::SELF_COLLISION_THRESHOLD) {
            self.game_over(hit_wall);
        }
    }

    /// Add a batch of food to the field unless paused
    pub(crate) fn spawn_food(&mut self, now: Instant) {
        if self.state.paused {
            return;
        }
        self.food.spawn(&mut self.rng, self.config.food.batch, now);
        tracing::debug!(
            added = self.config.food.batch,
            total = self.food.len(),
            "Food refreshed"
        );
    }

    /// Let expired food rot unless paused
    pub(crate) fn sweep_food(&mut self, now: Instant) {
        if self.state.paused {
            return;
        }
        let rotted = self.food.sweep_expired(&mut self.rng, now);
        tracing::debug!(
            rotted,
            total = self.food.len(),
            expiry = %self.food.expiry(),
            "Food swept"
        );
    }

    fn start_run(&mut self, now: Instant) {
        self.state.running = true;
        self.state.score = 0;
        self.chain.reset(self.config.snake.start_length);
        self.food.clear();
        self.food
            .spawn(&mut self.rng, self.config.food.initial_batch, now);
        tracing::info!(
            length = self.chain.len(),
            food = self.food.len(),
            "Starting new run"
        );
    }

    fn game_over(&mut self, hit_wall: bool) {
        let head = self.chain.head();
        let cause = if hit_wall { "wall" } else { "self" };
        tracing::info!(
            score = self.state.score,
            x = head.position.x,
            y = head.position.y,
            heading = head.heading.heading(),
            cause,
            "Game over"
        );
        self.state.running = false;
        self.state.paused = true;
        self.save_high_score();
    }
}

impl<R, S: HighScoreStore> Game<R, S> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Queue a turn for the next tick
    pub(crate) fn on_direction(&mut self, direction: Direction) {
        self.chain.change_direction(direction);
    }

    pub(crate) fn on_toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
        tracing::debug!(paused = self.state.paused, "Toggled pause");
    }

    /// Pause the game if it is currently running
    pub(crate) fn pause(&mut self) {
        if self.state.phase() == Phase::Running {
            self.state.paused = true;
        }
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[cfg(test)]
    pub(crate) fn direction(&self) -> Direction {
        self.chain.direction()
    }

    /// Flush the high score before the program exits
    pub(crate) fn shutdown(&mut self) {
        self.save_high_score();
    }

    fn save_high_score(&mut self) {
        self.state.high_score = self.state.high_score.max(self.state.score);
        self.store.save_high_score(self.state.high_score);
    }
}

/// Scores & flags for the game as a whole
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct GameState {
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) paused: bool,
    pub(crate) running: bool,
}

impl GameState {
    fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.high_score = self.high_score.max(self.score);
    }

    pub(crate) fn phase(&self) -> Phase {
        match (self.running, self.paused) {
            (false, false) => Phase::Idle,
            (true, false) => Phase::Running,
            (true, true) => Phase::Paused,
            (false, true) => Phase::GameOver,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// No run has started yet
    Idle,
    Running,
    Paused,
    /// The last run ended in a collision; unpausing starts a new one
    GameOver,
}

impl<R, S> Widget for &Game<R, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, field_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        Line::styled(
            format!(
                " Score: {}  High Score: {}",
                self.state.score,
                self.state.high_score.max(self.state.score)
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let field = self.config.field;
        let cells = Size {
            width: u16::try_from(field.width / GRID_STEP).unwrap_or(u16::MAX),
            height: u16::try_from(field.height / GRID_STEP).unwrap_or(u16::MAX),
        };
        let block_area = center_rect(
            field_area,
            Size {
                width: cells.width.saturating_add(2),
                height: cells.height.saturating_add(2),
            },
        );
        Block::bordered()
            .style(Style::new().bg(field.background))
            .render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
            half_width: field.width / 2,
            half_height: field.height / 2,
        };
        let food_style = Style::new().fg(self.config.food.color);
        for item in self.food.items() {
            canvas.draw_cell(item.position, consts::FOOD_SYMBOL, food_style);
        }
        let snake_style = Style::new().fg(self.config.snake.color);
        for seg in self.chain.body() {
            canvas.draw_cell(seg.position, consts::SNAKE_BODY_SYMBOL, snake_style);
        }
        // Draw the head last so that it stays visible when it collides with
        // something
        let head = self.chain.head();
        canvas.draw_cell(
            head.position,
            head_symbol(head.heading),
            snake_style.add_modifier(Modifier::BOLD),
        );

        let banner = match self.state.phase() {
            Phase::Idle | Phase::Running => None,
            Phase::Paused => Some(Banner::Paused),
            Phase::GameOver => Some(Banner::GameOver),
        };
        if let Some(banner) = banner {
            banner.render(center_rect(area, Banner::SIZE), buf);
        }
    }
}

fn head_symbol(heading: Direction) -> char {
    match heading {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// Maps world positions to terminal cells, one cell per grid step
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    half_width: i32,
    half_height: i32,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let col = (pos.x + self.half_width).div_euclid(GRID_STEP);
        let row = (self.half_height - pos.y).div_euclid(GRID_STEP);
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return;
        };
        if col >= self.area.width || row >= self.area.height {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((self.area.x + col, self.area.y + row)) {
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }
}
