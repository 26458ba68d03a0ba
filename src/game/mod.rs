mod collision;
mod direction;
mod food;
mod grid;
mod snake;
pub(crate) use self::collision::Collision;
pub(crate) use self::direction::Direction;
pub(crate) use self::food::{Food, FoodCounts, FoodType};
use self::food::{total_eaten, FoodSpawner, SpawnError};
pub(crate) use self::grid::{Grid, Position};
pub(crate) use self::snake::Snake;
use crate::consts;
use rand::{rngs::StdRng, Rng};
use std::fmt;
use std::time::Duration;

const SPAWNER: FoodSpawner = FoodSpawner::new(consts::GRID);

/// Everything the renderer needs to know about a game in progress
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    pub(crate) snake: Snake,
    pub(crate) foods: Vec<Food>,
    pub(crate) counts: FoodCounts,
    pub(crate) phase: Phase,
    /// Time between movements of the snake
    pub(crate) tick_period: Duration,
}

impl GameState {
    /// The state shown on the title screen before a game starts
    pub(crate) fn new() -> GameState {
        GameState {
            snake: Snake::new(consts::INITIAL_HEAD),
            foods: Vec::new(),
            counts: FoodCounts::default(),
            phase: Phase::Title,
            tick_period: consts::INITIAL_TICK_PERIOD,
        }
    }

    pub(crate) fn score(&self) -> u32 {
        total_eaten(&self.counts)
    }

    /// Compute the state after one movement of the snake, turning it to face
    /// `pending` first if that is set.  `self` is left untouched.
    ///
    /// Outside of [`Phase::Running`], or while the snake has no direction,
    /// this is a no-op.
    pub(crate) fn ticked<R: Rng>(
        &self,
        pending: Option<Direction>,
        rng: &mut R,
    ) -> (GameState, Vec<Event>) {
        let mut next = self.clone();
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return (next, events);
        }
        let Some(direction) = pending.or(self.snake.direction) else {
            return (next, events);
        };
        let new_head = direction.step(self.snake.head());
        let eaten = self.foods.iter().position(|f| f.pos == new_head);
        if let Some(collision) = collision::check(
            consts::GRID,
            new_head,
            self.snake.obstructions(eaten.is_some()),
        ) {
            next.set_phase(Phase::Over(Outcome::Crashed(collision)), &mut events);
            return (next, events);
        }
        if let Some(i) = eaten {
            let food = next.foods.remove(i);
            next.counts[food.kind] += 1;
            events.push(Event::Ate(food.kind));
            let period = next
                .tick_period
                .saturating_sub(consts::TICK_PERIOD_STEP)
                .max(consts::MIN_TICK_PERIOD);
            if period != next.tick_period {
                next.tick_period = period;
                events.push(Event::SpeedChanged(period));
            }
            if next.score() >= consts::WIN_THRESHOLD {
                next.set_phase(Phase::Over(Outcome::Won), &mut events);
                return (next, events);
            }
            next.snake = self.snake.advanced(direction, Some(food.kind));
            events.push(Event::Moved(new_head));
            next.place_food(rng, &mut events);
        } else {
            next.snake = self.snake.advanced(direction, None);
            events.push(Event::Moved(new_head));
        }
        (next, events)
    }

    fn place_food<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<Event>) {
        match SPAWNER.spawn(rng, &self.snake, &self.foods, &self.counts) {
            Ok(food) => {
                self.foods.push(food);
                events.push(Event::FoodSpawned(food));
            }
            Err(e) => events.push(Event::SpawnFailed(e)),
        }
    }

    fn set_phase(&mut self, phase: Phase, events: &mut Vec<Event>) {
        self.phase = phase;
        events.push(Event::PhaseChanged(phase));
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::new()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// Waiting for the player to start a game
    Title,
    /// Counting down to the start of play; holds the number on display
    Countdown(u8),
    Running,
    Over(Outcome),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Title => write!(f, "title"),
            Phase::Countdown(n) => write!(f, "countdown ({n})"),
            Phase::Running => write!(f, "running"),
            Phase::Over(Outcome::Won) => write!(f, "over (won)"),
            Phase::Over(Outcome::Crashed(c)) => write!(f, "over ({c})"),
        }
    }
}

/// How a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// Every food was eaten
    Won,
    Crashed(Collision),
}

/// Notable things that happened while handling a command or a clock tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Event {
    PhaseChanged(Phase),
    Countdown(u8),
    /// The snake's head moved to the given cell
    Moved(Position),
    Ate(FoodType),
    SpeedChanged(Duration),
    FoodSpawned(Food),
    SpawnFailed(SpawnError),
}

impl Event {
    fn log(&self) {
        match self {
            Event::PhaseChanged(phase) => log::info!("Game is now in phase {phase}"),
            Event::Countdown(n) => log::debug!("Countdown: {n}"),
            Event::Moved(pos) => log::trace!("Snake moved to {pos}"),
            Event::Ate(kind) => log::debug!("Snake ate a {kind}"),
            Event::SpeedChanged(period) => {
                log::debug!("Tick period is now {}ms", period.as_millis());
            }
            Event::FoodSpawned(food) => log::debug!("Placed a {} at {}", food.kind, food.pos),
            Event::SpawnFailed(SpawnError::Exhausted) => {
                log::debug!("Not placing food: {}", SpawnError::Exhausted);
            }
            Event::SpawnFailed(e) => log::warn!("Failed to place food: {e}"),
        }
    }
}

/// Owns the game state and applies player commands and clock ticks to it
#[derive(Clone, Debug)]
pub(crate) struct Engine<R = StdRng> {
    rng: R,
    state: GameState,
    /// Direction requested since the last tick, applied at the next one
    pending: Option<Direction>,
}

impl<R: Rng> Engine<R> {
    pub(crate) fn new(rng: R) -> Engine<R> {
        Engine {
            rng,
            state: GameState::new(),
            pending: None,
        }
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    /// Leave the title screen and begin the countdown
    pub(crate) fn start(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.state.phase == Phase::Title {
            self.state
                .set_phase(Phase::Countdown(consts::COUNTDOWN_START), &mut events);
        }
        logged(events)
    }

    /// Advance the countdown by one step.  When it runs out, the snake is set
    /// moving and the grid is stocked with food.
    pub(crate) fn countdown_step(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Phase::Countdown(n) = self.state.phase {
            let n = n.saturating_sub(1);
            if n == 0 {
                self.state.snake.direction = Some(consts::START_DIRECTION);
                self.pending = None;
                self.state.set_phase(Phase::Running, &mut events);
                for _ in 0..consts::FOOD_SPAWN_COUNT {
                    self.state.place_food(&mut self.rng, &mut events);
                }
            } else {
                self.state.phase = Phase::Countdown(n);
                events.push(Event::Countdown(n));
            }
        }
        logged(events)
    }

    /// Ask for the snake to turn at the next tick.  Ignored unless the game
    /// is running, and when `direction` is the snake's current direction or
    /// its reverse.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if self.state.phase != Phase::Running {
            return;
        }
        match self.state.snake.direction {
            Some(current) if current == direction => (),
            Some(current) if current.opposite() == direction => {
                log::debug!("Ignoring request to reverse from {current} to {direction}");
            }
            _ => self.pending = Some(direction),
        }
    }

    /// Move the snake one cell
    pub(crate) fn tick(&mut self) -> Vec<Event> {
        let (state, events) = self.state.ticked(self.pending.take(), &mut self.rng);
        self.state = state;
        logged(events)
    }

    /// Return to the title screen after a game has ended
    pub(crate) fn reset(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if matches!(self.state.phase, Phase::Over(_)) {
            self.state = GameState::new();
            self.pending = None;
            events.push(Event::PhaseChanged(Phase::Title));
        }
        logged(events)
    }

}

fn logged(events: Vec<Event>) -> Vec<Event> {
    for ev in &events {
        ev.log();
    }
    events
}

#[cfg(test)]
mod tests {
    use super::food::total_food_count;
    use super::snake::BodySegment;
    use super::*;
    use crate::util::EnumExt;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_engine() -> Engine<ChaCha12Rng> {
        Engine::new(ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn food(x: i16, y: i16, kind: FoodType) -> Food {
        Food {
            pos: Position::new(x, y),
            kind,
        }
    }

    /// An engine in the running phase with a bodiless snake at `head` moving
    /// in `direction` and the given food on the grid
    fn running(head: Position, direction: Direction, foods: Vec<Food>) -> Engine<ChaCha12Rng> {
        let mut engine = new_engine();
        engine.state.phase = Phase::Running;
        engine.state.snake = Snake::new(head);
        engine.state.snake.direction = Some(direction);
        engine.state.foods = foods;
        engine
    }

    /// A snake with its head at (5, 5) moving up, its body curling around
    /// clockwise through (5, 6), (6, 6), and ending at (6, 5)
    fn curled_snake() -> Snake {
        let positions = vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ];
        let body = positions
            .iter()
            .skip(1)
            .map(|&pos| BodySegment {
                kind: FoodType::Book,
                pos,
            })
            .collect();
        Snake {
            head: Position::new(5, 5),
            body,
            positions,
            direction: Some(Direction::Up),
        }
    }

    fn assert_snake_consistent(snake: &Snake) {
        assert_eq!(snake.positions.len(), snake.body.len() + 1);
        assert_eq!(snake.positions.first(), Some(&snake.head));
    }

    #[test]
    fn new_engine_shows_title() {
        let engine = new_engine();
        assert_eq!(engine.state(), &GameState::new());
        assert_eq!(engine.state().phase, Phase::Title);
        assert_eq!(engine.state().snake.head(), consts::INITIAL_HEAD);
        assert!(engine.state().foods.is_empty());
        assert_eq!(engine.state().score(), 0);
    }

    #[test]
    fn countdown_then_play() {
        let mut engine = new_engine();
        assert_eq!(
            engine.start(),
            [Event::PhaseChanged(Phase::Countdown(3))]
        );
        assert_eq!(engine.countdown_step(), [Event::Countdown(2)]);
        assert_eq!(engine.state().phase, Phase::Countdown(2));
        assert_eq!(engine.countdown_step(), [Event::Countdown(1)]);
        let events = engine.countdown_step();
        assert_eq!(events.first(), Some(&Event::PhaseChanged(Phase::Running)));
        let state = engine.state();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.snake.direction, Some(Direction::Right));
        assert_eq!(state.foods.len(), consts::FOOD_SPAWN_COUNT);
        for (i, f) in state.foods.iter().enumerate() {
            assert!(consts::GRID.contains(f.pos));
            assert_ne!(f.pos, state.snake.head());
            assert!(state.foods[..i].iter().all(|g| g.pos != f.pos));
        }
    }

    #[test]
    fn start_only_from_title() {
        let mut engine = running(Position::new(7, 7), Direction::Right, Vec::new());
        assert!(engine.start().is_empty());
        assert_eq!(engine.state().phase, Phase::Running);
    }

    #[test]
    fn countdown_step_outside_countdown_is_noop() {
        let mut engine = new_engine();
        assert!(engine.countdown_step().is_empty());
        assert_eq!(engine.state(), &GameState::new());
    }

    #[test]
    fn directions_ignored_before_running() {
        let mut engine = new_engine();
        engine.set_direction(Direction::Up);
        assert_eq!(engine.pending, None);
        let _ = engine.start();
        engine.set_direction(Direction::Up);
        assert_eq!(engine.pending, None);
        assert!(engine.tick().is_empty());
        assert_eq!(engine.state().snake, Snake::new(consts::INITIAL_HEAD));
    }

    #[test]
    fn plain_move() {
        let mut engine = running(
            Position::new(7, 7),
            Direction::Right,
            vec![food(0, 0, FoodType::Smile)],
        );
        let events = engine.tick();
        assert_eq!(events, [Event::Moved(Position::new(8, 7))]);
        let state = engine.state();
        assert_eq!(state.snake.head(), Position::new(8, 7));
        assert!(state.snake.body().is_empty());
        assert_eq!(state.counts, FoodCounts::default());
        assert_eq!(state.tick_period, consts::INITIAL_TICK_PERIOD);
        assert_snake_consistent(&state.snake);
    }

    #[test]
    fn eat_and_grow() {
        let mut engine = running(
            Position::new(7, 7),
            Direction::Right,
            vec![food(8, 7, FoodType::Heart), food(2, 2, FoodType::Book)],
        );
        let events = engine.tick();
        assert_eq!(
            events[..3],
            [
                Event::Ate(FoodType::Heart),
                Event::SpeedChanged(Duration::from_millis(195)),
                Event::Moved(Position::new(8, 7)),
            ]
        );
        let state = engine.state();
        assert_eq!(state.snake.head(), Position::new(8, 7));
        assert_eq!(
            state.snake.body(),
            [BodySegment {
                kind: FoodType::Heart,
                pos: Position::new(7, 7)
            }]
        );
        assert_eq!(state.counts[FoodType::Heart], 1);
        assert_eq!(state.score(), 1);
        assert_eq!(state.tick_period, Duration::from_millis(195));
        assert_eq!(state.foods.len(), 2);
        let replacement = state.foods[1];
        assert_eq!(events.get(3), Some(&Event::FoodSpawned(replacement)));
        assert!(!state.snake.occupies(replacement.pos));
        assert_ne!(replacement.pos, state.foods[0].pos);
        assert_snake_consistent(&state.snake);
    }

    #[rstest]
    #[case(200, 195)]
    #[case(104, 100)]
    #[case(100, 100)]
    fn speed_ramp(#[case] before: u64, #[case] after: u64) {
        let mut engine = running(
            Position::new(7, 7),
            Direction::Right,
            vec![food(8, 7, FoodType::Money)],
        );
        engine.state.tick_period = Duration::from_millis(before);
        let events = engine.tick();
        assert_eq!(engine.state().tick_period, Duration::from_millis(after));
        assert_eq!(
            events.contains(&Event::SpeedChanged(Duration::from_millis(after))),
            before != after
        );
    }

    #[rstest]
    #[case(Position::new(0, 7), Direction::Left)]
    #[case(Position::new(14, 7), Direction::Right)]
    #[case(Position::new(7, 0), Direction::Up)]
    #[case(Position::new(7, 14), Direction::Down)]
    fn wall_collision(#[case] head: Position, #[case] direction: Direction) {
        let mut engine = running(head, direction, vec![food(3, 3, FoodType::Heart)]);
        let before = engine.state().clone();
        let events = engine.tick();
        let over = Phase::Over(Outcome::Crashed(Collision::Wall));
        assert_eq!(events, [Event::PhaseChanged(over)]);
        assert_eq!(
            engine.state(),
            &GameState {
                phase: over,
                ..before
            }
        );
    }

    #[test]
    fn self_collision() {
        // Head at (5, 5) moving right, with a body running back through
        // (4, 5), (4, 4), (5, 4), (6, 4), and down to (6, 5)
        let positions = vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(4, 4),
            Position::new(5, 4),
            Position::new(6, 4),
            Position::new(6, 5),
        ];
        let mut engine = running(Position::new(5, 5), Direction::Right, Vec::new());
        engine.state.snake = Snake {
            head: Position::new(5, 5),
            body: positions
                .iter()
                .skip(1)
                .map(|&pos| BodySegment {
                    kind: FoodType::Smile,
                    pos,
                })
                .collect(),
            positions,
            direction: Some(Direction::Right),
        };
        let before = engine.state().clone();
        engine.set_direction(Direction::Up);
        let events = engine.tick();
        let over = Phase::Over(Outcome::Crashed(Collision::SelfHit));
        assert_eq!(events, [Event::PhaseChanged(over)]);
        assert_eq!(
            engine.state(),
            &GameState {
                phase: over,
                ..before
            }
        );
    }

    #[test]
    fn chasing_tail_is_allowed() {
        let mut engine = running(Position::new(5, 5), Direction::Up, Vec::new());
        engine.state.snake = curled_snake();
        engine.set_direction(Direction::Right);
        let events = engine.tick();
        assert_eq!(events, [Event::Moved(Position::new(6, 5))]);
        let snake = &engine.state().snake;
        assert_eq!(
            snake.positions,
            [
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
            ]
        );
        assert_eq!(engine.state().phase, Phase::Running);
    }

    #[test]
    fn reversal_is_rejected() {
        let mut engine = running(Position::new(7, 7), Direction::Right, Vec::new());
        engine.set_direction(Direction::Left);
        assert_eq!(engine.pending, None);
        let _ = engine.tick();
        assert_eq!(engine.state().snake.direction, Some(Direction::Right));
        assert_eq!(engine.state().snake.head(), Position::new(8, 7));
    }

    #[test]
    fn turn_waits_for_tick() {
        let mut engine = running(Position::new(7, 7), Direction::Right, Vec::new());
        engine.set_direction(Direction::Up);
        assert_eq!(engine.state().snake.direction, Some(Direction::Right));
        // Reversal is judged against the direction actually travelled
        engine.set_direction(Direction::Left);
        assert_eq!(engine.pending, Some(Direction::Up));
        let _ = engine.tick();
        assert_eq!(engine.state().snake.head(), Position::new(7, 6));
        assert_eq!(engine.state().snake.direction, Some(Direction::Up));
        assert_eq!(engine.pending, None);
        engine.set_direction(Direction::Down);
        assert_eq!(engine.pending, None);
    }

    #[test]
    fn same_direction_is_noop() {
        let mut engine = running(Position::new(7, 7), Direction::Right, Vec::new());
        engine.set_direction(Direction::Right);
        assert_eq!(engine.pending, None);
    }

    #[test]
    fn winning_bite() {
        let mut engine = running(
            Position::new(7, 7),
            Direction::Right,
            vec![food(8, 7, FoodType::Heart)],
        );
        engine.state.counts[FoodType::Heart] = 8;
        engine.state.counts[FoodType::Smile] = 9;
        engine.state.counts[FoodType::Money] = 9;
        engine.state.counts[FoodType::Book] = 9;
        let events = engine.tick();
        assert_eq!(events.last(), Some(&Event::PhaseChanged(Phase::Over(Outcome::Won))));
        assert!(!events.iter().any(|ev| matches!(ev, Event::FoodSpawned(_))));
        let state = engine.state();
        assert_eq!(state.phase, Phase::Over(Outcome::Won));
        assert_eq!(state.score(), consts::WIN_THRESHOLD);
        assert_eq!(state.counts[FoodType::Heart], 9);
        assert!(state.foods.is_empty());
        assert_eq!(state.snake.head(), Position::new(7, 7));
    }

    #[test]
    fn no_win_before_threshold() {
        let mut engine = running(
            Position::new(7, 7),
            Direction::Right,
            vec![food(8, 7, FoodType::Heart)],
        );
        engine.state.counts[FoodType::Heart] = 7;
        engine.state.counts[FoodType::Smile] = 9;
        engine.state.counts[FoodType::Money] = 9;
        engine.state.counts[FoodType::Book] = 9;
        let _ = engine.tick();
        let state = engine.state();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score(), 35);
        // The one remaining heart is the only thing left to place
        assert_eq!(state.foods.len(), 1);
        assert_eq!(state.foods[0].kind, FoodType::Heart);
    }

    #[test]
    fn exhausted_food_is_not_replaced() {
        let mut engine = running(
            Position::new(7, 7),
            Direction::Right,
            vec![food(8, 7, FoodType::Heart), food(1, 1, FoodType::Heart)],
        );
        engine.state.counts[FoodType::Heart] = 7;
        engine.state.counts[FoodType::Smile] = 9;
        engine.state.counts[FoodType::Money] = 9;
        engine.state.counts[FoodType::Book] = 9;
        let events = engine.tick();
        assert!(events.contains(&Event::SpawnFailed(SpawnError::Exhausted)));
        assert_eq!(engine.state().foods, [food(1, 1, FoodType::Heart)]);
        assert_eq!(engine.state().phase, Phase::Running);
    }

    #[test]
    fn reset_after_game_over() {
        let mut engine = running(Position::new(14, 7), Direction::Right, Vec::new());
        engine.state.counts[FoodType::Money] = 4;
        let _ = engine.tick();
        assert!(matches!(engine.state().phase, Phase::Over(_)));
        assert_eq!(engine.reset(), [Event::PhaseChanged(Phase::Title)]);
        assert_eq!(engine.state(), &GameState::new());
        assert_eq!(engine.pending, None);
        assert!(engine.reset().is_empty());
        assert_eq!(engine.state(), &GameState::new());
    }

    #[test]
    fn reset_ignored_mid_game() {
        let mut engine = running(Position::new(7, 7), Direction::Right, Vec::new());
        assert!(engine.reset().is_empty());
        assert_eq!(engine.state().phase, Phase::Running);
    }

    #[test]
    fn over_is_frozen() {
        let mut engine = running(Position::new(14, 7), Direction::Right, Vec::new());
        let _ = engine.tick();
        let frozen = engine.state().clone();
        engine.set_direction(Direction::Up);
        assert!(engine.tick().is_empty());
        assert_eq!(engine.state(), &frozen);
    }

    #[test]
    fn ticked_leaves_original_alone() {
        let engine = running(
            Position::new(7, 7),
            Direction::Right,
            vec![food(8, 7, FoodType::Book)],
        );
        let before = engine.state().clone();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let (after, _) = before.ticked(Some(Direction::Right), &mut rng);
        assert_eq!(engine.state(), &before);
        assert_ne!(after, before);
    }

    #[test]
    fn food_limits_hold_over_long_game() {
        // Sweep the snake back and forth across the grid, eating whatever is
        // in its path, and check the per-kind limits after every tick.
        let mut engine = new_engine();
        let _ = engine.start();
        for _ in 0..consts::COUNTDOWN_START {
            let _ = engine.countdown_step();
        }
        engine.state.snake = Snake::new(Position::new(0, 0));
        engine.state.snake.direction = Some(Direction::Right);
        let mut ticks = 0;
        while engine.state().phase == Phase::Running && ticks < 2000 {
            let head = engine.state().snake.head();
            let dir = engine.state().snake.direction;
            if (dir == Some(Direction::Right) && head.x == 14)
                || (dir == Some(Direction::Left) && head.x == 0)
            {
                engine.set_direction(Direction::Down);
            } else if dir == Some(Direction::Down) {
                engine.set_direction(if head.x == 0 {
                    Direction::Right
                } else {
                    Direction::Left
                });
            }
            let _ = engine.tick();
            ticks += 1;
            let state = engine.state();
            for kind in FoodType::iter() {
                assert!(
                    total_food_count(kind, &state.foods, &state.counts) <= consts::FOOD_LIMIT,
                    "too many {kind}s"
                );
            }
            assert!(state.score() <= consts::WIN_THRESHOLD);
            if state.score() < consts::WIN_THRESHOLD {
                assert_ne!(state.phase, Phase::Over(Outcome::Won));
            }
            assert_snake_consistent(&state.snake);
        }
    }
}
