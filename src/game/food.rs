use super::grid::{Grid, Position};
use super::snake::Snake;
use crate::consts;
use crate::util::EnumExt;
use enum_map::{Enum, EnumMap};
use rand::{
    seq::{IndexedRandom, IteratorRandom},
    Rng,
};
use std::fmt;
use thiserror::Error;

/// The kinds of treats on offer.  Purely a tag; every kind behaves the same.
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum FoodType {
    Heart,
    Smile,
    Money,
    Book,
}

impl FoodType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            FoodType::Heart => "heart",
            FoodType::Smile => "smile",
            FoodType::Money => "money",
            FoodType::Book => "book",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A piece of food lying on the grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) pos: Position,
    pub(crate) kind: FoodType,
}

/// How many of each kind of food have been eaten
pub(crate) type FoodCounts = EnumMap<FoodType, u32>;

/// Total number of foods eaten across all kinds
pub(crate) fn total_eaten(counts: &FoodCounts) -> u32 {
    counts.values().sum()
}

/// Number of foods of kind `kind` that have been eaten or are waiting on the
/// grid
pub(crate) fn total_food_count(kind: FoodType, foods: &[Food], counts: &FoodCounts) -> u32 {
    let live = foods.iter().filter(|f| f.kind == kind).count();
    counts[kind].saturating_add(u32::try_from(live).unwrap_or(u32::MAX))
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SpawnError {
    #[error("every kind of food has reached its limit")]
    Exhausted,
    #[error("no free cell is available for new food")]
    NoSpace,
}

/// Places new food on free cells, never letting the eaten-plus-live count of
/// any kind exceed the per-kind limit
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FoodSpawner {
    grid: Grid,
    limit: u32,
    attempts: usize,
}

impl FoodSpawner {
    pub(crate) const fn new(grid: Grid) -> FoodSpawner {
        FoodSpawner {
            grid,
            limit: consts::FOOD_LIMIT,
            attempts: consts::SPAWN_ATTEMPTS,
        }
    }

    /// Choose a kind of food that is still under its limit and a cell that is
    /// covered by neither the snake nor other food.
    ///
    /// Cells are drawn at random up to a fixed number of times; after that,
    /// a random cell is picked from an exhaustive scan of the free ones.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError::Exhausted`] if every kind is at its limit, or
    /// [`SpawnError::NoSpace`] if the grid has no free cell.
    pub(crate) fn spawn<R: Rng>(
        &self,
        rng: &mut R,
        snake: &Snake,
        foods: &[Food],
        counts: &FoodCounts,
    ) -> Result<Food, SpawnError> {
        let candidates = FoodType::iter()
            .filter(|&kind| total_food_count(kind, foods, counts) < self.limit)
            .collect::<Vec<_>>();
        let kind = *candidates.choose(rng).ok_or(SpawnError::Exhausted)?;
        let is_free = |pos: Position| !snake.occupies(pos) && foods.iter().all(|f| f.pos != pos);
        for _ in 0..self.attempts {
            let pos = Position::new(
                rng.random_range(0..self.grid.width),
                rng.random_range(0..self.grid.height),
            );
            if is_free(pos) {
                return Ok(Food { pos, kind });
            }
        }
        self.grid
            .positions()
            .filter(|&pos| is_free(pos))
            .choose(rng)
            .map(|pos| Food { pos, kind })
            .ok_or(SpawnError::NoSpace)
    }
}
