//! Terminal rendering of the game state
use crate::consts;
use crate::game::{Direction, FoodType, GameState, Outcome, Phase, Position};
use crate::util::{center_rect, get_display_area, EnumExt};
use ratatui::{
    buffer::Buffer,
    layout::{self, Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

impl Widget for &GameState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        ScoreBar(self).render(score_area, buf);

        let block_area = center_rect(block_area, board_size());
        Block::bordered().render(block_area, buf);
        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for seg in self.snake.body() {
            board.draw_cell(
                seg.pos,
                food_symbol(seg.kind),
                food_style(seg.kind).patch(consts::BODY_STYLE),
            );
        }
        for food in &self.foods {
            board.draw_cell(food.pos, food_symbol(food.kind), food_style(food.kind));
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Phase::Over(Outcome::Crashed(_)) = self.phase {
            board.draw_cell(
                self.snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            board.draw_cell(
                self.snake.head(),
                head_symbol(self.snake.direction),
                consts::SNAKE_STYLE,
            );
        }

        match self.phase {
            Phase::Title => {
                Span::from(" Eat the treats, don't hit yourself!").render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Start ("),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            Phase::Countdown(n) => {
                Line::from_iter([
                    Span::raw(" Get ready… "),
                    Span::styled(n.to_string(), consts::BANNER_STYLE),
                ])
                .render(msg1_area, buf);
            }
            Phase::Running => {
                Span::from(format!(
                    " Speed: {}ms",
                    self.tick_period.as_millis()
                ))
                .render(msg1_area, buf);
            }
            Phase::Over(outcome) => {
                let banner = match outcome {
                    Outcome::Won => String::from(" — YOU WIN! —"),
                    Outcome::Crashed(c) => format!(" — GAME OVER: the snake {c} —"),
                };
                Span::styled(banner, consts::BANNER_STYLE).render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Title Screen ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

/// The size of the bordered board, border included
fn board_size() -> Size {
    let width = u16::try_from(consts::GRID.width).unwrap_or_default();
    let height = u16::try_from(consts::GRID.height).unwrap_or_default();
    Size {
        width: width.saturating_mul(consts::CELL_WIDTH).saturating_add(2),
        height: height.saturating_add(2),
    }
}

/// Per-kind eaten counts shown above the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ScoreBar<'a>(&'a GameState);

impl Widget for ScoreBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, consts::SCORE_BAR_STYLE);
        let mut spans = Vec::new();
        for kind in FoodType::iter() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                food_symbol(kind).to_string(),
                food_style(kind),
            ));
            spans.push(Span::raw(format!(
                " {}/{} ",
                self.0.counts[kind],
                consts::FOOD_LIMIT
            )));
        }
        spans.push(Span::raw(format!(" Score: {}", self.0.score())));
        Line::from(spans)
            .style(consts::SCORE_BAR_STYLE)
            .render(area, buf);
    }
}

fn food_symbol(kind: FoodType) -> char {
    match kind {
        FoodType::Heart => consts::HEART_SYMBOL,
        FoodType::Smile => consts::SMILE_SYMBOL,
        FoodType::Money => consts::MONEY_SYMBOL,
        FoodType::Book => consts::BOOK_SYMBOL,
    }
}

fn food_style(kind: FoodType) -> Style {
    match kind {
        FoodType::Heart => consts::HEART_STYLE,
        FoodType::Smile => consts::SMILE_STYLE,
        FoodType::Money => consts::MONEY_STYLE,
        FoodType::Book => consts::BOOK_STYLE,
    }
}

fn head_symbol(direction: Option<Direction>) -> char {
    match direction {
        Some(Direction::Up) => consts::SNAKE_HEAD_UP_SYMBOL,
        Some(Direction::Down) => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Some(Direction::Left) => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Some(Direction::Right) => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        None => consts::SNAKE_HEAD_IDLE_SYMBOL,
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        let Some(x) = x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(y) else {
            return;
        };
        if !self.area.contains(layout::Position { x, y }) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
