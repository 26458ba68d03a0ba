use crate::clock::{Alarm, Scheduler};
use crate::command::Command;
use crate::game::{Engine, Phase};
use crossterm::event::{poll, read, Event};
use rand::rngs::StdRng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// The interactive shell around the game engine: feeds it clock ticks and
/// player commands, and redraws the screen whenever something changes
#[derive(Clone, Debug)]
pub(crate) struct App {
    engine: Engine<StdRng>,
    scheduler: Scheduler,
    dirty: bool,
    quitting: bool,
}

impl App {
    pub(crate) fn new(rng: StdRng) -> App {
        App {
            engine: Engine::new(rng),
            scheduler: Scheduler::new(),
            dirty: true,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        log::info!("Starting up");
        while !self.quitting {
            if self.dirty {
                terminal.draw(|frame| frame.render_widget(self.engine.state(), frame.area()))?;
                self.dirty = false;
            }
            self.process_input()?;
        }
        log::info!("Quitting");
        Ok(())
    }

    /// Wait for either the next clock deadline or an input event, whichever
    /// comes first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        if let Some(wait) = self.scheduler.wait(Instant::now()) {
            if wait.is_zero() || !poll(wait)? {
                self.handle_alarm(Instant::now());
                return Ok(());
            }
        }
        self.handle_event(read()?);
        Ok(())
    }

    fn handle_alarm(&mut self, now: Instant) {
        let events = match self.scheduler.poll(now) {
            Some(Alarm::Countdown) => self.engine.countdown_step(),
            Some(Alarm::Tick) => self.engine.tick(),
            None => Vec::new(),
        };
        self.dirty |= !events.is_empty();
        self.sync(now);
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Resize(..) | Event::FocusGained => self.dirty = true,
            _ => {
                if let Some(cmd) = event
                    .as_key_press_event()
                    .and_then(Command::from_key_event)
                {
                    self.handle_command(cmd);
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        let events = match (self.engine.state().phase, cmd) {
            (_, Command::Quit) => {
                self.quitting = true;
                Vec::new()
            }
            // Any arrow key also gets things going from the title screen
            (Phase::Title, Command::Start | Command::Turn(_)) => self.engine.start(),
            (_, Command::Start) => Vec::new(),
            (_, Command::Turn(direction)) => {
                self.engine.set_direction(direction);
                Vec::new()
            }
            (_, Command::Reset) => self.engine.reset(),
        };
        self.dirty |= !events.is_empty();
        self.sync(Instant::now());
    }

    fn sync(&mut self, now: Instant) {
        let state = self.engine.state();
        self.scheduler.sync(state.phase, state.tick_period, now);
    }
}
