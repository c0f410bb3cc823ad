use crate::command::{Command, KeyMap};
use crate::game::Game;
use crate::highscore::HighScoreStore;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

#[derive(Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng, S = Box<dyn HighScoreStore>> {
    game: Game<R, S>,
    keymap: KeyMap,
    quitting: bool,
}

impl<R: Rng, S: HighScoreStore> App<R, S> {
    pub(crate) fn new(game: Game<R, S>, keymap: KeyMap) -> App<R, S> {
        App {
            game,
            keymap,
            quitting: false,
        }
    }

    /// Run the game until the player quits.  The high score is flushed on the
    /// way out even if the terminal fails.
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        let r = self.main_loop(&mut terminal);
        self.game.shutdown();
        r
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            let _ = terminal.draw(|frame| self.game.draw(frame))?;
            self.process_input()?;
        }
        Ok(())
    }

    /// Wait for either an input event or the game's next deadline, whichever
    /// comes first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        let wait = self
            .game
            .next_deadline()
            .saturating_duration_since(Instant::now());
        if !wait.is_zero() && poll(wait)? {
            self.handle_event(read()?);
        } else {
            self.game.update(Instant::now());
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            self.game.pause();
            return;
        }
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        match self.keymap.get(key) {
            Some(Command::Turn(direction)) => self.game.on_direction(direction),
            Some(Command::TogglePause) => self.game.on_toggle_pause(),
            Some(Command::Quit) => {
                tracing::info!("Quitting");
                self.quitting = true;
            }
            None => (),
        }
    }
}
