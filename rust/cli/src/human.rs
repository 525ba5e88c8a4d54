//! Interactive action source driven by a person at the terminal.
//!
//! The console is shared between the human seat and the session loop (which
//! renders finished hands and asks whether to continue), so it lives behind
//! an `Rc<RefCell<_>>`. Input is validated here and re-prompted until it is
//! legal; the engine only sees actions that passed [`parse_player_action`].

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use drawpoker_engine::errors::GameError;
use drawpoker_engine::player::{Player, PlayerAction};
use drawpoker_engine::source::{ActionSource, DecisionContext};

use crate::formatters::{format_hand, format_hand_indexed, format_legal};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_discards, parse_player_action};

/// Terminal streams for one play session.
pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    quit_requested: bool,
}

pub type SharedConsole<'a> = Rc<RefCell<Console<'a>>>;

impl<'a> Console<'a> {
    pub fn new(
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
    ) -> Self {
        Self {
            input,
            out,
            err,
            quit_requested: false,
        }
    }

    pub fn shared(self) -> SharedConsole<'a> {
        Rc::new(RefCell::new(self))
    }

    /// Writes `text` without a newline and reads the answer. `Ok(None)`
    /// means the input is closed.
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(read_stdin_line(&mut *self.input))
    }

    /// Set once the person typed `q`/`quit`; distinguishes a deliberate exit
    /// from the input stream ending.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

fn unavailable(e: io::Error) -> GameError {
    GameError::SourceUnavailable(e.to_string())
}

pub struct HumanSource<'a> {
    console: SharedConsole<'a>,
}

impl<'a> HumanSource<'a> {
    pub fn new(console: SharedConsole<'a>) -> Self {
        Self { console }
    }
}

impl ActionSource for HumanSource<'_> {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Result<PlayerAction, GameError> {
        let mut console = self.console.borrow_mut();
        let player = ctx.player;
        writeln!(
            console.out,
            "\n[{}] {}: stack {}, in pot this round {}, pot {}, to call {}",
            ctx.stage.as_str(),
            player.name(),
            player.stack(),
            player.bet_in_round(),
            ctx.pot,
            ctx.legal.to_call
        )
        .map_err(unavailable)?;
        writeln!(console.out, "Your hand: {}", format_hand(player.hand())).map_err(unavailable)?;

        let options = format!("{} > ", format_legal(&ctx.legal));
        loop {
            let Some(line) = console.prompt(&options).map_err(unavailable)? else {
                return Err(GameError::SourceUnavailable("input closed".into()));
            };
            match parse_player_action(&line, &ctx.legal, player.bet_in_round()) {
                ParseResult::Action(action) => return Ok(action),
                ParseResult::Quit => {
                    console.quit_requested = true;
                    return Err(GameError::SourceUnavailable("player quit".into()));
                }
                ParseResult::Invalid(msg) => {
                    ui::write_error(&mut *console.err, &msg).map_err(unavailable)?;
                }
            }
        }
    }

    fn select_discards(&mut self, player: &Player) -> Result<Vec<usize>, GameError> {
        let mut console = self.console.borrow_mut();
        writeln!(
            console.out,
            "\nExchange: {}",
            format_hand_indexed(player.hand())
        )
        .map_err(unavailable)?;
        loop {
            let Some(line) = console
                .prompt("Positions to exchange (up to 4, blank to stand pat) > ")
                .map_err(unavailable)?
            else {
                return Err(GameError::SourceUnavailable("input closed".into()));
            };
            if matches!(line.to_lowercase().as_str(), "q" | "quit") {
                console.quit_requested = true;
                return Err(GameError::SourceUnavailable("player quit".into()));
            }
            match parse_discards(&line) {
                Ok(indices) => return Ok(indices),
                Err(msg) => ui::write_error(&mut *console.err, &msg).map_err(unavailable)?,
            }
        }
    }

    fn rejected(&mut self, _player: &Player, error: &GameError) {
        let mut console = self.console.borrow_mut();
        let _ = ui::write_error(&mut *console.err, &error.to_string());
    }

    fn name(&self) -> &str {
        "human"
    }
}
