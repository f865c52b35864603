//! Commands with argument parsing. Wrong arity or a non-numeric argument gets the usage line back.

use std::sync::Arc;

use async_trait::async_trait;
use botkit_chain::{on_command, HandlerChain};
use botkit_core::{parse_number, Bot, Command, Handler, HandlerError, HandlerResponse, Message, Result};
use chrono::Local;
use rand::Rng;

use crate::reply::reply_or_usage;

pub const ADD_USAGE: &str = "/add <a> <b>";
pub const ROLL_USAGE: &str = "/roll [sides], sides between 2 and 1000";
pub const GREET_USAGE: &str = "/greet <name>";

const DEFAULT_SIDES: u32 = 6;
const MAX_SIDES: u32 = 1000;

pub const HELP_TEXT: &str = "Available commands:\n\
/start - say hello\n\
/help - show this list\n\
/add <a> <b> - add two numbers\n\
/roll [sides] - roll a die (default 6 sides)\n\
/greet <name> - greet someone\n\
/time - current server time";

/// Sum of two numbers, printed without a trailing `.0` for whole results.
pub fn add(cmd: &Command) -> std::result::Result<String, HandlerError> {
    let args = cmd.expect_args(2, ADD_USAGE)?;
    let a: f64 = parse_number(args[0], ADD_USAGE)?;
    let b: f64 = parse_number(args[1], ADD_USAGE)?;
    if !a.is_finite() || !b.is_finite() {
        return Err(HandlerError::Usage(ADD_USAGE.to_string()));
    }
    Ok(format!("{} + {} = {}", a, b, a + b))
}

/// Validated number of sides: default 6, otherwise 2..=1000.
pub fn roll_sides(cmd: &Command) -> std::result::Result<u32, HandlerError> {
    let args = cmd.split_args();
    let sides = match args.as_slice() {
        [] => DEFAULT_SIDES,
        [sides] => parse_number(sides, ROLL_USAGE)?,
        _ => return Err(HandlerError::Usage(ROLL_USAGE.to_string())),
    };
    if !(2..=MAX_SIDES).contains(&sides) {
        return Err(HandlerError::Usage(ROLL_USAGE.to_string()));
    }
    Ok(sides)
}

pub fn roll<R: Rng + ?Sized>(cmd: &Command, rng: &mut R) -> std::result::Result<String, HandlerError> {
    let sides = roll_sides(cmd)?;
    let value = rng.random_range(1..=sides);
    Ok(format!("🎲 You rolled {} (d{})", value, sides))
}

pub fn greet(cmd: &Command) -> std::result::Result<String, HandlerError> {
    let name = cmd.require_text(GREET_USAGE)?;
    Ok(format!("Hello, {}!", name))
}

/// Which command a [`CommandHandler`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Start,
    Help,
    Add,
    Roll,
    Greet,
    Time,
}

impl CommandKind {
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Help => "help",
            CommandKind::Add => "add",
            CommandKind::Roll => "roll",
            CommandKind::Greet => "greet",
            CommandKind::Time => "time",
        }
    }
}

pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    kind: CommandKind,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn Bot>, kind: CommandKind) -> Self {
        Self { bot, kind }
    }

    fn run(&self, message: &Message, cmd: &Command) -> std::result::Result<String, HandlerError> {
        match self.kind {
            CommandKind::Start => Ok(format!(
                "Welcome, {}! Send /help to see what I can do.",
                message.user.display_name()
            )),
            CommandKind::Help => Ok(HELP_TEXT.to_string()),
            CommandKind::Add => add(cmd),
            CommandKind::Roll => roll(cmd, &mut rand::rng()),
            CommandKind::Greet => greet(cmd),
            CommandKind::Time => Ok(format!(
                "Current time: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            )),
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(cmd) = message.command(None) else {
            return Ok(HandlerResponse::Ignore);
        };
        let outcome = self.run(message, &cmd);
        reply_or_usage(self.bot.as_ref(), message, outcome).await
    }
}

pub fn chain(bot: Arc<dyn Bot>) -> HandlerChain {
    [
        CommandKind::Start,
        CommandKind::Help,
        CommandKind::Add,
        CommandKind::Roll,
        CommandKind::Greet,
        CommandKind::Time,
    ]
    .into_iter()
    .fold(HandlerChain::new(), |chain, kind| {
        chain.add_handler(on_command(
            kind.name(),
            Arc::new(CommandHandler::new(bot.clone(), kind)),
        ))
    })
}
