//! Per-chat session: a visit counter and a list of notes, kept in memory only.

use std::sync::Arc;

use async_trait::async_trait;
use botkit_chain::{on_command, HandlerChain};
use botkit_core::{Bot, Handler, HandlerResponse, Message, Result};
use botkit_middleware::{SessionKey, SessionMiddleware, Sessions};

use crate::reply::{reply, reply_or_usage};

pub const NOTE_USAGE: &str = "/note <text>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSession {
    pub visits: u32,
    pub notes: Vec<String>,
}

pub fn format_notes(notes: &[String]) -> String {
    if notes.is_empty() {
        return "No notes yet. Add one with /note <text>.".to_string();
    }
    let lines: Vec<String> = notes
        .iter()
        .enumerate()
        .map(|(i, note)| format!("{}. {}", i + 1, note))
        .collect();
    format!("Your notes:\n{}", lines.join("\n"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Visit,
    Note,
    Notes,
    Reset,
}

pub struct SessionHandler {
    bot: Arc<dyn Bot>,
    sessions: Sessions<ChatSession>,
    command: SessionCommand,
}

impl SessionHandler {
    pub fn new(bot: Arc<dyn Bot>, sessions: Sessions<ChatSession>, command: SessionCommand) -> Self {
        Self {
            bot,
            sessions,
            command,
        }
    }
}

#[async_trait]
impl Handler for SessionHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let bot = self.bot.as_ref();
        match self.command {
            SessionCommand::Visit => {
                let visits = self
                    .sessions
                    .update(message, |s| {
                        s.visits += 1;
                        s.visits
                    })
                    .await;
                reply(bot, message, format!("Visit #{} in this chat.", visits)).await
            }
            SessionCommand::Note => {
                let Some(cmd) = message.command(None) else {
                    return Ok(HandlerResponse::Ignore);
                };
                let text = match cmd.require_text(NOTE_USAGE) {
                    Ok(text) => text.to_string(),
                    Err(e) => return reply_or_usage(bot, message, Err(e)).await,
                };
                let total = self
                    .sessions
                    .update(message, |s| {
                        s.notes.push(text);
                        s.notes.len()
                    })
                    .await;
                reply(bot, message, format!("Noted ({} total).", total)).await
            }
            SessionCommand::Notes => {
                let session = self.sessions.get(message).await;
                reply(bot, message, format_notes(&session.notes)).await
            }
            SessionCommand::Reset => {
                self.sessions.reset(message).await;
                reply(bot, message, "Session cleared.").await
            }
        }
    }
}

pub fn chain(bot: Arc<dyn Bot>, sessions: Sessions<ChatSession>) -> HandlerChain {
    let handler = |command| Arc::new(SessionHandler::new(bot.clone(), sessions.clone(), command));
    HandlerChain::new()
        .add_middleware(Arc::new(SessionMiddleware::new(sessions.clone())))
        .add_handler(on_command("visit", handler(SessionCommand::Visit)))
        .add_handler(on_command("note", handler(SessionCommand::Note)))
        .add_handler(on_command("notes", handler(SessionCommand::Notes)))
        .add_handler(on_command("reset", handler(SessionCommand::Reset)))
}

/// Per-chat sessions, as the session bot uses them.
pub fn default_sessions() -> Sessions<ChatSession> {
    Sessions::new(SessionKey::PerChat)
}
