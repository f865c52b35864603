//! # botkit-middleware
//!
//! Reusable middleware: logging, allow-list auth, response timing and in-memory sessions.

mod logging_auth;
mod session;

pub use logging_auth::{AuthMiddleware, LoggingMiddleware, ResponseTimeMiddleware, ACCESS_DENIED};
pub use session::{SessionKey, SessionMiddleware, Sessions};

#[cfg(test)]
mod test;
