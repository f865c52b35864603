//! Command parsing: `/name[@bot] args...` plus arity and numeric checks that fail with a usage message.

use std::str::FromStr;

use crate::error::HandlerError;

/// A parsed bot command. `name` is lower-cased and has no leading `/` or `@bot` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    /// Everything after the command word, trimmed.
    pub args: String,
}

/// Parses `text` as a command. Returns None for plain text, a bare `/`, or a command addressed to
/// another bot (`/start@other_bot` when `bot_username` is `my_bot`).
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<Command> {
    let rest = text.trim_start().strip_prefix('/')?;
    let (head, args) = match rest.find(char::is_whitespace) {
        Some(idx) => (&rest[..idx], rest[idx..].trim()),
        None => (rest, ""),
    };

    let (name, target) = match head.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (head, None),
    };
    if name.is_empty() {
        return None;
    }
    if let (Some(target), Some(me)) = (target, bot_username) {
        if !target.eq_ignore_ascii_case(me.trim_start_matches('@')) {
            return None;
        }
    }

    Some(Command {
        name: name.to_lowercase(),
        args: args.to_string(),
    })
}

impl Command {
    pub fn is(&self, name: &str) -> bool {
        self.name == name.trim_start_matches('/').to_lowercase()
    }

    /// Whitespace-separated arguments.
    pub fn split_args(&self) -> Vec<&str> {
        self.args.split_whitespace().collect()
    }

    /// Returns exactly `n` arguments or `HandlerError::Usage(usage)`.
    pub fn expect_args(&self, n: usize, usage: &str) -> Result<Vec<&str>, HandlerError> {
        let args = self.split_args();
        if args.len() != n {
            return Err(HandlerError::Usage(usage.to_string()));
        }
        Ok(args)
    }

    /// Returns the argument text, or `HandlerError::Usage(usage)` when it is empty.
    pub fn require_text(&self, usage: &str) -> Result<&str, HandlerError> {
        if self.args.is_empty() {
            return Err(HandlerError::Usage(usage.to_string()));
        }
        Ok(&self.args)
    }
}

/// Parses one argument as a number, mapping failure to `HandlerError::Usage(usage)`.
pub fn parse_number<T: FromStr>(arg: &str, usage: &str) -> Result<T, HandlerError> {
    arg.parse::<T>()
        .map_err(|_| HandlerError::Usage(usage.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_command() {
        let cmd = parse_command("/start", None).unwrap();
        assert_eq!(cmd.name, "start");
        assert_eq!(cmd.args, "");
    }

    #[test]
    fn test_parse_command_with_args_and_case() {
        let cmd = parse_command("/ADD  2   3 ", None).unwrap();
        assert_eq!(cmd.name, "add");
        assert_eq!(cmd.args, "2   3");
        assert_eq!(cmd.split_args(), vec!["2", "3"]);
        assert!(cmd.is("/add"));
    }

    #[test]
    fn test_parse_command_addressed_to_bot() {
        let ours = parse_command("/help@My_Bot", Some("my_bot")).unwrap();
        assert_eq!(ours.name, "help");
        assert!(parse_command("/help@other_bot", Some("my_bot")).is_none());
        // Unknown own username: accept any target.
        assert!(parse_command("/help@other_bot", None).is_some());
    }

    #[test]
    fn test_non_commands() {
        assert!(parse_command("hello", None).is_none());
        assert!(parse_command("/", None).is_none());
        assert!(parse_command("/@bot", None).is_none());
        assert!(parse_command("", None).is_none());
    }

    #[test]
    fn test_expect_args_arity() {
        let cmd = parse_command("/add 1", None).unwrap();
        let err = cmd.expect_args(2, "/add <a> <b>").unwrap_err();
        assert!(matches!(err, HandlerError::Usage(ref u) if u == "/add <a> <b>"));

        let cmd = parse_command("/add 1 2", None).unwrap();
        assert_eq!(cmd.expect_args(2, "/add <a> <b>").unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn test_require_text() {
        let cmd = parse_command("/note", None).unwrap();
        assert!(cmd.require_text("/note <text>").is_err());
        let cmd = parse_command("/note buy milk", None).unwrap();
        assert_eq!(cmd.require_text("/note <text>").unwrap(), "buy milk");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<f64>("2.5", "u").unwrap(), 2.5);
        assert_eq!(parse_number::<u32>("6", "u").unwrap(), 6);
        assert!(parse_number::<u32>("six", "u").is_err());
        assert!(parse_number::<u32>("-1", "u").is_err());
    }
}
