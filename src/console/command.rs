//! Shell command parsing.

use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "greeter",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

/// One shell command.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in with the registered login adapter
    Login,
    /// Show the logged-in user's profile
    UserInfo,
    /// Log out and forget the deployed contract
    Logout,
    /// Deploy a new greeter contract
    Deploy,
    /// Read the greeter's message
    Read,
    /// Set the pending input
    Input {
        #[arg(allow_hyphen_values = true, default_value = "")]
        text: String,
    },
    /// Write the pending input (or the given text) to the greeter
    Write {
        #[arg(allow_hyphen_values = true)]
        text: Option<String>,
    },
    /// Show address, chain and balance of the connected wallet
    Balance,
    /// Sign a message with the connected wallet
    Sign {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Show session state
    Status,
    /// List commands
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Commands whose argument is the rest of the line, taken verbatim.
const TEXT_COMMANDS: &[&str] = &["input", "write", "sign"];

/// Parse one input line; blank lines yield `None`.
///
/// For `input`, `write` and `sign` everything after the command word and its
/// separating whitespace is one argument, spacing included.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_start();
    let (head, rest) = match line.find(char::is_whitespace) {
        Some(at) => (&line[..at], line[at..].trim_start()),
        None => (line, ""),
    };
    if head.is_empty() {
        return Ok(None);
    }

    let args: Vec<&str> = if TEXT_COMMANDS.contains(&head) {
        std::iter::once(head)
            .chain((!rest.is_empty()).then_some(rest))
            .collect()
    } else {
        line.split_whitespace().collect()
    };
    Line::try_parse_from(args)
        .map(|line| Some(line.command))
        .map_err(|e| e.render().to_string())
}

/// Command overview for the `help` command.
pub fn help_text() -> String {
    Line::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_line("login").unwrap(), Some(Command::Login));
        assert_eq!(parse_line(" user-info ").unwrap(), Some(Command::UserInfo));
        assert_eq!(parse_line("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_text_arguments_keep_spacing() {
        assert_eq!(
            parse_line("input a  b").unwrap(),
            Some(Command::Input {
                text: "a  b".to_string()
            })
        );
        assert_eq!(
            parse_line("  write  Hello   there ").unwrap(),
            Some(Command::Write {
                text: Some("Hello   there ".to_string())
            })
        );
        assert_eq!(
            parse_line("sign Hello\tworld").unwrap(),
            Some(Command::Sign {
                text: "Hello\tworld".to_string()
            })
        );
    }

    #[test]
    fn test_text_arguments_may_be_omitted() {
        assert_eq!(
            parse_line("input").unwrap(),
            Some(Command::Input {
                text: String::new()
            })
        );
        assert_eq!(parse_line("write").unwrap(), Some(Command::Write { text: None }));
    }

    #[test]
    fn test_other_commands_reject_extra_words() {
        assert!(parse_line("login now").is_err());
    }

    #[test]
    fn test_sign_requires_text() {
        assert!(parse_line("sign").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_line("launch").unwrap_err();
        assert!(err.contains("launch"));
    }

    #[test]
    fn test_help_lists_commands() {
        let help = help_text();
        assert!(help.contains("deploy"));
        assert!(help.contains("user-info"));
    }
}
