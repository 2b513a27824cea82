//! Command-line configuration.
//!
//! Arguments are parsed by hand: a handful of global flags that may appear
//! anywhere, then a subcommand with its own positional argument.

use std::path::PathBuf;

/// What `zyc` was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Tokenize a file or `-c` text and print the tokens.
    Lex,
    /// Read lines from stdin and print their tokens as they complete.
    Repl,
    Help,
    Version,
}

/// Where `lex` reads its input from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    /// `lex <file>`.
    pub file: Option<PathBuf>,
    /// `-c <expr>`.
    pub expr: Option<String>,
    /// `--quiet`: no REPL banner.
    pub quiet: bool,
    /// `--exitonfail`: stop at the first lex error instead of resetting the
    /// tokenizer and carrying on with the next line.
    pub exit_on_fail: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("-c requires an expression")]
    MissingExpr,
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("lex needs a file or -c <expr>")]
    MissingInput,
    #[error("lex takes a file or -c <expr>, not both")]
    ConflictingInput,
    #[error("-c is only valid with lex")]
    ExprWithoutLex,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            command: Command::Repl,
            file: None,
            expr: None,
            quiet: false,
            exit_on_fail: false,
        }
    }
}

impl Config {
    /// Parse arguments, program name excluded, and validate the result.
    ///
    /// With no subcommand, `-c <expr>` lexes the expression and anything
    /// else starts the REPL.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let mut command: Option<Command> = None;

        let mut iter = args.iter().map(AsRef::as_ref);
        while let Some(arg) = iter.next() {
            match arg {
                "-c" => {
                    let expr = iter.next().ok_or(ConfigError::MissingExpr)?;
                    config.expr = Some(expr.to_string());
                }
                "--quiet" | "-quiet" => config.quiet = true,
                "--exitonfail" | "-exitonfail" => config.exit_on_fail = true,
                "help" | "--help" | "-h" => command = Some(Command::Help),
                "version" | "--version" | "-V" => command = Some(Command::Version),
                opt if opt.starts_with('-') => {
                    return Err(ConfigError::UnknownOption(opt.to_string()));
                }
                word => match command {
                    None => {
                        command = Some(match word {
                            "lex" => Command::Lex,
                            "repl" => Command::Repl,
                            other => return Err(ConfigError::UnknownCommand(other.to_string())),
                        });
                    }
                    Some(Command::Lex) if config.file.is_none() => {
                        config.file = Some(PathBuf::from(word));
                    }
                    Some(_) => return Err(ConfigError::UnexpectedArgument(word.to_string())),
                },
            }
        }

        config.command = match command {
            Some(cmd) => cmd,
            None if config.expr.is_some() => Command::Lex,
            None => Command::Repl,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations no command can honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.command {
            Command::Lex => match (&self.file, &self.expr) {
                (Some(_), Some(_)) => Err(ConfigError::ConflictingInput),
                (None, None) => Err(ConfigError::MissingInput),
                _ => Ok(()),
            },
            Command::Repl if self.expr.is_some() => Err(ConfigError::ExprWithoutLex),
            Command::Repl | Command::Help | Command::Version => Ok(()),
        }
    }

    /// Input for `lex`; `None` for other commands.
    pub fn source(&self) -> Option<Source> {
        if self.command != Command::Lex {
            return None;
        }
        match (&self.file, &self.expr) {
            (Some(path), _) => Some(Source::File(path.clone())),
            (None, Some(text)) => Some(Source::Text(text.clone())),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests;
