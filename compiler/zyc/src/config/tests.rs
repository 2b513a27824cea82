use super::*;
use pretty_assertions::assert_eq;

#[test]
fn no_arguments_starts_repl() {
    let config = Config::from_args::<&str>(&[]).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.source(), None);
}

#[test]
fn lex_file() {
    let config = Config::from_args(&["lex", "prog.zy"]).unwrap();
    assert_eq!(config.command, Command::Lex);
    assert_eq!(config.source(), Some(Source::File(PathBuf::from("prog.zy"))));
}

#[test]
fn bare_c_means_lex() {
    let config = Config::from_args(&["-c", "(+ 1 2)"]).unwrap();
    assert_eq!(config.command, Command::Lex);
    assert_eq!(config.source(), Some(Source::Text("(+ 1 2)".to_string())));

    let explicit = Config::from_args(&["lex", "-c", "(+ 1 2)"]).unwrap();
    assert_eq!(explicit, config);
}

#[test]
fn flags_anywhere() {
    let config = Config::from_args(&["--quiet", "repl", "--exitonfail"]).unwrap();
    assert_eq!(
        config,
        Config {
            command: Command::Repl,
            quiet: true,
            exit_on_fail: true,
            ..Config::default()
        }
    );
    assert!(Config::from_args(&["-quiet", "-exitonfail"]).unwrap().quiet);
}

#[test]
fn inconsistent_combinations_are_rejected() {
    assert_eq!(
        Config::from_args(&["lex"]),
        Err(ConfigError::MissingInput)
    );
    assert_eq!(
        Config::from_args(&["lex", "a.zy", "-c", "1"]),
        Err(ConfigError::ConflictingInput)
    );
    assert_eq!(
        Config::from_args(&["repl", "-c", "1"]),
        Err(ConfigError::ExprWithoutLex)
    );
    assert_eq!(Config::from_args(&["-c"]), Err(ConfigError::MissingExpr));
}

#[test]
fn unknown_words_are_rejected() {
    assert_eq!(
        Config::from_args(&["run"]),
        Err(ConfigError::UnknownCommand("run".to_string()))
    );
    assert_eq!(
        Config::from_args(&["--fast"]),
        Err(ConfigError::UnknownOption("--fast".to_string()))
    );
    assert_eq!(
        Config::from_args(&["lex", "a.zy", "b.zy"]),
        Err(ConfigError::UnexpectedArgument("b.zy".to_string()))
    );
}

#[test]
fn help_and_version() {
    assert_eq!(Config::from_args(&["--help"]).unwrap().command, Command::Help);
    assert_eq!(Config::from_args(&["version"]).unwrap().command, Command::Version);
}
