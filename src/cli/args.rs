//! Flag parsing for the `activeshot` binary.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};

const BIN_NAME: &str = "activeshot";

/// Validated options for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Custom destination path. `None` means the timestamped default.
    pub file: Option<PathBuf>,
    pub clipboard: bool,
    /// Downsample by the screen's backing scale factor.
    pub resize: bool,
    pub quiet: bool,
    pub interactive: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file: None,
            clipboard: false,
            resize: true,
            quiet: false,
            interactive: false,
        }
    }
}

/// What the argument list asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Options),
    /// `-h`/`--help` was reached; holds the rendered usage text.
    Help(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("missing filename after --file")]
    MissingFilename,

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),

    #[error("conflicting options: {first} and {second} cannot be used together")]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
    },

    #[error("invalid arguments: {0}")]
    Invalid(String),
}

#[derive(Debug, Parser)]
#[command(
    name = BIN_NAME,
    about = "Capture the active window to a file or the clipboard",
    disable_version_flag = true,
    args_override_self = true
)]
struct RawArgs {
    /// Custom destination path or filename
    #[arg(long, value_name = "NAME")]
    file: Option<PathBuf>,

    /// Copy the screenshot to the clipboard instead of saving it
    #[arg(long, conflicts_with = "file")]
    clipboard: bool,

    /// Select a window or region interactively instead of using the active window
    #[arg(long)]
    interactive: bool,

    /// Keep the full backing resolution instead of downsampling Retina captures
    #[arg(long = "no-resize")]
    no_resize: bool,

    /// Suppress informational messages; on save print only the destination path
    #[arg(short, long)]
    quiet: bool,
}

impl From<RawArgs> for Options {
    fn from(raw: RawArgs) -> Self {
        Self {
            file: raw.file,
            clipboard: raw.clipboard,
            resize: !raw.no_resize,
            quiet: raw.quiet,
            interactive: raw.interactive,
        }
    }
}

/// Parses the argument list (without the program name).
///
/// Tokens are scanned in order: the first unknown token fails the parse,
/// and reaching `-h`/`--help` returns [`Parsed::Help`] regardless of what
/// follows. The clipboard/file conflict is checked once the scan completes.
///
/// `--file` never takes a flag-shaped token as its value, so `--file -q`
/// is a missing filename and `--file --help` shows help.
pub fn parse_args<I, T>(args: I) -> Result<Parsed, ParseError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let argv = std::iter::once(OsString::from(BIN_NAME)).chain(args.iter().cloned());

    match RawArgs::try_parse_from(argv) {
        Ok(raw) => {
            let options = Options::from(raw);
            if options.file.as_ref().is_some_and(|f| f.as_os_str().is_empty()) {
                return Err(ParseError::MissingFilename);
            }
            Ok(Parsed::Run(options))
        }
        Err(err) => map_clap_error(err, &args),
    }
}

fn map_clap_error(err: clap::Error, args: &[OsString]) -> Result<Parsed, ParseError> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Ok(Parsed::Help(err.render().to_string()))
        }
        ErrorKind::UnknownArgument => Err(ParseError::UnknownArgument(
            invalid_arg(&err).unwrap_or_default(),
        )),
        ErrorKind::ArgumentConflict => Err(ParseError::ConflictingOptions {
            first: "--clipboard",
            second: "--file",
        }),
        ErrorKind::InvalidValue | ErrorKind::WrongNumberOfValues | ErrorKind::NoEquals
            if invalid_arg(&err).is_some_and(|arg| arg.starts_with("--file")) =>
        {
            if help_follows_bare_file(args) {
                return Ok(Parsed::Help(RawArgs::command().render_help().to_string()));
            }
            Err(ParseError::MissingFilename)
        }
        _ => Err(ParseError::Invalid(first_line(&err))),
    }
}

/// Whether the first `--file` left without a value is followed by
/// `-h`/`--help`. That `--file` is where the scan stopped.
fn help_follows_bare_file(args: &[OsString]) -> bool {
    let mut tokens = args.iter().map(|arg| arg.to_string_lossy());
    while let Some(token) = tokens.next() {
        if token != "--file" {
            continue;
        }
        match tokens.next() {
            Some(next) if is_flag_shaped(&next) => return next == "-h" || next == "--help",
            Some(_) => continue,
            None => return false,
        }
    }
    false
}

fn is_flag_shaped(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

fn invalid_arg(err: &clap::Error) -> Option<String> {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => Some(arg.clone()),
        _ => None,
    }
}

fn first_line(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_options(args: &[&str]) -> Options {
        match parse_args(args.iter().copied()) {
            Ok(Parsed::Run(options)) => options,
            other => panic!("expected options for {:?}, got {:?}", args, other),
        }
    }

    #[test]
    fn defaults_resize_on_everything_else_off() {
        let options = run_options(&[]);
        assert_eq!(options, Options::default());
        assert!(options.resize);
    }

    #[test]
    fn all_boolean_flags() {
        let options = run_options(&["--interactive", "--no-resize", "-q", "--clipboard"]);
        assert!(options.interactive);
        assert!(!options.resize);
        assert!(options.quiet);
        assert!(options.clipboard);
        assert!(options.file.is_none());
    }

    #[test]
    fn long_quiet_flag() {
        assert!(run_options(&["--quiet"]).quiet);
    }

    #[test]
    fn file_takes_following_token() {
        let options = run_options(&["--file", "/tmp/shot.png"]);
        assert_eq!(options.file, Some(PathBuf::from("/tmp/shot.png")));
    }

    #[test]
    fn repeated_file_last_wins() {
        let options = run_options(&["--file", "a.png", "--file", "b.png"]);
        assert_eq!(options.file, Some(PathBuf::from("b.png")));
    }

    #[test]
    fn file_without_value_is_missing_filename() {
        assert_eq!(
            parse_args(["--file"]),
            Err(ParseError::MissingFilename)
        );
        assert_eq!(
            parse_args(["-q", "--file"]),
            Err(ParseError::MissingFilename)
        );
    }

    #[test]
    fn empty_filename_is_missing_filename() {
        assert_eq!(
            parse_args(["--file", ""]),
            Err(ParseError::MissingFilename)
        );
    }

    #[test]
    fn clipboard_and_file_conflict_in_either_order() {
        let expected = Err(ParseError::ConflictingOptions {
            first: "--clipboard",
            second: "--file",
        });
        assert_eq!(parse_args(["--clipboard", "--file", "x.png"]), expected);
        assert_eq!(parse_args(["--file", "x.png", "--clipboard"]), expected);
        assert_eq!(
            parse_args(["-q", "--file", "x.png", "--no-resize", "--clipboard"]),
            expected
        );
    }

    #[test]
    fn conflict_message_names_both_flags() {
        let err = parse_args(["--clipboard", "--file", "x.png"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("--clipboard"), "{}", message);
        assert!(message.contains("--file"), "{}", message);
    }

    #[test]
    fn unknown_flag_is_named() {
        assert_eq!(
            parse_args(["--bogus"]),
            Err(ParseError::UnknownArgument("--bogus".to_string()))
        );
        assert_eq!(
            parse_args(["-q", "--window"]),
            Err(ParseError::UnknownArgument("--window".to_string()))
        );
    }

    #[test]
    fn stray_positional_is_named() {
        let err = parse_args(["shot.png"]).unwrap_err();
        assert_eq!(err, ParseError::UnknownArgument("shot.png".to_string()));
        assert!(err.to_string().contains("shot.png"));
    }

    #[test]
    fn help_wins_over_later_invalid_tokens() {
        assert!(matches!(
            parse_args(["--help", "--bogus"]),
            Ok(Parsed::Help(_))
        ));
        assert!(matches!(
            parse_args(["-h", "--clipboard", "--file", "x.png"]),
            Ok(Parsed::Help(_))
        ));
    }

    #[test]
    fn help_after_conflicting_flags_still_wins() {
        assert!(matches!(
            parse_args(["--clipboard", "--file", "x.png", "--help"]),
            Ok(Parsed::Help(_))
        ));
    }

    #[test]
    fn unknown_token_before_help_fails_first() {
        assert_eq!(
            parse_args(["--bogus", "--help"]),
            Err(ParseError::UnknownArgument("--bogus".to_string()))
        );
    }

    #[test]
    fn help_right_after_file_shows_help() {
        for args in [&["--file", "--help"][..], &["-q", "--file", "-h"], &["--file", "--help", "--bogus"]] {
            assert!(
                matches!(parse_args(args.iter().copied()), Ok(Parsed::Help(_))),
                "expected help for {:?}",
                args
            );
        }
    }

    #[test]
    fn flag_after_file_is_not_a_filename() {
        assert_eq!(parse_args(["--file", "-q"]), Err(ParseError::MissingFilename));
        assert_eq!(
            parse_args(["--file", "--clipboard"]),
            Err(ParseError::MissingFilename)
        );
    }

    #[test]
    fn unknown_token_before_bare_file_help_fails_first() {
        assert_eq!(
            parse_args(["--bogus", "--file", "--help"]),
            Err(ParseError::UnknownArgument("--bogus".to_string()))
        );
    }

    #[test]
    fn help_text_lists_flags() {
        let Ok(Parsed::Help(text)) = parse_args(["--help"]) else {
            panic!("expected help");
        };
        for flag in ["--file", "--clipboard", "--interactive", "--no-resize", "--quiet"] {
            assert!(text.contains(flag), "help should mention {}: {}", flag, text);
        }
    }
}
