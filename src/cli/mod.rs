pub mod clipboard;
pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::derive::DEFAULT_MAX_LENGTH;

pub use commands::{execute, run, Outcome};

#[derive(Parser, Debug)]
#[command(name = "sheetpass")]
#[command(about = "Regenerate memorable account passwords from a shared alphabet table", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Derive a password straight from a key
    #[command(visible_alias = "gen")]
    Generate {
        key: String,
        #[command(flatten)]
        options: PasswordOptions,
    },
    /// Show the email and password of the first account matching a prefix
    Get {
        name: String,
        #[command(flatten)]
        options: PasswordOptions,
    },
    /// Register an account and print its password
    Make {
        name: String,
        #[command(flatten)]
        options: PasswordOptions,
    },
    /// Remove the first account matching a prefix
    #[command(visible_alias = "remove")]
    Delete {
        name: String,
        #[command(flatten)]
        options: PasswordOptions,
    },
}

/// Accepted by every verb; each verb reads the ones it needs.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PasswordOptions {
    #[arg(short, long, default_value = "")]
    pub email: String,
    #[arg(short = 'm', long = "maxchars", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_chars: usize,
    #[arg(short, long)]
    pub dashless: bool,
    /// Replace an existing account with the same prefix
    #[arg(short = 'o', long = "override")]
    pub overwrite: bool,
    /// Also copy the password to the clipboard
    #[arg(short, long)]
    pub copy: bool,
}

impl Commands {
    pub fn options(&self) -> &PasswordOptions {
        match self {
            Commands::Generate { options, .. }
            | Commands::Get { options, .. }
            | Commands::Make { options, .. }
            | Commands::Delete { options, .. } => options,
        }
    }

    pub fn needs_alphabet(&self) -> bool {
        !matches!(self, Commands::Delete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sheetpass").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["get", "ali"]);
        let options = cli.command.options();
        assert_eq!(options.max_chars, 255);
        assert_eq!(options.email, "");
        assert!(!options.dashless && !options.overwrite && !options.copy);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_aliases() {
        assert!(matches!(parse(&["gen", "abc"]).command, Commands::Generate { ref key, .. } if key == "abc"));
        assert!(matches!(parse(&["remove", "bob"]).command, Commands::Delete { ref name, .. } if name == "bob"));
    }

    #[test]
    fn test_short_and_long_options() {
        let cli = parse(&["make", "github", "-e", "me@x.io", "-m", "12", "-d", "-o", "-c"]);
        let expected = PasswordOptions {
            email: "me@x.io".into(),
            max_chars: 12,
            dashless: true,
            overwrite: true,
            copy: true,
        };
        assert_eq!(cli.command.options(), &expected);

        let cli = parse(&[
            "--config", "/tmp/c.toml", "make", "github", "--email", "me@x.io", "--maxchars", "12",
            "--dashless", "--override", "--copy",
        ]);
        assert_eq!(cli.command.options(), &expected);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let err = Cli::try_parse_from(["sheetpass", "get", "x", "-m", "lots"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = Cli::try_parse_from(["sheetpass", "fetch", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);

        assert!(Cli::try_parse_from(["sheetpass", "get"]).is_err());
    }

    #[test]
    fn test_delete_skips_alphabet() {
        assert!(!parse(&["delete", "x"]).command.needs_alphabet());
        assert!(parse(&["gen", "x"]).command.needs_alphabet());
    }
}
