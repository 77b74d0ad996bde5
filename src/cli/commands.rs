use super::{clipboard, Cli, Commands};
use crate::account::{AccountRecord, AccountRegistry};
use crate::alphabet::AlphabetTable;
use crate::config::Config;
use crate::derive::derive_password;
use crate::error::Result;
use crate::session::Session;

const GET_MESSAGE: &str = "Password:";
const MAKE_MESSAGE: &str = "Successfully created account. Password:";

/// What a command prints, plus the password for `--copy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub password: Option<String>,
}

impl Outcome {
    fn password(message: &str, password: String) -> Self {
        Self {
            lines: vec![message.to_string(), password.clone()],
            password: Some(password),
        }
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }
}

/// Open the session, run the command and handle `--copy`.
pub fn run(cli: &Cli, config: &Config) -> Result<Outcome> {
    let session = Session::open(config)?;
    let outcome = execute(&cli.command, &session)?;
    if cli.command.options().copy {
        if let Some(password) = &outcome.password {
            clipboard::copy(&config.clipboard, password)?;
        }
    }
    Ok(outcome)
}

pub fn execute(command: &Commands, session: &Session) -> Result<Outcome> {
    let alphabet = if command.needs_alphabet() {
        AlphabetTable::load(session)?
    } else {
        AlphabetTable::default()
    };
    let registry = AccountRegistry::new(session, &alphabet);
    let options = command.options();

    match command {
        Commands::Generate { key, .. } => {
            let password = derive_password(key, options.max_chars, options.dashless, &alphabet)?;
            Ok(Outcome::password(GET_MESSAGE, password))
        }
        Commands::Get { name, .. } => {
            let (record, password) = registry.get(name)?;
            let mut outcome = Outcome::password(GET_MESSAGE, password);
            outcome.lines.insert(0, format!("Email/Username: {}", record.email));
            Ok(outcome)
        }
        Commands::Make { name, .. } => {
            let record = AccountRecord {
                name: name.clone(),
                email: options.email.clone(),
                max_length: options.max_chars,
                dashless: options.dashless,
            };
            let (_, password) = registry.create(record, options.overwrite)?;
            Ok(Outcome::password(MAKE_MESSAGE, password))
        }
        Commands::Delete { name, .. } => {
            let (removed, index) = registry.delete(name)?;
            Ok(Outcome {
                lines: vec![format!("Successfully deleted account {} (row {})", removed, index)],
                password: None,
            })
        }
    }
}
