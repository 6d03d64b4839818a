//! Session commands read from stdin, one per line

use std::path::PathBuf;

use review_core::IssueId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PreviousPage,
    GoTo(u32),
    /// Jump to the next page with an active error or warning
    NextProblem,
    /// Resolve the current page and move on
    Approve,
    Toggle(IssueId),
    /// Resolve all / undo all on the current page
    TogglePage,
    Show,
    Map,
    Summary,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (h for help)")]
    Unknown(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or(CommandError::Empty)?;
        let arg = parts.next();

        let command = match name {
            "n" | "next" => Command::NextPage,
            "p" | "prev" => Command::PreviousPage,
            "g" | "goto" => Command::GoTo(number(arg, "page number")?),
            "j" | "jump" => Command::NextProblem,
            "a" | "approve" => Command::Approve,
            "t" | "toggle" => Command::Toggle(IssueId(number(arg, "issue id")?)),
            "r" | "resolve" => Command::TogglePage,
            "s" | "show" => Command::Show,
            "m" | "map" => Command::Map,
            "i" | "info" => Command::Summary,
            "e" | "export" => Command::Export(arg.map(PathBuf::from)),
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn number(arg: Option<&str>, what: &'static str) -> Result<u32, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(what))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

pub const HELP: &str = "\
Commands:
  n            next page
  p            previous page
  g <page>     go to page
  j            jump to next page with open findings
  a            approve page (resolve all) and advance
  t <id>       toggle a finding resolved/open
  r            resolve all / undo all on this page
  s            show current page
  m            document map
  i            review summary
  e [path]     export unresolved findings
  q            quit";
