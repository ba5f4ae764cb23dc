//! NRPE plugins: strongly typed Nagios checks
//!
//! A handful of checks for things that usually end up as throwaway scripts
//! on a monitoring box: load balancer instance health, running docker
//! containers, URL availability, plus an email notifier for alerts.
//!
//! Every check prints a single line to stdout and exits with one of the
//! Nagios status codes, modelled here as [`Status`]:
//!
//! ```rust,no_run
//! use nrpe_plugins::Status;
//!
//! fn main() {
//!     println!("OK - everything is fine");
//!     Status::Ok.exit();
//! }
//! ```
//!
//! The reusable piece is the [`health`] classifier, which turns per-state
//! counts into a [`health::Verdict`] without doing any I/O. The rest of the
//! modules are the thin collaborators each binary glues together.
//!
//! See [`scripts`] for the `--help` of every binary.

use std::cmp::max;
use std::fmt;
use std::process;
use std::str::FromStr;

use structopt::clap::ErrorKind;
use structopt::StructOpt;

pub mod aws;
mod command;
pub mod docker;
pub mod elb;
pub mod error;
pub mod health;
pub mod logging;
pub mod scripts;
pub mod ses;
pub mod urls;

pub use crate::error::PluginError;

/// All possible exit statuses for a Nagios check
///
/// Ordering is used for escalation: `Ok < Warning < Critical`. `Unknown`
/// sorts last but is never preferred over a real result, see
/// [`Status::escalate`].
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    #![cfg_attr(test, allow(dead_code))]

    /// Exit the process with this status' exit code
    pub fn exit(self) -> ! {
        process::exit(self.exit_code())
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    /// Move toward `candidate` if it is more severe
    ///
    /// `Unknown` is only a starting point: any `Warning` or `Critical`
    /// replaces it, and it never replaces anything itself. A `Critical` is
    /// never downgraded.
    pub fn escalate(self, candidate: Status) -> Status {
        match (self, candidate) {
            (Status::Unknown, Status::Ok) => Status::Unknown,
            (Status::Unknown, candidate) => candidate,
            (current, Status::Unknown) => current,
            (current, candidate) => max(current, candidate),
        }
    }

    /// The names accepted by `from_str`, for use in clap's `possible_values`
    pub fn str_values() -> [&'static str; 4] {
        ["ok", "warning", "critical", "unknown"]
    }
}

impl FromStr for Status {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Status, PluginError> {
        match s.to_ascii_lowercase().as_ref() {
            "ok" => Ok(Status::Ok),
            "warning" | "warn" => Ok(Status::Warning),
            "critical" | "crit" => Ok(Status::Critical),
            "unknown" => Ok(Status::Unknown),
            _ => Err(PluginError::UnknownStatus(s.to_owned())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match *self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        };
        write!(f, "{}", msg)
    }
}

/// Parse command line arguments, exiting `UNKNOWN` if they are invalid
///
/// `--help` and `--version` still exit 0.
pub fn parse_args<T: StructOpt>() -> T {
    try_parse_args().unwrap_or_else(|summary| {
        println!("UNKNOWN - {}", summary);
        Status::Unknown.exit();
    })
}

/// Parse command line arguments, leaving bad input to the caller
///
/// `--help` and `--version` print and exit 0. Any other error writes clap's
/// full message to stderr and comes back as a one line summary.
pub fn try_parse_args<T: StructOpt>() -> Result<T, String> {
    T::from_iter_safe(std::env::args_os()).map_err(|e| match e.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
        _ => {
            eprintln!("{}", e.message);
            arg_error_summary(&e.message)
        }
    })
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // skip to the end of the escape sequence
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Squash a clap error message into a single line
///
/// The `error:` prefix, colors and usage are dropped. A headline ending in
/// `:` keeps the indented lines that follow it, e.g. the missing arguments.
pub fn arg_error_summary(message: &str) -> String {
    let message = strip_ansi(message);
    let mut lines = message.lines();
    let first = lines.next().unwrap_or("").trim();
    let first = first.strip_prefix("error:").unwrap_or(first).trim();
    if !first.ends_with(':') {
        return first.to_owned();
    }
    let details: Vec<&str> = lines
        .take_while(|line| line.starts_with(char::is_whitespace) && !line.trim().is_empty())
        .map(str::trim)
        .collect();
    if details.is_empty() {
        first.trim_end_matches(':').to_owned()
    } else {
        format!("{} {}", first, details.join(", "))
    }
}

#[cfg(test)]
mod test {
    use structopt::StructOpt;

    use super::{arg_error_summary, Status};

    #[test]
    fn exit_codes_follow_nagios() {
        assert_eq!(Status::Ok.exit_code(), 0);
        assert_eq!(Status::Warning.exit_code(), 1);
        assert_eq!(Status::Critical.exit_code(), 2);
        assert_eq!(Status::Unknown.exit_code(), 3);
    }

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("warn".parse::<Status>().unwrap(), Status::Warning);
        assert_eq!("CRITICAL".parse::<Status>().unwrap(), Status::Critical);
        assert_eq!("crit".parse::<Status>().unwrap(), Status::Critical);
        assert!("bogus".parse::<Status>().is_err());
        for name in Status::str_values().iter() {
            let _ = name.parse::<Status>().unwrap();
        }
    }

    #[test]
    fn escalate_never_downgrades() {
        assert_eq!(Status::Critical.escalate(Status::Warning), Status::Critical);
        assert_eq!(Status::Critical.escalate(Status::Ok), Status::Critical);
        assert_eq!(Status::Warning.escalate(Status::Critical), Status::Critical);
        assert_eq!(Status::Ok.escalate(Status::Warning), Status::Warning);
    }

    #[test]
    fn unknown_is_replaced_by_real_results() {
        assert_eq!(Status::Unknown.escalate(Status::Warning), Status::Warning);
        assert_eq!(Status::Unknown.escalate(Status::Critical), Status::Critical);
        assert_eq!(Status::Unknown.escalate(Status::Ok), Status::Unknown);
        assert_eq!(Status::Warning.escalate(Status::Unknown), Status::Warning);
    }

    #[test]
    fn displays_nagios_labels() {
        assert_eq!(Status::Ok.to_string(), "OK");
        assert_eq!(Status::Unknown.to_string(), "UNKNOWN");
    }

    #[derive(StructOpt, Debug)]
    struct Needy {
        #[structopt(long)]
        to: String,
        #[structopt(long)]
        timeout: Option<f64>,
    }

    #[test]
    fn arg_errors_fit_on_one_line() {
        let message = "error: The following required arguments were not provided:\n    \
                       --to <to>\n    --from <from>\n\nUSAGE:\n    notify --to <to>\n\n\
                       For more information try --help\n";
        assert_eq!(
            arg_error_summary(message),
            "The following required arguments were not provided: --to <to>, --from <from>"
        );
        assert_eq!(
            arg_error_summary("\u{1b}[1;31merror:\u{1b}[0m Invalid value for '\u{1b}[33m--timeout\u{1b}[0m': nope\n"),
            "Invalid value for '--timeout': nope"
        );
        assert_eq!(arg_error_summary(""), "");
    }

    #[test]
    fn real_clap_errors_are_summarized() {
        let missing = Needy::from_iter_safe(vec!["needy"]).unwrap_err();
        let summary = arg_error_summary(&missing.message);
        assert!(!summary.contains('\n'));
        assert!(!summary.contains("USAGE"));
        assert!(summary.contains("--to <to>"), "{}", summary);

        let bad = Needy::from_iter_safe(vec!["needy", "--to=x", "--timeout=soon"]).unwrap_err();
        let summary = arg_error_summary(&bad.message);
        assert!(!summary.contains('\n'));
        assert!(!summary.starts_with("error"), "{}", summary);
        assert!(summary.contains("--timeout"), "{}", summary);
    }
}
