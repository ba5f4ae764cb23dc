//! Regenerate `src/scripts.rs` from the `--help` of every binary
//!
//! Run `cargo build` first, then `cargo run -p make-docs > src/scripts.rs`.

use std::env;
use std::process::Command;

struct Check {
    name: &'static str,
    about: &'static str,
}

const CHECKS: &[Check] = &[
    Check {
        name: "check-elb-health",
        about: "Requires the `aws` command line tool and credentials that can describe load balancers.",
    },
    Check {
        name: "check-docker-containers",
        about: "Requires the `docker` command line tool and access to the docker daemon.",
    },
    Check {
        name: "check-urls",
        about: "Cross platform, only requires network access to the urls.",
    },
    Check {
        name: "notify-ses",
        about: "Not a check: a notification command. Requires the `aws` command line tool.",
    },
];

fn main() {
    let bin_dir = env::var("NRPE_PLUGINS_BIN_DIR").unwrap_or_else(|_| "target/debug".to_owned());
    let preamble = "Documentation about the various scripts contained herein\n";

    let mut out: String = cp(preamble.split('\n'));
    out.push('\n');
    out.push_str(&cp(CHECKS.iter().map(|c| format!("- [{0}](#{0})", c.name))));
    out.push('\n');
    for check in CHECKS {
        out.push_str(&format!(
            "\
//!
//! # {0}
//!
//! {1}
//!
//! ```plain
//! $ {0} --help
",
            check.name, check.about
        ));
        out.push_str(&cp(help_text(&bin_dir, check.name).split('\n')));
        out.push_str("\n//! ```\n");
    }
    out.push('\n');
    print!("{}", out);
}

fn help_text(bin_dir: &str, name: &str) -> String {
    let output = Command::new(format!("{}/{}", bin_dir, name))
        .arg("--help")
        .output()
        .unwrap_or_else(|e| panic!("Couldn't execute command {}: {}", name, e));
    String::from_utf8(output.stdout)
        .unwrap_or_else(|e| panic!("Couldn't convert command {} help to utf8: {}", name, e))
}

/// Comment each line in the iterator
fn cp<S: AsRef<str>, I: Iterator<Item = S>>(s: I) -> String {
    s.map(|s| format!("//! {}", s.as_ref()))
        .map(|s| s.trim().into())
        .collect::<Vec<String>>()
        .join("\n")
}
