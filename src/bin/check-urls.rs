//! Check that a list of URLs respond with 200

use structopt::StructOpt;

use nrpe_plugins::urls::{self, DEFAULT_TIMEOUT_SECS};
use nrpe_plugins::{logging, Status};

/// Check that every URL in a comma separated list answers a GET with a 200.
///
/// Network errors are retried. A URL that never answers, or answers with
/// anything but 200, is critical. Errors that a retry recovered from are a
/// warning.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "check-urls (part of nrpe-plugins)",
    setting = structopt::clap::AppSettings::ColoredHelp
)]
struct Args {
    #[structopt(short = "H", long, help = "URLs separated by comma to be tested")]
    hostnames: Option<String>,
    #[structopt(short = "t", long, help = "Timeout for http connection in seconds [default: 5]")]
    timeout: Option<f64>,
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    logging::init();
    let args: Args = nrpe_plugins::parse_args();
    let hostnames = args.hostnames.unwrap_or_else(|| {
        println!("UNKNOWN - Mandatory option hostnames (-H) not passed");
        Status::Unknown.exit();
    });
    let client = urls::client(args.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)).unwrap_or_else(|e| {
        println!("UNKNOWN - {}", e);
        Status::Unknown.exit();
    });
    let report = urls::check(&client, &hostnames);
    println!("{}", report.message());
    report.status.exit();
}
