//! Check that containers for a docker image are running

use structopt::StructOpt;
use tracing::error;

use nrpe_plugins::{docker, logging, Status};

/// Check that at least one container is running a given docker image.
///
/// Any tag of the image counts. Reports how many are running and when the
/// newest one started.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "check-docker-containers (part of nrpe-plugins)",
    setting = structopt::clap::AppSettings::ColoredHelp
)]
struct Args {
    #[structopt(long = "image-name", alias = "image_name", help = "Docker image name, without a tag")]
    image_name: String,
    #[structopt(long, default_value = "docker", help = "The docker command line tool to use")]
    docker: String,
    #[structopt(
        long = "docker-error",
        default_value = "critical",
        possible_values = &Status::str_values(),
        help = "Status to exit with when docker can't be queried"
    )]
    docker_error: Status,
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    logging::init();
    let args: Args = nrpe_plugins::parse_args();
    match docker::check(&args.docker, &args.image_name) {
        Ok((status, line)) => {
            println!("{}", line);
            status.exit();
        }
        Err(e) => {
            error!("docker check for {}: {}", args.image_name, e);
            println!("Exception occured: {}", e);
            args.docker_error.exit();
        }
    }
}

#[cfg(test)]
mod test {
    use structopt::StructOpt;

    use super::Args;
    use nrpe_plugins::Status;

    #[test]
    fn can_parse_args() {
        let args = Args::from_iter(["c-d-c", "--image_name", "nginx"].iter());
        assert_eq!(args.image_name, "nginx");
        assert_eq!(args.docker, "docker");
        assert_eq!(args.docker_error, Status::Critical);
    }

    #[test]
    fn image_name_is_required() {
        assert!(Args::from_iter_safe(["c-d-c"].iter()).is_err());
    }
}
