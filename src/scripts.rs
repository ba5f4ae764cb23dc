//! Documentation about the various scripts contained herein
//!
//! - [check-elb-health](#check-elb-health)
//! - [check-docker-containers](#check-docker-containers)
//! - [check-urls](#check-urls)
//! - [notify-ses](#notify-ses)
//!
//! # check-elb-health
//!
//! Requires the `aws` command line tool and credentials that can describe load balancers.
//!
//! ```plain
//! $ check-elb-health --help
//! check-elb-health (part of nrpe-plugins) 0.1.0
//! Check the instance health of an AWS Elastic Load Balancer.
//!
//! Alerts when the percentage or the number of instances in the healthy state drops to or below the given levels.
//!
//! USAGE:
//!     check-elb-health [OPTIONS] --aws-access-key <aws-access-key> --aws-secret-access <aws-secret-access> --loadbalancer <loadbalancer>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! OPTIONS:
//!         --aws-access-key <aws-access-key>          AWS access key [env: AWS_ACCESS_KEY_ID]
//!         --aws-cli <aws-cli>                        The aws command line tool to use [default: aws]
//!         --aws-secret-access <aws-secret-access>    AWS secret key [env: AWS_SECRET_ACCESS_KEY]
//!     -c, --critical <critical>                      Health critical level (in %) [default: 50]
//!         --criticalcount <criticalcount>            Healthy instance count critical level [default: 0]
//!         --fetch-error <fetch-error>
//!             Status to exit with when the load balancer can't be queried [default: critical]  [possible values: ok,
//!             warning, critical, unknown]
//!         --healthy-state <healthy-state>            The instance state that counts as healthy [default: InService]
//!         --loadbalancer <loadbalancer>              AWS Elastic Load Balancer name to be checked
//!         --region <region>                          AWS region name in which load balancer is hosted [default: us-east-1]
//!     -w, --warning <warning>                        Health warning level (in %) [default: 99]
//!         --warningcount <warningcount>              Healthy instance count warning level [default: 1]
//! ```
//!
//! # check-docker-containers
//!
//! Requires the `docker` command line tool and access to the docker daemon.
//!
//! ```plain
//! $ check-docker-containers --help
//! check-docker-containers (part of nrpe-plugins) 0.1.0
//! Check that at least one container is running a given docker image.
//!
//! Any tag of the image counts. Reports how many are running and when the newest one started.
//!
//! USAGE:
//!     check-docker-containers [OPTIONS] --image-name <image-name>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! OPTIONS:
//!         --docker <docker>                The docker command line tool to use [default: docker]
//!         --docker-error <docker-error>
//!             Status to exit with when docker can't be queried [default: critical]  [possible values: ok, warning,
//!             critical, unknown]
//!         --image-name <image-name>        Docker image name, without a tag
//! ```
//!
//! # check-urls
//!
//! Cross platform, only requires network access to the urls.
//!
//! ```plain
//! $ check-urls --help
//! check-urls (part of nrpe-plugins) 0.1.0
//! Check that every URL in a comma separated list answers a GET with a 200.
//!
//! Network errors are retried. A URL that never answers, or answers with anything but 200, is critical. Errors that a
//! retry recovered from are a warning.
//!
//! USAGE:
//!     check-urls [OPTIONS]
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! OPTIONS:
//!     -H, --hostnames <hostnames>    URLs separated by comma to be tested
//!     -t, --timeout <timeout>        Timeout for http connection in seconds [default: 5]
//! ```
//!
//! # notify-ses
//!
//! Not a check: a notification command. Requires the `aws` command line tool.
//!
//! ```plain
//! $ notify-ses --help
//! notify-ses (part of nrpe-plugins) 0.1.0
//! Send email notifications using Amazon SES.
//!
//! Regions are tried in random order until one accepts the email.
//!
//! USAGE:
//!     notify-ses [OPTIONS] --notification-for <notification-for>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! OPTIONS:
//!         --attempt-no <attempt-no>                      Host/service check attempt number
//!         --aws-access-key-id <aws-access-key-id>        AWS access key [env: AWS_ACCESS_KEY_ID]
//!         --aws-cli <aws-cli>                            The aws command line tool to use [default: aws]
//!         --aws-region <aws-region>
//!             Comma separated AWS region names to send through. One is picked at random, the others are used on
//!             failure. [default: us-east-1]
//!         --aws-secret-access-key <aws-secret-access-key>    AWS secret key [env: AWS_SECRET_ACCESS_KEY]
//!         --duration <duration>                          Duration of current state
//!         --from-address <from-address>                  From email address
//!         --full-message <full-message>                  Host/service check full output
//!         --host-address <host-address>                  Host address
//!         --host-alias <host-alias>                      Host alias
//!         --host-group <host-group>                      Hostgroup name
//!         --host-group-names <host-group-names>          Current host hostgroup names
//!         --host-name <host-name>                        Host Name
//!         --host-private-address <host-private-address>  Host private ip, if configured
//!         --last-check <last-check>                      Last check epoch timestamp
//!         --long-date-time <long-date-time>              Date time in long format
//!         --max-attempt <max-attempt>                    Max check attempt
//!         --message <message>                            First line of check output
//!         --notification-for <notification-for>          host or service
//!         --notification-type <notification-type>        Notification type
//!         --percent-changes <percent-changes>            Percent change indicating state change frequency
//!         --reply-to <reply-to>                          reply-to email address
//!         --scheduled-downtime <scheduled-downtime>      A number indicating the depth of current downtime
//!         --service-name <service-name>                  Service check name
//!         --state <state>                                Current state/status
//!         --state-type <state-type>                      Hard or Soft state
//!         --to <to>                                      To email address, comma separated for several
//! ```
