// # zoneup - hosted-zone DNS updater CLI
//
// This binary is a thin integration layer: it parses arguments into an
// immutable run configuration, initializes logging and the runtime, wires
// the Route53 provider and the getifaddrs source into the core updater,
// and maps the outcome to an exit code. All reconciliation logic lives in
// zoneup-core.
//
// ## Example
//
// ```bash
// # Publish eth0's public IPv4 and IPv6 addresses for this host's name
// zoneup -4 eth0 -6 eth0 Z1D633PJN98FT9
//
// # Explicit record name, shorter TTL, fire and forget
// zoneup -4 wan0 -d host.example.com. -t 120 --no-wait Z1D633PJN98FT9
// ```
//
// Exit codes: 0 on success (including "no update needed"), 1 on usage
// errors, discovery or provider failures, and propagation timeouts.

use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use zoneup_core::{Error, Result, RunOutcome, UpdateConfig, Updater};
use zoneup_ip_ifaddrs::IfAddrsSource;
use zoneup_provider_route53::Route53Provider;

/// Update hosted-zone DNS records with this host's public addresses
#[derive(Parser, Debug)]
#[command(name = "zoneup", version, about, long_about = None)]
struct Cli {
    /// Hosted zone identifier (e.g. Z1D633PJN98FT9)
    #[arg(value_name = "ZONE_ID")]
    zone_id: String,

    /// Record name to manage (defaults to this host's name)
    #[arg(short = 'd', long = "domain", value_name = "NAME")]
    domain: Option<String>,

    /// Interface to check for public IPv4 addresses (repeatable)
    #[arg(short = '4', long = "iface4", value_name = "IFACE")]
    iface4: Vec<String>,

    /// Interface to check for public IPv6 addresses (repeatable)
    #[arg(short = '6', long = "iface6", value_name = "IFACE")]
    iface6: Vec<String>,

    /// Record TTL in seconds
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        default_value_t = 300,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    ttl: i64,

    /// Do not create the record when it does not exist
    #[arg(long = "no-create")]
    no_create: bool,

    /// Do not wait for the change to propagate
    #[arg(long = "no-wait")]
    no_wait: bool,

    /// Propagation status checks before giving up
    #[arg(long = "wait-attempts", value_name = "N", default_value_t = 6)]
    wait_attempts: u32,

    /// Seconds between propagation status checks
    #[arg(long = "wait-interval", value_name = "SECONDS", default_value_t = 10)]
    wait_interval: u64,

    /// Provider region override
    #[arg(long, value_name = "REGION")]
    region: Option<String>,

    /// Log intended changes without submitting them
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Build the immutable run configuration
    fn build_config(&self) -> Result<UpdateConfig> {
        let domain = match &self.domain {
            Some(domain) => domain.clone(),
            None => hostname::get()
                .map_err(|e| Error::config(format!("cannot determine this host's name: {e}")))?
                .to_string_lossy()
                .into_owned(),
        };

        let mut config = UpdateConfig::new(&self.zone_id, domain)
            .with_v4_interfaces(self.iface4.iter().cloned())
            .with_v6_interfaces(self.iface6.iter().cloned())
            .with_ttl(self.ttl)
            .with_create_missing(!self.no_create)
            .with_wait_for_sync(!self.no_wait);
        config.max_poll_attempts = self.wait_attempts;
        config.poll_interval_secs = self.wait_interval;
        config.dry_run = self.dry_run;
        Ok(config)
    }
}

fn main() -> ExitCode {
    // Parse arguments; any usage problem exits 1, help/version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("zoneup: failed to set tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    rt.block_on(async {
        match run(cli).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err @ Error::PropagationTimeout { .. }) => {
                // Distinct from a submission failure: the change was
                // made, only confirmation timed out.
                eprintln!("zoneup: {err}");
                ExitCode::FAILURE
            }
            Err(Error::Usage(msg)) => {
                eprintln!("zoneup: {msg}");
                eprintln!("Try 'zoneup --help' for more information.");
                ExitCode::FAILURE
            }
            Err(err) => {
                eprintln!("zoneup: {err}");
                ExitCode::FAILURE
            }
        }
    })
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.build_config()?;

    // Usage problems must fail before any network client exists
    config.validate()?;

    if config.dry_run {
        info!("dry-run mode: no changes will be submitted");
    }

    let provider = Route53Provider::from_env(cli.region.clone(), config.dry_run).await;
    let updater = Updater::new(Box::new(provider), Box::new(IfAddrsSource::new()), config)?;

    match updater.run().await? {
        RunOutcome::NoChange => {
            info!("records already current; no update needed");
        }
        RunOutcome::Submitted {
            change_id,
            synced: true,
        } => {
            info!("change {change_id} applied and in sync");
        }
        RunOutcome::Submitted {
            change_id,
            synced: false,
        } => {
            info!("change {change_id} submitted; propagation not awaited");
        }
    }

    Ok(())
}
