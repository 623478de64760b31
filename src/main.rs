use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use cbmq_gateway::banner::{BannerInfo, print_banner};
use cbmq_gateway::config::{GatewayConfig, default_scripts_dir, parse_port};
use cbmq_gateway::consts::{
    DEFAULT_INTERPRETER, DEFAULT_SCRIPT, DEFAULT_TIMEOUT, MAX_OUTPUT_BYTES,
};
use cbmq_gateway::runner::process::{InterpreterRunner, RunnerConfig};
use cbmq_gateway::server::Gateway;
use cbmq_gateway::telemetry;

#[derive(Parser)]
#[command(
    name = "cbmq-gateway",
    version,
    about = "Run interpreter scripts over HTTP and report their output as JSON."
)]
struct Cli {
    /// Port to listen on (falls back to 3000 if missing or not a number)
    port: Option<String>,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Interpreter binary used to run scripts
    #[arg(short, long, default_value = DEFAULT_INTERPRETER)]
    interpreter: String,

    /// Directory holding the scripts (default: ./scripts)
    #[arg(short, long)]
    scripts_dir: Option<PathBuf>,

    /// Script run when a request names none
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    default_script: String,

    /// Script execution timeout in seconds (at least 1)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Captured output beyond this many bytes is truncated
    #[arg(long, default_value_t = MAX_OUTPUT_BYTES)]
    max_output_bytes: usize,

    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    log_json: bool,

    /// Skip the startup banner
    #[arg(long, default_value_t = false)]
    no_banner: bool,
}

impl Cli {
    fn into_config(self) -> GatewayConfig {
        GatewayConfig {
            bind: self.bind,
            port: parse_port(self.port.as_deref()),
            interpreter: self.interpreter,
            scripts_dir: self.scripts_dir.unwrap_or_else(default_scripts_dir),
            default_script: self.default_script,
            timeout: Duration::from_secs(self.timeout),
            max_output_bytes: self.max_output_bytes,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_json)?;

    let show_banner = !cli.no_banner;
    let config = cli.into_config();

    if !config.scripts_dir.is_dir() {
        tracing::warn!(
            scripts_dir = %config.scripts_dir.display(),
            "scripts directory does not exist; every simulation will 404"
        );
    }

    let runner = Arc::new(InterpreterRunner::new(RunnerConfig {
        timeout: config.timeout,
        max_output_bytes: config.max_output_bytes,
    }));
    let gateway = Arc::new(Gateway::new(config, runner));

    // Bind before printing anything so a taken port fails fast
    let listener = gateway.bind().await?;

    if show_banner {
        let config = gateway.config();
        print_banner(&BannerInfo {
            addr: listener.local_addr()?,
            interpreter: &config.interpreter,
            scripts_dir: &config.scripts_dir,
            default_script: &config.default_script,
            timeout: config.timeout,
        });
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("shutdown signal received");
    };

    gateway.serve(listener, shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_consts() {
        let config = Cli::try_parse_from(["cbmq-gateway"]).unwrap().into_config();
        assert_eq!(config.port, 3000);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.interpreter, DEFAULT_INTERPRETER);
        assert_eq!(config.default_script, DEFAULT_SCRIPT);
    }

    #[test]
    fn unparsable_port_falls_back() {
        let config = Cli::try_parse_from(["cbmq-gateway", "not-a-port"])
            .unwrap()
            .into_config();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["cbmq-gateway", "--timeout", "0"]).is_err());
        let config = Cli::try_parse_from(["cbmq-gateway", "-t", "1"])
            .unwrap()
            .into_config();
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
