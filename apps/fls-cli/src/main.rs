use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fls_app::{
    AppResult, ClientSettings, HttpSimulationService, Session, SimulationService, query,
};
use fls_params::{ChannelWidth, ParameterModel, PhyType, PropagationModel, SimulationConfig};

#[derive(Parser)]
#[command(name = "fls-cli")]
#[command(about = "FLS CLI - Wireless network simulation front end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a simulation run and wait for its throughput series
    Run {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        service: ServiceArgs,
        /// Write the throughput series as CSV to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that the simulation service is reachable
    Health {
        #[command(flatten)]
        service: ServiceArgs,
    },
    /// Validate a simulation config file
    Validate {
        /// Path to a YAML or JSON config file
        config_path: PathBuf,
    },
    /// Print or write the default simulation config
    Defaults {
        /// Output file (YAML or JSON by extension); defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List accepted values for the enumerated parameters
    Options,
}

#[derive(Args)]
struct ParamArgs {
    /// Start from this config file instead of the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Radio type (wifi, ble, zigbee)
    #[arg(long)]
    phy: Option<String>,
    /// Number of nodes [2, 50]
    #[arg(long)]
    nodes: Option<u32>,
    /// Simulated time in seconds [1, 30]
    #[arg(long)]
    time: Option<u32>,
    /// Transmit power in dBm [0, 30]
    #[arg(long, allow_negative_numbers = true)]
    tx_power: Option<i32>,
    /// Frequency in GHz [2.4, 6.0], 0.1 steps
    #[arg(long)]
    frequency: Option<f64>,
    /// Channel width in MHz (20, 40, ..., 160)
    #[arg(long)]
    channel_width: Option<u32>,
    /// Propagation loss model, bare or ns-3 class name
    #[arg(long)]
    propagation_model: Option<String>,
}

#[derive(Args)]
struct ServiceArgs {
    /// Client settings YAML file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Simulation service base URL (overrides settings)
    #[arg(long)]
    endpoint: Option<String>,
    /// HTTP timeout in seconds (overrides settings)
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            params,
            service,
            output,
        } => cmd_run(&params, &service, output.as_deref()),
        Commands::Health { service } => cmd_health(&service),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Defaults { output } => cmd_defaults(output.as_deref()),
        Commands::Options => {
            cmd_options();
            Ok(())
        }
    }
}

fn load_settings(args: &ServiceArgs) -> AppResult<ClientSettings> {
    let mut settings = match &args.settings {
        Some(path) => ClientSettings::load(path)?,
        None => ClientSettings::default(),
    };
    if let Some(endpoint) = &args.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(timeout) = args.timeout {
        settings.request_timeout_s = timeout;
    }
    settings.validate()?;
    Ok(settings)
}

/// Apply file and flag values through the validated setters.
fn build_params(args: &ParamArgs) -> AppResult<ParameterModel> {
    let mut model = match &args.config {
        Some(path) => ParameterModel::from_config(fls_params::load_config(path)?)?,
        None => ParameterModel::new(),
    };

    if let Some(phy) = &args.phy {
        model.set_phy_type_str(phy)?;
    }
    if let Some(nodes) = args.nodes {
        model.set_node_count(nodes)?;
    }
    if let Some(time) = args.time {
        model.set_simulation_time(time)?;
    }
    if let Some(dbm) = args.tx_power {
        model.set_tx_power(dbm)?;
    }
    if let Some(ghz) = args.frequency {
        model.set_frequency(ghz)?;
    }
    if let Some(mhz) = args.channel_width {
        model.set_channel_width(mhz)?;
    }
    if let Some(name) = &args.propagation_model {
        model.set_propagation_model_str(name)?;
    }
    Ok(model)
}

fn print_config(config: &SimulationConfig) {
    println!("  PHY type:          {}", config.phy_type.display_name());
    println!("  Nodes:             {}", config.node_count);
    println!("  Simulation time:   {} s", config.simulation_time_s);
    if config.wifi_params_apply() {
        println!("  Tx power:          {} dBm", config.tx_power_dbm);
        println!("  Frequency:         {} GHz", config.frequency_ghz);
        println!("  Channel width:     {}", config.channel_width);
        println!(
            "  Propagation model: {}",
            config.propagation_model.ns3_class_name()
        );
    }
}

fn cmd_run(params: &ParamArgs, service: &ServiceArgs, output: Option<&Path>) -> AppResult<()> {
    let settings = load_settings(service)?;
    let model = build_params(params)?;
    let mut session = Session::connect(&settings)?;
    *session.params_mut() = model;

    println!("Running simulation via {}", settings.endpoint);
    print_config(&session.params().snapshot());

    let ticket = session.run()?;
    tracing::debug!(%ticket, "waiting for run");

    let started = Instant::now();
    while session
        .controller_mut()
        .wait(Duration::from_millis(100))
        .is_running()
    {
        render_cli_progress(started.elapsed().as_secs_f64());
    }
    clear_progress_line();

    session.status().settled()?;
    println!(
        "✓ Simulation completed in {:.1}s",
        started.elapsed().as_secs_f64()
    );

    let series = session.results().series();
    match query::summarize(series) {
        Some(summary) => {
            println!("  Time points: {}", summary.point_count);
            println!(
                "  Time range: {:.3} - {:.3} s",
                summary.time_range.0, summary.time_range.1
            );
            println!("  Mean throughput: {:.3} Mbps", summary.mean_throughput_mbps);
            println!(
                "  Peak throughput: {:.3} Mbps at {:.3} s",
                summary.peak_throughput_mbps, summary.peak_time_s
            );
        }
        None => println!("  No throughput samples returned"),
    }

    if let Some(path) = output {
        std::fs::write(path, query::series_to_csv(series))?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    }

    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(elapsed_s: f64) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((elapsed_s * 10.0) as usize) % spinner.len();
    print!(
        "\r{} Running simulation...  elapsed={:.1}s",
        spinner[spin_idx], elapsed_s
    );
    let _ = io::stdout().flush();
}

fn cmd_health(service: &ServiceArgs) -> AppResult<()> {
    let settings = load_settings(service)?;
    let client = HttpSimulationService::new(&settings)?;
    client.health()?.ensure_healthy()?;
    println!("✓ Simulation service at {} is healthy", client.base_url());
    Ok(())
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = fls_params::load_config(config_path)?;
    ParameterModel::from_config(config)?;
    println!("✓ Config is valid");
    print_config(&config);
    Ok(())
}

fn cmd_defaults(output: Option<&Path>) -> AppResult<()> {
    let config = SimulationConfig::default();
    match output {
        Some(path) => {
            fls_params::save_config(path, &config)?;
            println!("✓ Wrote default config to {}", path.display());
        }
        None => {
            print!("{}", fls_params::to_yaml_string(&config)?);
        }
    }
    Ok(())
}

fn cmd_options() {
    let defaults = ParameterModel::new();
    println!("PHY types:");
    for phy in PhyType::ALL {
        let note = if defaults.is_phy_enabled(phy) {
            ""
        } else {
            " (disabled)"
        };
        println!("  {:<7} {}{}", phy.as_str(), phy.display_name(), note);
    }

    println!("\nPropagation models:");
    for model in PropagationModel::ALL {
        println!("  {:<17} {}", model.as_str(), model.ns3_class_name());
    }

    println!("\nChannel widths (MHz):");
    let widths: Vec<String> = ChannelWidth::ALL
        .iter()
        .map(|w| w.mhz().to_string())
        .collect();
    println!("  {}", widths.join(", "));
}
