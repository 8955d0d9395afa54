//! Terminal client for the teleportation simulation service.
//!
//! Usage:
//!   teleport-run simulate [--angle 0.78] [--noise 0.0] [--shots 1024] [--step N]
//!   teleport-run noise [--angle 0.78]
//!
//! The service URL comes from `--base-url` or `TELEPORT_BASE_URL`.
//! Set `RUST_LOG=debug` to trace requests.

use std::process;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use teleport_ui::chart::{ascii_histogram, noise_rows, percent};
use teleport_ui::client::{ClientConfig, DEFAULT_BASE_URL, ServiceClient};
use teleport_ui::controller::alert_message;
use teleport_ui::params::{DEFAULT_NOISE_LEVEL, DEFAULT_PSI_ANGLE, DEFAULT_SHOTS};
use teleport_ui::{
    ControlParams, Endpoint, StepNavigator, angle_label, measurement_bars, noise_label,
};
use tracing_subscriber::EnvFilter;

const HISTOGRAM_WIDTH: usize = 40;

#[derive(Parser)]
#[command(
    name = "teleport-run",
    about = "Run the quantum teleportation demo against a simulation service"
)]
struct Cli {
    /// Base URL of the simulation service.
    #[arg(long, global = true, env = "TELEPORT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Teleport one state and print the walkthrough and measurement results.
    Simulate {
        /// RY angle of the state to teleport, in radians.
        #[arg(long, default_value_t = DEFAULT_PSI_ANGLE)]
        angle: f64,

        /// Noise level applied by the service (0.0 to 0.5).
        #[arg(long, default_value_t = DEFAULT_NOISE_LEVEL)]
        noise: f64,

        /// Number of measurement shots.
        #[arg(long, default_value_t = DEFAULT_SHOTS, value_parser = clap::value_parser!(u32).range(1..))]
        shots: u32,

        /// Print only this step (1-based). Prints every step when omitted.
        #[arg(long)]
        step: Option<usize>,
    },
    /// Sweep noise levels and print the fidelity curve.
    Noise {
        /// RY angle of the state to teleport, in radians.
        #[arg(long, default_value_t = DEFAULT_PSI_ANGLE)]
        angle: f64,
    },
}

fn print_step(steps: &StepNavigator) {
    println!("{}", steps.counter_label());
    println!("{}", steps.description());
    println!("{}", steps.circuit());
}

fn run_simulate(
    client: &ServiceClient,
    params: ControlParams,
    only_step: Option<usize>,
) -> Result<()> {
    println!(
        "Teleporting |ψ⟩ with θ = {}, noise {}, {} shots",
        angle_label(params.psi_angle),
        noise_label(params.noise_level),
        params.shots
    );

    let resp = client
        .simulate(&params)
        .map_err(|e| anyhow!(alert_message(Endpoint::Simulate, &e)))?;

    let mut steps = StepNavigator::new();
    steps.load(resp.step_descriptions.clone(), resp.step_circuits.clone());

    match only_step {
        Some(n) => {
            if n == 0 || n > steps.total() {
                bail!("step must be between 1 and {}", steps.total());
            }
            for _ in 1..n {
                steps.next();
            }
            print_step(&steps);
        }
        None => loop {
            print_step(&steps);
            if !steps.next() {
                break;
            }
            println!();
        },
    }

    let bars = measurement_bars(&resp.counts, &resp.measurement_probabilities);
    println!();
    println!("Measurement outcomes (q2 q1 q0):");
    println!("{}", ascii_histogram(&bars, HISTOGRAM_WIDTH));
    println!();
    println!("Fidelity: {}", percent(resp.fidelity));
    println!("Noise:    {}", percent(resp.noise_level));
    Ok(())
}

fn run_noise(client: &ServiceClient, angle: f64) -> Result<()> {
    let resp = client
        .noise_analysis(angle)
        .map_err(|e| anyhow!(alert_message(Endpoint::NoiseAnalysis, &e)))?;

    println!("Fidelity vs noise for θ = {}", angle_label(angle));
    println!("{:>8}  {:>8}", "noise", "fidelity");
    for (noise, fidelity) in noise_rows(&resp.noise_levels, &resp.fidelities) {
        println!("{:>8}  {:>8}", noise, fidelity);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let client = ServiceClient::new(ClientConfig {
        base_url: cli.base_url,
    })?;
    tracing::debug!(base_url = %client.config().base_url, "service client ready");

    match cli.command {
        Commands::Simulate {
            angle,
            noise,
            shots,
            step,
        } => {
            let params = ControlParams {
                psi_angle: angle,
                noise_level: noise,
                shots,
            };
            run_simulate(&client, params, step)
        }
        Commands::Noise { angle } => run_noise(&client, angle),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
