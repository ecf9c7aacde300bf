use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use epi_model::{Compartments, Parameters, Variant};
use epi_sim::{
    DEFAULT_HORIZON, DEFAULT_SAMPLES, IntegratorType, SimulationRequest, SimulationResult,
    simulate, uniform_grid,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "epi-cli")]
#[command(about = "Epiflow CLI - compartmental epidemic model simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List model variants and which inputs each one uses
    Variants,
    /// Run a simulation and export the trajectories as CSV
    Run {
        /// Model variant: SIR, SIS, SIRS, SEIR, SEIS or SEIRS
        #[arg(long, default_value = "SEIRS")]
        variant: String,
        /// Transmission rate (beta)
        #[arg(long, default_value_t = 0.4)]
        beta: f64,
        /// Latency rate (sigma); ignored by variants that zero it
        #[arg(long, default_value_t = 0.2)]
        sigma: f64,
        /// Recovery rate (gamma)
        #[arg(long, default_value_t = 0.1)]
        gamma: f64,
        /// Vaccination rate (nu)
        #[arg(long, default_value_t = 0.05)]
        nu: f64,
        /// Initial susceptible proportion
        #[arg(long, default_value_t = 0.99)]
        s0: f64,
        /// Initial exposed proportion; ignored by variants that zero it
        #[arg(long, default_value_t = 0.0)]
        e0: f64,
        /// Initial infected proportion
        #[arg(long, default_value_t = 0.01)]
        i0: f64,
        /// Initial recovered proportion; ignored by variants that zero it
        #[arg(long, default_value_t = 0.0)]
        r0: f64,
        /// Simulation horizon in time units
        #[arg(long, default_value_t = DEFAULT_HORIZON)]
        horizon: f64,
        /// Number of uniformly spaced samples
        #[arg(long, default_value_t = DEFAULT_SAMPLES)]
        samples: usize,
        /// Use fixed-step RK4 instead of the adaptive integrator
        #[arg(long)]
        rk4: bool,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Variants => cmd_variants(),
        Commands::Run {
            variant,
            beta,
            sigma,
            gamma,
            nu,
            s0,
            e0,
            i0,
            r0,
            horizon,
            samples,
            rk4,
            output,
        } => cmd_run(
            &variant,
            Parameters::new(beta, sigma, gamma, nu),
            Compartments::new(s0, e0, i0, r0),
            horizon,
            samples,
            rk4,
            output.as_deref(),
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_variants() -> CliResult<()> {
    println!("Model variants:");
    for variant in Variant::ALL {
        let mut inputs = vec!["beta", "gamma", "nu", "S0", "I0"];
        if variant.uses_latency_rate() {
            inputs.insert(1, "sigma");
        }
        if variant.uses_initial_exposed() {
            inputs.push("E0");
        }
        if variant.uses_initial_recovered() {
            inputs.push("R0");
        }
        println!("  {:<5} uses: {}", variant.tag(), inputs.join(", "));
    }
    Ok(())
}

fn cmd_run(
    variant_tag: &str,
    params: Parameters,
    initial: Compartments,
    horizon: f64,
    samples: usize,
    rk4: bool,
    output: Option<&Path>,
) -> CliResult<()> {
    let variant: Variant = variant_tag.parse()?;
    let grid = uniform_grid(0.0, horizon, samples)?;

    let mut request = SimulationRequest::new(variant, params, initial, grid);
    if rk4 {
        request.options.integrator = IntegratorType::Rk4;
    }

    let result = simulate(&request)?;
    let csv = render_csv(variant, &result);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} samples to {}", result.len(), path.display());
    } else {
        print!("{csv}");
    }

    Ok(())
}

/// Build the CSV body. The exposed column is included only for variants
/// that display an Exposed compartment, matching the reference plots.
fn render_csv(variant: Variant, result: &SimulationResult) -> String {
    let with_exposed = variant.shows_exposed();

    let mut csv = String::from(if with_exposed {
        "time,susceptible,exposed,infected,recovered\n"
    } else {
        "time,susceptible,infected,recovered\n"
    });

    for idx in 0..result.len() {
        if with_exposed {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                result.times[idx],
                result.susceptible[idx],
                result.exposed[idx],
                result.infected[idx],
                result.recovered[idx]
            ));
        } else {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                result.times[idx],
                result.susceptible[idx],
                result.infected[idx],
                result.recovered[idx]
            ));
        }
    }
    csv
}
