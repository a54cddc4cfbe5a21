use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;
use txy_core::units::ATMOSPHERE_PA;
use txy_diagram::{DiagramResult, TxyData, TxyFigure, TxyRequest, load_yaml, save_yaml};
use txy_solver::SolverConfig;
use txy_thermo::Species;

#[derive(Parser)]
#[command(name = "txy-cli")]
#[command(about = "T-x-y diagrams for binary mixtures at fixed pressure", long_about = None)]
struct Cli {
    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a diagram from a request YAML file
    Run {
        /// Path to the request YAML file
        request_path: PathBuf,
        /// Write the sweep data as JSON
        #[arg(long)]
        data_out: Option<PathBuf>,
    },
    /// Build a diagram for a pair given on the command line
    Sweep {
        /// Component on the x axis
        component_1: String,
        /// Second component of the pair
        component_2: String,
        /// System pressure in Pa
        #[arg(long, default_value_t = ATMOSPHERE_PA)]
        pressure_pa: f64,
        /// Number of sweep points
        #[arg(long, default_value_t = 21)]
        points: usize,
        /// Full model component list, comma separated
        #[arg(long, value_delimiter = ',')]
        components: Option<Vec<String>>,
        /// Solver convergence tolerance
        #[arg(long, default_value_t = SolverConfig::DEFAULT_TOLERANCE)]
        tolerance: f64,
        /// Save the figure to <FIGURE>.png
        #[arg(long)]
        figure: Option<String>,
        /// Omit the legend
        #[arg(long)]
        no_legend: bool,
        /// Show the pressure in legend labels
        #[arg(long)]
        include_pressure: bool,
        /// Write the sweep data as JSON
        #[arg(long)]
        data_out: Option<PathBuf>,
        /// Save the assembled request as YAML
        #[arg(long)]
        save_request: Option<PathBuf>,
    },
    /// List available species
    Species,
}

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> DiagramResult<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose, cli.quiet))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            request_path,
            data_out,
        } => cmd_run(&request_path, data_out.as_deref()),
        Commands::Sweep {
            component_1,
            component_2,
            pressure_pa,
            points,
            components,
            tolerance,
            figure,
            no_legend,
            include_pressure,
            data_out,
            save_request,
        } => {
            let mut request = TxyRequest {
                component_1,
                component_2,
                pressure_pa,
                num_points: points,
                components,
                solver: SolverConfig::with_tolerance(tolerance),
                diagram: Default::default(),
            };
            request.diagram.figure_name = figure;
            request.diagram.print_legend = !no_legend;
            request.diagram.include_pressure = include_pressure;

            if let Some(path) = save_request.as_deref() {
                save_yaml(path, &request)?;
                println!("Request saved to {}", path.display());
            }
            cmd_sweep(&request, data_out.as_deref())
        }
        Commands::Species => {
            cmd_species();
            Ok(())
        }
    }
}

fn cmd_run(request_path: &Path, data_out: Option<&Path>) -> DiagramResult<()> {
    println!("Loading request: {}", request_path.display());
    let request = load_yaml(request_path)?;
    cmd_sweep(&request, data_out)
}

fn cmd_sweep(request: &TxyRequest, data_out: Option<&Path>) -> DiagramResult<()> {
    println!(
        "Sweeping {}-{} at {} Pa ({} points)",
        request.component_1, request.component_2, request.pressure_pa, request.num_points
    );
    let (data, figure) = txy_diagram::txy_diagram(request)?;

    print_summary(request, &data, &figure);

    if let Some(path) = data_out {
        data.save_json(path)?;
        println!("  Data: {}", path.display());
    }
    Ok(())
}

fn print_summary(request: &TxyRequest, data: &TxyData, figure: &TxyFigure) {
    println!(
        "✓ {} of {} points converged",
        data.len(),
        request.num_points
    );
    if let Some((t_min, t_max)) = data.temperature_range() {
        println!(
            "  Temperature range: {:.2} - {:.2} {}",
            t_min, t_max, data.temperature_unit
        );
    }

    println!(
        "  {:>8}  {:>12}  {:>12}",
        "x", "T bubble", "T dew"
    );
    for ((x, tb), td) in data
        .composition_sequence()
        .iter()
        .zip(data.bubble_temperature_sequence())
        .zip(data.dew_temperature_sequence())
    {
        println!("  {:>8.4}  {:>12.3}  {:>12.3}", x, tb, td);
    }

    match &figure.saved_path {
        Some(path) => println!("  Figure: {}", path.display()),
        None => println!("  Figure rendered in memory ({}x{})", figure.width, figure.height),
    }
}

fn cmd_species() {
    println!("Available species:");
    for species in Species::ALL {
        println!(
            "  {:<10} {:<10} M = {:.3} kg/kmol",
            species.key(),
            species.display_name(),
            species.molar_mass()
        );
    }
}
