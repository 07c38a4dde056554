//! Esterification simulator CLI
//!
//! Runs classroom scenarios headless, checks the conservation laws every
//! frame, and optionally records frames to JSON for a viewer.

use clap::Parser;
use esterify_core::Species;
use esterify_sim::scenarios::{ScenarioId, ScenarioSetup};
use esterify_sim::{ScenarioResult, ScenarioRunner};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Esterification particle simulator
#[derive(Parser, Debug)]
#[command(name = "esterify-sim")]
#[command(about = "Run the acid + alcohol -> ester + water particle simulation", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Scenario to run (classroom, heated, diagnostic, crowded, equimolar, all)
    #[arg(short = 'S', long, default_value = "all")]
    scenario: String,

    /// Simulated duration in seconds
    #[arg(short, long, default_value = "30")]
    duration: f64,

    /// Frames per simulated second
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..))]
    frame_rate: u32,

    /// Override the acid count
    #[arg(long)]
    acid: Option<usize>,

    /// Override the alcohol count
    #[arg(long)]
    alcohol: Option<usize>,

    /// Override the temperature level (1-5)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    temperature: Option<u8>,

    /// Force the diagnostic motion preset on
    #[arg(long)]
    diagnostic: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Export recorded frames to a JSON file
    #[arg(long)]
    export: Option<String>,

    /// Record every n-th frame when exporting
    #[arg(long, default_value = "6")]
    export_every: u64,
}

impl Args {
    /// Applies the population overrides to a scenario's setup.
    fn setup_for(&self, scenario: ScenarioId) -> ScenarioSetup {
        let mut setup = scenario.setup();
        if let Some(acid) = self.acid {
            setup.population.acid = acid;
        }
        if let Some(alcohol) = self.alcohol {
            setup.population.alcohol = alcohol;
        }
        if let Some(temperature) = self.temperature {
            setup.population.temperature = temperature;
        }
        setup.diagnostic |= self.diagnostic;
        setup
    }
}

fn report(result: &ScenarioResult) {
    if result.passed {
        info!(
            "✓ {} (seed={}) PASSED | reactions={} conversion={:.0}%",
            result.scenario,
            result.seed,
            result.reactions,
            result.conversion * 100.0
        );
        for species in Species::ALL {
            info!("    {:<18} {}", species.compound(), result.final_counts.get(species));
        }
    } else {
        error!(
            "✗ {} (seed={}) FAILED: {}",
            result.scenario,
            result.seed,
            result.failure_reason.as_deref().unwrap_or("unknown")
        );
    }
    if result.spawn_shortfall > 0 {
        info!("  {} molecules did not fit the start regions", result.spawn_shortfall);
    }
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if !args.json {
        info!("Esterification Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let scenarios: Vec<ScenarioId> = if args.scenario == "all" {
        ScenarioId::all()
    } else {
        vec![args.scenario.parse().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            eprintln!("Available scenarios: classroom, heated, diagnostic, crowded, equimolar, all");
            std::process::exit(1);
        })]
    };

    let seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    } else {
        args.seed
    };

    let runner = ScenarioRunner::new(seed)
        .with_frame_rate(args.frame_rate)
        .with_duration(args.duration);

    if let Some(export_path) = &args.export {
        if scenarios.len() > 1 {
            eprintln!("Error: --export only supports a single scenario, not 'all'");
            std::process::exit(1);
        }
        let scenario = scenarios[0];

        info!("Running with export to: {}", export_path);
        let outcome = runner
            .run_with_export(scenario.name(), args.setup_for(scenario), args.export_every)
            .and_then(|(result, export)| {
                export.write_to_file(export_path)?;
                info!("Exported {} frames to {}", export.frames.len(), export_path);
                Ok(result)
            });

        match outcome {
            Ok(result) => {
                report(&result);
                if !result.passed {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                error!("{} could not run: {}", scenario.name(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut all_results: Vec<ScenarioResult> = Vec::new();
    let mut failed_count = 0;

    for scenario in &scenarios {
        match runner.run_setup(scenario.name(), args.setup_for(*scenario)) {
            Ok(result) => {
                if !args.json {
                    report(&result);
                }
                if !result.passed {
                    failed_count += 1;
                }
                all_results.push(result);
            }
            Err(e) => {
                error!("{} could not run: {}", scenario.name(), e);
                failed_count += 1;
            }
        }
    }

    let total = scenarios.len();
    let passed = total - failed_count;

    if args.json {
        let summary = serde_json::json!({
            "seed": seed,
            "total": total,
            "passed": passed,
            "failed": failed_count,
            "results": all_results,
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => error!("Failed to encode summary: {}", e),
        }
    } else {
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if failed_count == 0 {
            info!("✅ All {} scenario runs passed!", total);
        } else {
            error!("❌ {}/{} scenario runs failed!", failed_count, total);
        }
    }

    // Exit with proper code for CI
    if failed_count > 0 {
        std::process::exit(1);
    }
}
