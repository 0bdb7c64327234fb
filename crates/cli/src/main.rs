mod scenario;

use crate::scenario::Scenario;
use anyhow::{anyhow, Context};
use broadside::{
    timed, Battle, Direction, OffsetPoint, SpatialRelation, TurnReport,
};
use config::{Config, File};
use log::{info, LevelFilter};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::{
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for running naval battle scenarios through the Broadside engine.
#[derive(Debug, StructOpt)]
#[structopt(name = "broadside")]
struct Opt {
    /// Path to a scenario file that defines the map, the vessels and the
    /// engine config. Supported formats: JSON, TOML
    #[structopt(short, long)]
    scenario: PathBuf,

    /// Number of turns to run. Overrides the turn count in the scenario.
    #[structopt(short, long)]
    turns: Option<u32>,

    /// How to print the state of each vessel after every turn. Supported
    /// formats:
    ///
    /// text - One human-readable line per vessel
    ///
    /// json - One JSON object per vessel per line
    #[structopt(short = "f", long, default_value = "text")]
    format: OutputFormat,

    /// Print the full engine config, with every default filled in, as TOML
    /// before running
    #[structopt(long)]
    print_config: bool,

    /// The logging level to use while resolving turns. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    Text,
    Json,
}

/// One vessel's state at the end of a turn
#[derive(Debug, Serialize)]
struct VesselSummary<'a> {
    turn: u32,
    name: &'a str,
    position: OffsetPoint,
    facing: Direction,
    speed: i32,
    momentum: i32,
    visible: usize,
    relations: Vec<(&'a str, SpatialRelation)>,
}

fn load_scenario(scenario_path: &Path) -> anyhow::Result<Scenario> {
    let mut settings = Config::new();
    let scenario_path = scenario_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", scenario_path)
    })?;
    settings
        .merge(File::with_name(scenario_path))
        .context("error reading scenario file")?;
    settings.try_into().context("error reading scenario")
}

fn summarize(battle: &Battle) -> anyhow::Result<Vec<VesselSummary<'_>>> {
    battle
        .vessels()
        .map(|vessel| {
            Ok(VesselSummary {
                turn: battle.turn(),
                name: vessel.name(),
                position: vessel.position(),
                facing: vessel.facing(),
                speed: vessel.speed(),
                momentum: vessel
                    .mobility()
                    .map(|mobility| mobility.momentum())
                    .unwrap_or(0),
                visible: vessel.visibility().len(),
                relations: battle.relations(vessel.name())?,
            })
        })
        .collect()
}

fn print_state(battle: &Battle, format: OutputFormat) -> anyhow::Result<()> {
    for summary in summarize(battle)? {
        match format {
            OutputFormat::Text => {
                let relations = summary
                    .relations
                    .iter()
                    .map(|(name, relation)| {
                        format!(
                            "{} {} heading {:?}",
                            name, relation.zone, relation.relative_direction
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "turn {:>3} | {:<12} {} facing {:?} speed {} momentum {} \
                    sees {} | {}",
                    summary.turn,
                    summary.name,
                    summary.position,
                    summary.facing,
                    summary.speed,
                    summary.momentum,
                    summary.visible,
                    relations
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&summary)?);
            }
        }
    }
    Ok(())
}

fn log_report(report: &TurnReport) {
    if report.wind_changed {
        info!("Wind shifted to {:?}", report.wind);
    }
    for (name, movement) in &report.movements {
        if movement.aground {
            info!("{} ran aground after {} hexes", name, movement.hexes);
        }
    }
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let scenario = load_scenario(&opt.scenario)?;
    info!("Loaded scenario from {:?}", &opt.scenario);
    if opt.print_config {
        println!("{}", toml::to_string_pretty(&scenario.engine)?);
    }

    let turns = opt.turns.unwrap_or(scenario.turns);
    let mut rng = Pcg64::seed_from_u64(scenario.seed.to_u64());
    let mut battle = scenario.build()?;
    print_state(&battle, opt.format)?;

    timed!(format!("Running {} turns", turns), log::Level::Info, {
        for _ in 0..turns {
            let report = battle.resolve_turn(&mut rng)?;
            log_report(&report);
            print_state(&battle, opt.format)?;
        }
    });

    info!(
        "{} of {} hexes have been seen",
        battle.map().seen_count(),
        battle.map().tiles().len()
    );
    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
