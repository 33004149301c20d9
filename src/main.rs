use anyhow::{Context, Result};
use rand::SeedableRng;
use shoal::constants::{
    DEFAULT_TICKS, INITIAL_FISH_COUNT, INITIAL_OBSTACLE_COUNT, INITIAL_PREDATOR_COUNT,
};
use shoal::utils::{Population, scatter};
use shoal::{FlockConfig, FlockEngine, SimRng};
use std::{fs, time::Instant};

// Usage: shoal [config.json] [ticks]
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(&path)?,
        None => FlockConfig::default(),
    };
    let ticks = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("invalid tick count {raw:?}"))?,
        None => DEFAULT_TICKS,
    };
    config.validate()?;

    // --- Initial placement ---
    let mut placement_rng = match config.rng_seed {
        Some(seed) => SimRng::seed_from_u64(seed ^ 0x5EED_F15B),
        None => SimRng::from_entropy(),
    };
    let population = Population {
        fish: INITIAL_FISH_COUNT,
        predators: INITIAL_PREDATOR_COUNT,
        obstacles: INITIAL_OBSTACLE_COUNT,
    };
    let lattice = scatter(config.dimension, config.extent, population, &mut placement_rng)?;
    log::info!(
        "Initialized {:?} shoal on {}: {:?}",
        config.dimension,
        config.extent,
        lattice.census()
    );

    let mut engine = FlockEngine::new(config, lattice)?;

    // --- Main Loop ---
    let started = Instant::now();
    for _ in 0..ticks {
        engine.step()?;
        if let Some(report) = engine.last_report() {
            log::info!(
                "Tick {}: fish {}, predators {}, obstacles {} | moved {} fallback {} blocked {}",
                report.tick,
                report.census.agents,
                report.census.predators,
                report.census.obstacles,
                report.agents_direct,
                report.agents_fallback,
                report.agents_blocked
            );
        }
    }
    log::info!(
        "Simulation completed: {} ticks in {:.2?}",
        engine.tick(),
        started.elapsed()
    );
    Ok(())
}

fn load_config(path: &str) -> Result<FlockConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
    let config =
        serde_json::from_str(&raw).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}
