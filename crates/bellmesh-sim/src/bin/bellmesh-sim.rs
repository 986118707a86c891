//! Bellmesh Simulation Runner
//!
//! Lay out a random mesh, sweep it, and optionally dump the final snapshot.
//!
//! Usage: `bellmesh-sim [ticks] [snapshot.json]`

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

use bellmesh_sim::{Simulation, SimulationConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bellmesh_sim=info,bellmesh_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();

    let ticks: u64 = match args.get(1) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| format!("invalid tick count {:?}: {}", raw, e))?,
        None => 200,
    };
    let snapshot_path = args.get(2);

    let config = SimulationConfig::from_env()?;

    println!("Bellmesh Routing Simulation");
    println!("===========================");
    println!();
    println!(
        "Surface {}x{}, seed {}, {:?} sweeps",
        config.layout.width, config.layout.height, config.seed, config.discipline
    );

    let mut sim = Simulation::new(config)?;
    println!("Laid out {} nodes", sim.node_count());

    let mut event_total = sim.take_events().len();

    for tick in 1..=ticks {
        let report = sim.advance();
        event_total += sim.take_events().len();
        if tick % 50 == 0 {
            println!(
                "  tick {:>5}: {} routed, {} unrouted, {} route changes",
                report.tick, report.routed, report.unrouted, report.route_changes
            );
        }
    }

    let stats = sim.reachability()?;
    println!();
    println!("Simulation complete:");
    println!("  Ticks: {}", sim.network().tick());
    println!("  Events: {}", event_total);
    println!("  Reaching a gateway: {}", stats.reached);
    println!("  Without a route: {}", stats.no_route);
    println!("  In a routing loop: {}", stats.looped);
    println!("  Mean hops: {:.2}", stats.mean_hops);

    if let Some(path) = snapshot_path {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &sim.snapshot())?;
        writer.flush()?;
        println!("  Snapshot written to {}", path);
    }

    Ok(())
}
