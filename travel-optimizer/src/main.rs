use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use travel_optimizer::batch::{BatchConfig, solve_batch, solve_batch_concurrent};
use travel_optimizer::cache::{CacheConfig, PlanCache};
use travel_optimizer::planner::{FinalizeKey, ScheduleGraph, SearchConfig};
use travel_optimizer::tables::{TableError, read_requests, read_schedules, write_results};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Schedule table: source,destination,mode,departureTime,arrivalTime,cost
    #[arg(short, long)]
    schedules: PathBuf,

    /// Request table: requestId,customerName,source,destination,criteria
    #[arg(short, long)]
    requests: PathBuf,

    /// Where to write the JSON results (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of requests solved at once (1 solves them in order)
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// What finalized search states are keyed on: location-and-arrival or location
    #[arg(long, default_value_t = FinalizeKey::LocationAndArrival)]
    finalize: FinalizeKey,

    /// Maximum number of legs per itinerary
    #[arg(long)]
    max_hops: Option<usize>,

    /// Number of schedules kept for repeated requests (0 disables the cache)
    #[arg(long, default_value_t = CacheConfig::default().max_capacity)]
    cache_capacity: u64,

    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Travel optimizer failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), TableError> {
    let legs = read_schedules(&cli.schedules)?;
    let records = read_requests(&cli.requests)?;

    let graph = ScheduleGraph::from_legs(legs);
    info!(
        legs = graph.leg_count(),
        origins = graph.location_count(),
        "Schedule graph ready"
    );

    let search_config = SearchConfig::new(cli.finalize, cli.max_hops);
    let cache = (cli.cache_capacity > 0).then(|| {
        PlanCache::new(&CacheConfig {
            max_capacity: cli.cache_capacity,
        })
    });

    let results = if cli.workers <= 1 {
        solve_batch(&graph, &records, &search_config, cache.as_ref())
    } else {
        solve_batch_concurrent(
            Arc::new(graph),
            records,
            Arc::new(search_config),
            &BatchConfig::new(cli.workers),
            cache,
        )
        .await
    };

    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| TableError::Output {
                path: path.clone(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            write_results(&mut writer, &results)?;
            writer.flush().map_err(|source| TableError::Output {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), results = results.len(), "Results written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_results(&mut writer, &results)?;
            // Trailing newline after the JSON document
            let _ = writeln!(writer);
        }
    }

    Ok(())
}
