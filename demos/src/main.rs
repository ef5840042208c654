//! Terminal demo: trace a path across a synthetic image in the background
//! while printing search progress.
//!
//! Run: cargo run --bin scissors-demo -- --weight contrast

use std::process;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use scissors_core::Point;
use scissors_paths::{BackgroundSearch, Connectivity, SearchConfig, SearchError, weight_by_name};
use scissors_demos::{disc_image, render};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Intelligent-scissors search demo")]
struct Args {
    /// Image width in pixels.
    #[arg(long, default_value_t = 64)]
    width: i32,
    /// Image height in pixels.
    #[arg(long, default_value_t = 32)]
    height: i32,
    /// Edge weight to use.
    #[arg(long, default_value = "contrast")]
    weight: String,
    #[arg(long, default_value_t = 2)]
    seed_x: i32,
    #[arg(long, default_value_t = 2)]
    seed_y: i32,
    /// Target of the printed path; defaults to the opposite corner.
    #[arg(long)]
    target_x: Option<i32>,
    #[arg(long)]
    target_y: Option<i32>,
    /// Restrict adjacency to the four cardinal neighbours.
    #[arg(long)]
    four: bool,
    /// Cancel the search after this many milliseconds.
    #[arg(long)]
    cancel_after_ms: Option<u64>,
    /// Milliseconds between progress frames.
    #[arg(long, default_value_t = 5)]
    frame_ms: u64,
    /// Seed for the synthetic image noise.
    #[arg(long, default_value_t = 7)]
    noise_seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let image = disc_image(args.width, args.height, args.noise_seed);
    let weight = weight_by_name(&args.weight, &image)?;
    let connectivity = if args.four {
        Connectivity::Four
    } else {
        Connectivity::Eight
    };
    let config = SearchConfig::default()
        .with_connectivity(connectivity)
        .with_publish_interval(64);
    let seed = Point::new(args.seed_x, args.seed_y);
    let target = Point::new(
        args.target_x.unwrap_or(args.width - 1 - args.seed_x),
        args.target_y.unwrap_or(args.height - 1 - args.seed_y),
    );

    let search = BackgroundSearch::spawn(image.bounds(), config, seed, weight)?;
    let started = Instant::now();
    let deadline = args.cancel_after_ms.map(Duration::from_millis);
    let mut frames = 0;

    while !search.is_finished() {
        if deadline.is_some_and(|d| started.elapsed() >= d) {
            log::info!("cancelling after {:?}", started.elapsed());
            search.cancel();
            break;
        }
        match search.progress() {
            Ok(snap) => {
                frames += 1;
                println!(
                    "frame {frames}: {} settled, {} frontier",
                    snap.settled_count(),
                    snap.frontier_count()
                );
                print!("{}", render(&snap, &[]));
            }
            Err(SearchError::Cancelled) => break,
            Err(e) => return Err(e.into()),
        }
        thread::sleep(Duration::from_millis(args.frame_ms));
    }

    let handle = search.handle();
    match search.join() {
        Ok(paths) => {
            let path = paths.path_to(target)?;
            let cost = paths.distance(target).unwrap_or_default();
            println!("path {seed} -> {target}: {} pixels, cost {cost}", path.len());
            print!("{}", render(&handle.snapshot()?, &path));
        }
        Err(SearchError::Cancelled) => println!("search cancelled"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
