//! Search a random hex map frame by frame and print the route.
//!
//! Run: cargo run --bin route -- [seed] [budget-ms]

use hexnav_core::TileMap;
use hexnav_demos::{COLS, ROWS, drive, endpoints, random_map, render};
use hexnav_search::{PathSearch, SearchError};
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(7);
    let budget = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(0);

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let map = random_map(&mut rng, ROWS, COLS);
    let (start, goal) = endpoints(&map).ok_or("map has no passable tiles")?;

    let mut ps = PathSearch::new();
    ps.load(&map)?;
    ps.initialize(start.row(), start.col(), goal.row(), goal.col())?;

    match drive(&mut ps, budget) {
        Ok(report) => {
            print!("{}", render(&map, &report.route));
            println!(
                "{}x{} map, seed {seed}: {} tiles in route, {} frames at {budget} ms",
                map.row_count(),
                map.column_count(),
                report.route.len(),
                report.frames
            );
            println!("{:?}", report.stats);
            Ok(())
        }
        Err(SearchError::Unreachable) => {
            print!("{}", render(&map, &[]));
            eprintln!("no route from {start} to {goal} (seed {seed})");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
