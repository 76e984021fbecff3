// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Print the day's zmanim for Lakewood, NJ.
//!
//! ```sh
//! cargo run --example quickstart
//! RUST_LOG=zmanim=debug cargo run --example quickstart -- 2024-12-20
//! ```

use chrono::{NaiveDate, Utc};
use tracing_subscriber::EnvFilter;
use zmanim::{Location, ZmanimConfig, ZmanimEngine};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zmanim=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let date = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<NaiveDate>()?,
        None => Utc::now().date_naive(),
    };

    let location = Location::with_timezone_name(
        "Lakewood, NJ",
        40.096,
        -74.222,
        29.02,
        "America/New_York",
    )?;
    let engine = ZmanimEngine::with_config(location, date, ZmanimConfig::new().with_elevation(true))?;

    println!("Zmanim for {} on {date}", engine.calendar().location().name());
    for zman in engine.sorted_zmanim() {
        let authorities: Vec<_> = zman
            .definition
            .authorities()
            .iter()
            .map(|a| a.name())
            .collect();
        let value = match (&zman.moment, &zman.duration) {
            (Some(moment), _) => moment.format("%H:%M:%S").to_string(),
            (None, Some(duration)) => format!("{:.1} min", duration.num_milliseconds() as f64 / 60_000.0),
            (None, None) => "-".to_string(),
        };
        println!(
            "{:<48} {:>10}  {}",
            zman.key(),
            value,
            authorities.join(", ")
        );
    }
    Ok(())
}
