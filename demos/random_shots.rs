//! Poll game state and fire a randomized shot every 20 seconds.
//!
//! Usage: cargo run --example random_shots [host]
//!
//! Requires: ProTee Golf Interface running and reachable on port 9090.

use std::env;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use teelink::{BoostConfig, Client, ShotOptions, TelemetryRecord};

const SHOT_INTERVAL: Duration = Duration::from_secs(20);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host = env::args().nth(1);
    let config = BoostConfig::load("tgc.toml").unwrap_or_default();
    let client = Client::connect(host.as_deref(), config);

    let mut rng = rand::rng();
    let mut last_shot: Option<Instant> = None;
    let mut last_seen: Option<TelemetryRecord> = None;

    println!("Starting random launches");
    loop {
        thread::sleep(Duration::from_millis(100));

        if let Some(rec) = client.telemetry()
            && last_seen.as_ref() != Some(&rec)
        {
            println!(
                "Club: {}  Distance to flag: {:.1}  Surface: {}  Hand: {}",
                rec.club, rec.distance_to_flag, rec.surface, rec.hand,
            );
            if !rec.player_name.is_empty() {
                println!(
                    "Player: {}  Course: {}  Tour: {}",
                    rec.player_name, rec.course_name, rec.tour_name,
                );
            }
            last_seen = Some(rec);
        }

        if last_shot.is_none_or(|t| t.elapsed() > SHOT_INTERVAL) {
            let opts = ShotOptions {
                clubspeed: Some(rng.random_range(20.0..120.0)),
                clubface: Some(rng.random_range(-7.0..7.0)),
                clubpath: Some(rng.random_range(-7.0..7.0)),
                ..ShotOptions::default()
            };
            let launched = client.launch_ball(
                rng.random_range(20.0..180.0),
                rng.random_range(-7.0..7.0),
                rng.random_range(3.0..45.0),
                rng.random_range(1500.0..10000.0),
                rng.random_range(-2500.0..2500.0),
                &opts,
            );
            if launched {
                if let Some(t) = last_shot {
                    println!("New launch after {:.1} seconds.", t.elapsed().as_secs_f64());
                } else {
                    println!("First launch away.");
                }
                last_shot = Some(Instant::now());
            }
        }
    }
}
