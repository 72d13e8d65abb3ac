use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use clap::{Arg, Command};
use std::sync::Arc;
use tracing::info;
use walkiepal::{
    constants::{is_valid_probability, MAX_INVITE_TTL_MINUTES},
    models::{WalkSummary, WalkTime},
    services::{ManualClock, ResponseSimulator},
    store::MemoryStore,
    utils::init_logging,
    view::RecordingView,
    App, AppSettings, Config,
};

fn main() -> Result<()> {
    init_logging();

    let matches = Command::new("simulate")
        .about("Run one invite through its lifecycle in virtual time")
        .arg(Arg::new("buddy").long("buddy").short('b').default_value("Tom"))
        .arg(
            Arg::new("time")
                .long("time")
                .short('t')
                .help("Walk slot: Morning, Afternoon or Evening")
                .default_value("Morning"),
        )
        .arg(
            Arg::new("accept")
                .long("accept")
                .help("Acceptance probability between 0 and 1")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for the response coin flip")
                .value_parser(clap::value_parser!(u64))
                .default_value("7"),
        )
        .arg(
            Arg::new("minutes")
                .long("minutes")
                .short('m')
                .help("Virtual minutes to run")
                .value_parser(clap::value_parser!(i64))
                .default_value("61"),
        )
        .arg(
            Arg::new("silent")
                .long("silent")
                .help("Never let the buddy answer, so the invite can only expire")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config = Config::from_env()?;
    let mut settings = AppSettings::from_config(&config)?;
    if let Some(&accept) = matches.get_one::<f64>("accept") {
        if !is_valid_probability(accept) {
            anyhow::bail!("--accept must be between 0 and 1, got {}", accept);
        }
        settings.accept_probability = accept;
    }
    if matches.get_flag("silent") {
        // Push the answer past the end of the run.
        settings.response_delay = Duration::days(365);
    }

    let buddy = matches.get_one::<String>("buddy").map(String::as_str).unwrap_or("Tom");
    let time: WalkTime = matches
        .get_one::<String>("time")
        .map(String::as_str)
        .unwrap_or("Morning")
        .parse()?;
    let seed = matches.get_one::<u64>("seed").copied().unwrap_or(7);
    let minutes = matches.get_one::<i64>("minutes").copied().unwrap_or(61);

    let start = DateTime::<Utc>::UNIX_EPOCH;
    let end = match Duration::try_minutes(minutes) {
        Some(span) if minutes > 0 && minutes <= MAX_INVITE_TTL_MINUTES * 2 => start + span,
        _ => anyhow::bail!("--minutes must be between 1 and {}", MAX_INVITE_TTL_MINUTES * 2),
    };
    let clock = ManualClock::new(start);
    let view = RecordingView::new();
    let simulator = ResponseSimulator::seeded(settings.response_delay, settings.accept_probability, seed);

    let mut app = App::start(
        settings,
        Arc::new(MemoryStore::new()),
        Arc::new(clock.clone()),
        simulator,
        Box::new(view.clone()),
        "/find",
    );

    info!("🎬 Inviting {} for {} ({} virtual minutes, seed {})", buddy, time, minutes, seed);
    app.create_invite(buddy, time)?;
    print_notices(&view, start, start);

    while let Some(due) = app.scheduler().next_due() {
        if due > end {
            break;
        }
        clock.set(due);
        app.run_due();
        print_notices(&view, start, due);
    }
    clock.set(end);
    app.run_due();
    print_notices(&view, start, end);

    if let Some(invite) = app.registry().get(buddy) {
        println!("{}", serde_json::to_string_pretty(invite)?);
        if let Some(summary) = WalkSummary::for_invite(buddy, invite) {
            println!("🌳 Walk Confirmed\nWith: {}\nWhere: {}\nTime: {}", summary.with, summary.place, summary.time);
        }
    }

    app.shutdown();
    Ok(())
}

fn print_notices(view: &RecordingView, start: DateTime<Utc>, at: DateTime<Utc>) {
    let offset = (at - start).num_milliseconds() as f64 / 1000.0;
    for notice in view.drain_notices() {
        println!("[+{:>8.1}s] {}", offset, notice.replace('\n', " "));
    }
}
