#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Geo Quiz sessions in the terminal.

mod bot;
mod catalog;
mod result_code;
mod scene;
mod terminal;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use geo_quiz_core::{
    Command, Event, FeatureId, FeatureState, Outcome, PickRejection, SessionSummary,
};
use geo_quiz_rendering::{
    Color, FeatureFill, HudPresentation, MapPresentation, Presentation, RenderingBackend,
};
use geo_quiz_session::{self as session, query, Session};
use geo_quiz_system_sequencer::{Config, ObjectiveSequencer};

use crate::bot::{Bot, BotConfig};
use crate::catalog::Continent;
use crate::result_code::SessionResultCode;
use crate::terminal::TerminalBackend;

/// Length of a simulated frame driving the session clock.
const FRAME_DT: Duration = Duration::from_millis(10);
/// Solid color used to clear each frame.
const CLEAR_COLOR: Color = Color::from_rgb_u8(0x10, 0x18, 0x20);

#[derive(Parser, Debug)]
#[command(name = "Geo Quiz")]
#[command(about = "Find the named map features before the clock runs away")]
struct Args {
    /// Continent preset providing the feature catalog.
    #[arg(long, value_enum, default_value = "europe", conflicts_with = "catalog")]
    continent: Continent,

    /// Path to a TOML catalog file overriding the continent preset.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Seed for the objective shuffle and the scripted player.
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that the scripted player picks the current objective.
    #[arg(long, default_value_t = 0.9)]
    bot_accuracy: f64,

    /// Camera zoom override for the map viewport.
    #[arg(long)]
    zoom: Option<f32>,

    /// Simulated time budget for the session, in seconds.
    #[arg(long, default_value_t = 600)]
    time_limit: u64,

    /// Print a shareable result code once the session completes.
    #[arg(long)]
    result_code: bool,

    /// Decode a result code and exit.
    #[arg(long, value_name = "CODE")]
    decode: Option<String>,
}

/// Entry point for the Geo Quiz command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(code) = args.decode.as_deref() {
        return print_decoded(code);
    }
    if !(0.0..=1.0).contains(&args.bot_accuracy) {
        bail!("bot accuracy must lie within 0.0..=1.0");
    }

    let setup = match args.catalog.as_deref() {
        Some(path) => catalog::load_file(path)?,
        None => catalog::preset(args.continent)?,
    };
    let map = MapPresentation::new(
        setup.center,
        args.zoom.unwrap_or(setup.zoom),
        MapPresentation::DEFAULT_FILL_OPACITY,
        MapPresentation::DEFAULT_BORDER_COLOR,
        MapPresentation::DEFAULT_BORDER_WIDTH,
    )?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut sequencer = ObjectiveSequencer::new(Config::new(seed));
    let deck = sequencer.initialize(&setup.catalog);
    let mut quiz = Session::new(setup.catalog, deck)?;

    println!("{}", query::welcome_banner(&quiz));
    println!("seed {seed}");

    let mut events = Vec::new();
    session::apply(&mut quiz, Command::StartSession, &mut events);
    report_events(&quiz, &events);

    let frame_budget = frame_budget(args.time_limit);
    let mut bot = Bot::new(BotConfig::new(seed.wrapping_add(1), args.bot_accuracy));
    let mut frames_left = frame_budget;
    let emit_result_code = args.result_code;
    let mut result_printed = false;

    let opening = scene::compose(&quiz, map);
    let presentation = Presentation::new(setup.title, CLEAR_COLOR, opening);
    let backend = TerminalBackend::new(FRAME_DT, frame_budget);

    backend.run(presentation, move |dt, _input, scene| {
        events.clear();
        session::apply(&mut quiz, Command::Tick { dt }, &mut events);
        for command in bot.act(&quiz) {
            session::apply(&mut quiz, command, &mut events);
        }

        frames_left = frames_left.saturating_sub(1);
        if frames_left == 0 && !query::is_completed(&quiz) {
            session::apply(&mut quiz, Command::AbandonSession, &mut events);
        }

        report_events(&quiz, &events);
        if emit_result_code && !result_printed {
            if let Some(summary) = query::summary(&quiz) {
                println!("result code: {}", session_result(&quiz, summary).encode());
                result_printed = true;
            }
        }

        *scene = scene::compose(&quiz, scene.map);
    })
}

fn print_decoded(code: &str) -> Result<()> {
    let result = SessionResultCode::decode(code)?;
    let hud = HudPresentation::new(
        None,
        result.correct,
        result.total,
        Duration::from_millis(result.elapsed_ms),
    );
    println!("score {} in {}", hud.score_text(), hud.clock_text());
    for name in &result.correct_names {
        println!("  correct: {name}");
    }
    for name in &result.missed_targets {
        println!("  missed:  {name}");
    }

    Ok(())
}

fn session_result(session: &Session, summary: SessionSummary) -> SessionResultCode {
    SessionResultCode {
        total: summary.total_objectives(),
        correct: summary.correct_count(),
        elapsed_ms: summary.elapsed_ms() as u64,
        correct_names: query::correct_names(session).to_vec(),
        missed_targets: query::missed_targets(session).to_vec(),
    }
}

fn report_events(session: &Session, events: &[Event]) {
    for event in events {
        match event {
            Event::SessionStarted => println!(
                "session started with {} objectives",
                query::objective_total(session)
            ),
            Event::PickResolved {
                sequence,
                feature,
                outcome,
            } => {
                let verdict = match outcome {
                    Outcome::Correct => "correct",
                    Outcome::Incorrect => "incorrect",
                };
                println!(
                    "pick {}: {} -> {verdict}",
                    sequence.index() + 1,
                    feature_name(session, *feature)
                );
            }
            Event::PickRejected { feature, reason } => println!(
                "pick rejected on {}: {}",
                feature_name(session, *feature),
                rejection_text(reason)
            ),
            Event::FeatureStateChanged { feature, state } => {
                let name = feature_name(session, *feature);
                match state {
                    FeatureState::Correct => {
                        println!("  {name} marked correct ({})", swatch(FeatureFill::Correct));
                    }
                    FeatureState::Incorrect => {
                        println!(
                            "  {name} revealed incorrect ({})",
                            swatch(FeatureFill::Incorrect)
                        );
                    }
                    FeatureState::Reverting => {
                        println!(
                            "  {name} flashes incorrect ({})",
                            swatch(FeatureFill::Incorrect)
                        );
                    }
                    FeatureState::Neutral | FeatureState::Hovered => {}
                }
            }
            Event::SessionAbandoned => println!("session abandoned before completion"),
            Event::TimeAdvanced { .. }
            | Event::ObjectiveAdvanced { .. }
            | Event::SessionCompleted { .. } => {}
        }
    }
}

fn feature_name(session: &Session, feature: FeatureId) -> String {
    query::catalog(session)
        .feature_by_id(feature)
        .map(|entry| entry.name().to_string())
        .unwrap_or_else(|| format!("feature {}", feature.get()))
}

const fn rejection_text(reason: &PickRejection) -> &'static str {
    match reason {
        PickRejection::SessionCompleted => "the session is already complete",
        PickRejection::UnknownFeature => "the feature is not part of this map",
        PickRejection::NameMismatch => "the reported name does not match the feature",
    }
}

fn swatch(fill: FeatureFill) -> String {
    let [red, green, blue] = fill.color().to_rgb_u8();
    format!("#{red:02x}{green:02x}{blue:02x}")
}

fn frame_budget(time_limit_secs: u64) -> u32 {
    u32::try_from(time_limit_secs.saturating_mul(100)).unwrap_or(u32::MAX)
}
