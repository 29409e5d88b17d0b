use std::time::Duration;

use geo_quiz_core::{
    Command, Event, FeatureCatalog, FeatureId, FeatureState, GeographicFeature, ObjectiveDeck,
    Outcome, PickRejection, PickSequence,
};
use geo_quiz_session::{self as session, query, Session};

#[test]
fn missed_final_objective_reveals_and_completes() {
    let mut quiz = scenario_session(&["France", "Germany"]);
    start(&mut quiz);
    let _ = run_ticks(&mut quiz, 12);

    let first = submit(&mut quiz, 1, "France");
    assert!(first.contains(&Event::PickResolved {
        sequence: PickSequence::new(0),
        feature: FeatureId::new(1),
        outcome: Outcome::Correct,
    }));
    assert_eq!(query::correct_names(&quiz), ["France".to_string()]);
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(1)),
        FeatureState::Correct
    );
    assert_eq!(query::cursor(&quiz), 1);
    assert!(!query::is_completed(&quiz));

    let second = submit(&mut quiz, 2, "Spain");
    assert!(second.contains(&Event::PickResolved {
        sequence: PickSequence::new(1),
        feature: FeatureId::new(2),
        outcome: Outcome::Incorrect,
    }));
    assert!(second.contains(&Event::ObjectiveAdvanced { objective: None }));
    assert!(second
        .iter()
        .any(|event| matches!(event, Event::SessionCompleted { .. })));
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(2)),
        FeatureState::Reverting
    );
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(3)),
        FeatureState::Incorrect
    );
    assert_eq!(query::missed_targets(&quiz), ["Germany".to_string()]);
    assert_eq!(query::cursor(&quiz), 2);
    assert!(query::is_completed(&quiz));

    let summary = query::summary(&quiz).expect("summary after completion");
    assert_eq!(summary.total_objectives(), 2);
    assert_eq!(summary.correct_count(), 1);
    assert_eq!(summary.elapsed(), Duration::from_millis(120));

    // The flash still reverts 200 ms later while the frozen score holds.
    let _ = run_ticks(&mut quiz, 20);
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(2)),
        FeatureState::Neutral
    );
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(3)),
        FeatureState::Incorrect
    );
    assert_eq!(query::elapsed(&quiz), Duration::from_millis(120));
}

#[test]
fn reclicking_a_solved_feature_never_flashes_it() {
    let mut quiz = scenario_session(&["France", "Germany", "Spain"]);
    start(&mut quiz);

    let _ = submit(&mut quiz, 1, "France");
    let events = submit(&mut quiz, 1, "France");

    assert!(events.contains(&Event::PickResolved {
        sequence: PickSequence::new(1),
        feature: FeatureId::new(1),
        outcome: Outcome::Incorrect,
    }));
    assert!(!events.contains(&Event::FeatureStateChanged {
        feature: FeatureId::new(1),
        state: FeatureState::Reverting,
    }));
    assert_eq!(query::correct_names(&quiz), ["France".to_string()]);
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(1)),
        FeatureState::Correct
    );
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(3)),
        FeatureState::Incorrect
    );
    assert_eq!(query::missed_targets(&quiz), ["Germany".to_string()]);

    let _ = run_ticks(&mut quiz, 30);
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(1)),
        FeatureState::Correct
    );
}

#[test]
fn unknown_feature_leaves_state_untouched() {
    let mut quiz = scenario_session(&["France", "Germany"]);
    start(&mut quiz);
    let _ = run_ticks(&mut quiz, 5);
    let _ = submit(&mut quiz, 1, "France");

    let cursor_before = query::cursor(&quiz);
    let picks_before = query::picks(&quiz).to_vec();
    let correct_before = query::correct_names(&quiz).to_vec();
    let missed_before = query::missed_targets(&quiz).to_vec();
    let board_before = query::board_view(&quiz).into_vec();
    let elapsed_before = query::elapsed(&quiz);
    let objective_before = query::current_objective(&quiz).map(str::to_string);

    let events = submit(&mut quiz, 99, "Germany");
    assert_eq!(
        events,
        vec![Event::PickRejected {
            feature: FeatureId::new(99),
            reason: PickRejection::UnknownFeature,
        }],
    );

    assert_eq!(query::cursor(&quiz), cursor_before);
    assert_eq!(query::picks(&quiz), picks_before.as_slice());
    assert_eq!(query::correct_names(&quiz), correct_before.as_slice());
    assert_eq!(query::missed_targets(&quiz), missed_before.as_slice());
    assert_eq!(query::board_view(&quiz).into_vec(), board_before);
    assert_eq!(query::elapsed(&quiz), elapsed_before);
    assert_eq!(
        query::current_objective(&quiz).map(str::to_string),
        objective_before
    );
}

#[test]
fn cursor_tracks_accepted_picks_exactly() {
    let mut quiz = scenario_session(&["Spain", "France", "Germany"]);
    start(&mut quiz);

    let _ = submit(&mut quiz, 99, "Nowhere");
    assert_eq!(query::cursor(&quiz), query::picks(&quiz).len());
    assert_eq!(query::cursor(&quiz), 0);

    let _ = submit(&mut quiz, 2, "Spain");
    assert_eq!(query::cursor(&quiz), query::picks(&quiz).len());
    assert_eq!(query::cursor(&quiz), 1);

    let _ = submit(&mut quiz, 3, "Spain");
    assert_eq!(query::cursor(&quiz), query::picks(&quiz).len());
    assert_eq!(query::cursor(&quiz), 1);

    let _ = run_ticks(&mut quiz, 3);
    let _ = submit(&mut quiz, 3, "Germany");
    assert_eq!(query::cursor(&quiz), query::picks(&quiz).len());
    assert_eq!(query::cursor(&quiz), 2);

    let _ = submit(&mut quiz, 1, "France");
    assert_eq!(query::cursor(&quiz), query::picks(&quiz).len());
    assert_eq!(query::cursor(&quiz), 3);
    assert!(query::is_completed(&quiz));

    let rejected = submit(&mut quiz, 2, "Spain");
    assert_eq!(
        rejected,
        vec![Event::PickRejected {
            feature: FeatureId::new(2),
            reason: PickRejection::SessionCompleted,
        }],
    );
    assert_eq!(query::cursor(&quiz), 3);
}

#[test]
fn completion_triggers_on_deck_exhaustion_regardless_of_mix() {
    let mut quiz = scenario_session(&["France", "Germany", "Spain"]);
    start(&mut quiz);

    let _ = submit(&mut quiz, 2, "Spain");
    let _ = submit(&mut quiz, 1, "France");
    let events = submit(&mut quiz, 1, "France");

    assert!(query::is_completed(&quiz));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::SessionCompleted { .. })));

    let summary = query::summary(&quiz).expect("summary after completion");
    assert_eq!(summary.total_objectives(), 3);
    assert_eq!(summary.correct_count(), 0);
    assert_eq!(
        query::missed_targets(&quiz),
        [
            "France".to_string(),
            "Germany".to_string(),
            "Spain".to_string(),
        ],
    );

    // Every missed objective ends permanently revealed.
    for feature in [1, 2, 3] {
        assert_eq!(
            query::feature_state(&quiz, FeatureId::new(feature)),
            FeatureState::Incorrect,
            "feature {feature} should be revealed",
        );
    }
}

#[test]
fn timer_reports_within_one_quantum_of_simulated_time() {
    let mut quiz = scenario_session(&["France"]);
    start(&mut quiz);

    for _ in 0..8 {
        let _ = tick(&mut quiz, 7);
    }

    let sampled = query::elapsed(&quiz);
    let difference = if sampled > Duration::from_millis(50) {
        sampled - Duration::from_millis(50)
    } else {
        Duration::from_millis(50) - sampled
    };
    assert!(
        difference <= Duration::from_millis(10),
        "elapsed {sampled:?} strayed more than one quantum from 50 ms",
    );

    let _ = submit(&mut quiz, 1, "France");
    assert!(query::is_completed(&quiz));
    let frozen = query::elapsed(&quiz);

    let _ = run_ticks(&mut quiz, 25);
    assert_eq!(query::elapsed(&quiz), frozen);
    let summary = query::summary(&quiz).expect("summary after completion");
    assert_eq!(summary.elapsed(), frozen);
}

#[test]
fn picks_after_completion_are_rejected() {
    let mut quiz = scenario_session(&["France"]);
    start(&mut quiz);
    let _ = submit(&mut quiz, 1, "France");
    assert!(query::is_completed(&quiz));

    let events = submit(&mut quiz, 2, "Spain");
    assert_eq!(
        events,
        vec![Event::PickRejected {
            feature: FeatureId::new(2),
            reason: PickRejection::SessionCompleted,
        }],
    );
    assert_eq!(query::cursor(&quiz), 1);
    assert_eq!(query::correct_names(&quiz), ["France".to_string()]);

    let mut events = Vec::new();
    session::apply(&mut quiz, Command::StartSession, &mut events);
    assert!(events.is_empty());
}

#[test]
fn hover_never_overrides_answer_states() {
    let mut quiz = scenario_session(&["Germany", "France", "Spain"]);
    start(&mut quiz);

    let mut events = Vec::new();
    session::apply(
        &mut quiz,
        Command::HoverEnter {
            feature: FeatureId::new(2),
        },
        &mut events,
    );
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(2)),
        FeatureState::Hovered
    );

    let _ = submit(&mut quiz, 2, "Spain");
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(2)),
        FeatureState::Reverting
    );

    // Once the flash reverts, the still-resting pointer shows again.
    let due = run_ticks(&mut quiz, 20);
    assert!(due.contains(&Event::FeatureStateChanged {
        feature: FeatureId::new(2),
        state: FeatureState::Hovered,
    }));
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(2)),
        FeatureState::Hovered
    );

    events.clear();
    session::apply(
        &mut quiz,
        Command::HoverLeave {
            feature: FeatureId::new(2),
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::FeatureStateChanged {
            feature: FeatureId::new(2),
            state: FeatureState::Neutral,
        }],
    );
}

#[test]
fn repeated_flash_extends_the_revert_deadline() {
    let mut quiz = scenario_session(&["Germany", "France", "Spain"]);
    start(&mut quiz);

    let _ = submit(&mut quiz, 2, "Spain");
    let _ = run_ticks(&mut quiz, 10);
    let _ = submit(&mut quiz, 2, "Spain");

    // The first deadline would have passed here; the refresh keeps the flash.
    let _ = run_ticks(&mut quiz, 10);
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(2)),
        FeatureState::Reverting
    );

    let _ = run_ticks(&mut quiz, 10);
    assert_eq!(
        query::feature_state(&quiz, FeatureId::new(2)),
        FeatureState::Neutral
    );
}

fn scenario_catalog() -> FeatureCatalog {
    FeatureCatalog::new(vec![
        GeographicFeature::new(FeatureId::new(1), "France"),
        GeographicFeature::new(FeatureId::new(2), "Spain"),
        GeographicFeature::new(FeatureId::new(3), "Germany"),
    ])
    .expect("catalog")
}

fn scenario_session(objectives: &[&str]) -> Session {
    let deck = ObjectiveDeck::new(objectives.iter().map(|name| name.to_string()).collect());
    Session::new(scenario_catalog(), deck).expect("session")
}

fn start(quiz: &mut Session) {
    let mut events = Vec::new();
    session::apply(quiz, Command::StartSession, &mut events);
}

fn submit(quiz: &mut Session, feature: u32, name: &str) -> Vec<Event> {
    let mut events = Vec::new();
    session::apply(
        quiz,
        Command::SubmitPick {
            feature: FeatureId::new(feature),
            name: name.to_string(),
        },
        &mut events,
    );
    events
}

fn tick(quiz: &mut Session, millis: u64) -> Vec<Event> {
    let mut events = Vec::new();
    session::apply(
        quiz,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
        &mut events,
    );
    events
}

fn run_ticks(quiz: &mut Session, count: usize) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..count {
        events.extend(tick(quiz, 10));
    }
    events
}
