//! Scripted player that drives sessions for headless runs.

use geo_quiz_core::{Command, FeatureId};
use geo_quiz_session::{query, Session};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Bounds of the simulated think time between picks, in frames.
const THINK_FRAMES: std::ops::RangeInclusive<u32> = 30..=120;

/// Configuration parameters required to construct the bot.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BotConfig {
    rng_seed: u64,
    accuracy: f64,
}

impl BotConfig {
    /// Creates a configuration from a seed and a hit probability.
    pub(crate) const fn new(rng_seed: u64, accuracy: f64) -> Self {
        Self { rng_seed, accuracy }
    }
}

/// Plays sessions by hovering and picking features at a simulated pace.
#[derive(Debug)]
pub(crate) struct Bot {
    rng: ChaCha8Rng,
    accuracy: f64,
    plan: Option<Plan>,
}

#[derive(Debug)]
struct Plan {
    feature: FeatureId,
    name: String,
    frames_until_pick: u32,
}

impl Bot {
    /// Creates a new bot using the supplied configuration.
    pub(crate) fn new(config: BotConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            accuracy: config.accuracy,
            plan: None,
        }
    }

    /// Commands the bot issues for the current frame.
    pub(crate) fn act(&mut self, session: &Session) -> Vec<Command> {
        if !query::is_started(session)
            || query::is_completed(session)
            || query::is_abandoned(session)
        {
            return Vec::new();
        }

        match self.plan.as_mut() {
            None => {
                let Some(plan) = self.draft_plan(session) else {
                    return Vec::new();
                };
                let feature = plan.feature;
                self.plan = Some(plan);
                vec![Command::HoverEnter { feature }]
            }
            Some(plan) if plan.frames_until_pick == 0 => {
                let feature = plan.feature;
                let name = plan.name.clone();
                self.plan = None;
                vec![
                    Command::SubmitPick { feature, name },
                    Command::HoverLeave { feature },
                ]
            }
            Some(plan) => {
                plan.frames_until_pick -= 1;
                Vec::new()
            }
        }
    }

    fn draft_plan(&mut self, session: &Session) -> Option<Plan> {
        let objective = query::current_objective(session)?.to_string();
        let catalog = query::catalog(session);

        let target = if self.rng.gen_bool(self.accuracy) {
            catalog.feature_by_name(&objective)?
        } else {
            let decoys: Vec<_> = catalog
                .iter()
                .filter(|feature| feature.name() != objective)
                .collect();
            match decoys.choose(&mut self.rng) {
                Some(feature) => *feature,
                None => catalog.feature_by_name(&objective)?,
            }
        };

        Some(Plan {
            feature: target.id(),
            name: target.name().to_string(),
            frames_until_pick: self.rng.gen_range(THINK_FRAMES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_quiz_core::{FeatureCatalog, GeographicFeature, ObjectiveDeck};
    use geo_quiz_session::apply;

    fn quiz() -> Session {
        let catalog = FeatureCatalog::new(vec![
            GeographicFeature::new(FeatureId::new(1), "France"),
            GeographicFeature::new(FeatureId::new(2), "Spain"),
            GeographicFeature::new(FeatureId::new(3), "Germany"),
        ])
        .expect("catalog");
        let deck = ObjectiveDeck::new(vec![
            "Spain".to_string(),
            "France".to_string(),
            "Germany".to_string(),
        ]);
        Session::new(catalog, deck).expect("session")
    }

    fn play_to_completion(bot: &mut Bot, quiz: &mut Session) -> Vec<Command> {
        let mut events = Vec::new();
        apply(quiz, Command::StartSession, &mut events);

        let mut issued = Vec::new();
        for _ in 0..10_000 {
            if query::is_completed(quiz) {
                break;
            }
            for command in bot.act(quiz) {
                issued.push(command.clone());
                apply(quiz, command, &mut events);
            }
        }
        issued
    }

    #[test]
    fn perfect_bot_answers_every_objective() {
        let mut bot = Bot::new(BotConfig::new(7, 1.0));
        let mut quiz = quiz();

        let issued = play_to_completion(&mut bot, &mut quiz);

        assert!(query::is_completed(&quiz));
        assert_eq!(query::correct_count(&quiz), 3);
        assert!(matches!(issued.first(), Some(Command::HoverEnter { .. })));
    }

    #[test]
    fn hopeless_bot_misses_every_objective() {
        let mut bot = Bot::new(BotConfig::new(7, 0.0));
        let mut quiz = quiz();

        let _ = play_to_completion(&mut bot, &mut quiz);

        assert!(query::is_completed(&quiz));
        assert_eq!(query::correct_count(&quiz), 0);
        assert_eq!(query::missed_targets(&quiz).len(), 3);
    }

    #[test]
    fn identical_seeds_issue_identical_commands() {
        let mut first_bot = Bot::new(BotConfig::new(99, 0.5));
        let mut second_bot = Bot::new(BotConfig::new(99, 0.5));
        let mut first_quiz = quiz();
        let mut second_quiz = quiz();

        let first = play_to_completion(&mut first_bot, &mut first_quiz);
        let second = play_to_completion(&mut second_bot, &mut second_quiz);

        assert_eq!(first, second);
    }
}
