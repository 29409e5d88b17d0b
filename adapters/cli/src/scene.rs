//! Builds rendering scenes from session query snapshots.

use geo_quiz_rendering::{
    FeatureFill, FeaturePresentation, HudPresentation, MapPresentation, Scene,
};
use geo_quiz_session::{query, Session};

/// Composes the scene presented for the session's current state.
pub(crate) fn compose(session: &Session, map: MapPresentation) -> Scene {
    let features = query::catalog(session)
        .iter()
        .map(|feature| {
            let state = query::feature_state(session, feature.id());
            FeaturePresentation::new(feature.id(), feature.name(), FeatureFill::for_state(state))
        })
        .collect();
    let hud = HudPresentation::new(
        query::current_objective(session).map(str::to_string),
        query::correct_count(session) as u32,
        query::objective_total(session) as u32,
        query::elapsed(session),
    );

    Scene::new(map, features, hud, query::summary(session))
}
