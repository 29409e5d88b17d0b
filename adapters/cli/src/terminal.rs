//! Terminal backend that presents scenes as a line-oriented feed.

use std::time::Duration;

use anyhow::Result;
use geo_quiz_rendering::{
    FeatureFill, FrameInput, HudPresentation, Presentation, RenderingBackend, Scene,
};

/// Presents session scenes by printing HUD changes and the settled board.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TerminalBackend {
    frame_dt: Duration,
    frame_budget: u32,
}

impl TerminalBackend {
    /// Creates a backend stepping fixed-length frames up to the given budget.
    pub(crate) const fn new(frame_dt: Duration, frame_budget: u32) -> Self {
        Self {
            frame_dt,
            frame_budget,
        }
    }
}

impl RenderingBackend for TerminalBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        println!("{}", presentation.window_title);
        let mut scene = presentation.scene;
        let mut hud_line = render_hud(&scene);
        println!("{hud_line}");

        for _ in 0..self.frame_budget {
            update_scene(self.frame_dt, FrameInput::default(), &mut scene);

            let line = render_hud(&scene);
            if line != hud_line {
                println!("{line}");
                hud_line = line;
            }
            if scene.summary.is_some() {
                break;
            }
        }

        render_board(&scene);
        match scene.summary {
            Some(summary) => {
                let hud = HudPresentation::new(
                    None,
                    summary.correct_count(),
                    summary.total_objectives(),
                    summary.elapsed(),
                );
                println!("finished {} in {}", hud.score_text(), hud.clock_text());
            }
            None => println!("stopped before completion"),
        }

        Ok(())
    }
}

fn render_hud(scene: &Scene) -> String {
    match scene.hud.objective.as_deref() {
        Some(objective) => format!("[{}] locate: {objective}", scene.hud.score_text()),
        None => format!("[{}]", scene.hud.score_text()),
    }
}

fn render_board(scene: &Scene) {
    for feature in &scene.features {
        if feature.fill == FeatureFill::Base {
            continue;
        }
        let [red, green, blue] = scene.map.fill_color(feature.fill).to_rgb_u8();
        println!(
            "  {:<24} {:<9} #{red:02x}{green:02x}{blue:02x}",
            feature.name,
            feature.fill.label()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_quiz_core::FeatureId;
    use geo_quiz_rendering::{FeaturePresentation, MapPresentation};
    use glam::Vec2;

    fn scene(objective: Option<&str>, correct: u32, total: u32) -> Scene {
        let map = MapPresentation::new(
            Vec2::ZERO,
            2.0,
            MapPresentation::DEFAULT_FILL_OPACITY,
            MapPresentation::DEFAULT_BORDER_COLOR,
            MapPresentation::DEFAULT_BORDER_WIDTH,
        )
        .expect("map");
        let features = vec![FeaturePresentation::new(
            FeatureId::new(1),
            "France",
            FeatureFill::Base,
        )];
        let hud = HudPresentation::new(
            objective.map(str::to_string),
            correct,
            total,
            Duration::ZERO,
        );
        Scene::new(map, features, hud, None)
    }

    #[test]
    fn hud_line_tracks_objective_and_score() {
        assert_eq!(
            render_hud(&scene(Some("Germany"), 2, 7)),
            "[2/7] locate: Germany"
        );
        assert_eq!(render_hud(&scene(None, 7, 7)), "[7/7]");
    }
}
