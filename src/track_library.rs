use crate::camera::{WIN_H, WIN_W};
use crate::game_logic::{wrap_angle, StartPose, Track};
use bevy::prelude::*;
use serde::Deserialize;

pub const TRACKS_PATH: &str = "assets/tracks.json";

/// Control point as a fraction of the world, top-left origin like the
/// original data files. Resolution flips it into the y-up, center-origin
/// world.
#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ControlPoint {
    pub x_factor: f32,
    pub y_factor: f32,
}

#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StartPositionDef {
    pub x_factor: f32,
    pub y_factor: f32,
    /// Heading in degrees.
    pub angle: f32,
}

/// One entry of `tracks.json`. The data files carry more presentation
/// metadata than this; unknown keys are simply ignored, and `borderColor`
/// is the only one the renderer reads. The simulation ignores all of it.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TrackDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub control_points: Vec<ControlPoint>,
    pub outer_track_scale: f32,
    pub inner_track_scale: f32,
    pub checkpoint_count: usize,
    #[serde(default)]
    pub start_position: Option<StartPositionDef>,
    #[serde(default)]
    pub border_color: Option<String>,
}

#[derive(Deserialize)]
struct TrackFile {
    tracks: Vec<TrackDef>,
}

/// All known track definitions plus the current selection.
#[derive(Resource)]
pub struct TrackLibrary {
    pub tracks: Vec<TrackDef>,
    pub selected: usize,
}

impl TrackLibrary {
    /// Load the track list from disk. Any failure (missing file, bad JSON,
    /// no usable entry) degrades to the built-in classic circuit so the game
    /// always has something to race on.
    pub fn load(path: &str) -> Self {
        let mut tracks = match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<TrackFile>(&text) {
                Ok(file) => file.tracks,
                Err(err) => {
                    warn!("failed to parse {path}: {err}");
                    Vec::new()
                }
            },
            Err(err) => {
                warn!("failed to read {path}: {err}");
                Vec::new()
            }
        };

        // a loop needs at least 3 control points; drop anything that can't
        // form one before the geometry ever sees it
        tracks.retain(|track| {
            let usable = track.control_points.len() >= 3;
            if !usable {
                warn!("track '{}' has too few control points, skipping", track.id);
            }
            usable
        });

        if tracks.is_empty() {
            warn!("no usable tracks in {path}, using the built-in circuit");
            tracks.push(TrackDef::classic());
        }

        Self {
            tracks,
            selected: 0,
        }
    }

    pub fn selected_def(&self) -> &TrackDef {
        &self.tracks[self.selected]
    }

    pub fn select(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.selected = index;
        }
    }
}

impl TrackDef {
    /// The fallback circuit, matching the default layout the game shipped
    /// with before track files existed.
    pub fn classic() -> Self {
        let points = [
            (0.7, 0.8),
            (0.8, 0.6),
            (0.8, 0.3),
            (0.6, 0.2),
            (0.4, 0.2),
            (0.2, 0.3),
            (0.2, 0.4),
            (0.3, 0.5),
            (0.2, 0.6),
            (0.3, 0.8),
            (0.5, 0.8),
            (0.6, 0.9),
        ];
        Self {
            id: "classic".into(),
            name: "Classic Circuit".into(),
            description: "The original chicane-heavy loop".into(),
            control_points: points
                .iter()
                .map(|&(x_factor, y_factor)| ControlPoint { x_factor, y_factor })
                .collect(),
            outer_track_scale: 1.2,
            inner_track_scale: 0.6,
            checkpoint_count: 8,
            start_position: None,
            border_color: None,
        }
    }

    /// Resolve the fractional coordinates against the window and build the
    /// circuit geometry.
    pub fn build_track(&self) -> Track {
        let resolve = |x_factor: f32, y_factor: f32| {
            Vec2::new((x_factor - 0.5) * WIN_W, (0.5 - y_factor) * WIN_H)
        };

        let control: Vec<Vec2> = self
            .control_points
            .iter()
            .map(|p| resolve(p.x_factor, p.y_factor))
            .collect();

        let start = self.start_position.map(|s| StartPose {
            position: resolve(s.x_factor, s.y_factor),
            heading: wrap_angle(s.angle.to_radians()),
        });

        Track::build(
            &control,
            self.outer_track_scale,
            self.inner_track_scale,
            self.checkpoint_count,
            start,
        )
    }
}
