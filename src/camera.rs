use bevy::prelude::*;
use bevy::render::camera::{Projection, ScalingMode};

// Window constants; the whole circuit is laid out to fit this view, so the
// camera never moves.
pub const WIN_W: f32 = 1280.;
pub const WIN_H: f32 = 720.;

pub fn camera_setup(mut commands: Commands) {
    let mut projection = OrthographicProjection::default_2d();
    projection.scaling_mode = ScalingMode::WindowSize;
    projection.scale = 1.0;

    commands
        .spawn(Camera2d::default())
        .insert(Projection::Orthographic(projection));
}
