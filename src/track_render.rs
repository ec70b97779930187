use crate::game_logic::{Track, Vehicle};
use crate::simulation::Simulation;
use crate::track_library::TrackLibrary;
use bevy::prelude::*;

// How often along the boundary the dashed center line drops a dash
const CENTER_DASH_STEP: usize = 8;
const CENTER_DASH_LEN: usize = 4;

#[derive(Component)]
pub struct CarSprite;

/// The car is a flat-colored quad; everything it shows (pose, status tint)
/// is read back from the simulation each frame.
pub fn spawn_car_sprite(mut commands: Commands, simulation: Res<Simulation>) {
    let vehicle = &simulation.vehicle;
    commands.spawn((
        Sprite::from_color(
            body_color(vehicle),
            Vec2::new(vehicle.config.length, vehicle.config.width),
        ),
        Transform {
            translation: vehicle.position.extend(50.0),
            rotation: Quat::from_rotation_z(vehicle.heading),
            ..default()
        },
        CarSprite,
    ));
}

pub fn sync_car_sprite(
    simulation: Res<Simulation>,
    mut sprites: Query<(&mut Transform, &mut Sprite), With<CarSprite>>,
) {
    let vehicle = &simulation.vehicle;
    for (mut transform, mut sprite) in sprites.iter_mut() {
        transform.translation = vehicle.position.extend(50.0);
        transform.rotation = Quat::from_rotation_z(vehicle.heading);
        sprite.color = body_color(vehicle);
    }
}

/// Status tint: collision flash, then escalating off-track warnings, with a
/// duller body while the tires are loose under the handbrake.
fn body_color(vehicle: &Vehicle) -> Color {
    if vehicle.colliding {
        Color::srgb(1.0, 0.4, 0.4)
    } else if vehicle.off_track {
        if vehicle.stuck_timer > 1.0 {
            Color::srgb(1.0, 0.2, 0.2)
        } else if vehicle.off_track_severity >= 0.5 {
            Color::srgb(1.0, 0.53, 0.2)
        } else {
            Color::srgb(1.0, 0.8, 0.2)
        }
    } else if vehicle.drifting {
        let shade = 0.6 + 0.4 * vehicle.current_grip;
        Color::srgb(shade, shade * 0.8, 0.0)
    } else {
        Color::srgb(1.0, 0.8, 0.0)
    }
}

/// Immediate-mode track drawing: boundary outlines in the track's border
/// color, a dashed center line, the start/finish line, and the next gate to
/// cross while a race is running.
pub fn draw_track(
    track: Res<Track>,
    library: Res<TrackLibrary>,
    simulation: Option<Res<Simulation>>,
    mut gizmos: Gizmos,
) {
    let border = library
        .selected_def()
        .border_color
        .as_deref()
        .and_then(parse_hex_color)
        .unwrap_or(Color::srgb(0.95, 0.95, 0.95));

    gizmos.linestrip_2d(track.outer_boundary.iter().copied(), border);
    gizmos.linestrip_2d(track.inner_boundary.iter().copied(), border);

    let len = track.outer_boundary.len().min(track.inner_boundary.len());
    let center = Color::srgb(0.7, 0.7, 0.7);
    let mut i = 0;
    while i + CENTER_DASH_LEN < len {
        let from = (track.outer_boundary[i] + track.inner_boundary[i]) / 2.0;
        let to = (track.outer_boundary[i + CENTER_DASH_LEN]
            + track.inner_boundary[i + CENTER_DASH_LEN])
            / 2.0;
        gizmos.line_2d(from, to, center);
        i += CENTER_DASH_STEP;
    }

    gizmos.line_2d(
        track.start_line.start,
        track.start_line.end,
        Color::srgb(1.0, 0.1, 0.1),
    );

    if let Some(simulation) = &simulation {
        let next = simulation.progress.next_checkpoint();
        if let Some(gate) = track.checkpoints.get(next) {
            gizmos.line_2d(gate.start, gate.end, Color::srgba(1.0, 1.0, 0.2, 0.6));
        }
    }
}

/// `#rrggbb` to a color, as the track files spell it.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::srgb_u8(r, g, b))
}

pub fn cleanup_race(mut commands: Commands, sprites: Query<Entity, With<CarSprite>>) {
    for entity in &sprites {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_hex_colors() {
        assert!(parse_hex_color("#ffffff").is_some());
        assert!(parse_hex_color("#ffdd88").is_some());
    }

    #[test]
    fn rejects_malformed_hex_colors() {
        assert!(parse_hex_color("ffffff").is_none());
        assert!(parse_hex_color("#fff").is_none());
        assert!(parse_hex_color("#zzzzzz").is_none());
    }
}
