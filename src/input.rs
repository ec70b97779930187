use crate::game_logic::DriveInput;
use bevy::prelude::*;

/// Sample the keyboard into the normalized control state the vehicle
/// consumes. Arrows or WASD drive, space is the handbrake.
pub fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<DriveInput>,
) {
    let pressed =
        |a: KeyCode, b: KeyCode| keyboard.pressed(a) || keyboard.pressed(b);

    input.throttle = if pressed(KeyCode::ArrowUp, KeyCode::KeyW) {
        1.0
    } else {
        0.0
    };
    input.brake = if pressed(KeyCode::ArrowDown, KeyCode::KeyS) {
        1.0
    } else {
        0.0
    };

    // positive steering is a left turn (counter-clockwise)
    let mut steering = 0.0;
    if pressed(KeyCode::ArrowLeft, KeyCode::KeyA) {
        steering += 1.0;
    }
    if pressed(KeyCode::ArrowRight, KeyCode::KeyD) {
        steering -= 1.0;
    }
    input.steering = steering;

    input.handbrake = keyboard.pressed(KeyCode::Space);
}
