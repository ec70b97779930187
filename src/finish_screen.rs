use crate::best_times::BestTimes;
use crate::simulation::Simulation;
use crate::timing::format_time;
use crate::title_screen::destroy_screen;
use crate::track_library::TrackLibrary;
use crate::GameState;
use bevy::prelude::*;

#[derive(Component)]
pub struct FinishScreenEntity;

/// Runs once on entering `Finished`: settles the best-time bookkeeping and
/// lays out the results.
pub fn setup_finish_screen(
    mut commands: Commands,
    simulation: Res<Simulation>,
    library: Res<TrackLibrary>,
    mut best_times: ResMut<BestTimes>,
) {
    let track = library.selected_def();
    let final_millis = simulation.progress.elapsed_millis();

    let new_record = simulation.progress.beats(best_times.get(&track.id));
    if new_record {
        best_times.record(&track.id, final_millis);
        info!("new best time on {}: {}", track.id, format_time(final_millis));
    }
    let best = best_times.get(&track.id);

    commands.spawn((
        Text2d::new("FINISHED!"),
        TextColor(Color::WHITE),
        TextFont {
            font_size: 70.0,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, 180.0, 100.0),
            ..default()
        },
        FinishScreenEntity,
    ));

    commands.spawn((
        Text2d::new(format!(
            "Your time on {}: {}",
            track.name,
            format_time(final_millis)
        )),
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        TextFont {
            font_size: 34.0,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, 60.0, 100.0),
            ..default()
        },
        FinishScreenEntity,
    ));

    if let Some(best) = best {
        commands.spawn((
            Text2d::new(format!("Best time: {}", format_time(best))),
            TextColor(Color::srgb(0.9, 0.9, 0.9)),
            TextFont {
                font_size: 34.0,
                ..default()
            },
            Transform {
                translation: Vec3::new(0.0, 0.0, 100.0),
                ..default()
            },
            FinishScreenEntity,
        ));
    }

    if new_record {
        commands.spawn((
            Text2d::new("NEW RECORD!"),
            TextColor(Color::srgb(1.0, 0.8, 0.0)),
            TextFont {
                font_size: 40.0,
                ..default()
            },
            Transform {
                translation: Vec3::new(0.0, -70.0, 100.0),
                ..default()
            },
            FinishScreenEntity,
        ));
    }

    commands.spawn((
        Text2d::new("R RESTART   T TRACK SELECT"),
        TextColor(Color::srgb(0.7, 0.7, 0.7)),
        TextFont {
            font_size: 26.0,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, -180.0, 100.0),
            ..default()
        },
        FinishScreenEntity,
    ));
}

pub fn check_for_finish_input(
    input: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.just_pressed(KeyCode::KeyR) {
        next_state.set(GameState::Playing);
    } else if input.just_pressed(KeyCode::KeyT) {
        next_state.set(GameState::Title);
    }
}

pub fn cleanup_finish_screen(
    mut commands: Commands,
    screen: Query<Entity, With<FinishScreenEntity>>,
) {
    destroy_screen(&mut commands, &screen);
}
