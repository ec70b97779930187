use crate::camera::{WIN_H, WIN_W};
use crate::simulation::Simulation;
use crate::timing::format_time;
use bevy::prelude::*;

#[derive(Component)]
pub struct HudEntity;

#[derive(Component)]
pub struct SpeedText;

#[derive(Component)]
pub struct LapText;

#[derive(Component)]
pub struct TimerText;

pub fn setup_hud(mut commands: Commands) {
    let row_y = WIN_H / 2.0 - 30.0;

    commands.spawn((
        Text2d::new("0 km/h"),
        TextColor(Color::WHITE),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        Transform {
            translation: Vec3::new(-WIN_W / 2.0 + 120.0, row_y, 90.0),
            ..default()
        },
        SpeedText,
        HudEntity,
    ));

    commands.spawn((
        Text2d::new("LAP 1/1"),
        TextColor(Color::WHITE),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, row_y, 90.0),
            ..default()
        },
        LapText,
        HudEntity,
    ));

    commands.spawn((
        Text2d::new("00:00.000"),
        TextColor(Color::WHITE),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        Transform {
            translation: Vec3::new(WIN_W / 2.0 - 120.0, row_y, 90.0),
            ..default()
        },
        TimerText,
        HudEntity,
    ));
}

pub fn update_hud(
    simulation: Res<Simulation>,
    mut speed: Query<&mut Text2d, (With<SpeedText>, Without<LapText>, Without<TimerText>)>,
    mut lap: Query<&mut Text2d, (With<LapText>, Without<SpeedText>, Without<TimerText>)>,
    mut timer: Query<&mut Text2d, (With<TimerText>, Without<SpeedText>, Without<LapText>)>,
) {
    if let Ok(mut text) = speed.single_mut() {
        text.0 = format!("{:.0} km/h", simulation.current_speed);
    }
    if let Ok(mut text) = lap.single_mut() {
        let progress = &simulation.progress;
        let shown = (progress.laps_complete() + 1).min(progress.total_laps());
        text.0 = format!("LAP {}/{}", shown, progress.total_laps());
    }
    if let Ok(mut text) = timer.single_mut() {
        text.0 = format_time(simulation.progress.elapsed_millis());
    }
}

pub fn cleanup_hud(mut commands: Commands, hud: Query<Entity, With<HudEntity>>) {
    for entity in &hud {
        commands.entity(entity).despawn();
    }
}
