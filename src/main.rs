mod best_times;
mod camera;
mod finish_screen;
mod game_logic;
mod hud;
mod input;
mod simulation;
mod timing;
mod title_screen;
mod track_library;
mod track_render;

use best_times::{BestTimes, BEST_TIMES_PATH};
use bevy::{prelude::*, window::PresentMode};
use camera::{camera_setup, WIN_H, WIN_W};
use finish_screen::{check_for_finish_input, cleanup_finish_screen, setup_finish_screen};
use game_logic::DriveInput;
use hud::{cleanup_hud, setup_hud, update_hud};
use input::read_player_input;
use simulation::{advance_simulation, setup_race};
use title_screen::{
    check_for_title_input, cleanup_title_screen, setup_title_screen, update_track_list,
};
use track_library::{TrackLibrary, TRACKS_PATH};
use track_render::{cleanup_race, draw_track, spawn_car_sprite, sync_car_sprite};

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Title,
    Playing,
    Finished,
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Apex Circuit".into(),
                resolution: (WIN_W, WIN_H).into(),
                present_mode: PresentMode::AutoVsync,
                resizable: false, // the track is laid out against a fixed view
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.10, 0.40, 0.0)))
        .insert_resource(TrackLibrary::load(TRACKS_PATH))
        .insert_resource(BestTimes::load(BEST_TIMES_PATH))
        .init_resource::<DriveInput>()
        .init_state::<GameState>()
        .add_systems(Startup, camera_setup)
        .add_systems(OnEnter(GameState::Title), setup_title_screen)
        .add_systems(OnExit(GameState::Title), cleanup_title_screen)
        .add_systems(
            Update,
            (update_track_list, check_for_title_input).run_if(in_state(GameState::Title)),
        )
        .add_systems(
            OnEnter(GameState::Playing),
            (setup_race, spawn_car_sprite, setup_hud).chain(),
        )
        .add_systems(OnExit(GameState::Playing), (cleanup_race, cleanup_hud))
        .add_systems(
            Update,
            (
                read_player_input,
                advance_simulation,
                sync_car_sprite,
                update_hud,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            Update,
            draw_track.run_if(in_state(GameState::Playing).or(in_state(GameState::Finished))),
        )
        .add_systems(OnEnter(GameState::Finished), setup_finish_screen)
        .add_systems(OnExit(GameState::Finished), cleanup_finish_screen)
        .add_systems(
            Update,
            check_for_finish_input.run_if(in_state(GameState::Finished)),
        )
        .run();
}
