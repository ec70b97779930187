use crate::track_library::TrackLibrary;
use crate::GameState;
use bevy::prelude::*;

#[derive(Component)]
pub struct TitleScreenEntity;

#[derive(Component)]
pub struct TrackListText;

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

pub fn setup_title_screen(mut commands: Commands, library: Res<TrackLibrary>) {
    commands.spawn((
        Text2d::new("APEX CIRCUIT"),
        TextColor(Color::WHITE),
        TextFont {
            font_size: 80.0,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, 220.0, 1.0),
            ..default()
        },
        TitleScreenEntity,
    ));

    commands.spawn((
        Text2d::new(track_list(&library)),
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, 20.0, 1.0),
            ..default()
        },
        TrackListText,
        TitleScreenEntity,
    ));

    commands.spawn((
        Text2d::new("1-9 SELECT TRACK   ENTER RACE"),
        TextColor(Color::srgb(0.7, 0.7, 0.7)),
        TextFont {
            font_size: 26.0,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, -240.0, 1.0),
            ..default()
        },
        TitleScreenEntity,
    ));
}

fn track_list(library: &TrackLibrary) -> String {
    library
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if i == library.selected { ">" } else { " " };
            if track.description.is_empty() {
                format!("{marker} {}. {}", i + 1, track.name)
            } else {
                format!("{marker} {}. {} - {}", i + 1, track.name, track.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn update_track_list(
    library: Res<TrackLibrary>,
    mut list: Query<&mut Text2d, With<TrackListText>>,
) {
    if !library.is_changed() {
        return;
    }
    if let Ok(mut text) = list.single_mut() {
        text.0 = track_list(&library);
    }
}

pub fn check_for_title_input(
    input: Res<ButtonInput<KeyCode>>,
    mut library: ResMut<TrackLibrary>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (index, key) in DIGIT_KEYS.iter().enumerate() {
        if input.just_pressed(*key) {
            library.select(index);
        }
    }

    if input.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::Playing);
    }
}

pub fn cleanup_title_screen(
    mut commands: Commands,
    screen: Query<Entity, With<TitleScreenEntity>>,
) {
    destroy_screen(&mut commands, &screen);
}

pub fn destroy_screen<CurrentScreen: Component>(
    commands: &mut Commands,
    query: &Query<Entity, With<CurrentScreen>>,
) {
    for entity in query {
        commands.entity(entity).despawn();
    }
}
