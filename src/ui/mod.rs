//! UI plugin - score display, game over screen and the cheat mode toast.

use arcade_snake::game::{GameOverReason, GamePhase, Status};
use bevy::prelude::*;

use crate::controls::CheatToggled;
use crate::driver::{GameSession, GameSet};
use crate::rendering::FrameDrawn;

const CHEAT_TOAST_SECONDS: f32 = 2.0;
const CHEAT_ON_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 1.0);
const CHEAT_OFF_COLOR: Color = Color::srgba(0.0, 1.0, 0.0, 1.0);

/// Plugin for UI overlays.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_score_text).add_systems(
            Update,
            (update_hud, refresh_cheat_marker, spawn_cheat_toast, expire_toasts)
                .chain()
                .in_set(GameSet::Hud),
        );
    }
}

/// Component to mark the score display UI element.
#[derive(Component)]
struct ScoreText;

/// Component to mark the game over overlay UI.
#[derive(Component)]
struct GameOverUI;

/// Short-lived message, removed when the timer runs out.
#[derive(Component)]
struct Toast {
    timer: Timer,
}

fn score_line(status: &Status, cheat: bool) -> String {
    let cheat = if cheat { "  [CHEAT]" } else { "" };
    format!("Score: {}  ({} ms){}", status.score, status.interval_ms(), cheat)
}

fn reason_line(reason: Option<GameOverReason>) -> &'static str {
    match reason {
        Some(GameOverReason::Wall) => "You hit the wall",
        Some(GameOverReason::SelfCollision) => "You bit yourself",
        Some(GameOverReason::BoardFull) => "You filled the board!",
        None => "",
    }
}

fn spawn_score_text(mut commands: Commands) {
    commands.spawn((
        Text::from("Score: 0"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));
}

/// Spawns the game over screen UI.
fn spawn_game_over_screen(commands: &mut Commands, score: u32, reason: Option<GameOverReason>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            GameOverUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from("GAME OVER"),
                TextFont {
                    font_size: 60.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 0.3, 0.3, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from(format!("Score: {}", score)),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(10.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from(reason_line(reason)),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from("Press SPACE to restart"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
            ));
        });
}

/// System to refresh the score and show or clear the game over screen.
fn update_hud(
    mut commands: Commands,
    mut frames: MessageReader<FrameDrawn>,
    mut score_text: Query<&mut Text, With<ScoreText>>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    let Some(frame) = frames.read().last() else {
        return;
    };

    if let Ok(mut text) = score_text.single_mut() {
        *text = Text::from(score_line(&frame.status, frame.cheat));
    }

    match frame.phase {
        GamePhase::GameOver if game_over_ui.is_empty() => {
            spawn_game_over_screen(&mut commands, frame.status.score, frame.game_over);
        }
        GamePhase::Running => {
            for entity in game_over_ui.iter() {
                commands.entity(entity).despawn();
            }
        }
        GamePhase::GameOver => {}
    }
}

/// System to keep the cheat marker right when cheats flip without a new
/// frame, as happens on the game over screen.
fn refresh_cheat_marker(
    mut toggles: MessageReader<CheatToggled>,
    session: Res<GameSession>,
    mut score_text: Query<&mut Text, With<ScoreText>>,
) {
    let Some(toggle) = toggles.read().last() else {
        return;
    };
    if let Ok(mut text) = score_text.single_mut() {
        *text = Text::from(score_line(&session.0.state().status(), toggle.active));
    }
}

/// System to flash the new cheat mode state near the top of the window.
fn spawn_cheat_toast(
    mut commands: Commands,
    mut toggles: MessageReader<CheatToggled>,
    toasts: Query<Entity, With<Toast>>,
) {
    let Some(toggle) = toggles.read().last() else {
        return;
    };
    for entity in toasts.iter() {
        commands.entity(entity).despawn();
    }

    let (label, color) = if toggle.active {
        ("CHEAT MODE: ON", CHEAT_ON_COLOR)
    } else {
        ("CHEAT MODE: OFF", CHEAT_OFF_COLOR)
    };
    commands.spawn((
        Text::from(label),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(color),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(40.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Toast {
            timer: Timer::from_seconds(CHEAT_TOAST_SECONDS, TimerMode::Once),
        },
    ));
}

fn expire_toasts(mut commands: Commands, time: Res<Time>, mut toasts: Query<(Entity, &mut Toast)>) {
    for (entity, mut toast) in toasts.iter_mut() {
        toast.timer.tick(time.delta());
        if toast.timer.is_finished() {
            commands.entity(entity).despawn();
        }
    }
}
