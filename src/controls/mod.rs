//! Controls plugin - maps the keyboard onto game inputs.

use arcade_snake::game::{InputEvent, InputOutcome};
use bevy::prelude::*;

use crate::driver::{GameSession, GameSet};

/// Plugin for keyboard input.
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CheatToggled>()
            .add_systems(Startup, log_controls)
            .add_systems(Update, read_controls.in_set(GameSet::Input));
    }
}

/// Message sent when cheat mode flips, for the on-screen toast.
#[derive(Message)]
pub struct CheatToggled {
    pub active: bool,
}

const ARROWS: [(KeyCode, KeyCode, InputEvent); 4] = [
    (KeyCode::ArrowUp, KeyCode::KeyW, InputEvent::ArrowUp),
    (KeyCode::ArrowDown, KeyCode::KeyS, InputEvent::ArrowDown),
    (KeyCode::ArrowLeft, KeyCode::KeyA, InputEvent::ArrowLeft),
    (KeyCode::ArrowRight, KeyCode::KeyD, InputEvent::ArrowRight),
];

/// Inputs triggered this frame, in the order the session should see them.
fn pressed_inputs(keyboard: &ButtonInput<KeyCode>) -> Vec<InputEvent> {
    let ctrl = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    let mut inputs: Vec<InputEvent> = ARROWS
        .iter()
        .filter(|(arrow, letter, _)| keyboard.any_just_pressed([*arrow, *letter]))
        .map(|(_, _, event)| *event)
        .collect();

    if ctrl && keyboard.just_pressed(KeyCode::KeyR) {
        inputs.push(InputEvent::ToggleCheat);
    }
    if keyboard.any_just_pressed([KeyCode::Space, KeyCode::Enter]) {
        inputs.push(InputEvent::Reset);
    }
    inputs
}

/// System to forward key presses to the session.
fn read_controls(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<GameSession>,
    mut cheat_writer: MessageWriter<CheatToggled>,
) {
    for input in pressed_inputs(&keyboard_input) {
        if let InputOutcome::CheatToggled(active) = session.0.on_input(input) {
            cheat_writer.write(CheatToggled { active });
        }
    }
}

fn log_controls(session: Res<GameSession>) {
    let cheat = if session.0.state().cheat().is_active() { "ON" } else { "OFF" };
    info!("Controls: arrows or WASD steer, Ctrl+R toggles cheat mode, Space/Enter restarts");
    info!("Cheat mode: {cheat}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pressed: &[KeyCode]) -> ButtonInput<KeyCode> {
        let mut input = ButtonInput::default();
        for key in pressed {
            input.press(*key);
        }
        input
    }

    #[test]
    fn r_toggles_cheats_only_with_ctrl() {
        assert!(pressed_inputs(&keys(&[KeyCode::KeyR])).is_empty());
        assert_eq!(
            pressed_inputs(&keys(&[KeyCode::ControlLeft, KeyCode::KeyR])),
            vec![InputEvent::ToggleCheat]
        );

        // Ctrl held since an earlier frame still counts.
        let mut input = keys(&[KeyCode::ControlRight]);
        input.clear();
        input.press(KeyCode::KeyR);
        assert_eq!(pressed_inputs(&input), vec![InputEvent::ToggleCheat]);
    }

    #[test]
    fn wasd_mirrors_the_arrows() {
        let pairs = [
            (KeyCode::KeyW, InputEvent::ArrowUp),
            (KeyCode::KeyS, InputEvent::ArrowDown),
            (KeyCode::KeyA, InputEvent::ArrowLeft),
            (KeyCode::KeyD, InputEvent::ArrowRight),
            (KeyCode::ArrowUp, InputEvent::ArrowUp),
        ];
        for (key, event) in pairs {
            assert_eq!(pressed_inputs(&keys(&[key])), vec![event]);
        }
        // Both bindings of one direction still make a single input.
        assert_eq!(
            pressed_inputs(&keys(&[KeyCode::KeyD, KeyCode::ArrowRight])),
            vec![InputEvent::ArrowRight]
        );
    }

    #[test]
    fn space_and_enter_reset() {
        assert_eq!(pressed_inputs(&keys(&[KeyCode::Space])), vec![InputEvent::Reset]);
        assert_eq!(pressed_inputs(&keys(&[KeyCode::Enter])), vec![InputEvent::Reset]);
    }

    #[test]
    fn held_keys_do_not_repeat() {
        let mut input = keys(&[KeyCode::ArrowLeft, KeyCode::Space]);
        input.clear();
        assert!(pressed_inputs(&input).is_empty());
    }
}
