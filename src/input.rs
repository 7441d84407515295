use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;

use crate::settings::GameSettings;
use crate::sim::{now_ms, Aircraft, Direction};
use crate::FrameSet;

/// What one key-down asks of the game.
#[derive(Event, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PilotCommand {
    Move(Direction),
    Fire,
    Quit,
    ToggleHelp,
    ToggleDiagnostics,
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PilotCommand>().add_systems(
            Update,
            (read_keys, apply_commands).chain().in_set(FrameSet::Input),
        );
    }
}

pub fn command_for_key(key: KeyCode) -> Option<PilotCommand> {
    match key {
        KeyCode::Escape | KeyCode::KeyQ => Some(PilotCommand::Quit),
        KeyCode::Space => Some(PilotCommand::Fire),
        KeyCode::ArrowLeft => Some(PilotCommand::Move(Direction::Left)),
        KeyCode::ArrowRight => Some(PilotCommand::Move(Direction::Right)),
        KeyCode::ArrowUp => Some(PilotCommand::Move(Direction::Up)),
        KeyCode::ArrowDown => Some(PilotCommand::Move(Direction::Down)),
        KeyCode::KeyH => Some(PilotCommand::ToggleHelp),
        KeyCode::F3 => Some(PilotCommand::ToggleDiagnostics),
        _ => None,
    }
}

// Raw keyboard events rather than ButtonInput so held keys repeat.
fn read_keys(mut key_evr: EventReader<KeyboardInput>, mut commands: EventWriter<PilotCommand>) {
    for ev in key_evr.read() {
        if ev.state != ButtonState::Pressed {
            continue;
        }
        if let Some(command) = command_for_key(ev.key_code) {
            commands.send(command);
        }
    }
}

fn apply_commands(
    mut commands: EventReader<PilotCommand>,
    mut settings: ResMut<GameSettings>,
    mut aircraft_q: Query<&mut Aircraft>,
    time: Res<Time<Real>>,
    mut exit: EventWriter<AppExit>,
) {
    for command in commands.read() {
        match *command {
            PilotCommand::Quit => {
                exit.send(AppExit::Success);
            }
            PilotCommand::Move(dir) => {
                for mut aircraft in &mut aircraft_q {
                    aircraft.nudge(dir, &settings);
                }
            }
            PilotCommand::Fire => {
                if !settings.weapons_enabled {
                    continue;
                }
                let now = now_ms(&time);
                for mut aircraft in &mut aircraft_q {
                    aircraft.fire(now);
                }
            }
            PilotCommand::ToggleHelp => settings.show_help = !settings.show_help,
            PilotCommand::ToggleDiagnostics => {
                settings.show_diagnostics = !settings.show_diagnostics;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::keyboard::{Key, NativeKey};

    fn setup_test_app(settings: GameSettings) -> App {
        let mut app = App::new();
        app.insert_resource(settings)
            .init_resource::<Time<Real>>()
            .add_event::<PilotCommand>()
            .add_systems(Update, apply_commands);
        let aircraft = Aircraft::new(app.world().resource::<GameSettings>());
        app.world_mut().spawn(aircraft);
        app
    }

    fn setup_keyboard_app() -> App {
        let mut app = App::new();
        app.insert_resource(GameSettings::default())
            .init_resource::<Time<Real>>()
            .add_event::<KeyboardInput>()
            .add_event::<PilotCommand>()
            .add_systems(Update, (read_keys, apply_commands).chain());
        let aircraft = Aircraft::new(app.world().resource::<GameSettings>());
        app.world_mut().spawn(aircraft);
        app
    }

    fn key(app: &mut App, key_code: KeyCode, state: ButtonState) {
        app.world_mut().send_event(KeyboardInput {
            key_code,
            logical_key: Key::Unidentified(NativeKey::Unidentified),
            state,
            window: Entity::PLACEHOLDER,
        });
    }

    fn send(app: &mut App, command: PilotCommand) {
        app.world_mut().send_event(command);
        app.update();
    }

    fn aircraft(app: &mut App) -> Aircraft {
        let mut q = app.world_mut().query::<&Aircraft>();
        q.single(app.world()).clone()
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(command_for_key(KeyCode::KeyQ), Some(PilotCommand::Quit));
        assert_eq!(command_for_key(KeyCode::Escape), Some(PilotCommand::Quit));
        assert_eq!(command_for_key(KeyCode::Space), Some(PilotCommand::Fire));
        assert_eq!(
            command_for_key(KeyCode::ArrowDown),
            Some(PilotCommand::Move(Direction::Down))
        );
        assert_eq!(command_for_key(KeyCode::KeyW), None);
        assert_eq!(command_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn key_downs_move_and_releases_do_not() {
        let mut app = setup_keyboard_app();
        key(&mut app, KeyCode::ArrowLeft, ButtonState::Pressed);
        key(&mut app, KeyCode::ArrowLeft, ButtonState::Released);
        key(&mut app, KeyCode::ArrowLeft, ButtonState::Pressed);
        key(&mut app, KeyCode::KeyW, ButtonState::Pressed);
        app.update();
        assert_eq!(aircraft(&mut app).pos, Vec2::new(340.0, 560.0));
    }

    #[test]
    fn held_key_repeats_count_as_moves() {
        let mut app = setup_keyboard_app();
        for _ in 0..3 {
            key(&mut app, KeyCode::ArrowUp, ButtonState::Pressed);
        }
        app.update();
        assert_eq!(aircraft(&mut app).pos, Vec2::new(380.0, 500.0));
    }

    #[test]
    fn unknown_keys_change_nothing() {
        let mut app = setup_keyboard_app();
        key(&mut app, KeyCode::KeyW, ButtonState::Pressed);
        key(&mut app, KeyCode::Enter, ButtonState::Pressed);
        key(&mut app, KeyCode::Space, ButtonState::Released);
        app.update();
        let a = aircraft(&mut app);
        assert_eq!(a.pos, Vec2::new(380.0, 560.0));
        assert!(a.bullets.is_empty());
        assert_eq!(app.should_exit(), None);
    }

    #[test]
    fn move_commands_nudge_the_aircraft() {
        let mut app = setup_test_app(GameSettings::default());
        send(&mut app, PilotCommand::Move(Direction::Left));
        send(&mut app, PilotCommand::Move(Direction::Up));
        assert_eq!(aircraft(&mut app).pos, Vec2::new(360.0, 540.0));
    }

    #[test]
    fn fire_adds_a_bullet_when_armed() {
        let mut app = setup_test_app(GameSettings::default());
        send(&mut app, PilotCommand::Fire);
        send(&mut app, PilotCommand::Fire);
        assert_eq!(aircraft(&mut app).bullets.len(), 2);
    }

    #[test]
    fn fire_is_ignored_when_unarmed() {
        let mut app = setup_test_app(GameSettings {
            weapons_enabled: false,
            ..default()
        });
        send(&mut app, PilotCommand::Fire);
        assert!(aircraft(&mut app).bullets.is_empty());
    }

    #[test]
    fn quit_exits_successfully() {
        let mut app = setup_test_app(GameSettings::default());
        assert_eq!(app.should_exit(), None);
        send(&mut app, PilotCommand::Quit);
        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }

    #[test]
    fn toggles_flip_overlay_flags() {
        let mut app = setup_test_app(GameSettings::default());
        send(&mut app, PilotCommand::ToggleHelp);
        send(&mut app, PilotCommand::ToggleDiagnostics);
        let settings = app.world().resource::<GameSettings>();
        assert!(!settings.show_help);
        assert!(settings.show_diagnostics);
    }
}
