//! Skyfire: a tiny arcade prototype grown in three iterations.
//! - `greeting`: a centred hello message, nothing else.
//! - `sim`: the aircraft, its bullets and how they are drawn.
//! - `input`: keyboard to aircraft commands.
//! - `ui`: help and diagnostics overlays.

pub mod greeting;
pub mod input;
pub mod settings;
pub mod sim;
pub mod ui;

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::ecs::query::Has;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::window::{PrimaryWindow, RawHandleWrapper};

pub use greeting::GreetingPlugin;
pub use input::InputPlugin;
pub use settings::{GameSettings, SettingsError};
pub use sim::SimPlugin;
pub use ui::UiPlugin;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Iteration {
    /// Hello message only.
    Greeting,
    /// Movable aircraft, unarmed.
    Flight,
    /// Aircraft that fires bullets.
    Combat,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Simulate,
    Render,
}

/// Frames the windowing backend gets to attach a native handle to the
/// primary window before startup counts as failed.
pub const WINDOW_GRACE_FRAMES: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WindowStatus {
    Pending,
    Ready,
    Missing,
}

/// `native` is `None` without a primary window entity, otherwise whether the
/// backend has given it a native handle yet.
pub fn window_status(frames: u32, native: Option<bool>) -> WindowStatus {
    match native {
        Some(true) => WindowStatus::Ready,
        _ if frames >= WINDOW_GRACE_FRAMES => WindowStatus::Missing,
        _ => WindowStatus::Pending,
    }
}

pub fn settings_for(iteration: Iteration) -> GameSettings {
    GameSettings {
        weapons_enabled: iteration == Iteration::Combat,
        ..default()
    }
}

pub fn build_app(iteration: Iteration) -> App {
    let settings = settings_for(iteration);
    let mut app = App::new();

    app.insert_resource(ClearColor(Color::srgb_u8(200, 200, 200)))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: settings.title.clone(),
                        resolution: (settings.window_width(), settings.window_height()).into(),
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,naga=warn,skyfire=info".into(),
                    ..default()
                }),
        )
        .insert_resource(settings)
        .configure_sets(
            Update,
            (FrameSet::Input, FrameSet::Simulate, FrameSet::Render).chain(),
        )
        .add_systems(Startup, (validate_settings, setup_camera))
        .add_systems(Update, require_native_window)
        .add_systems(Last, log_exit);

    match iteration {
        Iteration::Greeting => {
            app.add_plugins(GreetingPlugin);
        }
        Iteration::Flight | Iteration::Combat => {
            app.add_plugins(FrameTimeDiagnosticsPlugin)
                .add_plugins((SimPlugin, InputPlugin, UiPlugin));
        }
    }

    app
}

fn setup_camera(mut commands: Commands, settings: Res<GameSettings>) {
    let mut camera = Camera2dBundle::default();
    // letterbox: the whole playfield stays visible at its own aspect ratio
    camera.projection.scaling_mode = ScalingMode::AutoMin {
        min_width: settings.window_width(),
        min_height: settings.window_height(),
    };
    commands.spawn(camera);
}

fn validate_settings(settings: Res<GameSettings>, mut exit: EventWriter<AppExit>) {
    if let Err(err) = settings.validate() {
        error!("Invalid game settings: {err}");
        exit.send(AppExit::error());
    }
}

// The primary window entity exists from plugin build on; only the backend
// attaches the raw handle, and only once the OS window is really there.
fn require_native_window(
    mut frames: Local<u32>,
    mut settled: Local<bool>,
    windows: Query<Has<RawHandleWrapper>, With<PrimaryWindow>>,
    mut exit: EventWriter<AppExit>,
) {
    if *settled {
        return;
    }
    *frames += 1;
    match window_status(*frames, windows.get_single().ok()) {
        WindowStatus::Pending => {}
        WindowStatus::Ready => *settled = true,
        WindowStatus::Missing => {
            *settled = true;
            error!("Failed to create window/renderer after {} frames", *frames);
            exit.send(AppExit::error());
        }
    }
}

fn log_exit(mut exits: EventReader<AppExit>) {
    for exit in exits.read() {
        match exit {
            AppExit::Success => info!("app quit successfully"),
            AppExit::Error(code) => error!("app quit with failure status {code}"),
        }
    }
}
