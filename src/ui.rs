use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::settings::GameSettings;
use crate::sim::{Aircraft, SimStats};

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, (help_panel, diagnostics_panel));
    }
}

pub fn help_lines(weapons_enabled: bool) -> Vec<&'static str> {
    let mut lines = vec!["Arrows: Move"];
    if weapons_enabled {
        lines.push("Space: Fire");
    }
    lines.extend(["H: Toggle Help", "F3: Toggle Diagnostics", "Esc/Q: Quit"]);
    lines
}

fn help_panel(mut contexts: EguiContexts, settings: Res<GameSettings>) {
    if !settings.show_help {
        return;
    }
    egui::Window::new("Help").show(contexts.ctx_mut(), |ui| {
        for line in help_lines(settings.weapons_enabled) {
            ui.label(line);
        }
    });
}

fn diagnostics_panel(
    mut contexts: EguiContexts,
    settings: Res<GameSettings>,
    diagnostics: Res<DiagnosticsStore>,
    stats: Res<SimStats>,
    aircraft_q: Query<&Aircraft>,
) {
    if !settings.show_diagnostics {
        return;
    }
    egui::Window::new("Diagnostics").show(contexts.ctx_mut(), |ui| {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                ui.label(format!("FPS: {:.1}", value));
            }
        }
        if let Ok(aircraft) = aircraft_q.get_single() {
            ui.label(format!("Aircraft: ({:.0}, {:.0})", aircraft.pos.x, aircraft.pos.y));
        }
        if settings.weapons_enabled {
            ui.label(format!("Bullets: {}", stats.live));
            ui.label(format!("Removed last frame: {}", stats.removed));
        }
    });
}
