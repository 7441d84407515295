use bevy::prelude::*;

use crate::settings::GameSettings;
use crate::FrameSet;

const AIRCRAFT_COLOR: Color = Color::srgb(7.0 / 255.0, 54.0 / 255.0, 66.0 / 255.0);
const BULLET_COLOR: Color = Color::srgb(20.0 / 255.0, 20.0 / 255.0, 20.0 / 255.0);

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimStats>()
            .add_systems(Startup, spawn_aircraft)
            .add_systems(Update, step_bullets.in_set(FrameSet::Simulate))
            .add_systems(
                Update,
                (update_render, draw_bullets).in_set(FrameSet::Render),
            );
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bullet {
    /// Playfield pixels, y down; the tip of the bullet.
    pub pos: Vec2,
    /// Milliseconds since startup at which the bullet last moved.
    pub last_step: u64,
}

/// The player's rectangle together with everything it has fired.
#[derive(Component, Clone, Debug)]
pub struct Aircraft {
    /// Top-left corner in playfield pixels, y down.
    pub pos: Vec2,
    pub bullets: Vec<Bullet>,
    pub bullet_length: f32,
    pub bullet_velocity_ms: u64,
}

/// Outcome of one bullet pass.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StepReport {
    pub removed: usize,
    pub live: usize,
}

#[derive(Resource, Default, Deref, DerefMut)]
pub struct SimStats(pub StepReport);

impl Aircraft {
    pub fn new(settings: &GameSettings) -> Self {
        let block = settings.block();
        Self {
            pos: Vec2::new(
                settings.window_width() / 2.0 - block,
                settings.window_height() - 2.0 * block,
            ),
            bullets: Vec::new(),
            bullet_length: settings.bullet_length as f32,
            bullet_velocity_ms: settings.bullet_velocity_ms,
        }
    }

    /// Moves one block in `dir`, clamped so the whole square stays on the playfield.
    pub fn nudge(&mut self, dir: Direction, settings: &GameSettings) {
        let block = settings.block();
        let max_x = settings.window_width() - block;
        let max_y = settings.window_height() - block;
        match dir {
            Direction::Left => self.pos.x = (self.pos.x - block).max(0.0),
            Direction::Right => self.pos.x = (self.pos.x + block).min(max_x),
            Direction::Up => self.pos.y = (self.pos.y - block).max(0.0),
            Direction::Down => self.pos.y = (self.pos.y + block).min(max_y),
        }
    }

    pub fn fire(&mut self, now: u64) {
        self.bullets.push(Bullet {
            pos: Vec2::new(
                self.pos.x + self.bullet_length,
                self.pos.y - self.bullet_length,
            ),
            last_step: now,
        });
    }

    /// Advances every bullet to `now` in whole one-pixel steps and drops the
    /// ones that had already left the top of the playfield.
    ///
    /// Bullets are checked before they move, so one that crosses `y < 0` on
    /// this pass is still live and goes on the next.
    pub fn step_bullets(&mut self, now: u64) -> StepReport {
        // a zero interval would never catch up
        let interval = self.bullet_velocity_ms.max(1);
        let mut expired = Vec::new();

        for (index, bullet) in self.bullets.iter_mut().enumerate() {
            if bullet.pos.y < 0.0 {
                expired.push(index);
                continue;
            }
            while now.saturating_sub(bullet.last_step) >= interval {
                bullet.pos.y -= 1.0;
                bullet.last_step += interval;
            }
        }

        // highest index first so earlier removals don't shift later ones
        for &index in expired.iter().rev() {
            self.bullets.remove(index);
        }

        StepReport {
            removed: expired.len(),
            live: self.bullets.len(),
        }
    }
}

pub fn now_ms(time: &Time<Real>) -> u64 {
    time.elapsed().as_millis() as u64
}

fn spawn_aircraft(mut commands: Commands, settings: Res<GameSettings>) {
    let aircraft = Aircraft::new(&settings);
    info!(
        "aircraft ready at ({}, {}) on a {}x{} playfield",
        aircraft.pos.x,
        aircraft.pos.y,
        settings.window_width(),
        settings.window_height()
    );
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: AIRCRAFT_COLOR,
                custom_size: Some(Vec2::splat(settings.block())),
                ..default()
            },
            transform: Transform::from_translation(
                aircraft_center(&aircraft, &settings).extend(0.0),
            ),
            ..default()
        },
        aircraft,
    ));
}

fn aircraft_center(aircraft: &Aircraft, settings: &GameSettings) -> Vec2 {
    let half = settings.block() / 2.0;
    settings.to_world(aircraft.pos.x + half, aircraft.pos.y + half)
}

fn step_bullets(
    time: Res<Time<Real>>,
    mut stats: ResMut<SimStats>,
    mut aircraft_q: Query<&mut Aircraft>,
) {
    let now = now_ms(&time);
    for mut aircraft in &mut aircraft_q {
        // bullets moving is not the aircraft moving; keep `Changed` for nudges
        let report = aircraft.bypass_change_detection().step_bullets(now);
        debug!("removed bullets: {}", report.removed);
        debug!("bullets: {}", report.live);
        stats.0 = report;
    }
}

fn update_render(
    settings: Res<GameSettings>,
    mut q: Query<(&Aircraft, &mut Transform), Changed<Aircraft>>,
) {
    for (aircraft, mut t) in &mut q {
        let center = aircraft_center(aircraft, &settings);
        t.translation.x = center.x;
        t.translation.y = center.y;
    }
}

fn draw_bullets(mut gizmos: Gizmos, settings: Res<GameSettings>, q: Query<&Aircraft>) {
    let tail = settings.block() / 2.0;
    for aircraft in &q {
        for bullet in &aircraft.bullets {
            let start = settings.to_world(bullet.pos.x, bullet.pos.y - tail);
            let end = settings.to_world(bullet.pos.x, bullet.pos.y);
            gizmos.line_2d(start, end, BULLET_COLOR);
        }
    }
}
