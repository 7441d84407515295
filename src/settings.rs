use bevy::prelude::*;
use thiserror::Error;

pub const GAME_WIDTH: u32 = 40;
pub const GAME_HEIGHT: u32 = 30;
pub const BLOCK_SIZE: u32 = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("block size must be non-zero")]
    ZeroBlockSize,
    #[error("playfield must be at least one block in each direction, got {width}x{height}")]
    EmptyPlayfield { width: u32, height: u32 },
    #[error("bullet velocity must be at least 1 ms per step")]
    ZeroBulletVelocity,
    #[error("bullet length must be non-zero")]
    ZeroBulletLength,
}

#[derive(Resource, Clone, Debug)]
pub struct GameSettings {
    pub title: String,
    /// Playfield size in blocks.
    pub game_width: u32,
    pub game_height: u32,
    /// Edge of one block in logical pixels; also the distance of one move.
    pub block_size: u32,
    pub bullet_length: u32,
    /// Milliseconds a bullet waits before moving up one pixel.
    pub bullet_velocity_ms: u64,
    /// Space fires only when the aircraft is armed.
    pub weapons_enabled: bool,
    pub show_help: bool,
    pub show_diagnostics: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            title: "unnamed_game".into(),
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            block_size: BLOCK_SIZE,
            bullet_length: BLOCK_SIZE / 2,
            bullet_velocity_ms: 20,
            weapons_enabled: true,
            show_help: true,
            show_diagnostics: false,
        }
    }
}

impl GameSettings {
    pub fn window_width(&self) -> f32 {
        (self.game_width * self.block_size) as f32
    }

    pub fn window_height(&self) -> f32 {
        (self.game_height * self.block_size) as f32
    }

    pub fn block(&self) -> f32 {
        self.block_size as f32
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.block_size == 0 {
            return Err(SettingsError::ZeroBlockSize);
        }
        if self.game_width == 0 || self.game_height == 0 {
            return Err(SettingsError::EmptyPlayfield {
                width: self.game_width,
                height: self.game_height,
            });
        }
        if self.bullet_velocity_ms == 0 {
            return Err(SettingsError::ZeroBulletVelocity);
        }
        if self.bullet_length == 0 {
            return Err(SettingsError::ZeroBulletLength);
        }
        Ok(())
    }

    /// Maps a top-left-origin playfield point into centred, y-up world space.
    pub fn to_world(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            x - self.window_width() / 2.0,
            self.window_height() / 2.0 - y,
        )
    }
}
