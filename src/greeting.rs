use bevy::prelude::*;

pub const GREETING: &str = "Hello Chuc beo";

/// The debug font is 8px; the message is drawn four times that.
const FONT_SCALE: f32 = 4.0;
const DEBUG_FONT_SIZE: f32 = 8.0;

#[derive(Component)]
pub struct GreetingText;

pub struct GreetingPlugin;
impl Plugin for GreetingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, spawn_greeting);
    }
}

fn spawn_greeting(mut commands: Commands) {
    info!("greeting: {GREETING}");
    // Text2d is anchored at its centre, so the origin keeps it centred on resize.
    commands.spawn((
        Text2dBundle {
            text: Text::from_section(
                GREETING,
                TextStyle {
                    font_size: DEBUG_FONT_SIZE * FONT_SCALE,
                    color: Color::WHITE,
                    ..default()
                },
            ),
            ..default()
        },
        GreetingText,
    ));
}
