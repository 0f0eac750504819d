// Demo binary: box-select units, group them with the digit keys, order
// them around. Run with: cargo run
use bevy::prelude::*;

use bevy_rts_select::SelectionPlugin;

mod demo;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "RTS Selection Demo".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(SelectionPlugin)
        .add_plugins(demo::DemoPlugin)
        .run();
}
