//! Frame-rate readout.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

/// Marker for the FPS text node.
#[derive(Component, Debug, Default)]
pub struct FpsText;

pub fn spawn_fps_text(mut commands: Commands) {
    commands.spawn((
        FpsText,
        Text::new(fps_label(None)),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb_u8(0, 158, 47)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

#[allow(clippy::needless_pass_by_value)]
pub fn update_fps_text(
    diagnostics: Res<DiagnosticsStore>,
    mut texts: Query<&mut Text, With<FpsText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(bevy::diagnostic::Diagnostic::smoothed);
    for mut text in &mut texts {
        **text = fps_label(fps);
    }
}

/// Text shown for a smoothed FPS reading, or a placeholder before the first
/// sample.
pub fn fps_label(fps: Option<f64>) -> String {
    fps.map_or_else(|| "FPS: --".to_owned(), |fps| format!("FPS: {fps:.0}"))
}
