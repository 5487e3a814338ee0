//! The interactive view plugin.
//!
//! [`ReachVizPlugin`] adds the camera, cursor targeting, arm drawing and FPS
//! readout to an app that already has windowing and rendering.

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use reach_core::ReachSet;
use reach_core::config::ViewConfig;

use crate::camera;
use crate::draw::{self, ArmPalette};
use crate::input;
use crate::overlay;

/// Bevy plugin for the interactive arm view.
///
/// Adds:
/// - 2D camera scaled by [`ViewConfig::zoom`]
/// - cursor-to-target mapping in [`ReachSet::Input`]
/// - arm and target gizmos in [`ReachSet::Draw`]
/// - FPS text overlay
///
/// Expects `DefaultPlugins`, [`ReachCorePlugin`](reach_core::ReachCorePlugin)
/// and [`ReachIkPlugin`](reach_ik::ReachIkPlugin) to be added.
pub struct ReachVizPlugin;

impl Plugin for ReachVizPlugin {
    fn build(&self, app: &mut App) {
        let view = app
            .world_mut()
            .get_resource_or_insert_with(ViewConfig::default)
            .clone();

        app.insert_resource(clear_color(&view))
            .init_resource::<ArmPalette>()
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    draw::configure_gizmos,
                    overlay::spawn_fps_text,
                ),
            )
            .add_systems(
                Update,
                (
                    input::cursor_target_system.in_set(ReachSet::Input),
                    draw::draw_arm_system.in_set(ReachSet::Draw),
                    overlay::update_fps_text,
                ),
            );
    }
}

/// Window settings for `DefaultPlugins.set(..)`, taken from the view config.
#[allow(clippy::cast_precision_loss)]
pub fn window_plugin(view: &ViewConfig) -> WindowPlugin {
    WindowPlugin {
        primary_window: Some(Window {
            title: view.title.clone(),
            resolution: WindowResolution::new(
                view.window_size[0] as f32,
                view.window_size[1] as f32,
            ),
            ..default()
        }),
        ..default()
    }
}

pub fn clear_color(view: &ViewConfig) -> ClearColor {
    let [r, g, b] = view.background;
    ClearColor(Color::srgb_u8(r, g, b))
}
