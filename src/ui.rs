/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. The sliders here are the only writers of the live flock
 * weights; the simulation samples them once per tick.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{FlockParams, ParamChanges};

pub struct UiResponse {
    pub changes: ParamChanges,
    pub respawn_requested: bool,
    pub reset_camera: bool,
}

pub fn update_ui(egui: &mut Egui, params: &mut FlockParams, debug_info: &DebugInfo) -> UiResponse {
    let mut respawn_requested = false;
    let mut reset_camera = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Flock Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.weights.separation, FlockParams::get_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.weights.alignment, FlockParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.weights.cohesion, FlockParams::get_weight_range()).text("Cohesion Weight"));
            });

            ui.collapsing("Flock", |ui| {
                ui.add(egui::Slider::new(&mut params.spawn_count, FlockParams::get_spawn_count_range()).text("Number of Boids"));
                ui.add(egui::Slider::new(&mut params.size, FlockParams::get_size_range()).text("World Size"));

                if ui.button("Respawn Flock").clicked() {
                    respawn_requested = true;
                }
            });

            ui.collapsing("Simulation", |ui| {
                ui.add(egui::Slider::new(&mut params.tick_rate, FlockParams::get_tick_rate_range()).text("Ticks per Second"));
                ui.checkbox(&mut params.parallel, "Parallel Update");

                ui.separator();

                let stats = &debug_info.stats;
                ui.label(format!("Tick: {}", stats.tick));
                ui.label(format!("Mean Speed: {:.3}", stats.mean_speed));
                ui.label(format!("Polarization: {:.2}", stats.polarization));
            });

            ui.collapsing("Camera Controls", |ui| {
                ui.label("Orbit: drag with the left mouse button");
                ui.label("Zoom: mouse wheel or trackpad");
                if ui.button("Reset Camera").clicked() {
                    reset_camera = true;
                }
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    UiResponse {
        changes: params.detect_changes(),
        respawn_requested,
        reset_camera,
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;

    let stats = &debug_info.stats;
    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Ticks this frame: {}", debug_info.ticks_this_frame),
        format!("Boids: {}", stats.boid_count),
        format!("Max speed: {:.3}", stats.max_speed),
        format!("Out of bounds: {}", stats.out_of_bounds),
    ];

    // Background panel in the bottom-left corner, clear of the egui window
    let panel_height = line_height * debug_texts.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Text is centered on its position, so shift right by roughly half a line
        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
