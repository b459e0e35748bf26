/*
 * Application Module
 *
 * This module defines the viewer's model and its per-frame update. The
 * viewer is a host for the flock: it owns a FlockWorld, drives it with a
 * fixed timestep, feeds slider values in as live weights and forwards mouse
 * input to the orbit camera.
 *
 * Configuration is read from `FLOCKING_CONFIG` or `config/flock.ron` when
 * present. A bad config is fatal at startup.
 */

use std::path::PathBuf;

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};
use nannou_egui::Egui;
use tracing::{error, info, warn};

use crate::camera::Camera;
use crate::config::load_params;
use crate::debug::{DebugInfo, FlockStats};
use crate::flock::FlockWorld;
use crate::params::FlockParams;
use crate::timestep::FixedTimestep;
use crate::{renderer, ui, DEFAULT_CONFIG_PATH};

// Main model for the application
pub struct Model {
    pub world: FlockWorld,
    pub params: FlockParams,
    pub egui: Egui,
    pub camera: Camera,
    pub debug_info: DebugInfo,
    pub timestep: FixedTimestep,
    pub mouse_position: Point2,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = startup_params();

    let world = match FlockWorld::from_params(&params) {
        Ok(world) => world,
        Err(err) => {
            error!(%err, "invalid flock parameters");
            std::process::exit(1);
        }
    };

    let window_id = app
        .new_window()
        .title("Boid Flocking Simulation")
        .size(1280, 800)
        .view(renderer::view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_wheel(mouse_wheel)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let camera = Camera::new(world.center(), world.size());
    let timestep = FixedTimestep::new(params.tick_rate);

    Model {
        world,
        params,
        egui,
        camera,
        debug_info: DebugInfo::default(),
        timestep,
        mouse_position: Point2::ZERO,
    }
}

fn startup_params() -> FlockParams {
    let path = std::env::var_os("FLOCKING_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if !path.exists() {
        info!(path = %path.display(), "no flock config found, using defaults");
        return FlockParams::default();
    }

    match load_params(&path) {
        Ok(params) => params,
        Err(err) => {
            error!(%err, path = %path.display(), "failed to load flock config");
            std::process::exit(1);
        }
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    model.egui.set_elapsed_time(update.since_start);
    let response = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if response.changes.weights_changed {
        model.world.set_weights(model.params.weights);
    }
    if response.changes.tick_rate_changed {
        model.timestep.set_tick_rate(model.params.tick_rate);
    }
    model.world.set_parallel(model.params.parallel);

    if response.respawn_requested || response.changes.respawn_needed {
        respawn(model);
    }
    if response.reset_camera {
        model.camera = Camera::new(model.world.center(), model.world.size());
    }

    let ticks = if model.params.pause_simulation {
        model.timestep.reset();
        0
    } else {
        let ticks = model.timestep.advance(update.since_last);
        for _ in 0..ticks {
            model.world.tick();
        }
        ticks
    };

    model.debug_info.ticks_this_frame = ticks;
    model.debug_info.interpolation_alpha = model.timestep.alpha();
    model.debug_info.stats = FlockStats::sample(&model.world);
}

fn respawn(model: &mut Model) {
    match FlockWorld::from_params(&model.params) {
        Ok(world) => {
            model.world = world;
            model.timestep.reset();
        }
        Err(err) => warn!(%err, "respawn skipped"),
    }
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.camera.drag([pos.x, pos.y]);
    model.mouse_position = pos;
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    // Clicks on the UI never reach the camera
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.camera.start_drag([model.mouse_position.x, model.mouse_position.y]);
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.camera.end_drag();
    }
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => model.camera.zoom(y),
        MouseScrollDelta::PixelDelta(pos) => model.camera.zoom(pos.y as f32 * 0.01),
    }
}

// Pass raw window events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
