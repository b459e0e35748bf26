/*
 * Renderer Module
 *
 * This module draws the flock: the twelve edges of the domain cube and one
 * arrow per boid, from its position along its forward heading. It only
 * reads the world; the simulation never depends on it.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::ui;

// World-space length of the heading arrow
const HEADING_LENGTH: f32 = 0.35;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let origin = window_rect.xy();
    let to_screen = |point| {
        model
            .camera
            .project(point)
            .map(|[x, y]| pt2(origin.x + x, origin.y + y))
    };

    // Draw world boundary to show the simulation limits
    for (a, b) in model.world.bounds().edges() {
        if let (Some(start), Some(end)) = (to_screen(a), to_screen(b)) {
            draw.line()
                .start(start)
                .end(end)
                .stroke_weight(1.0)
                .color(rgba(0.3, 0.3, 0.3, 1.0));
        }
    }

    for boid in model.world.boids() {
        let tail = boid.position();
        let tip = tail + boid.forward() * HEADING_LENGTH;

        if let (Some(start), Some(end)) = (to_screen(tail), to_screen(tip)) {
            draw.arrow()
                .start(start)
                .end(end)
                .stroke_weight(2.0)
                .color(rgba(0.86, 0.86, 0.86, 1.0));
        }
    }

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}
