/*
 * Boid Flocking Simulation - Viewer
 *
 * Opens a nannou window around the flock. Drag to orbit, scroll to zoom,
 * and use the egui panel to adjust the separation, alignment and cohesion
 * weights while the flock runs.
 */

use flocking::app::{model, update};
use flocking::logging::init_logging;

fn main() {
    init_logging("flocking=info,wgpu=error");
    nannou::app(model).update(update).run();
}
