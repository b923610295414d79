//! Pairwise collision resolution.
//!
//! Each pass visits every pair of boxes once. An overlapping pair is pushed
//! apart along both axes so that it ends up `spacing` apart on each axis.
//! Pinned boxes never move; when one box of a pair is pinned the other takes
//! the whole displacement.

use log::{debug, trace};

use modelgraph_core::geometry::{Bounds, Point, Size};

/// A box taking part in relaxation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    center: Point,
    size: Size,
    pinned: bool,
}

impl Body {
    pub fn new(center: Point, size: Size) -> Self {
        Self {
            center,
            size,
            pinned: false,
        }
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn bounds(&self) -> Bounds {
        self.center.to_bounds(self.size)
    }
}

/// Outcome of a relaxation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relaxation {
    passes: usize,
    converged: bool,
}

impl Relaxation {
    /// Passes executed, including the final pass that found nothing to move.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Whether a full pass completed without moving anything and no boxes
    /// overlap. Two pinned boxes dropped onto each other never move, so they
    /// keep this `false`.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Relaxes `bodies` in place for at most `max_passes` passes.
pub fn resolve(bodies: &mut [Body], spacing: f32, max_passes: usize) -> Relaxation {
    if max_passes == 0 {
        return Relaxation {
            passes: 0,
            converged: overlapping_pairs(bodies) == 0,
        };
    }

    for pass in 1..=max_passes {
        let moved = run_pass(bodies, spacing);
        trace!(pass, moved; "Relaxation pass");
        if moved == 0 {
            let stuck = overlapping_pairs(bodies);
            if stuck > 0 {
                debug!(passes = pass, stuck; "Pinned boxes left overlapping");
            } else {
                debug!(passes = pass; "Collision resolution converged");
            }
            return Relaxation {
                passes: pass,
                converged: stuck == 0,
            };
        }
    }

    debug!(passes = max_passes; "Collision resolution hit the pass budget");
    Relaxation {
        passes: max_passes,
        converged: false,
    }
}

/// Number of pairs whose boxes share interior area.
pub fn overlapping_pairs(bodies: &[Body]) -> usize {
    let mut count = 0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if bodies[i].bounds().intersects(bodies[j].bounds()) {
                count += 1;
            }
        }
    }
    count
}

fn run_pass(bodies: &mut [Body], spacing: f32) -> usize {
    let mut moved = 0;

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, b) = (bodies[i], bodies[j]);
            let (overlap_x, overlap_y) = a.bounds().overlap(b.bounds());
            if overlap_x <= 0.0 || overlap_y <= 0.0 {
                continue;
            }

            let delta = b.center.sub_point(a.center);
            let push = Point::new(
                direction(delta.x()) * (overlap_x / 2.0 + spacing / 2.0),
                direction(delta.y()) * (overlap_y / 2.0 + spacing / 2.0),
            );

            match (a.pinned, b.pinned) {
                (false, false) => {
                    bodies[i].center = a.center.sub_point(push);
                    bodies[j].center = b.center.add_point(push);
                }
                (true, false) => bodies[j].center = b.center.add_point(push.scale(2.0)),
                (false, true) => bodies[i].center = a.center.sub_point(push.scale(2.0)),
                (true, true) => continue,
            }
            moved += 1;
        }
    }

    moved
}

/// Direction the second box of a pair moves along one axis. Coincident
/// centres separate the first box towards negative coordinates.
fn direction(delta: f32) -> f32 {
    if delta < 0.0 { -1.0 } else { 1.0 }
}
