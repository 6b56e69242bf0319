//! Proximity sensors - rays of probe points tested against the track.
//!
//! Each car carries one ray per bundle angle. A ray is split into evenly
//! spaced probes; probe `k` sits at `(k + 1) * spacing` from the car. Walls
//! are treated as continuous, so once a probe hits, every probe further out on
//! the same ray is reported as hit too.

use ndarray::Array1;

use super::geometric_utils::{heading_vector, rotate_mut};
use super::params::Params;
use super::track::Track;

/// One sensor ray and its latest scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    /// Offset from the car heading, in degrees.
    pub angle: f32,
    /// Unit vector of the ray in world space.
    pub direction: Array1<f32>,
    /// World position of every probe, nearest first.
    pub endpoints: Vec<Array1<f32>>,
    /// Occupancy of every probe after propagation.
    pub hits: Vec<bool>,
    /// Value fed to the controller.
    pub reading: f32,
}

impl Ray {
    /// Creates an unscanned ray for a car facing `heading`.
    pub fn new(angle: f32, heading: f32, clear_reading: f32) -> Self {
        Self {
            angle,
            direction: heading_vector(heading + angle),
            endpoints: Vec::new(),
            hits: Vec::new(),
            reading: clear_reading,
        }
    }

    /// Rotates the ray by `degrees` along with its car.
    pub fn rotate(&mut self, degrees: f32) {
        rotate_mut(&mut self.direction, degrees);
    }

    /// Recomputes the ray direction from the car heading.
    pub fn reset_direction(&mut self, heading: f32) {
        self.direction = heading_vector(heading + self.angle);
    }

    /// Probes the track from `origin` and updates endpoints, hits and reading.
    pub fn scan(&mut self, origin: &Array1<f32>, track: &impl Track, params: &Params) {
        let spacing = params.probe_spacing();
        self.endpoints = (1..=params.sensor_probes)
            .map(|k| origin + &(&self.direction * (k as f32 * spacing)))
            .collect();
        let raw: Vec<bool> = self.endpoints.iter().map(|p| track.is_solid(p)).collect();
        self.hits = propagate_occupancy(&raw);
        self.reading = reading(&self.hits, params);
    }

    /// Index of the nearest occupied probe.
    pub fn first_hit(&self) -> Option<usize> {
        self.hits.iter().position(|&hit| hit)
    }
}

/// Applies the continuous-wall rule: a hit at probe `k` forces `k + 1` to hit.
pub fn propagate_occupancy(raw: &[bool]) -> Vec<bool> {
    let mut occupied = false;
    raw.iter()
        .map(|&hit| {
            occupied |= hit;
            occupied
        })
        .collect()
}

/// Converts propagated probe hits into the reading fed to the controller.
///
/// Single-probe rays are binary, `1.0` when hit. Longer rays report the
/// distance of the nearest hit, or [`Params::max_sensor_range`] when clear.
pub fn reading(hits: &[bool], params: &Params) -> f32 {
    let first = hits.iter().position(|&hit| hit);
    if params.sensor_probes == 1 {
        return if first.is_some() { 1.0 } else { 0.0 };
    }
    match first {
        Some(k) => (k + 1) as f32 * params.probe_spacing(),
        None => params.max_sensor_range(),
    }
}
