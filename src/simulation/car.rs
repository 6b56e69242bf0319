//! Cars: pose, kinematics and per-car race bookkeeping.
//!
//! A car is a plain data record. The track is only consulted through the
//! [`Track`] predicates, and the brain only sees the sensor readings.

use ndarray::Array1;

use super::brain::{Brain, Controls};
use super::geometric_utils::{heading_vector, rotate_mut, wrap_degrees};
use super::params::Params;
use super::sensor::{self, Ray};
use super::track::Track;

/// A simulated vehicle with its own controller.
#[derive(Debug, Clone)]
pub struct Car {
    /// Index of the car within its generation.
    pub id: usize,
    /// Position on the track.
    pub pos: Array1<f32>,
    /// Heading in degrees, always in `[0, 360)`.
    pub heading: f32,
    /// Unit vector along the heading.
    pub direction: Array1<f32>,
    /// Current speed, always in `[0, top_speed]`.
    pub speed: f32,
    /// Set once the car is out of the race.
    pub crashed: bool,
    /// Fitness: checkpoint points collected this generation.
    pub score: i32,
    /// Latched while the car is credited for the checkpoint it is crossing.
    pub in_checkpoint: bool,
    /// Latched while the car exits forward through an anti-checkpoint.
    pub anti_colliding: bool,
    /// One ray per sensor bundle.
    pub rays: Vec<Ray>,
    /// Controls applied on the last tick.
    pub controls: Controls,
    /// Neural network that drives the car.
    pub brain: Brain,
}

impl Car {
    /// Creates a car at the spawn pose with the given brain.
    pub fn new(id: usize, brain: Brain, params: &Params) -> Self {
        let heading = wrap_degrees(params.spawn_heading);
        let clear = sensor::reading(&[], params);
        Self {
            id,
            pos: Array1::from_vec(vec![params.spawn_x, params.spawn_y]),
            heading,
            direction: heading_vector(heading),
            speed: 0.0,
            crashed: false,
            score: 0,
            in_checkpoint: false,
            anti_colliding: false,
            rays: params
                .sensor_angles
                .iter()
                .map(|&angle| Ray::new(angle, heading, clear))
                .collect(),
            controls: Controls::IDLE,
            brain,
        }
    }

    /// Creates a car at the spawn pose with a freshly randomised brain.
    pub fn new_random(id: usize, params: &Params) -> Self {
        let brain = Brain::new_random(
            params.input_size(),
            params.hidden_neurons,
            params.hidden_activation,
            params.init_weight_scale,
            params.init_bias_scale,
        );
        Self::new(id, brain, params)
    }

    /// Whether the car is still racing.
    pub fn is_alive(&self) -> bool {
        !self.crashed
    }

    /// Controller input: `[speed, reading_0, ..., reading_n]`.
    pub fn brain_inputs(&self) -> Array1<f32> {
        std::iter::once(self.speed)
            .chain(self.rays.iter().map(|ray| ray.reading))
            .collect()
    }

    /// Runs the brain on the current sensor state.
    pub fn think(&self) -> Controls {
        self.brain.decide(&self.brain_inputs())
    }

    /// Advances heading, speed and position by one tick.
    ///
    /// Does nothing once the car has crashed.
    pub fn drive(&mut self, controls: Controls, params: &Params) {
        if self.crashed {
            return;
        }
        self.controls = controls;

        if controls.turn != 0 {
            self.steer(f32::from(controls.turn) * params.rotation_speed);
        }

        if controls.accelerate && self.speed < params.top_speed {
            self.speed += params.acceleration;
        } else if controls.brake && self.speed > 0.0 {
            self.speed -= params.braking_force;
        } else if !controls.accelerate && !controls.brake {
            self.speed -= params.coast_deceleration;
        }
        self.speed = self.speed.clamp(0.0, params.top_speed);

        self.pos += &(&self.direction * self.speed);
    }

    fn steer(&mut self, delta: f32) {
        let raw = self.heading + delta;
        self.heading = wrap_degrees(raw);

        if raw < 0.0 || raw >= 360.0 {
            // Crossed zero: rebuild from the heading to drop accumulated rounding.
            self.direction = heading_vector(self.heading);
            for ray in &mut self.rays {
                ray.reset_direction(self.heading);
            }
        } else {
            rotate_mut(&mut self.direction, delta);
            for ray in &mut self.rays {
                ray.rotate(delta);
            }
        }
    }

    /// Rescans every sensor ray from the current pose.
    pub fn sense(&mut self, track: &impl Track, params: &Params) {
        if self.crashed {
            return;
        }
        for ray in &mut self.rays {
            ray.scan(&self.pos, track, params);
        }
    }

    /// Corners of the car body, used for wall collisions.
    pub fn hull(&self, params: &Params) -> [Array1<f32>; 4] {
        let forward = &self.direction * (params.car_length / 2.0);
        let side = Array1::from_vec(vec![-self.direction[1], self.direction[0]])
            * (params.car_width / 2.0);
        [
            &self.pos + &forward + &side,
            &self.pos + &forward - &side,
            &self.pos - &forward - &side,
            &self.pos - &forward + &side,
        ]
    }

    /// Whether any hull corner is off the road.
    pub fn collides(&self, track: &impl Track, params: &Params) -> bool {
        self.hull(params).iter().any(|corner| track.is_solid(corner))
    }

    /// Takes the car out of the race. Absorbing.
    pub fn crash(&mut self) {
        self.crashed = true;
        self.controls = Controls::IDLE;
    }
}
