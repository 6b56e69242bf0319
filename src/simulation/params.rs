use std::path::Path;

use serde::{Deserialize, Serialize};

use super::brain::Activation;
use super::error::ConfigError;
use super::track::CircuitLayout;

/// Simulation parameters that control the cars and the evolution loop.
///
/// Distances are in track pixels, speeds in pixels per tick and angles in
/// degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Number of cars per generation.
    pub population_size: usize,
    /// Spawn position, x coordinate.
    pub spawn_x: f32,
    /// Spawn position, y coordinate.
    pub spawn_y: f32,
    /// Spawn heading in degrees (0 points along +x, clockwise on screen).
    pub spawn_heading: f32,
    /// Speed gained per tick while accelerating.
    pub acceleration: f32,
    /// Speed lost per tick while braking.
    pub braking_force: f32,
    /// Speed lost per tick with no pedal pressed.
    pub coast_deceleration: f32,
    /// Maximum speed.
    pub top_speed: f32,
    /// Heading change per tick while steering, in degrees.
    pub rotation_speed: f32,
    /// Car body length, used for the collision hull.
    pub car_length: f32,
    /// Car body width, used for the collision hull.
    pub car_width: f32,
    /// Angular offsets of the sensor bundles relative to the heading.
    pub sensor_angles: Vec<f32>,
    /// Probes per sensor bundle. A single probe gives binary readings.
    pub sensor_probes: usize,
    /// Total length of each sensor ray.
    pub sensor_length: f32,
    /// Hidden layer width of the controller.
    pub hidden_neurons: usize,
    /// Activation applied after the hidden layer.
    pub hidden_activation: Activation,
    /// Scale of the initial random weights.
    pub init_weight_scale: f32,
    /// Scale of the initial random biases.
    pub init_bias_scale: f32,
    /// Weight mutation factor reached by the last car of a generation.
    pub weight_mutation_scale: f32,
    /// Bias mutation factor reached by the last car of a generation.
    pub bias_mutation_scale: f32,
    /// Score awarded per checkpoint crossing.
    pub checkpoint_score: i32,
    /// Cars this many points behind the leader are eliminated.
    pub score_slack: i32,
    /// Seconds without any checkpoint before the generation is ended.
    pub stall_timeout: f32,
    /// Simulation ticks per second.
    pub tick_rate: f32,
    /// Procedural track used by the window shell.
    pub track: CircuitLayout,
}

impl Default for Params {
    fn default() -> Self {
        let track = CircuitLayout::default();
        Self {
            population_size: 40,
            spawn_x: track.center_x,
            spawn_y: track.center_y - track.radius_y,
            spawn_heading: 0.0,
            acceleration: 0.2,
            braking_force: 0.3,
            coast_deceleration: 0.1,
            top_speed: 4.0,
            rotation_speed: 2.0,
            car_length: 20.0,
            car_width: 10.0,
            sensor_angles: vec![0.0, -45.0, 45.0],
            sensor_probes: 8,
            sensor_length: 120.0,
            hidden_neurons: 6,
            hidden_activation: Activation::Relu,
            init_weight_scale: 0.1,
            init_bias_scale: 0.1,
            weight_mutation_scale: 0.3,
            bias_mutation_scale: 0.3,
            checkpoint_score: 10,
            score_slack: 30,
            stall_timeout: 10.0,
            tick_rate: 60.0,
            track,
        }
    }
}

impl Params {
    /// Reads parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parses and validates parameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks that every parameter is in its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(msg: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg.to_string()))
        }

        if self.population_size == 0 {
            return invalid("population_size must be at least 1");
        }
        if self.top_speed <= 0.0 {
            return invalid("top_speed must be positive");
        }
        if self.acceleration < 0.0 || self.braking_force < 0.0 || self.coast_deceleration < 0.0 {
            return invalid("acceleration, braking_force and coast_deceleration must not be negative");
        }
        if self.sensor_angles.is_empty() {
            return invalid("at least one sensor bundle is required");
        }
        if self.sensor_probes == 0 {
            return invalid("sensor_probes must be at least 1");
        }
        if self.sensor_length <= 0.0 {
            return invalid("sensor_length must be positive");
        }
        if self.hidden_neurons == 0 {
            return invalid("hidden_neurons must be at least 1");
        }
        if self.weight_mutation_scale < 0.0 || self.bias_mutation_scale < 0.0 {
            return invalid("mutation scales must not be negative");
        }
        if self.checkpoint_score <= 0 || self.score_slack < 0 {
            return invalid("checkpoint_score must be positive and score_slack non-negative");
        }
        if self.stall_timeout <= 0.0 {
            return invalid("stall_timeout must be positive");
        }
        if self.tick_rate <= 0.0 {
            return invalid("tick_rate must be positive");
        }
        self.track.validate()
    }

    /// Number of controller inputs: current speed plus one reading per bundle.
    pub fn input_size(&self) -> usize {
        1 + self.sensor_angles.len()
    }

    /// Distance between consecutive probes on a sensor ray.
    pub fn probe_spacing(&self) -> f32 {
        self.sensor_length / self.sensor_probes as f32
    }

    /// Upper bound of a sensor reading.
    ///
    /// With several probes per ray this is also the reading of a clear ray;
    /// single-probe rays report `1.0` on contact and `0.0` when clear.
    pub fn max_sensor_range(&self) -> f32 {
        if self.sensor_probes == 1 {
            1.0
        } else {
            self.sensor_length + self.probe_spacing()
        }
    }
}
