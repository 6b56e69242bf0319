//! Track geometry and the occupancy predicates the cars are tested against.
//!
//! The simulation never looks at track artwork. It only asks three questions
//! about a point: is it solid, is it inside a checkpoint, is it inside an
//! anti-checkpoint. [`MaskTrack`] answers them from a cell grid and
//! [`CircuitTrack`] from polygons.

use geo::{Contains, LineString, Polygon};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::geometric_utils::to_point;

/// Read-only occupancy queries shared by all cars.
pub trait Track: Sync {
    /// Whether `point` is off the road.
    fn is_solid(&self, point: &Array1<f32>) -> bool;

    /// Whether `point` lies in a forward-progress checkpoint.
    fn is_in_checkpoint(&self, point: &Array1<f32>) -> bool;

    /// Whether `point` lies in a wrong-way gate.
    fn is_in_anti_checkpoint(&self, point: &Array1<f32>) -> bool;
}

/// Content of one [`MaskTrack`] cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Drivable road.
    #[default]
    Free,
    /// Wall or grass.
    Solid,
    /// Drivable road that awards a checkpoint.
    Checkpoint,
    /// Drivable road that marks wrong-way travel.
    AntiCheckpoint,
}

/// Track backed by a grid of unit cells, indexed `[row, column]` = `[y, x]`.
///
/// Points outside the grid are solid.
#[derive(Debug, Clone)]
pub struct MaskTrack {
    cells: Array2<Cell>,
}

impl MaskTrack {
    /// Wraps an existing cell grid.
    pub fn new(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    /// An all-free grid of `width` × `height` cells.
    pub fn open(width: usize, height: usize) -> Self {
        Self::new(Array2::from_elem((height, width), Cell::Free))
    }

    /// Sets every cell with `x0 <= x < x1` and `y0 <= y < y1`, clipped to the grid.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, cell: Cell) {
        let (height, width) = self.cells.dim();
        for y in y0..y1.min(height) {
            for x in x0..x1.min(width) {
                self.cells[[y, x]] = cell;
            }
        }
    }

    /// Cell under `point`, or `None` off the grid.
    pub fn cell_at(&self, point: &Array1<f32>) -> Option<Cell> {
        if point[0] < 0.0 || point[1] < 0.0 || !point[0].is_finite() || !point[1].is_finite() {
            return None;
        }
        let x = point[0].floor() as usize;
        let y = point[1].floor() as usize;
        self.cells.get([y, x]).copied()
    }
}

impl Track for MaskTrack {
    fn is_solid(&self, point: &Array1<f32>) -> bool {
        matches!(self.cell_at(point), None | Some(Cell::Solid))
    }

    fn is_in_checkpoint(&self, point: &Array1<f32>) -> bool {
        self.cell_at(point) == Some(Cell::Checkpoint)
    }

    fn is_in_anti_checkpoint(&self, point: &Array1<f32>) -> bool {
        self.cell_at(point) == Some(Cell::AntiCheckpoint)
    }
}

/// Shape of the procedural oval circuit.
///
/// The road is an elliptical ring around the center. Gates are placed at
/// equal angular intervals; each gate is a checkpoint immediately followed,
/// in the clockwise driving direction, by its anti-checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitLayout {
    /// Ellipse center, x coordinate.
    pub center_x: f32,
    /// Ellipse center, y coordinate.
    pub center_y: f32,
    /// Horizontal radius of the road centerline.
    pub radius_x: f32,
    /// Vertical radius of the road centerline.
    pub radius_y: f32,
    /// Road width.
    pub road_width: f32,
    /// Number of vertices used per ring.
    pub segments: usize,
    /// Number of checkpoint gates.
    pub gates: usize,
    /// Angle of the first gate past the spawn point (top of the oval), in degrees.
    pub first_gate_offset: f32,
    /// Angular width of each checkpoint, in degrees.
    pub checkpoint_span: f32,
    /// Angular width of each anti-checkpoint, in degrees.
    pub anti_checkpoint_span: f32,
}

impl Default for CircuitLayout {
    fn default() -> Self {
        Self {
            center_x: 600.0,
            center_y: 450.0,
            radius_x: 480.0,
            radius_y: 330.0,
            road_width: 110.0,
            segments: 96,
            gates: 16,
            first_gate_offset: 8.0,
            checkpoint_span: 1.5,
            anti_checkpoint_span: 1.5,
        }
    }
}

impl CircuitLayout {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(format!("track: {msg}")));

        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return invalid("radii must be positive");
        }
        if self.road_width <= 0.0 || self.road_width >= 2.0 * self.radius_x.min(self.radius_y) {
            return invalid("road_width must be positive and smaller than the inner diameter");
        }
        if self.segments < 8 {
            return invalid("segments must be at least 8");
        }
        if self.gates == 0 {
            return invalid("at least one gate is required");
        }
        let gate_span = self.checkpoint_span + self.anti_checkpoint_span;
        if self.checkpoint_span <= 0.0
            || self.anti_checkpoint_span <= 0.0
            || gate_span * self.gates as f32 >= 360.0
        {
            return invalid("gate spans must be positive and fit around the circuit");
        }
        Ok(())
    }

    /// Point on the ellipse at `angle` degrees, pushed `offset` outward from the centerline.
    pub fn ellipse_point(&self, angle: f32, offset: f32) -> (f32, f32) {
        let (sin, cos) = angle.to_radians().sin_cos();
        (
            self.center_x + (self.radius_x + offset) * cos,
            self.center_y + (self.radius_y + offset) * sin,
        )
    }

    /// Start angle of gate `i`, measured like [`CircuitLayout::ellipse_point`].
    pub fn gate_angle(&self, i: usize) -> f32 {
        -90.0 + self.first_gate_offset + i as f32 * 360.0 / self.gates as f32
    }

    fn ring(&self, offset: f32) -> LineString<f32> {
        (0..self.segments)
            .map(|i| self.ellipse_point(i as f32 * 360.0 / self.segments as f32, offset))
            .collect::<Vec<_>>()
            .into()
    }

    fn band(&self, from: f32, to: f32) -> Polygon<f32> {
        // overshoot the road edges so gates cover the full width
        let half = self.road_width / 2.0 + 2.0;
        let exterior: LineString<f32> = vec![
            self.ellipse_point(from, -half),
            self.ellipse_point(from, half),
            self.ellipse_point(to, half),
            self.ellipse_point(to, -half),
        ]
        .into();
        Polygon::new(exterior, vec![])
    }
}

/// Oval circuit described by `geo` polygons.
#[derive(Debug, Clone)]
pub struct CircuitTrack {
    /// Layout the polygons were built from.
    pub layout: CircuitLayout,
    /// Drivable ring: outer edge as exterior, inner edge as hole.
    pub road: Polygon<f32>,
    /// Forward-progress gates, in driving order.
    pub checkpoints: Vec<Polygon<f32>>,
    /// Wrong-way gates, `anti_checkpoints[i]` follows `checkpoints[i]`.
    pub anti_checkpoints: Vec<Polygon<f32>>,
}

impl CircuitTrack {
    /// Builds the polygons for `layout`.
    pub fn new(layout: &CircuitLayout) -> Self {
        let half = layout.road_width / 2.0;
        let road = Polygon::new(layout.ring(half), vec![layout.ring(-half)]);

        let mut checkpoints = Vec::with_capacity(layout.gates);
        let mut anti_checkpoints = Vec::with_capacity(layout.gates);
        for i in 0..layout.gates {
            let start = layout.gate_angle(i);
            let middle = start + layout.checkpoint_span;
            checkpoints.push(layout.band(start, middle));
            anti_checkpoints.push(layout.band(middle, middle + layout.anti_checkpoint_span));
        }

        Self {
            layout: layout.clone(),
            road,
            checkpoints,
            anti_checkpoints,
        }
    }
}

impl Track for CircuitTrack {
    fn is_solid(&self, point: &Array1<f32>) -> bool {
        !self.road.contains(&to_point(point))
    }

    fn is_in_checkpoint(&self, point: &Array1<f32>) -> bool {
        let p = to_point(point);
        self.checkpoints.iter().any(|gate| gate.contains(&p))
    }

    fn is_in_anti_checkpoint(&self, point: &Array1<f32>) -> bool {
        let p = to_point(point);
        self.anti_checkpoints.iter().any(|gate| gate.contains(&p))
    }
}
