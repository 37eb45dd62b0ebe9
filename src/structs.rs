//! # Core Data Structures
//!
//! This module defines the value types shared by every other module:
//!
//! - **Point**: 2D position in the arena
//! - **Vector2D**: 2D velocity/direction vector with arithmetic operations
//! - **Agent**: a moving disc with a position, velocity and goal
//! - **Obstacle**: a static disc agents steer around

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::config::AGENT_RADIUS;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Clamps each coordinate independently into `[min, max]`.
    pub fn clamped(&self, min: Point, max: Point) -> Point {
        Point {
            x: self.x.max(min.x).min(max.x),
            y: self.y.max(min.y).min(max.y),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({:.2}, {:.2})", self.x, self.y)
    }
}

impl Sub for Point {
    type Output = Vector2D;

    fn sub(self, other: Point) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Add<Vector2D> for Point {
    type Output = Point;

    fn add(self, other: Vector2D) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn normalize(&self) -> Vector2D {
        let mag = self.magnitude();
        if mag > 0.0 {
            Vector2D {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Vector2D::ZERO
        }
    }

    /// Rescales the vector down to `max` when it is longer; shorter vectors
    /// are returned unchanged.
    pub fn clamp_magnitude(&self, max: f64) -> Vector2D {
        let mag = self.magnitude();
        if mag > max {
            *self * (max / mag)
        } else {
            *self
        }
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2D({:.2}, {:.2})", self.x, self.y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Vector2D) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, scalar: f64) -> Vector2D {
        Vector2D {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// A moving agent. Agents never reference each other; every interaction is
/// recomputed from the world's agent list each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: usize,
    pub position: Point,
    pub velocity: Vector2D,
    pub goal: Point,
    pub radius: f64,
}

impl Agent {
    /// A resting agent with the default radius.
    pub fn new(id: usize, position: Point, goal: Point) -> Self {
        Agent {
            id,
            position,
            velocity: Vector2D::ZERO,
            goal,
            radius: AGENT_RADIUS,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn distance_to(&self, other: &Agent) -> f64 {
        self.position.distance(&other.position)
    }

    pub fn distance_to_goal(&self) -> f64 {
        self.position.distance(&self.goal)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Agent(id={}, pos={}, vel={}, goal={}, r={:.2})",
            self.id, self.position, self.velocity, self.goal, self.radius
        )
    }
}

/// A static circular obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Point,
    pub radius: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Obstacle {
            position: Point::new(x, y),
            radius,
        }
    }

    /// True when `point` lies within `radius + padding` of the centre
    /// (boundary inclusive).
    pub fn covers(&self, point: &Point, padding: f64) -> bool {
        self.position.distance(point) <= self.radius + padding
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Obstacle(pos={}, r={:.2})", self.position, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ==================== Point Tests ====================

    #[test]
    fn test_point_distance_same() {
        let p = Point::new(4.0, -2.0);
        assert_eq!(p.distance(&p), 0.0);
    }

    #[test]
    fn test_point_distance_diagonal() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(&p2), 5.0); // 3-4-5 triangle
    }

    #[test]
    fn test_point_distance_symmetry() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(4.0, 6.0);
        assert_eq!(p1.distance(&p2), p2.distance(&p1));
    }

    #[test]
    fn test_point_sub_operator() {
        let v = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(v, Vector2D::new(3.0, 4.0));
    }

    #[test]
    fn test_point_add_vector_operator() {
        let result = Point::new(1.0, 2.0) + Vector2D::new(3.0, 4.0);
        assert_eq!(result, Point::new(4.0, 6.0));
    }

    #[test]
    fn test_point_clamped_independent_axes() {
        let min = Point::new(8.0, 8.0);
        let max = Point::new(792.0, 592.0);

        assert_eq!(Point::new(-5.0, 300.0).clamped(min, max), Point::new(8.0, 300.0));
        assert_eq!(Point::new(400.0, 650.0).clamped(min, max), Point::new(400.0, 592.0));
        assert_eq!(Point::new(900.0, -1.0).clamped(min, max), Point::new(792.0, 8.0));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(1.5, 2.5).to_string(), "Point(1.50, 2.50)");
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    // ==================== Vector2D Tests ====================

    #[test]
    fn test_vector2d_magnitude_345() {
        assert_eq!(Vector2D::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Vector2D::new(-3.0, -4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_vector2d_normalize_zero() {
        let n = Vector2D::ZERO.normalize();
        assert_eq!(n, Vector2D::ZERO, "Zero vector should normalize to zero, not NaN");
    }

    #[test]
    fn test_vector2d_normalize_345() {
        let n = Vector2D::new(3.0, 4.0).normalize();
        assert_abs_diff_eq!(n.x, 0.6, epsilon = 1e-10);
        assert_abs_diff_eq!(n.y, 0.8, epsilon = 1e-10);
        assert_abs_diff_eq!(n.magnitude(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_vector2d_add_assign() {
        let mut v = Vector2D::new(1.0, 1.0);
        v += Vector2D::new(0.5, -2.0);
        assert_eq!(v, Vector2D::new(1.5, -1.0));
    }

    #[test]
    fn test_vector2d_clamp_magnitude_long() {
        let v = Vector2D::new(300.0, 400.0).clamp_magnitude(90.0);
        assert_abs_diff_eq!(v.magnitude(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.x / v.y, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_vector2d_clamp_magnitude_short_unchanged() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.clamp_magnitude(90.0), v, "Short vectors must not be scaled up");
    }

    // ==================== Entity Tests ====================

    #[test]
    fn test_agent_new_at_rest() {
        let agent = Agent::new(3, Point::new(10.0, 20.0), Point::new(30.0, 40.0));
        assert_eq!(agent.id, 3);
        assert_eq!(agent.velocity, Vector2D::ZERO);
        assert_eq!(agent.radius, AGENT_RADIUS);
        assert_eq!(agent.speed(), 0.0);
    }

    #[test]
    fn test_agent_distances() {
        let a = Agent::new(0, Point::new(0.0, 0.0), Point::new(0.0, 18.0));
        let b = Agent::new(1, Point::new(6.0, 8.0), Point::new(0.0, 0.0));
        assert_eq!(a.distance_to(&b), 10.0);
        assert_eq!(a.distance_to_goal(), 18.0);
    }

    #[test]
    fn test_obstacle_covers_boundary_inclusive() {
        let obstacle = Obstacle::new(0.0, 0.0, 35.0);
        assert!(obstacle.covers(&Point::new(45.0, 0.0), 10.0), "Boundary point counts as covered");
        assert!(!obstacle.covers(&Point::new(45.001, 0.0), 10.0));
        assert!(obstacle.covers(&Point::new(0.0, 0.0), 0.0));
    }

    #[test]
    fn test_agent_display() {
        let agent = Agent::new(1, Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert_eq!(
            agent.to_string(),
            "Agent(id=1, pos=Point(1.00, 2.00), vel=Vector2D(0.00, 0.00), goal=Point(3.00, 4.00), r=8.00)"
        );
    }
}
