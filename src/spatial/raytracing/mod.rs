use crate::spatial::{math::V3c, Cube};


#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Ray {
    pub origin: V3c<f32>,
    pub direction: V3c<f32>,
}

impl Ray {
    pub fn is_valid(&self) -> bool {
        (1. - self.direction.length()).abs() < 0.000001
    }

    pub fn point_at(&self, d: f32) -> V3c<f32> {
        self.origin + self.direction * d
    }
}

/// One of the three coordinate axes, used to tell which face plane a ray crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Where a ray enters a cube
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubeRayIntersection {
    /// The axis whose candidate plane the ray crossed last to enter the cube
    pub axis: Axis,
    pub impact_point: V3c<f32>,
    /// Squared distance between the ray origin and the impact point
    pub impact_distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    Below,
    Above,
    Inside,
}

impl Cube {
    /// Tells where the given ray enters the cube, should it hit it at all.
    /// Candidate plane test: on each axis the ray origin is outside of, the nearest face plane
    /// is a candidate; the ray enters the cube through the candidate plane it reaches last.
    /// A ray starting inside the cube hits it at its origin with zero distance.
    /// Distances are compared squared; only their ordering is meaningful.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<CubeRayIntersection> {
        let max_position = self.max_position();
        let mut quadrant = [Quadrant::Inside; 3];
        let mut candidate_plane = V3c::unit(0.);
        let mut inside = true;
        for axis in 0..3 {
            if ray.origin[axis] < self.min_position[axis] {
                quadrant[axis] = Quadrant::Below;
                candidate_plane[axis] = self.min_position[axis];
                inside = false;
            } else if ray.origin[axis] > max_position[axis] {
                quadrant[axis] = Quadrant::Above;
                candidate_plane[axis] = max_position[axis];
                inside = false;
            }
        }

        if inside {
            return Some(CubeRayIntersection {
                axis: Axis::X,
                impact_point: ray.origin,
                impact_distance: 0.,
            });
        }

        // Parametric distance to each candidate plane, -1 where there is nothing to cross
        let mut plane_distance = [-1.; 3];
        for axis in 0..3 {
            if quadrant[axis] != Quadrant::Inside && ray.direction[axis] != 0. {
                plane_distance[axis] =
                    (candidate_plane[axis] - ray.origin[axis]) / ray.direction[axis];
            }
        }

        let mut entry_axis = Axis::X;
        for axis in [Axis::Y, Axis::Z] {
            if plane_distance[entry_axis.index()] < plane_distance[axis.index()] {
                entry_axis = axis;
            }
        }

        let entry_distance = plane_distance[entry_axis.index()];
        if entry_distance < 0. {
            // The plane the ray needs to cross is behind it
            return None;
        }

        let mut impact_point = V3c::unit(0.);
        for axis in 0..3 {
            if axis == entry_axis.index() {
                impact_point[axis] = candidate_plane[axis];
            } else {
                impact_point[axis] = ray.origin[axis] + entry_distance * ray.direction[axis];
                if impact_point[axis] < self.min_position[axis]
                    || impact_point[axis] > max_position[axis]
                {
                    return None;
                }
            }
        }

        let to_impact = impact_point - ray.origin;
        Some(CubeRayIntersection {
            axis: entry_axis,
            impact_point,
            impact_distance: to_impact.dot(&to_impact),
        })
    }
}
