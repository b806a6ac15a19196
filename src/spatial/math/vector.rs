use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

#[derive(Default, Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct V3c<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Copy> V3c<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
    pub fn unit(scale: T) -> Self {
        Self {
            x: scale,
            y: scale,
            z: scale,
        }
    }
}

impl<T> V3c<T>
where
    T: num_traits::Euclid + Copy,
{
    /// Component-wise euclidean remainder, always non-negative for a positive divisor
    pub fn rem_euclid(&self, divisor: &T) -> Self {
        V3c {
            x: self.x.rem_euclid(divisor),
            y: self.y.rem_euclid(divisor),
            z: self.z.rem_euclid(divisor),
        }
    }
}

impl V3c<f32> {
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalized(self) -> V3c<f32> {
        self / self.length()
    }
}

impl<T> V3c<T>
where
    T: Mul<Output = T> + Add<Output = T> + Sub<Output = T> + Copy,
{
    pub fn dot(&self, other: &V3c<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: V3c<T>) -> V3c<T> {
        V3c {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

/// Components are addressed by axis index: 0 => x, 1 => y, 2 => z
impl<T> Index<usize> for V3c<T> {
    type Output = T;

    fn index(&self, axis: usize) -> &T {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis index {axis} for a 3 dimensional vector!"),
        }
    }
}

impl<T> IndexMut<usize> for V3c<T> {
    fn index_mut(&mut self, axis: usize) -> &mut T {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Invalid axis index {axis} for a 3 dimensional vector!"),
        }
    }
}

impl<T: Add<Output = T>> Add for V3c<T> {
    type Output = V3c<T>;

    fn add(self, other: V3c<T>) -> V3c<T> {
        V3c {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T> Sub for V3c<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = V3c<T>;

    fn sub(self, other: V3c<T>) -> V3c<T> {
        V3c {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for V3c<T> {
    type Output = V3c<T>;

    fn mul(self, scalar: T) -> V3c<T> {
        V3c {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for V3c<T> {
    type Output = V3c<T>;

    fn div(self, scalar: T) -> V3c<T> {
        V3c {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl From<V3c<i32>> for V3c<f32> {
    fn from(vec: V3c<i32>) -> V3c<f32> {
        V3c::new(vec.x as f32, vec.y as f32, vec.z as f32)
    }
}

impl From<V3c<u8>> for V3c<i32> {
    fn from(vec: V3c<u8>) -> V3c<i32> {
        V3c::new(vec.x as i32, vec.y as i32, vec.z as i32)
    }
}
