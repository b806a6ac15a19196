mod tests;

use crate::octree::Albedo;
use crate::spatial::{math::V3c, raytracing::Axis};
use image::RgbaImage;
use std::{fmt, path::Path};

/// Number of texture layers each material occupies, one for each face of a cube
pub const FACES_PER_MATERIAL: u32 = 6;

/// Displayed for materials without texture layers
pub const MISSING_TEXTURE: Albedo = Albedo {
    r: 255,
    g: 0,
    b: 255,
    a: 255,
};

///####################################################################################
/// Face selection
///####################################################################################
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    Top,
    Bottom,
    Right,
    Left,
    Back,
    Front,
}

impl CubeFace {
    /// Faces in the order of their texture layers
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Top,
        CubeFace::Bottom,
        CubeFace::Right,
        CubeFace::Left,
        CubeFace::Back,
        CubeFace::Front,
    ];

    /// Position of the face among the layers of a material
    pub fn layer_offset(self) -> u32 {
        match self {
            CubeFace::Top => 0,
            CubeFace::Bottom => 1,
            CubeFace::Right => 2,
            CubeFace::Left => 3,
            CubeFace::Back => 4,
            CubeFace::Front => 5,
        }
    }

    /// The face of the cube the impact point is on, given the axis of the face plane it was reached through.
    /// The face on the positive side is chosen when the impact is past the minimum corner on that axis.
    pub fn for_impact(axis: Axis, cube_min: &V3c<f32>, impact_point: &V3c<f32>) -> CubeFace {
        let positive_side = impact_point[axis.index()] > cube_min[axis.index()];
        match (axis, positive_side) {
            (Axis::Y, true) => CubeFace::Top,
            (Axis::Y, false) => CubeFace::Bottom,
            (Axis::X, true) => CubeFace::Right,
            (Axis::X, false) => CubeFace::Left,
            (Axis::Z, true) => CubeFace::Back,
            (Axis::Z, false) => CubeFace::Front,
        }
    }
}

/// Where to look up the color of a voxel face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceSample {
    pub face: CubeFace,
    pub layer: u32,
    /// Texel column, 0..resolution
    pub u: f32,
    /// Texel row from the top, 0..resolution
    pub v: f32,
}

/// Selects the face and the texel coordinates of an impact on a unit voxel
/// * `cube_min` - minimum corner of the voxel
/// * `material` - the material id of the voxel
/// * `axis` - axis of the face plane the ray entered the voxel through
/// * `impact_point` - where the ray entered the voxel
/// * `resolution` - edge length of a texture layer in texels
pub fn face_sample(
    cube_min: &V3c<f32>,
    material: u32,
    axis: Axis,
    impact_point: &V3c<f32>,
    resolution: u32,
) -> FaceSample {
    let resolution = resolution as f32;
    let uv = (*impact_point - *cube_min) * resolution;
    let complement = V3c::unit(resolution) - uv;
    let face = CubeFace::for_impact(axis, cube_min, impact_point);
    let (u, v) = match face {
        CubeFace::Top => (uv.x, uv.z),
        CubeFace::Bottom => (uv.x, complement.z),
        CubeFace::Right => (complement.z, complement.y),
        CubeFace::Left => (uv.z, complement.y),
        CubeFace::Back => (uv.x, complement.y),
        CubeFace::Front => (complement.x, complement.y),
    };
    FaceSample {
        face,
        layer: material
            .saturating_mul(FACES_PER_MATERIAL)
            .saturating_add(face.layer_offset()),
        u,
        v,
    }
}

/// Looks up the color of the voxel face at the impact point
pub fn sample_face<T: LayeredTexture + ?Sized>(
    texture: &T,
    cube_min: &V3c<f32>,
    material: u32,
    axis: Axis,
    impact_point: &V3c<f32>,
) -> Albedo {
    let sample = face_sample(
        cube_min,
        material,
        axis,
        impact_point,
        texture.face_resolution(),
    );
    texture
        .texel(sample.layer, sample.u, sample.v)
        .unwrap_or(MISSING_TEXTURE)
}

///####################################################################################
/// Textures
///####################################################################################
/// An indexed collection of square images, FACES_PER_MATERIAL consecutive layers for each material
pub trait LayeredTexture {
    /// Edge length of each layer in texels
    fn face_resolution(&self) -> u32;

    fn layer_count(&self) -> u32;

    /// Color at the given texel coordinates of the layer, clamped to the edges of it.
    /// None if there is no such layer
    fn texel(&self, layer: u32, u: f32, v: f32) -> Option<Albedo>;
}

/// error types during the creation of textures
#[derive(Debug)]
pub enum TextureError {
    /// The image can not be split into square faces, 6 in each row
    InvalidDimensions { width: u32, height: u32 },
    Image(image::ImageError),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::InvalidDimensions { width, height } => write!(
                f,
                "a {width}x{height} image can not be split into rows of 6 square faces"
            ),
            TextureError::Image(error) => write!(f, "unable to read texture: {error}"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Image(error) => Some(error),
            TextureError::InvalidDimensions { .. } => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(error: image::ImageError) -> Self {
        TextureError::Image(error)
    }
}

/// Texture layers stored as separate images of the same size
#[derive(Debug, Clone)]
pub struct TextureArray {
    face_size: u32,
    layers: Vec<RgbaImage>,
}

impl TextureArray {
    /// Splits an image into texture layers.
    /// Each row of the image belongs to the material matching the row index,
    /// and contains its 6 faces from left to right in the order of CubeFace::ALL.
    /// The first row belongs to material 0, which is never displayed.
    pub fn from_strip(strip: &RgbaImage) -> Result<Self, TextureError> {
        let (width, height) = strip.dimensions();
        let face_size = width / FACES_PER_MATERIAL;
        if 0 == width
            || 0 != width % FACES_PER_MATERIAL
            || 0 == height
            || 0 != height % face_size
        {
            return Err(TextureError::InvalidDimensions { width, height });
        }

        let mut layers = Vec::with_capacity((FACES_PER_MATERIAL * height / face_size) as usize);
        for row in 0..(height / face_size) {
            for face in 0..FACES_PER_MATERIAL {
                layers.push(
                    image::imageops::crop_imm(
                        strip,
                        face * face_size,
                        row * face_size,
                        face_size,
                        face_size,
                    )
                    .to_image(),
                );
            }
        }
        Ok(Self { face_size, layers })
    }

    /// Loads a texture strip image from the given path, see `from_strip`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let strip = image::open(path)?.into_rgba8();
        Self::from_strip(&strip)
    }
}

impl LayeredTexture for TextureArray {
    fn face_resolution(&self) -> u32 {
        self.face_size
    }

    fn layer_count(&self) -> u32 {
        self.layers.len() as u32
    }

    fn texel(&self, layer: u32, u: f32, v: f32) -> Option<Albedo> {
        let layer = self.layers.get(layer as usize)?;
        let max_texel = self.face_size.saturating_sub(1) as f32;
        let x = u.floor().clamp(0., max_texel) as u32;
        let y = v.floor().clamp(0., max_texel) as u32;
        Some(Albedo::from(*layer.get_pixel(x, y)))
    }
}

/// Flat colors for each face of each material, indexed by material id
#[derive(Debug, Clone, Default)]
pub struct MaterialPalette {
    faces: Vec<[Albedo; 6]>,
}

impl MaterialPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets every face of the material to the given color
    pub fn with_material(self, material: u32, color: Albedo) -> Self {
        self.with_faces(material, [color; 6])
    }

    /// Sets the faces of the material, in the order of CubeFace::ALL
    pub fn with_faces(mut self, material: u32, faces: [Albedo; 6]) -> Self {
        let material = material as usize;
        if self.faces.len() <= material {
            self.faces.resize(material + 1, [MISSING_TEXTURE; 6]);
        }
        self.faces[material] = faces;
        self
    }
}

impl LayeredTexture for MaterialPalette {
    fn face_resolution(&self) -> u32 {
        1
    }

    fn layer_count(&self) -> u32 {
        self.faces.len() as u32 * FACES_PER_MATERIAL
    }

    fn texel(&self, layer: u32, _u: f32, _v: f32) -> Option<Albedo> {
        let material = (layer / FACES_PER_MATERIAL) as usize;
        let face = (layer % FACES_PER_MATERIAL) as usize;
        self.faces.get(material).map(|faces| faces[face])
    }
}
