use log::info;
use std::error::Error;
use voxcast_rs::octree::{Albedo, OctreeBuilder, V3c};
use voxcast_rs::render::{render, Camera, RenderConfig};
use voxcast_rs::texture::{LayeredTexture, MaterialPalette, TextureArray};

const SCENE_SIZE: i32 = 64;
const DEFAULT_OUTPUT: &str = "voxcast_render.png";

const GRASS: u32 = 1;
const DIRT: u32 = 2;
const STONE: u32 = 3;

/// Rolling terrain: a grass layer on top of dirt, with stone deeper down
fn build_terrain() -> Result<OctreeBuilder, Box<dyn Error>> {
    let mut builder = OctreeBuilder::new();
    for x in 0..SCENE_SIZE {
        for z in 0..SCENE_SIZE {
            let height = 8.
                + (x as f32 / 7.).sin() * 4.
                + (z as f32 / 11.).cos() * 5.
                + ((x + z) as f32 / 5.).sin() * 1.5;
            let height = height.max(1.) as i32;
            for y in 0..height {
                let material = if y == height - 1 {
                    GRASS
                } else if y > height - 4 {
                    DIRT
                } else {
                    STONE
                };
                builder.insert(&V3c::new(x, y, z), material)?;
            }
        }
    }
    Ok(builder)
}

fn make_palette() -> MaterialPalette {
    let dirt = Albedo::from(0x7A5230FF);
    MaterialPalette::new()
        .with_faces(
            GRASS,
            [
                Albedo::from(0x4CAF50FF),
                dirt,
                Albedo::from(0x5D8A3AFF),
                Albedo::from(0x5D8A3AFF),
                Albedo::from(0x6A9A45FF),
                Albedo::from(0x6A9A45FF),
            ],
        )
        .with_material(DIRT, dirt)
        .with_faces(
            STONE,
            [
                Albedo::from(0x9E9E9EFF),
                Albedo::from(0x616161FF),
                Albedo::from(0x808080FF),
                Albedo::from(0x757575FF),
                Albedo::from(0x8A8A8AFF),
                Albedo::from(0x6E6E6EFF),
            ],
        )
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let texture_path = args.next();

    let builder = build_terrain()?;
    info!(
        "terrain of {} voxels, bounds: {:?}",
        builder.voxel_count(),
        builder.bounds()
    );
    let octree = builder.build()?;

    let textures: Box<dyn LayeredTexture + Sync> = match texture_path {
        Some(path) => {
            info!("loading textures from {path}");
            Box::new(TextureArray::load(path)?)
        }
        None => Box::new(make_palette()),
    };

    let camera = Camera::new(
        V3c::new(90., 50., 90.),
        V3c::new(32., 10., 32.),
        60_f32.to_radians(),
    );
    let config = RenderConfig::default()
        .with_size(640, 480)
        .with_background(Albedo::from(0x87CEEBFF));
    let image = render(&octree, textures.as_ref(), &camera, &config);
    image.save(&output)?;
    info!("render saved to {output}");
    Ok(())
}
