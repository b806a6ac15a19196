#[cfg(test)]
mod face_selection_tests {
    use crate::spatial::{math::V3c, raytracing::Axis};
    use crate::texture::{face_sample, CubeFace, FACES_PER_MATERIAL};

    #[test]
    fn test_face_for_each_axis_and_side() {
        let min = V3c::new(2., 2., 2.);
        let cases = [
            (Axis::Y, V3c::new(2.5, 3., 2.5), CubeFace::Top),
            (Axis::Y, V3c::new(2.5, 2., 2.5), CubeFace::Bottom),
            (Axis::X, V3c::new(3., 2.5, 2.5), CubeFace::Right),
            (Axis::X, V3c::new(2., 2.5, 2.5), CubeFace::Left),
            (Axis::Z, V3c::new(2.5, 2.5, 3.), CubeFace::Back),
            (Axis::Z, V3c::new(2.5, 2.5, 2.), CubeFace::Front),
        ];
        for (axis, impact, expected) in cases {
            assert_eq!(CubeFace::for_impact(axis, &min, &impact), expected);
        }
    }

    #[test]
    fn test_layer_of_each_face() {
        for (offset, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.layer_offset(), offset as u32);
        }
        let sample = face_sample(&V3c::unit(0.), 5, Axis::X, &V3c::new(1., 0.5, 0.5), 16);
        assert_eq!(sample.face, CubeFace::Right);
        assert_eq!(sample.layer, 5 * FACES_PER_MATERIAL + 2);
    }

    #[test]
    fn test_impact_on_minimum_corner_plane_selects_left() {
        let sample = face_sample(&V3c::unit(0.), 5, Axis::X, &V3c::new(0., 0.5, 0.5), 16);
        assert_eq!(sample.face, CubeFace::Left);
        assert_eq!(sample.layer, 5 * 6 + 3);
        assert_eq!((sample.u, sample.v), (8., 8.));
    }

    #[test]
    fn test_texel_coordinates_per_face() {
        let min = V3c::new(4., 0., -2.);
        let resolution = 10;
        // (0.2, 0.4, 0.7) relative to the voxel, snapped to the face plane on the struck axis
        let sample = |axis: Axis, impact: V3c<f32>| {
            let sample = face_sample(&min, 1, axis, &(min + impact), resolution);
            (sample.face, sample.u.round() as i32, sample.v.round() as i32)
        };
        assert_eq!(sample(Axis::Y, V3c::new(0.2, 1., 0.7)), (CubeFace::Top, 2, 7));
        assert_eq!(sample(Axis::Y, V3c::new(0.2, 0., 0.7)), (CubeFace::Bottom, 2, 3));
        assert_eq!(sample(Axis::X, V3c::new(1., 0.4, 0.7)), (CubeFace::Right, 3, 6));
        assert_eq!(sample(Axis::X, V3c::new(0., 0.4, 0.7)), (CubeFace::Left, 7, 6));
        assert_eq!(sample(Axis::Z, V3c::new(0.2, 0.4, 1.)), (CubeFace::Back, 2, 6));
        assert_eq!(sample(Axis::Z, V3c::new(0.2, 0.4, 0.)), (CubeFace::Front, 8, 6));
    }

    #[test]
    fn test_huge_material_does_not_overflow() {
        let sample = face_sample(&V3c::unit(0.), u32::MAX, Axis::Y, &V3c::new(0.5, 1., 0.5), 4);
        assert_eq!(sample.layer, u32::MAX);
    }
}

#[cfg(test)]
mod texture_array_tests {
    use crate::octree::Albedo;
    use crate::spatial::{math::V3c, raytracing::Axis};
    use crate::texture::{
        sample_face, LayeredTexture, MaterialPalette, TextureArray, TextureError,
        MISSING_TEXTURE,
    };
    use image::{Rgba, RgbaImage};

    /// Each face of the strip is filled with a color encoding its row and column
    fn make_strip(face_size: u32, rows: u32) -> RgbaImage {
        RgbaImage::from_fn(face_size * 6, face_size * rows, |x, y| {
            Rgba([(x / face_size) as u8, (y / face_size) as u8, 0, 255])
        })
    }

    #[test]
    fn test_strip_is_split_into_layers() {
        let textures = TextureArray::from_strip(&make_strip(4, 3)).unwrap();
        assert_eq!(textures.face_resolution(), 4);
        assert_eq!(textures.layer_count(), 18);
        for layer in 0..18 {
            let texel = textures.texel(layer, 1.5, 2.5).unwrap();
            assert_eq!(texel.r as u32, layer % 6);
            assert_eq!(texel.g as u32, layer / 6);
        }
        assert!(textures.texel(18, 0., 0.).is_none());
    }

    #[test]
    fn test_texel_coordinates_are_clamped() {
        let mut strip = make_strip(2, 1);
        strip.put_pixel(1, 1, Rgba([9, 9, 9, 255]));
        let textures = TextureArray::from_strip(&strip).unwrap();
        assert_eq!(
            textures.texel(0, 2., 2.),
            Some(Albedo::from(0x090909FF))
        );
        assert_eq!(textures.texel(0, -1., -3.), textures.texel(0, 0., 0.));
    }

    #[test]
    fn test_invalid_strip_dimensions() {
        for (width, height) in [(0, 0), (5, 5), (12, 3), (12, 0)] {
            let result = TextureArray::from_strip(&RgbaImage::new(width, height));
            assert!(matches!(
                result,
                Err(TextureError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn test_missing_layer_samples_fallback_color() {
        let palette = MaterialPalette::new().with_material(1, Albedo::from(0x11223344));
        let color = sample_face(
            &palette,
            &V3c::unit(0.),
            7,
            Axis::Y,
            &V3c::new(0.5, 1., 0.5),
        );
        assert_eq!(color, MISSING_TEXTURE);
        let color = sample_face(
            &palette,
            &V3c::unit(0.),
            1,
            Axis::Y,
            &V3c::new(0.5, 1., 0.5),
        );
        assert_eq!(color, Albedo::from(0x11223344));
    }

    #[test]
    fn test_palette_faces() {
        let faces = [
            Albedo::from(0x01),
            Albedo::from(0x02),
            Albedo::from(0x03),
            Albedo::from(0x04),
            Albedo::from(0x05),
            Albedo::from(0x06),
        ];
        let palette = MaterialPalette::new().with_faces(3, faces);
        assert_eq!(palette.layer_count(), 24);
        for (offset, color) in faces.iter().enumerate() {
            assert_eq!(palette.texel(18 + offset as u32, 0., 0.), Some(*color));
        }
        // materials below the highest one are not configured
        assert_eq!(palette.texel(0, 0., 0.), Some(MISSING_TEXTURE));
    }
}
