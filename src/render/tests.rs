#[cfg(test)]
mod camera_tests {
    use crate::render::Camera;
    use crate::spatial::math::V3c;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new(V3c::new(0., 0., -10.), V3c::new(0., 0., 0.), 1.);
        let ray = camera.ray_for_pixel(1, 1, 3, 3);
        assert_eq!(ray.origin, camera.eye);
        assert!(ray.is_valid());
        assert!((ray.direction - V3c::new(0., 0., 1.)).length() < 0.0001);
    }

    #[test]
    fn test_first_row_is_the_top_of_the_image() {
        let camera = Camera::new(V3c::new(5., 5., 5.), V3c::new(0., 5., 0.), 1.2);
        let top = camera.ray_for_pixel(4, 0, 8, 8);
        let bottom = camera.ray_for_pixel(4, 7, 8, 8);
        assert!(top.direction.y > 0.);
        assert!(bottom.direction.y < 0.);
        assert!((top.direction.y + bottom.direction.y).abs() < 0.0001);
    }

    #[test]
    fn test_wider_field_of_view_spreads_rays() {
        let narrow = Camera::new(V3c::new(0., 0., -10.), V3c::unit(0.), 0.5);
        let wide = Camera::new(V3c::new(0., 0., -10.), V3c::unit(0.), 1.5);
        let forward = V3c::new(0., 0., 1.);
        let narrow_corner = narrow.ray_for_pixel(0, 0, 16, 16).direction;
        let wide_corner = wide.ray_for_pixel(0, 0, 16, 16).direction;
        assert!(wide_corner.dot(&forward) < narrow_corner.dot(&forward));
    }
}

#[cfg(test)]
mod render_tests {
    use crate::octree::{Albedo, OctreeBuffer, OctreeBuilder, TraceOutcome, V3c};
    use crate::render::{render, Camera, RenderConfig};
    use crate::texture::MaterialPalette;

    const FLOOR: u32 = 0x22AA44FF;
    const SKY: u32 = 0x102030FF;

    fn make_floor() -> OctreeBuffer {
        let mut builder = OctreeBuilder::new();
        for x in 0..4 {
            for z in 0..4 {
                builder.insert(&V3c::new(x, 0, z), 1).ok().unwrap();
            }
        }
        builder.build().ok().unwrap()
    }

    fn make_palette() -> MaterialPalette {
        MaterialPalette::new().with_material(1, Albedo::from(FLOOR))
    }

    #[test]
    fn test_render_matches_tracing_each_pixel() {
        let octree = make_floor();
        let palette = make_palette();
        let camera = Camera::new(V3c::new(2., 6., -6.), V3c::new(2., 0., 2.), 1.);
        let config = RenderConfig::default()
            .with_size(20, 12)
            .with_background(Albedo::from(SKY));
        let image = render(&octree, &palette, &camera, &config);

        assert_eq!(image.dimensions(), (20, 12));
        for (x, y, pixel) in image.enumerate_pixels() {
            let ray = camera.ray_for_pixel(x, y, 20, 12);
            assert_eq!(Albedo::from(*pixel), octree.trace(&ray, &palette, &config));
        }
        assert!(image
            .pixels()
            .any(|pixel| Albedo::from(*pixel) == Albedo::from(FLOOR)));
        assert!(image
            .pixels()
            .any(|pixel| Albedo::from(*pixel) == Albedo::from(SKY)));
    }

    #[test]
    fn test_render_covers_partial_tiles() {
        let octree = make_floor();
        // Looking away from the octree, so every pixel is background
        let camera = Camera::new(V3c::new(2., 6., -6.), V3c::new(2., 6., -20.), 1.);
        let config = RenderConfig::default()
            .with_size(13, 11)
            .with_background(Albedo::from(SKY));
        let image = render(&octree, &make_palette(), &camera, &config);

        assert_eq!(image.dimensions(), (13, 11));
        assert!(image
            .pixels()
            .all(|pixel| Albedo::from(*pixel) == Albedo::from(SKY)));
    }

    #[test]
    fn test_render_empty_viewport() {
        let camera = Camera::new(V3c::new(2., 6., -6.), V3c::new(2., 0., 2.), 1.);
        let config = RenderConfig::default().with_size(0, 7);
        let image = render(&make_floor(), &make_palette(), &camera, &config);
        assert_eq!(image.dimensions(), (0, 7));
    }

    #[test]
    fn test_corrupted_octree_renders_background() {
        // Every record points back to the root, so rays never reach a voxel
        let mut data = vec![1 << 20, 0, 0, 0];
        data.extend([4; 8]);
        let octree = OctreeBuffer::new_unchecked(data).ok().unwrap();
        let camera = Camera::new(V3c::new(-100., 50., -100.), V3c::unit(512.), 1.);
        let config = RenderConfig::default()
            .with_size(9, 9)
            .with_background(Albedo::from(SKY));

        let ray = camera.ray_for_pixel(4, 4, 9, 9);
        assert!(matches!(
            octree.get_by_ray_within(&ray, config.max_depth),
            TraceOutcome::DepthExceeded { .. }
        ));
        let image = render(&octree, &make_palette(), &camera, &config);
        assert!(image
            .pixels()
            .all(|pixel| Albedo::from(*pixel) == Albedo::from(SKY)));
    }

    #[test]
    fn test_heatmap_only_brightens_misses() {
        let octree = make_floor();
        let palette = make_palette();
        let plain = RenderConfig::default().with_background(Albedo::from(SKY));
        let heatmap = plain.with_iteration_heatmap(true).with_heatmap_step(10);

        let miss = TraceOutcome::Miss { iterations: 3 };
        assert_eq!(miss.shade(&palette, &plain), Albedo::from(SKY));
        assert_eq!(miss.shade(&palette, &heatmap), Albedo::from(0x2E3E4EFF));

        let saturated = TraceOutcome::Miss { iterations: 1000 };
        assert_eq!(
            saturated.shade(&palette, &heatmap),
            Albedo::from(0xFFFFFFFF)
        );

        let camera = Camera::new(V3c::new(2., 6., -6.), V3c::new(2., 0., 2.), 1.);
        let hit = octree.get_by_ray(&camera.ray_for_pixel(0, 0, 1, 1));
        assert!(hit.hit().is_some());
        assert_eq!(hit.shade(&palette, &heatmap), Albedo::from(FLOOR));
        assert_eq!(hit.shade(&palette, &plain), Albedo::from(FLOOR));
    }

    #[test]
    fn test_max_depth_is_capped() {
        let config = RenderConfig::default().with_max_depth(100);
        assert_eq!(config.max_depth, crate::octree::MAX_TRAVERSAL_DEPTH);
        let config = RenderConfig::default().with_max_depth(0);
        assert_eq!(config.max_depth, 1);
    }
}
