use crate::{
    octree::{
        raytracing::types::{
            ChildCandidate, TraceOutcome, TraversalStack, VoxelHit, MAX_TRAVERSAL_DEPTH,
        },
        Albedo, OctreeBuffer, EMPTY_SLOT, ROOT_NODE_INDEX,
    },
    render::RenderConfig,
    spatial::{raytracing::Ray, Cube},
    texture::{sample_face, LayeredTexture},
};

impl OctreeBuffer {
    /// Provides the nearest occupied child of the given node the ray enters
    /// farther than `visited_distance`.
    /// Calling it again with the distance of the returned child yields the next one,
    /// so children are visited in front to back order without sorting them.
    /// * `node_index` - index of the node record inside the buffer
    /// * `bounds` - the cube covered by the node
    /// * `visited_distance` - squared distance of the child visited last, or -1
    pub(crate) fn nearest_unvisited_child(
        &self,
        node_index: usize,
        bounds: &Cube,
        ray: &Ray,
        visited_distance: f32,
    ) -> Option<ChildCandidate> {
        let slots = self.node(node_index)?;
        let mut nearest: Option<ChildCandidate> = None;
        for (octant, slot) in slots.iter().enumerate() {
            if EMPTY_SLOT == *slot {
                continue;
            }
            let child_bounds = bounds.child_bounds_for(octant as u8);
            let Some(intersection) = child_bounds.intersect_ray(ray) else {
                continue;
            };
            if intersection.impact_distance > visited_distance
                && nearest.map_or(true, |current| {
                    intersection.impact_distance < current.intersection.impact_distance
                })
            {
                nearest = Some(ChildCandidate {
                    slot: *slot,
                    bounds: child_bounds,
                    intersection,
                });
            }
        }
        nearest
    }

    /// Provides the first voxel hit by the given ray, searching at most MAX_TRAVERSAL_DEPTH levels deep
    pub fn get_by_ray(&self, ray: &Ray) -> TraceOutcome {
        self.get_by_ray_within(ray, MAX_TRAVERSAL_DEPTH)
    }

    /// Provides the first voxel hit by the given ray.
    /// Descends into the nearest unvisited occupied child at each level, and steps back up
    /// to the parent once a node has no more children along the ray.
    /// Nodes of edge length 2 contain voxel materials instead of child records, so the
    /// first child accepted there is the result.
    /// * `max_depth` - the ray is given up on descending below this level, capped at MAX_TRAVERSAL_DEPTH
    pub fn get_by_ray_within(&self, ray: &Ray, max_depth: usize) -> TraceOutcome {
        let max_depth = max_depth.clamp(1, MAX_TRAVERSAL_DEPTH);
        let mut stack = TraversalStack::new();
        let mut node_index = ROOT_NODE_INDEX;
        let mut current_bounds = self.root_bounds();
        let mut level = 1;
        let mut iterations = 0;

        loop {
            iterations += 1;
            let Some(child) = self.nearest_unvisited_child(
                node_index,
                &current_bounds,
                ray,
                stack.best_distance[level],
            ) else {
                // POP
                if 1 == level {
                    return TraceOutcome::Miss { iterations };
                }
                current_bounds = Cube {
                    min_position: stack.parent_min[level],
                    size: current_bounds.size * 2.,
                };
                node_index = stack.parent_index[level];
                level -= 1;
                continue;
            };

            if current_bounds.size <= 2. {
                return TraceOutcome::Hit(VoxelHit {
                    material: child.slot as u32,
                    bounds: child.bounds,
                    axis: child.intersection.axis,
                    impact_point: child.intersection.impact_point,
                    impact_distance: child.intersection.impact_distance,
                    iterations,
                });
            }

            stack.best_distance[level] = child.intersection.impact_distance;
            if level >= max_depth {
                return TraceOutcome::DepthExceeded { iterations };
            }

            // PUSH
            stack.parent_min[level + 1] = current_bounds.min_position;
            stack.parent_index[level + 1] = node_index;
            stack.best_distance[level + 1] = -1.;
            // Negative record indices are read as the header, which has no node record
            node_index = usize::try_from(child.slot).unwrap_or(0);
            current_bounds = child.bounds;
            level += 1;
        }
    }

    /// The color seen along the given ray
    pub fn trace<T: LayeredTexture + ?Sized>(
        &self,
        ray: &Ray,
        textures: &T,
        config: &RenderConfig,
    ) -> Albedo {
        self.get_by_ray_within(ray, config.max_depth)
            .shade(textures, config)
    }
}

impl TraceOutcome {
    /// Color of the outcome: the face of the hit voxel, or the background for misses.
    /// With the iteration heatmap enabled misses are brightened by the work spent on them.
    pub fn shade<T: LayeredTexture + ?Sized>(&self, textures: &T, config: &RenderConfig) -> Albedo {
        match self {
            TraceOutcome::Hit(hit) => sample_face(
                textures,
                &hit.bounds.min_position,
                hit.material,
                hit.axis,
                &hit.impact_point,
            ),
            TraceOutcome::Miss { iterations } | TraceOutcome::DepthExceeded { iterations } => {
                if !config.iteration_heatmap {
                    return config.background;
                }
                let intensity = iterations.saturating_mul(config.heatmap_step).min(255) as u8;
                Albedo {
                    r: config.background.r.saturating_add(intensity),
                    g: config.background.g.saturating_add(intensity),
                    b: config.background.b.saturating_add(intensity),
                    a: config.background.a,
                }
            }
        }
    }
}
