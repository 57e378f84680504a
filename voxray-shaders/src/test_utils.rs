use voxray_gpu::prelude::*;

/// Returns an orthographic camera looking down at the `y = 0` plane from
/// `y = 10`, with one pixel covering exactly one world unit.
///
/// `offset` moves the camera along the world's x and z axes, which map to
/// the screen's x and y axes.
pub fn ortho_camera(size: UVec2, offset: Vec2) -> Camera {
    let eye = vec3(offset.x, 10.0, offset.y);
    let view = Mat4::look_at_rh(eye, eye - Vec3::Y, Vec3::NEG_Z);
    let half = size.as_vec2() / 2.0;

    let projection =
        Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, 0.1, 100.0);

    let projection_view = projection * view;

    Camera {
        projection_view,
        ndc_to_world: projection_view.inverse(),
        view,
        screen: size.as_vec2().extend(0.0).extend(0.0),
    }
}

pub fn noon() -> World {
    World {
        d0: vec4(0.0, 1000.0, 0.0, 10.0),
        d1: vec4(0.25, 0.0, 0.0, 0.0),
    }
}

pub fn test_materials() -> Vec<Material> {
    vec![
        Material::new(Vec3::ZERO, 0.0),
        Material::new(vec3(0.8, 0.6, 0.4), 0.0),
        Material::new(vec3(0.2, 0.9, 0.2), 0.0),
    ]
}

/// Scene made of the `y = 0` plane (object #1, material #1) and an optional
/// box (object #2, material #2).
pub struct TestScene {
    /// Plane ends at this x coordinate
    pub plane_max_x: f32,
    pub blocker: Option<(Vec3, Vec3)>,
}

impl TestScene {
    pub fn plane() -> Self {
        Self {
            plane_max_x: f32::MAX,
            blocker: None,
        }
    }

    /// Plane that covers only the `x < 0` half-space.
    pub fn floor() -> Self {
        Self {
            plane_max_x: 0.0,
            blocker: None,
        }
    }

    pub fn with_blocker(mut self, min: Vec3, max: Vec3) -> Self {
        self.blocker = Some((min, max));
        self
    }
}

impl AccelerationStructure for TestScene {
    fn trace_nearest(&self, ray: Ray, max_distance: f32) -> Hit {
        let mut hit = Hit::none();

        if ray.direction().y != 0.0 {
            let distance = -ray.origin().y * ray.inv_direction().y;
            let position = ray.at(distance);

            if distance > 0.0
                && distance <= max_distance
                && position.x < self.plane_max_x
            {
                hit = Hit {
                    distance,
                    position,
                    normal: if ray.origin().y >= 0.0 {
                        Vec3::Y
                    } else {
                        Vec3::NEG_Y
                    },
                    material_id: MaterialId::new(1),
                    object_id: 1,
                };
            }
        }

        if let Some((min, max)) = self.blocker {
            let t0 = (min - ray.origin()) * ray.inv_direction();
            let t1 = (max - ray.origin()) * ray.inv_direction();
            let t_near = t0.min(t1);
            let t_far = t0.max(t1).min_element();
            let distance = t_near.max_element();

            if distance > 0.0
                && distance <= t_far
                && distance <= max_distance
                && distance < hit.distance
            {
                let axis = if t_near.x >= t_near.y && t_near.x >= t_near.z {
                    0
                } else if t_near.y >= t_near.z {
                    1
                } else {
                    2
                };

                let mut normal = Vec3::ZERO;
                normal[axis] = -ray.direction()[axis].signum();

                hit = Hit {
                    distance,
                    position: ray.at(distance),
                    normal,
                    material_id: MaterialId::new(2),
                    object_id: 2,
                };
            }
        }

        hit
    }
}

pub struct TestTexture {
    pub size: UVec2,
    pub texels: Vec<Vec4>,
}

impl TestTexture {
    pub fn new(size: UVec2, f: impl Fn(UVec2) -> Vec4) -> Self {
        let texels = (0..size.y)
            .flat_map(|y| (0..size.x).map(move |x| uvec2(x, y)))
            .map(f)
            .collect();

        Self { size, texels }
    }

    pub fn tex(&self) -> Tex<'_> {
        Tex::new(&self.texels, self.size)
    }

    pub fn get(&self, pos: UVec2) -> Vec4 {
        self.tex().read(pos)
    }
}

pub struct TestGBuffer {
    pub textures: [TestTexture; 4],
}

impl TestGBuffer {
    pub fn new(size: UVec2, f: impl Fn(UVec2) -> GBufferEntry) -> Self {
        let packed: Vec<_> = (0..size.x * size.y)
            .map(|idx| f(uvec2(idx % size.x, idx / size.x)).pack())
            .collect();

        let textures = [0, 1, 2, 3].map(|i| TestTexture {
            size,
            texels: packed.iter().map(|d| d[i]).collect(),
        });

        Self { textures }
    }

    /// Renders given scene, without motion vectors.
    pub fn render(camera: &Camera, scene: &TestScene) -> Self {
        let world = noon();
        let materials = test_materials();

        Self::new(camera.screen_size(), |pos| {
            GBufferEntry::unpack(crate::gbuffer::main(
                pos,
                camera,
                &world,
                scene,
                MaterialsView::new(&materials),
            ))
        })
    }

    /// Renders given scene, with motion vectors relative to `prev_camera`.
    pub fn render_with_motion(
        camera: &Camera,
        prev_camera: &Camera,
        scene: &TestScene,
    ) -> Self {
        let this = Self::render(camera, scene);

        Self::new(camera.screen_size(), |pos| {
            let mut entry = this.map().get(pos);
            let d3 = crate::motion_vectors::main(pos, prev_camera, this.map());

            entry.motion = d3.xy();
            entry.has_motion = d3.w > 0.0;
            entry
        })
    }

    pub fn map(&self) -> GBufferMap<'_> {
        GBufferMap {
            d0: self.textures[0].tex(),
            d1: self.textures[1].tex(),
            d2: self.textures[2].tex(),
            d3: self.textures[3].tex(),
        }
    }

    pub fn surfaces(&self) -> SurfaceMap<'_> {
        SurfaceMap::new(self.textures[0].tex(), self.textures[1].tex())
    }
}
