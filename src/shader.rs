//! Ink background: shader sources, uniform state and surface geometry.
//!
//! Everything here is plain data so it can be checked off-browser; the WebGL2
//! plumbing lives in `wasm::render`.

use glam::{Mat4, Vec2, Vec3};

/// Per-frame lerp weight pulling the pointer uniform toward the last sample.
pub const POINTER_DAMPING: f32 = 0.05;
/// Folds of the coordinate transform in the fragment shader.
pub const FOLD_LAYERS: u32 = 3;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

pub const PLANE_SIZE: f32 = 10.0;
pub const PLANE_SEGMENTS: u32 = 128;
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_DISTANCE: f32 = 5.0;

pub const PALETTE_A: Vec3 = Vec3::new(0.047, 0.047, 0.055);
pub const PALETTE_B: Vec3 = Vec3::new(0.267, 0.267, 0.306);
pub const PALETTE_C: Vec3 = Vec3::new(0.443, 0.353, 0.353);
pub const PALETTE_D: Vec3 = Vec3::new(0.827, 0.855, 0.851);

pub const VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 position;
layout(location = 1) in vec2 uv;

uniform mat4 uViewProjection;
uniform float uTime;
uniform vec2 uMouse;

out vec2 vUv;

void main() {
    vUv = uv;
    vec3 pos = position;

    float distToMouse = distance(uv, uMouse);
    float wave = sin(distToMouse * 10.0 - uTime * 2.0) * 0.1;
    pos.z += wave * (1.0 - distToMouse);

    gl_Position = uViewProjection * vec4(pos, 1.0);
}
"#;

/// Fragment source with [`FOLD_LAYERS`] and the palette baked in.
pub fn fragment_source() -> String {
    let v = |c: Vec3| format!("vec3({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
    format!(
        r#"#version 300 es
precision highp float;

uniform float uTime;
uniform vec2 uMouse;

in vec2 vUv;
out vec4 fragColor;

vec3 palette(float t) {{
    vec3 a = {a};
    vec3 b = {b};
    vec3 c = {c};
    vec3 d = {d};
    return a + b * cos(6.28318 * (c * t + d));
}}

void main() {{
    vec2 uv = vUv * 2.0 - 1.0;
    vec2 uv0 = uv;
    vec3 finalColor = vec3(0.0);

    for (float i = 0.0; i < {layers:.1}; i++) {{
        uv = fract(uv * 1.5) - 0.5;

        float d = length(uv) * exp(-length(uv0));
        vec3 col = palette(length(uv0) + i * 0.4 + uTime * 0.1);

        d = sin(d * 8.0 + uTime * 0.5) / 8.0;
        d = abs(d);
        d = pow(0.01 / d, 1.2);

        finalColor += col * d;
    }}

    float distToMouse = distance(vUv, uMouse);
    float mouseInfluence = smoothstep(0.5, 0.0, distToMouse);
    finalColor += {c} * mouseInfluence * 0.3;

    fragColor = vec4(finalColor * 0.15, 0.8);
}}
"#,
        a = v(PALETTE_A),
        b = v(PALETTE_B),
        c = v(PALETTE_C),
        d = v(PALETTE_D),
        layers = FOLD_LAYERS as f32,
    )
}

/// CPU twin of the shader's cosine palette.
pub fn palette(t: f32) -> Vec3 {
    let phase = (PALETTE_C * t + PALETTE_D) * std::f32::consts::TAU;
    PALETTE_A + PALETTE_B * Vec3::new(phase.x.cos(), phase.y.cos(), phase.z.cos())
}

/// Uniform values fed to the shaders each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformState {
    /// Seconds since the background mounted.
    pub time: f32,
    /// Smoothed pointer, normalized viewport coordinates with y up.
    pub mouse: Vec2,
    /// Latest raw pointer sample.
    pub target: Vec2,
    /// Page time of the first frame, ms.
    started_at: Option<f64>,
}

impl Default for UniformState {
    fn default() -> Self {
        let centre = Vec2::splat(0.5);
        Self { time: 0.0, mouse: centre, target: centre, started_at: None }
    }
}

impl UniformState {
    /// Record a pointer sample given in client pixels.
    pub fn pointer_sample(&mut self, client_x: f64, client_y: f64, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let x = (client_x / width).clamp(0.0, 1.0);
        let y = (1.0 - client_y / height).clamp(0.0, 1.0);
        self.target = Vec2::new(x as f32, y as f32);
    }

    /// Frame at page time `now` (ms). The clock starts at the first call and
    /// nothing else restarts it.
    pub fn frame_at(&mut self, now: f64) {
        let started = *self.started_at.get_or_insert(now);
        self.frame((now - started) / 1000.0);
    }

    /// Advance to `elapsed` seconds and pull the pointer one damping step.
    pub fn frame(&mut self, elapsed: f64) {
        self.time = elapsed as f32;
        self.mouse = self.mouse.lerp(self.target, POINTER_DAMPING);
    }
}

/// Canvas sizing for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    pub fn from_viewport(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Self { css_width: css_width.max(1.0), css_height: css_height.max(1.0), pixel_ratio }
    }

    /// Backing-store size in device pixels.
    pub fn drawing_buffer(&self) -> (u32, u32) {
        (
            (self.css_width * self.pixel_ratio).round() as u32,
            (self.css_height * self.pixel_ratio).round() as u32,
        )
    }

    pub fn aspect(&self) -> f32 {
        (self.css_width / self.css_height) as f32
    }

    /// Projection × view for the camera looking down -z at the plane.
    pub fn view_projection(&self) -> Mat4 {
        let projection = Mat4::perspective_rh_gl(CAMERA_FOV_DEG.to_radians(), self.aspect(), 0.1, 1000.0);
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE));
        projection * view
    }
}

/// Interleaved `[x, y, z, u, v]` vertices and triangle indices for a
/// `size × size` plane split into `segments²` quads, centred at the origin.
pub fn plane_mesh(size: f32, segments: u32) -> (Vec<f32>, Vec<u32>) {
    let segments = segments.max(1);
    let row = segments + 1;
    let mut vertices = Vec::with_capacity((row * row * 5) as usize);
    for iy in 0..row {
        let v = iy as f32 / segments as f32;
        for ix in 0..row {
            let u = ix as f32 / segments as f32;
            vertices.extend_from_slice(&[(u - 0.5) * size, (v - 0.5) * size, 0.0, u, v]);
        }
    }
    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for iy in 0..segments {
        for ix in 0..segments {
            let a = iy * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_damped_not_snapped() {
        let mut uniforms = UniformState::default();
        uniforms.pointer_sample(1000.0, 0.0, 1000.0, 800.0);
        assert_eq!(uniforms.target, Vec2::new(1.0, 1.0));
        uniforms.frame(0.016);
        assert!((uniforms.mouse.x - 0.525).abs() < 1e-6);
        for _ in 0..500 {
            uniforms.frame(1.0);
        }
        assert!((uniforms.mouse - uniforms.target).length() < 1e-4);
    }

    #[test]
    fn resize_keeps_the_clock_running() {
        let mut uniforms = UniformState::default();
        let mut surface = SurfaceSize::from_viewport(1280.0, 720.0, 1.0);
        assert_eq!(surface.drawing_buffer(), (1280, 720));
        uniforms.frame_at(10_000.0);
        assert_eq!(uniforms.time, 0.0);
        uniforms.frame_at(12_500.0);
        let before = uniforms.time;
        assert!((before - 2.5).abs() < 1e-6);

        surface = SurfaceSize::from_viewport(600.0, 900.0, 2.0);
        assert_eq!(surface.drawing_buffer(), (1200, 1800));
        assert!((surface.aspect() - 600.0 / 900.0).abs() < 1e-6);

        uniforms.frame_at(13_000.0);
        assert!(uniforms.time > before);
        assert!((uniforms.time - 3.0).abs() < 1e-6);
    }

    #[test]
    fn pointer_clamps_to_unit_square() {
        let mut uniforms = UniformState::default();
        uniforms.pointer_sample(-50.0, 2000.0, 1000.0, 800.0);
        assert_eq!(uniforms.target, Vec2::new(0.0, 0.0));
        uniforms.pointer_sample(10.0, 10.0, 0.0, 800.0);
        assert_eq!(uniforms.target, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn pixel_ratio_capped_at_two() {
        assert_eq!(SurfaceSize::from_viewport(800.0, 600.0, 3.0).drawing_buffer(), (1600, 1200));
        assert_eq!(SurfaceSize::from_viewport(800.0, 600.0, 1.5).drawing_buffer(), (1200, 900));
        assert_eq!(SurfaceSize::from_viewport(800.0, 600.0, f64::NAN).pixel_ratio, 1.0);
    }

    #[test]
    fn palette_is_periodic() {
        let a = palette(0.25);
        // c components share no common period, so only check the x channel period 1/c.x
        let b = palette(0.25 + 1.0 / PALETTE_C.x);
        assert!((a.x - b.x).abs() < 1e-4);
        for t in [0.0f32, 0.5, 1.7] {
            let p = palette(t);
            assert!(p.min_element() >= PALETTE_A.min_element() - PALETTE_B.max_element());
        }
    }

    #[test]
    fn mesh_dimensions() {
        let (vertices, indices) = plane_mesh(PLANE_SIZE, PLANE_SEGMENTS);
        assert_eq!(vertices.len(), 129 * 129 * 5);
        assert_eq!(indices.len(), 128 * 128 * 6);
        assert_eq!(*indices.iter().max().unwrap(), 129 * 129 - 1);
        assert_eq!(&vertices[..5], &[-5.0, -5.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn fragment_bakes_layer_count() {
        let src = fragment_source();
        assert!(src.contains("i < 3.0"));
        assert!(src.contains("vec3(0.443, 0.353, 0.353) * mouseInfluence"));
    }
}
