use vista_math::Vec3;

use crate::scene::Scene;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a scene and a view configuration, then produces
/// output. Meshes are borrowed immutably.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` as seen from `view`.
    fn render(&self, scene: &Scene<'_>, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable summary of a frame.
///
/// Used for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn vec3(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene<'_>, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene ({} objects, {} triangles) ===\n",
            scene.objects.len(),
            scene.triangle_count()
        ));
        out.push_str(&format!(
            "Camera: eye={} target={} fov={:.0}\n",
            vec3(view.eye),
            vec3(view.target),
            view.fov_degrees
        ));
        let light = &scene.lighting;
        out.push_str(&format!(
            "Light: pos={} color={} object={}\n",
            vec3(light.light_position),
            vec3(light.light_color),
            vec3(light.object_color)
        ));

        for object in &scene.objects {
            let origin = object.model.transform_point3(Vec3::ZERO);
            out.push_str(&format!(
                "  [{}] vertices={} triangles={} origin={}",
                object.label,
                object.mesh.vertex_count(),
                object.mesh.triangle_count(),
                vec3(origin)
            ));
            if let Some((lo, hi)) = object.mesh.bounds() {
                out.push_str(&format!(" bounds={}..{}", vec3(lo), vec3(hi)));
            }
            out.push('\n');
        }

        tracing::trace!(bytes = out.len(), "debug frame rendered");
        out
    }
}
