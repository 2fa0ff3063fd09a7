/// WGSL shader for lit meshes: per-vertex normals, one point light.
pub const MESH_SHADER: &str = r#"
struct Frame {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
    object_color: vec4<f32>,
};

struct Object {
    model: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

@group(1) @binding(0)
var<uniform> object: Object;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = object.model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (object.model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = frame.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = world_normal;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(in.world_normal);
    let light_dir = normalize(frame.light_pos.xyz - in.world_pos);
    let view_dir = normalize(frame.camera_pos.xyz - in.world_pos);
    let reflect_dir = reflect(-light_dir, normal);

    let ambient = 0.1 * frame.light_color.rgb;
    let diffuse = max(dot(normal, light_dir), 0.0) * frame.light_color.rgb;
    let specular = 0.5 * pow(max(dot(view_dir, reflect_dir), 0.0), 32.0) * frame.light_color.rgb;

    let color = (ambient + diffuse + specular) * frame.object_color.rgb;
    return vec4<f32>(color, 1.0);
}
"#;
