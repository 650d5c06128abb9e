//! WGSL sources for the viewer.
//!
//! Both shaders share the [`CameraUniform`](crate::render::CameraUniform) at
//! group 0. The point shader reads a per-field
//! [`PointStyle`](crate::render::PointStyle) at group 1 so fireball and
//! smoke can use one pipeline layout with different blend states.

/// Instanced boxes: the intact object and the debris fragments.
///
/// Vertex buffer 0 is a [`MeshVertex`](crate::render::MeshVertex) unit
/// cube; buffer 1 holds [`BoxInstance`](crate::render::BoxInstance)s.
pub const BOX_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
};

@vertex
fn vs_main(
    @location(0) local_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) instance_pos: vec3<f32>,
    @location(3) instance_scale: vec3<f32>,
) -> VertexOutput {
    let world_pos = instance_pos + local_pos * instance_scale;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(world_pos, 1.0);
    out.normal = normal;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let light = normalize(vec3<f32>(0.4, 0.8, 0.6));
    let diffuse = max(dot(normalize(in.normal), light), 0.0);
    let metal = vec3<f32>(0.55, 0.57, 0.6);
    return vec4<f32>(metal * (0.35 + 0.65 * diffuse), 1.0);
}
"#;

/// Camera-facing point sprites for fireball and smoke.
///
/// Vertex buffer 0 holds [`PointInstance`](crate::render::PointInstance)s;
/// each instance expands to a six-vertex quad.
pub const POINT_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

struct PointStyle {
    opacity: f32,
    half_size: f32,
    proj_scale: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> style: PointStyle;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) particle_pos: vec3<f32>,
    @location(1) particle_color: vec3<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    let quad_pos = quad_vertices[vertex_index];

    var clip_pos = camera.view_proj * vec4<f32>(particle_pos, 1.0);
    // World-space sprite size, shrinking with distance
    clip_pos.x += quad_pos.x * style.half_size * style.proj_scale.x;
    clip_pos.y += quad_pos.y * style.half_size * style.proj_scale.y;

    var out: VertexOutput;
    out.clip_position = clip_pos;
    out.color = particle_color;
    out.uv = quad_pos;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let edge = 1.0 - smoothstep(0.5, 1.0, dist);
    let alpha = style.opacity * edge;
    // Premultiplied: additive for fireball, over-blended for smoke
    return vec4<f32>(in.color * alpha, alpha);
}
"#;
