/// GLSL generation for the scene program

use crate::graphics_device::{ProgramSource, VertexAttribute, Uniform};
use super::LightingConfig;

/// Constants baked into the directional fragment stage.
///
/// Shading is `color * (dot(n, light) * scale + offset)`: a face pointing at
/// the light gets full brightness, a face pointing away gets `ambient`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingTerms {
    pub scale: f32,
    pub offset: f32,
}

impl LightingTerms {
    pub fn from_ambient(ambient: f32) -> Self {
        let scale = (1.0 - ambient) / 2.0;
        Self { scale, offset: 1.0 - scale }
    }
}

/// Generate vertex + fragment source for a lighting configuration.
///
/// Attribute and uniform names come from `VertexAttribute::name` and
/// `Uniform::name`, so a backend can look them up without parsing.
pub fn generate_program_source(config: &LightingConfig) -> ProgramSource {
    if config.directional() {
        directional_source(config)
    } else {
        unlit_source()
    }
}

fn vertex_header() -> String {
    format!(
        "attribute vec3 {position};\n\
         attribute vec3 {normal};\n\
         attribute vec4 {color};\n\
         uniform mat4 {projection};\n\
         uniform mat4 {view};\n\
         uniform mat4 {object};\n\
         varying lowp vec4 vColor;\n",
        position = VertexAttribute::Position.name(),
        normal = VertexAttribute::Normal.name(),
        color = VertexAttribute::Color.name(),
        projection = Uniform::Projection.name(),
        view = Uniform::View.name(),
        object = Uniform::Object.name(),
    )
}

fn clip_position() -> String {
    format!(
        "    gl_Position = {projection} * {view} * {object} * vec4({position}, 1.0);\n",
        projection = Uniform::Projection.name(),
        view = Uniform::View.name(),
        object = Uniform::Object.name(),
        position = VertexAttribute::Position.name(),
    )
}

fn directional_source(config: &LightingConfig) -> ProgramSource {
    let terms = LightingTerms::from_ambient(config.ambient());
    let direction = config.direction();

    let vertex = format!(
        "{header}\
         varying mediump vec3 vNormal;\n\
         void main() {{\n\
         {position}\
         \x20   vNormal = mat3({object}[0].xyz, {object}[1].xyz, {object}[2].xyz) * {normal};\n\
         \x20   vColor = {color};\n\
         }}\n",
        header = vertex_header(),
        position = clip_position(),
        object = Uniform::Object.name(),
        normal = VertexAttribute::Normal.name(),
        color = VertexAttribute::Color.name(),
    );

    let fragment = format!(
        "precision mediump float;\n\
         varying lowp vec4 vColor;\n\
         varying mediump vec3 vNormal;\n\
         void main() {{\n\
         \x20   vec3 lightDirection = vec3({x:.4}, {y:.4}, {z:.4});\n\
         \x20   float light = dot(normalize(vNormal), lightDirection) * {scale:.4} + {offset:.4};\n\
         \x20   gl_FragColor = vec4(vColor.rgb * light, vColor.a);\n\
         }}\n",
        x = direction.x,
        y = direction.y,
        z = direction.z,
        scale = terms.scale,
        offset = terms.offset,
    );

    ProgramSource { vertex, fragment }
}

fn unlit_source() -> ProgramSource {
    let vertex = format!(
        "{header}\
         void main() {{\n\
         {position}\
         \x20   vColor = {color};\n\
         }}\n",
        header = vertex_header(),
        position = clip_position(),
        color = VertexAttribute::Color.name(),
    );

    let fragment = "precision mediump float;\n\
                    varying lowp vec4 vColor;\n\
                    void main() {\n\
                    \x20   gl_FragColor = vColor;\n\
                    }\n"
        .to_string();

    ProgramSource { vertex, fragment }
}

#[cfg(test)]
#[path = "shader_source_tests.rs"]
mod tests;
