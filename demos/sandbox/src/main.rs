// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Eidolon Sandbox
// Drives the whole pipeline against the null driver: containers, bindings,
// draw call configuration and the caching context.

use std::mem;
use std::rc::Rc;

use anyhow::Result;
use eidolon_core::math::{LinearRgba, Mat4, Vec3};
use eidolon_core::renderer::api::{
    InputType, Program, ProgramInput, ProgramInputs, RenderStates, TextureDescriptor, Viewport,
};
use eidolon_core::renderer::RenderContext;
use eidolon_data::{DataContainer, IndexStream, VertexStream};
use eidolon_infra::graphics::{CachedContext, NullDriver};
use eidolon_render::{BindingMap, DrawCall, Renderer};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    uv: [f32; 2],
}

const VERTICES: &[Vertex] = &[
    Vertex {
        position: [-0.5, 0.5, 0.0],
        uv: [0.0, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5, 0.0],
        uv: [0.0, 1.0],
    },
    Vertex {
        position: [0.5, 0.5, 0.0],
        uv: [1.0, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.0],
        uv: [1.0, 1.0],
    },
];

const INDICES: &[u16] = &[0, 1, 2, 2, 1, 3];

const VERTEX_SHADER: &str = r#"
attribute vec3 aPosition;
attribute vec2 aUv;
uniform mat4 uModelToWorld;
uniform mat4 uWorldToScreen;
varying vec2 vUv;
void main() {
    vUv = aUv;
    gl_Position = uWorldToScreen * uModelToWorld * vec4(aPosition, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
uniform sampler2D uDiffuseMap;
uniform float uTime;
varying vec2 vUv;
void main() {
    gl_FragColor = texture2D(uDiffuseMap, vUv) * (0.75 + 0.25 * sin(uTime));
}
"#;

/// RGBA8 texels for a light/dark checkerboard with 8x8 texel squares.
fn checkerboard(size: u32) -> Vec<u8> {
    let mut texels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let value = if (x / 8 + y / 8) % 2 == 0 { 0xE0 } else { 0x30 };
            texels.extend_from_slice(&[value, value, value, 0xFF]);
        }
    }
    texels
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let driver = NullDriver::new();
    let issued = driver.call_counter();
    let mut context = CachedContext::new(driver);
    context.configure_viewport(Viewport::new(0, 0, 800, 600));

    // --- Step 1: Upload the quad geometry ---
    let vertex_buffer = context.create_vertex_buffer(bytemuck::cast_slice(VERTICES))?;
    let index_buffer = context.create_index_buffer(INDICES)?;

    let vertex_size = (mem::size_of::<Vertex>() / mem::size_of::<f32>()) as u32;
    let stream = VertexStream::new(vertex_buffer, vertex_size)
        .with_attribute("position", 3, 0)
        .with_attribute("uv", 2, 3);
    log::info!(" -> Quad geometry uploaded: {vertex_buffer:?}, {index_buffer:?}");

    // --- Step 2: Create the checkerboard texture ---
    let texture = context.create_texture(&TextureDescriptor {
        label: Some("Checkerboard".into()),
        width: 64,
        height: 64,
        ..TextureDescriptor::default()
    })?;
    context.upload_texture_data(texture, &checkerboard(64), 0)?;
    log::info!(" -> Texture created: {texture:?}");

    // --- Step 3: Compile the program and describe its inputs ---
    let program_id = context.create_program(VERTEX_SHADER, FRAGMENT_SHADER)?;
    context.link_program(program_id)?;
    let program = Rc::new(Program::new(
        program_id,
        ProgramInputs::new(vec![
            ProgramInput::new("aPosition", InputType::Attribute, 0),
            ProgramInput::new("aUv", InputType::Attribute, 1),
            ProgramInput::new("uDiffuseMap", InputType::Sampler2D, 2),
            ProgramInput::new("uModelToWorld", InputType::Mat4, 3),
            ProgramInput::new("uWorldToScreen", InputType::Mat4, 4),
            ProgramInput::new("uTime", InputType::Scalar, 5),
        ]),
    ));
    log::info!(" -> Program linked: {program_id:?}");

    // --- Step 4: Fill the data containers ---
    // The mesh container holds everything specific to the quad; the scene
    // container holds what every draw call shares.
    let mesh_data = {
        let mut data = DataContainer::new();
        data.set("geometry.position", stream.clone());
        data.set("geometry.uv", stream);
        data.set(
            "geometry.indices",
            IndexStream::new(index_buffer, INDICES.len() as u32),
        );
        data.set("material.diffuseMap", texture);
        data.set("transform.modelToWorld", Mat4::IDENTITY);
        data.into_ref()
    };
    let scene_data = {
        let mut data = DataContainer::new();
        data.set("camera.worldToScreen", Mat4::IDENTITY);
        data.set("scene.time", 0.0_f32);
        data.into_ref()
    };

    // --- Step 5: Wire the shader inputs to the containers ---
    let attribute_bindings = BindingMap::new()
        .with("aPosition", "geometry.position")
        .with("aUv", "geometry.uv");
    let uniform_bindings = BindingMap::new()
        .with("uDiffuseMap", "material.diffuseMap")
        .with("uModelToWorld", "transform.modelToWorld")
        .with("uWorldToScreen", "camera.worldToScreen")
        .with("uTime", "scene.time");

    let mut draw_call = DrawCall::new(
        attribute_bindings,
        uniform_bindings,
        BindingMap::new(),
        RenderStates::default(),
    );
    draw_call.configure(program, Rc::clone(&mesh_data), Rc::clone(&scene_data))?;

    let mut renderer = Renderer::new();
    renderer.set_background(LinearRgba::new(0.1, 0.1, 0.15, 1.0));
    renderer.add(draw_call);

    // --- Step 6: Render frames and watch the cache work ---
    let before_first = issued.get();
    renderer.render_frame(&mut context)?;
    let first_frame = issued.get() - before_first;
    log::info!(" -> First frame issued {first_frame} driver calls");

    // Identical state: almost everything is swallowed by the shadows.
    let before_second = issued.get();
    renderer.render_frame(&mut context)?;
    let second_frame = issued.get() - before_second;
    log::info!(" -> Second frame issued {second_frame} driver calls");

    // --- Step 7: Animate the matrix without touching the draw call ---
    // Matrices are re-read from their container at render time, so moving
    // the quad is a container write, not a reconfiguration.
    for frame in 0..3 {
        let offset = 0.25 * (frame as f32 + 1.0);
        mesh_data.borrow_mut().set(
            "transform.modelToWorld",
            Mat4::from_translation(Vec3::new(offset, 0.0, 0.0)),
        );
        scene_data.borrow_mut().set("scene.time", 0.016 * frame as f32);
        renderer.render_frame(&mut context)?;
    }
    log::info!(" -> Animated 3 frames through container writes alone");

    log::info!("Sandbox done: {} driver calls over 5 frames", issued.get());
    Ok(())
}
