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

//! Implements draw call configuration and per-frame rendering.
//!
//! A draw call owns three binding maps (attributes, uniforms, states), a set
//! of fallback render states, and, once configured, a resolved snapshot of
//! everything it needs to issue GPU work. Configuration walks the program's
//! inputs in declaration order and resolves each one against a local and a
//! global data container; resolution is all-or-nothing, so a draw call is
//! either fully renderable or untouched.
//!
//! Value uniforms are captured at configure time. Matrix uniforms are not:
//! only the property name is kept, and the matrix is read back from the
//! containers on every render, so animated transforms never require
//! reconfiguration.

use crate::bindings::BindingMap;
use eidolon_core::math::{Vec2, Vec3, Vec4};
use eidolon_core::renderer::api::{
    BlendMode, CompareFunction, CullMode, InputType, Program, ProgramInput, RenderStates,
    SamplerState, TextureId, VertexBufferId, VertexStreamBinding, MAX_TEXTURE_UNITS,
    MAX_VERTEX_ATTRIBUTES,
};
use eidolon_core::renderer::error::{BindError, RenderError};
use eidolon_core::renderer::RenderContext;
use eidolon_data::{ContainerRef, DataContainer, IndexStream, PropertyValue};
use log::debug;
use std::collections::BTreeMap;
use std::rc::Rc;

/// The property every draw call requires: the triangle index stream.
pub const INDEX_STREAM_PROPERTY: &str = "geometry.indices";

/// The canonical name of the blend mode render state.
pub const STATE_BLEND_MODE: &str = "blendMode";
/// The canonical name of the depth write mask render state.
pub const STATE_DEPTH_WRITE: &str = "depthMask";
/// The canonical name of the depth comparison render state.
pub const STATE_DEPTH_COMPARE: &str = "depthFunc";
/// The canonical name of the triangle culling render state.
pub const STATE_TRIANGLE_CULLING: &str = "triangleCulling";
/// The canonical name of the render target state.
pub const STATE_RENDER_TARGET: &str = "target";

/// One resolved vertex attribute: which buffer region feeds which location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSlot {
    /// The vertex buffer the attribute reads from.
    pub buffer: VertexBufferId,
    /// The attribute location the shader declared for the input.
    pub location: u32,
    /// The number of float components of the attribute.
    pub size: u32,
    /// The stride between vertices, in floats.
    pub stride: u32,
    /// The offset of the attribute within a vertex, in floats.
    pub offset: u32,
}

/// One resolved texture sampler: which texture feeds which sampler uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerSlot {
    /// The texture bound to the unit.
    pub texture: TextureId,
    /// The uniform location of the sampler input.
    pub location: u32,
    /// The sampler state the texture is sampled with.
    pub sampler: SamplerState,
}

/// The fixed-function state a configure pass resolved for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStates {
    /// The resolved blend mode.
    pub blend: BlendMode,
    /// The resolved depth write mask.
    pub depth_write: bool,
    /// The resolved depth comparison function.
    pub depth_compare: CompareFunction,
    /// The resolved triangle culling mode.
    pub culling: CullMode,
    /// The resolved render target, or `None` for the back buffer.
    pub target: Option<TextureId>,
}

impl Default for ResolvedStates {
    fn default() -> Self {
        let states = RenderStates::default();
        ResolvedStates {
            blend: states.blend,
            depth_write: states.depth_write,
            depth_compare: states.depth_compare,
            culling: states.culling,
            target: states.target,
        }
    }
}

/// The complete result of resolving a draw call against its data.
///
/// Uniform tables are keyed by uniform location. Matrix uniforms store the
/// *property name* instead of a value; the matrix itself is read back from
/// the containers at render time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedDrawCall {
    /// Claimed attribute slots, in the order the program declared its inputs.
    pub attributes: [Option<AttributeSlot>; MAX_VERTEX_ATTRIBUTES],
    /// Claimed texture units, in the order the program declared its inputs.
    pub samplers: [Option<SamplerSlot>; MAX_TEXTURE_UNITS],
    /// Float uniforms captured by value.
    pub scalars: BTreeMap<u32, f32>,
    /// 2-component vector uniforms captured by value.
    pub vec2s: BTreeMap<u32, Vec2>,
    /// 3-component vector uniforms captured by value.
    pub vec3s: BTreeMap<u32, Vec3>,
    /// 4-component vector uniforms captured by value.
    pub vec4s: BTreeMap<u32, Vec4>,
    /// Matrix uniforms, stored as the property name to read at render time.
    pub matrices: BTreeMap<u32, String>,
    /// The mandatory triangle index stream.
    pub index_stream: Option<IndexStream>,
    /// The resolved fixed-function state.
    pub states: ResolvedStates,
}

/// A single renderable unit: one program drawing one piece of geometry.
///
/// The lifecycle has two phases. [`configure`](DrawCall::configure) resolves
/// every program input against the data containers and snapshots the result;
/// [`render`](DrawCall::render) replays the snapshot into a [`RenderContext`]
/// each frame. When the *shape* of the data changes (a texture property is
/// swapped, geometry replaced), [`rebind`](DrawCall::rebind) re-runs
/// resolution with the stored collaborators.
#[derive(Debug)]
pub struct DrawCall {
    attribute_bindings: BindingMap,
    uniform_bindings: BindingMap,
    state_bindings: BindingMap,
    states: RenderStates,
    default_sampler: SamplerState,
    program: Option<Rc<Program>>,
    data: Option<ContainerRef>,
    global: Option<ContainerRef>,
    resolved: ResolvedDrawCall,
}

impl DrawCall {
    /// Creates an unconfigured draw call.
    ///
    /// `states` supplies the fallback values for every render state that no
    /// container property overrides. The sampler fallback for texture inputs
    /// without an entry in `states.samplers` is [`SamplerState::DEFAULT`];
    /// use [`with_default_sampler`](DrawCall::with_default_sampler) to choose
    /// another one.
    pub fn new(
        attribute_bindings: BindingMap,
        uniform_bindings: BindingMap,
        state_bindings: BindingMap,
        states: RenderStates,
    ) -> Self {
        Self {
            attribute_bindings,
            uniform_bindings,
            state_bindings,
            states,
            default_sampler: SamplerState::DEFAULT,
            program: None,
            data: None,
            global: None,
            resolved: ResolvedDrawCall::default(),
        }
    }

    /// Replaces the fallback sampler state, builder style.
    pub fn with_default_sampler(mut self, sampler: SamplerState) -> Self {
        self.default_sampler = sampler;
        self
    }

    /// Returns `true` if the last configuration attempt succeeded.
    pub fn is_configured(&self) -> bool {
        self.program.is_some()
    }

    /// Returns the current resolution snapshot.
    ///
    /// An unconfigured draw call returns the default (empty) snapshot.
    pub fn resolved(&self) -> &ResolvedDrawCall {
        &self.resolved
    }

    /// Resolves every program input against the given containers.
    ///
    /// The program's inputs are walked in declaration order. For each input
    /// the binding maps translate the input name to a property name, the
    /// local container is searched before the global one, and inputs whose
    /// property exists in neither container are skipped without claiming a
    /// resource slot.
    ///
    /// Configuration is all-or-nothing: on error the draw call reverts to
    /// the unconfigured state and nothing of the failed attempt remains.
    ///
    /// ## Errors
    /// * `BindError::MissingIndexStream` - If `geometry.indices` exists in neither container.
    /// * `BindError::PropertyTypeMismatch` - If a bound property holds the wrong type.
    /// * `BindError::UnknownAttribute` - If a vertex stream lacks a requested attribute.
    /// * `BindError::AttributeCapacity` / `BindError::SamplerCapacity` - If the
    ///   program needs more slots than the hardware exposes.
    pub fn configure(
        &mut self,
        program: Rc<Program>,
        data: ContainerRef,
        global: ContainerRef,
    ) -> Result<(), BindError> {
        self.reset();
        let resolved = {
            let local = data.borrow();
            let root = global.borrow();
            self.resolve(&program, &local, &root)
        }?;
        self.resolved = resolved;
        self.program = Some(program);
        self.data = Some(data);
        self.global = Some(global);
        Ok(())
    }

    /// Re-runs resolution with the program and containers of the last
    /// successful [`configure`](DrawCall::configure).
    ///
    /// ## Errors
    /// * `BindError::NotConfigured` - If the draw call was never configured.
    /// * Any error [`configure`](DrawCall::configure) can produce.
    pub fn rebind(&mut self) -> Result<(), BindError> {
        let program = self.program.clone().ok_or(BindError::NotConfigured)?;
        let data = self.data.clone().ok_or(BindError::NotConfigured)?;
        let global = self.global.clone().ok_or(BindError::NotConfigured)?;
        self.configure(program, data, global)
    }

    /// Issues the draw call into a render context.
    ///
    /// The resolved snapshot is replayed in a fixed order: render target,
    /// program, value uniforms, matrix uniforms (read back from the
    /// containers by property name), all texture units, claimed vertex
    /// attributes, fixed-function state, and finally the indexed draw.
    /// Every texture unit is touched so that stale bindings from a previous
    /// draw call cannot leak into this one.
    ///
    /// ## Errors
    /// * `RenderError::NotConfigured` - If the draw call was never configured.
    /// * `RenderError::Resource` - If the render target cannot be realized or
    ///   a referenced resource no longer exists.
    pub fn render(&self, context: &mut dyn RenderContext) -> Result<(), RenderError> {
        let program = self.program.as_ref().ok_or(RenderError::NotConfigured)?;
        let data = self.data.as_ref().ok_or(RenderError::NotConfigured)?;
        let global = self.global.as_ref().ok_or(RenderError::NotConfigured)?;
        let index_stream = self.resolved.index_stream.ok_or(RenderError::NotConfigured)?;

        match self.resolved.states.target {
            Some(target) => {
                context.ensure_render_target(target)?;
                context.set_render_to_texture(target, true)?;
            }
            None => context.set_render_to_back_buffer(),
        }

        context.set_program(program.id);

        for (&location, &value) in &self.resolved.scalars {
            context.set_uniform_scalar(location, value);
        }
        for (&location, &value) in &self.resolved.vec2s {
            context.set_uniform_vec2(location, value);
        }
        for (&location, &value) in &self.resolved.vec3s {
            context.set_uniform_vec3(location, value);
        }
        for (&location, &value) in &self.resolved.vec4s {
            context.set_uniform_vec4(location, value);
        }

        {
            // The borrows last exactly as long as the matrix uploads.
            let local = data.borrow();
            let root = global.borrow();
            for (&location, property) in &self.resolved.matrices {
                match Self::find_property(&local, &root, property).and_then(PropertyValue::as_mat4)
                {
                    Some(matrix) => context.set_uniform_mat4(location, matrix),
                    None => debug!(
                        "matrix property '{property}' is gone or changed type; uniform at \
                         location {location} left as-is"
                    ),
                }
            }
        }

        for unit in 0..MAX_TEXTURE_UNITS {
            match self.resolved.samplers[unit] {
                Some(slot) => {
                    context.set_texture_at(unit, Some(slot.texture), Some(slot.location));
                    context.set_sampler_state_at(unit, slot.sampler);
                }
                None => context.set_texture_at(unit, None, None),
            }
        }

        for slot in self.resolved.attributes.iter().flatten() {
            context.set_vertex_buffer_at(
                slot.location,
                Some(VertexStreamBinding::new(
                    slot.buffer,
                    slot.size,
                    slot.stride,
                    slot.offset,
                )),
            );
        }

        context.set_blend_mode(self.resolved.states.blend);
        context.set_depth_test(
            self.resolved.states.depth_write,
            self.resolved.states.depth_compare,
        );
        context.set_triangle_culling(self.resolved.states.culling);

        context.draw_triangles(index_stream.buffer, index_stream.index_count / 3)?;
        Ok(())
    }

    fn reset(&mut self) {
        self.program = None;
        self.data = None;
        self.global = None;
        self.resolved = ResolvedDrawCall::default();
    }

    fn resolve(
        &self,
        program: &Program,
        local: &DataContainer,
        global: &DataContainer,
    ) -> Result<ResolvedDrawCall, BindError> {
        let mut resolved = ResolvedDrawCall {
            index_stream: Some(self.resolve_index_stream(local, global)?),
            ..ResolvedDrawCall::default()
        };

        let mut attribute_count = 0usize;
        let mut sampler_count = 0usize;

        for input in program.inputs.iter() {
            match input.ty {
                InputType::Attribute => self.bind_vertex_attribute(
                    input,
                    local,
                    global,
                    &mut resolved,
                    &mut attribute_count,
                )?,
                InputType::Sampler2D => self.bind_texture_sampler(
                    input,
                    local,
                    global,
                    &mut resolved,
                    &mut sampler_count,
                )?,
                _ => self.bind_uniform(input, local, global, &mut resolved)?,
            }
        }

        resolved.states = self.resolve_states(local, global)?;
        Ok(resolved)
    }

    fn resolve_index_stream(
        &self,
        local: &DataContainer,
        global: &DataContainer,
    ) -> Result<IndexStream, BindError> {
        let value = Self::find_property(local, global, INDEX_STREAM_PROPERTY)
            .ok_or(BindError::MissingIndexStream)?;
        value
            .as_index_stream()
            .ok_or_else(|| type_mismatch(INDEX_STREAM_PROPERTY, "index stream", value))
    }

    fn bind_vertex_attribute(
        &self,
        input: &ProgramInput,
        local: &DataContainer,
        global: &DataContainer,
        resolved: &mut ResolvedDrawCall,
        count: &mut usize,
    ) -> Result<(), BindError> {
        let property = self.attribute_bindings.resolve(&input.name);
        let Some(value) = Self::find_property(local, global, property) else {
            debug!(
                "attribute input '{}' has no property '{property}'; leaving it unbound",
                input.name
            );
            return Ok(());
        };
        if *count >= MAX_VERTEX_ATTRIBUTES {
            return Err(BindError::AttributeCapacity {
                input: input.name.clone(),
            });
        }
        let stream = value
            .as_vertex_stream()
            .ok_or_else(|| type_mismatch(property, "vertex stream", value))?;

        // The attribute inside the stream is named by the last path segment
        // of the property, e.g. "geometry.position" reads the stream's
        // "position" attribute.
        let attribute_name = property.rsplit('.').next().unwrap_or(property);
        let attribute =
            stream
                .attribute(attribute_name)
                .ok_or_else(|| BindError::UnknownAttribute {
                    property: property.to_string(),
                    attribute: attribute_name.to_string(),
                })?;

        resolved.attributes[*count] = Some(AttributeSlot {
            buffer: stream.buffer,
            location: input.location,
            size: attribute.size,
            stride: stream.vertex_size,
            offset: attribute.offset,
        });
        *count += 1;
        Ok(())
    }

    fn bind_texture_sampler(
        &self,
        input: &ProgramInput,
        local: &DataContainer,
        global: &DataContainer,
        resolved: &mut ResolvedDrawCall,
        count: &mut usize,
    ) -> Result<(), BindError> {
        let property = self.uniform_bindings.resolve(&input.name);
        let Some(value) = Self::find_property(local, global, property) else {
            debug!(
                "sampler input '{}' has no property '{property}'; leaving it unbound",
                input.name
            );
            return Ok(());
        };
        if *count >= MAX_TEXTURE_UNITS {
            return Err(BindError::SamplerCapacity {
                input: input.name.clone(),
            });
        }
        let texture = value
            .as_texture()
            .ok_or_else(|| type_mismatch(property, "texture", value))?;

        // Sampler states are keyed by the shader input name, not the property.
        let sampler = self
            .states
            .samplers
            .get(&input.name)
            .copied()
            .unwrap_or(self.default_sampler);

        resolved.samplers[*count] = Some(SamplerSlot {
            texture,
            location: input.location,
            sampler,
        });
        *count += 1;
        Ok(())
    }

    fn bind_uniform(
        &self,
        input: &ProgramInput,
        local: &DataContainer,
        global: &DataContainer,
        resolved: &mut ResolvedDrawCall,
    ) -> Result<(), BindError> {
        let property = self.uniform_bindings.resolve(&input.name);
        let Some(value) = Self::find_property(local, global, property) else {
            debug!(
                "uniform input '{}' has no property '{property}'; leaving it unbound",
                input.name
            );
            return Ok(());
        };
        match input.ty {
            InputType::Scalar => {
                let scalar = value
                    .as_float()
                    .ok_or_else(|| type_mismatch(property, "float", value))?;
                resolved.scalars.insert(input.location, scalar);
            }
            InputType::Vec2 => {
                let vector = value
                    .as_vec2()
                    .ok_or_else(|| type_mismatch(property, "vec2", value))?;
                resolved.vec2s.insert(input.location, vector);
            }
            InputType::Vec3 => {
                let vector = value
                    .as_vec3()
                    .ok_or_else(|| type_mismatch(property, "vec3", value))?;
                resolved.vec3s.insert(input.location, vector);
            }
            InputType::Vec4 => {
                let vector = value
                    .as_vec4()
                    .ok_or_else(|| type_mismatch(property, "vec4", value))?;
                resolved.vec4s.insert(input.location, vector);
            }
            InputType::Mat4 => {
                if value.as_mat4().is_none() {
                    return Err(type_mismatch(property, "mat4", value));
                }
                resolved.matrices.insert(input.location, property.to_string());
            }
            // Attributes and samplers are routed to their own binders.
            InputType::Attribute | InputType::Sampler2D => {}
        }
        Ok(())
    }

    fn resolve_states(
        &self,
        local: &DataContainer,
        global: &DataContainer,
    ) -> Result<ResolvedStates, BindError> {
        Ok(ResolvedStates {
            blend: self.state_bindings.resolve_state(
                STATE_BLEND_MODE,
                "blend mode",
                local,
                global,
                PropertyValue::as_blend,
                self.states.blend,
            )?,
            depth_write: self.state_bindings.resolve_state(
                STATE_DEPTH_WRITE,
                "bool",
                local,
                global,
                PropertyValue::as_bool,
                self.states.depth_write,
            )?,
            depth_compare: self.state_bindings.resolve_state(
                STATE_DEPTH_COMPARE,
                "compare function",
                local,
                global,
                PropertyValue::as_depth_compare,
                self.states.depth_compare,
            )?,
            culling: self.state_bindings.resolve_state(
                STATE_TRIANGLE_CULLING,
                "cull mode",
                local,
                global,
                PropertyValue::as_culling,
                self.states.culling,
            )?,
            target: self.state_bindings.resolve_state(
                STATE_RENDER_TARGET,
                "texture",
                local,
                global,
                |value| value.as_texture().map(Some),
                self.states.target,
            )?,
        })
    }

    fn find_property<'a>(
        local: &'a DataContainer,
        global: &'a DataContainer,
        name: &str,
    ) -> Option<&'a PropertyValue> {
        local.get(name).or_else(|| global.get(name))
    }
}

fn type_mismatch(property: &str, expected: &'static str, value: &PropertyValue) -> BindError {
    BindError::PropertyTypeMismatch {
        property: property.to_string(),
        expected,
        found: value.type_name(),
    }
}
