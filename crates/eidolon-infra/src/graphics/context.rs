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

//! Implements the state-caching render context over a [`GpuDriver`].
//!
//! The context shadows every piece of GPU state it has issued and drops
//! calls that would not change anything. Shadows start out as "never
//! applied", so the first write of any state always reaches the driver.
//! Sampler parameters are shadowed per texture object rather than per
//! texture unit, because that is where the hardware stores them.

use crate::graphics::driver::{GpuDriver, OffscreenTarget};
use eidolon_core::math::{LinearRgba, Mat4, Vec2, Vec3, Vec4};
use eidolon_core::renderer::api::{
    BlendMode, ClearFlags, CompareFunction, CullMode, IndexBufferId, MipFilter, ProgramId,
    SamplerState, StencilOperation, StencilState, TextureDescriptor, TextureFilter, TextureId,
    VertexBufferId, VertexStreamBinding, Viewport, WrapMode, MAX_TEXTURE_UNITS,
};
use eidolon_core::renderer::error::ResourceError;
use eidolon_core::renderer::RenderContext;
use log::debug;
use std::collections::{HashMap, HashSet};

const FLOAT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

/// What the context remembers about a live texture.
#[derive(Debug, Clone, Copy)]
struct TextureInfo {
    width: u32,
    height: u32,
    mip_mapped: bool,
    render_target: bool,
}

/// A [`RenderContext`] that eliminates redundant driver calls.
///
/// All resource registries and state shadows live here; the wrapped driver
/// only ever sees calls that change something. Render target texture pairs
/// (framebuffer plus depth renderbuffer) are realized lazily on the first
/// [`ensure_render_target`](RenderContext::ensure_render_target) and torn
/// down when their texture is deleted.
#[derive(Debug)]
pub struct CachedContext<D: GpuDriver> {
    driver: D,

    // Live resource registries, keyed by driver-assigned IDs.
    vertex_buffers: HashSet<VertexBufferId>,
    index_buffers: HashSet<IndexBufferId>,
    textures: HashMap<TextureId, TextureInfo>,
    programs: HashSet<ProgramId>,
    render_targets: HashMap<TextureId, OffscreenTarget>,

    // State shadows. `None` means the state was never applied.
    current_program: Option<ProgramId>,
    bound_textures: [Option<TextureId>; MAX_TEXTURE_UNITS],
    texture_wraps: HashMap<TextureId, WrapMode>,
    texture_filters: HashMap<TextureId, (TextureFilter, MipFilter)>,
    vertex_attributes: HashMap<u32, VertexStreamBinding>,
    current_blend: Option<BlendMode>,
    current_depth_mask: Option<bool>,
    current_depth_func: Option<CompareFunction>,
    current_color_mask: Option<bool>,
    current_stencil_func: Option<(CompareFunction, i32, u32)>,
    current_stencil_ops: Option<(StencilOperation, StencilOperation, StencilOperation)>,
    current_culling: Option<CullMode>,
    saved_viewport: Option<Viewport>,
    current_target: Option<TextureId>,
    current_index_buffer: Option<IndexBufferId>,
}

impl<D: GpuDriver> CachedContext<D> {
    /// Wraps a driver with empty registries and never-applied shadows.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            vertex_buffers: HashSet::new(),
            index_buffers: HashSet::new(),
            textures: HashMap::new(),
            programs: HashSet::new(),
            render_targets: HashMap::new(),
            current_program: None,
            bound_textures: [None; MAX_TEXTURE_UNITS],
            texture_wraps: HashMap::new(),
            texture_filters: HashMap::new(),
            vertex_attributes: HashMap::new(),
            current_blend: None,
            current_depth_mask: None,
            current_depth_func: None,
            current_color_mask: None,
            current_stencil_func: None,
            current_stencil_ops: None,
            current_culling: None,
            saved_viewport: None,
            current_target: None,
            current_index_buffer: None,
        }
    }

    fn live_texture(&self, texture: TextureId) -> Result<TextureInfo, ResourceError> {
        self.textures
            .get(&texture)
            .copied()
            .ok_or(ResourceError::UnknownResource {
                kind: "texture",
                id: texture.0,
            })
    }
}

impl<D: GpuDriver> RenderContext for CachedContext<D> {
    fn create_vertex_buffer(&mut self, data: &[f32]) -> Result<VertexBufferId, ResourceError> {
        let buffer = self.driver.create_vertex_buffer();
        self.driver.upload_vertex_buffer(buffer, data);
        self.vertex_buffers.insert(buffer);
        debug!("created {buffer:?} with {} floats", data.len());
        Ok(buffer)
    }

    fn upload_vertex_buffer_data(
        &mut self,
        buffer: VertexBufferId,
        data: &[f32],
    ) -> Result<(), ResourceError> {
        if !self.vertex_buffers.contains(&buffer) {
            return Err(ResourceError::UnknownResource {
                kind: "vertex buffer",
                id: buffer.0,
            });
        }
        self.driver.upload_vertex_buffer(buffer, data);
        Ok(())
    }

    fn delete_vertex_buffer(&mut self, buffer: VertexBufferId) {
        if !self.vertex_buffers.remove(&buffer) {
            debug!("delete_vertex_buffer: unknown {buffer:?} ignored");
            return;
        }
        // Forget attribute bindings that point at the deleted buffer so the
        // next bind at those locations is issued again.
        self.vertex_attributes
            .retain(|_, binding| binding.buffer != buffer);
        self.driver.destroy_vertex_buffer(buffer);
    }

    fn create_index_buffer(&mut self, data: &[u16]) -> Result<IndexBufferId, ResourceError> {
        let buffer = self.driver.create_index_buffer();
        self.driver.upload_index_buffer(buffer, data);
        self.index_buffers.insert(buffer);
        debug!("created {buffer:?} with {} indices", data.len());
        Ok(buffer)
    }

    fn upload_index_buffer_data(
        &mut self,
        buffer: IndexBufferId,
        data: &[u16],
    ) -> Result<(), ResourceError> {
        if !self.index_buffers.contains(&buffer) {
            return Err(ResourceError::UnknownResource {
                kind: "index buffer",
                id: buffer.0,
            });
        }
        self.driver.upload_index_buffer(buffer, data);
        Ok(())
    }

    fn delete_index_buffer(&mut self, buffer: IndexBufferId) {
        if !self.index_buffers.remove(&buffer) {
            debug!("delete_index_buffer: unknown {buffer:?} ignored");
            return;
        }
        if self.current_index_buffer == Some(buffer) {
            self.current_index_buffer = None;
        }
        self.driver.destroy_index_buffer(buffer);
    }

    fn create_texture(&mut self, descriptor: &TextureDescriptor) -> Result<TextureId, ResourceError> {
        if !descriptor.width.is_power_of_two() || !descriptor.height.is_power_of_two() {
            return Err(ResourceError::InvalidDimensions {
                width: descriptor.width,
                height: descriptor.height,
            });
        }
        let texture = self.driver.create_texture();

        // New textures start with the canonical default sampler applied.
        let default = SamplerState::DEFAULT;
        self.driver.set_texture_wrap(texture, default.wrap);
        self.driver
            .set_texture_filter(texture, default.filter, default.mip);
        self.texture_wraps.insert(texture, default.wrap);
        self.texture_filters
            .insert(texture, (default.filter, default.mip));

        self.textures.insert(
            texture,
            TextureInfo {
                width: descriptor.width,
                height: descriptor.height,
                mip_mapped: descriptor.mip_mapped,
                render_target: descriptor.render_target,
            },
        );
        debug!(
            "created {texture:?} '{}': {}x{}, mip mapped: {}, render target: {}",
            descriptor.label.as_deref().unwrap_or("unnamed"),
            descriptor.width,
            descriptor.height,
            descriptor.mip_mapped,
            descriptor.render_target
        );
        Ok(texture)
    }

    fn upload_texture_data(
        &mut self,
        texture: TextureId,
        data: &[u8],
        mip_level: u32,
    ) -> Result<(), ResourceError> {
        let info = self.live_texture(texture)?;
        let width = (info.width >> mip_level).max(1);
        let height = (info.height >> mip_level).max(1);
        self.driver
            .upload_texture(texture, width, height, mip_level, data);
        Ok(())
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_none() {
            debug!("delete_texture: unknown {texture:?} ignored");
            return;
        }
        self.texture_wraps.remove(&texture);
        self.texture_filters.remove(&texture);
        if let Some(target) = self.render_targets.remove(&texture) {
            self.driver.destroy_framebuffer(target.framebuffer);
            self.driver.destroy_renderbuffer(target.depth);
        }
        // Forget unit shadows so the texture ID cannot be mistaken for a
        // live binding if the driver recycles it.
        for bound in self.bound_textures.iter_mut() {
            if *bound == Some(texture) {
                *bound = None;
            }
        }
        if self.current_target == Some(texture) {
            self.set_render_to_back_buffer();
        }
        self.driver.destroy_texture(texture);
    }

    fn create_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramId, ResourceError> {
        let program = self.driver.create_program(vertex_source, fragment_source);
        self.programs.insert(program);
        debug!("created {program:?}");
        Ok(program)
    }

    fn link_program(&mut self, program: ProgramId) -> Result<(), ResourceError> {
        if !self.programs.contains(&program) {
            return Err(ResourceError::UnknownResource {
                kind: "program",
                id: program.0,
            });
        }
        self.driver
            .link_program(program)
            .map_err(|details| ResourceError::ProgramLink { program, details })
    }

    fn delete_program(&mut self, program: ProgramId) {
        if !self.programs.remove(&program) {
            debug!("delete_program: unknown {program:?} ignored");
            return;
        }
        if self.current_program == Some(program) {
            self.current_program = None;
        }
        self.driver.destroy_program(program);
    }

    fn ensure_render_target(&mut self, texture: TextureId) -> Result<(), ResourceError> {
        if self.render_targets.contains_key(&texture) {
            return Ok(());
        }
        let info = self.live_texture(texture)?;
        if !info.render_target {
            return Err(ResourceError::NotRenderTarget { texture });
        }

        let framebuffer = self.driver.create_framebuffer();
        self.driver.attach_color_texture(framebuffer, texture);
        let depth = self.driver.create_renderbuffer(info.width, info.height);
        self.driver.attach_depth_renderbuffer(framebuffer, depth);
        if let Err(details) = self.driver.framebuffer_status(framebuffer) {
            self.driver.destroy_framebuffer(framebuffer);
            self.driver.destroy_renderbuffer(depth);
            return Err(ResourceError::IncompleteFramebuffer { texture, details });
        }

        // Attachment binds the new framebuffer; restore whichever target
        // was active so the shadow stays truthful.
        let active = self
            .current_target
            .and_then(|current| self.render_targets.get(&current).copied());
        match active {
            Some(target) => self.driver.bind_framebuffer(Some(target.framebuffer)),
            None => self.driver.bind_framebuffer(None),
        }
        self.driver.bind_renderbuffer(None);

        self.render_targets
            .insert(texture, OffscreenTarget { framebuffer, depth });
        debug!(
            "realized render target for {texture:?} ({}x{})",
            info.width, info.height
        );
        Ok(())
    }

    fn configure_viewport(&mut self, viewport: Viewport) {
        if self.saved_viewport == Some(viewport) {
            return;
        }
        self.saved_viewport = Some(viewport);
        self.driver.set_viewport(viewport);
    }

    fn clear(&mut self, color: LinearRgba, depth: f32, stencil: i32, flags: ClearFlags) {
        // Depth clears require depth writes to be on.
        if flags.contains(ClearFlags::DEPTH) && self.current_depth_mask != Some(true) {
            self.driver.set_depth_mask(true);
            self.current_depth_mask = Some(true);
        }
        self.driver.clear(color, depth, stencil, flags);
    }

    fn set_program(&mut self, program: ProgramId) {
        if self.current_program == Some(program) {
            return;
        }
        self.driver.use_program(program);
        self.current_program = Some(program);
    }

    fn set_texture_at(&mut self, unit: usize, texture: Option<TextureId>, location: Option<u32>) {
        if unit >= MAX_TEXTURE_UNITS {
            debug!("set_texture_at: unit {unit} out of range; ignored");
            return;
        }
        if self.bound_textures[unit] != texture {
            self.driver.bind_texture(unit, texture);
            self.bound_textures[unit] = texture;
        }
        // The sampler uniform belongs to the current program, so it is
        // issued even when the texture binding was already in place.
        if let (Some(_), Some(location)) = (texture, location) {
            self.driver.set_uniform_sampler(location, unit);
        }
    }

    fn set_sampler_state_at(&mut self, unit: usize, sampler: SamplerState) {
        let Some(texture) = self.bound_textures.get(unit).copied().flatten() else {
            debug!("set_sampler_state_at: no texture bound to unit {unit}; ignored");
            return;
        };
        let Some(info) = self.textures.get(&texture) else {
            debug!("set_sampler_state_at: {texture:?} is not live; ignored");
            return;
        };
        // Textures without mip levels cannot be mip filtered.
        let mip = if info.mip_mapped {
            sampler.mip
        } else {
            MipFilter::None
        };

        if self.texture_wraps.get(&texture) != Some(&sampler.wrap) {
            self.driver.set_texture_wrap(texture, sampler.wrap);
            self.texture_wraps.insert(texture, sampler.wrap);
        }
        if self.texture_filters.get(&texture) != Some(&(sampler.filter, mip)) {
            self.driver.set_texture_filter(texture, sampler.filter, mip);
            self.texture_filters.insert(texture, (sampler.filter, mip));
        }
    }

    fn set_vertex_buffer_at(&mut self, location: u32, binding: Option<VertexStreamBinding>) {
        match binding {
            Some(binding) => {
                if self.vertex_attributes.get(&location) == Some(&binding) {
                    return;
                }
                self.driver.set_vertex_attribute(
                    location,
                    binding.buffer,
                    binding.size,
                    binding.stride * FLOAT_SIZE,
                    binding.offset * FLOAT_SIZE,
                );
                self.vertex_attributes.insert(location, binding);
            }
            None => {
                if self.vertex_attributes.remove(&location).is_some() {
                    self.driver.disable_vertex_attribute(location);
                }
            }
        }
    }

    fn set_blend_mode(&mut self, blend: BlendMode) {
        if self.current_blend == Some(blend) {
            return;
        }
        self.driver
            .set_blend_function(blend.source, blend.destination);
        self.current_blend = Some(blend);
    }

    fn set_depth_test(&mut self, depth_write: bool, depth_compare: CompareFunction) {
        if self.current_depth_mask == Some(depth_write)
            && self.current_depth_func == Some(depth_compare)
        {
            return;
        }
        self.driver.set_depth_mask(depth_write);
        self.driver.set_depth_function(depth_compare);
        self.current_depth_mask = Some(depth_write);
        self.current_depth_func = Some(depth_compare);
    }

    fn set_color_mask(&mut self, mask: bool) {
        if self.current_color_mask == Some(mask) {
            return;
        }
        self.driver.set_color_mask(mask);
        self.current_color_mask = Some(mask);
    }

    fn set_stencil_test(&mut self, stencil: StencilState) {
        let function = (stencil.compare, stencil.reference, stencil.read_mask);
        if self.current_stencil_func != Some(function) {
            self.driver
                .set_stencil_function(stencil.compare, stencil.reference, stencil.read_mask);
            self.current_stencil_func = Some(function);
        }
        let operations = (stencil.fail_op, stencil.depth_fail_op, stencil.pass_op);
        if self.current_stencil_ops != Some(operations) {
            self.driver
                .set_stencil_operations(stencil.fail_op, stencil.depth_fail_op, stencil.pass_op);
            self.current_stencil_ops = Some(operations);
        }
    }

    fn set_triangle_culling(&mut self, culling: CullMode) {
        if self.current_culling == Some(culling) {
            return;
        }
        if culling == CullMode::None {
            self.driver.set_culling_enabled(false);
            self.current_culling = Some(CullMode::None);
            return;
        }
        // Coming from None (or from a fresh context), culling is off.
        if !matches!(self.current_culling, Some(mode) if mode != CullMode::None) {
            self.driver.set_culling_enabled(true);
        }
        self.driver.set_cull_face(culling);
        self.current_culling = Some(culling);
    }

    fn set_render_to_texture(
        &mut self,
        texture: TextureId,
        with_depth: bool,
    ) -> Result<(), ResourceError> {
        if self.current_target == Some(texture) {
            return Ok(());
        }
        let info = self.live_texture(texture)?;
        let target = self
            .render_targets
            .get(&texture)
            .copied()
            .ok_or(ResourceError::NotRenderTarget { texture })?;

        self.driver.bind_framebuffer(Some(target.framebuffer));
        self.driver
            .bind_renderbuffer(with_depth.then_some(target.depth));
        // The saved back buffer viewport is left untouched.
        self.driver
            .set_viewport(Viewport::new(0, 0, info.width, info.height));
        self.current_target = Some(texture);
        debug!("rendering to {texture:?} ({}x{})", info.width, info.height);
        Ok(())
    }

    fn set_render_to_back_buffer(&mut self) {
        if self.current_target.is_none() {
            return;
        }
        self.driver.bind_framebuffer(None);
        self.driver.bind_renderbuffer(None);
        if let Some(viewport) = self.saved_viewport {
            self.driver.set_viewport(viewport);
        }
        self.current_target = None;
    }

    fn set_uniform_scalar(&mut self, location: u32, value: f32) {
        self.driver.set_uniform_scalar(location, value);
    }

    fn set_uniform_vec2(&mut self, location: u32, value: Vec2) {
        self.driver.set_uniform_vec2(location, value);
    }

    fn set_uniform_vec3(&mut self, location: u32, value: Vec3) {
        self.driver.set_uniform_vec3(location, value);
    }

    fn set_uniform_vec4(&mut self, location: u32, value: Vec4) {
        self.driver.set_uniform_vec4(location, value);
    }

    fn set_uniform_mat4(&mut self, location: u32, value: &Mat4) {
        self.driver.set_uniform_mat4(location, value);
    }

    fn draw_triangles(
        &mut self,
        indices: IndexBufferId,
        triangle_count: u32,
    ) -> Result<(), ResourceError> {
        if !self.index_buffers.contains(&indices) {
            return Err(ResourceError::UnknownResource {
                kind: "index buffer",
                id: indices.0,
            });
        }
        if self.current_index_buffer != Some(indices) {
            self.driver.bind_index_buffer(Some(indices));
            self.current_index_buffer = Some(indices);
        }
        self.driver.draw_indexed(triangle_count * 3);
        Ok(())
    }

    fn present(&mut self) {
        self.set_render_to_back_buffer();
        self.driver.present();
    }
}
