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

//! Defines the low-level command sink the cached context drives.

use eidolon_core::math::{LinearRgba, Mat4, Vec2, Vec3, Vec4};
use eidolon_core::renderer::api::{
    BlendFactor, ClearFlags, CompareFunction, CullMode, IndexBufferId, MipFilter, ProgramId,
    StencilOperation, TextureFilter, TextureId, VertexBufferId, Viewport, WrapMode,
};
use std::fmt::Debug;

/// A unique identifier for an offscreen framebuffer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameBufferId(pub usize);

/// A unique identifier for a renderbuffer providing depth storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderBufferId(pub usize);

/// The framebuffer and depth renderbuffer realized for a render target texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffscreenTarget {
    /// The framebuffer the target texture is color-attached to.
    pub framebuffer: FrameBufferId,
    /// The renderbuffer providing the target's depth storage.
    pub depth: RenderBufferId,
}

/// The raw GPU command sink behind [`CachedContext`](crate::graphics::CachedContext).
///
/// A driver executes every call it receives, unconditionally; all redundancy
/// elimination happens in the caching layer above it. Implementations map
/// these calls onto a concrete API (or log them, like
/// [`NullDriver`](crate::graphics::NullDriver)).
///
/// Buffer strides and offsets are in bytes at this level. Resource IDs are
/// assigned by the driver and treated as opaque by the cache.
pub trait GpuDriver: Debug {
    /// Allocates a new vertex buffer and returns its ID.
    fn create_vertex_buffer(&mut self) -> VertexBufferId;

    /// Uploads `data` into a vertex buffer, replacing its contents.
    fn upload_vertex_buffer(&mut self, buffer: VertexBufferId, data: &[f32]);

    /// Releases a vertex buffer.
    fn destroy_vertex_buffer(&mut self, buffer: VertexBufferId);

    /// Allocates a new index buffer and returns its ID.
    fn create_index_buffer(&mut self) -> IndexBufferId;

    /// Uploads `data` into an index buffer, replacing its contents.
    fn upload_index_buffer(&mut self, buffer: IndexBufferId, data: &[u16]);

    /// Releases an index buffer.
    fn destroy_index_buffer(&mut self, buffer: IndexBufferId);

    /// Allocates a new texture object and returns its ID.
    fn create_texture(&mut self) -> TextureId;

    /// Uploads one mip level of texel data to a texture.
    ///
    /// `width` and `height` are the dimensions of the given mip level.
    fn upload_texture(
        &mut self,
        texture: TextureId,
        width: u32,
        height: u32,
        mip_level: u32,
        data: &[u8],
    );

    /// Releases a texture object.
    fn destroy_texture(&mut self, texture: TextureId);

    /// Sets the wrap mode of both texture coordinate axes.
    fn set_texture_wrap(&mut self, texture: TextureId, wrap: WrapMode);

    /// Sets the minification/magnification filter and the mip filter.
    fn set_texture_filter(&mut self, texture: TextureId, filter: TextureFilter, mip: MipFilter);

    /// Compiles a program from vertex and fragment shader sources.
    ///
    /// Compilation diagnostics surface when the program is linked.
    fn create_program(&mut self, vertex_source: &str, fragment_source: &str) -> ProgramId;

    /// Links a compiled program.
    ///
    /// ## Errors
    /// Returns the linker's info log when linking fails.
    fn link_program(&mut self, program: ProgramId) -> Result<(), String>;

    /// Releases a program.
    fn destroy_program(&mut self, program: ProgramId);

    /// Makes a program current.
    fn use_program(&mut self, program: ProgramId);

    /// Allocates a framebuffer object.
    fn create_framebuffer(&mut self) -> FrameBufferId;

    /// Attaches a texture as the framebuffer's color target.
    ///
    /// Binds the framebuffer as a side effect; callers restore the binding
    /// they need afterwards.
    fn attach_color_texture(&mut self, framebuffer: FrameBufferId, texture: TextureId);

    /// Allocates a renderbuffer with depth storage of the given size.
    fn create_renderbuffer(&mut self, width: u32, height: u32) -> RenderBufferId;

    /// Attaches a renderbuffer as the framebuffer's depth target.
    ///
    /// Binds the framebuffer as a side effect; callers restore the binding
    /// they need afterwards.
    fn attach_depth_renderbuffer(&mut self, framebuffer: FrameBufferId, depth: RenderBufferId);

    /// Checks a framebuffer for completeness.
    ///
    /// ## Errors
    /// Returns the backend's status description when the framebuffer cannot
    /// be rendered to.
    fn framebuffer_status(&mut self, framebuffer: FrameBufferId) -> Result<(), String>;

    /// Releases a framebuffer object.
    fn destroy_framebuffer(&mut self, framebuffer: FrameBufferId);

    /// Releases a renderbuffer.
    fn destroy_renderbuffer(&mut self, renderbuffer: RenderBufferId);

    /// Binds a framebuffer, or the back buffer when `None`.
    fn bind_framebuffer(&mut self, framebuffer: Option<FrameBufferId>);

    /// Binds a renderbuffer, or clears the binding when `None`.
    fn bind_renderbuffer(&mut self, renderbuffer: Option<RenderBufferId>);

    /// Sets the viewport rectangle.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clears the selected buffers of the current render target.
    fn clear(&mut self, color: LinearRgba, depth: f32, stencil: i32, flags: ClearFlags);

    /// Binds a texture to a texture unit, or unbinds the unit when `None`.
    fn bind_texture(&mut self, unit: usize, texture: Option<TextureId>);

    /// Points a sampler uniform at a texture unit.
    fn set_uniform_sampler(&mut self, location: u32, unit: usize);

    /// Binds a vertex buffer region to an attribute location and enables it.
    ///
    /// `stride` and `offset` are in bytes.
    fn set_vertex_attribute(
        &mut self,
        location: u32,
        buffer: VertexBufferId,
        size: u32,
        stride: u32,
        offset: u32,
    );

    /// Disables an attribute location.
    fn disable_vertex_attribute(&mut self, location: u32);

    /// Sets the source and destination blend factors.
    fn set_blend_function(&mut self, source: BlendFactor, destination: BlendFactor);

    /// Enables or disables depth buffer writes.
    fn set_depth_mask(&mut self, write: bool);

    /// Sets the depth comparison function.
    fn set_depth_function(&mut self, compare: CompareFunction);

    /// Enables or disables writes to all color channels.
    fn set_color_mask(&mut self, mask: bool);

    /// Sets the stencil comparison function, reference value and read mask.
    fn set_stencil_function(&mut self, compare: CompareFunction, reference: i32, read_mask: u32);

    /// Sets the three stencil update operations.
    fn set_stencil_operations(
        &mut self,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
    );

    /// Enables or disables face culling.
    fn set_culling_enabled(&mut self, enabled: bool);

    /// Selects which faces are culled. Only called with culling enabled.
    fn set_cull_face(&mut self, mode: CullMode);

    /// Sets a float uniform.
    fn set_uniform_scalar(&mut self, location: u32, value: f32);

    /// Sets a 2-component vector uniform.
    fn set_uniform_vec2(&mut self, location: u32, value: Vec2);

    /// Sets a 3-component vector uniform.
    fn set_uniform_vec3(&mut self, location: u32, value: Vec3);

    /// Sets a 4-component vector uniform.
    fn set_uniform_vec4(&mut self, location: u32, value: Vec4);

    /// Sets a 4x4 matrix uniform, column-major.
    fn set_uniform_mat4(&mut self, location: u32, value: &Mat4);

    /// Binds an index buffer as the element source for draws.
    fn bind_index_buffer(&mut self, buffer: Option<IndexBufferId>);

    /// Draws `index_count` indices from the bound index buffer as triangles.
    fn draw_indexed(&mut self, index_count: u32);

    /// Presents the back buffer.
    fn present(&mut self);
}
