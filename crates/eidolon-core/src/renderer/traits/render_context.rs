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

use crate::math::{LinearRgba, Mat4, Vec2, Vec3, Vec4};
use crate::renderer::api::*;
use crate::renderer::error::ResourceError;
use std::fmt::Debug;

/// The single-threaded interface draw calls issue GPU work through.
///
/// Implementations own the connection to the graphics backend and are expected
/// to filter out redundant state changes: issuing the same state twice in a
/// row must not reach the GPU a second time. All mutating operations therefore
/// take `&mut self`. The trait is deliberately not `Send` or `Sync`; a context
/// belongs to the one thread that renders.
pub trait RenderContext: Debug {
    // --- Resource Management ---

    /// Creates a vertex buffer and uploads `data` into it.
    ///
    /// ## Errors
    /// * `ResourceError` - If the backend fails to allocate the buffer.
    fn create_vertex_buffer(&mut self, data: &[f32]) -> Result<VertexBufferId, ResourceError>;

    /// Replaces the contents of an existing vertex buffer.
    ///
    /// ## Errors
    /// * `ResourceError::UnknownResource` - If `buffer` was deleted or never created.
    fn upload_vertex_buffer_data(
        &mut self,
        buffer: VertexBufferId,
        data: &[f32],
    ) -> Result<(), ResourceError>;

    /// Deletes a vertex buffer.
    ///
    /// Any attribute slot still referring to `buffer` is forgotten, so a later
    /// bind of a recycled ID is never mistaken for the old buffer. Deleting an
    /// unknown buffer is ignored.
    fn delete_vertex_buffer(&mut self, buffer: VertexBufferId);

    /// Creates an index buffer and uploads `data` into it.
    ///
    /// Indices are 16-bit unsigned, three per triangle.
    fn create_index_buffer(&mut self, data: &[u16]) -> Result<IndexBufferId, ResourceError>;

    /// Replaces the contents of an existing index buffer.
    fn upload_index_buffer_data(
        &mut self,
        buffer: IndexBufferId,
        data: &[u16],
    ) -> Result<(), ResourceError>;

    /// Deletes an index buffer, forgetting it if it is the currently bound one.
    fn delete_index_buffer(&mut self, buffer: IndexBufferId);

    /// Creates a texture from a descriptor.
    ///
    /// New textures start with [`SamplerState::DEFAULT`].
    ///
    /// ## Errors
    /// * `ResourceError::InvalidDimensions` - If either dimension is not a power of two.
    fn create_texture(&mut self, descriptor: &TextureDescriptor) -> Result<TextureId, ResourceError>;

    /// Uploads texel data for one mip level of a texture.
    fn upload_texture_data(
        &mut self,
        texture: TextureId,
        data: &[u8],
        mip_level: u32,
    ) -> Result<(), ResourceError>;

    /// Deletes a texture along with any offscreen buffers built for it.
    ///
    /// Texture units and sampler records still referring to `texture` are
    /// forgotten. If the texture is the current render target, rendering
    /// falls back to the back buffer first.
    fn delete_texture(&mut self, texture: TextureId);

    /// Creates a shader program from vertex and fragment sources.
    fn create_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramId, ResourceError>;

    /// Links a shader program.
    ///
    /// ## Errors
    /// * `ResourceError::ProgramLink` - If linking fails; the details carry the linker log.
    fn link_program(&mut self, program: ProgramId) -> Result<(), ResourceError>;

    /// Deletes a shader program, forgetting it if it is the active one.
    fn delete_program(&mut self, program: ProgramId);

    /// Makes sure the offscreen framebuffer for a render target texture exists.
    ///
    /// The buffers are built on first use and reused afterwards; calling this
    /// on a texture whose buffers already exist is free.
    ///
    /// ## Errors
    /// * `ResourceError::NotRenderTarget` - If the texture was not created for render target use.
    /// * `ResourceError::IncompleteFramebuffer` - If the backend rejects the attachment combination.
    fn ensure_render_target(&mut self, texture: TextureId) -> Result<(), ResourceError>;

    // --- Frame State ---

    /// Sets the viewport rectangle used when rendering to the back buffer.
    ///
    /// The rectangle is remembered and restored whenever rendering returns to
    /// the back buffer after a render-to-texture pass.
    fn configure_viewport(&mut self, viewport: Viewport);

    /// Clears the selected aspects of the current render target.
    ///
    /// Clearing the depth buffer re-enables depth writes first, since a
    /// masked depth buffer cannot be cleared.
    fn clear(&mut self, color: LinearRgba, depth: f32, stencil: i32, flags: ClearFlags);

    /// Makes `program` the active shader program.
    fn set_program(&mut self, program: ProgramId);

    /// Binds `texture` to the given texture unit.
    ///
    /// If both a texture and a sampler uniform `location` are provided, the
    /// uniform is pointed at the unit. The uniform update is issued every
    /// time since its value lives in the active program, not the unit.
    fn set_texture_at(&mut self, unit: usize, texture: Option<TextureId>, location: Option<u32>);

    /// Applies a sampler state to the texture bound at the given unit.
    ///
    /// Sampler state belongs to the *texture*, so redundancy is judged
    /// against what that texture last had, wherever it was bound. A mip
    /// filter is ignored for textures created without mipmaps. Without a
    /// bound texture the call does nothing.
    fn set_sampler_state_at(&mut self, unit: usize, sampler: SamplerState);

    /// Points the vertex attribute at `location` to a region of a vertex buffer,
    /// or disables the attribute when `binding` is `None`.
    fn set_vertex_buffer_at(&mut self, location: u32, binding: Option<VertexStreamBinding>);

    /// Sets the active blend factors.
    fn set_blend_mode(&mut self, blend: BlendMode);

    /// Sets depth buffer writing and the depth comparison function together.
    fn set_depth_test(&mut self, depth_write: bool, depth_compare: CompareFunction);

    /// Enables or disables writes to all color channels.
    fn set_color_mask(&mut self, mask: bool);

    /// Sets the stencil test and the stencil buffer operations.
    fn set_stencil_test(&mut self, stencil: StencilState);

    /// Sets the triangle face culling mode.
    fn set_triangle_culling(&mut self, culling: CullMode);

    /// Redirects rendering into a texture.
    ///
    /// The viewport is sized to the texture for the duration of the pass; the
    /// rectangle set by [`configure_viewport`](Self::configure_viewport) is
    /// not forgotten.
    ///
    /// ## Errors
    /// * `ResourceError::NotRenderTarget` - If no offscreen buffers exist for the texture.
    fn set_render_to_texture(
        &mut self,
        texture: TextureId,
        with_depth: bool,
    ) -> Result<(), ResourceError>;

    /// Redirects rendering back to the back buffer, restoring the configured viewport.
    fn set_render_to_back_buffer(&mut self);

    // --- Uniforms ---

    /// Uploads a float uniform.
    fn set_uniform_scalar(&mut self, location: u32, value: f32);

    /// Uploads a 2-component vector uniform.
    fn set_uniform_vec2(&mut self, location: u32, value: Vec2);

    /// Uploads a 3-component vector uniform.
    fn set_uniform_vec3(&mut self, location: u32, value: Vec3);

    /// Uploads a 4-component vector uniform.
    fn set_uniform_vec4(&mut self, location: u32, value: Vec4);

    /// Uploads a 4x4 matrix uniform in column-major order.
    fn set_uniform_mat4(&mut self, location: u32, value: &Mat4);

    // --- Drawing ---

    /// Draws `triangle_count` triangles using the given index buffer.
    ///
    /// ## Errors
    /// * `ResourceError::UnknownResource` - If the index buffer was deleted.
    fn draw_triangles(
        &mut self,
        indices: IndexBufferId,
        triangle_count: u32,
    ) -> Result<(), ResourceError>;

    /// Ends the frame: returns rendering to the back buffer and asks the
    /// backend to present it.
    fn present(&mut self);
}
