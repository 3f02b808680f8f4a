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

//! Defines handles and binding descriptions for GPU buffer resources.

/// An opaque handle to a GPU vertex buffer resource.
///
/// This ID is returned by [`RenderContext::create_vertex_buffer`] and is used to
/// reference the buffer in all subsequent operations.
///
/// [`RenderContext::create_vertex_buffer`]: crate::renderer::RenderContext::create_vertex_buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexBufferId(pub usize);

/// An opaque handle to a GPU index buffer resource.
///
/// This ID is returned by [`RenderContext::create_index_buffer`]. Index data is
/// 16-bit unsigned, three indices per triangle.
///
/// [`RenderContext::create_index_buffer`]: crate::renderer::RenderContext::create_index_buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexBufferId(pub usize);

/// Describes how one vertex attribute reads from a vertex buffer.
///
/// `stride` and `offset` are expressed in *floats*, not bytes. The backend
/// scales them to bytes when it programs the attribute pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexStreamBinding {
    /// The vertex buffer holding the attribute data.
    pub buffer: VertexBufferId,
    /// The number of float components per vertex (1 to 4).
    pub size: u32,
    /// The number of floats between the start of two consecutive vertices.
    pub stride: u32,
    /// The offset in floats of this attribute from the start of a vertex.
    pub offset: u32,
}

impl VertexStreamBinding {
    /// Creates a new binding description.
    #[inline]
    pub const fn new(buffer: VertexBufferId, size: u32, stride: u32, offset: u32) -> Self {
        Self {
            buffer,
            size,
            stride,
            offset,
        }
    }
}
