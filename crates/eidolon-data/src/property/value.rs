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

//! Defines the set of values a property container can hold.

use eidolon_core::math::{Mat4, Vec2, Vec3, Vec4};
use eidolon_core::renderer::api::{
    BlendMode, CompareFunction, CullMode, IndexBufferId, TextureId, VertexBufferId,
};

/// A single named vertex attribute inside a [`VertexStream`].
///
/// `size` and `offset` are expressed in floats, consistent with
/// [`VertexStreamBinding`](eidolon_core::renderer::api::VertexStreamBinding).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    /// The attribute name, e.g. `"position"` or `"uv"`.
    pub name: String,
    /// The number of float components of the attribute (1 to 4).
    pub size: u32,
    /// The offset in floats of the attribute from the start of a vertex.
    pub offset: u32,
}

/// Interleaved per-vertex data living in one vertex buffer.
///
/// A stream declares the attributes it interleaves; draw calls look
/// attributes up by name when they wire shader inputs to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexStream {
    /// The vertex buffer holding the interleaved data.
    pub buffer: VertexBufferId,
    /// The number of floats one vertex occupies, which is also the stride.
    pub vertex_size: u32,
    attributes: Vec<VertexAttribute>,
}

impl VertexStream {
    /// Creates a stream over `buffer` with no declared attributes yet.
    pub fn new(buffer: VertexBufferId, vertex_size: u32) -> Self {
        Self {
            buffer,
            vertex_size,
            attributes: Vec::new(),
        }
    }

    /// Declares an attribute of the stream, builder style.
    pub fn with_attribute(mut self, name: impl Into<String>, size: u32, offset: u32) -> Self {
        self.attributes.push(VertexAttribute {
            name: name.into(),
            size,
            offset,
        });
        self
    }

    /// Returns the declared attribute with the given name, if any.
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Returns all declared attributes in declaration order.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }
}

/// Triangle index data living in one index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStream {
    /// The index buffer holding the data.
    pub buffer: IndexBufferId,
    /// The total number of indices, three per triangle.
    pub index_count: u32,
}

impl IndexStream {
    /// Creates a new index stream.
    pub fn new(buffer: IndexBufferId, index_count: u32) -> Self {
        Self {
            buffer,
            index_count,
        }
    }
}

/// A dynamically typed value stored in a [`DataContainer`](super::DataContainer).
///
/// Draw call binding looks values up by property name and then requires a
/// specific variant; [`type_name`](PropertyValue::type_name) names the variant
/// in error messages.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A single float.
    Float(f32),
    /// A 2-component float vector.
    Vec2(Vec2),
    /// A 3-component float vector.
    Vec3(Vec3),
    /// A 4-component float vector.
    Vec4(Vec4),
    /// A 4x4 float matrix.
    Mat4(Mat4),
    /// A boolean flag.
    Bool(bool),
    /// A texture handle.
    Texture(TextureId),
    /// Interleaved vertex data with named attributes.
    VertexStream(VertexStream),
    /// Triangle index data.
    IndexStream(IndexStream),
    /// A blend mode.
    Blend(BlendMode),
    /// A depth or stencil comparison function.
    DepthCompare(CompareFunction),
    /// A triangle culling mode.
    Culling(CullMode),
}

impl PropertyValue {
    /// Returns a short, human-readable name of the held variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Float(_) => "float",
            PropertyValue::Vec2(_) => "vec2",
            PropertyValue::Vec3(_) => "vec3",
            PropertyValue::Vec4(_) => "vec4",
            PropertyValue::Mat4(_) => "mat4",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Texture(_) => "texture",
            PropertyValue::VertexStream(_) => "vertex stream",
            PropertyValue::IndexStream(_) => "index stream",
            PropertyValue::Blend(_) => "blend mode",
            PropertyValue::DepthCompare(_) => "compare function",
            PropertyValue::Culling(_) => "cull mode",
        }
    }

    /// Returns the held float, if this is a [`PropertyValue::Float`].
    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held vector, if this is a [`PropertyValue::Vec2`].
    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            PropertyValue::Vec2(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held vector, if this is a [`PropertyValue::Vec3`].
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            PropertyValue::Vec3(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held vector, if this is a [`PropertyValue::Vec4`].
    pub fn as_vec4(&self) -> Option<Vec4> {
        match self {
            PropertyValue::Vec4(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held matrix, if this is a [`PropertyValue::Mat4`].
    pub fn as_mat4(&self) -> Option<&Mat4> {
        match self {
            PropertyValue::Mat4(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the held flag, if this is a [`PropertyValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held texture handle, if this is a [`PropertyValue::Texture`].
    pub fn as_texture(&self) -> Option<TextureId> {
        match self {
            PropertyValue::Texture(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held vertex stream, if this is a [`PropertyValue::VertexStream`].
    pub fn as_vertex_stream(&self) -> Option<&VertexStream> {
        match self {
            PropertyValue::VertexStream(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the held index stream, if this is a [`PropertyValue::IndexStream`].
    pub fn as_index_stream(&self) -> Option<IndexStream> {
        match self {
            PropertyValue::IndexStream(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held blend mode, if this is a [`PropertyValue::Blend`].
    pub fn as_blend(&self) -> Option<BlendMode> {
        match self {
            PropertyValue::Blend(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held comparison, if this is a [`PropertyValue::DepthCompare`].
    pub fn as_depth_compare(&self) -> Option<CompareFunction> {
        match self {
            PropertyValue::DepthCompare(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the held cull mode, if this is a [`PropertyValue::Culling`].
    pub fn as_culling(&self) -> Option<CullMode> {
        match self {
            PropertyValue::Culling(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<Vec2> for PropertyValue {
    fn from(value: Vec2) -> Self {
        PropertyValue::Vec2(value)
    }
}

impl From<Vec3> for PropertyValue {
    fn from(value: Vec3) -> Self {
        PropertyValue::Vec3(value)
    }
}

impl From<Vec4> for PropertyValue {
    fn from(value: Vec4) -> Self {
        PropertyValue::Vec4(value)
    }
}

impl From<Mat4> for PropertyValue {
    fn from(value: Mat4) -> Self {
        PropertyValue::Mat4(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<TextureId> for PropertyValue {
    fn from(value: TextureId) -> Self {
        PropertyValue::Texture(value)
    }
}

impl From<VertexStream> for PropertyValue {
    fn from(value: VertexStream) -> Self {
        PropertyValue::VertexStream(value)
    }
}

impl From<IndexStream> for PropertyValue {
    fn from(value: IndexStream) -> Self {
        PropertyValue::IndexStream(value)
    }
}

impl From<BlendMode> for PropertyValue {
    fn from(value: BlendMode) -> Self {
        PropertyValue::Blend(value)
    }
}

impl From<CompareFunction> for PropertyValue {
    fn from(value: CompareFunction) -> Self {
        PropertyValue::DepthCompare(value)
    }
}

impl From<CullMode> for PropertyValue {
    fn from(value: CullMode) -> Self {
        PropertyValue::Culling(value)
    }
}
