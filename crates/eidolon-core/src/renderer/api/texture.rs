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

//! Defines data structures related to GPU texture and sampler resources.

/// An opaque handle to a GPU texture resource.
///
/// This ID is returned by [`RenderContext::create_texture`] and is used to
/// reference the texture in all subsequent operations.
///
/// [`RenderContext::create_texture`]: crate::renderer::RenderContext::create_texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Defines how texture coordinates are handled when sampling outside the `[0, 1]` range.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Coordinates are clamped to the edge. `1.1` becomes `1.0`.
    #[default]
    Clamp,
    /// Coordinates wrap around. `1.1` becomes `0.1`.
    Repeat,
}

/// Defines the filtering mode for texture sampling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    /// Point sampling. Returns the value of the nearest texel.
    #[default]
    Nearest,
    /// Linear interpolation. Returns a weighted average of the four nearest texels.
    Linear,
}

/// Defines the filtering mode between mipmap levels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MipFilter {
    /// Mipmaps are not used for sampling.
    #[default]
    None,
    /// Use the nearest mipmap level.
    Nearest,
    /// Linearly interpolate between the two nearest mipmap levels.
    Linear,
}

/// A complete description of how a shader samples from a texture.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerState {
    /// The address mode for both texture coordinates.
    pub wrap: WrapMode,
    /// The filter mode for minification and magnification.
    pub filter: TextureFilter,
    /// The filter mode to use between mipmap levels.
    pub mip: MipFilter,
}

impl SamplerState {
    /// The sampler state newly created textures start with: clamped
    /// coordinates, point sampling, no mipmapping.
    pub const DEFAULT: Self = Self {
        wrap: WrapMode::Clamp,
        filter: TextureFilter::Nearest,
        mip: MipFilter::None,
    };

    /// Creates a new sampler state.
    #[inline]
    pub const fn new(wrap: WrapMode, filter: TextureFilter, mip: MipFilter) -> Self {
        Self { wrap, filter, mip }
    }
}

/// A descriptor used to create a [`TextureId`].
///
/// Both dimensions must be powers of two.
#[derive(Debug, Clone, Default)]
pub struct TextureDescriptor {
    /// An optional debug label.
    pub label: Option<String>,
    /// The width of the texture in texels.
    pub width: u32,
    /// The height of the texture in texels.
    pub height: u32,
    /// If `true`, a full mipmap chain is allocated for the texture.
    pub mip_mapped: bool,
    /// If `true`, the texture can later serve as a render target.
    pub render_target: bool,
}
