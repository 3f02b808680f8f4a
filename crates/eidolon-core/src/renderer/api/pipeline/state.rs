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

//! State descriptors for the pipeline.

use super::enums::*;
use crate::eidolon_bitflags;
use crate::renderer::api::texture::{SamplerState, TextureId};
use std::collections::HashMap;

/// Describes how a fragment's color is combined with the framebuffer.
///
/// The blend equation is `source_factor * src + destination_factor * dst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendMode {
    /// The blend factor for the source color (from the fragment shader).
    pub source: BlendFactor,
    /// The blend factor for the destination color (already in the framebuffer).
    pub destination: BlendFactor,
}

impl BlendMode {
    /// No blending. The source color replaces the destination color.
    pub const OPAQUE: Self = Self {
        source: BlendFactor::One,
        destination: BlendFactor::Zero,
    };

    /// Standard alpha blending (`src.a * src + (1 - src.a) * dst`).
    pub const ALPHA: Self = Self {
        source: BlendFactor::SrcAlpha,
        destination: BlendFactor::OneMinusSrcAlpha,
    };

    /// Additive blending (`src.a * src + dst`), used for glows and particles.
    pub const ADDITIVE: Self = Self {
        source: BlendFactor::SrcAlpha,
        destination: BlendFactor::One,
    };

    /// Creates a new blend mode from explicit factors.
    #[inline]
    pub const fn new(source: BlendFactor, destination: BlendFactor) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl Default for BlendMode {
    /// Returns [`BlendMode::OPAQUE`].
    #[inline]
    fn default() -> Self {
        Self::OPAQUE
    }
}

/// Describes the stencil test and the operations applied to the stencil buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilState {
    /// The comparison function used for the stencil test.
    pub compare: CompareFunction,
    /// The reference value compared against the stencil buffer.
    pub reference: i32,
    /// A bitmask applied to both the reference and the stored value before comparing.
    pub read_mask: u32,
    /// The operation to perform if the stencil test fails.
    pub fail_op: StencilOperation,
    /// The operation to perform if the stencil test passes but the depth test fails.
    pub depth_fail_op: StencilOperation,
    /// The operation to perform if both the stencil and depth tests pass.
    pub pass_op: StencilOperation,
}

impl Default for StencilState {
    fn default() -> Self {
        StencilState {
            compare: CompareFunction::Always,
            reference: 0,
            read_mask: !0,
            fail_op: StencilOperation::Keep,
            depth_fail_op: StencilOperation::Keep,
            pass_op: StencilOperation::Keep,
        }
    }
}

/// A rectangular region of the render target that rendering is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// The horizontal position of the lower-left corner, in pixels.
    pub x: i32,
    /// The vertical position of the lower-left corner, in pixels.
    pub y: i32,
    /// The width of the viewport in pixels.
    pub width: u32,
    /// The height of the viewport in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a new viewport rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

eidolon_bitflags! {
    /// A bitmask selecting which framebuffer aspects a clear operation affects.
    pub struct ClearFlags: u32 {
        /// Clear the color buffer.
        const COLOR = 1 << 0;
        /// Clear the depth buffer.
        const DEPTH = 1 << 1;
        /// Clear the stencil buffer.
        const STENCIL = 1 << 2;
        /// Clear all buffers.
        const ALL = Self::COLOR.bits() | Self::DEPTH.bits() | Self::STENCIL.bits();
    }
}

/// The fixed-function state a draw call renders with.
///
/// These are the fallback values used when a draw call's data containers do not
/// provide a bound render state property.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStates {
    /// How fragment colors are combined with the framebuffer.
    pub blend: BlendMode,
    /// If `true`, depth values will be written to the depth buffer.
    pub depth_write: bool,
    /// The comparison function used for the depth test.
    pub depth_compare: CompareFunction,
    /// The face culling mode.
    pub culling: CullMode,
    /// The texture to render into, or `None` for the back buffer.
    pub target: Option<TextureId>,
    /// Sampler states keyed by the *shader input name* of the sampler they apply to.
    pub samplers: HashMap<String, SamplerState>,
}

impl Default for RenderStates {
    fn default() -> Self {
        RenderStates {
            blend: BlendMode::OPAQUE,
            depth_write: true,
            depth_compare: CompareFunction::Less,
            culling: CullMode::None,
            target: None,
            samplers: HashMap::new(),
        }
    }
}
