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

//! # Eidolon Render
//!
//! Draw call binding and frame orchestration for the Eidolon Engine.
//!
//! This crate connects three worlds: shader programs with introspected,
//! typed inputs; property containers holding geometry, textures, and uniform
//! values under string names; and a [`RenderContext`] that issues GPU work.
//! A [`DrawCall`] is configured once against its program and containers,
//! resolving every input to a concrete resource slot or value, and can then
//! be rendered every frame without touching the name-resolution machinery
//! again.
//!
//! [`RenderContext`]: eidolon_core::renderer::RenderContext

#![warn(missing_docs)]

pub mod bindings;
pub mod draw_call;
pub mod renderer;

pub use bindings::BindingMap;
pub use draw_call::{
    AttributeSlot, DrawCall, ResolvedDrawCall, ResolvedStates, SamplerSlot,
    INDEX_STREAM_PROPERTY, STATE_BLEND_MODE, STATE_DEPTH_COMPARE, STATE_DEPTH_WRITE,
    STATE_RENDER_TARGET, STATE_TRIANGLE_CULLING,
};
pub use renderer::Renderer;
