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

//! Implements the frame loop over a list of draw calls.

use crate::draw_call::DrawCall;
use eidolon_core::math::LinearRgba;
use eidolon_core::renderer::api::ClearFlags;
use eidolon_core::renderer::error::RenderError;
use eidolon_core::renderer::RenderContext;
use log::trace;

/// Renders an ordered list of configured draw calls, once per frame.
///
/// The renderer owns its draw calls; callers keep the index returned by
/// [`add`](Renderer::add) and reach back in through
/// [`draw_call_mut`](Renderer::draw_call_mut) when a draw call needs to be
/// reconfigured.
#[derive(Debug, Default)]
pub struct Renderer {
    draw_calls: Vec<DrawCall>,
    background: LinearRgba,
}

impl Renderer {
    /// Creates an empty renderer clearing to opaque black.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the color the back buffer is cleared to each frame.
    pub fn set_background(&mut self, color: LinearRgba) {
        self.background = color;
    }

    /// Appends a draw call and returns its index.
    ///
    /// Draw calls are rendered in insertion order.
    pub fn add(&mut self, draw_call: DrawCall) -> usize {
        self.draw_calls.push(draw_call);
        self.draw_calls.len() - 1
    }

    /// Returns a mutable handle to the draw call at `index`, if any.
    pub fn draw_call_mut(&mut self, index: usize) -> Option<&mut DrawCall> {
        self.draw_calls.get_mut(index)
    }

    /// Returns the draw calls in render order.
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    /// Renders one frame: clear, every draw call in order, present.
    ///
    /// The clear targets the back buffer with the configured background
    /// color, depth 1.0 and stencil 0. Rendering stops at the first failing
    /// draw call.
    ///
    /// ## Errors
    /// Returns the first [`RenderError`] any draw call produces.
    pub fn render_frame(&self, context: &mut dyn RenderContext) -> Result<(), RenderError> {
        trace!("rendering frame with {} draw call(s)", self.draw_calls.len());
        context.clear(self.background, 1.0, 0, ClearFlags::ALL);
        for draw_call in &self.draw_calls {
            draw_call.render(context)?;
        }
        context.present();
        Ok(())
    }
}
