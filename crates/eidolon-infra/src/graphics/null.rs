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

//! A headless driver that logs commands instead of executing them.

use crate::graphics::driver::{FrameBufferId, GpuDriver, RenderBufferId};
use eidolon_core::math::{LinearRgba, Mat4, Vec2, Vec3, Vec4};
use eidolon_core::renderer::api::{
    BlendFactor, ClearFlags, CompareFunction, CullMode, IndexBufferId, MipFilter, ProgramId,
    StencilOperation, TextureFilter, TextureId, VertexBufferId, Viewport, WrapMode,
};
use log::trace;
use std::cell::Cell;
use std::rc::Rc;

/// A [`GpuDriver`] with no GPU behind it.
///
/// Every call is counted and logged at `trace` level, which makes the driver
/// useful for demos and for measuring how many commands the caching layer
/// actually lets through. Resource IDs are handed out from a single counter,
/// so IDs are unique across resource kinds.
#[derive(Debug)]
pub struct NullDriver {
    calls: Rc<Cell<usize>>,
    next_id: usize,
}

impl NullDriver {
    /// Creates a driver with the call counter at zero.
    pub fn new() -> Self {
        Self {
            calls: Rc::new(Cell::new(0)),
            next_id: 1,
        }
    }

    /// Returns a shared handle to the call counter.
    ///
    /// The counter keeps counting after the driver moves into a context.
    pub fn call_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }

    fn tick(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    fn allocate(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for NullDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuDriver for NullDriver {
    fn create_vertex_buffer(&mut self) -> VertexBufferId {
        self.tick();
        let id = VertexBufferId(self.allocate());
        trace!("null driver: create_vertex_buffer -> {id:?}");
        id
    }

    fn upload_vertex_buffer(&mut self, buffer: VertexBufferId, data: &[f32]) {
        self.tick();
        trace!("null driver: upload_vertex_buffer({buffer:?}, {} floats)", data.len());
    }

    fn destroy_vertex_buffer(&mut self, buffer: VertexBufferId) {
        self.tick();
        trace!("null driver: destroy_vertex_buffer({buffer:?})");
    }

    fn create_index_buffer(&mut self) -> IndexBufferId {
        self.tick();
        let id = IndexBufferId(self.allocate());
        trace!("null driver: create_index_buffer -> {id:?}");
        id
    }

    fn upload_index_buffer(&mut self, buffer: IndexBufferId, data: &[u16]) {
        self.tick();
        trace!("null driver: upload_index_buffer({buffer:?}, {} indices)", data.len());
    }

    fn destroy_index_buffer(&mut self, buffer: IndexBufferId) {
        self.tick();
        trace!("null driver: destroy_index_buffer({buffer:?})");
    }

    fn create_texture(&mut self) -> TextureId {
        self.tick();
        let id = TextureId(self.allocate());
        trace!("null driver: create_texture -> {id:?}");
        id
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        width: u32,
        height: u32,
        mip_level: u32,
        data: &[u8],
    ) {
        self.tick();
        trace!(
            "null driver: upload_texture({texture:?}, {width}x{height}, mip {mip_level}, {} bytes)",
            data.len()
        );
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.tick();
        trace!("null driver: destroy_texture({texture:?})");
    }

    fn set_texture_wrap(&mut self, texture: TextureId, wrap: WrapMode) {
        self.tick();
        trace!("null driver: set_texture_wrap({texture:?}, {wrap:?})");
    }

    fn set_texture_filter(&mut self, texture: TextureId, filter: TextureFilter, mip: MipFilter) {
        self.tick();
        trace!("null driver: set_texture_filter({texture:?}, {filter:?}, {mip:?})");
    }

    fn create_program(&mut self, vertex_source: &str, fragment_source: &str) -> ProgramId {
        self.tick();
        let id = ProgramId(self.allocate());
        trace!(
            "null driver: create_program({} + {} chars) -> {id:?}",
            vertex_source.len(),
            fragment_source.len()
        );
        id
    }

    fn link_program(&mut self, program: ProgramId) -> Result<(), String> {
        self.tick();
        trace!("null driver: link_program({program:?})");
        Ok(())
    }

    fn destroy_program(&mut self, program: ProgramId) {
        self.tick();
        trace!("null driver: destroy_program({program:?})");
    }

    fn use_program(&mut self, program: ProgramId) {
        self.tick();
        trace!("null driver: use_program({program:?})");
    }

    fn create_framebuffer(&mut self) -> FrameBufferId {
        self.tick();
        let id = FrameBufferId(self.allocate());
        trace!("null driver: create_framebuffer -> {id:?}");
        id
    }

    fn attach_color_texture(&mut self, framebuffer: FrameBufferId, texture: TextureId) {
        self.tick();
        trace!("null driver: attach_color_texture({framebuffer:?}, {texture:?})");
    }

    fn create_renderbuffer(&mut self, width: u32, height: u32) -> RenderBufferId {
        self.tick();
        let id = RenderBufferId(self.allocate());
        trace!("null driver: create_renderbuffer({width}x{height}) -> {id:?}");
        id
    }

    fn attach_depth_renderbuffer(&mut self, framebuffer: FrameBufferId, depth: RenderBufferId) {
        self.tick();
        trace!("null driver: attach_depth_renderbuffer({framebuffer:?}, {depth:?})");
    }

    fn framebuffer_status(&mut self, framebuffer: FrameBufferId) -> Result<(), String> {
        self.tick();
        trace!("null driver: framebuffer_status({framebuffer:?})");
        Ok(())
    }

    fn destroy_framebuffer(&mut self, framebuffer: FrameBufferId) {
        self.tick();
        trace!("null driver: destroy_framebuffer({framebuffer:?})");
    }

    fn destroy_renderbuffer(&mut self, renderbuffer: RenderBufferId) {
        self.tick();
        trace!("null driver: destroy_renderbuffer({renderbuffer:?})");
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FrameBufferId>) {
        self.tick();
        trace!("null driver: bind_framebuffer({framebuffer:?})");
    }

    fn bind_renderbuffer(&mut self, renderbuffer: Option<RenderBufferId>) {
        self.tick();
        trace!("null driver: bind_renderbuffer({renderbuffer:?})");
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.tick();
        trace!("null driver: set_viewport({viewport:?})");
    }

    fn clear(&mut self, color: LinearRgba, depth: f32, stencil: i32, flags: ClearFlags) {
        self.tick();
        trace!("null driver: clear({color:?}, depth {depth}, stencil {stencil}, {flags:?})");
    }

    fn bind_texture(&mut self, unit: usize, texture: Option<TextureId>) {
        self.tick();
        trace!("null driver: bind_texture(unit {unit}, {texture:?})");
    }

    fn set_uniform_sampler(&mut self, location: u32, unit: usize) {
        self.tick();
        trace!("null driver: set_uniform_sampler(location {location}, unit {unit})");
    }

    fn set_vertex_attribute(
        &mut self,
        location: u32,
        buffer: VertexBufferId,
        size: u32,
        stride: u32,
        offset: u32,
    ) {
        self.tick();
        trace!(
            "null driver: set_vertex_attribute(location {location}, {buffer:?}, size {size}, \
             stride {stride}B, offset {offset}B)"
        );
    }

    fn disable_vertex_attribute(&mut self, location: u32) {
        self.tick();
        trace!("null driver: disable_vertex_attribute(location {location})");
    }

    fn set_blend_function(&mut self, source: BlendFactor, destination: BlendFactor) {
        self.tick();
        trace!("null driver: set_blend_function({source:?}, {destination:?})");
    }

    fn set_depth_mask(&mut self, write: bool) {
        self.tick();
        trace!("null driver: set_depth_mask({write})");
    }

    fn set_depth_function(&mut self, compare: CompareFunction) {
        self.tick();
        trace!("null driver: set_depth_function({compare:?})");
    }

    fn set_color_mask(&mut self, mask: bool) {
        self.tick();
        trace!("null driver: set_color_mask({mask})");
    }

    fn set_stencil_function(&mut self, compare: CompareFunction, reference: i32, read_mask: u32) {
        self.tick();
        trace!("null driver: set_stencil_function({compare:?}, ref {reference}, mask {read_mask:#x})");
    }

    fn set_stencil_operations(
        &mut self,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
    ) {
        self.tick();
        trace!("null driver: set_stencil_operations({fail:?}, {depth_fail:?}, {pass:?})");
    }

    fn set_culling_enabled(&mut self, enabled: bool) {
        self.tick();
        trace!("null driver: set_culling_enabled({enabled})");
    }

    fn set_cull_face(&mut self, mode: CullMode) {
        self.tick();
        trace!("null driver: set_cull_face({mode:?})");
    }

    fn set_uniform_scalar(&mut self, location: u32, value: f32) {
        self.tick();
        trace!("null driver: set_uniform_scalar(location {location}, {value})");
    }

    fn set_uniform_vec2(&mut self, location: u32, value: Vec2) {
        self.tick();
        trace!("null driver: set_uniform_vec2(location {location}, {value:?})");
    }

    fn set_uniform_vec3(&mut self, location: u32, value: Vec3) {
        self.tick();
        trace!("null driver: set_uniform_vec3(location {location}, {value:?})");
    }

    fn set_uniform_vec4(&mut self, location: u32, value: Vec4) {
        self.tick();
        trace!("null driver: set_uniform_vec4(location {location}, {value:?})");
    }

    fn set_uniform_mat4(&mut self, location: u32, value: &Mat4) {
        self.tick();
        trace!("null driver: set_uniform_mat4(location {location}, {value:?})");
    }

    fn bind_index_buffer(&mut self, buffer: Option<IndexBufferId>) {
        self.tick();
        trace!("null driver: bind_index_buffer({buffer:?})");
    }

    fn draw_indexed(&mut self, index_count: u32) {
        self.tick();
        trace!("null driver: draw_indexed({index_count} indices)");
    }

    fn present(&mut self) {
        self.tick();
        trace!("null driver: present");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let mut driver = NullDriver::new();
        let vb = driver.create_vertex_buffer();
        let ib = driver.create_index_buffer();
        let tex = driver.create_texture();
        assert_ne!(vb.0, ib.0);
        assert_ne!(ib.0, tex.0);
    }

    #[test]
    fn test_call_counter_counts_every_call() {
        let mut driver = NullDriver::new();
        let counter = driver.call_counter();

        driver.set_depth_mask(false);
        driver.set_depth_mask(false);
        let _ = driver.create_texture();

        assert_eq!(counter.get(), 3);
    }
}
