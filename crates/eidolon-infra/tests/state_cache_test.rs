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

//! Integration tests for the caching context's redundancy elimination.
//!
//! A recording driver keeps the exact sequence of commands the cache lets
//! through, so each test can assert both what reached the driver and what
//! the cache swallowed.

use eidolon_core::math::{LinearRgba, Mat4, Vec2, Vec3, Vec4};
use eidolon_core::renderer::api::{
    BlendFactor, BlendMode, ClearFlags, CompareFunction, CullMode, IndexBufferId, MipFilter,
    ProgramId, SamplerState, StencilOperation, StencilState, TextureDescriptor, TextureFilter,
    TextureId, VertexBufferId, VertexStreamBinding, Viewport, WrapMode,
};
use eidolon_core::renderer::error::ResourceError;
use eidolon_core::renderer::RenderContext;
use eidolon_infra::graphics::{CachedContext, FrameBufferId, GpuDriver, RenderBufferId};
use std::cell::RefCell;
use std::rc::Rc;

/// One command that made it through the cache.
#[derive(Debug, Clone, PartialEq)]
enum DriverCall {
    CreateVertexBuffer(VertexBufferId),
    UploadVertexBuffer(VertexBufferId, usize),
    DestroyVertexBuffer(VertexBufferId),
    CreateIndexBuffer(IndexBufferId),
    UploadIndexBuffer(IndexBufferId, usize),
    DestroyIndexBuffer(IndexBufferId),
    CreateTexture(TextureId),
    UploadTexture(TextureId, u32, u32, u32),
    DestroyTexture(TextureId),
    SetTextureWrap(TextureId, WrapMode),
    SetTextureFilter(TextureId, TextureFilter, MipFilter),
    CreateProgram(ProgramId),
    LinkProgram(ProgramId),
    DestroyProgram(ProgramId),
    UseProgram(ProgramId),
    CreateFramebuffer(FrameBufferId),
    AttachColorTexture(FrameBufferId, TextureId),
    CreateRenderbuffer(RenderBufferId, u32, u32),
    AttachDepthRenderbuffer(FrameBufferId, RenderBufferId),
    FramebufferStatus(FrameBufferId),
    DestroyFramebuffer(FrameBufferId),
    DestroyRenderbuffer(RenderBufferId),
    BindFramebuffer(Option<FrameBufferId>),
    BindRenderbuffer(Option<RenderBufferId>),
    SetViewport(Viewport),
    Clear(ClearFlags),
    BindTexture(usize, Option<TextureId>),
    SetUniformSampler(u32, usize),
    SetVertexAttribute(u32, VertexBufferId, u32, u32, u32),
    DisableVertexAttribute(u32),
    SetBlendFunction(BlendFactor, BlendFactor),
    SetDepthMask(bool),
    SetDepthFunction(CompareFunction),
    SetColorMask(bool),
    SetStencilFunction(CompareFunction, i32, u32),
    SetStencilOperations(StencilOperation, StencilOperation, StencilOperation),
    SetCullingEnabled(bool),
    SetCullFace(CullMode),
    BindIndexBuffer(Option<IndexBufferId>),
    DrawIndexed(u32),
    Present,
}

/// A driver that records everything the cache issues.
#[derive(Debug)]
struct RecordingDriver {
    calls: Rc<RefCell<Vec<DriverCall>>>,
    next_id: usize,
    fail_framebuffers: bool,
}

impl RecordingDriver {
    fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            next_id: 1,
            fail_framebuffers: false,
        }
    }

    /// A driver whose framebuffers never pass the completeness check.
    fn with_failing_framebuffers() -> Self {
        Self {
            fail_framebuffers: true,
            ..Self::new()
        }
    }

    fn calls(&self) -> Rc<RefCell<Vec<DriverCall>>> {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: DriverCall) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl GpuDriver for RecordingDriver {
    fn create_vertex_buffer(&mut self) -> VertexBufferId {
        let id = VertexBufferId(self.allocate());
        self.record(DriverCall::CreateVertexBuffer(id));
        id
    }

    fn upload_vertex_buffer(&mut self, buffer: VertexBufferId, data: &[f32]) {
        self.record(DriverCall::UploadVertexBuffer(buffer, data.len()));
    }

    fn destroy_vertex_buffer(&mut self, buffer: VertexBufferId) {
        self.record(DriverCall::DestroyVertexBuffer(buffer));
    }

    fn create_index_buffer(&mut self) -> IndexBufferId {
        let id = IndexBufferId(self.allocate());
        self.record(DriverCall::CreateIndexBuffer(id));
        id
    }

    fn upload_index_buffer(&mut self, buffer: IndexBufferId, data: &[u16]) {
        self.record(DriverCall::UploadIndexBuffer(buffer, data.len()));
    }

    fn destroy_index_buffer(&mut self, buffer: IndexBufferId) {
        self.record(DriverCall::DestroyIndexBuffer(buffer));
    }

    fn create_texture(&mut self) -> TextureId {
        let id = TextureId(self.allocate());
        self.record(DriverCall::CreateTexture(id));
        id
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        width: u32,
        height: u32,
        mip_level: u32,
        _data: &[u8],
    ) {
        self.record(DriverCall::UploadTexture(texture, width, height, mip_level));
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.record(DriverCall::DestroyTexture(texture));
    }

    fn set_texture_wrap(&mut self, texture: TextureId, wrap: WrapMode) {
        self.record(DriverCall::SetTextureWrap(texture, wrap));
    }

    fn set_texture_filter(&mut self, texture: TextureId, filter: TextureFilter, mip: MipFilter) {
        self.record(DriverCall::SetTextureFilter(texture, filter, mip));
    }

    fn create_program(&mut self, _vertex_source: &str, _fragment_source: &str) -> ProgramId {
        let id = ProgramId(self.allocate());
        self.record(DriverCall::CreateProgram(id));
        id
    }

    fn link_program(&mut self, program: ProgramId) -> Result<(), String> {
        self.record(DriverCall::LinkProgram(program));
        Ok(())
    }

    fn destroy_program(&mut self, program: ProgramId) {
        self.record(DriverCall::DestroyProgram(program));
    }

    fn use_program(&mut self, program: ProgramId) {
        self.record(DriverCall::UseProgram(program));
    }

    fn create_framebuffer(&mut self) -> FrameBufferId {
        let id = FrameBufferId(self.allocate());
        self.record(DriverCall::CreateFramebuffer(id));
        id
    }

    fn attach_color_texture(&mut self, framebuffer: FrameBufferId, texture: TextureId) {
        self.record(DriverCall::AttachColorTexture(framebuffer, texture));
    }

    fn create_renderbuffer(&mut self, width: u32, height: u32) -> RenderBufferId {
        let id = RenderBufferId(self.allocate());
        self.record(DriverCall::CreateRenderbuffer(id, width, height));
        id
    }

    fn attach_depth_renderbuffer(&mut self, framebuffer: FrameBufferId, depth: RenderBufferId) {
        self.record(DriverCall::AttachDepthRenderbuffer(framebuffer, depth));
    }

    fn framebuffer_status(&mut self, framebuffer: FrameBufferId) -> Result<(), String> {
        self.record(DriverCall::FramebufferStatus(framebuffer));
        if self.fail_framebuffers {
            Err("missing attachment".to_string())
        } else {
            Ok(())
        }
    }

    fn destroy_framebuffer(&mut self, framebuffer: FrameBufferId) {
        self.record(DriverCall::DestroyFramebuffer(framebuffer));
    }

    fn destroy_renderbuffer(&mut self, renderbuffer: RenderBufferId) {
        self.record(DriverCall::DestroyRenderbuffer(renderbuffer));
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FrameBufferId>) {
        self.record(DriverCall::BindFramebuffer(framebuffer));
    }

    fn bind_renderbuffer(&mut self, renderbuffer: Option<RenderBufferId>) {
        self.record(DriverCall::BindRenderbuffer(renderbuffer));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.record(DriverCall::SetViewport(viewport));
    }

    fn clear(&mut self, _color: LinearRgba, _depth: f32, _stencil: i32, flags: ClearFlags) {
        self.record(DriverCall::Clear(flags));
    }

    fn bind_texture(&mut self, unit: usize, texture: Option<TextureId>) {
        self.record(DriverCall::BindTexture(unit, texture));
    }

    fn set_uniform_sampler(&mut self, location: u32, unit: usize) {
        self.record(DriverCall::SetUniformSampler(location, unit));
    }

    fn set_vertex_attribute(
        &mut self,
        location: u32,
        buffer: VertexBufferId,
        size: u32,
        stride: u32,
        offset: u32,
    ) {
        self.record(DriverCall::SetVertexAttribute(
            location, buffer, size, stride, offset,
        ));
    }

    fn disable_vertex_attribute(&mut self, location: u32) {
        self.record(DriverCall::DisableVertexAttribute(location));
    }

    fn set_blend_function(&mut self, source: BlendFactor, destination: BlendFactor) {
        self.record(DriverCall::SetBlendFunction(source, destination));
    }

    fn set_depth_mask(&mut self, write: bool) {
        self.record(DriverCall::SetDepthMask(write));
    }

    fn set_depth_function(&mut self, compare: CompareFunction) {
        self.record(DriverCall::SetDepthFunction(compare));
    }

    fn set_color_mask(&mut self, mask: bool) {
        self.record(DriverCall::SetColorMask(mask));
    }

    fn set_stencil_function(&mut self, compare: CompareFunction, reference: i32, read_mask: u32) {
        self.record(DriverCall::SetStencilFunction(compare, reference, read_mask));
    }

    fn set_stencil_operations(
        &mut self,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
    ) {
        self.record(DriverCall::SetStencilOperations(fail, depth_fail, pass));
    }

    fn set_culling_enabled(&mut self, enabled: bool) {
        self.record(DriverCall::SetCullingEnabled(enabled));
    }

    fn set_cull_face(&mut self, mode: CullMode) {
        self.record(DriverCall::SetCullFace(mode));
    }

    fn set_uniform_scalar(&mut self, _location: u32, _value: f32) {}

    fn set_uniform_vec2(&mut self, _location: u32, _value: Vec2) {}

    fn set_uniform_vec3(&mut self, _location: u32, _value: Vec3) {}

    fn set_uniform_vec4(&mut self, _location: u32, _value: Vec4) {}

    fn set_uniform_mat4(&mut self, _location: u32, _value: &Mat4) {}

    fn bind_index_buffer(&mut self, buffer: Option<IndexBufferId>) {
        self.record(DriverCall::BindIndexBuffer(buffer));
    }

    fn draw_indexed(&mut self, index_count: u32) {
        self.record(DriverCall::DrawIndexed(index_count));
    }

    fn present(&mut self) {
        self.record(DriverCall::Present);
    }
}

type Calls = Rc<RefCell<Vec<DriverCall>>>;

fn rig() -> (CachedContext<RecordingDriver>, Calls) {
    let driver = RecordingDriver::new();
    let calls = driver.calls();
    (CachedContext::new(driver), calls)
}

fn count_matching(calls: &Calls, predicate: impl Fn(&DriverCall) -> bool) -> usize {
    calls.borrow().iter().filter(|call| predicate(call)).count()
}

fn plain_texture(context: &mut CachedContext<RecordingDriver>, size: u32) -> TextureId {
    context
        .create_texture(&TextureDescriptor {
            width: size,
            height: size,
            ..TextureDescriptor::default()
        })
        .unwrap()
}

fn target_texture(context: &mut CachedContext<RecordingDriver>, size: u32) -> TextureId {
    context
        .create_texture(&TextureDescriptor {
            width: size,
            height: size,
            render_target: true,
            ..TextureDescriptor::default()
        })
        .unwrap()
}

#[test]
fn test_redundant_fixed_function_state_is_swallowed() {
    let (mut context, calls) = rig();

    context.set_blend_mode(BlendMode::ALPHA);
    context.set_blend_mode(BlendMode::ALPHA);
    context.set_depth_test(false, CompareFunction::LessEqual);
    context.set_depth_test(false, CompareFunction::LessEqual);
    context.set_color_mask(false);
    context.set_color_mask(false);

    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetBlendFunction(..))),
        1
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetDepthMask(_))),
        1
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetDepthFunction(_))),
        1
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetColorMask(_))),
        1
    );
}

#[test]
fn test_depth_state_reissues_both_calls_when_either_half_changes() {
    let (mut context, calls) = rig();

    context.set_depth_test(true, CompareFunction::Less);
    context.set_depth_test(true, CompareFunction::Always);

    // The pair is diffed as a pair: a changed function reissues the mask too.
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetDepthMask(_))),
        2
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetDepthFunction(_))),
        2
    );
}

#[test]
fn test_vertex_binding_diff_covers_the_offset() {
    let (mut context, calls) = rig();
    let buffer = context.create_vertex_buffer(&[0.0; 30]).unwrap();

    let first = VertexStreamBinding::new(buffer, 3, 5, 0);
    let second = VertexStreamBinding::new(buffer, 3, 5, 3);

    context.set_vertex_buffer_at(0, Some(first));
    context.set_vertex_buffer_at(0, Some(first));
    context.set_vertex_buffer_at(0, Some(second));

    let issued: Vec<_> = calls
        .borrow()
        .iter()
        .filter(|c| matches!(c, DriverCall::SetVertexAttribute(..)))
        .cloned()
        .collect();
    // Strides and offsets reach the driver in bytes.
    assert_eq!(
        issued,
        vec![
            DriverCall::SetVertexAttribute(0, buffer, 3, 20, 0),
            DriverCall::SetVertexAttribute(0, buffer, 3, 20, 12),
        ]
    );
}

#[test]
fn test_unbinding_disables_only_known_locations() {
    let (mut context, calls) = rig();
    let buffer = context.create_vertex_buffer(&[0.0; 9]).unwrap();

    // Nothing bound yet: the unbind has nothing to disable.
    context.set_vertex_buffer_at(4, None);
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::DisableVertexAttribute(_))),
        0
    );

    context.set_vertex_buffer_at(4, Some(VertexStreamBinding::new(buffer, 3, 3, 0)));
    context.set_vertex_buffer_at(4, None);
    context.set_vertex_buffer_at(4, None);
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::DisableVertexAttribute(4))),
        1
    );
}

#[test]
fn test_sampler_state_follows_texture_identity_across_units() {
    let (mut context, calls) = rig();
    let texture = context
        .create_texture(&TextureDescriptor {
            width: 64,
            height: 64,
            mip_mapped: true,
            ..TextureDescriptor::default()
        })
        .unwrap();

    let trilinear = SamplerState::new(WrapMode::Repeat, TextureFilter::Linear, MipFilter::Linear);

    context.set_texture_at(0, Some(texture), Some(4));
    context.set_sampler_state_at(0, trilinear);

    let wraps_before = count_matching(&calls, |c| matches!(c, DriverCall::SetTextureWrap(..)));
    let filters_before = count_matching(&calls, |c| matches!(c, DriverCall::SetTextureFilter(..)));

    // Same texture on another unit: its parameters are already in place.
    context.set_texture_at(1, Some(texture), Some(5));
    context.set_sampler_state_at(1, trilinear);

    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetTextureWrap(..))),
        wraps_before
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetTextureFilter(..))),
        filters_before
    );
}

#[test]
fn test_sampler_state_without_a_bound_texture_is_ignored() {
    let (mut context, calls) = rig();
    context.set_sampler_state_at(0, SamplerState::DEFAULT);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_mip_filter_is_forced_off_without_mip_levels() {
    let (mut context, calls) = rig();
    let texture = plain_texture(&mut context, 64);

    context.set_texture_at(0, Some(texture), None);
    context.set_sampler_state_at(
        0,
        SamplerState::new(WrapMode::Clamp, TextureFilter::Linear, MipFilter::Linear),
    );

    assert!(calls.borrow().contains(&DriverCall::SetTextureFilter(
        texture,
        TextureFilter::Linear,
        MipFilter::None,
    )));
}

#[test]
fn test_texture_rebind_is_diffed_but_sampler_uniform_is_not() {
    let (mut context, calls) = rig();
    let texture = plain_texture(&mut context, 64);

    context.set_texture_at(0, Some(texture), Some(4));
    context.set_texture_at(0, Some(texture), Some(4));

    // One bind, but the uniform goes out every time: it belongs to the
    // current program, not to the unit.
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::BindTexture(..))),
        1
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetUniformSampler(4, 0))),
        2
    );
}

#[test]
fn test_render_target_is_realized_lazily_and_once() {
    let (mut context, calls) = rig();
    let texture = target_texture(&mut context, 64);

    // Creation alone must not build the offscreen pair.
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::CreateFramebuffer(_))),
        0
    );

    context.ensure_render_target(texture).unwrap();
    context.ensure_render_target(texture).unwrap();

    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::CreateFramebuffer(_))),
        1
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::CreateRenderbuffer(_, 64, 64))),
        1
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::AttachColorTexture(_, t) if *t == texture)),
        1
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::FramebufferStatus(_))),
        1
    );
}

#[test]
fn test_incomplete_framebuffer_tears_the_pair_down() {
    let driver = RecordingDriver::with_failing_framebuffers();
    let calls = driver.calls();
    let mut context = CachedContext::new(driver);
    let texture = target_texture(&mut context, 64);

    let err = context.ensure_render_target(texture).unwrap_err();
    assert_eq!(
        err,
        ResourceError::IncompleteFramebuffer {
            texture,
            details: "missing attachment".to_string(),
        }
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::DestroyFramebuffer(_))),
        1
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::DestroyRenderbuffer(_))),
        1
    );

    // Nothing was registered, so another attempt rebuilds from scratch.
    let _ = context.ensure_render_target(texture);
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::CreateFramebuffer(_))),
        2
    );
}

#[test]
fn test_viewport_is_saved_and_restored_around_target_switches() {
    let (mut context, calls) = rig();
    let texture = target_texture(&mut context, 128);
    let screen = Viewport::new(0, 0, 800, 600);

    context.configure_viewport(screen);
    context.ensure_render_target(texture).unwrap();
    context.set_render_to_texture(texture, true).unwrap();
    context.set_render_to_back_buffer();

    let viewports: Vec<_> = calls
        .borrow()
        .iter()
        .filter_map(|c| match c {
            DriverCall::SetViewport(viewport) => Some(*viewport),
            _ => None,
        })
        .collect();
    assert_eq!(
        viewports,
        vec![screen, Viewport::new(0, 0, 128, 128), screen],
        "render-to-texture must size the viewport to the target and restore on return"
    );
}

#[test]
fn test_back_buffer_restore_skips_viewport_when_never_configured() {
    let (mut context, calls) = rig();
    let texture = target_texture(&mut context, 128);

    context.ensure_render_target(texture).unwrap();
    context.set_render_to_texture(texture, true).unwrap();
    context.set_render_to_back_buffer();

    // Only the render-to-texture sizing call; there is nothing to restore.
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetViewport(_))),
        1
    );
}

#[test]
fn test_redundant_target_switches_are_swallowed() {
    let (mut context, calls) = rig();
    let texture = target_texture(&mut context, 64);
    context.ensure_render_target(texture).unwrap();

    context.set_render_to_texture(texture, true).unwrap();
    context.set_render_to_texture(texture, true).unwrap();
    context.set_render_to_back_buffer();
    context.set_render_to_back_buffer();

    let framebuffer_binds: Vec<_> = calls
        .borrow()
        .iter()
        .filter(|c| matches!(c, DriverCall::BindFramebuffer(_)))
        .cloned()
        .collect();
    // Realization restores the back buffer, then one switch each way; the
    // repeated calls never reach the driver.
    assert_eq!(
        framebuffer_binds,
        vec![
            DriverCall::BindFramebuffer(None),
            DriverCall::BindFramebuffer(Some(FrameBufferId(2))),
            DriverCall::BindFramebuffer(None),
        ]
    );
}

#[test]
fn test_present_returns_to_the_back_buffer_first() {
    let (mut context, calls) = rig();
    let texture = target_texture(&mut context, 64);
    context.ensure_render_target(texture).unwrap();
    context.set_render_to_texture(texture, true).unwrap();

    context.present();

    let recorded = calls.borrow();
    let tail = &recorded[recorded.len() - 3..];
    assert_eq!(
        tail,
        &[
            DriverCall::BindFramebuffer(None),
            DriverCall::BindRenderbuffer(None),
            DriverCall::Present,
        ]
    );
}

#[test]
fn test_deleting_the_active_target_falls_back_to_the_back_buffer() {
    let (mut context, calls) = rig();
    let texture = target_texture(&mut context, 64);
    context.ensure_render_target(texture).unwrap();
    context.set_render_to_texture(texture, true).unwrap();

    context.delete_texture(texture);

    let recorded = calls.borrow();
    assert!(recorded.contains(&DriverCall::DestroyFramebuffer(FrameBufferId(2))));
    assert!(recorded.contains(&DriverCall::DestroyRenderbuffer(RenderBufferId(3))));
    assert!(recorded.contains(&DriverCall::DestroyTexture(texture)));
    // The fallback switch happened before the texture went away. The last
    // unbind is the fallback; the first belongs to realization.
    let unbind = recorded
        .iter()
        .rposition(|c| *c == DriverCall::BindFramebuffer(None))
        .unwrap();
    let destroy = recorded
        .iter()
        .position(|c| *c == DriverCall::DestroyTexture(texture))
        .unwrap();
    assert!(unbind < destroy);
}

#[test]
fn test_deleting_a_texture_clears_unit_shadows() {
    let (mut context, calls) = rig();
    let texture = plain_texture(&mut context, 64);

    context.set_texture_at(0, Some(texture), None);
    context.delete_texture(texture);

    // The unit shadow is gone, so binding nothing is already true.
    context.set_texture_at(0, None, None);
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::BindTexture(0, None))),
        0
    );

    // And binding a new texture to the unit is issued again.
    let replacement = plain_texture(&mut context, 64);
    context.set_texture_at(0, Some(replacement), None);
    assert_eq!(
        count_matching(
            &calls,
            |c| matches!(c, DriverCall::BindTexture(0, Some(t)) if *t == replacement)
        ),
        1
    );
}

#[test]
fn test_deleting_a_vertex_buffer_resets_location_shadows() {
    let (mut context, calls) = rig();
    let buffer = context.create_vertex_buffer(&[0.0; 9]).unwrap();
    let binding = VertexStreamBinding::new(buffer, 3, 3, 0);

    context.set_vertex_buffer_at(0, Some(binding));
    context.delete_vertex_buffer(buffer);

    // No disable is issued for the dead buffer's location.
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::DisableVertexAttribute(_))),
        0
    );

    // The identical binding is issued again because the shadow was dropped.
    context.set_vertex_buffer_at(0, Some(binding));
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetVertexAttribute(..))),
        2
    );
}

#[test]
fn test_element_binding_is_reused_across_draws() {
    let (mut context, calls) = rig();
    let indices = context.create_index_buffer(&[0, 1, 2, 2, 1, 3]).unwrap();

    context.draw_triangles(indices, 2).unwrap();
    context.draw_triangles(indices, 2).unwrap();

    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::BindIndexBuffer(Some(_)))),
        1
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::DrawIndexed(6))),
        2
    );
}

#[test]
fn test_drawing_with_a_deleted_index_buffer_fails() {
    let (mut context, _calls) = rig();
    let indices = context.create_index_buffer(&[0, 1, 2]).unwrap();
    context.delete_index_buffer(indices);

    let err = context.draw_triangles(indices, 1).unwrap_err();
    assert_eq!(
        err,
        ResourceError::UnknownResource {
            kind: "index buffer",
            id: indices.0,
        }
    );
}

#[test]
fn test_depth_clear_forces_depth_writes_back_on() {
    let (mut context, calls) = rig();

    context.set_depth_test(false, CompareFunction::Less);
    context.clear(
        LinearRgba::BLACK,
        1.0,
        0,
        ClearFlags::COLOR | ClearFlags::DEPTH,
    );

    let recorded = calls.borrow();
    let mask_on = recorded
        .iter()
        .position(|c| *c == DriverCall::SetDepthMask(true))
        .expect("the depth clear must re-enable depth writes");
    let clear = recorded
        .iter()
        .position(|c| matches!(c, DriverCall::Clear(_)))
        .unwrap();
    assert!(mask_on < clear);
    drop(recorded);

    // The shadow tracked the forced change: this pair is already current.
    context.set_depth_test(true, CompareFunction::Less);
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetDepthMask(_))),
        2
    );
}

#[test]
fn test_color_only_clear_leaves_the_depth_mask_alone() {
    let (mut context, calls) = rig();

    context.set_depth_test(false, CompareFunction::Less);
    context.clear(LinearRgba::BLACK, 1.0, 0, ClearFlags::COLOR);

    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetDepthMask(true))),
        0
    );
}

#[test]
fn test_culling_enable_and_disable_transitions() {
    let (mut context, calls) = rig();

    context.set_triangle_culling(CullMode::Back);
    context.set_triangle_culling(CullMode::Front);
    context.set_triangle_culling(CullMode::Front);
    context.set_triangle_culling(CullMode::None);
    context.set_triangle_culling(CullMode::None);
    context.set_triangle_culling(CullMode::Both);

    let culling: Vec<_> = calls
        .borrow()
        .iter()
        .filter(|c| {
            matches!(
                c,
                DriverCall::SetCullingEnabled(_) | DriverCall::SetCullFace(_)
            )
        })
        .cloned()
        .collect();
    assert_eq!(
        culling,
        vec![
            DriverCall::SetCullingEnabled(true),
            DriverCall::SetCullFace(CullMode::Back),
            DriverCall::SetCullFace(CullMode::Front),
            DriverCall::SetCullingEnabled(false),
            DriverCall::SetCullingEnabled(true),
            DriverCall::SetCullFace(CullMode::Both),
        ]
    );
}

#[test]
fn test_stencil_function_and_operations_diff_independently() {
    let (mut context, calls) = rig();

    let base = StencilState::default();
    context.set_stencil_test(base);

    let mut reference_changed = base;
    reference_changed.reference = 1;
    context.set_stencil_test(reference_changed);

    let mut ops_changed = reference_changed;
    ops_changed.pass_op = StencilOperation::Replace;
    context.set_stencil_test(ops_changed);

    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetStencilFunction(..))),
        2,
        "initial apply plus the reference change"
    );
    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::SetStencilOperations(..))),
        2,
        "initial apply plus the pass-op change"
    );
}

#[test]
fn test_program_delete_clears_the_binding_shadow() {
    let (mut context, calls) = rig();
    let program = context.create_program("vs", "fs").unwrap();
    context.link_program(program).unwrap();

    context.set_program(program);
    context.set_program(program);
    context.delete_program(program);
    // With the shadow cleared, the next set is issued again.
    context.set_program(program);

    assert_eq!(
        count_matching(&calls, |c| matches!(c, DriverCall::UseProgram(_))),
        2
    );
}

#[test]
fn test_texture_upload_scales_mip_dimensions() {
    let (mut context, calls) = rig();
    let texture = context
        .create_texture(&TextureDescriptor {
            width: 64,
            height: 64,
            mip_mapped: true,
            ..TextureDescriptor::default()
        })
        .unwrap();

    context.upload_texture_data(texture, &[0; 16384], 0).unwrap();
    context.upload_texture_data(texture, &[0; 256], 3).unwrap();
    context.upload_texture_data(texture, &[0; 4], 7).unwrap();

    let uploads: Vec<_> = calls
        .borrow()
        .iter()
        .filter(|c| matches!(c, DriverCall::UploadTexture(..)))
        .cloned()
        .collect();
    assert_eq!(
        uploads,
        vec![
            DriverCall::UploadTexture(texture, 64, 64, 0),
            DriverCall::UploadTexture(texture, 8, 8, 3),
            DriverCall::UploadTexture(texture, 1, 1, 7),
        ]
    );
}
