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

//! Backend-agnostic rendering API.
//!
//! Organized into several logical sub-modules:
//!
//! - **[`buffer`]**: Vertex and index buffer handles and binding descriptions.
//! - **[`texture`]**: Texture handles, descriptors, and sampler states.
//! - **[`program`]**: Shader program handles and introspected inputs.
//! - **[`pipeline`]**: Fixed-function state and its configuration enums.

pub mod buffer;
pub mod pipeline;
pub mod program;
pub mod texture;

/// The number of texture units a draw call can address.
pub const MAX_TEXTURE_UNITS: usize = 8;

/// The number of vertex attribute slots a draw call can address.
pub const MAX_VERTEX_ATTRIBUTES: usize = 8;

pub use buffer::{IndexBufferId, VertexBufferId, VertexStreamBinding};
pub use pipeline::{
    BlendFactor, BlendMode, ClearFlags, CompareFunction, CullMode, RenderStates, StencilOperation,
    StencilState, Viewport,
};
pub use program::{InputType, Program, ProgramId, ProgramInput, ProgramInputs};
pub use texture::{MipFilter, SamplerState, TextureDescriptor, TextureFilter, TextureId, WrapMode};
