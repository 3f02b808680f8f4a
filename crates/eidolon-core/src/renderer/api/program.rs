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

//! Defines shader program handles and their introspected input interface.

/// An opaque handle to a linked GPU shader program.
///
/// This ID is returned by [`RenderContext::create_program`] and is used to
/// reference the program in all subsequent operations.
///
/// [`RenderContext::create_program`]: crate::renderer::RenderContext::create_program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub usize);

/// The type of a single shader program input.
///
/// This is a closed set: a backend that introspects a program must map every
/// active input to one of these variants, and reject the program otherwise.
/// Code consuming [`ProgramInputs`] can therefore match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    /// A per-vertex attribute fed from a vertex buffer.
    Attribute,
    /// A 2D texture sampler uniform.
    Sampler2D,
    /// A single float uniform.
    Scalar,
    /// A 2-component float vector uniform.
    Vec2,
    /// A 3-component float vector uniform.
    Vec3,
    /// A 4-component float vector uniform.
    Vec4,
    /// A 4x4 float matrix uniform.
    Mat4,
}

impl InputType {
    /// Returns `true` if this input is a vertex attribute rather than a uniform.
    #[inline]
    pub fn is_attribute(&self) -> bool {
        matches!(self, InputType::Attribute)
    }
}

/// A single active input of a shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInput {
    /// The name of the input as declared in the shader source.
    pub name: String,
    /// The type of the input.
    pub ty: InputType,
    /// The location of the input. For attributes this is the attribute
    /// location, for uniforms the uniform location.
    pub location: u32,
}

impl ProgramInput {
    /// Creates a new program input description.
    pub fn new(name: impl Into<String>, ty: InputType, location: u32) -> Self {
        Self {
            name: name.into(),
            ty,
            location,
        }
    }
}

/// The complete, ordered list of a program's active inputs.
///
/// The order of the inputs is the program's declaration order. Draw call
/// configuration walks the inputs in this order, which makes resource slot
/// assignment deterministic for a given program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramInputs {
    inputs: Vec<ProgramInput>,
}

impl ProgramInputs {
    /// Creates a new input list from inputs in declaration order.
    pub fn new(inputs: Vec<ProgramInput>) -> Self {
        Self { inputs }
    }

    /// Returns the input with the given name, if the program declares one.
    pub fn get(&self, name: &str) -> Option<&ProgramInput> {
        self.inputs.iter().find(|input| input.name == name)
    }

    /// Returns an iterator over the inputs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProgramInput> {
        self.inputs.iter()
    }

    /// Returns the number of active inputs.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Returns `true` if the program declares no active inputs.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// A linked shader program together with its introspected inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The GPU handle of the linked program.
    pub id: ProgramId,
    /// The program's active inputs in declaration order.
    pub inputs: ProgramInputs,
}

impl Program {
    /// Creates a new program description.
    pub fn new(id: ProgramId, inputs: ProgramInputs) -> Self {
        Self { id, inputs }
    }
}
