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

//! Defines the hierarchy of error types for the rendering subsystem.

use crate::renderer::api::program::ProgramId;
use crate::renderer::api::texture::TextureId;
use std::fmt;

/// An error raised while resolving a draw call's bindings against its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// Neither data container provides the mandatory `geometry.indices` stream.
    MissingIndexStream,
    /// The program needs more vertex attributes than there are attribute slots.
    AttributeCapacity {
        /// The name of the program input that could not be given a slot.
        input: String,
    },
    /// The program needs more texture samplers than there are texture units.
    SamplerCapacity {
        /// The name of the program input that could not be given a unit.
        input: String,
    },
    /// A bound property exists but holds a value of the wrong type.
    PropertyTypeMismatch {
        /// The property name that resolved to the wrong type.
        property: String,
        /// The type the program input requires.
        expected: &'static str,
        /// The type the container actually holds.
        found: &'static str,
    },
    /// A vertex stream was found but does not declare the requested attribute.
    UnknownAttribute {
        /// The property name the vertex stream was resolved from.
        property: String,
        /// The attribute name that is missing from the stream.
        attribute: String,
    },
    /// A re-resolve was requested on a draw call that was never configured.
    NotConfigured,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::MissingIndexStream => {
                write!(f, "Draw call data provides no 'geometry.indices' stream")
            }
            BindError::AttributeCapacity { input } => {
                write!(
                    f,
                    "Too many vertex attributes: no free slot for input '{input}'"
                )
            }
            BindError::SamplerCapacity { input } => {
                write!(
                    f,
                    "Too many texture samplers: no free unit for input '{input}'"
                )
            }
            BindError::PropertyTypeMismatch {
                property,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Property '{property}' holds a {found}, but the program input requires a {expected}"
                )
            }
            BindError::UnknownAttribute {
                property,
                attribute,
            } => {
                write!(
                    f,
                    "Vertex stream '{property}' declares no attribute named '{attribute}'"
                )
            }
            BindError::NotConfigured => {
                write!(f, "Draw call has never been configured")
            }
        }
    }
}

impl std::error::Error for BindError {}

/// An error related to the creation or use of a GPU resource (buffers, textures, programs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// A texture was requested with dimensions that are not powers of two.
    InvalidDimensions {
        /// The requested width in texels.
        width: u32,
        /// The requested height in texels.
        height: u32,
    },
    /// The offscreen framebuffer built for a render target is not complete.
    IncompleteFramebuffer {
        /// The texture the framebuffer renders into.
        texture: TextureId,
        /// Detailed status reported by the backend.
        details: String,
    },
    /// The backend failed to link a shader program.
    ProgramLink {
        /// The program that failed to link.
        program: ProgramId,
        /// The linker's info log.
        details: String,
    },
    /// An operation referenced a resource ID that is unknown or was deleted.
    UnknownResource {
        /// The kind of resource, e.g. `"texture"` or `"vertex buffer"`.
        kind: &'static str,
        /// The raw ID that failed to resolve.
        id: usize,
    },
    /// A texture not created for render-to-texture use was set as a render target.
    NotRenderTarget {
        /// The offending texture.
        texture: TextureId,
    },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "Texture dimensions {width}x{height} are not powers of two"
                )
            }
            ResourceError::IncompleteFramebuffer { texture, details } => {
                write!(
                    f,
                    "Framebuffer for render target {texture:?} is incomplete: {details}"
                )
            }
            ResourceError::ProgramLink { program, details } => {
                write!(f, "Failed to link program {program:?}: {details}")
            }
            ResourceError::UnknownResource { kind, id } => {
                write!(f, "No {kind} exists with ID {id}")
            }
            ResourceError::NotRenderTarget { texture } => {
                write!(f, "Texture {texture:?} was not created as a render target")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// A high-level error that can occur while rendering a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A draw call was rendered before ever being configured.
    NotConfigured,
    /// A draw call binding operation failed.
    Bind(BindError),
    /// An error occurred while managing a GPU resource.
    Resource(ResourceError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotConfigured => {
                write!(f, "Cannot render a draw call that has never been configured")
            }
            RenderError::Bind(err) => {
                write!(f, "Draw call binding failed: {err}")
            }
            RenderError::Resource(err) => {
                write!(f, "Graphics resource operation failed: {err}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Bind(err) => Some(err),
            RenderError::Resource(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BindError> for RenderError {
    fn from(err: BindError) -> Self {
        RenderError::Bind(err)
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::Resource(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn bind_error_display() {
        let err = BindError::PropertyTypeMismatch {
            property: "material.diffuseMap".to_string(),
            expected: "texture",
            found: "float",
        };
        assert_eq!(
            format!("{err}"),
            "Property 'material.diffuseMap' holds a float, but the program input requires a texture"
        );

        let err_capacity = BindError::AttributeCapacity {
            input: "aTangent".to_string(),
        };
        assert_eq!(
            format!("{err_capacity}"),
            "Too many vertex attributes: no free slot for input 'aTangent'"
        );
    }

    #[test]
    fn resource_error_display() {
        let err = ResourceError::InvalidDimensions {
            width: 100,
            height: 256,
        };
        assert_eq!(
            format!("{err}"),
            "Texture dimensions 100x256 are not powers of two"
        );
    }

    #[test]
    fn render_error_display_wrapping_bind_error() {
        let bind_err = BindError::MissingIndexStream;
        let render_err: RenderError = bind_err.into();
        assert_eq!(
            format!("{render_err}"),
            "Draw call binding failed: Draw call data provides no 'geometry.indices' stream"
        );
        assert!(render_err.source().is_some());
    }

    #[test]
    fn render_error_display_wrapping_resource_error() {
        let res_err = ResourceError::NotRenderTarget {
            texture: TextureId(7),
        };
        let render_err: RenderError = res_err.into();
        assert_eq!(
            format!("{render_err}"),
            "Graphics resource operation failed: Texture TextureId(7) was not created as a render target"
        );
        assert!(render_err.source().is_some());
    }
}
