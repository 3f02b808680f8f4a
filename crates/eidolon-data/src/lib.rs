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

//! # Eidolon Data
//!
//! Property containers and geometry data for the Eidolon Engine.
//!
//! This crate holds the dynamic, string-keyed data that draw calls resolve
//! their bindings against: scene-wide values in a global container, per-mesh
//! values in a local one. Containers are shared across draw calls through
//! [`ContainerRef`], a single-threaded shared handle.

#![warn(missing_docs)]

pub mod property;

pub use property::{
    ContainerRef, DataContainer, IndexStream, PropertyValue, VertexAttribute, VertexStream,
};
