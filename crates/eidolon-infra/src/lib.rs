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

//! Backend implementations for the rendering stack.
//!
//! The crate's centerpiece is [`graphics::CachedContext`], the state-caching
//! implementation of the core `RenderContext` trait. It sits on top of a
//! [`graphics::GpuDriver`], the raw command sink a concrete graphics API (or
//! the headless [`graphics::NullDriver`]) plugs into.

#![warn(missing_docs)]

pub mod graphics;
