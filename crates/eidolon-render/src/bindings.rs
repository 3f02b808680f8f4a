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

//! Maps shader input names to the property names they read from.

use eidolon_core::renderer::error::BindError;
use eidolon_data::{DataContainer, PropertyValue};
use std::collections::HashMap;

/// A mapping from shader input names to data container property names.
///
/// Shader sources name their inputs freely (`aPosition`, `uDiffuseMap`), while
/// containers organize properties by convention (`geometry.position`,
/// `material.diffuseMap`). A binding map translates between the two. Input
/// names without an entry resolve to themselves, so inputs that already match
/// a property name need no binding.
#[derive(Debug, Clone, Default)]
pub struct BindingMap {
    map: HashMap<String, String>,
}

impl BindingMap {
    /// Creates an empty binding map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a shader input name to a property name, builder style.
    pub fn with(mut self, input: impl Into<String>, property: impl Into<String>) -> Self {
        self.insert(input, property);
        self
    }

    /// Binds a shader input name to a property name.
    pub fn insert(&mut self, input: impl Into<String>, property: impl Into<String>) {
        self.map.insert(input.into(), property.into());
    }

    /// Resolves an input name to the property name it reads from.
    ///
    /// Returns the bound property name, or `name` itself if no binding exists.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.map.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no input is bound.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Resolves a render state through this map and a pair of containers.
    ///
    /// The state name is translated like any input name, then looked up in
    /// the local container first and the global one second. The first
    /// container that holds the property decides: `extract` pulls the typed
    /// value out of it, and a value of the wrong type is an error rather
    /// than a fallthrough. Only when neither container holds the property is
    /// `fallback` returned.
    pub fn resolve_state<T>(
        &self,
        state_name: &str,
        expected: &'static str,
        local: &DataContainer,
        global: &DataContainer,
        extract: impl Fn(&PropertyValue) -> Option<T>,
        fallback: T,
    ) -> Result<T, BindError> {
        let property = self.resolve(state_name);
        for container in [local, global] {
            if let Some(value) = container.get(property) {
                return extract(value).ok_or_else(|| BindError::PropertyTypeMismatch {
                    property: property.to_string(),
                    expected,
                    found: value.type_name(),
                });
            }
        }
        Ok(fallback)
    }
}
