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

//! The flat, string-keyed property container draw calls read from.

use super::value::PropertyValue;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A shared, single-threaded handle to a [`DataContainer`].
///
/// Several draw calls typically share one container: a mesh's local container
/// and the scene's global container. The `RefCell` keeps mutation available
/// while draw calls hold the handle; borrows taken to read properties must not
/// outlive the operation that takes them.
pub type ContainerRef = Rc<RefCell<DataContainer>>;

/// A flat collection of named [`PropertyValue`]s.
///
/// Property names are plain strings. By convention they are dotted paths like
/// `"geometry.indices"` or `"material.diffuseMap"`, but the container gives
/// the dots no meaning; the full string is the key.
#[derive(Debug, Clone, Default)]
pub struct DataContainer {
    values: HashMap<String, PropertyValue>,
}

impl DataContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value under `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the value stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// Returns `true` if a value is stored under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Removes and returns the value stored under `name`, if any.
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.values.remove(name)
    }

    /// Returns the number of stored properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the container holds no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Wraps the container in a shared handle.
    pub fn into_ref(self) -> ContainerRef {
        Rc::new(RefCell::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eidolon_core::math::Vec3;

    #[test]
    fn test_set_get_has_remove() {
        let mut container = DataContainer::new();
        assert!(container.is_empty());

        container.set("material.shininess", 32.0);
        assert!(container.has("material.shininess"));
        assert_eq!(
            container.get("material.shininess").and_then(|v| v.as_float()),
            Some(32.0)
        );

        let removed = container.remove("material.shininess");
        assert!(removed.is_some());
        assert!(!container.has("material.shininess"));
        assert!(container.get("material.shininess").is_none());
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let mut container = DataContainer::new();
        container.set("light.direction", Vec3::X);
        container.set("light.direction", Vec3::Y);

        assert_eq!(
            container.get("light.direction").and_then(|v| v.as_vec3()),
            Some(Vec3::Y)
        );
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_dots_carry_no_structure() {
        let mut container = DataContainer::new();
        container.set("material.diffuse.color", 1.0);

        // Only the full key exists; prefixes are not nested scopes.
        assert!(container.has("material.diffuse.color"));
        assert!(!container.has("material.diffuse"));
        assert!(!container.has("material"));
    }

    #[test]
    fn test_shared_handle_mutation() {
        let shared = DataContainer::new().into_ref();
        shared.borrow_mut().set("time", 0.5);

        let other = Rc::clone(&shared);
        assert_eq!(
            other.borrow().get("time").and_then(|v| v.as_float()),
            Some(0.5)
        );
    }
}
