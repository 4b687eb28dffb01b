// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepflow contributors

//! Component registry
//!
//! The catalog of component kinds a pipeline may reference. A registry is
//! populated once, typically from a manifest file, and then shared read-only
//! across validations.

mod component;
mod manifest;

pub use component::{ComponentId, ComponentKind, ParameterSpec, RegisteredComponent};
pub use manifest::{ComponentManifest, ParameterManifest, RegistryManifest};

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::errors::{StepflowError, StepflowResult};

/// Append-only catalog of registered components
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<ComponentId, Arc<RegisteredComponent>>,
    components_by_name: HashMap<String, Arc<RegisteredComponent>>,
    system_event_ids: HashSet<ComponentId>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed manifest
    pub fn from_manifest(manifest: RegistryManifest) -> StepflowResult<Self> {
        let mut registry = Self::new();

        for entry in manifest.components {
            registry.try_add_component(entry.into_component()?)?;
        }

        Ok(registry)
    }

    /// Load a registry from a manifest file (YAML, JSON or TOML)
    pub fn from_file(path: &Path) -> StepflowResult<Self> {
        if !path.exists() {
            return Err(StepflowError::RegistryNotFound {
                path: path.to_path_buf(),
            });
        }

        let manifest = RegistryManifest::from_file(path)?;
        let registry = Self::from_manifest(manifest)?;

        tracing::debug!(
            path = %path.display(),
            components = registry.len(),
            "loaded component registry"
        );

        Ok(registry)
    }

    /// Insert a component. Returns false, leaving the registry untouched,
    /// when its id or name is already taken.
    pub fn add_component(&mut self, component: RegisteredComponent) -> bool {
        let by_id_exists = self.components.contains_key(&component.id);
        let by_name_exists = self.components_by_name.contains_key(&component.name);

        if by_id_exists || by_name_exists {
            tracing::warn!(
                id = %component.id,
                name = %component.name,
                "rejected duplicate component"
            );
            return false;
        }

        let component = Arc::new(component);

        if component.is_system_event {
            self.system_event_ids.insert(component.id);
        }

        self.components_by_name
            .insert(component.name.clone(), Arc::clone(&component));
        self.components.insert(component.id, component);

        true
    }

    /// Insert a component, reporting a collision as an error
    pub fn try_add_component(&mut self, component: RegisteredComponent) -> StepflowResult<()> {
        let id = component.id;
        let name = component.name.clone();

        if self.add_component(component) {
            Ok(())
        } else {
            Err(StepflowError::duplicate_component(id, &name))
        }
    }

    /// Look up a component by id
    pub fn get_component(&self, id: ComponentId) -> Option<&Arc<RegisteredComponent>> {
        self.components.get(&id)
    }

    /// Look up a component by name
    pub fn get_component_by_name(&self, name: &str) -> Option<&Arc<RegisteredComponent>> {
        self.components_by_name.get(name)
    }

    pub fn is_component_registered(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// Whether the component is a system event (false for unknown ids)
    pub fn is_system_event(&self, id: ComponentId) -> bool {
        self.system_event_ids.contains(&id)
    }

    /// All registered components, in no particular order
    pub fn components(&self) -> impl Iterator<Item = &Arc<RegisteredComponent>> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
