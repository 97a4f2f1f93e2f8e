//! Gadget registry: class id to constructor lookup.
//!
//! The palette lists what the registry holds, and drag-and-drop builds
//! gadgets by class id through [`GadgetRegistry::build`].

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::gadget::Gadget;
use crate::pipeline::kind::{Family, GadgetKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// One registered gadget class, as listed in the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GadgetRegistration {
    pub class_id: String,
    pub family: Family,
    pub title: &'static str,
    pub css_class: &'static str,
    #[serde(skip)]
    pub kind: GadgetKind,
}

impl GadgetRegistration {
    fn new(kind: GadgetKind) -> Self {
        Self {
            class_id: kind.class_id(),
            family: kind.family(),
            title: kind.title(),
            css_class: kind.css_class(),
            kind,
        }
    }
}

/// Factory for creating gadgets by class id.
#[derive(Debug, Clone, Default)]
pub struct GadgetRegistry {
    classes: BTreeMap<String, GadgetRegistration>,
}

impl GadgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in gadget class.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for &kind in GadgetKind::all() {
            if let Err(err) = registry.register(kind) {
                debug_assert!(false, "built-in class ids must be distinct: {}", err);
                tracing::error!("Skipped built-in gadget class: {}", err);
            }
        }
        registry
    }

    /// Register a gadget class. Fails if its class id is already taken.
    pub fn register(&mut self, kind: GadgetKind) -> PipelineResult<()> {
        let registration = GadgetRegistration::new(kind);
        if self.classes.contains_key(&registration.class_id) {
            return Err(PipelineError::DuplicateClass(registration.class_id));
        }
        tracing::debug!("Registered gadget class {}", registration.class_id);
        self.classes
            .insert(registration.class_id.clone(), registration);
        Ok(())
    }

    pub fn lookup(&self, class_id: &str) -> Option<&GadgetRegistration> {
        self.classes.get(class_id)
    }

    /// Construct a gadget of the class registered as `class_id` at `(x, y)`.
    pub fn build(&self, class_id: &str, x: i32, y: i32) -> PipelineResult<Gadget> {
        let registration = self
            .lookup(class_id)
            .ok_or_else(|| PipelineError::UnknownClass(class_id.to_string()))?;
        Ok(Gadget::new(registration.kind, x, y))
    }

    /// Registered classes, sorted by class id.
    pub fn list(&self) -> Vec<&GadgetRegistration> {
        self.classes.values().collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
