use crate::core::class::PresenterClass;
use crate::utils::error::{PresenterError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Frozen presenter types by name.
#[derive(Debug, Clone, Default)]
pub struct PresenterRegistry {
    classes: BTreeMap<String, Arc<PresenterClass>>,
}

impl PresenterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freezes `class` and stores it, replacing any type with the same name.
    pub fn register(&mut self, class: PresenterClass) -> Arc<PresenterClass> {
        let class = class.freeze();
        if self
            .classes
            .insert(class.name().to_string(), Arc::clone(&class))
            .is_some()
        {
            tracing::debug!("replaced presenter {}", class.name());
        }
        class
    }

    pub fn get(&self, name: &str) -> Option<Arc<PresenterClass>> {
        self.classes.get(name).cloned()
    }

    pub fn fetch(&self, name: &str) -> Result<Arc<PresenterClass>> {
        self.get(name).ok_or_else(|| PresenterError::UnknownPresenter {
            name: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
