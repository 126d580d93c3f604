use std::collections::BTreeMap;

use crate::bilateral::BilateralFilter;
use crate::blur::BlurFilter;
use crate::element::VideoFilter;
use crate::error::VideoFilterError;

/// A function creating a new element instance.
pub type ElementFactory = fn() -> Box<dyn VideoFilter>;

/// Description of a plugin providing one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Plugin name.
    pub name: &'static str,
    /// What the plugin provides.
    pub description: &'static str,
    /// Plugin version.
    pub version: &'static str,
    /// License of the plugin.
    pub license: &'static str,
    /// Name of the element the plugin registers.
    pub element: &'static str,
}

/// Descriptors of the plugins shipped with this crate.
pub const PLUGINS: [PluginDescriptor; 2] = [
    PluginDescriptor {
        name: "blurfilter",
        description: "Blur- and sharpening filter for grayscale video",
        version: "0.1.0",
        license: "LGPL",
        element: BlurFilter::NAME,
    },
    PluginDescriptor {
        name: "bilateralfilter",
        description: "Separable bilateral filter for grayscale video",
        version: "0.1.0",
        license: "LGPL",
        element: BilateralFilter::NAME,
    },
];

/// A name to factory map of video filter elements.
#[derive(Debug, Default)]
pub struct Registry {
    factories: BTreeMap<&'static str, ElementFactory>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every element of this crate.
    pub fn with_default_elements() -> Result<Self, VideoFilterError> {
        let mut registry = Self::new();
        register_elements(&mut registry)?;
        Ok(registry)
    }

    /// Register an element factory under `name`.
    pub fn register(
        &mut self,
        name: &'static str,
        factory: ElementFactory,
    ) -> Result<(), VideoFilterError> {
        if self.factories.contains_key(name) {
            return Err(VideoFilterError::DuplicateElement(name.to_string()));
        }
        log::debug!("registered element {name}");
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Create a new instance of the element registered under `name`.
    pub fn make(&self, name: &str) -> Result<Box<dyn VideoFilter>, VideoFilterError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| VideoFilterError::UnknownElement(name.to_string()))?;
        Ok(factory())
    }

    /// Names of the registered elements, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}

/// Register the blur and bilateral filter elements.
pub fn register_elements(registry: &mut Registry) -> Result<(), VideoFilterError> {
    registry.register(BlurFilter::NAME, || Box::new(BlurFilter::new()))?;
    registry.register(BilateralFilter::NAME, || Box::new(BilateralFilter::new()))?;
    Ok(())
}
