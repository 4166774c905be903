// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape factories keyed by record type.

use core::fmt;
use std::collections::HashMap;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use lamina_core::content::{RectShape, Shape};
use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::record::ObjectRecord;

/// Field that marks a legacy gradient record.
const GRADIENT_STOPS: &str = "colorStops";

/// Type that legacy records carrying [`GRADIENT_STOPS`] resolve to.
pub const GRADIENT_TYPE: &str = "gradient";

/// The eventual result of a shape factory.
pub type ShapeFuture = LocalBoxFuture<'static, Result<Box<dyn Shape>, FormatError>>;

/// Builds a shape from the shape-specific fields of a record.
///
/// Factories may suspend, for example to fetch an image.
pub type ShapeFactory = Box<dyn Fn(&Map<String, Value>) -> ShapeFuture>;

/// Shape factories keyed by the record `type`.
///
/// Containers (`group` records) are built by
/// [`deserialize`](crate::deserialize) itself and need no factory.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, ShapeFactory>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.factories.keys().collect();
        types.sort();
        f.debug_struct("Registry").field("types", &types).finish()
    }
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `rect` factory.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(RectShape::TYPE_NAME, |fields| {
            let fields = fields.clone();
            async move {
                let shape: RectShape = serde_json::from_value(Value::Object(fields))?;
                Ok::<_, FormatError>(Box::new(shape) as Box<dyn Shape>)
            }
            .boxed_local()
        });
        registry
    }

    /// Registers `factory` for `type_name`, replacing any previous one.
    pub fn register<F>(&mut self, type_name: &str, factory: F)
    where
        F: Fn(&Map<String, Value>) -> ShapeFuture + 'static,
    {
        self.factories
            .insert(type_name.to_owned(), Box::new(factory));
    }

    /// Whether a factory is registered for `type_name`.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// The type a record resolves to.
    ///
    /// Records without a `type` that carry a `colorStops` list resolve to
    /// [`GRADIENT_TYPE`].
    ///
    /// # Errors
    ///
    /// Fails if the record has neither.
    pub fn resolve_type<'a>(&self, record: &'a ObjectRecord) -> Result<&'a str, FormatError> {
        match record.type_name.as_deref() {
            Some(type_name) => Ok(type_name),
            None if record.fields.contains_key(GRADIENT_STOPS) => Ok(GRADIENT_TYPE),
            None => Err(FormatError::Invalid("record has no `type`".to_owned())),
        }
    }

    /// Starts building the shape of a leaf record.
    ///
    /// # Errors
    ///
    /// Fails if the type cannot be resolved or has no factory.
    pub fn build(&self, record: &ObjectRecord) -> Result<ShapeFuture, FormatError> {
        let type_name = self.resolve_type(record)?;
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| FormatError::UnresolvedType(type_name.to_owned()))?;
        Ok(factory(&record.fields))
    }
}
