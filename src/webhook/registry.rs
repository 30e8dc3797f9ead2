//! Name-to-constructor tables for producers, deliverers and serializers.
//!
//! A [`WebhookRegistry`] can be owned and passed around explicitly. For
//! callers that want ambient access, the free functions in this module
//! operate on one process-wide registry guarded by an [`RwLock`] and seeded
//! with the built-ins on first use.
//!
//! Registering under a name that is already taken replaces the previous
//! entry without warning.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::config::Settings;

use super::WebhookError;
use super::deliverer::{Deliverer, HttpDeliverer, check_format};
use super::producer::{DefaultProducer, Producer};
use super::serializer::{JsonSerializer, Serializer};

/// Builds a producer around a deliverer.
pub type ProducerConstructor = Arc<dyn Fn(Box<dyn Deliverer>) -> Box<dyn Producer> + Send + Sync>;

/// Builds a deliverer around a serializer, reading destination settings.
pub type DelivererConstructor = Arc<
    dyn Fn(Box<dyn Serializer>, &Settings) -> Result<Box<dyn Deliverer>, WebhookError>
        + Send
        + Sync,
>;

/// Builds a serializer.
pub type SerializerConstructor = Arc<dyn Fn() -> Box<dyn Serializer> + Send + Sync>;

/// Name of the built-in producer.
pub const DEFAULT_PRODUCER: &str = "default";
/// Name of the built-in deliverer.
pub const HTTP_DELIVERER: &str = "http";
/// Name of the built-in serializer.
pub const JSON_SERIALIZER: &str = "json";

/// Three independent name tables, one per pipeline role.
#[derive(Clone, Default)]
pub struct WebhookRegistry {
    producers: HashMap<String, ProducerConstructor>,
    deliverers: HashMap<String, DelivererConstructor>,
    serializers: HashMap<String, SerializerConstructor>,
}

impl WebhookRegistry {
    /// Creates a registry with no entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in `"default"` producer,
    /// `"http"` deliverer and `"json"` serializer.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_producer(DEFAULT_PRODUCER, default_producer);
        registry.register_deliverer(HTTP_DELIVERER, http_deliverer);
        registry.register_serializer(JSON_SERIALIZER, json_serializer);
        registry
    }

    /// Registers a producer constructor, replacing any entry of that name.
    pub fn register_producer<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(Box<dyn Deliverer>) -> Box<dyn Producer> + Send + Sync + 'static,
    {
        self.producers.insert(name.into(), Arc::new(constructor));
    }

    /// Registers a deliverer constructor, replacing any entry of that name.
    pub fn register_deliverer<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(Box<dyn Serializer>, &Settings) -> Result<Box<dyn Deliverer>, WebhookError>
            + Send
            + Sync
            + 'static,
    {
        self.deliverers.insert(name.into(), Arc::new(constructor));
    }

    /// Registers a serializer constructor, replacing any entry of that name.
    pub fn register_serializer<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Serializer> + Send + Sync + 'static,
    {
        self.serializers.insert(name.into(), Arc::new(constructor));
    }

    /// Looks up a producer constructor.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidProducer`] if `name` is not registered.
    pub fn get_producer(&self, name: &str) -> Result<ProducerConstructor, WebhookError> {
        self.producers
            .get(name)
            .cloned()
            .ok_or_else(|| WebhookError::InvalidProducer(name.to_string()))
    }

    /// Looks up a deliverer constructor.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidDeliverer`] if `name` is not registered.
    pub fn get_deliverer(&self, name: &str) -> Result<DelivererConstructor, WebhookError> {
        self.deliverers
            .get(name)
            .cloned()
            .ok_or_else(|| WebhookError::InvalidDeliverer(name.to_string()))
    }

    /// Looks up a serializer constructor.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidSerializer`] if `name` is not registered.
    pub fn get_serializer(&self, name: &str) -> Result<SerializerConstructor, WebhookError> {
        self.serializers
            .get(name)
            .cloned()
            .ok_or_else(|| WebhookError::InvalidSerializer(name.to_string()))
    }

    /// Resolves the configured names and builds a fresh producer.
    ///
    /// Builds the serializer, then the deliverer bound to it, then the
    /// producer bound to the deliverer. Nothing is cached between calls.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidSerializer`],
    /// [`WebhookError::InvalidDeliverer`], [`WebhookError::InvalidProducer`]
    /// for unknown names, or [`WebhookError::InvalidFormat`] when the
    /// deliverer does not accept the serializer's format.
    pub fn resolve_producer(&self, settings: &Settings) -> Result<Box<dyn Producer>, WebhookError> {
        Lookups::from_registry(self, settings).build(settings)
    }

    fn names<V>(table: &HashMap<String, V>) -> Vec<&str> {
        let mut names: Vec<&str> = table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for WebhookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookRegistry")
            .field("producers", &Self::names(&self.producers))
            .field("deliverers", &Self::names(&self.deliverers))
            .field("serializers", &Self::names(&self.serializers))
            .finish()
    }
}

fn default_producer(deliverer: Box<dyn Deliverer>) -> Box<dyn Producer> {
    Box::new(DefaultProducer::new(deliverer))
}

fn http_deliverer(
    serializer: Box<dyn Serializer>,
    settings: &Settings,
) -> Result<Box<dyn Deliverer>, WebhookError> {
    Ok(Box::new(HttpDeliverer::new(serializer, settings)?))
}

fn json_serializer() -> Box<dyn Serializer> {
    Box::new(JsonSerializer::new())
}

/// Constructor lookups captured so building can run without holding the
/// global lock.
struct Lookups {
    serializer: Result<SerializerConstructor, WebhookError>,
    deliverer: Result<DelivererConstructor, WebhookError>,
    producer: Result<ProducerConstructor, WebhookError>,
}

impl Lookups {
    fn from_registry(registry: &WebhookRegistry, settings: &Settings) -> Self {
        tracing::debug!(
            producer = %settings.producer,
            deliverer = %settings.deliverer,
            serializer = %settings.serializer,
            "Resolving webhook producer"
        );
        Self {
            serializer: registry.get_serializer(&settings.serializer),
            deliverer: registry.get_deliverer(&settings.deliverer),
            producer: registry.get_producer(&settings.producer),
        }
    }

    fn build(self, settings: &Settings) -> Result<Box<dyn Producer>, WebhookError> {
        let serializer = (self.serializer?)();

        let deliverer = (self.deliverer?)(serializer, settings)?;
        // Constructors registered by callers may skip the check.
        check_format(deliverer.config(), deliverer.serializer())?;

        Ok((self.producer?)(deliverer))
    }
}

static GLOBAL: LazyLock<RwLock<WebhookRegistry>> =
    LazyLock::new(|| RwLock::new(WebhookRegistry::with_builtins()));

fn with_global<T>(f: impl FnOnce(&WebhookRegistry) -> T) -> T {
    f(&GLOBAL.read().unwrap_or_else(PoisonError::into_inner))
}

fn with_global_mut<T>(f: impl FnOnce(&mut WebhookRegistry) -> T) -> T {
    f(&mut GLOBAL.write().unwrap_or_else(PoisonError::into_inner))
}

/// Registers a producer in the process-wide registry.
pub fn register_producer<F>(name: impl Into<String>, constructor: F)
where
    F: Fn(Box<dyn Deliverer>) -> Box<dyn Producer> + Send + Sync + 'static,
{
    with_global_mut(|registry| registry.register_producer(name, constructor));
}

/// Registers a deliverer in the process-wide registry.
pub fn register_deliverer<F>(name: impl Into<String>, constructor: F)
where
    F: Fn(Box<dyn Serializer>, &Settings) -> Result<Box<dyn Deliverer>, WebhookError>
        + Send
        + Sync
        + 'static,
{
    with_global_mut(|registry| registry.register_deliverer(name, constructor));
}

/// Registers a serializer in the process-wide registry.
pub fn register_serializer<F>(name: impl Into<String>, constructor: F)
where
    F: Fn() -> Box<dyn Serializer> + Send + Sync + 'static,
{
    with_global_mut(|registry| registry.register_serializer(name, constructor));
}

/// Resolves a producer from the process-wide registry.
///
/// The lock is released before any constructor runs, so constructors may
/// themselves register components.
///
/// # Errors
///
/// See [`WebhookRegistry::resolve_producer`].
pub fn resolve_producer(settings: &Settings) -> Result<Box<dyn Producer>, WebhookError> {
    with_global(|registry| Lookups::from_registry(registry, settings)).build(settings)
}

/// Returns a copy of the process-wide registry.
#[must_use]
pub fn snapshot() -> WebhookRegistry {
    with_global(WebhookRegistry::clone)
}

/// Replaces the process-wide registry, e.g. with an earlier [`snapshot`].
pub fn restore(registry: WebhookRegistry) {
    with_global_mut(|global| *global = registry);
}
