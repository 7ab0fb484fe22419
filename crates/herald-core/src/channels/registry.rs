//! Name-based directory of delivery channels.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::backends::{BroadcastChannel, DatabaseChannel, MailChannel};
use super::traits::{Channel, ChannelFactory};

/// Constructor for a deferred channel binding.
pub type ChannelCtor = Arc<dyn Fn() -> Arc<dyn Channel> + Send + Sync>;

#[derive(Clone)]
enum Binding {
    /// A live channel shared by every dispatch.
    Instance(Arc<dyn Channel>),
    /// A constructor invoked lazily on first lookup.
    Deferred(ChannelCtor),
}

/// Registry mapping channel names to channel instances or constructors.
///
/// Built-in bindings (mail, database, broadcast) are registered on
/// construction. Re-registering a name replaces the prior binding;
/// removing a built-in does not auto-restore it except through
/// [`ChannelRegistry::reset_to_defaults`].
///
/// Interior locking makes a shared registry safe for the read-mostly
/// access pattern of concurrent dispatch.
pub struct ChannelRegistry {
    bindings: RwLock<HashMap<String, Binding>>,
    factory: Option<Arc<dyn ChannelFactory>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(Self::default_bindings()),
            factory: None,
        }
    }

    /// Attach a container hook consulted when instantiating deferred
    /// bindings.
    pub fn with_factory(mut self, factory: Arc<dyn ChannelFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    fn default_bindings() -> HashMap<String, Binding> {
        let mut bindings: HashMap<String, Binding> = HashMap::new();
        bindings.insert(
            "mail".to_string(),
            Binding::Deferred(Arc::new(|| Arc::new(MailChannel::new()) as Arc<dyn Channel>)),
        );
        bindings.insert(
            "database".to_string(),
            Binding::Deferred(Arc::new(|| Arc::new(DatabaseChannel::new()) as Arc<dyn Channel>)),
        );
        bindings.insert(
            "broadcast".to_string(),
            Binding::Deferred(Arc::new(|| Arc::new(BroadcastChannel::new()) as Arc<dyn Channel>)),
        );
        bindings
    }

    /// Bind a name to a lazily-instantiated channel constructor.
    pub fn register(&self, name: impl Into<String>, ctor: ChannelCtor) {
        let name = name.into();
        debug!(event = "core.channels.registered", channel = %name, deferred = true);
        self.bindings
            .write()
            .expect("channel registry lock poisoned")
            .insert(name, Binding::Deferred(ctor));
    }

    /// Bind a name directly to a live channel instance.
    pub fn register_instance(&self, name: impl Into<String>, channel: Arc<dyn Channel>) {
        let name = name.into();
        debug!(event = "core.channels.registered", channel = %name, deferred = false);
        self.bindings
            .write()
            .expect("channel registry lock poisoned")
            .insert(name, Binding::Instance(channel));
    }

    /// Look up a channel by name, instantiating a deferred binding on
    /// first access.
    ///
    /// The instantiated channel is cached back into the registry so
    /// repeated lookups share one instance. Returns `None` for unknown
    /// names; the caller decides whether that is fatal.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Channel>> {
        let binding = {
            let bindings = self.bindings.read().expect("channel registry lock poisoned");
            bindings.get(name).cloned()
        }?;

        match binding {
            Binding::Instance(channel) => Some(channel),
            Binding::Deferred(ctor) => {
                let channel = self
                    .factory
                    .as_ref()
                    .and_then(|f| f.make(name))
                    .unwrap_or_else(|| ctor());
                debug!(event = "core.channels.instantiated", channel = %name);
                self.bindings
                    .write()
                    .expect("channel registry lock poisoned")
                    .insert(name.to_string(), Binding::Instance(channel.clone()));
                Some(channel)
            }
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.bindings
            .read()
            .expect("channel registry lock poisoned")
            .contains_key(name)
    }

    pub fn remove(&self, name: &str) {
        debug!(event = "core.channels.removed", channel = %name);
        self.bindings
            .write()
            .expect("channel registry lock poisoned")
            .remove(name);
    }

    /// Names of all registered channels, in no particular order.
    pub fn registered_names(&self) -> Vec<String> {
        self.bindings
            .read()
            .expect("channel registry lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Restore exactly the built-in bindings, discarding all custom
    /// registrations.
    pub fn reset_to_defaults(&self) {
        debug!(event = "core.channels.reset_to_defaults");
        *self
            .bindings
            .write()
            .expect("channel registry lock poisoned") = Self::default_bindings();
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
