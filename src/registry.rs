//! # Type-keyed listener registry.
//!
//! [`EventRegistry`] is the dispatch table: one map from payload type to the
//! [`TypedChannel`] carrying that type's listeners. Channels are created
//! lazily on first registration and persist, possibly empty, until a full
//! [`reset`](EventRegistry::reset) — repeated add/remove cycles for the same
//! type never churn the map.
//!
//! ## Architecture
//! ```text
//!  add_listener::<E>(owner, f)        invoke::<E>(&e)
//!        │                                  │
//!        ▼                                  ▼
//!  ┌────────────────────────────────────────────────────┐
//!  │ EventRegistry                                      │
//!  │   RwLock<HashMap<TypeId, Arc<dyn ChannelProxy>>>   │
//!  └──────┬─────────────────┬─────────────────┬─────────┘
//!         ▼                 ▼                 ▼
//!   TypedChannel<A>   TypedChannel<B>   TypedChannel<C>
//!   [(weak o1, f1),   [(weak o3, f3)]   []
//!    (weak o2, f2)]
//! ```
//!
//! ## Rules
//! - One live registration per owner per payload type (first handler wins).
//! - `invoke` delivers synchronously, in registration order, on the calling
//!   thread; listeners whose owner has been dropped are pruned first.
//! - No lock is held while listener code runs, so listeners may add, remove,
//!   or invoke for the same type they are currently handling; such changes
//!   take effect on the next `invoke`.
//! - Only [`reset`](EventRegistry::reset) (usually via
//!   [`ScopeSignal::fire`](crate::ScopeSignal::fire)) shrinks the type map.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::channel::{owner_addr, ChannelProxy, Registration, TypedChannel};
use crate::config::RegistryConfig;
use crate::error::InvokeError;
use crate::event::Event;

/// Process-wide, type-keyed publish/subscribe registry.
///
/// Construct one at process start, share it as `Arc<EventRegistry>`, and pass
/// the handle to anything that publishes or subscribes — there is no hidden
/// global instance.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use eventvisor::EventRegistry;
///
/// struct Hud;
/// struct Damage {
///     amount: u32,
/// }
///
/// let registry = EventRegistry::new();
/// let hud = Arc::new(Hud);
///
/// registry.add_listener(&hud, |e: &Damage| {
///     assert_eq!(e.amount, 12);
/// });
/// registry.invoke(&Damage { amount: 12 }).unwrap();
/// ```
pub struct EventRegistry {
    channels: RwLock<HashMap<TypeId, Arc<dyn ChannelProxy>>>,
    config: RegistryConfig,
}

impl EventRegistry {
    /// Creates a registry with [`RegistryConfig::default`].
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates a registry with custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Registers `handler` for payload type `E`, bound to `owner`.
    ///
    /// The registry keeps only a weak handle to `owner`: subscribing never
    /// extends the owner's lifetime, and once the last outside `Arc` is
    /// dropped the registration is pruned on the next [`invoke`] for `E`.
    /// If `owner` already has a live registration for `E` this is a no-op
    /// and the earlier handler stays.
    ///
    /// The handler itself is held strongly. A handler that captures a clone
    /// of its own owner's `Arc` keeps that owner alive forever and defeats
    /// the weak tracking — capture a `Weak` and upgrade inside instead:
    ///
    /// ```
    /// use std::sync::Arc;
    /// use eventvisor::EventRegistry;
    ///
    /// struct Hud;
    /// struct Damage(u32);
    ///
    /// let registry = EventRegistry::new();
    /// let hud = Arc::new(Hud);
    ///
    /// let weak = Arc::downgrade(&hud);
    /// registry.add_listener(&hud, move |_: &Damage| {
    ///     if let Some(_hud) = weak.upgrade() {
    ///         // use the owner here
    ///     }
    /// });
    /// ```
    ///
    /// [`invoke`]: EventRegistry::invoke
    pub fn add_listener<E, O>(&self, owner: &Arc<O>, handler: impl Fn(&E) + Send + Sync + 'static)
    where
        E: Event,
        O: Send + Sync + 'static,
    {
        let proxy = self.channel_or_insert::<E>();
        let registration = Registration::new(owner, Arc::new(handler));
        if concrete::<E>(&proxy).add(registration) {
            tracing::debug!(
                event = std::any::type_name::<E>(),
                owner = std::any::type_name::<O>(),
                "listener added"
            );
        } else {
            tracing::debug!(
                event = std::any::type_name::<E>(),
                owner = std::any::type_name::<O>(),
                "duplicate listener ignored"
            );
        }
    }

    /// Removes `owner`'s registration for payload type `E`.
    ///
    /// No-op if the channel or the registration does not exist. The channel
    /// itself persists even when emptied.
    pub fn remove_listener<E, O>(&self, owner: &Arc<O>)
    where
        E: Event,
        O: Send + Sync + 'static,
    {
        if let Some(proxy) = self.channel::<E>() {
            if concrete::<E>(&proxy).remove(owner_addr(owner)) {
                tracing::debug!(
                    event = std::any::type_name::<E>(),
                    owner = std::any::type_name::<O>(),
                    "listener removed"
                );
            }
        }
    }

    /// Delivers `event` to every live listener registered for `E`, in
    /// registration order, on the calling thread.
    ///
    /// Expired registrations are pruned first. A listener that panics does
    /// not stop the ones after it; the panics are caught, logged, and
    /// aggregated into the returned [`InvokeError`]. No channel for `E`, or
    /// a channel with no live listeners, is a successful no-op.
    pub fn invoke<E: Event>(&self, event: &E) -> Result<(), InvokeError> {
        match self.channel::<E>() {
            Some(proxy) => concrete::<E>(&proxy).invoke(event),
            None => Ok(()),
        }
    }

    /// True iff `owner` currently has a live registration for `E`.
    pub fn has_listener<E, O>(&self, owner: &Arc<O>) -> bool
    where
        E: Event,
        O: Send + Sync + 'static,
    {
        match self.channel::<E>() {
            Some(proxy) => concrete::<E>(&proxy).has_registration(owner_addr(owner)),
            None => false,
        }
    }

    /// Number of live listeners registered for `E`.
    #[must_use]
    pub fn listener_count<E: Event>(&self) -> usize {
        match self.channel::<E>() {
            Some(proxy) => proxy.len(),
            None => 0,
        }
    }

    /// Number of payload types that currently have a channel, empty or not.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.channels.read().len()
    }

    /// Renders every channel for diagnostics: one block per registered type
    /// (label and live listener count, then one line per live listener).
    ///
    /// Block order follows the map's iteration order and is not stable
    /// across calls or processes.
    #[must_use]
    pub fn debug_info(&self) -> String {
        let map = self.channels.read();
        let mut out = String::new();
        for proxy in map.values() {
            out.push_str(&format!(
                "[{}] {} listener(s)\n",
                proxy.type_label(),
                proxy.len()
            ));
            out.push_str(&proxy.debug_dump());
        }
        out
    }

    /// Hard reset: unconditionally drops every channel and with them every
    /// registration, for all payload types at once.
    ///
    /// This is the only operation that shrinks the type map. It is normally
    /// driven by a [`ScopeSignal`](crate::ScopeSignal) at a host lifecycle
    /// boundary, but can be called directly.
    pub fn reset(&self) {
        let mut map = self.channels.write();
        let types = map.len();
        map.clear();
        tracing::info!(types, "registry reset, all listeners dropped");
    }

    fn channel<E: Event>(&self) -> Option<Arc<dyn ChannelProxy>> {
        self.channels.read().get(&TypeId::of::<E>()).cloned()
    }

    fn channel_or_insert<E: Event>(&self) -> Arc<dyn ChannelProxy> {
        let mut map = self.channels.write();
        Arc::clone(map.entry(TypeId::of::<E>()).or_insert_with(|| {
            Arc::new(TypedChannel::<E>::new(self.config.channel_capacity))
        }))
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Recovers the concrete channel behind a proxy.
///
/// The map is keyed by `TypeId::of::<E>()` and only ever stores a
/// `TypedChannel<E>` under that key, so the downcast cannot fail.
fn concrete<E: Event>(proxy: &Arc<dyn ChannelProxy>) -> &TypedChannel<E> {
    proxy
        .as_any()
        .downcast_ref::<TypedChannel<E>>()
        .expect("channel type mismatch")
}
