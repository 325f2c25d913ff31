//! # Lifecycle-boundary signal.
//!
//! Hosts embedding the registry usually have a moment where every current
//! subscription becomes meaningless at once — a scene unload, a module
//! teardown, the end of a session. [`ScopeSignal`] models that boundary: the
//! host owns the signal and [`fire`](ScopeSignal::fire)s it at the boundary;
//! each registry is [`bind`](ScopeSignal::bind)ed once at startup and is
//! hard-reset on every fire.
//!
//! ## Rules
//! - Binding is for the life of the signal: there is no unbind operation.
//! - A registry is held weakly; a bound registry that has been dropped is
//!   forgotten on the next `fire`.
//! - `fire` resets every bound registry unconditionally — all payload types,
//!   all listeners, in one pass.

#[cfg(feature = "signals")]
mod os_signals;

#[cfg(feature = "signals")]
pub use os_signals::reset_on_shutdown;

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::registry::EventRegistry;

/// Host-owned boundary signal that hard-resets bound registries.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use eventvisor::{EventRegistry, ScopeSignal};
///
/// struct Level;
/// struct Loaded;
///
/// let registry = Arc::new(EventRegistry::new());
/// let scene_unloaded = ScopeSignal::new();
/// scene_unloaded.bind(&registry);
///
/// let level = Arc::new(Level);
/// registry.add_listener(&level, |_: &Loaded| {});
/// assert_eq!(registry.listener_count::<Loaded>(), 1);
///
/// scene_unloaded.fire();
/// assert_eq!(registry.listener_count::<Loaded>(), 0);
/// ```
#[derive(Default)]
pub struct ScopeSignal {
    bound: Mutex<Vec<Weak<EventRegistry>>>,
}

impl ScopeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `registry` to this boundary for the life of the signal.
    ///
    /// Binding the same registry twice is a no-op, so a registry is reset at
    /// most once per fire. The signal holds the registry weakly and never
    /// extends its lifetime.
    pub fn bind(&self, registry: &Arc<EventRegistry>) {
        let mut bound = self.bound.lock();
        let already = bound
            .iter()
            .any(|w| Weak::as_ptr(w) == Arc::as_ptr(registry));
        if already {
            tracing::debug!("registry already bound to scope signal");
            return;
        }
        bound.push(Arc::downgrade(registry));
        tracing::debug!("registry bound to scope signal");
    }

    /// Fires the boundary: every bound registry still alive is hard-reset,
    /// and entries for dropped registries are discarded.
    pub fn fire(&self) {
        let mut bound = self.bound.lock();
        bound.retain(|weak| match weak.upgrade() {
            Some(registry) => {
                registry.reset();
                true
            }
            None => false,
        });
        tracing::debug!(bound = bound.len(), "scope signal fired");
    }

    /// Number of bound registries still alive at the last `fire`/`bind`.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.bound.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;
    struct Ping;

    #[test]
    fn test_fire_resets_every_bound_registry() {
        let a = Arc::new(EventRegistry::new());
        let b = Arc::new(EventRegistry::new());
        let signal = ScopeSignal::new();
        signal.bind(&a);
        signal.bind(&b);

        let owner = Arc::new(Probe);
        a.add_listener(&owner, |_: &Ping| {});
        b.add_listener(&owner, |_: &Ping| {});

        signal.fire();
        assert_eq!(a.type_count(), 0);
        assert_eq!(b.type_count(), 0);
    }

    #[test]
    fn test_bind_is_idempotent() {
        let registry = Arc::new(EventRegistry::new());
        let signal = ScopeSignal::new();
        signal.bind(&registry);
        signal.bind(&registry);

        assert_eq!(signal.bound_count(), 1);
    }

    #[test]
    fn test_dropped_registry_is_forgotten_on_fire() {
        let signal = ScopeSignal::new();
        let registry = Arc::new(EventRegistry::new());
        signal.bind(&registry);
        drop(registry);

        signal.fire();
        assert_eq!(signal.bound_count(), 0);
    }

    #[test]
    fn test_fire_with_nothing_bound_is_a_noop() {
        let signal = ScopeSignal::new();
        signal.fire();
        assert_eq!(signal.bound_count(), 0);
    }
}
