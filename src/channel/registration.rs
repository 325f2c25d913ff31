//! A single listener registration: weak owner identity plus strong handler.

use std::any::Any;
use std::sync::{Arc, Weak};

/// Shared handler callback for payloads of type `E`.
pub(crate) type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Identity token for an owner: the address of its `Arc` allocation.
///
/// Stored as `usize` so registrations stay `Send`; it is only ever compared,
/// never dereferenced.
pub(crate) fn owner_addr<O>(owner: &Arc<O>) -> usize {
    Arc::as_ptr(owner) as usize
}

/// One listener entry inside a [`TypedChannel`](super::TypedChannel).
///
/// The owner handle is weak and exists purely for identity comparison and
/// liveness checks — it is never upgraded to read application data. The
/// handler, by contrast, is held strongly; if a handler closure captures its
/// own owner's `Arc`, the owner can never expire (see the capture note on
/// [`EventRegistry::add_listener`](crate::EventRegistry::add_listener)).
pub(crate) struct Registration<E> {
    owner: Weak<dyn Any + Send + Sync>,
    owner_addr: usize,
    owner_label: &'static str,
    handler: Handler<E>,
}

impl<E> Registration<E> {
    pub(crate) fn new<O>(owner: &Arc<O>, handler: Handler<E>) -> Self
    where
        O: Send + Sync + 'static,
    {
        let erased: Arc<dyn Any + Send + Sync> = owner.clone();
        Self {
            owner_addr: owner_addr(owner),
            owner_label: std::any::type_name::<O>(),
            owner: Arc::downgrade(&erased),
            handler,
        }
    }

    /// True while the owning object is still reachable through some other
    /// strong reference.
    pub(crate) fn is_live(&self) -> bool {
        self.owner.strong_count() > 0
    }

    /// Identity match against a live owner. Liveness is checked first, so an
    /// expired entry never matches even if its old allocation was reused.
    pub(crate) fn is_owned_by(&self, addr: usize) -> bool {
        self.is_live() && self.owner_addr == addr
    }

    pub(crate) fn handler(&self) -> Handler<E> {
        Arc::clone(&self.handler)
    }

    pub(crate) fn owner_label(&self) -> &'static str {
        self.owner_label
    }

    pub(crate) fn addr(&self) -> usize {
        self.owner_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    #[test]
    fn test_registration_tracks_owner_liveness() {
        let owner = Arc::new(Probe);
        let reg: Registration<u32> = Registration::new(&owner, Arc::new(|_| {}));

        assert!(reg.is_live());
        assert!(reg.is_owned_by(owner_addr(&owner)));

        drop(owner);
        assert!(!reg.is_live());
    }

    #[test]
    fn test_expired_registration_never_matches() {
        let owner = Arc::new(Probe);
        let addr = owner_addr(&owner);
        let reg: Registration<u32> = Registration::new(&owner, Arc::new(|_| {}));

        drop(owner);
        assert!(!reg.is_owned_by(addr));
    }

    #[test]
    fn test_distinct_owners_have_distinct_identity() {
        let a = Arc::new(Probe);
        let b = Arc::new(Probe);
        let reg: Registration<u32> = Registration::new(&a, Arc::new(|_| {}));

        assert!(reg.is_owned_by(owner_addr(&a)));
        assert!(!reg.is_owned_by(owner_addr(&b)));
    }
}
