//! All listener registrations for one payload type.

use std::panic::{catch_unwind, AssertUnwindSafe};

use parking_lot::Mutex;

use crate::error::{panic_message, InvokeError};
use crate::event::Event;

use super::{ChannelProxy, Handler, Registration};

/// Registration set for exactly one payload type `E`.
///
/// Vector order is registration order and is what `invoke` replays. All
/// mutation happens under one mutex; `invoke` snapshots the handler list and
/// releases the lock before calling any listener, so listeners may re-enter
/// the registry for the same type without corrupting iteration.
pub(crate) struct TypedChannel<E> {
    registrations: Mutex<Vec<Registration<E>>>,
}

impl<E: Event> TypedChannel<E> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            registrations: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// True iff `addr` identifies a live registered owner.
    pub(crate) fn has_registration(&self, addr: usize) -> bool {
        self.registrations
            .lock()
            .iter()
            .any(|r| r.is_owned_by(addr))
    }

    /// Appends `reg` unless its owner already has a live registration.
    ///
    /// Check and append happen under one lock acquisition, so two racing
    /// adds for the same owner cannot both land. Returns `false` on the
    /// duplicate (the earlier handler stays).
    pub(crate) fn add(&self, reg: Registration<E>) -> bool {
        let mut regs = self.registrations.lock();
        if regs.iter().any(|r| r.is_owned_by(reg.addr())) {
            return false;
        }
        regs.push(reg);
        true
    }

    /// Removes the live registration owned by `addr`, if any.
    ///
    /// Returns `true` if something was removed. Absent registrations are a
    /// state, not an error.
    pub(crate) fn remove(&self, addr: usize) -> bool {
        let mut regs = self.registrations.lock();
        match regs.iter().position(|r| r.is_owned_by(addr)) {
            Some(idx) => {
                regs.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Prunes expired registrations, then calls every surviving handler in
    /// registration order with `event`.
    ///
    /// The channel lock is released before the first handler runs: additions
    /// and removals made by a handler affect the next `invoke`, never the one
    /// in progress. Each handler runs under `catch_unwind`, so a panicking
    /// listener cannot block the ones after it; panics are aggregated into
    /// the returned [`InvokeError`].
    pub(crate) fn invoke(&self, event: &E) -> Result<(), InvokeError> {
        let snapshot: Vec<Handler<E>> = {
            let mut regs = self.registrations.lock();
            regs.retain(|r| {
                let live = r.is_live();
                if !live {
                    tracing::trace!(owner = r.owner_label(), "pruned expired listener");
                }
                live
            });
            regs.iter().map(Registration::handler).collect()
        };

        if snapshot.is_empty() {
            return Ok(());
        }

        let total = snapshot.len();
        let mut panics = Vec::new();
        for handler in snapshot {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| handler(event))) {
                let msg = panic_message(payload);
                tracing::error!(
                    event = std::any::type_name::<E>(),
                    panic = msg.as_str(),
                    "listener panicked during invoke"
                );
                panics.push(msg);
            }
        }

        if panics.is_empty() {
            Ok(())
        } else {
            Err(InvokeError::ListenerPanicked {
                event: std::any::type_name::<E>(),
                failed: panics.len(),
                total,
                panics,
            })
        }
    }
}

impl<E: Event> ChannelProxy for TypedChannel<E> {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn type_label(&self) -> &'static str {
        std::any::type_name::<E>()
    }

    fn debug_dump(&self) -> String {
        let regs = self.registrations.lock();
        let mut out = String::new();
        for reg in regs.iter().filter(|r| r.is_live()) {
            out.push_str(&format!("  {} @ {:#x}\n", reg.owner_label(), reg.addr()));
        }
        out
    }

    fn len(&self) -> usize {
        self.registrations.lock().iter().filter(|r| r.is_live()).count()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::channel::owner_addr;

    use super::*;

    struct Probe;

    fn counting_handler(counter: &Arc<AtomicUsize>) -> Handler<u32> {
        let counter = Arc::clone(counter);
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_add_rejects_live_duplicate() {
        let channel = TypedChannel::<u32>::new(4);
        let owner = Arc::new(Probe);

        assert!(channel.add(Registration::new(&owner, Arc::new(|_| {}))));
        assert!(!channel.add(Registration::new(&owner, Arc::new(|_| {}))));
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn test_expired_entry_is_not_a_duplicate() {
        let channel = TypedChannel::<u32>::new(4);
        let owner = Arc::new(Probe);
        channel.add(Registration::new(&owner, Arc::new(|_| {})));
        drop(owner);

        let other = Arc::new(Probe);
        assert!(channel.add(Registration::new(&other, Arc::new(|_| {}))));
    }

    #[test]
    fn test_invoke_prunes_expired_before_calling() {
        let channel = TypedChannel::<u32>::new(4);
        let counter = Arc::new(AtomicUsize::new(0));

        let dead = Arc::new(Probe);
        channel.add(Registration::new(&dead, counting_handler(&counter)));
        drop(dead);

        let live = Arc::new(Probe);
        channel.add(Registration::new(&live, counting_handler(&counter)));

        channel.invoke(&1).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let channel = TypedChannel::<u32>::new(4);
        let owner = Arc::new(Probe);

        assert!(!channel.remove(owner_addr(&owner)));

        channel.add(Registration::new(&owner, Arc::new(|_| {})));
        assert!(channel.remove(owner_addr(&owner)));
        assert!(!channel.remove(owner_addr(&owner)));
        assert_eq!(channel.len(), 0);
    }

    #[test]
    fn test_invoke_on_empty_channel_is_noop() {
        let channel = TypedChannel::<u32>::new(4);
        assert!(channel.invoke(&7).is_ok());
    }

    #[test]
    fn test_panicking_handler_does_not_block_later_handlers() {
        let channel = TypedChannel::<u32>::new(4);
        let counter = Arc::new(AtomicUsize::new(0));

        let first = Arc::new(Probe);
        channel.add(Registration::new(
            &first,
            Arc::new(|_| panic!("listener failure")),
        ));

        let second = Arc::new(Probe);
        channel.add(Registration::new(&second, counting_handler(&counter)));

        let err = channel.invoke(&3).unwrap_err();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        match err {
            InvokeError::ListenerPanicked {
                failed,
                total,
                panics,
                ..
            } => {
                assert_eq!(failed, 1);
                assert_eq!(total, 2);
                assert_eq!(panics, vec!["listener failure".to_string()]);
            }
        }
    }

    #[test]
    fn test_debug_dump_lists_live_registrations_in_order() {
        let channel = TypedChannel::<u32>::new(4);
        let dead = Arc::new(Probe);
        channel.add(Registration::new(&dead, Arc::new(|_| {})));

        let live = Arc::new(Probe);
        channel.add(Registration::new(&live, Arc::new(|_| {})));
        drop(dead);

        let dump = channel.debug_dump();
        assert_eq!(dump.lines().count(), 1);
        assert!(dump.contains("Probe"));
        assert!(dump.contains(&format!("{:#x}", owner_addr(&live))));
    }
}
