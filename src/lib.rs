//! # eventvisor
//!
//! **Eventvisor** is a type-keyed, synchronous publish/subscribe registry for
//! Rust.
//!
//! Callers register handlers keyed by a payload type; publishing a value of
//! that type invokes every registered handler for it, in registration order,
//! on the publishing thread. Registrations are bound to an *owner* object
//! that the registry tracks weakly: subscribing never keeps the owner alive,
//! and listeners whose owner has been dropped are pruned automatically. A
//! host lifecycle boundary (scene unload, module teardown) clears everything
//! at once through a [`ScopeSignal`].
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  subscribers                              publishers
//!  ───────────                              ──────────
//!  add_listener::<Damage>(owner, f)         invoke(&Damage { .. })
//!  remove_listener::<Damage>(owner)         invoke(&Tick)
//!        │                                        │
//!        ▼                                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │ EventRegistry                                               │
//! │   HashMap<TypeId, channel>   (one channel per payload type) │
//! └────────┬───────────────────┬───────────────────┬────────────┘
//!          ▼                   ▼                   ▼
//!   TypedChannel<Damage>  TypedChannel<Tick>  TypedChannel<...>
//!   (weak o1, f1)         (weak o3, f3)
//!   (weak o2, f2)
//!          ▲
//!          │ hard reset (all channels at once)
//! ┌────────┴──────────┐
//! │ ScopeSignal::fire │  ← host lifecycle boundary
//! └───────────────────┘
//! ```
//!
//! ### Rules
//! - **One registration per owner per type**: a second `add_listener` for the
//!   same owner and payload type is a silent no-op; the first handler stays.
//! - **Synchronous fan-out**: `invoke` calls every live handler before it
//!   returns, in registration order. Nothing is queued.
//! - **Weak owners, strong handlers**: the registry never extends an owner's
//!   lifetime, but it does own the handler closure — a handler that captures
//!   its owner's `Arc` keeps that owner alive (see
//!   [`EventRegistry::add_listener`] for the `Weak`-capture pattern).
//! - **Lazy pruning**: expired registrations are removed on the next `invoke`
//!   for their type, not by timers.
//! - **Isolation**: a panicking listener never stops the listeners after it;
//!   panics are caught, logged, and aggregated into an [`InvokeError`].
//! - **Reentrancy**: no lock is held while listeners run, so a listener may
//!   add, remove, or invoke for the very type it is handling; such changes
//!   apply from the next `invoke`.
//!
//! ## Features
//! | Area           | Description                                                   | Key types            |
//! |----------------|---------------------------------------------------------------|----------------------|
//! | **Registry**   | Type-keyed dispatch table, dedup, weak owner tracking.        | [`EventRegistry`]    |
//! | **Payloads**   | Any `Send + Sync + 'static` type, no opt-in required.         | [`Event`]            |
//! | **Lifecycle**  | Host boundary that hard-resets bound registries.              | [`ScopeSignal`]      |
//! | **Errors**     | Aggregated listener panics surfaced to the publisher.         | [`InvokeError`]      |
//! | **Config**     | Per-channel pre-allocation.                                   | [`RegistryConfig`]   |
//!
//! ## Optional features
//! - `signals`: exports `reset_on_shutdown`, which resets a registry when
//!   the process receives a termination signal (pulls in `tokio`).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use eventvisor::{EventRegistry, ScopeSignal};
//!
//! struct Hud;
//! struct ScoreChanged {
//!     total: u64,
//! }
//!
//! fn main() -> Result<(), eventvisor::InvokeError> {
//!     let registry = Arc::new(EventRegistry::new());
//!
//!     // The host fires this at its lifecycle boundary (e.g. scene unload).
//!     let scope = ScopeSignal::new();
//!     scope.bind(&registry);
//!
//!     let hud = Arc::new(Hud);
//!     registry.add_listener(&hud, |e: &ScoreChanged| {
//!         println!("score is now {}", e.total);
//!     });
//!
//!     registry.invoke(&ScoreChanged { total: 1200 })?;
//!
//!     scope.fire(); // boundary: every listener for every type is gone
//!     registry.invoke(&ScoreChanged { total: 0 })?; // no-op
//!     Ok(())
//! }
//! ```

mod channel;
mod config;
mod error;
mod event;
mod registry;
mod scope;

// ---- Public re-exports ----

pub use config::RegistryConfig;
pub use error::InvokeError;
pub use event::Event;
pub use registry::EventRegistry;
pub use scope::ScopeSignal;

// Optional: reset a registry on process termination signals.
// Enable with: `--features signals`
#[cfg(feature = "signals")]
pub use scope::reset_on_shutdown;
