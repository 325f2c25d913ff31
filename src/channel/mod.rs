//! # Per-type listener channels.
//!
//! A [`TypedChannel<E>`] holds every registration for one payload type `E`
//! and knows nothing about other types. The registry stores channels behind
//! the non-generic [`ChannelProxy`] seam so that channels of many different
//! payload types can live in one map; the concrete type is recovered at each
//! call site from the caller's type parameter, never by guessing.
//!
//! ## Rules
//! - One live registration per owner per channel (first handler wins).
//! - Invocation order is registration order, preserved across removals.
//! - Expired owners are pruned lazily, on the next `invoke`.
//! - No channel lock is held while listener code runs.

mod registration;
mod typed;

pub(crate) use registration::{owner_addr, Handler, Registration};
pub(crate) use typed::TypedChannel;

use std::any::Any;

/// Type-erased face of a [`TypedChannel<E>`].
///
/// Only what the registry needs without knowing `E`: diagnostics and the
/// `Any` hook used to get the concrete channel back.
pub(crate) trait ChannelProxy: Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// Human-readable label of the payload type this channel carries.
    fn type_label(&self) -> &'static str;

    /// One line per live registration, in registration order.
    fn debug_dump(&self) -> String;

    /// Number of live registrations.
    fn len(&self) -> usize;
}
