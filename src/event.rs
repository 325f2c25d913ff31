//! # Event payload marker.
//!
//! Any owned type can be published through the registry: listeners only ever
//! borrow the payload, so there is no `Clone` or serialization requirement.
//! The bounds exist so channels can be shared across threads.

/// Marker trait for event payload types.
///
/// Blanket-implemented for every `Send + Sync + 'static` type; there is
/// nothing to opt into.
///
/// # Example
/// ```
/// struct PlayerDied {
///     score: u64,
/// }
///
/// fn assert_event<E: eventvisor::Event>() {}
/// assert_event::<PlayerDied>();
/// ```
pub trait Event: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Event for T {}
