//! Specialized collection types

pub use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    /// Stable handle to an actor stored in an [`ActorRegistry`](crate::scene::ActorRegistry).
    ///
    /// Handles stay valid while the actor is alive and never alias a later
    /// actor after removal, so scenes can share them freely.
    pub struct ActorId;
}

/// Handle-based map keyed by actor handles
pub type ActorMap<T> = SlotMap<ActorId, T>;
