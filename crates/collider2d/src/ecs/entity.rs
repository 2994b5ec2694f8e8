//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// A generational key: a despawned entity's key never aliases a later
    /// entity that reuses the same slot.
    pub struct Entity;
}
