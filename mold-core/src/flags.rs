use bitflags::bitflags;

bitflags! {
    /// Flags for a registered field accessor
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u8 {
        /// The field can be read back but refuses direct mutation: the
        /// `set` fallback path reports it as not writable instead of
        /// assigning through the accessor.
        const NO_FALLBACK = 1 << 0;
    }
}

impl Default for FieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}
