//! Generation-checked handles.
//!
//! A [`Handle`] names one occupancy of one slot. The slot index is fixed for
//! the lifetime of the pool; the generation changes every time the slot is
//! reused, so a handle to a removed value never matches the slot's new
//! occupant.

use std::fmt;

/// Opaque reference to a value stored in a [`DensePool`](crate::DensePool).
///
/// Handles are process-local and only meaningful to the pool that issued
/// them. They pack into 32 bits (see [`Handle::to_bits`]): the low 16 bits
/// are the slot index and the high 16 bits are the generation.
///
/// # Generation wraparound
///
/// The generation is 16 bits wide. After 65536 reuses of the same slot the
/// counter wraps and a handle issued 65536 occupancies ago compares equal to
/// the current one again. This is accepted behaviour; the pool logs a
/// warning when a slot wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle {
    pub(crate) generation: u16,
    pub(crate) slot: u16,
}

impl Handle {
    /// Packed-id increment for one generation step.
    pub const GENERATION_STEP: u32 = 0x1_0000;

    pub(crate) fn new(slot: u16, generation: u16) -> Self {
        Self { generation, slot }
    }

    /// Index of the slot this handle refers to.
    pub fn slot(&self) -> u16 {
        self.slot
    }

    /// Generation of the slot at the time this handle was issued.
    pub fn generation(&self) -> u16 {
        self.generation
    }

    /// Pack into the 32-bit form: `generation << 16 | slot`.
    pub fn to_bits(self) -> u32 {
        (u32::from(self.generation) << 16) | u32::from(self.slot)
    }

    /// Unpack a value produced by [`Handle::to_bits`].
    ///
    /// Any `u32` decodes to some handle; whether it is valid is decided by
    /// [`DensePool::contains`](crate::DensePool::contains).
    pub fn from_bits(bits: u32) -> Self {
        Self {
            generation: (bits >> 16) as u16,
            slot: (bits & 0xFFFF) as u16,
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.slot, self.generation)
    }
}

impl From<Handle> for u32 {
    fn from(h: Handle) -> Self {
        h.to_bits()
    }
}

impl From<u32> for Handle {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}
