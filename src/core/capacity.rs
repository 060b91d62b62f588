//! Capacity manager: pembulatan ke power of two dan mask untuk wrap-around.
//!
//! Index selalu di-wrap dengan `index & mask`, bukan modulo. Itu hanya valid
//! kalau jumlah slot adalah power of two.

use crate::error::{Error, Result};

/// Jumlah slot efektif beserta mask-nya.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    slots: usize,
    mask: usize,
}

impl Capacity {
    /// Membulatkan `requested` ke power of two terdekat yang >= `requested`.
    ///
    /// `0` dan `1` sama-sama menjadi 1 slot (usable capacity 0).
    pub fn new(requested: usize) -> Result<Self> {
        let slots =
            round_up_to_power_of_two(requested).ok_or(Error::CapacityOverflow { requested })?;

        Ok(Self {
            slots,
            mask: slots - 1,
        })
    }

    /// Jumlah slot di array.
    #[inline(always)]
    pub const fn slots(&self) -> usize {
        self.slots
    }

    #[inline(always)]
    pub const fn mask(&self) -> usize {
        self.mask
    }

    /// Jumlah elemen yang bisa hidup bersamaan. Satu slot selalu dicadangkan
    /// untuk membedakan full dari empty.
    #[inline(always)]
    pub const fn usable(&self) -> usize {
        self.slots - 1
    }

    /// Index slot untuk posisi cursor `position`.
    #[inline(always)]
    pub const fn index(&self, position: usize) -> usize {
        position & self.mask
    }
}

/// Bit-doubling trick: decrement, OR dengan salinan yang di-shift
/// 1, 2, 4, ... bit, lalu increment.
///
/// Returns `None` kalau hasilnya tidak muat di `usize`.
pub const fn round_up_to_power_of_two(x: usize) -> Option<usize> {
    if x <= 1 {
        return Some(1);
    }

    let mut v = x - 1;
    let mut shift = 1;
    while shift < usize::BITS {
        v |= v >> shift;
        shift <<= 1;
    }

    v.checked_add(1)
}
