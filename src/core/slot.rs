//! Slot dengan state machine per-slot.
//!
//! Siklus: `Writable -> Writing -> Readable -> Reading -> Writable`.
//! `Writing` dan `Reading` adalah klaim eksklusif; hanya thread pemegang
//! klaim yang boleh menyentuh `value`.

use std::cell::UnsafeCell;
use std::hint;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU8, Ordering};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotState {
    Writable = 0,
    Readable = 1,
    Writing = 2,
    Reading = 3,
}

impl SlotState {
    #[inline(always)]
    const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Writable,
            1 => Self::Readable,
            2 => Self::Writing,
            _ => Self::Reading,
        }
    }
}

/// Satu slot ring. Dibungkus `CachePadded` oleh `Ring` sehingga satu slot
/// menempati tepat satu cache line.
pub(crate) struct Slot<'a, T: ?Sized> {
    state: AtomicU8,
    // Hanya valid saat state Readable atau Reading
    value: UnsafeCell<MaybeUninit<&'a T>>,
}

impl<'a, T: ?Sized> Slot<'a, T> {
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicU8::new(SlotState::Writable as u8),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    #[inline(always)]
    pub(crate) fn state(&self) -> SlotState {
        SlotState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Mencoba transisi `from -> to`.
    ///
    /// Kegagalan karena state masih `from` (spurious failure dari
    /// `compare_exchange_weak`, atau writer/reader lain yang sedang balapan di
    /// transisi yang sama) langsung di-spin ulang. Kalau state sudah lain,
    /// state itu dikembalikan sebagai `Err` dan caller yang memutuskan
    /// yield atau restart.
    #[inline(always)]
    pub(crate) fn claim(&self, from: SlotState, to: SlotState) -> Result<(), SlotState> {
        loop {
            match self.state.compare_exchange_weak(
                from as u8,
                to as u8,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) if actual == from as u8 => hint::spin_loop(),
                Err(actual) => return Err(SlotState::from_raw(actual)),
            }
        }
    }

    /// Melepas klaim. Tidak bisa gagal karena pemegang klaim adalah
    /// satu-satunya yang boleh mengubah state transient.
    #[inline(always)]
    pub(crate) fn release(&self, to: SlotState) {
        debug_assert!(matches!(
            self.state(),
            SlotState::Writing | SlotState::Reading
        ));
        self.state.store(to as u8, Ordering::Release);
    }

    /// # Safety
    /// Caller harus memegang klaim `Writing` atas slot ini.
    #[inline(always)]
    pub(crate) unsafe fn write(&self, value: &'a T) {
        (*self.value.get()).write(value);
    }

    /// # Safety
    /// Caller harus memegang klaim `Reading`, dan slot ini sebelumnya sudah
    /// di-publish sebagai `Readable` oleh writer.
    #[inline(always)]
    pub(crate) unsafe fn read(&self) -> &'a T {
        (*self.value.get()).assume_init_read()
    }
}

// SAFETY: akses ke `value` dijaga oleh klaim Writing/Reading pada `state`.
// Yang berpindah antar thread hanya `&T`, jadi cukup `T: Sync`.
unsafe impl<T: ?Sized + Sync> Sync for Slot<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let item = 42u64;
        let slot: Slot<'_, u64> = Slot::new();
        assert_eq!(slot.state(), SlotState::Writable);

        slot.claim(SlotState::Writable, SlotState::Writing).unwrap();
        unsafe { slot.write(&item) };
        slot.release(SlotState::Readable);
        assert_eq!(slot.state(), SlotState::Readable);

        slot.claim(SlotState::Readable, SlotState::Reading).unwrap();
        let out = unsafe { slot.read() };
        slot.release(SlotState::Writable);

        assert!(std::ptr::eq(out, &item));
        assert_eq!(slot.state(), SlotState::Writable);
    }

    #[test]
    fn test_claim_reports_busy_state() {
        let slot: Slot<'_, str> = Slot::new();

        slot.claim(SlotState::Writable, SlotState::Writing).unwrap();
        // Writer kedua melihat Writing, reader melihat Writing juga
        assert_eq!(
            slot.claim(SlotState::Writable, SlotState::Writing),
            Err(SlotState::Writing)
        );
        assert_eq!(
            slot.claim(SlotState::Readable, SlotState::Reading),
            Err(SlotState::Writing)
        );

        unsafe { slot.write("hermes") };
        slot.release(SlotState::Readable);
        assert_eq!(
            slot.claim(SlotState::Writable, SlotState::Writing),
            Err(SlotState::Readable)
        );
    }

    #[test]
    fn test_raw_encoding() {
        for state in [
            SlotState::Writable,
            SlotState::Readable,
            SlotState::Writing,
            SlotState::Reading,
        ] {
            assert_eq!(SlotState::from_raw(state as u8), state);
        }
    }
}
