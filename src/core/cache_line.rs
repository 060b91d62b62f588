//! Ukuran cache line.
//!
//! Padding dihitung saat compile dari alignment `CachePadded` (per target
//! architecture). Ukuran yang dilaporkan host bisa di-query saat runtime
//! untuk memastikan padding tersebut cukup.

use crossbeam_utils::CachePadded;

/// Ukuran cache line yang dipakai untuk padding slot dan cursor.
pub const CACHE_LINE: usize = std::mem::align_of::<CachePadded<u8>>();

/// Ukuran L1 data cache line menurut OS, kalau tersedia.
pub fn detected_line_size() -> Option<usize> {
    query_host().filter(|size| size.is_power_of_two())
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn query_host() -> Option<usize> {
    // SAFETY: sysconf tidak menyentuh memory milik caller
    let size = unsafe { libc::sysconf(libc::_SC_LEVEL1_DCACHE_LINESIZE) };
    usize::try_from(size).ok()
}

#[cfg(target_os = "macos")]
fn query_host() -> Option<usize> {
    let mut size: libc::size_t = 0;
    let mut len = std::mem::size_of::<libc::size_t>();
    // SAFETY: nama null-terminated, buffer output cukup untuk size_t
    let rc = unsafe {
        libc::sysctlbyname(
            b"hw.cachelinesize\0".as_ptr() as *const libc::c_char,
            &mut size as *mut libc::size_t as *mut libc::c_void,
            &mut len,
            std::ptr::null_mut(),
            0,
        )
    };
    (rc == 0).then_some(size)
}

#[cfg(not(any(all(target_os = "linux", target_env = "gnu"), target_os = "macos")))]
fn query_host() -> Option<usize> {
    None
}
