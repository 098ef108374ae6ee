//! The acquisition boundary: the one place either arena talks to the host.
//!
//! Both the main arena and the buddy arena obtain their backing bytes
//! through [`MmapRegion::acquire`], a thin wrapper over an anonymous,
//! private `mmap`. Neither arena is ever grown, shrunk, or unmapped; the
//! region simply lives until the process exits.

use std::ptr;

/// Byte size of both arenas (`H` in the design doc).
pub(crate) const ARENA_BYTES: usize = 4096;

/// A zero-initialized, anonymous mapping owned for the life of the process.
pub(crate) struct MmapRegion {
    base: *mut u8,
    len: usize,
}

// The region is only ever touched while the arena that owns it is behind a
// `Mutex`; the raw pointer itself carries no thread-confinement.
unsafe impl Send for MmapRegion {}

impl MmapRegion {
    /// Maps `len` fresh, zeroed bytes. Terminates the process on failure:
    /// there is no useful way to recover from a missing arena, and no
    /// caller-visible `Result` to propagate it through.
    pub(crate) fn acquire(len: usize) -> Self {
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            log::error!(
                "mmap of a {len}-byte arena failed: {}",
                std::io::Error::last_os_error()
            );
            std::process::exit(1);
        }

        Self { base: ptr as *mut u8, len }
    }

    pub(crate) fn start(&self) -> *mut u8 {
        self.base
    }

    /// True iff `ptr` falls within `[start, start + len)`.
    pub(crate) fn contains(&self, ptr: *mut u8) -> bool {
        let start = self.base as usize;
        let end = start + self.len;
        let p = ptr as usize;
        p >= start && p < end
    }
}
