// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Foreign memory and the allocation ledger.
//!
//! Buffers handed to the native library come from the C heap so the library
//! may read them with plain pointer arithmetic. Every buffer allocated for a
//! call is recorded in the [`AllocationLedger`] of the value object that
//! produced it and freed exactly once by [`AllocationLedger::release`].

use std::alloc::{handle_alloc_error, Layout};
use std::fmt;
use std::os::raw::c_void;
use std::ptr::NonNull;

/// Owned pointer to a C-heap buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct ForeignPtr(NonNull<c_void>);

impl ForeignPtr {
    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// Allocate `size` zeroed bytes on the C heap.
///
/// Running out of memory here is not recoverable: the process aborts through
/// the global allocation error handler.
pub fn alloc_zeroed(size: usize) -> ForeignPtr {
    let size = size.max(1);
    // SAFETY: calloc with a non-zero size; null is handled below.
    let raw = unsafe { libc::calloc(1, size) };
    match NonNull::new(raw) {
        Some(ptr) => {
            log::trace!("foreign alloc {:p} ({} bytes)", raw, size);
            ForeignPtr(ptr)
        }
        None => handle_alloc_error(Layout::from_size_align(size, 1).unwrap_or(Layout::new::<u8>())),
    }
}

/// Free a buffer obtained from [`alloc_zeroed`].
pub fn free(ptr: ForeignPtr) {
    log::trace!("foreign free {:p}", ptr.as_ptr());
    // SAFETY: `ForeignPtr` is only constructed by `alloc_zeroed` and is not
    // `Clone`, so each pointer reaches this point at most once.
    unsafe { libc::free(ptr.as_ptr()) }
}

/// Foreign pointers a value object must free.
///
/// The ledger is bookkeeping attached to a value, not part of the value:
/// cloning yields an empty ledger (the clone allocated nothing) and value
/// equality ignores it.
#[derive(Default)]
pub struct AllocationLedger {
    entries: Vec<ForeignPtr>,
}

// SAFETY: the ledger exclusively owns its buffers; nothing else aliases them
// once the native call that borrowed them has returned.
unsafe impl Send for AllocationLedger {}
unsafe impl Sync for AllocationLedger {}

impl AllocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one allocation.
    pub fn track(&mut self, ptr: ForeignPtr) {
        self.entries.push(ptr);
    }

    /// Record every allocation of a marshaled block and return its top-level
    /// pointer.
    pub fn absorb(&mut self, marshaled: crate::sequence::Marshaled) -> *mut c_void {
        let ptr = marshaled.ptr;
        self.entries.extend(marshaled.allocations);
        ptr
    }

    /// Move every entry of `other` into this ledger.
    pub fn append(&mut self, other: &mut AllocationLedger) {
        self.entries.append(&mut other.entries);
    }

    /// Outstanding allocations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Free every entry, then forget it. Calling this on an empty ledger does
    /// nothing.
    pub fn release(&mut self) {
        for ptr in self.entries.drain(..) {
            free(ptr);
        }
    }
}

impl Clone for AllocationLedger {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for AllocationLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllocationLedger")
            .field("outstanding", &self.entries.len())
            .finish()
    }
}

impl Drop for AllocationLedger {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            log::warn!(
                "allocation ledger dropped with {} unreleased buffer(s)",
                self.entries.len()
            );
            self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_is_zeroed() {
        let ptr = alloc_zeroed(16);
        // SAFETY: 16 bytes were just allocated.
        let bytes = unsafe { std::slice::from_raw_parts(ptr.as_ptr().cast::<u8>(), 16) };
        assert!(bytes.iter().all(|b| *b == 0));
        free(ptr);
    }

    #[test]
    fn release_empties_ledger() {
        let mut ledger = AllocationLedger::new();
        ledger.track(alloc_zeroed(8));
        ledger.track(alloc_zeroed(0));
        assert_eq!(ledger.len(), 2);

        ledger.release();
        assert!(ledger.is_empty());

        // Second release has nothing left to free.
        ledger.release();
        assert!(ledger.is_empty());
    }

    #[test]
    fn clone_owns_nothing() {
        let mut ledger = AllocationLedger::new();
        ledger.track(alloc_zeroed(4));
        let copy = ledger.clone();
        assert!(copy.is_empty());
        assert_eq!(ledger.len(), 1);
        ledger.release();
    }

    #[test]
    fn append_moves_entries() {
        let mut a = AllocationLedger::new();
        let mut b = AllocationLedger::new();
        b.track(alloc_zeroed(4));
        a.append(&mut b);
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
        a.release();
    }
}
