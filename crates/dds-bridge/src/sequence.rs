// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sequence marshaling across the native boundary.
//!
//! # Block layout
//!
//! ```text
//! offset 0          4                4 + SIZE          4 + n*SIZE
//! +-----------------+----------------+-----------------+
//! | count: i32 (LE) | element 0      | ... element n-1 |
//! +-----------------+----------------+-----------------+
//! ```
//!
//! Elements are packed with no padding and accessed unaligned. Text
//! sequences store one pointer per element, each pointing at its own
//! NUL-terminated buffer.
//!
//! Marshaling always produces a valid block, even for an empty input: the
//! native library distinguishes "present but empty" from "not set".

use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::{ptr, slice};

use crate::codec::FixedCodec;
use crate::memory::{alloc_zeroed, ForeignPtr};

/// Size of the count prefix.
pub const COUNT_SIZE: usize = 4;

const PTR_SIZE: usize = std::mem::size_of::<*mut c_char>();

/// Result of a `to_native` conversion: the block pointer plus every buffer the
/// caller now owns (the block itself first).
#[derive(Debug)]
pub struct Marshaled {
    pub ptr: *mut c_void,
    pub allocations: Vec<ForeignPtr>,
}

impl Marshaled {
    fn single(block: ForeignPtr) -> Self {
        Self {
            ptr: block.as_ptr(),
            allocations: vec![block],
        }
    }
}

fn count_prefix(len: usize) -> i32 {
    // A sequence longer than i32::MAX cannot be described to the library.
    i32::try_from(len).expect("sequence length exceeds i32::MAX")
}

/// Marshal fixed-size elements into one block.
pub fn to_native<T: FixedCodec>(items: &[T]) -> Marshaled {
    let total = COUNT_SIZE + items.len() * T::SIZE;
    let block = alloc_zeroed(total);

    // SAFETY: `block` holds `total` freshly allocated bytes.
    let bytes = unsafe { slice::from_raw_parts_mut(block.as_ptr().cast::<u8>(), total) };
    count_prefix(items.len()).encode_into(&mut bytes[..COUNT_SIZE]);
    for (item, chunk) in items
        .iter()
        .zip(bytes[COUNT_SIZE..].chunks_exact_mut(T::SIZE))
    {
        item.encode_into(chunk);
    }

    Marshaled::single(block)
}

/// Marshal strings into a block of pointers plus one buffer per string.
///
/// Bytes are copied verbatim; an interior NUL ends the string as the native
/// side sees it.
pub fn strings_to_native<S: AsRef<str>>(items: &[S]) -> Marshaled {
    let total = COUNT_SIZE + items.len() * PTR_SIZE;
    let block = alloc_zeroed(total);
    let base = block.as_ptr().cast::<u8>();

    let mut allocations = Vec::with_capacity(items.len() + 1);

    // SAFETY: `block` holds `total` bytes; every write below stays within it.
    unsafe {
        let prefix = slice::from_raw_parts_mut(base, COUNT_SIZE);
        count_prefix(items.len()).encode_into(prefix);

        for (i, item) in items.iter().enumerate() {
            let text = item.as_ref().as_bytes();
            let buf = alloc_zeroed(text.len() + 1);
            ptr::copy_nonoverlapping(text.as_ptr(), buf.as_ptr().cast::<u8>(), text.len());

            let slot = base.add(COUNT_SIZE + i * PTR_SIZE).cast::<*mut c_char>();
            slot.write_unaligned(buf.as_ptr().cast::<c_char>());
            allocations.push(buf);
        }
    }

    let ptr = block.as_ptr();
    allocations.insert(0, block);
    Marshaled { ptr, allocations }
}

/// Element count of a block; null or negative means empty.
///
/// # Safety
/// `ptr` is null or points at a block with a readable count prefix.
unsafe fn read_count(ptr: *const c_void) -> usize {
    if ptr.is_null() {
        return 0;
    }
    let prefix = slice::from_raw_parts(ptr.cast::<u8>(), COUNT_SIZE);
    usize::try_from(i32::decode(prefix)).unwrap_or(0)
}

/// Rebuild fixed-size elements from a block.
///
/// Never frees or takes ownership of `ptr`.
///
/// # Safety
/// `ptr` must be null or point at a block laid out as described in the module
/// docs, valid for the duration of the call.
pub unsafe fn from_native<T: FixedCodec>(ptr: *const c_void) -> Vec<T> {
    let count = read_count(ptr);
    if count == 0 {
        return Vec::new();
    }
    let data = slice::from_raw_parts(ptr.cast::<u8>().add(COUNT_SIZE), count * T::SIZE);
    data.chunks_exact(T::SIZE).map(T::decode).collect()
}

/// Rebuild strings from a text block.
///
/// Element buffers are copied, not adopted. A null element decodes as the
/// empty string; invalid UTF-8 is replaced lossily.
///
/// # Safety
/// `ptr` must be null or point at a text block whose element pointers are
/// null or NUL-terminated, all valid for the duration of the call.
pub unsafe fn strings_from_native(ptr: *const c_void) -> Vec<String> {
    let count = read_count(ptr);
    let base = ptr.cast::<u8>();
    (0..count)
        .map(|i| {
            let slot = base.add(COUNT_SIZE + i * PTR_SIZE).cast::<*const c_char>();
            let element = slot.read_unaligned();
            if element.is_null() {
                String::new()
            } else {
                CStr::from_ptr(element).to_string_lossy().into_owned()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::AllocationLedger;
    use crate::time::Duration;

    #[test]
    fn strings_roundtrip_in_order() {
        let mut ledger = AllocationLedger::new();
        let ptr = ledger.absorb(strings_to_native(&["a", "bb"]));

        // One block plus one buffer per string.
        assert_eq!(ledger.len(), 3);
        let back = unsafe { strings_from_native(ptr) };
        assert_eq!(back, vec!["a".to_string(), "bb".to_string()]);

        ledger.release();
        assert!(ledger.is_empty());
    }

    #[test]
    fn empty_input_is_a_zero_count_block() {
        let marshaled = to_native::<u8>(&[]);
        assert!(!marshaled.ptr.is_null());
        let count = unsafe { i32::decode(slice::from_raw_parts(marshaled.ptr.cast::<u8>(), 4)) };
        assert_eq!(count, 0);

        let mut ledger = AllocationLedger::new();
        ledger.absorb(marshaled);
        ledger.release();

        let text = strings_to_native::<&str>(&[]);
        assert!(!text.ptr.is_null());
        assert_eq!(text.allocations.len(), 1);
        let mut ledger = AllocationLedger::new();
        let ptr = ledger.absorb(text);
        assert!(unsafe { strings_from_native(ptr) }.is_empty());
        ledger.release();
    }

    #[test]
    fn null_pointer_is_empty_sequence() {
        assert!(unsafe { from_native::<i32>(ptr::null()) }.is_empty());
        assert!(unsafe { strings_from_native(ptr::null()) }.is_empty());
    }

    #[test]
    fn block_layout_is_count_then_packed_elements() {
        let mut ledger = AllocationLedger::new();
        let ptr = ledger.absorb(to_native(&[Duration::new(5, 0), Duration::new(7, 9)]));
        let bytes = unsafe { slice::from_raw_parts(ptr.cast::<u8>(), 4 + 16) };
        assert_eq!(&bytes[..4], &[2, 0, 0, 0]);
        assert_eq!(&bytes[4..12], &[5, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[12..20], &[7, 0, 0, 0, 9, 0, 0, 0]);
        ledger.release();
    }

    #[test]
    fn primitives_roundtrip() {
        let values: Vec<i16> = (0..32).map(|_| fastrand::i16(..)).collect();
        let mut ledger = AllocationLedger::new();
        let ptr = ledger.absorb(to_native(&values));
        assert_eq!(unsafe { from_native::<i16>(ptr) }, values);
        ledger.release();
    }

    #[test]
    fn negative_count_is_empty() {
        let mut ledger = AllocationLedger::new();
        let ptr = ledger.absorb(to_native::<u8>(&[]));
        unsafe { (-3i32).encode_into(slice::from_raw_parts_mut(ptr.cast::<u8>(), 4)) };
        assert!(unsafe { from_native::<u8>(ptr) }.is_empty());
        ledger.release();
    }

    #[test]
    fn unicode_survives() {
        let mut ledger = AllocationLedger::new();
        let ptr = ledger.absorb(strings_to_native(&["capteur/température", ""]));
        assert_eq!(
            unsafe { strings_from_native(ptr) },
            vec!["capteur/température".to_string(), String::new()]
        );
        ledger.release();
    }
}
