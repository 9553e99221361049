// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Native DDS ABI
//!
//! Raw declarations for the C-ABI DDS middleware: opaque handles, return
//! codes, the `#[repr(C)]` layouts exchanged with the library, and the
//! `extern "C"` entry points.
//!
//! Nothing in this crate allocates or frees. Safe wrappers live in
//! `dds-bridge`.
//!
//! # Safety
//!
//! Every layout here must match the native struct field for field. A mismatch
//! is silent memory corruption, so sizes and offsets are pinned by tests.

#[cfg(target_endian = "big")]
compile_error!("the native DDS ABI is only defined for little-endian targets");

mod functions;
mod qos;
mod status;

pub use functions::*;
pub use qos::*;
pub use status::*;

use std::fmt;
use std::os::raw::c_void;
use std::ptr;

/// Opaque address of an object owned by the native middleware.
///
/// Never dereferenced on this side of the boundary: it is only passed back to
/// the library or used as a lookup key. The null handle means "absent".
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(*mut c_void);

// SAFETY: a handle is an integer-like key; the native library is responsible
// for synchronising access to the object behind it.
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

impl Handle {
    /// The "absent" sentinel.
    pub const NULL: Handle = Handle(ptr::null_mut());

    /// Wrap a raw pointer returned by the native library.
    #[inline]
    pub const fn from_raw(raw: *mut c_void) -> Self {
        Self(raw)
    }

    /// Raw pointer to hand back to the native library.
    #[inline]
    pub const fn as_raw(self) -> *mut c_void {
        self.0
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// Address value, for diagnostics.
    #[inline]
    pub fn addr(self) -> usize {
        self.0 as usize
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.addr())
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.addr())
    }
}

/// Pointer to a length-prefixed sequence block.
///
/// Block layout: `[count: i32][element 0]..[element n-1]`, elements packed
/// without padding. Text sequences hold one `*mut c_char` per element.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DdsSequence(pub *mut c_void);

impl DdsSequence {
    pub const NULL: DdsSequence = DdsSequence(ptr::null_mut());

    #[inline]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for DdsSequence {
    fn default() -> Self {
        Self::NULL
    }
}

/// Raw result code returned by native entry points.
pub type DdsReturnCode = i32;

pub const DDS_RETCODE_OK: DdsReturnCode = 0;
pub const DDS_RETCODE_ERROR: DdsReturnCode = 1;
pub const DDS_RETCODE_UNSUPPORTED: DdsReturnCode = 2;
pub const DDS_RETCODE_BAD_PARAMETER: DdsReturnCode = 3;
pub const DDS_RETCODE_PRECONDITION_NOT_MET: DdsReturnCode = 4;
pub const DDS_RETCODE_OUT_OF_RESOURCES: DdsReturnCode = 5;
pub const DDS_RETCODE_NOT_ENABLED: DdsReturnCode = 6;
pub const DDS_RETCODE_IMMUTABLE_POLICY: DdsReturnCode = 7;
pub const DDS_RETCODE_INCONSISTENT_POLICY: DdsReturnCode = 8;
pub const DDS_RETCODE_ALREADY_DELETED: DdsReturnCode = 9;
pub const DDS_RETCODE_TIMEOUT: DdsReturnCode = 10;
pub const DDS_RETCODE_NO_DATA: DdsReturnCode = 11;
pub const DDS_RETCODE_ILLEGAL_OPERATION: DdsReturnCode = 12;

/// Native instance handle (not to be confused with [`Handle`]).
pub type DdsInstanceHandle = i32;

pub const DDS_HANDLE_NIL: DdsInstanceHandle = 0;

/// Unlimited resource value.
pub const DDS_LENGTH_UNLIMITED: i32 = -1;

pub const DDS_DURATION_INFINITE_SEC: i32 = 0x7fff_ffff;
pub const DDS_DURATION_INFINITE_NSEC: u32 = 0x7fff_ffff;

/// Time pair used by every duration-valued policy.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDuration {
    pub sec: i32,
    pub nanosec: u32,
}

/// One element of an incompatible-QoS policy list.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsQosPolicyCount {
    pub policy_id: i32,
    pub count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    #[test]
    fn handle_is_pointer_sized() {
        assert_eq!(size_of::<Handle>(), size_of::<*mut c_void>());
        assert_eq!(size_of::<DdsSequence>(), size_of::<*mut c_void>());
    }

    #[test]
    fn null_handle_is_default() {
        assert!(Handle::default().is_null());
        assert_eq!(Handle::default(), Handle::NULL);
        assert!(DdsSequence::default().is_null());
    }

    #[test]
    fn handle_equality_is_address_equality() {
        let a = Handle::from_raw(0x10usize as *mut c_void);
        let b = Handle::from_raw(0x10usize as *mut c_void);
        let c = Handle::from_raw(0x20usize as *mut c_void);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(format!("{a}"), "0x10");
    }

    #[test]
    fn time_pair_layout() {
        assert_eq!(size_of::<DdsDuration>(), 8);
        assert_eq!(align_of::<DdsDuration>(), 4);
        assert_eq!(size_of::<DdsQosPolicyCount>(), 8);
    }
}
