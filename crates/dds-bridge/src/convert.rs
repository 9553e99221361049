// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value object ⇄ native layout conversion contract.
//!
//! ```text
//! let native = qos.to_native();   // may allocate, recorded in qos' ledger
//! let rc = native_call(&native);  // library borrows the buffers
//! qos.release();                  // always, whatever rc says
//! ```
//!
//! A borrowed value converts into a call-scoped ledger instead:
//!
//! ```text
//! let mut ledger = AllocationLedger::new();
//! let native = qos.to_native_in(&mut ledger);
//! let rc = native_call(&native);
//! ledger.release();
//! ```

use crate::memory::AllocationLedger;

/// Projection of a value object onto its `#[repr(C)]` native layout.
pub trait NativeConvert {
    /// Native layout with the exact field order and widths of the library.
    type Native;

    /// Build the native layout. Buffers allocated for variable-length fields
    /// are recorded in the object's ledger until [`release`](Self::release).
    fn to_native(&mut self) -> Self::Native {
        let mut ledger = AllocationLedger::new();
        let native = self.to_native_in(&mut ledger);
        self.retain(ledger);
        native
    }

    /// Build the native layout without touching this object: buffers are
    /// recorded in `ledger`, which must outlive every use of the result.
    fn to_native_in(&self, ledger: &mut AllocationLedger) -> Self::Native;

    /// Overwrite this value with the contents of `native`.
    ///
    /// Only reads: collections are rebuilt from scratch and the ledger is
    /// left untouched.
    ///
    /// # Safety
    /// Every sequence pointer in `native` must be null or point at a valid
    /// block (see [`crate::sequence`]) for the duration of the call.
    unsafe fn from_native(&mut self, native: &Self::Native);

    /// Free everything recorded by previous `to_native` calls. Idempotent.
    fn release(&mut self) {}

    /// Take over buffers built by [`to_native_in`](Self::to_native_in).
    /// Objects without variable-length fields never receive any.
    fn retain(&mut self, ledger: AllocationLedger) {
        debug_assert!(ledger.is_empty());
    }

    /// Foreign buffers currently held.
    fn outstanding(&self) -> usize {
        0
    }
}

/// Object-safe release, so heterogeneous converted values can be held
/// together until their buffers may be freed.
pub trait Release: Send {
    fn release_now(&mut self);
}

impl<T: NativeConvert + Send> Release for T {
    fn release_now(&mut self) {
        self.release();
    }
}

/// Implement deep value equality and hashing over the listed fields, leaving
/// the allocation ledger out.
macro_rules! impl_value_eq {
    ($type:ident { $($field:ident),+ $(,)? }) => {
        impl PartialEq for $type {
            fn eq(&self, other: &Self) -> bool {
                true $(&& self.$field == other.$field)+
            }
        }

        impl Eq for $type {}

        impl std::hash::Hash for $type {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                $(self.$field.hash(state);)+
            }
        }
    };
}

pub(crate) use impl_value_eq;

/// Declare a policy kind enum carried as an integer across the boundary.
///
/// Unknown native values fall back to the default variant with a warning.
macro_rules! native_kind {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $repr:ty {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr,)+
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $name {
            pub fn to_raw(self) -> $repr {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            pub fn from_raw(raw: $repr) -> Self {
                $(
                    if raw == $value {
                        return Self::$variant;
                    }
                )+
                log::warn!(
                    "unknown {} value {} from native side, using {:?}",
                    stringify!($name),
                    raw,
                    Self::$default
                );
                Self::$default
            }
        }
    };
}

pub(crate) use native_kind;
