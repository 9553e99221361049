// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conditions and the masks that configure them.
//!
//! Guard conditions belong to the participant factory, status conditions to
//! the entity they watch, read and query conditions to their data reader.
//! Trigger values are never cached: every query goes to the native side.

use std::ffi::CStr;
use std::fmt;
use std::sync::Arc;

use dds_sys::{DdsSequence, Handle};

use crate::entity::{Core, DataReader};
use crate::error::{check, no_interior_nul, Error, Result};
use crate::memory::AllocationLedger;
use crate::registry::{Entity, Wrapper};
use crate::sequence;

/// Bit mask of communication statuses.
///
/// Bit positions match the native library's status identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusMask(u32);

impl StatusMask {
    /// No status enabled
    pub const NONE: StatusMask = StatusMask(0);

    /// All statuses enabled
    pub const ALL: StatusMask = StatusMask(u32::MAX);

    /// Topic type or QoS conflicts with a remote topic (Topic)
    pub const INCONSISTENT_TOPIC: StatusMask = StatusMask(dds_sys::DDS_INCONSISTENT_TOPIC_STATUS);

    /// Offered deadline missed (DataWriter)
    pub const OFFERED_DEADLINE_MISSED: StatusMask =
        StatusMask(dds_sys::DDS_OFFERED_DEADLINE_MISSED_STATUS);

    /// Requested deadline missed (DataReader)
    pub const REQUESTED_DEADLINE_MISSED: StatusMask =
        StatusMask(dds_sys::DDS_REQUESTED_DEADLINE_MISSED_STATUS);

    /// Offered incompatible QoS (DataWriter)
    pub const OFFERED_INCOMPATIBLE_QOS: StatusMask =
        StatusMask(dds_sys::DDS_OFFERED_INCOMPATIBLE_QOS_STATUS);

    /// Requested incompatible QoS (DataReader)
    pub const REQUESTED_INCOMPATIBLE_QOS: StatusMask =
        StatusMask(dds_sys::DDS_REQUESTED_INCOMPATIBLE_QOS_STATUS);

    /// Sample lost (DataReader)
    pub const SAMPLE_LOST: StatusMask = StatusMask(dds_sys::DDS_SAMPLE_LOST_STATUS);

    /// Sample rejected (DataReader)
    pub const SAMPLE_REJECTED: StatusMask = StatusMask(dds_sys::DDS_SAMPLE_REJECTED_STATUS);

    /// Data available on one of the readers (Subscriber)
    pub const DATA_ON_READERS: StatusMask = StatusMask(dds_sys::DDS_DATA_ON_READERS_STATUS);

    /// Data available to read (DataReader)
    pub const DATA_AVAILABLE: StatusMask = StatusMask(dds_sys::DDS_DATA_AVAILABLE_STATUS);

    /// Liveliness lost (DataWriter)
    pub const LIVELINESS_LOST: StatusMask = StatusMask(dds_sys::DDS_LIVELINESS_LOST_STATUS);

    /// Liveliness changed (DataReader)
    pub const LIVELINESS_CHANGED: StatusMask =
        StatusMask(dds_sys::DDS_LIVELINESS_CHANGED_STATUS);

    /// Publication matched (DataWriter)
    pub const PUBLICATION_MATCHED: StatusMask =
        StatusMask(dds_sys::DDS_PUBLICATION_MATCHED_STATUS);

    /// Subscription matched (DataReader)
    pub const SUBSCRIPTION_MATCHED: StatusMask =
        StatusMask(dds_sys::DDS_SUBSCRIPTION_MATCHED_STATUS);

    /// Create a new StatusMask from raw bits
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        StatusMask(bits)
    }

    /// Get the raw bits value
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Check if this mask contains the given status
    #[must_use]
    pub const fn contains(&self, other: StatusMask) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Combine two masks with bitwise OR
    #[must_use]
    pub const fn or(self, other: StatusMask) -> Self {
        StatusMask(self.0 | other.0)
    }

    /// Intersect two masks with bitwise AND
    #[must_use]
    pub const fn and(self, other: StatusMask) -> Self {
        StatusMask(self.0 & other.0)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for StatusMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl std::ops::BitAnd for StatusMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

/// Sample, view and instance state masks share one shape.
macro_rules! state_mask {
    ($(#[$meta:meta])* $name:ident { $($(#[$cmeta:meta])* $konst:ident = $value:expr;)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(u32);

        impl $name {
            $($(#[$cmeta])* pub const $konst: $name = $name($value);)+

            /// Every state.
            pub const ANY: $name = $name(0xFFFF);

            #[must_use]
            pub const fn from_bits(bits: u32) -> Self {
                $name(bits)
            }

            #[must_use]
            pub const fn bits(&self) -> u32 {
                self.0
            }

            #[must_use]
            pub const fn contains(&self, other: $name) -> bool {
                (self.0 & other.0) == other.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ANY
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                $name(self.0 | rhs.0)
            }
        }
    };
}

state_mask! {
    /// Whether samples were already read.
    SampleStateMask {
        READ = 1;
        NOT_READ = 2;
    }
}

state_mask! {
    /// Whether the reader has seen the instance before.
    ViewStateMask {
        NEW = 1;
        NOT_NEW = 2;
    }
}

state_mask! {
    /// Instance liveliness.
    InstanceStateMask {
        ALIVE = 1;
        NOT_ALIVE_DISPOSED = 2;
        NOT_ALIVE_NO_WRITERS = 4;
        /// Either not-alive state.
        NOT_ALIVE = 6;
    }
}

macro_rules! condition_wrapper {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            core: Arc<Core>,
        }

        impl $name {
            pub(crate) fn from_core(core: Arc<Core>) -> Self {
                Self { core }
            }

            pub(crate) fn core(&self) -> &Core {
                &self.core
            }

            pub fn handle(&self) -> Handle {
                self.core.handle()
            }

            /// Current trigger value, read from the native side.
            pub fn trigger_value(&self) -> bool {
                // SAFETY: `handle` belongs to a live wrapper.
                unsafe { self.core.api().trigger_value(self.core.handle()) }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.core, &other.core)
            }
        }

        impl Eq for $name {}

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.core.handle()).finish()
            }
        }
    };
}

condition_wrapper! {
    /// Condition whose trigger value is set by the application.
    GuardCondition
}

condition_wrapper! {
    /// Triggers while one of the enabled statuses of its entity has changed.
    StatusCondition
}

condition_wrapper! {
    /// Triggers while the reader holds samples matching its state masks.
    ReadCondition
}

condition_wrapper! {
    /// Read condition further filtered by a query expression.
    QueryCondition
}

impl GuardCondition {
    pub fn set_trigger_value(&self, value: bool) -> Result<()> {
        // SAFETY: `handle` belongs to a live wrapper.
        check(unsafe { self.core.api().set_guard_trigger_value(self.core.handle(), value) })
    }
}

impl StatusCondition {
    pub fn enabled_statuses(&self) -> StatusMask {
        // SAFETY: `handle` belongs to a live wrapper.
        StatusMask::from_bits(unsafe { self.core.api().enabled_statuses(self.core.handle()) })
    }

    pub fn set_enabled_statuses(&self, mask: StatusMask) -> Result<()> {
        // SAFETY: `handle` belongs to a live wrapper.
        check(unsafe { self.core.api().set_enabled_statuses(self.core.handle(), mask.bits()) })
    }

    /// The entity this condition watches.
    pub fn entity(&self) -> Result<Entity> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe { self.core.api().status_condition_entity(self.core.handle()) };
        match self.core.registry().find(handle) {
            Some(Wrapper::Entity(entity)) => Ok(entity),
            Some(other) => Err(Error::UnexpectedKind {
                handle,
                expected: "entity",
                found: other.kind_name(),
            }),
            None => Err(Error::Error),
        }
    }
}

/// Accessors shared by read and query conditions.
macro_rules! read_condition_accessors {
    ($name:ident) => {
        impl $name {
            pub fn sample_state_mask(&self) -> SampleStateMask {
                // SAFETY: `handle` belongs to a live wrapper.
                SampleStateMask::from_bits(unsafe {
                    self.core.api().sample_state_mask(self.core.handle())
                })
            }

            pub fn view_state_mask(&self) -> ViewStateMask {
                // SAFETY: `handle` belongs to a live wrapper.
                ViewStateMask::from_bits(unsafe {
                    self.core.api().view_state_mask(self.core.handle())
                })
            }

            pub fn instance_state_mask(&self) -> InstanceStateMask {
                // SAFETY: `handle` belongs to a live wrapper.
                InstanceStateMask::from_bits(unsafe {
                    self.core.api().instance_state_mask(self.core.handle())
                })
            }

            pub fn datareader(&self) -> Result<DataReader> {
                // SAFETY: `handle` belongs to a live wrapper.
                let handle =
                    unsafe { self.core.api().read_condition_datareader(self.core.handle()) };
                self.core.resolve(handle, DataReader::from_core)
            }
        }
    };
}

read_condition_accessors!(ReadCondition);
read_condition_accessors!(QueryCondition);

impl QueryCondition {
    pub fn query_expression(&self) -> Result<String> {
        // SAFETY: `handle` belongs to a live wrapper.
        let ptr = unsafe { self.core.api().query_expression(self.core.handle()) };
        if ptr.is_null() {
            return Err(Error::Error);
        }
        // SAFETY: non-null and kept alive by the library while the condition exists.
        Ok(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    pub fn query_parameters(&self) -> Result<Vec<String>> {
        let mut block = DdsSequence::NULL;
        // SAFETY: `block` is a valid out-parameter.
        check(unsafe { self.core.api().query_parameters(self.core.handle(), &mut block) })?;
        // SAFETY: on success `block` is null or a text block lent by the library.
        Ok(unsafe { sequence::strings_from_native(block.0) })
    }

    /// Rebind the `%n` placeholders. Parameters containing NUL are rejected.
    pub fn set_query_parameters<S: AsRef<str>>(&self, parameters: &[S]) -> Result<()> {
        no_interior_nul(parameters)?;
        let mut ledger = AllocationLedger::new();
        let block = DdsSequence(ledger.absorb(sequence::strings_to_native(parameters)));
        // SAFETY: the block lives until the ledger is released below.
        let rc = unsafe { self.core.api().set_query_parameters(self.core.handle(), block) };
        ledger.release();
        check(rc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mask_bits_follow_native_ids() {
        assert_eq!(StatusMask::INCONSISTENT_TOPIC.bits(), 1);
        assert_eq!(StatusMask::PUBLICATION_MATCHED.bits(), 1 << 13);
        let mask = StatusMask::SAMPLE_LOST | StatusMask::SAMPLE_REJECTED;
        assert!(mask.contains(StatusMask::SAMPLE_LOST));
        assert!(!mask.contains(StatusMask::DATA_AVAILABLE));
        assert_eq!(mask & StatusMask::SAMPLE_LOST, StatusMask::SAMPLE_LOST);
        assert!(StatusMask::ALL.contains(mask));
        assert!(StatusMask::NONE.is_empty());
    }

    #[test]
    fn state_masks_default_to_any() {
        assert_eq!(SampleStateMask::default(), SampleStateMask::ANY);
        assert_eq!(
            InstanceStateMask::NOT_ALIVE,
            InstanceStateMask::NOT_ALIVE_DISPOSED | InstanceStateMask::NOT_ALIVE_NO_WRITERS
        );
        assert!(ViewStateMask::ANY.contains(ViewStateMask::NEW | ViewStateMask::NOT_NEW));
    }
}
