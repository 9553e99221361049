// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Communication status snapshots (DDS v1.4 Sec.2.2.4.1).
//!
//! Statuses are read-only values produced by the native side. They implement
//! [`NativeConvert`] so they can be round-tripped like policies; the two
//! incompatible-QoS statuses own a policy-count sequence and follow the
//! ledger discipline when converted to native.

use dds_sys::{
    DdsInconsistentTopicStatus, DdsInstanceHandle, DdsLivelinessChangedStatus,
    DdsLivelinessLostStatus, DdsOfferedDeadlineMissedStatus, DdsOfferedIncompatibleQosStatus,
    DdsPublicationMatchedStatus, DdsQosPolicyCount, DdsRequestedDeadlineMissedStatus,
    DdsRequestedIncompatibleQosStatus, DdsSampleLostStatus, DdsSampleRejectedStatus, DdsSequence,
    DdsSubscriptionMatchedStatus,
};

use crate::convert::{impl_value_eq, native_kind, NativeConvert};
use crate::memory::AllocationLedger;
use crate::sequence;

/// Per-policy incompatibility counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct QosPolicyCount {
    pub policy_id: i32,
    pub count: i32,
}

impl QosPolicyCount {
    pub const fn new(policy_id: i32, count: i32) -> Self {
        Self { policy_id, count }
    }
}

impl From<DdsQosPolicyCount> for QosPolicyCount {
    fn from(raw: DdsQosPolicyCount) -> Self {
        Self::new(raw.policy_id, raw.count)
    }
}

native_kind! {
    /// Why the last sample was rejected.
    pub enum SampleRejectedStatusKind: i32 {
        NotRejected = 0,
        ByInstancesLimit = 1,
        BySamplesLimit = 2,
        BySamplesPerInstanceLimit = 3,
    }
    default NotRejected
}

/// Plain count statuses: a total and the change since the last read.
macro_rules! count_status {
    ($(#[$meta:meta])* $name:ident => $native:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            pub total_count: i32,
            pub total_count_change: i32,
        }

        impl NativeConvert for $name {
            type Native = $native;

            fn to_native_in(&self, _ledger: &mut AllocationLedger) -> $native {
                $native {
                    total_count: self.total_count,
                    total_count_change: self.total_count_change,
                }
            }

            unsafe fn from_native(&mut self, native: &$native) {
                self.total_count = native.total_count;
                self.total_count_change = native.total_count_change;
            }
        }
    };
}

count_status! {
    /// Another topic with the same name but a different type was discovered.
    InconsistentTopicStatus => DdsInconsistentTopicStatus
}

count_status! {
    SampleLostStatus => DdsSampleLostStatus
}

count_status! {
    /// The writer failed to assert its liveliness within the lease.
    LivelinessLostStatus => DdsLivelinessLostStatus
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SampleRejectedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_reason: SampleRejectedStatusKind,
    pub last_instance_handle: DdsInstanceHandle,
}

impl NativeConvert for SampleRejectedStatus {
    type Native = DdsSampleRejectedStatus;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsSampleRejectedStatus {
        DdsSampleRejectedStatus {
            total_count: self.total_count,
            total_count_change: self.total_count_change,
            last_reason: self.last_reason.to_raw(),
            last_instance_handle: self.last_instance_handle,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsSampleRejectedStatus) {
        self.total_count = native.total_count;
        self.total_count_change = native.total_count_change;
        self.last_reason = SampleRejectedStatusKind::from_raw(native.last_reason);
        self.last_instance_handle = native.last_instance_handle;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LivelinessChangedStatus {
    pub alive_count: i32,
    pub not_alive_count: i32,
    pub alive_count_change: i32,
    pub not_alive_count_change: i32,
    pub last_publication_handle: DdsInstanceHandle,
}

impl NativeConvert for LivelinessChangedStatus {
    type Native = DdsLivelinessChangedStatus;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsLivelinessChangedStatus {
        DdsLivelinessChangedStatus {
            alive_count: self.alive_count,
            not_alive_count: self.not_alive_count,
            alive_count_change: self.alive_count_change,
            not_alive_count_change: self.not_alive_count_change,
            last_publication_handle: self.last_publication_handle,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsLivelinessChangedStatus) {
        self.alive_count = native.alive_count;
        self.not_alive_count = native.not_alive_count;
        self.alive_count_change = native.alive_count_change;
        self.not_alive_count_change = native.not_alive_count_change;
        self.last_publication_handle = native.last_publication_handle;
    }
}

macro_rules! deadline_status {
    ($(#[$meta:meta])* $name:ident => $native:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            pub total_count: i32,
            pub total_count_change: i32,
            pub last_instance_handle: DdsInstanceHandle,
        }

        impl NativeConvert for $name {
            type Native = $native;

            fn to_native_in(&self, _ledger: &mut AllocationLedger) -> $native {
                $native {
                    total_count: self.total_count,
                    total_count_change: self.total_count_change,
                    last_instance_handle: self.last_instance_handle,
                }
            }

            unsafe fn from_native(&mut self, native: &$native) {
                self.total_count = native.total_count;
                self.total_count_change = native.total_count_change;
                self.last_instance_handle = native.last_instance_handle;
            }
        }
    };
}

deadline_status! {
    OfferedDeadlineMissedStatus => DdsOfferedDeadlineMissedStatus
}

deadline_status! {
    RequestedDeadlineMissedStatus => DdsRequestedDeadlineMissedStatus
}

macro_rules! incompatible_qos_status {
    ($(#[$meta:meta])* $name:ident => $native:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        pub struct $name {
            pub total_count: i32,
            pub total_count_change: i32,
            pub last_policy_id: i32,
            /// Per-policy counters, in native order.
            pub policies: Vec<QosPolicyCount>,
            ledger: AllocationLedger,
        }

        impl_value_eq!($name {
            total_count,
            total_count_change,
            last_policy_id,
            policies
        });

        impl NativeConvert for $name {
            type Native = $native;

            fn to_native_in(&self, ledger: &mut AllocationLedger) -> $native {
                let ptr = ledger.absorb(sequence::to_native(&self.policies));
                $native {
                    total_count: self.total_count,
                    total_count_change: self.total_count_change,
                    last_policy_id: self.last_policy_id,
                    policies: DdsSequence(ptr),
                }
            }

            unsafe fn from_native(&mut self, native: &$native) {
                self.total_count = native.total_count;
                self.total_count_change = native.total_count_change;
                self.last_policy_id = native.last_policy_id;
                self.policies = sequence::from_native(native.policies.0);
            }

            fn release(&mut self) {
                self.ledger.release();
            }

            fn retain(&mut self, mut ledger: AllocationLedger) {
                self.ledger.append(&mut ledger);
            }

            fn outstanding(&self) -> usize {
                self.ledger.len()
            }
        }
    };
}

incompatible_qos_status! {
    /// A reader requested QoS the writer does not offer.
    OfferedIncompatibleQosStatus => DdsOfferedIncompatibleQosStatus
}

incompatible_qos_status! {
    /// A writer offers QoS incompatible with what the reader requested.
    RequestedIncompatibleQosStatus => DdsRequestedIncompatibleQosStatus
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PublicationMatchedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub current_count: i32,
    pub current_count_change: i32,
    pub last_subscription_handle: DdsInstanceHandle,
}

impl NativeConvert for PublicationMatchedStatus {
    type Native = DdsPublicationMatchedStatus;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsPublicationMatchedStatus {
        DdsPublicationMatchedStatus {
            total_count: self.total_count,
            total_count_change: self.total_count_change,
            current_count: self.current_count,
            current_count_change: self.current_count_change,
            last_subscription_handle: self.last_subscription_handle,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsPublicationMatchedStatus) {
        self.total_count = native.total_count;
        self.total_count_change = native.total_count_change;
        self.current_count = native.current_count;
        self.current_count_change = native.current_count_change;
        self.last_subscription_handle = native.last_subscription_handle;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SubscriptionMatchedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub current_count: i32,
    pub current_count_change: i32,
    pub last_publication_handle: DdsInstanceHandle,
}

impl NativeConvert for SubscriptionMatchedStatus {
    type Native = DdsSubscriptionMatchedStatus;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsSubscriptionMatchedStatus {
        DdsSubscriptionMatchedStatus {
            total_count: self.total_count,
            total_count_change: self.total_count_change,
            current_count: self.current_count,
            current_count_change: self.current_count_change,
            last_publication_handle: self.last_publication_handle,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsSubscriptionMatchedStatus) {
        self.total_count = native.total_count;
        self.total_count_change = native.total_count_change;
        self.current_count = native.current_count;
        self.current_count_change = native.current_count_change;
        self.last_publication_handle = native.last_publication_handle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incompatible_qos_roundtrip() {
        let mut status = RequestedIncompatibleQosStatus {
            total_count: 3,
            total_count_change: 1,
            last_policy_id: 11,
            policies: vec![QosPolicyCount::new(11, 2), QosPolicyCount::new(2, 1)],
            ..Default::default()
        };
        let native = status.to_native();
        assert_eq!(status.outstanding(), 1);

        let mut back = RequestedIncompatibleQosStatus::default();
        unsafe { back.from_native(&native) };
        status.release();

        assert_eq!(back, status);
        assert_eq!(status.outstanding(), 0);
    }

    #[test]
    fn null_policy_list_is_empty() {
        let native = DdsOfferedIncompatibleQosStatus {
            total_count: 1,
            last_policy_id: 4,
            ..Default::default()
        };
        let mut status = OfferedIncompatibleQosStatus::default();
        unsafe { status.from_native(&native) };
        assert!(status.policies.is_empty());
        assert_eq!(status.last_policy_id, 4);
    }

    #[test]
    fn rejected_reason_maps_kind() {
        let native = DdsSampleRejectedStatus {
            total_count: 2,
            total_count_change: 2,
            last_reason: 2,
            last_instance_handle: 77,
        };
        let mut status = SampleRejectedStatus::default();
        unsafe { status.from_native(&native) };
        assert_eq!(status.last_reason, SampleRejectedStatusKind::BySamplesLimit);
        assert_eq!(status.to_native(), native);
    }
}
