// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native communication status layouts (DDS v1.4 Sec.2.2.4.1).

use crate::{DdsInstanceHandle, DdsSequence};

// Status mask bits.
pub const DDS_INCONSISTENT_TOPIC_STATUS: u32 = 1 << 0;
pub const DDS_OFFERED_DEADLINE_MISSED_STATUS: u32 = 1 << 1;
pub const DDS_REQUESTED_DEADLINE_MISSED_STATUS: u32 = 1 << 2;
pub const DDS_OFFERED_INCOMPATIBLE_QOS_STATUS: u32 = 1 << 5;
pub const DDS_REQUESTED_INCOMPATIBLE_QOS_STATUS: u32 = 1 << 6;
pub const DDS_SAMPLE_LOST_STATUS: u32 = 1 << 7;
pub const DDS_SAMPLE_REJECTED_STATUS: u32 = 1 << 8;
pub const DDS_DATA_ON_READERS_STATUS: u32 = 1 << 9;
pub const DDS_DATA_AVAILABLE_STATUS: u32 = 1 << 10;
pub const DDS_LIVELINESS_LOST_STATUS: u32 = 1 << 11;
pub const DDS_LIVELINESS_CHANGED_STATUS: u32 = 1 << 12;
pub const DDS_PUBLICATION_MATCHED_STATUS: u32 = 1 << 13;
pub const DDS_SUBSCRIPTION_MATCHED_STATUS: u32 = 1 << 14;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsInconsistentTopicStatus {
    pub total_count: i32,
    pub total_count_change: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsSampleLostStatus {
    pub total_count: i32,
    pub total_count_change: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsSampleRejectedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_reason: i32,
    pub last_instance_handle: DdsInstanceHandle,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsLivelinessLostStatus {
    pub total_count: i32,
    pub total_count_change: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsLivelinessChangedStatus {
    pub alive_count: i32,
    pub not_alive_count: i32,
    pub alive_count_change: i32,
    pub not_alive_count_change: i32,
    pub last_publication_handle: DdsInstanceHandle,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsOfferedDeadlineMissedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_instance_handle: DdsInstanceHandle,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsRequestedDeadlineMissedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_instance_handle: DdsInstanceHandle,
}

/// `policies` is a sequence of [`crate::DdsQosPolicyCount`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsOfferedIncompatibleQosStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_policy_id: i32,
    pub policies: DdsSequence,
}

/// `policies` is a sequence of [`crate::DdsQosPolicyCount`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsRequestedIncompatibleQosStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub last_policy_id: i32,
    pub policies: DdsSequence,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsPublicationMatchedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub current_count: i32,
    pub current_count_change: i32,
    pub last_subscription_handle: DdsInstanceHandle,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsSubscriptionMatchedStatus {
    pub total_count: i32,
    pub total_count_change: i32,
    pub current_count: i32,
    pub current_count_change: i32,
    pub last_publication_handle: DdsInstanceHandle,
}
