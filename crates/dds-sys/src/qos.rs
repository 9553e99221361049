// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native QoS layouts.
//!
//! Kinds travel as `i32` (the type consistency kind as `i16`) so that an
//! unexpected value coming back from the library can never produce an invalid
//! Rust enum.

use crate::{DdsDuration, DdsSequence};

// =============================================================================
// Policies
// =============================================================================

/// USER_DATA: sequence of `u8`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsUserDataQosPolicy {
    pub value: DdsSequence,
}

/// TOPIC_DATA: sequence of `u8`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsTopicDataQosPolicy {
    pub value: DdsSequence,
}

/// GROUP_DATA: sequence of `u8`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsGroupDataQosPolicy {
    pub value: DdsSequence,
}

/// PARTITION: sequence of strings.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsPartitionQosPolicy {
    pub name: DdsSequence,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDurabilityQosPolicy {
    pub kind: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDurabilityServiceQosPolicy {
    pub service_cleanup_delay: DdsDuration,
    pub history_kind: i32,
    pub history_depth: i32,
    pub max_samples: i32,
    pub max_instances: i32,
    pub max_samples_per_instance: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsPresentationQosPolicy {
    pub access_scope: i32,
    pub coherent_access: bool,
    pub ordered_access: bool,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDeadlineQosPolicy {
    pub period: DdsDuration,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsLatencyBudgetQosPolicy {
    pub duration: DdsDuration,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsOwnershipQosPolicy {
    pub kind: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsOwnershipStrengthQosPolicy {
    pub value: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsLivelinessQosPolicy {
    pub kind: i32,
    pub lease_duration: DdsDuration,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsTimeBasedFilterQosPolicy {
    pub minimum_separation: DdsDuration,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsReliabilityQosPolicy {
    pub kind: i32,
    pub max_blocking_time: DdsDuration,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDestinationOrderQosPolicy {
    pub kind: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsHistoryQosPolicy {
    pub kind: i32,
    pub depth: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsResourceLimitsQosPolicy {
    pub max_samples: i32,
    pub max_instances: i32,
    pub max_samples_per_instance: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsTransportPriorityQosPolicy {
    pub value: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsLifespanQosPolicy {
    pub duration: DdsDuration,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsWriterDataLifecycleQosPolicy {
    pub autodispose_unregistered_instances: bool,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsReaderDataLifecycleQosPolicy {
    pub autopurge_nowriter_samples_delay: DdsDuration,
    pub autopurge_disposed_samples_delay: DdsDuration,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsEntityFactoryQosPolicy {
    pub autoenable_created_entities: bool,
}

/// DATA_REPRESENTATION: sequence of `i16` representation ids.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDataRepresentationQosPolicy {
    pub value: DdsSequence,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsTypeConsistencyEnforcementQosPolicy {
    pub kind: i16,
    pub ignore_sequence_bounds: bool,
    pub ignore_string_bounds: bool,
    pub ignore_member_names: bool,
    pub prevent_type_widening: bool,
    pub force_type_validation: bool,
}

// =============================================================================
// Entity QoS
// =============================================================================

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDomainParticipantFactoryQos {
    pub entity_factory: DdsEntityFactoryQosPolicy,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDomainParticipantQos {
    pub user_data: DdsUserDataQosPolicy,
    pub entity_factory: DdsEntityFactoryQosPolicy,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsTopicQos {
    pub topic_data: DdsTopicDataQosPolicy,
    pub durability: DdsDurabilityQosPolicy,
    pub durability_service: DdsDurabilityServiceQosPolicy,
    pub deadline: DdsDeadlineQosPolicy,
    pub latency_budget: DdsLatencyBudgetQosPolicy,
    pub liveliness: DdsLivelinessQosPolicy,
    pub reliability: DdsReliabilityQosPolicy,
    pub destination_order: DdsDestinationOrderQosPolicy,
    pub history: DdsHistoryQosPolicy,
    pub resource_limits: DdsResourceLimitsQosPolicy,
    pub transport_priority: DdsTransportPriorityQosPolicy,
    pub lifespan: DdsLifespanQosPolicy,
    pub ownership: DdsOwnershipQosPolicy,
    pub representation: DdsDataRepresentationQosPolicy,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsPublisherQos {
    pub presentation: DdsPresentationQosPolicy,
    pub partition: DdsPartitionQosPolicy,
    pub group_data: DdsGroupDataQosPolicy,
    pub entity_factory: DdsEntityFactoryQosPolicy,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsSubscriberQos {
    pub presentation: DdsPresentationQosPolicy,
    pub partition: DdsPartitionQosPolicy,
    pub group_data: DdsGroupDataQosPolicy,
    pub entity_factory: DdsEntityFactoryQosPolicy,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDataWriterQos {
    pub durability: DdsDurabilityQosPolicy,
    pub durability_service: DdsDurabilityServiceQosPolicy,
    pub deadline: DdsDeadlineQosPolicy,
    pub latency_budget: DdsLatencyBudgetQosPolicy,
    pub liveliness: DdsLivelinessQosPolicy,
    pub reliability: DdsReliabilityQosPolicy,
    pub destination_order: DdsDestinationOrderQosPolicy,
    pub history: DdsHistoryQosPolicy,
    pub resource_limits: DdsResourceLimitsQosPolicy,
    pub transport_priority: DdsTransportPriorityQosPolicy,
    pub lifespan: DdsLifespanQosPolicy,
    pub user_data: DdsUserDataQosPolicy,
    pub ownership: DdsOwnershipQosPolicy,
    pub ownership_strength: DdsOwnershipStrengthQosPolicy,
    pub writer_data_lifecycle: DdsWriterDataLifecycleQosPolicy,
    pub representation: DdsDataRepresentationQosPolicy,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DdsDataReaderQos {
    pub durability: DdsDurabilityQosPolicy,
    pub deadline: DdsDeadlineQosPolicy,
    pub latency_budget: DdsLatencyBudgetQosPolicy,
    pub liveliness: DdsLivelinessQosPolicy,
    pub reliability: DdsReliabilityQosPolicy,
    pub destination_order: DdsDestinationOrderQosPolicy,
    pub history: DdsHistoryQosPolicy,
    pub resource_limits: DdsResourceLimitsQosPolicy,
    pub user_data: DdsUserDataQosPolicy,
    pub ownership: DdsOwnershipQosPolicy,
    pub time_based_filter: DdsTimeBasedFilterQosPolicy,
    pub reader_data_lifecycle: DdsReaderDataLifecycleQosPolicy,
    pub representation: DdsDataRepresentationQosPolicy,
    pub type_consistency: DdsTypeConsistencyEnforcementQosPolicy,
}

#[cfg(all(test, target_pointer_width = "64"))]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn policy_sizes() {
        assert_eq!(size_of::<DdsUserDataQosPolicy>(), 8);
        assert_eq!(size_of::<DdsPresentationQosPolicy>(), 8);
        assert_eq!(size_of::<DdsDurabilityServiceQosPolicy>(), 28);
        assert_eq!(size_of::<DdsLivelinessQosPolicy>(), 12);
        assert_eq!(size_of::<DdsReaderDataLifecycleQosPolicy>(), 16);
        assert_eq!(size_of::<DdsTypeConsistencyEnforcementQosPolicy>(), 8);
    }

    #[test]
    fn participant_qos_layout() {
        assert_eq!(offset_of!(DdsDomainParticipantQos, user_data), 0);
        assert_eq!(offset_of!(DdsDomainParticipantQos, entity_factory), 8);
        assert_eq!(size_of::<DdsDomainParticipantQos>(), 16);
    }

    #[test]
    fn publisher_qos_layout() {
        assert_eq!(offset_of!(DdsPublisherQos, presentation), 0);
        assert_eq!(offset_of!(DdsPublisherQos, partition), 8);
        assert_eq!(offset_of!(DdsPublisherQos, group_data), 16);
        assert_eq!(offset_of!(DdsPublisherQos, entity_factory), 24);
        assert_eq!(size_of::<DdsPublisherQos>(), 32);
    }

    #[test]
    fn topic_qos_layout() {
        assert_eq!(offset_of!(DdsTopicQos, topic_data), 0);
        assert_eq!(offset_of!(DdsTopicQos, durability), 8);
        assert_eq!(offset_of!(DdsTopicQos, durability_service), 12);
        assert_eq!(offset_of!(DdsTopicQos, deadline), 40);
        assert_eq!(offset_of!(DdsTopicQos, ownership), 116);
        assert_eq!(offset_of!(DdsTopicQos, representation), 120);
        assert_eq!(size_of::<DdsTopicQos>(), 128);
    }
}
