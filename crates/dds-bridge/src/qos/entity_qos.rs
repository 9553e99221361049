// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-entity QoS aggregates.
//!
//! Each aggregate owns no foreign memory itself; `to_native`, `release` and
//! `outstanding` fan out to the constituent policies in declaration order.

use dds_sys::{
    DdsDataReaderQos, DdsDataWriterQos, DdsDomainParticipantFactoryQos, DdsDomainParticipantQos,
    DdsPublisherQos, DdsSubscriberQos, DdsTopicQos,
};

use super::policy::{
    DataRepresentation, Deadline, DestinationOrder, Durability, DurabilityService, EntityFactory,
    GroupData, History, LatencyBudget, Lifespan, Liveliness, Ownership, OwnershipStrength,
    Partition, Presentation, ReaderDataLifecycle, Reliability, ResourceLimits, TimeBasedFilter,
    TopicData, TransportPriority, TypeConsistencyEnforcement, UserData, WriterDataLifecycle,
};
use crate::convert::NativeConvert;
use crate::memory::AllocationLedger;

macro_rules! composite_qos {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $native:ident {
            $($field:ident: $policy:ty,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name {
            $(pub $field: $policy,)+
        }

        impl NativeConvert for $name {
            type Native = $native;

            fn to_native(&mut self) -> $native {
                $native {
                    $($field: self.$field.to_native(),)+
                }
            }

            fn to_native_in(&self, ledger: &mut AllocationLedger) -> $native {
                $native {
                    $($field: self.$field.to_native_in(ledger),)+
                }
            }

            unsafe fn from_native(&mut self, native: &$native) {
                $(self.$field.from_native(&native.$field);)+
            }

            fn release(&mut self) {
                $(self.$field.release();)+
            }

            fn outstanding(&self) -> usize {
                0 $(+ self.$field.outstanding())+
            }
        }
    };
}

composite_qos! {
    #[derive(Default)]
    pub struct DomainParticipantFactoryQos => DdsDomainParticipantFactoryQos {
        entity_factory: EntityFactory,
    }
}

composite_qos! {
    #[derive(Default)]
    pub struct DomainParticipantQos => DdsDomainParticipantQos {
        user_data: UserData,
        entity_factory: EntityFactory,
    }
}

composite_qos! {
    #[derive(Default)]
    pub struct TopicQos => DdsTopicQos {
        topic_data: TopicData,
        durability: Durability,
        durability_service: DurabilityService,
        deadline: Deadline,
        latency_budget: LatencyBudget,
        liveliness: Liveliness,
        reliability: Reliability,
        destination_order: DestinationOrder,
        history: History,
        resource_limits: ResourceLimits,
        transport_priority: TransportPriority,
        lifespan: Lifespan,
        ownership: Ownership,
        representation: DataRepresentation,
    }
}

composite_qos! {
    #[derive(Default)]
    pub struct PublisherQos => DdsPublisherQos {
        presentation: Presentation,
        partition: Partition,
        group_data: GroupData,
        entity_factory: EntityFactory,
    }
}

composite_qos! {
    #[derive(Default)]
    pub struct SubscriberQos => DdsSubscriberQos {
        presentation: Presentation,
        partition: Partition,
        group_data: GroupData,
        entity_factory: EntityFactory,
    }
}

composite_qos! {
    /// Writers default to reliable delivery; everything else is the policy
    /// default.
    pub struct DataWriterQos => DdsDataWriterQos {
        durability: Durability,
        durability_service: DurabilityService,
        deadline: Deadline,
        latency_budget: LatencyBudget,
        liveliness: Liveliness,
        reliability: Reliability,
        destination_order: DestinationOrder,
        history: History,
        resource_limits: ResourceLimits,
        transport_priority: TransportPriority,
        lifespan: Lifespan,
        user_data: UserData,
        ownership: Ownership,
        ownership_strength: OwnershipStrength,
        writer_data_lifecycle: WriterDataLifecycle,
        representation: DataRepresentation,
    }
}

impl Default for DataWriterQos {
    fn default() -> Self {
        Self {
            durability: Durability::default(),
            durability_service: DurabilityService::default(),
            deadline: Deadline::default(),
            latency_budget: LatencyBudget::default(),
            liveliness: Liveliness::default(),
            reliability: Reliability::reliable(),
            destination_order: DestinationOrder::default(),
            history: History::default(),
            resource_limits: ResourceLimits::default(),
            transport_priority: TransportPriority::default(),
            lifespan: Lifespan::default(),
            user_data: UserData::default(),
            ownership: Ownership::default(),
            ownership_strength: OwnershipStrength::default(),
            writer_data_lifecycle: WriterDataLifecycle::default(),
            representation: DataRepresentation::default(),
        }
    }
}

composite_qos! {
    #[derive(Default)]
    pub struct DataReaderQos => DdsDataReaderQos {
        durability: Durability,
        deadline: Deadline,
        latency_budget: LatencyBudget,
        liveliness: Liveliness,
        reliability: Reliability,
        destination_order: DestinationOrder,
        history: History,
        resource_limits: ResourceLimits,
        user_data: UserData,
        ownership: Ownership,
        time_based_filter: TimeBasedFilter,
        reader_data_lifecycle: ReaderDataLifecycle,
        representation: DataRepresentation,
        type_consistency: TypeConsistencyEnforcement,
    }
}

impl TopicQos {
    /// Seed a writer QoS from this topic (DDS `copy_from_topic_qos`).
    pub fn writer_qos(&self) -> DataWriterQos {
        DataWriterQos {
            durability: self.durability,
            durability_service: self.durability_service,
            deadline: self.deadline,
            latency_budget: self.latency_budget,
            liveliness: self.liveliness,
            reliability: self.reliability,
            destination_order: self.destination_order,
            history: self.history,
            resource_limits: self.resource_limits,
            transport_priority: self.transport_priority,
            lifespan: self.lifespan,
            ownership: self.ownership,
            representation: self.representation.clone(),
            ..DataWriterQos::default()
        }
    }

    /// Seed a reader QoS from this topic (DDS `copy_from_topic_qos`).
    pub fn reader_qos(&self) -> DataReaderQos {
        DataReaderQos {
            durability: self.durability,
            deadline: self.deadline,
            latency_budget: self.latency_budget,
            liveliness: self.liveliness,
            reliability: self.reliability,
            destination_order: self.destination_order,
            history: self.history,
            resource_limits: self.resource_limits,
            ownership: self.ownership,
            representation: self.representation.clone(),
            ..DataReaderQos::default()
        }
    }
}
