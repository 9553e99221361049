// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QoS policy value objects (DDS v1.4 Sec.2.2.3).
//!
//! Policies holding a collection (USER_DATA, TOPIC_DATA, GROUP_DATA,
//! PARTITION, DATA_REPRESENTATION) carry an [`AllocationLedger`] and must be
//! released after each `to_native`. All other policies are plain values whose
//! release is a no-op.

use dds_sys::{
    DdsDataRepresentationQosPolicy, DdsDeadlineQosPolicy, DdsDestinationOrderQosPolicy,
    DdsDurabilityQosPolicy, DdsDurabilityServiceQosPolicy, DdsEntityFactoryQosPolicy,
    DdsGroupDataQosPolicy, DdsHistoryQosPolicy, DdsLatencyBudgetQosPolicy,
    DdsLifespanQosPolicy, DdsLivelinessQosPolicy, DdsOwnershipQosPolicy,
    DdsOwnershipStrengthQosPolicy, DdsPartitionQosPolicy, DdsPresentationQosPolicy,
    DdsReaderDataLifecycleQosPolicy, DdsReliabilityQosPolicy, DdsResourceLimitsQosPolicy,
    DdsSequence, DdsTimeBasedFilterQosPolicy, DdsTopicDataQosPolicy,
    DdsTransportPriorityQosPolicy, DdsTypeConsistencyEnforcementQosPolicy,
    DdsUserDataQosPolicy, DdsWriterDataLifecycleQosPolicy, DDS_LENGTH_UNLIMITED,
};

use crate::convert::{impl_value_eq, native_kind, NativeConvert};
use crate::memory::AllocationLedger;
use crate::sequence;
use crate::time::Duration;

/// Resource value meaning "no limit".
pub const LENGTH_UNLIMITED: i32 = DDS_LENGTH_UNLIMITED;

// =============================================================================
// Kinds
// =============================================================================

native_kind! {
    /// DURABILITY kind.
    pub enum DurabilityKind: i32 {
        Volatile = 0,
        TransientLocal = 1,
        Transient = 2,
        Persistent = 3,
    }
    default Volatile
}

native_kind! {
    /// HISTORY kind.
    pub enum HistoryKind: i32 {
        KeepLast = 0,
        KeepAll = 1,
    }
    default KeepLast
}

native_kind! {
    /// PRESENTATION access scope.
    pub enum PresentationAccessScope: i32 {
        Instance = 0,
        Topic = 1,
        Group = 2,
    }
    default Instance
}

native_kind! {
    pub enum OwnershipKind: i32 {
        Shared = 0,
        Exclusive = 1,
    }
    default Shared
}

native_kind! {
    pub enum LivelinessKind: i32 {
        Automatic = 0,
        ManualByParticipant = 1,
        ManualByTopic = 2,
    }
    default Automatic
}

native_kind! {
    pub enum ReliabilityKind: i32 {
        BestEffort = 0,
        Reliable = 1,
    }
    default BestEffort
}

native_kind! {
    pub enum DestinationOrderKind: i32 {
        ByReceptionTimestamp = 0,
        BySourceTimestamp = 1,
    }
    default ByReceptionTimestamp
}

native_kind! {
    /// XTypes type consistency kind (16-bit on the wire).
    pub enum TypeConsistencyKind: i16 {
        DisallowTypeCoercion = 0,
        AllowTypeCoercion = 1,
    }
    default AllowTypeCoercion
}

// =============================================================================
// Opaque data policies
// =============================================================================

/// Declare a byte-sequence policy (USER_DATA / TOPIC_DATA / GROUP_DATA).
macro_rules! byte_sequence_policy {
    ($(#[$meta:meta])* $name:ident => $native:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        pub struct $name {
            /// Opaque application-defined bytes.
            pub value: Vec<u8>,
            ledger: AllocationLedger,
        }

        impl $name {
            pub fn new(value: impl Into<Vec<u8>>) -> Self {
                Self {
                    value: value.into(),
                    ledger: AllocationLedger::new(),
                }
            }

            pub fn is_empty(&self) -> bool {
                self.value.is_empty()
            }

            pub fn len(&self) -> usize {
                self.value.len()
            }
        }

        impl_value_eq!($name { value });

        impl NativeConvert for $name {
            type Native = $native;

            fn to_native_in(&self, ledger: &mut AllocationLedger) -> $native {
                let ptr = ledger.absorb(sequence::to_native(&self.value));
                $native {
                    value: DdsSequence(ptr),
                }
            }

            unsafe fn from_native(&mut self, native: &$native) {
                self.value = sequence::from_native::<u8>(native.value.0);
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

byte_sequence_policy! {
    /// USER_DATA (Sec.2.2.3.1): opaque data attached to a participant,
    /// writer or reader. Default: empty.
    UserData => DdsUserDataQosPolicy
}

byte_sequence_policy! {
    /// TOPIC_DATA (Sec.2.2.3.2). Default: empty.
    TopicData => DdsTopicDataQosPolicy
}

byte_sequence_policy! {
    /// GROUP_DATA (Sec.2.2.3.3). Default: empty.
    GroupData => DdsGroupDataQosPolicy
}

/// PARTITION (Sec.2.2.3.13): logical partition names. Default: empty.
#[derive(Clone, Debug, Default)]
pub struct Partition {
    pub names: Vec<String>,
    ledger: AllocationLedger,
}

impl Partition {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ledger: AllocationLedger::new(),
        }
    }
}

impl_value_eq!(Partition { names });

impl NativeConvert for Partition {
    type Native = DdsPartitionQosPolicy;

    fn to_native_in(&self, ledger: &mut AllocationLedger) -> DdsPartitionQosPolicy {
        let ptr = ledger.absorb(sequence::strings_to_native(&self.names));
        DdsPartitionQosPolicy {
            name: DdsSequence(ptr),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsPartitionQosPolicy) {
        self.names = sequence::strings_from_native(native.name.0);
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

/// DATA_REPRESENTATION (XTypes 7.6.3.1): accepted/offered representation ids,
/// in preference order. Default: empty (library default).
#[derive(Clone, Debug, Default)]
pub struct DataRepresentation {
    pub value: Vec<i16>,
    ledger: AllocationLedger,
}

impl DataRepresentation {
    pub const XCDR: i16 = 0;
    pub const XML: i16 = 1;
    pub const XCDR2: i16 = 2;

    pub fn new(value: impl Into<Vec<i16>>) -> Self {
        Self {
            value: value.into(),
            ledger: AllocationLedger::new(),
        }
    }
}

impl_value_eq!(DataRepresentation { value });

impl NativeConvert for DataRepresentation {
    type Native = DdsDataRepresentationQosPolicy;

    fn to_native_in(&self, ledger: &mut AllocationLedger) -> DdsDataRepresentationQosPolicy {
        let ptr = ledger.absorb(sequence::to_native(&self.value));
        DdsDataRepresentationQosPolicy {
            value: DdsSequence(ptr),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsDataRepresentationQosPolicy) {
        self.value = sequence::from_native::<i16>(native.value.0);
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

// =============================================================================
// Fixed policies
// =============================================================================

/// DURABILITY (Sec.2.2.3.4). Default: volatile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Durability {
    pub kind: DurabilityKind,
}

impl NativeConvert for Durability {
    type Native = DdsDurabilityQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsDurabilityQosPolicy {
        DdsDurabilityQosPolicy {
            kind: self.kind.to_raw(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsDurabilityQosPolicy) {
        self.kind = DurabilityKind::from_raw(native.kind);
    }
}

/// DURABILITY_SERVICE (Sec.2.2.3.5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DurabilityService {
    pub service_cleanup_delay: Duration,
    pub history_kind: HistoryKind,
    pub history_depth: i32,
    pub max_samples: i32,
    pub max_instances: i32,
    pub max_samples_per_instance: i32,
}

impl Default for DurabilityService {
    fn default() -> Self {
        Self {
            service_cleanup_delay: Duration::ZERO,
            history_kind: HistoryKind::KeepLast,
            history_depth: 1,
            max_samples: LENGTH_UNLIMITED,
            max_instances: LENGTH_UNLIMITED,
            max_samples_per_instance: LENGTH_UNLIMITED,
        }
    }
}

impl NativeConvert for DurabilityService {
    type Native = DdsDurabilityServiceQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsDurabilityServiceQosPolicy {
        DdsDurabilityServiceQosPolicy {
            service_cleanup_delay: self.service_cleanup_delay.into(),
            history_kind: self.history_kind.to_raw(),
            history_depth: self.history_depth,
            max_samples: self.max_samples,
            max_instances: self.max_instances,
            max_samples_per_instance: self.max_samples_per_instance,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsDurabilityServiceQosPolicy) {
        self.service_cleanup_delay = native.service_cleanup_delay.into();
        self.history_kind = HistoryKind::from_raw(native.history_kind);
        self.history_depth = native.history_depth;
        self.max_samples = native.max_samples;
        self.max_instances = native.max_instances;
        self.max_samples_per_instance = native.max_samples_per_instance;
    }
}

/// PRESENTATION (Sec.2.2.3.6). Default: instance scope, no coherent or
/// ordered access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Presentation {
    pub access_scope: PresentationAccessScope,
    pub coherent_access: bool,
    pub ordered_access: bool,
}

impl NativeConvert for Presentation {
    type Native = DdsPresentationQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsPresentationQosPolicy {
        DdsPresentationQosPolicy {
            access_scope: self.access_scope.to_raw(),
            coherent_access: self.coherent_access,
            ordered_access: self.ordered_access,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsPresentationQosPolicy) {
        self.access_scope = PresentationAccessScope::from_raw(native.access_scope);
        self.coherent_access = native.coherent_access;
        self.ordered_access = native.ordered_access;
    }
}

/// DEADLINE (Sec.2.2.3.7). Default: infinite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Deadline {
    pub period: Duration,
}

impl Default for Deadline {
    fn default() -> Self {
        Self {
            period: Duration::INFINITE,
        }
    }
}

impl NativeConvert for Deadline {
    type Native = DdsDeadlineQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsDeadlineQosPolicy {
        DdsDeadlineQosPolicy {
            period: self.period.into(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsDeadlineQosPolicy) {
        self.period = native.period.into();
    }
}

/// LATENCY_BUDGET (Sec.2.2.3.8). Default: zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LatencyBudget {
    pub duration: Duration,
}

impl NativeConvert for LatencyBudget {
    type Native = DdsLatencyBudgetQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsLatencyBudgetQosPolicy {
        DdsLatencyBudgetQosPolicy {
            duration: self.duration.into(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsLatencyBudgetQosPolicy) {
        self.duration = native.duration.into();
    }
}

/// OWNERSHIP (Sec.2.2.3.9). Default: shared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ownership {
    pub kind: OwnershipKind,
}

impl NativeConvert for Ownership {
    type Native = DdsOwnershipQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsOwnershipQosPolicy {
        DdsOwnershipQosPolicy {
            kind: self.kind.to_raw(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsOwnershipQosPolicy) {
        self.kind = OwnershipKind::from_raw(native.kind);
    }
}

/// OWNERSHIP_STRENGTH (Sec.2.2.3.10). Default: 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OwnershipStrength {
    pub value: i32,
}

impl NativeConvert for OwnershipStrength {
    type Native = DdsOwnershipStrengthQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsOwnershipStrengthQosPolicy {
        DdsOwnershipStrengthQosPolicy { value: self.value }
    }

    unsafe fn from_native(&mut self, native: &DdsOwnershipStrengthQosPolicy) {
        self.value = native.value;
    }
}

/// LIVELINESS (Sec.2.2.3.11). Default: automatic, infinite lease.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Liveliness {
    pub kind: LivelinessKind,
    pub lease_duration: Duration,
}

impl Default for Liveliness {
    fn default() -> Self {
        Self {
            kind: LivelinessKind::Automatic,
            lease_duration: Duration::INFINITE,
        }
    }
}

impl NativeConvert for Liveliness {
    type Native = DdsLivelinessQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsLivelinessQosPolicy {
        DdsLivelinessQosPolicy {
            kind: self.kind.to_raw(),
            lease_duration: self.lease_duration.into(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsLivelinessQosPolicy) {
        self.kind = LivelinessKind::from_raw(native.kind);
        self.lease_duration = native.lease_duration.into();
    }
}

/// TIME_BASED_FILTER (Sec.2.2.3.12). Default: zero separation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimeBasedFilter {
    pub minimum_separation: Duration,
}

impl NativeConvert for TimeBasedFilter {
    type Native = DdsTimeBasedFilterQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsTimeBasedFilterQosPolicy {
        DdsTimeBasedFilterQosPolicy {
            minimum_separation: self.minimum_separation.into(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsTimeBasedFilterQosPolicy) {
        self.minimum_separation = native.minimum_separation.into();
    }
}

/// RELIABILITY (Sec.2.2.3.14). Default: best effort, 100 ms blocking time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Reliability {
    pub kind: ReliabilityKind,
    pub max_blocking_time: Duration,
}

impl Reliability {
    /// Writer default: reliable, 100 ms blocking time.
    pub fn reliable() -> Self {
        Self {
            kind: ReliabilityKind::Reliable,
            ..Self::default()
        }
    }
}

impl Default for Reliability {
    fn default() -> Self {
        Self {
            kind: ReliabilityKind::BestEffort,
            max_blocking_time: Duration::from_millis(100),
        }
    }
}

impl NativeConvert for Reliability {
    type Native = DdsReliabilityQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsReliabilityQosPolicy {
        DdsReliabilityQosPolicy {
            kind: self.kind.to_raw(),
            max_blocking_time: self.max_blocking_time.into(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsReliabilityQosPolicy) {
        self.kind = ReliabilityKind::from_raw(native.kind);
        self.max_blocking_time = native.max_blocking_time.into();
    }
}

/// DESTINATION_ORDER (Sec.2.2.3.17). Default: by reception timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DestinationOrder {
    pub kind: DestinationOrderKind,
}

impl NativeConvert for DestinationOrder {
    type Native = DdsDestinationOrderQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsDestinationOrderQosPolicy {
        DdsDestinationOrderQosPolicy {
            kind: self.kind.to_raw(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsDestinationOrderQosPolicy) {
        self.kind = DestinationOrderKind::from_raw(native.kind);
    }
}

/// HISTORY (Sec.2.2.3.18). Default: keep last 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct History {
    pub kind: HistoryKind,
    pub depth: i32,
}

impl History {
    pub fn keep_last(depth: i32) -> Self {
        Self {
            kind: HistoryKind::KeepLast,
            depth,
        }
    }

    pub fn keep_all() -> Self {
        Self {
            kind: HistoryKind::KeepAll,
            depth: 1,
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::keep_last(1)
    }
}

impl NativeConvert for History {
    type Native = DdsHistoryQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsHistoryQosPolicy {
        DdsHistoryQosPolicy {
            kind: self.kind.to_raw(),
            depth: self.depth,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsHistoryQosPolicy) {
        self.kind = HistoryKind::from_raw(native.kind);
        self.depth = native.depth;
    }
}

/// RESOURCE_LIMITS (Sec.2.2.3.19). Default: unlimited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceLimits {
    pub max_samples: i32,
    pub max_instances: i32,
    pub max_samples_per_instance: i32,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_samples: LENGTH_UNLIMITED,
            max_instances: LENGTH_UNLIMITED,
            max_samples_per_instance: LENGTH_UNLIMITED,
        }
    }
}

impl NativeConvert for ResourceLimits {
    type Native = DdsResourceLimitsQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsResourceLimitsQosPolicy {
        DdsResourceLimitsQosPolicy {
            max_samples: self.max_samples,
            max_instances: self.max_instances,
            max_samples_per_instance: self.max_samples_per_instance,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsResourceLimitsQosPolicy) {
        self.max_samples = native.max_samples;
        self.max_instances = native.max_instances;
        self.max_samples_per_instance = native.max_samples_per_instance;
    }
}

/// TRANSPORT_PRIORITY (Sec.2.2.3.15). Default: 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TransportPriority {
    pub value: i32,
}

impl NativeConvert for TransportPriority {
    type Native = DdsTransportPriorityQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsTransportPriorityQosPolicy {
        DdsTransportPriorityQosPolicy { value: self.value }
    }

    unsafe fn from_native(&mut self, native: &DdsTransportPriorityQosPolicy) {
        self.value = native.value;
    }
}

/// LIFESPAN (Sec.2.2.3.16). Default: infinite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lifespan {
    pub duration: Duration,
}

impl Default for Lifespan {
    fn default() -> Self {
        Self {
            duration: Duration::INFINITE,
        }
    }
}

impl NativeConvert for Lifespan {
    type Native = DdsLifespanQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsLifespanQosPolicy {
        DdsLifespanQosPolicy {
            duration: self.duration.into(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsLifespanQosPolicy) {
        self.duration = native.duration.into();
    }
}

/// WRITER_DATA_LIFECYCLE (Sec.2.2.3.21). Default: autodispose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WriterDataLifecycle {
    pub autodispose_unregistered_instances: bool,
}

impl Default for WriterDataLifecycle {
    fn default() -> Self {
        Self {
            autodispose_unregistered_instances: true,
        }
    }
}

impl NativeConvert for WriterDataLifecycle {
    type Native = DdsWriterDataLifecycleQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsWriterDataLifecycleQosPolicy {
        DdsWriterDataLifecycleQosPolicy {
            autodispose_unregistered_instances: self.autodispose_unregistered_instances,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsWriterDataLifecycleQosPolicy) {
        self.autodispose_unregistered_instances = native.autodispose_unregistered_instances;
    }
}

/// READER_DATA_LIFECYCLE (Sec.2.2.3.22). Default: both delays infinite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReaderDataLifecycle {
    pub autopurge_nowriter_samples_delay: Duration,
    pub autopurge_disposed_samples_delay: Duration,
}

impl Default for ReaderDataLifecycle {
    fn default() -> Self {
        Self {
            autopurge_nowriter_samples_delay: Duration::INFINITE,
            autopurge_disposed_samples_delay: Duration::INFINITE,
        }
    }
}

impl NativeConvert for ReaderDataLifecycle {
    type Native = DdsReaderDataLifecycleQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsReaderDataLifecycleQosPolicy {
        DdsReaderDataLifecycleQosPolicy {
            autopurge_nowriter_samples_delay: self.autopurge_nowriter_samples_delay.into(),
            autopurge_disposed_samples_delay: self.autopurge_disposed_samples_delay.into(),
        }
    }

    unsafe fn from_native(&mut self, native: &DdsReaderDataLifecycleQosPolicy) {
        self.autopurge_nowriter_samples_delay = native.autopurge_nowriter_samples_delay.into();
        self.autopurge_disposed_samples_delay = native.autopurge_disposed_samples_delay.into();
    }
}

/// ENTITY_FACTORY (Sec.2.2.3.20). Default: auto-enable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityFactory {
    pub autoenable_created_entities: bool,
}

impl EntityFactory {
    pub fn manual_enable() -> Self {
        Self {
            autoenable_created_entities: false,
        }
    }
}

impl Default for EntityFactory {
    fn default() -> Self {
        Self {
            autoenable_created_entities: true,
        }
    }
}

impl NativeConvert for EntityFactory {
    type Native = DdsEntityFactoryQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsEntityFactoryQosPolicy {
        DdsEntityFactoryQosPolicy {
            autoenable_created_entities: self.autoenable_created_entities,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsEntityFactoryQosPolicy) {
        self.autoenable_created_entities = native.autoenable_created_entities;
    }
}

/// TYPE_CONSISTENCY_ENFORCEMENT (XTypes 7.6.3.4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeConsistencyEnforcement {
    pub kind: TypeConsistencyKind,
    pub ignore_sequence_bounds: bool,
    pub ignore_string_bounds: bool,
    pub ignore_member_names: bool,
    pub prevent_type_widening: bool,
    pub force_type_validation: bool,
}

impl NativeConvert for TypeConsistencyEnforcement {
    type Native = DdsTypeConsistencyEnforcementQosPolicy;

    fn to_native_in(&self, _ledger: &mut AllocationLedger) -> DdsTypeConsistencyEnforcementQosPolicy {
        DdsTypeConsistencyEnforcementQosPolicy {
            kind: self.kind.to_raw(),
            ignore_sequence_bounds: self.ignore_sequence_bounds,
            ignore_string_bounds: self.ignore_string_bounds,
            ignore_member_names: self.ignore_member_names,
            prevent_type_widening: self.prevent_type_widening,
            force_type_validation: self.force_type_validation,
        }
    }

    unsafe fn from_native(&mut self, native: &DdsTypeConsistencyEnforcementQosPolicy) {
        self.kind = TypeConsistencyKind::from_raw(native.kind);
        self.ignore_sequence_bounds = native.ignore_sequence_bounds;
        self.ignore_string_bounds = native.ignore_string_bounds;
        self.ignore_member_names = native.ignore_member_names;
        self.prevent_type_widening = native.prevent_type_widening;
        self.force_type_validation = native.force_type_validation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: NativeConvert + Default>(value: &mut T) -> T {
        let native = value.to_native();
        let mut back = T::default();
        unsafe { back.from_native(&native) };
        value.release();
        back
    }

    #[test]
    fn user_data_roundtrip() {
        let mut policy = UserData::new(b"version=1.0.0".to_vec());
        assert_eq!(roundtrip(&mut policy), policy);
        assert_eq!(policy.outstanding(), 0);
    }

    #[test]
    fn empty_partition_roundtrip() {
        let mut policy = Partition::default();
        let native = policy.to_native();
        assert!(!native.name.is_null());
        assert_eq!(policy.outstanding(), 1);

        let mut back = Partition::new(["stale"]);
        unsafe { back.from_native(&native) };
        assert!(back.names.is_empty());
        policy.release();
    }

    #[test]
    fn partition_tracks_every_string() {
        let mut policy = Partition::new(["sensors", "actuators/*"]);
        let _ = policy.to_native();
        assert_eq!(policy.outstanding(), 3);
        policy.release();
        assert_eq!(policy.outstanding(), 0);
    }

    #[test]
    fn sequence_order_matters_for_equality() {
        let a = DataRepresentation::new(vec![1, 2]);
        let b = DataRepresentation::new(vec![2, 1]);
        assert_ne!(a, b);
        assert_eq!(a, DataRepresentation::new(vec![1, 2]));
    }

    #[test]
    fn equality_ignores_ledger() {
        let mut a = GroupData::new(b"g".to_vec());
        let b = a.clone();
        let _ = a.to_native();
        assert_eq!(a, b);
        a.release();
    }

    #[test]
    fn unknown_kind_falls_back_to_default() {
        assert_eq!(DurabilityKind::from_raw(99), DurabilityKind::Volatile);
        assert_eq!(ReliabilityKind::from_raw(1), ReliabilityKind::Reliable);
        assert_eq!(TypeConsistencyKind::from_raw(-4), TypeConsistencyKind::AllowTypeCoercion);
    }

    #[test]
    fn fixed_policies_roundtrip() {
        let mut reliability = Reliability {
            kind: ReliabilityKind::Reliable,
            max_blocking_time: Duration::new(2, 5),
        };
        assert_eq!(roundtrip(&mut reliability), reliability);

        let mut service = DurabilityService {
            service_cleanup_delay: Duration::new(3, 0),
            history_kind: HistoryKind::KeepAll,
            history_depth: 10,
            max_samples: 100,
            max_instances: 5,
            max_samples_per_instance: 20,
        };
        assert_eq!(roundtrip(&mut service), service);

        let mut presentation = Presentation {
            access_scope: PresentationAccessScope::Group,
            coherent_access: true,
            ordered_access: false,
        };
        assert_eq!(roundtrip(&mut presentation), presentation);
    }

    #[test]
    fn defaults_follow_dds() {
        assert!(Deadline::default().period.is_infinite());
        assert_eq!(History::default(), History::keep_last(1));
        assert_eq!(ResourceLimits::default().max_samples, LENGTH_UNLIMITED);
        assert!(WriterDataLifecycle::default().autodispose_unregistered_instances);
        assert!(EntityFactory::default().autoenable_created_entities);
        assert_eq!(Reliability::default().kind, ReliabilityKind::BestEffort);
        assert_eq!(Reliability::reliable().max_blocking_time, Duration::from_millis(100));
    }
}
