// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-process stand-in for the native library.
//!
//! [`Loopback`] implements [`NativeApi`] without any networking. It keeps the
//! native ownership contracts so the boundary layer behaves the same against
//! it as against the real library:
//!
//! - QoS arguments are deep-copied during the call; the caller may free its
//!   buffers as soon as the call returns.
//! - Getters fill out-parameters with buffers the loopback owns ("lent"
//!   memory). A lent buffer lives until the next call of the same getter on
//!   the same handle, or until the handle is deleted.
//! - Entity enable state, containment and the basic QoS consistency rules
//!   (history depth vs. resource limits, immutable durability and
//!   presentation once enabled) are enforced with the native result codes.
//!
//! Discovery does not exist here: statuses only change through the
//! `inject_*` helpers.

use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::fmt;
use std::os::raw::{c_char, c_void};
use std::ptr;

use dds_sys::{
    DdsDataReaderQos, DdsDataWriterQos, DdsDomainParticipantFactoryQos, DdsDomainParticipantQos,
    DdsDuration, DdsInconsistentTopicStatus, DdsInstanceHandle, DdsLivelinessChangedStatus,
    DdsLivelinessLostStatus, DdsOfferedDeadlineMissedStatus, DdsOfferedIncompatibleQosStatus,
    DdsPublicationMatchedStatus, DdsPublisherQos, DdsRequestedDeadlineMissedStatus,
    DdsRequestedIncompatibleQosStatus, DdsReturnCode, DdsSampleLostStatus,
    DdsSampleRejectedStatus, DdsSequence, DdsSubscriberQos, DdsSubscriptionMatchedStatus,
    DdsTopicQos, Handle, DDS_HANDLE_NIL, DDS_INCONSISTENT_TOPIC_STATUS,
    DDS_LIVELINESS_CHANGED_STATUS, DDS_LIVELINESS_LOST_STATUS,
    DDS_OFFERED_DEADLINE_MISSED_STATUS, DDS_OFFERED_INCOMPATIBLE_QOS_STATUS,
    DDS_PUBLICATION_MATCHED_STATUS, DDS_REQUESTED_DEADLINE_MISSED_STATUS,
    DDS_REQUESTED_INCOMPATIBLE_QOS_STATUS, DDS_RETCODE_BAD_PARAMETER,
    DDS_RETCODE_IMMUTABLE_POLICY, DDS_RETCODE_INCONSISTENT_POLICY, DDS_RETCODE_NOT_ENABLED,
    DDS_RETCODE_OK, DDS_RETCODE_PRECONDITION_NOT_MET, DDS_SAMPLE_LOST_STATUS,
    DDS_SAMPLE_REJECTED_STATUS, DDS_SUBSCRIPTION_MATCHED_STATUS,
};
use parking_lot::Mutex;

use crate::convert::{NativeConvert, Release};
use crate::memory::AllocationLedger;
use crate::native::NativeApi;
use crate::qos::{
    DataReaderQos, DataWriterQos, DomainParticipantFactoryQos, DomainParticipantQos,
    EntityFactory, History, HistoryKind, PublisherQos, ResourceLimits, SubscriberQos, TopicQos,
    LENGTH_UNLIMITED,
};
use crate::sequence;
use crate::status::{
    InconsistentTopicStatus, LivelinessChangedStatus, LivelinessLostStatus,
    OfferedDeadlineMissedStatus, OfferedIncompatibleQosStatus, PublicationMatchedStatus,
    RequestedDeadlineMissedStatus, RequestedIncompatibleQosStatus, SampleLostStatus,
    SampleRejectedStatus, SubscriptionMatchedStatus,
};

/// Highest domain id the loopback accepts.
pub const MAX_DOMAIN_ID: i32 = 232;

/// Statuses enabled on a freshly created status condition.
const ALL_STATUSES: u32 = u32::MAX;

const HANDLE_BASE: usize = 0x1000;
const HANDLE_STRIDE: usize = 0x10;

/// Getter whose lent buffers are tracked separately per handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Slot {
    Qos,
    IncompatibleQos,
    QueryParameters,
}

/// Memory lent to a caller through an out-parameter.
enum Lent {
    Value(Box<dyn Release>),
    Buffers(AllocationLedger),
}

impl Lent {
    fn release(&mut self) {
        match self {
            Lent::Value(value) => value.release_now(),
            Lent::Buffers(ledger) => ledger.release(),
        }
    }
}

struct Query {
    expression: CString,
    parameters: Vec<String>,
}

struct WriterState {
    topic: Handle,
    qos: DataWriterQos,
    publication_matched: PublicationMatchedStatus,
    offered_deadline_missed: OfferedDeadlineMissedStatus,
    offered_incompatible_qos: OfferedIncompatibleQosStatus,
    liveliness_lost: LivelinessLostStatus,
}

struct ReaderState {
    topic: Handle,
    qos: DataReaderQos,
    subscription_matched: SubscriptionMatchedStatus,
    requested_deadline_missed: RequestedDeadlineMissedStatus,
    requested_incompatible_qos: RequestedIncompatibleQosStatus,
    sample_lost: SampleLostStatus,
    sample_rejected: SampleRejectedStatus,
    liveliness_changed: LivelinessChangedStatus,
}

enum Kind {
    Participant {
        domain_id: i32,
        qos: DomainParticipantQos,
    },
    Topic {
        name: CString,
        type_name: CString,
        qos: TopicQos,
        inconsistent: InconsistentTopicStatus,
    },
    Publisher {
        qos: PublisherQos,
    },
    Subscriber {
        qos: SubscriberQos,
    },
    Writer(Box<WriterState>),
    Reader(Box<ReaderState>),
    StatusCondition {
        enabled_statuses: u32,
    },
    GuardCondition {
        trigger: bool,
    },
    ReadCondition {
        sample_states: u32,
        view_states: u32,
        instance_states: u32,
        query: Option<Query>,
    },
}

impl Kind {
    fn is_entity(&self) -> bool {
        !matches!(
            self,
            Kind::StatusCondition { .. } | Kind::GuardCondition { .. } | Kind::ReadCondition { .. }
        )
    }
}

struct Object {
    parent: Handle,
    enabled: bool,
    instance: DdsInstanceHandle,
    changes: u32,
    status_condition: Handle,
    kind: Kind,
}

impl Object {
    fn writer(&mut self) -> Option<&mut WriterState> {
        match &mut self.kind {
            Kind::Writer(state) => Some(state),
            _ => None,
        }
    }

    fn reader(&mut self) -> Option<&mut ReaderState> {
        match &mut self.kind {
            Kind::Reader(state) => Some(state),
            _ => None,
        }
    }

    fn entity_factory(&self) -> Option<EntityFactory> {
        match &self.kind {
            Kind::Participant { qos, .. } => Some(qos.entity_factory),
            Kind::Publisher { qos } => Some(qos.entity_factory),
            Kind::Subscriber { qos } => Some(qos.entity_factory),
            _ => None,
        }
    }
}

#[derive(Default)]
struct State {
    next_id: usize,
    objects: HashMap<Handle, Object>,
    lent: HashMap<(Handle, Slot), Lent>,
    factory_qos: DomainParticipantFactoryQos,
}

impl State {
    fn insert(&mut self, parent: Handle, enabled: bool, kind: Kind) -> Handle {
        self.next_id += 1;
        let addr = HANDLE_BASE + self.next_id * HANDLE_STRIDE;
        let handle = Handle::from_raw(addr as *mut c_void);
        let instance = if kind.is_entity() {
            i32::try_from(self.next_id).unwrap_or(DDS_HANDLE_NIL)
        } else {
            DDS_HANDLE_NIL
        };
        self.objects.insert(
            handle,
            Object {
                parent,
                enabled,
                instance,
                changes: 0,
                status_condition: Handle::NULL,
                kind,
            },
        );
        handle
    }

    /// Whether an entity created under `parent` starts enabled.
    fn autoenable(&self, parent: Handle) -> bool {
        if parent.is_null() {
            return self.factory_qos.entity_factory.autoenable_created_entities;
        }
        match self.objects.get(&parent) {
            Some(obj) => {
                obj.enabled
                    && obj
                        .entity_factory()
                        .is_some_and(|f| f.autoenable_created_entities)
            }
            None => false,
        }
    }

    fn kind(&self, handle: Handle) -> Option<&Kind> {
        self.objects.get(&handle).map(|obj| &obj.kind)
    }

    fn parent(&self, handle: Handle) -> Handle {
        self.objects
            .get(&handle)
            .map_or(Handle::NULL, |obj| obj.parent)
    }

    /// Lend `value` to the caller under `(handle, slot)`, releasing whatever
    /// that slot lent before.
    fn lend(&mut self, handle: Handle, slot: Slot, value: Lent) {
        if let Some(mut previous) = self.lent.insert((handle, slot), value) {
            previous.release();
        }
    }

    fn lend_value<T>(&mut self, handle: Handle, slot: Slot, mut value: T) -> T::Native
    where
        T: NativeConvert + Send + 'static,
    {
        let native = value.to_native();
        self.lend(handle, slot, Lent::Value(Box::new(value)));
        native
    }

    /// Contained objects, status conditions included.
    fn children(&self, handle: Handle) -> Vec<Handle> {
        self.objects
            .iter()
            .filter(|(_, obj)| obj.parent == handle)
            .map(|(h, _)| *h)
            .collect()
    }

    /// Whether `handle` still contains anything deletion would orphan.
    fn has_contained(&self, handle: Handle) -> bool {
        self.objects
            .values()
            .any(|obj| obj.parent == handle && !matches!(obj.kind, Kind::StatusCondition { .. }))
    }

    fn remove_tree(&mut self, handle: Handle) {
        for child in self.children(handle) {
            self.remove_tree(child);
        }
        self.objects.remove(&handle);
        let slots: Vec<_> = self
            .lent
            .keys()
            .filter(|(h, _)| *h == handle)
            .copied()
            .collect();
        for key in slots {
            if let Some(mut lent) = self.lent.remove(&key) {
                lent.release();
            }
        }
    }

    fn remove_contained(&mut self, handle: Handle) {
        for child in self.children(handle) {
            if !matches!(self.kind(child), Some(Kind::StatusCondition { .. })) {
                self.remove_tree(child);
            }
        }
    }

    fn topic_users(&self, topic: Handle) -> bool {
        self.objects.values().any(|obj| match &obj.kind {
            Kind::Writer(w) => w.topic == topic,
            Kind::Reader(r) => r.topic == topic,
            _ => false,
        })
    }

    fn topic_named(&self, participant: Handle, name: &CStr) -> Handle {
        self.objects
            .iter()
            .filter(|(_, obj)| obj.parent == participant)
            .filter(|(_, obj)| matches!(&obj.kind, Kind::Topic { name: n, .. } if n.as_c_str() == name))
            .map(|(h, _)| *h)
            .min_by_key(|h| h.addr())
            .unwrap_or(Handle::NULL)
    }

    fn topic_name_of(&self, topic: Handle) -> Option<&CStr> {
        match self.kind(topic) {
            Some(Kind::Topic { name, .. }) => Some(name.as_c_str()),
            _ => None,
        }
    }

    /// Topic usable by an endpoint created under `group` (same participant).
    fn endpoint_topic_ok(&self, group: Handle, topic: Handle) -> bool {
        matches!(self.kind(topic), Some(Kind::Topic { .. })) && self.parent(topic) == self.parent(group)
    }

    fn release_all(&mut self) {
        for (_, mut lent) in self.lent.drain() {
            lent.release();
        }
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.release_all();
    }
}

fn history_consistent(history: &History, limits: &ResourceLimits) -> bool {
    history.kind != HistoryKind::KeepLast
        || limits.max_samples_per_instance == LENGTH_UNLIMITED
        || history.depth <= limits.max_samples_per_instance
}

/// Copy a native QoS layout into a managed value.
///
/// # Safety
/// Sequence pointers inside `native` must be null or valid blocks.
unsafe fn read_qos<T: NativeConvert + Default>(native: &T::Native) -> T {
    let mut value = T::default();
    value.from_native(native);
    value
}

/// In-process implementation of [`NativeApi`].
#[derive(Default)]
pub struct Loopback {
    state: Mutex<State>,
}

impl Loopback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live native objects (entities and conditions).
    pub fn object_count(&self) -> usize {
        self.state.lock().objects.len()
    }

    /// Out-parameter buffers currently lent to callers.
    pub fn lent_count(&self) -> usize {
        self.state.lock().lent.len()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.state.lock().objects.contains_key(&handle)
    }

    /// Raise status bits on an entity. Returns false for unknown handles.
    pub fn set_status_changes(&self, entity: Handle, mask: u32) -> bool {
        let mut state = self.state.lock();
        match state.objects.get_mut(&entity) {
            Some(obj) if obj.kind.is_entity() => {
                obj.changes |= mask;
                true
            }
            _ => false,
        }
    }

    pub fn inject_publication_matched(
        &self,
        writer: Handle,
        status: PublicationMatchedStatus,
    ) -> bool {
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&writer) else {
            return false;
        };
        let Some(w) = obj.writer() else {
            return false;
        };
        w.publication_matched = status;
        obj.changes |= DDS_PUBLICATION_MATCHED_STATUS;
        true
    }

    pub fn inject_subscription_matched(
        &self,
        reader: Handle,
        status: SubscriptionMatchedStatus,
    ) -> bool {
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&reader) else {
            return false;
        };
        let Some(r) = obj.reader() else {
            return false;
        };
        r.subscription_matched = status;
        obj.changes |= DDS_SUBSCRIPTION_MATCHED_STATUS;
        true
    }

    pub fn inject_offered_incompatible_qos(
        &self,
        writer: Handle,
        status: OfferedIncompatibleQosStatus,
    ) -> bool {
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&writer) else {
            return false;
        };
        let Some(w) = obj.writer() else {
            return false;
        };
        w.offered_incompatible_qos = status;
        obj.changes |= DDS_OFFERED_INCOMPATIBLE_QOS_STATUS;
        true
    }

    pub fn inject_requested_incompatible_qos(
        &self,
        reader: Handle,
        status: RequestedIncompatibleQosStatus,
    ) -> bool {
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&reader) else {
            return false;
        };
        let Some(r) = obj.reader() else {
            return false;
        };
        r.requested_incompatible_qos = status;
        obj.changes |= DDS_REQUESTED_INCOMPATIBLE_QOS_STATUS;
        true
    }

    pub fn inject_sample_rejected(&self, reader: Handle, status: SampleRejectedStatus) -> bool {
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&reader) else {
            return false;
        };
        let Some(r) = obj.reader() else {
            return false;
        };
        r.sample_rejected = status;
        obj.changes |= DDS_SAMPLE_REJECTED_STATUS;
        true
    }
}

impl fmt::Debug for Loopback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Loopback")
            .field("objects", &state.objects.len())
            .field("lent", &state.lent.len())
            .finish()
    }
}

/// Read a plain status out of a writer or reader and reset its change fields.
macro_rules! take_status {
    ($self:ident, $handle:ident, $out:ident, $role:ident . $field:ident, $mask:expr, [$($reset:ident),+]) => {{
        let mut state = $self.state.lock();
        let Some(obj) = state.objects.get_mut(&$handle) else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        let Some(endpoint) = obj.$role() else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        *$out = endpoint.$field.to_native();
        $(endpoint.$field.$reset = 0;)+
        obj.changes &= !$mask;
        DDS_RETCODE_OK
    }};
}

/// Same as `take_status!` for the incompatible-QoS statuses, whose policy
/// list is lent to the caller.
macro_rules! take_incompatible_status {
    ($self:ident, $handle:ident, $out:ident, $role:ident . $field:ident, $mask:expr) => {{
        let mut state = $self.state.lock();
        let Some(obj) = state.objects.get_mut(&$handle) else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        let Some(endpoint) = obj.$role() else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        let snapshot = endpoint.$field.clone();
        endpoint.$field.total_count_change = 0;
        obj.changes &= !$mask;
        *$out = state.lend_value($handle, Slot::IncompatibleQos, snapshot);
        DDS_RETCODE_OK
    }};
}

impl NativeApi for Loopback {
    unsafe fn factory_get_qos(&self, qos: &mut DdsDomainParticipantFactoryQos) -> DdsReturnCode {
        let mut state = self.state.lock();
        let copy = state.factory_qos.clone();
        *qos = state.lend_value(Handle::NULL, Slot::Qos, copy);
        DDS_RETCODE_OK
    }

    unsafe fn factory_set_qos(&self, qos: &DdsDomainParticipantFactoryQos) -> DdsReturnCode {
        self.state.lock().factory_qos = read_qos(qos);
        DDS_RETCODE_OK
    }

    unsafe fn create_participant(&self, domain_id: i32, qos: &DdsDomainParticipantQos) -> Handle {
        if !(0..=MAX_DOMAIN_ID).contains(&domain_id) {
            log::debug!("loopback: domain id {} out of range", domain_id);
            return Handle::NULL;
        }
        let qos: DomainParticipantQos = read_qos(qos);
        let mut state = self.state.lock();
        let enabled = state.autoenable(Handle::NULL);
        state.insert(Handle::NULL, enabled, Kind::Participant { domain_id, qos })
    }

    unsafe fn delete_participant(&self, participant: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        match state.kind(participant) {
            Some(Kind::Participant { .. }) => {}
            _ => return DDS_RETCODE_BAD_PARAMETER,
        }
        if state.has_contained(participant) {
            return DDS_RETCODE_PRECONDITION_NOT_MET;
        }
        state.remove_tree(participant);
        DDS_RETCODE_OK
    }

    unsafe fn lookup_participant(&self, domain_id: i32) -> Handle {
        let state = self.state.lock();
        state
            .objects
            .iter()
            .filter(|(_, obj)| matches!(obj.kind, Kind::Participant { domain_id: d, .. } if d == domain_id))
            .map(|(h, _)| *h)
            .min_by_key(|h| h.addr())
            .unwrap_or(Handle::NULL)
    }

    unsafe fn create_topic(
        &self,
        participant: Handle,
        topic_name: &CStr,
        type_name: &CStr,
        qos: &DdsTopicQos,
    ) -> Handle {
        if topic_name.to_bytes().is_empty() || type_name.to_bytes().is_empty() {
            return Handle::NULL;
        }
        let qos: TopicQos = read_qos(qos);
        if !history_consistent(&qos.history, &qos.resource_limits) {
            return Handle::NULL;
        }
        let mut state = self.state.lock();
        if !matches!(state.kind(participant), Some(Kind::Participant { .. })) {
            return Handle::NULL;
        }
        if !state.topic_named(participant, topic_name).is_null() {
            log::debug!("loopback: topic {:?} already exists", topic_name);
            return Handle::NULL;
        }
        let enabled = state.autoenable(participant);
        state.insert(
            participant,
            enabled,
            Kind::Topic {
                name: topic_name.to_owned(),
                type_name: type_name.to_owned(),
                qos,
                inconsistent: InconsistentTopicStatus::default(),
            },
        )
    }

    unsafe fn delete_topic(&self, participant: Handle, topic: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(topic), Some(Kind::Topic { .. })) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        if state.parent(topic) != participant || state.topic_users(topic) {
            return DDS_RETCODE_PRECONDITION_NOT_MET;
        }
        state.remove_tree(topic);
        DDS_RETCODE_OK
    }

    unsafe fn find_topic(
        &self,
        participant: Handle,
        topic_name: &CStr,
        _timeout: DdsDuration,
    ) -> Handle {
        // Nothing is ever discovered remotely, so waiting cannot help.
        self.state.lock().topic_named(participant, topic_name)
    }

    unsafe fn lookup_topic_description(&self, participant: Handle, name: &CStr) -> Handle {
        self.state.lock().topic_named(participant, name)
    }

    unsafe fn create_publisher(&self, participant: Handle, qos: &DdsPublisherQos) -> Handle {
        let qos: PublisherQos = read_qos(qos);
        let mut state = self.state.lock();
        if !matches!(state.kind(participant), Some(Kind::Participant { .. })) {
            return Handle::NULL;
        }
        let enabled = state.autoenable(participant);
        state.insert(participant, enabled, Kind::Publisher { qos })
    }

    unsafe fn delete_publisher(&self, participant: Handle, publisher: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(publisher), Some(Kind::Publisher { .. })) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        if state.parent(publisher) != participant || state.has_contained(publisher) {
            return DDS_RETCODE_PRECONDITION_NOT_MET;
        }
        state.remove_tree(publisher);
        DDS_RETCODE_OK
    }

    unsafe fn create_subscriber(&self, participant: Handle, qos: &DdsSubscriberQos) -> Handle {
        let qos: SubscriberQos = read_qos(qos);
        let mut state = self.state.lock();
        if !matches!(state.kind(participant), Some(Kind::Participant { .. })) {
            return Handle::NULL;
        }
        let enabled = state.autoenable(participant);
        state.insert(participant, enabled, Kind::Subscriber { qos })
    }

    unsafe fn delete_subscriber(&self, participant: Handle, subscriber: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(subscriber), Some(Kind::Subscriber { .. })) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        if state.parent(subscriber) != participant || state.has_contained(subscriber) {
            return DDS_RETCODE_PRECONDITION_NOT_MET;
        }
        state.remove_tree(subscriber);
        DDS_RETCODE_OK
    }

    unsafe fn participant_delete_contained_entities(&self, participant: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(participant), Some(Kind::Participant { .. })) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        state.remove_contained(participant);
        DDS_RETCODE_OK
    }

    unsafe fn participant_domain_id(&self, participant: Handle) -> i32 {
        match self.state.lock().kind(participant) {
            Some(Kind::Participant { domain_id, .. }) => *domain_id,
            _ => -1,
        }
    }

    unsafe fn participant_get_qos(
        &self,
        participant: Handle,
        qos: &mut DdsDomainParticipantQos,
    ) -> DdsReturnCode {
        let mut state = self.state.lock();
        let copy = match state.kind(participant) {
            Some(Kind::Participant { qos, .. }) => qos.clone(),
            _ => return DDS_RETCODE_BAD_PARAMETER,
        };
        *qos = state.lend_value(participant, Slot::Qos, copy);
        DDS_RETCODE_OK
    }

    unsafe fn participant_set_qos(
        &self,
        participant: Handle,
        qos: &DdsDomainParticipantQos,
    ) -> DdsReturnCode {
        let value: DomainParticipantQos = read_qos(qos);
        let mut state = self.state.lock();
        match state.objects.get_mut(&participant).map(|obj| &mut obj.kind) {
            Some(Kind::Participant { qos, .. }) => {
                *qos = value;
                DDS_RETCODE_OK
            }
            _ => DDS_RETCODE_BAD_PARAMETER,
        }
    }

    unsafe fn topic_get_qos(&self, topic: Handle, qos: &mut DdsTopicQos) -> DdsReturnCode {
        let mut state = self.state.lock();
        let copy = match state.kind(topic) {
            Some(Kind::Topic { qos, .. }) => qos.clone(),
            _ => return DDS_RETCODE_BAD_PARAMETER,
        };
        *qos = state.lend_value(topic, Slot::Qos, copy);
        DDS_RETCODE_OK
    }

    unsafe fn topic_set_qos(&self, topic: Handle, qos: &DdsTopicQos) -> DdsReturnCode {
        let value: TopicQos = read_qos(qos);
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&topic) else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        let enabled = obj.enabled;
        let Kind::Topic { qos, .. } = &mut obj.kind else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        if !history_consistent(&value.history, &value.resource_limits) {
            return DDS_RETCODE_INCONSISTENT_POLICY;
        }
        if enabled && value.durability != qos.durability {
            return DDS_RETCODE_IMMUTABLE_POLICY;
        }
        *qos = value;
        DDS_RETCODE_OK
    }

    unsafe fn topic_participant(&self, topic: Handle) -> Handle {
        let state = self.state.lock();
        match state.kind(topic) {
            Some(Kind::Topic { .. }) => state.parent(topic),
            _ => Handle::NULL,
        }
    }

    unsafe fn topic_name(&self, topic: Handle) -> *const c_char {
        // The CString lives in the object, so the pointer stays valid until
        // the topic is deleted.
        self.state
            .lock()
            .topic_name_of(topic)
            .map_or(ptr::null(), CStr::as_ptr)
    }

    unsafe fn topic_type_name(&self, topic: Handle) -> *const c_char {
        match self.state.lock().kind(topic) {
            Some(Kind::Topic { type_name, .. }) => type_name.as_ptr(),
            _ => ptr::null(),
        }
    }

    unsafe fn inconsistent_topic_status(
        &self,
        topic: Handle,
        status: &mut DdsInconsistentTopicStatus,
    ) -> DdsReturnCode {
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&topic) else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        let Kind::Topic { inconsistent, .. } = &mut obj.kind else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        *status = inconsistent.to_native();
        inconsistent.total_count_change = 0;
        obj.changes &= !DDS_INCONSISTENT_TOPIC_STATUS;
        DDS_RETCODE_OK
    }

    unsafe fn create_datawriter(
        &self,
        publisher: Handle,
        topic: Handle,
        qos: &DdsDataWriterQos,
    ) -> Handle {
        let qos: DataWriterQos = read_qos(qos);
        if !history_consistent(&qos.history, &qos.resource_limits) {
            return Handle::NULL;
        }
        let mut state = self.state.lock();
        if !matches!(state.kind(publisher), Some(Kind::Publisher { .. }))
            || !state.endpoint_topic_ok(publisher, topic)
        {
            return Handle::NULL;
        }
        let enabled = state.autoenable(publisher);
        state.insert(
            publisher,
            enabled,
            Kind::Writer(Box::new(WriterState {
                topic,
                qos,
                publication_matched: PublicationMatchedStatus::default(),
                offered_deadline_missed: OfferedDeadlineMissedStatus::default(),
                offered_incompatible_qos: OfferedIncompatibleQosStatus::default(),
                liveliness_lost: LivelinessLostStatus::default(),
            })),
        )
    }

    unsafe fn delete_datawriter(&self, publisher: Handle, writer: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(writer), Some(Kind::Writer(_))) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        if state.parent(writer) != publisher {
            return DDS_RETCODE_PRECONDITION_NOT_MET;
        }
        state.remove_tree(writer);
        DDS_RETCODE_OK
    }

    unsafe fn lookup_datawriter(&self, publisher: Handle, topic_name: &CStr) -> Handle {
        let state = self.state.lock();
        state
            .objects
            .iter()
            .filter(|(_, obj)| obj.parent == publisher)
            .filter_map(|(h, obj)| match &obj.kind {
                Kind::Writer(w) => Some((*h, w.topic)),
                _ => None,
            })
            .filter(|(_, topic)| state.topic_name_of(*topic) == Some(topic_name))
            .map(|(h, _)| h)
            .min_by_key(|h| h.addr())
            .unwrap_or(Handle::NULL)
    }

    unsafe fn publisher_delete_contained_entities(&self, publisher: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(publisher), Some(Kind::Publisher { .. })) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        state.remove_contained(publisher);
        DDS_RETCODE_OK
    }

    unsafe fn publisher_participant(&self, publisher: Handle) -> Handle {
        let state = self.state.lock();
        match state.kind(publisher) {
            Some(Kind::Publisher { .. }) => state.parent(publisher),
            _ => Handle::NULL,
        }
    }

    unsafe fn publisher_get_qos(
        &self,
        publisher: Handle,
        qos: &mut DdsPublisherQos,
    ) -> DdsReturnCode {
        let mut state = self.state.lock();
        let copy = match state.kind(publisher) {
            Some(Kind::Publisher { qos }) => qos.clone(),
            _ => return DDS_RETCODE_BAD_PARAMETER,
        };
        *qos = state.lend_value(publisher, Slot::Qos, copy);
        DDS_RETCODE_OK
    }

    unsafe fn publisher_set_qos(&self, publisher: Handle, qos: &DdsPublisherQos) -> DdsReturnCode {
        let value: PublisherQos = read_qos(qos);
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&publisher) else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        let enabled = obj.enabled;
        let Kind::Publisher { qos } = &mut obj.kind else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        if enabled && value.presentation != qos.presentation {
            return DDS_RETCODE_IMMUTABLE_POLICY;
        }
        *qos = value;
        DDS_RETCODE_OK
    }

    unsafe fn create_datareader(
        &self,
        subscriber: Handle,
        topic: Handle,
        qos: &DdsDataReaderQos,
    ) -> Handle {
        let qos: DataReaderQos = read_qos(qos);
        if !history_consistent(&qos.history, &qos.resource_limits) {
            return Handle::NULL;
        }
        let mut state = self.state.lock();
        if !matches!(state.kind(subscriber), Some(Kind::Subscriber { .. }))
            || !state.endpoint_topic_ok(subscriber, topic)
        {
            return Handle::NULL;
        }
        let enabled = state.autoenable(subscriber);
        state.insert(
            subscriber,
            enabled,
            Kind::Reader(Box::new(ReaderState {
                topic,
                qos,
                subscription_matched: SubscriptionMatchedStatus::default(),
                requested_deadline_missed: RequestedDeadlineMissedStatus::default(),
                requested_incompatible_qos: RequestedIncompatibleQosStatus::default(),
                sample_lost: SampleLostStatus::default(),
                sample_rejected: SampleRejectedStatus::default(),
                liveliness_changed: LivelinessChangedStatus::default(),
            })),
        )
    }

    unsafe fn delete_datareader(&self, subscriber: Handle, reader: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(reader), Some(Kind::Reader(_))) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        if state.parent(reader) != subscriber || state.has_contained(reader) {
            return DDS_RETCODE_PRECONDITION_NOT_MET;
        }
        state.remove_tree(reader);
        DDS_RETCODE_OK
    }

    unsafe fn lookup_datareader(&self, subscriber: Handle, topic_name: &CStr) -> Handle {
        let state = self.state.lock();
        state
            .objects
            .iter()
            .filter(|(_, obj)| obj.parent == subscriber)
            .filter_map(|(h, obj)| match &obj.kind {
                Kind::Reader(r) => Some((*h, r.topic)),
                _ => None,
            })
            .filter(|(_, topic)| state.topic_name_of(*topic) == Some(topic_name))
            .map(|(h, _)| h)
            .min_by_key(|h| h.addr())
            .unwrap_or(Handle::NULL)
    }

    unsafe fn subscriber_delete_contained_entities(&self, subscriber: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(subscriber), Some(Kind::Subscriber { .. })) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        state.remove_contained(subscriber);
        DDS_RETCODE_OK
    }

    unsafe fn subscriber_participant(&self, subscriber: Handle) -> Handle {
        let state = self.state.lock();
        match state.kind(subscriber) {
            Some(Kind::Subscriber { .. }) => state.parent(subscriber),
            _ => Handle::NULL,
        }
    }

    unsafe fn subscriber_get_qos(
        &self,
        subscriber: Handle,
        qos: &mut DdsSubscriberQos,
    ) -> DdsReturnCode {
        let mut state = self.state.lock();
        let copy = match state.kind(subscriber) {
            Some(Kind::Subscriber { qos }) => qos.clone(),
            _ => return DDS_RETCODE_BAD_PARAMETER,
        };
        *qos = state.lend_value(subscriber, Slot::Qos, copy);
        DDS_RETCODE_OK
    }

    unsafe fn subscriber_set_qos(
        &self,
        subscriber: Handle,
        qos: &DdsSubscriberQos,
    ) -> DdsReturnCode {
        let value: SubscriberQos = read_qos(qos);
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&subscriber) else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        let enabled = obj.enabled;
        let Kind::Subscriber { qos } = &mut obj.kind else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        if enabled && value.presentation != qos.presentation {
            return DDS_RETCODE_IMMUTABLE_POLICY;
        }
        *qos = value;
        DDS_RETCODE_OK
    }

    unsafe fn writer_get_qos(&self, writer: Handle, qos: &mut DdsDataWriterQos) -> DdsReturnCode {
        let mut state = self.state.lock();
        let copy = match state.kind(writer) {
            Some(Kind::Writer(w)) => w.qos.clone(),
            _ => return DDS_RETCODE_BAD_PARAMETER,
        };
        *qos = state.lend_value(writer, Slot::Qos, copy);
        DDS_RETCODE_OK
    }

    unsafe fn writer_set_qos(&self, writer: Handle, qos: &DdsDataWriterQos) -> DdsReturnCode {
        let value: DataWriterQos = read_qos(qos);
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&writer) else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        let enabled = obj.enabled;
        let Some(w) = obj.writer() else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        if !history_consistent(&value.history, &value.resource_limits) {
            return DDS_RETCODE_INCONSISTENT_POLICY;
        }
        if enabled && value.durability != w.qos.durability {
            return DDS_RETCODE_IMMUTABLE_POLICY;
        }
        w.qos = value;
        DDS_RETCODE_OK
    }

    unsafe fn writer_publisher(&self, writer: Handle) -> Handle {
        let state = self.state.lock();
        match state.kind(writer) {
            Some(Kind::Writer(_)) => state.parent(writer),
            _ => Handle::NULL,
        }
    }

    unsafe fn writer_topic(&self, writer: Handle) -> Handle {
        match self.state.lock().kind(writer) {
            Some(Kind::Writer(w)) => w.topic,
            _ => Handle::NULL,
        }
    }

    unsafe fn assert_liveliness(&self, writer: Handle) -> DdsReturnCode {
        let state = self.state.lock();
        match state.objects.get(&writer) {
            Some(obj) if matches!(obj.kind, Kind::Writer(_)) => {
                if obj.enabled {
                    DDS_RETCODE_OK
                } else {
                    DDS_RETCODE_NOT_ENABLED
                }
            }
            _ => DDS_RETCODE_BAD_PARAMETER,
        }
    }

    unsafe fn publication_matched_status(
        &self,
        writer: Handle,
        status: &mut DdsPublicationMatchedStatus,
    ) -> DdsReturnCode {
        take_status!(
            self,
            writer,
            status,
            writer.publication_matched,
            DDS_PUBLICATION_MATCHED_STATUS,
            [total_count_change, current_count_change]
        )
    }

    unsafe fn offered_deadline_missed_status(
        &self,
        writer: Handle,
        status: &mut DdsOfferedDeadlineMissedStatus,
    ) -> DdsReturnCode {
        take_status!(
            self,
            writer,
            status,
            writer.offered_deadline_missed,
            DDS_OFFERED_DEADLINE_MISSED_STATUS,
            [total_count_change]
        )
    }

    unsafe fn offered_incompatible_qos_status(
        &self,
        writer: Handle,
        status: &mut DdsOfferedIncompatibleQosStatus,
    ) -> DdsReturnCode {
        take_incompatible_status!(
            self,
            writer,
            status,
            writer.offered_incompatible_qos,
            DDS_OFFERED_INCOMPATIBLE_QOS_STATUS
        )
    }

    unsafe fn liveliness_lost_status(
        &self,
        writer: Handle,
        status: &mut DdsLivelinessLostStatus,
    ) -> DdsReturnCode {
        take_status!(
            self,
            writer,
            status,
            writer.liveliness_lost,
            DDS_LIVELINESS_LOST_STATUS,
            [total_count_change]
        )
    }

    unsafe fn reader_get_qos(&self, reader: Handle, qos: &mut DdsDataReaderQos) -> DdsReturnCode {
        let mut state = self.state.lock();
        let copy = match state.kind(reader) {
            Some(Kind::Reader(r)) => r.qos.clone(),
            _ => return DDS_RETCODE_BAD_PARAMETER,
        };
        *qos = state.lend_value(reader, Slot::Qos, copy);
        DDS_RETCODE_OK
    }

    unsafe fn reader_set_qos(&self, reader: Handle, qos: &DdsDataReaderQos) -> DdsReturnCode {
        let value: DataReaderQos = read_qos(qos);
        let mut state = self.state.lock();
        let Some(obj) = state.objects.get_mut(&reader) else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        let enabled = obj.enabled;
        let Some(r) = obj.reader() else {
            return DDS_RETCODE_BAD_PARAMETER;
        };
        if !history_consistent(&value.history, &value.resource_limits) {
            return DDS_RETCODE_INCONSISTENT_POLICY;
        }
        if enabled && value.durability != r.qos.durability {
            return DDS_RETCODE_IMMUTABLE_POLICY;
        }
        r.qos = value;
        DDS_RETCODE_OK
    }

    unsafe fn reader_subscriber(&self, reader: Handle) -> Handle {
        let state = self.state.lock();
        match state.kind(reader) {
            Some(Kind::Reader(_)) => state.parent(reader),
            _ => Handle::NULL,
        }
    }

    unsafe fn reader_topic_description(&self, reader: Handle) -> Handle {
        match self.state.lock().kind(reader) {
            Some(Kind::Reader(r)) => r.topic,
            _ => Handle::NULL,
        }
    }

    unsafe fn create_read_condition(
        &self,
        reader: Handle,
        sample_states: u32,
        view_states: u32,
        instance_states: u32,
    ) -> Handle {
        let mut state = self.state.lock();
        if !matches!(state.kind(reader), Some(Kind::Reader(_))) {
            return Handle::NULL;
        }
        state.insert(
            reader,
            true,
            Kind::ReadCondition {
                sample_states,
                view_states,
                instance_states,
                query: None,
            },
        )
    }

    unsafe fn create_query_condition(
        &self,
        reader: Handle,
        sample_states: u32,
        view_states: u32,
        instance_states: u32,
        query_expression: &CStr,
        query_parameters: DdsSequence,
    ) -> Handle {
        let parameters = sequence::strings_from_native(query_parameters.0);
        let mut state = self.state.lock();
        if !matches!(state.kind(reader), Some(Kind::Reader(_))) {
            return Handle::NULL;
        }
        state.insert(
            reader,
            true,
            Kind::ReadCondition {
                sample_states,
                view_states,
                instance_states,
                query: Some(Query {
                    expression: query_expression.to_owned(),
                    parameters,
                }),
            },
        )
    }

    unsafe fn delete_read_condition(&self, reader: Handle, condition: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(condition), Some(Kind::ReadCondition { .. })) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        if state.parent(condition) != reader {
            return DDS_RETCODE_PRECONDITION_NOT_MET;
        }
        state.remove_tree(condition);
        DDS_RETCODE_OK
    }

    unsafe fn reader_delete_contained_entities(&self, reader: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        if !matches!(state.kind(reader), Some(Kind::Reader(_))) {
            return DDS_RETCODE_BAD_PARAMETER;
        }
        state.remove_contained(reader);
        DDS_RETCODE_OK
    }

    unsafe fn subscription_matched_status(
        &self,
        reader: Handle,
        status: &mut DdsSubscriptionMatchedStatus,
    ) -> DdsReturnCode {
        take_status!(
            self,
            reader,
            status,
            reader.subscription_matched,
            DDS_SUBSCRIPTION_MATCHED_STATUS,
            [total_count_change, current_count_change]
        )
    }

    unsafe fn requested_deadline_missed_status(
        &self,
        reader: Handle,
        status: &mut DdsRequestedDeadlineMissedStatus,
    ) -> DdsReturnCode {
        take_status!(
            self,
            reader,
            status,
            reader.requested_deadline_missed,
            DDS_REQUESTED_DEADLINE_MISSED_STATUS,
            [total_count_change]
        )
    }

    unsafe fn requested_incompatible_qos_status(
        &self,
        reader: Handle,
        status: &mut DdsRequestedIncompatibleQosStatus,
    ) -> DdsReturnCode {
        take_incompatible_status!(
            self,
            reader,
            status,
            reader.requested_incompatible_qos,
            DDS_REQUESTED_INCOMPATIBLE_QOS_STATUS
        )
    }

    unsafe fn sample_lost_status(
        &self,
        reader: Handle,
        status: &mut DdsSampleLostStatus,
    ) -> DdsReturnCode {
        take_status!(
            self,
            reader,
            status,
            reader.sample_lost,
            DDS_SAMPLE_LOST_STATUS,
            [total_count_change]
        )
    }

    unsafe fn sample_rejected_status(
        &self,
        reader: Handle,
        status: &mut DdsSampleRejectedStatus,
    ) -> DdsReturnCode {
        take_status!(
            self,
            reader,
            status,
            reader.sample_rejected,
            DDS_SAMPLE_REJECTED_STATUS,
            [total_count_change]
        )
    }

    unsafe fn liveliness_changed_status(
        &self,
        reader: Handle,
        status: &mut DdsLivelinessChangedStatus,
    ) -> DdsReturnCode {
        take_status!(
            self,
            reader,
            status,
            reader.liveliness_changed,
            DDS_LIVELINESS_CHANGED_STATUS,
            [alive_count_change, not_alive_count_change]
        )
    }

    unsafe fn enable(&self, entity: Handle) -> DdsReturnCode {
        let mut state = self.state.lock();
        let (parent, enabled) = match state.objects.get(&entity) {
            Some(obj) if obj.kind.is_entity() => (obj.parent, obj.enabled),
            _ => return DDS_RETCODE_BAD_PARAMETER,
        };
        if enabled {
            return DDS_RETCODE_OK;
        }
        let parent_enabled = parent.is_null() || state.objects.get(&parent).is_some_and(|p| p.enabled);
        if !parent_enabled {
            return DDS_RETCODE_PRECONDITION_NOT_MET;
        }
        if let Some(obj) = state.objects.get_mut(&entity) {
            obj.enabled = true;
        }
        DDS_RETCODE_OK
    }

    unsafe fn status_condition(&self, entity: Handle) -> Handle {
        let mut state = self.state.lock();
        let existing = match state.objects.get(&entity) {
            Some(obj) if obj.kind.is_entity() => obj.status_condition,
            _ => return Handle::NULL,
        };
        if !existing.is_null() {
            return existing;
        }
        let condition = state.insert(
            entity,
            true,
            Kind::StatusCondition {
                enabled_statuses: ALL_STATUSES,
            },
        );
        if let Some(obj) = state.objects.get_mut(&entity) {
            obj.status_condition = condition;
        }
        condition
    }

    unsafe fn status_changes(&self, entity: Handle) -> u32 {
        match self.state.lock().objects.get(&entity) {
            Some(obj) if obj.kind.is_entity() => obj.changes,
            _ => 0,
        }
    }

    unsafe fn instance_handle(&self, entity: Handle) -> DdsInstanceHandle {
        self.state
            .lock()
            .objects
            .get(&entity)
            .map_or(DDS_HANDLE_NIL, |obj| obj.instance)
    }

    unsafe fn trigger_value(&self, condition: Handle) -> bool {
        let state = self.state.lock();
        let Some(obj) = state.objects.get(&condition) else {
            return false;
        };
        match &obj.kind {
            Kind::GuardCondition { trigger } => *trigger,
            Kind::StatusCondition { enabled_statuses } => state
                .objects
                .get(&obj.parent)
                .is_some_and(|entity| entity.changes & enabled_statuses != 0),
            // No samples ever arrive in the loopback.
            Kind::ReadCondition { .. } => false,
            _ => false,
        }
    }

    unsafe fn guard_condition_new(&self) -> Handle {
        self.state
            .lock()
            .insert(Handle::NULL, true, Kind::GuardCondition { trigger: false })
    }

    unsafe fn guard_condition_free(&self, condition: Handle) {
        let mut state = self.state.lock();
        if matches!(state.kind(condition), Some(Kind::GuardCondition { .. })) {
            state.remove_tree(condition);
        }
    }

    unsafe fn set_guard_trigger_value(&self, condition: Handle, value: bool) -> DdsReturnCode {
        let mut state = self.state.lock();
        match state.objects.get_mut(&condition).map(|obj| &mut obj.kind) {
            Some(Kind::GuardCondition { trigger }) => {
                *trigger = value;
                DDS_RETCODE_OK
            }
            _ => DDS_RETCODE_BAD_PARAMETER,
        }
    }

    unsafe fn enabled_statuses(&self, condition: Handle) -> u32 {
        match self.state.lock().kind(condition) {
            Some(Kind::StatusCondition { enabled_statuses }) => *enabled_statuses,
            _ => 0,
        }
    }

    unsafe fn set_enabled_statuses(&self, condition: Handle, mask: u32) -> DdsReturnCode {
        let mut state = self.state.lock();
        match state.objects.get_mut(&condition).map(|obj| &mut obj.kind) {
            Some(Kind::StatusCondition { enabled_statuses }) => {
                *enabled_statuses = mask;
                DDS_RETCODE_OK
            }
            _ => DDS_RETCODE_BAD_PARAMETER,
        }
    }

    unsafe fn status_condition_entity(&self, condition: Handle) -> Handle {
        let state = self.state.lock();
        match state.kind(condition) {
            Some(Kind::StatusCondition { .. }) => state.parent(condition),
            _ => Handle::NULL,
        }
    }

    unsafe fn sample_state_mask(&self, condition: Handle) -> u32 {
        match self.state.lock().kind(condition) {
            Some(Kind::ReadCondition { sample_states, .. }) => *sample_states,
            _ => 0,
        }
    }

    unsafe fn view_state_mask(&self, condition: Handle) -> u32 {
        match self.state.lock().kind(condition) {
            Some(Kind::ReadCondition { view_states, .. }) => *view_states,
            _ => 0,
        }
    }

    unsafe fn instance_state_mask(&self, condition: Handle) -> u32 {
        match self.state.lock().kind(condition) {
            Some(Kind::ReadCondition {
                instance_states, ..
            }) => *instance_states,
            _ => 0,
        }
    }

    unsafe fn read_condition_datareader(&self, condition: Handle) -> Handle {
        let state = self.state.lock();
        match state.kind(condition) {
            Some(Kind::ReadCondition { .. }) => state.parent(condition),
            _ => Handle::NULL,
        }
    }

    unsafe fn query_expression(&self, condition: Handle) -> *const c_char {
        match self.state.lock().kind(condition) {
            Some(Kind::ReadCondition {
                query: Some(query), ..
            }) => query.expression.as_ptr(),
            _ => ptr::null(),
        }
    }

    unsafe fn query_parameters(
        &self,
        condition: Handle,
        parameters: &mut DdsSequence,
    ) -> DdsReturnCode {
        let mut state = self.state.lock();
        let marshaled = match state.kind(condition) {
            Some(Kind::ReadCondition {
                query: Some(query), ..
            }) => sequence::strings_to_native(&query.parameters),
            _ => return DDS_RETCODE_BAD_PARAMETER,
        };
        let mut ledger = AllocationLedger::new();
        *parameters = DdsSequence(ledger.absorb(marshaled));
        state.lend(condition, Slot::QueryParameters, Lent::Buffers(ledger));
        DDS_RETCODE_OK
    }

    unsafe fn set_query_parameters(
        &self,
        condition: Handle,
        parameters: DdsSequence,
    ) -> DdsReturnCode {
        let values = sequence::strings_from_native(parameters.0);
        let mut state = self.state.lock();
        match state.objects.get_mut(&condition).map(|obj| &mut obj.kind) {
            Some(Kind::ReadCondition {
                query: Some(query), ..
            }) => {
                query.parameters = values;
                DDS_RETCODE_OK
            }
            _ => DDS_RETCODE_BAD_PARAMETER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qos::{Durability, DurabilityKind};

    fn participant(api: &Loopback) -> Handle {
        let mut qos = DomainParticipantQos::default();
        let handle = unsafe { api.create_participant(0, &qos.to_native()) };
        qos.release();
        handle
    }

    #[test]
    fn domain_id_is_range_checked() {
        let api = Loopback::new();
        let mut qos = DomainParticipantQos::default();
        let native = qos.to_native();
        assert!(unsafe { api.create_participant(233, &native) }.is_null());
        assert!(unsafe { api.create_participant(-1, &native) }.is_null());
        assert!(!unsafe { api.create_participant(232, &native) }.is_null());
        qos.release();
    }

    #[test]
    fn qos_getter_lends_until_next_call() {
        let api = Loopback::new();
        let p = participant(&api);

        let mut qos = DomainParticipantQos::default();
        qos.user_data = crate::qos::UserData::new(b"abc".to_vec());
        unsafe {
            assert_eq!(api.participant_set_qos(p, &qos.to_native()), DDS_RETCODE_OK);
        }
        qos.release();

        let mut out = DdsDomainParticipantQos::default();
        unsafe { api.participant_get_qos(p, &mut out) };
        assert_eq!(api.lent_count(), 1);
        let mut back = DomainParticipantQos::default();
        unsafe { back.from_native(&out) };
        assert_eq!(back, qos);

        // Second call replaces the first loan instead of adding one.
        unsafe { api.participant_get_qos(p, &mut out) };
        assert_eq!(api.lent_count(), 1);

        unsafe { api.delete_participant(p) };
        assert_eq!(api.lent_count(), 0);
    }

    #[test]
    fn durability_is_immutable_once_enabled() {
        let api = Loopback::new();
        let p = participant(&api);
        let mut qos = TopicQos::default();
        let t = unsafe { api.create_topic(p, c"Square", c"ShapeType", &qos.to_native()) };
        qos.release();
        assert!(!t.is_null());

        qos.durability = Durability {
            kind: DurabilityKind::TransientLocal,
        };
        let rc = unsafe { api.topic_set_qos(t, &qos.to_native()) };
        qos.release();
        assert_eq!(rc, DDS_RETCODE_IMMUTABLE_POLICY);
    }

    #[test]
    fn history_deeper_than_limits_is_inconsistent() {
        let api = Loopback::new();
        let p = participant(&api);
        let mut qos = TopicQos::default();
        let t = unsafe { api.create_topic(p, c"T", c"X", &qos.to_native()) };
        qos.release();

        qos.history = History::keep_last(10);
        qos.resource_limits.max_samples_per_instance = 5;
        let rc = unsafe { api.topic_set_qos(t, &qos.to_native()) };
        qos.release();
        assert_eq!(rc, DDS_RETCODE_INCONSISTENT_POLICY);
    }

    #[test]
    fn delete_with_children_is_refused() {
        let api = Loopback::new();
        let p = participant(&api);
        let mut qos = PublisherQos::default();
        let publisher = unsafe { api.create_publisher(p, &qos.to_native()) };
        qos.release();

        assert_eq!(unsafe { api.delete_participant(p) }, DDS_RETCODE_PRECONDITION_NOT_MET);
        assert_eq!(unsafe { api.participant_delete_contained_entities(p) }, DDS_RETCODE_OK);
        assert!(!api.contains(publisher));
        assert_eq!(unsafe { api.delete_participant(p) }, DDS_RETCODE_OK);
        assert_eq!(api.object_count(), 0);
    }

    #[test]
    fn status_condition_triggers_on_enabled_changes() {
        let api = Loopback::new();
        let p = participant(&api);
        let condition = unsafe { api.status_condition(p) };
        assert_eq!(unsafe { api.status_condition(p) }, condition);
        assert!(!unsafe { api.trigger_value(condition) });

        unsafe { api.set_enabled_statuses(condition, DDS_PUBLICATION_MATCHED_STATUS) };
        api.set_status_changes(p, DDS_SAMPLE_LOST_STATUS);
        assert!(!unsafe { api.trigger_value(condition) });
        api.set_status_changes(p, DDS_PUBLICATION_MATCHED_STATUS);
        assert!(unsafe { api.trigger_value(condition) });
    }

    #[test]
    fn query_parameters_are_copied_in_and_lent_out() {
        let api = Loopback::new();
        let p = participant(&api);
        let mut tq = TopicQos::default();
        let t = unsafe { api.create_topic(p, c"T", c"X", &tq.to_native()) };
        tq.release();
        let mut sq = SubscriberQos::default();
        let s = unsafe { api.create_subscriber(p, &sq.to_native()) };
        sq.release();
        let mut rq = DataReaderQos::default();
        let r = unsafe { api.create_datareader(s, t, &rq.to_native()) };
        rq.release();

        let mut ledger = AllocationLedger::new();
        let params = DdsSequence(ledger.absorb(sequence::strings_to_native(&["1", "blue"])));
        let c = unsafe { api.create_query_condition(r, 1, 2, 4, c"x > %0 AND color = %1", params) };
        ledger.release();

        let mut out = DdsSequence::NULL;
        assert_eq!(unsafe { api.query_parameters(c, &mut out) }, DDS_RETCODE_OK);
        assert_eq!(
            unsafe { sequence::strings_from_native(out.0) },
            vec!["1".to_string(), "blue".to_string()]
        );
        assert_eq!(unsafe { api.sample_state_mask(c) }, 1);
        assert_eq!(unsafe { api.read_condition_datareader(c) }, r);
    }
}
