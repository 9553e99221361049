// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::ffi::CString;

use dds_sys::{
    DdsDataReaderQos, DdsLivelinessChangedStatus, DdsRequestedDeadlineMissedStatus,
    DdsRequestedIncompatibleQosStatus, DdsSampleLostStatus, DdsSampleRejectedStatus, DdsSequence,
    DdsSubscriptionMatchedStatus,
};

use super::{read_native, with_native, Subscriber, Topic};
use crate::condition::{InstanceStateMask, QueryCondition, ReadCondition, SampleStateMask, ViewStateMask};
use crate::error::{check, no_interior_nul, Error, Result};
use crate::memory::AllocationLedger;
use crate::qos::DataReaderQos;
use crate::sequence;
use crate::status::{
    LivelinessChangedStatus, RequestedDeadlineMissedStatus, RequestedIncompatibleQosStatus,
    SampleLostStatus, SampleRejectedStatus, SubscriptionMatchedStatus,
};

entity_wrapper! {
    /// Data reader. Owns its read and query conditions.
    DataReader
}

impl DataReader {
    pub fn subscriber(&self) -> Result<Subscriber> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe { self.core.api().reader_subscriber(self.core.handle()) };
        self.core.resolve(handle, Subscriber::from_core)
    }

    pub fn topic_description(&self) -> Result<Topic> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe { self.core.api().reader_topic_description(self.core.handle()) };
        self.core.resolve(handle, Topic::from_core)
    }

    pub fn qos(&self) -> Result<DataReaderQos> {
        let api = self.core.api();
        read_native(|out: &mut DdsDataReaderQos| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.reader_get_qos(self.core.handle(), out) }
        })
    }

    pub fn set_qos(&self, qos: &DataReaderQos) -> Result<()> {
        let api = self.core.api();
        check(with_native(qos, |native| {
            // SAFETY: layout outlives the call.
            unsafe { api.reader_set_qos(self.core.handle(), native) }
        }))
    }

    pub fn create_read_condition(
        &self,
        sample_states: SampleStateMask,
        view_states: ViewStateMask,
        instance_states: InstanceStateMask,
    ) -> Result<ReadCondition> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe {
            self.core.api().create_read_condition(
                self.core.handle(),
                sample_states.bits(),
                view_states.bits(),
                instance_states.bits(),
            )
        };
        self.core.adopt(handle, ReadCondition::from_core)
    }

    /// Read condition filtered by `expression`, whose `%n` placeholders are
    /// bound to `parameters`. Text containing NUL is rejected.
    pub fn create_query_condition<S: AsRef<str>>(
        &self,
        sample_states: SampleStateMask,
        view_states: ViewStateMask,
        instance_states: InstanceStateMask,
        expression: &str,
        parameters: &[S],
    ) -> Result<QueryCondition> {
        if expression.is_empty() {
            return Err(Error::BadParameter);
        }
        let expression = CString::new(expression)?;
        no_interior_nul(parameters)?;
        let mut ledger = AllocationLedger::new();
        let parameters = DdsSequence(ledger.absorb(sequence::strings_to_native(parameters)));
        // SAFETY: expression and parameter block outlive the call.
        let handle = unsafe {
            self.core.api().create_query_condition(
                self.core.handle(),
                sample_states.bits(),
                view_states.bits(),
                instance_states.bits(),
                &expression,
                parameters,
            )
        };
        ledger.release();
        self.core.adopt(handle, QueryCondition::from_core)
    }

    pub fn delete_read_condition(&self, condition: &ReadCondition) -> Result<()> {
        self.delete_condition(condition.clone().into())
    }

    pub fn delete_query_condition(&self, condition: &QueryCondition) -> Result<()> {
        self.delete_condition(condition.clone().into())
    }

    fn delete_condition(&self, condition: crate::registry::Wrapper) -> Result<()> {
        let api = self.core.api();
        let reader = self.core.handle();
        self.core.delete_child(condition, |handle| {
            // SAFETY: both handles belong to live wrappers.
            unsafe { api.delete_read_condition(reader, handle) }
        })
    }

    /// Delete every read and query condition of this reader.
    pub fn delete_contained_entities(&self) -> Result<()> {
        let api = self.core.api();
        let reader = self.core.handle();
        self.core.delete_contained(|| {
            // SAFETY: `reader` belongs to a live wrapper.
            unsafe { api.reader_delete_contained_entities(reader) }
        })
    }

    pub fn subscription_matched_status(&self) -> Result<SubscriptionMatchedStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsSubscriptionMatchedStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.subscription_matched_status(self.core.handle(), out) }
        })
    }

    pub fn requested_deadline_missed_status(&self) -> Result<RequestedDeadlineMissedStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsRequestedDeadlineMissedStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.requested_deadline_missed_status(self.core.handle(), out) }
        })
    }

    pub fn requested_incompatible_qos_status(&self) -> Result<RequestedIncompatibleQosStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsRequestedIncompatibleQosStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.requested_incompatible_qos_status(self.core.handle(), out) }
        })
    }

    pub fn sample_lost_status(&self) -> Result<SampleLostStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsSampleLostStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.sample_lost_status(self.core.handle(), out) }
        })
    }

    pub fn sample_rejected_status(&self) -> Result<SampleRejectedStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsSampleRejectedStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.sample_rejected_status(self.core.handle(), out) }
        })
    }

    pub fn liveliness_changed_status(&self) -> Result<LivelinessChangedStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsLivelinessChangedStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.liveliness_changed_status(self.core.handle(), out) }
        })
    }
}
