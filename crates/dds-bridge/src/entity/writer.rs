// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use dds_sys::{
    DdsDataWriterQos, DdsLivelinessLostStatus, DdsOfferedDeadlineMissedStatus,
    DdsOfferedIncompatibleQosStatus, DdsPublicationMatchedStatus,
};

use super::{read_native, with_native, Publisher, Topic};
use crate::error::{check, Result};
use crate::qos::DataWriterQos;
use crate::status::{
    LivelinessLostStatus, OfferedDeadlineMissedStatus, OfferedIncompatibleQosStatus,
    PublicationMatchedStatus,
};

entity_wrapper! {
    DataWriter
}

impl DataWriter {
    pub fn publisher(&self) -> Result<Publisher> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe { self.core.api().writer_publisher(self.core.handle()) };
        self.core.resolve(handle, Publisher::from_core)
    }

    pub fn topic(&self) -> Result<Topic> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe { self.core.api().writer_topic(self.core.handle()) };
        self.core.resolve(handle, Topic::from_core)
    }

    pub fn qos(&self) -> Result<DataWriterQos> {
        let api = self.core.api();
        read_native(|out: &mut DdsDataWriterQos| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.writer_get_qos(self.core.handle(), out) }
        })
    }

    pub fn set_qos(&self, qos: &DataWriterQos) -> Result<()> {
        let api = self.core.api();
        check(with_native(qos, |native| {
            // SAFETY: layout outlives the call.
            unsafe { api.writer_set_qos(self.core.handle(), native) }
        }))
    }

    /// Manually assert liveliness (MANUAL_BY_* liveliness kinds).
    pub fn assert_liveliness(&self) -> Result<()> {
        // SAFETY: `handle` belongs to a live wrapper.
        check(unsafe { self.core.api().assert_liveliness(self.core.handle()) })
    }

    pub fn publication_matched_status(&self) -> Result<PublicationMatchedStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsPublicationMatchedStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.publication_matched_status(self.core.handle(), out) }
        })
    }

    pub fn offered_deadline_missed_status(&self) -> Result<OfferedDeadlineMissedStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsOfferedDeadlineMissedStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.offered_deadline_missed_status(self.core.handle(), out) }
        })
    }

    /// The policy list is copied out of native-owned memory.
    pub fn offered_incompatible_qos_status(&self) -> Result<OfferedIncompatibleQosStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsOfferedIncompatibleQosStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.offered_incompatible_qos_status(self.core.handle(), out) }
        })
    }

    pub fn liveliness_lost_status(&self) -> Result<LivelinessLostStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsLivelinessLostStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.liveliness_lost_status(self.core.handle(), out) }
        })
    }
}
