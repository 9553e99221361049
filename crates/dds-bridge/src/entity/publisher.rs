// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::ffi::CString;

use dds_sys::DdsPublisherQos;

use super::{read_native, with_native, DataWriter, DomainEntity, DomainParticipant, Topic};
use crate::error::{check, Error, Result};
use crate::qos::{DataWriterQos, PublisherQos};

entity_wrapper! {
    /// Groups data writers under shared presentation and partition QoS.
    Publisher
}

impl Publisher {
    /// `topic` must belong to the same participant as this publisher.
    pub fn create_datawriter(&self, topic: &Topic, qos: &DataWriterQos) -> Result<DataWriter> {
        let api = self.core.api();
        let handle = with_native(qos, |native| {
            // SAFETY: handles belong to live wrappers; layout outlives the call.
            unsafe { api.create_datawriter(self.core.handle(), topic.handle(), native) }
        });
        let writer = self.core.adopt(handle, DataWriter::from_core)?;
        log::debug!("created writer {} on topic {}", writer.handle(), topic.handle());
        Ok(writer)
    }

    pub fn delete_datawriter(&self, writer: &DataWriter) -> Result<()> {
        let api = self.core.api();
        let publisher = self.core.handle();
        self.core.delete_child(writer.clone().into(), |handle| {
            // SAFETY: both handles belong to live wrappers.
            unsafe { api.delete_datawriter(publisher, handle) }
        })
    }

    /// A writer of this publisher on the topic named `topic_name`, if any.
    pub fn lookup_datawriter(&self, topic_name: &str) -> Result<Option<DataWriter>> {
        if topic_name.is_empty() {
            return Err(Error::BadParameter);
        }
        let name = CString::new(topic_name)?;
        // SAFETY: `name` outlives the call.
        let handle = unsafe { self.core.api().lookup_datawriter(self.core.handle(), &name) };
        if handle.is_null() {
            return Ok(None);
        }
        self.core.resolve(handle, DataWriter::from_core).map(Some)
    }

    pub fn delete_contained_entities(&self) -> Result<()> {
        let api = self.core.api();
        let publisher = self.core.handle();
        self.core.delete_contained(|| {
            // SAFETY: `publisher` belongs to a live wrapper.
            unsafe { api.publisher_delete_contained_entities(publisher) }
        })
    }

    pub fn participant(&self) -> Result<DomainParticipant> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe { self.core.api().publisher_participant(self.core.handle()) };
        self.core.resolve(handle, DomainParticipant::from_core)
    }

    pub fn qos(&self) -> Result<PublisherQos> {
        let api = self.core.api();
        read_native(|out: &mut DdsPublisherQos| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.publisher_get_qos(self.core.handle(), out) }
        })
    }

    pub fn set_qos(&self, qos: &PublisherQos) -> Result<()> {
        let api = self.core.api();
        check(with_native(qos, |native| {
            // SAFETY: layout outlives the call.
            unsafe { api.publisher_set_qos(self.core.handle(), native) }
        }))
    }
}
