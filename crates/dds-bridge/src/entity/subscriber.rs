// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::ffi::CString;

use dds_sys::DdsSubscriberQos;

use super::{read_native, with_native, DataReader, DomainEntity, DomainParticipant, Topic};
use crate::error::{check, Error, Result};
use crate::qos::{DataReaderQos, SubscriberQos};

entity_wrapper! {
    /// Groups data readers under shared presentation and partition QoS.
    Subscriber
}

impl Subscriber {
    /// `topic` must belong to the same participant as this subscriber.
    pub fn create_datareader(&self, topic: &Topic, qos: &DataReaderQos) -> Result<DataReader> {
        let api = self.core.api();
        let handle = with_native(qos, |native| {
            // SAFETY: handles belong to live wrappers; layout outlives the call.
            unsafe { api.create_datareader(self.core.handle(), topic.handle(), native) }
        });
        let reader = self.core.adopt(handle, DataReader::from_core)?;
        log::debug!("created reader {} on topic {}", reader.handle(), topic.handle());
        Ok(reader)
    }

    /// Fails with [`Error::PreconditionNotMet`] while the reader still has
    /// read or query conditions.
    pub fn delete_datareader(&self, reader: &DataReader) -> Result<()> {
        let api = self.core.api();
        let subscriber = self.core.handle();
        self.core.delete_child(reader.clone().into(), |handle| {
            // SAFETY: both handles belong to live wrappers.
            unsafe { api.delete_datareader(subscriber, handle) }
        })
    }

    pub fn lookup_datareader(&self, topic_name: &str) -> Result<Option<DataReader>> {
        if topic_name.is_empty() {
            return Err(Error::BadParameter);
        }
        let name = CString::new(topic_name)?;
        // SAFETY: `name` outlives the call.
        let handle = unsafe { self.core.api().lookup_datareader(self.core.handle(), &name) };
        if handle.is_null() {
            return Ok(None);
        }
        self.core.resolve(handle, DataReader::from_core).map(Some)
    }

    pub fn delete_contained_entities(&self) -> Result<()> {
        let api = self.core.api();
        let subscriber = self.core.handle();
        self.core.delete_contained(|| {
            // SAFETY: `subscriber` belongs to a live wrapper.
            unsafe { api.subscriber_delete_contained_entities(subscriber) }
        })
    }

    pub fn participant(&self) -> Result<DomainParticipant> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe { self.core.api().subscriber_participant(self.core.handle()) };
        self.core.resolve(handle, DomainParticipant::from_core)
    }

    pub fn qos(&self) -> Result<SubscriberQos> {
        let api = self.core.api();
        read_native(|out: &mut DdsSubscriberQos| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.subscriber_get_qos(self.core.handle(), out) }
        })
    }

    pub fn set_qos(&self, qos: &SubscriberQos) -> Result<()> {
        let api = self.core.api();
        check(with_native(qos, |native| {
            // SAFETY: layout outlives the call.
            unsafe { api.subscriber_set_qos(self.core.handle(), native) }
        }))
    }
}
