// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::ffi::CString;

use dds_sys::DdsDomainParticipantQos;

use super::{read_native, with_native, DomainEntity, Publisher, Subscriber, Topic};
use crate::error::{Error, Result};
use crate::qos::{DomainParticipantQos, PublisherQos, SubscriberQos, TopicQos};
use crate::time::Duration;

entity_wrapper! {
    /// Domain participant: factory for topics, publishers and subscribers.
    DomainParticipant
}

impl DomainParticipant {
    /// Create a topic. Empty names are rejected before reaching the native
    /// side.
    pub fn create_topic(&self, topic_name: &str, type_name: &str, qos: &TopicQos) -> Result<Topic> {
        if topic_name.is_empty() || type_name.is_empty() {
            return Err(Error::BadParameter);
        }
        let topic_name_c = CString::new(topic_name)?;
        let type_name_c = CString::new(type_name)?;
        let api = self.core.api();
        let handle = with_native(qos, |native| {
            // SAFETY: names and layout outlive the call.
            unsafe { api.create_topic(self.core.handle(), &topic_name_c, &type_name_c, native) }
        });
        let topic = self.core.adopt(handle, Topic::from_core)?;
        log::debug!("created topic {:?} ({}) as {}", topic_name, type_name, topic.handle());
        Ok(topic)
    }

    /// Fails with [`Error::PreconditionNotMet`] while writers or readers
    /// still use the topic.
    pub fn delete_topic(&self, topic: &Topic) -> Result<()> {
        let api = self.core.api();
        let participant = self.core.handle();
        self.core.delete_child(topic.clone().into(), |handle| {
            // SAFETY: both handles belong to live wrappers.
            unsafe { api.delete_topic(participant, handle) }
        })
    }

    /// Wait up to `timeout` for a topic named `topic_name`.
    ///
    /// `None` waits for the configured default timeout. Not finding the
    /// topic in time is [`Error::Timeout`].
    pub fn find_topic(&self, topic_name: &str, timeout: Option<Duration>) -> Result<Topic> {
        if topic_name.is_empty() {
            return Err(Error::BadParameter);
        }
        let name = CString::new(topic_name)?;
        let timeout = timeout.unwrap_or(self.core.config().find_topic_timeout);
        // SAFETY: `name` outlives the call.
        let handle = unsafe {
            self.core
                .api()
                .find_topic(self.core.handle(), &name, timeout.into())
        };
        if handle.is_null() {
            return Err(Error::Timeout);
        }
        self.core.adopt(handle, Topic::from_core)
    }

    /// A topic of this participant named `name`, if any. Does not wait.
    pub fn lookup_topic_description(&self, name: &str) -> Result<Option<Topic>> {
        if name.is_empty() {
            return Err(Error::BadParameter);
        }
        let name = CString::new(name)?;
        // SAFETY: `name` outlives the call.
        let handle = unsafe {
            self.core
                .api()
                .lookup_topic_description(self.core.handle(), &name)
        };
        if handle.is_null() {
            return Ok(None);
        }
        self.core.resolve(handle, Topic::from_core).map(Some)
    }

    pub fn create_publisher(&self, qos: &PublisherQos) -> Result<Publisher> {
        let api = self.core.api();
        let handle = with_native(qos, |native| {
            // SAFETY: layout outlives the call.
            unsafe { api.create_publisher(self.core.handle(), native) }
        });
        let publisher = self.core.adopt(handle, Publisher::from_core)?;
        log::debug!("created publisher {}", publisher.handle());
        Ok(publisher)
    }

    pub fn delete_publisher(&self, publisher: &Publisher) -> Result<()> {
        let api = self.core.api();
        let participant = self.core.handle();
        self.core.delete_child(publisher.clone().into(), |handle| {
            // SAFETY: both handles belong to live wrappers.
            unsafe { api.delete_publisher(participant, handle) }
        })
    }

    pub fn create_subscriber(&self, qos: &SubscriberQos) -> Result<Subscriber> {
        let api = self.core.api();
        let handle = with_native(qos, |native| {
            // SAFETY: layout outlives the call.
            unsafe { api.create_subscriber(self.core.handle(), native) }
        });
        let subscriber = self.core.adopt(handle, Subscriber::from_core)?;
        log::debug!("created subscriber {}", subscriber.handle());
        Ok(subscriber)
    }

    pub fn delete_subscriber(&self, subscriber: &Subscriber) -> Result<()> {
        let api = self.core.api();
        let participant = self.core.handle();
        self.core.delete_child(subscriber.clone().into(), |handle| {
            // SAFETY: both handles belong to live wrappers.
            unsafe { api.delete_subscriber(participant, handle) }
        })
    }

    /// Delete every topic, publisher and subscriber (and their contents).
    pub fn delete_contained_entities(&self) -> Result<()> {
        let api = self.core.api();
        let participant = self.core.handle();
        self.core.delete_contained(|| {
            // SAFETY: `participant` belongs to a live wrapper.
            unsafe { api.participant_delete_contained_entities(participant) }
        })
    }

    pub fn domain_id(&self) -> i32 {
        // SAFETY: `handle` belongs to a live wrapper.
        unsafe { self.core.api().participant_domain_id(self.core.handle()) }
    }

    pub fn qos(&self) -> Result<DomainParticipantQos> {
        let api = self.core.api();
        read_native(|out: &mut DdsDomainParticipantQos| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.participant_get_qos(self.core.handle(), out) }
        })
    }

    pub fn set_qos(&self, qos: &DomainParticipantQos) -> Result<()> {
        let api = self.core.api();
        crate::error::check(with_native(qos, |native| {
            // SAFETY: layout outlives the call.
            unsafe { api.participant_set_qos(self.core.handle(), native) }
        }))
    }
}
