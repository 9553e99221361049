// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QoS value objects.
//!
//! Policies carry DDS default values and compare by value. Every object
//! converts to its native layout with [`NativeConvert`](crate::NativeConvert);
//! collection-valued policies must be released after the call that consumed
//! the native layout.

mod entity_qos;
mod policy;

pub use entity_qos::{
    DataReaderQos, DataWriterQos, DomainParticipantFactoryQos, DomainParticipantQos,
    PublisherQos, SubscriberQos, TopicQos,
};
pub use policy::*;
