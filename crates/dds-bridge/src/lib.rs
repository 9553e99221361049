// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dds-bridge
//!
//! Safe boundary layer over a native C-ABI DDS middleware.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dds_bridge::{Loopback, ParticipantFactory, Result, TopicQos};
//!
//! fn main() -> Result<()> {
//!     let factory = ParticipantFactory::new(Arc::new(Loopback::new()));
//!     let participant = factory.create_participant_default()?;
//!     let topic = participant.create_topic("Square", "ShapeType", &TopicQos::default())?;
//!     assert_eq!(topic.name()?, "Square");
//!     factory.shutdown()
//! }
//! ```
//!
//! ## Layers
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |  Entities & conditions: ParticipantFactory -> DomainParticipant ... |
//! +---------------------------------------------------------------------+
//! |  Identity registry: one wrapper per live native handle              |
//! +---------------------------------------------------------------------+
//! |  Value objects: QoS policies, statuses (allocation ledgers)         |
//! +---------------------------------------------------------------------+
//! |  Marshaling: fixed-width codec, length-prefixed sequences           |
//! +---------------------------------------------------------------------+
//! |  NativeApi: NativeLibrary (feature `native`) | Loopback             |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`entity`] - Entity wrappers (start here)
//! - [`condition`] - Guard, status, read and query conditions
//! - [`qos`] - QoS policies and per-entity QoS sets
//! - [`status`] - Communication status values
//! - [`registry`] - Handle identity registry
//! - [`native`] - Native API seam
//! - [`loopback`] - In-process backend
//! - [`sequence`], [`codec`], [`memory`] - Marshaling primitives

pub mod codec;
pub mod condition;
pub mod config;
pub mod convert;
pub mod entity;
pub mod error;
pub mod logging;
pub mod loopback;
pub mod memory;
pub mod native;
pub mod qos;
pub mod registry;
pub mod sequence;
pub mod status;
pub mod time;

pub use condition::{
    GuardCondition, InstanceStateMask, QueryCondition, ReadCondition, SampleStateMask,
    StatusCondition, StatusMask, ViewStateMask,
};
pub use config::BridgeConfig;
pub use convert::{NativeConvert, Release};
pub use entity::{
    DataReader, DataWriter, DomainEntity, DomainParticipant, ParticipantFactory, Publisher,
    Subscriber, Topic,
};
pub use error::{Error, Result, ReturnCode};
pub use loopback::Loopback;
#[cfg(feature = "native")]
pub use native::NativeLibrary;
pub use native::NativeApi;
pub use qos::{
    DataReaderQos, DataWriterQos, DomainParticipantFactoryQos, DomainParticipantQos, PublisherQos,
    SubscriberQos, TopicQos,
};
pub use registry::{Condition, Entity, HandleRegistry, Wrapper};
pub use time::Duration;

pub use dds_sys::Handle;
