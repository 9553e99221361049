// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure
#![allow(clippy::too_many_lines)] // Scenario tests

//! Entity lifecycle through the loopback backend.
//!
//! Covers creation, containment, deletion ordering, enablement and the
//! argument checks performed before any native call.

use std::sync::Arc;

use anyhow::Result;
use dds_bridge::qos::{EntityFactory, History, ResourceLimits};
use dds_bridge::{
    BridgeConfig, DataReaderQos, DataWriterQos, DomainEntity, DomainParticipantFactoryQos,
    DomainParticipantQos, Duration, Entity, Error, Loopback, ParticipantFactory, PublisherQos,
    SubscriberQos, TopicQos, Wrapper,
};

fn setup() -> (Arc<Loopback>, ParticipantFactory) {
    let loopback = Arc::new(Loopback::new());
    let factory = ParticipantFactory::new(loopback.clone());
    (loopback, factory)
}

#[test]
fn test_full_tree_and_shutdown() -> Result<()> {
    let (loopback, factory) = setup();
    let participant = factory.create_participant(3, &DomainParticipantQos::default())?;
    let topic = participant.create_topic("Square", "ShapeType", &TopicQos::default())?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;
    let subscriber = participant.create_subscriber(&SubscriberQos::default())?;
    let writer = publisher.create_datawriter(&topic, &DataWriterQos::default())?;
    let reader = subscriber.create_datareader(&topic, &DataReaderQos::default())?;

    assert_eq!(participant.domain_id(), 3);
    assert_eq!(topic.name()?, "Square");
    assert_eq!(topic.type_name()?, "ShapeType");
    assert_eq!(writer.topic()?, topic);
    assert_eq!(reader.topic_description()?, topic);
    assert_eq!(writer.publisher()?, publisher);
    assert_eq!(reader.subscriber()?, subscriber);
    assert_eq!(publisher.participant()?, participant);
    assert_eq!(subscriber.participant()?, participant);
    assert_eq!(topic.participant()?, participant);

    // participant, topic, publisher, subscriber, writer, reader
    assert_eq!(factory.registry().len(), 6);
    assert_eq!(loopback.object_count(), 6);

    factory.shutdown()?;
    assert!(factory.registry().is_empty());
    assert_eq!(loopback.object_count(), 0);
    assert!(factory.children().is_empty());
    Ok(())
}

#[test]
fn test_delete_with_children_is_refused_and_restored() -> Result<()> {
    let (_loopback, factory) = setup();
    let participant = factory.create_participant_default()?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;

    let err = factory.delete_participant(&participant).unwrap_err();
    assert!(matches!(err, Error::PreconditionNotMet));

    // Nothing was lost from the registry by the refused deletion.
    assert!(factory.registry().contains(participant.handle()));
    assert!(factory.registry().contains(publisher.handle()));
    assert_eq!(publisher.participant()?, participant);

    participant.delete_publisher(&publisher)?;
    factory.delete_participant(&participant)?;
    assert!(factory.registry().is_empty());
    Ok(())
}

#[test]
fn test_topic_in_use_cannot_be_deleted() -> Result<()> {
    let (_loopback, factory) = setup();
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;
    let writer = publisher.create_datawriter(&topic, &DataWriterQos::default())?;

    assert!(matches!(
        participant.delete_topic(&topic),
        Err(Error::PreconditionNotMet)
    ));
    publisher.delete_datawriter(&writer)?;
    participant.delete_topic(&topic)?;
    assert!(!factory.registry().contains(topic.handle()));
    Ok(())
}

#[test]
fn test_delete_contained_removes_writers_and_their_conditions() -> Result<()> {
    let (loopback, factory) = setup();
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;
    let own_condition = publisher.status_condition()?;
    let w1 = publisher.create_datawriter(&topic, &DataWriterQos::default())?;
    let w2 = publisher.create_datawriter(&topic, &DataWriterQos::default())?;
    let w1_condition = w1.status_condition()?;

    publisher.delete_contained_entities()?;

    let registry = factory.registry();
    assert!(!registry.contains(w1.handle()));
    assert!(!registry.contains(w2.handle()));
    assert!(!registry.contains(w1_condition.handle()));
    assert!(!loopback.contains(w1_condition.handle()));
    // The publisher keeps its own status condition.
    assert!(registry.contains(own_condition.handle()));
    assert_eq!(publisher.children().len(), 1);
    assert_eq!(publisher.status_condition()?, own_condition);

    participant.delete_publisher(&publisher)?;
    assert!(!registry.contains(own_condition.handle()));
    Ok(())
}

#[test]
fn test_empty_names_are_rejected_before_native() -> Result<()> {
    let (loopback, factory) = setup();
    let participant = factory.create_participant_default()?;
    let before = loopback.object_count();

    assert!(matches!(
        participant.create_topic("", "Ty", &TopicQos::default()),
        Err(Error::BadParameter)
    ));
    assert!(matches!(
        participant.create_topic("T", "", &TopicQos::default()),
        Err(Error::BadParameter)
    ));
    assert!(matches!(participant.find_topic("", None), Err(Error::BadParameter)));
    assert!(matches!(
        participant.lookup_topic_description(""),
        Err(Error::BadParameter)
    ));
    assert!(matches!(
        participant.create_topic("T\0x", "Ty", &TopicQos::default()),
        Err(Error::Nul(_))
    ));

    assert_eq!(loopback.object_count(), before);
    Ok(())
}

#[test]
fn test_native_refusal_maps_to_error() -> Result<()> {
    let (_loopback, factory) = setup();
    // Out of the valid domain range: the backend returns a null handle.
    assert!(matches!(
        factory.create_participant(500, &DomainParticipantQos::default()),
        Err(Error::Error)
    ));

    let participant = factory.create_participant_default()?;
    let mut qos = TopicQos::default();
    qos.history = History::keep_last(10);
    qos.resource_limits = ResourceLimits {
        max_samples_per_instance: 5,
        ..ResourceLimits::default()
    };
    assert!(matches!(
        participant.create_topic("T", "Ty", &qos),
        Err(Error::Error)
    ));
    Ok(())
}

#[test]
fn test_find_and_lookup() -> Result<()> {
    let (_loopback, factory) = setup();
    let participant = factory.create_participant(7, &DomainParticipantQos::default())?;
    let topic = participant.create_topic("Found", "Ty", &TopicQos::default())?;

    assert_eq!(participant.find_topic("Found", Some(Duration::ZERO))?, topic);
    assert!(matches!(
        participant.find_topic("Missing", Some(Duration::from_millis(10))),
        Err(Error::Timeout)
    ));
    assert_eq!(participant.lookup_topic_description("Found")?, Some(topic.clone()));
    assert_eq!(participant.lookup_topic_description("Missing")?, None);

    assert_eq!(factory.lookup_participant(7)?, Some(participant.clone()));
    assert_eq!(factory.lookup_participant(8)?, None);

    let publisher = participant.create_publisher(&PublisherQos::default())?;
    let writer = publisher.create_datawriter(&topic, &DataWriterQos::default())?;
    assert_eq!(publisher.lookup_datawriter("Found")?, Some(writer));
    assert_eq!(publisher.lookup_datawriter("Missing")?, None);

    let subscriber = participant.create_subscriber(&SubscriberQos::default())?;
    let reader = subscriber.create_datareader(&topic, &DataReaderQos::default())?;
    assert_eq!(subscriber.lookup_datareader("Found")?, Some(reader));
    assert!(matches!(subscriber.lookup_datareader(""), Err(Error::BadParameter)));

    factory.shutdown()?;
    Ok(())
}

#[test]
fn test_enable_below_disabled_factory() -> Result<()> {
    let (_loopback, factory) = setup();
    factory.set_qos(&DomainParticipantFactoryQos {
        entity_factory: EntityFactory::manual_enable(),
    })?;
    assert_eq!(factory.qos()?.entity_factory, EntityFactory::manual_enable());

    let participant = factory.create_participant_default()?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;

    // The participant itself is not enabled yet.
    assert!(matches!(publisher.enable(), Err(Error::PreconditionNotMet)));

    participant.enable()?;
    participant.enable()?;
    publisher.enable()?;
    Ok(())
}

#[test]
fn test_assert_liveliness_requires_enabled_writer() -> Result<()> {
    let (_loopback, factory) = setup();
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;
    let publisher = participant.create_publisher(&PublisherQos {
        entity_factory: EntityFactory::manual_enable(),
        ..PublisherQos::default()
    })?;
    let writer = publisher.create_datawriter(&topic, &DataWriterQos::default())?;

    assert!(matches!(writer.assert_liveliness(), Err(Error::NotEnabled)));
    writer.enable()?;
    writer.assert_liveliness()?;
    Ok(())
}

#[test]
fn test_children_and_instance_handles() -> Result<()> {
    let (_loopback, factory) = setup();
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;

    let children = participant.children();
    assert_eq!(children.len(), 2);
    assert!(children.contains(&Wrapper::Entity(Entity::Topic(topic.clone()))));
    assert!(children.contains(&publisher.clone().into()));

    assert_ne!(topic.instance_handle(), publisher.instance_handle());
    assert_ne!(topic.instance_handle(), dds_sys::DDS_HANDLE_NIL);
    Ok(())
}

#[test]
fn test_default_participant_uses_configured_domain() -> Result<()> {
    let config = BridgeConfig {
        domain_id: 12,
        ..BridgeConfig::default()
    };
    let factory = ParticipantFactory::with_config(Arc::new(Loopback::new()), config);
    let participant = factory.create_participant_default()?;
    assert_eq!(participant.domain_id(), 12);
    assert_eq!(factory.config().domain_id, 12);
    Ok(())
}

#[test]
fn test_dropping_factory_tears_down_tree() -> Result<()> {
    let (loopback, factory) = setup();
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;
    publisher.create_datawriter(&topic, &DataWriterQos::default())?;
    factory.create_guard_condition()?;
    drop((participant, topic, publisher));
    assert!(loopback.object_count() > 0);

    drop(factory);
    assert_eq!(loopback.object_count(), 0);
    assert_eq!(Arc::strong_count(&loopback), 1);
    Ok(())
}

#[test]
fn test_dropping_factory_after_shutdown_is_quiet() -> Result<()> {
    let (loopback, factory) = setup();
    factory.create_participant_default()?;
    factory.shutdown()?;
    drop(factory);
    assert_eq!(loopback.object_count(), 0);
    assert_eq!(Arc::strong_count(&loopback), 1);
    Ok(())
}
