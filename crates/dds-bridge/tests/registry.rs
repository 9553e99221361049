// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic

//! Handle identity registry: one wrapper per live native handle.

use std::sync::Arc;
use std::thread;

use anyhow::Result;
use dds_bridge::{
    Condition, DataWriterQos, DomainEntity, DomainParticipant, Entity, Error, Handle, Loopback,
    ParticipantFactory, PublisherQos, TopicQos, Wrapper,
};

fn factory() -> ParticipantFactory {
    ParticipantFactory::new(Arc::new(Loopback::new()))
}

#[test]
fn test_same_handle_same_wrapper() -> Result<()> {
    let factory = factory();
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;

    // Resolved twice through different paths: identical wrapper.
    let via_topic = topic.participant()?;
    let via_lookup = factory.lookup_participant(0)?.expect("participant on domain 0");
    assert_eq!(via_topic, participant);
    assert_eq!(via_lookup, participant);

    let found = factory.registry().find(topic.handle()).expect("registered");
    assert_eq!(found, Wrapper::Entity(Entity::Topic(topic.clone())));
    assert_eq!(found.kind_name(), "topic");
    Ok(())
}

#[test]
fn test_duplicate_add_is_rejected() -> Result<()> {
    let factory = factory();
    let participant = factory.create_participant_default()?;
    let registry = factory.registry();

    let err = registry
        .add(participant.handle(), participant.clone().into())
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateHandle(h) if h == participant.handle()));

    assert!(matches!(
        registry.add(Handle::NULL, participant.clone().into()),
        Err(Error::BadParameter)
    ));
    assert_eq!(registry.len(), 1);
    Ok(())
}

#[test]
fn test_null_handle_is_never_registered() {
    let factory = factory();
    assert!(factory.registry().find(Handle::NULL).is_none());
    assert!(!factory.registry().contains(Handle::NULL));
}

#[test]
fn test_wrong_kind_conversion() -> Result<()> {
    let factory = factory();
    let participant = factory.create_participant_default()?;
    let wrapper: Wrapper = participant.clone().into();

    let err = dds_bridge::Topic::try_from(wrapper.clone()).unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedKind {
            expected: "topic",
            found: "participant",
            ..
        }
    ));
    assert_eq!(DomainParticipant::try_from(wrapper)?, participant);
    Ok(())
}

#[test]
fn test_subtree_is_children_first() -> Result<()> {
    let factory = factory();
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;
    let writer = publisher.create_datawriter(&topic, &DataWriterQos::default())?;

    let subtree = Wrapper::from(participant.clone()).subtree();
    let pos = |h: Handle| subtree.iter().position(|w| w.handle() == h).expect("in subtree");
    assert_eq!(subtree.len(), 4);
    assert!(pos(writer.handle()) < pos(publisher.handle()));
    assert_eq!(pos(participant.handle()), subtree.len() - 1);
    Ok(())
}

#[test]
fn test_remove_subtree_detaches_descendants() -> Result<()> {
    let factory = factory();
    let participant = factory.create_participant_default()?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;
    let condition = publisher.status_condition()?;
    let other = factory.create_participant(1, &Default::default())?;

    let removed = factory.registry().remove_subtree(&participant.clone().into());
    assert_eq!(removed, 3);
    assert!(!factory.registry().contains(condition.handle()));
    assert!(factory.registry().contains(other.handle()));
    Ok(())
}

#[test]
fn test_teardown_empties_registry() -> Result<()> {
    let factory = factory();
    let participant = factory.create_participant_default()?;
    participant.create_publisher(&PublisherQos::default())?;
    let guard = factory.create_guard_condition()?;
    assert!(matches!(
        factory.registry().find(guard.handle()),
        Some(Wrapper::Condition(Condition::Guard(_)))
    ));

    assert_eq!(factory.registry().teardown(), 3);
    assert!(factory.registry().is_empty());
    assert_eq!(factory.registry().teardown(), 0);
    Ok(())
}

#[test]
fn test_concurrent_resolution_yields_one_wrapper() -> Result<()> {
    let factory = Arc::new(factory());
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;

    // Forget the participant so every thread races to rebuild it.
    factory.registry().remove(participant.handle());

    let threads: Vec<_> = (0..8)
        .map(|_| {
            let topic = topic.clone();
            thread::spawn(move || {
                (0..50)
                    .map(|_| topic.participant())
                    .collect::<Result<Vec<_>, _>>()
            })
        })
        .collect();

    let mut resolved = Vec::new();
    for t in threads {
        resolved.extend(t.join().expect("resolver thread")?);
    }
    let first = &resolved[0];
    assert_ne!(*first, participant);
    assert!(resolved.iter().all(|p| p == first));
    assert_eq!(factory.registry().find(participant.handle()), Some(first.clone().into()));
    Ok(())
}
