// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Guard, status, read and query conditions through the loopback backend.

use std::sync::Arc;

use anyhow::Result;
use dds_bridge::{
    DataReader, DataReaderQos, DomainEntity, Entity, Error, InstanceStateMask, Loopback,
    ParticipantFactory, SampleStateMask, StatusMask, SubscriberQos, TopicQos, ViewStateMask,
};

struct Fixture {
    loopback: Arc<Loopback>,
    factory: ParticipantFactory,
    reader: DataReader,
}

fn fixture() -> Result<Fixture> {
    let loopback = Arc::new(Loopback::new());
    let factory = ParticipantFactory::new(loopback.clone());
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("Square", "ShapeType", &TopicQos::default())?;
    let subscriber = participant.create_subscriber(&SubscriberQos::default())?;
    let reader = subscriber.create_datareader(&topic, &DataReaderQos::default())?;
    Ok(Fixture {
        loopback,
        factory,
        reader,
    })
}

#[test]
fn test_guard_condition_trigger() -> Result<()> {
    let f = fixture()?;
    let guard = f.factory.create_guard_condition()?;
    assert!(!guard.trigger_value());
    guard.set_trigger_value(true)?;
    assert!(guard.trigger_value());
    guard.set_trigger_value(false)?;
    assert!(!guard.trigger_value());

    f.factory.delete_guard_condition(&guard)?;
    assert!(!f.factory.registry().contains(guard.handle()));
    assert!(!f.loopback.contains(guard.handle()));
    Ok(())
}

#[test]
fn test_status_condition_follows_enabled_statuses() -> Result<()> {
    let f = fixture()?;
    let condition = f.reader.status_condition()?;
    assert_eq!(f.reader.status_condition()?, condition);
    assert_eq!(condition.enabled_statuses(), StatusMask::ALL);
    assert!(!condition.trigger_value());

    assert!(f
        .loopback
        .set_status_changes(f.reader.handle(), StatusMask::SAMPLE_LOST.bits()));
    assert!(f.reader.status_changes().contains(StatusMask::SAMPLE_LOST));
    assert!(condition.trigger_value());

    condition.set_enabled_statuses(StatusMask::DATA_AVAILABLE)?;
    assert_eq!(condition.enabled_statuses(), StatusMask::DATA_AVAILABLE);
    assert!(!condition.trigger_value());

    // Reading the status clears its change bit.
    condition.set_enabled_statuses(StatusMask::ALL)?;
    f.reader.sample_lost_status()?;
    assert!(f.reader.status_changes().is_empty());
    assert!(!condition.trigger_value());
    Ok(())
}

#[test]
fn test_status_condition_entity() -> Result<()> {
    let f = fixture()?;
    let condition = f.reader.status_condition()?;
    match condition.entity()? {
        Entity::DataReader(reader) => assert_eq!(reader, f.reader),
        other => panic!("unexpected entity {:?}", other),
    }
    Ok(())
}

#[test]
fn test_read_condition_masks() -> Result<()> {
    let f = fixture()?;
    let condition = f.reader.create_read_condition(
        SampleStateMask::NOT_READ,
        ViewStateMask::ANY,
        InstanceStateMask::ALIVE,
    )?;
    assert_eq!(condition.sample_state_mask(), SampleStateMask::NOT_READ);
    assert_eq!(condition.view_state_mask(), ViewStateMask::ANY);
    assert_eq!(condition.instance_state_mask(), InstanceStateMask::ALIVE);
    assert_eq!(condition.datareader()?, f.reader);
    assert!(!condition.trigger_value());

    // A reader with conditions cannot be deleted.
    let subscriber = f.reader.subscriber()?;
    assert!(matches!(
        subscriber.delete_datareader(&f.reader),
        Err(Error::PreconditionNotMet)
    ));
    f.reader.delete_read_condition(&condition)?;
    assert!(!f.factory.registry().contains(condition.handle()));
    subscriber.delete_datareader(&f.reader)?;
    Ok(())
}

#[test]
fn test_query_condition_expression_and_parameters() -> Result<()> {
    let f = fixture()?;
    let condition = f.reader.create_query_condition(
        SampleStateMask::ANY,
        ViewStateMask::NEW,
        InstanceStateMask::NOT_ALIVE,
        "x > %0 AND color = %1",
        &["10", "BLUE"],
    )?;
    assert_eq!(condition.query_expression()?, "x > %0 AND color = %1");
    assert_eq!(condition.query_parameters()?, vec!["10", "BLUE"]);
    assert_eq!(condition.instance_state_mask(), InstanceStateMask::NOT_ALIVE);
    assert_eq!(condition.datareader()?, f.reader);

    condition.set_query_parameters(&["20", "RED"])?;
    assert_eq!(condition.query_parameters()?, vec!["20", "RED"]);

    let empty: [&str; 0] = [];
    condition.set_query_parameters(&empty)?;
    assert!(condition.query_parameters()?.is_empty());

    assert!(matches!(
        condition.set_query_parameters(&["bad\0"]),
        Err(Error::Nul(_))
    ));

    f.reader.delete_query_condition(&condition)?;
    assert!(!f.loopback.contains(condition.handle()));
    Ok(())
}

#[test]
fn test_query_condition_rejects_empty_expression() -> Result<()> {
    let f = fixture()?;
    let before = f.loopback.object_count();
    let none: [&str; 0] = [];
    assert!(matches!(
        f.reader.create_query_condition(
            SampleStateMask::ANY,
            ViewStateMask::ANY,
            InstanceStateMask::ANY,
            "",
            &none,
        ),
        Err(Error::BadParameter)
    ));
    assert_eq!(f.loopback.object_count(), before);
    Ok(())
}

#[test]
fn test_query_parameters_with_nul_are_rejected_on_create_and_rebind() -> Result<()> {
    let f = fixture()?;
    let before = f.loopback.object_count();
    assert!(matches!(
        f.reader.create_query_condition(
            SampleStateMask::ANY,
            ViewStateMask::ANY,
            InstanceStateMask::ANY,
            "x > %0",
            &["a\0b"],
        ),
        Err(Error::Nul(_))
    ));
    assert_eq!(f.loopback.object_count(), before);

    let condition = f.reader.create_query_condition(
        SampleStateMask::ANY,
        ViewStateMask::ANY,
        InstanceStateMask::ANY,
        "x > %0",
        &["a"],
    )?;
    assert!(matches!(
        condition.set_query_parameters(&["a\0b"]),
        Err(Error::Nul(_))
    ));
    assert_eq!(condition.query_parameters()?, vec!["a"]);
    Ok(())
}

#[test]
fn test_reader_delete_contained_keeps_status_condition() -> Result<()> {
    let f = fixture()?;
    let status = f.reader.status_condition()?;
    let read = f.reader.create_read_condition(
        SampleStateMask::ANY,
        ViewStateMask::ANY,
        InstanceStateMask::ANY,
    )?;
    let query = f.reader.create_query_condition(
        SampleStateMask::ANY,
        ViewStateMask::ANY,
        InstanceStateMask::ANY,
        "x > 0",
        &Vec::<String>::new(),
    )?;

    f.reader.delete_contained_entities()?;
    let registry = f.factory.registry();
    assert!(!registry.contains(read.handle()));
    assert!(!registry.contains(query.handle()));
    assert!(registry.contains(status.handle()));
    assert!(f.loopback.contains(status.handle()));
    Ok(())
}
