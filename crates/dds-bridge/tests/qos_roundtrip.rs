// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::cast_possible_truncation)] // Random test values

//! QoS values survive the trip to the native side and back, and every
//! buffer allocated on the way is released.

use std::sync::Arc;

use anyhow::Result;
use dds_bridge::qos::{
    DataRepresentation, Deadline, Durability, DurabilityKind, GroupData, History, Liveliness,
    LivelinessKind, Partition, Reliability, ResourceLimits, TopicData, UserData,
};
use dds_bridge::{
    DataReaderQos, DataWriterQos, DomainParticipantQos, Duration, Error, Loopback, NativeConvert,
    ParticipantFactory, PublisherQos, SubscriberQos, TopicQos,
};

fn random_bytes(rng: &mut fastrand::Rng) -> Vec<u8> {
    let len = rng.usize(0..32);
    (0..len).map(|_| rng.u8(..)).collect()
}

fn random_duration(rng: &mut fastrand::Rng) -> Duration {
    Duration::new(rng.i32(0..3600), rng.u32(0..1_000_000_000))
}

fn random_topic_qos(rng: &mut fastrand::Rng) -> TopicQos {
    let mut qos = TopicQos::default();
    qos.topic_data = TopicData::new(random_bytes(rng));
    qos.deadline = Deadline {
        period: random_duration(rng),
    };
    qos.liveliness = Liveliness {
        kind: LivelinessKind::ManualByTopic,
        lease_duration: random_duration(rng),
    };
    qos.reliability = Reliability {
        max_blocking_time: random_duration(rng),
        ..Reliability::reliable()
    };
    qos.history = History::keep_last(rng.i32(1..16));
    qos.representation = DataRepresentation::new(vec![DataRepresentation::XCDR2]);
    qos
}

#[test]
fn test_participant_qos_roundtrip() -> Result<()> {
    let factory = ParticipantFactory::new(Arc::new(Loopback::new()));
    let mut qos = DomainParticipantQos::default();
    qos.user_data = UserData::new(b"app=demo".to_vec());
    let participant = factory.create_participant(0, &qos)?;
    assert_eq!(participant.qos()?, qos);

    qos.user_data = UserData::new(Vec::new());
    participant.set_qos(&qos)?;
    let back = participant.qos()?;
    assert!(back.user_data.is_empty());
    assert_eq!(back.outstanding(), 0);
    Ok(())
}

#[test]
fn test_topic_qos_random_roundtrip() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let factory = ParticipantFactory::new(Arc::new(Loopback::new()));
    let participant = factory.create_participant_default()?;
    for i in 0..20 {
        let qos = random_topic_qos(&mut rng);
        let topic = participant.create_topic(&format!("T{i}"), "Ty", &qos)?;
        assert_eq!(topic.qos()?, qos);

        let next = random_topic_qos(&mut rng);
        topic.set_qos(&next)?;
        assert_eq!(topic.qos()?, next);
        // The caller's value never owns foreign memory.
        assert_eq!(next.outstanding(), 0);
    }
    Ok(())
}

#[test]
fn test_group_qos_roundtrip() -> Result<()> {
    let factory = ParticipantFactory::new(Arc::new(Loopback::new()));
    let participant = factory.create_participant_default()?;

    let publisher_qos = PublisherQos {
        partition: Partition::new(["sensors", "*.raw", ""]),
        group_data: GroupData::new(vec![1, 2, 3]),
        ..PublisherQos::default()
    };
    let publisher = participant.create_publisher(&publisher_qos)?;
    assert_eq!(publisher.qos()?, publisher_qos);

    let subscriber_qos = SubscriberQos {
        partition: Partition::new(["sensors"]),
        ..SubscriberQos::default()
    };
    let subscriber = participant.create_subscriber(&subscriber_qos)?;
    assert_eq!(subscriber.qos()?.partition.names, vec!["sensors"]);

    // Partition order matters for equality.
    let reordered = PublisherQos {
        partition: Partition::new(["*.raw", "sensors", ""]),
        ..publisher_qos.clone()
    };
    assert_ne!(reordered, publisher_qos);
    Ok(())
}

#[test]
fn test_endpoint_qos_roundtrip() -> Result<()> {
    let factory = ParticipantFactory::new(Arc::new(Loopback::new()));
    let participant = factory.create_participant_default()?;
    let topic_qos = TopicQos {
        durability: Durability {
            kind: DurabilityKind::TransientLocal,
        },
        ..TopicQos::default()
    };
    let topic = participant.create_topic("T", "Ty", &topic_qos)?;
    let publisher = participant.create_publisher(&PublisherQos::default())?;
    let subscriber = participant.create_subscriber(&SubscriberQos::default())?;

    let writer_qos = DataWriterQos {
        user_data: UserData::new(b"w".to_vec()),
        ..topic_qos.writer_qos()
    };
    let writer = publisher.create_datawriter(&topic, &writer_qos)?;
    assert_eq!(writer.qos()?, writer_qos);
    assert_eq!(writer.qos()?.durability.kind, DurabilityKind::TransientLocal);

    let reader_qos = topic_qos.reader_qos();
    let reader = subscriber.create_datareader(&topic, &reader_qos)?;
    assert_eq!(reader.qos()?, reader_qos);

    let mut changed = reader_qos.clone();
    changed.deadline = Deadline {
        period: Duration::from_millis(250),
    };
    reader.set_qos(&changed)?;
    assert_eq!(reader.qos()?.deadline, changed.deadline);
    Ok(())
}

#[test]
fn test_immutable_and_inconsistent_policies() -> Result<()> {
    let factory = ParticipantFactory::new(Arc::new(Loopback::new()));
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;

    let durable = TopicQos {
        durability: Durability {
            kind: DurabilityKind::Persistent,
        },
        ..TopicQos::default()
    };
    assert!(matches!(topic.set_qos(&durable), Err(Error::ImmutablePolicy)));

    let inconsistent = TopicQos {
        history: History::keep_last(8),
        resource_limits: ResourceLimits {
            max_samples_per_instance: 4,
            ..ResourceLimits::default()
        },
        ..TopicQos::default()
    };
    assert!(matches!(
        topic.set_qos(&inconsistent),
        Err(Error::InconsistentPolicy)
    ));

    // The stored value is untouched by refused updates.
    assert_eq!(topic.qos()?, TopicQos::default());
    Ok(())
}

#[test]
fn test_lent_buffers_are_bounded() -> Result<()> {
    let loopback = Arc::new(Loopback::new());
    let factory = ParticipantFactory::new(loopback.clone());
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;

    for _ in 0..10 {
        topic.qos()?;
    }
    // One slot per (handle, getter): repeated reads reuse it.
    assert_eq!(loopback.lent_count(), 1);

    participant.delete_topic(&topic)?;
    assert_eq!(loopback.lent_count(), 0);
    Ok(())
}

#[test]
fn test_to_native_then_release_leaves_nothing() {
    let mut qos = DataWriterQos {
        user_data: UserData::new(vec![0xAB; 64]),
        representation: DataRepresentation::new(vec![
            DataRepresentation::XCDR,
            DataRepresentation::XCDR2,
        ]),
        ..DataWriterQos::default()
    };
    let _native = qos.to_native();
    assert!(qos.outstanding() > 0);
    qos.release();
    assert_eq!(qos.outstanding(), 0);
    qos.release();
    assert_eq!(qos.outstanding(), 0);
}
