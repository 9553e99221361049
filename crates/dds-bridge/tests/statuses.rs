// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Communication statuses: values injected into the loopback come back
//! through the wrappers, and reading a status resets its change counters.

use std::sync::Arc;

use anyhow::Result;
use dds_bridge::status::{
    OfferedIncompatibleQosStatus, PublicationMatchedStatus, QosPolicyCount,
    RequestedIncompatibleQosStatus, SampleRejectedStatus, SampleRejectedStatusKind,
    SubscriptionMatchedStatus,
};
use dds_bridge::{
    DataReader, DataReaderQos, DataWriter, DataWriterQos, DomainEntity, Loopback, NativeConvert,
    ParticipantFactory, PublisherQos, StatusMask, SubscriberQos, TopicQos,
};

struct Endpoints {
    loopback: Arc<Loopback>,
    _factory: ParticipantFactory,
    writer: DataWriter,
    reader: DataReader,
}

fn endpoints() -> Result<Endpoints> {
    let loopback = Arc::new(Loopback::new());
    let factory = ParticipantFactory::new(loopback.clone());
    let participant = factory.create_participant_default()?;
    let topic = participant.create_topic("T", "Ty", &TopicQos::default())?;
    let writer = participant
        .create_publisher(&PublisherQos::default())?
        .create_datawriter(&topic, &DataWriterQos::default())?;
    let reader = participant
        .create_subscriber(&SubscriberQos::default())?
        .create_datareader(&topic, &DataReaderQos::default())?;
    Ok(Endpoints {
        loopback,
        _factory: factory,
        writer,
        reader,
    })
}

#[test]
fn test_publication_matched_resets_changes() -> Result<()> {
    let e = endpoints()?;
    let injected = PublicationMatchedStatus {
        total_count: 3,
        total_count_change: 2,
        current_count: 1,
        current_count_change: 1,
        last_subscription_handle: e.reader.instance_handle(),
    };
    assert!(e.loopback.inject_publication_matched(e.writer.handle(), injected));
    assert!(e.writer.status_changes().contains(StatusMask::PUBLICATION_MATCHED));

    assert_eq!(e.writer.publication_matched_status()?, injected);
    let again = e.writer.publication_matched_status()?;
    assert_eq!(again.total_count, 3);
    assert_eq!(again.total_count_change, 0);
    assert_eq!(again.current_count_change, 0);
    assert!(!e.writer.status_changes().contains(StatusMask::PUBLICATION_MATCHED));
    Ok(())
}

#[test]
fn test_subscription_matched() -> Result<()> {
    let e = endpoints()?;
    let injected = SubscriptionMatchedStatus {
        total_count: 1,
        total_count_change: 1,
        current_count: 1,
        current_count_change: 1,
        last_publication_handle: e.writer.instance_handle(),
    };
    assert!(e.loopback.inject_subscription_matched(e.reader.handle(), injected));
    assert_eq!(e.reader.subscription_matched_status()?, injected);
    // Wrong role: a writer has no subscription-matched status.
    assert!(!e.loopback.inject_subscription_matched(e.writer.handle(), injected));
    Ok(())
}

#[test]
fn test_incompatible_qos_policy_lists() -> Result<()> {
    let e = endpoints()?;
    let mut offered = OfferedIncompatibleQosStatus::default();
    offered.total_count = 2;
    offered.total_count_change = 2;
    offered.last_policy_id = 11;
    offered.policies = vec![QosPolicyCount::new(11, 1), QosPolicyCount::new(2, 1)];
    assert!(e.loopback.inject_offered_incompatible_qos(e.writer.handle(), offered.clone()));

    let read = e.writer.offered_incompatible_qos_status()?;
    assert_eq!(read, offered);
    assert_eq!(read.outstanding(), 0);

    let again = e.writer.offered_incompatible_qos_status()?;
    assert_eq!(again.total_count_change, 0);
    assert_eq!(again.policies, offered.policies);

    let mut requested = RequestedIncompatibleQosStatus::default();
    requested.total_count = 1;
    requested.total_count_change = 1;
    requested.last_policy_id = 4;
    requested.policies = vec![QosPolicyCount::new(4, 1)];
    assert!(e.loopback.inject_requested_incompatible_qos(e.reader.handle(), requested.clone()));
    assert_eq!(e.reader.requested_incompatible_qos_status()?, requested);
    Ok(())
}

#[test]
fn test_sample_rejected_reason() -> Result<()> {
    let e = endpoints()?;
    let injected = SampleRejectedStatus {
        total_count: 5,
        total_count_change: 5,
        last_reason: SampleRejectedStatusKind::BySamplesLimit,
        last_instance_handle: 42,
    };
    assert!(e.loopback.inject_sample_rejected(e.reader.handle(), injected));
    let read = e.reader.sample_rejected_status()?;
    assert_eq!(read.last_reason, SampleRejectedStatusKind::BySamplesLimit);
    assert_eq!(read, injected);
    Ok(())
}

#[test]
fn test_untouched_statuses_are_zero() -> Result<()> {
    let e = endpoints()?;
    assert_eq!(e.writer.offered_deadline_missed_status()?, Default::default());
    assert_eq!(e.writer.liveliness_lost_status()?, Default::default());
    assert_eq!(e.reader.requested_deadline_missed_status()?, Default::default());
    assert_eq!(e.reader.sample_lost_status()?, Default::default());
    assert_eq!(e.reader.liveliness_changed_status()?, Default::default());
    assert_eq!(e.writer.topic()?.inconsistent_topic_status()?, Default::default());
    Ok(())
}
