// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native entry points.
//!
//! Conventions shared by every function:
//! - handles are opaque and may be null (a null return means failure),
//! - strings are NUL-terminated UTF-8, borrowed for the duration of the call,
//! - `*const` QoS arguments are read during the call only,
//! - `*mut` out-parameters may be filled with pointers into memory owned by
//!   the library; that memory stays valid until the next call of the same
//!   getter on the same handle, or until the handle is deleted.

#![allow(non_snake_case)]

use std::os::raw::c_char;

use crate::{
    DdsDataReaderQos, DdsDataWriterQos, DdsDomainParticipantFactoryQos, DdsDomainParticipantQos,
    DdsDuration, DdsInconsistentTopicStatus, DdsInstanceHandle, DdsLivelinessChangedStatus,
    DdsLivelinessLostStatus, DdsOfferedDeadlineMissedStatus, DdsOfferedIncompatibleQosStatus,
    DdsPublicationMatchedStatus, DdsPublisherQos, DdsRequestedDeadlineMissedStatus,
    DdsRequestedIncompatibleQosStatus, DdsReturnCode, DdsSampleLostStatus,
    DdsSampleRejectedStatus, DdsSequence, DdsSubscriberQos, DdsSubscriptionMatchedStatus,
    DdsTopicQos, Handle,
};

extern "C" {
    // =========================================================================
    // DomainParticipantFactory
    // =========================================================================

    pub fn DomainParticipantFactory_GetQos(qos: *mut DdsDomainParticipantFactoryQos)
        -> DdsReturnCode;
    pub fn DomainParticipantFactory_SetQos(
        qos: *const DdsDomainParticipantFactoryQos,
    ) -> DdsReturnCode;
    pub fn DomainParticipantFactory_CreateParticipant(
        domain_id: i32,
        qos: *const DdsDomainParticipantQos,
    ) -> Handle;
    pub fn DomainParticipantFactory_DeleteParticipant(participant: Handle) -> DdsReturnCode;
    pub fn DomainParticipantFactory_LookupParticipant(domain_id: i32) -> Handle;

    // =========================================================================
    // DomainParticipant
    // =========================================================================

    pub fn DomainParticipant_CreateTopic(
        participant: Handle,
        topic_name: *const c_char,
        type_name: *const c_char,
        qos: *const DdsTopicQos,
    ) -> Handle;
    pub fn DomainParticipant_DeleteTopic(participant: Handle, topic: Handle) -> DdsReturnCode;
    pub fn DomainParticipant_FindTopic(
        participant: Handle,
        topic_name: *const c_char,
        timeout: DdsDuration,
    ) -> Handle;
    pub fn DomainParticipant_LookupTopicDescription(
        participant: Handle,
        name: *const c_char,
    ) -> Handle;
    pub fn DomainParticipant_CreatePublisher(
        participant: Handle,
        qos: *const DdsPublisherQos,
    ) -> Handle;
    pub fn DomainParticipant_DeletePublisher(
        participant: Handle,
        publisher: Handle,
    ) -> DdsReturnCode;
    pub fn DomainParticipant_CreateSubscriber(
        participant: Handle,
        qos: *const DdsSubscriberQos,
    ) -> Handle;
    pub fn DomainParticipant_DeleteSubscriber(
        participant: Handle,
        subscriber: Handle,
    ) -> DdsReturnCode;
    pub fn DomainParticipant_DeleteContainedEntities(participant: Handle) -> DdsReturnCode;
    pub fn DomainParticipant_GetDomainId(participant: Handle) -> i32;
    pub fn DomainParticipant_GetQos(
        participant: Handle,
        qos: *mut DdsDomainParticipantQos,
    ) -> DdsReturnCode;
    pub fn DomainParticipant_SetQos(
        participant: Handle,
        qos: *const DdsDomainParticipantQos,
    ) -> DdsReturnCode;

    // =========================================================================
    // Topic
    // =========================================================================

    pub fn Topic_GetQos(topic: Handle, qos: *mut DdsTopicQos) -> DdsReturnCode;
    pub fn Topic_SetQos(topic: Handle, qos: *const DdsTopicQos) -> DdsReturnCode;
    pub fn Topic_GetParticipant(topic: Handle) -> Handle;
    pub fn Topic_GetName(topic: Handle) -> *const c_char;
    pub fn Topic_GetTypeName(topic: Handle) -> *const c_char;
    pub fn Topic_GetInconsistentTopicStatus(
        topic: Handle,
        status: *mut DdsInconsistentTopicStatus,
    ) -> DdsReturnCode;

    // =========================================================================
    // Publisher
    // =========================================================================

    pub fn Publisher_CreateDataWriter(
        publisher: Handle,
        topic: Handle,
        qos: *const DdsDataWriterQos,
    ) -> Handle;
    pub fn Publisher_DeleteDataWriter(publisher: Handle, writer: Handle) -> DdsReturnCode;
    pub fn Publisher_LookupDataWriter(publisher: Handle, topic_name: *const c_char) -> Handle;
    pub fn Publisher_DeleteContainedEntities(publisher: Handle) -> DdsReturnCode;
    pub fn Publisher_GetParticipant(publisher: Handle) -> Handle;
    pub fn Publisher_GetQos(publisher: Handle, qos: *mut DdsPublisherQos) -> DdsReturnCode;
    pub fn Publisher_SetQos(publisher: Handle, qos: *const DdsPublisherQos) -> DdsReturnCode;

    // =========================================================================
    // Subscriber
    // =========================================================================

    pub fn Subscriber_CreateDataReader(
        subscriber: Handle,
        topic: Handle,
        qos: *const DdsDataReaderQos,
    ) -> Handle;
    pub fn Subscriber_DeleteDataReader(subscriber: Handle, reader: Handle) -> DdsReturnCode;
    pub fn Subscriber_LookupDataReader(subscriber: Handle, topic_name: *const c_char) -> Handle;
    pub fn Subscriber_DeleteContainedEntities(subscriber: Handle) -> DdsReturnCode;
    pub fn Subscriber_GetParticipant(subscriber: Handle) -> Handle;
    pub fn Subscriber_GetQos(subscriber: Handle, qos: *mut DdsSubscriberQos) -> DdsReturnCode;
    pub fn Subscriber_SetQos(subscriber: Handle, qos: *const DdsSubscriberQos) -> DdsReturnCode;

    // =========================================================================
    // DataWriter
    // =========================================================================

    pub fn DataWriter_GetQos(writer: Handle, qos: *mut DdsDataWriterQos) -> DdsReturnCode;
    pub fn DataWriter_SetQos(writer: Handle, qos: *const DdsDataWriterQos) -> DdsReturnCode;
    pub fn DataWriter_GetPublisher(writer: Handle) -> Handle;
    pub fn DataWriter_GetTopic(writer: Handle) -> Handle;
    pub fn DataWriter_AssertLiveliness(writer: Handle) -> DdsReturnCode;
    pub fn DataWriter_GetPublicationMatchedStatus(
        writer: Handle,
        status: *mut DdsPublicationMatchedStatus,
    ) -> DdsReturnCode;
    pub fn DataWriter_GetOfferedDeadlineMissedStatus(
        writer: Handle,
        status: *mut DdsOfferedDeadlineMissedStatus,
    ) -> DdsReturnCode;
    pub fn DataWriter_GetOfferedIncompatibleQosStatus(
        writer: Handle,
        status: *mut DdsOfferedIncompatibleQosStatus,
    ) -> DdsReturnCode;
    pub fn DataWriter_GetLivelinessLostStatus(
        writer: Handle,
        status: *mut DdsLivelinessLostStatus,
    ) -> DdsReturnCode;

    // =========================================================================
    // DataReader
    // =========================================================================

    pub fn DataReader_GetQos(reader: Handle, qos: *mut DdsDataReaderQos) -> DdsReturnCode;
    pub fn DataReader_SetQos(reader: Handle, qos: *const DdsDataReaderQos) -> DdsReturnCode;
    pub fn DataReader_GetSubscriber(reader: Handle) -> Handle;
    pub fn DataReader_GetTopicDescription(reader: Handle) -> Handle;
    pub fn DataReader_CreateReadCondition(
        reader: Handle,
        sample_states: u32,
        view_states: u32,
        instance_states: u32,
    ) -> Handle;
    pub fn DataReader_CreateQueryCondition(
        reader: Handle,
        sample_states: u32,
        view_states: u32,
        instance_states: u32,
        query_expression: *const c_char,
        query_parameters: DdsSequence,
    ) -> Handle;
    pub fn DataReader_DeleteReadCondition(reader: Handle, condition: Handle) -> DdsReturnCode;
    pub fn DataReader_DeleteContainedEntities(reader: Handle) -> DdsReturnCode;
    pub fn DataReader_GetSubscriptionMatchedStatus(
        reader: Handle,
        status: *mut DdsSubscriptionMatchedStatus,
    ) -> DdsReturnCode;
    pub fn DataReader_GetRequestedDeadlineMissedStatus(
        reader: Handle,
        status: *mut DdsRequestedDeadlineMissedStatus,
    ) -> DdsReturnCode;
    pub fn DataReader_GetRequestedIncompatibleQosStatus(
        reader: Handle,
        status: *mut DdsRequestedIncompatibleQosStatus,
    ) -> DdsReturnCode;
    pub fn DataReader_GetSampleLostStatus(
        reader: Handle,
        status: *mut DdsSampleLostStatus,
    ) -> DdsReturnCode;
    pub fn DataReader_GetSampleRejectedStatus(
        reader: Handle,
        status: *mut DdsSampleRejectedStatus,
    ) -> DdsReturnCode;
    pub fn DataReader_GetLivelinessChangedStatus(
        reader: Handle,
        status: *mut DdsLivelinessChangedStatus,
    ) -> DdsReturnCode;

    // =========================================================================
    // Entity
    // =========================================================================

    pub fn Entity_Enable(entity: Handle) -> DdsReturnCode;
    pub fn Entity_GetStatusCondition(entity: Handle) -> Handle;
    pub fn Entity_GetStatusChanges(entity: Handle) -> u32;
    pub fn Entity_GetInstanceHandle(entity: Handle) -> DdsInstanceHandle;

    // =========================================================================
    // Conditions
    // =========================================================================

    pub fn Condition_GetTriggerValue(condition: Handle) -> bool;

    pub fn GuardCondition_New() -> Handle;
    pub fn GuardCondition_Free(condition: Handle);
    pub fn GuardCondition_SetTriggerValue(condition: Handle, value: bool) -> DdsReturnCode;

    pub fn StatusCondition_GetEnabledStatuses(condition: Handle) -> u32;
    pub fn StatusCondition_SetEnabledStatuses(condition: Handle, mask: u32) -> DdsReturnCode;
    pub fn StatusCondition_GetEntity(condition: Handle) -> Handle;

    pub fn ReadCondition_GetSampleStateMask(condition: Handle) -> u32;
    pub fn ReadCondition_GetViewStateMask(condition: Handle) -> u32;
    pub fn ReadCondition_GetInstanceStateMask(condition: Handle) -> u32;
    pub fn ReadCondition_GetDataReader(condition: Handle) -> Handle;

    pub fn QueryCondition_GetQueryExpression(condition: Handle) -> *const c_char;
    pub fn QueryCondition_GetQueryParameters(
        condition: Handle,
        parameters: *mut DdsSequence,
    ) -> DdsReturnCode;
    pub fn QueryCondition_SetQueryParameters(
        condition: Handle,
        parameters: DdsSequence,
    ) -> DdsReturnCode;
}
