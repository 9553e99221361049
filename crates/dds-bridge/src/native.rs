// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Seam between the object model and the native entry points.
//!
//! [`NativeApi`] has one method per `dds-sys` entry point, with the same
//! arguments and results: raw handles, raw return codes, `#[repr(C)]`
//! layouts. Strings go in as `&CStr` and come back as native-owned
//! `*const c_char`.
//!
//! Two implementations exist: [`NativeLibrary`] (feature `native`) forwards
//! to the linked library, [`Loopback`](crate::Loopback) simulates it in
//! process.

use std::ffi::CStr;
use std::os::raw::c_char;

use dds_sys::{
    DdsDataReaderQos, DdsDataWriterQos, DdsDomainParticipantFactoryQos, DdsDomainParticipantQos,
    DdsDuration, DdsInconsistentTopicStatus, DdsInstanceHandle, DdsLivelinessChangedStatus,
    DdsLivelinessLostStatus, DdsOfferedDeadlineMissedStatus, DdsOfferedIncompatibleQosStatus,
    DdsPublicationMatchedStatus, DdsPublisherQos, DdsRequestedDeadlineMissedStatus,
    DdsRequestedIncompatibleQosStatus, DdsReturnCode, DdsSampleLostStatus,
    DdsSampleRejectedStatus, DdsSequence, DdsSubscriberQos, DdsSubscriptionMatchedStatus,
    DdsTopicQos, Handle,
};

/// Native DDS entry points.
///
/// # Safety
///
/// Every method is `unsafe` for the same reasons as the underlying C
/// functions:
/// - handles must be null or values previously returned by this API and not
///   yet deleted,
/// - sequence pointers inside layouts must be null or valid blocks (see
///   [`crate::sequence`]) for the duration of the call,
/// - pointers written into out-parameters or returned as `*const c_char` are
///   owned by the implementation and stay valid only until the next call of
///   the same getter on the same handle, or until the handle is deleted.
pub trait NativeApi: Send + Sync {
    // DomainParticipantFactory
    unsafe fn factory_get_qos(&self, qos: &mut DdsDomainParticipantFactoryQos) -> DdsReturnCode;
    unsafe fn factory_set_qos(&self, qos: &DdsDomainParticipantFactoryQos) -> DdsReturnCode;
    unsafe fn create_participant(&self, domain_id: i32, qos: &DdsDomainParticipantQos) -> Handle;
    unsafe fn delete_participant(&self, participant: Handle) -> DdsReturnCode;
    unsafe fn lookup_participant(&self, domain_id: i32) -> Handle;

    // DomainParticipant
    unsafe fn create_topic(
        &self,
        participant: Handle,
        topic_name: &CStr,
        type_name: &CStr,
        qos: &DdsTopicQos,
    ) -> Handle;
    unsafe fn delete_topic(&self, participant: Handle, topic: Handle) -> DdsReturnCode;
    unsafe fn find_topic(&self, participant: Handle, topic_name: &CStr, timeout: DdsDuration)
        -> Handle;
    unsafe fn lookup_topic_description(&self, participant: Handle, name: &CStr) -> Handle;
    unsafe fn create_publisher(&self, participant: Handle, qos: &DdsPublisherQos) -> Handle;
    unsafe fn delete_publisher(&self, participant: Handle, publisher: Handle) -> DdsReturnCode;
    unsafe fn create_subscriber(&self, participant: Handle, qos: &DdsSubscriberQos) -> Handle;
    unsafe fn delete_subscriber(&self, participant: Handle, subscriber: Handle) -> DdsReturnCode;
    unsafe fn participant_delete_contained_entities(&self, participant: Handle) -> DdsReturnCode;
    unsafe fn participant_domain_id(&self, participant: Handle) -> i32;
    unsafe fn participant_get_qos(
        &self,
        participant: Handle,
        qos: &mut DdsDomainParticipantQos,
    ) -> DdsReturnCode;
    unsafe fn participant_set_qos(
        &self,
        participant: Handle,
        qos: &DdsDomainParticipantQos,
    ) -> DdsReturnCode;

    // Topic
    unsafe fn topic_get_qos(&self, topic: Handle, qos: &mut DdsTopicQos) -> DdsReturnCode;
    unsafe fn topic_set_qos(&self, topic: Handle, qos: &DdsTopicQos) -> DdsReturnCode;
    unsafe fn topic_participant(&self, topic: Handle) -> Handle;
    unsafe fn topic_name(&self, topic: Handle) -> *const c_char;
    unsafe fn topic_type_name(&self, topic: Handle) -> *const c_char;
    unsafe fn inconsistent_topic_status(
        &self,
        topic: Handle,
        status: &mut DdsInconsistentTopicStatus,
    ) -> DdsReturnCode;

    // Publisher
    unsafe fn create_datawriter(
        &self,
        publisher: Handle,
        topic: Handle,
        qos: &DdsDataWriterQos,
    ) -> Handle;
    unsafe fn delete_datawriter(&self, publisher: Handle, writer: Handle) -> DdsReturnCode;
    unsafe fn lookup_datawriter(&self, publisher: Handle, topic_name: &CStr) -> Handle;
    unsafe fn publisher_delete_contained_entities(&self, publisher: Handle) -> DdsReturnCode;
    unsafe fn publisher_participant(&self, publisher: Handle) -> Handle;
    unsafe fn publisher_get_qos(&self, publisher: Handle, qos: &mut DdsPublisherQos)
        -> DdsReturnCode;
    unsafe fn publisher_set_qos(&self, publisher: Handle, qos: &DdsPublisherQos) -> DdsReturnCode;

    // Subscriber
    unsafe fn create_datareader(
        &self,
        subscriber: Handle,
        topic: Handle,
        qos: &DdsDataReaderQos,
    ) -> Handle;
    unsafe fn delete_datareader(&self, subscriber: Handle, reader: Handle) -> DdsReturnCode;
    unsafe fn lookup_datareader(&self, subscriber: Handle, topic_name: &CStr) -> Handle;
    unsafe fn subscriber_delete_contained_entities(&self, subscriber: Handle) -> DdsReturnCode;
    unsafe fn subscriber_participant(&self, subscriber: Handle) -> Handle;
    unsafe fn subscriber_get_qos(
        &self,
        subscriber: Handle,
        qos: &mut DdsSubscriberQos,
    ) -> DdsReturnCode;
    unsafe fn subscriber_set_qos(&self, subscriber: Handle, qos: &DdsSubscriberQos)
        -> DdsReturnCode;

    // DataWriter
    unsafe fn writer_get_qos(&self, writer: Handle, qos: &mut DdsDataWriterQos) -> DdsReturnCode;
    unsafe fn writer_set_qos(&self, writer: Handle, qos: &DdsDataWriterQos) -> DdsReturnCode;
    unsafe fn writer_publisher(&self, writer: Handle) -> Handle;
    unsafe fn writer_topic(&self, writer: Handle) -> Handle;
    unsafe fn assert_liveliness(&self, writer: Handle) -> DdsReturnCode;
    unsafe fn publication_matched_status(
        &self,
        writer: Handle,
        status: &mut DdsPublicationMatchedStatus,
    ) -> DdsReturnCode;
    unsafe fn offered_deadline_missed_status(
        &self,
        writer: Handle,
        status: &mut DdsOfferedDeadlineMissedStatus,
    ) -> DdsReturnCode;
    unsafe fn offered_incompatible_qos_status(
        &self,
        writer: Handle,
        status: &mut DdsOfferedIncompatibleQosStatus,
    ) -> DdsReturnCode;
    unsafe fn liveliness_lost_status(
        &self,
        writer: Handle,
        status: &mut DdsLivelinessLostStatus,
    ) -> DdsReturnCode;

    // DataReader
    unsafe fn reader_get_qos(&self, reader: Handle, qos: &mut DdsDataReaderQos) -> DdsReturnCode;
    unsafe fn reader_set_qos(&self, reader: Handle, qos: &DdsDataReaderQos) -> DdsReturnCode;
    unsafe fn reader_subscriber(&self, reader: Handle) -> Handle;
    unsafe fn reader_topic_description(&self, reader: Handle) -> Handle;
    unsafe fn create_read_condition(
        &self,
        reader: Handle,
        sample_states: u32,
        view_states: u32,
        instance_states: u32,
    ) -> Handle;
    unsafe fn create_query_condition(
        &self,
        reader: Handle,
        sample_states: u32,
        view_states: u32,
        instance_states: u32,
        query_expression: &CStr,
        query_parameters: DdsSequence,
    ) -> Handle;
    unsafe fn delete_read_condition(&self, reader: Handle, condition: Handle) -> DdsReturnCode;
    unsafe fn reader_delete_contained_entities(&self, reader: Handle) -> DdsReturnCode;
    unsafe fn subscription_matched_status(
        &self,
        reader: Handle,
        status: &mut DdsSubscriptionMatchedStatus,
    ) -> DdsReturnCode;
    unsafe fn requested_deadline_missed_status(
        &self,
        reader: Handle,
        status: &mut DdsRequestedDeadlineMissedStatus,
    ) -> DdsReturnCode;
    unsafe fn requested_incompatible_qos_status(
        &self,
        reader: Handle,
        status: &mut DdsRequestedIncompatibleQosStatus,
    ) -> DdsReturnCode;
    unsafe fn sample_lost_status(&self, reader: Handle, status: &mut DdsSampleLostStatus)
        -> DdsReturnCode;
    unsafe fn sample_rejected_status(
        &self,
        reader: Handle,
        status: &mut DdsSampleRejectedStatus,
    ) -> DdsReturnCode;
    unsafe fn liveliness_changed_status(
        &self,
        reader: Handle,
        status: &mut DdsLivelinessChangedStatus,
    ) -> DdsReturnCode;

    // Entity
    unsafe fn enable(&self, entity: Handle) -> DdsReturnCode;
    unsafe fn status_condition(&self, entity: Handle) -> Handle;
    unsafe fn status_changes(&self, entity: Handle) -> u32;
    unsafe fn instance_handle(&self, entity: Handle) -> DdsInstanceHandle;

    // Conditions
    unsafe fn trigger_value(&self, condition: Handle) -> bool;
    unsafe fn guard_condition_new(&self) -> Handle;
    unsafe fn guard_condition_free(&self, condition: Handle);
    unsafe fn set_guard_trigger_value(&self, condition: Handle, value: bool) -> DdsReturnCode;
    unsafe fn enabled_statuses(&self, condition: Handle) -> u32;
    unsafe fn set_enabled_statuses(&self, condition: Handle, mask: u32) -> DdsReturnCode;
    unsafe fn status_condition_entity(&self, condition: Handle) -> Handle;
    unsafe fn sample_state_mask(&self, condition: Handle) -> u32;
    unsafe fn view_state_mask(&self, condition: Handle) -> u32;
    unsafe fn instance_state_mask(&self, condition: Handle) -> u32;
    unsafe fn read_condition_datareader(&self, condition: Handle) -> Handle;
    unsafe fn query_expression(&self, condition: Handle) -> *const c_char;
    unsafe fn query_parameters(&self, condition: Handle, parameters: &mut DdsSequence)
        -> DdsReturnCode;
    unsafe fn set_query_parameters(&self, condition: Handle, parameters: DdsSequence)
        -> DdsReturnCode;
}

#[cfg(feature = "native")]
pub use library::NativeLibrary;

#[cfg(feature = "native")]
mod library {
    use super::*;
    use dds_sys as sys;

    /// The linked native library.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NativeLibrary;

    impl NativeApi for NativeLibrary {
        unsafe fn factory_get_qos(&self, qos: &mut DdsDomainParticipantFactoryQos) -> DdsReturnCode {
            sys::DomainParticipantFactory_GetQos(qos)
        }
        unsafe fn factory_set_qos(&self, qos: &DdsDomainParticipantFactoryQos) -> DdsReturnCode {
            sys::DomainParticipantFactory_SetQos(qos)
        }
        unsafe fn create_participant(&self, domain_id: i32, qos: &DdsDomainParticipantQos) -> Handle {
            sys::DomainParticipantFactory_CreateParticipant(domain_id, qos)
        }
        unsafe fn delete_participant(&self, participant: Handle) -> DdsReturnCode {
            sys::DomainParticipantFactory_DeleteParticipant(participant)
        }
        unsafe fn lookup_participant(&self, domain_id: i32) -> Handle {
            sys::DomainParticipantFactory_LookupParticipant(domain_id)
        }

        unsafe fn create_topic(
            &self,
            participant: Handle,
            topic_name: &CStr,
            type_name: &CStr,
            qos: &DdsTopicQos,
        ) -> Handle {
            sys::DomainParticipant_CreateTopic(participant, topic_name.as_ptr(), type_name.as_ptr(), qos)
        }
        unsafe fn delete_topic(&self, participant: Handle, topic: Handle) -> DdsReturnCode {
            sys::DomainParticipant_DeleteTopic(participant, topic)
        }
        unsafe fn find_topic(
            &self,
            participant: Handle,
            topic_name: &CStr,
            timeout: DdsDuration,
        ) -> Handle {
            sys::DomainParticipant_FindTopic(participant, topic_name.as_ptr(), timeout)
        }
        unsafe fn lookup_topic_description(&self, participant: Handle, name: &CStr) -> Handle {
            sys::DomainParticipant_LookupTopicDescription(participant, name.as_ptr())
        }
        unsafe fn create_publisher(&self, participant: Handle, qos: &DdsPublisherQos) -> Handle {
            sys::DomainParticipant_CreatePublisher(participant, qos)
        }
        unsafe fn delete_publisher(&self, participant: Handle, publisher: Handle) -> DdsReturnCode {
            sys::DomainParticipant_DeletePublisher(participant, publisher)
        }
        unsafe fn create_subscriber(&self, participant: Handle, qos: &DdsSubscriberQos) -> Handle {
            sys::DomainParticipant_CreateSubscriber(participant, qos)
        }
        unsafe fn delete_subscriber(&self, participant: Handle, subscriber: Handle) -> DdsReturnCode {
            sys::DomainParticipant_DeleteSubscriber(participant, subscriber)
        }
        unsafe fn participant_delete_contained_entities(&self, participant: Handle) -> DdsReturnCode {
            sys::DomainParticipant_DeleteContainedEntities(participant)
        }
        unsafe fn participant_domain_id(&self, participant: Handle) -> i32 {
            sys::DomainParticipant_GetDomainId(participant)
        }
        unsafe fn participant_get_qos(
            &self,
            participant: Handle,
            qos: &mut DdsDomainParticipantQos,
        ) -> DdsReturnCode {
            sys::DomainParticipant_GetQos(participant, qos)
        }
        unsafe fn participant_set_qos(
            &self,
            participant: Handle,
            qos: &DdsDomainParticipantQos,
        ) -> DdsReturnCode {
            sys::DomainParticipant_SetQos(participant, qos)
        }

        unsafe fn topic_get_qos(&self, topic: Handle, qos: &mut DdsTopicQos) -> DdsReturnCode {
            sys::Topic_GetQos(topic, qos)
        }
        unsafe fn topic_set_qos(&self, topic: Handle, qos: &DdsTopicQos) -> DdsReturnCode {
            sys::Topic_SetQos(topic, qos)
        }
        unsafe fn topic_participant(&self, topic: Handle) -> Handle {
            sys::Topic_GetParticipant(topic)
        }
        unsafe fn topic_name(&self, topic: Handle) -> *const c_char {
            sys::Topic_GetName(topic)
        }
        unsafe fn topic_type_name(&self, topic: Handle) -> *const c_char {
            sys::Topic_GetTypeName(topic)
        }
        unsafe fn inconsistent_topic_status(
            &self,
            topic: Handle,
            status: &mut DdsInconsistentTopicStatus,
        ) -> DdsReturnCode {
            sys::Topic_GetInconsistentTopicStatus(topic, status)
        }

        unsafe fn create_datawriter(
            &self,
            publisher: Handle,
            topic: Handle,
            qos: &DdsDataWriterQos,
        ) -> Handle {
            sys::Publisher_CreateDataWriter(publisher, topic, qos)
        }
        unsafe fn delete_datawriter(&self, publisher: Handle, writer: Handle) -> DdsReturnCode {
            sys::Publisher_DeleteDataWriter(publisher, writer)
        }
        unsafe fn lookup_datawriter(&self, publisher: Handle, topic_name: &CStr) -> Handle {
            sys::Publisher_LookupDataWriter(publisher, topic_name.as_ptr())
        }
        unsafe fn publisher_delete_contained_entities(&self, publisher: Handle) -> DdsReturnCode {
            sys::Publisher_DeleteContainedEntities(publisher)
        }
        unsafe fn publisher_participant(&self, publisher: Handle) -> Handle {
            sys::Publisher_GetParticipant(publisher)
        }
        unsafe fn publisher_get_qos(
            &self,
            publisher: Handle,
            qos: &mut DdsPublisherQos,
        ) -> DdsReturnCode {
            sys::Publisher_GetQos(publisher, qos)
        }
        unsafe fn publisher_set_qos(&self, publisher: Handle, qos: &DdsPublisherQos) -> DdsReturnCode {
            sys::Publisher_SetQos(publisher, qos)
        }

        unsafe fn create_datareader(
            &self,
            subscriber: Handle,
            topic: Handle,
            qos: &DdsDataReaderQos,
        ) -> Handle {
            sys::Subscriber_CreateDataReader(subscriber, topic, qos)
        }
        unsafe fn delete_datareader(&self, subscriber: Handle, reader: Handle) -> DdsReturnCode {
            sys::Subscriber_DeleteDataReader(subscriber, reader)
        }
        unsafe fn lookup_datareader(&self, subscriber: Handle, topic_name: &CStr) -> Handle {
            sys::Subscriber_LookupDataReader(subscriber, topic_name.as_ptr())
        }
        unsafe fn subscriber_delete_contained_entities(&self, subscriber: Handle) -> DdsReturnCode {
            sys::Subscriber_DeleteContainedEntities(subscriber)
        }
        unsafe fn subscriber_participant(&self, subscriber: Handle) -> Handle {
            sys::Subscriber_GetParticipant(subscriber)
        }
        unsafe fn subscriber_get_qos(
            &self,
            subscriber: Handle,
            qos: &mut DdsSubscriberQos,
        ) -> DdsReturnCode {
            sys::Subscriber_GetQos(subscriber, qos)
        }
        unsafe fn subscriber_set_qos(
            &self,
            subscriber: Handle,
            qos: &DdsSubscriberQos,
        ) -> DdsReturnCode {
            sys::Subscriber_SetQos(subscriber, qos)
        }

        unsafe fn writer_get_qos(&self, writer: Handle, qos: &mut DdsDataWriterQos) -> DdsReturnCode {
            sys::DataWriter_GetQos(writer, qos)
        }
        unsafe fn writer_set_qos(&self, writer: Handle, qos: &DdsDataWriterQos) -> DdsReturnCode {
            sys::DataWriter_SetQos(writer, qos)
        }
        unsafe fn writer_publisher(&self, writer: Handle) -> Handle {
            sys::DataWriter_GetPublisher(writer)
        }
        unsafe fn writer_topic(&self, writer: Handle) -> Handle {
            sys::DataWriter_GetTopic(writer)
        }
        unsafe fn assert_liveliness(&self, writer: Handle) -> DdsReturnCode {
            sys::DataWriter_AssertLiveliness(writer)
        }
        unsafe fn publication_matched_status(
            &self,
            writer: Handle,
            status: &mut DdsPublicationMatchedStatus,
        ) -> DdsReturnCode {
            sys::DataWriter_GetPublicationMatchedStatus(writer, status)
        }
        unsafe fn offered_deadline_missed_status(
            &self,
            writer: Handle,
            status: &mut DdsOfferedDeadlineMissedStatus,
        ) -> DdsReturnCode {
            sys::DataWriter_GetOfferedDeadlineMissedStatus(writer, status)
        }
        unsafe fn offered_incompatible_qos_status(
            &self,
            writer: Handle,
            status: &mut DdsOfferedIncompatibleQosStatus,
        ) -> DdsReturnCode {
            sys::DataWriter_GetOfferedIncompatibleQosStatus(writer, status)
        }
        unsafe fn liveliness_lost_status(
            &self,
            writer: Handle,
            status: &mut DdsLivelinessLostStatus,
        ) -> DdsReturnCode {
            sys::DataWriter_GetLivelinessLostStatus(writer, status)
        }

        unsafe fn reader_get_qos(&self, reader: Handle, qos: &mut DdsDataReaderQos) -> DdsReturnCode {
            sys::DataReader_GetQos(reader, qos)
        }
        unsafe fn reader_set_qos(&self, reader: Handle, qos: &DdsDataReaderQos) -> DdsReturnCode {
            sys::DataReader_SetQos(reader, qos)
        }
        unsafe fn reader_subscriber(&self, reader: Handle) -> Handle {
            sys::DataReader_GetSubscriber(reader)
        }
        unsafe fn reader_topic_description(&self, reader: Handle) -> Handle {
            sys::DataReader_GetTopicDescription(reader)
        }
        unsafe fn create_read_condition(
            &self,
            reader: Handle,
            sample_states: u32,
            view_states: u32,
            instance_states: u32,
        ) -> Handle {
            sys::DataReader_CreateReadCondition(reader, sample_states, view_states, instance_states)
        }
        unsafe fn create_query_condition(
            &self,
            reader: Handle,
            sample_states: u32,
            view_states: u32,
            instance_states: u32,
            query_expression: &CStr,
            query_parameters: DdsSequence,
        ) -> Handle {
            sys::DataReader_CreateQueryCondition(
                reader,
                sample_states,
                view_states,
                instance_states,
                query_expression.as_ptr(),
                query_parameters,
            )
        }
        unsafe fn delete_read_condition(&self, reader: Handle, condition: Handle) -> DdsReturnCode {
            sys::DataReader_DeleteReadCondition(reader, condition)
        }
        unsafe fn reader_delete_contained_entities(&self, reader: Handle) -> DdsReturnCode {
            sys::DataReader_DeleteContainedEntities(reader)
        }
        unsafe fn subscription_matched_status(
            &self,
            reader: Handle,
            status: &mut DdsSubscriptionMatchedStatus,
        ) -> DdsReturnCode {
            sys::DataReader_GetSubscriptionMatchedStatus(reader, status)
        }
        unsafe fn requested_deadline_missed_status(
            &self,
            reader: Handle,
            status: &mut DdsRequestedDeadlineMissedStatus,
        ) -> DdsReturnCode {
            sys::DataReader_GetRequestedDeadlineMissedStatus(reader, status)
        }
        unsafe fn requested_incompatible_qos_status(
            &self,
            reader: Handle,
            status: &mut DdsRequestedIncompatibleQosStatus,
        ) -> DdsReturnCode {
            sys::DataReader_GetRequestedIncompatibleQosStatus(reader, status)
        }
        unsafe fn sample_lost_status(
            &self,
            reader: Handle,
            status: &mut DdsSampleLostStatus,
        ) -> DdsReturnCode {
            sys::DataReader_GetSampleLostStatus(reader, status)
        }
        unsafe fn sample_rejected_status(
            &self,
            reader: Handle,
            status: &mut DdsSampleRejectedStatus,
        ) -> DdsReturnCode {
            sys::DataReader_GetSampleRejectedStatus(reader, status)
        }
        unsafe fn liveliness_changed_status(
            &self,
            reader: Handle,
            status: &mut DdsLivelinessChangedStatus,
        ) -> DdsReturnCode {
            sys::DataReader_GetLivelinessChangedStatus(reader, status)
        }

        unsafe fn enable(&self, entity: Handle) -> DdsReturnCode {
            sys::Entity_Enable(entity)
        }
        unsafe fn status_condition(&self, entity: Handle) -> Handle {
            sys::Entity_GetStatusCondition(entity)
        }
        unsafe fn status_changes(&self, entity: Handle) -> u32 {
            sys::Entity_GetStatusChanges(entity)
        }
        unsafe fn instance_handle(&self, entity: Handle) -> DdsInstanceHandle {
            sys::Entity_GetInstanceHandle(entity)
        }

        unsafe fn trigger_value(&self, condition: Handle) -> bool {
            sys::Condition_GetTriggerValue(condition)
        }
        unsafe fn guard_condition_new(&self) -> Handle {
            sys::GuardCondition_New()
        }
        unsafe fn guard_condition_free(&self, condition: Handle) {
            sys::GuardCondition_Free(condition)
        }
        unsafe fn set_guard_trigger_value(&self, condition: Handle, value: bool) -> DdsReturnCode {
            sys::GuardCondition_SetTriggerValue(condition, value)
        }
        unsafe fn enabled_statuses(&self, condition: Handle) -> u32 {
            sys::StatusCondition_GetEnabledStatuses(condition)
        }
        unsafe fn set_enabled_statuses(&self, condition: Handle, mask: u32) -> DdsReturnCode {
            sys::StatusCondition_SetEnabledStatuses(condition, mask)
        }
        unsafe fn status_condition_entity(&self, condition: Handle) -> Handle {
            sys::StatusCondition_GetEntity(condition)
        }
        unsafe fn sample_state_mask(&self, condition: Handle) -> u32 {
            sys::ReadCondition_GetSampleStateMask(condition)
        }
        unsafe fn view_state_mask(&self, condition: Handle) -> u32 {
            sys::ReadCondition_GetViewStateMask(condition)
        }
        unsafe fn instance_state_mask(&self, condition: Handle) -> u32 {
            sys::ReadCondition_GetInstanceStateMask(condition)
        }
        unsafe fn read_condition_datareader(&self, condition: Handle) -> Handle {
            sys::ReadCondition_GetDataReader(condition)
        }
        unsafe fn query_expression(&self, condition: Handle) -> *const c_char {
            sys::QueryCondition_GetQueryExpression(condition)
        }
        unsafe fn query_parameters(
            &self,
            condition: Handle,
            parameters: &mut DdsSequence,
        ) -> DdsReturnCode {
            sys::QueryCondition_GetQueryParameters(condition, parameters)
        }
        unsafe fn set_query_parameters(
            &self,
            condition: Handle,
            parameters: DdsSequence,
        ) -> DdsReturnCode {
            sys::QueryCondition_SetQueryParameters(condition, parameters)
        }
    }
}
