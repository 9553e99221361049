// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::ffi::CStr;
use std::os::raw::c_char;

use dds_sys::{DdsInconsistentTopicStatus, DdsTopicQos};

use super::{read_native, with_native, DomainParticipant};
use crate::error::{check, Error, Result};
use crate::qos::TopicQos;
use crate::status::InconsistentTopicStatus;

entity_wrapper! {
    /// Named, typed topic.
    Topic
}

/// Copy a native-owned string.
///
/// # Safety
/// `ptr` must be null or NUL-terminated and valid for the call.
unsafe fn copy_name(ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(Error::Error);
    }
    Ok(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

impl Topic {
    pub fn name(&self) -> Result<String> {
        // SAFETY: the library keeps the name alive while the topic exists.
        unsafe { copy_name(self.core.api().topic_name(self.core.handle())) }
    }

    pub fn type_name(&self) -> Result<String> {
        // SAFETY: as for `name`.
        unsafe { copy_name(self.core.api().topic_type_name(self.core.handle())) }
    }

    pub fn participant(&self) -> Result<DomainParticipant> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe { self.core.api().topic_participant(self.core.handle()) };
        self.core.resolve(handle, DomainParticipant::from_core)
    }

    pub fn qos(&self) -> Result<TopicQos> {
        let api = self.core.api();
        read_native(|out: &mut DdsTopicQos| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.topic_get_qos(self.core.handle(), out) }
        })
    }

    pub fn set_qos(&self, qos: &TopicQos) -> Result<()> {
        let api = self.core.api();
        check(with_native(qos, |native| {
            // SAFETY: layout outlives the call.
            unsafe { api.topic_set_qos(self.core.handle(), native) }
        }))
    }

    pub fn inconsistent_topic_status(&self) -> Result<InconsistentTopicStatus> {
        let api = self.core.api();
        read_native(|out: &mut DdsInconsistentTopicStatus| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.inconsistent_topic_status(self.core.handle(), out) }
        })
    }
}
