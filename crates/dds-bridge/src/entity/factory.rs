// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Root of the containment tree.

use std::sync::Arc;

use dds_sys::{DdsDomainParticipantFactoryQos, Handle};

use super::{read_native, with_native, Binding, Core, DomainEntity, DomainParticipant};
use crate::condition::GuardCondition;
use crate::config::BridgeConfig;
use crate::error::{check, non_null, Error, Result};
use crate::native::NativeApi;
use crate::qos::{DomainParticipantFactoryQos, DomainParticipantQos};
use crate::registry::{Condition, Entity, HandleRegistry, Wrapper};

/// Entry point: owns the binding (native API + identity registry) and every
/// participant and guard condition created through it.
///
/// ```ignore
/// let factory = ParticipantFactory::new(Arc::new(Loopback::new()));
/// let participant = factory.create_participant_default()?;
/// let topic = participant.create_topic("Square", "ShapeType", &TopicQos::default())?;
/// factory.shutdown()?;
/// ```
///
/// Dropping the factory without [`shutdown`](Self::shutdown) runs it
/// implicitly and logs a warning.
pub struct ParticipantFactory {
    core: Arc<Core>,
}

impl ParticipantFactory {
    pub fn new(api: Arc<dyn NativeApi>) -> Self {
        Self::with_config(api, BridgeConfig::default())
    }

    pub fn with_config(api: Arc<dyn NativeApi>, config: BridgeConfig) -> Self {
        let registry = HandleRegistry::with_capacity(config.registry_capacity);
        let binding = Arc::new(Binding {
            api,
            registry,
            config,
        });
        log::debug!("participant factory up ({:?})", binding.config);
        Self {
            core: Core::new(Handle::NULL, binding),
        }
    }

    /// Identity registry shared by every wrapper of this factory.
    pub fn registry(&self) -> &HandleRegistry {
        self.core.registry()
    }

    pub fn config(&self) -> &BridgeConfig {
        self.core.config()
    }

    pub fn create_participant(
        &self,
        domain_id: i32,
        qos: &DomainParticipantQos,
    ) -> Result<DomainParticipant> {
        let api = self.core.api();
        // SAFETY: `native` is built from `qos` and outlives the call.
        let handle = with_native(qos, |native| unsafe { api.create_participant(domain_id, native) });
        let participant = self.core.adopt(handle, DomainParticipant::from_core)?;
        log::debug!("created participant {} on domain {}", participant.handle(), domain_id);
        Ok(participant)
    }

    /// Participant on the configured domain with default QoS.
    pub fn create_participant_default(&self) -> Result<DomainParticipant> {
        self.create_participant(self.config().domain_id, &DomainParticipantQos::default())
    }

    /// Fails with [`Error::PreconditionNotMet`] while the participant still
    /// contains entities.
    pub fn delete_participant(&self, participant: &DomainParticipant) -> Result<()> {
        let api = self.core.api();
        self.core.delete_child(participant.clone().into(), |handle| {
            // SAFETY: `handle` belongs to a live participant wrapper.
            unsafe { api.delete_participant(handle) }
        })
    }

    /// A participant on `domain_id`, if one exists.
    pub fn lookup_participant(&self, domain_id: i32) -> Result<Option<DomainParticipant>> {
        // SAFETY: plain value argument.
        let handle = unsafe { self.core.api().lookup_participant(domain_id) };
        if handle.is_null() {
            return Ok(None);
        }
        self.core.resolve(handle, DomainParticipant::from_core).map(Some)
    }

    pub fn qos(&self) -> Result<DomainParticipantFactoryQos> {
        let api = self.core.api();
        read_native(|out: &mut DdsDomainParticipantFactoryQos| {
            // SAFETY: `out` is a valid out-parameter.
            unsafe { api.factory_get_qos(out) }
        })
    }

    pub fn set_qos(&self, qos: &DomainParticipantFactoryQos) -> Result<()> {
        let api = self.core.api();
        // SAFETY: `native` is built from `qos` and outlives the call.
        check(with_native(qos, |native| unsafe { api.factory_set_qos(native) }))
    }

    pub fn create_guard_condition(&self) -> Result<GuardCondition> {
        // SAFETY: no arguments.
        let handle = unsafe { self.core.api().guard_condition_new() };
        self.core.adopt(non_null(handle)?, GuardCondition::from_core)
    }

    pub fn delete_guard_condition(&self, condition: &GuardCondition) -> Result<()> {
        let api = self.core.api();
        self.core.delete_child(condition.clone().into(), |handle| {
            // SAFETY: `handle` belongs to a live guard condition wrapper.
            unsafe { api.guard_condition_free(handle) };
            dds_sys::DDS_RETCODE_OK
        })
    }

    /// Participants and guard conditions created here and not yet deleted.
    pub fn children(&self) -> Vec<Wrapper> {
        self.core.children()
    }

    /// Delete everything created through this factory, then empty the
    /// registry. Returns the first error hit; remaining objects are still
    /// torn down.
    pub fn shutdown(&self) -> Result<()> {
        let mut first_error: Option<Error> = None;
        for child in self.core.children() {
            let result = match &child {
                Wrapper::Entity(Entity::Participant(p)) => p
                    .delete_contained_entities()
                    .and_then(|()| self.delete_participant(p)),
                Wrapper::Condition(Condition::Guard(g)) => self.delete_guard_condition(g),
                other => {
                    log::error!("factory holds unexpected {}", other.kind_name());
                    Ok(())
                }
            };
            if let Err(err) = result {
                log::warn!("shutdown: {} {}: {}", child.kind_name(), child.handle(), err);
                first_error.get_or_insert(err);
            }
        }
        let dropped = self.core.registry().teardown();
        log::debug!("participant factory down ({} wrapper(s) dropped)", dropped);
        first_error.map_or(Ok(()), Err)
    }
}

/// Wrappers hold the binding that holds the registry, so a factory dropped
/// with live objects tears them down here.
impl Drop for ParticipantFactory {
    fn drop(&mut self) {
        if self.core.children().is_empty() && self.registry().is_empty() {
            return;
        }
        log::warn!(
            "participant factory dropped without shutdown ({} wrapper(s) live)",
            self.registry().len()
        );
        if let Err(err) = self.shutdown() {
            log::warn!("implicit shutdown: {}", err);
        }
    }
}

impl std::fmt::Debug for ParticipantFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticipantFactory")
            .field("registry", &self.registry().len())
            .field("children", &self.core.children().len())
            .finish()
    }
}
