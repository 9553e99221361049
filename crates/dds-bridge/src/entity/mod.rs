// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DDS entity wrappers.
//!
//! Every wrapper is a cheap handle onto a shared [`Core`]: the native handle,
//! the binding (native API + identity registry) and the list of contained
//! wrappers. Cloning a wrapper clones the `Arc`; equality is identity.
//!
//! Operations follow one shape: validate arguments, convert managed values
//! to native layouts, call the native entry point, convert the result back,
//! release the layouts (on every path), return.

use std::fmt;
use std::sync::Arc;

use dds_sys::{DdsInstanceHandle, DdsReturnCode, Handle};
use parking_lot::Mutex;

use crate::condition::{StatusCondition, StatusMask};
use crate::config::BridgeConfig;
use crate::convert::NativeConvert;
use crate::error::{check, non_null, Error, Result};
use crate::memory::AllocationLedger;
use crate::native::NativeApi;
use crate::registry::{Condition, HandleRegistry, Wrapper};

/// Native API and registry shared by every wrapper of one factory.
pub(crate) struct Binding {
    pub(crate) api: Arc<dyn NativeApi>,
    pub(crate) registry: HandleRegistry,
    pub(crate) config: BridgeConfig,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("registry", &self.registry.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// State shared by all clones of one wrapper.
pub(crate) struct Core {
    handle: Handle,
    binding: Arc<Binding>,
    children: Mutex<Vec<Wrapper>>,
}

impl Core {
    pub(crate) fn new(handle: Handle, binding: Arc<Binding>) -> Arc<Self> {
        Arc::new(Self {
            handle,
            binding,
            children: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn handle(&self) -> Handle {
        self.handle
    }

    pub(crate) fn api(&self) -> &dyn NativeApi {
        &*self.binding.api
    }

    pub(crate) fn registry(&self) -> &HandleRegistry {
        &self.binding.registry
    }

    pub(crate) fn config(&self) -> &BridgeConfig {
        &self.binding.config
    }

    pub(crate) fn children(&self) -> Vec<Wrapper> {
        self.children.lock().clone()
    }

    pub(crate) fn attach(&self, child: Wrapper) {
        let mut children = self.children.lock();
        if !children.iter().any(|c| c.handle() == child.handle()) {
            children.push(child);
        }
    }

    pub(crate) fn detach(&self, handle: Handle) {
        self.children.lock().retain(|c| c.handle() != handle);
    }

    /// Resolve `handle` through the registry, building the wrapper with
    /// `make` on a miss.
    pub(crate) fn resolve<T>(&self, handle: Handle, make: impl FnOnce(Arc<Core>) -> T) -> Result<T>
    where
        T: Into<Wrapper> + TryFrom<Wrapper, Error = Error>,
    {
        let handle = non_null(handle)?;
        let binding = Arc::clone(&self.binding);
        let wrapper = self
            .registry()
            .resolve(handle, || make(Core::new(handle, binding)).into())
            .ok_or(Error::Error)?;
        T::try_from(wrapper)
    }

    /// Resolve a freshly created native object and record it as a child.
    pub(crate) fn adopt<T>(&self, handle: Handle, make: impl FnOnce(Arc<Core>) -> T) -> Result<T>
    where
        T: Clone + Into<Wrapper> + TryFrom<Wrapper, Error = Error>,
    {
        let child = self.resolve(handle, make)?;
        self.attach(child.clone().into());
        Ok(child)
    }

    /// Delete one child: its subtree leaves the registry before the native
    /// handle is invalidated, and comes back if the native side refuses.
    pub(crate) fn delete_child(
        &self,
        child: Wrapper,
        delete: impl FnOnce(Handle) -> DdsReturnCode,
    ) -> Result<()> {
        let handle = child.handle();
        let taken = self.registry().take_subtree(&child);
        match check(delete(handle)) {
            Ok(()) => {
                self.detach(handle);
                log::debug!("deleted {} {} ({} wrapper(s))", child.kind_name(), handle, taken.len());
                Ok(())
            }
            Err(err) => {
                self.registry().restore(taken);
                Err(err)
            }
        }
    }

    /// Delete every contained wrapper except this wrapper's status condition.
    pub(crate) fn delete_contained(&self, delete: impl FnOnce() -> DdsReturnCode) -> Result<()> {
        let (kept, contained): (Vec<_>, Vec<_>) = self
            .children()
            .into_iter()
            .partition(|w| matches!(w, Wrapper::Condition(Condition::Status(_))));
        let mut taken = Vec::new();
        for child in &contained {
            taken.extend(self.registry().take_subtree(child));
        }
        match check(delete()) {
            Ok(()) => {
                *self.children.lock() = kept;
                log::debug!("{}: deleted {} contained wrapper(s)", self.handle, taken.len());
                Ok(())
            }
            Err(err) => {
                self.registry().restore(taken);
                Err(err)
            }
        }
    }

    pub(crate) fn enable(&self) -> Result<()> {
        // SAFETY: `handle` belongs to a live wrapper.
        check(unsafe { self.api().enable(self.handle) })
    }

    pub(crate) fn status_condition(&self) -> Result<StatusCondition> {
        // SAFETY: `handle` belongs to a live wrapper.
        let handle = unsafe { self.api().status_condition(self.handle) };
        self.adopt(handle, StatusCondition::from_core)
    }

    pub(crate) fn status_changes(&self) -> StatusMask {
        // SAFETY: `handle` belongs to a live wrapper.
        StatusMask::from_bits(unsafe { self.api().status_changes(self.handle) })
    }

    pub(crate) fn instance_handle(&self) -> DdsInstanceHandle {
        // SAFETY: `handle` belongs to a live wrapper.
        unsafe { self.api().instance_handle(self.handle) }
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.handle)
    }
}

/// Convert `value` to its native layout, hand it to `call`, then release.
pub(crate) fn with_native<Q, R>(value: &Q, call: impl FnOnce(&Q::Native) -> R) -> R
where
    Q: NativeConvert,
{
    let mut ledger = AllocationLedger::new();
    let native = value.to_native_in(&mut ledger);
    let result = call(&native);
    ledger.release();
    result
}

/// Let `call` fill a native out-parameter and copy it into a managed value.
pub(crate) fn read_native<Q>(call: impl FnOnce(&mut Q::Native) -> DdsReturnCode) -> Result<Q>
where
    Q: NativeConvert + Default,
    Q::Native: Default,
{
    let mut native = Q::Native::default();
    check(call(&mut native))?;
    let mut value = Q::default();
    // SAFETY: on success the library filled `native` with buffers it owns
    // and keeps valid until the next call of the same getter.
    unsafe { value.from_native(&native) };
    Ok(value)
}

/// Operations shared by every DDS entity.
pub trait DomainEntity {
    fn handle(&self) -> Handle;

    /// Enable the entity. Enabling twice is fine; enabling below a disabled
    /// parent fails with [`Error::PreconditionNotMet`].
    fn enable(&self) -> Result<()>;

    /// The entity's status condition, created on first use.
    fn status_condition(&self) -> Result<StatusCondition>;

    /// Statuses changed since they were last read.
    fn status_changes(&self) -> StatusMask;

    fn instance_handle(&self) -> DdsInstanceHandle;

    /// Wrappers created through this entity and not yet deleted.
    fn children(&self) -> Vec<Wrapper>;
}

macro_rules! entity_wrapper {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            core: std::sync::Arc<$crate::entity::Core>,
        }

        impl $name {
            pub(crate) fn from_core(core: std::sync::Arc<$crate::entity::Core>) -> Self {
                Self { core }
            }

            pub(crate) fn core(&self) -> &$crate::entity::Core {
                &self.core
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                std::sync::Arc::ptr_eq(&self.core, &other.core)
            }
        }

        impl Eq for $name {}

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.core.handle()).finish()
            }
        }

        impl $crate::entity::DomainEntity for $name {
            fn handle(&self) -> dds_sys::Handle {
                self.core.handle()
            }

            fn enable(&self) -> $crate::error::Result<()> {
                self.core.enable()
            }

            fn status_condition(&self) -> $crate::error::Result<$crate::condition::StatusCondition> {
                self.core.status_condition()
            }

            fn status_changes(&self) -> $crate::condition::StatusMask {
                self.core.status_changes()
            }

            fn instance_handle(&self) -> dds_sys::DdsInstanceHandle {
                self.core.instance_handle()
            }

            fn children(&self) -> Vec<$crate::registry::Wrapper> {
                self.core.children()
            }
        }
    };
}

mod factory;
mod participant;
mod publisher;
mod reader;
mod subscriber;
mod topic;
mod writer;

pub use factory::ParticipantFactory;
pub use participant::DomainParticipant;
pub use publisher::Publisher;
pub use reader::DataReader;
pub use subscriber::Subscriber;
pub use topic::Topic;
pub use writer::DataWriter;
