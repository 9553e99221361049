// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native handle identity registry.
//!
//! Maps every live native handle to the single wrapper that represents it.
//! Handles coming back from the native side are always resolved here first,
//! so two calls returning the same handle yield the same wrapper instance.
//!
//! # Locking
//!
//! One mutex guards the map and is held only for map operations. It is never
//! held across a native call, and never while a wrapper's own state (its
//! child list) is locked: subtree walks collect the tree first, then lock
//! the map.

use std::collections::HashMap;

use dds_sys::Handle;
use parking_lot::Mutex;

use crate::condition::{GuardCondition, QueryCondition, ReadCondition, StatusCondition};
use crate::entity::{
    DataReader, DataWriter, DomainEntity, DomainParticipant, Publisher, Subscriber, Topic,
};
use crate::error::{Error, Result};

/// Any entity wrapper. The variant is fixed when the wrapper is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    Participant(DomainParticipant),
    Topic(Topic),
    Publisher(Publisher),
    Subscriber(Subscriber),
    DataWriter(DataWriter),
    DataReader(DataReader),
}

/// Any condition wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    Guard(GuardCondition),
    Status(StatusCondition),
    Read(ReadCondition),
    Query(QueryCondition),
}

/// Registry value: one wrapper of any kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Wrapper {
    Entity(Entity),
    Condition(Condition),
}

macro_rules! dispatch {
    ($wrapper:expr, $w:ident => $body:expr) => {
        match $wrapper {
            Wrapper::Entity(Entity::Participant($w)) => $body,
            Wrapper::Entity(Entity::Topic($w)) => $body,
            Wrapper::Entity(Entity::Publisher($w)) => $body,
            Wrapper::Entity(Entity::Subscriber($w)) => $body,
            Wrapper::Entity(Entity::DataWriter($w)) => $body,
            Wrapper::Entity(Entity::DataReader($w)) => $body,
            Wrapper::Condition(Condition::Guard($w)) => $body,
            Wrapper::Condition(Condition::Status($w)) => $body,
            Wrapper::Condition(Condition::Read($w)) => $body,
            Wrapper::Condition(Condition::Query($w)) => $body,
        }
    };
}

impl Wrapper {
    pub fn handle(&self) -> Handle {
        dispatch!(self, w => w.handle())
    }

    /// Human-readable kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Wrapper::Entity(Entity::Participant(_)) => "participant",
            Wrapper::Entity(Entity::Topic(_)) => "topic",
            Wrapper::Entity(Entity::Publisher(_)) => "publisher",
            Wrapper::Entity(Entity::Subscriber(_)) => "subscriber",
            Wrapper::Entity(Entity::DataWriter(_)) => "data writer",
            Wrapper::Entity(Entity::DataReader(_)) => "data reader",
            Wrapper::Condition(Condition::Guard(_)) => "guard condition",
            Wrapper::Condition(Condition::Status(_)) => "status condition",
            Wrapper::Condition(Condition::Read(_)) => "read condition",
            Wrapper::Condition(Condition::Query(_)) => "query condition",
        }
    }

    /// Direct children in the containment tree.
    pub fn children(&self) -> Vec<Wrapper> {
        dispatch!(self, w => w.core().children())
    }

    /// Every descendant, depth first, children before their parent; the
    /// wrapper itself comes last.
    pub fn subtree(&self) -> Vec<Wrapper> {
        let mut out = Vec::new();
        self.collect_subtree(&mut out);
        out
    }

    fn collect_subtree(&self, out: &mut Vec<Wrapper>) {
        for child in self.children() {
            child.collect_subtree(out);
        }
        out.push(self.clone());
    }
}

/// Conversions between concrete wrappers and [`Wrapper`].
macro_rules! wrapper_kind {
    ($($outer:ident :: $variant:ident ($ty:ident) => $name:literal;)+) => {
        $(
            impl From<$ty> for Wrapper {
                fn from(value: $ty) -> Self {
                    Wrapper::$outer($outer::$variant(value))
                }
            }

            impl TryFrom<Wrapper> for $ty {
                type Error = Error;

                fn try_from(wrapper: Wrapper) -> Result<Self> {
                    match wrapper {
                        Wrapper::$outer($outer::$variant(value)) => Ok(value),
                        other => Err(Error::UnexpectedKind {
                            handle: other.handle(),
                            expected: $name,
                            found: other.kind_name(),
                        }),
                    }
                }
            }
        )+
    };
}

wrapper_kind! {
    Entity::Participant(DomainParticipant) => "participant";
    Entity::Topic(Topic) => "topic";
    Entity::Publisher(Publisher) => "publisher";
    Entity::Subscriber(Subscriber) => "subscriber";
    Entity::DataWriter(DataWriter) => "data writer";
    Entity::DataReader(DataReader) => "data reader";
    Condition::Guard(GuardCondition) => "guard condition";
    Condition::Status(StatusCondition) => "status condition";
    Condition::Read(ReadCondition) => "read condition";
    Condition::Query(QueryCondition) => "query condition";
}

impl From<Entity> for Wrapper {
    fn from(entity: Entity) -> Self {
        Wrapper::Entity(entity)
    }
}

impl From<Condition> for Wrapper {
    fn from(condition: Condition) -> Self {
        Wrapper::Condition(condition)
    }
}

/// Handle → wrapper map. Created by the participant factory and torn down
/// with it; tests build isolated instances.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    map: Mutex<HashMap<Handle, Wrapper>>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: Mutex::new(HashMap::with_capacity(capacity)),
        }
    }

    /// The wrapper registered for `handle`. The null handle is never
    /// registered.
    pub fn find(&self, handle: Handle) -> Option<Wrapper> {
        if handle.is_null() {
            return None;
        }
        self.map.lock().get(&handle).cloned()
    }

    /// Register `wrapper` under `handle`.
    ///
    /// Never overwrites: a second registration means two wrappers exist for
    /// one native object, which is reported as [`Error::DuplicateHandle`].
    pub fn add(&self, handle: Handle, wrapper: Wrapper) -> Result<()> {
        if handle.is_null() {
            return Err(Error::BadParameter);
        }
        let mut map = self.map.lock();
        if map.contains_key(&handle) {
            log::error!(
                "registry: second {} for handle {}",
                wrapper.kind_name(),
                handle
            );
            return Err(Error::DuplicateHandle(handle));
        }
        map.insert(handle, wrapper);
        Ok(())
    }

    /// Drop the entry for `handle`, if any.
    pub fn remove(&self, handle: Handle) -> Option<Wrapper> {
        self.map.lock().remove(&handle)
    }

    /// Find the wrapper for `handle`, or build one with `make` and register
    /// it. Lookup and insertion happen under one lock hold, so concurrent
    /// resolvers of the same handle all get the same wrapper.
    ///
    /// `make` must only construct the wrapper: it runs with the registry
    /// locked.
    pub fn resolve(&self, handle: Handle, make: impl FnOnce() -> Wrapper) -> Option<Wrapper> {
        if handle.is_null() {
            return None;
        }
        let mut map = self.map.lock();
        let wrapper = map.entry(handle).or_insert_with(make);
        Some(wrapper.clone())
    }

    /// Detach `wrapper` and all its descendants. Returns how many entries
    /// were removed.
    pub fn remove_subtree(&self, wrapper: &Wrapper) -> usize {
        self.take_subtree(wrapper).len()
    }

    /// Detach `wrapper` and all its descendants and hand back the removed
    /// wrappers, descendants first.
    pub(crate) fn take_subtree(&self, wrapper: &Wrapper) -> Vec<Wrapper> {
        // Walk the tree before locking the map: the walk locks child lists.
        let nodes = wrapper.subtree();
        let mut map = self.map.lock();
        nodes
            .into_iter()
            .filter_map(|node| map.remove(&node.handle()))
            .collect()
    }

    /// Put back wrappers taken by [`take_subtree`](Self::take_subtree) after
    /// the native side refused the deletion.
    pub(crate) fn restore(&self, wrappers: Vec<Wrapper>) {
        let mut map = self.map.lock();
        for wrapper in wrappers {
            let handle = wrapper.handle();
            if map.contains_key(&handle) {
                log::error!("registry: {} re-registered while detached", handle);
                continue;
            }
            map.insert(handle, wrapper);
        }
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.map.lock().contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.lock().is_empty()
    }

    /// Forget every entry. Returns how many there were.
    pub fn teardown(&self) -> usize {
        let drained: Vec<Wrapper> = self.map.lock().drain().map(|(_, w)| w).collect();
        if !drained.is_empty() {
            log::debug!("registry teardown: {} wrapper(s)", drained.len());
        }
        // Wrappers drop here, outside the lock.
        drained.len()
    }
}
