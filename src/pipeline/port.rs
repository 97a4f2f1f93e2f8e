//! Ports: the connection points of a gadget.
//!
//! Each gadget class declares its ports via static `PortDescriptor` arrays.
//! At runtime every declared port becomes an [`InputPort`] or an
//! [`OutputPort`] holding an observable byte-sequence value. An empty value
//! means "no data".

use crate::pipeline::id::PortId;
use crate::pipeline::observable::{Observable, Subscription};
use bytes::Bytes;
use serde::Serialize;

/// Whether a port is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PortDirection {
    Input,
    Output,
}

/// Static descriptor for a gadget's port.
#[derive(Debug, Clone, Serialize)]
pub struct PortDescriptor {
    pub name: &'static str,
    pub direction: PortDirection,
}

impl PortDescriptor {
    pub const fn input(name: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Input,
        }
    }

    pub const fn output(name: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Output,
        }
    }
}

/// Single-slot publish point.
///
/// Holds the last published value and the input ports subscribed to it,
/// in subscription order.
#[derive(Debug)]
pub struct OutputPort {
    descriptor: &'static PortDescriptor,
    value: Observable<Bytes>,
    subscribers: Vec<PortId>,
}

impl OutputPort {
    pub(crate) fn new(descriptor: &'static PortDescriptor) -> Self {
        Self {
            descriptor,
            value: Observable::new(Bytes::new()),
            subscribers: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn value(&self) -> Bytes {
        self.value.get()
    }

    /// Watch published values.
    pub fn subscribe(&self, f: impl FnMut(&Bytes) + 'static) -> Subscription {
        self.value.subscribe(f)
    }

    /// Input ports fed by this output, in subscription order.
    pub fn subscribers(&self) -> &[PortId] {
        &self.subscribers
    }

    /// Store a value (`None` stores empty) and notify observers.
    pub(crate) fn publish(&self, value: Option<Bytes>) {
        self.value.set(value.unwrap_or_default());
    }

    pub(crate) fn add_subscriber(&mut self, port: PortId) {
        self.subscribers.push(port);
    }

    pub(crate) fn remove_subscriber(&mut self, port: PortId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|&p| p != port);
        self.subscribers.len() != before
    }
}

/// Single-slot subscriber with at most one upstream output.
#[derive(Debug)]
pub struct InputPort {
    descriptor: &'static PortDescriptor,
    value: Observable<Bytes>,
    upstream: Option<PortId>,
}

impl InputPort {
    pub(crate) fn new(descriptor: &'static PortDescriptor) -> Self {
        Self {
            descriptor,
            value: Observable::new(Bytes::new()),
            upstream: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Last value received; empty when unconnected or cleared.
    pub fn value(&self) -> Bytes {
        self.value.get()
    }

    pub fn is_empty(&self) -> bool {
        self.value.with(|v| v.is_empty())
    }

    /// Watch received values.
    pub fn subscribe(&self, f: impl FnMut(&Bytes) + 'static) -> Subscription {
        self.value.subscribe(f)
    }

    /// The output port feeding this input, if connected.
    pub fn upstream(&self) -> Option<PortId> {
        self.upstream
    }

    pub(crate) fn receive(&self, value: Bytes) {
        self.value.set(value);
    }

    pub(crate) fn attach(&mut self, upstream: PortId) {
        self.upstream = Some(upstream);
    }

    pub(crate) fn detach(&mut self) -> Option<PortId> {
        self.upstream.take()
    }
}
