//! Gadget instances.
//!
//! A [`Gadget`] is one placed unit in the pipeline: a [`GadgetKind`], a
//! position, the input/output ports its kind declares, an observable display
//! state and, for sources, an observable editable value.
//!
//! # Design
//!
//! - `transform()` is pure: it reads the input port values and returns a
//!   [`Computed`] without touching any state.
//! - The pipeline applies a `Computed` by setting the display state and
//!   publishing on every output port. Downstream delivery is the pipeline's
//!   job, so a gadget never reaches into another gadget.
//! - `destroy()` drops every scoped subscription, so no callback bound to a
//!   removed gadget can fire again.

use crate::pipeline::error::TransformError;
use crate::pipeline::gadgets;
use crate::pipeline::id::{GadgetId, PortId};
use crate::pipeline::kind::{Family, GadgetKind};
use crate::pipeline::observable::{Observable, Subscription};
use crate::pipeline::port::{InputPort, OutputPort, PortDirection};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// What a gadget shows to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Empty,
    Text(String),
    Error(String),
}

impl DisplayState {
    /// Render bytes as UTF-8 text, or as lowercase hex when they are not UTF-8.
    pub fn render_text(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => DisplayState::Text(text.to_string()),
            Err(_) => Self::render_hex(bytes),
        }
    }

    pub fn render_hex(bytes: &[u8]) -> Self {
        DisplayState::Text(hex::encode(bytes))
    }

    /// The shown text or error message, `None` when empty.
    pub fn text(&self) -> Option<&str> {
        match self {
            DisplayState::Empty => None,
            DisplayState::Text(text) | DisplayState::Error(text) => Some(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DisplayState::Empty)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DisplayState::Error(_))
    }
}

impl std::fmt::Display for DisplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayState::Empty => write!(f, "(empty)"),
            DisplayState::Text(text) => write!(f, "{}", text),
            DisplayState::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// Result of one `transform()`: one value per output port plus the display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computed {
    pub outputs: Vec<Bytes>,
    pub display: DisplayState,
}

impl Computed {
    /// Empty display, empty on every output.
    pub fn empty(outputs: usize) -> Self {
        Self {
            outputs: vec![Bytes::new(); outputs],
            display: DisplayState::Empty,
        }
    }

    /// Error display, empty on every output.
    pub fn error(err: TransformError, outputs: usize) -> Self {
        Self {
            outputs: vec![Bytes::new(); outputs],
            display: DisplayState::Error(err.to_string()),
        }
    }
}

/// Placement on the canvas, in grid cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// A placed gadget.
#[derive(Debug)]
pub struct Gadget {
    id: GadgetId,
    kind: GadgetKind,
    position: Position,
    inputs: Vec<InputPort>,
    outputs: Vec<OutputPort>,
    display: Observable<DisplayState>,
    editable: Option<Observable<Bytes>>,
    scoped: Vec<Subscription>,
}

impl Gadget {
    /// Construct a gadget of `kind` at `(x, y)` with a fresh id.
    pub fn new(kind: GadgetKind, x: i32, y: i32) -> Self {
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        for descriptor in kind.ports() {
            match descriptor.direction {
                PortDirection::Input => inputs.push(InputPort::new(descriptor)),
                PortDirection::Output => outputs.push(OutputPort::new(descriptor)),
            }
        }

        let id = GadgetId::next();
        let editable = kind.is_source().then(Observable::<Bytes>::default);
        let scoped = editable
            .iter()
            .map(|cell| {
                cell.subscribe(move |value| {
                    tracing::trace!("{} edited: {} bytes", id, value.len());
                })
            })
            .collect();

        Self {
            id,
            kind,
            position: Position { x, y },
            inputs,
            outputs,
            display: Observable::default(),
            editable,
            scoped,
        }
    }

    pub fn id(&self) -> GadgetId {
        self.id
    }

    pub fn kind(&self) -> GadgetKind {
        self.kind
    }

    pub fn class_id(&self) -> String {
        self.kind.class_id()
    }

    pub fn family(&self) -> Family {
        self.kind.family()
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.position = Position { x, y };
    }

    pub fn inputs(&self) -> &[InputPort] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[OutputPort] {
        &self.outputs
    }

    pub fn input(&self, index: u16) -> Option<&InputPort> {
        self.inputs.get(usize::from(index))
    }

    pub fn output(&self, index: u16) -> Option<&OutputPort> {
        self.outputs.get(usize::from(index))
    }

    /// Id of input port `index`, if the gadget has one.
    pub fn input_id(&self, index: u16) -> Option<PortId> {
        self.input(index).map(|_| PortId::new(self.id, index))
    }

    /// Id of output port `index`, if the gadget has one.
    pub fn output_id(&self, index: u16) -> Option<PortId> {
        self.output(index).map(|_| PortId::new(self.id, index))
    }

    /// Subscribable display state.
    pub fn display(&self) -> &Observable<DisplayState> {
        &self.display
    }

    /// Subscribable editable value; `None` unless the gadget is a source.
    pub fn editable(&self) -> Option<&Observable<Bytes>> {
        self.editable.as_ref()
    }

    pub fn input_values(&self) -> Vec<Bytes> {
        self.inputs.iter().map(InputPort::value).collect()
    }

    /// Compute the outputs and display state for the current inputs.
    pub fn transform(&self) -> Computed {
        let editable = self.editable.as_ref().map(Observable::get);
        gadgets::compute(self.kind, &self.input_values(), editable.as_ref())
    }

    /// Tie a subscription's lifetime to this gadget.
    ///
    /// Views use this for callbacks that must stop when the gadget is
    /// removed. Sources start with one binding on their editable value.
    pub fn bind(&mut self, subscription: Subscription) {
        self.scoped.push(subscription);
    }

    pub fn scoped_count(&self) -> usize {
        self.scoped.len()
    }

    pub(crate) fn input_mut(&mut self, index: u16) -> Option<&mut InputPort> {
        self.inputs.get_mut(usize::from(index))
    }

    pub(crate) fn output_mut(&mut self, index: u16) -> Option<&mut OutputPort> {
        self.outputs.get_mut(usize::from(index))
    }

    pub(crate) fn set_editable(&self, value: Bytes) -> bool {
        match &self.editable {
            Some(cell) => {
                cell.set(value);
                true
            }
            None => false,
        }
    }

    /// Store the display state and publish on every output port, in port order.
    pub(crate) fn apply(&self, computed: Computed) {
        self.display.set(computed.display);
        let mut values = computed.outputs.into_iter();
        for port in &self.outputs {
            port.publish(values.next());
        }
    }

    /// Release every scoped subscription.
    pub(crate) fn destroy(&mut self) {
        self.scoped.clear();
    }
}
