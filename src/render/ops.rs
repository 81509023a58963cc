use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Element, ElementId};

/// One keyed change to a surface's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementOp {
    /// Element enters the surface.
    Create(Element),
    /// Element with the same id moves or changes in place.
    Update(Element),
    /// Element leaves; renderers fade it out over the transition then drop it.
    Remove(ElementId),
}

impl ElementOp {
    #[must_use]
    pub fn id(&self) -> &ElementId {
        match self {
            Self::Create(element) | Self::Update(element) => element.id(),
            Self::Remove(id) => id,
        }
    }
}

/// Batch of ops animated together over `duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration: Duration,
    pub ops: Vec<ElementOp>,
}

impl Transition {
    #[must_use]
    pub fn new(duration: Duration, ops: Vec<ElementOp>) -> Self {
        Self { duration, ops }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn count(&self, kind: OpKind) -> usize {
        self.ops.iter().filter(|op| OpKind::of(op) == kind).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Create,
    Update,
    Remove,
}

impl OpKind {
    #[must_use]
    pub fn of(op: &ElementOp) -> Self {
        match op {
            ElementOp::Create(_) => Self::Create,
            ElementOp::Update(_) => Self::Update,
            ElementOp::Remove(_) => Self::Remove,
        }
    }
}
