//! Hover tooltip coordinator
//!
//! Glues mapper output and the term index into transient tooltip state.
//! The state is replaced wholesale on every hover/unhover, never partially
//! mutated; highlight marks are the caller's (DOM layer's) concern and are
//! swept unconditionally on leave.

use serde::Serialize;

use crate::mapper;
use crate::models::{ElementClassification, NodeSnapshot, Point};
use crate::terms::{TermEntry, TERMS};

/// What the host should render for the current hover
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TooltipState {
    pub classification: ElementClassification,
    pub term: TermEntry,
    /// Anchor point: the node's horizontal center, flush with its top edge
    pub anchor: Point,
}

/// Owns the transient tooltip state
#[derive(Debug, Default)]
pub struct TooltipCoordinator {
    current: Option<TooltipState>,
}

impl TooltipCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle pointer-enter over a node; returns the state to render
    ///
    /// An unclassifiable node or a term-index miss clears the tooltip.
    pub fn pointer_enter(&mut self, node: &NodeSnapshot) -> Option<TooltipState> {
        self.current = resolve_tooltip(node);
        self.current
    }

    /// Handle pointer-leave: clear unconditionally
    pub fn pointer_leave(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&TooltipState> {
        self.current.as_ref()
    }
}

/// Compute the tooltip for a node, if it classifies and has a term entry
pub fn resolve_tooltip(node: &NodeSnapshot) -> Option<TooltipState> {
    let classification = mapper::classify(node)?;
    let subtype = mapper::subtype_of(node, classification);
    let term = *TERMS.lookup(classification, subtype.as_deref())?;
    let anchor = Point::new(node.rect.x + node.rect.w / 2.0, node.rect.y);
    Some(TooltipState {
        classification,
        term,
        anchor,
    })
}
