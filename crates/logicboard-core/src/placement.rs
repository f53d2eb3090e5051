//! Placement state machine for recognition results.
//!
//! A result coming back from the recognition service is not drawn right
//! away. The board enters `AwaitingPlacement` and the next click on the
//! surface decides where the annotation goes. While a request is in flight or
//! a result is waiting, no new request may be issued.

use crate::recognition::{RecognitionError, RecognitionOutcome, RecognitionResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identifies the one outstanding recognition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A result waiting for the user to choose its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPlacement {
    pub result: RecognitionResult,
}

impl PendingPlacement {
    /// Text shown for the annotation once placed.
    pub fn display_text(&self) -> String {
        display_text(&self.result)
    }
}

/// State of the placement workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlacementState {
    #[default]
    Idle,
    AwaitingPlacement(PendingPlacement),
}

/// A placed result, ready to become an annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub result: RecognitionResult,
    pub display_text: String,
    pub top: f64,
    pub left: f64,
}

/// What a finished request did to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The ticket was not the outstanding one; nothing changed.
    Stale,
    /// The request failed; the machine is back to idle.
    Failed(RecognitionError),
    /// The first result is now pending. `assignments` lists every result
    /// flagged as a variable assignment, in service order.
    Pending {
        result: RecognitionResult,
        assignments: Vec<RecognitionResult>,
    },
}

/// Fixed display template: `\(\LARGE{\text{<expression>} = <answer>}\)`.
pub fn display_text(result: &RecognitionResult) -> String {
    format!(
        "\\(\\LARGE{{\\text{{{}}} = {}}}\\)",
        result.expression, result.answer
    )
}

/// Governs submission and placement of recognition results.
#[derive(Debug, Clone, Default)]
pub struct PlacementMachine {
    state: PlacementState,
    in_flight: Option<RequestTicket>,
    next_ticket: u64,
}

impl PlacementMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    /// Check if a result is waiting to be placed.
    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, PlacementState::AwaitingPlacement(_))
    }

    pub fn pending(&self) -> Option<&PendingPlacement> {
        match &self.state {
            PlacementState::AwaitingPlacement(pending) => Some(pending),
            PlacementState::Idle => None,
        }
    }

    /// Ticket of the request in flight.
    pub fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight
    }

    /// Whether the recognition trigger is enabled.
    pub fn can_submit(&self) -> bool {
        self.in_flight.is_none() && !self.is_awaiting()
    }

    /// Reserve the single request slot.
    pub fn begin_submission(&mut self) -> Result<RequestTicket, RecognitionError> {
        if !self.can_submit() {
            return Err(RecognitionError::Busy);
        }
        self.next_ticket += 1;
        let ticket = RequestTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        Ok(ticket)
    }

    /// Release the request slot without a result (e.g. the snapshot could
    /// not be encoded).
    pub fn abandon_submission(&mut self, ticket: RequestTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Apply the outcome of the request identified by `ticket`.
    pub fn complete_submission(&mut self, ticket: RequestTicket, outcome: RecognitionOutcome) -> Completion {
        if self.in_flight != Some(ticket) {
            log::debug!("Dropping completion for stale ticket {}", ticket.id());
            return Completion::Stale;
        }
        self.in_flight = None;

        let results = match outcome {
            Ok(results) => results,
            Err(e) => return Completion::Failed(e),
        };
        let assignments: Vec<RecognitionResult> =
            results.iter().filter(|r| r.assign).cloned().collect();
        let Some(first) = results.into_iter().next() else {
            return Completion::Failed(RecognitionError::Empty);
        };

        self.state = PlacementState::AwaitingPlacement(PendingPlacement { result: first.clone() });
        Completion::Pending {
            result: first,
            assignments,
        }
    }

    /// Place the pending result at a click position.
    ///
    /// The click's `y` becomes `top` and its `x` becomes `left`. Without a
    /// pending result this is a no-op.
    pub fn place(&mut self, at: Point) -> Option<Placed> {
        match std::mem::take(&mut self.state) {
            PlacementState::AwaitingPlacement(pending) => Some(Placed {
                display_text: pending.display_text(),
                result: pending.result,
                top: at.y,
                left: at.x,
            }),
            PlacementState::Idle => None,
        }
    }

    /// Discard the pending result. Returns `false` when nothing was pending.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            PlacementState::AwaitingPlacement(_) => true,
            PlacementState::Idle => false,
        }
    }
}
