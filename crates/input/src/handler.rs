//! Soft-drop hold tracking for terminal environments.
//!
//! Two cases, picked by [`ReleaseEvents`]:
//!
//! - **Reported**: the terminal sends key releases (keyboard enhancement is on).
//!   A press starts the hold and the release ends it. A release within
//!   `SOFT_DROP_TAP_MS` of the press is a tap worth one immediate `MoveDown`.
//! - **Inferred**: only presses arrive, with OS auto-repeat showing up as more
//!   presses. The first press is the tap and moves one row right away. A
//!   second press within `SOFT_DROP_REPEAT_DELAY_MS` means the key is being held; after
//!   that, `SOFT_DROP_RELEASE_TIMEOUT_MS` without a repeat ends the hold.

use crate::types::{
    GameAction, SOFT_DROP_RELEASE_TIMEOUT_MS, SOFT_DROP_REPEAT_DELAY_MS, SOFT_DROP_TAP_MS,
};

/// Whether the terminal reports key releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseEvents {
    Reported,
    Inferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoldState {
    Idle,
    /// Inferred mode only: pressed once, waiting to see an auto-repeat
    Armed,
    Held,
}

/// Tracks whether the soft-drop key is held.
#[derive(Debug, Clone)]
pub struct SoftDropHold {
    releases: ReleaseEvents,
    state: HoldState,
    /// Time since the hold started
    held_ms: u32,
    /// Time since the last press or repeat
    idle_ms: u32,
}

impl SoftDropHold {
    pub fn new(releases: ReleaseEvents) -> Self {
        Self {
            releases,
            state: HoldState::Idle,
            held_ms: 0,
            idle_ms: 0,
        }
    }

    pub fn held(&self) -> bool {
        self.state == HoldState::Held
    }

    /// Key press or auto-repeat.
    ///
    /// Returns `MoveDown` for the first press of a hold when releases are inferred.
    pub fn press(&mut self) -> Option<GameAction> {
        self.idle_ms = 0;
        match (self.releases, self.state) {
            (_, HoldState::Held) => None,
            (ReleaseEvents::Reported, _) => {
                self.start_hold();
                None
            }
            (ReleaseEvents::Inferred, HoldState::Idle) => {
                self.state = HoldState::Armed;
                Some(GameAction::MoveDown)
            }
            (ReleaseEvents::Inferred, HoldState::Armed) => {
                self.start_hold();
                None
            }
        }
    }

    /// Explicit key release.
    ///
    /// A release shortly after the press is a tap and yields one immediate `MoveDown`,
    /// so a quick tap still moves the piece even if no drop interval elapsed.
    pub fn release(&mut self) -> Option<GameAction> {
        let was = self.state;
        self.state = HoldState::Idle;
        match (self.releases, was) {
            (ReleaseEvents::Reported, HoldState::Held) if self.held_ms < SOFT_DROP_TAP_MS => {
                Some(GameAction::MoveDown)
            }
            _ => None,
        }
    }

    /// Advance time. Returns whether soft drop is held afterwards.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        match self.state {
            HoldState::Idle => {}
            HoldState::Armed => {
                self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
                if self.idle_ms >= SOFT_DROP_REPEAT_DELAY_MS {
                    self.state = HoldState::Idle;
                }
            }
            HoldState::Held => {
                self.held_ms = self.held_ms.saturating_add(elapsed_ms);
                self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
                if self.releases == ReleaseEvents::Inferred
                    && self.idle_ms >= SOFT_DROP_RELEASE_TIMEOUT_MS
                {
                    self.state = HoldState::Idle;
                }
            }
        }
        self.held()
    }

    /// Forget any hold (pause, restart).
    pub fn reset(&mut self) {
        self.state = HoldState::Idle;
        self.held_ms = 0;
        self.idle_ms = 0;
    }

    fn start_hold(&mut self) {
        self.state = HoldState::Held;
        self.held_ms = 0;
    }
}
