use cosmwasm_schema::cw_serde;

use crate::PhaseError;

/// Lifecycle of an auction. Phases only ever move forward.
#[cw_serde]
#[derive(Copy)]
pub enum Phase {
    /// Instantiated, the asset is not yet in custody.
    NotStarted,
    /// The asset is in custody and the auction accepts bids.
    Started,
    /// Settled. Terminal.
    Concluded,
}

impl Phase {
    /// Fails unless the auction is between `Start` and `Settle`.
    pub fn ensure_started(self) -> Result<(), PhaseError> {
        match self {
            Phase::Started => Ok(()),
            Phase::NotStarted => Err(PhaseError::NotStarted),
            Phase::Concluded => Err(PhaseError::AlreadyConcluded),
        }
    }

    pub fn ensure_not_started(self) -> Result<(), PhaseError> {
        match self {
            Phase::NotStarted => Ok(()),
            Phase::Started => Err(PhaseError::AlreadyStarted),
            Phase::Concluded => Err(PhaseError::AlreadyConcluded),
        }
    }
}

/// Deadline of the continuous auctions: bidding stays open for
/// `admission_window` blocks after the latest accepted bid.
#[cw_serde]
#[derive(Copy)]
pub struct RollingWindow {
    /// Height of the latest accepted bid, or of the start when there is none.
    pub last_activity: u64,
    pub admission_window: u64,
}

impl RollingWindow {
    pub fn new(height: u64, admission_window: u64) -> Self {
        Self {
            last_activity: height,
            admission_window,
        }
    }

    /// Last height at which a bid is still accepted.
    pub fn closes_at(&self) -> u64 {
        self.last_activity.saturating_add(self.admission_window)
    }

    pub fn admits_bid(&self, height: u64) -> bool {
        height <= self.closes_at()
    }

    pub fn is_elapsed(&self, height: u64) -> bool {
        height > self.closes_at()
    }

    /// Restarts the countdown from `height`.
    pub fn extend(&mut self, height: u64) {
        self.last_activity = height;
    }
}

/// Which part of a commit-reveal schedule a height falls in.
#[cw_serde]
#[derive(Copy)]
pub enum SealedStage {
    Bidding,
    Reveal,
    Closed,
}

/// Fixed deadlines of the sealed-bid auction. Commitments are accepted below
/// `bidding_end`, reveals in `[bidding_end, reveal_end)`, settlement from
/// `reveal_end` on.
#[cw_serde]
#[derive(Copy)]
pub struct TwoPhaseSchedule {
    pub bidding_end: u64,
    pub reveal_end: u64,
}

impl TwoPhaseSchedule {
    /// `None` when either duration is zero or the deadlines overflow.
    pub fn new(start: u64, bidding_duration: u64, reveal_duration: u64) -> Option<Self> {
        if bidding_duration == 0 || reveal_duration == 0 {
            return None;
        }
        let bidding_end = start.checked_add(bidding_duration)?;
        let reveal_end = bidding_end.checked_add(reveal_duration)?;
        Some(Self {
            bidding_end,
            reveal_end,
        })
    }

    pub fn stage(&self, height: u64) -> SealedStage {
        if height < self.bidding_end {
            SealedStage::Bidding
        } else if height < self.reveal_end {
            SealedStage::Reveal
        } else {
            SealedStage::Closed
        }
    }

    pub fn admits_commit(&self, height: u64) -> bool {
        self.stage(height) == SealedStage::Bidding
    }

    pub fn admits_reveal(&self, height: u64) -> bool {
        self.stage(height) == SealedStage::Reveal
    }

    pub fn admits_settlement(&self, height: u64) -> bool {
        self.stage(height) == SealedStage::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_guards() {
        assert_eq!(Phase::NotStarted.ensure_started(), Err(PhaseError::NotStarted));
        assert_eq!(Phase::Started.ensure_started(), Ok(()));
        assert_eq!(Phase::Concluded.ensure_started(), Err(PhaseError::AlreadyConcluded));

        assert_eq!(Phase::NotStarted.ensure_not_started(), Ok(()));
        assert_eq!(Phase::Started.ensure_not_started(), Err(PhaseError::AlreadyStarted));
        assert_eq!(Phase::Concluded.ensure_not_started(), Err(PhaseError::AlreadyConcluded));
    }

    #[test]
    fn rolling_window_extends_on_activity() {
        let mut window = RollingWindow::new(9, 3);
        assert!(window.admits_bid(12));
        assert!(!window.admits_bid(13));
        assert!(!window.is_elapsed(12));

        window.extend(10);
        window.extend(12);
        assert_eq!(window.closes_at(), 15);
        assert!(window.admits_bid(15));
        assert!(!window.is_elapsed(15));
        assert!(window.is_elapsed(16));
        assert!(!window.admits_bid(16));
    }

    #[test]
    fn rolling_window_saturates() {
        let window = RollingWindow::new(u64::MAX - 1, 10);
        assert_eq!(window.closes_at(), u64::MAX);
        assert!(window.admits_bid(u64::MAX));
        assert!(!window.is_elapsed(u64::MAX));
    }

    #[test]
    fn two_phase_boundaries() {
        let schedule = TwoPhaseSchedule::new(100, 10, 5).unwrap();
        assert_eq!(schedule.bidding_end, 110);
        assert_eq!(schedule.reveal_end, 115);

        assert!(schedule.admits_commit(109));
        assert!(!schedule.admits_commit(110));
        assert!(schedule.admits_reveal(110));
        assert!(schedule.admits_reveal(114));
        assert!(!schedule.admits_reveal(115));
        assert!(!schedule.admits_settlement(114));
        assert!(schedule.admits_settlement(115));
    }

    #[test]
    fn two_phase_rejects_degenerate_schedules() {
        assert_eq!(TwoPhaseSchedule::new(100, 0, 5), None);
        assert_eq!(TwoPhaseSchedule::new(100, 5, 0), None);
        assert_eq!(TwoPhaseSchedule::new(u64::MAX - 3, 2, 2), None);
    }
}
