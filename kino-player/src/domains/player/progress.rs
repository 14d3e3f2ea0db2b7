//! Deciding when the local playhead is worth a network write.

use kino_model::ProgressSnapshot;

/// Playhead captured when the save debounce fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSave {
    pub played_seconds: f64,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SaveDecision {
    /// Send this save now. The saver counts it as in flight.
    Send(PendingSave),
    /// Too close to the last accepted position.
    BelowThreshold,
    /// Another save is in flight. The newest parked save is re-checked when
    /// it completes.
    Parked,
}

/// Where a session starts.
///
/// The server's stored position only picks the resume fraction. It never
/// seeds the save gate: every mount starts with an empty gate so the first
/// save after a resume always goes out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResumePoint {
    /// Fraction of the stream to seek to once the duration is known.
    pub fraction: f64,
}

impl ResumePoint {
    pub fn from_snapshot(
        snapshot: Option<&ProgressSnapshot>,
        ceiling_percent: f64,
    ) -> Self {
        let Some(snapshot) = snapshot else {
            return Self::default();
        };
        Self {
            fraction: snapshot.resume_fraction(ceiling_percent).unwrap_or(0.0),
        }
    }
}

/// Magnitude gate plus the single in-flight slot for progress saves.
#[derive(Debug, Clone)]
pub struct ProgressSaver {
    min_delta_secs: f64,
    last_saved: Option<f64>,
    in_flight: Option<PendingSave>,
    parked: Option<PendingSave>,
}

impl ProgressSaver {
    /// `last_saved` seeds the gate. With `None` the first save always goes
    /// out.
    pub fn new(min_delta_secs: f64, last_saved: Option<f64>) -> Self {
        Self {
            min_delta_secs,
            last_saved,
            in_flight: None,
            parked: None,
        }
    }

    pub fn last_saved(&self) -> Option<f64> {
        self.last_saved
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn admit(&mut self, save: PendingSave) -> SaveDecision {
        if self.in_flight.is_some() {
            self.parked = Some(save);
            return SaveDecision::Parked;
        }
        if !self.passes_gate(save.played_seconds) {
            return SaveDecision::BelowThreshold;
        }
        self.in_flight = Some(save);
        SaveDecision::Send(save)
    }

    /// Record the outcome of the in-flight save and hand back the parked one,
    /// if any, for another pass through [`ProgressSaver::admit`].
    pub fn finish(&mut self, succeeded: bool) -> Option<PendingSave> {
        if let Some(sent) = self.in_flight.take()
            && succeeded
        {
            self.last_saved = Some(sent.played_seconds);
        }
        self.parked.take()
    }

    pub fn discard_parked(&mut self) -> bool {
        self.parked.take().is_some()
    }

    // Absolute difference: a backward jump after a seek is a real position.
    fn passes_gate(&self, played_seconds: f64) -> bool {
        if !played_seconds.is_finite() {
            return false;
        }
        match self.last_saved {
            None => true,
            Some(last) => (played_seconds - last).abs() >= self.min_delta_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(played_seconds: f64) -> PendingSave {
        PendingSave {
            played_seconds,
            duration_seconds: 600.0,
        }
    }

    #[test]
    fn first_save_passes_then_gate_applies() {
        let mut saver = ProgressSaver::new(5.0, None);
        assert_eq!(saver.admit(at(1.0)), SaveDecision::Send(at(1.0)));
        assert_eq!(saver.finish(true), None);
        assert_eq!(saver.last_saved(), Some(1.0));

        assert_eq!(saver.admit(at(5.9)), SaveDecision::BelowThreshold);
        assert_eq!(saver.admit(at(6.0)), SaveDecision::Send(at(6.0)));
    }

    #[test]
    fn backward_jumps_count_by_magnitude() {
        let mut saver = ProgressSaver::new(5.0, Some(300.0));
        assert_eq!(saver.admit(at(297.0)), SaveDecision::BelowThreshold);
        assert_eq!(saver.admit(at(20.0)), SaveDecision::Send(at(20.0)));
    }

    #[test]
    fn failed_save_keeps_previous_position() {
        let mut saver = ProgressSaver::new(5.0, Some(10.0));
        assert_eq!(saver.admit(at(30.0)), SaveDecision::Send(at(30.0)));
        saver.finish(false);
        assert_eq!(saver.last_saved(), Some(10.0));
        assert!(!saver.is_in_flight());
    }

    #[test]
    fn saves_due_while_in_flight_are_parked_latest_wins() {
        let mut saver = ProgressSaver::new(5.0, None);
        assert_eq!(saver.admit(at(10.0)), SaveDecision::Send(at(10.0)));
        assert_eq!(saver.admit(at(12.0)), SaveDecision::Parked);
        assert_eq!(saver.admit(at(40.0)), SaveDecision::Parked);

        let parked = saver.finish(true).unwrap();
        assert_eq!(parked, at(40.0));
        assert_eq!(saver.admit(parked), SaveDecision::Send(at(40.0)));
    }

    #[test]
    fn non_finite_playhead_is_never_sent() {
        let mut saver = ProgressSaver::new(5.0, None);
        assert_eq!(saver.admit(at(f64::NAN)), SaveDecision::BelowThreshold);
    }

    #[test]
    fn resume_point_respects_ceiling() {
        let snapshot = ProgressSnapshot {
            position_seconds: 97.0,
            duration_seconds: 100.0,
            progress_percent: 97.0,
        };
        let resume = ResumePoint::from_snapshot(Some(&snapshot), 95.0);
        assert_eq!(resume.fraction, 0.0);

        assert_eq!(ResumePoint::from_snapshot(None, 95.0), ResumePoint::default());
    }
}
