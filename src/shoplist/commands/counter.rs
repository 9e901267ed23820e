use crate::commands::{CmdMessage, CmdResult, CountdownReport};
use crate::countdown::{self, CountdownState};
use chrono::TimeDelta;

pub fn status(state: &CountdownState, frequency: TimeDelta, now: i64) -> CmdResult {
    CmdResult::default().with_countdown(report(state, frequency, now))
}

pub fn mark_done(state: &mut CountdownState, frequency: TimeDelta, now: i64) -> CmdResult {
    state.mark_done(now);
    let mut result = CmdResult::default().with_countdown(report(state, frequency, now));
    result.add_message(CmdMessage::success("Marked as done"));
    result
}

fn report(state: &CountdownState, frequency: TimeDelta, now: i64) -> CountdownReport {
    CountdownReport {
        status: countdown::status(state, frequency, now),
        history: state.completed_at_timestamps.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marking_done_resets_the_countdown() {
        let mut state = CountdownState {
            completed_at_timestamps: vec![0],
        };
        let frequency = TimeDelta::seconds(10);

        let before = status(&state, frequency, 60_000);
        assert!(before.countdown.unwrap().status.is_overdue);

        let after = mark_done(&mut state, frequency, 60_000);
        let report = after.countdown.unwrap();
        assert!(!report.status.is_overdue);
        assert_eq!(report.status.distance.seconds, 10);
        assert_eq!(report.history, vec![60_000, 0]);
    }
}
