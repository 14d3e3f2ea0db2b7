//! Progress persistence: debounce, magnitude gate, single in-flight save,
//! completion and unmount behaviour.

mod common;

use std::time::Duration;

use common::{Harness, content_id};
use kino_contracts::services::ServiceError;
use kino_model::{MediaEvent, PlaybackPhase};
use kino_player::domains::player::{PlayerCommand, ResumePoint, SessionEvent};
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn reports_inside_the_debounce_window_produce_one_save() {
    let mut h = Harness::loaded(ResumePoint::default(), 600.0);

    for second in 1..=10 {
        h.report(second as f64);
        sleep(Duration::from_secs(1)).await;
        h.session.settle().await;
    }
    assert!(h.progress.saves().is_empty(), "timer restarts on every report");

    h.flush().await;
    let saves = h.progress.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].content_id, content_id());
    assert_eq!(saves[0].position_seconds, 10);
    assert_eq!(saves[0].duration_seconds, 600);
    assert_eq!(h.session.last_saved_position(), Some(10.0));
}

#[tokio::test(start_paused = true)]
async fn accepted_saves_are_at_least_five_seconds_apart() {
    let mut h = Harness::loaded(ResumePoint::default(), 600.0);

    h.report_and_flush(10.4).await;
    h.report_and_flush(13.0).await;
    h.report_and_flush(16.0).await;
    // Backward jump after a seek: gated by magnitude only.
    h.report_and_flush(12.0).await;
    h.report_and_flush(3.0).await;

    assert_eq!(h.progress.saved_positions(), vec![10, 16, 3]);
    assert_eq!(h.session.last_saved_position(), Some(3.0));
}

#[tokio::test(start_paused = true)]
async fn first_save_after_resume_always_goes_out() {
    let mut h = Harness::loaded(ResumePoint { fraction: 0.4 }, 100.0);
    assert_eq!(h.media.seeks(), vec![40.0]);
    assert_eq!(h.session.last_saved_position(), None);

    h.session.apply_command(PlayerCommand::TogglePlay);
    h.report(43.0);
    h.session.apply_command(PlayerCommand::TogglePlay);
    assert_eq!(h.session.phase(), PlaybackPhase::Paused);
    h.flush().await;

    assert_eq!(h.progress.saved_positions(), vec![43]);

    h.report_and_flush(45.0).await;
    assert_eq!(h.progress.saved_positions(), vec![43], "gate applies after");
}

#[tokio::test(start_paused = true)]
async fn unmount_drops_the_pending_save() {
    let mut h = Harness::loaded(ResumePoint::default(), 600.0);
    h.report(30.0);
    assert!(h.session.is_save_pending());

    h.session.unmount();
    assert!(!h.session.is_save_pending());

    sleep(Duration::from_secs(10)).await;
    h.session.settle().await;
    h.report(60.0);
    h.flush().await;

    assert!(h.progress.saves().is_empty());
    assert!(h.session.is_unmounted());
}

#[tokio::test(start_paused = true)]
async fn unmount_event_stops_the_loop() {
    let mut h = Harness::loaded(ResumePoint::default(), 600.0);
    let handle = h.session.handle();
    h.report(30.0);

    assert!(handle.send(SessionEvent::Unmount));
    h.session.run().await;

    sleep(Duration::from_secs(5)).await;
    h.session.settle().await;
    assert!(h.progress.saves().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_save_is_logged_and_playback_continues() {
    let mut h = Harness::loaded(ResumePoint::default(), 600.0);
    h.session.apply_command(PlayerCommand::TogglePlay);
    h.progress.fail_saves(Some(ServiceError::Transport(
        "connection refused".into(),
    )));

    h.report_and_flush(20.0).await;

    assert_eq!(h.progress.saved_positions(), vec![20]);
    assert_eq!(h.session.last_saved_position(), None);
    assert_eq!(h.session.phase(), PlaybackPhase::Playing);
    assert!(h.media.is_playing());

    // No retry: the failed position only goes out again with a new report.
    sleep(Duration::from_secs(10)).await;
    h.session.settle().await;
    assert_eq!(h.progress.saves().len(), 1);

    h.progress.fail_saves(None);
    h.report_and_flush(21.0).await;
    assert_eq!(h.progress.saved_positions(), vec![20, 21]);
    assert_eq!(h.session.last_saved_position(), Some(21.0));
}

#[tokio::test(start_paused = true)]
async fn saves_due_while_one_is_in_flight_wait_for_it() {
    let mut h = Harness::loaded(ResumePoint::default(), 600.0);
    h.progress.hold_saves();

    h.report_and_flush(10.0).await;
    h.report_and_flush(20.0).await;
    h.report_and_flush(30.0).await;
    assert_eq!(h.progress.saved_positions(), vec![10], "one in flight");

    h.progress.release_saves();
    h.session.settle().await;

    assert_eq!(h.progress.saved_positions(), vec![10, 30]);
    assert_eq!(h.session.last_saved_position(), Some(30.0));
}

#[tokio::test(start_paused = true)]
async fn ended_marks_complete_once_per_transition() {
    let mut h = Harness::loaded(ResumePoint::default(), 100.0);
    h.session.apply_command(PlayerCommand::TogglePlay);

    h.session.update(SessionEvent::Media(MediaEvent::Ended));
    h.session.update(SessionEvent::Media(MediaEvent::Ended));
    h.session.settle().await;

    assert_eq!(h.session.phase(), PlaybackPhase::Ended);
    assert_eq!(h.progress.completions(), vec![content_id()]);

    // Rewatching the tail ends again.
    h.media.set_position(100.0);
    h.session.apply_command(PlayerCommand::SkipBackward);
    assert_eq!(h.session.phase(), PlaybackPhase::Paused);
    h.session.apply_command(PlayerCommand::TogglePlay);
    h.session.update(SessionEvent::Media(MediaEvent::Ended));
    h.session.settle().await;

    assert_eq!(h.progress.completions().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn stream_ending_under_a_held_seek_bar_still_completes() {
    let mut h = Harness::loaded(ResumePoint::default(), 100.0);
    h.session.apply_command(PlayerCommand::TogglePlay);
    h.session.update(SessionEvent::SeekPressed);

    h.session.update(SessionEvent::Media(MediaEvent::Ended));
    h.session.update(SessionEvent::Media(MediaEvent::Ended));
    h.session.settle().await;

    assert_eq!(h.session.phase(), PlaybackPhase::Seeking);
    assert_eq!(h.progress.completions(), vec![content_id()]);
    assert!(!h.session.playback().playing);

    h.session.update(SessionEvent::SeekReleased(0.5));
    assert_eq!(h.session.phase(), PlaybackPhase::Paused, "no auto-resume");
    assert!(!h.session.playback().playing);
}

#[tokio::test(start_paused = true)]
async fn releasing_at_the_end_after_ending_stays_ended() {
    let mut h = Harness::loaded(ResumePoint::default(), 100.0);
    h.session.apply_command(PlayerCommand::TogglePlay);
    h.session.update(SessionEvent::SeekPressed);
    h.session.update(SessionEvent::Media(MediaEvent::Ended));

    h.session.update(SessionEvent::SeekReleased(1.0));
    h.session.update(SessionEvent::Media(MediaEvent::Ended));
    h.session.settle().await;

    assert_eq!(h.session.phase(), PlaybackPhase::Ended);
    assert_eq!(h.progress.completions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_completion_is_not_fatal() {
    let mut h = Harness::loaded(ResumePoint::default(), 100.0);
    h.progress.fail_completions(Some(ServiceError::Status {
        status: 500,
        body: "boom".into(),
    }));
    h.session.apply_command(PlayerCommand::TogglePlay);

    h.session.update(SessionEvent::Media(MediaEvent::Ended));
    h.session.settle().await;

    assert_eq!(h.session.phase(), PlaybackPhase::Ended);
    assert_eq!(h.progress.completions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn reports_while_scrubbing_are_ignored() {
    let mut h = Harness::loaded(ResumePoint::default(), 100.0);
    h.session.update(SessionEvent::SeekPressed);

    h.report(50.0);
    assert!(!h.session.is_save_pending());
    assert_eq!(h.session.playback().played_fraction, 0.0);

    h.session.update(SessionEvent::SeekReleased(0.5));
    h.report_and_flush(50.0).await;
    assert_eq!(h.progress.saved_positions(), vec![50]);
}
