//! End-to-end scheduler runs driven by a manual clock.

use cogbat_core::{Frame, InputEvent, Key, Phase, TrialState};
use cogbat_scheduler::tasks::antisaccade::{correct_key, Antisaccade};
use cogbat_scheduler::tasks::DigitSpan;
use cogbat_scheduler::{SchedulerEvent, Task, TrialScheduler};
use cogbat_timing::TestClock;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn antisaccade() -> (TrialScheduler<Antisaccade, TestClock, SmallRng>, TestClock) {
    let clock = TestClock::new();
    let sched = TrialScheduler::new(Antisaccade, clock.clone(), SmallRng::seed_from_u64(42));
    (sched, clock)
}

fn digit_span() -> (TrialScheduler<DigitSpan, TestClock, SmallRng>, TestClock) {
    let clock = TestClock::new();
    let sched = TrialScheduler::new(DigitSpan, clock.clone(), SmallRng::seed_from_u64(42));
    (sched, clock)
}

fn space() -> InputEvent {
    InputEvent::key(Key::Space)
}

/// Answer the currently shown cue with its correct arrow key.
fn answer_correctly(sched: &mut TrialScheduler<Antisaccade, TestClock, SmallRng>) {
    match sched.frame() {
        Frame::Cue { side, color } => {
            sched.handle_input(InputEvent::key(correct_key(side, color)));
        }
        other => panic!("expected a cue frame, got {other:?}"),
    }
}

#[test]
fn full_lifecycle_produces_exact_phase_counts() {
    let (mut sched, clock) = antisaccade();
    let config = sched.task().config();
    let mut finished = None;

    assert_eq!(sched.phase(), Phase::Instructions);
    sched.handle_input(space());
    assert_eq!(sched.phase(), Phase::Practice);
    sched.handle_input(space());

    // 3 practice + 10 main trials, answering each immediately.
    for _ in 0..64 {
        if sched.phase().is_done() {
            break;
        }
        match sched.trial_state() {
            Some(TrialState::AwaitingResponse) => answer_correctly(&mut sched),
            Some(TrialState::Feedback) => {
                clock.advance_ms(800);
                for event in sched.poll() {
                    if let SchedulerEvent::Finished { main_trials } = event {
                        finished = Some(main_trials);
                    }
                }
            }
            None => {
                sched.handle_input(space());
            }
            other => panic!("unexpected trial state {other:?}"),
        }
    }

    assert_eq!(sched.phase(), Phase::Done);
    assert_eq!(sched.frame(), Frame::Thanks);

    let practice = sched
        .records()
        .iter()
        .filter(|r| r.phase.is_practice())
        .count();
    let main = sched.records().iter().filter(|r| r.phase.is_main()).count();
    assert_eq!(practice, config.practice_trials);
    assert_eq!(main, config.main_trials);

    let finished = finished.expect("main phase emits a finished event");
    assert_eq!(finished.len(), config.main_trials);
    assert!(finished.iter().all(|r| r.correct && !r.timeout));
}

#[test]
fn window_expiry_records_a_timeout_once() {
    let (mut sched, clock) = antisaccade();
    sched.handle_input(space());
    sched.handle_input(space());
    assert_eq!(sched.trial_state(), Some(TrialState::AwaitingResponse));

    clock.advance_ms(2_500);
    let events = sched.poll();
    assert!(events
        .iter()
        .any(|e| matches!(e, SchedulerEvent::TrialResolved(r) if r.timeout)));

    assert_eq!(sched.records().len(), 1);
    let record = &sched.records()[0];
    assert!(record.timeout);
    assert!(!record.correct);
    assert_eq!(record.rt_ms, 2_500);
    assert_eq!(record.response, None);

    // Polling again must not record a second outcome for the same trial.
    clock.advance_ms(10);
    sched.poll();
    assert_eq!(sched.records().len(), 1);
}

#[test]
fn response_after_timeout_does_not_alter_the_record() {
    let (mut sched, clock) = antisaccade();
    sched.handle_input(space());
    sched.handle_input(space());

    clock.advance_ms(2_500);
    sched.poll();
    let recorded = sched.records()[0].clone();

    sched.handle_input(InputEvent::key(Key::ArrowLeft));
    sched.handle_input(InputEvent::key(Key::ArrowRight));
    assert_eq!(sched.records().len(), 1);
    assert_eq!(sched.records()[0], recorded);
}

#[test]
fn response_cancels_the_pending_timeout() {
    let (mut sched, clock) = antisaccade();
    sched.handle_input(space());
    sched.handle_input(space());

    clock.advance_ms(1_000);
    answer_correctly(&mut sched);
    assert_eq!(sched.records().len(), 1);
    let record = sched.records()[0].clone();
    assert!(!record.timeout);
    assert_eq!(record.rt_ms, 1_000);

    // Let more than the old window pass: the cancelled timeout must not
    // fire, only the feedback dwell elapses and the next trial starts.
    clock.advance_ms(2_600);
    sched.poll();
    assert_eq!(sched.records().len(), 1);
    assert_eq!(sched.trial_state(), Some(TrialState::AwaitingResponse));
}

#[test]
fn key_repeat_does_not_resolve_a_trial() {
    let (mut sched, _clock) = antisaccade();
    sched.handle_input(space());
    sched.handle_input(space());

    sched.handle_input(InputEvent::Key { key: Key::ArrowLeft, repeat: true });
    assert_eq!(sched.records().len(), 0);
    assert_eq!(sched.trial_state(), Some(TrialState::AwaitingResponse));
}

#[test]
fn input_during_presentation_is_dropped() {
    let (mut sched, clock) = digit_span();
    sched.handle_input(space());
    sched.handle_input(space());
    assert_eq!(sched.trial_state(), Some(TrialState::Presenting));

    sched.handle_input(InputEvent::Submit("317".to_string()));
    assert_eq!(sched.records().len(), 0);

    // Fixation 800 ms + 3 digits at 900 ms each.
    for ms in [800, 900, 900, 900] {
        clock.advance_ms(ms);
        sched.poll();
    }
    assert_eq!(sched.trial_state(), Some(TrialState::AwaitingResponse));

    sched.handle_input(InputEvent::Submit("317".to_string()));
    assert_eq!(sched.records().len(), 1);
    assert!(sched.records()[0].correct);
}

#[test]
fn empty_submission_shows_a_notice_and_keeps_the_trial_open() {
    let (mut sched, clock) = digit_span();
    sched.handle_input(space());
    sched.handle_input(space());
    for ms in [800, 900, 900, 900] {
        clock.advance_ms(ms);
        sched.poll();
    }

    sched.handle_input(InputEvent::Submit("".to_string()));
    assert_eq!(sched.records().len(), 0);
    assert_eq!(sched.trial_state(), Some(TrialState::AwaitingResponse));
    assert!(matches!(sched.frame(), Frame::Notice(_)));

    sched.handle_input(InputEvent::Submit("371".to_string()));
    assert_eq!(sched.records().len(), 1);
    assert!(!sched.records()[0].correct);
}

#[test]
fn phases_only_move_forward() {
    let (mut sched, clock) = antisaccade();
    let mut seen = vec![sched.phase()];
    let track = |sched: &TrialScheduler<Antisaccade, TestClock, SmallRng>,
                 seen: &mut Vec<Phase>| {
        if seen.last() != Some(&sched.phase()) {
            seen.push(sched.phase());
        }
    };

    sched.handle_input(space());
    track(&sched, &mut seen);
    for _ in 0..200 {
        if sched.phase().is_done() {
            break;
        }
        match sched.trial_state() {
            Some(TrialState::AwaitingResponse) => answer_correctly(&mut sched),
            None => {
                sched.handle_input(space());
            }
            _ => {
                clock.advance_ms(500);
                sched.poll();
            }
        }
        track(&sched, &mut seen);
    }

    assert_eq!(
        seen,
        vec![Phase::Instructions, Phase::Practice, Phase::Main, Phase::Done]
    );

    // Done is terminal: further input changes nothing.
    sched.handle_input(space());
    answer_is_impossible(&sched);
}

fn answer_is_impossible(sched: &TrialScheduler<Antisaccade, TestClock, SmallRng>) {
    assert_eq!(sched.phase(), Phase::Done);
    assert_eq!(sched.trial_state(), None);
}
