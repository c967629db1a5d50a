use cogbat_core::{Frame, InputEvent, Key, Phase, Response, TrialRecord, TrialState};
use cogbat_timing::{Clock, Deadline};
use rand::Rng;
use tracing::{debug, info};

use crate::config::TaskConfig;
use crate::task::{InputOutcome, Task, Verdict};
use crate::trial::ActiveTrial;

/// Events surfaced to the front end. Everything else is observable through
/// the getters.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    PhaseEntered(Phase),
    TrialStarted { index: usize },
    TrialResolved(TrialRecord),
    /// The main phase finished; carry its records so the front end can
    /// persist them at the boundary.
    Finished { main_trials: Vec<TrialRecord> },
}

/// Drives one task through instructions → practice → main → done, owning
/// the per-trial presentation pacing, the response-window/timeout race,
/// scoring and the result log.
///
/// Single-threaded and cooperative: `poll` checks the one pending deadline
/// against the clock, `handle_input` feeds it normalized input events.
pub struct TrialScheduler<T, C, R>
where
    T: Task,
    C: Clock,
    R: Rng,
{
    task: T,
    clock: C,
    rng: R,
    config: TaskConfig,
    phase: Phase,
    trial: Option<ActiveTrial>,
    completed_in_phase: usize,
    records: Vec<TrialRecord>,
    deadline: Deadline,
    notice: Option<String>,
}

impl<T, C, R> TrialScheduler<T, C, R>
where
    T: Task,
    C: Clock,
    R: Rng,
{
    pub fn new(task: T, clock: C, rng: R) -> Self {
        let config = task.config();
        Self {
            task,
            clock,
            rng,
            config,
            phase: Phase::default(),
            trial: None,
            completed_in_phase: 0,
            records: Vec::new(),
            deadline: Deadline::new(),
            notice: None,
        }
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn trial_state(&self) -> Option<TrialState> {
        self.trial.as_ref().map(|t| t.state)
    }

    /// All recorded trials, practice and main, in resolution order.
    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    /// `(current trial, phase total)` while in a trial phase.
    pub fn progress(&self) -> Option<(usize, usize)> {
        if !self.phase.is_trial_phase() {
            return None;
        }
        let current = self
            .trial
            .as_ref()
            .map(|t| t.index)
            .unwrap_or(self.completed_in_phase);
        Some((current, self.config.total_for(self.phase)))
    }

    /// What the front end should show right now.
    pub fn frame(&self) -> Frame {
        match self.phase {
            Phase::Instructions => Frame::Instructions(self.task.instructions().to_string()),
            Phase::Practice | Phase::Main => match &self.trial {
                None => Frame::PhaseBreak(if self.phase.is_practice() {
                    "Practice round. Press space to begin.".to_string()
                } else {
                    "Practice is over. Press space to begin the task.".to_string()
                }),
                Some(trial) => match trial.state {
                    TrialState::Presenting => trial
                        .plan
                        .get(trial.step)
                        .map(|s| s.frame.clone())
                        .unwrap_or(Frame::Blank),
                    TrialState::AwaitingResponse => match &self.notice {
                        Some(msg) => Frame::Notice(msg.clone()),
                        None => self.task.response_frame(&trial.stimulus, &trial.partial),
                    },
                    TrialState::Feedback => trial
                        .feedback
                        .clone()
                        .map(|(text, correct)| Frame::Feedback { text, correct })
                        .unwrap_or(Frame::Blank),
                    TrialState::WaitingStart | TrialState::Complete => Frame::Blank,
                },
            },
            Phase::Done => Frame::Thanks,
        }
    }

    /// Advance time-driven transitions: presentation steps, response-window
    /// expiry, feedback dwell.
    pub fn poll(&mut self) -> Vec<SchedulerEvent> {
        let mut events = Vec::new();
        if !self.phase.is_trial_phase() {
            return events;
        }
        let now = self.clock.now();
        let Some(state) = self.trial.as_ref().map(|t| t.state) else {
            return events;
        };
        match state {
            TrialState::Presenting => {
                if self.deadline.take_fired(now) {
                    self.advance_presentation(now);
                }
            }
            TrialState::AwaitingResponse => {
                if self.deadline.take_fired(now) {
                    self.resolve_trial(None, &mut events);
                }
            }
            TrialState::Feedback => {
                if self.deadline.take_fired(now) {
                    self.finish_trial(&mut events);
                }
            }
            TrialState::WaitingStart | TrialState::Complete => {}
        }
        events
    }

    /// Feed one input event into the state machine.
    pub fn handle_input(&mut self, input: InputEvent) -> Vec<SchedulerEvent> {
        let mut events = Vec::new();
        match self.phase {
            Phase::Instructions => {
                if Self::is_start_signal(&input) {
                    self.enter_phase(Phase::Practice, &mut events);
                }
            }
            Phase::Practice | Phase::Main => match self.trial.as_ref().map(|t| t.state) {
                None => {
                    if Self::is_start_signal(&input) {
                        self.start_trial(&mut events);
                    }
                }
                Some(TrialState::AwaitingResponse) => {
                    self.input_during_window(input, &mut events);
                }
                // Presenting, Feedback, Complete: input is dropped.
                Some(_) => {}
            },
            Phase::Done => {}
        }
        events
    }

    fn is_start_signal(input: &InputEvent) -> bool {
        matches!(
            input,
            InputEvent::Key {
                key: Key::Space,
                repeat: false
            }
        )
    }

    fn enter_phase(&mut self, phase: Phase, events: &mut Vec<SchedulerEvent>) {
        debug!(task = self.task.name(), phase = ?phase, "phase entered");
        self.phase = phase;
        self.completed_in_phase = 0;
        self.trial = None;
        self.deadline.cancel();
        self.notice = None;
        events.push(SchedulerEvent::PhaseEntered(phase));
    }

    fn start_trial(&mut self, events: &mut Vec<SchedulerEvent>) {
        let now = self.clock.now();
        let index = self.completed_in_phase + 1;
        let stimulus = self
            .task
            .next_stimulus(self.phase, self.completed_in_phase, &mut self.rng);
        let plan = self.task.presentation(&stimulus);
        debug!(
            task = self.task.name(),
            phase = ?self.phase,
            trial = index,
            stimulus = stimulus.kind(),
            "trial started"
        );

        let mut trial = ActiveTrial::new(index, stimulus, plan);
        if trial.plan.is_empty() {
            trial.state = TrialState::AwaitingResponse;
            trial.window_opened_ns = Some(now);
            match self.config.response_window_ms {
                Some(window) => self.deadline.arm(now, window),
                None => self.deadline.cancel(),
            }
        } else {
            self.deadline.arm(now, trial.plan[0].ms);
        }
        self.trial = Some(trial);
        self.notice = None;
        events.push(SchedulerEvent::TrialStarted { index });
    }

    fn advance_presentation(&mut self, now: u64) {
        let Some(trial) = self.trial.as_mut() else {
            return;
        };
        trial.step += 1;
        if trial.step < trial.plan.len() {
            self.deadline.arm(now, trial.plan[trial.step].ms);
        } else {
            trial.state = TrialState::AwaitingResponse;
            trial.window_opened_ns = Some(now);
            match self.config.response_window_ms {
                Some(window) => self.deadline.arm(now, window),
                None => self.deadline.cancel(),
            }
        }
    }

    fn input_during_window(&mut self, input: InputEvent, events: &mut Vec<SchedulerEvent>) {
        // Auto-repeated key-downs never qualify.
        if matches!(input, InputEvent::Key { repeat: true, .. }) {
            return;
        }
        let Some(trial) = self.trial.as_ref() else {
            return;
        };
        match self.task.accept(&trial.stimulus, &trial.partial, &input) {
            InputOutcome::Ignore => {}
            InputOutcome::Reject(msg) => self.notice = Some(msg),
            InputOutcome::Progress(partial) => {
                self.notice = None;
                if let Some(trial) = self.trial.as_mut() {
                    trial.partial = partial;
                }
            }
            InputOutcome::Resolve(response) => {
                self.notice = None;
                self.resolve_trial(Some(response), events);
            }
        }
    }

    /// The single resolution point for a trial, from input (`Some`) or
    /// window expiry (`None`). Only acts in `AwaitingResponse`, so whichever
    /// side loses the race is a no-op and a trial is recorded exactly once.
    fn resolve_trial(&mut self, response: Option<Response>, events: &mut Vec<SchedulerEvent>) {
        let now = self.clock.now();
        let phase = self.phase;

        let Some(trial) = self.trial.as_mut() else {
            return;
        };
        if trial.state != TrialState::AwaitingResponse {
            return;
        }
        self.deadline.cancel();

        let (rt_ms, timeout, verdict) = match &response {
            Some(resp) => {
                let rt = trial
                    .window_opened_ns
                    .map(|opened| (now.saturating_sub(opened) + 500_000) / 1_000_000)
                    .unwrap_or(0);
                (rt, false, self.task.judge(phase, &trial.stimulus, resp))
            }
            None => (
                self.config.response_window_ms.unwrap_or(0),
                true,
                Verdict {
                    correct: false,
                    payout_cents: None,
                    feedback: self.task.timeout_feedback(),
                },
            ),
        };

        let record = TrialRecord {
            index: trial.index,
            phase,
            stimulus: trial.stimulus.clone(),
            response,
            rt_ms,
            correct: verdict.correct,
            timeout,
            payout_cents: verdict.payout_cents,
        };
        debug!(
            task = self.task.name(),
            trial = record.index,
            correct = record.correct,
            rt_ms = record.rt_ms,
            timeout = record.timeout,
            "trial resolved"
        );

        trial.state = TrialState::Feedback;
        trial.feedback = Some((verdict.feedback.clone(), verdict.correct));
        let dwell = self.task.feedback_ms(&verdict);
        self.deadline.arm(now, dwell);

        self.records.push(record.clone());
        events.push(SchedulerEvent::TrialResolved(record));
    }

    fn finish_trial(&mut self, events: &mut Vec<SchedulerEvent>) {
        if self.trial.take().is_none() {
            return;
        }
        self.completed_in_phase += 1;

        if self.completed_in_phase >= self.config.total_for(self.phase) {
            match self.phase {
                Phase::Practice => self.enter_phase(Phase::Main, events),
                Phase::Main => {
                    self.phase = Phase::Done;
                    self.deadline.cancel();
                    events.push(SchedulerEvent::PhaseEntered(Phase::Done));
                    let main_trials: Vec<TrialRecord> = self
                        .records
                        .iter()
                        .filter(|r| r.phase.is_main())
                        .cloned()
                        .collect();
                    info!(
                        task = self.task.name(),
                        trials = main_trials.len(),
                        correct = main_trials.iter().filter(|r| r.correct).count(),
                        "session finished"
                    );
                    events.push(SchedulerEvent::Finished { main_trials });
                }
                _ => {}
            }
        } else {
            self.start_trial(events);
        }
    }
}
