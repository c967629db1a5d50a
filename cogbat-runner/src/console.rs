//! Console front end for the standalone tasks: renders scheduler frames as
//! text, maps typed lines onto input events, and paces the poll loop.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use cogbat_core::{CueColor, Frame, InputEvent, Key, Side, TrialState};
use cogbat_scheduler::tasks::balloon::format_cents;
use cogbat_scheduler::{SchedulerEvent, Task, TrialScheduler};
use cogbat_store::ResultStore;
use cogbat_timing::{precise_sleep, MonoClock};

use crate::cli::TaskKind;

const POLL_MS: u64 = 16;

pub fn run_task<T: Task>(task: T, kind: TaskKind, store: &ResultStore) -> Result<()> {
    let mut sched = TrialScheduler::new(task, MonoClock::new(), rand::rng());
    let lines = spawn_stdin_reader();
    let mut last_frame: Option<Frame> = None;

    loop {
        let mut events = sched.poll();

        match lines.try_recv() {
            Ok(line) => {
                let awaiting =
                    matches!(sched.trial_state(), Some(TrialState::AwaitingResponse));
                for input in parse_line(kind, awaiting, &line) {
                    events.extend(sched.handle_input(input));
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        for event in &events {
            if let SchedulerEvent::Finished { main_trials } = event {
                let participant = store.append(main_trials.clone());
                print_summary(kind, &participant);
            }
        }

        let frame = sched.frame();
        if last_frame.as_ref() != Some(&frame) {
            render(&frame, &sched);
            last_frame = Some(frame);
        }

        if sched.phase().is_done() {
            break;
        }
        precise_sleep(Duration::from_millis(POLL_MS));
    }

    Ok(())
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        loop {
            line.clear();
            match std::io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if tx.send(line.trim_end().to_string()).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

/// Map one typed line onto input events for the active task. Outside a
/// response window any line acts as the start signal.
pub fn parse_line(kind: TaskKind, awaiting: bool, line: &str) -> Vec<InputEvent> {
    let text = line.trim().to_ascii_lowercase();
    if !awaiting {
        return vec![InputEvent::key(Key::Space)];
    }
    match kind {
        TaskKind::Antisaccade => match text.as_str() {
            "l" | "left" => vec![InputEvent::key(Key::ArrowLeft)],
            "r" | "right" => vec![InputEvent::key(Key::ArrowRight)],
            _ => Vec::new(),
        },
        TaskKind::DigitSpan => vec![InputEvent::Submit(line.trim().to_string())],
        TaskKind::Corsi => text
            .chars()
            .filter_map(|c| c.to_digit(10))
            .filter(|d| (1..=9).contains(d))
            .map(|d| InputEvent::Tap(d as u8 - 1))
            .collect(),
        TaskKind::Balloon => match text.as_str() {
            "p" | "pump" => vec![InputEvent::key(Key::Space)],
            "" | "b" | "bank" => vec![InputEvent::key(Key::Enter)],
            _ => Vec::new(),
        },
    }
}

fn render<T: Task, C: cogbat_timing::Clock, R: rand::Rng>(
    frame: &Frame,
    sched: &TrialScheduler<T, C, R>,
) {
    if let Some((current, total)) = sched.progress() {
        if current > 0 {
            println!("\n[{:?} {current}/{total}]", sched.phase());
        }
    }
    match frame {
        Frame::Blank => {}
        Frame::Instructions(text) => println!("\n{text}"),
        Frame::PhaseBreak(text) => println!("\n{text}"),
        Frame::Fixation => println!("\n        +"),
        Frame::Cue { side, color } => {
            let dot = match color {
                CueColor::Red => "RED",
                CueColor::Green => "GREEN",
            };
            match side {
                Side::Left => println!("\n  ({dot})          ( )      [l]eft / [r]ight?"),
                Side::Right => println!("\n  ( )          ({dot})      [l]eft / [r]ight?"),
            }
        }
        Frame::Digit(d) => println!("\n        {d}"),
        Frame::Mask => println!("\n      * * *\nType the digits, then press Enter."),
        Frame::BlockFlash(block) => print_grid(Some(*block)),
        Frame::Grid { taps, expected } => {
            print_grid(None);
            println!("Tap blocks by typing their numbers ({taps}/{expected}).");
        }
        Frame::Balloon { pumps, value_cents } => {
            println!(
                "\nBalloon: {} pump(s), round value {}. [p]ump or [b]ank?",
                pumps,
                format_cents(*value_cents)
            );
        }
        Frame::SingleDigit(d) => println!("\n        {d}"),
        Frame::WordColor { word, ink } => println!("\n{word}   (ink: {:?})", ink),
        Frame::Notice(text) => println!("\n{text}"),
        Frame::Feedback { text, .. } => println!("\n{text}"),
        Frame::Thanks => println!("\nAll trials finished. Thank you!"),
    }
}

fn print_grid(lit: Option<u8>) {
    println!();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let idx = row * 3 + col;
                if lit == Some(idx) {
                    format!("({})", idx + 1)
                } else {
                    format!("[{}]", idx + 1)
                }
            })
            .collect();
        println!("  {}", cells.join(" "));
    }
}

fn print_summary(kind: TaskKind, participant: &cogbat_core::Participant) {
    println!(
        "\nParticipant {}: {}/{} correct",
        participant.id,
        participant.correct_count(),
        participant.trials.len()
    );
    if let Some(avg) = participant.mean_rt_ms() {
        println!("Average response time: {avg} ms");
    }
    if kind == TaskKind::Balloon {
        println!("Total banked: {}", format_cents(participant.total_payout_cents()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_line_is_a_start_signal_outside_a_window() {
        assert_eq!(
            parse_line(TaskKind::Antisaccade, false, ""),
            vec![InputEvent::key(Key::Space)]
        );
        assert_eq!(
            parse_line(TaskKind::DigitSpan, false, "anything"),
            vec![InputEvent::key(Key::Space)]
        );
    }

    #[test]
    fn antisaccade_lines_map_to_arrows() {
        assert_eq!(
            parse_line(TaskKind::Antisaccade, true, "l"),
            vec![InputEvent::key(Key::ArrowLeft)]
        );
        assert_eq!(
            parse_line(TaskKind::Antisaccade, true, "RIGHT"),
            vec![InputEvent::key(Key::ArrowRight)]
        );
        assert!(parse_line(TaskKind::Antisaccade, true, "x").is_empty());
    }

    #[test]
    fn corsi_lines_fan_out_into_taps() {
        assert_eq!(
            parse_line(TaskKind::Corsi, true, "3 7 1 9"),
            vec![
                InputEvent::Tap(2),
                InputEvent::Tap(6),
                InputEvent::Tap(0),
                InputEvent::Tap(8)
            ]
        );
        // 0 is not a block label.
        assert!(parse_line(TaskKind::Corsi, true, "0").is_empty());
    }

    #[test]
    fn balloon_lines_pump_and_bank() {
        assert_eq!(
            parse_line(TaskKind::Balloon, true, "p"),
            vec![InputEvent::key(Key::Space)]
        );
        assert_eq!(
            parse_line(TaskKind::Balloon, true, ""),
            vec![InputEvent::key(Key::Enter)]
        );
    }

    #[test]
    fn digit_span_lines_submit_verbatim() {
        assert_eq!(
            parse_line(TaskKind::DigitSpan, true, " 317 "),
            vec![InputEvent::Submit("317".to_string())]
        );
    }
}
