//! Session-driven runner: fetches trials from the experiment service,
//! collects a response per stimulus modality, and posts it back. Exactly
//! one trial is in flight at a time — `next` is only requested after the
//! current trial's response has been recorded.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use cogbat_session::{ResponsePayload, SessionClient, StimulusPayload};
use cogbat_timing::{Clock, MonoClock};
use serde_json::json;

pub fn run_remote(server: &str, exp_type: &str) -> Result<()> {
    let client = SessionClient::new(server, exp_type)?;
    let session = client
        .start(json!({}))
        .with_context(|| format!("could not start a {exp_type} session with {server}"))?;

    let clock = MonoClock::new();
    let stdin = io::stdin();

    loop {
        let reply = client
            .next(&session)
            .context("experiment service stopped responding")?;
        if reply.is_complete() {
            println!("Complete.");
            if let Some(results) = &reply.results {
                println!("{}", serde_json::to_string_pretty(results)?);
            }
            return Ok(());
        }
        let Some(trial) = reply.trial else {
            return Ok(());
        };

        render_stimulus(&trial.stimulus_data);
        let shown = clock.now();
        let value = collect_response(&trial.stimulus_data, &mut stdin.lock())?;
        let rt_ms = clock.elapsed_ms(shown) as f64;

        client.record(
            &session,
            &ResponsePayload {
                trial_number: trial.trial_number,
                response_value: value,
                response_time_ms: rt_ms,
                correct_response: trial.correct_response.clone(),
                metadata: trial.metadata.clone().unwrap_or_else(|| json!({})),
            },
        );
    }
}

fn render_stimulus(stimulus: &StimulusPayload) {
    match stimulus {
        StimulusPayload::Sequence { sequence } => {
            let digits: Vec<String> = sequence.iter().map(|d| d.to_string()).collect();
            println!("\nMemorize: {}", digits.join(" "));
        }
        StimulusPayload::SingleDigit { digit } => println!("\n        {digit}"),
        StimulusPayload::WordColor { word, ink_color } => {
            println!("\n{word}   (ink: {ink_color})");
        }
    }
}

/// Read a response in the modality the stimulus shape asks for.
pub fn collect_response(stimulus: &StimulusPayload, input: &mut impl BufRead) -> Result<String> {
    match stimulus {
        StimulusPayload::Sequence { .. } => loop {
            print!("Type the digits, then press Enter: ");
            io::stdout().flush().ok();
            let line = read_line(input)?;
            let digits: String = line.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                println!("Please type the digits you remember.");
                continue;
            }
            return Ok(digits);
        },
        StimulusPayload::SingleDigit { .. } => {
            print!("Press Enter to respond: ");
            io::stdout().flush().ok();
            read_line(input)?;
            Ok("space".to_string())
        }
        StimulusPayload::WordColor { .. } => loop {
            print!("Ink color? [r/g/b/y]: ");
            io::stdout().flush().ok();
            let line = read_line(input)?;
            match line.trim().to_ascii_lowercase().chars().next() {
                Some(c @ ('r' | 'g' | 'b' | 'y')) => return Ok(c.to_string()),
                _ => println!("Press r, g, b or y."),
            }
        },
    }
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed before the session finished");
    }
    Ok(line.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn sequence_modality_keeps_digits_and_rejects_empty_lines() {
        let stim = StimulusPayload::Sequence { sequence: vec![3, 1, 7] };
        let mut input = Cursor::new(b"\n 3 1 7 \n".to_vec());
        let value = collect_response(&stim, &mut input).unwrap();
        assert_eq!(value, "317");
    }

    #[test]
    fn single_digit_modality_sends_space() {
        let stim = StimulusPayload::SingleDigit { digit: 3 };
        let mut input = Cursor::new(b"\n".to_vec());
        assert_eq!(collect_response(&stim, &mut input).unwrap(), "space");
    }

    #[test]
    fn word_color_modality_takes_the_letter_set_only() {
        let stim = StimulusPayload::WordColor {
            word: "RED".to_string(),
            ink_color: "green".to_string(),
        };
        let mut input = Cursor::new(b"x\nG\n".to_vec());
        assert_eq!(collect_response(&stim, &mut input).unwrap(), "g");
    }

    #[test]
    fn closed_input_is_an_error() {
        let stim = StimulusPayload::SingleDigit { digit: 5 };
        let mut input = Cursor::new(Vec::new());
        assert!(collect_response(&stim, &mut input).is_err());
    }
}
