use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Cognitive task battery: console demos and a remote session runner")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a standalone task in the console
    Run {
        #[arg(value_enum)]
        task: TaskKind,

        /// Result log path (defaults to <task>-participants.json)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Drive a session against a remote experiment service
    Remote {
        /// Experiment type the service knows, e.g. digit_span, sart, stroop
        task: String,

        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
    },

    /// Fetch and print the remote service's help text
    HelpText {
        task: String,

        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Antisaccade,
    DigitSpan,
    Corsi,
    Balloon,
}

impl TaskKind {
    pub fn slug(&self) -> &'static str {
        match self {
            TaskKind::Antisaccade => "antisaccade",
            TaskKind::DigitSpan => "digit-span",
            TaskKind::Corsi => "corsi",
            TaskKind::Balloon => "balloon",
        }
    }
}
