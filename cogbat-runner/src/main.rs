mod cli;
mod console;
mod remote;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cogbat_scheduler::tasks;
use cogbat_session::SessionClient;
use cogbat_store::ResultStore;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command, TaskKind};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Run { task, data } => {
            let path = data
                .unwrap_or_else(|| PathBuf::from(format!("{}-participants.json", task.slug())));
            let store = ResultStore::new(path);
            match task {
                TaskKind::Antisaccade => console::run_task(tasks::Antisaccade, task, &store),
                TaskKind::DigitSpan => console::run_task(tasks::DigitSpan, task, &store),
                TaskKind::Corsi => console::run_task(tasks::Corsi, task, &store),
                TaskKind::Balloon => console::run_task(tasks::BalloonRisk, task, &store),
            }
        }
        Command::Remote { task, server } => remote::run_remote(&server, &task),
        Command::HelpText { task, server } => {
            let client = SessionClient::new(&server, &task)?;
            println!("{}", client.help()?);
            Ok(())
        }
    }
}
