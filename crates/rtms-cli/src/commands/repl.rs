//! Interactive session.
//!
//! rustyline blocks, so it runs on its own thread and hands lines to the
//! async loop over a channel. The loop answers every line with the next
//! prompt, which keeps output and prompt in order.

use anyhow::Result;
use colored::Colorize;
use rtms_application::{App, NavigationOutcome};
use rtms_core::realtime::RealtimeEvent;
use rtms_interaction::RealtimeStream;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::sync::mpsc as std_mpsc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::commands::pages;
use crate::console;
use crate::helper::CliHelper;
use crate::parser::{HELP, ReplCommand, parse_line};

enum ReplInput {
    Line(String),
    Interrupted,
    Eof,
}

/// Real-time stream opened for one session token.
struct StreamHandle {
    token: String,
    task: JoinHandle<()>,
}

pub async fn run(mut app: App, realtime: bool) -> Result<()> {
    app.start().await?;
    let _verification = app.spawn_verification();

    let page_ids = app
        .router()
        .pages()
        .pages()
        .map(|page| page.id.to_string())
        .collect();
    let (line_tx, mut line_rx) = mpsc::channel::<ReplInput>(1);
    let (prompt_tx, prompt_rx) = std_mpsc::channel::<String>();
    let reader = std::thread::spawn(move || read_lines(CliHelper::new(page_ids), prompt_rx, line_tx));

    let (event_tx, mut event_rx) = mpsc::channel::<RealtimeEvent>(32);
    let mut stream: Option<StreamHandle> = None;

    println!("{}", "=== RTMS ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    println!("Signed in as {}", console::badge(&app).await);
    println!();
    console::print_current(&app);

    let _ = prompt_tx.send(console::prompt(&app).await);

    loop {
        if realtime {
            sync_stream(&app, &mut stream, &event_tx).await;
        }

        tokio::select! {
            input = line_rx.recv() => {
                match input {
                    None | Some(ReplInput::Eof) => {
                        println!("{}", "CTRL-D detected. Exiting...".bright_green());
                        break;
                    }
                    Some(ReplInput::Interrupted) => {
                        println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                    }
                    Some(ReplInput::Line(line)) => match parse_line(&line) {
                        Ok(ReplCommand::Quit) => {
                            println!("{}", "Goodbye!".bright_green());
                            break;
                        }
                        Ok(command) => execute(&mut app, command).await,
                        Err(usage) => println!("{}", usage.yellow()),
                    },
                }
                if prompt_tx.send(console::prompt(&app).await).is_err() {
                    break;
                }
            }
            Some(event) = event_rx.recv() => {
                app.handle_realtime(event).await;
            }
        }
    }

    drop(prompt_tx);
    if let Some(stream) = stream {
        stream.task.abort();
    }
    if let Ok(Err(err)) = reader.join() {
        tracing::warn!("Line editor failed: {}", err);
    }
    Ok(())
}

async fn execute(app: &mut App, command: ReplCommand) {
    match command {
        ReplCommand::Intent(intent) => {
            let before = app.router().current_page().id.clone();
            let outcome = app.dispatch(intent).await;
            let moved = app.router().current_page().id != before;
            if moved || outcome == Some(NavigationOutcome::Refreshed) {
                console::print_current(app);
            }
        }
        ReplCommand::Show => console::print_current(app),
        ReplCommand::WhoAmI => {
            println!("{}", console::badge(app).await);
            println!(
                "{}",
                format!(
                    "theme: {}  social login role: {}  unread: {}",
                    app.theme(),
                    app.login_role(),
                    app.unread_notifications()
                )
                .bright_black()
            );
        }
        ReplCommand::Pages => pages::list(app.router().pages()),
        ReplCommand::History => {
            let history = app.router().history();
            for (i, id) in history.entries().iter().enumerate() {
                let marker = if i == history.cursor() { "→" } else { " " };
                println!("{} {}", marker, id);
            }
        }
        ReplCommand::Notices => {
            let notices = app.notices();
            if notices.is_empty() {
                println!("{}", "No notices".bright_black());
            }
            for notice in &notices {
                println!("{}", console::notice_line(notice));
            }
        }
        ReplCommand::Help => println!("{}", HELP),
        ReplCommand::Quit => {}
    }
}

/// Keeps one stream open per session token.
///
/// A stream that drops is not reopened; a new login opens a fresh one.
async fn sync_stream(
    app: &App,
    stream: &mut Option<StreamHandle>,
    events: &mpsc::Sender<RealtimeEvent>,
) {
    let token = app.session().token().await;
    if stream.as_ref().map(|s| &s.token) == token.as_ref() {
        return;
    }
    if let Some(old) = stream.take() {
        old.task.abort();
    }
    let Some(token) = token else {
        return;
    };

    let client = app.api().client().clone();
    let events = events.clone();
    let stream_token = token.clone();
    let task = tokio::spawn(async move {
        let mut stream = match RealtimeStream::connect(&client, &stream_token).await {
            Ok(stream) => stream,
            Err(err) => {
                tracing::warn!("Real-time stream unavailable: {}", err);
                return;
            }
        };
        while let Some(item) = stream.next_event().await {
            match item {
                Ok(event) => {
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
                Err(err) => tracing::warn!("Skipping undecodable real-time event: {}", err),
            }
        }
    });
    *stream = Some(StreamHandle { token, task });
}

fn read_lines(
    helper: CliHelper,
    prompts: std_mpsc::Receiver<String>,
    lines: mpsc::Sender<ReplInput>,
) -> rustyline::Result<()> {
    let mut rl = Editor::<CliHelper, DefaultHistory>::new()?;
    rl.set_helper(Some(helper));

    while let Ok(prompt) = prompts.recv() {
        let input = loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);
                    break ReplInput::Line(trimmed.to_string());
                }
                Err(ReadlineError::Interrupted) => break ReplInput::Interrupted,
                Err(ReadlineError::Eof) => break ReplInput::Eof,
                Err(err) => return Err(err),
            }
        };
        let done = matches!(input, ReplInput::Eof);
        if lines.blocking_send(input).is_err() || done {
            break;
        }
    }
    Ok(())
}
