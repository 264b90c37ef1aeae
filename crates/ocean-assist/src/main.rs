//! An interactive terminal chat with the ocean data assistant.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use ocean_assist::core::conversation::{ConversationMessage, Sender};
use ocean_assist::{SUGGESTED_QUERIES, Session, SessionBuilder};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

enum SessionEvent {
    Idle,
    Message(ConversationMessage),
}

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let session = SessionBuilder::default()
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(SessionEvent::Idle).ok();
            }
        })
        .on_message({
            let event_tx = event_tx.clone();
            move |msg| {
                event_tx.send(SessionEvent::Message(msg.clone())).ok();
            }
        })
        .build();

    println!("{}", "Ocean Data Assistant".bold());
    println!("Ask about ARGO floats, ocean data, and marine science.");
    println!("Type {} for commands and example questions.\n", "/help".bold());
    print_assistant(session.greeting());

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" | "/exit" => break,
            "/help" => {
                print_help();
                continue;
            }
            "/clear" => {
                session.clear();
                if pump_until_idle(&mut event_rx, &progress_style)
                    .await
                    .is_none()
                {
                    break;
                }
                print_assistant(session.greeting());
                continue;
            }
            _ => {}
        }
        if let Some(rest) = line.strip_prefix("/save") {
            if rest.is_empty() || rest.starts_with(' ') {
                save_transcript(&session, rest.trim()).await;
                continue;
            }
        }

        session.send_message(line);
        let Some(replies) =
            pump_until_idle(&mut event_rx, &progress_style).await
        else {
            break;
        };
        if replies == 0 {
            // The message was a control phrase; the conversation is
            // back to the greeting.
            print_assistant(session.greeting());
        }
    }

    session.close();
}

/// Waits for the session to become idle, printing assistant messages
/// as they arrive. Returns the number of replies printed, or `None`
/// when the event channel has closed.
async fn pump_until_idle(
    event_rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    progress_style: &ProgressStyle,
) -> Option<usize> {
    let mut replies = 0;
    let mut progress_bar = None;

    loop {
        // Create a new progress bar if it has been finished.
        progress_bar
            .get_or_insert_with(|| {
                let progress_bar = ProgressBar::new_spinner();
                progress_bar.set_style(progress_style.clone());
                progress_bar.set_message("🤔 Thinking...");
                progress_bar
            })
            .inc(1);

        let sleep = sleep(Duration::from_millis(100));
        let event = select! {
            event = event_rx.recv() => {
                event?
            },
            _ = sleep => {
                continue;
            }
        };

        // Finish the progress bar before printing anything else.
        if let Some(progress_bar) = &progress_bar {
            progress_bar.finish_and_clear();
        }
        progress_bar = None;

        match event {
            SessionEvent::Message(msg) => {
                if msg.sender == Sender::Assistant {
                    print_assistant(&msg.content);
                    replies += 1;
                }
            }
            SessionEvent::Idle => {
                return Some(replies);
            }
        }
    }
}

async fn save_transcript(session: &Session, path: &str) {
    let path = if path.is_empty() {
        "transcript.json"
    } else {
        path
    };
    let transcript = match session.transcript().await {
        Ok(transcript) => transcript,
        Err(err) => {
            eprintln!("failed to snapshot the transcript: {err}");
            return;
        }
    };
    let json = match serde_json::to_string_pretty(&transcript) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("failed to serialize the transcript: {err}");
            return;
        }
    };
    match std::fs::write(path, json) {
        Ok(()) => println!("Saved {} messages to {path}.", transcript.len()),
        Err(err) => eprintln!("failed to write {path}: {err}"),
    }
}

fn print_assistant(content: &str) {
    println!("{}🤖 {}", BAR_CHAR.bright_cyan(), content.bright_white());
}

fn print_help() {
    println!("Commands:");
    println!("  {}          clear the conversation", "/clear".bold());
    println!("  {}  save the transcript as JSON", "/save [path]".bold());
    println!("  {}           leave the chat", "/quit".bold());
    println!("\nTry asking:");
    for query in SUGGESTED_QUERIES {
        println!("  {}", query.bright_cyan());
    }
    println!();
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
