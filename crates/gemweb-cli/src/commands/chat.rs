//! Interactive chat loop.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use gemweb_client::{spawn_rotation, ChatSession, SessionState};
use gemweb_common::GemwebError;
use gemweb_config::GemwebConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use super::{client_err, persist_rotations, print_output, print_state, SharedClient};

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Prompt(String),
    Attach(PathBuf),
    State,
    Choose(usize),
    Quit,
    Help,
    Empty,
    Unknown(String),
}

fn parse_line(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Input::Prompt(line.to_string());
    };

    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(n, a)| (n, a.trim()));
    match name {
        "quit" | "exit" => Input::Quit,
        "state" => Input::State,
        "help" => Input::Help,
        "attach" if !arg.is_empty() => Input::Attach(PathBuf::from(arg)),
        "choose" => match arg.parse() {
            Ok(index) => Input::Choose(index),
            Err(_) => Input::Unknown(line.to_string()),
        },
        _ => Input::Unknown(line.to_string()),
    }
}

const HELP: &str = "\
/attach PATH   attach a file to the next prompt
/state         print the continuation triple
/choose N      continue from candidate N of the last reply
/quit          leave";

pub async fn run_chat(
    client: SharedClient,
    config: &GemwebConfig,
    state: SessionState,
    persist: Option<PathBuf>,
) -> Result<(), GemwebError> {
    client.initialize().await.map_err(client_err)?;

    let rotation = config.rotation.enabled.then(|| {
        let interval = Duration::from_secs(config.rotation.interval_secs.into());
        info!(interval_secs = interval.as_secs(), "cookie rotation enabled");
        spawn_rotation(client.clone(), interval, persist_rotations(persist))
    });

    let session = client.resume_chat(state);
    let result = repl(&client, &session).await;

    if let Some(handle) = rotation {
        handle.abort();
    }
    result
}

async fn repl(client: &SharedClient, session: &ChatSession) -> Result<(), GemwebError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Vec<PathBuf> = Vec::new();
    println!("type /help for commands");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::Help => println!("{HELP}"),
            Input::State => print_state(&session.state())?,
            Input::Attach(path) => {
                if path.is_file() {
                    println!("attached {}", path.display());
                    pending.push(path);
                } else {
                    println!("no such file: {}", path.display());
                }
            }
            Input::Choose(index) => match session.choose_candidate(index) {
                Ok(output) => print_output(&output),
                Err(e) => println!("{e}"),
            },
            Input::Prompt(prompt) => {
                match session.send_turn(client.as_ref(), &prompt, &pending).await {
                    Ok(output) => {
                        pending.clear();
                        print_output(&output);
                    }
                    // attachments stay queued so the turn can be retried
                    Err(e) => {
                        warn!(error = %e, "turn failed");
                        println!("error: {e}");
                    }
                }
            }
            Input::Unknown(text) => println!("unknown command {text:?}, try /help"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_prompt() {
        assert_eq!(parse_line("  hello there \n"), Input::Prompt("hello there".into()));
        assert_eq!(parse_line("   "), Input::Empty);
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_line("/quit"), Input::Quit);
        assert_eq!(parse_line("/exit"), Input::Quit);
        assert_eq!(parse_line("/state"), Input::State);
        assert_eq!(parse_line("/choose 2"), Input::Choose(2));
        assert_eq!(
            parse_line("/attach  my file.png"),
            Input::Attach(PathBuf::from("my file.png"))
        );
    }

    #[test]
    fn malformed_commands_are_unknown() {
        assert!(matches!(parse_line("/choose two"), Input::Unknown(_)));
        assert!(matches!(parse_line("/attach"), Input::Unknown(_)));
        assert!(matches!(parse_line("/frobnicate"), Input::Unknown(_)));
    }
}
