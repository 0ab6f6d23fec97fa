//! Subcommand handlers.

mod chat;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gemweb_client::{GeminiError, GeminiWebClient, ModelOutput, SessionState};
use gemweb_common::GemwebError;
use tracing::{info, warn};

pub use chat::run_chat;

pub(crate) fn client_err(e: GeminiError) -> GemwebError {
    GemwebError::Client(e.to_string())
}

/// One prompt, one reply, then exit.
pub async fn ask(
    client: &GeminiWebClient,
    prompt: &str,
    files: &[PathBuf],
    state: SessionState,
    save_images: Option<&Path>,
) -> Result<(), GemwebError> {
    client.initialize().await.map_err(client_err)?;
    let session = client.resume_chat(state);
    let output = session
        .send_turn(client, prompt, files)
        .await
        .map_err(client_err)?;

    print_output(&output);
    print_state(&session.state())?;

    if let Some(dir) = save_images {
        save_output_images(client, &output, dir).await?;
    }
    Ok(())
}

/// Rotate once and write the renewed cookie back to the config file.
pub async fn rotate(
    client: &GeminiWebClient,
    persist: Option<&Path>,
) -> Result<(), GemwebError> {
    let credentials = client.rotate().await.map_err(client_err)?;
    match persist {
        Some(path) => {
            gemweb_config::store_rotated_cookie(path, &credentials.rotating_id)?;
            println!("cookie rotated, stored in {}", path.display());
        }
        None => println!("cookie rotated"),
    }
    Ok(())
}

pub async fn upload(client: &GeminiWebClient, files: &[PathBuf]) -> Result<(), GemwebError> {
    for path in files {
        let file_ref = client.upload_file(path).await.map_err(client_err)?;
        println!("{}\t{file_ref}", path.display());
    }
    Ok(())
}

/// Callback for the rotation task: keep the config file's cookie current.
pub fn persist_rotations(
    persist: Option<PathBuf>,
) -> impl Fn(&gemweb_client::Credentials) + Send + Sync + 'static {
    move |credentials| {
        let Some(path) = &persist else { return };
        match gemweb_config::store_rotated_cookie(path, &credentials.rotating_id) {
            Ok(()) => info!(path = %path.display(), "stored rotated cookie"),
            Err(e) => warn!(error = %e, "failed to store rotated cookie"),
        }
    }
}

pub(crate) fn print_output(output: &ModelOutput) {
    let Some(candidate) = output.chosen_candidate() else {
        return;
    };
    if let Some(reasoning) = &candidate.reasoning {
        println!("[thinking]\n{reasoning}\n[/thinking]\n");
    }
    println!("{}", candidate.text);

    for image in candidate.images() {
        println!("  {} {}", image.title, image.url);
    }
    if output.candidates.len() > 1 {
        println!(
            "({} candidates, showing #{})",
            output.candidates.len(),
            output.chosen
        );
    }
}

/// The continuation triple goes to stderr as JSON so stdout stays the reply.
pub(crate) fn print_state(state: &SessionState) -> Result<(), GemwebError> {
    let json = serde_json::to_string(state).map_err(|e| GemwebError::Other(e.to_string()))?;
    eprintln!("session: {json}");
    Ok(())
}

async fn save_output_images(
    client: &GeminiWebClient,
    output: &ModelOutput,
    dir: &Path,
) -> Result<(), GemwebError> {
    let Some(candidate) = output.chosen_candidate() else {
        return Ok(());
    };
    let http = client.http();

    for (i, image) in candidate.web_images.iter().enumerate() {
        let dest = dir.join(image_file_name("web", i, &image.url));
        image.save(http, &dest).await.map_err(client_err)?;
        println!("saved {}", dest.display());
    }
    for (i, image) in candidate.generated_images.iter().enumerate() {
        let dest = dir.join(format!("generated-{i}.png"));
        image.save(http, &dest, true).await.map_err(client_err)?;
        println!("saved {}", dest.display());
    }
    Ok(())
}

/// `<prefix>-<index>.<ext>`, with the extension taken from the URL path
/// when it looks like one.
fn image_file_name(prefix: &str, index: usize, url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let ext = path
        .rsplit_once('/')
        .map_or(path, |(_, last)| last)
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| matches!(ext.as_str(), "jpg" | "jpeg" | "png" | "gif" | "webp"))
        .unwrap_or_else(|| "jpg".to_string());
    format!("{prefix}-{index}.{ext}")
}

/// Shared handle for the chat loop and the rotation task.
pub(crate) type SharedClient = Arc<GeminiWebClient>;
