use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// gemweb: chat with Gemini from the terminal using browser session cookies.
#[derive(Parser, Debug)]
#[command(name = "gemweb", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (debug, info, gemweb_client=trace, ...).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a single prompt and print the reply.
    Ask {
        prompt: String,

        /// File to attach. Repeat for several.
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        #[command(flatten)]
        resume: ResumeArgs,

        /// Download the reply's images into this directory.
        #[arg(long)]
        save_images: Option<PathBuf>,
    },
    /// Interactive conversation on stdin.
    Chat {
        #[command(flatten)]
        resume: ResumeArgs,
    },
    /// Rotate the short-lived session cookie once and store it.
    Rotate,
    /// Upload files and print their server references.
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Continuation triple of an earlier conversation.
#[derive(ClapArgs, Debug, Default)]
pub struct ResumeArgs {
    #[arg(long)]
    pub cid: Option<String>,
    #[arg(long, requires = "cid")]
    pub rid: Option<String>,
    #[arg(long, requires = "cid")]
    pub rcid: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
