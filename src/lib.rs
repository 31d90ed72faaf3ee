use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use reqwest::Client;
use tracing::{debug, info};

use crate::cli::{Cli, Cookie};
use crate::output::{Findings, OutFile, dump_if_piped};
use crate::suggest::securitytrails::SecurityTrails;
use crate::suggest::{SuggestError, candidates};

pub mod cli;
pub mod output;
pub mod prelude;
pub mod suggest;

/// Everything a run needs, lifted out of the raw CLI surface.
pub struct RunOptions {
    pub keyword: String,
    pub depth: u8,
    pub cookie: Cookie,
    pub user_agent: String,
    pub workers: usize,
    pub output: Option<PathBuf>,
}

impl TryFrom<Cli> for RunOptions {
    type Error = anyhow::Error;

    fn try_from(args: Cli) -> Result<Self, Self::Error> {
        Ok(Self {
            keyword: args.keyword.context("missing keyword")?,
            depth: args.num,
            cookie: args.cookie.context("missing cookie")?,
            user_agent: args.useragent.context("missing user-agent")?,
            workers: usize::from(args.workers),
            output: args.output,
        })
    }
}

/// How a run ended. Transport and IO faults travel the error path out of
/// [`run`] instead; these are the endings the tool reports itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Complete,
    SessionExpired,
    Cancelled,
}

impl Outcome {
    /// Exit code for scripting consumers.
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Complete => ExitCode::SUCCESS,
            Outcome::SessionExpired => ExitCode::from(2),
            // conventional "killed by SIGINT"
            Outcome::Cancelled => ExitCode::from(130),
        }
    }
}

#[tracing::instrument(skip_all, fields(keyword = %opts.keyword, depth = opts.depth))]
pub async fn run(opts: RunOptions) -> anyhow::Result<Outcome> {
    let client = Client::builder()
        .default_headers(SecurityTrails::session_headers(
            &opts.cookie,
            &opts.user_agent,
        )?)
        .gzip(true)
        .build()?;

    let endpoint = SecurityTrails::new(&opts.keyword);
    let suffixes = candidates::suffixes(opts.depth);
    let total = suffixes.len() as u64;
    info!(total, workers = opts.workers, "starting enumeration");

    let mut findings = Findings::new();
    let mut outfile = opts
        .output
        .as_deref()
        .map(|path| {
            OutFile::append(path).with_context(|| format!("cannot open {}", path.display()))
        })
        .transpose()?;

    eprintln!("{}", cli::BANNER.green());
    eprintln!("{}", "Starting enumeration...\n".magenta().bold());
    let bar = ProgressBar::new(total).with_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.magenta/blue}] {pos}/{len} ({eta}) {msg}",
            )?
            .progress_chars("##-"),
    );
    bar.set_message("brute-forcing...");

    let mut results = futures::stream::iter(suffixes)
        .map(|suffix| {
            let client = client.clone();
            let endpoint = &endpoint;
            async move { endpoint.suggestions(&client, &suffix).await }
        })
        .buffered(opts.workers);

    // only the coordinator observes the interrupt; dropping the stream is
    // what stops anything still in flight
    let mut ctrl_c = std::pin::pin!(tokio::signal::ctrl_c());
    let outcome = loop {
        tokio::select! {
            _ = &mut ctrl_c => break Outcome::Cancelled,
            next = results.next() => {
                let Some(result) = next else { break Outcome::Complete };
                match result {
                    Ok(batch) => {
                        for domain in findings.merge(batch) {
                            bar.println(domain.green().to_string());
                            if let Some(file) = outfile.as_mut() {
                                file.record(domain).context("writing output file")?;
                            }
                        }
                        bar.inc(1);
                    }
                    Err(SuggestError::SessionInvalid { query }) => {
                        debug!(%query, "reply shape mismatch, stopping");
                        break Outcome::SessionExpired;
                    }
                    Err(err @ SuggestError::Transport { .. }) => {
                        bar.finish_and_clear();
                        return Err(err.into());
                    }
                }
            }
        }
    };
    drop(results);
    bar.finish_and_clear();

    match outcome {
        Outcome::Complete => info!(found = findings.len(), "enumeration finished"),
        Outcome::SessionExpired => {
            eprintln!(
                "{}",
                "Unrecognized reply! Try again with a fresh cookie.".red().bold()
            );
        }
        Outcome::Cancelled => {
            eprintln!("{}", "\nCtrl-C detected. Exiting...".magenta().bold());
        }
    }

    dump_if_piped(&findings).context("writing results to stdout")?;

    Ok(outcome)
}
