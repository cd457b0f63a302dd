use anyhow::{Context, Result};
use clap::Parser;
use interview_client::{Client, EnvToken};
use interview_coach::config::{API_TOKEN_VAR, Config};
use interview_coach::render;
use interview_core::{InterviewService, InterviewSession, OfflineService, Phase, SessionError};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::fmt::time::ChronoLocal;

#[derive(Parser)]
#[command(version, about = "Practise a job interview from the terminal")]
struct Cli {
    /// The role to interview for, e.g. "Backend Engineer"
    #[arg(long)]
    role: Option<String>,
    /// Your experience level, e.g. "3 years"
    #[arg(long)]
    experience: Option<String>,
    /// Run against a simulated service instead of the real API
    #[arg(long)]
    offline: bool,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config = Config::from_env(args.offline).context("Failed to load application configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    tracing::info!("Configuration loaded successfully. Starting interview coach...");

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    if args.offline {
        tracing::info!("Running offline against a simulated interview service.");
        let mut session = InterviewSession::new(OfflineService::new());
        run(&mut session, &args, &mut input).await
    } else {
        let client_config = interview_client::Config::builder()
            .with_base_url(&config.api_url)
            .with_timeout(config.timeout)
            .build();
        let client = Client::new(client_config, Arc::new(EnvToken::new(API_TOKEN_VAR)))
            .context("Failed to create interview service client")?;
        tracing::info!("Using interview service at {}", client.config().base_url());

        let mut session = InterviewSession::new(client);
        let result = run(&mut session, &args, &mut input).await;
        match session.service().stats() {
            Ok(stats) => tracing::info!(
                "Requests sent: {}, failed: {}, last status: {:?}",
                stats.requests_sent(),
                stats.requests_failed(),
                stats.last_status()
            ),
            Err(e) => tracing::warn!("Could not read request stats: {:#}", e),
        }
        result
    }
}

async fn run<S: InterviewService>(
    session: &mut InterviewSession<S>,
    args: &Cli,
    input: &mut Input,
) -> Result<()> {
    match session.profile().await {
        Ok(profile) => println!("{}", render::greeting(&profile)),
        Err(e) => {
            tracing::warn!("Failed to fetch user profile: {}", e);
            println!("Could not load your profile: {e}");
        }
    }

    tokio::select! {
        started = start(session, args, input) => {
            if !started? {
                return Ok(());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted before the interview started.");
            return Ok(());
        }
    }

    println!("\nType your answer and press Enter. Commands: /end, /quit");
    loop {
        let line = tokio::select! {
            line = input.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, leaving without ending the interview.");
                break;
            }
        };
        let Some(line) = line else {
            tracing::info!("Input closed, leaving without ending the interview.");
            break;
        };

        match line.trim() {
            "/quit" => break,
            "/end" => match session.end().await {
                Ok(summary) => {
                    println!("\n{}", render::summary(&summary));
                    break;
                }
                Err(e) => report(&e),
            },
            _ => handle_line(session, &line).await,
        }
    }
    Ok(())
}

/// Ask for role and experience where the command line did not give them,
/// then start the interview. Returns `false` if input ran out first.
async fn start<S: InterviewService>(
    session: &mut InterviewSession<S>,
    args: &Cli,
    input: &mut Input,
) -> Result<bool> {
    let mut role = args.role.clone();
    let mut experience = args.experience.clone();
    loop {
        if role.as_deref().is_none_or(|r| r.trim().is_empty()) {
            println!("Role:");
            role = input.next_line().await?;
        }
        if experience.as_deref().is_none_or(|e| e.trim().is_empty()) {
            println!("Experience:");
            experience = input.next_line().await?;
        }
        let (Some(r), Some(e)) = (role.as_deref(), experience.as_deref()) else {
            return Ok(false);
        };

        match session.start(r, e).await {
            Ok((_, question)) => {
                println!("\nQuestion:\n{question}");
                return Ok(true);
            }
            Err(err) => {
                report(&err);
                if let SessionError::Validation(_) = err {
                    role = None;
                    experience = None;
                } else {
                    println!("Press Enter to try again.");
                    if input.next_line().await?.is_none() {
                        return Ok(false);
                    }
                }
            }
        }
    }
}

async fn handle_line<S: InterviewService>(session: &mut InterviewSession<S>, line: &str) {
    match session.view().phase {
        Phase::AwaitingNext if line.trim().is_empty() => match session.advance() {
            Ok(question) => println!("\nQuestion:\n{question}"),
            Err(e) => report(&e),
        },
        Phase::AwaitingNext => {
            println!("Press Enter for the next question, or /end to finish.");
        }
        _ => match session.submit_answer(line).await {
            Ok((feedback, _)) => {
                let evaluation = session.history().last().and_then(|turn| turn.evaluation());
                println!("\n{}", render::feedback(&feedback, evaluation));
                println!("Press Enter for the next question, or /end to finish.");
            }
            Err(e) => report(&e),
        },
    }
}

fn report(err: &SessionError) {
    tracing::debug!("session error: {:?}", err);
    println!("Error: {err}");
}
