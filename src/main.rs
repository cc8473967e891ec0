//! WOOP Coach
//!
//! Terminal front end for the coaching session. Reads one line at a time
//! from stdin; plain text is sent to the coach, slash commands navigate.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use woop_coach::{
    adapters::{AIGenerationGateway, GeminiProvider, GenerationSettings, MockAIProvider},
    application::{
        AdvanceStageHandler, CompileReportHandler, GatewayPolicy, RetreatStageHandler,
        SessionHandle, SubmitUserTextCommand, SubmitUserTextHandler,
    },
    config::{AiProviderKind, AppConfig},
    domain::{
        coaching::{AdvanceOutcome, RetreatOutcome, SessionSnapshot},
        foundation::Timestamp,
        report::{Report, ReportBlock},
        woop::OVERVIEW,
    },
    ports::{AIProvider, GenerationGateway},
};

const HELP: &str = "Commands: /next  /back  /restart  /day [N]  /help  /quit";

/// One parsed line of input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Text(String),
    Next,
    Back,
    Restart,
    /// `None` toggles today's slot.
    Day(Option<usize>),
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return Input::Text(line.to_string());
        };
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("next"), None, _) => Input::Next,
            (Some("back"), None, _) => Input::Back,
            (Some("restart"), None, _) => Input::Restart,
            (Some("help"), None, _) => Input::Help,
            (Some("quit" | "exit"), None, _) => Input::Quit,
            (Some("day"), None, _) => Input::Day(None),
            (Some("day"), Some(n), None) => n
                .parse()
                .map(|day| Input::Day(Some(day)))
                .unwrap_or_else(|_| Input::Unknown(line.to_string())),
            _ => Input::Unknown(line.to_string()),
        }
    }
}

struct Console {
    session: SessionHandle,
    submit: SubmitUserTextHandler,
    advance: AdvanceStageHandler,
    retreat: RetreatStageHandler,
    compile: CompileReportHandler,
    report: Option<Report>,
}

impl Console {
    async fn dispatch(&mut self, input: Input) -> bool {
        match input {
            Input::Text(text) => {
                match self
                    .submit
                    .handle(&self.session, SubmitUserTextCommand::new(text))
                    .await
                {
                    Ok(result) => println!("\ncoach: {}\n", result.outcome.reply),
                    Err(err) => println!("! {err}"),
                }
            }
            Input::Next => match self.advance.handle(&self.session).await {
                Ok(AdvanceOutcome::Moved { .. }) => print_stage(&self.session.snapshot().await),
                Ok(AdvanceOutcome::Completed(answers)) => {
                    println!("\nCompiling your report...\n");
                    let compilation = self.compile.compile(answers).await;
                    if let Some(err) = compilation.error() {
                        println!("! The report could not be generated: {err}");
                    }
                    let report = compilation.into_report();
                    print_report(&report);
                    self.report = Some(report);
                }
                Err(err) => println!("! {err}"),
            },
            Input::Back => match self.retreat.handle(&self.session).await {
                Ok(RetreatOutcome::Moved { .. }) => print_stage(&self.session.snapshot().await),
                Ok(RetreatOutcome::AlreadyAtFirstStage) => println!("! Already at the first stage"),
                Err(err) => println!("! {err}"),
            },
            Input::Restart => {
                self.session.restart().await;
                self.report = None;
                print_stage(&self.session.snapshot().await);
            }
            Input::Day(day) => self.toggle_day(day),
            Input::Help => println!("{HELP}"),
            Input::Quit => return false,
            Input::Unknown(line) => println!("! Unknown command `{line}`. {HELP}"),
        }
        true
    }

    fn toggle_day(&mut self, day: Option<usize>) {
        let Some(report) = self.report.as_mut() else {
            println!("! The execution log opens once the report is compiled");
            return;
        };
        let Some(day) = day.or_else(|| report.execution_log().day_for(&Timestamp::now())) else {
            println!("! Today is outside the 28-day window, pass a day number");
            return;
        };
        match report.execution_log_mut().toggle(day) {
            Ok(done) => {
                let log = report.execution_log();
                println!(
                    "Day {day}: {}  ({}% adherence over {} recorded days)",
                    if done { "done" } else { "missed" },
                    log.adherence_percent(),
                    log.recorded_days()
                );
            }
            Err(err) => println!("! {err}"),
        }
    }
}

fn print_stage(snapshot: &SessionSnapshot) {
    println!(
        "\n== {} ({}%) ==",
        snapshot.stage_title, snapshot.progress_percent
    );
    for turn in &snapshot.transcript {
        println!("{}: {}", turn.speaker, turn.text);
    }
    println!();
}

fn print_report(report: &Report) {
    for card in report.summary_cards() {
        println!("[{}] {}", card.label, card.value);
    }
    println!();
    for block in report.blocks() {
        match block {
            ReportBlock::Title(text) => {
                println!("{}\n{}", text.to_uppercase(), "=".repeat(text.len()))
            }
            ReportBlock::Section(text) => println!("{text}\n{}", "-".repeat(text.len())),
            ReportBlock::Subsection(text) => println!("> {text}"),
            ReportBlock::TableRow(text) | ReportBlock::Paragraph(text) => println!("{text}"),
            ReportBlock::Blank => println!(),
        }
    }
    println!("\nTrack the next 28 days with /day (today) or /day N.");
}

fn build_provider(config: &AppConfig) -> Result<Arc<dyn AIProvider>, Box<dyn std::error::Error>> {
    let provider: Arc<dyn AIProvider> = match config.ai.provider {
        AiProviderKind::Gemini => Arc::new(GeminiProvider::new(config.ai.gemini_config()?)?),
        AiProviderKind::Mock => Arc::new(MockAIProvider::new()),
    };
    Ok(provider)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "woop_coach=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    config.validate()?;

    let provider = build_provider(&config)?;
    tracing::info!(
        provider = %provider.provider_info().name,
        model = %provider.provider_info().model,
        "Generation provider ready"
    );

    let settings = GenerationSettings {
        language: config.coaching.reply_language.clone(),
        max_output_tokens: config.ai.max_output_tokens,
        temperature: config.ai.temperature,
    };
    let gateway: Arc<dyn GenerationGateway> =
        Arc::new(AIGenerationGateway::with_settings(provider, settings));
    let policy = GatewayPolicy::from(&config.coaching);

    let mut console = Console {
        session: SessionHandle::start(),
        submit: SubmitUserTextHandler::new(Arc::clone(&gateway), policy.clone()),
        advance: AdvanceStageHandler::new(),
        retreat: RetreatStageHandler::new(),
        compile: CompileReportHandler::new(gateway, policy),
        report: None,
    };

    println!("{}\n{}\n\n{}\n\n{HELP}", OVERVIEW.title, OVERVIEW.subtitle, OVERVIEW.description);
    print_stage(&console.session.snapshot().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if !console.dispatch(Input::parse(&line)).await {
            break;
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}
