use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use portal_wizard::app::{AppState, Router, Screen};
use portal_wizard::config::AppConfig;
use portal_wizard::flows::{FlowKind, discovery, exhibit, request};
use portal_wizard::logging::{self, LogMode};
use portal_wizard::panel::StepPanel;
use portal_wizard::runtime::{ReplayScript, RunOutcome, Runtime, WizardSession, replay_flow};
use portal_wizard::terminal::Terminal;
use portal_wizard::wizard::Wizard;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portal-wizard", version, about = "Filing wizards for the hearings portal")]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the routing table.
    Routes,
    /// Open the screen mounted at PATH.
    Open { path: String },
    /// Drive a wizard headlessly from a YAML script and print JSON snapshots.
    Replay { flow: String, script: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let mode = match cli.command {
        Command::Open { .. } => LogMode::Interactive,
        Command::Routes | Command::Replay { .. } => LogMode::Stderr,
    };
    logging::init(&config.log, mode).context("initialising logging")?;

    let router = Router::standard();
    let mut app = AppState::new(config.seed.clone());

    match cli.command {
        Command::Routes => {
            for (path, screen) in router.iter() {
                println!("{path:<16} {screen}");
            }
        }
        Command::Open { path } => {
            let Some(screen) = router.resolve(&path) else {
                bail!("no screen is mounted at {path}");
            };
            tracing::info!(%path, ?screen, "opening screen");
            match FlowKind::from_screen(screen) {
                Some(kind) => open_wizard(kind, &config, &mut app, &router)?,
                None => print_summary(screen, &app),
            }
        }
        Command::Replay { flow, script } => {
            let Some(kind) = FlowKind::from_key(&flow) else {
                bail!("unknown flow `{flow}`; expected exhibit, discovery or request");
            };
            let script = ReplayScript::load(&script)?;
            for line in replay_flow(kind, &config, &mut app, &script)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn session<S: StepPanel>(kind: FlowKind, wizard: Wizard<S>) -> WizardSession<S> {
    WizardSession::new(kind, wizard)
}

fn open_wizard(
    kind: FlowKind,
    config: &AppConfig,
    app: &mut AppState,
    router: &Router,
) -> Result<()> {
    let outcome = match kind {
        FlowKind::Exhibit => {
            let definition = exhibit::definition(&config.uploads)?;
            run_interactive(session(kind, Wizard::new(definition)), config, app)?
        }
        FlowKind::Discovery => {
            run_interactive(session(kind, Wizard::new(discovery::definition()?)), config, app)?
        }
        FlowKind::Request => {
            run_interactive(session(kind, Wizard::new(request::definition()?)), config, app)?
        }
    };

    for receipt in app.receipts() {
        println!("{} submitted: {}", receipt.flow, receipt.reference);
    }
    if let RunOutcome::Redirected(flow) = outcome {
        let path = router.redirect_target(flow).unwrap_or("/");
        println!("This filing needs a motion first. Continue at {path}");
    }
    Ok(())
}

fn run_interactive<S: StepPanel>(
    session: WizardSession<S>,
    config: &AppConfig,
    app: &mut AppState,
) -> Result<RunOutcome> {
    let terminal = Terminal::new().context("opening terminal")?;
    let mut runtime = Runtime::new(session, app, &config.submission, terminal);
    Ok(runtime.run()?)
}

fn print_summary(screen: Screen, app: &AppState) {
    println!("{screen}");
    match screen {
        Screen::Dashboard => {
            println!("  open tasks:    {}", app.open_tasks().count());
            println!("  unread alerts: {}", app.unread_alerts().count());
        }
        Screen::Tasks => {
            for task in app.open_tasks() {
                let due = task.due.map(|date| date.to_string()).unwrap_or_default();
                println!("  {:<8} {:<40} {due}", task.id, task.title);
            }
        }
        Screen::Alerts => {
            for alert in app.unread_alerts() {
                println!("  {:<8} {:?} {}", alert.id, alert.severity, alert.message);
            }
        }
        Screen::FileMotion => println!("  Motions are filed with the clerk's motion form."),
        Screen::ExhibitWizard | Screen::DiscoveryWizard | Screen::RequestWizard => {}
    }
}
