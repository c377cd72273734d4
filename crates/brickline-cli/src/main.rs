//! `brickline` CLI — register interest in tokenized real estate.
//!
//! Runs the same three-step intake wizard as the landing page, either
//! interactively or from flags, and submits it to a Brickline intake server.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod prompt;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use brickline_client::{
    ClientConfig, DEFAULT_BASE_URL, Field, FormController, HttpTransport, INVALID_EMAIL_MESSAGE,
    Step, StepStatus, SubmitOutcome,
};
use brickline_core::{ProjectScale, UserType};

use prompt::{Choice, Prompter};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const BANNER_SMALL: &str = "▦ Brickline";

// ── CLI structure ────────────────────────────────────────────────────

/// Brickline — tokenized real estate, early access.
#[derive(Parser)]
#[command(
    name = "brickline",
    version,
    about = "Brickline CLI — register for early access to tokenized real estate",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         BRICKLINE_URL    Intake server address (default: {DEFAULT_BASE_URL})\n\n\
         {DIM}Examples:{RESET}\n  \
         brickline register\n  \
         brickline register --user-type investor --project-scale 1m_10m \\\n    \
         --name \"Jane Doe\" --email jane@co.com\n  \
         brickline options"
    ),
)]
struct Cli {
    /// Intake server address.
    #[arg(long, env = "BRICKLINE_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log request details to stderr.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register interest. Prompts for anything not given as a flag.
    Register(RegisterArgs),
    /// List the available user types and project scales.
    Options,
}

#[derive(Args, Default)]
struct RegisterArgs {
    /// investor, developer, or partner.
    #[arg(long)]
    user_type: Option<UserType>,
    /// `under_1m`, `1m_10m`, `10m_50m`, or `50m_plus`.
    #[arg(long)]
    project_scale: Option<ProjectScale>,
    /// Full name.
    #[arg(long)]
    name: Option<String>,
    /// Work email.
    #[arg(long)]
    email: Option<String>,
    /// Company (optional).
    #[arg(long)]
    company: Option<String>,
    /// Anything else we should know (optional).
    #[arg(long)]
    message: Option<String>,
}

impl RegisterArgs {
    /// Whether every required answer was given on the command line.
    fn is_complete(&self) -> bool {
        self.user_type.is_some()
            && self.project_scale.is_some()
            && self.name.is_some()
            && self.email.is_some()
    }
}

// ── Output helpers ───────────────────────────────────────────────────

fn header(title: &str) {
    println!("{BOLD}{CYAN}{title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

fn print_step_indicator(form: &FormController) {
    let cells: Vec<String> = Step::ALL
        .into_iter()
        .enumerate()
        .map(|(i, step)| match form.step_status(i) {
            Some(StepStatus::Completed) => format!("{GREEN}✓ {}{RESET}", step.label()),
            Some(StepStatus::Current) => format!("{BOLD}{WHITE}● {}{RESET}", step.label()),
            _ => format!("{DIM}○ {}{RESET}", step.label()),
        })
        .collect();
    println!();
    println!("  {}", cells.join(&format!("{DIM}  ──  {RESET}")));
    println!();
    header(form.step().prompt());
}

fn print_user_types() {
    for (i, user_type) in UserType::ALL.into_iter().enumerate() {
        println!(
            "  {BOLD}{}.{RESET} {WHITE}{:<10}{RESET} {DIM}{}{RESET}",
            i + 1,
            user_type.label(),
            user_type.description()
        );
    }
}

fn print_project_scales() {
    for (i, scale) in ProjectScale::ALL.into_iter().enumerate() {
        println!(
            "  {BOLD}{}.{RESET} {WHITE}{:<14}{RESET} {DIM}{}{RESET}",
            i + 1,
            scale.label(),
            scale.tag()
        );
    }
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    if !verbose {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::new("brickline_client=debug,brickline=debug");
    if let Err(e) = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
    {
        eprintln!("  {DIM}logging disabled: {e}{RESET}");
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Options => {
            cmd_options();
            Ok(())
        }
        Commands::Register(args) => {
            let transport = HttpTransport::new(ClientConfig {
                base_url: cli.url,
                timeout: cli.timeout_secs.map(Duration::from_secs),
            })
            .context("invalid client configuration")?;
            cmd_register(&transport, args).await
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

fn cmd_options() {
    println!();
    header(Step::Role.label());
    print_user_types();
    println!();
    header(Step::Scale.label());
    print_project_scales();
    println!();
}

async fn cmd_register(transport: &HttpTransport, args: RegisterArgs) -> Result<()> {
    let interactive = !args.is_complete();
    let mut form = prefilled(args);
    let mut input = Prompter::stdin();

    if interactive {
        println!();
        println!("  {BOLD}{CYAN}{BANNER_SMALL}{RESET} {DIM}early access registration{RESET}");
    }

    // Set after going back so an already answered step is asked again.
    let mut revisit = false;

    loop {
        match form.step() {
            Step::Role => {
                if revisit || !form.can_advance() {
                    print_step_indicator(&form);
                    print_user_types();
                    if let Choice::Pick(user_type) = input.choose(&UserType::ALL, UserType::as_str)? {
                        form.select_user_type(user_type);
                    }
                    revisit = false;
                }
                form.advance();
            }
            Step::Scale => {
                if revisit || !form.can_advance() {
                    print_step_indicator(&form);
                    print_project_scales();
                    match input.choose(&ProjectScale::ALL, ProjectScale::as_str)? {
                        Choice::Pick(scale) => {
                            form.select_project_scale(scale);
                            revisit = false;
                            form.advance();
                        }
                        Choice::Back => {
                            revisit = true;
                            form.retreat();
                        }
                    }
                } else {
                    form.advance();
                }
            }
            Step::Contact => {
                if interactive {
                    print_step_indicator(&form);
                    ask_contact(&mut form, &mut input)?;
                }
                return submit(&mut form, transport, interactive.then_some(&mut input)).await;
            }
        }
    }
}

fn prefilled(args: RegisterArgs) -> FormController {
    let mut form = FormController::new();
    if let Some(user_type) = args.user_type {
        form.select_user_type(user_type);
    }
    if let Some(scale) = args.project_scale {
        form.select_project_scale(scale);
    }
    for (field, value) in [
        (Field::FullName, args.name),
        (Field::Email, args.email),
        (Field::Company, args.company),
        (Field::Message, args.message),
    ] {
        if let Some(value) = value {
            form.update_field(field, value);
        }
    }
    form
}

/// Prompt for every contact field that is still empty. Required fields are
/// asked until they hold something other than whitespace.
fn ask_contact<R: std::io::BufRead>(
    form: &mut FormController,
    input: &mut Prompter<R>,
) -> Result<()> {
    for field in Field::ALL {
        if !form.draft().get(field).trim().is_empty() {
            continue;
        }
        loop {
            let value = input.line(field.label())?;
            let blank = value.trim().is_empty();
            form.update_field(field, value);
            if !(field.is_required() && blank) {
                break;
            }
        }
    }
    Ok(())
}

async fn submit<R: std::io::BufRead>(
    form: &mut FormController,
    transport: &HttpTransport,
    mut input: Option<&mut Prompter<R>>,
) -> Result<()> {
    loop {
        match form.submit(transport).await {
            SubmitOutcome::Submitted => {
                println!();
                if let Some(confirmation) = form.success_message() {
                    success(&confirmation);
                }
                println!();
                return Ok(());
            }
            SubmitOutcome::InvalidEmail => {
                let Some(prompter) = input.as_deref_mut() else {
                    bail!(INVALID_EMAIL_MESSAGE);
                };
                warning(INVALID_EMAIL_MESSAGE);
                let email = prompter.line(Field::Email.label())?;
                form.update_field(Field::Email, email);
            }
            SubmitOutcome::Failed(message) => bail!(message),
            SubmitOutcome::Blocked => bail!("full name and email are required"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn complete_args_skip_prompts() {
        let args = RegisterArgs {
            user_type: Some(UserType::Investor),
            project_scale: Some(ProjectScale::OneToTenMillion),
            name: Some("Jane".to_owned()),
            email: Some("jane@co.com".to_owned()),
            ..RegisterArgs::default()
        };
        assert!(args.is_complete());
        assert!(!RegisterArgs::default().is_complete());
    }

    #[test]
    fn prefilled_form_reaches_contact_step() {
        let mut form = prefilled(RegisterArgs {
            user_type: Some(UserType::Partner),
            project_scale: Some(ProjectScale::FiftyMillionPlus),
            name: Some("Jane".to_owned()),
            email: Some("jane@co.com".to_owned()),
            company: Some("Acme".to_owned()),
            message: None,
        });
        assert!(form.advance());
        assert!(form.advance());
        assert!(form.can_submit());
        assert_eq!(form.draft().company, "Acme");
    }

    #[test]
    fn ask_contact_repeats_required_fields() {
        let mut form = prefilled(RegisterArgs {
            user_type: Some(UserType::Investor),
            project_scale: Some(ProjectScale::UnderOneMillion),
            ..RegisterArgs::default()
        });
        form.advance();
        form.advance();

        let mut input = Prompter::new("  \nJane\njane@co.com\n\nHi\n".as_bytes());
        ask_contact(&mut form, &mut input).unwrap();

        assert_eq!(form.draft().full_name, "Jane");
        assert_eq!(form.draft().email, "jane@co.com");
        assert_eq!(form.draft().company, "");
        assert_eq!(form.draft().message, "Hi");
        assert!(form.can_submit());
    }

    #[test]
    fn cli_parses_register_flags() {
        let cli = Cli::try_parse_from([
            "brickline",
            "--url",
            "http://localhost:3000",
            "register",
            "--user-type",
            "developer",
            "--project-scale",
            "10m_50m",
            "--name",
            "Jane",
            "--email",
            "jane@co.com",
        ])
        .unwrap();
        assert_eq!(cli.url, "http://localhost:3000");
        let Commands::Register(args) = cli.command else {
            unreachable!("register subcommand was given");
        };
        assert_eq!(args.user_type, Some(UserType::Developer));
        assert_eq!(args.project_scale, Some(ProjectScale::TenToFiftyMillion));
    }

    #[test]
    fn cli_rejects_unknown_user_type() {
        let cli = Cli::try_parse_from(["brickline", "register", "--user-type", "landlord"]);
        assert!(cli.is_err());
    }
}
