//! folio - Entry Point
//!
//! CLI shell over the submission controller: sends a contact message or a
//! resume request through the configured email relay, standing in for the
//! browser form UI.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use folio::controller::SubmissionController;
use folio::delivery::{DeliverySink, DiskSink, NullSink};
use folio::model::form::fields;
use folio::model::{AppError, FormSpec, RoleOption};
use folio::transport::{EmailJsApi, RelayTarget, SendApi, StubSendApi};

/// folio - send portfolio submissions from the terminal
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Send a contact message or resume request through the email relay")]
pub struct Args {
    /// What to submit
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run the full submission flow against an in-memory relay stub
    #[arg(long)]
    pub dry_run: bool,

    /// Relay service identifier (overrides config/env)
    #[arg(long)]
    pub service_id: Option<String>,

    /// Relay template identifier (overrides config/env)
    #[arg(long)]
    pub template_id: Option<String>,

    /// Relay public key (overrides config/env)
    #[arg(long)]
    pub public_key: Option<String>,
}

/// Submission variants, matching the two site forms.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a contact message
    Contact {
        /// Sender name
        #[arg(long)]
        name: String,
        /// Sender email address
        #[arg(long)]
        email: String,
        /// Message subject
        #[arg(long)]
        subject: String,
        /// Message body
        #[arg(long)]
        message: String,
    },
    /// Request a resume for a role; the matching file is delivered locally
    Resume {
        /// Requester email address
        #[arg(long)]
        email: String,
        /// Role of interest
        #[arg(long, value_parser = ["data-analyst", "data-engineer", "data-science", "full-stack"])]
        role: String,
        /// Directory the resume is delivered into (defaults to config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = folio::config::load_config_with_precedence(args.config.clone())?;
        let merged = folio::config::merge_config(config_file);
        let with_env = folio::config::apply_env_overrides(merged);
        folio::config::apply_cli_overrides(
            with_env,
            args.service_id.clone(),
            args.template_id.clone(),
            args.public_key.clone(),
        )
    };

    folio::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let target = config.relay_target();
    if !args.dry_run && !target.is_complete() {
        return Err(AppError::MissingCredentials.into());
    }

    let (spec, values, sink): (FormSpec, Vec<(&str, String)>, Arc<dyn DeliverySink>) =
        match &args.command {
            Command::Contact {
                name,
                email,
                subject,
                message,
            } => (
                FormSpec::contact(),
                vec![
                    (fields::NAME, name.clone()),
                    (fields::EMAIL, email.clone()),
                    (fields::SUBJECT, subject.clone()),
                    (fields::MESSAGE, message.clone()),
                ],
                Arc::new(NullSink) as Arc<dyn DeliverySink>,
            ),
            Command::Resume {
                email,
                role,
                out_dir,
            } => {
                let role = RoleOption::parse(role).map_err(AppError::Role)?;
                let output_dir = out_dir.clone().unwrap_or_else(|| config.output_dir.clone());
                (
                    FormSpec::resume_request(),
                    vec![
                        (fields::EMAIL, email.clone()),
                        (fields::ROLE, role.value().to_string()),
                    ],
                    Arc::new(DiskSink::new(config.resume_dir.clone(), output_dir))
                        as Arc<dyn DeliverySink>,
                )
            }
        };

    let reset_delay = std::time::Duration::from_millis(config.reset_delay_ms);
    if args.dry_run {
        let api = Arc::new(StubSendApi::resolving("OK (dry run)"));
        submit_once(spec, target, api, sink, values, reset_delay).await?;
    } else {
        let api = Arc::new(EmailJsApi::with_base_url(&config.relay_base_url));
        submit_once(spec, target, api, sink, values, reset_delay).await?;
    }

    match &args.command {
        Command::Contact { .. } => println!("Message sent successfully!"),
        Command::Resume { .. } => {
            println!("Resume request logged and the resume has been delivered.")
        }
    }
    Ok(())
}

/// Drive one controller through a single submission.
async fn submit_once<A: SendApi + 'static>(
    spec: FormSpec,
    target: RelayTarget,
    api: Arc<A>,
    sink: Arc<dyn DeliverySink>,
    values: Vec<(&str, String)>,
    reset_delay: std::time::Duration,
) -> Result<(), AppError> {
    let controller =
        SubmissionController::new(spec, target, api, sink).with_reset_delay(reset_delay);
    for (name, value) in values {
        controller.update_field(name, value);
    }
    controller.submit().await?;
    // Dropping the controller cancels the scheduled auto-reset; the CLI
    // has no confirmation window to keep visible.
    Ok(())
}
