use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use cardionet::{
    clinical::ClinicalInput,
    cli::{Command, args_from_env},
    config::Config,
    logging::init_tracing,
    notify::TracingNotifier,
    remote::{ApiClient, HttpTransport, RemoteDataPort},
    session::{AnonymousSession, EnvSession, SessionPort},
    specialists::{PanelView, SpecialistPanel},
    workflow::{Dispatch, EvaluationWorkflow, WorkflowSettings},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = args_from_env()?;
    let config = Config::load(&args.config_path)
        .with_context(|| format!("failed to load config from {}", args.config_path.display()))?;
    let logging = init_tracing(&config.logging).context("failed to initialize logging")?;
    tracing::info!(target: "cardionet", run_id = %logging.run_id(), command = ?args.command, "starting");

    let session: Arc<dyn SessionPort> = if config.api.token_env.trim().is_empty() {
        Arc::new(AnonymousSession)
    } else {
        Arc::new(EnvSession::new(config.api.token_env.clone()))
    };
    let transport = HttpTransport::new(&config.api, Arc::clone(&session))
        .context("failed to build http transport")?;
    let port: Arc<dyn RemoteDataPort> = Arc::new(ApiClient::new(transport));

    match args.command {
        Command::Evaluate => run_evaluation(port, session, &config).await,
        Command::Directory => run_directory(port.as_ref(), &config).await,
    }
}

async fn run_evaluation(
    port: Arc<dyn RemoteDataPort>,
    session: Arc<dyn SessionPort>,
    config: &Config,
) -> Result<()> {
    let workflow = EvaluationWorkflow::new(
        port,
        session,
        Arc::new(TracingNotifier),
        WorkflowSettings::from(&config.directory),
    );

    let report = match workflow.submit(ClinicalInput::demo()).await? {
        Dispatch::Applied(report) => report,
        Dispatch::Skipped(reason) => return Err(anyhow!("evaluation skipped: {reason:?}")),
    };
    println!("{} ({})", report.headline, report.percentage_label);
    println!("{}", report.advice);
    for importance in &report.feature_importances {
        println!("  {:<24} {:.3}", importance.name, importance.weight);
    }
    if workflow.registration_prompt_visible() {
        println!("Sin sesión: puede registrar a este paciente.");
    }

    if !workflow.snapshot().can_recommend {
        return Ok(());
    }
    workflow.request_recommendations().await?;
    if let Some(view) = workflow.specialists_view().await {
        print_panel(&view);
    }
    Ok(())
}

async fn run_directory(port: &dyn RemoteDataPort, config: &Config) -> Result<()> {
    let panel = SpecialistPanel::load_directory(
        port,
        config.directory.bulk_per_page,
        config.directory.per_page,
    )
    .await?;
    print_panel(&panel.view());
    Ok(())
}

fn print_panel(view: &PanelView) {
    println!("{}", view.banner);
    if let Some(message) = view.empty_message {
        println!("{message}");
    }
    for item in &view.items {
        println!(
            "  [{}] {} | {} | {}",
            item.id,
            item.name,
            item.specialty.as_deref().unwrap_or("-"),
            item.address.as_deref().unwrap_or("-"),
        );
    }
    let controls = &view.controls;
    if controls.visible {
        println!(
            "{} | {} | {}",
            control_label(controls.previous_label, controls.previous_enabled),
            controls.label,
            control_label(controls.next_label, controls.next_enabled),
        );
    }
}

fn control_label(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}
