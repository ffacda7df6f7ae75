use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todoview_client::api::TodoApi;
use todoview_client::command::{CommandOutcome, Confirmation, TodoCommand};
use todoview_client::config::ClientConfig;
use todoview_client::controller::{TodoListController, ViewSnapshot};
use todoview_client::data_access::TodoDataAccess;
use todoview_client::error::MUTATION_FAILED_MESSAGE;
use todoview_core::pagination::clamp_limit;
use todoview_core::scope::Scope;
use todoview_core::todo::{PlanInput, TodoInput};

mod args;
mod render;

use args::{Cli, Commands, OutputFormat};

type Controller = TodoListController<dyn TodoDataAccess>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todoview=info,todoview_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("Invalid configuration")?;
    if let Some(url) = cli.api_url.clone() {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(size) = cli.page_size {
        config.page_size = clamp_limit(Some(size));
    }
    tracing::debug!(api_url = %config.api_url, page_size = config.page_size, "Configuration loaded");

    let data: Arc<dyn TodoDataAccess> =
        Arc::new(TodoApi::from_config(&config).context("Failed to build HTTP client")?);

    match cli.command {
        Commands::List { scope, all } => {
            let mut ctl = mount(&data, scope.scope(), config.page_size).await;
            if all {
                load_all(&mut ctl).await;
            }
            print_snapshot(&ctl.snapshot(), cli.format)?;
        }
        Commands::Add {
            scope,
            title,
            description,
            category,
            due,
        } => {
            let mut ctl = mount(&data, scope.scope(), config.page_size).await;
            let mut input = TodoInput::new(title);
            input.description = description;
            input.category = category;
            input.due_date = due;
            run(&mut ctl, TodoCommand::Create(input)).await?;
            print_snapshot(&ctl.snapshot(), cli.format)?;
        }
        Commands::Delete { scope, id, yes } => {
            let mut ctl = mount(&data, scope.scope(), config.page_size).await;
            let confirmation = Confirmation::from(yes);
            if run(&mut ctl, TodoCommand::Delete { id, confirmation }).await?
                == CommandOutcome::DeleteDeclined
            {
                eprintln!("Not deleted: pass --yes to confirm.");
                return Ok(());
            }
            print_snapshot(&ctl.snapshot(), cli.format)?;
        }
        Commands::Plan {
            scope,
            id,
            urgency,
            importance,
            due,
        } => {
            let mut ctl = mount(&data, scope.scope(), config.page_size).await;
            load_all(&mut ctl).await;
            let plan = PlanInput {
                urgency: urgency.into(),
                importance: importance.into(),
                due_date: due,
            };
            run(&mut ctl, TodoCommand::Plan { id, plan }).await?;
            print_snapshot(&ctl.snapshot(), cli.format)?;
        }
    }

    Ok(())
}

/// Build a controller for `scope` and perform the initial load and header
/// lookup. A failed load is reported through the snapshot.
async fn mount(data: &Arc<dyn TodoDataAccess>, scope: Scope, page_size: usize) -> Controller {
    let mut ctl = TodoListController::new(Arc::clone(data), scope, page_size);
    ctl.load_header().await;
    if let Err(err) = ctl.dispatch(TodoCommand::Load).await {
        // Already recorded on the controller; the snapshot shows it.
        tracing::debug!(scope = %scope, error = %err, "Initial load failed");
    }
    ctl
}

async fn load_all(ctl: &mut Controller) {
    while ctl.has_more() {
        if ctl.load_more().await == 0 {
            break;
        }
    }
}

async fn run(ctl: &mut Controller, command: TodoCommand) -> anyhow::Result<CommandOutcome> {
    ctl.dispatch(command)
        .await
        .map_err(|err| anyhow::anyhow!(err.user_message(MUTATION_FAILED_MESSAGE)))
}

fn print_snapshot(snapshot: &ViewSnapshot, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => print!("{}", render::render_plain(snapshot)),
        OutputFormat::Json => {
            let body = serde_json::json!({
                "snapshot": snapshot,
                "rows": snapshot.rows(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}
