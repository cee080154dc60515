//! Console front end: opens one list screen, prints a page and exports it on request.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::domain::attendance::Attendance;
use crate::domain::company::Company;
use crate::domain::employee::Employee;
use crate::domain::entity::ListEntity;
use crate::domain::leave::{Leave, LeaveType};
use crate::domain::shift::Shift;
use crate::domain::types::{ActiveStatus, ExportFormat};
use crate::models::config::ConsoleConfig;
use crate::pagination::PageState;
use crate::repository::export::FileExportSink;
use crate::repository::http::HttpGateway;
use crate::repository::permissions::{GatewayPermissionResolver, StaticPermissionResolver};
use crate::repository::{Endpoint, PermissionResolver, QueryGateway};
use crate::services::ServiceResult;
use crate::services::list::{FetchOutcome, ListController};

/// List screens reachable from the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Company,
    Shift,
    Employee,
    Attendance,
    Leave,
    LeaveType,
}

#[derive(Debug, Parser)]
#[command(name = "hrm-console")]
#[command(about = "Browse and export HR management lists")]
pub struct ConsoleCommand {
    /// List screen to open
    #[arg(value_enum)]
    pub entity: EntityKind,

    /// Search term
    pub search: Option<String>,

    /// Active status filter (0 = inactive, 1 = active)
    #[arg(long)]
    pub status: Option<ActiveStatus>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long)]
    pub page_size: Option<usize>,

    /// Attendance window start (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Attendance window end (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Restrict attendance to one employee
    #[arg(long)]
    pub employee: Option<String>,

    /// Export the rows shown (csv or json)
    #[arg(long)]
    pub export: Option<ExportFormat>,
}

/// Opens the requested list screen against the configured backend.
pub async fn run(config: ConsoleConfig, command: ConsoleCommand) -> ServiceResult<()> {
    let gateway: Arc<dyn QueryGateway> = Arc::new(HttpGateway::new(
        config.api_base_url.clone(),
        config.api_token.clone(),
        config.request_timeout(),
    )?);
    let resolver = permission_resolver(&config, &gateway);

    match command.entity {
        EntityKind::Company => {
            let screen = open::<Company>(&config, gateway, resolver).await;
            browse(&screen, &command).await
        }
        EntityKind::Shift => {
            let screen = open::<Shift>(&config, gateway, resolver).await;
            browse(&screen, &command).await
        }
        EntityKind::Employee => {
            let screen = open::<Employee>(&config, gateway, resolver).await;
            browse(&screen, &command).await
        }
        EntityKind::Attendance => {
            let screen = open::<Attendance>(&config, gateway, resolver).await;
            if command.from.is_some() || command.to.is_some() {
                screen
                    .apply_date_range(command.employee.clone(), command.from, command.to)
                    .await?;
            }
            browse(&screen, &command).await
        }
        EntityKind::Leave => {
            let screen = open::<Leave>(&config, gateway, resolver).await;
            browse(&screen, &command).await
        }
        EntityKind::LeaveType => {
            let screen = open::<LeaveType>(&config, gateway, resolver).await;
            browse(&screen, &command).await
        }
    }
}

fn permission_resolver(
    config: &ConsoleConfig,
    gateway: &Arc<dyn QueryGateway>,
) -> Arc<dyn PermissionResolver> {
    if config.permission_routes.is_empty() {
        Arc::new(StaticPermissionResolver::new(config.permissions.clone()))
    } else {
        Arc::new(GatewayPermissionResolver::new(
            Arc::clone(gateway),
            Endpoint::new(&config.permission_resource, &config.permission_path),
            config.permission_routes.clone(),
        ))
    }
}

async fn open<E: ListEntity>(
    config: &ConsoleConfig,
    gateway: Arc<dyn QueryGateway>,
    resolver: Arc<dyn PermissionResolver>,
) -> ListController<E> {
    let sink = Arc::new(FileExportSink::new(&config.export_dir, E::CONFIG.name));
    let screen = ListController::new(gateway, resolver, sink, config.list_options());
    report(E::CONFIG.name, screen.initialize().await);
    screen
}

async fn browse<E: ListEntity>(screen: &ListController<E>, command: &ConsoleCommand) -> ServiceResult<()> {
    let name = E::CONFIG.name;

    if let Some(status) = command.status {
        report(name, screen.change_status_filter(Some(status)).await);
    }
    if let Some(size) = command.page_size {
        report(name, screen.change_page_size(size).await);
    }
    if let Some(term) = &command.search {
        report(name, screen.search_now(term.as_str()).await);
    }
    if command.page > 1 {
        report(name, screen.change_page(command.page).await);
    }

    let snapshot = screen.snapshot();
    println!("{}", page_summary(name, &snapshot.page));
    for row in &snapshot.rows {
        match serde_json::to_string(row) {
            Ok(line) => println!("{line}"),
            Err(e) => log::error!("Failed to render {name} row {}: {e}", row.row_id()),
        }
    }

    if let Some(format) = command.export {
        screen.export_current_view(&format.to_string());
    }

    screen.teardown();
    Ok(())
}

fn report(name: &str, outcome: FetchOutcome) {
    match outcome {
        FetchOutcome::Applied => {}
        FetchOutcome::Skipped => log::warn!("Requested {name} page is out of range"),
        other => log::warn!("{name} list not refreshed: {other:?}"),
    }
}

/// One-line header with the page window, e.g. `company page 3/20 (200 rows) 1 2 .. [3] ..`.
fn page_summary(name: &str, page: &PageState) -> String {
    let links: Vec<String> = page
        .page_links()
        .into_iter()
        .map(|link| match link {
            Some(n) if n == page.page_no => format!("[{n}]"),
            Some(n) => n.to_string(),
            None => "..".to_string(),
        })
        .collect();

    format!(
        "{name} page {}/{} ({} rows) {}",
        page.page_no,
        page.total_pages,
        page.total_count,
        links.join(" ")
    )
    .trim_end()
    .to_string()
}
