use anyhow::Context;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::database::{Database, Tables, models::LeaveReportRow};
use crate::error::AppError;
use crate::services::capabilities::Capability;
use crate::services::user_context::UserContext;

/// Owner name shown for requests whose user has been deleted.
pub const DELETED_USER_NAME: &str = "(deleted user)";

pub const CSV_HEADER: [&str; 9] = [
    "id",
    "userId",
    "userName",
    "leaveType",
    "startDate",
    "endDate",
    "status",
    "appliedOn",
    "reason",
];

/// Every leave request joined with its owner's name, newest application
/// first.
pub fn build_rows(tables: &Tables) -> Vec<LeaveReportRow> {
    let mut rows: Vec<LeaveReportRow> = tables
        .leave_requests
        .iter()
        .map(|request| LeaveReportRow {
            id: request.id.clone(),
            user_id: request.user_id.clone(),
            user_name: tables
                .user(&request.user_id)
                .map_or_else(|| DELETED_USER_NAME.to_string(), |user| user.name.clone()),
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            status: request.status,
            applied_on: request.applied_on,
            reason: request.reason.clone(),
        })
        .collect();

    rows.sort_by(|a, b| b.applied_on.cmp(&a.applied_on));
    rows
}

/// Renders `rows` as CSV with a fixed header. Fields are quoted only when
/// they contain a delimiter, quote or line break.
pub fn to_csv(rows: &[LeaveReportRow]) -> anyhow::Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        let start_date = row.start_date.to_string();
        let end_date = row.end_date.to_string();
        let applied_on = row.applied_on.date_naive().to_string();

        writer.write_record([
            row.id.as_str(),
            row.user_id.as_str(),
            row.user_name.as_str(),
            row.leave_type.as_str(),
            start_date.as_str(),
            end_date.as_str(),
            row.status.as_str(),
            applied_on.as_str(),
            row.reason.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Failed to flush CSV writer: {}", err))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

#[derive(Clone)]
pub struct ReportService {
    database: Database,
}

impl ReportService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub async fn all_requests(&self, ctx: &UserContext) -> Result<Vec<LeaveReportRow>, AppError> {
        ctx.requires(Capability::ViewReports)?;
        let tables = self.database.read().await;
        Ok(build_rows(&tables))
    }

    pub async fn export_csv(&self, ctx: &UserContext) -> Result<String, AppError> {
        let rows = self.all_requests(ctx).await?;
        let csv = to_csv(&rows)?;
        log::info!("Exported {} leave request(s) as CSV", rows.len());
        Ok(csv)
    }
}
