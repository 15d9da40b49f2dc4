use crate::cli::Cli;
use crate::domain::models::{DateWindow, ExportSummary};
use crate::services::api::{HttpRotaApi, RotaApi};
use crate::services::auth::authenticate;
use crate::services::fetch::fetch_rota;
use crate::services::output::write_output;
use crate::services::settings::load_settings;
use crate::services::storage::{load_tokens, save_tokens, tokens_path};
use crate::services::transform::transform;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub iso_dates: bool,
    pub csv_dir: Option<PathBuf>,
    pub tokens_dir: Option<PathBuf>,
    pub settings_dir: Option<PathBuf>,
}

impl From<&Cli> for ExportOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            iso_dates: cli.iso_dates,
            csv_dir: cli.csv.clone(),
            tokens_dir: cli.tokens.clone(),
            settings_dir: cli.settings.clone(),
        }
    }
}

pub fn handle_export(cli: &Cli) -> anyhow::Result<()> {
    let api = HttpRotaApi::new()?;
    let today = Local::now().date_naive();
    run_export(&api, &ExportOptions::from(cli), today)?;
    Ok(())
}

/// Runs the whole pipeline with `today` as the first day of the window.
pub fn run_export<A: RotaApi + ?Sized>(
    api: &A,
    opts: &ExportOptions,
    today: NaiveDate,
) -> anyhow::Result<ExportSummary> {
    let settings = load_settings(opts.settings_dir.as_deref())?;
    let tokens_file = tokens_path(opts.tokens_dir.as_deref());
    let mut tokens = load_tokens(&tokens_file, &settings.departments)?;

    let authenticated = authenticate(api, &settings.departments, &mut tokens);
    let tokens_saved = tokens.is_modified();
    if tokens_saved {
        if let Err(save_err) = save_tokens(&tokens_file, &mut tokens) {
            return Err(match authenticated {
                Err(auth_err) => {
                    auth_err.context(format!("tokens not saved ({:#})", save_err))
                }
                Ok(_) => save_err,
            });
        }
    }
    let authenticated = authenticated?;

    let window = DateWindow::starting(today, settings.day_range)?;
    let records = fetch_rota(api, &authenticated, &window)?;
    let fetched = records.len();

    let rows = transform(&settings, records, opts.iso_dates)?;
    let output = write_output(
        opts.csv_dir.as_deref(),
        &settings.return_data_set.headers(),
        &rows,
    )?;
    tracing::info!("Export complete!");

    Ok(ExportSummary {
        fetched,
        written: rows.len(),
        output,
        tokens_saved,
    })
}
