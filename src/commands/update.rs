use anyhow::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::{
    page::{HtmlPage, Page},
    provider::Provider,
    runtime::Runtime,
    slot::SlotTable,
    updater::{UpdateOutcome, update_download_info},
};

use super::config::Config;
use super::services::build_provider;

/// Patch the download page at `page_path` with the configured release.
///
/// Returns `Ok(false)` when the update failed (already logged); `Err` is
/// reserved for problems reading or writing the page file.
#[tracing::instrument(skip(runtime, config))]
pub async fn update<R: Runtime>(
    runtime: R,
    config: Config,
    page_path: &Path,
    output: Option<PathBuf>,
) -> Result<bool> {
    let provider = build_provider(&config)?;
    run(&runtime, &provider, &config, page_path, output.as_deref()).await
}

pub(crate) async fn run<R, P>(
    runtime: &R,
    provider: &P,
    config: &Config,
    page_path: &Path,
    output: Option<&Path>,
) -> Result<bool>
where
    R: Runtime,
    P: Provider + ?Sized,
{
    let source = runtime.read_to_string(page_path)?;
    let mut page = HtmlPage::parse(&source)?;
    let table = SlotTable::standard()?;

    let outcome =
        update_download_info(provider, &config.repo, &config.selector, &table, &mut page).await;

    let target = output.unwrap_or(page_path);
    if outcome.page_modified() {
        write_page(runtime, target, &page.render())?;
        info!("Wrote {}", target.display());
    } else {
        warn!("{} left unchanged", page_path.display());
    }

    if let UpdateOutcome::Updated(report) | UpdateOutcome::Partial(report) = &outcome {
        for binding in &report.bindings {
            println!("{:<16} {}", binding.slot.display_name(), binding.asset);
        }
        for name in &report.unmatched {
            debug!("Unmatched asset: {}", name);
        }
    }

    Ok(outcome.is_success())
}

/// Write through a sibling file so a reader never sees a half-written page.
fn write_page<R: Runtime>(runtime: &R, target: &Path, html: &str) -> Result<()> {
    let mut staged = target.as_os_str().to_owned();
    staged.push(".dlpage.tmp");
    let staged = PathBuf::from(staged);

    runtime.write(&staged, html.as_bytes())?;
    if let Err(e) = runtime.rename(&staged, target) {
        if let Err(cleanup) = runtime.remove_file(&staged) {
            warn!("Could not remove {}: {:#}", staged.display(), cleanup);
        }
        return Err(e.context(format!("Failed to replace {}", target.display())));
    }
    Ok(())
}
