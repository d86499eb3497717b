//! Fetch a release and patch the download page with it.

use anyhow::Result;
use log::{debug, error, info};

use crate::format::{contains_version, display_version, format_date, format_size, replace_versions};
use crate::page::{InfoField, Page};
use crate::provider::{Provider, Release, ReleaseSelector, RepoId};
use crate::slot::{Slot, SlotTable};

/// An asset bound to a slot on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBinding {
    pub asset: String,
    pub slot: Slot,
}

/// What an update did to the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Version written into the markers, without the leading "v"
    pub version: Option<String>,
    /// Number of version markers whose text was rewritten
    pub version_markers: usize,
    pub bindings: Vec<SlotBinding>,
    /// Assets no rule matched
    pub unmatched: Vec<String>,
}

#[derive(Debug)]
pub enum UpdateOutcome {
    /// The release could not be fetched; the page was not touched.
    Unchanged,
    /// Patching stopped partway; the page keeps the edits made so far.
    Partial(UpdateReport),
    Updated(UpdateReport),
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateOutcome::Updated(_))
    }

    pub fn page_modified(&self) -> bool {
        !matches!(self, UpdateOutcome::Unchanged)
    }
}

/// Fetches one release and writes its version, links, sizes and dates into
/// `page`.
///
/// Failures are logged, never returned. A failed fetch leaves the page as it
/// was; a failure while patching leaves the edits made up to that point.
#[tracing::instrument(skip(provider, table, page))]
pub async fn update_download_info<P, G>(
    provider: &P,
    repo: &RepoId,
    selector: &ReleaseSelector,
    table: &SlotTable,
    page: &mut G,
) -> UpdateOutcome
where
    P: Provider + ?Sized,
    G: Page + ?Sized,
{
    let release = match provider.get_release(repo, selector).await {
        Ok(release) => release,
        Err(e) => {
            error!("Failed to fetch release info: {:#}", e);
            return UpdateOutcome::Unchanged;
        }
    };

    let mut report = UpdateReport::default();
    match apply_release(&release, table, page, &mut report) {
        Ok(()) => {
            info!(
                "Updated {} slot(s) and {} version marker(s) from {} release of {}",
                report.bindings.len(),
                report.version_markers,
                selector,
                repo
            );
            UpdateOutcome::Updated(report)
        }
        Err(e) => {
            error!("Failed to fetch release info: {:#}", e);
            UpdateOutcome::Partial(report)
        }
    }
}

/// Writes `release` into `page`, recording each edit in `report` as it goes.
pub fn apply_release<G: Page + ?Sized>(
    release: &Release,
    table: &SlotTable,
    page: &mut G,
    report: &mut UpdateReport,
) -> Result<()> {
    let version = display_version(&release.tag);
    report.version = Some(version.to_string());
    report.version_markers = rewrite_version_markers(page, version);

    for asset in &release.assets {
        let Some(slot) = table.route(&asset.name) else {
            debug!("Asset {} matches no slot, skipping", asset.name);
            report.unmatched.push(asset.name.clone());
            continue;
        };
        debug!("Asset {} -> {}", asset.name, slot);
        report.bindings.push(SlotBinding {
            asset: asset.name.clone(),
            slot,
        });

        page.set_slot_link(slot, &asset.download_url);
        page.set_slot_info(slot, InfoField::Size, &format_size(asset.size));
        page.set_slot_info(slot, InfoField::Date, &format_date(&asset.updated_at)?);
    }

    Ok(())
}

// Back to front: rewriting a marker drops any marker nested inside it, which
// would shift the indices of the markers after it.
fn rewrite_version_markers<G: Page + ?Sized>(page: &mut G, version: &str) -> usize {
    let markers = page.version_markers();
    let mut rewritten = 0;
    for (index, text) in markers.iter().enumerate().rev() {
        if !contains_version(text) {
            continue;
        }
        if page.set_version_marker(index, &replace_versions(text, version)) {
            rewritten += 1;
        }
    }
    rewritten
}
