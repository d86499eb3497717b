use anyhow::Result;
use log::debug;
use std::fmt::Write as _;

use crate::{
    format::{display_version, format_date, format_size},
    provider::{Provider, Release},
    slot::SlotTable,
};

use super::config::Config;
use super::services::build_provider;

/// Print how the configured release would be laid out on the page
#[tracing::instrument(skip(config))]
pub async fn show(config: Config) -> Result<()> {
    let provider = build_provider(&config)?;
    print!("{}", render(&provider, &config).await?);
    Ok(())
}

pub(crate) async fn render<P: Provider + ?Sized>(provider: &P, config: &Config) -> Result<String> {
    debug!("Showing {} release of {}", config.selector, config.repo);
    let release = provider.get_release(&config.repo, &config.selector).await?;
    let table = SlotTable::standard()?;
    describe_release(&release, &table)
}

fn describe_release(release: &Release, table: &SlotTable) -> Result<String> {
    let mut out = String::new();

    writeln!(
        out,
        "Release: {} (version {})",
        release.tag,
        display_version(&release.tag)
    )?;

    if release.assets.is_empty() {
        writeln!(out, "\nNo assets.")?;
        return Ok(out);
    }

    writeln!(out, "\nAssets:")?;
    for asset in &release.assets {
        match table.route(&asset.name) {
            Some(slot) => {
                let date = format_date(&asset.updated_at)
                    .unwrap_or_else(|_| format!("invalid date {:?}", asset.updated_at));
                writeln!(
                    out,
                    "  {:<16} {:<40} {:>10}  {}",
                    slot.display_name(),
                    asset.name,
                    format_size(asset.size),
                    date
                )?;
            }
            None => writeln!(out, "  {:<16} {}", "(unmatched)", asset.name)?,
        }
    }

    Ok(out)
}
