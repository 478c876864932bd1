use clap::Args;
use sweepstats_analysis::cohort::cohort_panels;
use tracing::info;

use crate::{command::common::DataArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    #[command(flatten)]
    data: DataArg,
    /// Write the panels as JSON instead of text
    #[arg(long)]
    json: bool,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let loaded = arg.data.load(|_| {})?;
    let records = loaded.select();

    info!("Summarizing cohorts...");
    let panels = cohort_panels(&records);
    if arg.json {
        return Output::save_json(&panels, arg.data.output.clone());
    }

    let text = if panels.is_empty() {
        "No games to summarize.".to_owned()
    } else {
        panels
            .iter()
            .map(|panel| panel.summary.to_string())
            .collect::<Vec<_>>()
            .join("\n\n")
    };
    Output::save_text(&text, arg.data.output.clone())
}
