use clap::Args;
use sweepstats_analysis::dashboard::LinkedRecord;
use tracing::info;

use crate::{command::common::DataArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct EnrichArg {
    #[command(flatten)]
    data: DataArg,
}

pub(crate) fn run(arg: &EnrichArg) -> anyhow::Result<()> {
    let loaded = arg.data.load(|_| {})?;
    let records = loaded
        .select()
        .into_iter()
        .map(|record| LinkedRecord::new(record, &loaded.config.game_url_base))
        .collect::<Vec<_>>();

    info!("Writing {} enriched sessions...", records.len());
    Output::save_json(&records, arg.data.output.clone())
}
