use anyhow::Context;

use shopview_cli::{Args, Report};
use shopview_ranking::{Pipeline, RankingConfig};
use shopview_session::SearchSession;

fn main() -> anyhow::Result<()> {
    shopview_observability::init();

    let args = Args::parse(std::env::args().skip(1))?;

    let config = RankingConfig::from_env();
    let pipeline = Pipeline::new(config).context("invalid ranking configuration")?;
    let mut session = SearchSession::new(pipeline);

    let raw = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("failed to read {}", args.payload.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", args.payload.display()))?;

    let query = args.payload.display().to_string();
    let token = session.begin_query(query);
    session.receive(token, &payload);

    for (name, value) in &args.filters {
        if !session.facets().contains(name, value) {
            tracing::warn!(%name, %value, "filter value does not occur in the results");
        }
        session.toggle_filter(name, value, true);
    }

    if let Some(category) = &args.expand {
        session
            .expand(category)
            .with_context(|| format!("cannot expand {category:?}"))?;
    }

    tracing::info!(
        session_id = %session.id(),
        products = session.overview().product_count(),
        runs = session.runs(),
        "overview ready"
    );

    let report = Report::from_session(&session)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
