use anyhow::Result;
use interleaving_service::services::interleaving::{Coin, RandomCoin, SeededCoin};
use interleaving_service::{CandidateFilter, Config, EvaluationService, SyntheticCandidateSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Runs one simulated evaluation session against synthetic candidates:
/// serve the first page, click a few items at random, report the tally.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    info!(
        service = %config.service_name,
        candidates = config.candidate_count,
        per_page = config.per_page,
        seed = ?config.seed,
        "Starting simulated evaluation"
    );

    let mut source = SyntheticCandidateSource::new(config.candidate_count);
    let coin: Arc<dyn Coin> = match config.seed {
        Some(seed) => {
            source = source.with_seed(seed);
            Arc::new(SeededCoin::new(seed))
        }
        None => Arc::new(RandomCoin),
    };
    let mut user = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };

    let service = EvaluationService::new(Arc::new(source))
        .with_coin(coin)
        .with_fetch_timeout(Duration::from_millis(config.fetch_timeout_ms));
    let filters = CandidateFilter::default();

    let page = service.get_page(1, config.per_page, &filters).await?;
    if let Some((first, last)) = page.display_range() {
        info!(
            first,
            last,
            total = page.total_items,
            pages = page.total_pages,
            "Serving first page"
        );
    }

    if !page.items.is_empty() {
        for _ in 0..config.simulated_clicks {
            let position = user.gen_range(0..page.items.len());
            let clicked = &page.items[position];
            service.record_click(clicked.id)?;
            info!(
                candidate_id = clicked.id,
                position = position + 1,
                source = page.source_tags[position].as_str(),
                "Simulated click"
            );
        }
    }

    let summary = service.summarize()?;
    info!(
        old_clicks = summary.old_clicks,
        new_clicks = summary.new_clicks,
        winner = ?summary.winner,
        "Evaluation finished"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
