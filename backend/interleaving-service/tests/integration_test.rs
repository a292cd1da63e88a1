use async_trait::async_trait;
use interleaving_service::services::interleaving::FixedCoin;
use interleaving_service::{
    Candidate, CandidateFilter, CandidateSource, EvaluationService, FetchError, InterleavingError,
    Source, SyntheticCandidateSource, Winner,
};
use std::collections::HashSet;
use std::sync::Arc;

struct BrokenSource;

#[async_trait]
impl CandidateSource for BrokenSource {
    async fn fetch(&self, _filters: &CandidateFilter) -> Result<Vec<Candidate>, FetchError> {
        Err(FetchError::Timeout("posting store did not answer".to_string()))
    }
}

fn service(seed: u64) -> EvaluationService {
    let source = SyntheticCandidateSource::new(100).with_seed(seed);
    EvaluationService::new(Arc::new(source))
}

#[tokio::test]
async fn test_full_session() {
    let service = service(1);
    let filters = CandidateFilter::default();

    let page = service.get_page(1, 10, &filters).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_pages, 10);
    assert_eq!(page.total_items, 100);
    assert_eq!(page.display_range(), Some((1, 10)));

    let clamped = service.get_page(15, 10, &filters).await.unwrap();
    assert_eq!(clamped.current_page, 10);
    assert_eq!(clamped.display_range(), Some((91, 100)));

    // Every candidate appears exactly once across all pages.
    let mut seen = HashSet::new();
    for n in 1..=page.total_pages {
        let page = service.get_page(n, 10, &filters).await.unwrap();
        for item in &page.items {
            assert!(seen.insert(item.id), "duplicate id {}", item.id);
        }
    }
    assert_eq!(seen.len(), 100);

    // Click two items from the same source and one from the other.
    let result = service.current_result().unwrap();
    let old_ids: Vec<_> = result
        .sequence()
        .iter()
        .zip(result.attribution())
        .filter(|(_, s)| **s == Source::Old)
        .map(|(c, _)| c.id)
        .collect();
    let new_ids: Vec<_> = result
        .sequence()
        .iter()
        .zip(result.attribution())
        .filter(|(_, s)| **s == Source::New)
        .map(|(c, _)| c.id)
        .collect();

    service.record_click(old_ids[0]).unwrap();
    service.record_click(old_ids[1]).unwrap();
    service.record_click(old_ids[1]).unwrap();
    service.record_click(new_ids[0]).unwrap();

    let summary = service.summarize().unwrap();
    assert_eq!(summary.old_clicks, 2);
    assert_eq!(summary.new_clicks, 1);
    assert_eq!(summary.total_clicks, 3);
    assert_eq!(summary.winner, Winner::Old);
}

#[tokio::test]
async fn test_filters_narrow_candidates() {
    let service = service(2);
    let filters = CandidateFilter::default().company("Company 2");

    let page = service.get_page(1, 20, &filters).await.unwrap();

    // Substring match: "Company 2" and "Company 20", 5 postings each
    assert_eq!(page.total_items, 10);
    assert!(page.items.iter().all(|c| c.company.contains("Company 2")));
}

#[tokio::test]
async fn test_filter_change_targets_new_result() {
    let service = service(3);
    let all = CandidateFilter::default();
    let narrow = CandidateFilter::default().title("Job title 7");

    service.get_page(1, 10, &all).await.unwrap();
    let broad = service.current_result().unwrap();
    service.record_click(broad.sequence()[0].id).unwrap();

    let page = service.get_page(1, 10, &narrow).await.unwrap();
    let current = service.current_result().unwrap();
    assert_ne!(current.id(), broad.id());
    assert_eq!(current.context_key(), narrow.cache_key());
    assert_eq!(service.summarize().unwrap().total_clicks, 0);

    // Clicking an id that only exists in the broad result is a no-op.
    let stale = broad
        .sequence()
        .iter()
        .find(|c| current.position_of(c.id).is_none())
        .unwrap();
    service.record_click(stale.id).unwrap();
    assert_eq!(service.summarize().unwrap().total_clicks, 0);

    // "Job title 7" matches 7 and 70..=79
    assert_eq!(page.total_items, 11);
}

#[tokio::test]
async fn test_returning_to_filter_starts_fresh() {
    let service = service(7);
    let all = CandidateFilter::default();
    let narrow = CandidateFilter::default().company("Company 4");

    service.get_page(1, 10, &all).await.unwrap();
    let first = service.current_result().unwrap();
    service.record_click(first.sequence()[0].id).unwrap();
    assert_eq!(service.summarize().unwrap().total_clicks, 1);

    service.get_page(1, 10, &narrow).await.unwrap();
    service.get_page(1, 10, &all).await.unwrap();

    let back = service.current_result().unwrap();
    assert_ne!(back.id(), first.id());
    assert!(back.clicks().is_empty());
    assert_eq!(service.summarize().unwrap().total_clicks, 0);
}

#[tokio::test]
async fn test_clear_cache_starts_fresh() {
    let service = service(4);
    let filters = CandidateFilter::default();

    service.get_page(1, 10, &filters).await.unwrap();
    let first = service.current_result().unwrap();
    service.record_click(first.sequence()[0].id).unwrap();

    service.clear_cache();
    assert_eq!(
        service.summarize().unwrap_err(),
        InterleavingError::NotReady
    );

    service.get_page(1, 10, &filters).await.unwrap();
    let second = service.current_result().unwrap();
    assert_ne!(second.id(), first.id());
    assert!(second.clicks().is_empty());
    assert_eq!(service.summarize().unwrap().winner, Winner::Tie);
}

#[tokio::test]
async fn test_broken_source_serves_empty_page() {
    let service = EvaluationService::new(Arc::new(BrokenSource));

    let page = service
        .get_page(1, 10, &CandidateFilter::default())
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.current_page, 1);
    assert_eq!(service.stats().degraded_fetches, 1);

    let summary = service.summarize().unwrap();
    assert_eq!(summary.total_clicks, 0);
    assert_eq!(summary.winner, Winner::Tie);
}

#[tokio::test]
async fn test_first_turn_is_injectable() {
    for favor_old in [true, false] {
        let source = SyntheticCandidateSource::new(30).with_seed(5);
        let service =
            EvaluationService::new(Arc::new(source)).with_coin(Arc::new(FixedCoin(favor_old)));

        let page = service
            .get_page(1, 10, &CandidateFilter::default())
            .await
            .unwrap();
        let expected = if favor_old { Source::Old } else { Source::New };
        assert_eq!(page.source_tags[0], expected);
    }
}

#[tokio::test]
async fn test_zero_page_size_is_rejected() {
    let service = service(6);

    let err = service
        .get_page(1, 0, &CandidateFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err, InterleavingError::InvalidPageSize(0));
}
