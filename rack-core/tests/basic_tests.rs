mod common;

use common::*;
use rack_core::{SearchOptions, SearchSession, filter_results};
use rack_types::{Language, ScoreMode, SearchStatus, SortStrategy};

#[tokio::test]
async fn test_live_source_results_are_filtered_and_deduplicated() {
    let english = FakeSource::answering("english", Language::English, &["Cat", "cat", "cast", "coat", "acts"]);
    let search = create_test_search(vec![english.clone()]);

    let outcome = search.search(&rack("cats____"), &SearchOptions::default()).await;

    assert_eq!(outcome.status, SearchStatus::Live);
    assert!(!outcome.is_degraded());
    assert_eq!(words(&outcome.words), vec!["acts", "cast", "cat"]);
    // offline list has "scat" but a live answer means no fallback
    assert!(!outcome.contains("scat"));
    assert_eq!(english.requests(), vec!["cats".to_string()]);
}

#[tokio::test]
async fn test_failing_source_falls_back_to_offline_list() {
    let english = FakeSource::failing("english", Language::English);
    let search = create_test_search(vec![english]);

    let outcome = search.search(&rack("cats____"), &SearchOptions::default()).await;

    assert_eq!(outcome.status, SearchStatus::Offline);
    assert!(outcome.is_degraded());
    assert_eq!(outcome.failed_sources, vec!["english".to_string()]);
    assert_eq!(words(&outcome.words), vec!["act", "cast", "cat", "cats", "scat"]);
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let english = FakeSource::hanging("slow", Language::English);
    let search = create_test_search(vec![english]);

    let outcome = search.search(&rack("cats____"), &SearchOptions::default()).await;

    assert_eq!(outcome.status, SearchStatus::Offline);
    assert_eq!(outcome.failed_sources, vec!["slow".to_string()]);
    assert!(outcome.contains("cat"));
}

#[tokio::test]
async fn test_one_language_down_is_partial() {
    let english = FakeSource::answering("english", Language::English, &["cat"]);
    let malay = FakeSource::failing("malay", Language::Malay);
    let search = create_test_search(vec![english, malay]);

    let options = SearchOptions {
        language: Language::Both,
        ..SearchOptions::default()
    };
    let outcome = search.search(&rack("catsa___"), &options).await;

    assert_eq!(outcome.status, SearchStatus::Partial);
    assert!(outcome.is_degraded());
    // "cat" is live; "atas" and "tas" come from the Malay offline list
    assert_eq!(words(&outcome.words), vec!["atas", "cat", "tas"]);
}

#[tokio::test]
async fn test_words_shared_by_sources_appear_once() {
    let english = FakeSource::answering("english", Language::English, &["cat", "act"]);
    let malay = FakeSource::answering("malay", Language::Malay, &["act", "tas"]);
    let search = create_test_search(vec![english, malay]);

    let options = SearchOptions {
        language: Language::Both,
        ..SearchOptions::default()
    };
    let outcome = search.search(&rack("cats____"), &options).await;

    assert_eq!(outcome.status, SearchStatus::Live);
    assert_eq!(words(&outcome.words), vec!["act", "cat", "tas"]);
}

#[tokio::test]
async fn test_unselected_language_is_not_queried() {
    let english = FakeSource::answering("english", Language::English, &["cat"]);
    let malay = FakeSource::answering("malay", Language::Malay, &["tas"]);
    let search = create_test_search(vec![english.clone(), malay.clone()]);

    let outcome = search.search(&rack("cats____"), &SearchOptions::default()).await;

    assert_eq!(outcome.status, SearchStatus::Live);
    assert_eq!(english.request_count(), 1);
    assert_eq!(malay.request_count(), 0);
    assert!(!outcome.contains("tas"));
}

#[tokio::test]
async fn test_too_few_letters_skips_sources() {
    let english = FakeSource::answering("english", Language::English, &["at"]);
    let search = create_test_search(vec![english.clone()]);

    let outcome = search.search(&rack("at______"), &SearchOptions::default()).await;

    assert_eq!(outcome.status, SearchStatus::TooFewLetters);
    assert!(outcome.words.is_empty());
    assert_eq!(english.request_count(), 0);
}

#[tokio::test]
async fn test_length_bounds_and_bonused_scores() {
    let english = FakeSource::answering("english", Language::English, &["cat", "cast", "coats", "stoat"]);
    let search = create_test_search(vec![english]);

    let options = SearchOptions {
        min_length: 4,
        max_length: 5,
        score_mode: ScoreMode::Bonused,
        ..SearchOptions::default()
    };
    let outcome = search.search(&rack("coatst__"), &options).await;

    assert_eq!(words(&outcome.words), vec!["cast", "coats", "stoat"]);
    // c3 o1 a1 t1 s1 = 7, x1.5 floored
    let coats = outcome.words.iter().find(|r| r.word == "coats").unwrap();
    assert_eq!(coats.score, 10);
}

#[tokio::test]
async fn test_session_run_records_outcome() {
    let english = FakeSource::answering("english", Language::English, &["cat", "cast", "scat", "acts"]);
    let search = create_test_search(vec![english]);

    let mut session = SearchSession::new(Language::English).with_rack(rack("cats____"));
    let status = search.run(&mut session).await;

    assert_eq!(status, SearchStatus::Live);
    assert_eq!(session.results().len(), 4);

    let by_length = session.sorted_results(SortStrategy::Length);
    assert_eq!(by_length[0].word.len(), 4);
    assert_eq!(by_length.last().unwrap().word, "cat");

    let filtered = filter_results(session.results(), "?cat");
    assert_eq!(words(&filtered), vec!["scat"]);

    session.clear();
    assert!(session.results().is_empty());
}
