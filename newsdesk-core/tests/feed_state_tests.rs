use newsdesk_core::config::FeedConfig;
use newsdesk_core::{Category, FeedState, QueryChange, QueryFilter};

fn state() -> FeedState {
    FeedState::new(&FeedConfig::default(), 12)
}

fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn category_and_search_exclude_each_other() {
    let mut feed = state();
    feed.set_country("gb");

    assert_eq!(feed.set_category(Some(Category::Sports)), QueryChange::Changed);
    assert_eq!(feed.search_term(), "");
    assert_eq!(feed.country(), "us");

    assert_eq!(feed.set_search("ai"), QueryChange::Changed);
    assert_eq!(feed.category(), None);
    assert_eq!(feed.search_term(), "ai");
    assert_eq!(feed.country(), "us");
}

#[test]
fn country_clears_search_and_category() {
    let mut feed = state();
    feed.set_search("election");
    assert_eq!(feed.set_country("de"), QueryChange::Changed);
    assert_eq!(feed.search_term(), "");
    assert_eq!(feed.category(), None);
    assert_eq!(feed.country(), "de");
}

#[test]
fn unchanged_values_are_no_ops() {
    let mut feed = state();
    feed.set_search("rust");
    feed.next_page();
    let generation = feed.generation();

    assert_eq!(feed.set_search("  rust "), QueryChange::Unchanged);
    assert_eq!(feed.set_country("us"), QueryChange::Unchanged);
    assert_eq!(feed.set_category(None), QueryChange::Unchanged);
    assert_eq!(feed.generation(), generation);
    assert_eq!(feed.page(), 2);
    assert_eq!(feed.search_term(), "rust");
}

#[test]
fn query_changes_reset_page() {
    let mut feed = state();
    feed.next_page();
    feed.next_page();
    assert_eq!(feed.page(), 3);

    feed.set_category(Some(Category::Health));
    assert_eq!(feed.page(), 1);
}

#[test]
fn next_page_only_touches_page() {
    let mut feed = state();
    feed.set_category(Some(Category::Science));
    assert_eq!(feed.next_page(), Some(2));
    assert_eq!(feed.category(), Some(Category::Science));
    assert_eq!(feed.country(), "us");
}

#[test]
fn next_page_is_rejected_while_request_in_flight() {
    let mut feed = state();
    let request = feed.begin_request();
    assert!(feed.is_in_flight());
    assert_eq!(feed.next_page(), None);
    assert_eq!(feed.page(), 1);

    feed.complete(&request);
    assert!(!feed.is_in_flight());
    assert_eq!(feed.next_page(), Some(2));
}

#[test]
fn request_params_emit_exactly_one_filter() {
    let mut feed = state();
    let params = feed.to_request_params();
    assert_eq!(param(&params, "country"), Some("us"));
    assert_eq!(param(&params, "q"), None);
    assert_eq!(param(&params, "category"), None);
    assert_eq!(param(&params, "page"), Some("1"));
    assert_eq!(param(&params, "pageSize"), Some("12"));

    feed.set_category(Some(Category::Technology));
    let params = feed.to_request_params();
    assert_eq!(param(&params, "category"), Some("technology"));
    assert_eq!(param(&params, "country"), None);

    feed.set_search("mars");
    feed.next_page();
    let params = feed.to_request_params();
    assert_eq!(param(&params, "q"), Some("mars"));
    assert_eq!(param(&params, "category"), None);
    assert_eq!(param(&params, "country"), None);
    assert_eq!(param(&params, "page"), Some("2"));
}

#[test]
fn superseded_requests_are_not_current() {
    let mut feed = state();
    let first = feed.begin_request();
    assert!(feed.is_current(&first));

    feed.set_search("new query");
    let second = feed.begin_request();
    assert!(!feed.is_current(&first));
    assert!(feed.is_current(&second));
    assert_eq!(second.filter, QueryFilter::Search("new query".into()));

    // A stale completion must not release the newer request's guard.
    feed.complete(&first);
    assert!(feed.is_in_flight());
}

#[test]
fn categories_parse_from_lowercase_names() {
    assert_eq!("sports".parse::<Category>(), Ok(Category::Sports));
    assert!("Sports".parse::<Category>().is_err());
    for category in Category::ALL {
        assert_eq!(category.to_string().parse::<Category>(), Ok(category));
    }
}
