use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use academy::prelude::*;
use async_trait::async_trait;
use pretty_assertions::assert_eq;

const SHEET_A: &str = "title,type,category,description,youtube_url,duration,is_featured,is_new\n\
Ads 101,video,ads,Start here,https://youtu.be/a,12 mins,true,false\n\
Listing photos,document,listings,Better images,,,true,true\n\
Ads bidding,video,ads,Cost per click,https://youtu.be/b,8 mins,false,false\n\
Packing fragile goods,banner,packaging,Bubble wrap rules,,,false,true\n\
,video,ads,row without title,,,,\n";

const SHEET_B: &str = "title,category\nOnly one,growth\n";

enum Reply {
    Csv(&'static str, Duration),
    Fail,
}

/// Source that plays back a fixed sequence of replies.
struct Scripted {
    replies: Mutex<VecDeque<Reply>>,
}

impl Scripted {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Box<Self> {
        Box::new(Self { replies: Mutex::new(replies.into_iter().collect()) })
    }
}

#[async_trait]
impl ContentSource for Scripted {
    async fn fetch_csv(&self) -> Result<String, LoadError> {
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Reply::Csv(csv, delay)) => {
                tokio::time::sleep(delay).await;
                Ok(csv.to_string())
            }
            Some(Reply::Fail) | None => Err(LoadError::Source("connection reset".into())),
        }
    }
}

fn ok(csv: &'static str) -> Reply {
    Reply::Csv(csv, Duration::ZERO)
}

#[tokio::test]
async fn load_replaces_items_and_counts() {
    let loader = ContentLoader::new(Scripted::new([ok(SHEET_A)]));
    assert!(loader.items().is_empty());

    let report = loader.load().await.unwrap();
    assert_eq!(report, LoadReport { items: 4, skipped_rows: 1 });

    let status = loader.status();
    assert!(!status.loading);
    assert_eq!(status.error, None);
    assert_eq!(status.items, 4);
    assert!(status.last_loaded_at.is_some());

    assert_eq!(loader.category("all").unwrap().count, 4);
    assert_eq!(loader.category("ads").unwrap().count, 2);
    assert_eq!(loader.category("packaging").unwrap().count, 1);
    for cat in loader.categories() {
        assert_eq!(loader.by_category(&cat.id).len(), cat.count, "bucket {}", cat.id);
    }

    let featured: Vec<String> = loader.featured_content().into_iter().map(|i| i.title).collect();
    assert_eq!(featured, vec!["Ads 101", "Listing photos"]);
    assert_eq!(loader.search("ads", "CLICK")[0].title, "Ads bidding");
    assert_eq!(loader.item("item-4").unwrap().kind, ContentType::Banner);
}

#[tokio::test]
async fn loading_the_same_sheet_twice_is_stable() {
    let loader = ContentLoader::new(Scripted::new([ok(SHEET_A), ok(SHEET_A)]));
    loader.load().await.unwrap();
    let first = loader.snapshot();
    loader.load().await.unwrap();
    let second = loader.snapshot();
    assert_eq!(first.items(), second.items());
    assert_eq!(first.categories(), second.categories());
}

#[tokio::test]
async fn failed_load_keeps_previous_items_and_refresh_recovers() {
    let loader = ContentLoader::new(Scripted::new([ok(SHEET_A), Reply::Fail, ok(SHEET_B)]));
    loader.load().await.unwrap();
    let before = loader.items();

    let err = loader.load().await.unwrap_err();
    assert!(err.is_fetch());
    assert_eq!(loader.items(), before, "previous collection is not cleared");
    assert_eq!(loader.error().as_deref(), Some("Failed to fetch content from the spreadsheet"));
    assert!(!loader.is_loading());

    let status = loader.refresh().await;
    assert_eq!(status.error, None);
    assert_eq!(status.items, 1);
    assert_eq!(loader.category("growth").unwrap().count, 1);
}

#[tokio::test]
async fn first_load_failure_leaves_an_empty_catalog() {
    let loader = ContentLoader::new(Scripted::new([Reply::Fail]));
    assert!(loader.load().await.is_err());
    assert!(loader.items().is_empty());
    assert!(loader.categories().iter().all(|c| c.count == 0));
    assert!(loader.error().is_some());
}

#[tokio::test]
async fn unconfigured_sheet_reports_configuration_error() {
    let academy = Academy::from_config(&Config::default());
    let err = academy.loader().load().await.unwrap_err();
    assert!(matches!(err, LoadError::Configuration(_)));
    assert!(academy.loader().error().unwrap().contains("configure"));
}

#[tokio::test]
async fn non_sheet_document_is_a_parse_error() {
    let loader = ContentLoader::new(Scripted::new([ok(SHEET_B), ok("<html><body>Sign in</body></html>")]));
    loader.load().await.unwrap();
    assert!(matches!(loader.load().await, Err(LoadError::Parse(_))));
    assert_eq!(loader.items().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn overlapping_loads_run_one_after_another() {
    // the first fetch is slow; unserialized it would finish last and win
    let loader = ContentLoader::new(Scripted::new([
        Reply::Csv(SHEET_A, Duration::from_millis(50)),
        ok(SHEET_B),
    ]));
    let (a, b) = tokio::join!(loader.load(), loader.load());
    assert_eq!(a.unwrap().items, 4);
    assert_eq!(b.unwrap().items, 1);
    assert_eq!(loader.items()[0].title, "Only one");
}

#[tokio::test]
async fn snapshots_are_unaffected_by_later_loads() {
    let loader = ContentLoader::new(Scripted::new([ok(SHEET_A), ok(SHEET_B)]));
    loader.load().await.unwrap();
    let old = loader.snapshot();
    loader.load().await.unwrap();
    assert_eq!(old.len(), 4);
    assert_eq!(loader.snapshot().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn abandoned_load_lowers_the_loading_flag() {
    let loader = ContentLoader::new(Scripted::new([
        ok(SHEET_B),
        Reply::Csv(SHEET_A, Duration::from_secs(60)),
        ok(SHEET_A),
    ]));
    loader.load().await.unwrap();

    let timed_out = tokio::time::timeout(Duration::from_secs(1), loader.load()).await;
    assert!(timed_out.is_err());
    let status = loader.status();
    assert!(!status.loading, "loading flag must drop with the abandoned load");
    assert_eq!(status.error, None);
    assert_eq!(status.items, 1, "previous catalog is kept");

    // the load lock was released too
    assert_eq!(loader.load().await.unwrap().items, 4);
}
