//! Download followed by prepare, through the HTTP surface.

mod helpers;

use helpers::{api_path, setup_test_app_with, PreparerKind, TestAppOptions};

#[tokio::test]
async fn test_download_then_prepare() {
    let mut app = setup_test_app_with(TestAppOptions {
        preparer: PreparerKind::Snapshot,
        ..Default::default()
    })
    .await;

    let _missing = app.mock_head("000000Z.json.gz", 404, 1).await;
    let _s1 = app.mock_available("000005Z.json.gz", 5).await;
    let _s2 = app.mock_available("000010Z.json.gz", 10).await;

    let download = app
        .client()
        .post(&api_path("/aircraft/download"))
        .add_query_param("file_limit", 2)
        .await;
    assert_eq!(download.status_code(), 200);
    assert_eq!(download.json::<String>(), "OK uploaded=2");

    let prepare = app.client().post(&api_path("/aircraft/prepare")).await;
    assert_eq!(prepare.status_code(), 200);
    assert_eq!(prepare.json::<String>(), "OK");

    let raw_day = app.raw_day_dir();
    assert!(raw_day.join("000005Z.json.gz").is_file());
    assert!(raw_day.join("000010Z.json.gz").is_file());
    assert!(!raw_day.join("000000Z.json.gz").exists());

    let prepared_day = app.prepared_day_dir();
    let mut prepared: Vec<String> = std::fs::read_dir(&prepared_day)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    prepared.sort();
    assert_eq!(prepared, vec!["000005Z.json", "000010Z.json"]);
}
