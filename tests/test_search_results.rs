use forkify::{AppConfig, HttpJsonFetcher, LocalDataset, LookupError, RecipeModel};
use mockito::Matcher;
use std::io::Write;

fn model_for(server_url: &str, dataset: LocalDataset) -> RecipeModel {
    let mut config = AppConfig::default();
    config.api.base_url = format!("{server_url}/api/v2/recipes");
    let fetcher = HttpJsonFetcher::new(None).unwrap();
    RecipeModel::new(config, Box::new(fetcher), dataset)
}

fn dataset_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn search_body(count: usize) -> String {
    let recipes: Vec<String> = (1..=count)
        .map(|i| {
            format!(
                r#"{{"id": "r{i}", "title": "Pizza {i}", "publisher": "Pizza Place", "image_url": "https://img.test/{i}.jpg"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"status": "success", "results": {count}, "data": {{"recipes": [{}]}}}}"#,
        recipes.join(",")
    )
}

const LOCAL_RECIPES: &str = r#"
{
    "recipes": [
        {"id": "l1", "title": "Garden Salad", "publisher": "Local Kitchen", "image_url": "salad.jpg"},
        {"id": "l2", "title": "Chicken Salad Wrap"},
        {"id": "l3", "title": "Banana Bread", "image": "bread.jpg"}
    ]
}
"#;

#[tokio::test]
async fn test_search_results_and_pages() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/recipes")
        .match_query(Matcher::UrlEncoded("search".into(), "pizza".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(23))
        .create_async()
        .await;

    let mut model = model_for(&server.url(), LocalDataset::bundled());
    model.load_search_results("pizza").await.unwrap();
    mock.assert_async().await;

    assert!(!model.state().is_using_local_data());
    assert_eq!(model.state().search().query(), "pizza");
    assert_eq!(model.state().search().results().len(), 23);
    assert_eq!(model.state().search().page(), 1);

    let first = model.get_search_results_page(Some(1)).to_vec();
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].id, "r1");
    assert_eq!(first[0].image, "https://img.test/1.jpg");

    let last = model.get_search_results_page(Some(3)).to_vec();
    assert_eq!(last.len(), 3);
    assert_eq!(last[0].id, "r21");
    assert_eq!(model.state().search().page(), 3);

    // Same inputs, same slice
    assert_eq!(model.get_search_results_page(Some(3)).to_vec(), last);

    assert!(model.get_search_results_page(Some(4)).is_empty());
    assert_eq!(model.state().search().page(), 4);
}

#[tokio::test]
async fn test_api_down_filters_local_titles() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v2/recipes")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let file = dataset_file(LOCAL_RECIPES);
    let mut model = model_for(&server.url(), LocalDataset::from_path(file.path()));
    model.load_search_results("salad").await.unwrap();

    let results = model.state().search().results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Garden Salad");
    assert_eq!(results[1].title, "Chicken Salad Wrap");
    // Placeholders fill in what the dataset leaves out
    assert_eq!(results[1].publisher, "Local");
    assert_eq!(results[1].image, "./img/logo.png");
    assert_eq!(model.state().search().query(), "salad");
    assert!(model.state().is_using_local_data());
}

#[tokio::test]
async fn test_empty_api_results_without_local_match_show_full_dataset() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v2/recipes")
        .match_query(Matcher::UrlEncoded("search".into(), "pizza".into()))
        .with_status(200)
        .with_body(search_body(0))
        .create_async()
        .await;

    let file = dataset_file(LOCAL_RECIPES);
    let mut model = model_for(&server.url(), LocalDataset::from_path(file.path()));
    model.load_search_results("pizza").await.unwrap();

    let ids: Vec<&str> = model
        .state()
        .search()
        .results()
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["l1", "l2", "l3"]);
    assert_eq!(model.state().search().results()[2].image, "bread.jpg");
    assert!(model.state().is_using_local_data());
}

#[tokio::test]
async fn test_successful_search_after_fallback_clears_flag() {
    let mut server = mockito::Server::new_async().await;
    let _down = server
        .mock("GET", "/api/v2/recipes")
        .match_query(Matcher::UrlEncoded("search".into(), "bread".into()))
        .with_status(500)
        .create_async()
        .await;
    let _up = server
        .mock("GET", "/api/v2/recipes")
        .match_query(Matcher::UrlEncoded("search".into(), "pizza".into()))
        .with_status(200)
        .with_body(search_body(2))
        .create_async()
        .await;

    let file = dataset_file(LOCAL_RECIPES);
    let mut model = model_for(&server.url(), LocalDataset::from_path(file.path()));

    model.load_search_results("bread").await.unwrap();
    assert!(model.state().is_using_local_data());
    assert_eq!(model.state().search().results()[0].id, "l3");

    model.get_search_results_page(Some(2));
    model.load_search_results("pizza").await.unwrap();
    assert!(!model.state().is_using_local_data());
    assert_eq!(model.state().search().results().len(), 2);
    assert_eq!(model.state().search().page(), 1);
}

#[tokio::test]
async fn test_api_down_and_dataset_missing_reports_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/api/v2/recipes")
        .match_query(Matcher::Any)
        .with_status(502)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dataset = LocalDataset::from_path(dir.path().join("sampleRecipes.json"));
    let mut model = model_for(&server.url(), dataset);

    let err = model.load_search_results("pizza").await.unwrap_err();
    assert!(matches!(err, LookupError::RemoteFetch(_)));
    assert!(model.state().search().results().is_empty());
}

#[tokio::test]
async fn test_api_key_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/recipes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search".into(), "pasta".into()),
            Matcher::UrlEncoded("key".into(), "secret-key".into()),
        ]))
        .with_status(200)
        .with_body(search_body(1))
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.api.base_url = format!("{}/api/v2/recipes", server.url());
    config.api.key = Some("secret-key".to_string());
    let fetcher = HttpJsonFetcher::new(None).unwrap();
    let mut model = RecipeModel::new(config, Box::new(fetcher), LocalDataset::bundled());

    model.load_search_results("pasta").await.unwrap();
    mock.assert_async().await;
    assert!(!model.state().is_using_local_data());
}
