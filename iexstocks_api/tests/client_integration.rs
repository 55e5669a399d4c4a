use iexstocks_api::{BatchQuery, Client, Error, Query};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn quote_query() -> BatchQuery {
    BatchQuery::default()
        .with_symbols(&["AAPL".to_string(), "TSLA".to_string()])
        .with_endpoints(&[iexstocks_api::types::Endpoint::Quote])
}

#[tokio::test]
async fn get_stock_batch_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("batch.json");

    Mock::given(method("GET"))
        .and(path("/stock/market/batch"))
        .and(query_param("symbols", "AAPL,TSLA"))
        .and(query_param("types", "quote"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_stock_batch(&quote_query()).await;
    assert!(result.is_ok());

    let resp = result.unwrap();
    assert_eq!(resp.len(), 2);
    assert_eq!(resp["AAPL"]["price"], 171.34);
    assert_eq!(resp["TSLA"]["quote"]["companyName"], "Tesla Inc.");
}

#[tokio::test]
async fn get_stock_batch_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stock/market/batch"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_stock_batch(&quote_query()).await;
    match result {
        Err(Error::HttpStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected HttpStatus error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn get_stock_batch_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stock/market/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_stock_batch(&quote_query()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn token_is_passed_through() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("batch.json");

    Mock::given(method("GET"))
        .and(path("/stock/market/batch"))
        .and(query_param("token", "sk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).with_token("sk_test");
    let result = client.get_stock_batch(&quote_query()).await;
    assert!(result.is_ok());
}
