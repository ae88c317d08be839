use serde_json::json;
use storefront_client::error::Error;
use storefront_client::orders::{OrderFilter, OrderStatus};
use storefront_client::Storefront;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup_client(server: &MockServer) -> Storefront {
    Storefront::new(&server.uri()).with_auth("orders-token")
}

fn order(id: u64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "status": status,
        "created_at": "2024-03-01T08:00:00Z",
        "updated_at": "2024-03-02T08:00:00Z",
        "items": [],
        "total_amount": "0.00"
    })
}

#[tokio::test]
async fn test_fetch_orders_without_filters_sends_no_query() {
    let server = MockServer::start().await;
    let shop = setup_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [order(2, "paid"), order(1, "pending")]
        })))
        .mount(&server)
        .await;

    let orders = shop.orders().fetch_orders(&OrderFilter::new()).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].status, OrderStatus::Paid);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_fetch_orders_with_filters() {
    let server = MockServer::start().await;
    let shop = setup_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .and(query_param("status", "shipped"))
        .and(query_param("created_at__gte", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([order(5, "shipped")])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = OrderFilter::new()
        .status(OrderStatus::Shipped)
        .created_after("2024-01-31");
    let orders = shop.orders().fetch_orders(&filter).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, 5);
}

#[tokio::test]
async fn test_fetch_orders_error_field_is_message() {
    let server = MockServer::start().await;
    let shop = setup_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "X"})))
        .mount(&server)
        .await;

    let err = shop.orders().fetch_orders(&OrderFilter::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "X");
}

#[tokio::test]
async fn test_fetch_orders_unauthorized_without_body() {
    let server = MockServer::start().await;
    let shop = setup_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = shop.orders().fetch_orders(&OrderFilter::new()).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("401"));
    assert!(matches!(err, Error::Api { details: None, .. }));
}
