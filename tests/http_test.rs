use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use meal_market::api;
use meal_market::lifecycle::{MarketSystem, SystemOptions};
use meal_market::seed::CatalogSeed;
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    _market: MarketSystem,
}

impl TestApp {
    async fn new() -> Self {
        let market = MarketSystem::new(SystemOptions::default());
        CatalogSeed::demo()
            .apply(&market.catalog, &market.accounts)
            .await
            .unwrap();
        Self {
            router: api::router(market.app_state()),
            _market: market,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<(u32, &str)>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((id, role)) = user {
            builder = builder
                .header("X-User-Id", id.to_string())
                .header("X-User-Role", role);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

const ALEX: Option<(u32, &str)> = Some((101, "customer"));
const MEERA: Option<(u32, &str)> = Some((1, "chef"));
const TOMAS: Option<(u32, &str)> = Some((2, "chef"));

fn order_body() -> Value {
    json!({
        "orderItems": [
            { "mealId": 1, "name": "Paneer Butter Masala", "quantity": 2, "price": 12.5 }
        ],
        "deliveryAddress": { "street": "12 Curry Lane", "city": "Austin", "state": "TX", "zip": "78701" },
        "paymentMethod": "card",
        "totalPrice": 25.0,
        "paymentResult": { "id": "pay_1", "status": "COMPLETED" }
    })
}

#[tokio::test]
async fn health_needs_no_identity() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.send(Method::GET, "/cart", Some((101, "admin")), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cart_flow_over_http() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/cart", ALEX, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["totalPrice"], 0.0);

    let (status, body) = app
        .send(Method::POST, "/cart/add", ALEX, Some(json!({ "mealId": 1, "quantity": 2 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item added to cart");
    let item = &body["cart"]["items"][0];
    assert_eq!(item["name"], "Paneer Butter Masala");
    assert_eq!(item["chefName"], "Meera Iyer");
    assert_eq!(item["quantity"], 2);
    assert_eq!(body["cart"]["totalPrice"], 25.0);
    let item_id = item["id"].as_u64().unwrap();

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/cart/update/{item_id}"),
            ALEX,
            Some(json!({ "quantity": 4, "specialInstructions": "extra spicy" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["items"][0]["specialInstructions"], "extra spicy");
    assert_eq!(body["cart"]["totalPrice"], 50.0);

    let (status, body) = app
        .send(Method::POST, "/cart/promo", ALEX, Some(json!({ "code": "welcome10" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    let promo = &body["cart"]["promoCode"];
    assert_eq!(promo["code"], "WELCOME10");
    assert_eq!(promo["discount"], 10);
    assert_eq!(promo["finalPrice"], 45.0);

    let (status, body) = app.send(Method::DELETE, "/cart/promo", ALEX, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["promoCode"], Value::Null);

    let (status, body) = app
        .send(Method::DELETE, &format!("/cart/remove/{item_id}"), ALEX, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["items"], json!([]));
}

#[tokio::test]
async fn cart_errors_map_to_statuses() {
    let app = TestApp::new().await;

    // No cart exists until the first read or add.
    let (status, body) = app
        .send(Method::POST, "/cart/promo", ALEX, Some(json!({ "code": "NOPE" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
    let (status, _) = app.send(Method::DELETE, "/cart/clear", ALEX, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(Method::POST, "/cart/add", ALEX, Some(json!({ "mealId": 1, "quantity": 0 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, body) = app
        .send(Method::POST, "/cart/add", ALEX, Some(json!({ "mealId": 404, "quantity": 1 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = app
        .send(Method::POST, "/cart/add", ALEX, Some(json!({ "mealId": 5, "quantity": 1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, _) = app
        .send(Method::PUT, "/cart/update/77", ALEX, Some(json!({ "quantity": 1 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(Method::POST, "/cart/promo", ALEX, Some(json!({ "code": "NOPE" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn malformed_input_is_rejected() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/cart/add")
        .header("X-User-Id", "101")
        .header("X-User-Role", "customer")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = app.send(Method::GET, "/orders/abc", ALEX, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn order_flow_over_http() {
    let app = TestApp::new().await;

    let (status, created) = app.send(Method::POST, "/orders", ALEX, Some(order_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["chefId"], 1);
    assert_eq!(created["buyerName"], "Alex Kim");
    assert_eq!(created["chefName"], "Meera Iyer");
    assert_eq!(created["totalPrice"], 25.0);
    let id = created["id"].as_u64().unwrap();

    let (status, mine) = app.send(Method::GET, "/orders/my-orders", ALEX, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["chefName"], "Meera Iyer");

    let (status, queue) = app.send(Method::GET, "/orders/chef-orders", MEERA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(queue[0]["buyerName"], "Alex Kim");

    let (status, _) = app.send(Method::GET, "/orders/chef-orders", ALEX, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(Method::GET, &format!("/orders/{id}"), TOMAS, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::PUT, &format!("/orders/{id}/status"), TOMAS, Some(json!({ "status": "ready" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(Method::PUT, &format!("/orders/{id}/status"), MEERA, Some(json!({ "status": "teleported" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, delivered) = app
        .send(Method::PUT, &format!("/orders/{id}/status"), MEERA, Some(json!({ "status": "delivered" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(delivered["status"], "delivered");
    assert!(delivered["deliveredAt"].is_string());

    let (status, body) = app.send(Method::GET, "/orders/999", ALEX, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn empty_order_is_invalid() {
    let app = TestApp::new().await;
    let mut body = order_body();
    body["orderItems"] = json!([]);

    let (status, error) = app.send(Method::POST, "/orders", ALEX, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");

    let (_, mine) = app.send(Method::GET, "/orders/my-orders", ALEX, None).await;
    assert_eq!(mine, json!([]));
}

#[tokio::test]
async fn status_update_checks_role_before_order() {
    let app = TestApp::new().await;
    let body = json!({ "status": "ready" });

    let (status, error) = app
        .send(Method::PUT, "/orders/999/status", ALEX, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "UNAUTHORIZED");

    let (status, error) = app
        .send(Method::PUT, "/orders/999/status", MEERA, Some(body))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");
}
