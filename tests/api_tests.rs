use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use petshop::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

async fn spawn_app() -> Router {
    let state = petshop::api::create_app_state_from_config(test_config(), None)
        .await
        .expect("Failed to create app state");
    petshop::api::router(state)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn appointment(date: &str, time: &str, persons: Value) -> Value {
    json!({
        "name": "Asha",
        "email": "asha@example.com",
        "phone": "555-0101",
        "date": date,
        "time": time,
        "persons": persons,
    })
}

fn order(items: Value) -> Value {
    json!({
        "first_name": "Asha",
        "last_name": "Rao",
        "email": "asha@example.com",
        "address": "1 Kennel Lane",
        "postal_code": "40001",
        "city": "Pune",
        "total_price": 25.0,
        "items": items,
    })
}

#[tokio::test]
async fn test_status_reports_online() {
    let app = spawn_app().await;

    let response = app.oneshot(get("/api/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "online");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_signup_then_login() {
    let app = spawn_app().await;

    let signup = json!({
        "username": "asha",
        "email": "asha@example.com",
        "password": "biscuit",
        "confirm_password": "biscuit",
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/signup", &signup))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Signup successful");
    assert_eq!(body["username"], "asha");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/signup", &signup))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Username already exists");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            &json!({"username": "asha", "password": "biscuit"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::SET_COOKIE));
    let body = body_json(response).await;
    assert_eq!(body["is_admin"], false);
    assert_eq!(body["auth_source"], "session");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/login",
            &json!({"username": "asha", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_signup_rejects_mismatched_passwords() {
    let app = spawn_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/signup",
            &json!({
                "username": "asha",
                "email": "asha@example.com",
                "password": "biscuit",
                "confirm_password": "cookie",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Passwords do not match");
}

#[tokio::test]
async fn test_appointment_persons_must_be_positive() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/appointment",
            &appointment("2030-07-15", "10:00", json!(0)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Number of persons must be greater than 0"
    );

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/appointment",
            &appointment("15-07-2030", "10:00", json!("3")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Appointment booked successfully");
    assert_eq!(body["date"], "2030-07-15");
    assert!(body["appointment_id"].is_i64());
}

#[tokio::test]
async fn test_appointments_listed_newest_first() {
    let app = spawn_app().await;

    for (date, time) in [("2030-07-15", "09:00"), ("2030-07-16", "11:00"), ("2030-07-15", "14:00")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/appointment",
                &appointment(date, time, json!(1)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get("/api/appointments/asha@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let listed: Vec<(String, String)> = body["appointments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| {
            (
                a["date"].as_str().unwrap().to_string(),
                a["time"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    assert_eq!(
        listed,
        vec![
            ("2030-07-16".to_string(), "11:00".to_string()),
            ("2030-07-15".to_string(), "14:00".to_string()),
            ("2030-07-15".to_string(), "09:00".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_time_slots_exclude_booked() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/appointment",
            &appointment("2030-07-15", "10:00", json!(2)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get("/api/appointment/time-slots?date=2030-07-15"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["available_slots"].as_array().unwrap().len(), 7);
    assert_eq!(body["booked_slots"], json!(["10:00"]));

    let response = app
        .clone()
        .oneshot(get("/api/appointment/time-slots"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Date parameter is required");

    let response = app
        .oneshot(get("/api/appointment/time-slots?date=15-07-2030"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid date format. Use YYYY-MM-DD"
    );
}

#[tokio::test]
async fn test_availability_skips_weekends() {
    let app = spawn_app().await;

    let response = app
        .oneshot(get("/api/appointment/availability"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["booking_enabled"], true);
    let days = body["available_dates"].as_array().unwrap();
    assert_eq!(days.len(), 10);
    assert!(days.iter().all(|d| d["available"] == true));
}

#[tokio::test]
async fn test_update_missing_appointment_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/appointment/999",
            &appointment("2030-07-15", "10:00", json!(1)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Appointment not found");
}

#[tokio::test]
async fn test_update_checks_id_before_body() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/appointment/999",
            &json!({"name": "Asha"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Appointment not found");

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/pet_booking/999",
            &json!({"pet_name": "Bruno"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Booking not found");
}

#[tokio::test]
async fn test_update_appointment_overwrites_fields() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/appointment",
            &appointment("2030-07-15", "10:00", json!(1)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["appointment_id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/appointment/{id}"),
            &appointment("16-07-2030", "14:00", json!("2")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Appointment updated successfully");
    assert_eq!(body["appointment_id"], id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/appointment/{id}"),
            &appointment("2030-07-16", "14:00", json!(0)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get("/api/appointments/asha@example.com"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let appointments = body["appointments"].as_array().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["id"], id);
    assert_eq!(appointments[0]["date"], "2030-07-16");
    assert_eq!(appointments[0]["time"], "14:00");
    assert_eq!(appointments[0]["persons"], 2);
}

#[tokio::test]
async fn test_order_items_are_totalled() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            &order(json!([
                {"product_name": "Kibble", "price": 10, "quantity": 2},
                {"product_name": "Chew toy", "price": "5", "quantity": "1"},
                {"product_name": "Mystery", "price": "free"},
                "not an item",
            ])),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Order created successfully");
    let id = body["order_id"].as_i64().unwrap();

    let response = app
        .oneshot(get(&format!("/api/orders/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let order = &body["order"];
    assert_eq!(order["status"], "pending");
    assert_eq!(order["payment_method"], "Cash on Delivery");
    assert_eq!(order["paid"], false);

    let totals: Vec<f64> = order["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["total"].as_f64().unwrap())
        .collect();
    assert_eq!(totals, vec![20.0, 5.0, 0.0]);
}

#[tokio::test]
async fn test_order_validation() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            &json!({"first_name": "Asha", "email": "asha@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Required fields missing: last_name, address, postal_code, city"
    );

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/orders", &order(json!([]))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Order must contain at least one item"
    );

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            &order(json!(["Kibble", 3, null])),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Order must contain at least one item"
    );

    let response = app
        .oneshot(json_request("POST", "/api/orders", &json!([1, 2, 3])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_cancel_order_twice() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            &order(json!([{"product_name": "Leash", "price": 12.5, "quantity": 2}])),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["order_id"].as_i64().unwrap();

    let cancel = || {
        Request::builder()
            .method("POST")
            .uri(format!("/api/orders/{id}/cancel"))
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(cancel()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        format!("Order {id} has been cancelled successfully")
    );

    let response = app.clone().oneshot(cancel()).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Order is already cancelled");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/orders/4242/cancel")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pet_booking_lifecycle() {
    let app = spawn_app().await;

    let booking = json!({
        "pet_name": "Bruno",
        "email": "asha@example.com",
        "pet_type": "Dog",
        "breed": "Beagle",
        "address": "1 Kennel Lane",
        "payment_method": "Cash on Delivery",
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/pet_booking", &booking))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Pet booking successful");
    let id = body["booking_id"].as_i64().unwrap();

    let renamed = json!({
        "pet_name": "Bruno Jr",
        "email": "asha@example.com",
        "pet_type": "Dog",
        "breed": "Basset Hound",
        "address": "2 Kennel Lane",
        "payment_method": "Card",
    });

    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/api/pet_booking/{id}"), &renamed))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Pet booking updated successfully");
    assert_eq!(body["booking_id"], id);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/pet_booking/999", &booking))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Booking not found");

    let response = app
        .oneshot(get("/api/pet_bookings/asha@example.com"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"], id);
    assert_eq!(bookings[0]["pet_name"], "Bruno Jr");
    assert_eq!(bookings[0]["breed"], "Basset Hound");
    assert_eq!(bookings[0]["address"], "2 Kennel Lane");
    assert_eq!(bookings[0]["payment_method"], "Card");
}

#[tokio::test]
async fn test_contact_message_requires_all_fields() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/contact",
            &json!({"name": "Asha", "email": "asha@example.com", "subject": "Hi"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "All fields are required");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/contact",
            &json!({
                "name": "Asha",
                "email": "asha@example.com",
                "subject": "Grooming",
                "message": "Do you groom cats?",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["message"], "Message sent successfully");
}

#[tokio::test]
async fn test_messages_require_admin() {
    let app = spawn_app().await;

    let response = app.oneshot(get("/api/messages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Admin access required");
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/appointment")
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON format")
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = spawn_app().await;

    let response = app.oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "error": "Not found"})
    );
}
