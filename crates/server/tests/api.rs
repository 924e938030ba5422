use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use std::sync::Arc;

use migration::MigratorTrait;
use server::types::{
    category::CategoryGet,
    report::{CategorySummary, Summary},
};
use server::{ServerState, router};

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build().await.unwrap();

    router(ServerState {
        engine: Arc::new(engine),
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn with_body(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn category_id(app: &Router, name: &str) -> i32 {
    let response = app.clone().oneshot(get("/categories")).await.unwrap();
    let categories: Vec<CategoryGet> =
        serde_json::from_value(body_json(response).await).unwrap();
    categories
        .into_iter()
        .find_map(|category| (category.name == name).then_some(category.id))
        .expect("seeded category missing")
}

#[tokio::test]
async fn categories_crud_round_trip() {
    let app = test_router().await;

    let response = app.clone().oneshot(get("/categories")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<CategoryGet> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(listed.len(), 6);
    assert_eq!(listed[0].name, "Bills");

    let response = app
        .clone()
        .oneshot(with_body("POST", "/categories", &json!({"name": "Groceries"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Groceries");
    let id = created["id"].as_i64().unwrap();

    let uri = format!("/categories/{id}");
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = app
        .clone()
        .oneshot(with_body("PUT", &uri, &json!({"name": "Daily"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(body_json(response).await["name"], "Daily");

    let response = app.clone().oneshot(delete(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"message": format!("Category with id {id} not found")})
    );
}

#[tokio::test]
async fn category_duplicates_and_bad_names_are_rejected() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(with_body("POST", "/categories", &json!({"name": " food "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Category with name 'food' already exists"})
    );

    let response = app
        .clone()
        .oneshot(with_body("POST", "/categories", &json!({"name": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Category name is required"})
    );

    let transport = category_id(&app, "Transport").await;
    let response = app
        .clone()
        .oneshot(with_body(
            "PUT",
            &format!("/categories/{transport}"),
            &json!({"name": "FOOD"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_category_in_use_conflicts_until_expense_moves() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(with_body(
            "POST",
            "/expenses",
            &json!({"amount": 12.5, "date": "2024-05-01", "category": "Food"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let expense_id = body_json(response).await["id"].as_i64().unwrap();

    let food = category_id(&app, "Food").await;
    let response = app
        .clone()
        .oneshot(delete(&format!("/categories/{food}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Cannot delete category because it is being used by expenses"})
    );

    let response = app
        .clone()
        .oneshot(with_body(
            "PUT",
            &format!("/expenses/{expense_id}"),
            &json!({"amount": 12.5, "date": "2024-05-01", "category": "Transport"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(delete(&format!("/categories/{food}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn expense_round_trips_through_the_wire_shape() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(with_body(
            "POST",
            "/expenses",
            &json!({"amount": 12.5, "date": "2024-05-01", "category": "Food", "notes": "Lunch"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(
        created,
        json!({
            "id": id,
            "amount": 12.5,
            "date": "2024-05-01",
            "category": "Food",
            "notes": "Lunch"
        })
    );

    let response = app
        .clone()
        .oneshot(get(&format!("/expenses/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    // Notes are optional on input and serialize as an explicit null.
    let response = app
        .clone()
        .oneshot(with_body(
            "POST",
            "/expenses",
            &json!({"amount": 3.0, "date": "2024-05-02", "category": "Transport"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert!(created.as_object().unwrap().contains_key("notes"));
    assert_eq!(created["notes"], Value::Null);
}

#[tokio::test]
async fn expenses_list_newest_date_first() {
    let app = test_router().await;

    for date in ["2024-01-01", "2024-03-01", "2024-02-01"] {
        let response = app
            .clone()
            .oneshot(with_body(
                "POST",
                "/expenses",
                &json!({"amount": 1.0, "date": date, "category": "Food"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/expenses")).await.unwrap();
    let listed = body_json(response).await;
    let dates: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|expense| expense["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2024-03-01", "2024-02-01", "2024-01-01"]);
}

#[tokio::test]
async fn expense_errors_share_the_message_shape() {
    let app = test_router().await;

    let response = app.clone().oneshot(get("/expenses/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Expense with id 999 not found"})
    );

    let response = app
        .clone()
        .oneshot(with_body(
            "PUT",
            "/expenses/999",
            &json!({"amount": 1.0, "date": "2024-05-01", "category": "Food"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(delete("/expenses/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(with_body(
            "POST",
            "/expenses",
            &json!({"amount": 12.505, "date": "2024-05-01", "category": "Food"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Amount must have at most 2 decimal places"})
    );

    // Non-numeric path ids reject with the same body shape.
    let response = app.clone().oneshot(get("/expenses/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["message"].is_string());
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/categories")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["message"].is_string());

    // Missing fields name the offending field.
    let response = app
        .clone()
        .oneshot(with_body("POST", "/categories", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.contains("name"), "unexpected message: {message}");
}

#[tokio::test]
async fn reports_use_camel_case_and_exact_totals() {
    let app = test_router().await;
    let today = chrono::Utc::now().date_naive().to_string();

    let response = app
        .clone()
        .oneshot(with_body(
            "POST",
            "/expenses",
            &json!({"amount": 10.0, "date": today, "category": "Food"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = app
        .clone()
        .oneshot(with_body(
            "POST",
            "/expenses",
            &json!({"amount": 5.5, "date": "2020-01-15", "category": "Food"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.clone().oneshot(get("/reports/summary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(
        summary,
        json!({"totalExpenses": 15.5, "monthlyExpenses": 10.0, "categoryCount": 6})
    );

    let response = app
        .clone()
        .oneshot(get("/reports/category-summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rows: Vec<CategorySummary> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Food");
    assert_eq!(rows[0].count, 2);

    let summary: Summary = serde_json::from_value(summary).unwrap();
    let summed: rust_decimal::Decimal = rows.iter().map(|row| row.total).sum();
    assert_eq!(summed, summary.total_expenses);
}
