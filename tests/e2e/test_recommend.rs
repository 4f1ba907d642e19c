use crate::e2e::helpers;

use category_recommender::infrastructure::marketplace::{
    CATEGORY_RECOMMEND_PATH, GET_CATEGORY_PATH,
};
use helpers::fixtures::TEST_PARTNER_ID;
use helpers::partner_api::category;
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;

const RECOMMEND_PATH: &str = "/api/category/recommend";

async fn seed_shoes_and_bags(ctx: &TestContext) {
    ctx.fixtures.create_account(1, 42).await.unwrap();
    ctx.partner
        .set_taxonomy(json!([category(10, "Shoes"), category(20, "Bags")]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_recommend_category_resolved_against_taxonomy(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation(&[10]);

    let response = ctx
        .client
        .post(
            RECOMMEND_PATH,
            &json!({ "title": "Tenis de corrida", "account_id": 1 }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: Value = response.json().unwrap();
    assert_eq!(body["title"], "Tenis de corrida");
    assert_eq!(body["category_id"], 10);
    assert!(body["id"].as_i64().is_some());
    assert!(body["requested_at"].as_str().is_some());

    let recommended = body["recommended_categories"].as_array().unwrap();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0]["category_id"], 10);
    assert_eq!(recommended[0]["display_name"], "Shoes");

    let history = ctx.fixtures.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].title, "Tenis de corrida");
    assert_eq!(history[0].category_id, Some(10));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_signed_requests_to_partner_api(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation(&[10]);

    ctx.client
        .post(
            RECOMMEND_PATH,
            &json!({ "title": "Tenis de corrida", "account_id": 1 }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let recommend_calls = ctx.partner.calls_to(CATEGORY_RECOMMEND_PATH);
    assert_eq!(recommend_calls.len(), 1);
    let call = &recommend_calls[0];
    assert_eq!(call.param("item_name"), Some("Tenis de corrida"));
    assert_eq!(call.param("shop_id"), Some("42"));
    assert_eq!(
        call.param("partner_id"),
        Some(TEST_PARTNER_ID.to_string().as_str())
    );
    assert!(call.param("access_token").is_some());
    assert!(call
        .param("timestamp")
        .and_then(|ts| ts.parse::<i64>().ok())
        .is_some());

    let sign = call.param("sign").unwrap();
    assert_eq!(sign.len(), 64);
    assert!(sign.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let taxonomy_calls = ctx.partner.calls_to(GET_CATEGORY_PATH);
    assert_eq!(taxonomy_calls.len(), 1);
    assert_eq!(taxonomy_calls[0].param("language"), Some("pt-br"));
    assert_ne!(taxonomy_calls[0].param("sign"), Some(sign));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_record_history_without_category_when_nothing_is_suggested(
    ctx: &TestContext,
) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation(&[]);

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Mystery item", "account_id": 1 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: Value = response.json().unwrap();
    assert_eq!(body["category_id"], Value::Null);
    assert_eq!(body["recommended_categories"], json!([]));

    // No suggestions, no taxonomy lookup
    assert!(ctx.partner.calls_to(GET_CATEGORY_PATH).is_empty());

    let history = ctx.fixtures.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].category_id, None);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_suggestions_missing_from_taxonomy(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation(&[20, 999, 10]);

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Leather bag", "account_id": 1 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: Value = response.json().unwrap();
    assert_eq!(body["category_id"], 20);

    let ids: Vec<i64> = body["recommended_categories"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["category_id"].as_i64())
        .collect();
    assert_eq!(ids, vec![20, 10]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_primary_suggestion_unknown_to_taxonomy(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation(&[999]);

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Odd item", "account_id": 1 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: Value = response.json().unwrap();
    assert_eq!(body["category_id"], 999);
    assert_eq!(body["recommended_categories"], json!([]));
    assert_eq!(ctx.fixtures.history().await.unwrap()[0].category_id, Some(999));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_degrade_when_partner_reports_an_error(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation_reply(
        200,
        json!({ "error": "error_auth", "message": "Invalid access_token." }),
    );

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Tenis", "account_id": 1 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: Value = response.json().unwrap();
    assert_eq!(body["category_id"], Value::Null);
    assert_eq!(body["recommended_categories"], json!([]));
    assert_eq!(ctx.fixtures.history().await.unwrap().len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_degrade_when_partner_fails_with_server_error(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner
        .set_recommendation_reply(500, json!({ "error": "internal", "message": "boom" }));

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Tenis", "account_id": 1 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: Value = response.json().unwrap();
    assert_eq!(body["category_id"], Value::Null);
    // Server errors are not retried
    assert_eq!(ctx.partner.calls_to(CATEGORY_RECOMMEND_PATH).len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_suggestions_without_enrichment_when_taxonomy_is_unavailable(
    ctx: &TestContext,
) {
    ctx.fixtures.create_account(1, 42).await.unwrap();
    ctx.partner
        .set_taxonomy_reply(403, json!({ "error": "error_permission", "message": "no" }));
    ctx.partner.set_recommendation(&[10]);

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Tenis", "account_id": 1 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: Value = response.json().unwrap();
    assert_eq!(body["category_id"], 10);
    assert_eq!(body["recommended_categories"], json!([]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reuse_cached_taxonomy_across_requests(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation(&[10]);

    for title in ["Tenis", "Sapato", "Chinelo"] {
        ctx.client
            .post(RECOMMEND_PATH, &json!({ "title": title, "account_id": 1 }))
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    assert_eq!(ctx.partner.calls_to(CATEGORY_RECOMMEND_PATH).len(), 3);
    assert_eq!(ctx.partner.calls_to(GET_CATEGORY_PATH).len(), 1);
    assert_eq!(ctx.fixtures.history().await.unwrap().len(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fetch_taxonomy_in_requested_language(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation(&[10]);

    ctx.client
        .post(
            RECOMMEND_PATH,
            &json!({ "title": "Running shoes", "account_id": 1, "language": "en" }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let taxonomy_calls = ctx.partner.calls_to(GET_CATEGORY_PATH);
    assert_eq!(taxonomy_calls.len(), 1);
    assert_eq!(taxonomy_calls[0].param("language"), Some("en"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_title(ctx: &TestContext) {
    ctx.fixtures.create_account(1, 42).await.unwrap();

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "account_id": 1 }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("required");

    assert_eq!(ctx.partner.call_count(), 0);
    assert!(ctx.fixtures.history().await.unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_title(ctx: &TestContext) {
    ctx.fixtures.create_account(1, 42).await.unwrap();

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "   ", "account_id": 1 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.partner.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_account_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Tenis" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("account_id");

    assert_eq!(ctx.partner.call_count(), 0);
    assert!(ctx.fixtures.history().await.unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_title_longer_than_history_column(ctx: &TestContext) {
    ctx.fixtures.create_account(1, 42).await.unwrap();

    let response = ctx
        .client
        .post(
            RECOMMEND_PATH,
            &json!({ "title": "a".repeat(256), "account_id": 1 }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("255");

    assert_eq!(ctx.partner.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json_body(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw(RECOMMEND_PATH, "{not json")
        .await
        .unwrap();

    assert!(
        response.status.is_client_error(),
        "Expected client error but got {}",
        response.status
    );
    assert_eq!(ctx.partner.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_account(ctx: &TestContext) {
    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Tenis", "account_id": 404 }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("404");

    assert_eq!(ctx.partner.call_count(), 0);
    assert!(ctx.fixtures.history().await.unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_after_persistent_rate_limiting(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation(&[10]);
    ctx.partner.throttle(u32::MAX);

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Tenis", "account_id": 1 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    // Three attempts, then give up before persisting anything
    assert_eq!(ctx.partner.calls_to(CATEGORY_RECOMMEND_PATH).len(), 3);
    assert!(ctx.fixtures.history().await.unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_recover_from_transient_rate_limiting(ctx: &TestContext) {
    seed_shoes_and_bags(ctx).await;
    ctx.partner.set_recommendation(&[10]);
    ctx.partner.throttle(2);

    let response = ctx
        .client
        .post(RECOMMEND_PATH, &json!({ "title": "Tenis", "account_id": 1 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: Value = response.json().unwrap();
    assert_eq!(body["category_id"], 10);
    assert_eq!(ctx.partner.calls_to(CATEGORY_RECOMMEND_PATH).len(), 3);
}
