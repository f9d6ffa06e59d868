//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use gsig_api::{ApiClient, ApiError, DealKind, LeadQuery, Priority};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(backend_url: &str) -> ApiClient {
    ApiClient::new(backend_url, 30).expect("client construction should not fail")
}

#[tokio::test]
async fn get_leads_sends_filters_and_parses_envelope() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "leads": [
            {
                "id": "lead-1",
                "company": "CloudSync",
                "name": "Alex Chen",
                "role": "CEO",
                "geography": "Austin, TX, USA",
                "priority": "High",
                "score": 9.1,
                "intent_signals": [
                    {
                        "signal": "CRO Hiring Urgency",
                        "confidence": 0.88,
                        "reasoning": "Posted multiple CRO job listings"
                    }
                ],
                "social_content": "Looking for a world-class CRO",
                "twitter_handle": "@alexchen_ceo",
                "linkedin_url": "https://linkedin.com/in/alexchen-founder"
            }
        ],
        "total": 1
    });

    Mock::given(method("GET"))
        .and(path("/api/leads"))
        .and(query_param("role", "CEO"))
        .and(query_param("priority", "High"))
        .and(query_param("min_score", "7"))
        .and(query_param("context", "gpu startups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let query = LeadQuery {
        role: Some("CEO".to_string()),
        priority: Some(Priority::High),
        min_score: Some(7.0),
        context: Some("gpu startups".to_string()),
        ..LeadQuery::default()
    };
    let leads = client.get_leads(&query).await.expect("should parse leads");

    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].company, "CloudSync");
    assert_eq!(leads[0].priority, Priority::High);
    assert_eq!(leads[0].intent_signals.len(), 1);
    assert_eq!(leads[0].intent_signals[0].signal, "CRO Hiring Urgency");
}

#[tokio::test]
async fn get_leads_missing_field_yields_empty_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"total": 0})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let leads = client.get_leads(&LeadQuery::default()).await.unwrap();
    assert!(leads.is_empty());
}

#[tokio::test]
async fn get_cached_tweets_parses_nested_analysis() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "tweets": [
            {
                "id": "t-1",
                "tweet_id": "1935409307442426011",
                "content": "Just hired our first VP of Sales!",
                "author_name": "Alex Chen",
                "author_handle": "@alexchen_ceo",
                "engagement_metrics": {"like_count": 245, "retweet_count": 67, "reply_count": 34},
                "relevance_score": 9.2,
                "intent_analysis": {
                    "intent_signals": [
                        {"signal": "VP Sales Hiring", "confidence": 0.95, "reasoning": "Explicit"}
                    ],
                    "priority": "High",
                    "score": 9.2,
                    "relevance_score": 9.2
                }
            }
        ],
        "total": 1
    });

    Mock::given(method("GET"))
        .and(path("/api/cached-tweets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tweets = client.get_cached_tweets().await.unwrap();

    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0].engagement_metrics.like_count, 245);
    let analysis = tweets[0].intent_analysis.as_ref().unwrap();
    assert_eq!(analysis.intent_signals[0].signal, "VP Sales Hiring");
    assert_eq!(analysis.priority, Priority::High);
}

#[tokio::test]
async fn get_live_tweets_sends_search_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/live-tweets"))
        .and(query_param("search_context", "fintech CTOs"))
        .and(query_param("ai_keywords", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"tweets": []})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tweets = client
        .get_live_tweets(Some("fintech CTOs"), true)
        .await
        .unwrap();
    assert!(tweets.is_empty());
}

#[tokio::test]
async fn get_deals_parses_kinds() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "deals": [
            {
                "type": "M&A",
                "amount": "$120M",
                "title": "CloudStrike Acquires SalesBoost",
                "description": "Strategic acquisition",
                "company": "CloudStrike",
                "relevance_score": 9.2
            },
            {
                "type": "Financing",
                "amount": "$25M",
                "title": "ScalePath Raises Series B",
                "description": "Funding round",
                "company": "ScalePath",
                "relevance_score": 8.9
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/deals"))
        .and(query_param("context", "revops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let deals = client.get_deals(Some("revops")).await.unwrap();

    assert_eq!(deals.len(), 2);
    assert_eq!(deals[0].kind, DealKind::MergersAndAcquisitions);
    assert_eq!(deals[1].kind, DealKind::Financing);
}

#[tokio::test]
async fn get_stats_parses_flat_object() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "total_leads": 10,
        "high_priority_leads": 4,
        "new_leads_today": 3,
        "avg_lead_score": 8.2,
        "total_signals_detected": 45,
        "active_campaigns": 8
    });

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stats = client.get_stats().await.unwrap();

    assert_eq!(stats.total_leads, 10);
    assert_eq!(stats.high_priority_leads, 4);
    assert!((stats.avg_lead_score - 8.2).abs() < f64::EPSILON);
}

#[tokio::test]
async fn analyze_content_posts_body_and_parses_outcome() {
    let server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "content": "founders scaling GPU infrastructure",
        "company_context": "B2B growth consulting"
    });
    let response = serde_json::json!({
        "intent_signals": [
            {"signal": "Sales Team Scaling", "confidence": 0.75, "reasoning": "Scaling keywords"}
        ],
        "priority": "High",
        "score": 8,
        "relevance_score": 8
    });

    Mock::given(method("POST"))
        .and(path("/api/analyze-content"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = client
        .analyze_content(
            "founders scaling GPU infrastructure",
            Some("B2B growth consulting"),
        )
        .await
        .unwrap();

    assert_eq!(outcome.intent_signals.len(), 1);
    assert_eq!(outcome.priority, Priority::High);
}

#[tokio::test]
async fn server_error_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/market-data"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_market_data().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
}

#[tokio::test]
async fn malformed_body_surfaces_as_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Deserialize { .. }));
}
