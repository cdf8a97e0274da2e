use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use calc_gateway::{App, CalcMode, CalcRequest, Config, FallbackFlow, RemoteCaller};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use tower::ServiceExt as _;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 指向 mock 服务的配置
fn config_for(base_url: &str, mode: CalcMode) -> Config {
    Config {
        mode,
        remote_timeout_secs: 1.0,
        add_service_url: format!("{}/add", base_url),
        sub_service_url: format!("{}/sub", base_url),
        mul_service_url: format!("{}/mul", base_url),
        div_service_url: format!("{}/div", base_url),
        convert_service_url: format!("{}/to-decimal", base_url),
        format_service_url: format!("{}/convert", base_url),
        ..Config::default()
    }
}

/// 没有任何服务在监听的地址
const UNREACHABLE: &str = "http://127.0.0.1:1";

async fn post_calculate(config: Config, body: Value) -> (StatusCode, Value) {
    post_raw(config, body.to_string()).await
}

async fn post_raw(config: Config, body: String) -> (StatusCode, Value) {
    let app = App::initialize(config).expect("初始化失败");

    let request = Request::builder()
        .method("POST")
        .uri("/calculate")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn json_response(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

// ========== 兜底模式 ==========

#[tokio::test]
async fn test_fallback_returns_remote_result_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add"))
        .and(body_json(json!({"a": "FF", "b": "10", "base": 16})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ZZZ"})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_calculate(
        config_for(&server.uri(), CalcMode::Fallback),
        json!({"a": "FF", "b": "10", "base": 16, "op": "sum"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "ZZZ"}));
}

#[tokio::test]
async fn test_fallback_accepts_resultado_number() {
    let server = MockServer::start().await;
    json_response(&server, "/div", 200, json!({"resultado": 4})).await;

    let (status, body) = post_calculate(
        config_for(&server.uri(), CalcMode::Fallback),
        json!({"a": "9", "b": "2", "base": 10, "op": "DIVIDE"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "4");
}

#[tokio::test]
async fn test_fallback_computes_locally_when_remote_unreachable() {
    let (status, body) = post_calculate(
        config_for(UNREACHABLE, CalcMode::Fallback),
        json!({"a": "FF", "b": "10", "base": 16, "op": "add"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "10F"}));
}

#[tokio::test]
async fn test_fallback_on_server_error() {
    let server = MockServer::start().await;
    json_response(&server, "/sub", 500, json!({"error": "boom"})).await;

    let (status, body) = post_calculate(
        config_for(&server.uri(), CalcMode::Fallback),
        json!({"a": "11", "b": "101", "base": 2, "op": "subtract"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "-10");
}

#[tokio::test]
async fn test_fallback_on_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mul"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": "never used"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = Config {
        remote_timeout_secs: 0.2,
        ..config_for(&server.uri(), CalcMode::Fallback)
    };
    let (status, body) = post_calculate(
        config,
        json!({"a": "z", "b": "z", "base": 36, "op": "mul"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 35 * 35 = 1225，36 进制为 "Y1"
    assert_eq!(body["result"], "Y1");
}

#[tokio::test]
async fn test_fallback_when_result_field_missing() {
    let server = MockServer::start().await;
    json_response(&server, "/add", 200, json!({"value": "oops"})).await;

    let (status, body) = post_calculate(
        config_for(&server.uri(), CalcMode::Fallback),
        json!({"a": "7", "b": "5", "base": 8, "op": "add"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "14");
}

#[tokio::test]
async fn test_fallback_division_by_zero_is_terminal() {
    let (status, body) = post_calculate(
        config_for(UNREACHABLE, CalcMode::Fallback),
        json!({"a": "7", "b": "0", "base": 10, "op": "div"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Division by zero");
}

#[tokio::test]
async fn test_fallback_invalid_operand_is_terminal() {
    let (status, body) = post_calculate(
        config_for(UNREACHABLE, CalcMode::Fallback),
        json!({"a": "102", "b": "1", "base": 2, "op": "add"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Invalid numbers for base 2"), "{}", detail);
}

#[tokio::test]
async fn test_unsupported_operation_makes_no_remote_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "2"})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_calculate(
        config_for(&server.uri(), CalcMode::Fallback),
        json!({"a": "1", "b": "1", "base": 10, "op": "xor"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Unsupported operation: xor");
}

#[tokio::test]
async fn test_invalid_base_is_rejected_before_remote_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "2"})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_calculate(
        config_for(&server.uri(), CalcMode::Fallback),
        json!({"a": "1", "b": "1", "base": 37, "op": "add"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "base must be between 2 and 36, got 37");
}

#[tokio::test]
async fn test_negative_base_reports_invalid_base() {
    let (status, body) = post_calculate(
        config_for(UNREACHABLE, CalcMode::Fallback),
        json!({"a": "1", "b": "1", "base": -1, "op": "add"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "base must be between 2 and 36, got -1");
}

#[tokio::test]
async fn test_malformed_bodies_get_bad_request_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "2"})))
        .expect(0)
        .mount(&server)
        .await;

    let bodies = [
        // 缺少 base
        json!({"a": "1", "b": "1", "op": "add"}).to_string(),
        // base 类型错误
        json!({"a": "1", "b": "1", "base": "ten", "op": "add"}).to_string(),
        // 操作数类型错误
        json!({"a": 1, "b": "1", "base": 10, "op": "add"}).to_string(),
        // 不是 JSON
        "a=1&b=1".to_string(),
    ];

    for raw in bodies {
        let (status, body) =
            post_raw(config_for(&server.uri(), CalcMode::Fallback), raw.clone()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", raw);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Invalid request body"), "{}", detail);
    }
}

#[tokio::test]
async fn test_fallback_handles_large_operands_locally() {
    let a = "9".repeat(5000);
    let (status, body) = post_calculate(
        config_for(UNREACHABLE, CalcMode::Fallback),
        json!({"a": a, "b": "1", "base": 10, "op": "add"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], format!("1{}", "0".repeat(5000)));
}

#[tokio::test]
async fn test_fallback_flow_directly() {
    let config = Arc::new(config_for(UNREACHABLE, CalcMode::Fallback));
    let flow = FallbackFlow::new(RemoteCaller::new(config).unwrap());

    let request = CalcRequest {
        a: "-7".to_string(),
        b: "2".to_string(),
        base: 10,
        op: "div".to_string(),
    };
    // 本地除法向零截断
    assert_eq!(assert_ok!(flow.run(&request).await), "-3");

    let request = CalcRequest {
        a: "".to_string(),
        ..request
    };
    assert_err!(flow.run(&request).await);
}

// ========== 分阶段模式 ==========

async fn mount_conversions(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/to-decimal"))
        .and(body_json(json!({"numero": "101", "base": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"numero": 5})))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/to-decimal"))
        .and(body_json(json!({"numero": "7", "base": 8})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"numero": "7"})))
        .expect(1)
        .mount(server)
        .await;
}

fn staged_request() -> Value {
    json!({
        "a": "101",
        "b": "7",
        "baseA": 2,
        "baseB": 8,
        "op": "multiply",
        "resultBase": 16
    })
}

#[tokio::test]
async fn test_staged_pipeline_success() {
    let server = MockServer::start().await;
    mount_conversions(&server).await;
    Mock::given(method("POST"))
        .and(path("/mul"))
        .and(body_json(json!({"numero_a": 5, "numero_b": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultado": 35})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/convert"))
        .and(body_json(json!({"numero": 35, "base_origen": 10, "base_destino": 16})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"numero": "23"})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) =
        post_calculate(config_for(&server.uri(), CalcMode::Staged), staged_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "23"}));
}

#[tokio::test]
async fn test_staged_operation_failure_aborts_before_formatting() {
    let server = MockServer::start().await;
    mount_conversions(&server).await;
    json_response(&server, "/mul", 503, json!({"error": "down"})).await;
    Mock::given(method("POST"))
        .and(path("/convert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"numero": "23"})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) =
        post_calculate(config_for(&server.uri(), CalcMode::Staged), staged_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("operation failed"), "{}", detail);
}

#[tokio::test]
async fn test_staged_first_conversion_failure() {
    let server = MockServer::start().await;
    json_response(&server, "/to-decimal", 500, json!({"error": "bad"})).await;
    Mock::given(method("POST"))
        .and(path("/mul"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultado": 1})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) =
        post_calculate(config_for(&server.uri(), CalcMode::Staged), staged_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(
        detail.starts_with("conversion of first operand failed"),
        "{}",
        detail
    );
}

#[tokio::test]
async fn test_staged_second_conversion_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/to-decimal"))
        .and(body_json(json!({"numero": "101", "base": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"numero": 5})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/to-decimal"))
        .and(body_json(json!({"numero": "7", "base": 8})))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"error": "bad"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/mul"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultado": 1})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) =
        post_calculate(config_for(&server.uri(), CalcMode::Staged), staged_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(
        detail.starts_with("conversion of second operand failed"),
        "{}",
        detail
    );
}

#[tokio::test]
async fn test_staged_formatting_failure() {
    let server = MockServer::start().await;
    mount_conversions(&server).await;
    json_response(&server, "/mul", 200, json!({"resultado": 35})).await;
    json_response(&server, "/convert", 500, json!({"error": "down"})).await;

    let (status, body) =
        post_calculate(config_for(&server.uri(), CalcMode::Staged), staged_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("formatting failed"), "{}", detail);
}

#[tokio::test]
async fn test_staged_non_numeric_conversion_result() {
    let server = MockServer::start().await;
    json_response(&server, "/to-decimal", 200, json!({"numero": "five"})).await;
    Mock::given(method("POST"))
        .and(path("/mul"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultado": 1})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) =
        post_calculate(config_for(&server.uri(), CalcMode::Staged), staged_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(
        detail.starts_with("conversion of first operand failed"),
        "{}",
        detail
    );
    assert!(detail.contains("invalid 'numero'"), "{}", detail);
}

#[tokio::test]
async fn test_staged_negative_result_base_is_rejected() {
    let mut request = staged_request();
    request["resultBase"] = json!(-2);

    let (status, body) = post_calculate(config_for(UNREACHABLE, CalcMode::Staged), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "base must be between 2 and 36, got -2");
}

#[tokio::test]
async fn test_staged_has_no_local_fallback() {
    let (status, body) =
        post_calculate(config_for(UNREACHABLE, CalcMode::Staged), staged_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn test_staged_unsupported_operation() {
    let mut request = staged_request();
    request["op"] = json!("pow");

    let (status, body) = post_calculate(config_for(UNREACHABLE, CalcMode::Staged), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Unsupported operation: pow");
}

// ========== 首页 ==========

#[tokio::test]
async fn test_landing_page() {
    let app = App::initialize(Config::default()).unwrap();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/calculate"));
}
