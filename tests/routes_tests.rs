use community_dashboard::models::{DebtorDataset, DebtorRecord, MonthlyRecord};
use community_dashboard::routes::routes;
use community_dashboard::services::dashboard::{DashboardConfig, DashboardState};
use community_dashboard::services::loader::Snapshot;
use community_dashboard::services::store::RecordStore;
use community_dashboard::services::tables::DebtorState;
use serde_json::Value;
use std::sync::Arc;

fn month(label: &str, collected: f64) -> MonthlyRecord {
    serde_json::from_value(serde_json::json!({
        "month": label,
        "bank_balance": 2500.0,
        "fees_issued": 1000.0,
        "fees_collected": collected,
        "expenses_total": 300.0,
    }))
    .unwrap()
}

fn state(records: Vec<MonthlyRecord>, debtors: DebtorState) -> Arc<DashboardState> {
    Arc::new(DashboardState {
        snapshot: Snapshot {
            store: RecordStore::new(records),
            debtors,
        },
        config: DashboardConfig::default(),
    })
}

fn sample() -> Arc<DashboardState> {
    let debtors = DebtorDataset {
        updated_at: "2024-03-01".into(),
        debtors: vec![DebtorRecord {
            code: "5A".into(),
            amount_eur: 150.0,
            start: "2024-01".into(),
            note: String::new(),
        }],
        total_amount_eur: None,
    };
    state(
        vec![month("2024-01", 600.0), month("2024-02", 750.0), month("2024-03", 900.0)],
        DebtorState::Available(debtors),
    )
}

fn body(res: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

#[tokio::test]
async fn dashboard_defaults_to_latest_month() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/dashboard")
        .reply(&routes(sample()))
        .await;
    assert_eq!(res.status(), 200);
    let json = body(&res);
    assert_eq!(json["texts"]["selected-month"], "2024-03");
    assert_eq!(json["texts"]["kpi-ratio"], "90.0 %");
    assert_eq!(json["texts"]["kpi-ratio-prev"], "75.0 %");
    assert_eq!(json["tables"]["debtors"]["rows"][0][0], "5A");
}

#[tokio::test]
async fn selection_by_index_and_label_agree() {
    let api = routes(sample());
    let by_index = warp::test::request().path("/api/v1/dashboard/1").reply(&api).await;
    let by_label = warp::test::request().path("/api/v1/dashboard/month?label=2024-02").reply(&api).await;
    assert_eq!(by_index.status(), 200);
    assert_eq!(body(&by_index), body(&by_label));
}

#[tokio::test]
async fn out_of_range_selection_is_not_found() {
    let api = routes(sample());
    let res = warp::test::request().path("/api/v1/dashboard/3").reply(&api).await;
    assert_eq!(res.status(), 404);
    assert!(body(&res)["error"].as_str().unwrap().contains("outside"));

    let res = warp::test::request().path("/api/v1/dashboard/month?label=1999-01").reply(&api).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn kpis_are_full_precision() {
    let res = warp::test::request()
        .path("/api/v1/kpis/1")
        .reply(&routes(sample()))
        .await;
    assert_eq!(res.status(), 200);
    let json = body(&res);
    assert_eq!(json["current"]["collection_ratio"], 75.0);
    assert_eq!(json["delta"]["fees_collected"], 150.0);
}

#[tokio::test]
async fn empty_snapshot_still_renders() {
    let api = routes(state(Vec::new(), DebtorState::Unavailable("offline".into())));
    let res = warp::test::request().path("/api/v1/dashboard").reply(&api).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body(&res)["texts"]["kpi-balance"], "0 €");

    let res = warp::test::request().path("/api/v1/months").reply(&api).await;
    assert_eq!(body(&res), serde_json::json!([]));
}

#[tokio::test]
async fn debtors_report_unavailability() {
    let api = routes(state(vec![month("2024-01", 10.0)], DebtorState::Unavailable("404".into())));
    let res = warp::test::request().path("/api/v1/debtors").reply(&api).await;
    assert_eq!(res.status(), 200);
    let json = body(&res);
    assert_eq!(json["available"], false);
    assert_eq!(json["reason"], "404");
}

#[tokio::test]
async fn labels_with_spaces_and_accents_are_decoded() {
    let api = routes(state(
        vec![month("Ene 2024", 500.0), month("Año 2", 700.0), month("Mar 2024", 900.0)],
        DebtorState::Unavailable("offline".into()),
    ));

    let res = warp::test::request().path("/api/v1/dashboard/month?label=Ene%202024").reply(&api).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body(&res)["texts"]["selected-month"], "Ene 2024");

    let res = warp::test::request().path("/api/v1/dashboard/month?label=A%C3%B1o%202").reply(&api).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body(&res)["texts"]["selected-month"], "Año 2");
}

#[tokio::test]
async fn month_route_without_label_is_bad_request() {
    let res = warp::test::request()
        .path("/api/v1/dashboard/month")
        .reply(&routes(sample()))
        .await;
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn wrong_method_is_method_not_allowed() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/dashboard")
        .reply(&routes(sample()))
        .await;
    assert_eq!(res.status(), 405);
    assert_eq!(body(&res)["error"], "Method Not Allowed");
}

#[tokio::test]
async fn kpis_on_empty_snapshot_are_not_found() {
    let api = routes(state(Vec::new(), DebtorState::Unavailable("offline".into())));
    let res = warp::test::request().path("/api/v1/kpis/0").reply(&api).await;
    assert_eq!(res.status(), 404);
    assert!(body(&res)["error"].as_str().unwrap().contains("outside the 0 loaded months"));
}
