//! End-to-end tests of the HTTP API against a running worker pool.
use std::{collections::HashSet, sync::Arc};

use actix_web::{http::StatusCode, middleware::from_fn, test, web, App};
use futures::future::join_all;
use job_queue_server::{
    api::routes::configure_routes,
    jobs::{GreetingHandler, OverflowPolicy, Queue, QueueConfig, WorkerPool},
    metrics::{metrics_middleware::track_request_metrics, REQUEST_COUNTER},
    models::DefaultAppState,
};

fn start_server_state(queue_config: QueueConfig, workers: usize) -> (DefaultAppState, WorkerPool) {
    let queue = Arc::new(Queue::new(queue_config));
    let pool = WorkerPool::start(workers, queue.clone(), Arc::new(GreetingHandler)).unwrap();
    (DefaultAppState::new(queue), pool)
}

#[actix_web::test]
async fn test_add_job_round_trip() {
    let (state, pool) = start_server_state(QueueConfig::unbounded(), 4);
    let app = test::init_service(
        App::new()
            .app_data(web::ThinData(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/addJob?Name=World")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "Hello, World");

    let req = test::TestRequest::get().uri("/addJob?Name=").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        test::read_body(resp).await,
        "Name parameter is missing or empty"
    );

    pool.shutdown();
}

#[actix_web::test]
async fn test_concurrent_requests_get_their_own_responses() {
    let (state, pool) = start_server_state(QueueConfig::unbounded(), 4);
    let app = test::init_service(
        App::new()
            .app_data(web::ThinData(state))
            .configure(configure_routes),
    )
    .await;

    let requests = (0..200).map(|i| {
        let app = &app;
        async move {
            let req = test::TestRequest::get()
                .uri(&format!("/addJob?Name=client-{i}"))
                .to_request();
            let body = test::call_and_read_body(app, req).await;
            (i, String::from_utf8(body.to_vec()).unwrap())
        }
    });

    let responses = join_all(requests).await;
    let mut seen = HashSet::new();
    for (i, body) in responses {
        assert_eq!(body, format!("Hello, client-{i}"));
        assert!(seen.insert(body));
    }
    assert_eq!(seen.len(), 200);

    pool.shutdown();
}

#[actix_web::test]
async fn test_health_ready_and_metrics() {
    let (state, pool) = start_server_state(
        QueueConfig::bounded(16, OverflowPolicy::Reject),
        1,
    );
    let app = test::init_service(
        App::new()
            .app_data(web::ThinData(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_and_read_body(&app, req).await, "OK");

    let req = test::TestRequest::get().uri("/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/addJob?Name=Metrics")
        .to_request();
    assert_eq!(test::call_and_read_body(&app, req).await, "Hello, Metrics");

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("jobs_enqueued_total"));
    assert!(text.contains("jobs_processed_total"));

    pool.shutdown();
}

#[actix_web::test]
async fn test_requests_refused_after_shutdown() {
    let (state, pool) = start_server_state(QueueConfig::unbounded(), 2);
    let app = test::init_service(
        App::new()
            .app_data(web::ThinData(state))
            .configure(configure_routes),
    )
    .await;

    pool.shutdown();

    let req = test::TestRequest::get()
        .uri("/addJob?Name=Late")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let req = test::TestRequest::get().uri("/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_repeated_name_resolves_to_first_value() {
    let (state, pool) = start_server_state(QueueConfig::unbounded(), 2);
    let app = test::init_service(
        App::new()
            .app_data(web::ThinData(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/addJob?Name=A&Name=B")
        .to_request();
    assert_eq!(test::call_and_read_body(&app, req).await, "Hello, A");

    let req = test::TestRequest::get()
        .uri("/addJob?Name=&Name=B")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    pool.shutdown();
}

#[actix_web::test]
async fn test_request_metrics_record_worker_and_refusal_statuses() {
    let (state, pool) = start_server_state(QueueConfig::unbounded(), 1);
    let app = test::init_service(
        App::new()
            .wrap(from_fn(track_request_metrics))
            .app_data(web::ThinData(state))
            .configure(configure_routes),
    )
    .await;
    let count = |status: &str| REQUEST_COUNTER.with_label_values(&["/addJob", status]).get();
    let (ok_before, bad_before, refused_before) = (count("200"), count("400"), count("503"));

    let req = test::TestRequest::get().uri("/addJob?Name=Counted").to_request();
    assert_eq!(test::call_and_read_body(&app, req).await, "Hello, Counted");

    // the 400 is written by the worker, not the handler
    let req = test::TestRequest::get().uri("/addJob").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    pool.shutdown();
    let req = test::TestRequest::get().uri("/addJob?Name=Late").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    assert_eq!(count("200"), ok_before + 1.0);
    assert_eq!(count("400"), bad_before + 1.0);
    assert_eq!(count("503"), refused_before + 1.0);
}
