//! HTTP-level tests for reproductive events and the protocol/genetics catalogs.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_ok, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_palpation_result_sets_status(pool: PgPool) {
    let app = build_test_app(pool);
    let vaca = create_ok(app.clone(), "/api/animales", json!({"caravana": "V-1"})).await;
    let otra = create_ok(app.clone(), "/api/animales", json!({"caravana": "V-2"})).await;

    let recorded = create_ok(
        app.clone(),
        "/api/nuevo_evento_reproductivo",
        json!({
            "animal_id": vaca["id"],
            "tipo": "tacto",
            "detalle": "Resultado positivo, 60 días"
        }),
    )
    .await;
    assert_eq!(recorded["animal"]["estado_reproductivo"], "PREÑADA");
    assert_eq!(recorded["evento"]["tipo"], "TACTO");

    let recorded = create_ok(
        app,
        "/api/nuevo_evento_reproductivo",
        json!({"animal_id": otra["id"], "tipo": "TACTO", "resultado": "vacía"}),
    )
    .await;
    assert_eq!(recorded["animal"]["estado_reproductivo"], "VACIA");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_birth_registers_calf(pool: PgPool) {
    let app = build_test_app(pool);
    let lote = create_ok(app.clone(), "/api/lotes", json!({"nombre": "Norte"})).await;
    let vaca = create_ok(
        app.clone(),
        "/api/animales",
        json!({"caravana": "V-1", "lote_id": lote["id"], "estado_reproductivo": "PREÑADA"}),
    )
    .await;

    let recorded = create_ok(
        app.clone(),
        "/api/nuevo_evento_reproductivo",
        json!({"animal_id": vaca["id"], "tipo": "PARTO"}),
    )
    .await;
    assert_eq!(recorded["animal"]["estado_reproductivo"], "PARIDA");
    let cria = &recorded["cria"];
    assert_eq!(cria["madre_id"], vaca["id"]);
    assert_eq!(cria["lote_actual_id"], lote["id"]);
    assert_eq!(recorded["evento"]["cria_id"], cria["id"]);

    let json = body_json(get(app, "/api/animales").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_birth_without_calf_when_requested(pool: PgPool) {
    let app = build_test_app(pool);
    let vaca = create_ok(app.clone(), "/api/animales", json!({"caravana": "V-1"})).await;

    let recorded = create_ok(
        app.clone(),
        "/api/nuevo_evento_reproductivo",
        json!({"animal_id": vaca["id"], "tipo": "PARTO", "crear_cria": false}),
    )
    .await;
    assert!(recorded["cria"].is_null());

    let json = body_json(get(app, "/api/animales").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_protocol_cost_is_booked_as_expense(pool: PgPool) {
    let app = build_test_app(pool);
    let protocolo = create_ok(
        app.clone(),
        "/api/protocolos",
        json!({"nombre": "IATF", "costo": "1500"}),
    )
    .await;
    let semen = create_ok(
        app.clone(),
        "/api/insumos_geneticos",
        json!({"nombre": "Toro Angus 123", "precio": 800}),
    )
    .await;
    let vaca = create_ok(app.clone(), "/api/animales", json!({"caravana": "V-1"})).await;

    let recorded = create_ok(
        app.clone(),
        "/api/nuevo_evento_reproductivo",
        json!({
            "animal_id": vaca["id"],
            "tipo": "INSEMINACION",
            "protocolo_id": protocolo["id"],
            "insumo_id": semen["id"]
        }),
    )
    .await;
    assert_eq!(recorded["evento"]["costo"], 2300.0);
    assert_eq!(recorded["animal"]["estado_reproductivo"], "INSEMINADA");

    let gastos = body_json(get(app.clone(), "/api/gastos").await).await;
    let rows = gastos["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["monto"], 2300.0);
    assert_eq!(rows[0]["categoria"], "REPRODUCCION");
    assert_eq!(rows[0]["animal_id"], vaca["id"]);

    let animales = body_json(get(app, "/api/animales").await).await;
    assert_eq!(animales["data"][0]["costo_acumulado"], 2300.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_event_type_is_400(pool: PgPool) {
    let app = build_test_app(pool);
    let vaca = create_ok(app.clone(), "/api/animales", json!({"caravana": "V-1"})).await;

    let response = post_json(
        app,
        "/api/nuevo_evento_reproductivo",
        json!({"animal_id": vaca["id"], "tipo": "ECOGRAFIA"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_bulk_event_applies_to_parcel(pool: PgPool) {
    let app = build_test_app(pool);
    let lote = create_ok(app.clone(), "/api/lotes", json!({"nombre": "Rodeo"})).await;
    for caravana in ["V-1", "V-2", "V-3"] {
        create_ok(
            app.clone(),
            "/api/animales",
            json!({"caravana": caravana, "lote_id": lote["id"]}),
        )
        .await;
    }
    create_ok(app.clone(), "/api/animales", json!({"caravana": "AFUERA"})).await;

    let response = post_json(
        app.clone(),
        "/api/evento_reproductivo_masivo",
        json!({"objetivo": "LOTE", "lote_id": lote["id"], "tipo": "INSEMINACION"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let recorded = json["data"].as_array().unwrap();
    assert_eq!(recorded.len(), 3);
    assert!(recorded
        .iter()
        .all(|r| r["animal"]["estado_reproductivo"] == "INSEMINADA"));

    let eventos = body_json(get(app, "/api/eventos_reproductivos").await).await;
    assert_eq!(eventos["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_bulk_event_with_empty_selection_is_400(pool: PgPool) {
    let app = build_test_app(pool);
    let lote = create_ok(app.clone(), "/api/lotes", json!({"nombre": "Vacío"})).await;

    let response = post_json(
        app.clone(),
        "/api/evento_reproductivo_masivo",
        json!({"objetivo": "LOTE", "lote_id": lote["id"], "tipo": "TACTO"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        "/api/evento_reproductivo_masivo",
        json!({"objetivo": "LOTE", "tipo": "TACTO"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let eventos = body_json(get(app, "/api/eventos_reproductivos").await).await;
    assert!(eventos["data"].as_array().unwrap().is_empty());
}
