//! HTTP-level tests for animal registration, weighings, moves and sales.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_ok, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration and listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_registered_animal_is_listed_once(pool: PgPool) {
    let app = build_test_app(pool);

    let animal = create_ok(
        app.clone(),
        "/api/nuevo_animal",
        json!({"caravana": "BF-101", "categoria": "Vaca", "peso_inicial": "450"}),
    )
    .await;
    assert_eq!(animal["peso_actual"], 450.0);
    assert_eq!(animal["raza"], "Braford");
    assert_eq!(animal["estado_reproductivo"], "VACIA");

    let json = body_json(get(app, "/api/animales").await).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["caravana"], "BF-101");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_legacy_module_names_reach_animals(pool: PgPool) {
    let app = build_test_app(pool);

    create_ok(app.clone(), "/api/ganaderia", json!({"caravana": "BF-102"})).await;

    let json = body_json(get(app, "/api/ganaderia").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_caravana_is_a_conflict(pool: PgPool) {
    let app = build_test_app(pool);
    create_ok(app.clone(), "/api/animales", json!({"caravana": "BF-101"})).await;

    let response = post_json(app, "/api/animales", json!({"caravana": "BF-101"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_input_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let missing = post_json(app.clone(), "/api/nuevo_animal", json!({"categoria": "Toro"})).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(missing).await["code"], "VALIDATION_ERROR");

    let bad_weight = post_json(
        app.clone(),
        "/api/nuevo_animal",
        json!({"caravana": "BF-103", "peso": "pesado"}),
    )
    .await;
    assert_eq!(bad_weight.status(), StatusCode::BAD_REQUEST);

    let bad_date = post_json(
        app,
        "/api/nuevo_animal",
        json!({"caravana": "BF-104", "fecha": "ayer"}),
    )
    .await;
    assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_parcel_reference_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/nuevo_animal",
        json!({"caravana": "BF-105", "lote_id": 999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");
}

// ---------------------------------------------------------------------------
// Weighings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_weighings_drive_daily_gain(pool: PgPool) {
    let app = build_test_app(pool);
    let animal = create_ok(
        app.clone(),
        "/api/nuevo_animal",
        json!({"caravana": "BF-101", "peso": 400, "fecha": "2024-01-01"}),
    )
    .await;
    let id = animal["id"].as_i64().unwrap();

    create_ok(
        app.clone(),
        "/api/nuevo_pesaje",
        json!({"animal_id": id, "kilos": "430", "fecha": "2024-01-31"}),
    )
    .await;

    let json = body_json(get(app, "/api/animales").await).await;
    let row = &json["data"][0];
    assert_eq!(row["peso_actual"], 430.0);
    assert_eq!(row["gdp"], 1.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_weighing_unknown_animal_is_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/nuevo_pesaje",
        json!({"animal_id": 77, "kilos": 300}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_weighings_cannot_be_edited(pool: PgPool) {
    let app = build_test_app(pool);
    let animal = create_ok(app.clone(), "/api/animales", json!({"caravana": "BF-101"})).await;
    let pesaje = create_ok(
        app.clone(),
        "/api/nuevo_pesaje",
        json!({"animal_id": animal["id"], "kilos": 300}),
    )
    .await;

    let uri = format!("/api/pesajes/{}", pesaje["id"]);
    let response = put_json(app.clone(), &uri, json!({"kilos": 310})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = delete(app, &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Edits, moves and deactivation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_edit_and_move_between_parcels(pool: PgPool) {
    let app = build_test_app(pool);
    let norte = create_ok(app.clone(), "/api/lotes", json!({"nombre": "Norte"})).await;
    let sur = create_ok(app.clone(), "/api/lotes", json!({"nombre": "Sur"})).await;
    let a = create_ok(
        app.clone(),
        "/api/animales",
        json!({"caravana": "A-1", "lote_id": norte["id"]}),
    )
    .await;
    let b = create_ok(app.clone(), "/api/animales", json!({"caravana": "A-2"})).await;

    let response = post_json(
        app.clone(),
        "/api/mover_hacienda",
        json!({"animal_ids": [a["id"], b["id"].to_string()], "lote_id": sur["id"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["movidos"], 2);

    let uri = format!("/api/ganaderia/{}", a["id"]);
    let response = put_json(
        app.clone(),
        &uri,
        json!({"categoria": "Vaquillona", "lote_id": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["categoria"], "Vaquillona");
    assert!(updated["data"]["lote_actual_id"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_move_to_unknown_parcel_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let a = create_ok(app.clone(), "/api/animales", json!({"caravana": "A-1"})).await;

    let response = post_json(
        app,
        "/api/mover_hacienda",
        json!({"animal_ids": [a["id"]], "lote_id": 999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_deactivates_and_keeps_history(pool: PgPool) {
    let app = build_test_app(pool);
    let a = create_ok(
        app.clone(),
        "/api/animales",
        json!({"caravana": "A-1", "peso": 300}),
    )
    .await;
    let uri = format!("/api/ganaderia/{}", a["id"]);

    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let active = body_json(get(app.clone(), "/api/animales").await).await;
    assert!(active["data"].as_array().unwrap().is_empty());

    let all = body_json(get(app.clone(), "/api/animales?include_inactive=true").await).await;
    assert_eq!(all["data"][0]["activo"], false);

    let uri = format!("/api/detalle_animal/{}", a["id"]);
    let detail = body_json(get(app.clone(), &uri).await).await;
    assert_eq!(detail["data"]["pesajes"].as_array().unwrap().len(), 1);

    let again = delete(app, &uri).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_of_unknown_animal_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/detalle_animal/12345").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sale_removes_animal_from_active_count(pool: PgPool) {
    let app = build_test_app(pool);
    let a = create_ok(
        app.clone(),
        "/api/animales",
        json!({"caravana": "A-1", "peso": 480}),
    )
    .await;
    create_ok(app.clone(), "/api/animales", json!({"caravana": "A-2"})).await;
    create_ok(
        app.clone(),
        "/api/nuevo_gasto",
        json!({"concepto": "Vacuna", "monto": 250, "animal_id": a["id"]}),
    )
    .await;

    let before = body_json(get(app.clone(), "/api/resumen").await).await;
    assert_eq!(before["data"]["animales_activos"], 2);

    let venta = create_ok(
        app.clone(),
        "/api/registrar_venta",
        json!({"animal_id": a["id"], "comprador": "Frigorífico", "precio": "900000"}),
    )
    .await;
    assert_eq!(venta["costo_historico"], 250.0);
    assert_eq!(venta["kilos_vendidos"], 480.0);

    let after = body_json(get(app.clone(), "/api/resumen").await).await;
    assert_eq!(after["data"]["animales_activos"], 1);
    assert_eq!(after["data"]["animales_vendidos_mes"], 1);

    let detail = body_json(get(app, &format!("/api/detalle_animal/{}", a["id"])).await).await;
    assert_eq!(detail["data"]["gastos"].as_array().unwrap().len(), 1);
    assert_eq!(detail["data"]["venta"]["comprador"], "Frigorífico");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_selling_twice_is_409(pool: PgPool) {
    let app = build_test_app(pool);
    let a = create_ok(app.clone(), "/api/animales", json!({"caravana": "A-1"})).await;
    let body = json!({"animal_id": a["id"], "precio": 1000});

    create_ok(app.clone(), "/api/registrar_venta", body.clone()).await;
    let response = post_json(app, "/api/registrar_venta", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_animal_in_withdrawal_period_cannot_be_sold(pool: PgPool) {
    let app = build_test_app(pool);
    let a = create_ok(
        app.clone(),
        "/api/animales",
        json!({"caravana": "A-1", "peso": 420, "fecha_carencia": "2099-01-01"}),
    )
    .await;
    assert!(a["fecha_carencia"].as_str().unwrap().starts_with("2099-01-01"));
    let body = json!({"animal_id": a["id"], "precio": 1000});

    let response = post_json(app.clone(), "/api/registrar_venta", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let resumen = body_json(get(app.clone(), "/api/resumen").await).await;
    assert_eq!(resumen["data"]["animales_activos"], 1);

    let uri = format!("/api/animales/{}", a["id"]);
    let response = put_json(app.clone(), &uri, json!({"categoria": "Novillo"})).await;
    assert!(body_json(response).await["data"]["fecha_carencia"].is_string());
    let response = put_json(app.clone(), &uri, json!({"fecha_carencia": null})).await;
    assert!(body_json(response).await["data"]["fecha_carencia"].is_null());

    create_ok(app, "/api/registrar_venta", body).await;
}
