//! Integration tests for animals, weighings, sales and bulk expenses.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Registration with an initial weight records the first weighing
//! - Only the most recent weighing drives `peso_actual`
//! - The herd overview computes daily gain and accumulated cost
//! - A sale snapshots cost, deactivates the animal and keeps its history
//! - An animal inside its withdrawal period cannot be sold
//! - Bulk expenses split evenly and write nothing for an empty selection

use agronexo_core::error::CoreError;
use agronexo_core::fanout::AnimalSelector;
use agronexo_core::reproduction::DEFAULT_STATUS;
use agronexo_db::error::RepoError;
use agronexo_db::models::animal::{CreateAnimal, UpdateAnimal};
use agronexo_db::models::gasto::{BulkGasto, CreateGasto};
use agronexo_db::models::lote::CreateLote;
use agronexo_db::models::pesaje::CreatePesaje;
use agronexo_db::models::venta::CreateVenta;
use agronexo_db::repositories::{AnimalRepo, GastoRepo, LoteRepo, PesajeRepo, VentaRepo};
use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_animal(caravana: &str, lote_id: Option<i64>, peso: Option<f64>) -> CreateAnimal {
    CreateAnimal {
        caravana: caravana.to_string(),
        categoria: "Vaca".to_string(),
        raza: "Braford".to_string(),
        lote_actual_id: lote_id,
        madre_id: None,
        estado_reproductivo: DEFAULT_STATUS,
        fecha_ingreso: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        fecha_carencia: None,
        peso_inicial: peso,
    }
}

fn new_lote(nombre: &str) -> CreateLote {
    CreateLote {
        nombre: nombre.to_string(),
        cultivo: Some("Soja".to_string()),
        hectareas: 50.0,
        latitud: None,
        longitud: None,
    }
}

fn animal_expense(animal_id: i64, monto: f64) -> CreateGasto {
    CreateGasto {
        concepto: "Vacuna".to_string(),
        monto,
        categoria: "SANIDAD".to_string(),
        lote_id: None,
        animal_id: Some(animal_id),
        fecha: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Registration and weighings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_with_initial_weight_records_weighing(pool: PgPool) {
    let animal = AnimalRepo::create(&pool, &new_animal("BF-101", None, Some(450.0)))
        .await
        .unwrap();

    assert_eq!(animal.peso_actual, 450.0);
    assert!(animal.activo);
    assert_eq!(animal.estado_reproductivo, "VACIA");

    let pesajes = PesajeRepo::list_for_animal(&pool, animal.id).await.unwrap();
    assert_eq!(pesajes.len(), 1);
    assert_eq!(pesajes[0].kilos, 450.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_caravana_is_rejected(pool: PgPool) {
    AnimalRepo::create(&pool, &new_animal("BF-101", None, None))
        .await
        .unwrap();
    let err = AnimalRepo::create(&pool, &new_animal("BF-101", None, None))
        .await
        .unwrap_err();

    let constraint = err
        .as_database_error()
        .and_then(|e| e.constraint())
        .map(str::to_string);
    assert_eq!(constraint.as_deref(), Some("uq_animales_caravana"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_older_weighing_does_not_replace_current_weight(pool: PgPool) {
    let animal = AnimalRepo::create(&pool, &new_animal("BF-102", None, Some(300.0)))
        .await
        .unwrap();

    PesajeRepo::create(
        &pool,
        &CreatePesaje {
            animal_id: animal.id,
            kilos: 330.0,
            fecha: Utc.with_ymd_and_hms(2024, 5, 11, 0, 0, 0).unwrap(),
        },
    )
    .await
    .unwrap();
    PesajeRepo::create(
        &pool,
        &CreatePesaje {
            animal_id: animal.id,
            kilos: 280.0,
            fecha: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
        },
    )
    .await
    .unwrap();

    let current = AnimalRepo::find_by_id(&pool, animal.id).await.unwrap().unwrap();
    assert_eq!(current.peso_actual, 330.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_weighing_unknown_animal_is_not_found(pool: PgPool) {
    let err = PesajeRepo::create(
        &pool,
        &CreatePesaje {
            animal_id: 9999,
            kilos: 100.0,
            fecha: Utc::now(),
        },
    )
    .await
    .unwrap_err();

    assert_matches!(
        err,
        RepoError::Domain(CoreError::NotFound { entity: "Animal", id: 9999 })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_overview_computes_gain_and_cost(pool: PgPool) {
    let animal = AnimalRepo::create(&pool, &new_animal("BF-103", None, Some(300.0)))
        .await
        .unwrap();
    PesajeRepo::create(
        &pool,
        &CreatePesaje {
            animal_id: animal.id,
            kilos: 330.0,
            fecha: Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0).unwrap(),
        },
    )
    .await
    .unwrap();
    GastoRepo::create(&pool, &animal_expense(animal.id, 120.0))
        .await
        .unwrap();
    GastoRepo::create(&pool, &animal_expense(animal.id, 30.0))
        .await
        .unwrap();

    let overview = AnimalRepo::overview(&pool, animal.id).await.unwrap().unwrap();
    assert_eq!(overview.peso_actual, 330.0);
    assert_eq!(overview.gdp, 1.0);
    assert_eq!(overview.costo_acumulado, 150.0);
    assert_eq!(
        overview.ultimo_pesaje,
        Some(Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0).unwrap())
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_overview_without_weighings_has_zero_gain(pool: PgPool) {
    AnimalRepo::create(&pool, &new_animal("BF-104", None, None))
        .await
        .unwrap();

    let herd = AnimalRepo::list_overview(&pool, false).await.unwrap();
    assert_eq!(herd.len(), 1);
    assert_eq!(herd[0].gdp, 0.0);
    assert!(herd[0].ultimo_pesaje.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_can_clear_parcel(pool: PgPool) {
    let lote = LoteRepo::create(&pool, &new_lote("Lote Sur")).await.unwrap();
    let animal = AnimalRepo::create(&pool, &new_animal("BF-105", Some(lote.id), None))
        .await
        .unwrap();

    let updated = AnimalRepo::update(
        &pool,
        animal.id,
        &UpdateAnimal {
            categoria: Some("Vaquillona".to_string()),
            lote_actual_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.categoria, "Vaquillona");
    assert_eq!(updated.lote_actual_id, None);
    assert_eq!(updated.caravana, "BF-105");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivate_hides_from_default_listing(pool: PgPool) {
    let animal = AnimalRepo::create(&pool, &new_animal("BF-106", None, None))
        .await
        .unwrap();

    assert!(AnimalRepo::deactivate(&pool, animal.id).await.unwrap());
    assert!(!AnimalRepo::deactivate(&pool, animal.id).await.unwrap());

    assert!(AnimalRepo::list(&pool, false).await.unwrap().is_empty());
    assert_eq!(AnimalRepo::list(&pool, true).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_move_to_unknown_parcel_is_not_found(pool: PgPool) {
    let animal = AnimalRepo::create(&pool, &new_animal("BF-107", None, None))
        .await
        .unwrap();
    let err = AnimalRepo::move_to_lote(&pool, &[animal.id], Some(4242))
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Domain(CoreError::NotFound { entity: "Lote", .. }));
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_sale_snapshots_cost_and_keeps_history(pool: PgPool) {
    let lote = LoteRepo::create(&pool, &new_lote("Lote Este")).await.unwrap();
    let animal = AnimalRepo::create(&pool, &new_animal("BF-108", Some(lote.id), Some(420.0)))
        .await
        .unwrap();
    GastoRepo::create(&pool, &animal_expense(animal.id, 250.0))
        .await
        .unwrap();

    let venta = VentaRepo::register(
        &pool,
        &CreateVenta {
            animal_id: animal.id,
            comprador: "Frigorífico Sur".to_string(),
            kilos_vendidos: None,
            precio_total: 900_000.0,
            fecha: Utc::now(),
        },
    )
    .await
    .unwrap();

    assert_eq!(venta.costo_historico, 250.0);
    assert_eq!(venta.kilos_vendidos, 420.0);

    let sold = AnimalRepo::find_by_id(&pool, animal.id).await.unwrap().unwrap();
    assert!(!sold.activo);
    assert_eq!(sold.lote_actual_id, None);
    assert_eq!(PesajeRepo::list_for_animal(&pool, animal.id).await.unwrap().len(), 1);
    assert_eq!(GastoRepo::list_for_animal(&pool, animal.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_selling_twice_is_a_conflict(pool: PgPool) {
    let animal = AnimalRepo::create(&pool, &new_animal("BF-109", None, None))
        .await
        .unwrap();
    let venta = CreateVenta {
        animal_id: animal.id,
        comprador: "Feria".to_string(),
        kilos_vendidos: Some(380.0),
        precio_total: 500_000.0,
        fecha: Utc::now(),
    };

    VentaRepo::register(&pool, &venta).await.unwrap();
    let err = VentaRepo::register(&pool, &venta).await.unwrap_err();
    assert_matches!(err, RepoError::Domain(CoreError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_withdrawal_period_blocks_sale(pool: PgPool) {
    let mut input = new_animal("BF-110", None, Some(400.0));
    input.fecha_carencia = Some(Utc::now() + Duration::days(10));
    let animal = AnimalRepo::create(&pool, &input).await.unwrap();
    assert!(animal.fecha_carencia.is_some());

    let venta = CreateVenta {
        animal_id: animal.id,
        comprador: "Frigorífico".to_string(),
        kilos_vendidos: None,
        precio_total: 600_000.0,
        fecha: Utc::now(),
    };
    let err = VentaRepo::register(&pool, &venta).await.unwrap_err();
    assert_matches!(err, RepoError::Domain(CoreError::Conflict(msg)) if msg.contains("BF-110"));
    assert!(AnimalRepo::find_by_id(&pool, animal.id).await.unwrap().unwrap().activo);

    let cleared = AnimalRepo::update(
        &pool,
        animal.id,
        &UpdateAnimal {
            fecha_carencia: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.fecha_carencia, None);

    VentaRepo::register(&pool, &venta).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sale_after_withdrawal_period_goes_through(pool: PgPool) {
    let mut input = new_animal("BF-111", None, Some(400.0));
    input.fecha_carencia = Some(Utc::now() - Duration::days(1));
    let animal = AnimalRepo::create(&pool, &input).await.unwrap();

    let venta = VentaRepo::register(
        &pool,
        &CreateVenta {
            animal_id: animal.id,
            comprador: "Feria".to_string(),
            kilos_vendidos: None,
            precio_total: 550_000.0,
            fecha: Utc::now(),
        },
    )
    .await
    .unwrap();
    assert_eq!(venta.kilos_vendidos, 400.0);
}

// ---------------------------------------------------------------------------
// Bulk expenses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_expense_splits_across_parcel(pool: PgPool) {
    let lote = LoteRepo::create(&pool, &new_lote("Lote Oeste")).await.unwrap();
    for tag in ["BF-201", "BF-202", "BF-203", "BF-204"] {
        AnimalRepo::create(&pool, &new_animal(tag, Some(lote.id), None))
            .await
            .unwrap();
    }
    AnimalRepo::create(&pool, &new_animal("BF-205", None, None))
        .await
        .unwrap();

    let result = GastoRepo::create_bulk(
        &pool,
        &BulkGasto {
            objetivo: AnimalSelector::Lote { lote_id: lote.id },
            concepto: "Desparasitación".to_string(),
            monto_total: 1000.0,
            categoria: "SANIDAD".to_string(),
            fecha: Utc::now(),
        },
    )
    .await
    .unwrap();

    assert_eq!(result.gastos_creados, 4);
    assert_eq!(result.monto_por_animal, 250.0);
    let gastos = GastoRepo::list(&pool).await.unwrap();
    assert_eq!(gastos.len(), 4);
    assert!(gastos.iter().all(|g| g.monto == 250.0 && g.animal_id.is_some()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_expense_on_empty_selection_writes_nothing(pool: PgPool) {
    let lote = LoteRepo::create(&pool, &new_lote("Lote Vacío")).await.unwrap();
    AnimalRepo::create(&pool, &new_animal("BF-301", Some(lote.id), None))
        .await
        .unwrap();

    let err = GastoRepo::create_bulk(
        &pool,
        &BulkGasto {
            objetivo: AnimalSelector::SinLote,
            concepto: "Suplemento".to_string(),
            monto_total: 500.0,
            categoria: "ALIMENTACION".to_string(),
            fecha: Utc::now(),
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, RepoError::Domain(CoreError::Validation(_)));
    assert!(GastoRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_expense_skips_sold_animals(pool: PgPool) {
    let kept = AnimalRepo::create(&pool, &new_animal("BF-401", None, None))
        .await
        .unwrap();
    let sold = AnimalRepo::create(&pool, &new_animal("BF-402", None, None))
        .await
        .unwrap();
    AnimalRepo::deactivate(&pool, sold.id).await.unwrap();

    let result = GastoRepo::create_bulk(
        &pool,
        &BulkGasto {
            objetivo: AnimalSelector::Todos,
            concepto: "Sal mineral".to_string(),
            monto_total: 90.0,
            categoria: "ALIMENTACION".to_string(),
            fecha: Utc::now(),
        },
    )
    .await
    .unwrap();

    assert_eq!(result.animal_ids, vec![kept.id]);
    assert_eq!(result.monto_por_animal, 90.0);
}
