//! Integration tests for the supply inventory.

use agronexo_db::models::insumo::{CreateInsumo, UpdateInsumo};
use agronexo_db::repositories::InsumoRepo;
use sqlx::PgPool;

fn supply(nombre: &str, stock: f64, punto_reposicion: f64) -> CreateInsumo {
    CreateInsumo {
        nombre: nombre.to_string(),
        stock,
        unidad: "kg".to_string(),
        punto_reposicion,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_supply_crud(pool: PgPool) {
    let insumo = InsumoRepo::create(&pool, &supply("Urea", 2_000.0, 500.0))
        .await
        .unwrap();
    assert_eq!(insumo.unidad, "kg");

    let updated = InsumoRepo::update(
        &pool,
        insumo.id,
        &UpdateInsumo {
            stock: Some(350.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.stock, 350.0);
    assert_eq!(updated.nombre, "Urea");
    assert_eq!(updated.punto_reposicion, 500.0);

    assert!(InsumoRepo::delete(&pool, insumo.id).await.unwrap());
    assert!(!InsumoRepo::delete(&pool, insumo.id).await.unwrap());
    assert!(InsumoRepo::find_by_id(&pool, insumo.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_below_reorder_includes_items_at_the_threshold(pool: PgPool) {
    InsumoRepo::create(&pool, &supply("Gasoil", 1_500.0, 300.0)).await.unwrap();
    InsumoRepo::create(&pool, &supply("Urea", 500.0, 500.0)).await.unwrap();
    InsumoRepo::create(&pool, &supply("Atrazina", 10.0, 80.0)).await.unwrap();

    let alerts = InsumoRepo::list_below_reorder(&pool).await.unwrap();
    let names: Vec<&str> = alerts.iter().map(|i| i.nombre.as_str()).collect();
    assert_eq!(names, vec!["Atrazina", "Urea"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_negative_stock_is_rejected_by_the_schema(pool: PgPool) {
    let err = InsumoRepo::create(&pool, &supply("Sal", -1.0, 0.0))
        .await
        .unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code()).unwrap();
    assert_eq!(code, "23514");
}
