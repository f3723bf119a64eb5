//! Demo rows loaded by the factory reset.

use agronexo_core::livestock::DEFAULT_BREED;
use agronexo_core::reproduction::DEFAULT_STATUS;
use chrono::Utc;

use crate::models::animal::CreateAnimal;
use crate::models::catalog::{CatalogTable, CreateCatalogItem};
use crate::models::insumo::CreateInsumo;
use crate::models::lote::CreateLote;
use crate::models::silo::CreateSilo;
use crate::repositories::{AnimalRepo, CatalogRepo, InsumoRepo, LoteRepo, SiloRepo};
use crate::DbPool;

pub const DEMO_CARAVANA: &str = "BF-101";
pub const DEMO_LOTE: &str = "Lote Norte";
pub const DEMO_SILO: &str = "Silo Bolsa 1";
pub const DEMO_PROTOCOLO: &str = "IATF Estándar";
pub const DEMO_INSUMO: &str = "Gasoil Grado 2";

/// Insert one parcel, one cow standing in it, one silo, one protocol and
/// one supply item.
pub async fn seed_demo(pool: &DbPool) -> Result<(), sqlx::Error> {
    let lote = LoteRepo::create(
        pool,
        &CreateLote {
            nombre: DEMO_LOTE.to_string(),
            cultivo: Some("Soja".to_string()),
            hectareas: 100.0,
            latitud: None,
            longitud: None,
        },
    )
    .await?;

    let animal = AnimalRepo::create(
        pool,
        &CreateAnimal {
            caravana: DEMO_CARAVANA.to_string(),
            categoria: "Vaca".to_string(),
            raza: DEFAULT_BREED.to_string(),
            lote_actual_id: Some(lote.id),
            madre_id: None,
            estado_reproductivo: DEFAULT_STATUS,
            fecha_ingreso: Utc::now(),
            fecha_carencia: None,
            peso_inicial: Some(450.0),
        },
    )
    .await?;

    SiloRepo::create(
        pool,
        &CreateSilo {
            nombre: DEMO_SILO.to_string(),
            tipo: "BOLSA".to_string(),
            cultivo: Some("Soja".to_string()),
            capacidad_kilos: 200_000.0,
            kilos_actuales: 0.0,
        },
    )
    .await?;

    CatalogRepo::create(
        pool,
        CatalogTable::Protocolos,
        &CreateCatalogItem {
            nombre: DEMO_PROTOCOLO.to_string(),
            costo: 15_000.0,
        },
    )
    .await?;

    InsumoRepo::create(
        pool,
        &CreateInsumo {
            nombre: DEMO_INSUMO.to_string(),
            stock: 1500.0,
            unidad: "lts".to_string(),
            punto_reposicion: 300.0,
        },
    )
    .await?;

    tracing::info!(lote_id = lote.id, animal_id = animal.id, "Demo data seeded");
    Ok(())
}
