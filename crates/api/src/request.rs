//! Request bodies and their conversion into repository DTOs.
//!
//! Bodies arrive from form-driven clients: numbers may be strings, fields
//! may be blank, and several endpoints accept more than one field name for
//! the same value. Each body deserializes leniently (see [`FlexNumber`])
//! and is then converted with an explicit `into_*` method that decides,
//! field by field, whether a missing value defaults or is rejected.

use agronexo_core::error::CoreError;
use agronexo_core::fanout::AnimalSelector;
use agronexo_core::grain::{GrainOrigin, HarvestDestination};
use agronexo_core::liquidation::ContractType;
use agronexo_core::livestock::DEFAULT_BREED;
use agronexo_core::parsing::{
    date_or_now, f64_or_zero, optional_date, optional_f64, optional_id, optional_non_negative,
    optional_text, percentage, positive_f64, required_id, required_text, FlexNumber,
};
use agronexo_core::reproduction::{ReproductiveEventKind, ReproductiveStatus, DEFAULT_STATUS};
use agronexo_core::types::DbId;
use agronexo_db::models::animal::{CreateAnimal, UpdateAnimal};
use agronexo_db::models::catalog::{CreateCatalogItem, UpdateCatalogItem};
use agronexo_db::models::contrato::ContractTerms;
use agronexo_db::models::cosecha::CreateCosecha;
use agronexo_db::models::evento_reproductivo::{
    BulkEventoReproductivo, CreateEventoReproductivo, EventDetails,
};
use agronexo_db::models::gasto::{BulkGasto, CreateGasto, UpdateGasto};
use agronexo_db::models::insumo::{CreateInsumo, UpdateInsumo};
use agronexo_db::models::lluvia::{CreateLluvia, UpdateLluvia};
use agronexo_db::models::lote::{CreateLote, UpdateLote};
use agronexo_db::models::pesaje::CreatePesaje;
use agronexo_db::models::silo::{CreateSilo, UpdateSilo};
use agronexo_db::models::venta::CreateVenta;
use agronexo_db::models::venta_grano::CreateVentaGrano;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, AppResult};

/// Category given to animals registered without one.
pub const DEFAULT_CATEGORY: &str = "Vaca";

/// Category given to expenses recorded without one.
pub const DEFAULT_EXPENSE_CATEGORY: &str = "GENERAL";

/// Buyer recorded when a sale names none.
pub const UNKNOWN_BUYER: &str = "Sin especificar";

/// Deserialize a JSON body into `T`, reporting shape errors as 400.
pub fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(format!("Invalid body: {e}")))
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Doubly optional reference from a `present` field: absent leaves the link
/// alone, `null` clears it.
fn relink(
    field: &str,
    raw: Option<Option<FlexNumber>>,
) -> Result<Option<Option<DbId>>, CoreError> {
    raw.map(|value| optional_id(field, value.as_ref())).transpose()
}

fn parse_enum<T>(raw: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: std::str::FromStr<Err = CoreError>,
{
    optional_text(raw).map(|s| s.parse::<T>()).transpose()
}

// ---------------------------------------------------------------------------
// Animals
// ---------------------------------------------------------------------------

/// Body of `POST /animales`, `PUT /ganaderia/{id}` and friends.
#[derive(Debug, Default, Deserialize)]
pub struct AnimalBody {
    pub caravana: Option<String>,
    pub categoria: Option<String>,
    pub raza: Option<String>,
    #[serde(alias = "peso")]
    pub peso_inicial: Option<FlexNumber>,
    #[serde(default, alias = "lote_actual_id", deserialize_with = "present")]
    pub lote_id: Option<Option<FlexNumber>>,
    #[serde(alias = "estado")]
    pub estado_reproductivo: Option<String>,
    #[serde(alias = "fecha_ingreso")]
    pub fecha: Option<String>,
    #[serde(default, alias = "carencia", deserialize_with = "present")]
    pub fecha_carencia: Option<Option<String>>,
}

impl AnimalBody {
    pub fn into_create(self) -> Result<CreateAnimal, CoreError> {
        let caravana = required_text("caravana", self.caravana.as_deref().unwrap_or_default())?;
        let peso_inicial =
            optional_non_negative("peso_inicial", self.peso_inicial.as_ref())?.filter(|p| *p > 0.0);
        let lote_actual_id = optional_id("lote_id", self.lote_id.flatten().as_ref())?;
        Ok(CreateAnimal {
            caravana,
            categoria: optional_text(self.categoria.as_deref())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            raza: optional_text(self.raza.as_deref()).unwrap_or_else(|| DEFAULT_BREED.to_string()),
            lote_actual_id,
            madre_id: None,
            estado_reproductivo: parse_enum::<ReproductiveStatus>(
                self.estado_reproductivo.as_deref(),
            )?
            .unwrap_or(DEFAULT_STATUS),
            fecha_ingreso: date_or_now("fecha", self.fecha.as_deref())?,
            fecha_carencia: optional_date(
                "fecha_carencia",
                self.fecha_carencia.flatten().as_deref(),
            )?,
            peso_inicial,
        })
    }

    pub fn into_update(self) -> Result<UpdateAnimal, CoreError> {
        let lote_actual_id = relink("lote_id", self.lote_id)?;
        let fecha_carencia = match self.fecha_carencia {
            None => None,
            Some(raw) => Some(optional_date("fecha_carencia", raw.as_deref())?),
        };
        Ok(UpdateAnimal {
            caravana: optional_text(self.caravana.as_deref()),
            categoria: optional_text(self.categoria.as_deref()),
            raza: optional_text(self.raza.as_deref()),
            lote_actual_id,
            estado_reproductivo: parse_enum(self.estado_reproductivo.as_deref())?,
            fecha_carencia,
        })
    }
}

/// Body of `POST /nuevo_pesaje`.
#[derive(Debug, Default, Deserialize)]
pub struct PesajeBody {
    pub animal_id: Option<FlexNumber>,
    #[serde(alias = "peso")]
    pub kilos: Option<FlexNumber>,
    pub fecha: Option<String>,
}

impl PesajeBody {
    pub fn into_create(self) -> Result<CreatePesaje, CoreError> {
        Ok(CreatePesaje {
            animal_id: required_id("animal_id", self.animal_id.as_ref())?,
            kilos: positive_f64("kilos", self.kilos.as_ref())?,
            fecha: date_or_now("fecha", self.fecha.as_deref())?,
        })
    }
}

/// Body of `POST /mover_hacienda`.
#[derive(Debug, Default, Deserialize)]
pub struct MoverBody {
    #[serde(default)]
    pub animal_ids: Vec<FlexNumber>,
    pub lote_id: Option<FlexNumber>,
}

impl MoverBody {
    /// Animal ids and the destination parcel (`None` takes them out).
    pub fn into_parts(self) -> Result<(Vec<DbId>, Option<DbId>), CoreError> {
        if self.animal_ids.is_empty() {
            return Err(CoreError::Validation("animal_ids must not be empty".to_string()));
        }
        let ids = self
            .animal_ids
            .iter()
            .map(|raw| required_id("animal_ids", Some(raw)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((ids, optional_id("lote_id", self.lote_id.as_ref())?))
    }
}

/// Body of `POST /registrar_venta`.
#[derive(Debug, Default, Deserialize)]
pub struct VentaBody {
    pub animal_id: Option<FlexNumber>,
    pub comprador: Option<String>,
    #[serde(alias = "kilos_vendidos", alias = "peso")]
    pub kilos: Option<FlexNumber>,
    #[serde(alias = "precio_total")]
    pub precio: Option<FlexNumber>,
    pub fecha: Option<String>,
}

impl VentaBody {
    pub fn into_create(self) -> Result<CreateVenta, CoreError> {
        Ok(CreateVenta {
            animal_id: required_id("animal_id", self.animal_id.as_ref())?,
            comprador: optional_text(self.comprador.as_deref())
                .unwrap_or_else(|| UNKNOWN_BUYER.to_string()),
            kilos_vendidos: optional_non_negative("kilos", self.kilos.as_ref())?,
            precio_total: positive_f64("precio", self.precio.as_ref())?,
            fecha: date_or_now("fecha", self.fecha.as_deref())?,
        })
    }
}

// ---------------------------------------------------------------------------
// Parcels and contracts
// ---------------------------------------------------------------------------

/// Parcel fields, alone or as part of a contract body.
#[derive(Debug, Default, Deserialize)]
pub struct LoteBody {
    #[serde(alias = "lote", alias = "nombreLote")]
    pub nombre: Option<String>,
    pub cultivo: Option<String>,
    pub hectareas: Option<FlexNumber>,
    #[serde(alias = "lat")]
    pub latitud: Option<FlexNumber>,
    #[serde(alias = "lng")]
    pub longitud: Option<FlexNumber>,
}

impl LoteBody {
    pub fn into_create(self) -> Result<CreateLote, CoreError> {
        Ok(CreateLote {
            nombre: required_text("nombre", self.nombre.as_deref().unwrap_or_default())?,
            cultivo: optional_text(self.cultivo.as_deref()),
            hectareas: optional_non_negative("hectareas", self.hectareas.as_ref())?.unwrap_or(0.0),
            latitud: optional_f64("latitud", self.latitud.as_ref())?,
            longitud: optional_f64("longitud", self.longitud.as_ref())?,
        })
    }

    pub fn into_update(self) -> Result<UpdateLote, CoreError> {
        Ok(UpdateLote {
            nombre: optional_text(self.nombre.as_deref()),
            cultivo: optional_text(self.cultivo.as_deref()),
            hectareas: optional_non_negative("hectareas", self.hectareas.as_ref())?,
            latitud: optional_f64("latitud", self.latitud.as_ref())?,
            longitud: optional_f64("longitud", self.longitud.as_ref())?,
        })
    }
}

/// Contract fields, alone or as part of a parcel body.
#[derive(Debug, Default, Deserialize)]
pub struct ContratoBody {
    #[serde(alias = "dueno")]
    pub propietario: Option<String>,
    #[serde(alias = "tipo_contrato")]
    pub tipo: Option<String>,
    #[serde(alias = "porcentaje_dueno")]
    pub porcentaje: Option<FlexNumber>,
}

impl ContratoBody {
    fn is_empty(&self) -> bool {
        optional_text(self.propietario.as_deref()).is_none()
            && optional_text(self.tipo.as_deref()).is_none()
            && self.porcentaje.is_none()
    }

    /// Contract terms; missing type means an owned parcel.
    pub fn into_terms(self) -> Result<ContractTerms, CoreError> {
        let tipo =
            parse_enum::<ContractType>(self.tipo.as_deref())?.unwrap_or(ContractType::Propio);
        Ok(ContractTerms {
            propietario: optional_text(self.propietario.as_deref())
                .unwrap_or_else(|| tipo.as_str().to_string()),
            tipo,
            porcentaje_dueno: percentage("porcentaje", self.porcentaje.as_ref())?,
        })
    }

    /// Contract terms only when at least one contract field was sent.
    pub fn into_optional_terms(self) -> Result<Option<ContractTerms>, CoreError> {
        if self.is_empty() {
            Ok(None)
        } else {
            self.into_terms().map(Some)
        }
    }
}

/// Body of `POST /nuevo_contrato` and `PUT /editar_lote/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct LoteContratoBody {
    #[serde(flatten)]
    pub lote: LoteBody,
    #[serde(flatten)]
    pub contrato: ContratoBody,
}

/// Body of `POST /contratos`: contract terms for an existing parcel.
#[derive(Debug, Default, Deserialize)]
pub struct ContratoLoteBody {
    pub lote_id: Option<FlexNumber>,
    #[serde(flatten)]
    pub contrato: ContratoBody,
}

// ---------------------------------------------------------------------------
// Expenses and rainfall
// ---------------------------------------------------------------------------

/// Body of `POST /gastos` and `POST /nuevo_gasto`.
#[derive(Debug, Default, Deserialize)]
pub struct GastoBody {
    #[serde(alias = "descripcion")]
    pub concepto: Option<String>,
    pub monto: Option<FlexNumber>,
    pub categoria: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub lote_id: Option<Option<FlexNumber>>,
    #[serde(default, deserialize_with = "present")]
    pub animal_id: Option<Option<FlexNumber>>,
    pub fecha: Option<String>,
}

impl GastoBody {
    pub fn into_create(self) -> Result<CreateGasto, CoreError> {
        Ok(CreateGasto {
            concepto: required_text("concepto", self.concepto.as_deref().unwrap_or_default())?,
            monto: positive_f64("monto", self.monto.as_ref())?,
            categoria: optional_text(self.categoria.as_deref())
                .unwrap_or_else(|| DEFAULT_EXPENSE_CATEGORY.to_string()),
            lote_id: optional_id("lote_id", self.lote_id.flatten().as_ref())?,
            animal_id: optional_id("animal_id", self.animal_id.flatten().as_ref())?,
            fecha: date_or_now("fecha", self.fecha.as_deref())?,
        })
    }

    pub fn into_update(self) -> Result<UpdateGasto, CoreError> {
        let monto = optional_f64("monto", self.monto.as_ref())?;
        if monto.is_some_and(|m| m <= 0.0) {
            return Err(CoreError::Validation("monto must be greater than zero".to_string()));
        }
        Ok(UpdateGasto {
            concepto: optional_text(self.concepto.as_deref()),
            monto,
            categoria: optional_text(self.categoria.as_deref()),
            lote_id: relink("lote_id", self.lote_id)?,
            animal_id: relink("animal_id", self.animal_id)?,
            fecha: optional_date("fecha", self.fecha.as_deref())?,
        })
    }
}

/// Body of `POST /gasto_masivo`.
#[derive(Debug, Default, Deserialize)]
pub struct BulkGastoBody {
    pub objetivo: Option<String>,
    pub lote_id: Option<FlexNumber>,
    #[serde(alias = "descripcion")]
    pub concepto: Option<String>,
    #[serde(alias = "monto_total")]
    pub monto: Option<FlexNumber>,
    pub categoria: Option<String>,
    pub fecha: Option<String>,
}

impl BulkGastoBody {
    pub fn into_bulk(self) -> Result<BulkGasto, CoreError> {
        Ok(BulkGasto {
            objetivo: selector(self.objetivo.as_deref(), self.lote_id.as_ref())?,
            concepto: required_text("concepto", self.concepto.as_deref().unwrap_or_default())?,
            // Non-positive totals are rejected by the split itself.
            monto_total: f64_or_zero("monto", self.monto.as_ref())?,
            categoria: optional_text(self.categoria.as_deref())
                .unwrap_or_else(|| DEFAULT_EXPENSE_CATEGORY.to_string()),
            fecha: date_or_now("fecha", self.fecha.as_deref())?,
        })
    }
}

/// Body of `POST /lluvias` and `POST /registrar_lluvia`.
#[derive(Debug, Default, Deserialize)]
pub struct LluviaBody {
    pub lote_id: Option<FlexNumber>,
    #[serde(alias = "mm")]
    pub milimetros: Option<FlexNumber>,
    pub fecha: Option<String>,
}

impl LluviaBody {
    pub fn into_create(self) -> Result<CreateLluvia, CoreError> {
        let milimetros = optional_non_negative("milimetros", self.milimetros.as_ref())?
            .ok_or_else(|| CoreError::Validation("milimetros is required".to_string()))?;
        Ok(CreateLluvia {
            lote_id: required_id("lote_id", self.lote_id.as_ref())?,
            milimetros,
            fecha: date_or_now("fecha", self.fecha.as_deref())?,
        })
    }

    pub fn into_update(self) -> Result<UpdateLluvia, CoreError> {
        Ok(UpdateLluvia {
            milimetros: optional_non_negative("milimetros", self.milimetros.as_ref())?,
            fecha: optional_date("fecha", self.fecha.as_deref())?,
        })
    }
}

// ---------------------------------------------------------------------------
// Grain
// ---------------------------------------------------------------------------

/// Body of `POST /silos` and `PUT /silos/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct SiloBody {
    pub nombre: Option<String>,
    pub tipo: Option<String>,
    pub cultivo: Option<String>,
    #[serde(alias = "capacidad_kilos")]
    pub capacidad: Option<FlexNumber>,
    #[serde(alias = "stock")]
    pub kilos_actuales: Option<FlexNumber>,
}

impl SiloBody {
    pub fn into_create(self) -> Result<CreateSilo, CoreError> {
        Ok(CreateSilo {
            nombre: required_text("nombre", self.nombre.as_deref().unwrap_or_default())?,
            tipo: optional_text(self.tipo.as_deref())
                .map(|t| t.to_uppercase())
                .unwrap_or_else(|| "BOLSA".to_string()),
            cultivo: optional_text(self.cultivo.as_deref()),
            capacidad_kilos: optional_non_negative("capacidad", self.capacidad.as_ref())?
                .unwrap_or(0.0),
            kilos_actuales: optional_non_negative("kilos_actuales", self.kilos_actuales.as_ref())?
                .unwrap_or(0.0),
        })
    }

    pub fn into_update(self) -> Result<UpdateSilo, CoreError> {
        Ok(UpdateSilo {
            nombre: optional_text(self.nombre.as_deref()),
            tipo: optional_text(self.tipo.as_deref()).map(|t| t.to_uppercase()),
            cultivo: optional_text(self.cultivo.as_deref()),
            capacidad_kilos: optional_non_negative("capacidad", self.capacidad.as_ref())?,
        })
    }
}

/// Body of `POST /nueva_cosecha`.
#[derive(Debug, Default, Deserialize)]
pub struct CosechaBody {
    pub lote_id: Option<FlexNumber>,
    #[serde(alias = "kilos_totales")]
    pub kilos: Option<FlexNumber>,
    pub destino: Option<String>,
    pub silo_id: Option<FlexNumber>,
    pub fecha: Option<String>,
}

impl CosechaBody {
    pub fn into_create(self) -> Result<CreateCosecha, CoreError> {
        Ok(CreateCosecha {
            lote_id: required_id("lote_id", self.lote_id.as_ref())?,
            kilos_totales: positive_f64("kilos", self.kilos.as_ref())?,
            destino: parse_enum::<HarvestDestination>(self.destino.as_deref())?
                .unwrap_or(HarvestDestination::Venta),
            silo_id: optional_id("silo_id", self.silo_id.as_ref())?,
            fecha: date_or_now("fecha", self.fecha.as_deref())?,
        })
    }
}

/// Body of `POST /venta_grano`.
#[derive(Debug, Default, Deserialize)]
pub struct VentaGranoBody {
    pub comprador: Option<String>,
    #[serde(alias = "cultivo", alias = "grano")]
    pub tipo_grano: Option<String>,
    pub kilos: Option<FlexNumber>,
    #[serde(alias = "precio_total")]
    pub precio: Option<FlexNumber>,
    pub origen: Option<String>,
    pub silo_id: Option<FlexNumber>,
    pub fecha: Option<String>,
}

impl VentaGranoBody {
    pub fn into_create(self) -> Result<CreateVentaGrano, CoreError> {
        let silo_id = optional_id("silo_id", self.silo_id.as_ref())?;
        // A sale naming a silo without an origin comes out of that silo.
        let default_origin = if silo_id.is_some() {
            GrainOrigin::Silo
        } else {
            GrainOrigin::Directo
        };
        Ok(CreateVentaGrano {
            comprador: optional_text(self.comprador.as_deref())
                .unwrap_or_else(|| UNKNOWN_BUYER.to_string()),
            tipo_grano: required_text(
                "tipo_grano",
                self.tipo_grano.as_deref().unwrap_or_default(),
            )?,
            kilos: positive_f64("kilos", self.kilos.as_ref())?,
            precio_total: f64_or_zero("precio", self.precio.as_ref())?,
            origen: parse_enum::<GrainOrigin>(self.origen.as_deref())?.unwrap_or(default_origin),
            silo_id,
            fecha: date_or_now("fecha", self.fecha.as_deref())?,
        })
    }
}

// ---------------------------------------------------------------------------
// Reproduction
// ---------------------------------------------------------------------------

/// Body of `POST /protocolos` and `POST /insumos_geneticos`.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogBody {
    pub nombre: Option<String>,
    #[serde(alias = "precio")]
    pub costo: Option<FlexNumber>,
}

impl CatalogBody {
    pub fn into_create(self) -> Result<CreateCatalogItem, CoreError> {
        Ok(CreateCatalogItem {
            nombre: required_text("nombre", self.nombre.as_deref().unwrap_or_default())?,
            costo: optional_non_negative("costo", self.costo.as_ref())?.unwrap_or(0.0),
        })
    }

    pub fn into_update(self) -> Result<UpdateCatalogItem, CoreError> {
        Ok(UpdateCatalogItem {
            nombre: optional_text(self.nombre.as_deref()),
            costo: optional_non_negative("costo", self.costo.as_ref())?,
        })
    }
}

/// Unit recorded for supply items created without one.
pub const DEFAULT_SUPPLY_UNIT: &str = "u";

/// Body of `POST /insumos` and `PUT /insumos/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct InsumoBody {
    pub nombre: Option<String>,
    #[serde(alias = "cantidad")]
    pub stock: Option<FlexNumber>,
    pub unidad: Option<String>,
    #[serde(alias = "minimo")]
    pub punto_reposicion: Option<FlexNumber>,
}

impl InsumoBody {
    pub fn into_create(self) -> Result<CreateInsumo, CoreError> {
        Ok(CreateInsumo {
            nombre: required_text("nombre", self.nombre.as_deref().unwrap_or_default())?,
            stock: optional_non_negative("stock", self.stock.as_ref())?.unwrap_or(0.0),
            unidad: optional_text(self.unidad.as_deref())
                .unwrap_or_else(|| DEFAULT_SUPPLY_UNIT.to_string()),
            punto_reposicion: optional_non_negative(
                "punto_reposicion",
                self.punto_reposicion.as_ref(),
            )?
            .unwrap_or(0.0),
        })
    }

    pub fn into_update(self) -> Result<UpdateInsumo, CoreError> {
        Ok(UpdateInsumo {
            nombre: optional_text(self.nombre.as_deref()),
            stock: optional_non_negative("stock", self.stock.as_ref())?,
            unidad: optional_text(self.unidad.as_deref()),
            punto_reposicion: optional_non_negative(
                "punto_reposicion",
                self.punto_reposicion.as_ref(),
            )?,
        })
    }
}

/// Event fields shared by the single and bulk endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct EventFields {
    #[serde(alias = "tipo_evento")]
    pub tipo: Option<String>,
    #[serde(alias = "resultado")]
    pub detalle: Option<String>,
    pub protocolo_id: Option<FlexNumber>,
    #[serde(alias = "insumo_id")]
    pub insumo_genetico_id: Option<FlexNumber>,
    pub crear_cria: Option<bool>,
    pub fecha: Option<String>,
}

impl EventFields {
    pub fn into_details(self) -> Result<EventDetails, CoreError> {
        let tipo = parse_enum::<ReproductiveEventKind>(self.tipo.as_deref())?
            .ok_or_else(|| CoreError::Validation("tipo is required".to_string()))?;
        Ok(EventDetails {
            tipo,
            detalle: self.detalle.map(|d| d.trim().to_string()).unwrap_or_default(),
            protocolo_id: optional_id("protocolo_id", self.protocolo_id.as_ref())?,
            insumo_genetico_id: optional_id(
                "insumo_genetico_id",
                self.insumo_genetico_id.as_ref(),
            )?,
            crear_cria: self.crear_cria.unwrap_or(true),
            fecha: date_or_now("fecha", self.fecha.as_deref())?,
        })
    }
}

/// Body of `POST /nuevo_evento_reproductivo`.
#[derive(Debug, Default, Deserialize)]
pub struct EventoBody {
    pub animal_id: Option<FlexNumber>,
    #[serde(flatten)]
    pub evento: EventFields,
}

impl EventoBody {
    pub fn into_create(self) -> Result<CreateEventoReproductivo, CoreError> {
        Ok(CreateEventoReproductivo {
            animal_id: required_id("animal_id", self.animal_id.as_ref())?,
            details: self.evento.into_details()?,
        })
    }
}

/// Body of `POST /evento_reproductivo_masivo`.
#[derive(Debug, Default, Deserialize)]
pub struct BulkEventoBody {
    pub objetivo: Option<String>,
    pub lote_id: Option<FlexNumber>,
    #[serde(flatten)]
    pub evento: EventFields,
}

impl BulkEventoBody {
    pub fn into_bulk(self) -> Result<BulkEventoReproductivo, CoreError> {
        Ok(BulkEventoReproductivo {
            objetivo: selector(self.objetivo.as_deref(), self.lote_id.as_ref())?,
            details: self.evento.into_details()?,
        })
    }
}

fn selector(
    objetivo: Option<&str>,
    lote_id: Option<&FlexNumber>,
) -> Result<AnimalSelector, CoreError> {
    let objetivo = optional_text(objetivo)
        .ok_or_else(|| CoreError::Validation("objetivo is required".to_string()))?;
    AnimalSelector::from_parts(&objetivo, optional_id("lote_id", lote_id)?)
}
