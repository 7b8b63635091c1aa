use chrono::{Local, NaiveDate};
use sqlx::PgPool;
use std::collections::HashMap;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::truck_dto::{
    BeltWalkFixRequest, BeltWalkFixResponse, BeltWalkRequest, BeltWalkResponse, CreateTruckRequest,
    MoveToAvailableRequest, MoveToOutOfServiceRequest, SpotAssignmentRequest,
    SpotAssignmentResponse, TruckFilters, UpdateTruckRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::assignment::TruckSpotDetail;
use crate::models::truck::{Truck, TruckStatus};
use crate::models::user::AccessLevel;
use crate::repositories::belt_repository::BeltRepository;
use crate::repositories::truck_repository::TruckRepository;
use crate::services::belt_walk::{BeltWalkAudit, ExpectedSpot};
use crate::services::truck_lifecycle::{next_status, TruckAction};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{normalize_optional_text, parse_date};

pub struct TruckController {
    pool: PgPool,
    trucks: TruckRepository,
    belts: BeltRepository,
}

impl TruckController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trucks: TruckRepository::new(pool.clone()),
            belts: BeltRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(&self, filters: TruckFilters) -> Result<Vec<Truck>, AppError> {
        self.trucks.list(&filters).await
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateTruckRequest,
    ) -> Result<ApiResponse<Truck>, AppError> {
        actor.require(AccessLevel::TruckMover)?;
        request.validate()?;

        let number = request.number.trim().to_string();
        if self.trucks.number_exists(&number, None).await? {
            return Err(AppError::Conflict(format!("Truck number '{}' already exists", number)));
        }

        if let Some(spot_id) = request.home_spot_id {
            self.ensure_spot(spot_id).await?;
        }

        let truck = self
            .trucks
            .create(number, request.home_spot_id, normalize_optional_text(request.note))
            .await?;

        tracing::info!("🚚 Camión {} creado", truck.number);
        Ok(ApiResponse::success_with_message(truck, "Truck created"))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        mut request: UpdateTruckRequest,
    ) -> Result<ApiResponse<Truck>, AppError> {
        actor.require(AccessLevel::TruckMover)?;
        request.validate()?;

        let current = self
            .trucks
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Truck", id))?;
        if current.status == TruckStatus::Retired {
            return Err(AppError::Conflict("Truck is retired".to_string()));
        }

        if let Some(number) = request.number.as_deref() {
            if self.trucks.number_exists(number, Some(id)).await? {
                return Err(AppError::Conflict(format!("Truck number '{}' already exists", number.trim())));
            }
        }
        if let Some(spot_id) = request.home_spot_id {
            self.ensure_spot(spot_id).await?;
        }
        request.number = request.number.map(|n| n.trim().to_string());
        request.note = normalize_optional_text(request.note);

        // None aquí significa que se retiró entre la lectura y el UPDATE
        let truck = self
            .trucks
            .update(id, request)
            .await?
            .ok_or_else(|| AppError::Conflict("Truck is retired".to_string()))?;

        Ok(ApiResponse::success_with_message(truck, "Truck updated"))
    }

    pub async fn list_spot_assignments(&self, date: &str) -> Result<Vec<TruckSpotDetail>, AppError> {
        let date = parse_date(date)?;
        self.trucks.list_spot_assignments(date).await
    }

    pub async fn assign_to_spot(
        &self,
        actor: &AuthenticatedUser,
        request: SpotAssignmentRequest,
    ) -> Result<ApiResponse<SpotAssignmentResponse>, AppError> {
        actor.require(AccessLevel::TruckMover)?;
        let date = parse_date(&request.date)?;

        let response = self.bind(request.truck_id, request.spot_id, date).await?;
        Ok(ApiResponse::success_with_message(response, "Truck placed at spot"))
    }

    /// Estacionar un camión en un spot para una fecha, en una sola transacción:
    /// se quita su binding previo de ese día, se reemplaza al camión que
    /// ocupaba el spot y el desplazado vuelve a AVAILABLE.
    async fn bind(&self, truck_id: i32, spot_id: i32, date: NaiveDate) -> Result<SpotAssignmentResponse, AppError> {
        self.ensure_spot(spot_id).await?;

        let mut tx = self.pool.begin().await?;
        TruckRepository::lock_bindings_for_date(&mut tx, date).await?;

        let displaced = TruckRepository::binding_for_spot(&mut tx, spot_id, date)
            .await?
            .filter(|b| b.truck_id != truck_id);

        let mut ids = vec![truck_id];
        ids.extend(displaced.as_ref().map(|b| b.truck_id));
        let mut locked = TruckRepository::lock_trucks(&mut tx, &ids).await?;

        let position = locked
            .iter()
            .position(|t| t.id == truck_id)
            .ok_or_else(|| not_found_error("Truck", truck_id))?;
        let truck = locked.remove(position);
        let status = next_status(truck.status, TruckAction::BindToSpot)?;

        let previous = TruckRepository::binding_for_truck(&mut tx, truck_id, date).await?;
        let previous_spot_id = previous.as_ref().map(|b| b.spot_id).filter(|id| *id != spot_id);
        if previous_spot_id.is_some() {
            TruckRepository::delete_binding_for_truck(&mut tx, truck_id, date).await?;
        }

        let binding = TruckRepository::upsert_binding(&mut tx, truck_id, spot_id, date).await?;
        let truck = TruckRepository::set_status(&mut tx, truck.id, status, truck.note.as_deref()).await?;

        let displaced_truck = match locked.pop() {
            Some(old) => Some(Self::release(&mut tx, old).await?),
            None => None,
        };

        tx.commit().await?;

        tracing::info!(
            "🚚 Camión {} → spot {} ({}){}",
            truck.number,
            spot_id,
            date,
            displaced_truck
                .as_ref()
                .map(|t| format!(", desplaza a {}", t.number))
                .unwrap_or_default()
        );

        Ok(SpotAssignmentResponse {
            truck_spot_assignment_id: binding.id,
            truck,
            displaced_truck,
            previous_spot_id,
        })
    }

    /// Estado tras perder su binding. El camión ya viene bloqueado;
    /// uno retirado o fuera de servicio se deja como está.
    async fn release(conn: &mut sqlx::PgConnection, truck: Truck) -> Result<Truck, AppError> {
        let status = next_status(truck.status, TruckAction::Unbind).unwrap_or(truck.status);
        if status == truck.status {
            return Ok(truck);
        }

        TruckRepository::set_status(conn, truck.id, status, truck.note.as_deref()).await
    }

    pub async fn unassign_spot(&self, actor: &AuthenticatedUser, binding_id: i32) -> Result<ApiResponse<Truck>, AppError> {
        actor.require(AccessLevel::TruckMover)?;

        let binding = self
            .trucks
            .find_spot_assignment(binding_id)
            .await?
            .ok_or_else(|| not_found_error("Truck spot assignment", binding_id))?;

        let mut tx = self.pool.begin().await?;
        TruckRepository::lock_bindings_for_date(&mut tx, binding.date).await?;

        let truck = TruckRepository::lock_truck(&mut tx, binding.truck_id)
            .await?
            .ok_or_else(|| not_found_error("Truck", binding.truck_id))?;
        if TruckRepository::delete_binding(&mut tx, binding.id).await? == 0 {
            return Err(not_found_error("Truck spot assignment", binding_id));
        }
        let truck = Self::release(&mut tx, truck).await?;
        tx.commit().await?;

        Ok(ApiResponse::success_with_message(truck, "Truck removed from spot"))
    }

    /// Quitar el camión que el sistema tiene en un spot ese día, si lo hay
    async fn unbind_spot(&self, spot_id: i32, date: NaiveDate) -> Result<Option<Truck>, AppError> {
        self.ensure_spot(spot_id).await?;

        let mut tx = self.pool.begin().await?;
        TruckRepository::lock_bindings_for_date(&mut tx, date).await?;

        let Some(binding) = TruckRepository::binding_for_spot(&mut tx, spot_id, date).await? else {
            tx.commit().await?;
            return Ok(None);
        };

        let truck = TruckRepository::lock_truck(&mut tx, binding.truck_id)
            .await?
            .ok_or_else(|| not_found_error("Truck", binding.truck_id))?;
        TruckRepository::delete_binding(&mut tx, binding.id).await?;
        let truck = Self::release(&mut tx, truck).await?;

        tx.commit().await?;

        tracing::info!("🚚 Camión {} quitado del spot {} ({})", truck.number, spot_id, date);
        Ok(Some(truck))
    }

    pub async fn move_to_available(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        request: MoveToAvailableRequest,
    ) -> Result<ApiResponse<Truck>, AppError> {
        actor.require(AccessLevel::TruckMover)?;
        let date = parse_date(&request.date)?;

        let truck = self
            .change_status(id, date, TruckAction::MoveToAvailable, None)
            .await?;
        Ok(ApiResponse::success_with_message(truck, "Truck is available"))
    }

    pub async fn move_to_out_of_service(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        request: MoveToOutOfServiceRequest,
    ) -> Result<ApiResponse<Truck>, AppError> {
        actor.require(AccessLevel::TruckMover)?;
        request.validate()?;
        let date = parse_date(&request.date)?;

        let note = normalize_optional_text(request.note);
        let truck = self
            .change_status(id, date, TruckAction::MoveToOutOfService, note.as_deref())
            .await?;

        tracing::warn!("🔧 Camión {} fuera de servicio", truck.number);
        Ok(ApiResponse::success_with_message(truck, "Truck is out of service"))
    }

    /// Cambio de estado explícito: quita el binding de `date` y guarda la nota
    async fn change_status(
        &self,
        id: i32,
        date: NaiveDate,
        action: TruckAction,
        note: Option<&str>,
    ) -> Result<Truck, AppError> {
        let mut tx = self.pool.begin().await?;
        TruckRepository::lock_bindings_for_date(&mut tx, date).await?;

        let truck = TruckRepository::lock_truck(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Truck", id))?;
        let status = next_status(truck.status, action)?;

        TruckRepository::delete_binding_for_truck(&mut tx, id, date).await?;
        let truck = TruckRepository::set_status(&mut tx, id, status, note).await?;

        tx.commit().await?;
        Ok(truck)
    }

    /// Borrado lógico. Los bindings pasados se conservan.
    pub async fn retire(&self, actor: &AuthenticatedUser, id: i32) -> Result<ApiResponse<Truck>, AppError> {
        actor.require(AccessLevel::OpLead)?;

        let today = Local::now().date_naive();
        let mut tx = self.pool.begin().await?;

        let truck = TruckRepository::lock_truck(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Truck", id))?;
        let status = next_status(truck.status, TruckAction::Retire)?;

        let removed = TruckRepository::delete_bindings_from(&mut tx, id, today).await?;
        let truck = TruckRepository::set_status(&mut tx, id, status, truck.note.as_deref()).await?;

        tx.commit().await?;

        tracing::info!("🗄️ Camión {} retirado ({} bindings futuros eliminados)", truck.number, removed);
        Ok(ApiResponse::success_with_message(truck, "Truck retired"))
    }

    /// Comparar lo observado en la cinta con los bindings del día. No escribe nada.
    pub async fn belt_walk(&self, request: BeltWalkRequest) -> Result<BeltWalkResponse, AppError> {
        let date = parse_date(&request.date)?;

        let belt = self
            .belts
            .find_belt(request.belt_id)
            .await?
            .ok_or_else(|| not_found_error("Belt", request.belt_id))?;

        let bound: HashMap<i32, String> = self
            .trucks
            .list_spot_assignments(date)
            .await?
            .into_iter()
            .map(|b| (b.spot_id, b.truck_number))
            .collect();

        let expected = self
            .belts
            .spots_with_belt(Some(belt.id))
            .await?
            .into_iter()
            .map(|spot| ExpectedSpot {
                spot_id: spot.id,
                spot_label: spot.label(),
                expected_truck: bound.get(&spot.id).cloned(),
            })
            .collect();

        let mut audit = BeltWalkAudit::new();
        audit.start(belt.id, &belt.letter, expected)?;
        for observation in &request.observations {
            audit.record(observation.spot_id, observation.actual_truck_number.as_deref())?;
        }
        audit.finish()?;
        for spot_id in &request.switched {
            audit.mark_switched(*spot_id)?;
        }
        let summary = audit
            .summary()
            .cloned()
            .ok_or_else(|| AppError::Internal("Belt walk finished without summary".to_string()))?;

        tracing::info!(
            "🔍 Belt walk {} {}: {} revisados, {} discrepancias",
            belt.letter,
            date,
            summary.checked,
            summary.issues
        );

        Ok(BeltWalkResponse {
            fix_actions: audit.fix_actions(),
            summary,
        })
    }

    /// Aplicar en el sistema lo encontrado en la cinta
    pub async fn belt_walk_fix(
        &self,
        actor: &AuthenticatedUser,
        request: BeltWalkFixRequest,
    ) -> Result<ApiResponse<BeltWalkFixResponse>, AppError> {
        actor.require(AccessLevel::TruckMover)?;
        request.validate()?;
        let date = parse_date(&request.date)?;

        let response = match normalize_optional_text(request.truck_number) {
            Some(number) => {
                let truck = self
                    .trucks
                    .find_by_number(&number)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Truck '{}' not found", number)))?;
                BeltWalkFixResponse::Bind(self.bind(truck.id, request.spot_id, date).await?)
            }
            None => BeltWalkFixResponse::Unbind {
                released_truck: self.unbind_spot(request.spot_id, date).await?,
            },
        };

        Ok(ApiResponse::success_with_message(response, "System updated from belt walk"))
    }

    async fn ensure_spot(&self, spot_id: i32) -> Result<(), AppError> {
        self.belts
            .find_spot(spot_id)
            .await?
            .ok_or_else(|| not_found_error("Spot", spot_id))?;
        Ok(())
    }
}
