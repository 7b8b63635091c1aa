//! Tests contra Postgres real
//!
//! Se ejecutan solo con DATABASE_URL definido; sin base de datos se saltan.
//! Cada test crea su propia cinta, spots, camiones y usuarios con un sufijo
//! único, así pueden correr en paralelo sobre la misma base.

use chrono::{Duration, Local, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use sort_dashboard::config::DatabaseConfig;
use sort_dashboard::controllers::assignment_controller::AssignmentController;
use sort_dashboard::controllers::time_off_controller::TimeOffController;
use sort_dashboard::controllers::truck_controller::TruckController;
use sort_dashboard::database::DatabaseConnection;
use sort_dashboard::dto::assignment_dto::{AssignmentQuery, UpsertAssignmentRequest};
use sort_dashboard::dto::time_off_dto::{CreateTimeOffRequest, UpdateTimeOffStatusRequest};
use sort_dashboard::dto::truck_dto::{
    BeltWalkFixRequest, BeltWalkFixResponse, BeltWalkObservation, BeltWalkRequest,
    MoveToAvailableRequest, SpotAssignmentRequest, UpdateTruckRequest,
};
use sort_dashboard::middleware::auth::AuthenticatedUser;
use sort_dashboard::models::time_off::{TimeOffStatus, TimeOffType};
use sort_dashboard::models::truck::{Truck, TruckStatus};
use sort_dashboard::models::user::{AccessLevel, UserRole};
use sort_dashboard::repositories::belt_repository::BeltRepository;
use sort_dashboard::repositories::truck_repository::TruckRepository;
use sort_dashboard::repositories::user_repository::{NewUser, UserRepository};
use sort_dashboard::services::belt_walk::FixAction;
use sort_dashboard::services::coverage_service::CoverageReason;
use sort_dashboard::utils::errors::AppError;

const DATE: &str = "2031-03-10";

struct Fixture {
    pool: PgPool,
    tag: String,
    belt_id: i32,
    spots: Vec<i32>,
    manager: AuthenticatedUser,
}

// Pool con migraciones aplicadas, o None si no hay base configurada
async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("⏭️ DATABASE_URL no definido, test omitido");
        return None;
    };
    let connection = DatabaseConnection::new(&DatabaseConfig::with_url(url, 10))
        .await
        .expect("database connection");
    connection.run_migrations().await.expect("migrations");
    Some(connection.pool().clone())
}

async fn fixture(spot_count: i32) -> Option<Fixture> {
    let pool = test_pool().await?;
    let tag = Uuid::new_v4().simple().to_string()[..8].to_uppercase();

    let belt_id: i32 = sqlx::query_scalar("INSERT INTO belts (letter, name) VALUES ($1, $2) RETURNING id")
        .bind(format!("X{}", tag))
        .bind(format!("Test belt {}", tag))
        .fetch_one(&pool)
        .await
        .expect("belt");

    let belts = BeltRepository::new(pool.clone());
    let mut spots = Vec::new();
    for number in 1..=spot_count {
        spots.push(belts.create_spot(belt_id, number).await.expect("spot").id);
    }

    let manager_id = create_user(&pool, &tag, "lead", UserRole::Manager, AccessLevel::HighestManager).await;
    let manager = AuthenticatedUser {
        user_id: manager_id,
        username: format!("lead-{}", tag),
        access_level: AccessLevel::HighestManager,
    };

    Some(Fixture {
        pool,
        tag,
        belt_id,
        spots,
        manager,
    })
}

async fn create_user(pool: &PgPool, tag: &str, name: &str, role: UserRole, access_level: AccessLevel) -> i32 {
    UserRepository::new(pool.clone())
        .create(NewUser {
            name: format!("{} {}", name, tag),
            username: format!("{}-{}", name, tag),
            email: None,
            phone: None,
            password_hash: "not-a-real-hash".to_string(),
            role,
            access_level,
            employee_id: None,
            vacation_days: 10,
            sick_days: 5,
        })
        .await
        .expect("user")
        .id
}

impl Fixture {
    async fn truck(&self, name: &str) -> Truck {
        TruckRepository::new(self.pool.clone())
            .create(format!("{}{}", name, self.tag), None, None)
            .await
            .expect("truck")
    }

    async fn reload(&self, truck: &Truck) -> Truck {
        sqlx::query_as::<_, Truck>("SELECT * FROM trucks WHERE id = $1")
            .bind(truck.id)
            .fetch_one(&self.pool)
            .await
            .expect("truck row")
    }

    async fn binding_spot(&self, truck: &Truck, date: NaiveDate) -> Option<i32> {
        sqlx::query_scalar("SELECT spot_id FROM truck_spot_assignments WHERE truck_id = $1 AND date = $2")
            .bind(truck.id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .expect("binding query")
    }

    async fn place(&self, controller: &TruckController, truck: &Truck, spot_id: i32, date: &str) -> Result<(), AppError> {
        controller
            .assign_to_spot(
                &self.manager,
                SpotAssignmentRequest {
                    truck_id: truck.id,
                    spot_id,
                    date: date.to_string(),
                },
            )
            .await
            .map(|_| ())
    }

    async fn free(&self, controller: &TruckController, truck: &Truck) {
        controller
            .move_to_available(&self.manager, truck.id, MoveToAvailableRequest { date: DATE.to_string() })
            .await
            .expect("move to available");
    }
}

fn day() -> NaiveDate {
    NaiveDate::parse_from_str(DATE, "%Y-%m-%d").expect("date")
}

#[tokio::test]
async fn test_assignment_upsert_keeps_one_row_per_spot_and_date() {
    let Some(fx) = fixture(1).await else { return };
    let controller = AssignmentController::new(fx.pool.clone());
    let first = create_user(&fx.pool, &fx.tag, "ana", UserRole::Driver, AccessLevel::Employee).await;
    let second = create_user(&fx.pool, &fx.tag, "luis", UserRole::Driver, AccessLevel::Employee).await;

    for (user_id, truck) in [(first, "T1"), (second, "T2")] {
        controller
            .upsert(
                &fx.manager,
                UpsertAssignmentRequest {
                    spot_id: fx.spots[0],
                    date: DATE.to_string(),
                    user_id: Some(user_id),
                    truck_number: Some(truck.to_string()),
                },
            )
            .await
            .expect("upsert");
    }

    let rows = controller
        .list(AssignmentQuery {
            date: DATE.to_string(),
            belt_id: Some(fx.belt_id),
        })
        .await
        .expect("list");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, Some(second));
    assert_eq!(rows[0].truck_number.as_deref(), Some("T2"));
    // Sin plantilla nunca es override
    assert!(!rows[0].is_override);
}

#[tokio::test]
async fn test_bind_moves_truck_and_releases_displaced() {
    let Some(fx) = fixture(2).await else { return };
    let controller = TruckController::new(fx.pool.clone());
    let (s1, s2) = (fx.spots[0], fx.spots[1]);
    let x = fx.truck("X").await;
    let y = fx.truck("Y").await;

    fx.place(&controller, &x, s1, DATE).await.expect("x to s1");
    let moved = controller
        .assign_to_spot(
            &fx.manager,
            SpotAssignmentRequest {
                truck_id: x.id,
                spot_id: s2,
                date: DATE.to_string(),
            },
        )
        .await
        .expect("x to s2")
        .data
        .expect("data");
    assert_eq!(moved.previous_spot_id, Some(s1));
    assert_eq!(fx.binding_spot(&x, day()).await, Some(s2));

    let displaced = controller
        .assign_to_spot(
            &fx.manager,
            SpotAssignmentRequest {
                truck_id: y.id,
                spot_id: s2,
                date: DATE.to_string(),
            },
        )
        .await
        .expect("y to s2")
        .data
        .expect("data");

    assert_eq!(displaced.displaced_truck.map(|t| t.id), Some(x.id));
    assert_eq!(fx.reload(&x).await.status, TruckStatus::Available);
    assert_eq!(fx.reload(&y).await.status, TruckStatus::Assigned);
    assert_eq!(fx.binding_spot(&x, day()).await, None);
    assert_eq!(fx.binding_spot(&y, day()).await, Some(s2));

    let bindings_on_s1: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM truck_spot_assignments WHERE spot_id = $1 AND date = $2")
            .bind(s1)
            .bind(day())
            .fetch_one(&fx.pool)
            .await
            .expect("count");
    assert_eq!(bindings_on_s1, 0);
}

#[tokio::test]
async fn test_concurrent_binds_to_same_spot_leave_consistent_status() {
    let Some(fx) = fixture(1).await else { return };
    let controller = TruckController::new(fx.pool.clone());
    let spot = fx.spots[0];
    let x = fx.truck("X").await;
    let y = fx.truck("Y").await;
    let z = fx.truck("Z").await;

    for _ in 0..15 {
        for truck in [&x, &y, &z] {
            fx.free(&controller, truck).await;
        }
        fx.place(&controller, &x, spot, DATE).await.expect("x to spot");

        let (first, second) = tokio::join!(
            fx.place(&controller, &y, spot, DATE),
            fx.place(&controller, &z, spot, DATE)
        );
        first.expect("y to spot");
        second.expect("z to spot");

        let mut assigned = 0;
        for truck in [&x, &y, &z] {
            let bound = fx.binding_spot(truck, day()).await;
            let status = fx.reload(truck).await.status;
            assert_eq!(
                status == TruckStatus::Assigned,
                bound.is_some(),
                "truck {} is {:?} with binding {:?}",
                truck.number,
                status,
                bound
            );
            assigned += usize::from(bound.is_some());
        }
        assert_eq!(assigned, 1);
    }
}

#[tokio::test]
async fn test_crossed_swaps_do_not_fail() {
    let Some(fx) = fixture(2).await else { return };
    let controller = TruckController::new(fx.pool.clone());
    let (s1, s2) = (fx.spots[0], fx.spots[1]);
    let a = fx.truck("A").await;
    let b = fx.truck("B").await;

    for _ in 0..15 {
        fx.free(&controller, &a).await;
        fx.free(&controller, &b).await;
        fx.place(&controller, &a, s1, DATE).await.expect("a to s1");
        fx.place(&controller, &b, s2, DATE).await.expect("b to s2");

        let (first, second) = tokio::join!(
            fx.place(&controller, &a, s2, DATE),
            fx.place(&controller, &b, s1, DATE)
        );
        first.expect("a to s2");
        second.expect("b to s1");

        // En cualquier orden el resultado final es el intercambio
        assert_eq!(fx.binding_spot(&a, day()).await, Some(s2));
        assert_eq!(fx.binding_spot(&b, day()).await, Some(s1));
        assert_eq!(fx.reload(&a).await.status, TruckStatus::Assigned);
        assert_eq!(fx.reload(&b).await.status, TruckStatus::Assigned);
    }
}

#[tokio::test]
async fn test_truck_cannot_hold_two_spots_on_one_date() {
    let Some(fx) = fixture(2).await else { return };
    let truck = fx.truck("U").await;

    sqlx::query("INSERT INTO truck_spot_assignments (truck_id, spot_id, date) VALUES ($1, $2, $3)")
        .bind(truck.id)
        .bind(fx.spots[0])
        .bind(day())
        .execute(&fx.pool)
        .await
        .expect("first binding");

    let err = sqlx::query("INSERT INTO truck_spot_assignments (truck_id, spot_id, date) VALUES ($1, $2, $3)")
        .bind(truck.id)
        .bind(fx.spots[1])
        .bind(day())
        .execute(&fx.pool)
        .await
        .expect_err("second binding must violate the unique index");

    let app_error = AppError::from(err);
    assert_eq!(app_error.status_code(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_approved_time_off_shows_in_coverage_needs() {
    let Some(fx) = fixture(2).await else { return };
    let (s1, s2) = (fx.spots[0], fx.spots[1]);
    let driver = create_user(&fx.pool, &fx.tag, "marta", UserRole::Driver, AccessLevel::Employee).await;
    let time_off = TimeOffController::new(fx.pool.clone());

    AssignmentController::new(fx.pool.clone())
        .upsert(
            &fx.manager,
            UpsertAssignmentRequest {
                spot_id: s1,
                date: DATE.to_string(),
                user_id: Some(driver),
                truck_number: None,
            },
        )
        .await
        .expect("assignment");

    let reason_for = |needs: &[sort_dashboard::services::coverage_service::CoverageNeed], spot: i32| {
        needs.iter().find(|n| n.spot_id == spot).map(|n| n.reason)
    };

    let before = time_off.coverage_needs(DATE).await.expect("coverage");
    assert_eq!(reason_for(&before.needs, s1), None);
    assert_eq!(reason_for(&before.needs, s2), Some(CoverageReason::Unassigned));

    let request = time_off
        .create(
            &fx.manager,
            CreateTimeOffRequest {
                user_id: Some(driver),
                date: DATE.to_string(),
                kind: TimeOffType::Vacation,
                notes: None,
            },
        )
        .await
        .expect("time off")
        .data
        .expect("data");
    assert_eq!(request.status, TimeOffStatus::Pending);

    let pending = time_off.coverage_needs(DATE).await.expect("coverage");
    assert_eq!(reason_for(&pending.needs, s1), None);

    time_off
        .update_status(
            &fx.manager,
            request.id,
            UpdateTimeOffStatusRequest {
                status: TimeOffStatus::Approved,
            },
        )
        .await
        .expect("approve");

    let approved = time_off.coverage_needs(DATE).await.expect("coverage");
    assert_eq!(reason_for(&approved.needs, s1), Some(CoverageReason::TimeOff));
}

#[tokio::test]
async fn test_retire_keeps_past_bindings_and_is_terminal() {
    let Some(fx) = fixture(2).await else { return };
    let controller = TruckController::new(fx.pool.clone());
    let truck = fx.truck("R").await;
    let today = Local::now().date_naive();
    let past = today - Duration::days(3);
    let future = today + Duration::days(2);

    fx.place(&controller, &truck, fx.spots[0], &past.to_string()).await.expect("past binding");
    fx.place(&controller, &truck, fx.spots[1], &future.to_string()).await.expect("future binding");

    let retired = controller
        .retire(&fx.manager, truck.id)
        .await
        .expect("retire")
        .data
        .expect("data");
    assert_eq!(retired.status, TruckStatus::Retired);
    assert!(retired.retired_at.is_some());

    assert_eq!(fx.binding_spot(&truck, past).await, Some(fx.spots[0]));
    assert_eq!(fx.binding_spot(&truck, future).await, None);

    let err = fx
        .place(&controller, &truck, fx.spots[1], &future.to_string())
        .await
        .expect_err("retired truck cannot be placed");
    assert!(matches!(err, AppError::Conflict(_)));

    let err = controller
        .update(
            &fx.manager,
            truck.id,
            UpdateTruckRequest {
                note: Some("back in service".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect_err("retired truck cannot be edited");
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_truck_clears_home_spot_and_note() {
    let Some(fx) = fixture(1).await else { return };
    let controller = TruckController::new(fx.pool.clone());
    let truck = TruckRepository::new(fx.pool.clone())
        .create(format!("H{}", fx.tag), Some(fx.spots[0]), Some("spare key in cab".to_string()))
        .await
        .expect("truck");

    let kept = controller
        .update(&fx.manager, truck.id, UpdateTruckRequest::default())
        .await
        .expect("noop update")
        .data
        .expect("data");
    assert_eq!(kept.home_spot_id, Some(fx.spots[0]));
    assert_eq!(kept.note.as_deref(), Some("spare key in cab"));

    let cleared = controller
        .update(
            &fx.manager,
            truck.id,
            UpdateTruckRequest {
                clear_home_spot: true,
                clear_note: true,
                ..Default::default()
            },
        )
        .await
        .expect("clear update")
        .data
        .expect("data");
    assert_eq!(cleared.home_spot_id, None);
    assert_eq!(cleared.note, None);
}

#[tokio::test]
async fn test_belt_walk_switched_spots_and_unbind_fix() {
    let Some(fx) = fixture(2).await else { return };
    let controller = TruckController::new(fx.pool.clone());
    let (s1, s2) = (fx.spots[0], fx.spots[1]);
    let first = fx.truck("W").await;
    let second = fx.truck("V").await;
    fx.place(&controller, &first, s1, DATE).await.expect("first");
    fx.place(&controller, &second, s2, DATE).await.expect("second");

    let walk = |switched: Vec<i32>| BeltWalkRequest {
        belt_id: fx.belt_id,
        date: DATE.to_string(),
        observations: vec![
            BeltWalkObservation {
                spot_id: s1,
                actual_truck_number: Some("OTHER".to_string()),
            },
            BeltWalkObservation {
                spot_id: s2,
                actual_truck_number: None,
            },
        ],
        switched,
    };

    let all = controller.belt_walk(walk(Vec::new())).await.expect("walk");
    assert_eq!(all.summary.issues, 2);
    assert_eq!(all.fix_actions.len(), 2);

    let partial = controller.belt_walk(walk(vec![s1])).await.expect("walk");
    assert_eq!(partial.fix_actions, vec![FixAction::Unbind { spot_id: s2 }]);
    assert!(partial.summary.findings.iter().any(|f| f.spot_id == s1 && f.switched));

    let fixed = controller
        .belt_walk_fix(
            &fx.manager,
            BeltWalkFixRequest {
                date: DATE.to_string(),
                spot_id: s2,
                truck_number: None,
            },
        )
        .await
        .expect("fix")
        .data
        .expect("data");

    match fixed {
        BeltWalkFixResponse::Unbind { released_truck } => {
            assert_eq!(released_truck.map(|t| t.id), Some(second.id));
        }
        other => panic!("expected unbind, got {:?}", other),
    }
    assert_eq!(fx.binding_spot(&second, day()).await, None);
    assert_eq!(fx.reload(&second).await.status, TruckStatus::Available);
    assert_eq!(fx.binding_spot(&first, day()).await, Some(s1));
}
