use crate::models::DbBooking;
use chrono::{NaiveDate, Utc};
use coachbook_core::models::booking::{Booking, BookingFilter, NewBooking};
use eyre::{eyre, Result};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

/// Takes the (coach, date) key lock and returns the key's bookings.
///
/// `FOR UPDATE` alone cannot stop two transactions inserting into a key that
/// has no rows yet, so a transaction-scoped advisory lock on the key is taken
/// first. Both locks are released when the transaction ends.
pub async fn lock_bookings_for_update(
    conn: &mut PgConnection,
    coach_id: i64,
    date: NaiveDate,
) -> Result<Vec<DbBooking>> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(format!("booking:{coach_id}:{date}"))
        .execute(&mut *conn)
        .await?;

    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, coach_id, booking_date, time_slots, client_info, created_at
        FROM bookings
        WHERE coach_id = $1 AND booking_date = $2
        ORDER BY created_at ASC, id ASC
        FOR UPDATE
        "#,
    )
    .bind(coach_id)
    .bind(date)
    .fetch_all(&mut *conn)
    .await?;

    Ok(bookings)
}

pub async fn insert_booking(conn: &mut PgConnection, booking: &NewBooking) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Inserting booking: id={}, coach_id={}, date={}, slots={}",
        id, booking.coach_id, booking.booking_date, booking.time_slots
    );

    let inserted = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, coach_id, booking_date, time_slots, client_info, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, coach_id, booking_date, time_slots, client_info, created_at
        "#,
    )
    .bind(id)
    .bind(booking.coach_id)
    .bind(booking.booking_date)
    .bind(&booking.time_slots)
    .bind(&booking.client_info)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    Ok(inserted)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, coach_id, booking_date, time_slots, client_info, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn update_booking(pool: &Pool<Postgres>, booking: &Booking) -> Result<DbBooking> {
    let updated = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET coach_id = $2, booking_date = $3, time_slots = $4, client_info = $5
        WHERE id = $1
        RETURNING id, coach_id, booking_date, time_slots, client_info, created_at
        "#,
    )
    .bind(booking.id)
    .bind(booking.coach_id)
    .bind(booking.booking_date)
    .bind(&booking.time_slots)
    .bind(&booking.client_info)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Booking {} no longer exists", booking.id))?;

    Ok(updated)
}

pub async fn delete_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list_bookings(pool: &Pool<Postgres>, filter: &BookingFilter) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, coach_id, booking_date, time_slots, client_info, created_at
        FROM bookings
        WHERE ($1::BIGINT IS NULL OR coach_id = $1)
          AND ($2::DATE IS NULL OR booking_date = $2)
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(filter.coach_id)
    .bind(filter.date)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}
