use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Flat, House, HouseWithFlats};
use crate::schemas::{CreateFlatInput, CreateHouseInput};

pub async fn create_house(pool: &PgPool, user_id: Uuid, input: &CreateHouseInput) -> AppResult<House> {
    let house = sqlx::query_as::<_, House>(
        "INSERT INTO houses (id, user_id, name)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&input.name)
    .fetch_one(pool)
    .await?;
    Ok(house)
}

pub async fn list_with_flats(pool: &PgPool, user_id: Uuid) -> AppResult<Vec<HouseWithFlats>> {
    let houses = sqlx::query_as::<_, House>(
        "SELECT * FROM houses WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let house_ids: Vec<Uuid> = houses.iter().map(|house| house.id).collect();
    let flats = sqlx::query_as::<_, Flat>(
        "SELECT * FROM flats WHERE house_id = ANY($1) ORDER BY created_at",
    )
    .bind(&house_ids)
    .fetch_all(pool)
    .await?;

    let mut result: Vec<HouseWithFlats> = houses
        .into_iter()
        .map(|house| HouseWithFlats {
            house,
            flats: Vec::new(),
        })
        .collect();
    for flat in flats {
        if let Some(entry) = result.iter_mut().find(|entry| entry.house.id == flat.house_id) {
            entry.flats.push(flat);
        }
    }
    Ok(result)
}

pub async fn get_house(pool: &PgPool, id: Uuid) -> AppResult<House> {
    let house = sqlx::query_as::<_, House>("SELECT * FROM houses WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(house)
}

pub async fn get_flat(pool: &PgPool, id: Uuid) -> AppResult<Flat> {
    let flat = sqlx::query_as::<_, Flat>("SELECT * FROM flats WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(flat)
}

pub async fn create_flat(pool: &PgPool, input: &CreateFlatInput) -> AppResult<Flat> {
    let flat = sqlx::query_as::<_, Flat>(
        "INSERT INTO flats (id, house_id, number, basic_rent, gas_bill, utility_bill, water_charges)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(input.house_id)
    .bind(&input.number)
    .bind(input.basic_rent)
    .bind(input.gas_bill)
    .bind(input.utility_bill)
    .bind(input.water_charges)
    .fetch_one(pool)
    .await?;
    Ok(flat)
}
