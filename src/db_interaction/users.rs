use anyhow::Context;
use diesel::{dsl::exists, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};

use crate::{models::User, schema::users, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

#[tracing::instrument(
    "Getting user by username",
    skip(conn)
)]
pub async fn get_user_by_username(
    mut conn: DbConnection,
    username: String
) -> Result<Option<User>, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        users::table
            .filter(users::username.eq(username))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to query user by username")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[tracing::instrument(
    "Checking user exists",
    skip(conn)
)]
pub async fn user_exists(
    mut conn: DbConnection,
    user_id: i32
) -> Result<bool, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        diesel::select(exists(users::table.filter(users::id_user.eq(user_id))))
            .get_result::<bool>(&mut conn)
            .context("Failed to check user existence")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}
