use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::store::{AppliedMatch, LogChange, RivalryStore};
use crate::error::TrackerError;
use crate::game::roster::Roster;
use crate::game::stats_calculator::MatchDeltas;
use crate::models::match_record::{MatchPayload, MatchRecord};
use crate::models::player::{Player, PlayerFieldsUpdate, StatIncrements};

/// Postgres-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), TrackerError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// SQLSTATE `numeric_value_out_of_range`
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// An increment pushing a counter past INTEGER is the caller's fault, not the database's
fn increment_error(error: sqlx::Error, name: &str) -> TrackerError {
    let out_of_range = error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .map_or(false, |code| code == NUMERIC_OUT_OF_RANGE);

    if out_of_range {
        TrackerError::counter_out_of_range(name)
    } else {
        TrackerError::Database(error)
    }
}

/// Single-statement increment, so concurrent updates on one player never interleave
async fn increment_player<'e, E>(
    executor: E,
    name: &str,
    inc: &StatIncrements,
) -> Result<Option<Player>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Player>(
        r#"
        UPDATE players
        SET
            total_matches = total_matches + $2,
            total_goals = total_goals + $3,
            wins = wins + $4,
            draws = draws + $5,
            losses = losses + $6,
            penalty_goals = penalty_goals + $7,
            freekick_goals = freekick_goals + $8,
            corner_goals = corner_goals + $9,
            own_goals = own_goals + $10,
            conceded_matches = conceded_matches + $11,
            updated_at = NOW()
        WHERE name = $1
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(inc.total_matches)
    .bind(inc.total_goals)
    .bind(inc.wins)
    .bind(inc.draws)
    .bind(inc.losses)
    .bind(inc.penalty_goals)
    .bind(inc.freekick_goals)
    .bind(inc.corner_goals)
    .bind(inc.own_goals)
    .bind(inc.conceded_matches)
    .fetch_optional(executor)
    .await
}

async fn insert_match<'e, E>(executor: E, payload: &MatchPayload) -> Result<MatchRecord, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let goals = &payload.goals;
    sqlx::query_as::<_, MatchRecord>(
        r#"
        INSERT INTO matches (
            id, match_date, result,
            me_normal_goals, me_penalty_goals, me_freekick_goals, me_corner_goals, me_own_goals,
            friend_normal_goals, friend_penalty_goals, friend_freekick_goals, friend_corner_goals, friend_own_goals
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&payload.match_date)
    .bind(payload.result)
    .bind(goals.me_normal_goals)
    .bind(goals.me_penalty_goals)
    .bind(goals.me_freekick_goals)
    .bind(goals.me_corner_goals)
    .bind(goals.me_own_goals)
    .bind(goals.friend_normal_goals)
    .bind(goals.friend_penalty_goals)
    .bind(goals.friend_freekick_goals)
    .bind(goals.friend_corner_goals)
    .bind(goals.friend_own_goals)
    .fetch_one(executor)
    .await
}

/// Returns whether a row was removed
async fn delete_match_row<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM matches WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn insert_player<'e, E>(executor: E, name: &str) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO players (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl RivalryStore for PgStore {
    async fn find_player_by_name(&self, name: &str) -> Result<Player, TrackerError> {
        sqlx::query_as::<_, Player>("SELECT * FROM players WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| TrackerError::player_not_found(name))
    }

    async fn list_players(&self) -> Result<Vec<Player>, TrackerError> {
        let players = sqlx::query_as::<_, Player>("SELECT * FROM players ORDER BY created_at ASC, name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(players)
    }

    async fn apply_increment(
        &self,
        name: &str,
        increments: &StatIncrements,
    ) -> Result<Player, TrackerError> {
        debug!("Incrementing player {}: {:?}", name, increments);
        increment_player(&self.pool, name, increments)
            .await
            .map_err(|e| increment_error(e, name))?
            .ok_or_else(|| TrackerError::player_not_found(name))
    }

    async fn replace_fields(
        &self,
        name: &str,
        fields: &PlayerFieldsUpdate,
    ) -> Result<Player, TrackerError> {
        let patch = fields.stats.unwrap_or_default();
        sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET
                total_matches = COALESCE($2, total_matches),
                total_goals = COALESCE($3, total_goals),
                wins = COALESCE($4, wins),
                draws = COALESCE($5, draws),
                losses = COALESCE($6, losses),
                penalty_goals = COALESCE($7, penalty_goals),
                freekick_goals = COALESCE($8, freekick_goals),
                corner_goals = COALESCE($9, corner_goals),
                own_goals = COALESCE($10, own_goals),
                conceded_matches = COALESCE($11, conceded_matches),
                updated_at = NOW()
            WHERE name = $1
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(patch.total_matches)
        .bind(patch.total_goals)
        .bind(patch.wins)
        .bind(patch.draws)
        .bind(patch.losses)
        .bind(patch.penalty_goals)
        .bind(patch.freekick_goals)
        .bind(patch.corner_goals)
        .bind(patch.own_goals)
        .bind(fields.conceded_matches)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TrackerError::player_not_found(name))
    }

    async fn append_match(&self, payload: &MatchPayload) -> Result<MatchRecord, TrackerError> {
        Ok(insert_match(&self.pool, payload).await?)
    }

    async fn list_matches(&self) -> Result<Vec<MatchRecord>, TrackerError> {
        let matches = sqlx::query_as::<_, MatchRecord>("SELECT * FROM matches ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(matches)
    }

    async fn update_match(
        &self,
        id: Uuid,
        payload: &MatchPayload,
    ) -> Result<MatchRecord, TrackerError> {
        let goals = &payload.goals;
        sqlx::query_as::<_, MatchRecord>(
            r#"
            UPDATE matches
            SET
                match_date = $2,
                result = $3,
                me_normal_goals = $4,
                me_penalty_goals = $5,
                me_freekick_goals = $6,
                me_corner_goals = $7,
                me_own_goals = $8,
                friend_normal_goals = $9,
                friend_penalty_goals = $10,
                friend_freekick_goals = $11,
                friend_corner_goals = $12,
                friend_own_goals = $13,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.match_date)
        .bind(payload.result)
        .bind(goals.me_normal_goals)
        .bind(goals.me_penalty_goals)
        .bind(goals.me_freekick_goals)
        .bind(goals.me_corner_goals)
        .bind(goals.me_own_goals)
        .bind(goals.friend_normal_goals)
        .bind(goals.friend_penalty_goals)
        .bind(goals.friend_freekick_goals)
        .bind(goals.friend_corner_goals)
        .bind(goals.friend_own_goals)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TrackerError::match_not_found(id))
    }

    async fn delete_match(&self, id: Uuid) -> Result<(), TrackerError> {
        if delete_match_row(&self.pool, id).await? {
            Ok(())
        } else {
            Err(TrackerError::match_not_found(id))
        }
    }

    async fn apply_match(
        &self,
        roster: &Roster,
        deltas: &MatchDeltas,
        log: LogChange<'_>,
    ) -> Result<AppliedMatch, TrackerError> {
        let mut tx = self.pool.begin().await?;

        let me = increment_player(&mut *tx, &roster.me, &deltas.me)
            .await
            .map_err(|e| increment_error(e, &roster.me))?
            .ok_or_else(|| TrackerError::player_not_found(&roster.me))?;
        let friend = increment_player(&mut *tx, &roster.friend, &deltas.friend)
            .await
            .map_err(|e| increment_error(e, &roster.friend))?
            .ok_or_else(|| TrackerError::player_not_found(&roster.friend))?;

        let logged = match log {
            LogChange::Append(payload) => Some(insert_match(&mut *tx, payload).await?),
            LogChange::Remove(id) => {
                if !delete_match_row(&mut *tx, id).await? {
                    // Dropping the transaction rolls back both increments
                    return Err(TrackerError::match_not_found(id));
                }
                None
            }
            LogChange::Keep => None,
        };

        tx.commit().await?;

        Ok(AppliedMatch { me, friend, logged })
    }

    async fn seed_players(&self, roster: &Roster) -> Result<usize, TrackerError> {
        let mut tx = self.pool.begin().await?;
        let mut created = 0;
        for name in roster.names() {
            if insert_player(&mut *tx, name).await? {
                created += 1;
            }
        }
        tx.commit().await?;

        if created > 0 {
            info!("Seeded {} roster player(s)", created);
        } else {
            info!("Roster players already present, skipping seed");
        }
        Ok(created)
    }

    async fn reset(&self, roster: &Roster) -> Result<Vec<Player>, TrackerError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM matches").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM players").execute(&mut *tx).await?;
        for name in roster.names() {
            insert_player(&mut *tx, name).await?;
        }
        tx.commit().await?;

        info!("Reset all players and match history");
        self.list_players().await
    }
}
