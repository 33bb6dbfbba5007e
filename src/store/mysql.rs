use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::info;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{FromRow, MySql, MySqlPool, Transaction};

use super::GroupStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{Group, GroupId, Member};

const MIGRATIONS: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS Groups_ (
        group_id   CHAR(36)     NOT NULL PRIMARY KEY,
        topic      VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        created_at DATETIME(6)  NOT NULL,
        INDEX idx_groups_topic (topic)
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS GroupMembers_ (
        group_id    CHAR(36)     NOT NULL,
        position    INT          NOT NULL,
        member_name VARCHAR(255) NOT NULL,
        roll_number VARCHAR(64)  CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        PRIMARY KEY (group_id, position),
        UNIQUE KEY uq_group_members_roll_number (roll_number),
        FOREIGN KEY (group_id) REFERENCES Groups_ (group_id) ON DELETE CASCADE
    )"#,
];

#[derive(FromRow)]
struct GroupRow {
    group_id: String,
    topic: String,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct MemberRow {
    group_id: String,
    member_name: String,
    roll_number: String,
}

/// Groups stored in MySQL. Members live in their own table so the roll number can carry a
/// unique index.
#[derive(Clone)]
pub struct MySqlGroupStore {
    pool: MySqlPool,
}

impl MySqlGroupStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlGroupStore { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the tables if they do not exist yet.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        for statement in MIGRATIONS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    async fn members_of(&self, group_id: &str) -> StoreResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            "SELECT group_id, member_name, roll_number FROM GroupMembers_
             WHERE group_id = ? ORDER BY position",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MemberRow::into_member).collect())
    }
}

impl MemberRow {
    fn into_member(self) -> Member {
        Member {
            name: self.member_name,
            roll_number: self.roll_number,
        }
    }
}

impl GroupRow {
    fn into_group(self, members: Vec<Member>) -> StoreResult<Group> {
        let id = self
            .group_id
            .parse::<GroupId>()
            .map_err(|e| StoreError::Corrupt(format!("group id {}: {}", self.group_id, e)))?;
        Ok(Group {
            id,
            topic: self.topic,
            members,
            created_at: self.created_at,
        })
    }
}

/// A unique-index violation while inserting one member row can only come from that member's
/// roll number, since `(group_id, position)` never repeats within a group.
fn classify(e: sqlx::Error, roll_number: &str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::DuplicateRollNumber(roll_number.to_string())
        }
        _ => StoreError::Database(e),
    }
}

async fn insert_members(tx: &mut Transaction<'_, MySql>, group: &Group) -> StoreResult<()> {
    let group_id = group.id.to_string();
    for (position, member) in group.members.iter().enumerate() {
        sqlx::query(
            "INSERT INTO GroupMembers_ (group_id, position, member_name, roll_number) VALUES (?, ?, ?, ?)",
        )
        .bind(&group_id)
        .bind(position as i32)
        .bind(&member.name)
        .bind(&member.roll_number)
        .execute(&mut **tx)
        .await
        .map_err(|e| classify(e, &member.roll_number))?;
    }
    Ok(())
}

impl GroupStore for MySqlGroupStore {
    async fn list_all(&self) -> StoreResult<Vec<Group>> {
        let groups = sqlx::query_as::<_, GroupRow>(
            "SELECT group_id, topic, created_at FROM Groups_ ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        let members = sqlx::query_as::<_, MemberRow>(
            "SELECT group_id, member_name, roll_number FROM GroupMembers_ ORDER BY group_id, position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_group: HashMap<String, Vec<Member>> = HashMap::new();
        for row in members {
            by_group.entry(row.group_id.clone()).or_default().push(row.into_member());
        }

        groups
            .into_iter()
            .map(|row| {
                let members = by_group.remove(&row.group_id).unwrap_or_default();
                row.into_group(members)
            })
            .collect()
    }

    async fn find_by_id(&self, id: &GroupId) -> StoreResult<Option<Group>> {
        let group_id = id.to_string();
        let row = sqlx::query_as::<_, GroupRow>(
            "SELECT group_id, topic, created_at FROM Groups_ WHERE group_id = ?",
        )
        .bind(&group_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let members = self.members_of(&group_id).await?;
                row.into_group(members).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn find_by_roll_number(&self, roll_number: &str) -> StoreResult<Option<Group>> {
        let group_id: Option<String> =
            sqlx::query_scalar("SELECT group_id FROM GroupMembers_ WHERE roll_number = ?")
                .bind(roll_number)
                .fetch_optional(&self.pool)
                .await?;

        match group_id {
            Some(group_id) => {
                let id = group_id
                    .parse::<GroupId>()
                    .map_err(|e| StoreError::Corrupt(format!("group id {}: {}", group_id, e)))?;
                self.find_by_id(&id).await
            }
            None => Ok(None),
        }
    }

    async fn topic_counts(&self) -> StoreResult<HashMap<String, usize>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT topic, COUNT(*) AS count FROM Groups_ GROUP BY topic",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(topic, count)| (topic, count.max(0) as usize))
            .collect())
    }

    async fn insert(&self, group: &Group) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO Groups_ (group_id, topic, created_at) VALUES (?, ?, ?)")
            .bind(group.id.to_string())
            .bind(&group.topic)
            .bind(group.created_at)
            .execute(&mut *tx)
            .await?;

        insert_members(&mut tx, group).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn replace(&self, group: &Group) -> StoreResult<bool> {
        let group_id = group.id.to_string();
        let mut tx = self.pool.begin().await?;

        let exists: Option<String> =
            sqlx::query_scalar("SELECT group_id FROM Groups_ WHERE group_id = ? FOR UPDATE")
                .bind(&group_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        sqlx::query("UPDATE Groups_ SET topic = ? WHERE group_id = ?")
            .bind(&group.topic)
            .bind(&group_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM GroupMembers_ WHERE group_id = ?")
            .bind(&group_id)
            .execute(&mut *tx)
            .await?;

        insert_members(&mut tx, group).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete(&self, id: &GroupId) -> StoreResult<bool> {
        let group_id = id.to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM GroupMembers_ WHERE group_id = ?")
            .bind(&group_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM Groups_ WHERE group_id = ?")
            .bind(&group_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }
}
