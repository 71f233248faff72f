//! Player roster and lifetime score totals, stored as one JSON list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::storage::{PersistenceGateway, StorageError};

const PLAYERS_KEY: &str = "players/roster";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub total_shame_score: u64,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            total_shame_score: 0,
        }
    }
}

pub struct PlayerRepository {
    gateway: Arc<dyn PersistenceGateway>,
}

impl PlayerRepository {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    /// The full roster; absent or corrupted data reads as an empty list.
    pub async fn load_all(&self) -> Vec<Player> {
        let bytes = match self.gateway.get(PLAYERS_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(%err, "failed to read player roster");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(players) => players,
            Err(err) => {
                warn!(%err, "corrupted player roster, treating as empty");
                Vec::new()
            }
        }
    }

    pub async fn save_all(&self, players: &[Player]) -> Result<(), StorageError> {
        let bytes =
            serde_json::to_vec(players).map_err(|err| StorageError::Backend(err.to_string()))?;
        self.gateway.put(PLAYERS_KEY, bytes).await
    }

    pub async fn get(&self, id: Uuid) -> Option<Player> {
        self.load_all().await.into_iter().find(|p| p.id == id)
    }

    /// Updates a player in place, or appends them if unknown.
    pub async fn upsert(&self, player: Player) -> Result<(), StorageError> {
        let mut players = self.load_all().await;
        match players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player,
            None => players.push(player),
        }
        self.save_all(&players).await
    }

    /// Adds points to a player's lifetime total. Unknown ids are ignored.
    pub async fn add_score(&self, player_id: Uuid, points: u64) -> Result<(), StorageError> {
        let mut players = self.load_all().await;
        if let Some(player) = players.iter_mut().find(|p| p.id == player_id) {
            player.total_shame_score += points;
            self.save_all(&players).await?;
        }
        Ok(())
    }

    pub async fn delete(&self, player_id: Uuid) -> Result<(), StorageError> {
        let mut players = self.load_all().await;
        let before = players.len();
        players.retain(|p| p.id != player_id);
        if players.len() != before {
            self.save_all(&players).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn repository() -> PlayerRepository {
        PlayerRepository::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn empty_storage_yields_empty_roster() {
        assert!(repository().load_all().await.is_empty());
    }

    #[tokio::test]
    async fn upsert_inserts_then_replaces() {
        let repo = repository();
        let mut player = Player::new("Alex");
        repo.upsert(player.clone()).await.unwrap();

        player.name = "Alexandra".to_string();
        repo.upsert(player.clone()).await.unwrap();

        let roster = repo.load_all().await;
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Alexandra");
    }

    #[tokio::test]
    async fn add_score_accumulates_for_known_players_only() {
        let repo = repository();
        let player = Player::new("Sam");
        repo.upsert(player.clone()).await.unwrap();

        repo.add_score(player.id, 1_200).await.unwrap();
        repo.add_score(player.id, 300).await.unwrap();
        repo.add_score(Uuid::new_v4(), 999).await.unwrap();

        let stored = repo.get(player.id).await.unwrap();
        assert_eq!(stored.total_shame_score, 1_500);
        assert_eq!(repo.load_all().await.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let repo = repository();
        let keep = Player::new("Keep");
        let drop = Player::new("Drop");
        repo.upsert(keep.clone()).await.unwrap();
        repo.upsert(drop.clone()).await.unwrap();

        repo.delete(drop.id).await.unwrap();

        let roster = repo.load_all().await;
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, keep.id);
    }
}
