//! Tournament manager for spawning and tracking tournament actors.

use super::{
    actor::{TournamentActor, TournamentHandle},
    config::TournamentConfig,
    errors::TournamentResult,
    models::{TournamentId, TournamentState},
};
use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Registry of live tournament actors
#[derive(Clone)]
pub struct TournamentManager {
    /// Configuration for newly spawned actors
    config: TournamentConfig,

    /// Active tournament handles
    tournaments: Arc<RwLock<HashMap<TournamentId, TournamentHandle>>>,
}

impl TournamentManager {
    /// Create a new tournament manager
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration applied to every tournament it spawns
    pub fn new(config: TournamentConfig) -> TournamentResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tournaments: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Handle for `id`, spawning a new actor the first time the id is
    /// referenced (or after the previous actor has stopped).
    pub async fn get_or_create(&self, id: TournamentId, start_at: DateTime<Utc>) -> TournamentHandle {
        let mut tournaments = self.tournaments.write().await;
        if let Some(handle) = tournaments.get(&id)
            && !handle.is_closed()
        {
            return handle.clone();
        }

        let handle = TournamentActor::spawn(id, start_at, self.config.clone());
        tournaments.insert(id, handle.clone());
        log::info!("Spawned tournament {} starting at {}", id, start_at);
        handle
    }

    /// Handle for a live tournament
    pub async fn get(&self, id: TournamentId) -> Option<TournamentHandle> {
        let tournaments = self.tournaments.read().await;
        tournaments
            .get(&id)
            .filter(|handle| !handle.is_closed())
            .cloned()
    }

    /// Forget a tournament. Its actor stops once other handles are dropped.
    pub async fn remove(&self, id: TournamentId) -> bool {
        self.tournaments.write().await.remove(&id).is_some()
    }

    /// Ids of registered tournaments, ascending
    pub async fn list(&self) -> Vec<TournamentId> {
        let tournaments = self.tournaments.read().await;
        let mut ids: Vec<_> = tournaments.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Drop completed or stopped tournaments from the registry
    ///
    /// # Returns
    ///
    /// * `usize` - Number of tournaments removed
    pub async fn prune_completed(&self) -> usize {
        let handles: Vec<_> = {
            let tournaments = self.tournaments.read().await;
            tournaments.values().cloned().collect()
        };

        let mut finished = Vec::new();
        for handle in handles {
            match handle.state().await {
                Ok(snapshot) if snapshot.state != TournamentState::Completed => {}
                _ => finished.push(handle.tournament_id()),
            }
        }

        let mut tournaments = self.tournaments.write().await;
        for id in &finished {
            tournaments.remove(id);
            log::info!("Pruned tournament {}", id);
        }
        finished.len()
    }
}
