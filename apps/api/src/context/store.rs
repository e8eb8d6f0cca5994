use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::context::actions::ZcvAction;
use crate::context::models::ZcvState;
use crate::errors::AppError;
use crate::persistence::{SavedData, StateStore};

/// The state container. Actions are applied under a write lock and the
/// mirrored subset is saved before the lock is released, so saves land in
/// dispatch order.
pub struct ZcvStore {
    state: RwLock<ZcvState>,
    mirror: Arc<dyn StateStore>,
}

impl ZcvStore {
    #[cfg(test)]
    pub fn new(mirror: Arc<dyn StateStore>) -> Self {
        Self {
            state: RwLock::new(ZcvState::default()),
            mirror,
        }
    }

    /// Builds the container from whatever the mirror holds. A cache that
    /// cannot be read or replayed is logged and replaced by a fresh state.
    pub async fn restore(mirror: Arc<dyn StateStore>) -> Self {
        let mut state = ZcvState::default();
        match mirror.load().await {
            Ok(Some(saved)) => {
                if let Err(e) = replay(&mut state, saved) {
                    error!("Failed to load saved data: {e}");
                    state = ZcvState::default();
                } else {
                    info!(
                        "Restored portfolio ({}% complete) and {} resumes",
                        state.portfolio.completeness,
                        state.resumes.len()
                    );
                }
            }
            Ok(None) => info!("Starting with an empty portfolio"),
            Err(e) => error!("Failed to load saved data: {e:?}"),
        }
        Self {
            state: RwLock::new(state),
            mirror,
        }
    }

    pub async fn dispatch(&self, action: ZcvAction) -> Result<(), AppError> {
        self.dispatch_with(action, |_| ()).await
    }

    /// Applies `action`, then evaluates `read` against the new state while
    /// still holding the lock.
    pub async fn dispatch_with<R, F>(&self, action: ZcvAction, read: F) -> Result<R, AppError>
    where
        F: FnOnce(&ZcvState) -> R,
    {
        let name = action.name();
        let persist = action.touches_saved_data();

        let mut state = self.state.write().await;
        if let Err(e) = state.apply(action) {
            warn!("Rejected {name}: {e}");
            return Err(e);
        }
        let result = read(&*state);

        if persist {
            let saved = SavedData::from(&*state);
            self.mirror
                .save(&saved)
                .await
                .map_err(|e| {
                    error!("Failed to save {name} to the local mirror: {e:#}");
                    AppError::Storage(format!("{e:#}"))
                })?;
        }
        Ok(result)
    }

    pub async fn read<R>(&self, f: impl FnOnce(&ZcvState) -> R) -> R {
        let state = self.state.read().await;
        f(&*state)
    }

    pub async fn snapshot(&self) -> ZcvState {
        self.state.read().await.clone()
    }
}

fn replay(state: &mut ZcvState, saved: SavedData) -> Result<(), AppError> {
    if let Some(portfolio) = saved.portfolio {
        state.apply(ZcvAction::LoadPortfolio(portfolio))?;
    }
    for resume in saved.resumes.unwrap_or_default() {
        state.apply(ZcvAction::AddResume(resume))?;
    }
    Ok(())
}
