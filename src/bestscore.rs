//! Best score persistence
//!
//! A single scalar: the highest round score ever achieved. Persisted to
//! LocalStorage on wasm; native builds keep it in memory only.

use serde::{Deserialize, Serialize};

/// Persisted best score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub best: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bop_rush_best_v1";

    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished round in; true if it set a new best
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<BestScore>(&json) {
                    log::info!("Loaded best score: {}", best.best);
                    return best;
                }
            }
        }

        log::info!("No stored best score, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved ({})", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_maximum() {
        let mut store = BestScore::new();
        assert!(store.record(120));
        assert!(!store.record(120));
        assert!(!store.record(80));
        assert_eq!(store.best, 120);
        assert!(store.record(121));
        assert_eq!(store.best, 121);
    }

    #[test]
    fn test_zero_round_never_beats_default() {
        let mut store = BestScore::new();
        assert!(!store.record(0));
        assert_eq!(store.best, 0);
    }
}
