use bevy::prelude::*;
use std::collections::HashMap;
use std::io::ErrorKind;

pub const BEST_TIMES_PATH: &str = "best_times.json";

/// Best finish time per track id, in milliseconds. Loaded once at startup
/// and written back whenever a record falls; a missing or unreadable file
/// just means no records yet.
#[derive(Resource, Default)]
pub struct BestTimes {
    path: String,
    times: HashMap<String, u64>,
}

impl BestTimes {
    pub fn load(path: &str) -> Self {
        let times = match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(times) => times,
                Err(err) => {
                    warn!("failed to parse {path}: {err}");
                    HashMap::new()
                }
            },
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    warn!("failed to read {path}: {err}");
                }
                HashMap::new()
            }
        };
        Self {
            path: path.to_string(),
            times,
        }
    }

    pub fn get(&self, track_id: &str) -> Option<u64> {
        self.times.get(track_id).copied()
    }

    /// Store a new best for the track and persist the table. The caller
    /// decides whether the time actually beats the old record.
    pub fn record(&mut self, track_id: &str, millis: u64) {
        self.times.insert(track_id.to_string(), millis);
        match serde_json::to_string_pretty(&self.times) {
            Ok(text) => {
                if let Err(err) = std::fs::write(&self.path, text) {
                    warn!("failed to write {}: {err}", self.path);
                }
            }
            Err(err) => warn!("failed to serialize best times: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_no_records() {
        let times = BestTimes::load("does/not/exist.json");
        assert_eq!(times.get("classic"), None);
    }

    #[test]
    fn records_round_trip_through_the_file() {
        let path = std::env::temp_dir().join("apex_circuit_best_times.json");
        let path = path.to_str().unwrap();
        let _ = std::fs::remove_file(path);

        let mut times = BestTimes::load(path);
        times.record("classic", 83_456);

        let reloaded = BestTimes::load(path);
        assert_eq!(reloaded.get("classic"), Some(83_456));
        assert_eq!(reloaded.get("speedway"), None);
    }
}
