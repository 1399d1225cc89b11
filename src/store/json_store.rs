use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::session::record::PracticeSession;

const HISTORY_FILE: &str = "history.json";
const API_KEY_FILE: &str = "api_key";

/// File IO layer for durable state under the user data dir. Reads fail
/// soft (missing or unparseable content loads as the default); writes go
/// through a tmp file + fsync + rename so a crash mid-write never leaves a
/// truncated file behind.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("casedr");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(name, json.as_bytes())
    }

    fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Practice history, persisted as a bare JSON array of session records.
    /// Absent or corrupt content loads as empty rather than failing the app.
    pub fn load_history(&self) -> Vec<PracticeSession> {
        self.load(HISTORY_FILE)
    }

    pub fn save_history(&self, sessions: &[PracticeSession]) -> Result<()> {
        self.save(HISTORY_FILE, &sessions)
    }

    /// The API credential is a raw string, not JSON.
    pub fn load_api_key(&self) -> Option<String> {
        let content = fs::read_to_string(self.file_path(API_KEY_FILE)).ok()?;
        let key = content.trim().to_string();
        (!key.is_empty()).then_some(key)
    }

    pub fn save_api_key(&self, key: &str) -> Result<()> {
        self.write_atomic(API_KEY_FILE, key.trim().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn session(case_type: &str, duration: u64) -> PracticeSession {
        PracticeSession {
            case_type: case_type.to_string(),
            industry: Some("Retail & E-commerce".to_string()),
            duration,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn history_round_trip() {
        let (_dir, store) = make_test_store();
        let sessions = vec![session("Market Entry", 300), session("Pricing Strategy", 90)];
        store.save_history(&sessions).unwrap();

        let loaded = store.load_history();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].case_type, "Market Entry");
        assert_eq!(loaded[1].duration, 90);
    }

    #[test]
    fn missing_history_loads_empty() {
        let (_dir, store) = make_test_store();
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn corrupt_history_loads_empty() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(HISTORY_FILE), "{not json]").unwrap();
        assert!(store.load_history().is_empty());

        // Wrong shape (object instead of array) also falls back to empty.
        fs::write(store.file_path(HISTORY_FILE), r#"{"caseType": "x"}"#).unwrap();
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn history_is_persisted_as_bare_array() {
        let (_dir, store) = make_test_store();
        store.save_history(&[session("Market Sizing", 120)]).unwrap();

        let raw = fs::read_to_string(store.file_path(HISTORY_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let array = value.as_array().expect("history file holds a JSON array");
        assert_eq!(array[0]["caseType"], "Market Sizing");
        assert_eq!(array[0]["duration"], 120);
    }

    #[test]
    fn api_key_round_trip_and_trim() {
        let (_dir, store) = make_test_store();
        assert!(store.load_api_key().is_none());

        store.save_api_key("  sk-test-123  \n").unwrap();
        assert_eq!(store.load_api_key().as_deref(), Some("sk-test-123"));
    }

    #[test]
    fn blank_api_key_reads_as_absent() {
        let (_dir, store) = make_test_store();
        store.save_api_key("   ").unwrap();
        assert!(store.load_api_key().is_none());
    }

    #[test]
    fn save_replaces_and_leaves_no_tmp_file() {
        let (dir, store) = make_test_store();
        store.save_history(&[session("A", 1)]).unwrap();
        store.save_history(&[session("B", 2)]).unwrap();

        let loaded = store.load_history();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].case_type, "B");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
