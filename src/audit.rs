use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::StoreResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub action: String,
    pub resource: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Append one audit record to the JSONL log at `path`.
pub fn log_audit(
    path: &Path,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> StoreResult<()> {
    let entry = AuditEntry {
        id: Uuid::new_v4(),
        action: action.to_string(),
        resource: resource.map(str::to_string),
        metadata,
        created_at: Utc::now(),
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", serde_json::to_string(&entry)?)?;

    Ok(())
}
