//! Remembers that the password screen was passed.
//!
//! This is a convenience gate for the client UI only. The service never sees
//! the flag and nothing it exposes is protected by it.

use crate::client::errors::ClientError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    auth: bool,
}

#[derive(Debug, Clone)]
pub struct SessionGate {
    path: PathBuf,
    password: String,
}

impl SessionGate {
    pub fn new(path: impl Into<PathBuf>, password: &str) -> Self {
        Self {
            path: path.into(),
            password: password.to_string(),
        }
    }

    /// A missing or unreadable file means the gate was never passed.
    pub fn is_authenticated(&self) -> bool {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|data| serde_json::from_str::<SessionFile>(&data).ok())
            .map(|session| session.auth)
            .unwrap_or(false)
    }

    pub fn login(&self, attempt: &str) -> Result<bool, ClientError> {
        if attempt != self.password {
            debug!("wrong gate password");
            return Ok(false);
        }
        fs::write(&self.path, serde_json::to_string(&SessionFile { auth: true })?)?;
        Ok(true)
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
