use crate::errors::AppError;
use crate::models::Session;

const SESSION_KEY: &[u8] = b"session";

/// Device-local persistence for the serialized session. The whole store is
/// wiped on logout, not just the session key.
pub struct SessionVault {
    db: sled::Db,
}

impl SessionVault {
    pub fn open(path: &str) -> Result<Self, AppError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// In-memory vault for tests.
    #[allow(dead_code)]
    pub fn temporary() -> Result<Self, AppError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    pub fn save(&self, session: &Session) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(session)?;
        self.db.insert(SESSION_KEY, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    pub fn load(&self) -> Result<Option<Session>, AppError> {
        match self.db.get(SESSION_KEY)? {
            Some(bytes) => {
                let session = serde_json::from_slice(&bytes)?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    pub fn wipe(&self) -> Result<(), AppError> {
        self.db.clear()?;
        self.db.flush()?;
        Ok(())
    }
}
