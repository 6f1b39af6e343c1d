//! One-shot messages carried across a redirect in the session.

use tower_sessions::Session;

use crate::error::{Error, Result};

const FLASH_KEY: &str = "_flashes";

pub async fn flash(session: &Session, message: impl Into<String>) -> Result<()> {
    let mut messages: Vec<String> = session
        .get(FLASH_KEY)
        .await
        .map_err(|e| Error::Session(e.to_string()))?
        .unwrap_or_default();
    messages.push(message.into());
    session
        .insert(FLASH_KEY, messages)
        .await
        .map_err(|e| Error::Session(e.to_string()))
}

/// Returns pending messages and clears them.
pub async fn take_flashes(session: &Session) -> Result<Vec<String>> {
    let messages: Option<Vec<String>> = session
        .remove(FLASH_KEY)
        .await
        .map_err(|e| Error::Session(e.to_string()))?;
    Ok(messages.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    #[tokio::test]
    async fn test_flashes_are_consumed_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        flash(&session, "first").await.unwrap();
        flash(&session, "second").await.unwrap();

        assert_eq!(take_flashes(&session).await.unwrap(), ["first", "second"]);
        assert!(take_flashes(&session).await.unwrap().is_empty());
    }
}
