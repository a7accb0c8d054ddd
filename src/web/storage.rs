use web_sys::Storage;

use super::describe;
use crate::{error::StoreError, ports::StateStore};

/// One `localStorage` entry.
///
/// Storage can be switched off or throw on access (private windows,
/// sandboxed frames); that surfaces as [`StoreError::Unavailable`] on every
/// call instead of a trap.
pub struct LocalStore {
    key: String,
}

impl LocalStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_owned()))?;
        usable(window.local_storage(), describe)
    }
}

/// Folds the throw-or-null `window.localStorage` lookup into one error.
fn usable<T, E>(
    lookup: Result<Option<T>, E>,
    describe: impl FnOnce(&E) -> String,
) -> Result<T, StoreError> {
    match lookup {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(StoreError::Unavailable(
            "localStorage is disabled".to_owned(),
        )),
        Err(err) => Err(StoreError::Unavailable(describe(&err))),
    }
}

impl StateStore for LocalStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|err| StoreError::Unavailable(describe(&err)))
    }

    fn write(&self, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(&self.key, value)
            .map_err(|err| StoreError::Write(describe(&err)))
    }

    fn remove(&self) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|err| StoreError::Write(describe(&err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throwing_storage_is_unavailable() {
        let lookup: Result<Option<()>, String> = Err("SecurityError".to_owned());
        assert_eq!(
            usable(lookup, String::clone),
            Err(StoreError::Unavailable("SecurityError".to_owned()))
        );
    }

    #[test]
    fn missing_storage_is_unavailable() {
        let lookup: Result<Option<()>, String> = Ok(None);
        assert_eq!(
            usable(lookup, String::clone),
            Err(StoreError::Unavailable("localStorage is disabled".to_owned()))
        );
    }

    #[test]
    fn present_storage_is_used() {
        let lookup: Result<Option<u8>, String> = Ok(Some(7));
        assert_eq!(usable(lookup, String::clone), Ok(7));
    }
}
