use keyring::Entry;
use tracing::{info, warn};

use crate::ai::provider::KEYCHAIN_ACCOUNT;
use crate::error::SettingsError;

fn entry(service: &str) -> Result<Entry, SettingsError> {
    Entry::new(service, KEYCHAIN_ACCOUNT).map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", service, e);
        SettingsError::Keychain(e.to_string())
    })
}

/// Read a key, mapping "no entry" to `None`.
pub(crate) fn read_api_key(service: &str) -> Result<Option<String>, SettingsError> {
    match entry(service)?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => {
            warn!("Failed to get password for {}: {}", service, e);
            Err(SettingsError::Keychain(e.to_string()))
        }
    }
}

#[tauri::command]
pub fn set_api_key(service: &str, key: &str) -> Result<(), String> {
    info!("Setting API key for service: {}", service);
    entry(service)?.set_password(key).map_err(|e| {
        warn!("Failed to set password for {}: {}", service, e);
        SettingsError::Keychain(e.to_string()).into()
    })
}

#[tauri::command]
pub fn get_api_key(service: &str) -> Result<Option<String>, String> {
    info!("Getting API key for service: {}", service);
    let key = read_api_key(service)?;
    if key.is_none() {
        info!("No API key found for service: {}", service);
    }
    Ok(key)
}

#[tauri::command]
pub fn delete_api_key(service: &str) -> Result<(), String> {
    info!("Deleting API key for service: {}", service);
    entry(service)?.delete_credential().map_err(|e| {
        warn!("Failed to delete credential for {}: {}", service, e);
        SettingsError::Keychain(e.to_string()).into()
    })
}
