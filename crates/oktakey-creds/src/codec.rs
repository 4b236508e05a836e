//! JSON codec for stored credential records.

use oktakey_core::CredentialRecord;
use zeroize::Zeroizing;

/// Serialize a record to the bytes kept in the secret store.
///
/// The returned buffer is zeroed on drop since it holds the password.
pub fn encode(record: &CredentialRecord) -> Zeroizing<Vec<u8>> {
    // String keys and string/option values only; serialization cannot fail.
    Zeroizing::new(serde_json::to_vec(record).expect("credential record serializes to JSON"))
}

/// Parse stored bytes back into a record.
pub fn decode(bytes: &[u8]) -> Result<CredentialRecord, serde_json::Error> {
    serde_json::from_slice(bytes)
}
