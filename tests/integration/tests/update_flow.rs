//! End-to-end update runs against the encrypted file store.

use oktakey_core::{AccountKey, BackendType, CredentialRecord, MfaConfig, SecretString};
use oktakey_creds::{PromptError, UpdateError, UpdateRequest, UpdateWorkflow, ValidationError};
use oktakey_integration_tests::{file_store, seed, stored, FileStoreSource, ScriptedPrompt};
use oktakey_secrets::{SecretStore, StoreOptions};
use tempfile::TempDir;

fn source(dir: &TempDir) -> FileStoreSource {
    FileStoreSource {
        dir: dir.path().to_path_buf(),
    }
}

#[test]
fn test_alice_gets_new_password() {
    let dir = TempDir::new().unwrap();
    let account = AccountKey::default_account();
    let store = file_store(dir.path());
    seed(&store, &account, &CredentialRecord::new("alice", "old"));

    let prompt = ScriptedPrompt::answering("new-pw");
    let outcome = UpdateWorkflow::new(&source(&dir), &prompt)
        .run(&UpdateRequest::default())
        .unwrap();

    assert_eq!(outcome.backend, "file");
    assert_eq!(outcome.username, "alice");
    assert_eq!(outcome.mfa, None);
    assert_eq!(
        stored(&store, &account),
        CredentialRecord::new("alice", "new-pw")
    );
    assert_eq!(prompt.calls(), 1);
}

#[test]
fn test_stored_mfa_survives_update() {
    let dir = TempDir::new().unwrap();
    let account = AccountKey::default_account();
    let store = file_store(dir.path());
    let original = CredentialRecord::new("alice", "old").with_mfa(MfaConfig {
        provider: Some("duo".to_string()),
        factor: Some("push".to_string()),
        device: Some("phone1".to_string()),
    });
    seed(&store, &account, &original);

    UpdateWorkflow::new(&source(&dir), &ScriptedPrompt::answering("new-pw"))
        .run(&UpdateRequest::default())
        .unwrap();

    let updated = stored(&store, &account);
    assert_eq!(updated.secret, SecretString::new("new-pw"));
    assert_eq!(updated.username, original.username);
    assert_eq!(updated.mfa_config, original.mfa_config);
}

#[test]
fn test_empty_password_keeps_old_record() {
    let dir = TempDir::new().unwrap();
    let account = AccountKey::default_account();
    let store = file_store(dir.path());
    let original = CredentialRecord::new("alice", "old");
    seed(&store, &account, &original);

    let err = UpdateWorkflow::new(&source(&dir), &ScriptedPrompt::answering(""))
        .run(&UpdateRequest::default())
        .unwrap_err();

    assert!(matches!(
        err,
        UpdateError::Validation(ValidationError::EmptySecret)
    ));
    assert_eq!(stored(&store, &account), original);
}

#[test]
fn test_unsupported_factor_keeps_old_record() {
    let dir = TempDir::new().unwrap();
    let account = AccountKey::default_account();
    let store = file_store(dir.path());
    let original = CredentialRecord::new("alice", "old");
    seed(&store, &account, &original);

    let request = UpdateRequest {
        mfa_overrides: MfaConfig {
            provider: Some("duo".to_string()),
            factor: Some("totp".to_string()),
            device: Some("phone1".to_string()),
        },
        ..Default::default()
    };
    let err = UpdateWorkflow::new(&source(&dir), &ScriptedPrompt::answering("new-pw"))
        .run(&request)
        .unwrap_err();

    assert!(matches!(
        err,
        UpdateError::Validation(ValidationError::UnsupportedCombination { .. })
    ));
    assert_eq!(stored(&store, &account), original);
}

#[test]
fn test_missing_record_is_not_created() {
    let dir = TempDir::new().unwrap();
    let prompt = ScriptedPrompt::answering("new-pw");

    let err = UpdateWorkflow::new(&source(&dir), &prompt)
        .run(&UpdateRequest::default())
        .unwrap_err();

    assert!(matches!(err, UpdateError::NotFound(_)));
    assert_eq!(prompt.calls(), 0);
    assert!(!file_store(dir.path()).exists("okta-creds").unwrap());
}

#[test]
fn test_undecodable_record_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let account = AccountKey::default_account();
    let store = file_store(dir.path());
    store
        .set(&oktakey_secrets::Item::new(
            account.as_str(),
            b"{\"user\":".to_vec(),
            "okta credentials",
        ))
        .unwrap();
    let before = std::fs::read(dir.path().join("okta-creds.json")).unwrap();
    let prompt = ScriptedPrompt::answering("new-pw");

    let err = UpdateWorkflow::new(&source(&dir), &prompt)
        .run(&UpdateRequest::default())
        .unwrap_err();

    assert!(matches!(err, UpdateError::CorruptRecord { .. }));
    assert_eq!(prompt.calls(), 0);
    assert_eq!(std::fs::read(dir.path().join("okta-creds.json")).unwrap(), before);
}

#[test]
fn test_wrong_master_key_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let account = AccountKey::default_account();
    let other_key = oktakey_secrets::FileSecretStore::new(
        dir.path().to_path_buf(),
        zeroize::Zeroizing::new(vec![0x01; 32]),
    );
    seed(&other_key, &account, &CredentialRecord::new("alice", "old"));

    let err = UpdateWorkflow::new(&source(&dir), &ScriptedPrompt::answering("new-pw"))
        .run(&UpdateRequest::default())
        .unwrap_err();

    assert!(matches!(err, UpdateError::CorruptRecord { .. }));
}

#[test]
fn test_unimplemented_backend_never_prompts() {
    let dir = TempDir::new().unwrap();
    let options = StoreOptions::new(vec![BackendType::Pass], dir.path().to_path_buf());
    let prompt = ScriptedPrompt::answering("new-pw");

    let err = UpdateWorkflow::new(&options, &prompt)
        .run(&UpdateRequest::default())
        .unwrap_err();

    assert!(matches!(err, UpdateError::StoreUnavailable(_)));
    assert_eq!(prompt.calls(), 0);
}

#[test]
fn test_prompt_abort_keeps_old_record() {
    let dir = TempDir::new().unwrap();
    let account = AccountKey::default_account();
    let store = file_store(dir.path());
    let original = CredentialRecord::new("alice", "old");
    seed(&store, &account, &original);

    let err = UpdateWorkflow::new(&source(&dir), &ScriptedPrompt::failing(|| PromptError::Aborted))
        .run(&UpdateRequest::default())
        .unwrap_err();

    assert!(matches!(err, UpdateError::PromptAborted(_)));
    assert_eq!(stored(&store, &account), original);
}

#[test]
fn test_override_written_with_new_password() {
    let dir = TempDir::new().unwrap();
    let account = AccountKey::default_account();
    let store = file_store(dir.path());
    seed(
        &store,
        &account,
        &CredentialRecord::new("alice", "old").with_mfa(MfaConfig::with_factor("push")),
    );

    let request = UpdateRequest {
        mfa_overrides: MfaConfig {
            factor: Some("token:hardware".to_string()),
            device: Some("yubi-01".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    UpdateWorkflow::new(&source(&dir), &ScriptedPrompt::answering("new-pw"))
        .run(&request)
        .unwrap();

    let updated = stored(&store, &account);
    assert_eq!(updated.secret, SecretString::new("new-pw"));
    let mfa = updated.mfa_config.unwrap();
    assert_eq!(mfa.factor.as_deref(), Some("token:hardware"));
    assert_eq!(mfa.device.as_deref(), Some("yubi-01"));
}

#[test]
fn test_accounts_are_independent() {
    let dir = TempDir::new().unwrap();
    let store = file_store(dir.path());
    let default = AccountKey::default_account();
    let work = AccountKey::from_alias(Some("work")).unwrap();
    seed(&store, &default, &CredentialRecord::new("alice", "old"));
    seed(&store, &work, &CredentialRecord::new("alice@work", "old-work"));

    UpdateWorkflow::new(&source(&dir), &ScriptedPrompt::answering("new-work"))
        .run(&UpdateRequest {
            account: work.clone(),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(stored(&store, &default), CredentialRecord::new("alice", "old"));
    assert_eq!(
        stored(&store, &work),
        CredentialRecord::new("alice@work", "new-work")
    );
}

#[test]
fn test_repeated_updates() {
    let dir = TempDir::new().unwrap();
    let account = AccountKey::default_account();
    let store = file_store(dir.path());
    seed(&store, &account, &CredentialRecord::new("alice", "v0"));

    for pw in ["v1", "v2", "v3"] {
        UpdateWorkflow::new(&source(&dir), &ScriptedPrompt::answering(pw))
            .run(&UpdateRequest::default())
            .unwrap();
    }

    assert_eq!(stored(&store, &account), CredentialRecord::new("alice", "v3"));
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
