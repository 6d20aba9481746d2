//! The connected wallet session.
//!
//! The session is read-only for the rest of the app: it hands out the
//! connected account and a shared signer, and is never mutated after
//! startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::signer::{KeypairSigner, TransactionSigner};
use crate::domain::Pubkey;

/// The account connected for this run, if any.
#[derive(Clone, Default)]
pub struct WalletSession {
    signer: Option<Arc<dyn TransactionSigner>>,
    source: Option<PathBuf>,
    load_error: Option<String>,
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("payer", &self.payer())
            .field("source", &self.source)
            .field("load_error", &self.load_error)
            .finish()
    }
}

impl WalletSession {
    /// A session with no connected account.
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// A session connected through an existing signer.
    #[must_use]
    pub fn connected(signer: Arc<dyn TransactionSigner>) -> Self {
        Self {
            signer: Some(signer),
            source: None,
            load_error: None,
        }
    }

    /// Connects by loading a keypair file.
    ///
    /// A missing or invalid file leaves the session disconnected and keeps
    /// the reason for display.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match KeypairSigner::from_file(path) {
            Ok(signer) => {
                tracing::info!(account = %signer.pubkey(), path = %path.display(), "wallet connected");
                Self {
                    signer: Some(Arc::new(signer)),
                    source: Some(path.to_path_buf()),
                    load_error: None,
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "wallet not connected");
                Self {
                    signer: None,
                    source: Some(path.to_path_buf()),
                    load_error: Some(e.to_string()),
                }
            }
        }
    }

    /// Connected accounts; at most one for a keypair session.
    #[must_use]
    pub fn accounts(&self) -> Vec<Pubkey> {
        self.signer.iter().map(|signer| signer.pubkey()).collect()
    }

    /// The first connected account, which pays for and sends transfers.
    #[must_use]
    pub fn payer(&self) -> Option<Pubkey> {
        self.accounts().into_iter().next()
    }

    /// Shared handle to the signer of the connected account.
    #[must_use]
    pub fn signer(&self) -> Option<Arc<dyn TransactionSigner>> {
        self.signer.clone()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.signer.is_some()
    }

    /// Why loading the keypair failed, if it did.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Keypair file this session was loaded from.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
