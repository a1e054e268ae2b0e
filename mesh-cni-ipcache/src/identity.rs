use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use ahash::HashMap;
use mesh_cni_ebpf_common::{IdentityId, RESERVED_IDENTITY_MAX};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Numeric identity assigned by the allocator to a set of labels.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NumericIdentity(IdentityId);

impl NumericIdentity {
    pub const UNKNOWN: NumericIdentity = NumericIdentity(0);

    pub const fn new(id: IdentityId) -> Self {
        Self(id)
    }

    pub const fn get(self) -> IdentityId {
        self.0
    }

    pub const fn is_reserved(self) -> bool {
        self.0 < RESERVED_IDENTITY_MAX
    }
}

impl From<IdentityId> for NumericIdentity {
    fn from(value: IdentityId) -> Self {
        Self(value)
    }
}

impl From<NumericIdentity> for IdentityId {
    fn from(value: NumericIdentity) -> Self {
        value.0
    }
}

impl Display for NumericIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Label set an identity was allocated for.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub namespace_labels: BTreeMap<String, String>,
    pub pod_labels: BTreeMap<String, String>,
    pub reserved_labels: BTreeMap<String, String>,
}

impl Labels {
    pub fn to_hashmap(&self) -> HashMap<String, String> {
        let mut map = HashMap::default();
        for (k, v) in self.namespace_labels.iter() {
            map.insert(k.to_owned(), v.to_owned());
        }
        for (k, v) in self.pod_labels.iter() {
            map.insert(k.to_owned(), v.to_owned());
        }
        for (k, v) in self.reserved_labels.iter() {
            map.insert(k.to_owned(), v.to_owned());
        }
        map
    }
}

pub type IdentityMap = HashMap<NumericIdentity, Labels>;

/// Pushes identity changes into the policy engine.
pub trait IdentityUpdater: Send + Sync {
    /// Applies `added` and `deleted` identities. The returned
    /// [`UpdateCompletion`] resolves once the update has been fully
    /// propagated to policy.
    fn update_identities(&self, added: IdentityMap, deleted: IdentityMap) -> UpdateCompletion;
}

/// Sending half of an identity update completion signal.
#[derive(Debug)]
pub struct UpdateDone(oneshot::Sender<()>);

impl UpdateDone {
    pub fn done(self) {
        // receiver may already be gone, nobody is waiting in that case
        let _ = self.0.send(());
    }
}

/// Resolves when an identity update has been applied. A dropped
/// [`UpdateDone`] also resolves it, the same as a closed channel.
#[derive(Debug)]
pub struct UpdateCompletion(Option<oneshot::Receiver<()>>);

impl UpdateCompletion {
    pub fn channel() -> (UpdateDone, UpdateCompletion) {
        let (tx, rx) = oneshot::channel();
        (UpdateDone(tx), UpdateCompletion(Some(rx)))
    }

    /// An already completed signal for updaters that apply synchronously.
    pub fn ready() -> Self {
        UpdateCompletion(None)
    }
}

impl Future for UpdateCompletion {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(rx) = self.0.as_mut() else {
            return Poll::Ready(());
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(_) => {
                self.0 = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
