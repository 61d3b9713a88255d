//! Action trait.

use std::fmt::Debug;

use crate::error::InvalidInputError;
use crate::{Namespace, Result};

/// The closed set of action names accepted by one namespace.
pub trait Action: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Namespace whose endpoint accepts these actions.
    const NAMESPACE: Namespace;

    /// Every action of the namespace.
    const ALL: &'static [Self];

    /// Wire name of the action.
    fn as_str(&self) -> &'static str;

    /// Look up an action by its wire name.
    fn parse(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::Action {
                    namespace: Self::NAMESPACE.to_string(),
                    value: s.to_string(),
                }
                .into()
            })
    }
}
