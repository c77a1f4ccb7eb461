//! Scaler registry for resolving scaler names
//!
//! The registry lists the available scalers in a fixed order and builds
//! configured [`Scaler`] values on request. It is an ordinary value: build it
//! once (usually from the loaded config) and pass it by reference.

use std::collections::HashMap;
use std::fmt;

use crate::config::ScalecmpConfig;
use crate::scalers::{DdtScaler, EepScaler, FilterKind, Scaler, ScalerKind, SelfSimScaler};

/// Error when a scaler name does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScaler(pub String);

impl fmt::Display for UnknownScaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown scaler '{}'", self.0)
    }
}

impl std::error::Error for UnknownScaler {}

/// Registry of scaler kinds and their per-kind options.
#[derive(Debug, Clone)]
pub struct ScalerRegistry {
    kinds: Vec<ScalerKind>,
    by_name: HashMap<String, ScalerKind>,
    ddt: DdtScaler,
}

impl Default for ScalerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalerRegistry {
    /// Create a registry of every scaler with default options.
    pub fn new() -> Self {
        let kinds = ScalerKind::ALL.to_vec();
        let mut by_name = HashMap::new();
        for &kind in &kinds {
            by_name.insert(kind.display_name().to_lowercase(), kind);
            by_name.insert(kind.to_string(), kind);
        }
        Self { kinds, by_name, ddt: DdtScaler::default() }
    }

    /// Create a registry whose options come from `config`.
    pub fn from_config(config: &ScalecmpConfig) -> Self {
        Self::new().with_ddt(DdtScaler::new(config.ddt.smoothing))
    }

    /// Replace the options used for DDT scalers.
    pub fn with_ddt(mut self, ddt: DdtScaler) -> Self {
        self.ddt = ddt;
        self
    }

    /// All kinds in registry order.
    pub fn kinds(&self) -> &[ScalerKind] {
        &self.kinds
    }

    /// Number of registered scalers.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Display name of `kind`.
    pub fn name(&self, kind: ScalerKind) -> &'static str {
        kind.display_name()
    }

    /// Resolve a scaler name, ignoring case.
    ///
    /// Both display names (`"DDT"`) and command-line names (`"ddt"`) resolve.
    pub fn lookup(&self, name: &str) -> Result<ScalerKind, UnknownScaler> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .copied()
            .ok_or_else(|| UnknownScaler(name.to_string()))
    }

    /// Build a fresh scaler of `kind` with this registry's options.
    pub fn new_scaler(&self, kind: ScalerKind) -> Scaler {
        match kind {
            ScalerKind::Nearest => Scaler::Filtered(FilterKind::Nearest),
            ScalerKind::Linear => Scaler::Linear,
            ScalerKind::Cubic => Scaler::Filtered(FilterKind::Cubic),
            ScalerKind::Lanczos => Scaler::Filtered(FilterKind::Lanczos),
            ScalerKind::Ddt => Scaler::Ddt(self.ddt),
            ScalerKind::Eep => Scaler::Eep(EepScaler),
            ScalerKind::SelfSim => Scaler::SelfSim(SelfSimScaler),
        }
    }

    /// Kinds to run for a selection, in registry order.
    ///
    /// An empty selection means every kind. Duplicates are dropped.
    pub fn select(&self, requested: &[ScalerKind]) -> Vec<ScalerKind> {
        if requested.is_empty() {
            return self.kinds.clone();
        }
        self.kinds.iter().copied().filter(|k| requested.contains(k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let registry = ScalerRegistry::new();
        let names: Vec<&str> = registry.kinds().iter().map(|&k| registry.name(k)).collect();
        assert_eq!(names, ["Nearest", "Linear", "Cubic", "Lanczos", "DDT", "EEP", "SelfSim"]);
        assert_eq!(registry.len(), 7);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let registry = ScalerRegistry::new();
        assert_eq!(registry.lookup("DDT"), Ok(ScalerKind::Ddt));
        assert_eq!(registry.lookup("ddt"), Ok(ScalerKind::Ddt));
        assert_eq!(registry.lookup("SelfSim"), Ok(ScalerKind::SelfSim));
        assert_eq!(registry.lookup(" selfsim "), Ok(ScalerKind::SelfSim));
        assert_eq!(registry.lookup("Lanczos"), Ok(ScalerKind::Lanczos));
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = ScalerRegistry::new();
        let err = registry.lookup("hqx").unwrap_err();
        assert_eq!(err, UnknownScaler("hqx".to_string()));
        assert_eq!(err.to_string(), "Unknown scaler 'hqx'");
    }

    #[test]
    fn test_new_scaler_matches_kind() {
        let registry = ScalerRegistry::new();
        for &kind in registry.kinds() {
            assert_eq!(registry.new_scaler(kind).kind(), kind);
        }
    }

    #[test]
    fn test_ddt_options_carried() {
        let registry = ScalerRegistry::new().with_ddt(DdtScaler::new(false));
        assert_eq!(registry.new_scaler(ScalerKind::Ddt), Scaler::Ddt(DdtScaler { smoothing: false }));

        let mut config = ScalecmpConfig::default();
        config.ddt.smoothing = false;
        let registry = ScalerRegistry::from_config(&config);
        assert_eq!(registry.new_scaler(ScalerKind::Ddt), Scaler::Ddt(DdtScaler { smoothing: false }));
    }

    #[test]
    fn test_select() {
        let registry = ScalerRegistry::new();
        assert_eq!(registry.select(&[]).len(), 7);
        assert_eq!(
            registry.select(&[ScalerKind::SelfSim, ScalerKind::Linear, ScalerKind::Linear]),
            vec![ScalerKind::Linear, ScalerKind::SelfSim]
        );
    }
}
