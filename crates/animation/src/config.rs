//! Phase pipeline configuration.

/// Ordered phase names plus the phase that absorbs unknown names.
///
/// Supplied once at startup; the resulting pipeline is never renegotiated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseConfig {
    /// Phase names in drain order. The first is the head.
    pub phases: Vec<String>,

    /// Phase receiving animations scheduled under an unknown name.
    /// Defaults to the head when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fallback: Option<String>,
}

impl PhaseConfig {
    pub const RANGED_ATTACKS: &'static str = "RANGED_ATTACKS";
    pub const GENERAL: &'static str = "GENERAL";
    pub const MELEE_ATTACKS: &'static str = "MELEE_ATTACKS";
    pub const END_OF_TURN: &'static str = "END_OF_TURN";

    pub fn new<I, S>(phases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phases: phases.into_iter().map(Into::into).collect(),
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Name of the fallback phase after defaulting, if the pipeline is non-empty.
    pub fn fallback_name(&self) -> Option<&str> {
        self.fallback
            .as_deref()
            .or_else(|| self.phases.first().map(String::as_str))
    }
}

impl Default for PhaseConfig {
    /// Ranged attacks, then general effects, then melee, then end-of-turn cleanup.
    fn default() -> Self {
        Self::new([
            Self::RANGED_ATTACKS,
            Self::GENERAL,
            Self::MELEE_ATTACKS,
            Self::END_OF_TURN,
        ])
        .with_fallback(Self::GENERAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_defaults_to_head() {
        let config = PhaseConfig::new(["A", "B"]);
        assert_eq!(config.fallback_name(), Some("A"));
        assert_eq!(PhaseConfig::new(Vec::<String>::new()).fallback_name(), None);
    }

    #[test]
    fn default_pipeline_order() {
        let config = PhaseConfig::default();
        assert_eq!(
            config.phases,
            vec!["RANGED_ATTACKS", "GENERAL", "MELEE_ATTACKS", "END_OF_TURN"]
        );
        assert_eq!(config.fallback_name(), Some(PhaseConfig::GENERAL));
    }
}
