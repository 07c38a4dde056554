//! Named classroom scenarios.

use esterify_core::Population;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// Default lesson setup: 12 acid, 18 alcohol, coldest setting
    Classroom,

    /// Same mixture at the hottest setting
    Heated,

    /// Default mixture with the hidden diagnostic preset switched on
    Diagnostic,

    /// Far more molecules than the start regions can hold
    Crowded,

    /// Equal amounts of both reactants at a mid temperature
    Equimolar,
}

/// Everything needed to reset a simulation into a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioSetup {
    /// Populations and starting temperature
    pub population: Population,

    /// Start with the diagnostic preset
    pub diagnostic: bool,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Classroom,
            ScenarioId::Heated,
            ScenarioId::Diagnostic,
            ScenarioId::Crowded,
            ScenarioId::Equimolar,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Classroom => "classroom",
            ScenarioId::Heated => "heated",
            ScenarioId::Diagnostic => "diagnostic",
            ScenarioId::Crowded => "crowded",
            ScenarioId::Equimolar => "equimolar",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Classroom => "12 acid + 18 alcohol at T1, base preset",
            ScenarioId::Heated => "12 acid + 18 alcohol at T5: more jitter, faster, more reactive",
            ScenarioId::Diagnostic => "12 acid + 18 alcohol with the diagnostic preset",
            ScenarioId::Crowded => "120 acid + 160 alcohol: spawn budget runs out, partial fill",
            ScenarioId::Equimolar => "15 acid + 15 alcohol at T3",
        }
    }

    /// Returns the initial state for this scenario.
    pub fn setup(&self) -> ScenarioSetup {
        let (acid, alcohol, temperature, diagnostic) = match self {
            ScenarioId::Classroom => (12, 18, 1, false),
            ScenarioId::Heated => (12, 18, 5, false),
            ScenarioId::Diagnostic => (12, 18, 1, true),
            ScenarioId::Crowded => (120, 160, 2, false),
            ScenarioId::Equimolar => (15, 15, 3, false),
        };
        ScenarioSetup {
            population: Population { acid, alcohol, temperature },
            diagnostic,
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classroom" | "default" => Ok(ScenarioId::Classroom),
            "heated" | "hot" => Ok(ScenarioId::Heated),
            "diagnostic" | "diag" => Ok(ScenarioId::Diagnostic),
            "crowded" | "dense" => Ok(ScenarioId::Crowded),
            "equimolar" => Ok(ScenarioId::Equimolar),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}
