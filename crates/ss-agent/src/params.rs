//! Behavioural parameters: which decision model an agent uses and how it
//! weighs its own welfare against its neighbours'.

use std::fmt;

/// The closed set of ethical decision models.
///
/// Both variants carry a `lookahead` flag.  With lookahead the model also
/// weighs the neighbourhood the agent would see *after* moving to a
/// candidate cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DecisionModel {
    /// Scores cells for the acting agent alone, minus the opportunity cost
    /// imposed on agents already committed to the cell.
    Egoistic { lookahead: bool },
    /// Sums a felicific-calculus term over every agent in the neighbourhood.
    Bentham { lookahead: bool },
}

impl DecisionModel {
    #[inline]
    pub fn lookahead(self) -> bool {
        match self {
            DecisionModel::Egoistic { lookahead } | DecisionModel::Bentham { lookahead } => {
                lookahead
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DecisionModel::Egoistic { lookahead: false } => "egoistic",
            DecisionModel::Egoistic { lookahead: true } => "egoistic_lookahead",
            DecisionModel::Bentham { lookahead: false } => "bentham",
            DecisionModel::Bentham { lookahead: true } => "bentham_lookahead",
        }
    }

    /// Parse the labels produced by [`as_str`](Self::as_str).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "egoistic" => Some(DecisionModel::Egoistic { lookahead: false }),
            "egoistic_lookahead" => Some(DecisionModel::Egoistic { lookahead: true }),
            "bentham" => Some(DecisionModel::Bentham { lookahead: false }),
            "bentham_lookahead" => Some(DecisionModel::Bentham { lookahead: true }),
            _ => None,
        }
    }
}

impl Default for DecisionModel {
    fn default() -> Self {
        DecisionModel::Egoistic { lookahead: false }
    }
}

impl fmt::Display for DecisionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of a utilitarian score comes from the agent's own welfare.
///
/// `Weighted(1.0)` ignores every other agent; `Weighted(0.0)` ignores the
/// agent itself.  `Unweighted` applies no extra weighting at all.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Selfishness {
    #[default]
    Unweighted,
    Weighted(f64),
}

impl Selfishness {
    /// Configuration files encode `Unweighted` as `-1`.
    pub const UNWEIGHTED_SENTINEL: f64 = -1.0;

    pub fn from_factor(factor: f64) -> Self {
        if factor == Self::UNWEIGHTED_SENTINEL {
            Selfishness::Unweighted
        } else {
            Selfishness::Weighted(factor.clamp(-1.0, 1.0))
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            Selfishness::Unweighted => Self::UNWEIGHTED_SENTINEL,
            Selfishness::Weighted(f) => f,
        }
    }

    /// `false` once the agent is fully selfish (factor ≥ 1); the Bentham
    /// model then stops treating others' outcomes as costs or penalties.
    #[inline]
    pub fn considers_others(self) -> bool {
        match self {
            Selfishness::Unweighted => true,
            Selfishness::Weighted(f) => f < 1.0,
        }
    }

    /// Multiplier applied to one neighbour's term.
    #[inline]
    pub fn weight(self, is_self: bool) -> f64 {
        match self {
            Selfishness::Unweighted => 1.0,
            Selfishness::Weighted(f) if is_self => f,
            Selfishness::Weighted(f) => 1.0 - f,
        }
    }
}

/// Tribe tag: combat legality and retaliation grouping.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tribe(pub u16);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sex {
    Female,
    Male,
}

/// The behavioural parameter set a child inherits from its parent.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentParams {
    pub decision_model:        DecisionModel,
    pub selfishness:           Selfishness,
    /// Weight of this agent's welfare when *others* run the Bentham model.
    pub decision_model_factor: f64,
    /// Share of a victim's loot the agent counts as reward.  0 never attacks.
    pub aggression:            f64,
    pub tribe:                 Tribe,
    pub sex:                   Option<Sex>,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            decision_model:        DecisionModel::default(),
            selfishness:           Selfishness::Unweighted,
            decision_model_factor: 1.0,
            aggression:            0.0,
            tribe:                 Tribe::default(),
            sex:                   None,
        }
    }
}
