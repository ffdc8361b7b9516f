//! Landscape-wide constants and running maxima used to normalise
//! valuation terms.

/// Global parameters of the landscape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Environment {
    /// Highest sugar level observed on any cell so far.
    pub global_max_sugar: f64,
    /// Highest spice level observed on any cell so far.
    pub global_max_spice: f64,
    /// Cap on each resource an attacker can take from one victim.
    pub max_combat_loot: f64,

    pub sugar_regrow_rate: f64,
    pub spice_regrow_rate: f64,

    /// Pollution left per unit of resource gathered.
    pub production_pollution: f64,
    /// Pollution left per unit of resource metabolised.
    pub consumption_pollution: f64,
    /// Diffuse pollution every N ticks.  0 disables diffusion.
    pub pollution_diffusion_period: u64,
}

impl Environment {
    /// `global_max_sugar + global_max_spice`.
    #[inline]
    pub fn global_max_wealth(&self) -> f64 {
        self.global_max_sugar + self.global_max_spice
    }

    /// Raise the running maxima if a cell now holds more than seen before.
    #[inline]
    pub fn observe(&mut self, sugar: f64, spice: f64) {
        if sugar > self.global_max_sugar {
            self.global_max_sugar = sugar;
        }
        if spice > self.global_max_spice {
            self.global_max_spice = spice;
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            global_max_sugar:           0.0,
            global_max_spice:           0.0,
            max_combat_loot:            0.0,
            sugar_regrow_rate:          1.0,
            spice_regrow_rate:          1.0,
            production_pollution:       0.0,
            consumption_pollution:      0.0,
            pollution_diffusion_period: 0,
        }
    }
}
