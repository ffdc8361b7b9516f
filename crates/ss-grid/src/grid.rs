//! Grid representation and builder.
//!
//! # Data layout
//!
//! Cells are stored row-major in parallel `Vec`s indexed by `CellId`:
//!
//! ```text
//! CellId = y * width + x
//! ```
//!
//! so the hot valuation loop reads `grid.sugar[cell.index()]` without any
//! pointer chasing.

use std::fmt;

use ss_core::{AgentId, CellId};

use crate::{Environment, GridError, GridResult};

/// Integer grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Resource landscape in SoA form.  Construct with [`GridBuilder`].
pub struct Grid {
    pub width:      u32,
    pub height:     u32,
    /// Edges wrap around (torus) when `true`.
    pub wraparound: bool,

    pub sugar:     Vec<f64>,
    pub spice:     Vec<f64>,
    pub max_sugar: Vec<f64>,
    pub max_spice: Vec<f64>,
    pub pollution: Vec<f64>,

    /// Non-owning occupant reference.
    pub occupant: Vec<Option<AgentId>>,

    pub environment: Environment,
}

impl Grid {
    // ── Dimensions & addressing ───────────────────────────────────────────

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.sugar.len()
    }

    /// All cell ids in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + use<> {
        (0..self.cell_count() as u32).map(CellId)
    }

    #[inline]
    pub fn contains(&self, cell: CellId) -> bool {
        cell.index() < self.cell_count()
    }

    pub fn check(&self, cell: CellId) -> GridResult<()> {
        if self.contains(cell) { Ok(()) } else { Err(GridError::CellNotFound(cell)) }
    }

    /// The cell at `pos`, or `None` outside the grid.
    #[inline]
    pub fn cell_at(&self, pos: GridPos) -> Option<CellId> {
        (pos.x < self.width && pos.y < self.height).then(|| CellId(pos.y * self.width + pos.x))
    }

    #[inline]
    pub fn pos(&self, cell: CellId) -> GridPos {
        GridPos { x: cell.0 % self.width, y: cell.0 / self.width }
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    #[inline]
    pub fn occupant(&self, cell: CellId) -> Option<AgentId> {
        self.occupant[cell.index()]
    }

    #[inline]
    pub fn is_occupied(&self, cell: CellId) -> bool {
        self.occupant[cell.index()].is_some()
    }

    /// Put `agent` on `cell`.  Fails if another agent is already there.
    pub fn place(&mut self, cell: CellId, agent: AgentId) -> GridResult<()> {
        self.check(cell)?;
        match self.occupant[cell.index()] {
            Some(other) if other != agent => Err(GridError::Occupied { cell, occupant: other }),
            _ => {
                self.occupant[cell.index()] = Some(agent);
                Ok(())
            }
        }
    }

    /// Clear `cell`, returning whoever was there.
    pub fn vacate(&mut self, cell: CellId) -> Option<AgentId> {
        self.occupant.get_mut(cell.index()).and_then(Option::take)
    }

    /// Cells with no occupant.
    pub fn empty_cells(&self) -> Vec<CellId> {
        self.cells().filter(|&c| !self.is_occupied(c)).collect()
    }

    // ── Resources ─────────────────────────────────────────────────────────

    #[inline]
    pub fn site_wealth(&self, cell: CellId) -> f64 {
        self.sugar[cell.index()] + self.spice[cell.index()]
    }

    #[inline]
    pub fn max_site_wealth(&self, cell: CellId) -> f64 {
        self.max_sugar[cell.index()] + self.max_spice[cell.index()]
    }

    /// Empty `cell` and return the `(sugar, spice)` it held.
    pub fn harvest(&mut self, cell: CellId) -> (f64, f64) {
        let i = cell.index();
        let taken = (self.sugar[i], self.spice[i]);
        self.sugar[i] = 0.0;
        self.spice[i] = 0.0;
        taken
    }

    /// Sum of sugar and spice over every cell.
    pub fn total_resources(&self) -> f64 {
        self.sugar.iter().sum::<f64>() + self.spice.iter().sum::<f64>()
    }
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`Grid`] incrementally, then call [`build`](Self::build).
///
/// ```
/// use ss_grid::{GridBuilder, GridPos};
///
/// let grid = GridBuilder::new(3, 1)
///     .sugar(GridPos::new(1, 0), 5.0)
///     .build()
///     .unwrap();
/// assert_eq!(grid.cell_count(), 3);
/// assert_eq!(grid.environment.global_max_sugar, 5.0);
/// ```
pub struct GridBuilder {
    width:       u32,
    height:      u32,
    wraparound:  bool,
    sugar:       Vec<f64>,
    spice:       Vec<f64>,
    max_sugar:   Vec<f64>,
    max_spice:   Vec<f64>,
    environment: Environment,
}

impl GridBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            wraparound:  false,
            sugar:       vec![0.0; n],
            spice:       vec![0.0; n],
            max_sugar:   vec![0.0; n],
            max_spice:   vec![0.0; n],
            environment: Environment::default(),
        }
    }

    pub fn wraparound(mut self, wrap: bool) -> Self {
        self.wraparound = wrap;
        self
    }

    pub fn environment(mut self, env: Environment) -> Self {
        self.environment = env;
        self
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Set sugar capacity and current level at `pos`.  Out-of-range
    /// positions are ignored.
    pub fn sugar(mut self, pos: GridPos, amount: f64) -> Self {
        if let Some(i) = self.index(pos) {
            self.sugar[i] = amount;
            self.max_sugar[i] = amount;
        }
        self
    }

    /// Set spice capacity and current level at `pos`.
    pub fn spice(mut self, pos: GridPos, amount: f64) -> Self {
        if let Some(i) = self.index(pos) {
            self.spice[i] = amount;
            self.max_spice[i] = amount;
        }
        self
    }

    /// Raise sugar capacity in a cone around `center`.
    pub fn sugar_peak(mut self, center: GridPos, radius: f64, max_capacity: f64) -> Self {
        let (w, h) = (self.width, self.height);
        raise_peak(&mut self.sugar, &mut self.max_sugar, w, h, center, radius, max_capacity);
        self
    }

    /// Raise spice capacity in a cone around `center`.
    pub fn spice_peak(mut self, center: GridPos, radius: f64, max_capacity: f64) -> Self {
        let (w, h) = (self.width, self.height);
        raise_peak(&mut self.spice, &mut self.max_spice, w, h, center, radius, max_capacity);
        self
    }

    pub fn build(self) -> GridResult<Grid> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::EmptyGrid { width: self.width, height: self.height });
        }
        let n = self.sugar.len();
        let mut environment = self.environment;
        for i in 0..n {
            environment.observe(self.sugar[i], self.spice[i]);
        }
        Ok(Grid {
            width: self.width,
            height: self.height,
            wraparound: self.wraparound,
            sugar: self.sugar,
            spice: self.spice,
            max_sugar: self.max_sugar,
            max_spice: self.max_spice,
            pollution: vec![0.0; n],
            occupant: vec![None; n],
            environment,
        })
    }
}

/// Capacity falls off linearly with distance from `center`; the dispersion
/// scales with the farthest grid corner so peaks on small grids stay broad.
/// A cell's capacity only ever increases, so overlapping peaks merge.
fn raise_peak(
    level:        &mut [f64],
    capacity:     &mut [f64],
    width:        u32,
    height:       u32,
    center:       GridPos,
    radius:       f64,
    max_capacity: f64,
) {
    let (cx, cy) = (center.x as f64, center.y as f64);
    let (w, h) = (width as f64, height as f64);
    let dispersion = (cx.max(w - cx).powi(2) + cy.max(h - cy).powi(2)).sqrt() * (radius / w);
    if dispersion <= 0.0 {
        return;
    }
    for y in 0..height {
        for x in 0..width {
            let i = y as usize * width as usize + x as usize;
            let dist = ((cx - x as f64).powi(2) + (cy - y as f64).powi(2)).sqrt();
            let cap = (1.0 + max_capacity * (1.0 - dist / dispersion)).min(max_capacity).ceil();
            if cap > capacity[i] {
                capacity[i] = cap;
                level[i] = cap;
            }
        }
    }
}
