//! Incremental stitching of scanline contour segments into polylines.
//!
//! A contour tracer walking a raster row by row emits short segments in no
//! particular order. [`SegmentStitcher`] grows chains out of them as they
//! arrive and, at the end of every row, merges or finalizes the chains that
//! the row did not extend.

mod chain;
mod index;

pub use chain::{Chain, ChainId, Junction};
pub use index::EndpointIndex;

use std::collections::HashSet;
use std::fmt;

use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::error::{GeometryError, Result, StitchError};
use crate::geometry::Polyline;
use crate::math::{same_ordinate, same_point, Point2, TOLERANCE};
use crate::simplify::Simplifier;

/// Default ceiling on simultaneously live chains.
pub const DEFAULT_MAX_LIVE_CHAINS: usize = 16_348;

/// Parameters controlling the stitcher.
#[derive(Debug, Clone, Copy)]
pub struct StitchConfig {
    /// Two endpoints closer than this on both axes are the same point.
    pub tolerance: f64,
    /// Maximum number of live chains before [`SegmentStitcher::add`] fails.
    pub max_live_chains: usize,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            max_live_chains: DEFAULT_MAX_LIVE_CHAINS,
        }
    }
}

/// Merge engine turning unordered contour segments into polylines.
///
/// Live chains are kept in two [`EndpointIndex`]es, one keyed by chain start
/// and one by chain end. A chain is unlinked from both before its endpoints
/// change and linked back afterwards, so between calls both indices hold
/// exactly the live chains.
///
/// One stitcher handles a single contour level; calls must come from one
/// producer in scanline order.
pub struct SegmentStitcher {
    config: StitchConfig,
    simplifier: Option<Box<dyn Simplifier>>,
    chains: SlotMap<ChainId, Chain>,
    start_index: EndpointIndex,
    end_index: EndpointIndex,
    completed: Vec<Polyline>,
    next_serial: u64,
    last_line: Option<i64>,
}

impl SegmentStitcher {
    /// Creates a stitcher that emits chains without simplification.
    #[must_use]
    pub fn new(config: StitchConfig) -> Self {
        Self {
            config,
            simplifier: None,
            chains: SlotMap::with_key(),
            start_index: EndpointIndex::new(),
            end_index: EndpointIndex::new(),
            completed: Vec::new(),
            next_serial: 0,
            last_line: None,
        }
    }

    /// Creates a stitcher that passes every finalized chain through
    /// `simplifier`.
    #[must_use]
    pub fn with_simplifier(config: StitchConfig, simplifier: impl Simplifier + 'static) -> Self {
        Self {
            simplifier: Some(Box::new(simplifier)),
            ..Self::new(config)
        }
    }

    #[must_use]
    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Number of chains still open for extension or merging.
    #[must_use]
    pub fn live_chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Returns the live chain with the given id, if any.
    #[must_use]
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Iterates over the live chains ordered by start point.
    pub fn chains(&self) -> impl Iterator<Item = (ChainId, &Chain)> + '_ {
        self.start_index
            .ids()
            .filter_map(move |id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Polylines finalized so far, in completion order.
    #[must_use]
    pub fn completed_polylines(&self) -> &[Polyline] {
        &self.completed
    }

    /// Drains and returns the polylines finalized so far.
    pub fn take_completed(&mut self) -> Vec<Polyline> {
        std::mem::take(&mut self.completed)
    }

    /// Adds the segment `(x1, y1)`–`(x2, y2)` found on the current scanline.
    ///
    /// The segment extends the first chain with a matching endpoint, or
    /// starts a new chain. Zero-length segments are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFiniteCoordinate`] for NaN or infinite
    /// input, and [`StitchError::CapacityExceeded`] if a new chain is needed
    /// while the live-chain limit is reached.
    pub fn add(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        for (x, y) in [(x1, y1), (x2, y2)] {
            if !x.is_finite() || !y.is_finite() {
                return Err(GeometryError::NonFiniteCoordinate { x, y }.into());
            }
        }

        let tol = self.config.tolerance;
        let mut a = Point2::new(x1, y1);
        let mut b = Point2::new(x2, y2);
        if same_point(&a, &b, tol) {
            trace!(x = x1, y = y1, "zero-length segment dropped");
            return Ok(());
        }

        // Lower point first: it is the end that can reach chains from earlier rows.
        if b.y.total_cmp(&a.y).then_with(|| b.x.total_cmp(&a.x)).is_lt() {
            std::mem::swap(&mut a, &mut b);
        }

        if self.extend(a, b) {
            return Ok(());
        }
        if same_ordinate(a.y, b.y, tol) && self.extend(b, a) {
            return Ok(());
        }

        let limit = self.config.max_live_chains;
        if self.chains.len() >= limit {
            warn!(limit, "live chain limit reached");
            return Err(StitchError::CapacityExceeded { limit }.into());
        }

        let serial = self.next_serial;
        self.next_serial += 1;
        let simplify = self.simplifier.is_some();
        let id = self.chains.insert(Chain::new(a, b, simplify, serial));
        self.link(id);
        trace!(serial, live = self.chains.len(), "chain started");
        Ok(())
    }

    /// Signals that every segment of scanline `line` has been added.
    ///
    /// Each chain the scanline did not extend is merged into a live chain
    /// sharing one of its endpoints or, when there is none, finalized.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::LineOutOfOrder`] unless `line` is greater than
    /// the previously completed line.
    pub fn line_complete(&mut self, line: i64) -> Result<()> {
        if let Some(previous) = self.last_line {
            if line <= previous {
                return Err(StitchError::LineOutOfOrder { previous, line }.into());
            }
        }
        self.last_line = Some(line);

        let untouched: Vec<ChainId> = self
            .start_index
            .ids()
            .filter(|&id| self.chains.get(id).is_some_and(|c| !c.touched))
            .collect();
        let finished_before = self.completed.len();
        let swept = untouched.len();

        self.sweep(untouched);

        debug!(
            line,
            swept,
            finalized = self.completed.len() - finished_before,
            live = self.chains.len(),
            "scanline complete"
        );
        Ok(())
    }

    /// Merges and finalizes every live chain, returning all completed
    /// polylines.
    #[must_use]
    pub fn finish(mut self) -> Vec<Polyline> {
        for chain in self.chains.values_mut() {
            chain.touched = false;
        }
        let all: Vec<ChainId> = self.start_index.ids().collect();
        self.sweep(all);

        debug_assert!(self.chains.is_empty());
        debug!(completed = self.completed.len(), "stitcher finished");
        self.completed
    }

    /// Extends a chain whose start or end lies on `anchor` with `other`.
    fn extend(&mut self, anchor: Point2, other: Point2) -> bool {
        let tol = self.config.tolerance;

        if let Some(id) = self.start_index.find(&anchor, tol) {
            self.unlink(id);
            if let Some(chain) = self.chains.get_mut(id) {
                chain.push_front(other);
            }
            self.link(id);
            trace!(x = other.x, y = other.y, "chain extended at start");
            return true;
        }

        if let Some(id) = self.end_index.find(&anchor, tol) {
            self.unlink(id);
            if let Some(chain) = self.chains.get_mut(id) {
                chain.push_back(other);
            }
            self.link(id);
            trace!(x = other.x, y = other.y, "chain extended at end");
            return true;
        }

        false
    }

    /// Processes `worklist` in order: every chain still live and untouched
    /// is merged into a partner or finalized. Clears all `touched` flags.
    fn sweep(&mut self, worklist: Vec<ChainId>) {
        for id in worklist {
            if !self.chains.get(id).is_some_and(|c| !c.touched) {
                continue;
            }

            self.unlink(id);
            let Some(chain) = self.chains.remove(id) else {
                continue;
            };

            match self.find_partner(&chain) {
                Some((target, junction)) => {
                    self.unlink(target);
                    if let Some(partner) = self.chains.get_mut(target) {
                        partner.absorb(chain, junction);
                    }
                    self.link(target);
                    debug!(?junction, "chains merged");
                }
                None => self.finalize(chain),
            }
        }

        for chain in self.chains.values_mut() {
            chain.touched = false;
        }
        debug_assert!(self.is_consistent());
    }

    /// Finds a live chain to splice `chain` into, preferring junctions that
    /// need no reversal.
    fn find_partner(&self, chain: &Chain) -> Option<(ChainId, Junction)> {
        let tol = self.config.tolerance;
        let start = chain.start();
        let end = chain.end();

        self.end_index
            .find(&start, tol)
            .map(|id| (id, Junction::StartOnEnd))
            .or_else(|| {
                self.start_index
                    .find(&start, tol)
                    .map(|id| (id, Junction::StartOnStart))
            })
            .or_else(|| {
                self.start_index
                    .find(&end, tol)
                    .map(|id| (id, Junction::EndOnStart))
            })
            .or_else(|| {
                self.end_index
                    .find(&end, tol)
                    .map(|id| (id, Junction::EndOnEnd))
            })
    }

    fn finalize(&mut self, chain: Chain) {
        let simplify = chain.simplify;
        let points = chain.into_points();
        let points = match &self.simplifier {
            Some(simplifier) if simplify => simplifier.simplify(&points),
            _ => points,
        };

        debug!(vertices = points.len(), "chain finalized");
        self.completed.push(Polyline::new(points));
    }

    fn link(&mut self, id: ChainId) {
        if let Some(chain) = self.chains.get(id) {
            self.start_index.insert(chain.start(), chain.serial(), id);
            self.end_index.insert(chain.end(), chain.serial(), id);
        }
    }

    fn unlink(&mut self, id: ChainId) {
        if let Some(chain) = self.chains.get(id) {
            self.start_index.remove(&chain.start(), chain.serial());
            self.end_index.remove(&chain.end(), chain.serial());
        }
    }

    /// Checks that both indices hold every live chain exactly once, keyed by
    /// its current endpoints, in strict order.
    fn is_consistent(&self) -> bool {
        let live = self.chains.len();
        if self.start_index.len() != live || self.end_index.len() != live {
            return false;
        }
        if !self.start_index.is_strictly_sorted() || !self.end_index.is_strictly_sorted() {
            return false;
        }

        let keyed_by = |index: &EndpointIndex, endpoint: fn(&Chain) -> Point2| {
            let mut seen = HashSet::with_capacity(live);
            index.entries().all(|(point, id)| {
                seen.insert(id) && self.chains.get(id).is_some_and(|c| endpoint(c) == point)
            })
        };
        keyed_by(&self.start_index, Chain::start) && keyed_by(&self.end_index, Chain::end)
    }
}

impl fmt::Debug for SegmentStitcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentStitcher")
            .field("config", &self.config)
            .field("simplify", &self.simplifier.is_some())
            .field("live", &self.chains.len())
            .field("completed", &self.completed.len())
            .field("last_line", &self.last_line)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SegmentStitcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SegmentStitcher(active={}, completed={})",
            self.chains.len(),
            self.completed.len()
        )?;
        for (_, chain) in self.chains() {
            write!(f, "  active:")?;
            for v in chain.vertices() {
                write!(f, " ({}, {})", v.x, v.y)?;
            }
            writeln!(f)?;
        }
        for line in &self.completed {
            write!(f, "  completed:")?;
            for v in &line.points {
                write!(f, " ({}, {})", v.x, v.y)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
