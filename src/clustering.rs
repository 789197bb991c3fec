use std::f64::consts::PI;
use std::fmt::{self, Display};
use std::time::Instant;

use log::{debug, info, trace};

use crate::error::Error;
use crate::four_vector::FourVector;
use crate::jets::{JetAlgorithm, JetDefinition, RecombinationScheme};
use crate::particle::Particle;

/// Absolute difference in azimuth, folded into [0, π]
pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    let dphi = (phi1 - phi2).abs();
    if dphi > PI {
        2. * PI - dphi
    } else {
        dphi
    }
}

/// Squared distance in the rapidity-azimuth plane
pub fn delta_r2<P: Particle>(p1: &P, p2: &P) -> f64 {
    dist2(p1.rap(), p1.phi(), p2.rap(), p2.phi())
}

fn dist2(y1: f64, phi1: f64, y2: f64, phi2: f64) -> f64 {
    let dy = y1 - y2;
    let dphi = delta_phi(phi1, phi2);
    dy * dy + dphi * dphi
}

/// Counters describing the last clustering run
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct ClusterStats {
    /// Number of input particles
    pub particles: usize,
    /// Number of pairwise recombinations
    pub merges: usize,
    /// Number of pseudo-particles promoted to jets, including discarded ones
    pub beam_jets: usize,
    /// Number of jets rejected by the transverse momentum cut
    pub discarded: usize,
}

/// Longitudinally invariant inclusive kt, Cambridge/Aachen and anti-kt
/// clustering
///
/// Distances are measured in rapidity and azimuth. The clustering keeps
/// the jets of the last [build_jets](Self::build_jets) call, so that
/// they can be retrieved again with [jets_sorted](Self::jets_sorted).
///
/// Only the E-scheme recombination is implemented. Engines requesting
/// the pt or pt² scheme are rejected at construction.
#[derive(Clone, Debug)]
pub struct ClusterEngine<P = FourVector> {
    algorithm: JetAlgorithm,
    recombination: RecombinationScheme,
    r: f64,
    r2: f64,
    min_pt: f64,
    debug: bool,
    jets: Vec<P>,
    stats: ClusterStats,
}

impl<P: Particle> ClusterEngine<P> {
    /// Set up clustering with radius `r`, recombination scheme `recom`
    /// (1: E, 2: pt, 3: pt²), clustering `mode` (1: kt, 0:
    /// Cambridge/Aachen, -1: anti-kt) and minimum jet transverse
    /// momentum `min_pt`.
    pub fn new(
        r: f64,
        recom: i32,
        mode: i32,
        min_pt: f64,
    ) -> Result<Self, Error> {
        let recombination = RecombinationScheme::try_from(recom)?;
        let algorithm = JetAlgorithm::try_from(mode)?;
        Self::from_definition(&JetDefinition {
            algorithm,
            radius: r,
            min_pt,
            recombination,
        })
    }

    /// Inclusive kt clustering with the given recombination scheme
    pub fn with_recombination(
        r: f64,
        recom: i32,
        min_pt: f64,
    ) -> Result<Self, Error> {
        Self::new(r, recom, JetAlgorithm::Kt.mode(), min_pt)
    }

    /// Inclusive kt clustering in the E-scheme
    pub fn with_radius(r: f64, min_pt: f64) -> Result<Self, Error> {
        let recom = RecombinationScheme::E.id();
        Self::new(r, recom, JetAlgorithm::Kt.mode(), min_pt)
    }

    pub fn from_definition(def: &JetDefinition) -> Result<Self, Error> {
        let JetDefinition {
            algorithm,
            radius,
            min_pt,
            recombination,
        } = *def;
        if !(radius > 0. && radius.is_finite()) {
            return Err(Error::InvalidRadius(radius));
        }
        if !recombination.is_supported() {
            return Err(Error::UnsupportedRecombination(recombination));
        }
        if !(min_pt >= 0.) {
            return Err(Error::InvalidMinPt(min_pt));
        }
        Ok(Self {
            algorithm,
            recombination,
            r: radius,
            r2: radius * radius,
            min_pt,
            debug: false,
            jets: Vec::new(),
            stats: ClusterStats::default(),
        })
    }

    pub fn definition(&self) -> JetDefinition {
        JetDefinition {
            algorithm: self.algorithm,
            radius: self.r,
            min_pt: self.min_pt,
            recombination: self.recombination,
        }
    }

    pub fn algorithm(&self) -> JetAlgorithm {
        self.algorithm
    }

    pub fn radius(&self) -> f64 {
        self.r
    }

    pub fn min_pt(&self) -> f64 {
        self.min_pt
    }

    pub fn recombination(&self) -> RecombinationScheme {
        self.recombination
    }

    /// Report the time spent in [build_jets](Self::build_jets)
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug
    }

    /// Cluster `particles` into jets
    ///
    /// Returns the jets passing the transverse momentum cut in the order
    /// in which they were found.
    pub fn build_jets(&mut self, particles: &[P]) -> Vec<P> {
        let start = Instant::now();
        debug!(
            "Clustering {} particles with {} algorithm, R = {}",
            particles.len(),
            self.algorithm,
            self.r
        );
        let mut stats = ClusterStats {
            particles: particles.len(),
            ..Default::default()
        };
        let mut jets = Vec::new();
        let mode = self.algorithm.mode();
        let mut set = WorkingSet::new(particles, mode, self.r2);
        while let Some(step) = set.next_step() {
            match step {
                Step::Merge { i, j, dist } => {
                    trace!("Merging {i} and {j} at distance {dist}");
                    set.merge(i, j);
                    stats.merges += 1;
                }
                Step::Beam { i, dist } => {
                    let Some(jet) = set.remove(i) else { continue };
                    stats.beam_jets += 1;
                    let pt = jet.pt();
                    if pt >= self.min_pt {
                        trace!("New jet from {i}, d = {dist}, pt = {pt}");
                        jets.push(jet);
                    } else {
                        trace!("Discarding jet from {i} with pt = {pt}");
                        stats.discarded += 1;
                    }
                }
            }
        }
        debug!(
            "Found {} jets after {} merges, {} rejected by pt cut",
            jets.len(),
            stats.merges,
            stats.discarded
        );
        if self.debug {
            info!(
                "Jet clustering took {:.3} ms",
                start.elapsed().as_secs_f64() * 1e3
            );
        }
        self.stats = stats;
        self.jets = jets;
        self.jets.clone()
    }

    /// Jets from the last clustering in the order they were found
    pub fn jets(&self) -> &[P] {
        &self.jets
    }

    /// Jets from the last clustering sorted by descending transverse momentum
    pub fn jets_sorted(&self) -> Vec<P> {
        let mut jets = self.jets.clone();
        jets.sort_by(|a, b| b.pt().total_cmp(&a.pt()));
        jets
    }

    pub fn stats(&self) -> ClusterStats {
        self.stats
    }

    /// Table of the sorted jets for printing
    pub fn jet_table(&self) -> JetTable<P> {
        JetTable(self.jets_sorted())
    }

    pub fn print_jets(&self) {
        print!("{}", self.jet_table())
    }
}

/// Human-readable listing of jets
#[derive(Clone, Debug)]
pub struct JetTable<P>(pub Vec<P>);

impl<P: Particle> Display for JetTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5} {:>15} {:>15} {:>15}",
            "jet #", "rapidity", "phi", "pt"
        )?;
        for (n, jet) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{:>5} {:>15.8} {:>15.8} {:>15.8}",
                n,
                jet.rap(),
                jet.phi(),
                jet.pt()
            )?;
        }
        writeln!(f, "Number of jets: {}", self.0.len())
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum Step {
    Merge { i: usize, j: usize, dist: f64 },
    Beam { i: usize, dist: f64 },
}

#[derive(Clone, Debug)]
struct Slot<P> {
    particle: P,
    rap: f64,
    phi: f64,
    // kt^(2p), the distance to the beam
    beam_dist: f64,
    // closest particle in a later slot
    nn: Option<(usize, f64)>,
}

impl<P: Particle> Slot<P> {
    fn new(particle: P, mode: i32) -> Self {
        Self {
            rap: particle.rap(),
            phi: particle.phi(),
            beam_dist: particle.pt2().powi(mode),
            particle,
            nn: None,
        }
    }
}

// Active pseudo-particles, addressed by stable slot indices.
//
// Candidate steps are ordered as all pairs (i, j), i < j, in
// lexicographic order followed by all beam distances in slot order. The
// first candidate with the smallest distance is taken. Merged particles
// go into the lower of the two slots.
#[derive(Clone, Debug)]
struct WorkingSet<P> {
    slots: Vec<Option<Slot<P>>>,
    mode: i32,
    r2: f64,
    active: usize,
}

impl<P: Particle> WorkingSet<P> {
    fn new(particles: &[P], mode: i32, r2: f64) -> Self {
        let slots = particles
            .iter()
            .map(|p| Some(Slot::new(p.clone(), mode)))
            .collect();
        let mut set = Self {
            slots,
            mode,
            r2,
            active: particles.len(),
        };
        for i in 0..set.slots.len() {
            set.update_nn(i);
        }
        set
    }

    // only called for active slots
    fn dist(&self, i: usize, j: usize) -> f64 {
        let (Some(a), Some(b)) = (&self.slots[i], &self.slots[j]) else {
            debug_assert!(false, "slots {i} and {j} have to be active");
            return f64::INFINITY;
        };
        let min_beam_dist = a.beam_dist.min(b.beam_dist);
        min_beam_dist * dist2(a.rap, a.phi, b.rap, b.phi) / self.r2
    }

    fn update_nn(&mut self, i: usize) {
        let mut nn: Option<(usize, f64)> = None;
        for j in (i + 1)..self.slots.len() {
            if self.slots[j].is_none() {
                continue;
            }
            let d = self.dist(i, j);
            if nn.map_or(true, |(_, best)| d < best) {
                nn = Some((j, d));
            }
        }
        if let Some(slot) = self.slots[i].as_mut() {
            slot.nn = nn;
        }
    }

    fn next_step(&self) -> Option<Step> {
        if self.active == 0 {
            return None;
        }
        let mut best: Option<(Step, f64)> = None;
        let mut consider = |step: Step, dist: f64| {
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((step, dist));
            }
        };
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some((j, dist)) = slot.as_ref().and_then(|s| s.nn) {
                consider(Step::Merge { i, j, dist }, dist);
            }
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(slot) = slot {
                let dist = slot.beam_dist;
                consider(Step::Beam { i, dist }, dist);
            }
        }
        best.map(|(step, _)| step)
    }

    fn merge(&mut self, i: usize, j: usize) {
        debug_assert!(i < j);
        let (Some(pi), Some(pj)) = (&self.slots[i], &self.slots[j]) else {
            debug_assert!(false, "slots {i} and {j} have to be active");
            return;
        };
        let merged = pi.particle.recombine(&pj.particle);
        self.slots[j] = None;
        self.slots[i] = Some(Slot::new(merged, self.mode));
        self.active -= 1;

        for a in 0..j {
            if a == i {
                continue;
            }
            let Some(nn) = self.slots[a].as_ref().map(|s| s.nn) else {
                continue;
            };
            match nn {
                Some((b, _)) if b == i || b == j => self.update_nn(a),
                Some((b, best)) if a < i => {
                    let d = self.dist(a, i);
                    if d < best || (d == best && i < b) {
                        if let Some(slot) = self.slots[a].as_mut() {
                            slot.nn = Some((i, d));
                        }
                    }
                }
                None if a < i => self.update_nn(a),
                _ => {}
            }
        }
        self.update_nn(i);
    }

    fn remove(&mut self, i: usize) -> Option<P> {
        let slot = self.slots[i].take()?;
        self.active -= 1;
        for a in 0..i {
            let points_to_i = matches!(
                self.slots[a].as_ref().and_then(|s| s.nn),
                Some((b, _)) if b == i
            );
            if points_to_i {
                self.update_nn(a);
            }
        }
        Some(slot.particle)
    }
}
