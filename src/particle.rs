use jetty::PseudoJet;

/// Kinematics needed to cluster a particle into jets
///
/// Implementations have to be cheap to clone: the clustering works on
/// copies and never modifies the particles it is given.
pub trait Particle: Clone {
    /// Squared transverse momentum
    fn pt2(&self) -> f64;

    /// Transverse momentum
    fn pt(&self) -> f64 {
        self.pt2().sqrt()
    }

    /// Rapidity
    fn rap(&self) -> f64;

    /// Azimuthal angle
    fn phi(&self) -> f64;

    /// Combine two particles in the E-scheme, i.e. add their four-momenta
    fn recombine(&self, other: &Self) -> Self;
}

impl Particle for PseudoJet {
    fn pt2(&self) -> f64 {
        f64::from(PseudoJet::pt2(self))
    }

    fn rap(&self) -> f64 {
        f64::from(PseudoJet::rap(self))
    }

    fn phi(&self) -> f64 {
        f64::from(PseudoJet::phi(self))
    }

    fn recombine(&self, other: &Self) -> Self {
        *self + *other
    }
}
