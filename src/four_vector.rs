use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// Largest absolute rapidity assigned to momenta along the beam axis
pub const MAX_RAP: f64 = 1e5;

/// A four-momentum with components `[E, px, py, pz]`
#[derive(
    Copy, Clone, Default, PartialEq, PartialOrd, Debug, Deserialize, Serialize,
)]
pub struct FourVector(pub [f64; 4]);

impl FourVector {
    pub fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self([e, px, py, pz])
    }

    /// Massless momentum with transverse momentum `pt`, rapidity `y` and
    /// azimuth `phi`
    pub fn from_pt_y_phi(pt: f64, y: f64, phi: f64) -> Self {
        Self([
            pt * y.cosh(),
            pt * phi.cos(),
            pt * phi.sin(),
            pt * y.sinh(),
        ])
    }

    pub fn e(&self) -> f64 {
        self.0[0]
    }

    pub fn px(&self) -> f64 {
        self.0[1]
    }

    pub fn py(&self) -> f64 {
        self.0[2]
    }

    pub fn pz(&self) -> f64 {
        self.0[3]
    }

    pub fn pt2(&self) -> f64 {
        self.px() * self.px() + self.py() * self.py()
    }

    pub fn pt(&self) -> f64 {
        self.pt2().sqrt()
    }

    pub fn m2(&self) -> f64 {
        self.e() * self.e() - self.pt2() - self.pz() * self.pz()
    }

    /// Rapidity, capped at ±[MAX_RAP]
    pub fn rap(&self) -> f64 {
        let (e, pz) = (self.e(), self.pz());
        if e == pz.abs() && self.pt2() == 0. {
            // along the beam: keep the order of such momenta in pz
            let rap = MAX_RAP + pz.abs();
            return if pz >= 0. { rap } else { -rap };
        }
        (pz / e).atanh().clamp(-MAX_RAP, MAX_RAP)
    }

    /// Azimuthal angle in (-π, π]
    pub fn phi(&self) -> f64 {
        self.py().atan2(self.px())
    }
}

impl From<[f64; 4]> for FourVector {
    fn from(p: [f64; 4]) -> Self {
        Self(p)
    }
}

impl From<FourVector> for [f64; 4] {
    fn from(p: FourVector) -> Self {
        p.0
    }
}

impl std::ops::Index<usize> for FourVector {
    type Output = f64;

    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl std::ops::IndexMut<usize> for FourVector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl std::ops::AddAssign for FourVector {
    fn add_assign(&mut self, rhs: FourVector) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs
        }
    }
}

impl std::ops::Add for FourVector {
    type Output = Self;

    fn add(mut self, rhs: FourVector) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::iter::Sum for FourVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, p| acc + p)
    }
}

impl Display for FourVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [e, px, py, pz] = self.0;
        write!(f, "({e}, {px}, {py}, {pz})")
    }
}

impl Particle for FourVector {
    fn pt2(&self) -> f64 {
        FourVector::pt2(self)
    }

    fn rap(&self) -> f64 {
        FourVector::rap(self)
    }

    fn phi(&self) -> f64 {
        FourVector::phi(self)
    }

    fn recombine(&self, other: &Self) -> Self {
        *self + *other
    }
}
