use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use jetty::{anti_kt_f, Cluster, PseudoJet};
use ktjet::{
    ClusterEngine, Error, FourVector, JetAlgorithm, JetDefinition, Particle,
    RecombinationScheme,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::IntoEnumIterator;

fn random_event(seed: u64, n: usize) -> Vec<FourVector> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let pt = rng.gen_range(1.0..40.);
            let y = rng.gen_range(-2.0..2.0);
            let phi = rng.gen_range(-PI..PI);
            FourVector::from_pt_y_phi(pt, y, phi)
        })
        .collect()
}

// Three collimated sprays plus soft particles at fixed positions
fn sprays() -> Vec<FourVector> {
    let mut particles = Vec::new();
    let centres = [(0., 0.), (1.2, 2.), (-1., -2.5)];
    for (n, (y, phi)) in centres.into_iter().enumerate() {
        for k in 0..5 {
            let k = k as f64;
            let pt = 50. / (n as f64 + 1.) / (k + 1.);
            particles.push(FourVector::from_pt_y_phi(
                pt,
                y + 0.09 * k,
                phi - 0.07 * k,
            ));
        }
    }
    for k in 0..6 {
        let k = k as f64;
        particles.push(FourVector::from_pt_y_phi(0.5, -2. + 0.7 * k, 0.3 + k));
    }
    particles
}

fn total(particles: &[FourVector]) -> FourVector {
    particles.iter().copied().sum()
}

fn assert_momentum_eq(p: FourVector, q: FourVector) {
    for i in 0..4 {
        assert_abs_diff_eq!(p[i], q[i], epsilon = 1e-9);
    }
}

#[test]
fn empty_input() {
    for algo in JetAlgorithm::iter() {
        let mut engine =
            ClusterEngine::<FourVector>::new(0.4, 1, algo.mode(), 0.).unwrap();
        assert!(engine.jets_sorted().is_empty());
        assert!(engine.build_jets(&[]).is_empty());
        assert!(engine.jets_sorted().is_empty());
        assert_eq!(engine.stats().particles, 0);
    }
}

#[test]
fn single_particle() {
    let p = FourVector::new(13., 3., -4., 12.);
    for algo in JetAlgorithm::iter() {
        let mut engine = ClusterEngine::new(0.7, 1, algo.mode(), 5.).unwrap();
        assert_eq!(engine.build_jets(&[p]), [p]);
        assert_eq!(engine.jets_sorted(), [p]);
    }
}

#[test]
fn count_conservation() {
    let event = random_event(1, 80);
    for algo in JetAlgorithm::iter() {
        for r in [0.2, 0.4, 1.0] {
            let mut engine =
                ClusterEngine::new(r, 1, algo.mode(), 10.).unwrap();
            let jets = engine.build_jets(&event);
            let stats = engine.stats();
            assert_eq!(stats.particles, event.len());
            assert_eq!(event.len(), stats.merges + stats.beam_jets);
            assert_eq!(jets.len() + stats.discarded, stats.beam_jets);
            assert!(jets.iter().all(|j| j.pt() >= 10.));

            // every particle ends up in exactly one jet
            let mut engine = ClusterEngine::new(r, 1, algo.mode(), 0.).unwrap();
            let jets = engine.build_jets(&tag(&event));
            assert_eq!(jets.iter().map(|j| j.n).sum::<usize>(), event.len());
            assert_eq!(jets.len(), stats.beam_jets);
        }
    }
}

#[test]
fn momentum_conservation() {
    let event = random_event(2, 50);
    let sum = total(&event);
    for algo in JetAlgorithm::iter() {
        let mut engine = ClusterEngine::new(0.6, 1, algo.mode(), 0.).unwrap();
        let jets = engine.build_jets(&event);
        assert_eq!(engine.stats().discarded, 0);
        assert_momentum_eq(total(&jets), sum);
    }
}

#[test]
fn input_is_not_modified() {
    let event = random_event(3, 20);
    let copy = event.clone();
    let mut engine = ClusterEngine::with_radius(1.0, 0.).unwrap();
    engine.build_jets(&event);
    assert_eq!(event, copy);
}

// Hard core at the origin with soft satellites at increasing distances
fn core_with_satellites() -> Vec<FourVector> {
    let mut particles = vec![FourVector::from_pt_y_phi(100., 0., 0.)];
    for k in 0..5 {
        let dist = 0.1 + 0.2 * k as f64;
        let angle = 2. * PI * k as f64 / 5.;
        particles.push(FourVector::from_pt_y_phi(
            1.,
            dist * angle.cos(),
            dist * angle.sin(),
        ));
    }
    particles
}

fn tag(particles: &[FourVector]) -> Vec<Tagged> {
    particles.iter().map(|p| Tagged { p: *p, n: 1 }).collect()
}

#[test]
fn larger_radius_grows_leading_jet() {
    let event = tag(&core_with_satellites());
    for algo in JetAlgorithm::iter() {
        let mut sizes = Vec::new();
        for r in [0.05, 0.2, 0.4, 0.6, 0.8, 1.0] {
            let mut engine = ClusterEngine::new(r, 1, algo.mode(), 0.).unwrap();
            let jets = engine.build_jets(&event);
            sizes.push(jets.iter().map(|j| j.n).max().unwrap());
        }
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]), "{algo}: {sizes:?}");
        assert_eq!(sizes, [1, 2, 3, 4, 5, 6], "{algo}");
    }
}

#[derive(Clone, Debug)]
struct Tagged {
    p: FourVector,
    n: usize,
}

impl Particle for Tagged {
    fn pt2(&self) -> f64 {
        self.p.pt2()
    }

    fn rap(&self) -> f64 {
        self.p.rap()
    }

    fn phi(&self) -> f64 {
        self.p.phi()
    }

    fn recombine(&self, other: &Self) -> Self {
        Self {
            p: self.p + other.p,
            n: self.n + other.n,
        }
    }
}

#[test]
fn close_pair_merges_in_all_modes() {
    let p = FourVector::from_pt_y_phi(10., 0., 0.);
    let q = FourVector::from_pt_y_phi(10., 0.1, 0.1);
    for algo in JetAlgorithm::iter() {
        let mut engine = ClusterEngine::new(0.4, 1, algo.mode(), 0.).unwrap();
        assert_eq!(engine.build_jets(&[p, q]), [p + q], "{algo}");
    }
    // Cambridge/Aachen ignores the transverse momenta
    for (pt1, pt2) in [(1., 1000.), (1000., 1.), (0.01, 0.02)] {
        let p = FourVector::from_pt_y_phi(pt1, 0., 0.);
        let q = FourVector::from_pt_y_phi(pt2, 0.1, 0.1);
        let mut engine = ClusterEngine::new(0.4, 1, 0, 0.).unwrap();
        assert_eq!(engine.build_jets(&[p, q]), [p + q]);
    }
}

#[test]
fn two_hard_particles_and_soft_far_away() {
    let p = FourVector::from_pt_y_phi(10., 0., 0.);
    let q = FourVector::from_pt_y_phi(10., 0.05, 0.05);
    let mut engine = ClusterEngine::with_radius(0.4, 5.).unwrap();
    let jets = engine.build_jets(&[p, q]);
    assert_eq!(jets.len(), 1);
    // pt = 20 cos(0.025) from the small opening angle
    assert_abs_diff_eq!(jets[0].pt(), (p + q).pt(), epsilon = 1e-9);
    assert_abs_diff_eq!(jets[0].pt(), 20., epsilon = 1e-2);
    assert_eq!(engine.stats().discarded, 0);

    let soft = FourVector::from_pt_y_phi(3., 3., 3.);
    for algo in JetAlgorithm::iter() {
        let mut engine = ClusterEngine::new(0.4, 1, algo.mode(), 5.).unwrap();
        let jets = engine.build_jets(&[p, q, soft]);
        assert_eq!(jets.len(), 1, "{algo}");
        assert_abs_diff_eq!(jets[0].pt(), (p + q).pt(), epsilon = 1e-9);
        assert_eq!(engine.stats().discarded, 1);
        assert_eq!(engine.stats().beam_jets, 2);
    }
}

#[test]
fn rerun_replaces_cached_jets() {
    let mut engine = ClusterEngine::with_radius(0.4, 0.).unwrap();
    engine.build_jets(&random_event(4, 30));
    let p = FourVector::from_pt_y_phi(1., 0., 0.);
    engine.build_jets(&[p]);
    assert_eq!(engine.jets(), [p]);
    assert_eq!(engine.jets_sorted(), [p]);
    assert_eq!(engine.stats().particles, 1);
}

#[test]
fn sorted_jets_descend_in_pt() {
    let mut engine = ClusterEngine::new(0.4, 1, -1, 0.).unwrap();
    let jets = engine.build_jets(&random_event(5, 60));
    let sorted = engine.jets_sorted();
    assert_eq!(sorted.len(), jets.len());
    assert!(sorted.windows(2).all(|w| w[0].pt() >= w[1].pt()));
}

#[test]
fn constructor_validation() {
    type Engine = ClusterEngine<FourVector>;
    assert_eq!(
        Engine::new(0., 1, 1, 0.).unwrap_err(),
        Error::InvalidRadius(0.)
    );
    assert_eq!(
        Engine::with_radius(-0.4, 0.).unwrap_err(),
        Error::InvalidRadius(-0.4)
    );
    assert!(matches!(
        Engine::with_radius(f64::NAN, 0.),
        Err(Error::InvalidRadius(_))
    ));
    assert_eq!(
        Engine::with_recombination(0.4, 2, 0.).unwrap_err(),
        Error::UnsupportedRecombination(RecombinationScheme::Pt)
    );
    assert_eq!(
        Engine::new(0.4, 3, -1, 0.).unwrap_err(),
        Error::UnsupportedRecombination(RecombinationScheme::Pt2)
    );
    assert_eq!(
        Engine::new(0.4, 4, 1, 0.).unwrap_err(),
        Error::UnknownRecombination(4)
    );
    assert_eq!(Engine::new(0.4, 1, 2, 0.).unwrap_err(), Error::UnknownMode(2));
    assert_eq!(
        Engine::with_radius(0.4, -1.).unwrap_err(),
        Error::InvalidMinPt(-1.)
    );

    let engine = Engine::with_radius(0.7, 3.).unwrap();
    assert_eq!(engine.algorithm(), JetAlgorithm::Kt);
    assert_eq!(engine.recombination(), RecombinationScheme::E);
    assert_eq!(engine.radius(), 0.7);
    assert_eq!(engine.min_pt(), 3.);
    let engine = Engine::with_recombination(0.5, 1, 0.).unwrap();
    assert_eq!(engine.algorithm(), JetAlgorithm::Kt);
}

#[test]
fn from_definition() {
    let def = JetDefinition {
        algorithm: JetAlgorithm::CambridgeAachen,
        radius: 0.8,
        min_pt: 20.,
        recombination: RecombinationScheme::E,
    };
    let engine = ClusterEngine::<FourVector>::from_definition(&def).unwrap();
    assert_eq!(engine.definition(), def);
    let def = JetDefinition {
        recombination: RecombinationScheme::Pt,
        ..def
    };
    assert!(ClusterEngine::<FourVector>::from_definition(&def).is_err());
}

#[test]
fn agrees_with_jetty() {
    let event = sprays();
    let min_pt = 1.;
    let mut engine = ClusterEngine::new(0.4, 1, -1, min_pt).unwrap();
    let jets = engine.build_jets(&event);

    let pseudojets: Vec<PseudoJet> =
        event.iter().map(|p| PseudoJet::from(p.0)).collect();
    let mut engine_pj = ClusterEngine::new(0.4, 1, -1, min_pt).unwrap();
    let jets_pj = engine_pj.build_jets(&pseudojets);

    let reference = pseudojets
        .cluster_if(anti_kt_f(0.4), |p: PseudoJet| p.pt() > min_pt);

    let mut pts: Vec<f64> = jets.iter().map(|j| j.pt()).collect();
    let mut pts_pj: Vec<f64> = jets_pj.iter().map(Particle::pt).collect();
    let mut pts_ref: Vec<f64> = reference.iter().map(Particle::pt).collect();
    for v in [&mut pts, &mut pts_pj, &mut pts_ref] {
        v.sort_by(|a, b| b.total_cmp(a));
    }
    assert_eq!(pts.len(), pts_ref.len());
    assert_eq!(pts_pj.len(), pts_ref.len());
    for ((pt, pt_pj), pt_ref) in pts.iter().zip(&pts_pj).zip(&pts_ref) {
        assert_abs_diff_eq!(*pt, *pt_ref, epsilon = 1e-6);
        assert_abs_diff_eq!(*pt_pj, *pt_ref, epsilon = 1e-6);
    }
}
