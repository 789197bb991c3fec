//! Cluster the particles of collider events into jets.
//!
//!     ktjet -a anti-kt -R 0.4 --min-pt 20 EVENTFILE...
//!
//! Each event file holds the final-state particles of one event, one
//! particle per line as `px py pz E`. Lines starting with `#` are
//! ignored.
mod import;
mod opt;

use crate::import::import;
use crate::opt::Opt;

use anyhow::Result;
use env_logger::Env;
use ktjet::{ClusterEngine, FourVector};
use log::debug;
use structopt::StructOpt;

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let env = Env::default().filter_or("KTJET_LOG", opt.verbosity.as_str());
    env_logger::init_from_env(env);

    let mut engine: ClusterEngine<FourVector> = ClusterEngine::new(
        opt.radius,
        opt.recom,
        opt.algorithm.mode(),
        opt.min_pt,
    )?;
    engine.set_debug(opt.debug);
    debug!("Jet definition: {:?}", engine.definition());

    for file in &opt.files {
        let particles = import(file)?;
        println!("{} particles in {}", particles.len(), file.display());
        engine.build_jets(&particles);
        engine.print_jets();
    }
    Ok(())
}
