use std::path::PathBuf;

use ktjet::JetAlgorithm;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "ktjet",
    about = "Cluster particles into jets"
)]
pub struct Opt {
    /// Jet algorithm: 'kt', 'anti-kt' or 'Cambridge/Aachen'
    #[structopt(short, long, default_value = "anti-kt")]
    pub algorithm: JetAlgorithm,

    /// Jet radius
    #[structopt(short = "R", long, default_value = "0.4")]
    pub radius: f64,

    /// Recombination scheme: 1 (E), 2 (pt), 3 (pt²)
    #[structopt(long, default_value = "1")]
    pub recom: i32,

    /// Minimum jet transverse momentum
    #[structopt(long, default_value = "0")]
    pub min_pt: f64,

    /// Report the time spent on clustering
    #[structopt(short, long)]
    pub debug: bool,

    /// Verbosity level: 'off', 'error', 'warn', 'info', 'debug', 'trace'
    #[structopt(short, long, default_value = "info")]
    pub verbosity: String,

    /// Event files with one particle per line given as 'px py pz E'
    #[structopt(parse(from_os_str))]
    pub files: Vec<PathBuf>,
}
