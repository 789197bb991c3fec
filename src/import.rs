use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ktjet::FourVector;
use log::debug;

/// Read the particles of one event
pub fn import(filename: &Path) -> Result<Vec<FourVector>> {
    debug!("Importing particles from {:?}", filename);
    let file = File::open(filename)
        .with_context(|| format!("Failed to open {:?}", filename))?;
    import_particles(BufReader::new(file))
        .with_context(|| format!("Failed to import {:?}", filename))
}

pub fn import_particles<R: BufRead>(reader: R) -> Result<Vec<FourVector>> {
    let mut particles = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let p = parse_particle(line)
            .with_context(|| format!("Error in line {}", n + 1))?;
        particles.push(p);
    }
    Ok(particles)
}

fn parse_particle(line: &str) -> Result<FourVector> {
    let entries: Vec<f64> = line
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<_, _>>()?;
    let [px, py, pz, e]: [f64; 4] = entries.as_slice().try_into().map_err(
        |_| anyhow!("Expected 4 momentum components, found {}", entries.len())
    )?;
    Ok(FourVector::new(e, px, py, pz))
}
