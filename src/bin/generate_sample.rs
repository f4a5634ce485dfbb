use std::path::PathBuf;

use anyhow::{Context, Result};

/// Kind, title stem and year of each generated entry.
const ENTRIES: [(&str, &str, u16); 8] = [
    ("Review", "Tiny Metals: multi-element metallic nanoparticles", 2023),
    ("Journal", "Mn:Ni:Ce nanocomposite-enhanced inverted organic solar cells", 2024),
    ("Poster", "Gamma spectroscopy of laboratory sources", 2021),
    ("Conference", "Alpha decay energy spectra with silicon detectors", 2022),
    ("Poster", "Genetic algorithm optimisation of thin-film thickness", 2024),
    ("Manuscript", "Plasmonic enhancement in bulk heterojunctions", 2025),
    ("Conference", "SEM and EDS characterisation of nanocomposites", 2024),
    ("Thesis", "Honours project: organic photovoltaic modelling", 2022),
];

const VENUES: [&str; 4] = [
    "University of Pretoria",
    "SAIP Annual Conference",
    "Journal of Applied Physics",
    "",
];

fn main() -> Result<()> {
    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_publications.csv"));

    let mut writer = csv::Writer::from_path(&out)
        .with_context(|| format!("creating {}", out.display()))?;
    writer.write_record(["Title", "Type", "Year", "Submitted", "Venue"])?;

    for (i, (kind, title, year)) in ENTRIES.iter().enumerate() {
        let month = (i % 12) + 1;
        let submitted = format!("{year}-{month:02}-15");
        writer.write_record([
            title.to_string(),
            kind.to_string(),
            year.to_string(),
            submitted,
            VENUES[i % VENUES.len()].to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {} entries to {}", ENTRIES.len(), out.display());
    Ok(())
}
