//! Command-line inspector for material shader variants
//!
//! Loads a `.gltf` document, resolves its materials and prints the variant
//! each one compiles to under the selected render toggles.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use material_variants::config::Config;
use material_variants::foundation::logging;
use material_variants::material::MaterialLibrary;
use material_variants::render::RenderToggles;
use material_variants::variant::VariantCompiler;

mod report;
mod settings;

use report::VariantReport;
use settings::InspectorConfig;

const FEATURE_FLAGS: [(&str, &str); 4] = [
    ("no-clearcoat", "Disable the clearcoat render toggle"),
    ("no-pbr-specular", "Disable the specular render toggle"),
    ("no-sheen", "Disable the sheen render toggle"),
    ("no-transmission", "Disable the transmission (and volume) render toggle"),
];

fn cli() -> Command {
    let mut command = Command::new("variant_inspector")
        .about("Prints the shader variants a glTF document's materials compile to")
        .arg(
            Arg::new("gltf")
                .value_name("FILE")
                .help("Path to a .gltf JSON document")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Inspector settings (.toml or .ron)"),
        )
        .arg(
            Arg::new("toggles")
                .short('t')
                .long("toggles")
                .value_name("FILE")
                .help("Render toggles (.toml or .ron); overrides the settings file"),
        )
        .arg(
            Arg::new("material")
                .short('m')
                .long("material")
                .value_name("INDEX")
                .help("Only inspect this material index")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("include-default")
                .long("include-default")
                .help("Also print the default material variant")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print variants as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("save-toggles")
                .long("save-toggles")
                .value_name("FILE")
                .help("Write the effective render toggles to a file"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log filter when RUST_LOG is unset"),
        );

    for (flag, help) in FEATURE_FLAGS {
        command = command.arg(Arg::new(flag).long(flag).help(help).action(ArgAction::SetTrue));
    }

    command
}

fn effective_toggles(matches: &ArgMatches, config: &InspectorConfig) -> Result<RenderToggles> {
    let mut toggles = match matches.get_one::<String>("toggles") {
        Some(path) => RenderToggles::load_from_file(path)
            .with_context(|| format!("Failed to load render toggles from {}", path))?,
        None => config.toggles,
    };

    if matches.get_flag("no-clearcoat") {
        toggles.clearcoat = false;
    }
    if matches.get_flag("no-pbr-specular") {
        toggles.pbr_specular = false;
    }
    if matches.get_flag("no-sheen") {
        toggles.sheen = false;
    }
    if matches.get_flag("no-transmission") {
        toggles.transmission = false;
    }

    Ok(toggles)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => InspectorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => InspectorConfig::default(),
    };

    match matches.get_one::<String>("log-level") {
        Some(level) => logging::init_with_level(level),
        None if matches.contains_id("config") => logging::init_with_level(&config.log_level),
        None => logging::init(),
    }

    let toggles = effective_toggles(&matches, &config)?;
    log::info!("Render toggles: {:?}", toggles);

    if let Some(path) = matches.get_one::<String>("save-toggles") {
        toggles
            .save_to_file(path)
            .with_context(|| format!("Failed to save render toggles to {}", path))?;
    }

    let gltf_path = matches
        .get_one::<String>("gltf")
        .map(PathBuf::from)
        .context("Missing glTF path")?;
    let library = MaterialLibrary::from_file(&gltf_path)
        .with_context(|| format!("Failed to load materials from {:?}", gltf_path))?;

    for failure in library.failures() {
        eprintln!(
            "warning: material #{} replaced by the default material: {}",
            failure.index, failure.error
        );
    }

    let selected: Vec<usize> = match matches.get_one::<usize>("material") {
        Some(&index) if index < library.len() => vec![index],
        Some(&index) => anyhow::bail!(
            "Material index {} out of range ({} materials in {:?})",
            index,
            library.len(),
            gltf_path
        ),
        None => (0..library.len()).collect(),
    };

    let mut reports: Vec<VariantReport<'_>> = selected
        .into_iter()
        .map(|index| {
            let material = library.material(Some(index));
            VariantReport {
                index: Some(index),
                material,
                output: VariantCompiler::compile(material, &toggles),
            }
        })
        .collect();

    if matches.get_flag("include-default") {
        let material = library.default_material();
        reports.push(VariantReport {
            index: None,
            material,
            output: VariantCompiler::compile(material, &toggles),
        });
    }

    if matches.get_flag("json") {
        let values: Vec<_> = reports.iter().map(VariantReport::to_json).collect();
        let text = serde_json::to_string_pretty(&values).context("Failed to render JSON")?;
        println!("{}", text);
    } else {
        for report in &reports {
            println!("{}", report);
        }
    }

    Ok(())
}
