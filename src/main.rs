//! Rocket airframe generator.
//!
//! Builds the airframe described by airframe.toml and exports it as STL.

use std::path::{Path, PathBuf};

use airframe_gen::assembler::Assembly;
use airframe_gen::config::{self, Config};
use airframe_gen::export;
use airframe_gen::mesh;
use airframe_gen::prediction::PredictionRequest;
use airframe_gen::RegenerationController;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "airframe-gen")]
#[command(about = "Parametric rocket airframe mesh generator")]
#[command(version)]
struct Args {
    /// Parameter file (defaults to airframe.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the airframe and write STL
    Build {
        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Write ASCII instead of binary STL
        #[arg(long)]
        ascii: bool,

        /// One file per part instead of a single rocket.stl
        #[arg(long)]
        per_part: bool,
    },
    /// Print the part list
    Inspect,
    /// Print the prediction request payload as JSON
    Request,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = config::load_config(args.config.as_deref()).context("loading parameters")?;
    let mut controller = RegenerationController::new(cfg.build);
    controller
        .on_parameter_change(&cfg.inputs)
        .context("building airframe")?;

    match args.command {
        Command::Build {
            output,
            ascii,
            per_part,
        } => build(controller.current(), &output, ascii, per_part),
        Command::Inspect => {
            inspect(&controller);
            Ok(())
        }
        Command::Request => request(&cfg, &controller),
    }
}

fn build(assembly: &Assembly, output: &Path, ascii: bool, per_part: bool) -> Result<()> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("creating output directory {}", output.display()))?;

    if per_part {
        for part in &assembly.parts {
            let path = output.join(format!("{}.stl", part.name()));
            export::write_part_stl(assembly, part, &path, ascii)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Exported: {}", path.display());
        }
    } else {
        let path = output.join("rocket.stl");
        let written = if ascii {
            export::write_stl_ascii(assembly, &path)
        } else {
            export::write_stl(assembly, &path)
        };
        written.with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported: {}", path.display());
    }
    Ok(())
}

fn inspect(controller: &RegenerationController) {
    let assembly = controller.current();
    if let Some(params) = controller.params() {
        println!("mode: {}", params.mode);
    }
    println!("body length: {}", controller.body_length_field());
    println!("recenter offset: {:.2}", assembly.recenter_offset.x);
    for part in &assembly.parts {
        let t = part.pose.translation;
        let mesh = assembly.part_mesh(part);
        let bounds = mesh::bounding_box(&mesh)
            .map(|(min, max)| {
                format!(
                    "[{:.2}, {:.2}, {:.2}]..[{:.2}, {:.2}, {:.2}]",
                    min.x, min.y, min.z, max.x, max.y, max.z
                )
            })
            .unwrap_or_default();
        println!(
            "{:<8} pos=({:.2}, {:.2}, {:.2}) roll={:>5.1} tris={:<6} {}",
            part.name(),
            t.x,
            t.y,
            t.z,
            part.roll_deg(),
            mesh.num_triangles(),
            bounds
        );
    }
}

fn request(cfg: &Config, controller: &RegenerationController) -> Result<()> {
    let params = controller.params().context("no parameters built")?;
    let request = PredictionRequest::new(params, cfg.inputs.mach, cfg.inputs.aoa)?;
    println!("{}", request.to_json()?);
    Ok(())
}
