//! obj-inspect: decode an OBJ file (and its MTL library) and log a summary.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use asset::{Document, FaceErrorPolicy, MaterialProperty, MaterialTable, ParseOptions};
use corelib::{Transform, Vec3};

#[derive(Debug, Default)]
struct Args {
    path: Option<PathBuf>,
    indexed: bool,
    strict: bool,
    skip_materials: bool,
    max_lines: Option<usize>,
    translate: Option<Vec3>,
    scale: Option<f32>,
}

fn parse_vec3(value: &str) -> Option<Vec3> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

fn parse_args() -> Args {
    // Accept: <file.obj> --indexed --strict --no-mtl --max-lines=N
    //         --translate=x,y,z --scale=s
    let mut args = Args::default();
    for arg in std::env::args().skip(1) {
        if arg == "--indexed" {
            args.indexed = true;
        } else if arg == "--strict" {
            args.strict = true;
        } else if arg == "--no-mtl" {
            args.skip_materials = true;
        } else if let Some(v) = arg.strip_prefix("--max-lines=") {
            match v.parse::<usize>() {
                Ok(n) => args.max_lines = Some(n),
                Err(_) => log::warn!("Ignoring invalid --max-lines value '{}'", v),
            }
        } else if let Some(v) = arg.strip_prefix("--translate=") {
            args.translate = parse_vec3(v);
            if args.translate.is_none() {
                log::warn!("Ignoring invalid --translate value '{}'", v);
            }
        } else if let Some(v) = arg.strip_prefix("--scale=") {
            match v.parse::<f32>() {
                Ok(s) => args.scale = Some(s),
                Err(_) => log::warn!("Ignoring invalid --scale value '{}'", v),
            }
        } else if arg.starts_with("--") {
            log::warn!("Unknown flag '{}', ignored.", arg);
        } else {
            args.path = Some(PathBuf::from(arg));
        }
    }
    args
}

fn options_from(args: &Args) -> ParseOptions {
    let mut options = ParseOptions::default();
    if let Some(limit) = args.max_lines {
        options = options.with_line_limit(limit);
    }
    if args.strict {
        options = options.with_face_errors(FaceErrorPolicy::Abort);
    }
    options
}

/// Scale first, then translate. `None` when neither flag was given.
fn transform_from(args: &Args) -> Option<Transform> {
    if args.translate.is_none() && args.scale.is_none() {
        return None;
    }
    let scale = Transform::from_scale(Vec3::splat(args.scale.unwrap_or(1.0)));
    let translate = Transform::from_translation(args.translate.unwrap_or(Vec3::ZERO));
    Some(scale.then(&translate))
}

fn report_meshes(document: &Document, transform: Option<&Transform>, indexed: bool) -> Result<()> {
    for (i, mesh) in document.meshes.iter().enumerate() {
        let moved;
        let mesh = match transform {
            Some(t) => {
                moved = mesh.transformed(t)?;
                &moved
            }
            None => mesh,
        };
        let layout = mesh.layout();
        log::info!(
            "mesh #{} name={:?} material={:?} faces={} vertices={} stride={}B uv@{} normal@{} (p{} t{} n{})",
            i,
            mesh.name().unwrap_or("-"),
            mesh.material().unwrap_or("-"),
            mesh.face_count(),
            mesh.vertex_count(),
            mesh.stride(),
            mesh.uv_offset(),
            mesh.normal_offset(),
            layout.position_len,
            layout.uv_len,
            layout.normal_len
        );
        if let Some((min, max)) = mesh.bounds() {
            log::info!("    bounds: min={:?} max={:?}", min, max);
        }
        if indexed {
            let buffers = mesh.indexed_interleaved()?;
            log::info!(
                "    indexed: {} unique vertices, {} indices, {} vertex bytes",
                buffers.unique_count(),
                buffers.indices.len(),
                buffers.vertex_bytes().len()
            );
        }
    }
    Ok(())
}

fn report_materials(materials: &MaterialTable) {
    for material in materials.iter() {
        log::info!(
            "material {} Kd={:?} d={:?} map_Kd={:?}",
            material.name(),
            material.data(MaterialProperty::Diffuse),
            material.data(MaterialProperty::Opacity)[0],
            material.diffuse_texture()
        );
    }
    for err in &materials.errors {
        log::warn!("{}", err);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let Some(path) = args.path.clone() else {
        bail!("usage: obj-inspect <file.obj> [--indexed] [--strict] [--no-mtl] [--max-lines=N] [--translate=x,y,z] [--scale=s]");
    };
    log::info!(
        "Inspecting {} (indexed={}, strict={}, max_lines={:?})",
        path.display(),
        args.indexed,
        args.strict,
        args.max_lines
    );

    let document = asset::load_obj_from_path(&path, &options_from(&args))?;
    report_meshes(&document, transform_from(&args).as_ref(), args.indexed)?;
    for err in &document.errors {
        log::warn!("{}", err);
    }

    if !args.skip_materials {
        let dir = path.parent().unwrap_or(Path::new("."));
        let materials = document.load_materials(dir)?;
        report_materials(&materials);
    }

    log::info!(
        "Done: {} meshes, {} faces, {} soft errors",
        document.meshes.len(),
        document.face_count(),
        document.errors.len()
    );
    Ok(())
}
