mod args;

use anyhow::{Context, Result};
use lumina::{MeshBuilder, SceneUpload};

use self::args::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Args::parse()?;

    let mut builder = MeshBuilder::from_obj(&args.model)
        .context("Couldn't load model")?
        .with_parallel(args.parallel);

    if let Some(max_depth) = args.max_depth {
        builder = builder.with_max_depth(max_depth);
    }

    let mesh = builder.build().context("Couldn't build mesh")?;
    let geometry = mesh.geometry();

    let stats = geometry
        .validate_bvh()
        .context("Built BVH turned out to be invalid")?;

    log::info!(
        "BVH is valid; nodes = {}, leaves = {}, depth = {}/{}",
        stats.nodes,
        stats.leaves,
        stats.depth,
        geometry.max_depth(),
    );

    log::info!(
        "Leaf sizes; min = {}, max = {}, mean = {:.2}",
        stats.min_leaf_size,
        stats.max_leaf_size,
        stats.mean_leaf_size,
    );

    if args.print {
        geometry.traverse_bvh(0);
    }

    let upload = SceneUpload::new(geometry);

    log::info!(
        "Scene upload; total = {} bytes, vertices = {}, triangles = {}, \
         nodes = {}",
        upload.bytes().len(),
        upload.vertices().size,
        upload.triangles().size,
        upload.nodes().size,
    );

    Ok(())
}
