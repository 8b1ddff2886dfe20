use std::fs;
use std::path::{Path, PathBuf};

use lumina::{gpu, BvhError, LoadError, MeshBuilder, SceneUpload};

/// Scratch directory unique to a single test.
fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("lumina-{}-{}", std::process::id(), test));

    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes a `size` x `size` grid of quads lying on the XZ plane.
fn write_grid(dir: &Path, size: usize, mtllib: Option<&str>) -> PathBuf {
    let mut src = String::new();

    if let Some(mtllib) = mtllib {
        src += &format!("mtllib {mtllib}\n");
    }

    for z in 0..=size {
        for x in 0..=size {
            src += &format!("v {x} 0 {z}\n");
            src += &format!(
                "vt {} {}\n",
                x as f32 / size as f32,
                z as f32 / size as f32
            );
        }
    }

    src += "vn 0 1 0\n";

    for z in 0..size {
        for x in 0..size {
            let a = z * (size + 1) + x + 1;
            let b = a + 1;
            let c = a + size + 2;
            let d = a + size + 1;

            src += &format!("f {a}/{a}/1 {b}/{b}/1 {c}/{c}/1 {d}/{d}/1\n");
        }
    }

    let path = dir.join("grid.obj");

    fs::write(&path, src).unwrap();
    path
}

#[test]
fn load_build_validate_upload() {
    let dir = scratch_dir("pipeline");

    fs::write(
        dir.join("grid.mtl"),
        "newmtl floor\nKd 0.5 0.5 0.5\nPr 0.75\nmap_Kd floor.png\n",
    )
    .unwrap();

    let path = write_grid(&dir, 32, Some("grid.mtl"));
    let mesh = MeshBuilder::from_obj(&path).unwrap().build().unwrap();
    let geometry = mesh.geometry();

    assert_eq!((33 * 33), geometry.vertices().len());
    assert_eq!(2 * 32 * 32, geometry.triangles().len());
    assert_eq!(0.75, mesh.material().roughness);
    assert_eq!(Some(PathBuf::from("floor.png")), mesh.material().color_map);

    let stats = geometry.validate_bvh().unwrap();

    assert_eq!(lumina::default_max_depth(2048), geometry.max_depth());
    assert!(stats.depth <= geometry.max_depth());
    assert_eq!(2 * stats.leaves - 1, stats.nodes);

    for vertex in geometry.vertices() {
        assert_eq!(glam::Vec3::Y, vertex.normal);
    }

    let upload = SceneUpload::new(geometry);

    assert_eq!(2048, upload.triangle_count());
    assert_eq!(
        geometry.nodes().len() * std::mem::size_of::<gpu::BvhNode>(),
        upload.nodes().size
    );

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn parallel_build_over_loaded_model() {
    let dir = scratch_dir("parallel");
    let path = write_grid(&dir, 64, None);

    let seq = MeshBuilder::from_obj(&path).unwrap().build().unwrap();

    let par = MeshBuilder::from_obj(&path)
        .unwrap()
        .with_parallel(true)
        .build()
        .unwrap();

    assert_eq!(seq.geometry().nodes(), par.geometry().nodes());
    assert_eq!(seq.geometry().triangles(), par.geometry().triangles());
    assert_eq!(&lumina::Material::default(), par.material());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn materials_are_folded_into_one() {
    let dir = scratch_dir("folded");

    fs::write(
        dir.join("grid.mtl"),
        "newmtl a\nKd 0.2 0.2 0.2\nmap_Kd a.png\nPr 0.3\n\n\
         newmtl b\nKd 0.9 0.1 0.1\nKe 4.0 4.0 4.0\n",
    )
    .unwrap();

    let path = write_grid(&dir, 2, Some("grid.mtl"));
    let mesh = MeshBuilder::from_obj(&path).unwrap().build().unwrap();
    let material = mesh.material();

    assert_eq!(glam::vec3(0.9, 0.1, 0.1), material.color);
    assert_eq!(4.0, material.emissive_strength);
    assert_eq!(0.0, material.roughness);
    assert_eq!(Some(PathBuf::from("a.png")), material.color_map);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_material_library_is_skipped() {
    let dir = scratch_dir("missing-mtl");
    let path = write_grid(&dir, 2, Some("nope.mtl"));
    let mesh = MeshBuilder::from_obj(&path).unwrap().build().unwrap();

    assert_eq!(&lumina::Material::default(), mesh.material());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn errors() {
    let dir = scratch_dir("errors");

    let err = MeshBuilder::from_obj(dir.join("missing.obj")).unwrap_err();

    assert!(matches!(
        err,
        LoadError::Load {
            source: tobj::LoadError::OpenFileFailed,
            ..
        }
    ));

    let broken = dir.join("broken.obj");

    fs::write(&broken, "v 0 0 x\nf 1 1 1\n").unwrap();

    let err = MeshBuilder::from_obj(&broken).unwrap_err();

    assert!(matches!(
        err,
        LoadError::Load {
            source: tobj::LoadError::PositionParseError,
            ..
        }
    ));
    assert!(err.to_string().contains("broken.obj"));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn corrupted_tree_is_reported() {
    let dir = scratch_dir("corrupted");
    let path = write_grid(&dir, 4, None);
    let mesh = MeshBuilder::from_obj(&path).unwrap().build().unwrap();

    let mut nodes = mesh.geometry().nodes().to_vec();

    nodes[0].index = nodes.len() as u32;

    let err = lumina::bvh::validate(
        mesh.geometry().vertices(),
        mesh.geometry().triangles(),
        &nodes,
        mesh.geometry().max_depth(),
    )
    .unwrap_err();

    assert!(matches!(err, BvhError::ChildOutOfBounds { node: 0, .. }));

    fs::remove_dir_all(dir).unwrap();
}
