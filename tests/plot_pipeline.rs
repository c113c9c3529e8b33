use std::fs;

use glow_function_plot::{
    as_floats, generate_vertices, load_text_file, Domain, PlotConfig, PlotFunction,
    ShaderError, ShaderSources, ShaderStage, FRAGMENT_FILE, VERTEX_FILE,
};
use tempfile::TempDir;

#[test]
fn config_file_drives_vertex_generation() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("plot.toml");
    fs::write(
        &path,
        "function = \"square\"\nresolution = 5\nx_min = -2.0\nx_max = 2.0\n",
    )
    .unwrap();

    let config = PlotConfig::load(&path).unwrap();
    config.validate().unwrap();

    let vertices = generate_vertices(
        |x| config.function.eval(x),
        config.resolution,
        config.domain(),
    );
    let floats = as_floats(&vertices);

    assert_eq!(floats.len(), 15);
    let ys: Vec<f32> = floats.chunks(3).map(|xyz| xyz[1]).collect();
    assert_eq!(ys, vec![4.0, 1.0, 0.0, 1.0, 4.0]);
    assert!(floats.chunks(3).all(|xyz| xyz[2] == 0.0));
}

#[test]
fn default_plot_is_the_identity_line() {
    let config = PlotConfig::default();
    let vertices = generate_vertices(
        |x| config.function.eval(x),
        config.resolution,
        config.domain(),
    );

    assert_eq!(vertices.len(), 1000);
    assert_eq!(vertices.first().unwrap().position, [-1.0, -1.0, 0.0]);
    assert_eq!(vertices.last().unwrap().position, [1.0, 1.0, 0.0]);
}

#[test]
fn every_builtin_function_samples_finite_values() {
    for function in PlotFunction::ALL {
        let vertices = generate_vertices(|x| function.eval(x), 257, Domain::default());
        assert!(
            vertices.iter().all(|v| v.position.iter().all(|c| c.is_finite())),
            "{function} produced a non-finite sample"
        );
    }
}

#[test]
fn shader_directory_with_missing_vertex_stage_is_rejected() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(FRAGMENT_FILE), "void main() {}").unwrap();

    assert!(load_text_file(root.path().join(VERTEX_FILE)).is_empty());
    let err = ShaderSources::from_dir(root.path()).validate().unwrap_err();
    assert!(matches!(err, ShaderError::EmptySource(ShaderStage::Vertex)));
}
