use std::path::{Path, PathBuf};

use crate::{
    foundation::error::TableError,
    render::renderer::PivotHandle,
    table::angles::{Euler, sample_angles},
};

use super::*;

const INITIAL: Euler = Euler {
    x: 0.1,
    y: 0.2,
    z: 0.3,
};

struct FakeRenderer {
    rotation: Euler,
    output: Option<PathBuf>,
    rendered: Vec<(Euler, PathBuf)>,
    fail_on_render: Option<usize>,
}

impl FakeRenderer {
    fn new() -> Self {
        Self {
            rotation: INITIAL,
            output: Some(PathBuf::from("previous.png")),
            rendered: Vec::new(),
            fail_on_render: None,
        }
    }
}

impl SceneRenderer for FakeRenderer {
    fn lookup_pivot(&mut self, name: &str) -> TableResult<PivotHandle> {
        if name != "Camera Parent" {
            return Err(TableError::external_tool("blender", Some(1), "not found"));
        }
        Ok(PivotHandle {
            name: name.to_string(),
        })
    }

    fn rotation(&self, _pivot: &PivotHandle) -> TableResult<Euler> {
        Ok(self.rotation)
    }

    fn set_rotation(&mut self, _pivot: &PivotHandle, rotation: Euler) -> TableResult<()> {
        self.rotation = rotation;
        Ok(())
    }

    fn set_output_path(&mut self, path: &Path) {
        self.output = Some(path.to_path_buf());
    }

    fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    fn render_still(&mut self) -> TableResult<()> {
        if self.fail_on_render == Some(self.rendered.len() + 1) {
            return Err(TableError::external_tool("blender", Some(1), "render crashed"));
        }
        let out = self.output.clone().unwrap();
        image::RgbImage::new(40, 20).save(&out).unwrap();
        self.rendered.push((self.rotation, out));
        Ok(())
    }
}

#[test]
fn renders_every_angle_in_order_and_cleans_up() {
    let angles = sample_angles(4, 2).unwrap();
    let mut renderer = FakeRenderer::new();
    let mut seen = Vec::new();

    render_orbit(&mut renderer, "Camera Parent", &angles, |angle, source| {
        assert_eq!(source.dimensions, Some((40, 20)));
        assert!(source.path.is_file());
        seen.push((angle, source.path.clone()));
        Ok(())
    })
    .unwrap();

    assert_eq!(
        seen.iter().map(|(a, _)| *a).collect::<Vec<_>>(),
        angles
    );
    for (_, path) in &seen {
        assert!(!path.exists(), "{} should be removed", path.display());
    }
    for ((angle, _), (rotation, _)) in seen.iter().zip(&renderer.rendered) {
        assert_eq!(*rotation, angle.to_euler());
    }
    assert_eq!(renderer.rotation, INITIAL);
    assert_eq!(renderer.output_path(), Some(Path::new("previous.png")));
}

#[test]
fn render_failure_stops_the_orbit_and_restores_rotation() {
    let angles = sample_angles(6, 1).unwrap();
    let mut renderer = FakeRenderer::new();
    renderer.fail_on_render = Some(3);
    let mut frames = 0;

    let err = render_orbit(&mut renderer, "Camera Parent", &angles, |_, _| {
        frames += 1;
        Ok(())
    })
    .unwrap_err();

    assert!(err.to_string().contains("render crashed"));
    assert_eq!(frames, 2);
    assert_eq!(renderer.rotation, INITIAL);
    for (_, path) in &renderer.rendered {
        assert!(!path.exists());
    }
}

#[test]
fn frame_handler_errors_propagate() {
    let angles = sample_angles(3, 1).unwrap();
    let mut renderer = FakeRenderer::new();

    let err = render_orbit(&mut renderer, "Camera Parent", &angles, |angle, _| {
        if angle.yaw == 120 {
            return Err(TableError::configuration("stop"));
        }
        Ok(())
    })
    .unwrap_err();

    assert!(matches!(err, TableError::Configuration(_)));
    assert_eq!(renderer.rendered.len(), 2);
    assert_eq!(renderer.rotation, INITIAL);
}

#[test]
fn unknown_pivot_fails_before_rendering() {
    let angles = sample_angles(2, 1).unwrap();
    let mut renderer = FakeRenderer::new();
    let err = render_orbit(&mut renderer, "Nope", &angles, |_, _| Ok(())).unwrap_err();
    assert!(err.is_external());
    assert!(renderer.rendered.is_empty());
}
