use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{TableError, TableResult},
    process::invocation::{CommandRunner, Invocation, is_program_available},
    render::renderer::{PivotHandle, SceneRenderer},
    table::angles::Euler,
};

const ROTATION_MARKER: &str = "MODE7_ROTATION";

/// [`SceneRenderer`] backed by the `blender` binary in background mode.
///
/// Every call is a separate `blender -b <scene> --python-expr ...` process. Rotations are
/// tracked here and replayed into each render; the scene file itself is never saved, so
/// restoring a rotation only affects later renders from this value.
pub struct BlenderRenderer<R: CommandRunner> {
    program: String,
    scene: PathBuf,
    runner: R,
    rotations: BTreeMap<String, Euler>,
    output_path: Option<PathBuf>,
}

impl<R: CommandRunner> BlenderRenderer<R> {
    pub fn new(program: impl Into<String>, scene: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            program: program.into(),
            scene: scene.into(),
            runner,
            rotations: BTreeMap::new(),
            output_path: None,
        }
    }

    pub fn scene(&self) -> &Path {
        &self.scene
    }

    pub fn is_available(&self) -> bool {
        is_program_available(&self.program, "--version")
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    fn invocation(&self, script: &str) -> Invocation {
        Invocation::new(self.program.as_str())
            .arg("-b")
            .arg(&self.scene)
            .args(["--python-exit-code", "1", "--python-expr", script])
    }

    fn run_script(&mut self, script: &str) -> TableResult<String> {
        let inv = self.invocation(script);
        let out = self.runner.run(&inv)?.into_result(&self.program)?;
        Ok(out.stdout)
    }
}

impl<R: CommandRunner> SceneRenderer for BlenderRenderer<R> {
    fn lookup_pivot(&mut self, name: &str) -> TableResult<PivotHandle> {
        let script = lookup_script(name)?;
        let stdout = self.run_script(&script)?;
        let rotation = parse_rotation(&stdout).ok_or_else(|| {
            TableError::external_tool(
                self.program.as_str(),
                Some(0),
                format!("no rotation reported for scene object '{name}'"),
            )
        })?;
        self.rotations.insert(name.to_string(), rotation);
        Ok(PivotHandle {
            name: name.to_string(),
        })
    }

    fn rotation(&self, pivot: &PivotHandle) -> TableResult<Euler> {
        self.rotations.get(&pivot.name).copied().ok_or_else(|| {
            TableError::configuration(format!("unknown scene object '{}'", pivot.name))
        })
    }

    fn set_rotation(&mut self, pivot: &PivotHandle, rotation: Euler) -> TableResult<()> {
        let slot = self.rotations.get_mut(&pivot.name).ok_or_else(|| {
            TableError::configuration(format!("unknown scene object '{}'", pivot.name))
        })?;
        *slot = rotation;
        Ok(())
    }

    fn set_output_path(&mut self, path: &Path) {
        self.output_path = Some(path.to_path_buf());
    }

    fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    #[tracing::instrument(skip(self), fields(scene = %self.scene.display()))]
    fn render_still(&mut self) -> TableResult<()> {
        let out_path = self
            .output_path
            .clone()
            .ok_or_else(|| TableError::configuration("render output path is not set"))?;

        let script = render_script(&self.rotations, &out_path)?;
        self.run_script(&script)?;

        if !out_path.is_file() {
            return Err(TableError::external_tool(
                self.program.as_str(),
                Some(0),
                format!("render finished but '{}' was not written", out_path.display()),
            ));
        }
        Ok(())
    }
}

/// JSON string literals are valid Python string literals.
fn py_str(s: &str) -> TableResult<String> {
    Ok(serde_json::to_string(s).context("encode python string literal")?)
}

fn lookup_script(name: &str) -> TableResult<String> {
    Ok(format!(
        "import bpy\n\
         o = bpy.data.objects.get({name})\n\
         if o is None:\n    raise LookupError('scene object not found: ' + {name})\n\
         r = o.rotation_euler\n\
         print('{ROTATION_MARKER} %r %r %r' % (r.x, r.y, r.z))\n",
        name = py_str(name)?,
    ))
}

fn render_script(rotations: &BTreeMap<String, Euler>, out_path: &Path) -> TableResult<String> {
    let mut script = String::from("import bpy\n");
    for (name, r) in rotations {
        script.push_str(&format!(
            "bpy.data.objects[{}].rotation_euler = ({:?}, {:?}, {:?})\n",
            py_str(name)?,
            r.x,
            r.y,
            r.z
        ));
    }
    script.push_str(&format!(
        "bpy.context.scene.render.filepath = {}\n",
        py_str(&out_path.to_string_lossy())?
    ));
    script.push_str("bpy.ops.render.render(write_still=True)\n");
    Ok(script)
}

fn parse_rotation(stdout: &str) -> Option<Euler> {
    let line = stdout
        .lines()
        .find_map(|l| l.trim().strip_prefix(ROTATION_MARKER))?;
    let mut it = line.split_whitespace().map(str::parse::<f64>);
    let x = it.next()?.ok()?;
    let y = it.next()?.ok()?;
    let z = it.next()?.ok()?;
    Some(Euler { x, y, z })
}

#[cfg(test)]
#[path = "../../tests/unit/render/blender.rs"]
mod tests;
