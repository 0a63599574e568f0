use crate::foundation::error::{TableError, TableResult};

/// One camera orbit position, in whole degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AngleSample {
    /// Rotation around the vertical axis, `0 <= yaw < 360`.
    pub yaw: i32,
    /// Camera tilt. Applied as a negative elevation (positive pitch looks down on the subject).
    pub pitch: i32,
}

/// Euler rotation in radians, `x` = elevation, `y` = roll, `z` = yaw.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AngleSample {
    /// Orientation for the camera pivot: `(-pitch, 0, yaw)`.
    pub fn to_euler(self) -> Euler {
        Euler {
            x: f64::from(-self.pitch).to_radians(),
            y: 0.0,
            z: f64::from(self.yaw).to_radians(),
        }
    }
}

/// Degrees between consecutive samples on an axis split into `count` rotations.
pub fn angle_step(count: u32) -> i32 {
    (360.0 / f64::from(count)).round_ties_even() as i32
}

/// Every `(yaw, pitch)` pair to render, yaw-major and pitch-minor.
pub fn sample_angles(yaw_count: u32, pitch_count: u32) -> TableResult<Vec<AngleSample>> {
    if yaw_count == 0 || pitch_count == 0 {
        return Err(TableError::configuration(
            "yaw and pitch rotation counts must be >= 1",
        ));
    }

    let yaw_step = angle_step(yaw_count);
    let pitch_step = angle_step(pitch_count);

    let mut out = Vec::with_capacity(yaw_count as usize * pitch_count as usize);
    for yaw_i in 0..yaw_count {
        let yaw = (i64::from(yaw_i) * i64::from(yaw_step)).rem_euclid(360) as i32;
        for pitch_i in 0..pitch_count {
            out.push(AngleSample {
                yaw,
                pitch: (i64::from(pitch_i) * i64::from(pitch_step)) as i32,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/table/angles.rs"]
mod tests;
