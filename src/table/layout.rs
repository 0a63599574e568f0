use crate::table::indexer::OutputIndex;

/// Shape of a table as the runtime engine addresses it: angle-major, then pitch, then scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableLayout {
    pub yaw_count: u32,
    pub pitch_count: u32,
    pub scale_count: u32,
}

/// Position of one image inside a [`TableLayout`], all 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableCoords {
    pub yaw: u32,
    pub pitch: u32,
    pub scale: u32,
}

impl TableLayout {
    pub fn len(&self) -> u64 {
        u64::from(self.yaw_count) * u64::from(self.pitch_count) * u64::from(self.scale_count)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index_of(&self, coords: TableCoords) -> Option<OutputIndex> {
        if coords.yaw >= self.yaw_count
            || coords.pitch >= self.pitch_count
            || coords.scale >= self.scale_count
        {
            return None;
        }
        let flat = (u64::from(coords.yaw) * u64::from(self.pitch_count) + u64::from(coords.pitch))
            * u64::from(self.scale_count)
            + u64::from(coords.scale);
        u32::try_from(flat + 1).ok().map(OutputIndex)
    }

    pub fn coords_of(&self, index: OutputIndex) -> Option<TableCoords> {
        if index.0 == 0 || u64::from(index.0) > self.len() {
            return None;
        }
        let flat = index.0 - 1;
        let scale = flat % self.scale_count;
        let rest = flat / self.scale_count;
        Some(TableCoords {
            yaw: rest / self.pitch_count,
            pitch: rest % self.pitch_count,
            scale,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/table/layout.rs"]
mod tests;
