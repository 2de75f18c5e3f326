use labyrinth_common::{CellCoord, FLOATS_PER_QUAD};
use labyrinth_kernel::Labyrinth;
use serde::Serialize;

/// Labyrinth inspector for developer tooling.
///
/// Counts are derived from the grid independently of quad emission, so a
/// summary doubles as a cross-check of the generated buffers.
pub struct MazeInspector;

impl MazeInspector {
    /// Produce a summary of the labyrinth.
    pub fn summary(labyrinth: &Labyrinth) -> MazeSummary {
        let open_cells = labyrinth.open_cell_count();
        let wall_quads = labyrinth.wall_count();
        let quads = open_cells + wall_quads;
        MazeSummary {
            rows: labyrinth.rows(),
            columns: labyrinth.columns(),
            seed: labyrinth.seed(),
            open_cells,
            floor_quads: open_cells,
            wall_quads,
            buffer_floats: quads * FLOATS_PER_QUAD,
            start: labyrinth.start_cell(),
            spawn: labyrinth.start_position().ok().map(|p| p.to_array()),
        }
    }
}

/// Summary of a labyrinth for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct MazeSummary {
    pub rows: usize,
    pub columns: usize,
    pub seed: u64,
    pub open_cells: usize,
    pub floor_quads: usize,
    pub wall_quads: usize,
    /// Length of each of the vertex and color buffers.
    pub buffer_floats: usize,
    pub start: Option<CellCoord>,
    pub spawn: Option<[f32; 3]>,
}

impl std::fmt::Display for MazeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Labyrinth: {}x{} seed={} open={} floors={} walls={} floats={}",
            self.rows,
            self.columns,
            self.seed,
            self.open_cells,
            self.floor_quads,
            self.wall_quads,
            self.buffer_floats
        )?;
        match (self.start, self.spawn) {
            (Some(start), Some([x, y, z])) => {
                write!(f, " start={start} spawn=({x:.3}, {y:.3}, {z:.3})")
            }
            _ => write!(f, " start=none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_kernel::SeedPolicy;

    #[test]
    fn summary_of_golden_maze() {
        let mut lab = Labyrinth::new(10, 10, SeedPolicy::Fixed).unwrap();
        lab.fill_randomly().unwrap();
        let summary = MazeInspector::summary(&lab);

        assert_eq!(summary.open_cells, 45);
        assert_eq!(summary.wall_quads, 64);
        assert_eq!(summary.buffer_floats, 109 * 18);
        assert_eq!(summary.start, Some(CellCoord::new(6, 5)));
        assert_eq!(summary.buffer_floats, lab.vertices().len());
    }

    #[test]
    fn summary_matches_buffers_for_many_seeds() {
        for seed in 0..30 {
            let mut lab = Labyrinth::new(6, 13, SeedPolicy::Explicit(seed)).unwrap();
            let _ = lab.fill_randomly();
            let summary = MazeInspector::summary(&lab);
            assert_eq!(summary.buffer_floats, lab.vertices().len());
            assert_eq!(summary.floor_quads + summary.wall_quads, lab.quads().len());
        }
    }

    #[test]
    fn unfilled_summary_has_no_start() {
        let lab = Labyrinth::new(4, 4, SeedPolicy::Fixed).unwrap();
        let summary = MazeInspector::summary(&lab);
        assert_eq!(summary.open_cells, 0);
        assert!(summary.to_string().ends_with("start=none"));
    }

    #[test]
    fn summary_serializes() {
        let mut lab = Labyrinth::new(3, 3, SeedPolicy::Explicit(2)).unwrap();
        lab.fill_randomly().unwrap();
        let json = serde_json::to_value(MazeInspector::summary(&lab)).unwrap();
        assert_eq!(json["wall_quads"], 4);
        assert_eq!(json["start"]["row"], 1);
    }
}
