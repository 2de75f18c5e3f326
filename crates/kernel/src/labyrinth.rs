use crate::error::LabyrinthError;
use crate::mesh::MeshBuffers;
use crate::rng::{MazeRng, SeedPolicy};
use glam::Vec3;
use labyrinth_common::{CellCoord, Color, Quad, Vector3f};
use std::fmt;

/// Edge length of one cell in world units.
pub const CELL_SIZE: f32 = 0.1;

/// Smallest side length that still leaves one interior cell.
pub const MIN_DIMENSION: usize = 3;

/// Largest accepted side length.
pub const MAX_DIMENSION: usize = 4096;

/// Neighbor offsets in emission order: up, right, down, left.
const D_ROW: [isize; 4] = [-1, 0, 1, 0];
const D_COLUMN: [isize; 4] = [0, 1, 0, -1];

/// Per-direction corner offsets of a cell's floor, in cell units.
const DX: [f32; 4] = [0.0, 1.0, 1.0, 0.0];
const DZ: [f32; 4] = [-1.0, -1.0, 0.0, 0.0];

const FLOOR_COLOR: Color = Color::GREEN;
const START_COLOR: Color = Color::BLUE;
const WALL_COLOR: Color = Color::YELLOW;
const ROOF_COLOR: Color = Color::RED;

/// Construction parameters for a [`Labyrinth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabyrinthConfig {
    pub rows: usize,
    pub columns: usize,
    pub seed: SeedPolicy,
}

impl Default for LabyrinthConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            seed: SeedPolicy::Fixed,
        }
    }
}

/// Which optional quads to emit alongside floors and walls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Close each open cell from above with a roof quad.
    pub roof: bool,
}

/// A rectangular maze of open and closed cells.
///
/// The lifecycle is: construct (all cells closed), [`fill_randomly`](Self::fill_randomly),
/// then read geometry any number of times. Geometry reads never touch the grid,
/// so repeated reads of the same grid produce identical buffers.
#[derive(Debug, Clone)]
pub struct Labyrinth {
    rows: usize,
    columns: usize,
    /// Row-major, `true` means open.
    empty: Vec<bool>,
    rng: MazeRng,
    seed: u64,
    start: Option<CellCoord>,
    filled: bool,
}

impl Labyrinth {
    /// Create a closed grid. Rejects sides shorter than [`MIN_DIMENSION`] or
    /// longer than [`MAX_DIMENSION`].
    pub fn new(rows: usize, columns: usize, seed: SeedPolicy) -> Result<Self, LabyrinthError> {
        let valid = MIN_DIMENSION..=MAX_DIMENSION;
        if !valid.contains(&rows) || !valid.contains(&columns) {
            return Err(LabyrinthError::InvalidDimensions { rows, columns });
        }
        let seed = seed.resolve();
        tracing::info!(rows, columns, seed, "labyrinth created");
        Ok(Self {
            rows,
            columns,
            empty: vec![false; rows * columns],
            rng: MazeRng::new(seed),
            seed,
            start: None,
            filled: false,
        })
    }

    pub fn from_config(config: &LabyrinthConfig) -> Result<Self, LabyrinthError> {
        Self::new(config.rows, config.columns, config.seed)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The resolved seed; feed it back through [`SeedPolicy::Explicit`] to
    /// regenerate the same maze.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn start_cell(&self) -> Option<CellCoord> {
        self.start
    }

    /// Whether the cell is open. Out-of-range cells count as closed.
    pub fn is_open(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns && self.empty[self.index(row, column)]
    }

    pub fn open_cell_count(&self) -> usize {
        self.empty.iter().filter(|&&open| open).count()
    }

    /// Number of (open cell, closed neighbor) pairs over the four directions.
    ///
    /// Counted from the grid alone, so it equals the wall quads emitted by
    /// [`quads`](Self::quads) without building them.
    pub fn wall_count(&self) -> usize {
        self.interior_cells()
            .filter(|c| self.is_open(c.row, c.column))
            .map(|c| {
                [
                    (c.row - 1, c.column),
                    (c.row, c.column + 1),
                    (c.row + 1, c.column),
                    (c.row, c.column - 1),
                ]
                .iter()
                .filter(|&&(r, col)| !self.is_open(r, col))
                .count()
            })
            .sum()
    }

    /// World-space extent along x.
    pub fn width(&self) -> f32 {
        CELL_SIZE * self.columns as f32
    }

    /// World-space extent along z.
    pub fn height(&self) -> f32 {
        CELL_SIZE * self.rows as f32
    }

    /// Open each interior cell with probability 2/3, then pick a start cell
    /// uniformly among the open ones.
    ///
    /// Consumes exactly one draw per interior cell in row-major order, plus
    /// one draw for the start cell. On [`LabyrinthError::DegenerateMaze`] the
    /// grid is still filled (entirely closed) and has no start cell.
    pub fn fill_randomly(&mut self) -> Result<CellCoord, LabyrinthError> {
        let _span = tracing::info_span!("fill_randomly", seed = self.seed).entered();

        self.empty.fill(false);
        self.start = None;
        self.filled = true;

        let mut open = 0u32;
        for row in 1..self.rows - 1 {
            for column in 1..self.columns - 1 {
                if self.rng.next_below(3) != 0 {
                    let i = self.index(row, column);
                    self.empty[i] = true;
                    open += 1;
                }
            }
        }
        tracing::debug!(open, "interior cells opened");

        if open == 0 {
            tracing::warn!("no interior cell opened");
            return Err(LabyrinthError::DegenerateMaze);
        }

        let pick = self.rng.next_below(open) as usize;
        let start = self
            .interior_cells()
            .filter(|c| self.is_open(c.row, c.column))
            .nth(pick)
            .ok_or(LabyrinthError::DegenerateMaze)?;
        self.start = Some(start);
        tracing::info!(row = start.row, column = start.column, "start cell chosen");
        Ok(start)
    }

    /// Floor and wall quads for every open cell, in row-major order.
    pub fn quads(&self) -> Vec<Quad> {
        self.quads_with(EmitOptions::default())
    }

    /// Like [`quads`](Self::quads), with optional extra quads per open cell.
    ///
    /// Per open cell the order is: floor, walls (up, right, down, left, each
    /// only if that neighbor is closed), then roof if requested.
    pub fn quads_with(&self, options: EmitOptions) -> Vec<Quad> {
        let mut quads = Vec::new();
        for cell in self.interior_cells() {
            if !self.is_open(cell.row, cell.column) {
                continue;
            }
            quads.push(self.floor(cell));
            for direction in 0..4 {
                let n_row = cell.row.wrapping_add_signed(D_ROW[direction]);
                let n_column = cell.column.wrapping_add_signed(D_COLUMN[direction]);
                if !self.is_open(n_row, n_column) {
                    quads.push(self.wall(cell, direction));
                }
            }
            if options.roof {
                quads.push(self.roof(cell));
            }
        }
        quads
    }

    /// Flattened vertex positions of [`quads`](Self::quads).
    pub fn vertices(&self) -> Vec<f32> {
        self.mesh().vertices
    }

    /// Flattened per-vertex colors of [`quads`](Self::quads).
    pub fn colors(&self) -> Vec<f32> {
        self.mesh().colors
    }

    /// Both flattened buffers from a single grid walk.
    pub fn mesh(&self) -> MeshBuffers {
        self.mesh_with(EmitOptions::default())
    }

    pub fn mesh_with(&self, options: EmitOptions) -> MeshBuffers {
        let quads = self.quads_with(options);
        tracing::debug!(quads = quads.len(), "flattening geometry");
        MeshBuffers::from_quads(&quads)
    }

    /// Camera spawn point: centre of the start cell's floor, raised half a cell.
    pub fn start_position(&self) -> Result<Vector3f, LabyrinthError> {
        if !self.filled {
            return Err(LabyrinthError::NotFilled);
        }
        let start = self.start.ok_or(LabyrinthError::DegenerateMaze)?;
        Ok(Vector3f::new(
            (start.column as f32 + 0.5) * CELL_SIZE,
            0.5 * CELL_SIZE,
            (start.row as f32 + 1.0 - self.rows as f32 - 0.5) * CELL_SIZE,
        ))
    }

    /// Write the grid to stdout, `X` for open and `.` for closed.
    pub fn print(&self) {
        print!("{self}");
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    fn interior_cells(&self) -> impl Iterator<Item = CellCoord> + use<> {
        let columns = self.columns;
        (1..self.rows - 1)
            .flat_map(move |row| (1..columns - 1).map(move |column| CellCoord::new(row, column)))
    }

    /// z of the floor edge nearest +z for `row`, before scaling.
    fn row_z(&self, row: usize) -> f32 {
        row as f32 + 1.0 - self.rows as f32
    }

    fn floor(&self, cell: CellCoord) -> Quad {
        let color = if self.start == Some(cell) {
            START_COLOR
        } else {
            FLOOR_COLOR
        };
        Quad::new(
            Vector3f::new(
                cell.column as f32 * CELL_SIZE,
                0.0,
                self.row_z(cell.row) * CELL_SIZE,
            ),
            Vec3::X * CELL_SIZE,
            Vec3::NEG_Z * CELL_SIZE,
            color,
        )
    }

    fn wall(&self, cell: CellCoord, direction: usize) -> Quad {
        let next = (direction + 1) % 4;
        let origin = Vector3f::new(
            (cell.column as f32 + DX[direction]) * CELL_SIZE,
            0.0,
            (self.row_z(cell.row) + DZ[direction]) * CELL_SIZE,
        );
        let along = (Vector3f::new(DX[next], 0.0, DZ[next])
            - Vector3f::new(DX[direction], 0.0, DZ[direction]))
            * CELL_SIZE;
        Quad::new(origin, Vec3::Y * CELL_SIZE, along, WALL_COLOR)
    }

    fn roof(&self, cell: CellCoord) -> Quad {
        Quad::new(
            Vector3f::new(
                cell.column as f32 * CELL_SIZE,
                CELL_SIZE,
                self.row_z(cell.row) * CELL_SIZE,
            ),
            Vec3::X * CELL_SIZE,
            Vec3::NEG_Z * CELL_SIZE,
            ROOF_COLOR,
        )
    }
}

impl fmt::Display for Labyrinth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.empty.chunks(self.columns) {
            for &open in row {
                f.write_str(if open { "X" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_common::FLOATS_PER_QUAD;

    const GOLDEN_10X10: &str = "\
..........
.....XXXX.
..XXX.....
.XXXXXX.X.
.XXXXXXXX.
..XXXXX.X.
.XXX.XX...
.XXXX.XXX.
.X.X.X.XX.
..........
";

    fn filled(rows: usize, columns: usize, seed: SeedPolicy) -> Labyrinth {
        let mut lab = Labyrinth::new(rows, columns, seed).unwrap();
        lab.fill_randomly().unwrap();
        lab
    }

    #[test]
    fn rejects_too_small_dimensions() {
        for (rows, columns) in [(0, 10), (2, 10), (10, 2), (1, 1)] {
            assert_eq!(
                Labyrinth::new(rows, columns, SeedPolicy::Fixed).unwrap_err(),
                LabyrinthError::InvalidDimensions { rows, columns }
            );
        }
        assert!(Labyrinth::new(MAX_DIMENSION + 1, 3, SeedPolicy::Fixed).is_err());
    }

    #[test]
    fn golden_ten_by_ten_fixed_seed() {
        let lab = filled(10, 10, SeedPolicy::Fixed);
        assert_eq!(lab.seed(), 10);
        assert_eq!(lab.to_string(), GOLDEN_10X10);
        assert_eq!(lab.start_cell(), Some(CellCoord::new(6, 5)));
        assert_eq!(lab.open_cell_count(), 45);

        let quads = lab.quads();
        assert_eq!(quads.len(), 45 + 64);

        let spawn = lab.start_position().unwrap();
        assert!(spawn.abs_diff_eq(Vector3f::new(0.55, 0.05, -0.35), 1e-6));
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let a = filled(12, 7, SeedPolicy::Fixed);
        let b = filled(12, 7, SeedPolicy::Fixed);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.start_cell(), b.start_cell());
        assert_eq!(a.vertices(), b.vertices());
    }

    #[test]
    fn border_ring_stays_closed() {
        for seed in 0..20 {
            let mut lab = Labyrinth::new(6, 9, SeedPolicy::Explicit(seed)).unwrap();
            let _ = lab.fill_randomly();
            for column in 0..9 {
                assert!(!lab.is_open(0, column));
                assert!(!lab.is_open(5, column));
            }
            for row in 0..6 {
                assert!(!lab.is_open(row, 0));
                assert!(!lab.is_open(row, 8));
            }
        }
    }

    #[test]
    fn three_by_three_degenerate_with_fixed_seed() {
        let mut lab = Labyrinth::new(3, 3, SeedPolicy::Fixed).unwrap();
        assert_eq!(lab.fill_randomly(), Err(LabyrinthError::DegenerateMaze));
        assert!(lab.is_filled());
        assert_eq!(lab.start_cell(), None);
        assert_eq!(lab.start_position(), Err(LabyrinthError::DegenerateMaze));
        assert!(lab.quads().is_empty());
        assert!(lab.vertices().is_empty());
    }

    #[test]
    fn three_by_three_single_open_cell() {
        let lab = filled(3, 3, SeedPolicy::Explicit(2));
        assert_eq!(lab.start_cell(), Some(CellCoord::new(1, 1)));

        let quads = lab.quads();
        // One floor plus a wall on every side, since the ring is closed.
        assert_eq!(quads.len(), 5);
        assert_eq!(quads[0].color(), START_COLOR);
        assert!(quads[1..].iter().all(|q| q.color() == WALL_COLOR));
    }

    #[test]
    fn start_position_before_fill() {
        let lab = Labyrinth::new(5, 5, SeedPolicy::Fixed).unwrap();
        assert_eq!(lab.start_position(), Err(LabyrinthError::NotFilled));
        assert!(lab.quads().is_empty());
    }

    #[test]
    fn flattening_matches_floor_and_wall_counts() {
        for seed in [1, 4, 10, 31, 500] {
            let mut lab = Labyrinth::new(8, 11, SeedPolicy::Explicit(seed)).unwrap();
            if lab.fill_randomly().is_err() {
                continue;
            }
            let quads = lab.quads();
            assert_eq!(quads.len(), lab.open_cell_count() + lab.wall_count());

            let vertices = lab.vertices();
            let colors = lab.colors();
            assert_eq!(vertices.len(), quads.len() * FLOATS_PER_QUAD);
            assert_eq!(colors.len(), vertices.len());
        }
    }

    #[test]
    fn start_cell_is_open_and_contains_spawn() {
        for seed in 0..25 {
            let mut lab = Labyrinth::new(7, 7, SeedPolicy::Explicit(seed)).unwrap();
            let Ok(start) = lab.fill_randomly() else {
                continue;
            };
            assert!(lab.is_open(start.row, start.column));

            let spawn = lab.start_position().unwrap();
            let floor = lab.floor(start);
            let c = floor.corners();
            let (min_x, max_x) = (c[0].x.min(c[2].x), c[0].x.max(c[2].x));
            let (min_z, max_z) = (c[0].z.min(c[2].z), c[0].z.max(c[2].z));
            assert!(spawn.x > min_x && spawn.x < max_x);
            assert!(spawn.z > min_z && spawn.z < max_z);
        }
    }

    #[test]
    fn floor_placement_and_color() {
        let lab = filled(10, 10, SeedPolicy::Fixed);
        let floor = lab.floor(CellCoord::new(1, 5));
        let c = floor.corners();
        assert!(c[0].abs_diff_eq(Vector3f::new(0.5, 0.0, -0.8), 1e-6));
        assert!(c[2].abs_diff_eq(Vector3f::new(0.6, 0.0, -0.9), 1e-6));
        assert_eq!(floor.color(), FLOOR_COLOR);
        assert_eq!(lab.floor(CellCoord::new(6, 5)).color(), START_COLOR);
    }

    #[test]
    fn walls_sit_on_cell_edges() {
        let lab = Labyrinth::new(3, 3, SeedPolicy::Fixed).unwrap();
        let cell = CellCoord::new(1, 1);
        // Cell (1,1) of a 3-row grid spans x in [0.1, 0.2], z in [-0.2, -0.1].
        let expected = [
            (Vector3f::new(0.1, 0.0, -0.2), Vector3f::new(0.2, 0.1, -0.2)),
            (Vector3f::new(0.2, 0.0, -0.2), Vector3f::new(0.2, 0.1, -0.1)),
            (Vector3f::new(0.2, 0.0, -0.1), Vector3f::new(0.1, 0.1, -0.1)),
            (Vector3f::new(0.1, 0.0, -0.1), Vector3f::new(0.1, 0.1, -0.2)),
        ];
        for (direction, (origin, far)) in expected.iter().enumerate() {
            let wall = lab.wall(cell, direction);
            let c = wall.corners();
            assert!(c[0].abs_diff_eq(*origin, 1e-6), "direction {direction}");
            assert!(c[2].abs_diff_eq(*far, 1e-6), "direction {direction}");
        }
    }

    #[test]
    fn roof_only_when_requested() {
        let lab = filled(10, 10, SeedPolicy::Fixed);
        let plain = lab.quads();
        let roofed = lab.quads_with(EmitOptions { roof: true });
        assert_eq!(roofed.len(), plain.len() + lab.open_cell_count());
        assert!(plain.iter().all(|q| q.color() != ROOF_COLOR));
        assert!(
            roofed
                .iter()
                .filter(|q| q.color() == ROOF_COLOR)
                .all(|q| q.corners().iter().all(|p| (p.y - CELL_SIZE).abs() < 1e-6))
        );
    }

    #[test]
    fn geometry_reads_are_idempotent() {
        let lab = filled(9, 9, SeedPolicy::Fixed);
        assert_eq!(lab.quads(), lab.quads());
        assert_eq!(lab.mesh(), lab.mesh());
    }

    #[test]
    fn refill_draws_a_fresh_maze() {
        let mut lab = Labyrinth::new(10, 10, SeedPolicy::Fixed).unwrap();
        lab.fill_randomly().unwrap();
        let first = lab.to_string();
        let _ = lab.fill_randomly();
        assert_ne!(lab.to_string(), first);
        for column in 0..10 {
            assert!(!lab.is_open(0, column));
        }
    }

    #[test]
    fn extent_scales_with_cell_size() {
        let lab = Labyrinth::new(4, 6, SeedPolicy::Fixed).unwrap();
        assert!((lab.width() - 0.6).abs() < 1e-6);
        assert!((lab.height() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn wall_count_matches_emitted_walls() {
        let lab = filled(10, 10, SeedPolicy::Fixed);
        assert_eq!(lab.wall_count(), 64);
        let walls = lab.quads().iter().filter(|q| q.color() == WALL_COLOR).count();
        assert_eq!(walls, lab.wall_count());

        let single = filled(3, 3, SeedPolicy::Explicit(2));
        assert_eq!(single.wall_count(), 4);

        let closed = Labyrinth::new(5, 5, SeedPolicy::Fixed).unwrap();
        assert_eq!(closed.wall_count(), 0);
    }

    #[test]
    fn clock_seed_is_recorded() {
        let before = SeedPolicy::Clock.resolve();
        let lab = Labyrinth::new(6, 6, SeedPolicy::Clock).unwrap();
        let after = SeedPolicy::Clock.resolve();
        assert!((before..=after).contains(&lab.seed()));

        let mut replay = Labyrinth::new(6, 6, SeedPolicy::Explicit(lab.seed())).unwrap();
        let mut original = lab.clone();
        assert_eq!(original.fill_randomly().ok(), replay.fill_randomly().ok());
        assert_eq!(original.to_string(), replay.to_string());
    }
}
