use std::collections::VecDeque;

use crate::models::EMOTION_COUNT;

/// Fixed-capacity history behind the engagement line chart: append at the
/// tail, evict from the head once full.
#[derive(Debug, Clone)]
pub struct ScalarWindow {
    capacity: usize,
    points: VecDeque<(String, f64)>,
}

impl ScalarWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, label: String, value: f64) {
        self.points.push_back((label, value));
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, f64)> {
        self.points.iter()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// One heatmap cell: category row `row` at time column `tick`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub tick: u64,
    pub row: usize,
    pub value: f64,
}

/// Category-by-time history behind the heatmap. Unlike `ScalarWindow` this
/// does not evict by element count: columns are keyed by a monotonically
/// increasing tick index, and eviction keeps the index range
/// `[tick_index - capacity, tick_index]`. The prune runs before the index
/// increments, so one extra column beyond `capacity` stays visible.
#[derive(Debug, Clone)]
pub struct TrendGrid {
    capacity: u64,
    tick_index: u64,
    cells: Vec<GridCell>,
}

impl TrendGrid {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity as u64,
            tick_index: 0,
            cells: Vec::new(),
        }
    }

    pub fn push_column(&mut self, values: &[f64; EMOTION_COUNT]) {
        for (row, value) in values.iter().enumerate() {
            self.cells.push(GridCell {
                tick: self.tick_index,
                row,
                value: *value,
            });
        }

        if self.tick_index > self.capacity {
            let cutoff = self.tick_index - self.capacity;
            self.cells.retain(|cell| cell.tick >= cutoff);
        }

        self.tick_index += 1;
    }

    pub fn tick_index(&self) -> u64 {
        self.tick_index
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Clears retained cells without rewinding the tick index.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
