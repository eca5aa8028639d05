//! Engine-agnostic selection statistics.
//!
//! Feature-gated and runtime-toggled so disabled builds pay nothing on the
//! per-frame path.

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::constants::MAX_LODS;
use crate::quadtree::Selection;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Rolling window of recent values, for timing history.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      let sum: u64 = self.buffer.iter().sum();
      sum as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128) // ~2 seconds of frames at 60fps
  }
}

/// Per-frame selection statistics, updated after each selection pass.
#[derive(Debug, Clone)]
pub struct SelectionMetrics {
  /// Count of selected nodes at each LOD level (index = level).
  pub selected_per_lod: [u32; MAX_LODS],
  /// Nodes selected for drawing in the last pass.
  pub selected_nodes: u32,
  /// Nodes rejected by the frustum in the last pass.
  pub culled_nodes: u32,
  /// Rolling window of selection pass times in microseconds.
  pub select_timings: RollingWindow<u64>,
  /// Last selection pass time in microseconds.
  pub last_select_us: u64,
  /// Selection passes recorded this session.
  pub total_selections: u64,
}

impl Default for SelectionMetrics {
  fn default() -> Self {
    Self {
      selected_per_lod: [0; MAX_LODS],
      selected_nodes: 0,
      culled_nodes: 0,
      select_timings: RollingWindow::default(),
      last_select_us: 0,
      total_selections: 0,
    }
  }
}

impl SelectionMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record one finished selection pass.
  pub fn record_selection(&mut self, selection: &Selection, timing_us: u64) {
    if !is_enabled() {
      return;
    }

    self.selected_per_lod.fill(0);
    for node in selection.selected() {
      let level = (node.lod_level as usize).min(MAX_LODS - 1);
      self.selected_per_lod[level] += 1;
    }
    self.selected_nodes = selection.len() as u32;
    self.culled_nodes = selection.culled().len() as u32;
    self.select_timings.push(timing_us);
    self.last_select_us = timing_us;
    self.total_selections += 1;
  }

  pub fn avg_select_us(&self) -> f64 {
    self.select_timings.average()
  }
}
