//! Indexed tabular containers for event data.
//!
//! Flow-cytometry events live in two tables sharing one identifier space:
//! a float-valued [`EventFrame`] of measured channels and a boolean
//! [`GateTable`] of per-stage gate annotations. Rows are addressed by a
//! stable [`EventId`], never by physical position, so the two tables stay
//! joinable after filtering or reordering.

use std::collections::HashMap;

use crate::error::{CytogateError, Result};

/// Stable identifier of one recorded cell/particle measurement.
///
/// Assigned once at load time and preserved through every subsequent
/// filter, sample, or reorder.
pub type EventId = u64;

/// A table of named `f32` measurement channels with an explicit event index.
///
/// # Examples
///
/// ```
/// use cytogate::frame::EventFrame;
///
/// let frame = EventFrame::new(
///     vec![0, 1, 2],
///     vec![
///         ("FSC-A".to_string(), vec![1.0, 2.0, 3.0]),
///         ("SSC-A".to_string(), vec![4.0, 5.0, 6.0]),
///     ],
/// )
/// .expect("valid columns");
/// assert_eq!(frame.shape(), (3, 2));
/// ```
#[derive(Debug, Clone)]
pub struct EventFrame {
    index: Vec<EventId>,
    columns: Vec<(String, Vec<f32>)>,
    row_of: HashMap<EventId, usize>,
}

impl EventFrame {
    /// Creates a new `EventFrame` from an event index and named columns.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no columns, if any column's length
    /// differs from the index length, on empty or duplicate column names,
    /// or on duplicate event ids.
    pub fn new(index: Vec<EventId>, columns: Vec<(String, Vec<f32>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err("EventFrame must have at least one column".into());
        }
        validate_columns(&index, columns.iter().map(|(n, c)| (n.as_str(), c.len())))?;
        let row_of = build_row_map(&index)?;
        Ok(Self {
            index,
            columns,
            row_of,
        })
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    /// Returns the number of rows (events).
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    /// Returns the number of columns (channels).
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns the event index in row order.
    #[must_use]
    pub fn index(&self) -> &[EventId] {
        &self.index
    }

    /// Returns the channel names.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns a reference to a channel column by name.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::MissingColumn`] if the column doesn't exist.
    pub fn column(&self, name: &str) -> Result<&[f32]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| CytogateError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Returns true if the frame contains an event with the given id.
    #[must_use]
    pub fn contains_event(&self, id: EventId) -> bool {
        self.row_of.contains_key(&id)
    }

    /// Returns one event's channel values, addressed by event id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not in the index.
    pub fn event(&self, id: EventId) -> Result<Vec<f32>> {
        let row = self.row_position(id)?;
        Ok(self.columns.iter().map(|(_, col)| col[row]).collect())
    }

    /// Selects a subset of events by id, preserving the given id order.
    ///
    /// Lookup is id-based: the physical row order of this frame is
    /// irrelevant, and the result's index is exactly `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if any id is not in the index.
    pub fn select_events(&self, ids: &[EventId]) -> Result<Self> {
        let mut rows = Vec::with_capacity(ids.len());
        for &id in ids {
            rows.push(self.row_position(id)?);
        }
        let columns = self
            .columns
            .iter()
            .map(|(name, col)| {
                let data: Vec<f32> = rows.iter().map(|&r| col[r]).collect();
                (name.clone(), data)
            })
            .collect();
        Self::new(ids.to_vec(), columns)
    }

    fn row_position(&self, id: EventId) -> Result<usize> {
        self.row_of
            .get(&id)
            .copied()
            .ok_or_else(|| CytogateError::Other(format!("Event id {id} not found in index")))
    }
}

/// A table of named boolean gate columns with an explicit event index.
///
/// Each column records whether an event passed one gate stage. Shares the
/// id-based addressing discipline of [`EventFrame`].
#[derive(Debug, Clone)]
pub struct GateTable {
    index: Vec<EventId>,
    columns: Vec<(String, Vec<bool>)>,
    row_of: HashMap<EventId, usize>,
}

impl GateTable {
    /// Creates a new `GateTable` from an event index and named columns.
    ///
    /// # Errors
    ///
    /// Same validity rules as [`EventFrame::new`].
    pub fn new(index: Vec<EventId>, columns: Vec<(String, Vec<bool>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err("GateTable must have at least one column".into());
        }
        validate_columns(&index, columns.iter().map(|(n, c)| (n.as_str(), c.len())))?;
        let row_of = build_row_map(&index)?;
        Ok(Self {
            index,
            columns,
            row_of,
        })
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    /// Returns the number of rows (events).
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    /// Returns the event index in row order.
    #[must_use]
    pub fn index(&self) -> &[EventId] {
        &self.index
    }

    /// Returns the gate column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns true if a gate column with the given name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Returns a reference to a gate column by name.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::MissingColumn`] if the column doesn't exist.
    pub fn column(&self, name: &str) -> Result<&[bool]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| CytogateError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Returns one event's flag in the given column, addressed by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the column or the id is absent.
    pub fn flag(&self, name: &str, id: EventId) -> Result<bool> {
        let col = self.column(name)?;
        let row = self
            .row_of
            .get(&id)
            .copied()
            .ok_or_else(|| CytogateError::Other(format!("Event id {id} not found in index")))?;
        Ok(col[row])
    }

    /// Returns the ids of all events whose flag in `name` is true,
    /// in index order.
    ///
    /// # Errors
    ///
    /// Returns [`CytogateError::MissingColumn`] if the column doesn't exist.
    pub fn events_where(&self, name: &str) -> Result<Vec<EventId>> {
        let col = self.column(name)?;
        Ok(self
            .index
            .iter()
            .zip(col.iter())
            .filter(|(_, &flag)| flag)
            .map(|(&id, _)| id)
            .collect())
    }

    /// Selects the flags of `name` for the given ids, preserving id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the column or any id is absent.
    pub fn select_flags(&self, name: &str, ids: &[EventId]) -> Result<Vec<bool>> {
        let col = self.column(name)?;
        let mut flags = Vec::with_capacity(ids.len());
        for &id in ids {
            let row = self
                .row_of
                .get(&id)
                .copied()
                .ok_or_else(|| CytogateError::Other(format!("Event id {id} not found in index")))?;
            flags.push(col[row]);
        }
        Ok(flags)
    }
}

fn validate_columns<'a>(
    index: &[EventId],
    columns: impl Iterator<Item = (&'a str, usize)>,
) -> Result<()> {
    let mut names: Vec<&str> = Vec::new();
    for (name, len) in columns {
        if len != index.len() {
            return Err("All columns must have the same length as the index".into());
        }
        if name.is_empty() {
            return Err("Column names cannot be empty".into());
        }
        names.push(name);
    }
    names.sort_unstable();
    for i in 1..names.len() {
        if names[i] == names[i - 1] {
            return Err("Duplicate column names not allowed".into());
        }
    }
    Ok(())
}

fn build_row_map(index: &[EventId]) -> Result<HashMap<EventId, usize>> {
    let mut row_of = HashMap::with_capacity(index.len());
    for (row, &id) in index.iter().enumerate() {
        if row_of.insert(id, row).is_some() {
            return Err(CytogateError::Other(format!(
                "Duplicate event id {id} in index"
            )));
        }
    }
    Ok(row_of)
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
