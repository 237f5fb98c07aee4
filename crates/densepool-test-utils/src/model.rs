//! Reference-model checking for pool operation sequences.

use std::collections::HashMap;

use densepool::{DensePool, Handle};

/// One step applied to both the pool and the reference model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolOp {
    /// Insert a value; a full pool must reject it without change.
    Insert(u32),
    /// Erase the live handle at dense position `index % len`.
    Erase(usize),
    /// Try to remove a previously erased handle (`index % retired`).
    RemoveStale(usize),
    /// Look up the live handle at dense position `index % len`.
    Lookup(usize),
    /// Drop every live value.
    Clear,
}

/// A pool paired with a `HashMap<Handle, u32>` that must always agree.
pub struct ModelChecker {
    pool: DensePool<u32>,
    model: HashMap<Handle, u32>,
    retired: Vec<Handle>,
}

impl ModelChecker {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: DensePool::new(capacity),
            model: HashMap::new(),
            retired: Vec::new(),
        }
    }

    pub fn pool(&self) -> &DensePool<u32> {
        &self.pool
    }

    /// Handles that have been erased or cleared. None may ever be valid again.
    pub fn retired(&self) -> &[Handle] {
        &self.retired
    }

    /// Apply `op` and compare the pool against the model.
    pub fn apply(&mut self, op: &PoolOp) -> Result<(), String> {
        match *op {
            PoolOp::Insert(value) => {
                let was_full = self.pool.is_full();
                match self.pool.try_insert(value) {
                    Ok(handle) if !was_full => {
                        if self.retired.contains(&handle) {
                            return Err(format!("reissued retired handle {handle}"));
                        }
                        self.model.insert(handle, value);
                    }
                    Ok(handle) => return Err(format!("full pool accepted {handle}")),
                    Err(_) if was_full => {}
                    Err(e) => return Err(format!("insert into non-full pool failed: {e}")),
                }
            }
            PoolOp::Erase(index) => {
                if let Some(handle) = self.nth_live(index) {
                    let value = self.pool.erase(handle);
                    if self.model.remove(&handle) != Some(value) {
                        return Err(format!("erase({handle}) returned {value}"));
                    }
                    self.retired.push(handle);
                }
            }
            PoolOp::RemoveStale(index) => {
                if !self.retired.is_empty() {
                    let handle = self.retired[index % self.retired.len()];
                    if let Some(value) = self.pool.remove(handle) {
                        return Err(format!("stale {handle} removed value {value}"));
                    }
                }
            }
            PoolOp::Lookup(index) => {
                if let Some(handle) = self.nth_live(index) {
                    if self.pool.get(handle) != self.model.get(&handle) {
                        return Err(format!("lookup({handle}) disagrees with model"));
                    }
                }
            }
            PoolOp::Clear => {
                self.pool.clear();
                self.retired.extend(self.model.drain().map(|(h, _)| h));
            }
        }
        self.check()
    }

    /// Full agreement check: structure, contents, and retired handles.
    pub fn check(&self) -> Result<(), String> {
        self.pool.validate().map_err(|e| e.to_string())?;
        if self.pool.len() != self.model.len() {
            return Err(format!(
                "pool has {} values, model has {}",
                self.pool.len(),
                self.model.len()
            ));
        }
        for (&handle, value) in &self.model {
            if self.pool.get(handle) != Some(value) {
                return Err(format!("{handle} lost its value"));
            }
        }
        if let Some(handle) = self.retired.iter().find(|&&h| self.pool.contains(h)) {
            return Err(format!("retired {handle} is valid again"));
        }
        Ok(())
    }

    fn nth_live(&self, index: usize) -> Option<Handle> {
        if self.pool.is_empty() {
            return None;
        }
        self.pool.handles().nth(index % self.pool.len())
    }
}

/// Run `ops` against a fresh pool of `capacity`, stopping at the first
/// divergence. The error names the failing step.
pub fn apply_ops(capacity: usize, ops: &[PoolOp]) -> Result<ModelChecker, String> {
    let mut checker = ModelChecker::new(capacity);
    for (step, op) in ops.iter().enumerate() {
        checker
            .apply(op)
            .map_err(|e| format!("step {step} ({op:?}): {e}"))?;
    }
    Ok(checker)
}
